use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::numeric_value;
use crate::error::{ExpenseError, Result};
use crate::models::{Expense, NewExpense};

pub const CATEGORY_SUGGESTIONS: &[&str] = &["Food", "Transport", "Shopping", "Medicine", "Other"];

/// Category used when the form leaves the field blank.
pub const FALLBACK_CATEGORY: &str = "Other";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest single amount accepted. Keeps category sums finite.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Raw form values as typed by the user, before validation.
#[derive(Debug, Clone, Default)]
pub struct ExpenseInput {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

impl ExpenseInput {
    pub fn validate(&self) -> Result<NewExpense> {
        let date = parse_date(&self.date)?;
        let amount = parse_amount(&self.amount)?;
        let category = match self.category.trim() {
            "" => FALLBACK_CATEGORY.to_string(),
            c => c.to_string(),
        };
        Ok(NewExpense {
            date: date.format(DATE_FORMAT).to_string(),
            category,
            description: self.description.trim().to_string(),
            amount,
        })
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ExpenseError::InvalidDate(raw.to_string()))
}

/// Parse a user-entered amount. Accepts an optional leading `$` and
/// thousands separators; rejects empty, non-numeric, negative values and
/// anything above `MAX_AMOUNT`.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if (0.0..=MAX_AMOUNT).contains(&v) => Ok(v),
        _ => Err(ExpenseError::InvalidAmount(raw.to_string())),
    }
}

pub fn insert_expense(conn: &Connection, expense: &NewExpense) -> Result<i64> {
    conn.execute(
        "INSERT INTO expenses (date, category, description, amount) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![expense.date, expense.category, expense.description, expense.amount],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn fetch_all_expenses(conn: &Connection) -> Result<Vec<Expense>> {
    let mut stmt =
        conn.prepare("SELECT id, date, category, description, amount FROM expenses ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Expense {
                id: row.get(0)?,
                date: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                category: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                amount: numeric_value(row.get_ref(4)?),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn expense_count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT count(*) FROM expenses", [], |r| r.get(0))?)
}
