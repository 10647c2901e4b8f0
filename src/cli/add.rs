use std::path::Path;

use chrono::Local;
use colored::Colorize;

use crate::error::Result;
use crate::expenses::{ExpenseInput, DATE_FORMAT};
use crate::fmt::amount;
use crate::session::Session;
use crate::tracker;

pub fn run(
    session: &Session,
    db_path: &Path,
    date: Option<String>,
    category: String,
    description: String,
    amount_text: String,
) -> Result<()> {
    let input = ExpenseInput {
        date: date.unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string()),
        category,
        description,
        amount: amount_text,
    };
    let expense = tracker::add_expense(session, db_path, &input)?;
    println!(
        "{} #{} {} {} {}",
        "Expense added:".green(),
        expense.id,
        expense.date,
        expense.category,
        amount(expense.amount)
    );
    Ok(())
}
