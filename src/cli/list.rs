use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::error::Result;
use crate::fmt::amount;
use crate::models::Expense;
use crate::session::Session;
use crate::tracker;

pub fn run(session: &Session, db_path: &Path) -> Result<()> {
    let rows = tracker::list_expenses(session, db_path)?;
    println!("{}", format_expenses(&rows));
    Ok(())
}

pub fn format_expenses(rows: &[Expense]) -> String {
    if rows.is_empty() {
        return "No expenses recorded yet.".to_string();
    }
    let mut table = Table::new();
    table.set_header(vec!["Date", "Category", "Description", "Amount"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.date),
            Cell::new(&row.category),
            Cell::new(&row.description),
            Cell::new(amount(row.amount)).set_alignment(CellAlignment::Right),
        ]);
    }
    let total: f64 = rows.iter().map(|r| r.amount).sum();
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(format!("{} expenses", rows.len())),
        Cell::new(amount(total)).set_alignment(CellAlignment::Right),
    ]);
    format!("Expenses\n{table}")
}
