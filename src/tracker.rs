//! Gated expense operations.
//!
//! Each function checks the session before touching the store, then opens
//! a fresh connection for the duration of the call.

use std::path::Path;

use crate::db::get_connection;
use crate::error::Result;
use crate::expenses::{fetch_all_expenses, insert_expense, ExpenseInput};
use crate::export::write_csv;
use crate::models::{CategoryTotal, Expense};
use crate::reports::fetch_category_totals;
use crate::session::Session;

pub fn add_expense(session: &Session, db_path: &Path, input: &ExpenseInput) -> Result<Expense> {
    let user = session.require()?;
    let new = input.validate()?;
    let conn = get_connection(db_path)?;
    let id = insert_expense(&conn, &new)?;
    tracing::info!(
        id,
        user = %user.username,
        category = %new.category,
        amount = new.amount,
        "expense added"
    );
    Ok(Expense {
        id,
        date: new.date,
        category: new.category,
        description: new.description,
        amount: new.amount,
    })
}

pub fn list_expenses(session: &Session, db_path: &Path) -> Result<Vec<Expense>> {
    session.require()?;
    let conn = get_connection(db_path)?;
    fetch_all_expenses(&conn)
}

pub fn category_totals(session: &Session, db_path: &Path) -> Result<Vec<CategoryTotal>> {
    session.require()?;
    let conn = get_connection(db_path)?;
    fetch_category_totals(&conn)
}

/// Write every expense to a CSV file. Returns the number of rows written.
pub fn export_csv(session: &Session, db_path: &Path, output: &Path) -> Result<usize> {
    session.require()?;
    let conn = get_connection(db_path)?;
    let rows = fetch_all_expenses(&conn)?;
    write_csv(&rows, output)?;
    tracing::info!(rows = rows.len(), path = %output.display(), "expenses exported");
    Ok(rows.len())
}
