use std::path::Path;

use crate::db::{db_path, get_connection};
use crate::error::Result;
use crate::expenses::expense_count;
use crate::fmt::format_bytes;
use crate::users::user_count;

pub fn run(data_dir: &Path) -> Result<()> {
    let db = db_path(data_dir);

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db.display());

    if db.exists() {
        let size = std::fs::metadata(&db)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db)?;
        let tables: i64 = conn.query_row(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name IN ('expenses', 'users')",
            [],
            |r| r.get(0),
        )?;
        if tables < 2 {
            println!();
            println!("Database is not initialized. Run `expensetrack init` to set up.");
            return Ok(());
        }

        println!();
        println!("Expenses:   {}", expense_count(&conn)?);
        println!("Users:      {}", user_count(&conn)?);
    } else {
        println!();
        println!("Database not found. Run `expensetrack init` to set up.");
    }

    Ok(())
}
