use std::path::Path;

use crate::error::Result;
use crate::models::Expense;

pub const CSV_HEADER: [&str; 4] = ["date", "category", "description", "amount"];

pub fn write_csv(rows: &[Expense], output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        let amount = format!("{:.2}", row.amount);
        writer.write_record([
            row.date.as_str(),
            row.category.as_str(),
            row.description.as_str(),
            amount.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
