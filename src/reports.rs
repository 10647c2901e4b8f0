use rusqlite::Connection;

use crate::db::numeric_value;
use crate::error::{ExpenseError, Result};
use crate::models::CategoryTotal;

/// Sum of amounts per distinct category over the whole table, ordered by
/// category name.
///
/// Amounts are read with `numeric_value`, the same rule the listing uses,
/// so a category total always equals the sum of its listed rows. SQLite's
/// `SUM` would instead count the numeric prefix of legacy text values.
pub fn fetch_category_totals(conn: &Connection) -> Result<Vec<CategoryTotal>> {
    let mut stmt = conn.prepare("SELECT category, amount FROM expenses ORDER BY category, id")?;
    let mut rows = stmt.query([])?;

    let mut totals: Vec<CategoryTotal> = Vec::new();
    while let Some(row) = rows.next()? {
        let category = row.get::<_, Option<String>>(0)?.unwrap_or_default();
        let amount = numeric_value(row.get_ref(1)?);
        if let Some(last) = totals.last_mut().filter(|t| t.category == category) {
            last.total += amount;
            last.count += 1;
            continue;
        }
        totals.push(CategoryTotal {
            category,
            total: amount,
            count: 1,
        });
    }

    if let Some(t) = totals.iter().find(|t| !t.total.is_finite()) {
        return Err(ExpenseError::Other(format!(
            "Total for category {:?} is out of range",
            t.category
        )));
    }
    Ok(totals)
}
