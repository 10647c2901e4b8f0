use std::path::Path;

use colored::{Color, Colorize};
use comfy_table::{Cell, CellAlignment, Table};

use crate::chart::{PieChart, EMPTY_PLACEHOLDER};
use crate::error::Result;
use crate::fmt::amount;
use crate::session::Session;
use crate::tracker;

const BAR_WIDTH: usize = 30;

const BAR_COLORS: &[Color] = &[
    Color::Blue,
    Color::Yellow,
    Color::Green,
    Color::Red,
    Color::Magenta,
    Color::Cyan,
];

pub fn run(session: &Session, db_path: &Path) -> Result<()> {
    let totals = tracker::category_totals(session, db_path)?;
    println!("{}", format_chart(&PieChart::from_totals(&totals)));
    Ok(())
}

pub fn format_chart(chart: &PieChart) -> String {
    if chart.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    let mut table = Table::new();
    table.set_header(vec!["Category", "Entries", "Amount", "Share", ""]);
    for (i, slice) in chart.slices.iter().enumerate() {
        let filled = (slice.share * BAR_WIDTH as f64).round() as usize;
        let bar = "█".repeat(filled.max(1)).color(BAR_COLORS[i % BAR_COLORS.len()]);
        table.add_row(vec![
            Cell::new(&slice.label),
            Cell::new(slice.count).set_alignment(CellAlignment::Right),
            Cell::new(amount(slice.value)).set_alignment(CellAlignment::Right),
            Cell::new(slice.percent_label()).set_alignment(CellAlignment::Right),
            Cell::new(bar),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(chart.slices.iter().map(|s| s.count).sum::<i64>())
            .set_alignment(CellAlignment::Right),
        Cell::new(amount(chart.total)).set_alignment(CellAlignment::Right),
        Cell::new("100.0%").set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    format!("Expense Distribution\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryTotal;

    #[test]
    fn test_format_chart_shows_shares() {
        let chart = PieChart::from_totals(&[
            CategoryTotal { category: "Food".into(), total: 15.0, count: 2 },
            CategoryTotal { category: "Transport".into(), total: 20.0, count: 1 },
        ]);
        let out = format_chart(&chart);
        assert!(out.starts_with("Expense Distribution"));
        assert!(out.contains("42.9%"));
        assert!(out.contains("57.1%"));
        assert!(out.contains("35.00"));
    }

    #[test]
    fn test_format_chart_placeholder() {
        assert_eq!(format_chart(&PieChart::default()), EMPTY_PLACEHOLDER);
    }
}
