use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::fmt::amount;
use crate::models::Expense;
use crate::tui::{draw_chrome, Palette};

const PAGE_SIZE: usize = 20;

pub enum BrowseAction {
    Continue,
    Close,
}

/// Read-only, scrollable table of every expense.
pub struct ExpenseBrowser {
    rows: Vec<Expense>,
    total: f64,
    table_state: TableState,
}

impl ExpenseBrowser {
    pub fn new(rows: Vec<Expense>) -> Self {
        let total = rows.iter().map(|r| r.amount).sum();
        let mut table_state = TableState::default();
        if !rows.is_empty() {
            table_state.select(Some(0));
        }
        Self {
            rows,
            total,
            table_state,
        }
    }

    fn move_by(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.table_state.select(Some(next));
    }

    pub fn handle_key(&mut self, code: KeyCode) -> BrowseAction {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return BrowseAction::Close,
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE_SIZE as isize)),
            KeyCode::PageDown => self.move_by(PAGE_SIZE as isize),
            KeyCode::Home => self.move_by(isize::MIN),
            KeyCode::End => self.move_by(isize::MAX),
            _ => {}
        }
        BrowseAction::Continue
    }

    pub fn draw(&mut self, frame: &mut Frame, palette: &Palette) {
        let content = draw_chrome(
            frame,
            palette,
            "Expenses",
            "Up/Down=scroll  PgUp/PgDn=page  Home/End  Esc=back",
        );

        let [table_area, summary_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(content);

        if self.rows.is_empty() {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from("   No expenses yet. Add one from the main screen."),
                ]),
                table_area,
            );
            return;
        }

        let header = Row::new(vec!["Date", "Category", "Description", "Amount"]).style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .patch(palette.footer),
        );
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|e| {
                Row::new(vec![
                    Cell::from(e.date.clone()),
                    Cell::from(e.category.clone()),
                    Cell::from(e.description.clone()),
                    Cell::from(Line::from(amount(e.amount)).right_aligned()),
                ])
            })
            .collect();
        let widths = [
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Fill(1),
            Constraint::Length(14),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(palette.selected)
            .highlight_symbol(" > ");
        frame.render_stateful_widget(table, table_area, &mut self.table_state);

        let position = self.table_state.selected().map(|i| i + 1).unwrap_or(0);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(format!(" {} of {} expenses   Total: ", position, self.rows.len())),
                Span::styled(amount(self.total), palette.success),
            ])),
            summary_area,
        );
    }
}
