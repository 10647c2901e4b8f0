use chrono::NaiveDate;
use crossterm::event::KeyCode;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::expenses::{ExpenseInput, CATEGORY_SUGGESTIONS};
use crate::tui::{draw_chrome, Form, FormEvent, FormField, Palette};

// Field indices, in the order built by ExpenseScreen::new()
const DATE_IDX: usize = 0;
const CATEGORY_IDX: usize = 1;
const DESC_IDX: usize = 2;
const AMOUNT_IDX: usize = 3;
const ADD_IDX: usize = 4;
const SHOW_IDX: usize = 5;
const PLOT_IDX: usize = 6;
const THEME_IDX: usize = 7;

pub enum ExpenseAction {
    Continue,
    Add,
    Show,
    Plot,
    ToggleTheme,
    Quit,
}

pub struct ExpenseScreen {
    form: Form,
    greeting: String,
}

impl ExpenseScreen {
    pub fn new(username: &str, today: NaiveDate) -> Self {
        Self {
            form: Form::new(vec![
                FormField::date("Date", today),
                FormField::combo("Category", CATEGORY_SUGGESTIONS),
                FormField::text("Description"),
                FormField::text("Amount"),
                FormField::button("Add Expense"),
                FormField::button("Show Expenses"),
                FormField::button("Plot Expenses"),
                FormField::button("Toggle Theme"),
            ]),
            greeting: format!("Hello, {username}"),
        }
    }

    pub fn input(&self) -> ExpenseInput {
        ExpenseInput {
            date: self.form.value(DATE_IDX).to_string(),
            category: self.form.value(CATEGORY_IDX).to_string(),
            description: self.form.value(DESC_IDX).to_string(),
            amount: self.form.value(AMOUNT_IDX).to_string(),
        }
    }

    /// Back to defaults after a successful add. Focus stays put so repeated
    /// entry only needs the fields retyped.
    pub fn reset(&mut self, today: NaiveDate) {
        self.form.fields[DATE_IDX].set_date(today);
        for idx in [CATEGORY_IDX, DESC_IDX, AMOUNT_IDX] {
            self.form.fields[idx].clear();
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> ExpenseAction {
        if code == KeyCode::Esc {
            return ExpenseAction::Quit;
        }
        match self.form.handle_key(code) {
            FormEvent::Activated(ADD_IDX) => ExpenseAction::Add,
            FormEvent::Activated(SHOW_IDX) => ExpenseAction::Show,
            FormEvent::Activated(PLOT_IDX) => ExpenseAction::Plot,
            FormEvent::Activated(THEME_IDX) => ExpenseAction::ToggleTheme,
            _ => ExpenseAction::Continue,
        }
    }

    pub fn draw(&self, frame: &mut Frame, palette: &Palette) {
        let hints = if self.form.focused == DATE_IDX {
            "Left/Right=day  PgUp/PgDn=month  t=today  Tab=next  Esc=quit"
        } else if self.form.focused == CATEGORY_IDX {
            "Type a category or Left/Right for suggestions  Tab=next  Esc=quit"
        } else {
            "Tab=next field  Enter=select  Esc=quit"
        };
        let content = draw_chrome(frame, palette, &self.greeting, hints);
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(" New Expense", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
        ];
        lines.extend(self.form.lines(palette));
        frame.render_widget(Paragraph::new(lines), content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn type_text(screen: &mut ExpenseScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(KeyCode::Char(c));
        }
    }

    fn filled() -> ExpenseScreen {
        let mut screen = ExpenseScreen::new("amy", today());
        screen.handle_key(KeyCode::Left);
        screen.handle_key(KeyCode::Tab);
        screen.handle_key(KeyCode::Right);
        screen.handle_key(KeyCode::Tab);
        type_text(&mut screen, "Groceries");
        screen.handle_key(KeyCode::Tab);
        type_text(&mut screen, "23.40");
        screen
    }

    #[test]
    fn test_input_reflects_fields() {
        let screen = filled();
        let input = screen.input();
        assert_eq!(input.date, "2025-06-14");
        assert_eq!(input.category, "Food");
        assert_eq!(input.description, "Groceries");
        assert_eq!(input.amount, "23.40");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut screen = filled();
        screen.reset(today());
        let input = screen.input();
        assert_eq!(input.date, "2025-06-15");
        assert!(input.category.is_empty());
        assert!(input.description.is_empty());
        assert!(input.amount.is_empty());
    }

    #[test]
    fn test_buttons_map_to_actions() {
        let mut screen = filled();
        screen.handle_key(KeyCode::Tab);
        assert!(matches!(screen.handle_key(KeyCode::Enter), ExpenseAction::Add));
        screen.handle_key(KeyCode::Right);
        assert!(matches!(screen.handle_key(KeyCode::Enter), ExpenseAction::Show));
        screen.handle_key(KeyCode::Right);
        assert!(matches!(screen.handle_key(KeyCode::Enter), ExpenseAction::Plot));
        screen.handle_key(KeyCode::Right);
        assert!(matches!(screen.handle_key(KeyCode::Enter), ExpenseAction::ToggleTheme));
        assert!(matches!(screen.handle_key(KeyCode::Esc), ExpenseAction::Quit));
    }
}
