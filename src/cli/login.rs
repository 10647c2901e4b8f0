use crossterm::event::KeyCode;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::{draw_chrome, Form, FormEvent, FormField, Palette};

// Field indices, in the order built by LoginScreen::new()
const USERNAME_IDX: usize = 0;
const PASSWORD_IDX: usize = 1;
const REGISTER_IDX: usize = 2;
const LOGIN_IDX: usize = 3;

pub enum LoginAction {
    Continue,
    Register,
    Login,
    Quit,
}

pub struct LoginScreen {
    form: Form,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                FormField::text("Username"),
                FormField::masked("Password"),
                FormField::button("Register"),
                FormField::button("Login"),
            ]),
        }
    }

    pub fn username(&self) -> &str {
        self.form.value(USERNAME_IDX)
    }

    pub fn password(&self) -> &str {
        self.form.value(PASSWORD_IDX)
    }

    pub fn clear_password(&mut self) {
        self.form.fields[PASSWORD_IDX].clear();
    }

    pub fn handle_key(&mut self, code: KeyCode) -> LoginAction {
        if code == KeyCode::Esc {
            return LoginAction::Quit;
        }
        match self.form.handle_key(code) {
            FormEvent::Activated(REGISTER_IDX) => LoginAction::Register,
            FormEvent::Activated(LOGIN_IDX) => LoginAction::Login,
            _ => LoginAction::Continue,
        }
    }

    pub fn draw(&self, frame: &mut Frame, palette: &Palette) {
        let content = draw_chrome(
            frame,
            palette,
            "Login",
            "Tab=next field  Enter=select  Esc=quit",
        );
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                " Log in or register a new account",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(self.form.lines(palette));
        frame.render_widget(Paragraph::new(lines), content);
    }
}
