use std::path::{Path, PathBuf};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use super::chart_view::{ChartAction, ChartView};
use super::expense_form::{ExpenseAction, ExpenseScreen};
use super::login::{LoginAction, LoginScreen};
use crate::browser::{BrowseAction, ExpenseBrowser};
use crate::db::{db_path, ensure_schema};
use crate::error::Result;
use crate::session::Session;
use crate::settings::{load_settings, save_settings, Theme};
use crate::tracker;
use crate::tui::{Dialog, Palette};
use crate::users;

enum Screen {
    Login(LoginScreen),
    Main,
    Browse(ExpenseBrowser),
    Chart(ChartView),
}

/// State of the interactive application.
pub struct App {
    db_path: PathBuf,
    session: Session,
    screen: Screen,
    /// Created after login; survives visits to the list and chart screens.
    form: Option<ExpenseScreen>,
    dialog: Option<Dialog>,
    theme: Theme,
    quit: bool,
}

impl App {
    pub fn new(db_path: PathBuf, theme: Theme) -> Self {
        Self {
            db_path,
            session: Session::new(),
            screen: Screen::Login(LoginScreen::new()),
            form: None,
            dialog: None,
            theme,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let palette = self.palette();
        match &mut self.screen {
            Screen::Login(login) => login.draw(frame, &palette),
            Screen::Main => {
                if let Some(form) = &self.form {
                    form.draw(frame, &palette);
                }
            }
            Screen::Browse(browser) => browser.draw(frame, &palette),
            Screen::Chart(view) => view.draw(frame, &palette),
        }
        if let Some(dialog) = &self.dialog {
            dialog.draw(frame, &palette);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if self.dialog.is_some() {
            if Dialog::dismissed_by(code) {
                self.dialog = None;
            }
            return;
        }

        match &mut self.screen {
            Screen::Login(login) => match login.handle_key(code) {
                LoginAction::Continue => {}
                LoginAction::Register => self.register(),
                LoginAction::Login => self.login(),
                LoginAction::Quit => self.quit = true,
            },
            Screen::Main => {
                let action = match self.form.as_mut() {
                    Some(form) => form.handle_key(code),
                    None => ExpenseAction::Quit,
                };
                match action {
                    ExpenseAction::Continue => {}
                    ExpenseAction::Add => self.add_expense(),
                    ExpenseAction::Show => self.show_expenses(),
                    ExpenseAction::Plot => self.plot_expenses(),
                    ExpenseAction::ToggleTheme => self.toggle_theme(),
                    ExpenseAction::Quit => self.quit = true,
                }
            }
            Screen::Browse(browser) => {
                if let BrowseAction::Close = browser.handle_key(code) {
                    self.screen = Screen::Main;
                }
            }
            Screen::Chart(view) => {
                if let ChartAction::Close = view.handle_key(code) {
                    self.screen = Screen::Main;
                }
            }
        }
    }

    fn register(&mut self) {
        let Screen::Login(login) = &mut self.screen else {
            return;
        };
        let result = users::register(&self.db_path, login.username(), login.password());
        login.clear_password();
        self.dialog = Some(match result {
            Ok(_) => Dialog::info("User registered successfully!"),
            Err(e) => Dialog::error(e.to_string()),
        });
    }

    fn login(&mut self) {
        let Screen::Login(login) = &mut self.screen else {
            return;
        };
        let username = login.username().to_string();
        let result = self
            .session
            .login(&self.db_path, &username, login.password())
            .map(|user| user.username.clone());
        login.clear_password();
        match result {
            Ok(name) => {
                self.form = Some(ExpenseScreen::new(&name, Local::now().date_naive()));
                self.screen = Screen::Main;
                self.dialog = Some(Dialog::info("Login successful!"));
            }
            Err(e) => self.dialog = Some(Dialog::error(e.to_string())),
        }
    }

    fn add_expense(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match tracker::add_expense(&self.session, &self.db_path, &form.input()) {
            Ok(_) => {
                form.reset(Local::now().date_naive());
                self.dialog = Some(Dialog::info("Expense added successfully!"));
            }
            Err(e) => {
                tracing::warn!(error = %e, "add expense failed");
                self.dialog = Some(Dialog::error(e.to_string()));
            }
        }
    }

    fn show_expenses(&mut self) {
        match tracker::list_expenses(&self.session, &self.db_path) {
            Ok(rows) => self.screen = Screen::Browse(ExpenseBrowser::new(rows)),
            Err(e) => self.dialog = Some(Dialog::error(e.to_string())),
        }
    }

    fn plot_expenses(&mut self) {
        match tracker::category_totals(&self.session, &self.db_path) {
            Ok(totals) => self.screen = Screen::Chart(ChartView::new(&totals)),
            Err(e) => self.dialog = Some(Dialog::error(e.to_string())),
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        let mut settings = load_settings();
        settings.theme = self.theme;
        if let Err(e) = save_settings(&settings) {
            tracing::warn!(error = %e, "could not persist theme");
        }
    }
}

/// Run the interactive application until the user quits.
pub fn run(data_dir: &Path) -> Result<()> {
    let db = db_path(data_dir);
    ensure_schema(&db)?;
    let mut app = App::new(db, load_settings().theme);

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break Ok(());
                }
                app.handle_key(key.code);
                if app.should_quit() {
                    break Ok(());
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}
