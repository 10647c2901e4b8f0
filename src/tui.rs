use chrono::{Local, Months, NaiveDate};
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use zeroize::Zeroize;

use crate::expenses::DATE_FORMAT;
use crate::settings::Theme;

/// Slice colours, in the order categories are drawn.
pub const SLICE_COLORS: &[Color] = &[
    Color::Rgb(31, 119, 180),
    Color::Rgb(255, 127, 14),
    Color::Rgb(44, 160, 44),
    Color::Rgb(214, 39, 40),
    Color::Rgb(148, 103, 189),
    Color::Rgb(140, 86, 75),
    Color::Rgb(227, 119, 194),
    Color::Rgb(127, 127, 127),
    Color::Rgb(188, 189, 34),
    Color::Rgb(23, 190, 207),
];

pub fn slice_color(index: usize) -> Color {
    SLICE_COLORS[index % SLICE_COLORS.len()]
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub base: Style,
    pub header: Style,
    pub footer: Style,
    pub focus: Style,
    pub selected: Style,
    pub error: Style,
    pub success: Style,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                base: Style::new().fg(Color::White).bg(Color::Rgb(30, 30, 30)),
                header: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                footer: Style::new().fg(Color::DarkGray),
                focus: Style::new().fg(Color::Cyan),
                selected: Style::new()
                    .bg(Color::Rgb(40, 40, 60))
                    .add_modifier(Modifier::BOLD),
                error: Style::new().fg(Color::Red),
                success: Style::new().fg(Color::Rgb(80, 220, 100)),
            },
            Theme::Light => Self {
                base: Style::new().fg(Color::Black).bg(Color::White),
                header: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
                footer: Style::new().fg(Color::Gray),
                focus: Style::new().fg(Color::Rgb(0, 140, 186)),
                selected: Style::new()
                    .bg(Color::Rgb(210, 225, 245))
                    .add_modifier(Modifier::BOLD),
                error: Style::new().fg(Color::Rgb(190, 0, 0)),
                success: Style::new().fg(Color::Rgb(0, 130, 40)),
            },
        }
    }
}

/// Header, separator, content and hint rows shared by every screen.
pub fn screen_areas(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

pub fn draw_chrome(frame: &mut Frame, palette: &Palette, title: &str, hints: &str) -> Rect {
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base), area);
    let [header_area, sep, content_area, hints_area] = screen_areas(area);
    frame.render_widget(
        Paragraph::new(format!(" Expense Tracker: {title}")).style(palette.header),
        header_area,
    );
    let sep_line = "━".repeat(area.width as usize);
    frame.render_widget(Paragraph::new(sep_line).style(palette.footer), sep);
    frame.render_widget(Paragraph::new(format!(" {hints}")).style(palette.footer), hints_area);
    content_area
}

pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

// ---------------------------------------------------------------------------
// Modal dialog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Error,
}

/// A message box that swallows input until dismissed.
#[derive(Debug, Clone)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            title: "Success".into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            title: "Error".into(),
            message: message.into(),
        }
    }

    /// Returns true when the key closes the dialog.
    pub fn dismissed_by(code: KeyCode) -> bool {
        matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
    }

    pub fn draw(&self, frame: &mut Frame, palette: &Palette) {
        let width = (self.message.chars().count() as u16 + 6).clamp(30, 70);
        let rect = centered_rect(frame.area(), width, 7);
        let accent = match self.kind {
            DialogKind::Info => palette.success,
            DialogKind::Error => palette.error,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(format!(" {} ", self.title), accent.add_modifier(Modifier::BOLD)))
            .border_style(accent)
            .style(palette.base);
        let body = vec![
            Line::from(""),
            Line::from(self.message.as_str()),
            Line::from(""),
            Line::from(Span::styled("[ OK ]", palette.focus.add_modifier(Modifier::BOLD))),
        ];
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(body)
                .block(block)
                .centered()
                .wrap(Wrap { trim: true }),
            rect,
        );
    }
}

// ---------------------------------------------------------------------------
// Form fields
// ---------------------------------------------------------------------------

pub enum FieldKind {
    Text,
    /// Text rendered as `*` per character.
    Masked,
    /// Always holds a valid calendar date.
    Date(NaiveDate),
    /// Free text with suggested values reachable via Left/Right.
    Combo(&'static [&'static str]),
    Button,
}

pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub kind: FieldKind,
}

impl FormField {
    pub fn text(label: &'static str) -> Self {
        Self { label, value: String::new(), kind: FieldKind::Text }
    }

    pub fn masked(label: &'static str) -> Self {
        Self { label, value: String::new(), kind: FieldKind::Masked }
    }

    pub fn date(label: &'static str, date: NaiveDate) -> Self {
        Self { label, value: date.format(DATE_FORMAT).to_string(), kind: FieldKind::Date(date) }
    }

    pub fn combo(label: &'static str, options: &'static [&'static str]) -> Self {
        Self { label, value: String::new(), kind: FieldKind::Combo(options) }
    }

    pub fn button(label: &'static str) -> Self {
        Self { label, value: String::new(), kind: FieldKind::Button }
    }

    fn is_button(&self) -> bool {
        matches!(self.kind, FieldKind::Button)
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.kind = FieldKind::Date(date);
        self.value = date.format(DATE_FORMAT).to_string();
    }

    /// Empty the value, overwriting the old contents.
    pub fn clear(&mut self) {
        self.value.zeroize();
    }
}

pub enum FormEvent {
    None,
    /// Enter pressed on the button at this index.
    Activated(usize),
}

pub struct Form {
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focused: 0 }
    }

    pub fn value(&self, idx: usize) -> &str {
        &self.fields[idx].value
    }

    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    fn focus_prev(&mut self) {
        self.focused = if self.focused == 0 {
            self.fields.len() - 1
        } else {
            self.focused - 1
        };
    }

    pub fn handle_key(&mut self, code: KeyCode) -> FormEvent {
        let field = &mut self.fields[self.focused];
        match code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => {
                if field.is_button() {
                    return FormEvent::Activated(self.focused);
                }
                self.focus_next();
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = code == KeyCode::Right;
                if field.is_button() {
                    if forward {
                        self.focus_next();
                    } else {
                        self.focus_prev();
                    }
                } else if let FieldKind::Date(date) = field.kind {
                    let next = if forward { date.succ_opt() } else { date.pred_opt() };
                    if let Some(d) = next {
                        field.set_date(d);
                    }
                } else if let FieldKind::Combo(options) = field.kind {
                    field.value = cycle_option(options, &field.value, forward).to_string();
                }
            }
            KeyCode::PageUp | KeyCode::PageDown => {
                if let FieldKind::Date(date) = field.kind {
                    let next = if code == KeyCode::PageDown {
                        date.checked_add_months(Months::new(1))
                    } else {
                        date.checked_sub_months(Months::new(1))
                    };
                    if let Some(d) = next {
                        field.set_date(d);
                    }
                }
            }
            KeyCode::Char(c) => match field.kind {
                FieldKind::Text | FieldKind::Masked | FieldKind::Combo(_) => field.value.push(c),
                FieldKind::Date(_) if c == 't' => field.set_date(Local::now().date_naive()),
                _ => {}
            },
            KeyCode::Backspace => {
                if matches!(field.kind, FieldKind::Text | FieldKind::Masked | FieldKind::Combo(_)) {
                    field.value.pop();
                }
            }
            _ => {}
        }
        FormEvent::None
    }

    pub fn lines(&self, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let mut buttons: Vec<Span<'static>> = vec![Span::raw("   ")];

        for (i, field) in self.fields.iter().enumerate() {
            let is_focused = i == self.focused;
            let value_style = if is_focused { palette.focus } else { Style::default() };
            let label_style = if is_focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let label = Span::styled(format!("   {:<14} ", field.label), label_style);
            let cursor = if is_focused { "_" } else { "" };

            match &field.kind {
                FieldKind::Text => {
                    lines.push(Line::from(vec![
                        label,
                        Span::styled(format!("{}{cursor}", field.value), value_style),
                    ]));
                }
                FieldKind::Masked => {
                    let stars = "*".repeat(field.value.chars().count());
                    lines.push(Line::from(vec![
                        label,
                        Span::styled(format!("{stars}{cursor}"), value_style),
                    ]));
                }
                FieldKind::Date(_) | FieldKind::Combo(_) => {
                    let arrows = if is_focused { ("< ", " >") } else { ("  ", "  ") };
                    let shown = if field.value.is_empty() && !is_focused {
                        "-".to_string()
                    } else {
                        field.value.clone()
                    };
                    lines.push(Line::from(vec![
                        label,
                        Span::styled(format!("{}{shown}{}", arrows.0, arrows.1), value_style),
                    ]));
                }
                FieldKind::Button => {
                    let style = if is_focused {
                        palette.selected.patch(palette.focus)
                    } else {
                        Style::default()
                    };
                    buttons.push(Span::styled(format!("[ {} ]", field.label), style));
                    buttons.push(Span::raw("  "));
                }
            }
        }

        if buttons.len() > 1 {
            lines.push(Line::from(""));
            lines.push(Line::from(buttons));
        }
        lines
    }
}

/// Next or previous suggestion relative to the current value. A value
/// that is not one of the options starts from the first (or last).
pub fn cycle_option<'a>(options: &'a [&'a str], current: &str, forward: bool) -> &'a str {
    if options.is_empty() {
        return "";
    }
    let pos = options.iter().position(|o| *o == current);
    let idx = match (pos, forward) {
        (None, true) => 0,
        (None, false) => options.len() - 1,
        (Some(i), true) => (i + 1) % options.len(),
        (Some(i), false) => (i + options.len() - 1) % options.len(),
    };
    options[idx]
}
