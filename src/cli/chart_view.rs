use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::chart::{PieChart, EMPTY_PLACEHOLDER};
use crate::fmt::amount;
use crate::models::CategoryTotal;
use crate::tui::{centered_rect, draw_chrome, slice_color, Palette};

const RASTER_STEPS: usize = 160;
const LABEL_RADIUS: f64 = 0.62;

pub enum ChartAction {
    Continue,
    Close,
}

pub struct ChartView {
    chart: PieChart,
    /// Canvas points per slice, computed once.
    points: Vec<Vec<(f64, f64)>>,
}

impl ChartView {
    pub fn new(totals: &[CategoryTotal]) -> Self {
        let chart = PieChart::from_totals(totals);
        let points = chart.rasterize(RASTER_STEPS);
        Self { chart, points }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> ChartAction {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => ChartAction::Close,
            _ => ChartAction::Continue,
        }
    }

    pub fn draw(&self, frame: &mut Frame, palette: &Palette) {
        let content = draw_chrome(frame, palette, "Expense Distribution", "Esc=back");

        if self.chart.is_empty() {
            let rect = centered_rect(content, EMPTY_PLACEHOLDER.len() as u16 + 4, 3);
            frame.render_widget(
                Paragraph::new(EMPTY_PLACEHOLDER)
                    .centered()
                    .block(Block::default().borders(Borders::ALL).border_style(palette.footer)),
                rect,
            );
            return;
        }

        let [pie_area, legend_area] =
            Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1)]).areas(content);
        self.draw_pie(frame, square_area(pie_area));
        self.draw_legend(frame, legend_area, palette);
    }

    fn draw_pie(&self, frame: &mut Frame, area: Rect) {
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0])
            .paint(|ctx| {
                for (i, coords) in self.points.iter().enumerate() {
                    ctx.draw(&Points {
                        coords,
                        color: slice_color(i),
                    });
                }
                ctx.layer();
                for slice in &self.chart.slices {
                    let (x, y) = slice.label_position(LABEL_RADIUS);
                    ctx.print(
                        x,
                        y,
                        Span::styled(slice.percent_label(), Style::default().add_modifier(Modifier::BOLD)),
                    );
                }
            });
        frame.render_widget(canvas, area);
    }

    fn draw_legend(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(" Categories", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
        ];
        for (i, slice) in self.chart.slices.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(" ██ ", Style::default().fg(slice_color(i))),
                Span::raw(format!("{:<14} {:>10} {:>7}", slice.label, amount(slice.value), slice.percent_label())),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw(format!("    {:<14} ", "Total")),
            Span::styled(format!("{:>10}", amount(self.chart.total)), palette.success),
        ]));
        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Largest area that renders as a circle. Terminal cells are roughly twice
/// as tall as they are wide.
fn square_area(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    centered_rect(area, height * 2, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_area_keeps_aspect() {
        let r = square_area(Rect::new(0, 0, 100, 20));
        assert_eq!((r.width, r.height), (40, 20));
        let r = square_area(Rect::new(0, 0, 30, 40));
        assert_eq!((r.width, r.height), (30, 15));
    }

    #[test]
    fn test_view_precomputes_points_per_slice() {
        let totals = vec![
            CategoryTotal { category: "Food".into(), total: 15.0, count: 2 },
            CategoryTotal { category: "Transport".into(), total: 20.0, count: 1 },
        ];
        let mut view = ChartView::new(&totals);
        assert_eq!(view.points.len(), 2);
        assert!(view.points.iter().all(|p| !p.is_empty()));
        assert!(matches!(view.handle_key(KeyCode::Esc), ChartAction::Close));
    }

    #[test]
    fn test_empty_view() {
        let view = ChartView::new(&[]);
        assert!(view.chart.is_empty());
        assert!(view.points.is_empty());
    }
}
