use chrono::{Datelike, Local, Months, NaiveDate};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::chart::{self, Rgb};
use crate::expenses::Expense;
use crate::format::format_amount;

use super::actions::{widget_action, TuiAction};
use super::TuiWidget;

/// One month of expenses: table on the left, pie chart and legend on the
/// right, arrow keys move between months.
#[derive(Debug)]
pub struct MonthOverview {
    expenses: Vec<Expense>,
    currency: char,
    month: NaiveDate,
}

impl MonthOverview {
    pub fn new(expenses: Vec<Expense>, currency: char) -> Self {
        let today = Local::now().date_naive();
        let month = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
        Self {
            expenses,
            currency,
            month,
        }
    }

    fn shift_month(&mut self, forward: bool) {
        let shifted = if forward {
            self.month.checked_add_months(Months::new(1))
        } else {
            self.month.checked_sub_months(Months::new(1))
        };
        if let Some(month) = shifted {
            self.month = month;
        }
    }

    /// Records of the selected month. Legacy timestamps that do not parse
    /// are display-only and never match a month filter.
    fn month_expenses(&self) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|expense| {
                expense.timestamp().is_some_and(|timestamp| {
                    timestamp.year() == self.month.year()
                        && timestamp.month() == self.month.month()
                })
            })
            .cloned()
            .collect()
    }
}

impl TuiWidget for MonthOverview {
    fn handle_events(&mut self) -> Option<TuiAction> {
        let action = widget_action()?;
        match action {
            TuiAction::PrevMonth => self.shift_month(false),
            TuiAction::NextMonth => self.shift_month(true),
            TuiAction::Exit => {}
        }
        Some(action)
    }

    fn render(&mut self, frame: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(frame.size());

        let month_expenses = self.month_expenses();
        let totals = chart::aggregate(&month_expenses);
        let sectors = chart::layout(&totals);

        let title = format!(" {} (←/→ month, q quits) ", self.month.format("%B %Y"));
        let header = Row::new(vec![
            Cell::new("Date"),
            Cell::new("Category"),
            Cell::new("Amount"),
            Cell::new("Description"),
        ])
        .bg(Color::DarkGray);
        let rows: Vec<Row> = month_expenses
            .iter()
            .map(|expense| {
                Row::new(vec![
                    Cell::new(expense.date_display()),
                    Cell::new(expense.category.label().to_string()),
                    Cell::new(format_amount(self.currency, expense.amount)),
                    Cell::new(expense.description.clone().unwrap_or_default()),
                ])
            })
            .collect();
        let widths = [
            Constraint::Length(16),
            Constraint::Length(13),
            Constraint::Length(12),
            Constraint::Min(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(table, columns[0]);

        let legend = chart::legend(&totals);
        let chart_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(legend.len() as u16 + 2),
            ])
            .split(columns[1]);

        if sectors.is_empty() {
            let empty = Paragraph::new("No expenses this month")
                .block(Block::default().borders(Borders::ALL).title(" Chart "));
            frame.render_widget(empty, chart_rows[0]);
        } else {
            let canvas = Canvas::default()
                .block(Block::default().borders(Borders::ALL).title(" Chart "))
                .x_bounds([-1.1, 1.1])
                .y_bounds([-1.1, 1.1])
                .paint(|ctx| {
                    for sector in &sectors {
                        let color = tui_color(sector.color);
                        // one radial line per degree fills the sector
                        let steps = (sector.sweep_angle.ceil() as usize).max(1);
                        for step in 0..=steps {
                            let angle = sector.start_angle
                                + sector.sweep_angle * step as f64 / steps as f64;
                            let radians = angle.to_radians();
                            ctx.draw(&CanvasLine {
                                x1: 0.0,
                                y1: 0.0,
                                x2: radians.cos(),
                                y2: -radians.sin(),
                                color,
                            });
                        }
                    }
                });
            frame.render_widget(canvas, chart_rows[0]);
        }

        let legend_lines: Vec<Line> = legend
            .into_iter()
            .map(|(label, color)| {
                let amount = totals.get(&label).copied().unwrap_or_default();
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(tui_color(color))),
                    Span::raw(format!(
                        "{:<13} {:>10}",
                        label,
                        format_amount(self.currency, amount)
                    )),
                ])
            })
            .collect();
        let legend = Paragraph::new(legend_lines)
            .block(Block::default().borders(Borders::ALL).title(" Legend "));
        frame.render_widget(legend, chart_rows[1]);
    }
}

fn tui_color(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}
