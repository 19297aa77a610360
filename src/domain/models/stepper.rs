#[cfg(test)]
#[path = "stepper_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Gauge;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::progress_percent;
use super::Navigation;
use super::WorkflowStep;

fn label_style(idx: usize, step: WorkflowStep) -> Style {
    if idx < step.index() {
        return Style::default().fg(Color::Green);
    }
    if idx == step.index() {
        return Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
    }

    return Style::default().fg(Color::DarkGray);
}

fn dot_style(idx: usize, step: WorkflowStep) -> Style {
    if idx < step.index() {
        return Style::default().fg(Color::Green);
    }
    if idx == step.index() {
        return Style::default().fg(Color::Blue);
    }

    return Style::default().fg(Color::DarkGray);
}

/// Step indicator chrome, either along the top or down the left side.
pub struct Stepper {
    navigation: Navigation,
    step: WorkflowStep,
}

impl Stepper {
    pub fn new(navigation: Navigation, step: WorkflowStep) -> Stepper {
        return Stepper { navigation, step };
    }

    pub fn status_bar_line(&self) -> Line<'static> {
        let labels = self.navigation.step_labels();
        let mut spans = vec![];

        for (idx, label) in labels.iter().enumerate() {
            spans.push(Span::styled("●", dot_style(idx, self.step)));
            spans.push(Span::styled(
                format!(" {label}"),
                label_style(idx, self.step),
            ));
            if idx < labels.len() - 1 {
                spans.push(Span::styled(
                    " ── ",
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }

        return Line::from(spans);
    }

    pub fn counter(&self) -> String {
        let labels = self.navigation.step_labels();
        return format!(
            "Step {} of {} · {}",
            self.step.index() + 1,
            labels.len(),
            labels[self.step.index()]
        );
    }

    pub fn sidebar_lines(&self) -> Vec<Line<'static>> {
        return self
            .navigation
            .step_labels()
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let mut marker = "•";
                if idx < self.step.index() {
                    marker = "✔";
                }

                return Line::from(Span::styled(
                    format!("{marker} {label}"),
                    label_style(idx, self.step),
                ));
            })
            .collect();
    }

    /// Rows the chrome needs above the chat when rendered as a status bar.
    pub fn status_bar_height(&self) -> u16 {
        if self.step >= WorkflowStep::Working {
            return 4;
        }

        return 3;
    }

    pub fn render_status_bar<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(3), Constraint::Min(0)])
            .split(rect);

        frame.render_widget(
            Paragraph::new(vec![
                self.status_bar_line(),
                Line::from(Span::styled(
                    self.counter(),
                    Style::default().fg(Color::Blue),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .padding(Padding::new(1, 1, 0, 0)),
            ),
            layout[0],
        );

        if self.step >= WorkflowStep::Working {
            self.render_progress(frame, layout[1]);
        }
    }

    pub fn render_sidebar<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Min(0), Constraint::Length(1)])
            .split(rect);

        let mut lines = vec![Line::from(" ")];
        for line in self.sidebar_lines() {
            lines.push(line);
            lines.push(Line::from(" "));
        }

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::RIGHT)
                    .title(Span::styled(
                        "Xceed AI",
                        Style::default().add_modifier(Modifier::BOLD),
                    ))
                    .padding(Padding::new(2, 1, 1, 0)),
            ),
            layout[0],
        );

        if self.step >= WorkflowStep::Working {
            self.render_progress(frame, layout[1]);
        }
    }

    fn render_progress<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
                .percent(progress_percent(self.step)),
            rect,
        );
    }
}
