#[cfg(test)]
#[path = "loading_test.rs"]
mod tests;

use std::time::Duration;

use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::THINKING_TEXT;

const AGENT_PHASES: [&str; 4] = ["Thinking", "Analyzing", "Designing", "Preparing"];
const DOTS_INTERVAL_MS: u128 = 450;
const PHASE_INTERVAL_MS: u128 = 2200;

#[derive(Default)]
pub struct Loading {}

impl Loading {
    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        frame.render_widget(
            Paragraph::new(THINKING_TEXT)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .padding(Padding::new(1, 1, 0, 0)),
                )
                .alignment(Alignment::Center),
            rect,
        );
    }
}

/// Indicator for the agent currently "working" on the proposal. Purely
/// cosmetic, animated from the time elapsed since the agent started.
pub struct AgentThinking<'a> {
    label: &'a str,
    elapsed: Duration,
}

impl<'a> AgentThinking<'a> {
    pub fn new(label: &'a str, elapsed: Duration) -> AgentThinking<'a> {
        return AgentThinking { label, elapsed };
    }

    pub fn status(&self) -> String {
        let millis = self.elapsed.as_millis();
        let phase_idx = (millis / PHASE_INTERVAL_MS) % AGENT_PHASES.len() as u128;
        let phase = AGENT_PHASES[phase_idx as usize];
        let dots = ".".repeat(((millis / DOTS_INTERVAL_MS) % 4) as usize);

        return format!("{phase}{dots}");
    }

    /// Creeps from 10% towards 90% and stays there until the agent is done.
    pub fn progress(&self) -> u16 {
        let grown = (self.elapsed.as_millis() * 8 / 700).min(80) as u16;
        return 10 + grown;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        let filled = (self.progress() as usize) / 5;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled));

        let lines = vec![
            Line::from(vec![
                Span::from("🤖 "),
                Span::styled(
                    self.label.to_string(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("   {}", self.status()),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                format!("   {bar}"),
                Style::default().fg(Color::Cyan),
            )),
        ];

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .padding(Padding::new(1, 1, 0, 0)),
            ),
            rect,
        );
    }
}
