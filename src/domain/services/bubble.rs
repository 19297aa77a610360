#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use crate::domain::models::ChatMessage;
use crate::domain::models::MessageKind;
use crate::domain::models::Role;

#[derive(Debug, PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Center,
    Right,
}

impl BubbleAlignment {
    pub fn for_role(role: Role) -> BubbleAlignment {
        match role {
            Role::Client => return BubbleAlignment::Right,
            Role::System => return BubbleAlignment::Center,
            Role::Assistant | Role::Agent => return BubbleAlignment::Left,
        }
    }
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a ChatMessage,
    window_max_width: usize,
}

pub struct BubbleConfig {
    /// Columns a bubble row adds around its text: "│ " + " │".
    pub border_elements_length: usize,
    /// Column kept free for the scrollbar.
    pub scrollbar_length: usize,
    pub outer_padding_percentage: f32,
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a ChatMessage,
        alignment: BubbleAlignment,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            border_elements_length: 4,
            scrollbar_length: 1,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();
        let lines = self
            .message
            .as_string_lines(max_line_length)
            .into_iter()
            .map(|line| {
                return self.text_to_line(line, max_line_length);
            })
            .collect();

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn label(&self) -> String {
        return self.message.role.to_string();
    }

    fn outer_padding(&self, bubble_width: usize) -> (String, String) {
        let style_config = Bubble::style_config();
        let free = self
            .window_max_width
            .saturating_sub(bubble_width + style_config.scrollbar_length);

        match self.alignment {
            BubbleAlignment::Left => return ("".to_string(), " ".repeat(free)),
            BubbleAlignment::Right => return (" ".repeat(free), "".to_string()),
            BubbleAlignment::Center => {
                return (" ".repeat(free / 2), " ".repeat(free - free / 2));
            }
        }
    }

    fn text_to_line(&self, text: String, max_line_length: usize) -> Line<'static> {
        let fill = " ".repeat(max_line_length.saturating_sub(text.width()));
        let (left, right) =
            self.outer_padding(max_line_length + Bubble::style_config().border_elements_length);

        return Line::from(vec![
            Span::from(left),
            self.border_span("│ ".to_string()),
            Span::styled(text, self.text_style()),
            self.border_span(format!("{fill} │")),
            Span::from(right),
        ]);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Keep a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        let line_border_width = style_config.border_elements_length
            + style_config.scrollbar_length
            + min_bubble_padding_length;

        let mut max_line_length = self
            .message
            .content
            .lines()
            .map(|line| {
                return line.width();
            })
            .max()
            .unwrap_or(0);

        let available = self.window_max_width.saturating_sub(line_border_width);
        if max_line_length > available {
            max_line_length = available;
        }

        let label_len = self.label().width();
        if max_line_length < label_len {
            max_line_length = label_len;
        }

        return max_line_length.max(1);
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        let label = self.label();
        // Add 2 for the spaces inside the vertical bars.
        let top_fill = "─".repeat((max_line_length + 2).saturating_sub(label.width()));
        let bottom_fill = "─".repeat(max_line_length + 2);
        let (left, right) =
            self.outer_padding(max_line_length + Bubble::style_config().border_elements_length);

        let mut res = vec![self.border_line(&left, format!("╭{label}{top_fill}╮"), &right)];
        res.extend(lines);
        res.push(self.border_line(&left, format!("╰{bottom_fill}╯"), &right));

        return res;
    }

    fn border_style(&self) -> Style {
        if self.message.kind() == MessageKind::Error {
            return Style::default().fg(Color::Red);
        }

        match self.message.role {
            Role::Client => return Style::default().fg(Color::Blue),
            Role::Agent => return Style::default().fg(Color::Cyan),
            Role::System => return Style::default().fg(Color::DarkGray),
            Role::Assistant => return Style::default(),
        }
    }

    fn text_style(&self) -> Style {
        if self.message.thinking {
            return Style::default()
                .add_modifier(Modifier::DIM)
                .add_modifier(Modifier::ITALIC);
        }
        if self.message.role == Role::System {
            return Style::default().fg(Color::Gray);
        }

        return Style::default();
    }

    fn border_span(&self, text: String) -> Span<'static> {
        return Span::styled(text, self.border_style());
    }

    fn border_line(&self, left: &str, bar: String, right: &str) -> Line<'static> {
        return Line::from(vec![
            Span::from(left.to_string()),
            self.border_span(bar),
            Span::from(right.to_string()),
        ]);
    }
}
