#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use unicode_width::UnicodeWidthStr;

use super::Role;

pub const THINKING_TEXT: &str = "Thinking…";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Normal,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub thinking: bool,
    kind: MessageKind,
}

impl ChatMessage {
    pub fn new(role: Role, content: &str) -> ChatMessage {
        return ChatMessage {
            role,
            content: content.to_string().replace('\t', "  "),
            thinking: false,
            kind: MessageKind::Normal,
        };
    }

    pub fn new_with_kind(role: Role, kind: MessageKind, content: &str) -> ChatMessage {
        return ChatMessage {
            role,
            content: content.to_string().replace('\t', "  "),
            thinking: false,
            kind,
        };
    }

    /// Transient placeholder shown while a chat reply is outstanding.
    pub fn thinking() -> ChatMessage {
        return ChatMessage {
            role: Role::Assistant,
            content: THINKING_TEXT.to_string(),
            thinking: true,
            kind: MessageKind::Normal,
        };
    }

    pub fn kind(&self) -> MessageKind {
        return self.kind;
    }

    /// Copy of the message holding only the first `chars` characters of its
    /// content.
    pub fn truncated(&self, chars: usize) -> ChatMessage {
        let mut msg = self.clone();
        msg.content = self.content.chars().take(chars).collect();
        return msg;
    }

    pub fn char_count(&self) -> usize {
        return self.content.chars().count();
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.content.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                let word_len = word.width();
                if !current_lines.is_empty() && char_count + word_len > line_max_width {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word_len + 1;
                } else {
                    current_lines.push(word);
                    char_count += word_len + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
