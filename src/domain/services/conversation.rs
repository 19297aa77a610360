#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::domain::models::ChatMessage;

/// Ordered transcript of a conversation.
#[derive(Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Swaps the trailing thinking placeholder for `message`. Appends instead
    /// when the transcript doesn't end with one. Returns whether a
    /// placeholder was replaced.
    pub fn replace_last_if_thinking(&mut self, message: ChatMessage) -> bool {
        if let Some(last) = self.messages.last_mut() {
            if last.thinking {
                *last = message;
                return true;
            }
        }

        self.messages.push(message);
        return false;
    }

    pub fn reset(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        return &self.messages;
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        return self.messages.last();
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }
}
