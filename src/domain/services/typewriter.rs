#[cfg(test)]
#[path = "typewriter_test.rs"]
mod tests;

use std::time::Duration;

use crate::domain::models::ChatMessage;
use crate::domain::models::Role;

/// Character by character reveal of the transcript. Only decides how much of
/// each message is visible; the transcript itself is never touched.
///
/// Messages are revealed in order. Client messages show up at once, a thinking
/// placeholder is shown as is and holds the cursor until it is replaced, and
/// everything after the message being typed stays hidden.
pub struct Typewriter {
    speed: Duration,
    message_idx: usize,
    chars: usize,
    carry: Duration,
}

fn is_instant(message: &ChatMessage) -> bool {
    return message.role == Role::Client;
}

impl Typewriter {
    pub fn new(speed: Duration) -> Typewriter {
        return Typewriter {
            speed,
            message_idx: 0,
            chars: 0,
            carry: Duration::ZERO,
        };
    }

    fn clamp(&mut self, messages: &[ChatMessage]) {
        if self.message_idx > messages.len() {
            self.message_idx = messages.len();
            self.chars = 0;
        }
        if let Some(message) = messages.get(self.message_idx) {
            self.chars = self.chars.min(message.char_count());
        }
    }

    /// Moves the cursor past everything that needs no typing. Stops on a
    /// thinking placeholder.
    fn skip_revealed(&mut self, messages: &[ChatMessage]) -> bool {
        let mut moved = false;
        while let Some(message) = messages.get(self.message_idx) {
            if message.thinking {
                break;
            }
            if !is_instant(message) && self.chars < message.char_count() {
                break;
            }

            self.message_idx += 1;
            self.chars = 0;
            moved = true;
        }

        return moved;
    }

    /// Advances the reveal by `elapsed`. Returns whether anything new became
    /// visible.
    pub fn tick(&mut self, elapsed: Duration, messages: &[ChatMessage]) -> bool {
        if self.speed.is_zero() {
            return false;
        }

        self.clamp(messages);
        let mut budget = self.carry + elapsed;
        let mut changed = false;

        loop {
            changed |= self.skip_revealed(messages);

            let message = match messages.get(self.message_idx) {
                Some(message) if !message.thinking => message,
                _ => {
                    self.carry = Duration::ZERO;
                    break;
                }
            };

            if budget < self.speed {
                self.carry = budget;
                break;
            }

            let affordable = (budget.as_nanos() / self.speed.as_nanos()) as usize;
            let take = affordable.min(message.char_count() - self.chars);
            self.chars += take;
            budget -= self.speed * take as u32;
            changed = true;
        }

        return changed;
    }

    /// Shows everything that is currently in the transcript.
    pub fn finish(&mut self, messages: &[ChatMessage]) {
        self.message_idx = messages.len();
        self.chars = 0;
        self.carry = Duration::ZERO;
    }

    /// Starts over for a new conversation.
    pub fn reset(&mut self) {
        self.message_idx = 0;
        self.chars = 0;
        self.carry = Duration::ZERO;
    }

    pub fn visible(&self, messages: &[ChatMessage]) -> Vec<ChatMessage> {
        if self.speed.is_zero() {
            return messages.to_vec();
        }

        let mut idx = self.message_idx;
        let mut chars = self.chars;
        if idx > messages.len() {
            idx = messages.len();
            chars = 0;
        }

        let mut res = messages[..idx].to_vec();
        for message in &messages[idx..] {
            if is_instant(message) {
                res.push(message.clone());
                chars = 0;
                continue;
            }
            if message.thinking {
                res.push(message.clone());
                break;
            }
            if chars > 0 {
                res.push(message.truncated(chars));
            }
            break;
        }

        return res;
    }
}
