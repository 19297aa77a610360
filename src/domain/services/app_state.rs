#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::time::Duration;

use ratatui::prelude::Rect;
use tui_textarea::Input;
use tui_textarea::Key;

use super::actions::help_text;
use super::BubbleList;
use super::Scroll;
use super::Typewriter;
use super::Workflow;
use crate::domain::models::Action;
use crate::domain::models::AgentThinking;
use crate::domain::models::Epoch;
use crate::domain::models::GatewayReply;
use crate::domain::models::Phase;
use crate::domain::models::ScreenConfig;
use crate::domain::models::SlashCommand;

/// What the UI loop should do with a submitted line of input.
#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// Consumed without any backend call. Clear the input.
    Handled,
    /// Not accepted in the current phase. Keep the input as typed.
    Rejected,
    /// Consumed, and the action must be sent to the actions worker.
    Dispatch(Action),
    /// Like `Dispatch`, but the input stays until `take_clear_input` reports
    /// the request succeeded.
    DispatchKeepingInput(Action),
    Quit,
}

pub struct AppState {
    pub bubble_list: BubbleList,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub screen: ScreenConfig,
    pub scroll: Scroll,
    pub typewriter: Typewriter,
    pub workflow: Workflow,
    agent_elapsed: Duration,
    clear_input: bool,
}

impl AppState {
    pub fn new(screen: ScreenConfig) -> AppState {
        return AppState {
            bubble_list: BubbleList::new(),
            last_known_height: 0,
            last_known_width: 0,
            typewriter: Typewriter::new(screen.typing_speed),
            workflow: Workflow::new(screen.email_confirmation),
            scroll: Scroll::default(),
            screen,
            agent_elapsed: Duration::ZERO,
            clear_input: false,
        };
    }

    /// First action of the session.
    pub fn start(&mut self) -> Action {
        return self.workflow.start();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn agent_thinking(&self) -> Option<AgentThinking<'_>> {
        return self
            .workflow
            .active_agent()
            .map(|label| return AgentThinking::new(label, self.agent_elapsed));
    }

    pub fn handle_gateway_reply(&mut self, epoch: Epoch, reply: GatewayReply) -> bool {
        let agent_before = self.workflow.active_agent().map(|e| return e.to_string());
        let was_email_form = self.workflow.shows_email_form();
        if !self.workflow.apply(epoch, reply) {
            return false;
        }

        if was_email_form && !self.workflow.shows_email_form() {
            self.clear_input = true;
        }

        if self.workflow.active_agent() != agent_before.as_deref() {
            self.agent_elapsed = Duration::ZERO;
        }
        self.content_changed();

        return true;
    }

    /// Whether the input kept by `DispatchKeepingInput` can now be cleared.
    pub fn take_clear_input(&mut self) -> bool {
        return std::mem::take(&mut self.clear_input);
    }

    /// Maps a key press to an answer while the email question is open.
    /// Returns `None` when the key is not an answer and should reach the
    /// input as usual.
    pub fn answer_key(&mut self, input: &Input) -> Option<Submission> {
        if !self.workflow.awaits_confirmation() {
            return None;
        }

        match input {
            Input {
                key: Key::Char('y' | 'Y'),
                ctrl: false,
                alt: false,
            } => return Some(self.confirm_receipt(true)),
            Input {
                key: Key::Char('n' | 'N'),
                ctrl: false,
                alt: false,
            } => return Some(self.confirm_receipt(false)),
            _ => return Some(Submission::Rejected),
        }
    }

    /// Advances the timers driven by UI ticks. Returns whether a redraw is
    /// needed.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let mut changed = false;
        if self.workflow.active_agent().is_some() {
            self.agent_elapsed += elapsed;
            changed = true;
        }

        if self.typewriter.tick(elapsed, self.workflow.messages()) {
            self.content_changed();
            changed = true;
        }

        return changed;
    }

    pub fn submit(&mut self, text: &str) -> Submission {
        let text = text.trim();

        if let Some(command) = SlashCommand::parse(text) {
            if command.is_quit() {
                return Submission::Quit;
            }
            if command.is_help() {
                self.typewriter.finish(self.workflow.messages());
                if !self.workflow.show_help(&help_text()) {
                    return Submission::Rejected;
                }
                self.content_changed();
                return Submission::Handled;
            }
            if command.is_reset() {
                return self.reset();
            }
            if command.is_generate() {
                return self.generate_proposal();
            }
            if command.is_yes() || command.is_no() {
                return self.confirm_receipt(command.is_yes());
            }
        }

        match self.workflow.phase() {
            Phase::Discovery => {
                if text.is_empty() || !self.workflow.accepts_chat_input() {
                    return Submission::Rejected;
                }
                self.typewriter.finish(self.workflow.messages());
                let action = self.workflow.send_message(text);
                self.content_changed();
                return dispatch_or_reject(action);
            }
            Phase::Confirmed => {
                if text.is_empty() {
                    return self.generate_proposal();
                }
                return Submission::Rejected;
            }
            Phase::Working => {
                return Submission::Rejected;
            }
            Phase::ProposalReady => match self.workflow.submit_email(text) {
                Some(action) => return Submission::DispatchKeepingInput(action),
                None => return Submission::Rejected,
            },
            Phase::AwaitingConfirmation { .. } => match text.to_lowercase().as_str() {
                "y" | "yes" => return self.confirm_receipt(true),
                "n" | "no" => return self.confirm_receipt(false),
                _ => return Submission::Rejected,
            },
            Phase::Emailed => {
                return self.reset();
            }
        }
    }

    fn reset(&mut self) -> Submission {
        let action = self.workflow.reset();
        self.clear_input = false;
        self.typewriter.reset();
        self.agent_elapsed = Duration::ZERO;
        self.content_changed();

        return Submission::Dispatch(action);
    }

    fn generate_proposal(&mut self) -> Submission {
        self.typewriter.finish(self.workflow.messages());
        let action = self.workflow.generate_proposal();
        self.content_changed();

        return dispatch_or_reject(action);
    }

    fn confirm_receipt(&mut self, received: bool) -> Submission {
        self.typewriter.finish(self.workflow.messages());
        if !self.workflow.confirm_receipt(received) {
            return Submission::Rejected;
        }
        self.content_changed();

        return Submission::Handled;
    }

    fn content_changed(&mut self) {
        self.sync_dependants();
        self.scroll.last();
    }

    fn sync_dependants(&mut self) {
        let visible = self.typewriter.visible(self.workflow.messages());
        self.bubble_list
            .set_messages(&visible, self.last_known_width.into());

        self.scroll.set_state(
            self.bubble_list.len(),
            self.last_known_height.into(),
        );
    }
}

fn dispatch_or_reject(action: Option<Action>) -> Submission {
    match action {
        Some(action) => return Submission::Dispatch(action),
        None => return Submission::Rejected,
    }
}
