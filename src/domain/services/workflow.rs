#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;

use super::Conversation;
use crate::domain::models::Action;
use crate::domain::models::ChatMessage;
use crate::domain::models::ChatPrompt;
use crate::domain::models::ChatReply;
use crate::domain::models::EmailAck;
use crate::domain::models::Epoch;
use crate::domain::models::GatewayError;
use crate::domain::models::GatewayReply;
use crate::domain::models::MessageKind;
use crate::domain::models::Phase;
use crate::domain::models::ProposalReply;
use crate::domain::models::Role;
use crate::domain::models::WorkflowStep;

pub const BACKEND_ERROR_TEXT: &str = "⚠️ Backend error. Please try again.";
pub const GREETING_ERROR_TEXT: &str =
    "⚠️ Xceed AI can't be reached right now. Type /reset to try again.";
pub const PROPOSAL_ERROR_TEXT: &str =
    "⚠️ We couldn't generate your proposal. Type /generate to try again.";
pub const INVALID_EMAIL_TEXT: &str = "Please enter a valid email address";
pub const EMAIL_ERROR_TEXT: &str = "Failed to send email. Please try again.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pending {
    Greeting,
    Chat,
    Proposal,
    Email,
}

/// Conversation and workflow state of the chat screen. Only the named
/// transitions below mutate it. Transitions that need the backend hand back
/// the `Action` to dispatch and never do I/O themselves.
pub struct Workflow {
    conversation: Conversation,
    session_id: Option<String>,
    phase: Phase,
    epoch: Epoch,
    pending: Option<Pending>,
    active_agent: Option<String>,
    email_error: Option<String>,
    email_confirmation: bool,
}

impl Workflow {
    pub fn new(email_confirmation: bool) -> Workflow {
        return Workflow {
            conversation: Conversation::default(),
            session_id: None,
            phase: Phase::Discovery,
            epoch: Epoch::default(),
            pending: None,
            active_agent: None,
            email_error: None,
            email_confirmation,
        };
    }

    pub fn messages(&self) -> &[ChatMessage] {
        return self.conversation.messages();
    }

    pub fn session_id(&self) -> Option<&str> {
        return self.session_id.as_deref();
    }

    pub fn phase(&self) -> &Phase {
        return &self.phase;
    }

    pub fn step(&self) -> WorkflowStep {
        return self.phase.step();
    }

    pub fn epoch(&self) -> Epoch {
        return self.epoch;
    }

    pub fn pending(&self) -> Option<Pending> {
        return self.pending;
    }

    pub fn active_agent(&self) -> Option<&str> {
        return self.active_agent.as_deref();
    }

    pub fn email_error(&self) -> Option<&str> {
        return self.email_error.as_deref();
    }

    pub fn accepts_chat_input(&self) -> bool {
        return self.phase == Phase::Discovery && self.pending.is_none();
    }

    pub fn can_generate(&self) -> bool {
        return self.phase == Phase::Confirmed
            && self.pending.is_none()
            && self.session_id.as_deref().is_some_and(|id| return !id.is_empty());
    }

    pub fn shows_email_form(&self) -> bool {
        return self.phase == Phase::ProposalReady;
    }

    pub fn awaits_confirmation(&self) -> bool {
        return matches!(self.phase, Phase::AwaitingConfirmation { .. });
    }

    /// Requests the greeting of a fresh conversation.
    pub fn start(&mut self) -> Action {
        self.pending = Some(Pending::Greeting);
        return Action::FetchGreeting(self.epoch);
    }

    pub fn send_message(&mut self, text: &str) -> Option<Action> {
        if text.trim().is_empty() || !self.accepts_chat_input() {
            return None;
        }

        self.conversation.append(ChatMessage::new(Role::Client, text));
        self.conversation.append(ChatMessage::thinking());
        self.pending = Some(Pending::Chat);

        return Some(Action::SendMessage(
            self.epoch,
            ChatPrompt::new(text, self.session_id.clone()),
        ));
    }

    pub fn generate_proposal(&mut self) -> Option<Action> {
        if !self.can_generate() {
            return None;
        }
        let session_id = self.session_id.clone()?;

        self.phase = Phase::Working;
        self.pending = Some(Pending::Proposal);
        self.conversation.append(ChatMessage::new(
            Role::System,
            "✅ Discovery confirmed. Our experts are now working on your solution…",
        ));

        return Some(Action::GenerateProposal(self.epoch, session_id));
    }

    pub fn submit_email(&mut self, email: &str) -> Option<Action> {
        if !self.shows_email_form() || self.pending.is_some() {
            return None;
        }

        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            self.email_error = Some(INVALID_EMAIL_TEXT.to_string());
            return None;
        }
        let session_id = self.session_id.clone()?;

        self.email_error = None;
        self.pending = Some(Pending::Email);

        return Some(Action::SendProposalEmail(
            self.epoch,
            session_id,
            email.to_string(),
        ));
    }

    /// Answer to "Did you receive the email?". Returns false when no such
    /// question is outstanding.
    pub fn confirm_receipt(&mut self, received: bool) -> bool {
        if !self.awaits_confirmation() {
            return false;
        }

        if received {
            self.conversation.append(ChatMessage::new(
                Role::System,
                "🎉 Thanks! Our team will be in touch soon. Feel free to start a new conversation anytime.",
            ));
            self.phase = Phase::Emailed;
        } else {
            self.conversation.append(ChatMessage::new(
                Role::System,
                "⚠️ No worries. Emails sometimes go to Spam or Promotions.",
            ));
            self.conversation.append(ChatMessage::new(
                Role::Assistant,
                "Please re-enter your email and I'll resend it.",
            ));
            self.phase = Phase::ProposalReady;
        }

        return true;
    }

    /// Appends the command reference as a system message. Leaves phase and
    /// pending request alone. Refused while a chat reply is outstanding, as
    /// the reply lands on the trailing thinking placeholder.
    pub fn show_help(&mut self, text: &str) -> bool {
        if self.pending == Some(Pending::Chat) {
            return false;
        }

        self.conversation.append(ChatMessage::new(Role::System, text));
        return true;
    }

    /// Back to a fresh discovery. Session and step are always cleared
    /// together, and replies to requests issued before now are dropped.
    pub fn reset(&mut self) -> Action {
        self.epoch = self.epoch.next();
        self.conversation.reset();
        self.session_id = None;
        self.phase = Phase::Discovery;
        self.pending = None;
        self.active_agent = None;
        self.email_error = None;

        return self.start();
    }

    /// Applies a gateway result. Returns false when the result was dropped,
    /// either because it belongs to a conversation that has since been reset
    /// or because nothing was waiting for it.
    pub fn apply(&mut self, epoch: Epoch, reply: GatewayReply) -> bool {
        if epoch != self.epoch {
            tracing::debug!(?epoch, current = ?self.epoch, "Discarding stale gateway reply");
            return false;
        }

        match reply {
            GatewayReply::Greeting(res) => return self.greeting_received(res),
            GatewayReply::Chat(res) => return self.chat_replied(res),
            GatewayReply::AgentActive(agent) => return self.agent_started(agent),
            GatewayReply::Proposal(res) => return self.proposal_generated(res),
            GatewayReply::Email(email, res) => return self.email_sent(email, res),
        }
    }

    fn greeting_received(&mut self, res: Result<String, GatewayError>) -> bool {
        if self.pending != Some(Pending::Greeting) {
            return false;
        }
        self.pending = None;

        match res {
            Ok(greeting) => {
                self.conversation
                    .append(ChatMessage::new(Role::Assistant, &greeting));
            }
            Err(err) => {
                tracing::warn!(error = %err, "Greeting failed");
                self.conversation.append(ChatMessage::new_with_kind(
                    Role::Assistant,
                    MessageKind::Error,
                    GREETING_ERROR_TEXT,
                ));
            }
        }

        return true;
    }

    fn chat_replied(&mut self, res: Result<ChatReply, GatewayError>) -> bool {
        if self.pending != Some(Pending::Chat) {
            return false;
        }
        self.pending = None;

        match res {
            Ok(reply) => {
                if let Some(session_id) = reply.session_id {
                    if !session_id.is_empty() {
                        self.session_id = Some(session_id);
                    }
                }

                self.conversation
                    .replace_last_if_thinking(ChatMessage::new(Role::Assistant, &reply.reply));

                if reply.confirmed && self.phase == Phase::Discovery {
                    self.phase = Phase::Confirmed;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Chat turn failed");
                self.conversation
                    .replace_last_if_thinking(ChatMessage::new_with_kind(
                        Role::Assistant,
                        MessageKind::Error,
                        BACKEND_ERROR_TEXT,
                    ));
            }
        }

        return true;
    }

    fn agent_started(&mut self, agent: String) -> bool {
        if self.pending != Some(Pending::Proposal) {
            return false;
        }

        self.active_agent = Some(agent);
        return true;
    }

    fn proposal_generated(&mut self, res: Result<ProposalReply, GatewayError>) -> bool {
        if self.pending != Some(Pending::Proposal) {
            return false;
        }
        self.pending = None;
        self.active_agent = None;

        match res {
            Ok(proposal) => {
                self.conversation.append(ChatMessage::new(
                    Role::Assistant,
                    &proposal.final_proposal,
                ));
                self.conversation.append(ChatMessage::new(
                    Role::System,
                    "📧 Would you like us to send this proposal to your email?",
                ));
                self.phase = Phase::ProposalReady;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Proposal generation failed");
                self.conversation.append(ChatMessage::new_with_kind(
                    Role::Assistant,
                    MessageKind::Error,
                    PROPOSAL_ERROR_TEXT,
                ));
                self.phase = Phase::Confirmed;
            }
        }

        return true;
    }

    fn email_sent(&mut self, email: String, res: Result<EmailAck, GatewayError>) -> bool {
        if self.pending != Some(Pending::Email) {
            return false;
        }
        self.pending = None;

        if let Err(err) = res {
            tracing::warn!(error = %err, "Sending proposal email failed");
            self.email_error = Some(EMAIL_ERROR_TEXT.to_string());
            return true;
        }

        self.conversation.append(ChatMessage::new(
            Role::System,
            &format!("📨 Proposal sent to **{email}**"),
        ));

        if self.email_confirmation {
            self.conversation.append(ChatMessage::new(
                Role::Assistant,
                "Did you receive the email?",
            ));
            self.conversation.append(ChatMessage::new(
                Role::System,
                "⏳ It may take 1–2 minutes. Please check Spam / Promotions.",
            ));
            self.phase = Phase::AwaitingConfirmation { email };
        } else {
            self.conversation.append(ChatMessage::new(
                Role::System,
                "🎉 Thanks! Our team will be in touch soon. Feel free to start a new conversation anytime.",
            ));
            self.phase = Phase::Emailed;
        }

        return true;
    }
}
