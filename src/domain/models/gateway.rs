use std::sync::Arc;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatPrompt {
    pub text: String,
    pub session_id: Option<String>,
}

impl ChatPrompt {
    pub fn new(text: &str, session_id: Option<String>) -> ChatPrompt {
        return ChatPrompt {
            text: text.to_string(),
            session_id,
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub session_id: Option<String>,
    pub reply: String,
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalReply {
    pub final_proposal: String,
}

/// Acknowledgement of the email endpoint. The backend makes no promise about
/// its shape, so the body is kept only when it parses as JSON.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmailAck {
    pub body: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("{endpoint} returned an unreadable body: {message}")]
    Decode { endpoint: String, message: String },
}

/// Outcome of a gateway call, as posted back to the UI.
#[derive(Clone, Debug, PartialEq)]
pub enum GatewayReply {
    Greeting(Result<String, GatewayError>),
    Chat(Result<ChatReply, GatewayError>),
    AgentActive(String),
    Proposal(Result<ProposalReply, GatewayError>),
    Email(String, Result<EmailAck, GatewayError>),
}

#[async_trait]
pub trait Gateway {
    /// Opening message of a conversation.
    async fn fetch_greeting(&self) -> Result<String, GatewayError>;

    /// Sends one discovery turn. The session id is omitted on the first
    /// turn, the backend issues one in its reply.
    async fn send_message(&self, prompt: ChatPrompt) -> Result<ChatReply, GatewayError>;

    /// Builds the final proposal for a confirmed discovery session.
    async fn generate_proposal(&self, session_id: &str) -> Result<ProposalReply, GatewayError>;

    async fn send_proposal_email(
        &self,
        session_id: &str,
        email: &str,
    ) -> Result<EmailAck, GatewayError>;
}

pub type GatewayBox = Arc<dyn Gateway + Send + Sync>;
