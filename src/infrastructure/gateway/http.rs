#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatPrompt;
use crate::domain::models::ChatReply;
use crate::domain::models::EmailAck;
use crate::domain::models::Gateway;
use crate::domain::models::GatewayError;
use crate::domain::models::ProposalReply;

const GREETING: &str = "/greeting";
const CHAT: &str = "/chat";
const GENERATE_PROPOSAL: &str = "/generate-proposal";
const SEND_PROPOSAL_EMAIL: &str = "/send-proposal-email";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GreetingResponse {
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct EmailRequest {
    session_id: String,
    email: String,
}

/// Plain HTTP client for the Xceed AI backend.
pub struct XceedHttp {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl XceedHttp {
    pub fn new(url: &str, timeout: Duration) -> XceedHttp {
        return XceedHttp {
            url: url.trim_end_matches('/').to_string(),
            timeout,
            client: reqwest::Client::new(),
        };
    }

    pub fn from_config() -> Result<XceedHttp> {
        let timeout = Config::get(ConfigKey::RequestTimeout).parse::<u64>()?;
        return Ok(XceedHttp::new(
            &Config::get(ConfigKey::ApiURL),
            Duration::from_millis(timeout),
        ));
    }

    fn endpoint(&self, path: &str) -> String {
        return format!("{url}{path}", url = self.url);
    }

    async fn execute(
        &self,
        path: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GatewayError> {
        tracing::debug!(endpoint = path, "Calling Xceed backend");

        let res = req.timeout(self.timeout).send().await.map_err(|err| {
            tracing::error!(endpoint = path, error = ?err, "Xceed backend is not reachable");
            return GatewayError::Transport {
                endpoint: path.to_string(),
                message: err.to_string(),
            };
        })?;

        let status = res.status().as_u16();
        if !res.status().is_success() {
            tracing::error!(endpoint = path, status = status, "Xceed backend request failed");
            return Err(GatewayError::Status {
                endpoint: path.to_string(),
                status,
            });
        }

        return Ok(res);
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        path: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let res = self.execute(path, req).await?;
        return res.json::<T>().await.map_err(|err| {
            tracing::error!(endpoint = path, error = ?err, "Unreadable Xceed backend response");
            return GatewayError::Decode {
                endpoint: path.to_string(),
                message: err.to_string(),
            };
        });
    }
}

#[async_trait]
impl Gateway for XceedHttp {
    #[allow(clippy::implicit_return)]
    async fn fetch_greeting(&self) -> Result<String, GatewayError> {
        let req = self.client.get(self.endpoint(GREETING));
        let res = self
            .execute_json::<GreetingResponse>(GREETING, req)
            .await?;

        return Ok(res.message);
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(&self, prompt: ChatPrompt) -> Result<ChatReply, GatewayError> {
        let body = ChatRequest {
            message: prompt.text,
            session_id: prompt.session_id,
        };
        let req = self.client.post(self.endpoint(CHAT)).json(&body);

        return self.execute_json::<ChatReply>(CHAT, req).await;
    }

    #[allow(clippy::implicit_return)]
    async fn generate_proposal(&self, session_id: &str) -> Result<ProposalReply, GatewayError> {
        let req = self
            .client
            .post(self.endpoint(GENERATE_PROPOSAL))
            .query(&[("session_id", session_id)]);

        return self
            .execute_json::<ProposalReply>(GENERATE_PROPOSAL, req)
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn send_proposal_email(
        &self,
        session_id: &str,
        email: &str,
    ) -> Result<EmailAck, GatewayError> {
        let body = EmailRequest {
            session_id: session_id.to_string(),
            email: email.to_string(),
        };
        let req = self
            .client
            .post(self.endpoint(SEND_PROPOSAL_EMAIL))
            .json(&body);

        let res = self.execute(SEND_PROPOSAL_EMAIL, req).await?;
        // The acknowledgement is not part of the contract, any 2xx counts.
        let text = res.text().await.unwrap_or_default();

        return Ok(EmailAck {
            body: serde_json::from_str(&text).ok(),
        });
    }
}
