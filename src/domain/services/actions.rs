#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::ChatPrompt;
use crate::domain::models::Epoch;
use crate::domain::models::Event;
use crate::domain::models::GatewayBox;
use crate::domain::models::GatewayReply;
use crate::domain::models::AGENT_SEQUENCE;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /generate (/g) - Asks the agents to build your proposal once discovery is confirmed. Pressing Enter on an empty prompt does the same.
- /yes (/y) - Confirms the proposal email arrived.
- /no (/n) - Reports the proposal email did not arrive, so you can enter your address again.
- /reset (/new) - Throws away the conversation and starts a new one.
- /quit /exit (/q) - Exit Xceed.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit.

WORKFLOW:
Chat with Xceed AI until it has confirmed your requirements. The BA Agent, the Solution Architect and the Proposal Agent then prepare your proposal, which can be emailed to you.
        "#;

    return text.trim().to_string();
}

/// Artificial pacing applied around gateway calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionsSettings {
    /// Time each agent label stays up before the next one takes over.
    pub agent_delay: Duration,
    /// Wait before a chat turn is sent.
    pub reply_delay: Duration,
}

impl Default for ActionsSettings {
    fn default() -> ActionsSettings {
        return ActionsSettings {
            agent_delay: Duration::from_millis(1200),
            reply_delay: Duration::from_millis(400),
        };
    }
}

impl ActionsSettings {
    pub fn from_config() -> Result<ActionsSettings> {
        return Ok(ActionsSettings {
            agent_delay: Duration::from_millis(Config::get(ConfigKey::AgentDelay).parse::<u64>()?),
            reply_delay: Duration::from_millis(Config::get(ConfigKey::ReplyDelay).parse::<u64>()?),
        });
    }
}

fn reply(tx: &mpsc::UnboundedSender<Event>, epoch: Epoch, reply: GatewayReply) -> Result<()> {
    tx.send(Event::GatewayReply(epoch, reply))?;
    return Ok(());
}

async fn fetch_greeting(
    gateway: GatewayBox,
    tx: mpsc::UnboundedSender<Event>,
    epoch: Epoch,
) -> Result<()> {
    let res = gateway.fetch_greeting().await;
    return reply(&tx, epoch, GatewayReply::Greeting(res));
}

async fn send_message(
    gateway: GatewayBox,
    settings: ActionsSettings,
    tx: mpsc::UnboundedSender<Event>,
    epoch: Epoch,
    prompt: ChatPrompt,
) -> Result<()> {
    time::sleep(settings.reply_delay).await;
    let res = gateway.send_message(prompt).await;
    return reply(&tx, epoch, GatewayReply::Chat(res));
}

async fn generate_proposal(
    gateway: GatewayBox,
    settings: ActionsSettings,
    tx: mpsc::UnboundedSender<Event>,
    epoch: Epoch,
    session_id: String,
) -> Result<()> {
    // The agent labels are pacing for the user, the backend does all of the
    // work in the single call below.
    for (idx, agent) in AGENT_SEQUENCE.iter().enumerate() {
        reply(&tx, epoch, GatewayReply::AgentActive(agent.to_string()))?;
        if idx + 1 < AGENT_SEQUENCE.len() {
            time::sleep(settings.agent_delay).await;
        }
    }

    let res = gateway.generate_proposal(&session_id).await;
    return reply(&tx, epoch, GatewayReply::Proposal(res));
}

async fn send_proposal_email(
    gateway: GatewayBox,
    tx: mpsc::UnboundedSender<Event>,
    epoch: Epoch,
    session_id: String,
    email: String,
) -> Result<()> {
    let res = gateway.send_proposal_email(&session_id, &email).await;
    return reply(&tx, epoch, GatewayReply::Email(email, res));
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs every received action on its own task until the action channel
    /// closes. Results go back to the UI tagged with the epoch of the action.
    pub async fn start(
        gateway: GatewayBox,
        settings: ActionsSettings,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            tracing::debug!(epoch = ?action.epoch(), ?action, "Dispatching action");

            let worker_gateway = gateway.clone();
            let worker_tx = tx.clone();
            tokio::spawn(async move {
                let res = match action {
                    Action::FetchGreeting(epoch) => {
                        fetch_greeting(worker_gateway, worker_tx, epoch).await
                    }
                    Action::SendMessage(epoch, prompt) => {
                        send_message(worker_gateway, settings, worker_tx, epoch, prompt).await
                    }
                    Action::GenerateProposal(epoch, session_id) => {
                        generate_proposal(worker_gateway, settings, worker_tx, epoch, session_id)
                            .await
                    }
                    Action::SendProposalEmail(epoch, session_id, email) => {
                        send_proposal_email(worker_gateway, worker_tx, epoch, session_id, email)
                            .await
                    }
                };

                if let Err(err) = res {
                    tracing::warn!(error = ?err, "Unable to deliver gateway result, UI has gone away");
                }
            });
        }

        return Ok(());
    }
}
