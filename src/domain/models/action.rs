use super::ChatPrompt;
use super::Epoch;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    FetchGreeting(Epoch),
    SendMessage(Epoch, ChatPrompt),
    /// Session id.
    GenerateProposal(Epoch, String),
    /// Session id and email address.
    SendProposalEmail(Epoch, String, String),
}

impl Action {
    pub fn epoch(&self) -> Epoch {
        match self {
            Action::FetchGreeting(epoch) => return *epoch,
            Action::SendMessage(epoch, _) => return *epoch,
            Action::GenerateProposal(epoch, _) => return *epoch,
            Action::SendProposalEmail(epoch, _, _) => return *epoch,
        }
    }
}
