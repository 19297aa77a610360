#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;

/// Agents announced, in order, while a proposal is being generated.
pub const AGENT_SEQUENCE: [&str; 3] = ["BA Agent", "Solution Architect", "Proposal Agent"];

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkflowStep {
    Discovery = 0,
    Confirmed = 1,
    Working = 2,
    ProposalReady = 3,
    Emailed = 4,
}

impl WorkflowStep {
    pub const COUNT: usize = 5;

    pub fn index(&self) -> usize {
        return *self as usize;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Discovery,
    Confirmed,
    Working,
    ProposalReady,
    AwaitingConfirmation { email: String },
    Emailed,
}

impl Phase {
    pub fn step(&self) -> WorkflowStep {
        match self {
            Phase::Discovery => return WorkflowStep::Discovery,
            Phase::Confirmed => return WorkflowStep::Confirmed,
            Phase::Working => return WorkflowStep::Working,
            Phase::ProposalReady => return WorkflowStep::ProposalReady,
            Phase::AwaitingConfirmation { .. } => return WorkflowStep::Emailed,
            Phase::Emailed => return WorkflowStep::Emailed,
        }
    }
}

/// Generation token of a conversation. Bumped on every reset so results of
/// requests issued before it can be told apart and dropped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Epoch(u64);

impl Epoch {
    pub fn next(self) -> Epoch {
        return Epoch(self.0.wrapping_add(1));
    }
}

/// Percentage shown by the agent progress gauge for a given step.
pub fn progress_percent(step: WorkflowStep) -> u16 {
    if step >= WorkflowStep::ProposalReady {
        return 100;
    }
    if step == WorkflowStep::Working {
        return 66;
    }

    return 0;
}
