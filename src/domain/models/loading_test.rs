use std::time::Duration;

use super::AgentThinking;

#[test]
fn it_starts_thinking_without_dots() {
    let agent = AgentThinking::new("BA Agent", Duration::ZERO);
    assert_eq!(agent.status(), "Thinking");
    assert_eq!(agent.progress(), 10);
}

#[test]
fn it_animates_dots() {
    let agent = AgentThinking::new("BA Agent", Duration::from_millis(950));
    assert_eq!(agent.status(), "Thinking..");

    let agent = AgentThinking::new("BA Agent", Duration::from_millis(1800));
    assert_eq!(agent.status(), "Thinking");
}

#[test]
fn it_rotates_phases() {
    let agent = AgentThinking::new("Solution Architect", Duration::from_millis(2200));
    assert_eq!(agent.status(), "Analyzing");

    let agent = AgentThinking::new("Solution Architect", Duration::from_millis(8800));
    assert_eq!(agent.status(), "Thinking...");
}

#[test]
fn it_caps_progress() {
    let agent = AgentThinking::new("Proposal Agent", Duration::from_secs(60));
    assert_eq!(agent.progress(), 90);
}
