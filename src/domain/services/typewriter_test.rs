use std::time::Duration;

use super::Typewriter;
use crate::domain::models::ChatMessage;
use crate::domain::models::Role;

fn contents(messages: &[ChatMessage]) -> Vec<String> {
    return messages
        .iter()
        .map(|m| return m.content.to_string())
        .collect();
}

fn is_typing(typewriter: &Typewriter, messages: &[ChatMessage]) -> bool {
    return typewriter.visible(messages).as_slice() != messages;
}

fn typewriter() -> Typewriter {
    return Typewriter::new(Duration::from_millis(10));
}

#[test]
fn it_shows_everything_when_disabled() {
    let mut typewriter = Typewriter::new(Duration::ZERO);
    let messages = vec![ChatMessage::new(Role::Assistant, "Hello there")];

    assert!(!typewriter.tick(Duration::from_millis(10), &messages));
    assert_eq!(typewriter.visible(&messages), messages);
    assert!(!is_typing(&typewriter, &messages));
}

#[test]
fn it_hides_untyped_messages() {
    let typewriter = typewriter();
    let messages = vec![ChatMessage::new(Role::Assistant, "Hello")];

    assert!(typewriter.visible(&messages).is_empty());
    assert!(is_typing(&typewriter, &messages));
}

#[test]
fn it_reveals_per_character() {
    let mut typewriter = typewriter();
    let messages = vec![ChatMessage::new(Role::Assistant, "Hello")];

    assert!(typewriter.tick(Duration::from_millis(30), &messages));
    assert_eq!(contents(&typewriter.visible(&messages)), vec!["Hel"]);

    typewriter.tick(Duration::from_millis(15), &messages);
    assert_eq!(contents(&typewriter.visible(&messages)), vec!["Hell"]);

    // The 5ms left over from the previous tick is kept.
    typewriter.tick(Duration::from_millis(5), &messages);
    assert_eq!(contents(&typewriter.visible(&messages)), vec!["Hello"]);
    assert!(!is_typing(&typewriter, &messages));
}

#[test]
fn it_types_messages_in_order() {
    let mut typewriter = typewriter();
    let messages = vec![
        ChatMessage::new(Role::Assistant, "Hi"),
        ChatMessage::new(Role::System, "Bye"),
    ];

    typewriter.tick(Duration::from_millis(30), &messages);
    assert_eq!(contents(&typewriter.visible(&messages)), vec!["Hi", "B"]);

    typewriter.tick(Duration::from_millis(100), &messages);
    assert_eq!(contents(&typewriter.visible(&messages)), vec!["Hi", "Bye"]);
}

#[test]
fn it_shows_client_messages_at_once() {
    let typewriter = typewriter();
    let messages = vec![ChatMessage::new(Role::Client, "We need a CRM")];

    assert_eq!(typewriter.visible(&messages), messages);
}

#[test]
fn it_holds_on_thinking_then_types_reply() {
    let mut typewriter = typewriter();
    let mut messages = vec![
        ChatMessage::new(Role::Client, "Hi"),
        ChatMessage::thinking(),
    ];

    typewriter.tick(Duration::from_millis(500), &messages);
    assert_eq!(typewriter.visible(&messages), messages);

    messages[1] = ChatMessage::new(Role::Assistant, "Welcome");
    assert_eq!(contents(&typewriter.visible(&messages)), vec!["Hi"]);

    typewriter.tick(Duration::from_millis(20), &messages);
    assert_eq!(contents(&typewriter.visible(&messages)), vec!["Hi", "We"]);
}

#[test]
fn it_finishes_running_reveal() {
    let mut typewriter = typewriter();
    let mut messages = vec![ChatMessage::new(Role::Assistant, "A long greeting")];

    typewriter.tick(Duration::from_millis(20), &messages);
    typewriter.finish(&messages);
    messages.push(ChatMessage::new(Role::Client, "Hi"));

    assert_eq!(
        contents(&typewriter.visible(&messages)),
        vec!["A long greeting", "Hi"]
    );
}

#[test]
fn it_starts_over_after_reset() {
    let mut typewriter = typewriter();
    let messages = vec![
        ChatMessage::new(Role::Assistant, "Hi"),
        ChatMessage::new(Role::Client, "Hello"),
    ];
    typewriter.tick(Duration::from_secs(1), &messages);
    typewriter.reset();

    let fresh = vec![ChatMessage::new(Role::Assistant, "New")];
    assert!(typewriter.visible(&fresh).is_empty());

    typewriter.tick(Duration::from_millis(10), &fresh);
    assert_eq!(contents(&typewriter.visible(&fresh)), vec!["N"]);
}

#[test]
fn it_clamps_to_a_cleared_transcript() {
    let mut typewriter = typewriter();
    let messages = vec![ChatMessage::new(Role::Assistant, "Hi")];
    typewriter.tick(Duration::from_secs(1), &messages);

    typewriter.tick(Duration::from_millis(10), &[]);
    let fresh = vec![ChatMessage::new(Role::Assistant, "New")];
    typewriter.tick(Duration::from_millis(20), &fresh);

    assert_eq!(contents(&typewriter.visible(&fresh)), vec!["Ne"]);
}
