use std::time::Duration;

use ratatui::prelude::Rect;
use tui_textarea::Input;
use tui_textarea::Key;

use super::AppState;
use super::Submission;
use crate::domain::models::Action;
use crate::domain::models::ChatReply;
use crate::domain::models::EmailAck;
use crate::domain::models::GatewayError;
use crate::domain::models::GatewayReply;
use crate::domain::models::Navigation;
use crate::domain::models::Phase;
use crate::domain::models::ProposalReply;
use crate::domain::models::Role;
use crate::domain::models::ScreenConfig;
use crate::domain::models::WorkflowStep;

fn is_typing(app_state: &AppState) -> bool {
    let messages = app_state.workflow.messages();
    return app_state.typewriter.visible(messages).as_slice() != messages;
}

fn screen(typing_speed: u64) -> ScreenConfig {
    return ScreenConfig {
        navigation: Navigation::StatusBar,
        email_confirmation: true,
        typing_speed: Duration::from_millis(typing_speed),
    };
}

fn app_state(typing_speed: u64) -> AppState {
    let mut app_state = AppState::new(screen(typing_speed));
    app_state.set_rect(Rect::new(0, 0, 80, 20));
    app_state.start();
    let epoch = app_state.workflow.epoch();
    app_state.handle_gateway_reply(
        epoch,
        GatewayReply::Greeting(Ok("Hi! What are you looking to build?".to_string())),
    );

    return app_state;
}

fn confirmed(app_state: &mut AppState) {
    app_state.submit("We need a CRM");
    let epoch = app_state.workflow.epoch();
    app_state.handle_gateway_reply(
        epoch,
        GatewayReply::Chat(Ok(ChatReply {
            session_id: Some("abc".to_string()),
            reply: "Discovery complete.".to_string(),
            confirmed: true,
        })),
    );
}

fn proposal_ready(app_state: &mut AppState) {
    confirmed(app_state);
    app_state.submit("/generate");
    let epoch = app_state.workflow.epoch();
    app_state.handle_gateway_reply(
        epoch,
        GatewayReply::Proposal(Ok(ProposalReply {
            final_proposal: "# Proposal".to_string(),
        })),
    );
}

#[test]
fn it_dispatches_chat_messages() {
    let mut app_state = app_state(0);
    let res = app_state.submit("  Hi  ");

    match res {
        Submission::Dispatch(Action::SendMessage(_, prompt)) => {
            assert_eq!(prompt.text, "Hi");
            assert_eq!(prompt.session_id, None);
        }
        other => panic!("unexpected submission {other:?}"),
    }
    assert_eq!(app_state.workflow.messages().len(), 3);
    assert!(!app_state.bubble_list.is_empty());
}

#[test]
fn it_rejects_blank_chat_input() {
    let mut app_state = app_state(0);
    assert_eq!(app_state.submit("   "), Submission::Rejected);
    assert_eq!(app_state.workflow.messages().len(), 1);
}

#[test]
fn it_quits() {
    let mut app_state = app_state(0);
    assert_eq!(app_state.submit("/quit"), Submission::Quit);
    assert_eq!(app_state.submit("/q"), Submission::Quit);
    assert_eq!(app_state.submit("/exit"), Submission::Quit);
}

#[test]
fn it_shows_help() {
    let mut app_state = app_state(0);
    assert_eq!(app_state.submit("/help"), Submission::Handled);

    let last = app_state.workflow.messages().last().unwrap();
    assert_eq!(last.role, Role::System);
    assert!(last.content.contains("/generate"));
}

#[test]
fn it_holds_help_until_the_reply_arrives() {
    let mut app_state = app_state(0);
    app_state.submit("We need a CRM");
    assert_eq!(app_state.submit("/help"), Submission::Rejected);

    let epoch = app_state.workflow.epoch();
    app_state.handle_gateway_reply(
        epoch,
        GatewayReply::Chat(Ok(ChatReply {
            session_id: Some("abc".to_string()),
            reply: "How many reps?".to_string(),
            confirmed: false,
        })),
    );
    assert!(app_state.workflow.messages().iter().all(|m| return !m.thinking));

    assert_eq!(app_state.submit("/help"), Submission::Handled);
    assert_eq!(app_state.workflow.messages().last().unwrap().role, Role::System);
}

#[test]
fn it_generates_on_empty_enter_once_confirmed() {
    let mut app_state = app_state(0);
    confirmed(&mut app_state);

    assert_eq!(app_state.submit("more details"), Submission::Rejected);
    match app_state.submit("") {
        Submission::Dispatch(Action::GenerateProposal(_, session_id)) => {
            assert_eq!(session_id, "abc");
        }
        other => panic!("unexpected submission {other:?}"),
    }
    assert_eq!(app_state.workflow.phase(), &Phase::Working);
}

#[test]
fn it_refuses_generate_during_discovery() {
    let mut app_state = app_state(0);
    assert_eq!(app_state.submit("/g"), Submission::Rejected);
    assert_eq!(app_state.workflow.step(), WorkflowStep::Discovery);
}

#[test]
fn it_tracks_agent_time() {
    let mut app_state = app_state(0);
    confirmed(&mut app_state);
    app_state.submit("/generate");
    assert!(app_state.agent_thinking().is_none());

    let epoch = app_state.workflow.epoch();
    app_state.handle_gateway_reply(epoch, GatewayReply::AgentActive("BA Agent".to_string()));
    assert!(app_state.tick(Duration::from_millis(2200)));
    assert_eq!(
        app_state.agent_thinking().unwrap().status(),
        "Analyzing"
    );

    app_state.handle_gateway_reply(
        epoch,
        GatewayReply::AgentActive("Solution Architect".to_string()),
    );
    assert_eq!(app_state.agent_thinking().unwrap().status(), "Thinking");
}

#[test]
fn it_validates_email_locally() {
    let mut app_state = app_state(0);
    proposal_ready(&mut app_state);

    assert_eq!(app_state.submit("not-an-email"), Submission::Rejected);
    assert!(app_state.workflow.email_error().is_some());

    match app_state.submit("jane@acme.com") {
        Submission::DispatchKeepingInput(Action::SendProposalEmail(_, session_id, email)) => {
            assert_eq!(session_id, "abc");
            assert_eq!(email, "jane@acme.com");
        }
        other => panic!("unexpected submission {other:?}"),
    }
}

#[test]
fn it_clears_the_email_input_once_sent() {
    let mut app_state = app_state(0);
    proposal_ready(&mut app_state);
    assert!(!app_state.take_clear_input());

    app_state.submit("jane@acme.com");
    let epoch = app_state.workflow.epoch();
    app_state.handle_gateway_reply(
        epoch,
        GatewayReply::Email(
            "jane@acme.com".to_string(),
            Err(GatewayError::Status {
                endpoint: "/send-proposal-email".to_string(),
                status: 502,
            }),
        ),
    );
    assert!(!app_state.take_clear_input());
    assert!(app_state.workflow.shows_email_form());

    app_state.submit("jane@acme.com");
    app_state.handle_gateway_reply(
        epoch,
        GatewayReply::Email("jane@acme.com".to_string(), Ok(EmailAck::default())),
    );
    assert!(app_state.take_clear_input());
    assert!(!app_state.take_clear_input());
}

#[test]
fn it_answers_with_y_and_n_keys() {
    let mut app_state = app_state(0);
    let key = |c: char| {
        return Input {
            key: Key::Char(c),
            ctrl: false,
            alt: false,
        };
    };
    assert_eq!(app_state.answer_key(&key('y')), None);

    proposal_ready(&mut app_state);
    app_state.submit("jane@acme.com");
    let epoch = app_state.workflow.epoch();
    app_state.handle_gateway_reply(
        epoch,
        GatewayReply::Email("jane@acme.com".to_string(), Ok(EmailAck::default())),
    );

    assert_eq!(app_state.answer_key(&key('x')), Some(Submission::Rejected));
    assert_eq!(app_state.answer_key(&key('n')), Some(Submission::Handled));
    assert!(app_state.workflow.shows_email_form());
    assert_eq!(app_state.answer_key(&key('n')), None);
}

#[test]
fn it_answers_the_email_question() {
    let mut app_state = app_state(0);
    proposal_ready(&mut app_state);
    app_state.submit("jane@acme.com");
    let epoch = app_state.workflow.epoch();
    app_state.handle_gateway_reply(
        epoch,
        GatewayReply::Email("jane@acme.com".to_string(), Ok(EmailAck::default())),
    );
    assert!(app_state.workflow.awaits_confirmation());

    assert_eq!(app_state.submit("maybe"), Submission::Rejected);
    assert_eq!(app_state.submit("y"), Submission::Handled);
    assert_eq!(app_state.workflow.phase(), &Phase::Emailed);

    match app_state.submit("") {
        Submission::Dispatch(Action::FetchGreeting(epoch)) => {
            assert_eq!(epoch, app_state.workflow.epoch());
        }
        other => panic!("unexpected submission {other:?}"),
    }
    assert!(app_state.workflow.messages().is_empty());
    assert_eq!(app_state.workflow.session_id(), None);
}

#[test]
fn it_resets_from_anywhere() {
    let mut app_state = app_state(0);
    confirmed(&mut app_state);
    let old_epoch = app_state.workflow.epoch();

    assert!(matches!(
        app_state.submit("/reset"),
        Submission::Dispatch(Action::FetchGreeting(_))
    ));
    assert_eq!(app_state.workflow.step(), WorkflowStep::Discovery);
    assert!(app_state.bubble_list.is_empty());

    assert!(!app_state.handle_gateway_reply(
        old_epoch,
        GatewayReply::Greeting(Ok("Late hello".to_string()))
    ));
    assert!(app_state.workflow.messages().is_empty());
}

#[test]
fn it_types_out_replies() {
    let mut app_state = app_state(10);
    assert!(is_typing(&app_state));

    app_state.tick(Duration::from_secs(10));
    assert!(!is_typing(&app_state));
}

#[test]
fn it_finishes_typing_on_send() {
    let mut app_state = app_state(10);
    assert!(is_typing(&app_state));

    app_state.submit("Hi");
    let visible = app_state.typewriter.visible(app_state.workflow.messages());
    assert_eq!(visible[0].content, "Hi! What are you looking to build?");
    assert_eq!(visible.len(), 3);
}
