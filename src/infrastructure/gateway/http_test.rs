use std::time::Duration;

use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::proposal_fixture;

use super::XceedHttp;
use crate::domain::models::ChatPrompt;
use crate::domain::models::Gateway;
use crate::domain::models::GatewayError;

fn gateway(url: &str) -> XceedHttp {
    return XceedHttp::new(url, Duration::from_millis(2000));
}

#[test]
fn it_trims_trailing_slash() {
    let gateway = gateway("http://localhost:8000/");
    assert_eq!(gateway.endpoint("/chat"), "http://localhost:8000/chat");
}

#[tokio::test]
async fn it_fetches_greeting() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/greeting")
        .with_status(200)
        .with_body(r#"{"message":"Hi! I'm Xceed AI. What are you building?"}"#)
        .create_async()
        .await;

    let res = gateway(&server.url()).fetch_greeting().await?;

    assert_eq!(res, "Hi! I'm Xceed AI. What are you building?");
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_omits_missing_session_id() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({ "message": "Hi" })))
        .with_status(200)
        .with_body(r#"{"session_id":"abc","reply":"Tell me about your needs","confirmed":false}"#)
        .create_async()
        .await;

    let res = gateway(&server.url())
        .send_message(ChatPrompt::new("Hi", None))
        .await?;

    assert_eq!(res.session_id.as_deref(), Some("abc"));
    assert_eq!(res.reply, "Tell me about your needs");
    assert!(!res.confirmed);
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_sends_session_id() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(
            json!({ "message": "About 40 reps", "session_id": "abc" }),
        ))
        .with_status(200)
        .with_body(r#"{"session_id":"abc","reply":"Got it, discovery is complete.","confirmed":true}"#)
        .create_async()
        .await;

    let res = gateway(&server.url())
        .send_message(ChatPrompt::new("About 40 reps", Some("abc".to_string())))
        .await?;

    assert!(res.confirmed);
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_reports_status_errors() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .with_status(500)
        .create_async()
        .await;

    let res = gateway(&server.url())
        .send_message(ChatPrompt::new("Hi", None))
        .await;

    assert_eq!(
        res,
        Err(GatewayError::Status {
            endpoint: "/chat".to_string(),
            status: 500
        })
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn it_reports_unreadable_bodies() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/greeting")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let res = gateway(&server.url()).fetch_greeting().await;

    assert!(matches!(res, Err(GatewayError::Decode { .. })));
    mock.assert_async().await;
}

#[tokio::test]
async fn it_reports_unreachable_backend() {
    let res = gateway("http://127.0.0.1:1").fetch_greeting().await;
    assert!(matches!(res, Err(GatewayError::Transport { .. })));
}

#[tokio::test]
async fn it_generates_proposal() -> Result<()> {
    let body = json!({ "final_proposal": proposal_fixture() }).to_string();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate-proposal")
        .match_query(Matcher::UrlEncoded(
            "session_id".to_string(),
            "abc".to_string(),
        ))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let res = gateway(&server.url()).generate_proposal("abc").await?;

    assert_eq!(res.final_proposal, proposal_fixture());
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_sends_proposal_email() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/send-proposal-email")
        .match_body(Matcher::Json(
            json!({ "session_id": "abc", "email": "jane@acme.com" }),
        ))
        .with_status(200)
        .with_body(r#"{"status":"sent"}"#)
        .create_async()
        .await;

    let res = gateway(&server.url())
        .send_proposal_email("abc", "jane@acme.com")
        .await?;

    assert_eq!(res.body, Some(json!({ "status": "sent" })));
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_accepts_any_email_ack() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/send-proposal-email")
        .with_status(202)
        .with_body("queued")
        .create_async()
        .await;

    let res = gateway(&server.url())
        .send_proposal_email("abc", "jane@acme.com")
        .await?;

    assert_eq!(res.body, None);
    mock.assert_async().await;
    return Ok(());
}
