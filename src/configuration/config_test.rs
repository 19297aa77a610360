use anyhow::Result;
use once_cell::sync::Lazy;
use test_utils::insta_snapshot;
use tokio::sync::Mutex;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

// Config is process wide, tests that load it take turns.
static LOAD_LOCK: Lazy<Mutex<()>> = Lazy::new(|| return Mutex::new(()));

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta_snapshot(|| {
        insta::assert_snapshot!(res, @r###"
        # Milliseconds each agent is shown working before the next one starts.
        agent-delay = 1200

        # Base URL of the Xceed AI backend.
        api-url = "http://localhost:8000"

        # Ask whether the proposal email arrived after sending it. [possible values: true, false]
        email-confirmation = true

        # How workflow progress is shown, as a bar along the top or a column on the left. [possible values: status-bar, sidebar]
        navigation = "status-bar"

        # Milliseconds to wait before a chat message is sent.
        reply-delay = 400

        # Time to wait in milliseconds before a backend request times out.
        request-timeout = 60000

        # Milliseconds per character when typing out replies. 0 shows replies at once.
        typing-speed = 15
        "###);
    });
}

#[test]
fn it_has_defaults() {
    assert_eq!(Config::default(ConfigKey::ApiURL), "http://localhost:8000");
    assert_eq!(Config::default(ConfigKey::Navigation), "status-bar");
    assert_eq!(Config::default(ConfigKey::EmailConfirmation), "true");
    assert_eq!(Config::default(ConfigKey::TypingSpeed), "15");
    assert_eq!(Config::default(ConfigKey::AgentDelay), "1200");
    assert_eq!(Config::default(ConfigKey::ReplyDelay), "400");
    assert_eq!(Config::default(ConfigKey::RequestTimeout), "60000");
    assert!(Config::default(ConfigKey::ConfigFile).ends_with("xceed/config.toml"));
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let _lock = LOAD_LOCK.lock().await;
    let matches =
        cli::build().try_get_matches_from(vec!["xceed", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::ApiURL), "http://localhost:8000");
    assert_eq!(Config::get(ConfigKey::Navigation), "sidebar");
    assert_eq!(Config::get(ConfigKey::EmailConfirmation), "false");
    assert_eq!(Config::get(ConfigKey::TypingSpeed), "20");

    return Ok(());
}

#[tokio::test]
async fn it_prefers_flags_over_file() -> Result<()> {
    let _lock = LOAD_LOCK.lock().await;
    let matches = cli::build().try_get_matches_from(vec![
        "xceed",
        "-c",
        "./config.example.toml",
        "--typing-speed",
        "0",
        "--navigation",
        "status-bar",
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::TypingSpeed), "0");
    assert_eq!(Config::get(ConfigKey::Navigation), "status-bar");
    assert_eq!(Config::get(ConfigKey::EmailConfirmation), "false");

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let _lock = LOAD_LOCK.lock().await;
    let matches =
        cli::build().try_get_matches_from(vec!["xceed", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

#[test]
fn it_rejects_unknown_navigation_flag() {
    let res = cli::build().try_get_matches_from(vec!["xceed", "--navigation", "floating"]);
    assert!(res.is_err());
}
