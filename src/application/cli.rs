use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Navigation;
use crate::domain::services::actions::help_text;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

/// Directory of the JSON debug log written when `RUST_LOG` mentions xceed.
pub fn debug_log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("XCEED_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("xceed");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Xceed")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Xceed with environment variable RUST_LOG=xceed")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiURL.to_string())
        .short('u')
        .long(ConfigKey::ApiURL.to_string())
        .env("XCEED_API_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the Xceed AI backend. [default: {}]",
            Config::default(ConfigKey::ApiURL)
        ));
}

fn arg_navigation() -> Arg {
    return Arg::new(ConfigKey::Navigation.to_string())
        .short('n')
        .long(ConfigKey::Navigation.to_string())
        .env("XCEED_NAVIGATION")
        .num_args(1)
        .help(format!(
            "How workflow progress is shown, as a bar along the top or a column on the left. [default: {}]",
            Config::default(ConfigKey::Navigation)
        ))
        .value_parser(PossibleValuesParser::new(Navigation::VARIANTS));
}

fn arg_email_confirmation() -> Arg {
    return Arg::new(ConfigKey::EmailConfirmation.to_string())
        .long(ConfigKey::EmailConfirmation.to_string())
        .env("XCEED_EMAIL_CONFIRMATION")
        .num_args(1)
        .help(format!(
            "Ask whether the proposal email arrived after sending it. [default: {}]",
            Config::default(ConfigKey::EmailConfirmation)
        ))
        .value_parser(PossibleValuesParser::new(["true", "false"]));
}

fn arg_typing_speed() -> Arg {
    return Arg::new(ConfigKey::TypingSpeed.to_string())
        .long(ConfigKey::TypingSpeed.to_string())
        .env("XCEED_TYPING_SPEED")
        .num_args(1)
        .help(format!(
            "Milliseconds per character when typing out replies. 0 shows replies at once. [default: {}]",
            Config::default(ConfigKey::TypingSpeed)
        ));
}

fn arg_agent_delay() -> Arg {
    return Arg::new(ConfigKey::AgentDelay.to_string())
        .long(ConfigKey::AgentDelay.to_string())
        .env("XCEED_AGENT_DELAY")
        .num_args(1)
        .help(format!(
            "Milliseconds each agent is shown working before the next one starts. [default: {}]",
            Config::default(ConfigKey::AgentDelay)
        ));
}

fn arg_reply_delay() -> Arg {
    return Arg::new(ConfigKey::ReplyDelay.to_string())
        .long(ConfigKey::ReplyDelay.to_string())
        .env("XCEED_REPLY_DELAY")
        .num_args(1)
        .help(format!(
            "Milliseconds to wait before a chat message is sent. [default: {}]",
            Config::default(ConfigKey::ReplyDelay)
        ));
}

fn arg_request_timeout() -> Arg {
    return Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("XCEED_REQUEST_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before a backend request times out. [default: {}]",
            Config::default(ConfigKey::RequestTimeout)
        ));
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start a new conversation with Xceed AI.");
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:")
                || line.starts_with("HOTKEYS:")
                || line.starts_with("WORKFLOW:")
            {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("xceed")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(arg_api_url().global(true))
        .arg(arg_navigation().global(true))
        .arg(arg_email_confirmation().global(true))
        .arg(arg_typing_speed().global(true))
        .arg(arg_agent_delay().global(true))
        .arg(arg_reply_delay().global(true))
        .arg(arg_request_timeout().global(true))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("XCEED_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

/// Handles the command line. Returns whether the chat UI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = debug_log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
