#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

#[cfg(target_os = "macos")]
use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::Arg;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::Navigation;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AgentDelay,
    ApiURL,
    ConfigFile,
    EmailConfirmation,
    Navigation,
    ReplyDelay,
    RequestTimeout,
    TypingSpeed,
}

pub struct Config {}

fn find_arg(cmd: &Command, key: ConfigKey) -> Option<&Arg> {
    let long = key.to_string();
    return cmd
        .get_arguments()
        .find(|e| return e.get_long() == Some(long.as_str()));
}

fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
    if let Some(arg) = find_arg(cmd, key) {
        return arg
            .get_possible_values()
            .iter()
            .map(|e| return e.get_name().to_string())
            .collect::<Vec<String>>();
    }

    return vec![];
}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        #[cfg(not(target_os = "macos"))]
        let config_dir = dirs::config_dir();
        #[cfg(target_os = "macos")]
        let config_dir = env::var("HOME")
            .ok()
            .map(|home| return path::PathBuf::from(home).join(".config"));

        let config_path = config_dir
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("xceed/config.toml")
            .to_string_lossy()
            .to_string();
        let default_navigation = Navigation::StatusBar.to_string();

        let res = match key {
            ConfigKey::AgentDelay => "1200",
            ConfigKey::ApiURL => "http://localhost:8000",
            ConfigKey::EmailConfirmation => "true",
            ConfigKey::Navigation => &default_navigation,
            ConfigKey::ReplyDelay => "400",
            ConfigKey::RequestTimeout => "60000",
            ConfigKey::TypingSpeed => "15",

            // Special
            ConfigKey::ConfigFile => &config_path,
        };

        return res.to_string();
    }

    /// Loads defaults, then the config file, then CLI flags and environment
    /// variables, each layer overriding the previous one.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let possible_values = possible_values(&cmd, key);

                    let val_str = if let Some(val_int) = val.as_integer() {
                        if val_int < 0 {
                            bail!(format!(
                                "config.toml has an invalid value for key '{key}': {val_int}\nValue must not be negative"
                            ));
                        }
                        val_int.to_string()
                    } else if let Some(val_bool) = val.as_bool() {
                        val_bool.to_string()
                    } else if let Some(val_str) = val.as_str() {
                        val_str.to_string()
                    } else {
                        bail!(format!(
                            "config.toml has an unsupported value type for key '{key}'"
                        ));
                    };

                    if val_str.is_empty() {
                        continue;
                    }
                    if !possible_values.is_empty() && !possible_values.contains(&val_str) {
                        bail!(format!(
                            "config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}",
                            possible_values.join(", ")
                        ));
                    }
                    Config::set(key, &val_str);
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            config_file = config_file,
            api_url = Config::get(ConfigKey::ApiURL),
            navigation = Config::get(ConfigKey::Navigation),
            email_confirmation = Config::get(ConfigKey::EmailConfirmation),
            typing_speed = Config::get(ConfigKey::TypingSpeed),
            agent_delay = Config::get(ConfigKey::AgentDelay),
            reply_delay = Config::get(ConfigKey::ReplyDelay),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = find_arg(&cmd, key)?;
                let help = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default();

                let mut description = help
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let possible_values = possible_values(&cmd, key);
                if !possible_values.is_empty() {
                    description = format!(
                        "{description} [possible values: {}]",
                        possible_values.join(", ")
                    );
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<u64>().is_ok() || val.parse::<bool>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
