#[cfg(test)]
#[path = "screen_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::WorkflowStep;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Navigation {
    /// Step dots along the top of the screen.
    StatusBar,
    /// Step list in a column to the left of the chat.
    Sidebar,
}

impl Navigation {
    pub fn parse(text: String) -> Option<Navigation> {
        return Navigation::iter().find(|e| return e.to_string() == text);
    }

    pub fn step_labels(&self) -> [&'static str; WorkflowStep::COUNT] {
        match self {
            Navigation::StatusBar => {
                return ["Discovery", "Confirmed", "BA Agent", "Architect", "Proposal"];
            }
            Navigation::Sidebar => {
                return [
                    "Discovery",
                    "Confirmed",
                    "BA Agent",
                    "Solution Architect",
                    "Final Proposal",
                ];
            }
        }
    }
}

/// Everything that differs between variants of the chat screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenConfig {
    pub navigation: Navigation,
    pub email_confirmation: bool,
    /// Delay per revealed character. Zero shows replies at once.
    pub typing_speed: Duration,
}

impl Default for ScreenConfig {
    fn default() -> ScreenConfig {
        return ScreenConfig {
            navigation: Navigation::StatusBar,
            email_confirmation: true,
            typing_speed: Duration::from_millis(15),
        };
    }
}

impl ScreenConfig {
    pub fn from_config() -> Result<ScreenConfig> {
        return ScreenConfig::parse(
            &Config::get(ConfigKey::Navigation),
            &Config::get(ConfigKey::EmailConfirmation),
            &Config::get(ConfigKey::TypingSpeed),
        );
    }

    pub fn parse(
        navigation: &str,
        email_confirmation: &str,
        typing_speed: &str,
    ) -> Result<ScreenConfig> {
        let navigation = Navigation::parse(navigation.to_string())
            .ok_or_else(|| return anyhow!("Unknown navigation style '{navigation}'"))?;

        return Ok(ScreenConfig {
            navigation,
            email_confirmation: email_confirmation.parse::<bool>()?,
            typing_speed: Duration::from_millis(typing_speed.parse::<u64>()?),
        });
    }
}
