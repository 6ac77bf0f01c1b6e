//! Process configuration, read once at startup.

use crate::core::messages::Language;
use crate::core::progress::BarStyle;
use chrono::NaiveTime;
use sqlx::sqlite::SqliteConnectOptions;
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://subscriptions.db";
const DEFAULT_REMINDER_TIME: &str = "09:00";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bot_token: String,
    pub owner_id: i64,
    pub database_url: String,
    pub reminder_time: NaiveTime,
    pub language: Language,
    pub bar_style: BarStyle,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Settings, ConfigError> {
        dotenvy::dotenv().ok();
        Settings::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the settings from any variable source, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let optional = |name: &'static str, default: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let bot_token = required("BOT_TOKEN")?;

        let owner_id = required("OWNER_ID")?;
        let owner_id = owner_id.parse::<i64>().map_err(|_| ConfigError::Invalid {
            name: "OWNER_ID",
            value: owner_id,
        })?;

        let database_url = optional("DATABASE_URL", DEFAULT_DATABASE_URL);
        // An empty filename makes SQLite open a private temporary database per connection.
        let has_filename = SqliteConnectOptions::from_str(&database_url)
            .map(|options| !options.get_filename().as_os_str().is_empty())
            .unwrap_or(false);
        if !has_filename {
            return Err(ConfigError::Invalid {
                name: "DATABASE_URL",
                value: database_url,
            });
        }

        let reminder_time = optional("REMINDER_TIME", DEFAULT_REMINDER_TIME);
        let reminder_time = NaiveTime::parse_from_str(&reminder_time, "%H:%M").map_err(|_| {
            ConfigError::Invalid {
                name: "REMINDER_TIME",
                value: reminder_time,
            }
        })?;

        let language = optional("BOT_LANGUAGE", "en");
        let language = Language::from_str(&language).map_err(|_| ConfigError::Invalid {
            name: "BOT_LANGUAGE",
            value: language,
        })?;

        let bar_style = optional("PROGRESS_STYLE", "tiered");
        let bar_style = BarStyle::from_str(&bar_style).map_err(|_| ConfigError::Invalid {
            name: "PROGRESS_STYLE",
            value: bar_style,
        })?;

        let port = match lookup("PORT").filter(|value| !value.trim().is_empty()) {
            Some(port) => port.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: port,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Settings {
            bot_token,
            owner_id,
            database_url,
            reminder_time,
            language,
            bar_style,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_required_values_are_set() {
        let settings = settings(&[("BOT_TOKEN", "123:abc"), ("OWNER_ID", "42")]).unwrap();

        assert_eq!(settings.bot_token, "123:abc");
        assert_eq!(settings.owner_id, 42);
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.reminder_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(settings.language, Language::English);
        assert_eq!(settings.bar_style, BarStyle::Tiered);
        assert_eq!(settings.port, 8080);
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = settings(&[("OWNER_ID", "42")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("BOT_TOKEN")));
    }

    #[test]
    fn missing_or_blank_owner_is_fatal() {
        let err = settings(&[("BOT_TOKEN", "t")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OWNER_ID")));

        let err = settings(&[("BOT_TOKEN", "t"), ("OWNER_ID", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OWNER_ID")));
    }

    #[test]
    fn non_numeric_owner_is_rejected() {
        let err = settings(&[("BOT_TOKEN", "t"), ("OWNER_ID", "me")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "OWNER_ID", .. }));
    }

    #[test]
    fn optional_values_are_parsed() {
        let settings = settings(&[
            ("BOT_TOKEN", "t"),
            ("OWNER_ID", "-7"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("REMINDER_TIME", "18:30"),
            ("BOT_LANGUAGE", "ar"),
            ("PROGRESS_STYLE", "plain"),
            ("PORT", "3000"),
        ])
        .unwrap();

        assert_eq!(settings.owner_id, -7);
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.reminder_time, NaiveTime::from_hms_opt(18, 30, 0).unwrap());
        assert_eq!(settings.language, Language::Arabic);
        assert_eq!(settings.bar_style, BarStyle::Plain);
        assert_eq!(settings.port, 3000);
    }

    #[test]
    fn blank_database_url_uses_the_default_file() {
        for blank in ["", "   "] {
            let settings =
                settings(&[("BOT_TOKEN", "t"), ("OWNER_ID", "1"), ("DATABASE_URL", blank)])
                    .unwrap();
            assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        }
    }

    #[test]
    fn database_url_without_a_file_is_rejected() {
        for url in ["sqlite://", "sqlite:"] {
            let err = settings(&[("BOT_TOKEN", "t"), ("OWNER_ID", "1"), ("DATABASE_URL", url)])
                .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { name: "DATABASE_URL", .. }));
        }
    }

    #[test]
    fn bad_optional_values_fail_closed() {
        for (name, value) in [
            ("REMINDER_TIME", "9am"),
            ("BOT_LANGUAGE", "fr"),
            ("PROGRESS_STYLE", "rainbow"),
            ("PORT", "http"),
        ] {
            let err = settings(&[("BOT_TOKEN", "t"), ("OWNER_ID", "1"), (name, value)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { name: n, .. } if n == name),
                "{name} should be rejected"
            );
        }
    }
}
