//! Handles settings for the application.
//!
//! Values come from an optional `settings.toml` and then from the process
//! environment, so `BOT_TOKEN`, `SCRIPT_URL`, `WIFE_TG_ID` and friends map
//! one to one onto the fields below.

use std::time::Duration;

use chrono_tz::Tz;
use clap::Parser;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use url::Url;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Parser)]
#[command(name = "finance-bot", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long, env = "FINANCE_BOT_CONFIG")]
    config: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("BOT_TOKEN is not set")]
    MissingToken,
    #[error("SCRIPT_URL is not set")]
    MissingScriptUrl,
    #[error("WIFE_TG_ID is not set")]
    MissingOwner,
    #[error("ALLOWED_TG_IDS contains an invalid id: {0:?}")]
    InvalidAllowedId(String),
    #[error("unknown TIMEZONE {0:?}")]
    UnknownTimezone(String),
    #[error("invalid {name} {value:?}: {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawSettings {
    bot_token: String,
    script_url: String,
    wife_tg_id: u64,
    allowed_tg_ids: String,
    webhook_url: String,
    webhook_path: String,
    port: u16,
    log_level: String,
    timezone: String,
    script_timeout_secs: u64,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            script_url: String::new(),
            wife_tg_id: 0,
            allowed_tg_ids: String::new(),
            webhook_url: String::new(),
            webhook_path: String::new(),
            port: 8080,
            log_level: "info".to_string(),
            timezone: "Europe/Moscow".to_string(),
            script_timeout_secs: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webhook {
    pub url: String,
    /// `None` means derive it from the token.
    pub path: Option<String>,
    pub port: u16,
}

#[derive(Debug)]
pub struct Settings {
    pub bot_token: String,
    pub script_url: String,
    pub owner_id: u64,
    pub allowed_ids: Vec<u64>,
    pub webhook: Option<Webhook>,
    pub log_level: String,
    pub timezone: Tz,
    pub script_timeout: Duration,
}

impl Settings {
    pub fn new() -> Result<Self, SettingsError> {
        let args = Args::parse();
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let builder = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::default().try_parsing(true));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let raw: RawSettings = builder.build()?.try_deserialize()?;
        raw.validate()
    }
}

impl RawSettings {
    fn validate(self) -> Result<Settings, SettingsError> {
        let bot_token = self.bot_token.trim().to_string();
        if bot_token.is_empty() {
            return Err(SettingsError::MissingToken);
        }

        let script_url = self.script_url.trim().to_string();
        if script_url.is_empty() {
            return Err(SettingsError::MissingScriptUrl);
        }
        check_url("SCRIPT_URL", &script_url)?;

        if self.wife_tg_id == 0 {
            return Err(SettingsError::MissingOwner);
        }

        let allowed_ids = self
            .allowed_tg_ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse::<u64>()
                    .map_err(|_| SettingsError::InvalidAllowedId(id.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let timezone = self
            .timezone
            .trim()
            .parse::<Tz>()
            .map_err(|_| SettingsError::UnknownTimezone(self.timezone.clone()))?;

        let webhook_url = self.webhook_url.trim().to_string();
        let webhook = if webhook_url.is_empty() {
            None
        } else {
            check_url("WEBHOOK_URL", &webhook_url)?;
            let path = self.webhook_path.trim();
            Some(Webhook {
                url: webhook_url,
                path: (!path.is_empty()).then(|| path.to_string()),
                port: self.port,
            })
        };

        Ok(Settings {
            bot_token,
            script_url,
            owner_id: self.wife_tg_id,
            allowed_ids,
            webhook,
            log_level: self.log_level,
            timezone,
            script_timeout: Duration::from_secs(self.script_timeout_secs),
        })
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), SettingsError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|source| SettingsError::InvalidUrl {
            name,
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn load(toml: &str) -> Result<Settings, SettingsError> {
        Settings::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    const MINIMAL: &str = r#"
        bot_token = "123:abc"
        script_url = "https://script.google.com/macros/s/xyz/exec"
        wife_tg_id = 42
    "#;

    #[test]
    fn minimal_settings_use_defaults() {
        let settings = load(MINIMAL).unwrap();
        assert_eq!(settings.owner_id, 42);
        assert!(settings.allowed_ids.is_empty());
        assert_eq!(settings.webhook, None);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.timezone, chrono_tz::Europe::Moscow);
        assert_eq!(settings.script_timeout, Duration::from_secs(12));
    }

    #[test]
    fn webhook_mode_and_extra_users() {
        let settings = load(&format!(
            "{MINIMAL}\nwebhook_url = \"https://bot.example.com\"\nport = 9000\n\
             allowed_tg_ids = \"7, 8,\"\ntimezone = \"Asia/Yekaterinburg\""
        ))
        .unwrap();
        assert_eq!(
            settings.webhook,
            Some(Webhook {
                url: "https://bot.example.com".to_string(),
                path: None,
                port: 9000,
            })
        );
        assert_eq!(settings.allowed_ids, vec![7, 8]);
        assert_eq!(settings.timezone, chrono_tz::Asia::Yekaterinburg);
    }

    #[test]
    fn required_values_are_checked() {
        assert!(matches!(
            load("script_url = \"https://x.example\"\nwife_tg_id = 1"),
            Err(SettingsError::MissingToken)
        ));
        assert!(matches!(
            load("bot_token = \"t\"\nwife_tg_id = 1"),
            Err(SettingsError::MissingScriptUrl)
        ));
        assert!(matches!(
            load("bot_token = \"t\"\nscript_url = \"https://x.example\""),
            Err(SettingsError::MissingOwner)
        ));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            load(&format!("{MINIMAL}\nallowed_tg_ids = \"7,abc\"")),
            Err(SettingsError::InvalidAllowedId(id)) if id == "abc"
        ));
        assert!(matches!(
            load(&format!("{MINIMAL}\ntimezone = \"Mars/Olympus\"")),
            Err(SettingsError::UnknownTimezone(_))
        ));
        assert!(matches!(
            load(&format!("{MINIMAL}\nwebhook_url = \"not a url\"")),
            Err(SettingsError::InvalidUrl { name: "WEBHOOK_URL", .. })
        ));
    }
}
