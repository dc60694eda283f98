//! Telegram bot.
//!
//! The bot is a thin client: the ledger lives in a spreadsheet behind a web
//! script, reached only through [`api::LedgerClient`].

use std::{net::SocketAddr, time::Duration};

use chrono_tz::Tz;
use sha2::{Digest, Sha256};
use teloxide::{
    prelude::*,
    update_listeners::webhooks,
    utils::command::BotCommands,
};
use url::Url;

pub mod api;
mod commands;
mod handlers;
mod phrases;
mod state;
mod ui;

pub use commands::ChatCommand;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);
const DEFAULT_PORT: u16 = 8080;

#[derive(Clone)]
pub struct ConfigParameters {
    allowed_users: Vec<UserId>,
    ledger: api::LedgerClient,
    sessions: state::SessionStore,
    timezone: Tz,
}

/// Where Telegram delivers updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateSource {
    Polling,
    /// `url` is registered with Telegram; `path` is what the listener serves,
    /// so a proxy may strip the base URL's own path.
    Webhook { url: Url, path: String, port: u16 },
}

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("failed to build the ledger client: {0}")]
    Ledger(#[from] api::ApiError),
    #[error("invalid webhook url: {0}")]
    WebhookUrl(#[from] url::ParseError),
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

pub struct Bot {
    token: String,
    parameters: ConfigParameters,
    source: UpdateSource,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) -> Result<(), BotError> {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        if let Err(err) = bot.set_my_commands(ChatCommand::bot_commands()).await {
            tracing::warn!(%err, "failed to register bot commands");
        }

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<ChatCommand>()
                    .endpoint(handlers::handle_command),
            )
            .branch(Update::filter_message().endpoint(handlers::handle_message))
            .branch(Update::filter_callback_query().endpoint(handlers::handle_callback));

        let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
            .dependencies(dptree::deps![self.parameters.clone()])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build();

        match &self.source {
            UpdateSource::Polling => {
                tracing::info!("Starting polling");
                dispatcher.dispatch().await;
            }
            UpdateSource::Webhook { url, path, port } => {
                let address = SocketAddr::from(([0, 0, 0, 0], *port));
                tracing::info!(%address, %url, path = %path, "Starting webhook");
                let options = webhooks::Options::new(address, url.clone()).path(path.clone());
                let listener = webhooks::axum(bot, options).await?;
                dispatcher
                    .dispatch_with_listener(
                        listener,
                        LoggingErrorHandler::with_custom_text(
                            "An error from the webhook listener",
                        ),
                    )
                    .await;
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct BotBuilder {
    token: String,
    owner: u64,
    extra_users: Vec<u64>,
    script_url: String,
    timeout: Duration,
    timezone: Tz,
    webhook_url: Option<String>,
    webhook_path: Option<String>,
    port: u16,
}

impl Default for BotBuilder {
    fn default() -> Self {
        Self {
            token: String::new(),
            owner: 0,
            extra_users: Vec::new(),
            script_url: String::new(),
            timeout: DEFAULT_TIMEOUT,
            timezone: chrono_tz::Europe::Moscow,
            webhook_url: None,
            webhook_path: None,
            port: DEFAULT_PORT,
        }
    }
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    /// The ledger owner: always allowed, and the `user_id` of every ledger call.
    pub fn owner(mut self, owner: u64) -> BotBuilder {
        self.owner = owner;
        self
    }

    pub fn allowed_users(mut self, users: Vec<u64>) -> BotBuilder {
        self.extra_users = users;
        self
    }

    pub fn script(mut self, url: &str, timeout: Duration) -> BotBuilder {
        self.script_url = url.to_string();
        self.timeout = timeout;
        self
    }

    pub fn timezone(mut self, timezone: Tz) -> BotBuilder {
        self.timezone = timezone;
        self
    }

    /// Switches to webhook mode when `url` is not empty.
    pub fn webhook(mut self, url: &str, path: Option<&str>, port: u16) -> BotBuilder {
        self.webhook_url = Some(url.trim().to_string()).filter(|u| !u.is_empty());
        self.webhook_path = path
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self.port = port;
        self
    }

    pub fn build(self) -> Result<Bot, BotError> {
        tracing::info!("Initializing telegram bot...");

        let mut allowed_users = vec![UserId(self.owner)];
        allowed_users.extend(
            self.extra_users
                .iter()
                .copied()
                .filter(|id| *id != self.owner)
                .map(UserId),
        );

        let source = match &self.webhook_url {
            Some(base) => {
                let path = self
                    .webhook_path
                    .clone()
                    .unwrap_or_else(|| default_webhook_path(&self.token));
                UpdateSource::Webhook {
                    url: webhook_url(base, &path)?,
                    path: listen_path(&path),
                    port: self.port,
                }
            }
            None => UpdateSource::Polling,
        };

        let parameters = ConfigParameters {
            allowed_users,
            ledger: api::LedgerClient::new(&self.script_url, self.owner, self.timeout)?,
            sessions: state::SessionStore::default(),
            timezone: self.timezone,
        };

        Ok(Bot {
            token: self.token,
            parameters,
            source,
        })
    }
}

/// `tg/` followed by the first 24 hex chars of the token's SHA-256, so the
/// path is stable per bot and does not reveal the token.
pub fn default_webhook_path(token: &str) -> String {
    let digest = hex::encode(Sha256::digest(token.as_bytes()));
    format!("tg/{}", &digest[..24])
}

/// Joins the public base URL and the webhook path with a single slash.
pub fn webhook_url(base: &str, path: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

/// Route served by the webhook listener: `/` followed by the webhook path.
pub fn listen_path(path: &str) -> String {
    format!("/{}", path.trim_matches('/'))
}
