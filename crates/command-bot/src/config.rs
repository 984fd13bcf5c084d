//! Application configuration loaded from an optional file and environment
//! variables.

use anyhow::{bail, Context, Result};
use lookup_client::Endpoints;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Signal configuration
    #[serde(default)]
    pub signal: SignalConfig,

    /// Bot behaviour
    #[serde(default)]
    pub bot: BotConfig,

    /// Per-command enablement, keyed by command name
    #[serde(default)]
    pub commands: HashMap<String, bool>,

    /// Cooldown configuration
    #[serde(default)]
    pub cooldown: CooldownConfig,

    /// Auto-moderation configuration
    #[serde(default)]
    pub moderation: ModerationConfig,

    /// Lookup API configuration
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalConfig {
    /// Signal CLI REST API endpoint
    #[serde(default = "default_signal_service")]
    pub service_url: String,

    /// The bot's registered phone number
    #[serde(default)]
    pub phone_number: String,

    /// Poll interval for messages
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Command prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Numbers allowed to kick group members
    #[serde(default, deserialize_with = "string_or_list")]
    pub moderators: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CooldownConfig {
    /// Minimum interval between two uses of a command by one sender
    #[serde(default = "default_cooldown_window", with = "humantime_serde")]
    pub window: Duration,

    /// How often expired cooldown entries are evicted
    #[serde(default = "default_sweep_interval", with = "humantime_serde")]
    pub sweep_interval: Duration,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModerationConfig {
    /// Terms that get a message deleted
    #[serde(default, deserialize_with = "string_or_list")]
    pub banned_terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_joke_url")]
    pub joke_url: String,

    #[serde(default = "default_fact_url")]
    pub fact_url: String,

    #[serde(default = "default_quote_url")]
    pub quote_url: String,

    #[serde(default = "default_history_url")]
    pub history_url: String,

    #[serde(default = "default_crypto_url")]
    pub crypto_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Append log lines to this file as well as the console
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// Default implementations
impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            service_url: default_signal_service(),
            phone_number: String::new(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            moderators: Vec::new(),
        }
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            window: default_cooldown_window(),
            sweep_interval: default_sweep_interval(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            joke_url: default_joke_url(),
            fact_url: default_fact_url(),
            quote_url: default_quote_url(),
            history_url: default_history_url(),
            crypto_url: default_crypto_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LookupConfig {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            joke: self.joke_url.clone(),
            fact: self.fact_url.clone(),
            quote: self.quote_url.clone(),
            history: self.history_url.clone(),
            crypto: self.crypto_url.clone(),
        }
    }
}

// Default value functions
fn default_signal_service() -> String {
    "http://signal-api:8080".into()
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(200)
}

fn default_prefix() -> String {
    "!".into()
}

fn default_cooldown_window() -> Duration {
    Duration::from_secs(5)
}

fn default_sweep_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_joke_url() -> String {
    Endpoints::default().joke
}

fn default_fact_url() -> String {
    Endpoints::default().fact
}

fn default_quote_url() -> String {
    Endpoints::default().quote
}

fn default_history_url() -> String {
    Endpoints::default().history
}

fn default_crypto_url() -> String {
    Endpoints::default().crypto
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_log_level() -> String {
    "info".into()
}

/// Accept either a list or a comma-separated string.
fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Csv(String),
    }

    let items = match Raw::deserialize(deserializer)? {
        Raw::List(items) => items,
        Raw::Csv(csv) => csv.split(',').map(String::from).collect(),
    };
    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

impl Config {
    /// Load configuration from `$BOT_CONFIG` (default `bot.*`, optional)
    /// and environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let file = std::env::var("BOT_CONFIG").unwrap_or_else(|_| "bot".into());
        let builder = config::Config::builder()
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Note: try_parsing(true) would parse +16504928286 as a positive number
                    // stripping the + prefix. Keep strings as strings.
                    .try_parsing(false),
            );

        Self::from_builder(builder)
    }

    /// Deserialize and validate an assembled configuration.
    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let config: Config = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.signal.phone_number.trim().is_empty() {
            bail!("SIGNAL__PHONE_NUMBER must be set");
        }
        if self.bot.prefix.is_empty() || self.bot.prefix.chars().any(char::is_whitespace) {
            bail!("Command prefix must be non-empty and contain no whitespace");
        }
        if self.cooldown.sweep_interval.is_zero() {
            bail!("Cooldown sweep interval must be greater than zero");
        }
        if self.signal.poll_interval.is_zero() {
            bail!("Signal poll interval must be greater than zero");
        }
        Ok(())
    }
}
