//! Commands backed by third-party informational APIs.
//!
//! A failed lookup is answered with a command-specific error reply; it is
//! not a handler failure.

use crate::error::CommandError;
use crate::platform::Embed;
use crate::registry::{CommandContext, CommandHandler, CommandId};
use async_trait::async_trait;
use lookup_client::{LookupClient, LookupError};
use std::sync::Arc;
use tracing::warn;

const DEFAULT_COIN: &str = "bitcoin";

pub struct JokeHandler {
    lookup: Arc<LookupClient>,
}

impl JokeHandler {
    pub fn new(lookup: Arc<LookupClient>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl CommandHandler for JokeHandler {
    fn id(&self) -> CommandId {
        CommandId::Joke
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        match self.lookup.random_joke().await {
            Ok(joke) => {
                let embed = Embed::new("😂 Random Joke", 0x00FF00)
                    .description(format!("{}\n\n*{}*", joke.setup, joke.punchline));
                ctx.reply(embed).await
            }
            Err(e) => {
                warn!("Joke lookup failed: {}", e);
                ctx.reply_error("Failed to fetch a joke.").await
            }
        }
    }
}

pub struct FactHandler {
    lookup: Arc<LookupClient>,
}

impl FactHandler {
    pub fn new(lookup: Arc<LookupClient>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl CommandHandler for FactHandler {
    fn id(&self) -> CommandId {
        CommandId::Fact
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        match self.lookup.random_fact().await {
            Ok(fact) => ctx.reply(format!("💡 Random Fact: {}", fact.text)).await,
            Err(e) => {
                warn!("Fact lookup failed: {}", e);
                ctx.reply_error("Failed to fetch a random fact.").await
            }
        }
    }
}

pub struct QuoteHandler {
    lookup: Arc<LookupClient>,
}

impl QuoteHandler {
    pub fn new(lookup: Arc<LookupClient>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl CommandHandler for QuoteHandler {
    fn id(&self) -> CommandId {
        CommandId::Quote
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        match self.lookup.random_quote().await {
            Ok(quote) => {
                let embed = Embed::new("Inspirational Quote", 0x00CED1)
                    .description(format!("\"{}\"\n- {}", quote.text, quote.author));
                ctx.reply(embed).await
            }
            Err(LookupError::EmptyResponse(_)) => {
                ctx.reply_error("Failed to retrieve a quote.").await
            }
            Err(e) => {
                warn!("Quote lookup failed: {}", e);
                ctx.reply_error("Failed to fetch a quote.").await
            }
        }
    }
}

pub struct TodayHandler {
    lookup: Arc<LookupClient>,
}

impl TodayHandler {
    pub fn new(lookup: Arc<LookupClient>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl CommandHandler for TodayHandler {
    fn id(&self) -> CommandId {
        CommandId::Today
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        match self.lookup.today_in_history().await {
            Ok(event) => {
                let embed = Embed::new("📅 On This Day in History", 0x00FF00)
                    .description(format!("{}: {}", event.year, event.text));
                ctx.reply(embed).await
            }
            Err(e) => {
                warn!("History lookup failed: {}", e);
                ctx.reply_error("Failed to fetch today's history event.")
                    .await
            }
        }
    }
}

pub struct CryptoHandler {
    lookup: Arc<LookupClient>,
}

impl CryptoHandler {
    pub fn new(lookup: Arc<LookupClient>) -> Self {
        Self { lookup }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl CommandHandler for CryptoHandler {
    fn id(&self) -> CommandId {
        CommandId::Crypto
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<(), CommandError> {
        let coin = args.first().map(String::as_str).unwrap_or(DEFAULT_COIN);

        match self.lookup.coin_price(coin).await {
            Ok(price) => {
                let embed = Embed::new(
                    format!("Crypto Price: {}", capitalize(&price.coin)),
                    0xFFD700,
                )
                .description(format!("Current price: ${} USD", price.usd));
                ctx.reply(embed).await
            }
            Err(LookupError::NotFound(_)) => {
                ctx.reply_error("Coin not found or unsupported.").await
            }
            Err(e) => {
                warn!("Price lookup for {} failed: {}", coin, e);
                ctx.reply_error("Failed to fetch cryptocurrency data.")
                    .await
            }
        }
    }
}
