//! Response types for the lookup services.

use serde::Deserialize;
use std::collections::HashMap;

/// Base URLs of the services the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub joke: String,
    pub fact: String,
    pub quote: String,
    pub history: String,
    pub crypto: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            joke: "https://official-joke-api.appspot.com".into(),
            fact: "https://uselessfacts.jsph.pl".into(),
            quote: "https://zenquotes.io".into(),
            history: "https://history.muffinlabs.com".into(),
            crypto: "https://api.coingecko.com".into(),
        }
    }
}

/// A two-part joke.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

/// A random fact.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Fact {
    pub text: String,
}

/// A quote and its author.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Quote {
    #[serde(rename = "q")]
    pub text: String,
    #[serde(rename = "a")]
    pub author: String,
}

/// One event from the "on this day" feed.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HistoryEvent {
    pub year: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryResponse {
    pub data: HistoryData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryData {
    #[serde(rename = "Events", default)]
    pub events: Vec<HistoryEvent>,
}

/// Current USD price of a coin.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinPrice {
    pub coin: String,
    pub usd: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PriceQuote {
    pub usd: f64,
}

/// `simple/price` response keyed by coin id.
pub(crate) type PriceResponse = HashMap<String, PriceQuote>;
