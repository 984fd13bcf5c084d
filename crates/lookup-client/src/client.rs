//! HTTP client for the informational lookup services.

use crate::error::LookupError;
use crate::types::*;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for jokes, facts, quotes, history events and coin prices.
#[derive(Clone)]
pub struct LookupClient {
    client: Client,
    endpoints: Endpoints,
}

impl LookupClient {
    /// Create a new lookup client.
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, endpoints })
    }

    /// Configured service endpoints.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetch a random joke.
    #[instrument(skip(self))]
    pub async fn random_joke(&self) -> Result<Joke, LookupError> {
        let response = self
            .client
            .get(format!("{}/random_joke", self.endpoints.joke))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Fetch a random fact in English.
    #[instrument(skip(self))]
    pub async fn random_fact(&self) -> Result<Fact, LookupError> {
        let response = self
            .client
            .get(format!("{}/random.json", self.endpoints.fact))
            .query(&[("language", "en")])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Fetch a random inspirational quote.
    #[instrument(skip(self))]
    pub async fn random_quote(&self) -> Result<Quote, LookupError> {
        let response = self
            .client
            .get(format!("{}/api/random", self.endpoints.quote))
            .send()
            .await?;

        let quotes: Vec<Quote> = self.handle_response(response).await?;
        quotes
            .into_iter()
            .next()
            .ok_or(LookupError::EmptyResponse("quote service"))
    }

    /// Fetch the first historical event for today's date.
    #[instrument(skip(self))]
    pub async fn today_in_history(&self) -> Result<HistoryEvent, LookupError> {
        let response = self
            .client
            .get(format!("{}/date", self.endpoints.history))
            .send()
            .await?;

        let history: HistoryResponse = self.handle_response(response).await?;
        history
            .data
            .events
            .into_iter()
            .next()
            .ok_or(LookupError::EmptyResponse("history service"))
    }

    /// Fetch the current USD price of `coin` (a CoinGecko coin id).
    #[instrument(skip(self))]
    pub async fn coin_price(&self, coin: &str) -> Result<CoinPrice, LookupError> {
        let coin = coin.to_lowercase();
        let response = self
            .client
            .get(format!("{}/api/v3/simple/price", self.endpoints.crypto))
            .query(&[("ids", coin.as_str()), ("vs_currencies", "usd")])
            .send()
            .await?;

        let mut prices: PriceResponse = self.handle_response(response).await?;
        match prices.remove(&coin) {
            Some(quote) => Ok(CoinPrice { coin, usd: quote.usd }),
            None => Err(LookupError::NotFound(coin)),
        }
    }

    /// Handle HTTP response, converting errors appropriately.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, LookupError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            debug!("Response body: {}", body.chars().take(200).collect::<String>());
            serde_json::from_str(&body).map_err(LookupError::from)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract error information from failed response.
    async fn extract_error(&self, response: reqwest::Response) -> LookupError {
        let status = response.status();

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Rate limit exceeded");
                LookupError::RateLimit
            }
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".into());
                LookupError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}
