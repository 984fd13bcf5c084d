//! Client for the third-party informational APIs behind the fun commands.

mod client;
mod error;
mod types;

pub use client::LookupClient;
pub use error::LookupError;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> LookupClient {
        let uri = mock_server.uri();
        let endpoints = Endpoints {
            joke: uri.clone(),
            fact: uri.clone(),
            quote: uri.clone(),
            history: uri.clone(),
            crypto: uri,
        };
        LookupClient::new(endpoints, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.joke, "https://official-joke-api.appspot.com");
        assert_eq!(endpoints.crypto, "https://api.coingecko.com");
    }

    #[tokio::test]
    async fn test_random_joke() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/random_joke"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 42,
                "type": "general",
                "setup": "Why did the crab never share?",
                "punchline": "Because he's shellfish."
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let joke = client.random_joke().await.unwrap();

        assert_eq!(joke.setup, "Why did the crab never share?");
        assert_eq!(joke.punchline, "Because he's shellfish.");
    }

    #[tokio::test]
    async fn test_random_fact_requests_english() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/random.json"))
            .and(query_param("language", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "abc",
                "text": "Honey never spoils.",
                "language": "en"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let fact = client.random_fact().await.unwrap();

        assert_eq!(fact.text, "Honey never spoils.");
    }

    #[tokio::test]
    async fn test_random_quote() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/random"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"q": "Well begun is half done.", "a": "Aristotle", "h": "<blockquote/>"}
            ])))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let quote = client.random_quote().await.unwrap();

        assert_eq!(quote.text, "Well begun is half done.");
        assert_eq!(quote.author, "Aristotle");
    }

    #[tokio::test]
    async fn test_random_quote_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/random"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.random_quote().await;

        assert!(matches!(result, Err(LookupError::EmptyResponse(_))));
    }

    #[tokio::test]
    async fn test_today_in_history() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/date"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "date": "October 16",
                "data": {
                    "Events": [
                        {"year": "1846", "text": "First public demonstration of ether anesthesia."},
                        {"year": "1923", "text": "The Walt Disney Company is founded."}
                    ],
                    "Births": []
                }
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let event = client.today_in_history().await.unwrap();

        assert_eq!(event.year, "1846");
        assert!(event.text.contains("ether"));
    }

    #[tokio::test]
    async fn test_coin_price() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .and(query_param("ids", "bitcoin"))
            .and(query_param("vs_currencies", "usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "bitcoin": {"usd": 67123.5}
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let price = client.coin_price("Bitcoin").await.unwrap();

        assert_eq!(price.coin, "bitcoin");
        assert_eq!(price.usd, 67123.5);
    }

    #[tokio::test]
    async fn test_coin_price_unknown_coin() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.coin_price("notacoin").await;

        assert!(matches!(result, Err(LookupError::NotFound(coin)) if coin == "notacoin"));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/random_joke"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.random_joke().await;

        assert!(matches!(result, Err(LookupError::RateLimit)));
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/random.json"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.random_fact().await;

        match result {
            Err(LookupError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "down for maintenance");
            }
            other => panic!("unexpected result: {:?}", other.map(|f| f.text)),
        }
    }
}
