//! HTTP Geolocation Resolver
//!
//! Implements GeoResolver against a remote geolocation HTTP API with
//! rate-limit-aware exponential backoff.

use crate::domain::entities::GeoRecord;
use crate::domain::ports::GeoResolver;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::time::sleep;

const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(60);

/// Why a lookup yielded no record.
///
/// Internal to the resolver; only presence or absence of a record crosses
/// the GeoResolver port.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupFailure {
    #[error("rate limit retries exhausted")]
    RetriesExhausted,
    #[error("address is in bogon space")]
    Bogon,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
}

/// HTTP-backed geolocation resolver.
///
/// Sends one GET per attempt, carrying the API credential and the target IP
/// as query parameters. A "too many requests" response is retried with
/// exponential backoff (60 second base, doubling per attempt) up to a
/// bounded attempt count; every other failure is terminal for that IP.
/// A transport failure never enters the backoff path.
pub struct HttpGeoResolver {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    max_attempts: u32,
    backoff_base: Duration,
}

impl HttpGeoResolver {
    /// Create a resolver with the default retry policy (5 attempts,
    /// 60 second backoff base).
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }

    /// Override the retry policy. The defaults match the remote service's
    /// rate-limit contract; this knob exists for tests and tuning.
    pub fn with_retry_policy(mut self, max_attempts: u32, backoff_base: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.backoff_base = backoff_base;
        self
    }

    /// Backoff delay before the retry following `attempt` (1-based):
    /// base * 2^(attempt - 1).
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_base * (1u32 << (attempt - 1))
    }

    /// Perform one lookup, retrying on rate limiting up to the attempt bound.
    ///
    /// The bound counts attempts, not elapsed time: the last permitted
    /// attempt is `attempt == max_attempts`, and no request beyond it is
    /// issued.
    async fn lookup(&self, ip: &str) -> Result<GeoRecord, LookupFailure> {
        for attempt in 1..=self.max_attempts {
            let response = match self
                .client
                .get(&self.api_url)
                .query(&[("apiKey", self.api_key.as_str()), ("ip", ip)])
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("network error for IP {}: {}", ip, e);
                    return Err(LookupFailure::Network(e.to_string()));
                }
            };

            match response.status() {
                StatusCode::OK => {
                    let fields: Map<String, Value> = match response.json().await {
                        Ok(fields) => fields,
                        Err(e) => {
                            tracing::error!("undecodable response body for IP {}: {}", ip, e);
                            return Err(LookupFailure::Network(e.to_string()));
                        }
                    };
                    tracing::info!("geocoded IP {} successfully", ip);
                    return Ok(GeoRecord::new(fields));
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    if attempt == self.max_attempts {
                        tracing::error!("max retries reached for IP {}", ip);
                        return Err(LookupFailure::RetriesExhausted);
                    }
                    let delay = self.backoff_delay(attempt);
                    tracing::warn!(
                        "API rate limit reached for IP {}, retrying in {} seconds",
                        ip,
                        delay.as_secs()
                    );
                    sleep(delay).await;
                }
                StatusCode::LOCKED => {
                    tracing::error!("IP {} is from bogon space (status 423)", ip);
                    return Err(LookupFailure::Bogon);
                }
                status => {
                    tracing::error!("failed to geocode IP {} with status {}", ip, status);
                    return Err(LookupFailure::Status(status.as_u16()));
                }
            }
        }

        Err(LookupFailure::RetriesExhausted)
    }
}

#[async_trait]
impl GeoResolver for HttpGeoResolver {
    async fn resolve(&self, ip: &str) -> Option<GeoRecord> {
        self.lookup(ip).await.ok()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Instant;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn success_body() -> Value {
        json!({
            "ip": "8.8.8.8",
            "country_name": "United States",
            "country_code2": "US",
            "city": "Mountain View",
            "latitude": "37.42240",
            "longitude": "-122.08421"
        })
    }

    #[tokio::test]
    async fn test_success_first_attempt_returns_body_unmodified() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("ip", "8.8.8.8"))
            .and(query_param("apiKey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = HttpGeoResolver::new(server.uri(), "test-key");

        let started = Instant::now();
        let record = resolver.lookup("8.8.8.8").await.unwrap();

        // No backoff on the success path
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(serde_json::to_value(&record).unwrap(), success_body());
    }

    #[tokio::test]
    async fn test_rate_limited_then_success_backs_off_exponentially() {
        let server = MockServer::start().await;

        // Two rate-limit responses, then a success
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(2)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let base = Duration::from_millis(40);
        let resolver =
            HttpGeoResolver::new(server.uri(), "test-key").with_retry_policy(5, base);

        let started = Instant::now();
        let record = resolver.lookup("8.8.8.8").await.unwrap();

        // Two waits: base * 2^0 + base * 2^1
        assert!(started.elapsed() >= base * 3);
        assert_eq!(serde_json::to_value(&record).unwrap(), success_body());
    }

    #[tokio::test]
    async fn test_rate_limit_exhaustion_stops_at_attempt_bound() {
        let server = MockServer::start().await;

        // Exactly max_attempts requests, never one more
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(5)
            .mount(&server)
            .await;

        let resolver = HttpGeoResolver::new(server.uri(), "test-key")
            .with_retry_policy(5, Duration::from_millis(5));

        let err = resolver.lookup("8.8.8.8").await.unwrap_err();
        assert!(matches!(err, LookupFailure::RetriesExhausted));

        server.verify().await;
    }

    #[tokio::test]
    async fn test_bogon_is_terminal_after_one_attempt() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(423))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = HttpGeoResolver::new(server.uri(), "test-key");

        let started = Instant::now();
        let err = resolver.lookup("192.168.0.1").await.unwrap_err();

        assert!(matches!(err, LookupFailure::Bogon));
        // No sleep occurred
        assert!(started.elapsed() < Duration::from_secs(1));

        server.verify().await;
    }

    #[tokio::test]
    async fn test_other_status_is_terminal_after_one_attempt() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = HttpGeoResolver::new(server.uri(), "test-key");

        let err = resolver.lookup("8.8.8.8").await.unwrap_err();
        assert!(matches!(err, LookupFailure::Status(500)));

        server.verify().await;
    }

    #[tokio::test]
    async fn test_network_error_is_terminal_without_backoff() {
        // Nothing listens here; connection is refused immediately
        let resolver = HttpGeoResolver::new("http://127.0.0.1:9", "test-key");

        let started = Instant::now();
        let err = resolver.lookup("8.8.8.8").await.unwrap_err();

        assert!(matches!(err, LookupFailure::Network(_)));
        // Terminal on the first attempt: no 60 second backoff was taken
        assert!(started.elapsed() < Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_a_network_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = HttpGeoResolver::new(server.uri(), "test-key");

        let err = resolver.lookup("8.8.8.8").await.unwrap_err();
        assert!(matches!(err, LookupFailure::Network(_)));
    }

    #[tokio::test]
    async fn test_resolve_maps_failure_to_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let resolver = HttpGeoResolver::new(server.uri(), "test-key");

        assert!(resolver.resolve("8.8.8.8").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent_on_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let resolver = HttpGeoResolver::new(server.uri(), "test-key");

        let first = resolver.resolve("8.8.8.8").await.unwrap();
        let second = resolver.resolve("8.8.8.8").await.unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_backoff_delay_schedule() {
        let resolver = HttpGeoResolver::new("http://localhost", "test-key");

        assert_eq!(resolver.backoff_delay(1), Duration::from_secs(60));
        assert_eq!(resolver.backoff_delay(2), Duration::from_secs(120));
        assert_eq!(resolver.backoff_delay(3), Duration::from_secs(240));
        assert_eq!(resolver.backoff_delay(4), Duration::from_secs(480));
        assert_eq!(resolver.backoff_delay(5), Duration::from_secs(960));
    }
}
