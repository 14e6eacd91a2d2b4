//! HTTP Fetch Client for the Air-Data REST API
//!
//! ## Overview
//!
//! Reads one batch per call from the developer API:
//!
//! ```text
//! GET {base}/{devType}/{devId}/air-data/{endpoint}?limit={n}&desc=true
//! Authorization: Bearer {token}
//! ```
//!
//! ## Implementation Choices
//!
//! - **ureq**: small blocking client; each attempt runs on tokio's blocking
//!   pool through `spawn_blocking`
//! - **JSON only**: the body is decoded by [`crate::wire::parse_batch`]
//! - **Retries**: off by default (`max_retries = 0`); when enabled, 5xx, 429
//!   and transport errors retry with exponential backoff, 4xx never retries
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use aqbridge_connectors::{http::{AwairClient, HttpConfig}, FetchClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpConfig::new("http://developer-apis.awair.is/v1/users/self/devices/awair-r2/1/air-data/latest")
//!     .bearer_token("api-token")
//!     .timeout_secs(10)
//!     .max_retries(2);
//!
//! let client = AwairClient::new(config)?;
//! let batch = client.fetch().await?;
//! println!("{} reading periods", batch.len());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use aqbridge_core::{DeviceConfig, ScoredReading};

use crate::{wire, FetchClient, FetchError, FetchStats};

/// HTTP configuration
#[derive(Clone)]
pub struct HttpConfig {
    /// Full URL of the air-data resource
    pub url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Authentication method
    pub auth: AuthMethod,
    /// Custom headers
    pub headers: HashMap<String, String>,
    /// Extra attempts after a retryable failure
    pub max_retries: u32,
    /// Base delay for exponential backoff
    pub retry_base_delay: Duration,
    /// User agent string
    pub user_agent: String,
}

/// Authentication methods
#[derive(Clone)]
pub enum AuthMethod {
    /// No authentication
    None,
    /// Bearer token
    Bearer(String),
}

impl HttpConfig {
    /// Create new configuration for a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            auth: AuthMethod::None,
            headers: HashMap::new(),
            max_retries: 0,
            retry_base_delay: Duration::from_millis(100),
            user_agent: format!("aqbridge/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Configuration for a device's data URL and token
    pub fn for_device(config: &DeviceConfig) -> Self {
        Self::new(config.data_url()).bearer_token(config.token.clone())
    }

    /// Set bearer token authentication
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthMethod::Bearer(token.into());
        self
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set number of retries for retryable failures
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set base backoff delay; attempt `n` waits `base * 2^n`
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Add custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Outcome of a single request attempt
enum Attempt {
    Body(String),
    Retryable(FetchError),
    Fatal(FetchError),
}

/// Air-data client using the lightweight ureq agent
pub struct AwairClient {
    config: HttpConfig,
    agent: ureq::Agent,
    stats: Arc<Mutex<FetchStats>>,
}

impl AwairClient {
    /// Create new client
    pub fn new(config: HttpConfig) -> Result<Self, FetchError> {
        if !config.url.starts_with("http://") && !config.url.starts_with("https://") {
            return Err(FetchError::Config("URL must start with http:// or https://".into()));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            config,
            agent,
            stats: Arc::new(Mutex::new(FetchStats::default())),
        })
    }

    /// Create a client for a configured device
    pub fn for_device(config: &DeviceConfig) -> Result<Self, FetchError> {
        Self::new(HttpConfig::for_device(config))
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Snapshot of request statistics
    pub fn stats(&self) -> FetchStats {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Build request with authentication and headers
    fn build_request(&self) -> ureq::Request {
        let mut request = self.agent.get(&self.config.url);

        if let AuthMethod::Bearer(token) = &self.config.auth {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        for (name, value) in &self.config.headers {
            request = request.set(name, value);
        }

        request.set("Accept", "application/json")
    }

    fn attempt(request: ureq::Request) -> Attempt {
        match request.call() {
            Ok(resp) => match resp.into_string() {
                Ok(body) => Attempt::Body(body),
                Err(e) => Attempt::Retryable(FetchError::Request(e.to_string())),
            },
            Err(ureq::Error::Status(code, resp)) => {
                let message = resp.into_string().unwrap_or_default();
                match code {
                    401 | 403 => Attempt::Fatal(FetchError::Auth(message)),
                    429 | 500..=599 => {
                        Attempt::Retryable(FetchError::ServerError { status: code, message })
                    }
                    _ => Attempt::Fatal(FetchError::ServerError { status: code, message }),
                }
            }
            Err(ureq::Error::Transport(e)) => Attempt::Retryable(FetchError::Request(e.to_string())),
        }
    }

    /// GET the resource body, retrying per configuration
    async fn get_with_retry(&self) -> Result<String, FetchError> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = self.config.retry_base_delay * (1u32 << attempt.min(16));
                self.record(|stats| stats.retries += 1);
                tokio::time::sleep(delay).await;
            }

            let request = self.build_request();
            let outcome = tokio::task::spawn_blocking(move || Self::attempt(request))
                .await
                .map_err(|e| FetchError::Request(format!("request task failed: {}", e)))?;

            match outcome {
                Attempt::Body(body) => {
                    let len = body.len() as u64;
                    self.record(|stats| {
                        stats.requests_ok += 1;
                        stats.bytes_received += len;
                    });
                    return Ok(body);
                }
                Attempt::Retryable(err) => {
                    log::debug!("attempt {} for {} failed: {}", attempt + 1, self.config.url, err);
                    last_error = Some(err);
                }
                Attempt::Fatal(err) => {
                    self.record_failure(&err);
                    return Err(err);
                }
            }
        }

        // All retries exhausted
        let err = last_error.unwrap_or_else(|| FetchError::Request("Unknown error".into()));
        self.record_failure(&err);
        Err(err)
    }

    fn record(&self, update: impl FnOnce(&mut FetchStats)) {
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        update(&mut *stats);
    }

    fn record_failure(&self, err: &FetchError) {
        let message = err.to_string();
        self.record(|stats| {
            stats.requests_failed += 1;
            stats.last_error = Some(message);
        });
    }
}

#[async_trait::async_trait]
impl FetchClient for AwairClient {
    async fn fetch(&self) -> Result<Vec<ScoredReading>, FetchError> {
        let body = self.get_with_retry().await?;
        wire::parse_batch(&body)
    }
}
