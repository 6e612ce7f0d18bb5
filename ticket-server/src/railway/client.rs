//! Upstream railway HTTP client.
//!
//! Provides async methods for querying the left-ticket endpoint. The
//! endpoint expects a browser-looking session: a cookie jar picked up from
//! the landing page plus the request headers the booking page would send.

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::decode::{TicketRecord, decode_batch_logged};

use super::cookies::{CookieJar, format_cookie_header, parse_set_cookies};
use super::error::RailwayError;
use super::types::{LeftTicketData, LeftTicketResponse};

/// Default base URL for the railway booking site.
const DEFAULT_BASE_URL: &str = "https://kyfw.12306.cn";

/// Default maximum concurrent upstream requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Browser user agent presented to the upstream site.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the railway client.
#[derive(Debug, Clone)]
pub struct RailwayConfig {
    /// Base URL for the booking site (defaults to production).
    pub base_url: String,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl RailwayConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for RailwayConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the upstream left-ticket API.
///
/// Uses a semaphore to limit concurrent requests; the upstream throttles
/// aggressively when hammered.
#[derive(Debug, Clone)]
pub struct RailwayClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl RailwayClient {
    /// Create a new railway client with the given configuration.
    pub fn new(config: RailwayConfig) -> Result<Self, RailwayError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch session cookies from the landing page.
    ///
    /// Parses every `Set-Cookie` header of the response into a jar.
    pub async fn fetch_session_cookies(&self) -> Result<CookieJar, RailwayError> {
        let response = self
            .http
            .get(&self.base_url)
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RailwayError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let jar = parse_set_cookies(
            response
                .headers()
                .get_all(header::SET_COOKIE)
                .iter()
                .filter_map(|v| v.to_str().ok()),
        );
        debug!(cookies = jar.len(), "fetched session cookies");

        Ok(jar)
    }

    /// Query left tickets and decode them into [`TicketRecord`]s.
    ///
    /// This is the main entry point: fetches a session, queries the
    /// endpoint, and runs the decode pipeline over the raw result. An empty
    /// vector means the query succeeded with no matching trains.
    pub async fn query_tickets(
        &self,
        date: NaiveDate,
        from_telecode: &str,
        to_telecode: &str,
    ) -> Result<Vec<TicketRecord>, RailwayError> {
        let data = self
            .query_left_tickets(date, from_telecode, to_telecode)
            .await?;

        Ok(decode_batch_logged(&data.result, &data.map))
    }

    /// Query the left-ticket endpoint and return the raw payload.
    ///
    /// A session-cookie failure degrades to a cookie-less request rather
    /// than failing the query; the upstream sometimes accepts those.
    pub async fn query_left_tickets(
        &self,
        date: NaiveDate,
        from_telecode: &str,
        to_telecode: &str,
    ) -> Result<LeftTicketData, RailwayError> {
        let _permit = self.semaphore.acquire().await.map_err(|_| RailwayError::Api {
            status: 0,
            message: "Semaphore closed".to_string(),
        })?;

        let cookies = match self.fetch_session_cookies().await {
            Ok(jar) => jar,
            Err(e) => {
                warn!("session cookie fetch failed, continuing without: {e}");
                CookieJar::new()
            }
        };

        let url = format!("{}/otn/leftTicket/query", self.base_url);
        let train_date = date.format("%Y-%m-%d").to_string();

        let mut request = self
            .http
            .get(&url)
            .query(&[
                ("leftTicketDTO.train_date", train_date.as_str()),
                ("leftTicketDTO.from_station", from_telecode),
                ("leftTicketDTO.to_station", to_telecode),
                ("purpose_codes", "ADULT"),
            ])
            .header(
                header::ACCEPT,
                "application/json, text/javascript, */*; q=0.01",
            )
            .header(
                header::REFERER,
                format!("{}/otn/leftTicket/init", self.base_url),
            )
            .header("X-Requested-With", "XMLHttpRequest");

        if !cookies.is_empty() {
            request = request.header(header::COOKIE, format_cookie_header(&cookies));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RailwayError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let envelope: LeftTicketResponse =
            serde_json::from_str(&body).map_err(|e| RailwayError::Json {
                message: format!("{e} (body: {})", body.chars().take(200).collect::<String>()),
            })?;

        if envelope.httpstatus.unwrap_or(0) != 200 {
            let message = if envelope.messages.is_empty() {
                "unknown upstream failure".to_string()
            } else {
                envelope.messages.to_display()
            };
            return Err(RailwayError::Rejected(message));
        }

        // A missing data block means "no results", not a failure.
        Ok(envelope.data.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = RailwayConfig::new()
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = RailwayConfig::new();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = RailwayClient::new(RailwayConfig::new());
        assert!(client.is_ok());
    }

    // Integration tests against the live upstream would go here; they
    // require network access and a non-blocked egress IP, so they are
    // exercised manually instead.
}
