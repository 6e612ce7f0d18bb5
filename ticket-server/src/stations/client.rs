//! Station dataset client.
//!
//! The upstream publishes its station list as a JavaScript asset:
//! one big string literal of `@`-separated entries, each entry a
//! `|`-delimited tuple of id, name, telecode, pinyin, abbreviation,
//! indices, and city. This client fetches the script and parses it.

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::error::StationError;

/// Default base URL for the railway booking site.
const DEFAULT_BASE_URL: &str = "https://kyfw.12306.cn";

/// Path of the station dataset script.
const STATION_DATA_PATH: &str = "/otn/resources/js/framework/station_name.js";

/// Browser user agent; the asset endpoint also rejects non-browser clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// One station from the dataset. Only the fields this server consumes are
/// kept; the entry's positional indices are dropped at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Station telecode, e.g. "VNP".
    pub telecode: String,
    /// Display name, e.g. "北京南".
    pub name: String,
    /// Full pinyin, e.g. "beijingnan".
    pub pinyin: String,
    /// Pinyin abbreviation, e.g. "bjn".
    pub abbrev: String,
    /// City the station belongs to, e.g. "北京".
    pub city: String,
}

/// Configuration for the station dataset client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Base URL for the booking site.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl StationClientConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the station dataset script.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    base_url: String,
}

impl StationClient {
    /// Create a new station dataset client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch and parse the full station dataset.
    pub async fn fetch_all(&self) -> Result<Vec<Station>, StationError> {
        let url = format!("{}{}", self.base_url, STATION_DATA_PATH);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let script = response.text().await?;
        parse_station_script(&script)
    }
}

/// Parse the station dataset script into stations.
pub fn parse_station_script(script: &str) -> Result<Vec<Station>, StationError> {
    let payload = extract_payload(script).ok_or_else(|| StationError::Parse {
        message: "no quoted station payload in script".to_string(),
    })?;

    Ok(payload.split('@').filter_map(parse_entry).collect())
}

/// Extract the single-quoted payload from `var station_names ='…';`.
fn extract_payload(script: &str) -> Option<&str> {
    let marker = script.find("station_names")?;
    let rest = &script[marker..];
    let start = rest.find('\'')? + 1;
    let rest = &rest[start..];
    let end = rest.find('\'')?;
    Some(&rest[..end])
}

/// Parse one `|`-delimited dataset entry.
///
/// Entry layout: id|name|telecode|pinyin|abbreviation|index|city-index|city.
/// Entries with fewer than 8 fields (including the empty leading entry) are
/// dropped.
fn parse_entry(entry: &str) -> Option<Station> {
    let parts: Vec<&str> = entry.split('|').collect();
    if parts.len() < 8 {
        return None;
    }

    Some(Station {
        telecode: parts[2].to_string(),
        name: parts[1].to_string(),
        pinyin: parts[3].to_string(),
        abbrev: parts[4].to_string(),
        city: parts[7].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SCRIPT: &str = "var station_names ='@bjb|北京北|VAP|beijingbei|bjb|0|0357|北京|||@bjn|北京南|VNP|beijingnan|bjn|1|0353|北京|||@shh|上海虹桥|AOH|shanghaihongqiao|shhq|2|0249|上海|||';";

    #[test]
    fn parses_sample_script() {
        let stations = parse_station_script(SAMPLE_SCRIPT).unwrap();

        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0].name, "北京北");
        assert_eq!(stations[0].telecode, "VAP");
        assert_eq!(stations[0].pinyin, "beijingbei");
        assert_eq!(stations[0].abbrev, "bjb");
        assert_eq!(stations[0].city, "北京");
        assert_eq!(stations[2].telecode, "AOH");
        assert_eq!(stations[2].city, "上海");
    }

    #[test]
    fn short_entries_are_dropped() {
        let script = "var station_names ='@only|four|fields|here@bjn|北京南|VNP|beijingnan|bjn|1|0353|北京|||';";
        let stations = parse_station_script(script).unwrap();

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].telecode, "VNP");
    }

    #[test]
    fn script_without_payload_is_an_error() {
        let err = parse_station_script("console.log(1);").unwrap_err();
        assert!(matches!(err, StationError::Parse { .. }));
    }

    #[test]
    fn empty_payload_yields_no_stations() {
        let stations = parse_station_script("var station_names ='';").unwrap();
        assert!(stations.is_empty());
    }

    #[test]
    fn config_defaults() {
        let config = StationClientConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_base_url() {
        let config = StationClientConfig::new().with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn station_serde_roundtrip() {
        let station = Station {
            telecode: "VNP".to_string(),
            name: "北京南".to_string(),
            pinyin: "beijingnan".to_string(),
            abbrev: "bjn".to_string(),
            city: "北京".to_string(),
        };

        let json = serde_json::to_string(&station).unwrap();
        let back: Station = serde_json::from_str(&json).unwrap();
        assert_eq!(back, station);
    }
}
