//! Data transfer objects for web requests and responses.
//!
//! Decoded [`TicketRecord`]s serialize directly; they are the response
//! payload, not wrapped in a separate view type.

use serde::{Deserialize, Serialize};

use crate::decode::TicketRecord;
use crate::stations::Station;

/// Query string for `/api/tickets`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketQueryRequest {
    /// Travel date, `YYYY-MM-DD`.
    pub date: String,

    /// Departure station telecode.
    pub from_station: String,

    /// Arrival station telecode.
    pub to_station: String,

    /// Category selector characters, e.g. "GD". Empty means no filter.
    #[serde(default)]
    pub train_filter_flags: String,
}

/// Response for `/api/tickets`.
#[derive(Debug, Serialize)]
pub struct TicketQueryResponse {
    /// Decoded (and possibly filtered) tickets.
    pub tickets: Vec<TicketRecord>,

    /// Human-readable note, set when the result is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for `/api/current-date`.
#[derive(Debug, Serialize)]
pub struct CurrentDateResponse {
    /// Today in China Standard Time, `YYYY-MM-DD`.
    pub date: String,
}

/// Response for `/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Query string for `/api/stations/search`.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Keyword: name substring or pinyin/abbreviation prefix.
    pub q: String,

    /// Maximum results (default 10, capped at 50).
    pub limit: Option<usize>,
}

/// Query string for `/api/stations/in-city`.
#[derive(Debug, Deserialize)]
pub struct CityRequest {
    pub city: String,
}

/// Query string for `/api/stations/by-name`.
#[derive(Debug, Deserialize)]
pub struct StationNameRequest {
    pub name: String,
}

/// Query string for `/api/stations/by-code`.
#[derive(Debug, Deserialize)]
pub struct StationCodeRequest {
    pub code: String,
}

/// A list of stations.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<Station>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_query_request_accepts_camel_case() {
        let json = r#"{
            "date": "2026-08-09",
            "fromStation": "VNP",
            "toStation": "AOH",
            "trainFilterFlags": "GD"
        }"#;

        let req: TicketQueryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.date, "2026-08-09");
        assert_eq!(req.from_station, "VNP");
        assert_eq!(req.to_station, "AOH");
        assert_eq!(req.train_filter_flags, "GD");
    }

    #[test]
    fn filter_flags_default_to_empty() {
        let json = r#"{"date": "2026-08-09", "fromStation": "VNP", "toStation": "AOH"}"#;

        let req: TicketQueryRequest = serde_json::from_str(json).unwrap();
        assert!(req.train_filter_flags.is_empty());
    }

    #[test]
    fn empty_result_serializes_with_message() {
        let response = TicketQueryResponse {
            tickets: Vec::new(),
            message: Some("no matching tickets".to_string()),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["tickets"].as_array().unwrap().len(), 0);
        assert_eq!(json["message"], "no matching tickets");
    }

    #[test]
    fn message_is_omitted_when_absent() {
        let response = TicketQueryResponse {
            tickets: Vec::new(),
            message: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("message").is_none());
    }
}
