//! Upstream left-ticket API response DTOs.
//!
//! These types map directly to the upstream query endpoint's JSON envelope.
//! The interesting payload — one `|`-delimited string per train plus a
//! telecode→name map — stays opaque here and is decoded by [`crate::decode`].

use std::collections::HashMap;

use serde::Deserialize;

/// Envelope of `/otn/leftTicket/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeftTicketResponse {
    /// Application-level status code; 200 on success even when the result
    /// list is empty.
    pub httpstatus: Option<u16>,

    /// Application-level success flag.
    pub status: Option<bool>,

    /// Error or notice messages. The upstream sends either a bare string or
    /// a list depending on the failure.
    #[serde(default)]
    pub messages: Messages,

    /// Query payload. Omitted when the query was rejected.
    pub data: Option<LeftTicketData>,
}

/// Query payload: raw records plus the station map for this result set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeftTicketData {
    /// One `|`-delimited record string per train.
    #[serde(default)]
    pub result: Vec<String>,

    /// Telecode → station display name for every station in `result`.
    #[serde(default)]
    pub map: HashMap<String, String>,

    /// Upstream result flag; passed through untyped.
    #[serde(default)]
    pub flag: Option<String>,
}

/// Upstream message field: a bare string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Messages {
    Text(String),
    List(Vec<String>),
}

impl Default for Messages {
    fn default() -> Self {
        Messages::Text(String::new())
    }
}

impl Messages {
    /// Whether there is any message content.
    pub fn is_empty(&self) -> bool {
        match self {
            Messages::Text(s) => s.is_empty(),
            Messages::List(items) => items.iter().all(|s| s.is_empty()),
        }
    }

    /// Join all messages into one displayable string.
    pub fn to_display(&self) -> String {
        match self {
            Messages::Text(s) => s.clone(),
            Messages::List(items) => items.join("; "),
        }
    }
}
