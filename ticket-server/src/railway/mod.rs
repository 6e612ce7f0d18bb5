//! Upstream railway (12306) HTTP client.
//!
//! The upstream left-ticket API is cookie-gated and browser-shaped:
//! - a session must first be established by fetching the landing page and
//!   collecting its `Set-Cookie` headers
//! - the query endpoint wants booking-page headers (Referer,
//!   `X-Requested-With`) alongside the cookie header
//! - results arrive as one opaque `|`-delimited string per train plus a
//!   telecode→name station map; decoding lives in [`crate::decode`]

mod client;
mod cookies;
mod error;
mod types;

pub use client::{RailwayClient, RailwayConfig};
pub use cookies::{CookieJar, format_cookie_header, parse_set_cookies};
pub use error::RailwayError;
pub use types::{LeftTicketData, LeftTicketResponse, Messages};
