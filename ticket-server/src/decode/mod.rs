//! Left-ticket record decoding and filtering.
//!
//! The upstream query endpoint returns each train as one opaque
//! `|`-delimited string plus a telecode→name station map. This module turns
//! those strings into typed [`TicketRecord`]s and applies train-category
//! filters. It is a pure, synchronous pipeline: no I/O, no shared state,
//! and per-record fault isolation (a malformed record never fails a batch).
//!
//! The positional field schema lives in [`schema`] as a single declarative
//! table, since the upstream format is undocumented and version-coupled.

pub mod schema;

mod filter;
mod flags;
mod record;
mod seats;

pub use filter::{filter_by_category, matches_selector};
pub use flags::extract_service_flags;
pub use record::{DecodeError, StationMap, TicketRecord, decode_batch, decode_batch_logged, decode_record};
pub use seats::{SeatOffer, extract_seats};
