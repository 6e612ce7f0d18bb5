//! Web layer for the left-ticket query server.
//!
//! Provides JSON endpoints for ticket queries, station lookups, and the
//! current booking date.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
