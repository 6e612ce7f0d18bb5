//! Left-ticket query server.
//!
//! A backend proxy for the railway booking site's left-ticket API:
//! establishes a browser-like session, forwards availability queries, and
//! decodes the pipe-delimited results into structured JSON.

pub mod cache;
pub mod dates;
pub mod decode;
pub mod railway;
pub mod stations;
pub mod web;
