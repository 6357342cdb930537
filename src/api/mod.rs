//! Open Trivia DB client.
//!
//! Two read-only endpoints: the category list, fetched once at startup,
//! and the question batch, fetched when a quiz starts. All text in the
//! question payload is HTML-entity-encoded and decoded here.

mod client;
mod decode;

pub use client::{ApiError, TriviaClient, DEFAULT_BASE_URL};
pub use decode::decode_html_entities;
