//! Full-text quote search.
//!
//! # Responsibility
//! - Turn free-text input into engine-neutral search terms.
//! - Define the ranking provider contract used by quote listing.
//! - Provide the SQLite FTS5 implementation of that contract.

pub mod fts;
pub mod provider;
pub mod terms;
