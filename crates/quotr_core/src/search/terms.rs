//! Search-term parsing shared by every search provider.
//!
//! # Invariants
//! - Tokens are lowercase runs of letters and digits; punctuation only
//!   separates tokens and never reaches the engine.
//! - A non-blank input with no tokens is still a search (it matches nothing).
//! - Input of any length is accepted; parsing never fails.

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("valid search token regex"));

/// Tokenized search input; every token must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms {
    tokens: Vec<String>,
}

impl SearchTerms {
    /// Parses raw search input.
    ///
    /// Returns `None` when the input is absent or blank, meaning no
    /// search was requested.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let text = raw.map(str::trim).filter(|text| !text.is_empty())?;
        let tokens = TOKEN_RE
            .find_iter(text)
            .map(|token| token.as_str().to_lowercase())
            .collect();
        Some(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
