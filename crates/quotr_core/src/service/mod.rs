//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate owner-scoped repository calls into catalog use-cases.
//! - Stamp created/modified times from one clock per service.
//! - Map repository errors to the catalog's NotFound/Validation contract.

pub mod account_service;
pub mod book_service;
pub mod clock;
pub mod error;
pub mod quote_service;
