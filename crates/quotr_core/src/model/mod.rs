//! Domain model for the quotes catalog.
//!
//! # Responsibility
//! - Define the records owned by a principal (books and quotes).
//! - Validate user-supplied drafts before they reach storage.
//! - Describe paging windows shared by every list use-case.
//!
//! # Invariants
//! - Every `Book` and `Quote` carries exactly one owner, fixed at creation.
//! - A quote owner is tracked independently from its book owner.

pub mod book;
pub mod page;
pub mod quote;
pub mod user;
pub mod validation;
