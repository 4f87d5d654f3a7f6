//! Domain model for persons and their session logs.
//!
//! # Responsibility
//! - Define validated value types for every user-supplied field.
//! - Hold the in-memory record book and the mutation surface commands use.
//!
//! # Invariants
//! - Value types are only constructed through their validating `parse` paths.
//! - Identity numbers are unique within one record book.
//! - A person's logs are kept oldest first.

pub mod book;
pub mod field;
pub mod identity;
pub mod index;
pub mod log;
pub mod person;
