//! Persistence hooks for the record book.
//!
//! # Responsibility
//! - Define the load/save contract bootstrap code uses around the model.
//! - Keep SQL details out of the interpretation pipeline.
//!
//! # Invariants
//! - Loaded rows pass the same validators as user input.
//! - Saving replaces the stored book in a single transaction.

pub mod record_repo;
