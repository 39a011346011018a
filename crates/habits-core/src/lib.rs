//! Core types and trait definitions for the habit tracker.
//!
//! This crate is free of HTTP and database dependencies. The store backend
//! and the API layer both depend on it.

pub mod error;
pub mod habit;
pub mod record;
pub mod store;

pub use error::{Error, Result};
