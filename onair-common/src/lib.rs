//! # OnAir Common Library
//!
//! Shared code for the OnAir broadcast-automation services including:
//! - Database pool initialization and schema
//! - Configuration resolution (database path)
//! - Common error type
//! - Timestamp utilities

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
