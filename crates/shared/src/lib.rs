//! Shared types, errors, and configuration for Divvy.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe member, group, expense and settlement references
//! - Tolerance and amount helpers for decimal money
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
