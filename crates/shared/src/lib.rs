//! Shared types and configuration for Libro.
//!
//! This crate provides common types used across all other crates:
//! - Decimal rounding helpers for monetary amounts
//! - Typed IDs for type-safe entity references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
