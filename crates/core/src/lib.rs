//! Core business logic for Libro.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and the journal-entry generation engine
//! live here.
//!
//! # Modules
//!
//! - `chart` - Chart of accounts types and semantic account roles
//! - `fiscal` - Accounting period types
//! - `engine` - The journal-entry generation engine ("Motor de Asientos")

pub mod chart;
pub mod engine;
pub mod fiscal;
