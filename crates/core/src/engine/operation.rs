//! Operation data supplied by the calling business module.
//!
//! The engine does not decide what happened or how much money is involved.
//! It receives a flat field map of already-computed values and only reads
//! from it.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single operation-data field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric value (amounts, quantities).
    Number(Decimal),
    /// Text value (document numbers, payment means).
    Text(String),
    /// Boolean flag.
    Bool(bool),
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Flat field map describing one business operation.
///
/// A `BTreeMap` keeps field iteration order deterministic, which keeps the
/// run trace reproducible for identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationData(BTreeMap<String, FieldValue>);

impl OperationData {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style insert for test fixtures and call sites.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the raw field value, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Returns the numeric value of a field, if present and numeric.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<Decimal> {
        match self.0.get(name) {
            Some(FieldValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the names of all supplied fields, in deterministic order.
    ///
    /// Field *names* are safe to log; values never are.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Returns true if no fields were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for OperationData {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
