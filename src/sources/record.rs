//! # External tabular records
//!
//! Remote services and local catalog dumps hand the engine **tabular data with
//! independently maskable fields**. This module gives that shape a type:
//!
//! - [`RawValue`] – one cell, either masked, a number, or free text,
//! - [`ExternalRecord`] – one row, addressed by column name,
//! - [`ExternalTable`] – zero or more rows returned for one query.
//!
//! A column that is absent from a row reads as [`RawValue::Masked`], so mappers can
//! probe optional columns without ever failing on them. Turning cells into internal
//! scalars goes through [`coerce_nullable`](crate::conversion::coerce_nullable).
use std::collections::BTreeMap;

use crate::conversion::{coerce_f64, coerce_text};

static MASKED: RawValue = RawValue::Masked;

/// A single cell of an external table.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Masked or missing value as reported by the source
    Masked,
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Masked)
    }
}

/// One row of an external table, addressed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalRecord {
    fields: BTreeMap<String, RawValue>,
}

impl ExternalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, convenient for fixtures and static sources.
    pub fn with(mut self, column: &str, value: impl Into<RawValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<RawValue>) {
        self.fields.insert(column.to_string(), value.into());
    }

    /// Raw cell for `column`; absent columns read as masked.
    pub fn get(&self, column: &str) -> &RawValue {
        self.fields.get(column).unwrap_or(&MASKED)
    }

    /// Numeric cell, null-coerced.
    pub fn f64(&self, column: &str) -> Option<f64> {
        coerce_f64(self.get(column))
    }

    /// Text cell, null-coerced and trimmed.
    pub fn text(&self, column: &str) -> Option<String> {
        coerce_text(self.get(column))
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for ExternalRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ExternalRecord {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// All rows a source returned for one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalTable {
    pub rows: Vec<ExternalRecord>,
}

impl ExternalTable {
    pub fn new(rows: Vec<ExternalRecord>) -> Self {
        ExternalTable { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn first(&self) -> Option<&ExternalRecord> {
        self.rows.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExternalRecord> {
        self.rows.iter()
    }
}

impl From<Vec<ExternalRecord>> for ExternalTable {
    fn from(rows: Vec<ExternalRecord>) -> Self {
        ExternalTable::new(rows)
    }
}
