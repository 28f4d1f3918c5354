//! # External data sources
//!
//! The engine consumes two kinds of per-star services, both opaque beyond the
//! shape of what they return:
//!
//! - an [`AstrometrySource`] (name resolution, positions, photometry, parallax,
//!   rotation, spectral type, radial velocity), queried once per star,
//! - a [`LiteratureSource`] (compiled atmospheric parameters), returning zero or
//!   more rows per star.
//!
//! Network clients implementing these traits live outside the crate. [`StaticSource`]
//! serves pre-loaded tables, which is what the tests and offline drivers use.
pub mod record;

use std::collections::HashMap;

pub use record::{ExternalRecord, ExternalTable, RawValue};

use crate::stellar_errors::StellarError;

pub trait AstrometrySource {
    /// Query one star by name.
    ///
    /// Errors
    /// ----------
    /// * [`StellarError::UpstreamUnavailable`] if the service fails.
    fn query_star(&self, name: &str) -> Result<ExternalTable, StellarError>;
}

pub trait LiteratureSource {
    /// Query every compiled measurement row for one star; an empty table is valid.
    fn query_star(&self, name: &str) -> Result<ExternalTable, StellarError>;
}

/// In-memory source keyed by star name.
///
/// Unknown names answer with an empty table, the same thing a remote service does
/// for an object it cannot resolve.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    tables: HashMap<String, ExternalTable>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, table: impl Into<ExternalTable>) {
        self.tables.insert(name.to_string(), table.into());
    }

    pub fn with(mut self, name: &str, table: impl Into<ExternalTable>) -> Self {
        self.insert(name, table);
        self
    }

    fn lookup(&self, name: &str) -> ExternalTable {
        self.tables.get(name).cloned().unwrap_or_default()
    }
}

impl AstrometrySource for StaticSource {
    fn query_star(&self, name: &str) -> Result<ExternalTable, StellarError> {
        Ok(self.lookup(name))
    }
}

impl LiteratureSource for StaticSource {
    fn query_star(&self, name: &str) -> Result<ExternalTable, StellarError> {
        Ok(self.lookup(name))
    }
}
