//! # Persistent store interface
//!
//! The reconciliation core sees storage only through [`CatalogStore`]: get by natural
//! key, create, update, flush and commit. Relations are explicit accessor calls
//! (`systems_of`, `members`, `observations_of`), so every fetch boundary is visible.
//!
//! ## Visibility
//!
//! Entities returned by a `create_*` call are **pending**: they own an identifier but
//! are invisible to the `*_by_*` lookups until [`CatalogStore::flush`]. Get-or-create
//! callers flush right after creating, so duplicate detection later in the same run
//! observes them. [`CatalogStore::commit`] flushes and makes the run durable; the core
//! never relies on rollback.
//!
//! [`MemoryStore`] is the in-process implementation used by tests and offline drivers.
pub mod memory;

pub use memory::MemoryStore;

use crate::{
    models::{
        Ccf, CcfId, Cluster, ClusterId, Configuration, ConfigurationId, Instrument,
        InstrumentId, Observation, ObservationId, RefId, Reference, SpectrumId, Star, StarId,
        StarSystem, SystemId,
    },
    stellar_errors::StellarError,
};

pub trait CatalogStore {
    // --- references ---------------------------------------------------------------------------
    fn references_by_bibcode(&self, bibcode: &str) -> Vec<Reference>;
    fn reference(&self, id: RefId) -> Option<Reference>;
    fn create_reference(&mut self, bibcode: &str) -> RefId;

    // --- clusters -----------------------------------------------------------------------------
    fn clusters_by_name(&self, name: &str) -> Vec<Cluster>;
    fn create_cluster(&mut self, name: &str, reference: Option<RefId>) -> ClusterId;

    // --- stars --------------------------------------------------------------------------------
    fn stars_by_name(&self, name: &str) -> Vec<Star>;
    fn star(&self, id: StarId) -> Option<Star>;
    /// Every visible star, in creation order.
    fn stars(&self) -> Vec<Star>;
    fn create_star(&mut self, name: &str) -> StarId;
    fn update_star(&mut self, star: &Star) -> Result<(), StellarError>;

    // --- star systems -------------------------------------------------------------------------
    fn star_system(&self, id: SystemId) -> Option<StarSystem>;
    fn create_star_system(&mut self, name: Option<&str>) -> SystemId;
    fn update_star_system(&mut self, system: &StarSystem) -> Result<(), StellarError>;
    /// Insert a membership join row; adding an existing membership is a no-op.
    fn add_member(&mut self, system: SystemId, star: StarId) -> Result<(), StellarError>;
    fn members(&self, system: SystemId) -> Vec<StarId>;
    fn systems_of(&self, star: StarId) -> Vec<SystemId>;

    // --- configurations -----------------------------------------------------------------------
    fn create_configuration(
        &mut self,
        primary: SystemId,
        secondary: SystemId,
        label: Option<&str>,
    ) -> ConfigurationId;
    /// Configurations in which `system` is either the primary or the secondary.
    fn configurations_of(&self, system: SystemId) -> Vec<Configuration>;

    // --- observations -------------------------------------------------------------------------
    fn instruments_by_name(&self, name: &str) -> Vec<Instrument>;
    fn create_instrument(&mut self, name: &str, reference: Option<RefId>) -> InstrumentId;
    fn create_spectrum(&mut self, path: &str) -> SpectrumId;
    fn create_ccf(&mut self, path: &str, rv: Option<f64>, rv_error: Option<f64>) -> CcfId;
    fn ccf(&self, id: CcfId) -> Option<Ccf>;
    fn create_observation(
        &mut self,
        star: StarId,
        instrument: InstrumentId,
        mjd: Option<f64>,
        spectrum: Option<SpectrumId>,
        ccf: Option<CcfId>,
    ) -> Result<ObservationId, StellarError>;
    fn observations_of(&self, star: StarId) -> Vec<Observation>;

    // --- session ------------------------------------------------------------------------------
    /// Make every pending creation visible to subsequent lookups.
    fn flush(&mut self) -> Result<(), StellarError>;
    /// Flush and durably persist everything written so far.
    fn commit(&mut self) -> Result<(), StellarError>;
}
