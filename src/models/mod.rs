//! # Catalog entities
//!
//! Statically declared schema for everything the reconciliation engine reads or
//! writes. Each entity is a plain struct keyed by a typed identifier; relations are
//! stored as identifiers and resolved through explicit
//! [`CatalogStore`](crate::store::CatalogStore) accessors, never traversed implicitly.
//!
//! ```text
//! Reference ── Journal
//!     │  └──── Author (many-to-many)
//!     ├─────── Cluster ──── Star (many-to-one)
//!     └─────── Star.<field>_ref (one per measured field)
//!
//! StarSystem ── StarSystemMember ── Star     (many-to-many join)
//! Configuration = (primary StarSystem, secondary StarSystem)
//! Observation ── Star, Instrument, Spectrum?, Ccf?
//! ```
pub mod measurement;
pub mod observation;
pub mod reference;
pub mod star;
pub mod system;

pub use measurement::Measurement;
pub use observation::{Ccf, Instrument, Observation, Spectrum};
pub use reference::{Author, Journal, Reference};
pub use star::{Attribute, Cluster, Star, StarField};
pub use system::{Configuration, StarSystem, StarSystemMember};

macro_rules! entity_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(pub u32);

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}#{}", stringify!($name), self.0)
                }
            }
        )*
    };
}

entity_id!(
    /// Identifier of a [`Reference`]
    RefId,
    JournalId,
    AuthorId,
    ClusterId,
    /// Identifier of a [`Star`]
    StarId,
    /// Identifier of a [`StarSystem`]
    SystemId,
    ConfigurationId,
    InstrumentId,
    ObservationId,
    SpectrumId,
    CcfId,
);
