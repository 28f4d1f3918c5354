use super::{ConfigurationId, RefId, StarId, SystemId};
use crate::constants::{ArcSec, Day};

/// A set of stars believed to be gravitationally associated.
///
/// Membership is not stored on the system itself but in [`StarSystemMember`] join
/// rows, so that a star catalogued by overlapping surveys may belong to several
/// systems.
#[derive(Debug, Clone, PartialEq)]
pub struct StarSystem {
    pub id: SystemId,
    pub name: Option<String>,
    /// Angular separation of the resolved pair
    pub separation: Option<ArcSec>,
    pub separation_ref: Option<RefId>,
    /// Orbital period of the spectroscopic pair
    pub period: Option<Day>,
    pub spec_ref: Option<RefId>,
}

impl StarSystem {
    pub fn new(id: SystemId, name: Option<String>) -> Self {
        StarSystem {
            id,
            name,
            separation: None,
            separation_ref: None,
            period: None,
            spec_ref: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StarSystemMember {
    pub system: SystemId,
    pub star: StarId,
}

/// Nested architecture: a primary and a secondary system composed into one.
///
/// A spectroscopic binary that is the secondary of a wider visual pair is one
/// configuration whose `secondary` is the spectroscopic system.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub id: ConfigurationId,
    pub primary: SystemId,
    pub secondary: SystemId,
    pub label: Option<String>,
}
