use log::debug;

use super::CatalogStore;
use crate::{
    models::{
        Ccf, CcfId, Cluster, ClusterId, Configuration, ConfigurationId, Instrument,
        InstrumentId, Observation, ObservationId, RefId, Reference, Spectrum, SpectrumId, Star,
        StarId, StarSystem, StarSystemMember, SystemId,
    },
    stellar_errors::StellarError,
};

trait Keyed {
    fn key(&self) -> u32;
}

macro_rules! keyed {
    ($($entity:ty),*) => {
        $(impl Keyed for $entity {
            fn key(&self) -> u32 {
                self.id.0
            }
        })*
    };
}

keyed!(Reference, Cluster, Star, StarSystem, Configuration, Instrument, Observation, Spectrum, Ccf);

/// Rows of one entity, split between flushed (queryable) and pending.
#[derive(Debug, Clone)]
struct Table<T> {
    visible: Vec<T>,
    pending: Vec<T>,
    next_id: u32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            visible: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn push(&mut self, row: T) {
        self.pending.push(row);
    }

    fn find(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.visible.iter().filter(|r| predicate(r)).cloned().collect()
    }

    fn flush(&mut self) -> usize {
        let n = self.pending.len();
        self.visible.append(&mut self.pending);
        n
    }
}

impl<T: Clone + Keyed> Table<T> {
    /// Lookup by identifier; the holder of an identifier sees its own pending rows.
    fn get(&self, id: u32) -> Option<T> {
        self.visible
            .iter()
            .chain(self.pending.iter())
            .find(|r| r.key() == id)
            .cloned()
    }

    fn replace(&mut self, row: &T) -> bool {
        match self
            .visible
            .iter_mut()
            .chain(self.pending.iter_mut())
            .find(|r| r.key() == row.key())
        {
            Some(slot) => {
                *slot = row.clone();
                true
            }
            None => false,
        }
    }
}

/// In-memory [`CatalogStore`] with pending/flush/commit semantics.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    references: Table<Reference>,
    clusters: Table<Cluster>,
    stars: Table<Star>,
    systems: Table<StarSystem>,
    members: Table<StarSystemMember>,
    configurations: Table<Configuration>,
    instruments: Table<Instrument>,
    spectra: Table<Spectrum>,
    ccfs: Table<Ccf>,
    observations: Table<Observation>,
    commits: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful commits so far.
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Number of created rows not yet flushed, across all tables.
    pub fn pending(&self) -> usize {
        self.references.pending.len()
            + self.clusters.pending.len()
            + self.stars.pending.len()
            + self.systems.pending.len()
            + self.members.pending.len()
            + self.configurations.pending.len()
            + self.instruments.pending.len()
            + self.spectra.pending.len()
            + self.ccfs.pending.len()
            + self.observations.pending.len()
    }

    fn is_member(&self, system: SystemId, star: StarId) -> bool {
        self.members
            .visible
            .iter()
            .chain(self.members.pending.iter())
            .any(|m| m.system == system && m.star == star)
    }
}

impl CatalogStore for MemoryStore {
    fn references_by_bibcode(&self, bibcode: &str) -> Vec<Reference> {
        self.references.find(|r| r.bibcode == bibcode)
    }

    fn reference(&self, id: RefId) -> Option<Reference> {
        self.references.get(id.0)
    }

    fn create_reference(&mut self, bibcode: &str) -> RefId {
        let id = RefId(self.references.allocate());
        self.references.push(Reference::new(id, bibcode));
        id
    }

    fn clusters_by_name(&self, name: &str) -> Vec<Cluster> {
        self.clusters.find(|c| c.name == name)
    }

    fn create_cluster(&mut self, name: &str, reference: Option<RefId>) -> ClusterId {
        let id = ClusterId(self.clusters.allocate());
        self.clusters.push(Cluster {
            id,
            name: name.to_string(),
            reference,
        });
        id
    }

    fn stars_by_name(&self, name: &str) -> Vec<Star> {
        self.stars.find(|s| s.name == name)
    }

    fn star(&self, id: StarId) -> Option<Star> {
        self.stars.get(id.0)
    }

    fn stars(&self) -> Vec<Star> {
        self.stars.visible.clone()
    }

    fn create_star(&mut self, name: &str) -> StarId {
        let id = StarId(self.stars.allocate());
        self.stars.push(Star::new(id, name));
        id
    }

    fn update_star(&mut self, star: &Star) -> Result<(), StellarError> {
        if self.stars.replace(star) {
            Ok(())
        } else {
            Err(StellarError::NotFound(star.id.to_string()))
        }
    }

    fn star_system(&self, id: SystemId) -> Option<StarSystem> {
        self.systems.get(id.0)
    }

    fn create_star_system(&mut self, name: Option<&str>) -> SystemId {
        let id = SystemId(self.systems.allocate());
        self.systems
            .push(StarSystem::new(id, name.map(str::to_string)));
        id
    }

    fn update_star_system(&mut self, system: &StarSystem) -> Result<(), StellarError> {
        if self.systems.replace(system) {
            Ok(())
        } else {
            Err(StellarError::NotFound(system.id.to_string()))
        }
    }

    fn add_member(&mut self, system: SystemId, star: StarId) -> Result<(), StellarError> {
        if self.systems.get(system.0).is_none() {
            return Err(StellarError::NotFound(system.to_string()));
        }
        if self.stars.get(star.0).is_none() {
            return Err(StellarError::NotFound(star.to_string()));
        }
        if !self.is_member(system, star) {
            self.members.push(StarSystemMember { system, star });
        }
        Ok(())
    }

    fn members(&self, system: SystemId) -> Vec<StarId> {
        self.members
            .find(|m| m.system == system)
            .into_iter()
            .map(|m| m.star)
            .collect()
    }

    fn systems_of(&self, star: StarId) -> Vec<SystemId> {
        self.members
            .find(|m| m.star == star)
            .into_iter()
            .map(|m| m.system)
            .collect()
    }

    fn create_configuration(
        &mut self,
        primary: SystemId,
        secondary: SystemId,
        label: Option<&str>,
    ) -> ConfigurationId {
        let id = ConfigurationId(self.configurations.allocate());
        self.configurations.push(Configuration {
            id,
            primary,
            secondary,
            label: label.map(str::to_string),
        });
        id
    }

    fn configurations_of(&self, system: SystemId) -> Vec<Configuration> {
        self.configurations
            .find(|c| c.primary == system || c.secondary == system)
    }

    fn instruments_by_name(&self, name: &str) -> Vec<Instrument> {
        self.instruments.find(|i| i.name == name)
    }

    fn create_instrument(&mut self, name: &str, reference: Option<RefId>) -> InstrumentId {
        let id = InstrumentId(self.instruments.allocate());
        self.instruments.push(Instrument {
            id,
            name: name.to_string(),
            reference,
        });
        id
    }

    fn create_spectrum(&mut self, path: &str) -> SpectrumId {
        let id = SpectrumId(self.spectra.allocate());
        self.spectra.push(Spectrum {
            id,
            path: path.to_string(),
        });
        id
    }

    fn create_ccf(&mut self, path: &str, rv: Option<f64>, rv_error: Option<f64>) -> CcfId {
        let id = CcfId(self.ccfs.allocate());
        self.ccfs.push(Ccf {
            id,
            path: path.to_string(),
            rv,
            rv_error,
        });
        id
    }

    fn ccf(&self, id: CcfId) -> Option<Ccf> {
        self.ccfs.get(id.0)
    }

    fn create_observation(
        &mut self,
        star: StarId,
        instrument: InstrumentId,
        mjd: Option<f64>,
        spectrum: Option<SpectrumId>,
        ccf: Option<CcfId>,
    ) -> Result<ObservationId, StellarError> {
        if self.stars.get(star.0).is_none() {
            return Err(StellarError::NotFound(star.to_string()));
        }
        if self.instruments.get(instrument.0).is_none() {
            return Err(StellarError::NotFound(instrument.to_string()));
        }
        let id = ObservationId(self.observations.allocate());
        self.observations.push(Observation {
            id,
            star,
            instrument,
            mjd,
            spectrum,
            ccf,
        });
        Ok(id)
    }

    fn observations_of(&self, star: StarId) -> Vec<Observation> {
        self.observations.find(|o| o.star == star)
    }

    fn flush(&mut self) -> Result<(), StellarError> {
        let flushed = self.references.flush()
            + self.clusters.flush()
            + self.stars.flush()
            + self.systems.flush()
            + self.members.flush()
            + self.configurations.flush()
            + self.instruments.flush()
            + self.spectra.flush()
            + self.ccfs.flush()
            + self.observations.flush();
        if flushed > 0 {
            debug!("Flushed {flushed} pending rows");
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StellarError> {
        self.flush()?;
        self.commits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod memory_store_test {
    use super::*;

    #[test]
    fn test_created_rows_visible_after_flush() {
        let mut store = MemoryStore::new();
        let id = store.create_reference("2012A&A...546A...5S");
        assert!(store.references_by_bibcode("2012A&A...546A...5S").is_empty());
        assert_eq!(store.reference(id).map(|r| r.id), Some(id));
        assert_eq!(store.pending(), 1);

        store.flush().unwrap();
        assert_eq!(store.references_by_bibcode("2012A&A...546A...5S").len(), 1);
        assert_eq!(store.pending(), 0);
    }

    #[test]
    fn test_membership_is_deduplicated() {
        let mut store = MemoryStore::new();
        let star = store.create_star("HIP 1");
        let system = store.create_star_system(None);
        store.add_member(system, star).unwrap();
        store.add_member(system, star).unwrap();
        store.commit().unwrap();

        assert_eq!(store.members(system), vec![star]);
        assert_eq!(store.systems_of(star), vec![system]);
        assert_eq!(store.commits(), 1);
        assert_eq!(
            store.add_member(SystemId(42), star),
            Err(StellarError::NotFound("SystemId#42".into()))
        );
    }

    #[test]
    fn test_update_unknown_star() {
        let mut store = MemoryStore::new();
        let ghost = Star::new(StarId(9), "ghost");
        assert!(matches!(
            store.update_star(&ghost),
            Err(StellarError::NotFound(_))
        ));
    }

    #[test]
    fn test_observation_chain() {
        let mut store = MemoryStore::new();
        let star = store.create_star("HIP 2");
        let instrument = store.create_instrument("CHIRON", None);
        let spectrum = store.create_spectrum("spectra/HIP2_20140102.fits");
        let ccf = store.create_ccf("ccfs/HIP2_20140102.dat", Some(-12.1), Some(0.3));
        let obs = store
            .create_observation(star, instrument, Some(56659.1), Some(spectrum), Some(ccf))
            .unwrap();
        store.flush().unwrap();

        let observations = store.observations_of(star);
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].id, obs);
        assert_eq!(observations[0].spectrum, Some(spectrum));
        assert_eq!(store.ccf(ccf).and_then(|c| c.rv), Some(-12.1));
        assert_eq!(store.instruments_by_name("CHIRON").len(), 1);
        assert!(store
            .create_observation(StarId(99), instrument, None, None, None)
            .is_err());
    }
}
