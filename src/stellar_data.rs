//! # StellarData: the reconciliation façade
//!
//! [`StellarData`] owns a [`CatalogStore`] handle and a [`ReconcileConfig`] and drives
//! every other component over a list of target stars:
//!
//! 1. **Identity**: [`add_star_identity`](StellarData::add_star_identity) gets or creates
//!    the star and fills its position, photometry, parallax, velocities and spectral
//!    type from the name-resolution service.
//! 2. **Parameters**: [`add_stellar_parameters`](StellarData::add_stellar_parameters)
//!    combines the literature rows into temperature, log g and metallicity.
//! 3. **Systems**: [`assign_star_system`](StellarData::assign_star_system) groups stars,
//!    [`record_multiplicity`](StellarData::record_multiplicity) feeds the multiplicity
//!    catalogs into the star's system.
//!
//! ## Write discipline
//!
//! - Every field write is preceded by the resolution of its reference.
//! - Every get-or-create flushes right after creating, so later lookups in the same run
//!   see the new entity.
//! - Fields are filled additively: under [`OverwritePolicy::KeepExisting`] a value
//!   already stored is never replaced.
//!
//! ## Error policy
//!
//! Per-field problems (masked cells, undefined combinations, malformed coordinates)
//! leave the field absent. [`ingest`](StellarData::ingest) skips a star on
//! [`StellarError::UpstreamUnavailable`], [`StellarError::DuplicateEntity`] or a format
//! error and goes on; a [`StellarError::PreconditionViolation`] stops the run.
//!
//! ## Typical usage
//!
//! ```rust
//! use stellar_data::{
//!     sources::{ExternalRecord, StaticSource},
//!     store::MemoryStore,
//!     stellar_data::StellarData,
//! };
//!
//! let simbad = StaticSource::new().with(
//!     "HD 1",
//!     vec![ExternalRecord::new()
//!         .with("MAIN_ID", "HD 1")
//!         .with("RA", "00 05 08.8")
//!         .with("DEC", "+67 50 24")],
//! );
//! let pastel = StaticSource::new();
//!
//! let mut data = StellarData::new(MemoryStore::new());
//! let report = data.ingest(&["HD 1"], &simbad, &pastel).unwrap();
//! assert_eq!(report.processed, vec!["HD 1".to_string()]);
//! data.commit().unwrap();
//! ```
use log::{debug, info, warn};

use crate::{
    config::{OverwritePolicy, ReconcileConfig},
    crossmatch::cross_match,
    mapper::{map_field, map_identity, map_text_field, CatalogMapper, PastelMapper, SimbadMapper},
    models::{Cluster, Configuration, Reference, Star, StarField, StarSystem, SystemId},
    multiplicity::{MultiplicityCatalogs, MultiplicityRow},
    references::{bibcode_or_unknown, resolve_reference},
    sources::{AstrometrySource, ExternalTable, LiteratureSource},
    store::CatalogStore,
    stellar_errors::StellarError,
};

/// Fields read from the name-resolution service, besides identity and position.
const IDENTITY_FIELDS: [StarField; 5] = [
    StarField::Vmag,
    StarField::Kmag,
    StarField::Parallax,
    StarField::Vsini,
    StarField::Vsys,
];

/// Fields read from the literature compilation.
const PARAMETER_FIELDS: [StarField; 3] =
    [StarField::Temperature, StarField::Logg, StarField::Metallicity];

/// Errors after which a batch run moves on to the next star.
fn skips_star(err: &StellarError) -> bool {
    err.is_recoverable_format()
        || matches!(
            err,
            StellarError::UpstreamUnavailable(_) | StellarError::DuplicateEntity { .. }
        )
}

/// Outcome of a batch run.
#[derive(Debug, Default, PartialEq)]
pub struct IngestReport {
    /// Names fully processed, in input order
    pub processed: Vec<String>,
    /// Names skipped with the error that stopped them
    pub skipped: Vec<(String, StellarError)>,
}

#[derive(Debug)]
pub struct StellarData<S: CatalogStore> {
    store: S,
    config: ReconcileConfig,
}

impl<S: CatalogStore> StellarData<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, ReconcileConfig::default())
    }

    pub fn with_config(store: S, config: ReconcileConfig) -> Self {
        StellarData { store, config }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Flush and durably persist the run.
    pub fn commit(&mut self) -> Result<(), StellarError> {
        self.store.commit()
    }

    /// Resolve an optional citation, blank or absent ones going to the unknown sentinel.
    pub fn resolve_reference(&mut self, bibcode: Option<&str>) -> Result<Reference, StellarError> {
        let bibcode = bibcode_or_unknown(bibcode, &self.config.unknown_bibcode).to_string();
        resolve_reference(&mut self.store, &bibcode)
    }

    // ---------------------------------------------------------------------------------------------
    // Stars
    // ---------------------------------------------------------------------------------------------

    /// The stored star named `name`, if any.
    ///
    /// Errors
    /// ----------
    /// * [`StellarError::DuplicateEntity`] if several stars share the name.
    pub fn find_star(&self, name: &str) -> Result<Option<Star>, StellarError> {
        let mut found = self.store.stars_by_name(name);
        match found.len() {
            0 => Ok(None),
            1 => Ok(found.pop()),
            count => Err(StellarError::DuplicateEntity {
                key: name.to_string(),
                count,
            }),
        }
    }

    /// Get-or-create a star by name. A created star is flushed before returning.
    pub fn get_or_create_star(&mut self, name: &str) -> Result<Star, StellarError> {
        if let Some(star) = self.find_star(name)? {
            return Ok(star);
        }
        let id = self.store.create_star(name);
        self.store.flush()?;
        info!("Created star {name}");
        self.store
            .star(id)
            .ok_or_else(|| StellarError::NotFound(id.to_string()))
    }

    fn existing_star(&self, name: &str, step: &str) -> Result<Star, StellarError> {
        self.find_star(name)?.ok_or_else(|| {
            StellarError::PreconditionViolation(format!("{step}: star {name} is not stored yet"))
        })
    }

    /// Write one numeric field of `star` from a source table.
    ///
    /// Returns whether the field was written. A field already set is skipped without
    /// resolving any reference unless the policy is [`OverwritePolicy::Replace`].
    fn fill_numeric<M: CatalogMapper>(
        &mut self,
        star: &mut Star,
        table: &ExternalTable,
        field: StarField,
    ) -> Result<bool, StellarError> {
        let policy = self.config.overwrite;
        if policy == OverwritePolicy::KeepExisting
            && star.numeric(field).is_some_and(|a| a.is_set())
        {
            return Ok(false);
        }
        let measurement = match map_field::<M>(table, field, &self.config.default_errors) {
            Ok(Some(m)) => m,
            Ok(None) => return Ok(false),
            Err(err) => {
                warn!("{} {field} of {} left absent: {err}", M::SOURCE, star.name);
                return Ok(false);
            }
        };
        let reference = self.resolve_reference(measurement.bibcode.as_deref())?;
        Ok(star.numeric_mut(field).is_some_and(|attr| {
            attr.fill(measurement.value, measurement.error, reference.id, policy)
        }))
    }

    fn fill_spectral_type(
        &mut self,
        star: &mut Star,
        table: &ExternalTable,
    ) -> Result<bool, StellarError> {
        let policy = self.config.overwrite;
        if policy == OverwritePolicy::KeepExisting && star.spectral_type.is_set() {
            return Ok(false);
        }
        let Some(measurement) = map_text_field::<SimbadMapper>(table, StarField::SpectralType) else {
            return Ok(false);
        };
        let reference = self.resolve_reference(measurement.bibcode.as_deref())?;
        Ok(star
            .spectral_type
            .fill(measurement.value, None, reference.id, policy))
    }

    /// Identity step: get-or-create `name` and fill it from the name-resolution service.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: The target star name, used both as the store key and as the query.
    /// * `source`: The name-resolution service.
    ///
    /// Return
    /// ----------
    /// * The star as stored after the update.
    ///
    /// Errors
    /// ----------
    /// * [`StellarError::UpstreamUnavailable`] if the service fails or returns no row.
    ///   Nothing is created in that case.
    /// * [`StellarError::DuplicateEntity`] on ambiguous star or reference lookups.
    pub fn add_star_identity<A: AstrometrySource + ?Sized>(
        &mut self,
        name: &str,
        source: &A,
    ) -> Result<Star, StellarError> {
        let table = source.query_star(name)?;
        if table.is_empty() {
            return Err(StellarError::UpstreamUnavailable(format!(
                "no {} row for {name}",
                SimbadMapper::SOURCE
            )));
        }

        let mut star = self.get_or_create_star(name)?;
        let replace = self.config.overwrite == OverwritePolicy::Replace;
        if let Some(identity) = map_identity(&table) {
            if star.main_id.is_none() || replace {
                star.main_id = identity.main_id.or(star.main_id.take());
            }
            if star.ra.is_none() || replace {
                star.ra = identity.ra.or(star.ra);
            }
            if star.dec.is_none() || replace {
                star.dec = identity.dec.or(star.dec);
            }
        }

        let mut written = 0;
        for field in IDENTITY_FIELDS {
            if self.fill_numeric::<SimbadMapper>(&mut star, &table, field)? {
                written += 1;
            }
        }
        if self.fill_spectral_type(&mut star, &table)? {
            written += 1;
        }
        debug!("{name}: {written} identity field(s) written");

        self.store.update_star(&star)?;
        Ok(star)
    }

    /// Parameters step: fill temperature, log g and metallicity from the literature.
    ///
    /// Multiple literature rows are combined with inverse-variance weights. A star the
    /// compilation does not list is returned unchanged.
    ///
    /// Errors
    /// ----------
    /// * [`StellarError::PreconditionViolation`] if `name` is not stored yet: the identity
    ///   step must run first.
    pub fn add_stellar_parameters<L: LiteratureSource + ?Sized>(
        &mut self,
        name: &str,
        source: &L,
    ) -> Result<Star, StellarError> {
        let mut star = self.existing_star(name, "stellar parameters")?;
        let table = source.query_star(name)?;
        if table.is_empty() {
            info!("No {} entry for {name}", PastelMapper::SOURCE);
            return Ok(star);
        }

        for field in PARAMETER_FIELDS {
            self.fill_numeric::<PastelMapper>(&mut star, &table, field)?;
        }
        self.store.update_star(&star)?;
        Ok(star)
    }

    /// Run both enrichment steps over `names`, one star at a time.
    ///
    /// Stars whose source is unavailable or whose lookups are ambiguous are logged and
    /// reported as skipped. Anything else aborts the run.
    pub fn ingest<A, L>(
        &mut self,
        names: &[&str],
        astrometry: &A,
        literature: &L,
    ) -> Result<IngestReport, StellarError>
    where
        A: AstrometrySource + ?Sized,
        L: LiteratureSource + ?Sized,
    {
        let mut report = IngestReport::default();
        for name in names {
            let outcome = self
                .add_star_identity(name, astrometry)
                .and_then(|_| self.add_stellar_parameters(name, literature));
            match outcome {
                Ok(_) => report.processed.push(name.to_string()),
                Err(err) if skips_star(&err) => {
                    warn!("Skipping {name}: {err}");
                    report.skipped.push((name.to_string(), err));
                }
                Err(err) => return Err(err),
            }
        }
        info!(
            "Ingested {} star(s), skipped {}",
            report.processed.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    // ---------------------------------------------------------------------------------------------
    // Systems
    // ---------------------------------------------------------------------------------------------

    /// The system containing `star`, membership being tested by star name.
    ///
    /// Several systems may list the star; the earliest created one is returned.
    pub fn get_star_system_for(&self, star: &Star) -> Result<Option<StarSystem>, StellarError> {
        let mut ids: Vec<SystemId> = self
            .store
            .stars_by_name(&star.name)
            .iter()
            .map(|s| s.id)
            .chain(std::iter::once(star.id))
            .flat_map(|id| self.store.systems_of(id))
            .collect();
        ids.sort();
        ids.dedup();
        if ids.len() > 1 {
            debug!("{} belongs to {} systems, using {}", star.name, ids.len(), ids[0]);
        }
        match ids.first() {
            Some(id) => self
                .store
                .star_system(*id)
                .map(Some)
                .ok_or_else(|| StellarError::NotFound(id.to_string())),
            None => Ok(None),
        }
    }

    /// Put the named stars into one system, creating stars and system as needed.
    ///
    /// If one of the stars already belongs to a system, that system is reused. A star
    /// already in another system is left where it is. Running the same assignment twice
    /// creates nothing the second time.
    ///
    /// Arguments
    /// -----------------
    /// * `names`: Members of the system, at least one.
    /// * `system_name`: Name given to the system if it has to be created.
    pub fn assign_star_system(
        &mut self,
        names: &[&str],
        system_name: Option<&str>,
    ) -> Result<StarSystem, StellarError> {
        if names.is_empty() {
            return Err(StellarError::PreconditionViolation(
                "a star system needs at least one member".into(),
            ));
        }
        let stars = names
            .iter()
            .map(|name| self.get_or_create_star(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut current = Vec::with_capacity(stars.len());
        for star in &stars {
            current.push(self.get_star_system_for(star)?);
        }

        let system = match current.iter().flatten().next() {
            Some(system) => system.clone(),
            None => {
                let id = self.store.create_star_system(system_name);
                self.store.flush()?;
                info!("Created star system {id} for {}", names.join(", "));
                self.store
                    .star_system(id)
                    .ok_or_else(|| StellarError::NotFound(id.to_string()))?
            }
        };

        for (star, existing) in stars.iter().zip(&current) {
            match existing {
                None => self.store.add_member(system.id, star.id)?,
                Some(other) if other.id != system.id => {
                    warn!(
                        "{} already belongs to {}, not adding it to {}",
                        star.name, other.id, system.id
                    );
                }
                Some(_) => {}
            }
        }
        self.store.flush()?;
        Ok(system)
    }

    /// Get-or-create the configuration composing `primary` and `secondary`.
    pub fn add_configuration(
        &mut self,
        primary: SystemId,
        secondary: SystemId,
        label: Option<&str>,
    ) -> Result<Configuration, StellarError> {
        for id in [primary, secondary] {
            if self.store.star_system(id).is_none() {
                return Err(StellarError::NotFound(id.to_string()));
            }
        }
        let same = |c: &Configuration| {
            c.primary == primary && c.secondary == secondary && c.label.as_deref() == label
        };
        if let Some(existing) = self.store.configurations_of(primary).into_iter().find(same) {
            return Ok(existing);
        }
        self.store.create_configuration(primary, secondary, label);
        self.store.flush()?;
        self.store
            .configurations_of(primary)
            .into_iter()
            .find(same)
            .ok_or_else(|| StellarError::NotFound(format!("configuration {primary}/{secondary}")))
    }

    // ---------------------------------------------------------------------------------------------
    // Clusters
    // ---------------------------------------------------------------------------------------------

    /// Get-or-create a cluster by name; its defining reference is resolved on creation.
    pub fn get_or_create_cluster(
        &mut self,
        name: &str,
        bibcode: Option<&str>,
    ) -> Result<Cluster, StellarError> {
        let mut found = self.store.clusters_by_name(name);
        match found.len() {
            0 => {
                let reference = self.resolve_reference(bibcode)?;
                self.store.create_cluster(name, Some(reference.id));
                self.store.flush()?;
                info!("Created cluster {name}");
                self.store
                    .clusters_by_name(name)
                    .pop()
                    .ok_or_else(|| StellarError::NotFound(name.to_string()))
            }
            1 => Ok(found.swap_remove(0)),
            count => Err(StellarError::DuplicateEntity {
                key: name.to_string(),
                count,
            }),
        }
    }

    /// Attach a stored star to a cluster, creating the cluster if needed.
    pub fn attach_to_cluster(
        &mut self,
        star_name: &str,
        cluster_name: &str,
        bibcode: Option<&str>,
    ) -> Result<Star, StellarError> {
        let mut star = self.existing_star(star_name, "cluster membership")?;
        let cluster = self.get_or_create_cluster(cluster_name, bibcode)?;
        if star.cluster.is_none() || self.config.overwrite == OverwritePolicy::Replace {
            star.cluster = Some(cluster.id);
            self.store.update_star(&star)?;
        }
        Ok(star)
    }

    // ---------------------------------------------------------------------------------------------
    // Multiplicity
    // ---------------------------------------------------------------------------------------------

    /// Rows of every multiplicity catalog lying around the stored star `name`.
    ///
    /// Errors
    /// ----------
    /// * [`StellarError::PreconditionViolation`] if the star is not stored or has no position.
    pub fn cross_match_multiplicity(
        &self,
        name: &str,
        catalogs: &MultiplicityCatalogs,
    ) -> Result<Vec<MultiplicityRow>, StellarError> {
        let star = self.existing_star(name, "cross-match")?;
        cross_match(&star, catalogs, self.config.crossmatch_tolerance_arcsec)
    }

    /// Cross-match `name` and record what the catalogs say on its system.
    ///
    /// The first resolved separation (strictly positive) and the first period found set
    /// the system's `separation` and `period`, each with its own reference. A cluster
    /// named by a row is attached to the star. Returns `None` when no catalog lists the
    /// star.
    pub fn record_multiplicity(
        &mut self,
        name: &str,
        catalogs: &MultiplicityCatalogs,
    ) -> Result<Option<StarSystem>, StellarError> {
        let rows = self.cross_match_multiplicity(name, catalogs)?;
        if rows.is_empty() {
            debug!("{name}: no multiplicity entry");
            return Ok(None);
        }
        let mut system = self.assign_star_system(&[name], None)?;
        let replace = self.config.overwrite == OverwritePolicy::Replace;

        if system.separation.is_none() || replace {
            if let Some((sep, row)) = rows
                .iter()
                .find_map(|r| r.separation.filter(|s| *s > 0.0).map(|s| (s, r)))
            {
                let reference = self.resolve_reference(row.sep_bibcode.as_deref())?;
                system.separation = Some(sep);
                system.separation_ref = Some(reference.id);
            }
        }
        if system.period.is_none() || replace {
            if let Some((per, row)) = rows.iter().find_map(|r| r.per.map(|p| (p, r))) {
                let reference = self.resolve_reference(row.orbit_bibcode.as_deref())?;
                system.period = Some(per);
                system.spec_ref = Some(reference.id);
            }
        }
        self.store.update_star_system(&system)?;

        if let Some((cluster, age_ref)) = rows
            .iter()
            .find_map(|r| r.cluster.as_deref().map(|c| (c, r.age_ref.as_deref())))
        {
            self.attach_to_cluster(name, cluster, age_ref)?;
        }
        Ok(Some(system))
    }
}

#[cfg(test)]
mod stellar_data_test {
    use super::*;
    use crate::{
        sources::{ExternalRecord, StaticSource},
        store::MemoryStore,
    };
    use approx::assert_relative_eq;

    fn simbad_row(vmag: f64) -> ExternalRecord {
        ExternalRecord::new()
            .with("MAIN_ID", "* alf Lyr")
            .with("RA", "18 36 56.3")
            .with("DEC", "+38 47 01.3")
            .with("FLUX_V", vmag)
            .with("FLUX_ERROR_V", 0.01)
            .with("FLUX_BIBCODE_V", "2002yCat.2237....0D")
            .with("PLX_VALUE", 130.23)
            .with("PLX_ERROR", 0.36)
            .with("PLX_BIBCODE", "2007A&A...474..653V")
            .with("SP_TYPE", "A0Va")
            .with("SP_BIBCODE", "")
    }

    #[test]
    fn test_identity_fills_fields() {
        let simbad = StaticSource::new().with("Vega", vec![simbad_row(0.03)]);
        let mut data = StellarData::new(MemoryStore::new());
        let star = data.add_star_identity("Vega", &simbad).unwrap();

        assert_eq!(star.main_id.as_deref(), Some("* alf Lyr"));
        assert_relative_eq!(star.ra.unwrap(), 18.0 + 36.0 / 60.0 + 56.3 / 3600.0, epsilon = 1e-12);
        assert_eq!(star.vmag.value, Some(0.03));
        assert_eq!(star.parallax.error, Some(0.36));
        assert_eq!(star.spectral_type.value.as_deref(), Some("A0Va"));
        assert_eq!(star.kmag.value, None);

        let unknown = data.store().references_by_bibcode("Unknown");
        assert_eq!(unknown.len(), 1);
        assert_eq!(star.spectral_type.reference, Some(unknown[0].id));
    }

    #[test]
    fn test_identity_keeps_existing_values() {
        let mut data = StellarData::new(MemoryStore::new());
        let first = StaticSource::new().with("Vega", vec![simbad_row(0.03)]);
        let second = StaticSource::new().with("Vega", vec![simbad_row(9.99)]);
        data.add_star_identity("Vega", &first).unwrap();
        let star = data.add_star_identity("Vega", &second).unwrap();
        assert_eq!(star.vmag.value, Some(0.03));
        assert_eq!(data.store().stars().len(), 1);
    }

    #[test]
    fn test_replace_policy_overwrites() {
        let config = ReconcileConfig {
            overwrite: OverwritePolicy::Replace,
            ..Default::default()
        };
        let mut data = StellarData::with_config(MemoryStore::new(), config);
        data.add_star_identity("Vega", &StaticSource::new().with("Vega", vec![simbad_row(0.03)]))
            .unwrap();
        let star = data
            .add_star_identity("Vega", &StaticSource::new().with("Vega", vec![simbad_row(0.05)]))
            .unwrap();
        assert_eq!(star.vmag.value, Some(0.05));
    }

    #[test]
    fn test_empty_upstream_creates_nothing() {
        let mut data = StellarData::new(MemoryStore::new());
        let err = data
            .add_star_identity("Nobody", &StaticSource::new())
            .unwrap_err();
        assert!(matches!(err, StellarError::UpstreamUnavailable(_)));
        assert!(data.store().stars().is_empty());
    }

    #[test]
    fn test_parameters_require_identity() {
        let mut data = StellarData::new(MemoryStore::new());
        let err = data
            .add_stellar_parameters("Vega", &StaticSource::new())
            .unwrap_err();
        assert_eq!(
            err,
            StellarError::PreconditionViolation(
                "stellar parameters: star Vega is not stored yet".into()
            )
        );
    }

    #[test]
    fn test_parameters_are_combined() {
        let simbad = StaticSource::new().with("Vega", vec![simbad_row(0.03)]);
        let pastel = StaticSource::new().with(
            "Vega",
            vec![
                ExternalRecord::new()
                    .with("Teff", 9500.0)
                    .with("e_Teff", 100.0)
                    .with("bibcode", "1999A&A...A"),
                ExternalRecord::new()
                    .with("Teff", 9700.0)
                    .with("e_Teff", 200.0)
                    .with("bibcode", "2003A&A...B"),
            ],
        );
        let mut data = StellarData::new(MemoryStore::new());
        data.add_star_identity("Vega", &simbad).unwrap();
        let star = data.add_stellar_parameters("Vega", &pastel).unwrap();

        // weights 1e-4 and 2.5e-5
        assert_relative_eq!(star.temperature.value.unwrap(), 9540.0, epsilon = 1e-9);
        assert_eq!(star.logg.value, None);
        let best = data.store().references_by_bibcode("1999A&A...A");
        assert_eq!(star.temperature.reference, Some(best[0].id));
    }

    #[test]
    fn test_assign_star_system_is_idempotent() {
        let mut data = StellarData::new(MemoryStore::new());
        let first = data.assign_star_system(&["HD 1", "HD 2"], Some("HD 1 AB")).unwrap();
        let second = data.assign_star_system(&["HD 1", "HD 2"], Some("HD 1 AB")).unwrap();
        assert_eq!(first.id, second.id);

        let store = data.store();
        let mut members = store.members(first.id);
        members.sort();
        assert_eq!(members.len(), 2);
        assert_eq!(store.stars().len(), 2);
        for star in store.stars() {
            assert_eq!(store.systems_of(star.id), vec![first.id]);
        }
    }

    #[test]
    fn test_star_in_another_system_stays() {
        crate::unit_test_global::init_logger();
        let mut data = StellarData::new(MemoryStore::new());
        let ab = data.assign_star_system(&["A", "B"], None).unwrap();
        let cd = data.assign_star_system(&["C"], None).unwrap();
        let joined = data.assign_star_system(&["C", "B"], None).unwrap();
        assert_eq!(joined.id, cd.id);

        let b = data.find_star("B").unwrap().unwrap();
        assert_eq!(data.store().systems_of(b.id), vec![ab.id]);
    }

    #[test]
    fn test_configuration_get_or_create() {
        let mut data = StellarData::new(MemoryStore::new());
        let wide = data.assign_star_system(&["A"], None).unwrap();
        let close = data.assign_star_system(&["B"], None).unwrap();
        let c1 = data.add_configuration(wide.id, close.id, Some("AB")).unwrap();
        let c2 = data.add_configuration(wide.id, close.id, Some("AB")).unwrap();
        assert_eq!(c1, c2);
        assert_eq!(
            data.add_configuration(wide.id, SystemId(99), None),
            Err(StellarError::NotFound("SystemId#99".into()))
        );
    }

    #[test]
    fn test_cluster_attachment() {
        let mut data = StellarData::new(MemoryStore::new());
        data.get_or_create_star("HII 1136").unwrap();
        let star = data
            .attach_to_cluster("HII 1136", "Pleiades", Some("2018A&A...616A..10G"))
            .unwrap();
        let again = data.get_or_create_cluster("Pleiades", None).unwrap();
        assert_eq!(star.cluster, Some(again.id));
        assert_eq!(data.store().clusters_by_name("Pleiades").len(), 1);
        assert!(data.store().references_by_bibcode("Unknown").is_empty());
    }
}
