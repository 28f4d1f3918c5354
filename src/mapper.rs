//! # Catalog field mapping
//!
//! Per-source adapters projecting heterogeneous external rows onto the common
//! attribute triple `{value, uncertainty, bibcode}` of a [`Measurement`].
//!
//! ## Sources
//!
//! | Field          | SIMBAD columns                                   | PASTEL columns         |
//! |----------------|--------------------------------------------------|------------------------|
//! | `Vmag`         | `FLUX_V`, `FLUX_ERROR_V`, `FLUX_BIBCODE_V`       | –                      |
//! | `Kmag`         | `FLUX_K`, `FLUX_ERROR_K`, `FLUX_BIBCODE_K`       | –                      |
//! | `parallax`     | `PLX_VALUE`, `PLX_ERROR`, `PLX_BIBCODE`          | –                      |
//! | `vsini`        | `ROT_Vsini`, `ROT_err`, `ROT_bibcode`            | –                      |
//! | `spectral_type`| `SP_TYPE`, `SP_BIBCODE`                          | –                      |
//! | `vsys`         | `RVZ_RADVEL`, `RVZ_ERROR`, `RVZ_BIBCODE` (+ `RVZ_TYPE`) | –               |
//! | `temperature`  | –                                                | `Teff`, `e_Teff`       |
//! | `logg`         | –                                                | `logg`, `e_logg`       |
//! | `metallicity`  | –                                                | `Fe_H`, `e_Fe_H`       |
//!
//! PASTEL rows share a single `bibcode` column.
//!
//! ## Multiple rows
//!
//! A name-resolution query should answer with one row; if it answers with several a
//! warning is logged and the first one is used ([`MultiRowPolicy::First`]). A literature
//! compilation legitimately returns one row per paper, which are merged with the
//! inverse-variance combiner ([`MultiRowPolicy::Combine`]).
//!
//! Every cell goes through null coercion; an absent or masked column is an absent
//! measurement, never an error.
use log::warn;

use crate::{
    combine::combine_measurements,
    config::DefaultErrors,
    constants::{Degree, Hour, DEG_PER_HOUR},
    conversion::{parse_sexagesimal, redshift_velocity_to_kms},
    models::{Measurement, StarField},
    sources::{ExternalRecord, ExternalTable, RawValue},
    stellar_errors::StellarError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiRowPolicy {
    /// Warn and keep the first row
    First,
    /// Merge every row with the inverse-variance combiner
    Combine,
}

/// Columns holding one field in a given source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldColumns {
    pub value: &'static str,
    pub error: Option<&'static str>,
    pub bibcode: &'static str,
}

impl FieldColumns {
    const fn new(value: &'static str, error: Option<&'static str>, bibcode: &'static str) -> Self {
        FieldColumns {
            value,
            error,
            bibcode,
        }
    }
}

/// A source-specific projection of external rows onto star fields.
pub trait CatalogMapper {
    /// Source name, for logs
    const SOURCE: &'static str;
    const POLICY: MultiRowPolicy;

    /// Columns carrying `field`, or `None` if the source does not provide it.
    fn columns(field: StarField) -> Option<FieldColumns>;

    /// Unit normalization applied to a freshly extracted measurement.
    fn normalize(
        _field: StarField,
        _record: &ExternalRecord,
        measurement: Measurement,
    ) -> Measurement {
        measurement
    }
}

/// Name-resolution / astrometry service.
#[derive(Debug, Clone, Copy)]
pub struct SimbadMapper;

impl CatalogMapper for SimbadMapper {
    const SOURCE: &'static str = "SIMBAD";
    const POLICY: MultiRowPolicy = MultiRowPolicy::First;

    fn columns(field: StarField) -> Option<FieldColumns> {
        match field {
            StarField::Vmag => Some(FieldColumns::new(
                "FLUX_V",
                Some("FLUX_ERROR_V"),
                "FLUX_BIBCODE_V",
            )),
            StarField::Kmag => Some(FieldColumns::new(
                "FLUX_K",
                Some("FLUX_ERROR_K"),
                "FLUX_BIBCODE_K",
            )),
            StarField::Parallax => Some(FieldColumns::new(
                "PLX_VALUE",
                Some("PLX_ERROR"),
                "PLX_BIBCODE",
            )),
            StarField::Vsini => Some(FieldColumns::new("ROT_Vsini", Some("ROT_err"), "ROT_bibcode")),
            StarField::SpectralType => Some(FieldColumns::new("SP_TYPE", None, "SP_BIBCODE")),
            StarField::Vsys => Some(FieldColumns::new(
                "RVZ_RADVEL",
                Some("RVZ_ERROR"),
                "RVZ_BIBCODE",
            )),
            _ => None,
        }
    }

    fn normalize(field: StarField, record: &ExternalRecord, measurement: Measurement) -> Measurement {
        if field != StarField::Vsys {
            return measurement;
        }
        let velocity_type = record.text("RVZ_TYPE");
        let (value, error) =
            redshift_velocity_to_kms(measurement.value, measurement.error, velocity_type.as_deref());
        Measurement {
            value,
            error,
            ..measurement
        }
    }
}

/// Literature compilation of atmospheric parameters.
#[derive(Debug, Clone, Copy)]
pub struct PastelMapper;

impl CatalogMapper for PastelMapper {
    const SOURCE: &'static str = "PASTEL";
    const POLICY: MultiRowPolicy = MultiRowPolicy::Combine;

    fn columns(field: StarField) -> Option<FieldColumns> {
        match field {
            StarField::Temperature => Some(FieldColumns::new("Teff", Some("e_Teff"), "bibcode")),
            StarField::Logg => Some(FieldColumns::new("logg", Some("e_logg"), "bibcode")),
            StarField::Metallicity => Some(FieldColumns::new("Fe_H", Some("e_Fe_H"), "bibcode")),
            _ => None,
        }
    }
}

/// Extract one numeric field from one row.
pub fn extract_measurement<M: CatalogMapper>(
    record: &ExternalRecord,
    field: StarField,
) -> Option<Measurement> {
    let columns = M::columns(field)?;
    let value = record.f64(columns.value)?;
    let error = columns.error.and_then(|c| record.f64(c));
    let bibcode = record.text(columns.bibcode);
    Some(M::normalize(field, record, Measurement::new(value, error, bibcode)))
}

fn first_row<'a, M: CatalogMapper>(table: &'a ExternalTable) -> Option<&'a ExternalRecord> {
    if table.len() > 1 {
        warn!(
            "{} returned {} rows, using the first one",
            M::SOURCE,
            table.len()
        );
    }
    table.first()
}

/// Map a numeric field out of every row a source returned for one star.
///
/// Arguments
/// -----------------
/// * `table`: the rows returned by the source
/// * `field`: the star field of interest
/// * `defaults`: default uncertainties used when rows are combined
///
/// Return
/// ----------
/// * `Ok(None)` when the source does not carry the field or every row has it masked.
///
/// Errors
/// ----------
/// * [`StellarError::UndefinedCombination`] if combining rows is undefined.
pub fn map_field<M: CatalogMapper>(
    table: &ExternalTable,
    field: StarField,
    defaults: &DefaultErrors,
) -> Result<Option<Measurement>, StellarError> {
    let Some(default_error) = defaults.for_field(field) else {
        return Ok(None);
    };
    match M::POLICY {
        MultiRowPolicy::First => Ok(first_row::<M>(table)
            .and_then(|record| extract_measurement::<M>(record, field))),
        MultiRowPolicy::Combine => {
            let measurements: Vec<Measurement> = table
                .iter()
                .filter_map(|record| extract_measurement::<M>(record, field))
                .collect();
            combine_measurements(&measurements, default_error)
        }
    }
}

/// Map a textual field (the spectral type) from the first row.
pub fn map_text_field<M: CatalogMapper>(
    table: &ExternalTable,
    field: StarField,
) -> Option<Measurement<String>> {
    let columns = M::columns(field)?;
    let record = first_row::<M>(table)?;
    let value = record.text(columns.value)?;
    Some(Measurement::new(value, None, record.text(columns.bibcode)))
}

/// Identity and position of a star as resolved by the name-resolution service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimbadIdentity {
    pub main_id: Option<String>,
    pub ra: Option<Hour>,
    pub dec: Option<Degree>,
}

/// Read one SIMBAD coordinate cell.
///
/// A sexagesimal string keeps the unit of its leading field. A plain number, or a
/// text cell holding a single decimal field, is in degrees and divided by
/// `degree_scale`. The result must fall in `valid`.
fn parse_coordinate(
    cell: &RawValue,
    degree_scale: f64,
    valid: impl Fn(f64) -> bool,
) -> Result<Option<f64>, StellarError> {
    let value = match cell {
        RawValue::Number(x) if x.is_finite() => x / degree_scale,
        RawValue::Text(s) if !s.trim().is_empty() => match s.trim().parse::<f64>() {
            Ok(x) if x.is_finite() => x / degree_scale,
            _ => parse_sexagesimal(s, ' ')?,
        },
        _ => return Ok(None),
    };
    if !valid(value) {
        return Err(StellarError::FormatError(format!("coordinate {value} out of range")));
    }
    Ok(Some(value))
}

/// Read `MAIN_ID`, `RA` and `DEC` from the first SIMBAD row.
///
/// Sexagesimal `RA` strings give decimal hours; a decimal `RA`, numeric or text, is
/// taken to be in degrees and converted to hours. RA must lie in `[0, 24)` h and DEC in
/// `[-90, 90]`°. A malformed coordinate is logged and left absent.
pub fn map_identity(table: &ExternalTable) -> Option<SimbadIdentity> {
    let record = first_row::<SimbadMapper>(table)?;

    let coordinate = |column: &str, degree_scale: f64, valid: fn(f64) -> bool| {
        parse_coordinate(record.get(column), degree_scale, valid).unwrap_or_else(|e| {
            warn!("Ignoring {column}: {e}");
            None
        })
    };

    Some(SimbadIdentity {
        main_id: record.text("MAIN_ID"),
        ra: coordinate("RA", DEG_PER_HOUR, |h| (0.0..24.0).contains(&h)),
        dec: coordinate("DEC", 1.0, |d| (-90.0..=90.0).contains(&d)),
    })
}
