//! # Reconciliation settings
//!
//! [`ReconcileConfig`] gathers the knobs of a reconciliation run. Every field has a
//! default (see [`crate::constants`]), so a driver only overrides what it needs.
use serde::Deserialize;

use crate::{
    constants::{
        ArcSec, DEFAULT_CROSSMATCH_TOLERANCE, DEFAULT_LOGG_ERROR, DEFAULT_MAGNITUDE_ERROR,
        DEFAULT_MASS_ERROR, DEFAULT_METALLICITY_ERROR, DEFAULT_PARALLAX_ERROR,
        DEFAULT_RADIUS_ERROR, DEFAULT_TEMPERATURE_ERROR, DEFAULT_VSINI_ERROR,
        DEFAULT_VSYS_ERROR, UNKNOWN_BIBCODE,
    },
    models::StarField,
};

/// What to do when enrichment meets a field that already holds a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverwritePolicy {
    /// Fill missing fields only
    #[default]
    KeepExisting,
    Replace,
}

/// Uncertainty substituted for a measurement whose source reports none.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultErrors {
    pub temperature: f64,
    pub logg: f64,
    pub metallicity: f64,
    pub mass: f64,
    pub radius: f64,
    pub vsini: f64,
    pub vsys: f64,
    pub parallax: f64,
    pub magnitude: f64,
}

impl Default for DefaultErrors {
    fn default() -> Self {
        DefaultErrors {
            temperature: DEFAULT_TEMPERATURE_ERROR,
            logg: DEFAULT_LOGG_ERROR,
            metallicity: DEFAULT_METALLICITY_ERROR,
            mass: DEFAULT_MASS_ERROR,
            radius: DEFAULT_RADIUS_ERROR,
            vsini: DEFAULT_VSINI_ERROR,
            vsys: DEFAULT_VSYS_ERROR,
            parallax: DEFAULT_PARALLAX_ERROR,
            magnitude: DEFAULT_MAGNITUDE_ERROR,
        }
    }
}

impl DefaultErrors {
    /// Default error for a numeric field; `None` for the spectral type.
    pub fn for_field(&self, field: StarField) -> Option<f64> {
        match field {
            StarField::Temperature => Some(self.temperature),
            StarField::Logg => Some(self.logg),
            StarField::Metallicity => Some(self.metallicity),
            StarField::Mass => Some(self.mass),
            StarField::Radius => Some(self.radius),
            StarField::SpectralType => None,
            StarField::Vsini => Some(self.vsini),
            StarField::Vsys => Some(self.vsys),
            StarField::Parallax => Some(self.parallax),
            StarField::Vmag | StarField::Kmag => Some(self.magnitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub default_errors: DefaultErrors,
    pub overwrite: OverwritePolicy,
    /// Half-width of the positional cross-match box
    pub crossmatch_tolerance_arcsec: ArcSec,
    /// Bibcode substituted when a source gives none
    pub unknown_bibcode: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        ReconcileConfig {
            default_errors: DefaultErrors::default(),
            overwrite: OverwritePolicy::default(),
            crossmatch_tolerance_arcsec: DEFAULT_CROSSMATCH_TOLERANCE,
            unknown_bibcode: UNKNOWN_BIBCODE.to_string(),
        }
    }
}

#[cfg(test)]
mod config_test {
    use super::*;
    use serde::de::{
        value::{Error as ValueError, StrDeserializer},
        IntoDeserializer,
    };

    #[test]
    fn test_defaults() {
        let config = ReconcileConfig::default();
        assert_eq!(config.overwrite, OverwritePolicy::KeepExisting);
        assert_eq!(config.crossmatch_tolerance_arcsec, 3.0);
        assert_eq!(config.unknown_bibcode, "Unknown");
        assert_eq!(config.default_errors.for_field(StarField::Temperature), Some(200.0));
        assert_eq!(config.default_errors.for_field(StarField::Metallicity), Some(0.5));
        assert_eq!(config.default_errors.for_field(StarField::Kmag), Some(0.1));
        assert_eq!(config.default_errors.for_field(StarField::SpectralType), None);
    }

    #[test]
    fn test_policy_from_str() {
        let replace: StrDeserializer<ValueError> = "replace".into_deserializer();
        assert_eq!(
            OverwritePolicy::deserialize(replace).unwrap(),
            OverwritePolicy::Replace
        );
        let bogus: StrDeserializer<ValueError> = "sometimes".into_deserializer();
        assert!(OverwritePolicy::deserialize(bogus).is_err());
    }
}
