//! # Constants and type definitions for stellar-data
//!
//! This module centralizes the **physical constants**, **unit conversion factors**,
//! **default measurement uncertainties** and **common type aliases** used by the
//! reconciliation engine.
//!
//! ## Overview
//!
//! - Speed of light used by the radial-velocity normalizer
//! - Angular conversions (arcseconds ↔ degrees, hours ↔ degrees)
//! - Default uncertainties substituted for catalog rows that report none
//! - Sentinel bibcode used for unsourced measurements
//! - Bibcodes of the flat multiplicity catalogs themselves

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Arcseconds in one degree
pub const ARCSEC_PER_DEG: f64 = 3600.0;

/// Degrees of right ascension in one hour
pub const DEG_PER_HOUR: f64 = 15.0;

/// Days in a Julian year, used to convert orbital periods given in years
pub const DAYS_PER_YEAR: f64 = 365.25;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Right ascension in decimal hours
pub type Hour = f64;
/// Velocity in km/s
pub type KmPerSec = f64;
/// Time span in days
pub type Day = f64;
/// Magnitude (apparent or absolute)
pub type Magnitude = f64;
/// Bibliographic code of a publication
pub type Bibcode = String;

// -------------------------------------------------------------------------------------------------
// Provenance
// -------------------------------------------------------------------------------------------------

/// Bibcode of the sentinel reference backing unsourced data.
pub const UNKNOWN_BIBCODE: &str = "Unknown";

/// Eggleton & Tokovinin (2008), catalog of multiplicity among bright stellar systems.
pub const ET2008_BIBCODE: &str = "2008MNRAS.389..869E";

/// Pourbaix et al. (2004), SB9 catalogue of spectroscopic binary orbits.
pub const SB9_BIBCODE: &str = "2004A&A...424..727P";

// -------------------------------------------------------------------------------------------------
// Default uncertainties
// -------------------------------------------------------------------------------------------------

/// Effective temperature (K)
pub const DEFAULT_TEMPERATURE_ERROR: f64 = 200.0;
/// Surface gravity (dex)
pub const DEFAULT_LOGG_ERROR: f64 = 0.5;
/// Metallicity (dex)
pub const DEFAULT_METALLICITY_ERROR: f64 = 0.5;
/// Projected rotational velocity (km/s)
pub const DEFAULT_VSINI_ERROR: f64 = 10.0;
/// Systemic radial velocity (km/s)
pub const DEFAULT_VSYS_ERROR: f64 = 5.0;
/// Parallax (mas)
pub const DEFAULT_PARALLAX_ERROR: f64 = 1.0;
/// Photometry (mag)
pub const DEFAULT_MAGNITUDE_ERROR: f64 = 0.1;
/// Mass (solar masses)
pub const DEFAULT_MASS_ERROR: f64 = 0.1;
/// Radius (solar radii)
pub const DEFAULT_RADIUS_ERROR: f64 = 0.1;

/// Default half-width of the positional cross-match box.
pub const DEFAULT_CROSSMATCH_TOLERANCE: ArcSec = 3.0;
