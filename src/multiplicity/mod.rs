//! # Multiplicity catalogs
//!
//! Four flat catalogs describe stellar multiplicity, each in its own format:
//!
//! | Catalog  | Kind                         | Parser                         |
//! |----------|------------------------------|--------------------------------|
//! | SB9      | spectroscopic orbits         | [`sb9::Sb9Parser`]             |
//! | WDS      | visual doubles               | [`wds::WdsParser`]             |
//! | VAST     | photometric pairs            | [`vast::VastParser`]           |
//! | ET2008   | free-text configuration code | [`et2008::Et2008Parser`]       |
//!
//! Every parser turns the rows matched around one star into [`MultiplicityRow`]s, the
//! shared intermediate schema. Fields a format does not carry stay `None`.
//!
//! All tables store positions in **degrees** (see [`SkyPosition`]). Tables can be
//! loaded from CSV dumps with [`tables::read_table`].
pub mod et2008;
pub mod sb9;
pub mod spectral;
pub mod tables;
pub mod vast;
pub mod wds;

use camino::Utf8Path;

use crate::{
    constants::{ArcSec, Day, Degree, KmPerSec, Magnitude},
    models::Star,
    stellar_errors::StellarError,
};

pub use et2008::{Et2008Parser, Et2008Row};
pub use sb9::{Sb9Parser, Sb9Row};
pub use vast::{VastParser, VastRow};
pub use wds::{WdsParser, WdsRow};

/// A catalog row locatable on the sky.
pub trait SkyPosition {
    fn ra_deg(&self) -> Degree;
    fn dec_deg(&self) -> Degree;
}

/// A parser for one multiplicity catalog format.
pub trait MultiplicityParser {
    type Row: SkyPosition + Clone + PartialEq;

    /// Catalog name, for logs
    const CATALOG: &'static str;

    /// Turn the candidate rows matched around `star` into shared-schema rows.
    fn parse(candidates: &[Self::Row], star: &Star) -> Vec<MultiplicityRow>;
}

/// Shared intermediate schema of every multiplicity parser.
///
/// `star` and `component` identify the row; everything else is optional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiplicityRow {
    /// Name of the stored star the row was matched against
    pub star: String,
    /// Sub-configuration label, when the catalog names one
    pub component: Option<String>,
    pub sp1: Option<String>,
    pub sp2: Option<String>,
    pub per: Option<Day>,
    pub e_per: Option<Day>,
    pub k1: Option<KmPerSec>,
    pub e_k1: Option<KmPerSec>,
    pub k2: Option<KmPerSec>,
    pub e_k2: Option<KmPerSec>,
    pub mag1: Option<Magnitude>,
    pub mag2: Option<Magnitude>,
    pub separation: Option<ArcSec>,
    pub eccentricity: Option<f64>,
    /// Age in Myr
    pub age: Option<f64>,
    pub age_ref: Option<String>,
    pub mass1: Option<f64>,
    pub mass2: Option<f64>,
    pub cluster: Option<String>,
    pub sep_bibcode: Option<String>,
    pub orbit_bibcode: Option<String>,
}

impl MultiplicityRow {
    /// A row carrying only its identity.
    pub fn for_star(star: &Star) -> Self {
        MultiplicityRow {
            star: star.name.clone(),
            ..Default::default()
        }
    }
}

/// The four multiplicity tables, already in memory.
#[derive(Debug, Clone, Default)]
pub struct MultiplicityCatalogs {
    pub sb9: Vec<Sb9Row>,
    pub wds: Vec<WdsRow>,
    pub vast: Vec<VastRow>,
    pub et2008: Vec<Et2008Row>,
}

impl MultiplicityCatalogs {
    /// Load the four tables from CSV dumps.
    ///
    /// See also
    /// ------------
    /// * [`tables::read_table`] – Header and null conventions of the dumps.
    pub fn from_csv_files(
        sb9: &Utf8Path,
        wds: &Utf8Path,
        vast: &Utf8Path,
        et2008: &Utf8Path,
    ) -> Result<Self, StellarError> {
        Ok(MultiplicityCatalogs {
            sb9: tables::read_table(sb9)?,
            wds: tables::read_table(wds)?,
            vast: tables::read_table(vast)?,
            et2008: tables::read_table(et2008)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.sb9.is_empty() && self.wds.is_empty() && self.vast.is_empty() && self.et2008.is_empty()
    }
}
