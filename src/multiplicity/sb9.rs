use serde::Deserialize;

use super::{MultiplicityParser, MultiplicityRow, SkyPosition};
use crate::{
    constants::{Day, Degree, KmPerSec, Magnitude, SB9_BIBCODE},
    models::Star,
};

/// One orbit of the SB9 catalogue of spectroscopic binaries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sb9Row {
    pub ra: Degree,
    pub dec: Degree,
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
    pub bibcode: Option<String>,
}

impl SkyPosition for Sb9Row {
    fn ra_deg(&self) -> Degree {
        self.ra
    }

    fn dec_deg(&self) -> Degree {
        self.dec
    }
}

/// Direct column projection; spectroscopic pairs are unresolved, so the separation is 0.
/// Orbits without their own reference are credited to the catalogue itself.
pub struct Sb9Parser;

impl MultiplicityParser for Sb9Parser {
    type Row = Sb9Row;
    const CATALOG: &'static str = "SB9";

    fn parse(candidates: &[Sb9Row], star: &Star) -> Vec<MultiplicityRow> {
        candidates
            .iter()
            .map(|row| MultiplicityRow {
                sp1: row.sp1.clone(),
                sp2: row.sp2.clone(),
                per: row.per,
                e_per: row.e_per,
                k1: row.k1,
                e_k1: row.e_k1,
                k2: row.k2,
                e_k2: row.e_k2,
                mag1: row.mag1,
                mag2: row.mag2,
                separation: Some(0.0),
                orbit_bibcode: Some(
                    row.bibcode
                        .clone()
                        .unwrap_or_else(|| SB9_BIBCODE.to_string()),
                ),
                ..MultiplicityRow::for_star(star)
            })
            .collect()
    }
}
