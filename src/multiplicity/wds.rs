use serde::Deserialize;

use super::{MultiplicityParser, MultiplicityRow, SkyPosition};
use crate::{
    constants::{ArcSec, Degree, Magnitude},
    models::Star,
};

/// One pair of the Washington Double Star catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WdsRow {
    pub ra: Degree,
    pub dec: Degree,
    pub sp: Option<String>,
    pub mag1: Option<Magnitude>,
    pub mag2: Option<Magnitude>,
    /// Last measured separation
    pub sep: Option<ArcSec>,
    pub bibcode: Option<String>,
}

impl SkyPosition for WdsRow {
    fn ra_deg(&self) -> Degree {
        self.ra
    }

    fn dec_deg(&self) -> Degree {
        self.dec
    }
}

/// Visual doubles: separation, magnitudes and reference; no orbital period.
pub struct WdsParser;

impl MultiplicityParser for WdsParser {
    type Row = WdsRow;
    const CATALOG: &'static str = "WDS";

    fn parse(candidates: &[WdsRow], star: &Star) -> Vec<MultiplicityRow> {
        candidates
            .iter()
            .map(|row| MultiplicityRow {
                sp1: row.sp.clone(),
                mag1: row.mag1,
                mag2: row.mag2,
                separation: row.sep,
                sep_bibcode: row.bibcode.clone(),
                ..MultiplicityRow::for_star(star)
            })
            .collect()
    }
}
