//! # Photometric pairs (VAST)
//!
//! VAST rows give the primary's spectral type and photometry, a magnitude difference
//! to the companion, its separation, and cluster/age information for the primary.
//! The companion's magnitude and spectral type are derived:
//!
//! 1. `V1` is the catalog V, or is synthesized from Tycho `BT`/`VT`
//!    ([`tycho_to_johnson_v`]).
//! 2. `V2 = V1 + ΔV`.
//! 3. The primary's spectral type gives `M1` ([`absolute_magnitude`]); the modulus
//!    `μ = M1 − V1` is applied to the companion, `M2 = V2 + μ`.
//! 4. `M2` is mapped back to a dwarf spectral type
//!    ([`spectral_type_from_absolute_magnitude`]).
use serde::Deserialize;

use super::{
    spectral::{absolute_magnitude, spectral_type_from_absolute_magnitude, tycho_to_johnson_v},
    MultiplicityParser, MultiplicityRow, SkyPosition,
};
use crate::{
    constants::{ArcSec, Degree, Magnitude},
    models::Star,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VastRow {
    pub ra: Degree,
    pub dec: Degree,
    pub sp1: Option<String>,
    /// Tycho BT
    pub bt: Option<Magnitude>,
    /// Tycho VT
    pub vt: Option<Magnitude>,
    pub vmag: Option<Magnitude>,
    /// Companion minus primary, V band
    pub delta_mag: Option<Magnitude>,
    pub sep: Option<ArcSec>,
    pub age: Option<f64>,
    pub age_ref: Option<String>,
    pub mass1: Option<f64>,
    pub cluster: Option<String>,
    pub bibcode: Option<String>,
}

impl SkyPosition for VastRow {
    fn ra_deg(&self) -> Degree {
        self.ra
    }

    fn dec_deg(&self) -> Degree {
        self.dec
    }
}

impl VastRow {
    /// Primary V magnitude, synthesized from Tycho photometry when missing.
    pub fn primary_vmag(&self) -> Option<Magnitude> {
        self.vmag.or_else(|| Some(tycho_to_johnson_v(self.bt?, self.vt?)))
    }
}

/// Companion `(V2, spectral type)` from the primary and the magnitude difference.
fn companion(
    sp1: &str,
    mag1: Magnitude,
    delta_mag: Magnitude,
) -> (Magnitude, Option<String>) {
    let mag2 = mag1 + delta_mag;
    let sp2 = absolute_magnitude(sp1).and_then(|abs1| {
        let modulus = abs1 - mag1;
        spectral_type_from_absolute_magnitude(mag2 + modulus)
    });
    (mag2, sp2)
}

pub struct VastParser;

impl MultiplicityParser for VastParser {
    type Row = VastRow;
    const CATALOG: &'static str = "VAST";

    fn parse(candidates: &[VastRow], star: &Star) -> Vec<MultiplicityRow> {
        candidates
            .iter()
            .map(|row| {
                let mag1 = row.primary_vmag();
                let (mag2, sp2) = match (row.sp1.as_deref(), mag1, row.delta_mag) {
                    (Some(sp1), Some(m1), Some(dm)) => {
                        let (m2, sp2) = companion(sp1, m1, dm);
                        (Some(m2), sp2)
                    }
                    (None, Some(m1), Some(dm)) => (Some(m1 + dm), None),
                    _ => (None, None),
                };
                MultiplicityRow {
                    sp1: row.sp1.clone(),
                    sp2,
                    mag1,
                    mag2,
                    separation: row.sep,
                    age: row.age,
                    age_ref: row.age_ref.clone(),
                    mass1: row.mass1,
                    cluster: row.cluster.clone(),
                    sep_bibcode: row.sep.and(row.bibcode.clone()),
                    ..MultiplicityRow::for_star(star)
                }
            })
            .collect()
    }
}
