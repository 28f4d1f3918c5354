//! # Positional cross-matching
//!
//! Selects the rows of a multiplicity table lying around a stored star and hands them
//! to the catalog's parser.
//!
//! The selection is a box of half-width `tolerance` on each axis:
//!
//! ```text
//! (RA★·15 − RA_row)² < tol²   and   (DEC★ − DEC_row)² < tol²      (tol in degrees)
//! ```
//!
//! The stored RA is in hours, the tables are in degrees. No `cos δ` factor is
//! applied to the RA axis and the box does not wrap at RA = 0/360°, so the match
//! widens in true angle toward the poles.
use log::debug;

use crate::{
    constants::{ArcSec, ARCSEC_PER_DEG},
    conversion::ra_hours_to_degrees,
    models::Star,
    multiplicity::{
        Et2008Parser, MultiplicityCatalogs, MultiplicityParser, MultiplicityRow, Sb9Parser,
        SkyPosition, VastParser, WdsParser,
    },
    stellar_errors::StellarError,
};

/// Rows of `table` inside the tolerance box around `star`, without repeats.
///
/// Arguments
/// -----------------
/// * `star`: A stored star with both coordinates set.
/// * `table`: Any multiplicity table.
/// * `tolerance`: Half-width of the box, in arcseconds.
///
/// Return
/// ----------
/// * The matching rows in table order; identical rows are kept once.
/// * `StellarError::PreconditionViolation` if the star has no position.
pub fn find_candidates<R>(star: &Star, table: &[R], tolerance: ArcSec) -> Result<Vec<R>, StellarError>
where
    R: SkyPosition + Clone + PartialEq,
{
    let (Some(ra), Some(dec)) = (star.ra, star.dec) else {
        return Err(StellarError::PreconditionViolation(format!(
            "star {} has no position",
            star.name
        )));
    };
    let ra_deg = ra_hours_to_degrees(ra);
    let tol_deg = tolerance / ARCSEC_PER_DEG;
    let tol_sq = tol_deg * tol_deg;

    let mut candidates: Vec<R> = Vec::new();
    for row in table {
        let d_ra = ra_deg - row.ra_deg();
        let d_dec = dec - row.dec_deg();
        if d_ra * d_ra < tol_sq && d_dec * d_dec < tol_sq && !candidates.contains(row) {
            candidates.push(row.clone());
        }
    }
    Ok(candidates)
}

/// Cross-match one table and parse the candidates with its parser.
pub fn match_with<P: MultiplicityParser>(
    star: &Star,
    table: &[P::Row],
    tolerance: ArcSec,
) -> Result<Vec<MultiplicityRow>, StellarError> {
    let candidates = find_candidates(star, table, tolerance)?;
    debug!(
        "{}: {} candidate(s) around {}",
        P::CATALOG,
        candidates.len(),
        star.name
    );
    Ok(P::parse(&candidates, star))
}

/// Cross-match every multiplicity table around `star`.
///
/// Rows come back grouped by catalog, in the order SB9, WDS, VAST, ET2008.
pub fn cross_match(
    star: &Star,
    catalogs: &MultiplicityCatalogs,
    tolerance: ArcSec,
) -> Result<Vec<MultiplicityRow>, StellarError> {
    let mut rows = match_with::<Sb9Parser>(star, &catalogs.sb9, tolerance)?;
    rows.extend(match_with::<WdsParser>(star, &catalogs.wds, tolerance)?);
    rows.extend(match_with::<VastParser>(star, &catalogs.vast, tolerance)?);
    rows.extend(match_with::<Et2008Parser>(star, &catalogs.et2008, tolerance)?);
    Ok(rows)
}

#[cfg(test)]
mod crossmatch_test {
    use super::*;
    use crate::{
        models::StarId,
        multiplicity::{Et2008Row, WdsRow},
    };

    fn wds(ra: f64, dec: f64) -> WdsRow {
        WdsRow {
            ra,
            dec,
            sp: None,
            mag1: Some(7.0),
            mag2: Some(9.0),
            sep: Some(2.0),
            bibcode: None,
        }
    }

    fn star_at(ra_deg: f64, dec: f64) -> Star {
        let mut star = Star::new(StarId(1), "HIP 1");
        star.ra = Some(ra_deg / 15.0);
        star.dec = Some(dec);
        star
    }

    #[test]
    fn test_box_selection() {
        let star = star_at(10.0, 20.0);
        let table = [wds(10.5, 20.5), wds(12.0, 20.0)];
        let found = find_candidates(&star, &table, 3600.0).unwrap();
        assert_eq!(found, vec![wds(10.5, 20.5)]);
    }

    #[test]
    fn test_box_edges_are_exclusive() {
        let star = star_at(10.0, 20.0);
        let table = [wds(10.0, 21.0), wds(10.0, 19.5)];
        let found = find_candidates(&star, &table, 3600.0).unwrap();
        assert_eq!(found, vec![wds(10.0, 19.5)]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let star = star_at(10.0, 20.0);
        let table = [wds(10.0, 20.0), wds(10.0, 20.0)];
        assert_eq!(find_candidates(&star, &table, 3.0).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_position() {
        let star = Star::new(StarId(2), "nowhere");
        let err = find_candidates(&star, &[wds(0.0, 0.0)], 3.0).unwrap_err();
        assert!(matches!(err, StellarError::PreconditionViolation(_)));
    }

    #[test]
    fn test_cross_match_all_catalogs() {
        let star = star_at(83.8, -5.4);
        let catalogs = MultiplicityCatalogs {
            wds: vec![wds(83.8, -5.4), wds(100.0, -5.4)],
            et2008: vec![Et2008Row {
                ra: 83.8,
                dec: -5.4,
                config: "A(9B2+10.5V3;200d,e=0.3)".into(),
                bibcode: None,
            }],
            ..Default::default()
        };
        let rows = cross_match(&star, &catalogs, 3.0).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].separation, Some(2.0));
        assert_eq!(rows[1].component.as_deref(), Some("A"));
        assert!(rows.iter().all(|r| r.star == "HIP 1"));
    }
}
