//! # Measurement combination
//!
//! Several sources often measure the same quantity for the same star. This module
//! reduces them to a single best estimate with inverse-variance weighting:
//!
//! ```text
//! w_i  = 1 / σ_i²
//! mean = Σ w_i·x_i / Σ w_i
//! σ    = sqrt(1 / Σ w_i)
//! ```
//!
//! A missing σ_i is replaced by a field-specific default before weighting, so that a
//! catalog silent about its uncertainty neither dominates the mean nor gets thrown away.
//! Rows citing the same bibcode are counted once.
use itertools::Itertools;
use log::debug;

use crate::{models::Measurement, stellar_errors::StellarError};

/// Uncertainty used for weighting: a missing or NaN error reads as `default_error`.
fn effective_error(error: Option<f64>, default_error: f64) -> f64 {
    match error {
        Some(e) if !e.is_nan() => e,
        _ => default_error,
    }
}

/// Inverse-variance weighted mean of `values`.
///
/// Arguments
/// -----------------
/// * `values`: the measurements
/// * `errors`: their uncertainties, aligned with `values`; `None`, NaN or a short slice
///   mean "unknown"
/// * `default_error`: substituted for every unknown uncertainty
///
/// Return
/// ----------
/// * `Ok(None)` for an empty input,
/// * `Ok(Some((mean, error)))` otherwise; a single measurement is returned as is
///   (with the default substituted for a missing error).
///
/// Errors
/// ----------
/// * [`StellarError::UndefinedCombination`] when the weights sum to zero (every error
///   infinite) or to a non-finite value (a zero error).
pub fn combine(
    values: &[f64],
    errors: &[Option<f64>],
    default_error: f64,
) -> Result<Option<(f64, f64)>, StellarError> {
    let effective = |i: usize| effective_error(errors.get(i).copied().flatten(), default_error);

    match values {
        [] => return Ok(None),
        [single] => return Ok(Some((*single, effective(0)))),
        _ => {}
    }

    let (weighted_sum, weight_sum) = values
        .iter()
        .enumerate()
        .map(|(i, x)| {
            let e = effective(i);
            let w = 1.0 / (e * e);
            (w * x, w)
        })
        .fold((0.0, 0.0), |(sx, sw), (wx, w)| (sx + wx, sw + w));

    if weight_sum == 0.0 || !weight_sum.is_finite() || !weighted_sum.is_finite() {
        return Err(StellarError::UndefinedCombination);
    }

    Ok(Some((weighted_sum / weight_sum, (1.0 / weight_sum).sqrt())))
}

/// Combine measurements of one quantity coming from possibly repeated sources.
///
/// Measurements citing the same bibcode are collapsed to the first of them before
/// weighting; measurements without a bibcode are all kept. The result carries the
/// bibcode of the most precise contributing measurement.
///
/// See also
/// ------------
/// * [`combine`] – The underlying weighting and its error cases.
pub fn combine_measurements(
    measurements: &[Measurement],
    default_error: f64,
) -> Result<Option<Measurement>, StellarError> {
    let unique: Vec<&Measurement> = measurements
        .iter()
        .enumerate()
        .unique_by(|(i, m)| m.bibcode.clone().ok_or(*i))
        .map(|(_, m)| m)
        .collect();

    if unique.len() < measurements.len() {
        debug!(
            "Dropped {} same-source duplicate measurement(s)",
            measurements.len() - unique.len()
        );
    }

    let values: Vec<f64> = unique.iter().map(|m| m.value).collect();
    let errors: Vec<Option<f64>> = unique.iter().map(|m| m.error).collect();

    let Some((mean, error)) = combine(&values, &errors, default_error)? else {
        return Ok(None);
    };

    let bibcode = unique
        .iter()
        .min_by(|a, b| {
            effective_error(a.error, default_error)
                .total_cmp(&effective_error(b.error, default_error))
        })
        .and_then(|m| m.bibcode.clone());

    Ok(Some(Measurement::new(mean, Some(error), bibcode)))
}
