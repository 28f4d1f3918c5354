//! # Unit and format normalization
//!
//! Pure, stateless helpers applied to every scalar pulled out of an external record
//! before it reaches the stored schema:
//!
//! - [`parse_sexagesimal`] – `"HH MM SS.s"` / `"±DD MM SS.s"` → decimal value,
//! - [`redshift_velocity_to_kms`] – velocity normalization gated on the source velocity type,
//! - [`coerce_nullable`], [`coerce_f64`], [`coerce_text`] – masked/blank cells → `None`.
//!
//! The sexagesimal parser keeps the unit of its leading field: a right ascension
//! string yields **decimal hours**, a declination string yields **decimal degrees**.
use log::debug;

use crate::{
    constants::{Degree, Hour, KmPerSec, DEG_PER_HOUR, VLIGHT},
    sources::RawValue,
    stellar_errors::StellarError,
};

/// Textual markers some sources emit in place of a proper mask.
const MASK_MARKERS: [&str; 4] = ["--", "nan", "null", "none"];

/// Convert a sexagesimal string into a decimal value.
///
/// Arguments
/// ---------------
/// * `text`: the sexagesimal string, e.g. `"05 14 32.27"` or `"-08 12 05.9"`
/// * `delimiter`: the field separator (repeated separators are collapsed)
///
/// Return
/// ----------
/// * The value `sign · (a + b/60 + c/3600)`, in the unit of the leading field.
///   One, two or three fields are accepted.
///
/// Errors
/// ----------
/// * [`StellarError::FormatError`] if a field is not a number, if there are more than
///   three fields, or if the minutes/seconds fall outside `[0, 60)`.
pub fn parse_sexagesimal(text: &str, delimiter: char) -> Result<f64, StellarError> {
    let malformed = || StellarError::FormatError(format!("invalid sexagesimal value '{text}'"));

    let parts: Vec<&str> = text
        .trim()
        .split(delimiter)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(malformed());
    }

    // the sign applies to the whole value, "-00 30 14" included
    let sign = if parts[0].starts_with('-') { -1.0 } else { 1.0 };
    let unsigned = parts[0].strip_prefix(['-', '+']).unwrap_or(parts[0]);
    if unsigned.starts_with(['-', '+']) {
        return Err(malformed());
    }
    let lead: f64 = unsigned.parse().map_err(|_| malformed())?;

    let mut value = lead;
    for (part, scale) in parts[1..].iter().zip([60.0, 3600.0]) {
        let sub: f64 = part.parse().map_err(|_| malformed())?;
        if !(0.0..60.0).contains(&sub) {
            return Err(malformed());
        }
        value += sub / scale;
    }

    if !value.is_finite() {
        return Err(malformed());
    }
    Ok(sign * value)
}

/// Right ascension in decimal hours to degrees.
pub fn ra_hours_to_degrees(ra: Hour) -> Degree {
    ra * DEG_PER_HOUR
}

/// Normalize a reported velocity to km/s.
///
/// When the source flags the velocity as redshift-domain (`"z"`) the value and its
/// error are divided by [`VLIGHT`]; any other flag, or no flag, leaves both untouched.
///
/// Arguments
/// -----------------
/// * `value`: the reported velocity
/// * `error`: its uncertainty, if any
/// * `velocity_type`: the source's velocity type flag (`"v"`, `"z"`, …)
///
/// Return
/// ----------
/// * `(value, error)` after the gated conversion.
pub fn redshift_velocity_to_kms(
    value: f64,
    error: Option<f64>,
    velocity_type: Option<&str>,
) -> (KmPerSec, Option<KmPerSec>) {
    match velocity_type.map(str::trim) {
        Some("z") => (value / VLIGHT, error.map(|e| e / VLIGHT)),
        _ => (value, error),
    }
}

/// Map masked or blank external cells to `None`.
///
/// Masked cells, empty or whitespace-only text, textual mask markers (`"--"`, `"nan"`…)
/// and non-finite numbers are all null. Anything else is returned as is.
pub fn coerce_nullable(value: &RawValue) -> Option<&RawValue> {
    match value {
        RawValue::Masked => None,
        RawValue::Number(x) if !x.is_finite() => None,
        RawValue::Number(_) => Some(value),
        RawValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() || MASK_MARKERS.iter().any(|m| s.eq_ignore_ascii_case(m)) {
                None
            } else {
                Some(value)
            }
        }
    }
}

/// Null-coerce a cell into a float. Unparseable text is treated as absent.
pub fn coerce_f64(value: &RawValue) -> Option<f64> {
    match coerce_nullable(value)? {
        RawValue::Number(x) => Some(*x),
        RawValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(x) if x.is_finite() => Some(x),
            _ => {
                debug!("Dropping non-numeric value '{s}'");
                None
            }
        },
        RawValue::Masked => None,
    }
}

/// Null-coerce a cell into trimmed text.
pub fn coerce_text(value: &RawValue) -> Option<String> {
    match coerce_nullable(value)? {
        RawValue::Text(s) => Some(s.trim().to_string()),
        RawValue::Number(x) => Some(x.to_string()),
        RawValue::Masked => None,
    }
}

#[cfg(test)]
mod conversion_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_ra_hours() {
        assert_relative_eq!(
            parse_sexagesimal("22 52 23.37", ' ').unwrap(),
            22.873158333333333,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            ra_hours_to_degrees(parse_sexagesimal("04 41 04.77", ' ').unwrap()),
            70.269875,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            parse_sexagesimal("06:50:13.370", ':').unwrap(),
            6.837047222222222,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_parse_dec_degrees() {
        assert_relative_eq!(
            parse_sexagesimal("-00 30 14.2", ' ').unwrap(),
            -0.5039444444444444,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            parse_sexagesimal("+13 55 42.7", ' ').unwrap(),
            13.928527777777777,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            parse_sexagesimal("-14  47", ' ').unwrap(),
            -14.783333333333333,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_sexagesimal("1 2 3.4.5", ' '),
            Err(StellarError::FormatError(_))
        ));
        assert!(parse_sexagesimal("1 2 3 4", ' ').is_err());
        assert!(parse_sexagesimal("", ' ').is_err());
        assert!(parse_sexagesimal("10 75 00", ' ').is_err());
        assert!(parse_sexagesimal("ab cd", ' ').is_err());
    }

    #[test]
    fn test_parse_single_sign_only() {
        assert!(parse_sexagesimal("+-5 00 00", ' ').is_err());
        assert!(parse_sexagesimal("--5 00 00", ' ').is_err());
        assert!(parse_sexagesimal("-+5", ' ').is_err());
        assert_eq!(parse_sexagesimal("+5 30", ' '), Ok(5.5));
        assert_eq!(parse_sexagesimal("-5 30", ' '), Ok(-5.5));
    }

    #[test]
    fn test_redshift_gate() {
        let (v, e) = redshift_velocity_to_kms(VLIGHT * 2.0, Some(VLIGHT), Some("z"));
        assert_relative_eq!(v, 2.0);
        assert_relative_eq!(e.unwrap(), 1.0);

        assert_eq!(
            redshift_velocity_to_kms(-12.3, Some(0.4), Some("v")),
            (-12.3, Some(0.4))
        );
        assert_eq!(redshift_velocity_to_kms(-12.3, None, None), (-12.3, None));
    }

    #[test]
    fn test_coerce_nullable() {
        assert_eq!(coerce_nullable(&RawValue::Masked), None);
        assert_eq!(coerce_nullable(&RawValue::Text("   ".into())), None);
        assert_eq!(coerce_nullable(&RawValue::Text("--".into())), None);
        assert_eq!(coerce_nullable(&RawValue::Number(f64::NAN)), None);
        assert_eq!(coerce_text(&RawValue::Text("".into())), None);
        assert_eq!(coerce_f64(&RawValue::Text(" 5.25 ".into())), Some(5.25));
        assert_eq!(coerce_f64(&RawValue::Text("A0V".into())), None);
        assert_eq!(coerce_text(&RawValue::Text(" A0V ".into())), Some("A0V".into()));
    }
}
