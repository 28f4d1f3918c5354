//! # Spectral type and photometric relations
//!
//! Main-sequence relation between spectral type and absolute V magnitude, with its
//! inverse, and the Tycho-to-Johnson V transform.
//!
//! Spectral types are mapped onto a numeric code so they can be interpolated:
//!
//! ```text
//! O → 0, B → 10, A → 20, F → 30, G → 40, K → 50, M → 60   (+ subtype)
//! "B2V" → 12.0,  "G2" → 42.0,  "K" → 50.0,  "A0.5" → 20.5
//! ```
//!
//! Luminosity classes and peculiarity suffixes are ignored.
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::Magnitude;

const CLASSES: [char; 7] = ['O', 'B', 'A', 'F', 'G', 'K', 'M'];

static SPECTRAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<class>[OBAFGKM])(?P<sub>\d+(?:\.\d+)?)?").expect("valid spectral type regex")
});

/// (numeric spectral code, M_V) along the dwarf sequence, M_V strictly increasing.
const MAIN_SEQUENCE: [(f64, Magnitude); 32] = [
    (9.0, -4.20),
    (10.0, -3.50),
    (11.0, -2.80),
    (12.0, -2.20),
    (13.0, -1.60),
    (15.0, -1.10),
    (16.0, -0.90),
    (17.0, -0.40),
    (18.0, -0.20),
    (19.0, 0.40),
    (20.0, 1.11),
    (21.0, 1.34),
    (22.0, 1.48),
    (23.0, 1.55),
    (25.0, 1.84),
    (27.0, 2.07),
    (30.0, 2.51),
    (32.0, 2.99),
    (35.0, 3.40),
    (38.0, 3.94),
    (40.0, 4.20),
    (42.0, 4.79),
    (45.0, 4.98),
    (48.0, 5.37),
    (50.0, 5.90),
    (52.0, 6.26),
    (55.0, 7.29),
    (57.0, 7.88),
    (60.0, 8.91),
    (62.0, 9.99),
    (64.0, 12.20),
    (65.0, 13.62),
];

/// Numeric code of a spectral type, `None` if it does not start with a known class.
pub fn spectral_code(spectral_type: &str) -> Option<f64> {
    let caps = SPECTRAL_RE.captures(spectral_type)?;
    let class = caps.name("class")?.as_str().chars().next()?;
    let index = CLASSES.iter().position(|c| *c == class)?;
    let sub = match caps.name("sub") {
        Some(m) => m.as_str().parse::<f64>().ok()?,
        None => 0.0,
    };
    Some(10.0 * index as f64 + sub)
}

/// Dwarf spectral type (`"K3V"`) of a numeric code, rounded to the nearest subtype.
pub fn spectral_type_from_code(code: f64) -> Option<String> {
    if !code.is_finite() || code < 0.0 {
        return None;
    }
    let rounded = code.round() as usize;
    let class = CLASSES.get(rounded / 10)?;
    Some(format!("{class}{}V", rounded % 10))
}

fn interpolate(x: f64, pairs: &[(f64, f64)]) -> Option<f64> {
    let (first, last) = (pairs.first()?, pairs.last()?);
    if x < first.0 || x > last.0 {
        return None;
    }
    pairs.windows(2).find_map(|w| {
        let ((x0, y0), (x1, y1)) = (w[0], w[1]);
        (x0..=x1)
            .contains(&x)
            .then(|| y0 + (y1 - y0) * (x - x0) / (x1 - x0))
    })
}

/// Absolute V magnitude of a dwarf of the given spectral type.
///
/// Return
/// ----------
/// * `None` if the spectral type is unparseable or outside the tabulated O9–M5 range.
pub fn absolute_magnitude(spectral_type: &str) -> Option<Magnitude> {
    let code = spectral_code(spectral_type)?;
    interpolate(code, &MAIN_SEQUENCE)
}

/// Dwarf spectral type whose absolute V magnitude is `abs_mag`.
pub fn spectral_type_from_absolute_magnitude(abs_mag: Magnitude) -> Option<String> {
    let inverse: Vec<(f64, f64)> = MAIN_SEQUENCE.iter().map(|(c, m)| (*m, *c)).collect();
    let code = interpolate(abs_mag, &inverse)?;
    spectral_type_from_code(code)
}

/// Johnson V from Tycho BT and VT magnitudes.
///
/// `V = VT + 0.00097 − 0.1334·x + 0.05486·x² − 0.01998·x³` with `x = BT − VT`.
pub fn tycho_to_johnson_v(bt: Magnitude, vt: Magnitude) -> Magnitude {
    let x = bt - vt;
    vt + 0.00097 - 0.1334 * x + 0.05486 * x.powi(2) - 0.01998 * x.powi(3)
}

#[cfg(test)]
mod spectral_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spectral_code() {
        assert_eq!(spectral_code("B2V"), Some(12.0));
        assert_eq!(spectral_code("G2"), Some(42.0));
        assert_eq!(spectral_code("K"), Some(50.0));
        assert_eq!(spectral_code("A0.5IV"), Some(20.5));
        assert_eq!(spectral_code("DA2"), None);
        assert_eq!(spectral_code(""), None);
    }

    #[test]
    fn test_code_to_type() {
        assert_eq!(spectral_type_from_code(52.6).as_deref(), Some("K3V"));
        assert_eq!(spectral_type_from_code(20.0).as_deref(), Some("A0V"));
        assert_eq!(spectral_type_from_code(80.0), None);
    }

    #[test]
    fn test_absolute_magnitude() {
        assert_relative_eq!(absolute_magnitude("A0V").unwrap(), 1.11, epsilon = 1e-12);
        // halfway between G0 (4.20) and G2 (4.79)
        assert_relative_eq!(absolute_magnitude("G1V").unwrap(), 4.495, epsilon = 1e-12);
        assert_eq!(absolute_magnitude("O5V"), None);
        assert_eq!(absolute_magnitude("M9V"), None);
    }

    #[test]
    fn test_inverse_relation() {
        assert_eq!(spectral_type_from_absolute_magnitude(5.90).as_deref(), Some("K0V"));
        assert_eq!(spectral_type_from_absolute_magnitude(4.495).as_deref(), Some("G1V"));
        assert_eq!(spectral_type_from_absolute_magnitude(20.0), None);
    }

    #[test]
    fn test_tycho_transform() {
        assert_relative_eq!(tycho_to_johnson_v(8.0, 8.0), 8.00097, epsilon = 1e-12);
        // x = 0.5: 7.5 + 0.00097 - 0.0667 + 0.013715 - 0.0024975
        assert_relative_eq!(tycho_to_johnson_v(8.0, 7.5), 7.4454875, epsilon = 1e-9);
    }
}
