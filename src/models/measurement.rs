use crate::constants::Bibcode;

/// One measured value as extracted from a source, before it is stored.
///
/// `error` is `None` when the source gave no uncertainty, `bibcode` is `None` when
/// the source gave no citation for this particular field.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<T = f64> {
    pub value: T,
    pub error: Option<f64>,
    pub bibcode: Option<Bibcode>,
}

impl<T> Measurement<T> {
    pub fn new(value: T, error: Option<f64>, bibcode: Option<Bibcode>) -> Self {
        Measurement {
            value,
            error,
            bibcode,
        }
    }
}
