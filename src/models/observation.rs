use super::{CcfId, InstrumentId, ObservationId, RefId, SpectrumId, StarId};

#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub id: InstrumentId,
    pub name: String,
    pub reference: Option<RefId>,
}

/// One spectroscopic visit of a star with an instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: ObservationId,
    pub star: StarId,
    pub instrument: InstrumentId,
    /// Modified Julian Date of the exposure
    pub mjd: Option<f64>,
    pub spectrum: Option<SpectrumId>,
    pub ccf: Option<CcfId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub id: SpectrumId,
    pub path: String,
}

/// Cross-correlation function product derived from a spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct Ccf {
    pub id: CcfId,
    pub path: String,
    pub rv: Option<f64>,
    pub rv_error: Option<f64>,
}
