use approx::assert_relative_eq;
use camino::Utf8Path;
use stellar_data::{
    models::Attribute,
    multiplicity::MultiplicityCatalogs,
    sources::{ExternalRecord, RawValue, StaticSource},
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// SIMBAD answers for θ¹ Ori C and HD 1. Anything else is unknown to the service.
pub fn simbad() -> StaticSource {
    StaticSource::new()
        .with(
            "HD 37022",
            vec![ExternalRecord::new()
                .with("MAIN_ID", "* tet01 Ori C")
                .with("RA", "05 35 16.46")
                .with("DEC", "-05 23 22.8")
                .with("FLUX_V", 5.13)
                .with("FLUX_ERROR_V", RawValue::Masked)
                .with("FLUX_BIBCODE_V", "2002yCat.2237....0D")
                .with("FLUX_K", 4.57)
                .with("FLUX_ERROR_K", 0.02)
                .with("FLUX_BIBCODE_K", "2003yCat.2246....0C")
                .with("PLX_VALUE", 2.47)
                .with("PLX_ERROR", 0.22)
                .with("PLX_BIBCODE", "2020yCat.1350....0G")
                .with("ROT_Vsini", 24.0)
                .with("ROT_err", "--")
                .with("ROT_bibcode", "2006A&A...448..351S")
                .with("SP_TYPE", "O7Vp")
                .with("SP_BIBCODE", "2006AJ....132.2410W")
                .with("RVZ_RADVEL", 23.7)
                .with("RVZ_ERROR", 1.0)
                .with("RVZ_TYPE", "v")
                .with("RVZ_BIBCODE", "")],
        )
        .with(
            "HD 1",
            vec![ExternalRecord::new()
                .with("MAIN_ID", "HD 1")
                .with("RA", "00 05 08.8")
                .with("DEC", "+67 50 24")
                .with("FLUX_V", 7.42)
                .with("FLUX_ERROR_V", 0.01)
                .with("FLUX_BIBCODE_V", "2002yCat.2237....0D")
                .with("SP_TYPE", "K0")
                .with("SP_BIBCODE", RawValue::Masked)],
        )
}

/// PASTEL rows: two papers for θ¹ Ori C, the second without an error on Teff.
pub fn pastel() -> StaticSource {
    StaticSource::new().with(
        "HD 37022",
        vec![
            ExternalRecord::new()
                .with("Teff", 39000.0)
                .with("e_Teff", 1000.0)
                .with("logg", 4.1)
                .with("e_logg", 0.1)
                .with("Fe_H", RawValue::Masked)
                .with("bibcode", "2006A&A...448..351S"),
            ExternalRecord::new()
                .with("Teff", 40000.0)
                .with("e_Teff", "")
                .with("logg", 4.0)
                .with("e_logg", 0.1)
                .with("bibcode", "2008A&A...488..297S"),
        ],
    )
}

pub fn catalogs() -> MultiplicityCatalogs {
    MultiplicityCatalogs::from_csv_files(
        Utf8Path::new("tests/data/sb9.csv"),
        Utf8Path::new("tests/data/wds.csv"),
        Utf8Path::new("tests/data/vast.csv"),
        Utf8Path::new("tests/data/et2008.csv"),
    )
    .expect("multiplicity test tables")
}

pub fn assert_attribute_close(attr: &Attribute<f64>, value: f64, error: Option<f64>, epsilon: f64) {
    assert_relative_eq!(attr.value.unwrap(), value, epsilon = epsilon);
    match (attr.error, error) {
        (Some(actual), Some(expected)) => assert_relative_eq!(actual, expected, epsilon = epsilon),
        (actual, expected) => assert_eq!(actual, expected),
    }
}
