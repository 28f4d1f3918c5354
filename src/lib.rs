pub mod combine;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod crossmatch;
pub mod mapper;
pub mod models;
pub mod multiplicity;
pub mod references;
pub mod sources;
pub mod stellar_data;
pub mod stellar_errors;
pub mod store;

pub use config::{OverwritePolicy, ReconcileConfig};
pub use stellar_data::{IngestReport, StellarData};
pub use stellar_errors::{ParseCodeError, StellarError};

#[cfg(test)]
pub(crate) mod unit_test_global {
    /// Route `log` output through the test harness; safe to call from every test.
    pub(crate) fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
}
