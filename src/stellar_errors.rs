use thiserror::Error;

/// Parsing failures of the compact multiplicity configuration code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseCodeError {
    #[error("Unbalanced parenthesis at byte {0}")]
    UnbalancedParenthesis(usize),

    #[error("Empty component in configuration: {0}")]
    EmptyComponent(String),

    #[error("Unrecognized orbit token: {0}")]
    InvalidOrbitToken(String),
}

#[derive(Error, Debug)]
pub enum StellarError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("{count} entities share the unique key {key}")]
    DuplicateEntity { key: String, count: usize },

    #[error("Malformed external text: {0}")]
    FormatError(String),

    #[error("Invalid configuration code: {0}")]
    ConfigurationCode(#[from] ParseCodeError),

    #[error("Upstream data source unavailable for {0}")]
    UpstreamUnavailable(String),

    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("Combination undefined: all measurement weights are zero")]
    UndefinedCombination,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl StellarError {
    /// True for errors that only make the current field or sub-configuration absent.
    pub fn is_recoverable_format(&self) -> bool {
        matches!(
            self,
            StellarError::FormatError(_) | StellarError::ConfigurationCode(_)
        )
    }
}

impl PartialEq for StellarError {
    fn eq(&self, other: &Self) -> bool {
        use StellarError::*;
        match (self, other) {
            (NotFound(a), NotFound(b)) => a == b,
            (
                DuplicateEntity { key: ka, count: ca },
                DuplicateEntity { key: kb, count: cb },
            ) => ka == kb && ca == cb,
            (FormatError(a), FormatError(b)) => a == b,
            (ConfigurationCode(a), ConfigurationCode(b)) => a == b,
            (UpstreamUnavailable(a), UpstreamUnavailable(b)) => a == b,
            (PreconditionViolation(a), PreconditionViolation(b)) => a == b,
            (UndefinedCombination, UndefinedCombination) => true,

            // not comparable: same variant is enough
            (Csv(_), Csv(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
