// In crates/core-types/src/error.rs

use thiserror::Error;

/// The error kinds shared by every stage of the pricing pipeline.
///
/// `Configuration` is fatal and surfaces before any product is priced.
/// The other two are attributable to a single product and never abort a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No usable price data for '{asset}': {reason}")]
    DataUnavailable { asset: String, reason: String },

    #[error("Unknown competitor '{name}': {reason}")]
    UnknownCompetitor { name: String, reason: String },
}

impl Error {
    pub fn data_unavailable(asset: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::DataUnavailable {
            asset: asset.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_competitor(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::UnknownCompetitor {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// A short, stable identifier for the error kind, used in flat output records.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "configuration_error",
            Error::DataUnavailable { .. } => "data_unavailable",
            Error::UnknownCompetitor { .. } => "unknown_competitor",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
