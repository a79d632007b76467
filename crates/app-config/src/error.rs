// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error(transparent)]
    UnknownMarketCondition(#[from] strategies::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSetting { field: String, reason: String },

    #[error("Product '{product}' is missing required field `{field}`")]
    MissingField { product: String, field: &'static str },

    #[error(transparent)]
    Guardrail(#[from] risk::Error),

    #[error("The product catalog is empty")]
    EmptyCatalog,

    #[error("Product name '{0}' appears more than once")]
    DuplicateProduct(String),
}

impl Error {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidSetting {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<Error> for core_types::Error {
    fn from(err: Error) -> Self {
        core_types::Error::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
