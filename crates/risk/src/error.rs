// In crates/risk/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid markup band for '{product}': min_markup {min} > max_markup {max}")]
    InvalidBand { product: String, min: f64, max: f64 },

    #[error("Invalid guardrail parameters for '{product}': {reason}")]
    InvalidParameters { product: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
