// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unsupported market condition: '{0}'")]
    UnknownMarketCondition(String),
}

pub type Result<T> = std::result::Result<T, Error>;
