// In crates/core-types/src/lib.rs

pub mod error;
pub mod product;
pub mod provider;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use product::ProductConfig;
pub use provider::{CompetitorPriceProvider, NoCompetitors, SeriesProvider};
pub use types::{PriceObservation, PriceSeries};
