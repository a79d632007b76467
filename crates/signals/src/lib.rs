// In crates/signals/src/lib.rs

pub mod generator;
pub mod types;

pub use generator::{
    SignalGenerator, momentum, moving_average, normalize, percentage_returns, spread_risk,
    volatility,
};
pub use types::SignalSet;
