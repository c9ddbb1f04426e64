pub mod error;
pub mod risk;
pub mod types;

#[cfg(feature = "interventions")]
pub mod interventions;

#[cfg(feature = "portfolio")]
pub mod portfolio;

#[cfg(feature = "prediction")]
pub mod prediction;

pub use error::DelinquencyError;
pub use types::*;

/// Standard result type for the validated calculations in this crate.
pub type DelinquencyResult<T> = Result<T, DelinquencyError>;
