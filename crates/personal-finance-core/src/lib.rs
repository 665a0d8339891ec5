pub mod display;
pub mod error;
pub mod input;
pub mod time_value;
pub mod types;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "lending")]
pub mod lending;

#[cfg(all(feature = "investment", feature = "lending"))]
pub mod request;

pub use error::FinanceError;
pub use types::*;

/// Standard result type for all personal-finance operations
pub type FinanceResult<T> = Result<T, FinanceError>;
