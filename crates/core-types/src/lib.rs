pub mod enums;
pub mod error;
pub mod returns;

// Re-export the core types to provide a clean public API.
pub use enums::SignificanceLevel;
pub use error::CoreError;
pub use returns::{
    AssetReturns, CriticalValues, log_returns, require_equal_len, require_min_len,
    validate_panel, window,
};
