//! # Meridian Autocorrelation Analysis
//!
//! Serial dependence diagnostics for a single series.
//!
//! ## Public API
//!
//! - `acf::analyze`: ACF, PACF (Durbin-Levinson) and the Ljung-Box statistic
//!   bundled in an `AutocorrelationResult`.
//! - `decomposition::decompose`: classical additive seasonal decomposition
//!   into trend, seasonal and residual parts.

pub mod acf;
pub mod decomposition;
pub mod error;

pub use acf::{AutocorrelationResult, acf, analyze, durbin_levinson, ljung_box};
pub use decomposition::{SeasonalDecomposition, decompose};
pub use error::AutocorrelationError;
