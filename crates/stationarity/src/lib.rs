//! # Meridian Stationarity Tests
//!
//! Unit-root and stationarity tests on a single series.
//!
//! - `adf`: Augmented Dickey-Fuller (null: unit root).
//! - `kpss`: Kwiatkowski-Phillips-Schmidt-Shin (null: stationarity).
//!
//! Both return a `StationarityResult` whose verdict is taken at the 5% level
//! against tabulated asymptotic critical values.

pub mod adf;
pub mod critical;
pub mod error;
pub mod kpss;
pub mod result;

pub use adf::{AdfStatistic, LEVEL_TERM, adf, adf_statistic, adf_with};
pub use error::StationarityError;
pub use kpss::kpss;
pub use result::{AdfRegression, KpssTrend, StationarityResult, TestKind};

/// Both tests refuse series shorter than this.
pub const MIN_OBSERVATIONS: usize = 10;
