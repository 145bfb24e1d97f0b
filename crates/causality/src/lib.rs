//! # Meridian Causality Analysis
//!
//! Directional relationships between two series.
//!
//! - `granger`: nested VAR F-test of whether one series' lags improve the
//!   forecast of another.
//! - `lead_lag`: cross-correlation scan over a symmetric lag window.

pub mod error;
pub mod granger;
pub mod lead_lag;
pub mod result;

pub use error::CausalityError;
pub use granger::{f_upper_tail, granger_causality};
pub use lead_lag::lead_lag;
pub use result::{CausalityResult, CrossCorrelation, Leader, LeadLagResult};
