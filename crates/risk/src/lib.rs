//! # Meridian Risk Measures
//!
//! Tail-risk estimation and the covariance utilities shared with the
//! portfolio optimizer.
//!
//! ## Architectural Principles
//!
//! - **Explicit Seeds:** Every simulation builds its own `ChaCha8Rng` from a
//!   caller-supplied seed, so concurrent calls never share a generator and
//!   reruns are bit-identical.
//! - **Signed Returns:** VaR and CVaR are reported as portfolio returns, so a
//!   loss is negative and `cvar <= var` always holds.
//!
//! ## Public API
//!
//! - `historical_cvar`: bootstrap CVaR from historical observations.
//! - `monte_carlo_es`: Expected Shortfall from correlated Gaussian scenarios.
//! - `CovarianceMatrix`: validated, asset-keyed covariance.

pub mod covariance;
pub mod error;
pub mod historical;
pub mod measure;
pub mod monte_carlo;

pub use covariance::{CovarianceMatrix, mean_returns};
pub use error::RiskError;
pub use historical::historical_cvar;
pub use measure::{RiskMeasure, RiskMethod};
pub use monte_carlo::monte_carlo_es;
