//! # Meridian Portfolio Optimizer
//!
//! Allocation rules over a validated `risk::CovarianceMatrix`.
//!
//! ## Architectural Principles
//!
//! - **Pure Allocation:** Every routine is a function of its inputs. Nothing
//!   is cached and no randomness is involved.
//! - **Best Effort Iteration:** Risk parity never fails on non-convergence;
//!   it reports a `converged` flag and the caller decides what to do.
//!
//! ## Public API
//!
//! - `black_litterman`: posterior returns and unconstrained weights from
//!   equilibrium returns blended with absolute views.
//! - `risk_parity`: equal-risk-contribution weights.
//! - `hierarchical_risk_parity`: clustered risk parity.

pub mod black_litterman;
pub mod error;
pub mod hrp;
pub mod risk_parity;
pub mod weights;

pub use black_litterman::{BlackLittermanOutput, BlackLittermanParams, View, black_litterman};
pub use error::OptimizerError;
pub use hrp::{HrpResult, hierarchical_risk_parity};
pub use risk_parity::{RiskParityResult, risk_parity};
pub use weights::PortfolioWeights;
