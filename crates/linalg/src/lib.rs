//! # Meridian Linear Algebra Kernel
//!
//! Dense `f64` matrix and vector operations shared by every estimator in the
//! workspace.
//!
//! ## Architectural Principles
//!
//! - **Leaf Crate:** Depends on nothing else in the workspace.
//! - **Checked Operations:** Every operation validates shapes and reports
//!   singular or non-positive-definite operands through `LinalgError` instead
//!   of panicking.
//!
//! ## Public API
//!
//! - `matrix`: multiply, transpose, inverse, Cholesky, eigen, QR solve.
//! - `regression`: the `Design` builder and `RegressionFit` produced by OLS.
//! - `stats`: mean, variance, Pearson correlation.

pub mod error;
pub mod matrix;
pub mod regression;
pub mod stats;

pub use error::LinalgError;
pub use matrix::{
    Eigen, Matrix, Vector, cholesky, ensure_finite, generalized_symmetric_eigen, inverse,
    multiply, multiply_vector, qr_solve, residualize, symmetric_eigen, transpose,
};
pub use regression::{Design, RegressionFit};
