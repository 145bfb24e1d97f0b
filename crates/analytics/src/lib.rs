//! # Meridian Analytics Engine
//!
//! The facade that runs the econometric and portfolio-risk crates over a
//! multi-asset return panel and assembles serializable reports.
//!
//! ## Architectural Principles
//!
//! - **Thin Orchestration:** No statistics are computed here. Every number
//!   comes from the specialised crates; this crate windows the input, picks
//!   parameters from `AnalysisSettings`, and fans independent work out over
//!   `rayon`.
//! - **Caller-Owned Caching:** The analytic functions stay pure. Memoization
//!   lives in `ResultCache`, which the caller creates and passes in.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: per-analysis entry points and `full_report`.
//! - `ResultCache` / `CacheKey`: memoization keyed by operation and input hash.
//! - `report`: the serializable report structs.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod cache;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use cache::{CacheKey, ResultCache};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{
    AutocorrelationReport, FullReport, PairReport, RiskReport, StationarityReport,
};
