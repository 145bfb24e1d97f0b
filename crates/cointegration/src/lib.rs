//! # Meridian Cointegration Tests
//!
//! - `engle_granger`: two-step residual-based test for a pair of series.
//! - `johansen`: maximum-likelihood trace / max-eigenvalue test for `k` series.
//!
//! Both produce a `CointegrationResult`, a tagged union over the two methods.

pub mod critical;
pub mod engle_granger;
pub mod error;
pub mod johansen;
pub mod result;

pub use engle_granger::engle_granger;
pub use error::CointegrationError;
pub use johansen::johansen;
pub use result::{CointegrationResult, EngleGrangerResult, JohansenResult};
