use serde::{Deserialize, Serialize};
use std::fmt;

/// The significance levels at which critical values are tabulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignificanceLevel {
    #[serde(rename = "1%")]
    OnePercent,
    #[serde(rename = "5%")]
    FivePercent,
    #[serde(rename = "10%")]
    TenPercent,
}

impl SignificanceLevel {
    pub const ALL: [SignificanceLevel; 3] = [
        SignificanceLevel::OnePercent,
        SignificanceLevel::FivePercent,
        SignificanceLevel::TenPercent,
    ];

    /// Returns the level as a probability (e.g. 0.05).
    pub fn alpha(&self) -> f64 {
        match self {
            SignificanceLevel::OnePercent => 0.01,
            SignificanceLevel::FivePercent => 0.05,
            SignificanceLevel::TenPercent => 0.10,
        }
    }
}

impl fmt::Display for SignificanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignificanceLevel::OnePercent => write!(f, "1%"),
            SignificanceLevel::FivePercent => write!(f, "5%"),
            SignificanceLevel::TenPercent => write!(f, "10%"),
        }
    }
}
