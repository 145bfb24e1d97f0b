//! Tabulated critical values.
//!
//! Johansen tables are Osterwald-Lenum (1992) for the model with an
//! unrestricted constant, indexed by `k - r` (the number of remaining
//! eigenvalues) and ordered as 10%, 5%, 1%.

use core_types::{CriticalValues, SignificanceLevel};

pub const MAX_JOHANSEN_ASSETS: usize = 12;

const TRACE: [[f64; 3]; MAX_JOHANSEN_ASSETS] = [
    [2.7055, 3.8415, 6.6349],
    [13.4294, 15.4943, 19.9349],
    [27.0669, 29.7961, 35.4628],
    [44.4929, 47.8545, 54.6815],
    [65.8202, 69.8189, 77.8202],
    [91.1090, 95.7542, 104.9637],
    [120.3673, 125.6185, 135.9825],
    [153.6341, 159.5290, 171.0905],
    [190.8714, 197.3772, 210.0366],
    [232.1030, 239.2468, 253.2526],
    [277.3740, 285.1402, 300.2821],
    [326.5354, 334.9795, 351.2150],
];

const MAX_EIGEN: [[f64; 3]; MAX_JOHANSEN_ASSETS] = [
    [2.7055, 3.8415, 6.6349],
    [12.2971, 14.2639, 18.5200],
    [18.8928, 21.1314, 25.8650],
    [25.1236, 27.5858, 32.7172],
    [31.2379, 33.8777, 39.3693],
    [37.2786, 40.0763, 45.8662],
    [43.2947, 46.2299, 52.3069],
    [49.2855, 52.3622, 58.6634],
    [55.2412, 58.4332, 64.9960],
    [61.2041, 64.5040, 71.2525],
    [67.1307, 70.5392, 77.4877],
    [73.0563, 76.5734, 83.7105],
];

fn row(values: [f64; 3]) -> CriticalValues {
    CriticalValues::from([
        (SignificanceLevel::TenPercent, values[0]),
        (SignificanceLevel::FivePercent, values[1]),
        (SignificanceLevel::OnePercent, values[2]),
    ])
}

/// Trace critical values for `remaining = k - r` eigenvalues (1-based).
pub fn johansen_trace(remaining: usize) -> CriticalValues {
    row(TRACE[remaining - 1])
}

/// Max-eigenvalue critical values for `remaining = k - r` eigenvalues.
pub fn johansen_max_eigen(remaining: usize) -> CriticalValues {
    row(MAX_EIGEN[remaining - 1])
}

/// Residual-based test with two variables and a constant (MacKinnon 1991).
///
/// Stricter than plain ADF because the residuals come from an estimated
/// relation.
pub fn engle_granger() -> CriticalValues {
    CriticalValues::from([
        (SignificanceLevel::OnePercent, -3.90),
        (SignificanceLevel::FivePercent, -3.34),
        (SignificanceLevel::TenPercent, -3.04),
    ])
}
