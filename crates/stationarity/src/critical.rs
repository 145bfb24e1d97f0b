//! Asymptotic critical values (MacKinnon 1994 for ADF, KPSS 1992 table 1).

use crate::result::{AdfRegression, KpssTrend};
use core_types::{CriticalValues, SignificanceLevel};

fn table(one: f64, five: f64, ten: f64) -> CriticalValues {
    CriticalValues::from([
        (SignificanceLevel::OnePercent, one),
        (SignificanceLevel::FivePercent, five),
        (SignificanceLevel::TenPercent, ten),
    ])
}

pub fn adf(regression: AdfRegression) -> CriticalValues {
    match regression {
        AdfRegression::None => table(-2.58, -1.95, -1.62),
        AdfRegression::Constant => table(-3.43, -2.86, -2.57),
        AdfRegression::ConstantTrend => table(-3.96, -3.41, -3.13),
    }
}

pub fn kpss(trend: KpssTrend) -> CriticalValues {
    match trend {
        KpssTrend::Level => table(0.739, 0.463, 0.347),
        KpssTrend::ConstantTrend => table(0.216, 0.146, 0.119),
    }
}

