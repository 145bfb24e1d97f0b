use crate::cache::{CacheKey, ResultCache};
use crate::error::AnalyticsError;
use crate::report::{
    AutocorrelationReport, FullReport, PairReport, RiskReport, StationarityReport,
};
use autocorrelation::{analyze, decompose};
use causality::{granger_causality, lead_lag};
use cointegration::critical::MAX_JOHANSEN_ASSETS;
use cointegration::{JohansenResult, engle_granger, johansen};
use configuration::AnalysisSettings;
use core_types::{AssetReturns, validate_panel, window};
use itertools::Itertools;
use optimizer::{
    BlackLittermanOutput, BlackLittermanParams, HrpResult, PortfolioWeights, RiskParityResult,
    View, black_litterman, hierarchical_risk_parity, risk_parity,
};
use rayon::prelude::*;
use risk::{CovarianceMatrix, historical_cvar, monte_carlo_es};
use stationarity::{KpssTrend, adf, kpss};

/// Monte Carlo ES needs enough history for a stable covariance.
const MIN_MONTE_CARLO_OBSERVATIONS: usize = 30;

/// Runs every analysis over a return panel with one set of parameters.
///
/// Each entry point first keeps only the trailing `lookback_days`
/// observations of every series, so the same engine gives the same answer
/// whether it is handed the full history or an already windowed one.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    settings: AnalysisSettings,
}

impl AnalyticsEngine {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// ADF (constant and trend) and KPSS (level) on every asset.
    pub fn stationarity(
        &self,
        returns: &AssetReturns,
    ) -> Result<Vec<StationarityReport>, AnalyticsError> {
        let panel = self.prepare(returns)?;
        let max_lag = self.settings.max_lags;
        let assets: Vec<(&String, &Vec<f64>)> = panel.iter().collect();

        assets
            .par_iter()
            .map(|&(asset, series)| {
                let report = adf(series, max_lag).and_then(|adf| {
                    Ok(StationarityReport {
                        asset: asset.clone(),
                        adf,
                        kpss: kpss(series, KpssTrend::Level)?,
                    })
                });
                report.map_err(|e| AnalyticsError::from(e).context(asset.as_str()))
            })
            .collect()
    }

    /// Every unordered pair of assets, in alphabetical order.
    pub fn scan_pairs(&self, returns: &AssetReturns) -> Result<Vec<PairReport>, AnalyticsError> {
        self.scan_pairs_with(returns, || {})
    }

    /// Like [`scan_pairs`](Self::scan_pairs), calling `on_done` once per
    /// finished pair from whichever worker thread finished it.
    pub fn scan_pairs_with<F>(
        &self,
        returns: &AssetReturns,
        on_done: F,
    ) -> Result<Vec<PairReport>, AnalyticsError>
    where
        F: Fn() + Sync,
    {
        let panel = self.prepare(returns)?;
        validate_panel("pair scan", &panel, 2, 1)?;
        let pairs: Vec<_> = panel.iter().tuple_combinations().collect();
        tracing::debug!(pairs = pairs.len(), "scanning asset pairs");

        pairs
            .par_iter()
            .map(|&((first, x), (second, y))| {
                let report = self
                    .pair(first, x, second, y)
                    .map_err(|e| e.context(format!("{first}/{second}")));
                on_done();
                report
            })
            .collect()
    }

    fn pair(
        &self,
        first: &str,
        x: &[f64],
        second: &str,
        y: &[f64],
    ) -> Result<PairReport, AnalyticsError> {
        let s = &self.settings;
        Ok(PairReport {
            first: first.to_string(),
            second: second.to_string(),
            engle_granger: engle_granger(&levels(x), &levels(y), s.max_lags)?,
            granger_first_to_second: granger_causality(x, y, s.lag_order, s.significance)?,
            granger_second_to_first: granger_causality(y, x, s.lag_order, s.significance)?,
            lead_lag: lead_lag(x, y, s.max_lags)?,
        })
    }

    /// Johansen trace test on the log-price levels of all assets.
    pub fn johansen(&self, returns: &AssetReturns) -> Result<JohansenResult, AnalyticsError> {
        let panel = self.prepare(returns)?;
        let series: Vec<Vec<f64>> = panel.values().map(|r| levels(r)).collect();
        Ok(johansen(series.as_slice(), self.settings.lag_order)?)
    }

    /// ACF, PACF and Ljung-Box per asset, plus a seasonal decomposition when
    /// `period` is given and the series spans at least two full periods.
    pub fn autocorrelation(
        &self,
        returns: &AssetReturns,
        period: Option<usize>,
    ) -> Result<Vec<AutocorrelationReport>, AnalyticsError> {
        let panel = self.prepare(returns)?;
        let max_lags = self.settings.max_lags;

        panel
            .iter()
            .map(|(asset, series)| {
                let report = analyze(series, max_lags).and_then(|autocorrelation| {
                    let decomposition = period
                        .filter(|&p| series.len() >= 2 * p)
                        .map(|p| decompose(series, p))
                        .transpose()?;
                    Ok(AutocorrelationReport {
                        asset: asset.clone(),
                        autocorrelation,
                        decomposition,
                    })
                });
                report.map_err(|e| AnalyticsError::from(e).context(asset.as_str()))
            })
            .collect()
    }

    /// Historical CVaR, the sample covariance and, with at least two assets
    /// and thirty observations, Monte Carlo expected shortfall.
    pub fn risk(&self, returns: &AssetReturns) -> Result<RiskReport, AnalyticsError> {
        let panel = self.prepare(returns)?;
        let s = &self.settings;
        let observations = validate_panel("risk report", &panel, 1, 1)?;

        let historical = historical_cvar(&panel, s.confidence_level, s.simulations, s.seed)?;
        let monte_carlo = if panel.len() >= 2 && observations >= MIN_MONTE_CARLO_OBSERVATIONS {
            Some(monte_carlo_es(&panel, s.confidence_level, s.simulations, s.seed)?)
        } else {
            tracing::debug!(
                assets = panel.len(),
                observations,
                "skipping Monte Carlo expected shortfall"
            );
            None
        };

        Ok(RiskReport {
            historical,
            monte_carlo,
            covariance: CovarianceMatrix::from_returns(&panel)?,
        })
    }

    pub fn risk_parity(&self, returns: &AssetReturns) -> Result<RiskParityResult, AnalyticsError> {
        let covariance = self.covariance(returns)?;
        let s = &self.settings;
        Ok(risk_parity(&covariance, s.tolerance, s.max_iterations)?)
    }

    pub fn hrp(&self, returns: &AssetReturns) -> Result<HrpResult, AnalyticsError> {
        let covariance = self.covariance(returns)?;
        let s = &self.settings;
        Ok(hierarchical_risk_parity(&covariance, s.tolerance, s.max_iterations)?)
    }

    /// Black-Litterman on the sample covariance. Without `market_weights` the
    /// market portfolio is taken to be equally weighted.
    pub fn black_litterman(
        &self,
        returns: &AssetReturns,
        market_weights: Option<&PortfolioWeights>,
        views: &[View],
    ) -> Result<BlackLittermanOutput, AnalyticsError> {
        let covariance = self.covariance(returns)?;
        let equal;
        let market_weights = match market_weights {
            Some(weights) => weights,
            None => {
                let share = 1.0 / covariance.len() as f64;
                equal = PortfolioWeights::from_assets(
                    covariance.assets(),
                    &vec![share; covariance.len()],
                );
                &equal
            }
        };
        let params = BlackLittermanParams {
            risk_aversion: self.settings.risk_aversion,
            tau: self.settings.tau,
        };
        Ok(black_litterman(&covariance, market_weights, views, params)?)
    }

    /// Runs every analysis the panel supports, memoizing each section in
    /// `cache`.
    ///
    /// Pair scans and HRP need two assets; Johansen needs between two and
    /// twelve. Sections that do not apply are left empty.
    pub fn full_report(
        &self,
        returns: &AssetReturns,
        period: Option<usize>,
        cache: &mut ResultCache,
    ) -> Result<FullReport, AnalyticsError> {
        let panel = self.prepare(returns)?;
        let observations = validate_panel("full report", &panel, 1, 1)?;
        let assets = panel.len();
        tracing::info!(assets, observations, "building full report");

        let key = |operation| CacheKey::new(operation, &panel, &self.settings);

        let stationarity =
            cache.get_or_try_insert_with(key("stationarity"), || self.stationarity(&panel))?;
        let pairs = if assets >= 2 {
            cache.get_or_try_insert_with(key("pairs"), || self.scan_pairs(&panel))?
        } else {
            Vec::new()
        };
        let johansen = if (2..=MAX_JOHANSEN_ASSETS).contains(&assets) {
            Some(cache.get_or_try_insert_with(key("johansen"), || self.johansen(&panel))?)
        } else {
            None
        };
        let autocorrelation = cache.get_or_try_insert_with(
            key("autocorrelation").with(&period),
            || self.autocorrelation(&panel, period),
        )?;
        let risk = cache.get_or_try_insert_with(key("risk"), || self.risk(&panel))?;
        let risk_parity =
            cache.get_or_try_insert_with(key("risk_parity"), || self.risk_parity(&panel))?;
        let hrp = if assets >= 2 {
            Some(cache.get_or_try_insert_with(key("hrp"), || self.hrp(&panel))?)
        } else {
            None
        };
        tracing::debug!(hits = cache.hits(), misses = cache.misses(), "report cache");

        Ok(FullReport {
            assets: panel.keys().cloned().collect(),
            observations,
            stationarity,
            pairs,
            johansen,
            autocorrelation,
            risk,
            risk_parity,
            hrp,
        })
    }

    fn covariance(&self, returns: &AssetReturns) -> Result<CovarianceMatrix, AnalyticsError> {
        let panel = self.prepare(returns)?;
        Ok(CovarianceMatrix::from_returns(&panel)?)
    }

    fn prepare(&self, returns: &AssetReturns) -> Result<AssetReturns, AnalyticsError> {
        let panel = window(returns, self.settings.lookback_days);
        validate_panel("analysis input", &panel, 1, 1)?;
        Ok(panel)
    }
}

/// Cumulative log-returns, i.e. log prices relative to the first one.
fn levels(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(0.0, |level, r| {
            *level += r;
            Some(*level)
        })
        .collect()
}
