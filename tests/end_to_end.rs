use analytics::{AnalyticsEngine, ResultCache};
use configuration::{Config, load_config};
use core_types::{AssetReturns, log_returns};
use optimizer::View;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use std::path::Path;

/// Price panel: `X` a random walk in logs, `Y` tied to it, `Z` independent.
fn prices(seed: u64, n: usize) -> AssetReturns {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut x = 4.6;
    let mut z = 3.9;
    let mut px = Vec::with_capacity(n);
    let mut py = Vec::with_capacity(n);
    let mut pz = Vec::with_capacity(n);
    for _ in 0..n {
        x += 0.01 * rng.sample::<f64, _>(StandardNormal);
        z += 0.01 * rng.sample::<f64, _>(StandardNormal);
        let y = 0.5 + 1.5 * x + 0.01 * rng.sample::<f64, _>(StandardNormal);
        px.push(f64::exp(x));
        py.push(f64::exp(y));
        pz.push(f64::exp(z));
    }
    AssetReturns::from([
        ("X".to_string(), px),
        ("Y".to_string(), py),
        ("Z".to_string(), pz),
    ])
}

fn returns(seed: u64, n: usize) -> AssetReturns {
    prices(seed, n)
        .into_iter()
        .map(|(asset, p)| (asset, log_returns(&p).unwrap()))
        .collect()
}

#[test]
fn shipped_config_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml");
    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn tied_prices_are_found_cointegrated() {
    let engine = AnalyticsEngine::default();
    let panel = returns(3, 400);

    let pairs = engine.scan_pairs(&panel).unwrap();
    let xy = pairs
        .iter()
        .find(|p| p.first == "X" && p.second == "Y")
        .unwrap();
    assert!(xy.engle_granger.is_cointegrated);
    assert!((xy.engle_granger.cointegrating_vector[1] - 1.0 / 1.5).abs() < 0.1);

    let johansen = engine.johansen(&panel).unwrap();
    assert!(johansen.is_cointegrated);
    assert!(johansen.rank >= 1);
}

#[test]
fn allocations_and_risk_hold_their_invariants() {
    let engine = AnalyticsEngine::default();
    let panel = returns(5, 300);

    let risk = engine.risk(&panel).unwrap();
    assert!(risk.historical.cvar <= risk.historical.var);
    let monte_carlo = risk.monte_carlo.unwrap();
    assert!(monte_carlo.cvar <= monte_carlo.var);

    let rp = engine.risk_parity(&panel).unwrap();
    assert!((rp.weights.total() - 1.0).abs() < 1e-6);
    let hrp = engine.hrp(&panel).unwrap();
    assert!((hrp.weights.total() - 1.0).abs() < 1e-6);
    assert_eq!(hrp.clusters.iter().map(Vec::len).sum::<usize>(), 3);

    let views: Vec<View> =
        serde_json::from_str(r#"[{"asset": "Z", "expected_return": 0.01, "confidence": 0.8}]"#)
            .unwrap();
    let bl = engine.black_litterman(&panel, None, &views).unwrap();
    assert!(bl.posterior_returns["Z"] > bl.equilibrium_returns["Z"]);
}

#[test]
fn reruns_are_bit_identical() {
    let engine = AnalyticsEngine::default();
    let panel = returns(9, 300);
    let first = engine
        .full_report(&panel, Some(5), &mut ResultCache::new())
        .unwrap();
    let second = engine
        .full_report(&panel, Some(5), &mut ResultCache::new())
        .unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    let json = serde_json::to_value(&first).unwrap();
    for section in ["stationarity", "pairs", "johansen", "autocorrelation", "risk", "hrp"] {
        assert!(!json[section].is_null(), "missing section {section}");
    }
    assert_eq!(json["observations"], 252);
}
