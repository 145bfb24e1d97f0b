use analytics::{
    AnalyticsEngine, AutocorrelationReport, FullReport, PairReport, ResultCache, RiskReport,
    StationarityReport,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cointegration::JohansenResult;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use configuration::load_config;
use core_types::{AssetReturns, CriticalValues, SignificanceLevel, log_returns};
use indicatif::{ProgressBar, ProgressStyle};
use optimizer::{PortfolioWeights, View};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Meridian analytics command line.
fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level)?;

    let returns = read_panel(&cli.input, cli.prices)?;
    tracing::info!(
        assets = returns.len(),
        input = %cli.input.display(),
        "input loaded"
    );
    let engine = AnalyticsEngine::new(config.analysis);
    let output = Output { json: cli.json };

    // Execute the appropriate command
    match cli.command {
        Commands::Stationarity => {
            let reports = engine.stationarity(&returns)?;
            output.emit(&reports, stationarity_table)
        }
        Commands::Pairs => handle_pairs(&engine, &returns, output),
        Commands::Johansen => {
            let result = engine.johansen(&returns)?;
            output.emit(&result, johansen_table)
        }
        Commands::Autocorr { period } => {
            let reports = engine.autocorrelation(&returns, period)?;
            output.emit(&reports, autocorrelation_table)
        }
        Commands::Risk => {
            let report = engine.risk(&returns)?;
            output.emit(&report, risk_table)
        }
        Commands::Allocate(args) => handle_allocate(&engine, &returns, args, output),
        Commands::Report { period } => {
            let mut cache = ResultCache::new();
            let report = engine.full_report(&returns, period, &mut cache)?;
            output.emit(&report, full_report_tables)
        }
    }
}

fn init_tracing(level: &str) -> Result<()> {
    // RUST_LOG wins over the configured level.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid logging level '{level}'"))?,
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Econometric and portfolio-risk analytics over asset return series.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A TOML configuration file. Defaults to `config.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// A JSON object mapping each asset to its series of returns.
    #[arg(long, short, global = true, default_value = "returns.json")]
    input: PathBuf,

    /// Treat the input series as prices and convert them to log-returns.
    #[arg(long, global = true)]
    prices: bool,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ADF and KPSS tests on every asset.
    Stationarity,
    /// Engle-Granger, Granger causality both ways and lead-lag for every pair.
    Pairs,
    /// Johansen trace and maximum-eigenvalue tests across all assets.
    Johansen,
    /// ACF, PACF and Ljung-Box per asset, optionally with a seasonal decomposition.
    Autocorr {
        /// Seasonal period in observations.
        #[arg(long)]
        period: Option<usize>,
    },
    /// Historical CVaR and Monte Carlo expected shortfall.
    Risk,
    /// Portfolio weights from one of the allocation methods.
    Allocate(AllocateArgs),
    /// Every analysis the input supports.
    Report {
        /// Seasonal period in observations.
        #[arg(long)]
        period: Option<usize>,
    },
}

#[derive(Parser)]
struct AllocateArgs {
    #[arg(long, value_enum, default_value_t = AllocationMethod::RiskParity)]
    method: AllocationMethod,

    /// Black-Litterman views: a JSON array of `{asset, expected_return, confidence}`.
    #[arg(long)]
    views: Option<PathBuf>,

    /// Black-Litterman market weights: a JSON object asset -> weight.
    /// Equal weights when omitted.
    #[arg(long)]
    market_weights: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AllocationMethod {
    RiskParity,
    Hrp,
    BlackLitterman,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_pairs(engine: &AnalyticsEngine, returns: &AssetReturns, output: Output) -> Result<()> {
    let assets = returns.len() as u64;
    let progress_bar = if output.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(assets * assets.saturating_sub(1) / 2)
    };
    let template = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pairs";
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(template)?
            .progress_chars("#>-"),
    );

    let pairs = engine.scan_pairs_with(returns, || progress_bar.inc(1));
    progress_bar.finish_and_clear();
    output.emit(&pairs?, pairs_table)
}

fn handle_allocate(
    engine: &AnalyticsEngine,
    returns: &AssetReturns,
    args: AllocateArgs,
    output: Output,
) -> Result<()> {
    match args.method {
        AllocationMethod::RiskParity => {
            let result = engine.risk_parity(returns)?;
            if !result.converged {
                tracing::warn!(iterations = result.iterations, "risk parity did not converge");
            }
            output.emit(&result, |r| weights_table(&r.weights))
        }
        AllocationMethod::Hrp => {
            let result = engine.hrp(returns)?;
            output.emit(&result, |r| {
                let mut table = weights_table(&r.weights);
                for (i, cluster) in r.clusters.iter().enumerate() {
                    table.add_row(vec![format!("cluster {i}"), cluster.join(", ")]);
                }
                table
            })
        }
        AllocationMethod::BlackLitterman => {
            let views: Vec<View> = match &args.views {
                Some(path) => read_json(path)?,
                None => Vec::new(),
            };
            let market_weights: Option<PortfolioWeights> = args
                .market_weights
                .as_deref()
                .map(read_json::<PortfolioWeights>)
                .transpose()?;
            let result = engine.black_litterman(returns, market_weights.as_ref(), &views)?;
            output.emit(&result, |r| {
                let mut table = new_table(&["Asset", "Equilibrium", "Posterior", "Weight"]);
                for (asset, prior) in &r.equilibrium_returns {
                    table.add_row(vec![
                        asset.clone(),
                        fmt(*prior),
                        fmt(r.posterior_returns[asset]),
                        fmt(r.weights.get(asset).unwrap_or_default()),
                    ]);
                }
                table
            })
        }
    }
}

// ==============================================================================
// Input
// ==============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn read_panel(path: &Path, prices: bool) -> Result<AssetReturns> {
    let panel: AssetReturns = read_json(path)?;
    if !prices {
        return Ok(panel);
    }
    panel
        .into_iter()
        .map(|(asset, series)| {
            let returns = log_returns(&series)
                .with_context(|| format!("Failed to convert prices of {asset}"))?;
            Ok((asset, returns))
        })
        .collect()
}

// ==============================================================================
// Output
// ==============================================================================

#[derive(Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn emit<T: Serialize>(self, value: &T, table: impl FnOnce(&T) -> Table) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", table(value));
        }
        Ok(())
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn fmt(value: f64) -> String {
    format!("{value:.4}")
}

fn five_percent(values: &CriticalValues) -> String {
    values
        .get(&SignificanceLevel::FivePercent)
        .map_or_else(|| "-".to_string(), |v| fmt(*v))
}

fn yes_no(flag: bool) -> String {
    let answer = if flag { "yes" } else { "no" };
    answer.to_string()
}

fn stationarity_table(reports: &Vec<StationarityReport>) -> Table {
    let mut table = new_table(&[
        "Asset", "ADF", "ADF 5%", "Lags", "KPSS", "KPSS 5%", "Stationary",
    ]);
    for r in reports {
        table.add_row(vec![
            r.asset.clone(),
            fmt(r.adf.statistic),
            five_percent(&r.adf.critical_values),
            r.adf.lags.to_string(),
            fmt(r.kpss.statistic),
            five_percent(&r.kpss.critical_values),
            yes_no(r.tests_agree_stationary()),
        ]);
    }
    table
}

fn pairs_table(pairs: &Vec<PairReport>) -> Table {
    let mut table = new_table(&[
        "Pair",
        "EG stat",
        "Cointegrated",
        "Hedge ratio",
        "Granger p (1->2)",
        "Granger p (2->1)",
        "Lag",
        "Corr",
        "Leader",
    ]);
    for p in pairs {
        table.add_row(vec![
            format!("{}/{}", p.first, p.second),
            fmt(p.engle_granger.adf_statistic),
            yes_no(p.engle_granger.is_cointegrated),
            fmt(p.engle_granger.cointegrating_vector[1]),
            fmt(p.granger_first_to_second.p_value),
            fmt(p.granger_second_to_first.p_value),
            p.lead_lag.optimal_lag.to_string(),
            fmt(p.lead_lag.correlation),
            format!("{:?}", p.lead_lag.leader),
        ]);
    }
    table
}

fn johansen_table(result: &JohansenResult) -> Table {
    let mut table = new_table(&[
        "H0: r <=",
        "Eigenvalue",
        "Trace",
        "Trace 5%",
        "Max-eig",
        "Max-eig 5%",
    ]);
    for r in 0..result.eigenvalues.len() {
        table.add_row(vec![
            r.to_string(),
            fmt(result.eigenvalues[r]),
            fmt(result.trace_statistics[r]),
            five_percent(&result.trace_critical_values[r]),
            fmt(result.max_eigen_statistics[r]),
            five_percent(&result.max_eigen_critical_values[r]),
        ]);
    }
    table.add_row(vec!["rank".to_string(), result.rank.to_string()]);
    table
}

fn autocorrelation_table(reports: &Vec<AutocorrelationReport>) -> Table {
    let mut table = new_table(&[
        "Asset",
        "Lags",
        "ACF(1)",
        "PACF(1)",
        "Ljung-Box",
        "p-value",
        "Seasonal strength",
    ]);
    for r in reports {
        let a = &r.autocorrelation;
        table.add_row(vec![
            r.asset.clone(),
            a.lags.to_string(),
            a.acf.first().map_or_else(|| "-".to_string(), |v| fmt(*v)),
            a.pacf.first().map_or_else(|| "-".to_string(), |v| fmt(*v)),
            fmt(a.ljung_box),
            fmt(a.ljung_box_p_value),
            r.decomposition
                .as_ref()
                .map_or_else(|| "-".to_string(), |d| fmt(d.seasonal_strength())),
        ]);
    }
    table
}

fn risk_table(report: &RiskReport) -> Table {
    let mut table = new_table(&["Method", "Confidence", "VaR", "CVaR", "Samples", "Seed"]);
    for m in std::iter::once(&report.historical).chain(report.monte_carlo.as_ref()) {
        table.add_row(vec![
            format!("{:?}", m.method),
            fmt(m.confidence_level),
            fmt(m.var),
            fmt(m.cvar),
            m.sample_size.to_string(),
            m.seed.to_string(),
        ]);
    }
    table
}

fn weights_table(weights: &PortfolioWeights) -> Table {
    let mut table = new_table(&["Asset", "Weight"]);
    for (asset, weight) in weights.iter() {
        table.add_row(vec![asset.clone(), fmt(*weight)]);
    }
    table
}

fn full_report_tables(report: &FullReport) -> Table {
    // One table per section, printed as they are built; the summary is returned.
    println!("{}", stationarity_table(&report.stationarity));
    if !report.pairs.is_empty() {
        println!("{}", pairs_table(&report.pairs));
    }
    if let Some(johansen) = &report.johansen {
        println!("{}", johansen_table(johansen));
    }
    println!("{}", autocorrelation_table(&report.autocorrelation));
    println!("{}", risk_table(&report.risk));

    let mut table = new_table(&["Asset", "Risk parity", "HRP"]);
    for (asset, weight) in report.risk_parity.weights.iter() {
        let hrp = report
            .hrp
            .as_ref()
            .and_then(|h| h.weights.get(asset))
            .map_or_else(|| "-".to_string(), fmt);
        table.add_row(vec![asset.clone(), fmt(*weight), hrp]);
    }
    table
}
