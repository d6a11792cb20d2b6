//! cyclealpha CLI binary.
//!
//! Usage: `cyclealpha analyze --returns returns.csv --factors factors.csv [options]`
//!
//! The returns file needs a date column and a daily asset return column; the
//! factor file needs date, `mkt_rf`, `smb`, `hml` and `rf` columns. Column
//! names and factor units are configurable.

use std::{
    fs::File,
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand, ValueEnum};
use cyclealpha::{
    model::{
        AnalysisConfig, AnalysisReport, BootstrapConfig, CashPolicy, CovarianceKind,
        ReferenceDistribution, RegressionConfig, RollingConfig, analyze,
    },
    primitives::{FactorColumn, ModelSpec, TargetColumn, TimeSeriesFrame},
    utils::{ColumnMap, align, drawdown_to_frame, rolling_path_to_frame},
};
use polars::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cyclealpha")]
#[command(about = "Election-cycle factor regression and bootstrap validation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align returns with factors and run the full analysis
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// CSV file with daily asset returns
    #[arg(long)]
    returns: PathBuf,

    /// CSV file with daily Fama-French factors
    #[arg(long)]
    factors: PathBuf,

    /// Date column name in both files
    #[arg(long, default_value = "date")]
    date_column: String,

    /// Asset return column name in the returns file
    #[arg(long, default_value = "asset_return")]
    return_column: String,

    /// Factor file is quoted in percent
    #[arg(long)]
    factors_in_percent: bool,

    /// Rolling window length in observations
    #[arg(long, default_value_t = 1260)]
    window: usize,

    /// Newey-West truncation lag
    #[arg(long, default_value_t = 1)]
    hac_lags: usize,

    /// Use classical instead of HAC standard errors
    #[arg(long)]
    classical: bool,

    /// Use Student-t instead of normal p-values
    #[arg(long)]
    student_t: bool,

    /// Number of bootstrap simulations
    #[arg(long, default_value_t = 10_000)]
    simulations: usize,

    /// Bootstrap seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Overlay return outside the target phase
    #[arg(long, value_enum, default_value_t = Cash::Zero)]
    cash: Cash,

    /// Drop the target-phase indicator from the regression
    #[arg(long)]
    no_indicator: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write the rolling coefficient path to this CSV file
    #[arg(long)]
    rolling_csv: Option<PathBuf>,

    /// Write the buy-and-hold and overlay wealth curves to this CSV file
    #[arg(long)]
    drawdown_csv: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Cash {
    Zero,
    RiskFree,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl AnalyzeArgs {
    fn columns(&self) -> ColumnMap {
        ColumnMap {
            date: self.date_column.clone(),
            asset_return: self.return_column.clone(),
            factor_scale: if self.factors_in_percent { 0.01 } else { 1.0 },
            ..Default::default()
        }
    }

    fn config(&self) -> AnalysisConfig {
        let covariance = if self.classical {
            CovarianceKind::Classical
        } else {
            CovarianceKind::Hac { lags: self.hac_lags, small_sample_correction: true }
        };
        let reference = if self.student_t {
            ReferenceDistribution::StudentT
        } else {
            ReferenceDistribution::Normal
        };

        AnalysisConfig {
            spec: ModelSpec::new(
                FactorColumn::FAMA_FRENCH.to_vec(),
                TargetColumn::ExcessReturn,
                !self.no_indicator,
            ),
            regression: RegressionConfig { covariance, reference },
            rolling: RollingConfig { window_size: self.window },
            bootstrap: BootstrapConfig {
                n_simulations: self.simulations,
                seed: self.seed,
                ..Default::default()
            },
            cash: match self.cash {
                Cash::Zero => CashPolicy::Zero,
                Cash::RiskFree => CashPolicy::RiskFree,
            },
            ..Default::default()
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            let returns = read_csv(&args.returns)?;
            let factors = read_csv(&args.factors)?;
            let frame = align(returns, factors, &args.columns())?;
            tracing::info!(rows = frame.len(), "aligned returns with factors");

            let report = analyze(&frame, &args.config())?;

            if let Some(path) = &args.rolling_csv {
                if let Some(rolling) = &report.rolling {
                    write_csv(path, &mut rolling_path_to_frame(rolling)?)?;
                } else {
                    tracing::warn!("no rolling path to write");
                }
            }
            if let Some(path) = &args.drawdown_csv {
                write_csv(path, &mut wealth_frame(&frame, &report)?)?;
            }

            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                Format::Text => print_report(&report),
            }
        }
    }

    Ok(())
}

fn read_csv(path: &Path) -> PolarsResult<LazyFrame> {
    LazyCsvReader::new(path).with_has_header(true).with_try_parse_dates(true).finish()
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    tracing::info!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}

/// Buy-and-hold and overlay curves side by side.
fn wealth_frame(
    frame: &TimeSeriesFrame,
    report: &AnalysisReport,
) -> Result<DataFrame, Box<dyn std::error::Error>> {
    let dates = frame.dates();
    let buy_and_hold = drawdown_to_frame(&report.buy_and_hold, Some(dates.as_slice()))?;
    let overlay = drawdown_to_frame(&report.overlay, None)?;

    let mut df = buy_and_hold;
    df.with_column(overlay.column("wealth")?.clone().with_name("overlay_wealth".into()))?;
    df.with_column(overlay.column("drawdown")?.clone().with_name("overlay_drawdown".into()))?;
    Ok(df)
}

fn print_report(report: &AnalysisReport) {
    let span = match (report.start_date, report.end_date) {
        (Some(start), Some(end)) => format!("{start} to {end}"),
        _ => "empty".to_string(),
    };
    println!("\nSample: {} observations, {span}", report.n_observations);

    let fit = &report.full_sample;
    println!(
        "\n--- Full-sample regression (R² {:.4}, adj. {:.4}) ---",
        fit.r_squared, fit.adj_r_squared
    );
    println!("{:<18} {:>12} {:>12} {:>9} {:>9}", "coefficient", "estimate", "std error", "t", "p");
    for c in &fit.coefficients {
        println!(
            "{:<18} {:>12.6} {:>12.6} {:>9.3} {:>9.4}",
            c.name, c.estimate, c.std_error, c.t_statistic, c.p_value
        );
    }

    println!("\n--- Rolling regression ---");
    match &report.rolling {
        Some(path) => {
            let indicator = path.coefficient_series("is_target_phase");
            let significant = path
                .iter()
                .filter_map(|p| p.estimate.fitted())
                .filter(|r| r.get("is_target_phase").is_some_and(|c| c.p_value < 0.05))
                .count();
            println!(
                "{} windows of {}, {} undefined, indicator significant at 5% in {} of {}",
                path.len(),
                path.window_size,
                path.n_undefined(),
                significant,
                indicator.iter().filter(|(_, v)| v.is_some()).count()
            );
        }
        None => println!("skipped: sample shorter than the window"),
    }

    let boot = &report.bootstrap;
    println!("\n--- Bootstrap (annualized Sharpe, target minus rest) ---");
    println!(
        "simulations {} | degenerate draws {} | observed {:.4} | p-value {:.4}",
        boot.n_simulations(),
        boot.degenerate_draws,
        boot.observed.unwrap_or(f64::NAN),
        boot.p_value
    );
    if let Some((lo, hi)) = boot.percentile_interval(0.95) {
        println!("95% interval [{lo:.4}, {hi:.4}]");
    }

    let welch = &report.welch;
    println!("\n--- Welch t-test (target mean > rest mean) ---");
    println!(
        "t {:.4} | df {:.1} | one-sided p {:.4}",
        welch.t_statistic, welch.degrees_of_freedom, welch.p_value_one_sided
    );

    println!("\n--- Performance ---");
    println!(
        "{:<14} {:>7} {:>10} {:>10} {:>8} {:>9}",
        "partition", "count", "mean %", "vol %", "sharpe", "win rate"
    );
    for m in [&report.metrics.target, &report.metrics.rest, &report.metrics.all] {
        println!(
            "{:<14} {:>7} {:>10.4} {:>10.4} {:>8.3} {:>9.3}",
            m.name,
            m.count,
            m.mean * 100.0,
            m.volatility * 100.0,
            m.sharpe,
            m.win_rate
        );
    }

    println!("\n--- Strategy simulation ---");
    for (name, curve) in [("buy & hold", &report.buy_and_hold), ("target only", &report.overlay)] {
        println!(
            "{:<12} final {:>10.4} | max drawdown {:>8.2}%",
            name,
            curve.final_wealth(),
            curve.max_drawdown * 100.0
        );
    }

    println!("\n--- Annual returns ---");
    for year in &report.annual {
        let phase = year.phase.to_string();
        println!("{} {phase:<14} {:>8.2}%", year.year, year.asset_return * 100.0);
    }
}
