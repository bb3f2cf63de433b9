//! Stockdash CLI: headless views of the dashboard.
//!
//! Commands:
//! - `summary`: correlation, fit and R² for a date window
//! - `check`: row counts, extents and skipped-row tallies for the inputs

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use stockdash_core::data::load_configured;
use stockdash_core::panels::scatter::correlation_label;
use stockdash_core::panels::model::r_squared_line;
use stockdash_core::stats::format_stat;
use stockdash_core::{
    BrushFanOut, Dashboard, DashboardConfig, Event, Outcome, PanelKind, Ticker, TimeDomain,
};

#[derive(Parser)]
#[command(name = "stockdash", about = "Stock dashboard statistics without a terminal UI")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Price CSV (date,ticker,close,adj_close,volume).
    #[arg(long, global = true)]
    prices: Option<PathBuf>,

    /// Model CSV (date,ticker,actual_price,fitted_price).
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Use the generated demo dataset.
    #[arg(long, global = true, default_value_t = false)]
    demo: bool,

    /// Which panels follow the date window.
    #[arg(long, global = true, value_enum)]
    fan_out: Option<FanOut>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scatter correlation and model R² over a date window.
    Summary {
        /// Scatter pair, e.g. AMD,NVIDIA. Defaults to the configured pair.
        #[arg(long, value_delimiter = ',')]
        pair: Vec<Ticker>,

        /// Window start (YYYY-MM-DD). Defaults to the first price date.
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Window end (YYYY-MM-DD). Defaults to the last price date.
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Print JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Report what the loader kept and skipped.
    Check {
        /// Print JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FanOut {
    AllPanels,
    DetailOnly,
}

impl From<FanOut> for BrushFanOut {
    fn from(value: FanOut) -> Self {
        match value {
            FanOut::AllPanels => BrushFanOut::AllPanels,
            FanOut::DetailOnly => BrushFanOut::DetailOnly,
        }
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    domain: Option<TimeDomain>,
    scatter: &'a Outcome,
    model: &'a Outcome,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = DashboardConfig::load_or_default(cli.config.as_deref())?.with_overrides(
        cli.prices,
        cli.model,
        cli.fan_out.map(Into::into),
    );

    match cli.command {
        Commands::Summary {
            pair,
            from,
            to,
            json,
        } => {
            if !pair.is_empty() {
                if pair.len() != 2 || pair[0] == pair[1] {
                    bail!("--pair needs two different tickers, e.g. AMD,NVIDIA");
                }
                config.controls.scatter.checked = pair;
            }
            let dataset = load_configured(&config, cli.demo)?;
            let mut dashboard = Dashboard::new(config, dataset)?;
            if from.is_some() || to.is_some() {
                apply_window(&mut dashboard, from, to)?;
            }
            run_summary(&dashboard, json)
        }
        Commands::Check { json } => {
            let dataset = load_configured(&config, cli.demo)?;
            let summary = dataset.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }
            println!("Price rows: {}", summary.price_rows);
            println!("Model rows: {}", summary.model_rows);
            if let Some(extent) = summary.price_extent {
                println!("Price dates: {} to {}", extent.start(), extent.end());
            }
            if let Some(extent) = summary.model_extent {
                println!("Model dates: {} to {}", extent.start(), extent.end());
            }
            for (ticker, rows) in &summary.rows_per_ticker {
                println!("  {ticker:<7} {rows} rows");
            }
            println!("Price file: {}", summary.price_report);
            println!("Model file: {}", summary.model_report);
            Ok(())
        }
    }
}

/// Drive the window through the same brush path the overview uses.
fn apply_window(
    dashboard: &mut Dashboard,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let Some(scale) = dashboard.overview_scale() else {
        bail!("no price data to select a date window from");
    };
    let full = scale.domain();
    let start = from.unwrap_or(full.start());
    let end = to.unwrap_or(full.end());
    if start > end {
        bail!("--from {start} is after --to {end}");
    }
    tracing::info!(%start, %end, "applying date window");
    dashboard.handle(Event::Brush {
        selection: Some((scale.map(start), scale.map(end))),
    });
    Ok(())
}

fn run_summary(dashboard: &Dashboard, json: bool) -> Result<()> {
    let scatter = &dashboard.view(PanelKind::Scatter).outcome;
    let model = &dashboard.view(PanelKind::Model).outcome;

    if json {
        let summary = Summary {
            domain: dashboard.domain(),
            scatter,
            model,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    match dashboard.domain() {
        Some(d) => println!("Window: {} to {}", d.start(), d.end()),
        None => println!("Window: none"),
    }

    match scatter {
        Outcome::Scatter(stats) => {
            println!(
                "{} vs {} ({}, {} days)",
                stats.pair.x(),
                stats.pair.y(),
                stats.field.label(),
                stats.points
            );
            println!("  {}", correlation_label(stats.correlation));
            if stats.fit.is_finite() {
                println!(
                    "  Fit: y = {} x + {}",
                    format_stat(stats.fit.slope).unwrap_or_else(|| "n/a".into()),
                    format_stat(stats.fit.intercept).unwrap_or_else(|| "n/a".into()),
                );
            } else {
                println!("  Fit: n/a");
            }
        }
        other => println!("Scatter: {}", other.placeholder().unwrap_or("n/a")),
    }

    match model {
        Outcome::Model { points, r_squared } => {
            println!("Model fit ({points} rows)");
            for (ticker, value) in r_squared {
                println!("  {}", r_squared_line(*ticker, *value));
            }
        }
        other => println!("Model: {}", other.placeholder().unwrap_or("n/a")),
    }
    Ok(())
}
