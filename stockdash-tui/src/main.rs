//! Stockdash TUI binary: load data, build the dashboard, run the event loop.

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use stockdash_core::data::load_configured;
use stockdash_core::{BrushFanOut, Dashboard, DashboardConfig};
use stockdash_tui::{handle_key, ui, App};

#[derive(Parser)]
#[command(name = "stockdash-tui", about = "Four-panel terminal stock dashboard")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Price CSV (date,ticker,close,adj_close,volume)
    #[arg(long)]
    prices: Option<PathBuf>,

    /// Model CSV (date,ticker,actual_price,fitted_price)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Use the generated demo dataset instead of CSV files
    #[arg(long)]
    demo: bool,

    /// Which panels follow the overview brush
    #[arg(long, value_enum)]
    fan_out: Option<FanOut>,
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

/// Log to a file; the terminal belongs to the UI.
fn init_logging() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockdash");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("stockdash-tui.log");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(path)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_path = init_logging()?;

    let config = DashboardConfig::load_or_default(args.config.as_deref())?.with_overrides(
        args.prices,
        args.model,
        args.fan_out.map(Into::into),
    );
    let dataset = load_configured(&config, args.demo)?;
    let dashboard = Dashboard::new(config, dataset)?;
    let mut app = App::new(dashboard);
    if app.dashboard.dataset().is_empty() {
        app.set_error("No data loaded: check --prices and --model");
    } else {
        app.set_status(format!("Press ? for help. Log: {}", log_path.display()));
    }

    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms poll keeps the loop responsive without spinning
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    tracing::info!("quit");
    Ok(())
}
