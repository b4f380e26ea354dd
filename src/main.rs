use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::event::KeyEventKind;
use tracing::info;

use xtop::app::App;
use xtop::config::{Config, load_config, load_config_from_path};
use xtop::event::{Event, EventHandler};
use xtop::logging::init_file_logging;
use xtop::system::collector::Collector;
use xtop::ui;

#[derive(Parser)]
#[command(
    name = "xtop",
    about = "Live terminal dashboard for CPU, memory, disk, network, battery and processes"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Number of processes to show
    #[arg(long)]
    top: Option<usize>,

    /// Theme: dark, light, mono
    #[arg(long)]
    theme: Option<String>,

    /// Write logs to this file (filter with XTOP_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print this many samples as JSON lines instead of starting the dashboard.
    #[arg(long, value_name = "TICKS")]
    json: Option<usize>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }
    let config = load_config_for_cli(&cli)?;

    if let Some(ticks) = cli.json {
        return run_json(config, ticks).await;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms);
    let mut app = App::new(config);
    let mut events = EventHandler::new(tick_rate);
    info!(?tick_rate, "dashboard started");

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                    true
                } else {
                    false
                }
            }
            Event::Tick => {
                app.refresh_data();
                true
            }
            Event::Resize => true,
        };
        if should_draw && app.running {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

/// Samples `ticks` times at the configured cadence and prints each view.
///
/// The first line has no baseline, so its rates are all zero.
async fn run_json(config: Config, ticks: usize) -> Result<()> {
    if ticks == 0 {
        return Err(eyre!("--json must be greater than 0"));
    }

    let filter = config.disks.mount_filter();
    let mut collector = Collector::new()
        .top_processes(config.general.top_processes)
        .mount_filter(move |mount| filter.matches(mount));
    let interval = Duration::from_millis(config.general.refresh_rate_ms);

    let stdout = std::io::stdout();
    for tick in 0..ticks {
        if tick > 0 {
            tokio::time::sleep(interval).await;
        }
        let view = collector.refresh();
        let line = serde_json::to_string(&view)?;
        writeln!(stdout.lock(), "{line}")?;
    }
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(top) = cli.top {
        config.general.top_processes = top;
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }

    if config.general.refresh_rate_ms == 0 {
        return Err(eyre!("refresh rate must be greater than 0"));
    }

    Ok(config)
}
