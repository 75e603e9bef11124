//! The Listener, in a terminal.

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use listener_core::{App, AppConfig, Oxygen, Sanity};
use listener_crossterm::CrosstermDriver;
use listener_lib::{ListenerModel, Session, SessionConfig};
use listener_render::RenderConfig;

#[derive(Parser, Debug)]
#[command(name = "listener", version, about = "Listen to the station. Try to stay sane.")]
struct Args {
    /// Seed for reproducible renders and session rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Starting sanity
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
    sanity: u8,

    /// Starting oxygen
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
    oxygen: u8,

    /// Directory for the log file
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Write every drawn frame to this file as text
    #[arg(long)]
    record: Option<PathBuf>,

    /// Idle redraw interval in milliseconds (0 disables)
    #[arg(long, default_value_t = 150)]
    tick_ms: u64,
}

fn log_directory() -> PathBuf {
    if let Some(dir) = std::env::var_os("XDG_CACHE_HOME") {
        return PathBuf::from(dir).join("listener").join("logs");
    }
    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home).join(".cache").join("listener").join("logs");
    }
    std::env::temp_dir().join("listener").join("logs")
}

/// File-only logging; the terminal belongs to the game.
fn setup_logging(dir: PathBuf) -> Result<PathBuf, Box<dyn Error>> {
    std::fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::never(&dir, "listener.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    // The writer must outlive main.
    std::mem::forget(guard);
    Ok(dir.join("listener.log"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let log_file = setup_logging(args.log_dir.clone().unwrap_or_else(log_directory))?;
    log::info!("starting, log file {}", log_file.display());

    let session = Session::new(SessionConfig {
        sanity: Sanity::new(args.sanity),
        oxygen: Oxygen::new(args.oxygen),
        seed: args.seed,
    })?;
    // Keep the render stream apart from the session's rolls.
    let render_seed = args.seed.map(|s| s.wrapping_add(1));
    let model = ListenerModel::with_seed(session, RenderConfig::default(), render_seed);

    let tick = (args.tick_ms > 0).then(|| Duration::from_millis(args.tick_ms));
    let driver = CrosstermDriver::new(tick);

    let frame_writer = match &args.record {
        Some(path) => {
            let file = File::create(path)?;
            log::info!("recording frames to {}", path.display());
            Some(Box::new(BufWriter::new(file)) as Box<dyn Write>)
        }
        None => None,
    };

    let mut app = App::new(AppConfig {
        model,
        driver,
        frame_writer,
    });
    // The driver has restored the terminal by the time run returns.
    app.run().inspect_err(|err| log::error!("{err}"))?;
    log::info!("bye");
    Ok(())
}
