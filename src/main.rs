//! mocksmith: define fake HTTP endpoints from the terminal and serve them live.
//!
//! # Architecture Overview
//!
//! ```text
//!  ┌──────────┐  Configuration  ┌──────────────┐  build   ┌────────────┐
//!  │  editor  │ ──────────────▶ │    reload    │ ───────▶ │ RouteTable │
//!  │ (stdin)  │  bounded (10)   │ coordinator  │          └─────┬──────┘
//!  └────┬─────┘                 └──────┬───────┘                │
//!       │ save                         │ swap (write lock)      │
//!       ▼                              ▼                        │
//!  data/endpoints.json          ┌──────────────┐ lookup (read)  │
//!       ▲                       │ SharedRoutes │ ◀──────────────┘
//!       │ watch (optional)      └──────┬───────┘
//!                                      ▼
//!     Client Request ─────────▶  http dispatcher ─────────▶ canned response
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use mocksmith::config::{load_settings_or_default, validate_settings, ConfigError};
use mocksmith::lifecycle::{self, Mode};
use mocksmith::observability::logging;

#[derive(Parser, Debug)]
#[command(
    name = "mocksmith",
    about = "Interactive mock API server with live reload",
    version
)]
struct Cli {
    /// Path to the settings file (optional)
    #[arg(short, long, default_value = "mocksmith.toml")]
    config: PathBuf,

    /// Address to serve mocks on, e.g. 127.0.0.1:8080
    #[arg(short, long)]
    bind: Option<String>,

    /// Endpoints file
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Run without the console editor
    #[arg(long)]
    headless: bool,

    /// Reload when the endpoints file changes on disk
    #[arg(short, long)]
    watch: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long)]
    log_level: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = load_settings_or_default(&cli.config)?;
    if let Some(bind) = cli.bind {
        settings.listener.bind_address = bind;
    }
    if let Some(data) = cli.data {
        settings.storage.endpoints_path = data;
    }
    if let Some(level) = cli.log_level {
        settings.observability.log_level = level;
    }
    settings.reload.watch_file |= cli.watch;
    validate_settings(&settings).map_err(ConfigError::Validation)?;

    logging::init(&settings.observability.log_level);
    tracing::info!(
        bind_address = %settings.listener.bind_address,
        endpoints_path = ?settings.storage.endpoints_path,
        channel_capacity = settings.reload.channel_capacity,
        "mocksmith v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let mode = if cli.headless {
        Mode::Headless
    } else {
        Mode::Interactive
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(lifecycle::run(settings, mode));
    // The stdin reader may still be parked in a blocking read.
    runtime.shutdown_timeout(Duration::from_millis(500));

    result?;
    tracing::info!("Shutdown complete");
    Ok(())
}
