//! Student Portal - desktop client for grades, projects, absences and uploads.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use student_portal as app;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use app::client::PortalClient;
use app::config::AppConfig;
use app::session::{FileStore, SessionStore};
use app::ui::PortalApp;

/// Desktop client for the MIAGE student portal.
#[derive(Parser)]
#[command(name = "student-portal")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Explicit config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Forget the stored session before starting
    #[arg(long)]
    logout: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let data_dir = AppConfig::data_dir();

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = init_logging(&data_dir.join("logs"))?;

    tracing::info!("Student Portal starting...");

    // Determine config path based on mode
    let config_path = match (cli.config, cli.dev) {
        (Some(path), _) => path,
        (None, true) => {
            tracing::info!("Dev mode: loading config from current directory");
            PathBuf::from("config.toml")
        }
        (None, false) => AppConfig::default_path(),
    };
    tracing::info!("Config path: {:?}", config_path);

    let config = AppConfig::load_or_init(&config_path);
    tracing::info!("API origin: {}", config.api.base_url);

    let mut store = SessionStore::new(FileStore::new(data_dir.join("session.json")));
    if cli.logout {
        store.clear().context("failed to clear stored session")?;
        tracing::info!("Stored session cleared");
    }

    let api = PortalClient::new(&config.api, &config.portal).context("failed to build HTTP client")?;

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Student Portal")
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Student Portal",
        options,
        Box::new(|cc| Ok(Box::new(PortalApp::new(cc, config, rt, api, store)))),
    )
    .map_err(|e| anyhow::anyhow!("UI failed: {e}"))
}

/// Console output plus a daily rolling file in `log_dir`.
fn init_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("student-portal")
        .filename_suffix("log")
        .build(log_dir)
        .context("failed to open log directory")?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    Ok(guard)
}
