// Roster board entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Discover CSV files in the data directory
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI event loop
// 7. Cleanup on exit

use rosterboard_core::config;
use rosterboard_core::session::Session;
use rosterboard_core::source::discovery::discover_csv_files;
use rosterboard_core::source::SourceError;
use rosterboard_tui::app;
use rosterboard_tui::tui::{self, ViewState};

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Roster board starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    match &config.source {
        Some(path) => info!("Config loaded from {}", path.display()),
        None => info!("Using built-in config"),
    }

    // 3. Discover CSV files
    let data_dir = config.data_dir();
    let view_state = match discover_csv_files(&data_dir) {
        Ok(files) => {
            let mut state = ViewState::new(files, config.view);
            state.preselect(
                config.data.roster_file.as_deref(),
                config.data.pool_file.as_deref(),
            );
            state
        }
        Err(SourceError::NoEligibleFiles { dir }) => {
            warn!("No CSV files in {}", dir.display());
            ViewState::no_files(config.view)
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to scan data directory {}", data_dir.display()))
        }
    };

    // 4. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 5. Spawn app logic task
    let session = Session::new(config.match_mode);
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, session).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. Run the TUI until the user quits
    if let Err(e) = tui::run(ui_rx, cmd_tx, view_state).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for the app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Roster board shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("rosterboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rosterboard=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
