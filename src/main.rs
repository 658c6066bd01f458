use clap::Parser;
use dotenvy::dotenv;
use pantry_buddy::cli::{self, Cli};
use pantry_buddy::config;
use pantry_buddy::errors::Result;
use pantry_buddy::session::DiagnosticsSession;
use pantry_buddy::store::{DataStore, FileBackend};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 3. Parse the command line before touching any state
    let cli = Cli::parse();

    // 4. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;

    // 5. Open the document store (degrades to defaults on corruption)
    let mut store = DataStore::open(FileBackend::new(&app_config.data_path))
        .inspect(|_| info!("Document store opened"))
        .inspect_err(|e| error!("Failed to open document store: {e}"))?;
    if let Some(report) = store.last_validation() {
        warn!("Stored data could not be used and was replaced by defaults: {report}");
        eprintln!(
            "Warning: stored data was invalid and defaults are in use ({report}). \
             The previous file is untouched until the next save."
        );
    }

    // 6. Start the diagnostics session and run the command
    let mut session = DiagnosticsSession::new();
    cli::run(cli, &mut store, &app_config, &mut session)
        .inspect_err(|e| error!("Command failed: {e}"))?;

    Ok(())
}
