//! Pickgit CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use pickgit::{OperationMode, PickGitConfig, PickGitError};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(code = error.error_code(), "operation failed");
            let _ignored = writeln!(io::stderr().lock(), "error [{}]: {error}", error.error_code());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), PickGitError> {
    let config = load_config()?;
    let mut stdout = io::stdout().lock();

    match config.operation_mode() {
        OperationMode::MigrateDatabase => cli::migrations::run(&config),
        OperationMode::RegisterUser => cli::users::register(&config, &mut stdout).await,
        OperationMode::AddComment => cli::posts::add_comment(&config, &mut stdout),
        OperationMode::ShowPost => cli::posts::show(&config, &mut stdout),
        OperationMode::SearchRepositories => cli::repositories::search(&config, &mut stdout).await,
        OperationMode::WritePost => cli::posts::write(&config, &mut stdout).await,
        OperationMode::ListRepositories => cli::repositories::list(&config, &mut stdout).await,
        OperationMode::Usage => cli::output::write_usage(&mut stdout),
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`PickGitError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<PickGitConfig, PickGitError> {
    PickGitConfig::load().map_err(|error| PickGitError::Configuration {
        message: error.to_string(),
    })
}

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
