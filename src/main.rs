use barstock::{
    cli::{Cli, CliContext, dispatch},
    config::{self, session::load_session},
    errors::Result,
};
use clap::Parser;
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn run(cli: Cli) -> Result<String> {
    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Read the stored session token, if any
    let session = load_session(&app_config.session_file)?;
    info!("Session present: {}", session.is_signed_in());

    // 5. Run the command
    let ctx = CliContext::new(app_config, session);
    dispatch(&ctx, cli.command).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file, non-fatal since variables can be set externally
    dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
