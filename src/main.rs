use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod discovery;
mod emit;
mod error;
mod inject;
mod manifest;
mod pipeline;
mod ui;

use cli::Cli;
use config::InjectConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with LOGGING env var support
    // LOGGING=debug,info,warn,error or just LOGGING=debug
    let log_level = std::env::var("LOGGING")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| {
            if cli.verbose {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .init();

    let result = execute(&cli).await;

    if let Err(ref e) = result {
        tracing::error!("secret-inject failed: {:#}", e);
    }

    result
}

async fn execute(cli: &Cli) -> Result<()> {
    let config = InjectConfig::resolve(cli).await?;
    tracing::debug!("Resolved configuration: {:?}", config);

    let summary = pipeline::run(&config).await?;

    ui::print_info(&format!(
        "Scanned {} file(s), skipped {}, updated {} of {} Deployment(s), {} failed",
        summary.files_scanned,
        summary.files_skipped,
        summary.deployments_emitted,
        summary.deployments_found,
        summary.deployments_failed
    ));

    Ok(())
}
