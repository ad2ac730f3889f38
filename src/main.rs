//! ccgauntlet CLI - C compiler build-and-validate harness
//!
//! Entry point for the ccgauntlet command-line application.

use anyhow::Result;
use clap::Parser;

use ccgauntlet::cli::output::display_error;
use ccgauntlet::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Usage errors exit here, before any stage runs
    let cli = Cli::parse();

    let output_config = cli.output_config();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(output_config.log_level().into()),
        )
        .init();

    match cli.run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
