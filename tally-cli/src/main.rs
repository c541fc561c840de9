//! tally CLI - runs the personal progress-tracking API
//!
//! Configuration comes from the environment, optionally seeded from `./.env`
//! and `~/.tally/.env`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod env;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    author,
    version,
    about = "Personal progress-tracking API server",
    long_about = "Serves CRUD endpoints for todos, habits, daily logs, contest ratings, \
                  courses, certificates, projects and case practice, backed by PostgreSQL \
                  and object storage."
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv = env::load_dotenv();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })
        .context("failed to initialize tracing")?;
    dotenv.log();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
    }
    Ok(())
}
