//! HTTP server command

use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::Parser;

use tally_server::Config;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides HOST, default 0.0.0.0)
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (overrides PORT, default 5000)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Create missing tables and constraints before serving
    #[arg(long)]
    pub bootstrap_schema: bool,
}

impl ServeArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = Config::from_env().context(
        "Invalid configuration. Set DATABASE_URL, SUPABASE_URL and SUPABASE_KEY \
         in the environment, ./.env or ~/.tally/.env",
    )?;
    args.apply(&mut config);

    tracing::info!("Starting tally server on {}", config.bind_addr());

    tally_server::serve(config, args.bootstrap_schema)
        .await
        .context("Server error")?;

    Ok(())
}
