//! bookshelf CLI - run and probe the book records service
//!
//! - `serve`: connect to the document store, verify it answers, and serve HTTP
//! - `ping`: health-probe the document store and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "bookshelf",
    author,
    version,
    about = "HTTP CRUD service for book records backed by MongoDB"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Check that the document store is reachable
    Ping(commands::ping::PingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load but don't fail if .env is missing or malformed
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Ping(args) => commands::run_ping(args).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["bookshelf", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.port(), 8000);
        assert_eq!(args.write_timeout_secs, 5);
        assert_eq!(args.read_timeout_secs, 30);
        assert!(!args.memory);
    }

    #[test]
    fn debug_flag_is_global() {
        let cli = Cli::try_parse_from(["bookshelf", "serve", "--debug", "--memory"]).unwrap();
        assert!(cli.debug);
    }
}
