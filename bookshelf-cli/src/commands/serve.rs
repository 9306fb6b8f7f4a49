//! HTTP server command
//!
//! Connects to the document store, refuses to start if it does not answer
//! a ping, then serves the book API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};

use bookshelf_server::db::{BookGateway, BookStore, Deadlines, MemoryBookStore, MongoBookStore};
use bookshelf_server::db::mongo::{DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_URI};
use bookshelf_server::{run_server, ServerConfig, StoreConfig};

/// Document store location, shared by `serve` and `ping`
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// MongoDB connection string
    #[arg(long, env = "MONGODB_URI", default_value = DEFAULT_URI)]
    pub mongodb_uri: String,

    /// Database holding the book collection
    #[arg(long, env = "BOOKSHELF_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Collection holding book documents
    #[arg(long, env = "BOOKSHELF_COLLECTION", default_value = DEFAULT_COLLECTION)]
    pub collection: String,
}

impl From<&StoreArgs> for StoreConfig {
    fn from(args: &StoreArgs) -> Self {
        Self {
            uri: args.mongodb_uri.clone(),
            database: args.database.clone(),
            collection: args.collection.clone(),
        }
    }
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BOOKSHELF_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Deadline for create, replace and delete (seconds)
    #[arg(long, default_value_t = 5)]
    pub write_timeout_secs: u64,

    /// Deadline for lookups and list queries (seconds)
    #[arg(long, default_value_t = 30)]
    pub read_timeout_secs: u64,

    /// Keep books in process memory instead of MongoDB (development only)
    #[arg(long)]
    pub memory: bool,
}

impl ServeArgs {
    fn deadlines(&self) -> Deadlines {
        Deadlines {
            write: Duration::from_secs(self.write_timeout_secs),
            read: Duration::from_secs(self.read_timeout_secs),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn BookStore> = if args.memory {
        tracing::warn!("Using in-memory store; books are lost on exit");
        Arc::new(MemoryBookStore::new())
    } else {
        let config = StoreConfig::from(&args.store);
        Arc::new(
            MongoBookStore::connect(&config)
                .await
                .context("Failed to create MongoDB client")?,
        )
    };

    let gateway = BookGateway::new(store).with_deadlines(args.deadlines());

    // Abort startup unless the store answers
    gateway
        .ping()
        .await
        .context("Failed to connect to MongoDB")?;
    tracing::info!(database = %args.store.database, "Connected to document store");

    let config = ServerConfig {
        bind_addr: args.bind,
    };

    // Run server (blocks until shutdown)
    run_server(gateway, config).await.context("Server error")?;

    Ok(())
}
