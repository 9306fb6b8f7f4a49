//! bookshelf-server: HTTP CRUD service for book records
//!
//! Books live in a document store reached through a deadline-bounded
//! gateway; handlers parse the route and body, call the gateway, and
//! render JSON. See `http::routes::books` for the endpoint table.

pub mod db;
pub mod http;
pub mod models;

pub use db::{BookGateway, BookStore, Deadlines, MemoryBookStore, MongoBookStore, StoreConfig};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use models::{Book, BookId, ReleaseYear};
