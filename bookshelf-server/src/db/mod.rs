//! Store gateway - contract, backends, and deadline enforcement
//!
//! # Design Principles
//!
//! - Handlers see `BookGateway` only, never a driver type
//! - One shared client per process; the driver owns its connection pool
//! - Every call carries a deadline; expiry is a transient failure

pub mod gateway;
pub mod memory;
pub mod mongo;
pub mod store;

pub use gateway::{BookGateway, Deadlines, READ_DEADLINE, WRITE_DEADLINE};
pub use memory::MemoryBookStore;
pub use mongo::{MongoBookStore, StoreConfig};
pub use store::{
    BookField, BookFilter, BookStore, Condition, DeleteOutcome, FilterValue, InsertOutcome,
    ReplaceOutcome, StoreError,
};
