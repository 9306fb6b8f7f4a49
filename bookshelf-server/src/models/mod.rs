//! Domain models with validation at construction
//!
//! Path input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod book;
pub mod validation;
pub mod year;

pub use book::{Book, BookId};
pub use validation::ValidationError;
pub use year::ReleaseYear;
