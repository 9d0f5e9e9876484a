//! Domain model types (pure).

pub mod entry;
pub mod error;

pub use entry::{Entry, EntryId};
pub use error::{AppError, InputError};
