pub mod goodreads;
pub mod record;
pub mod shelf;

pub use goodreads::{GoodreadsRow, TARGET_HEADERS};
pub use record::{Record, FIELD_COUNT, HEADERS};
