// sbm storage layer
// Encoding of the store document and its file on disk.

pub mod codec;
pub mod repository;

pub use repository::{LoadOutcome, Repository};
