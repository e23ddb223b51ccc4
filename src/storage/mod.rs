//! Storage: the shared SQLite pool and the transcript audit log.

pub mod sqlite_pool;
pub mod transcript;

pub use sqlite_pool::SqlitePoolManager;
pub use transcript::{TranscriptRecord, TranscriptRepository};
