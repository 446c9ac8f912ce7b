//! Durable persistence for the tally ledger: a whole-snapshot JSON file
//! store with atomic write-then-rename semantics.

pub mod file_store;

pub use file_store::FileStore;
