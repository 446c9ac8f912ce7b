//! Core engine of the tally ledger: Merkle commitment of transaction lists,
//! proof-of-work block sealing, and the concurrency-safe chain that owns the
//! sealed blocks and the pending pool. Durability is delegated to a
//! [`store::SnapshotStore`] implementation, usually the file store crate.

pub mod block;
pub mod chain;
pub mod constants;
pub mod error;
pub mod merkle;
pub mod store;

pub use block::Block;
pub use chain::{Ledger, SearchResult};
pub use error::ChainError;
pub use store::{Snapshot, SnapshotStore, StoreError};
