use crate::Block;
use serde::{Deserialize, Serialize};

/// The full ledger state as written to and read from disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub blocks: Vec<Block>,
    pub pending: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No snapshot has been written yet. Benign: the ledger bootstraps a
    /// genesis block when it sees this during initialization.
    #[error("snapshot not found")]
    NotFound,

    /// The snapshot exists but cannot be decoded.
    #[error("snapshot corrupt: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Durable whole-snapshot persistence. The trait lives in `tally-core` to
/// avoid a circular dependency with the storage crate.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
    fn load(&self) -> Result<Snapshot, StoreError>;
}
