use crate::error::ChainError;
use crate::store::{Snapshot, SnapshotStore, StoreError};
use crate::Block;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// One matched transaction and the block it lives in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub block_index: u64,
    pub transaction: String,
}

struct LedgerState {
    blocks: Vec<Block>,
    pending: Vec<String>,
}

/// The chain of sealed blocks plus the pending transaction pool.
///
/// All public methods are safe for concurrent use: a single reader/writer
/// lock guards the whole state, and writers hold it across both the mutation
/// and the persistence write, so no caller ever observes a half-applied
/// change and the on-disk snapshot always matches a completed operation.
pub struct Ledger<S: SnapshotStore> {
    state: RwLock<LedgerState>,
    store: Option<Arc<S>>,
}

impl<S: SnapshotStore> Ledger<S> {
    /// Restores the ledger from the store, or seals a fresh genesis block
    /// when nothing usable is saved. Never fails: a corrupt snapshot is
    /// logged and discarded in favour of a fresh chain.
    pub fn open(store: Option<Arc<S>>) -> Self {
        if let Some(s) = &store {
            match s.load() {
                Ok(snapshot) if !snapshot.blocks.is_empty() => {
                    info!(
                        blocks = snapshot.blocks.len(),
                        pending = snapshot.pending.len(),
                        "restored ledger snapshot"
                    );
                    return Self {
                        state: RwLock::new(LedgerState {
                            blocks: snapshot.blocks,
                            pending: snapshot.pending,
                        }),
                        store,
                    };
                }
                Ok(_) => warn!("saved snapshot has no blocks, starting fresh"),
                Err(StoreError::NotFound) => {
                    info!("no saved ledger found, sealing genesis block")
                }
                Err(err) => warn!(%err, "could not restore ledger snapshot, starting fresh"),
            }
        }

        let ledger = Self {
            state: RwLock::new(LedgerState {
                blocks: vec![Block::genesis()],
                pending: Vec::new(),
            }),
            store,
        };
        {
            let state = ledger.state.read().expect("ledger lock poisoned");
            ledger.persist(&state);
        }
        ledger
    }

    /// Writes the full state to the store. Failures are logged, not
    /// propagated: the in-memory ledger stays the source of truth.
    fn persist(&self, state: &LedgerState) {
        let Some(store) = &self.store else { return };
        let snapshot = Snapshot {
            blocks: state.blocks.clone(),
            pending: state.pending.clone(),
        };
        if let Err(err) = store.save(&snapshot) {
            warn!(%err, "failed to persist ledger snapshot");
        }
    }

    /// Appends a transaction to the pending pool and persists.
    pub fn submit_transaction(&self, data: &str) -> Result<(), ChainError> {
        if data.trim().is_empty() {
            return Err(ChainError::EmptyTransaction);
        }
        let mut state = self.state.write().expect("ledger lock poisoned");
        state.pending.push(data.to_string());
        self.persist(&state);
        Ok(())
    }

    /// Seals every pending transaction into a new block linked to the chain
    /// tip, appends it, clears the pool, persists, and returns the block.
    ///
    /// The proof-of-work search runs inside the write critical section, so
    /// mining is fully serialized against every other operation.
    pub fn mine_block(&self) -> Result<Block, ChainError> {
        let mut state = self.state.write().expect("ledger lock poisoned");
        if state.pending.is_empty() {
            return Err(ChainError::NothingToMine);
        }

        let transactions = std::mem::take(&mut state.pending);
        let tip = state.blocks.last().expect("chain is never empty");
        let mut block = Block::new(tip.index + 1, transactions, tip.hash.clone());
        block.seal();
        info!(
            index = block.index,
            nonce = block.nonce,
            hash = %block.hash,
            "sealed block"
        );

        state.blocks.push(block.clone());
        self.persist(&state);
        Ok(block)
    }

    /// A copy of the sealed block list, genesis first.
    pub fn chain(&self) -> Vec<Block> {
        self.state
            .read()
            .expect("ledger lock poisoned")
            .blocks
            .clone()
    }

    /// A copy of the pending transaction pool, in submission order.
    pub fn pending(&self) -> Vec<String> {
        self.state
            .read()
            .expect("ledger lock poisoned")
            .pending
            .clone()
    }

    /// Case-insensitive substring search across every transaction in every
    /// sealed block, in block-then-transaction order. Pending transactions
    /// are not searched.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let needle = query.to_lowercase();
        let state = self.state.read().expect("ledger lock poisoned");
        let mut results = Vec::new();
        for block in &state.blocks {
            for tx in &block.transactions {
                if tx.to_lowercase().contains(&needle) {
                    results.push(SearchResult {
                        block_index: block.index,
                        transaction: tx.clone(),
                    });
                }
            }
        }
        results
    }

    /// Verifies proof-of-work and hash linkage for every block after
    /// genesis. Genesis itself is trusted axiomatically.
    pub fn is_valid(&self) -> bool {
        let state = self.state.read().expect("ledger lock poisoned");
        for pair in state.blocks.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            if !cur.verify_seal() || cur.prev_hash != prev.hash {
                return false;
            }
        }
        true
    }
}
