use crate::constants::{DIFFICULTY, GENESIS_PREV_HASH, GENESIS_TRANSACTION};
use crate::merkle;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// One unit of the chain. Field order matches the on-disk JSON schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub timestamp: u64,
    pub transactions: Vec<String>,
    pub merkle_root: String,
    pub prev_hash: String,
    pub hash: String,
    pub nonce: u64,
    pub difficulty: usize,
}

impl Block {
    /// Builds an unsealed block: timestamp fixed now, Merkle root committed,
    /// nonce at 0, hash empty until `seal` runs.
    pub fn new(index: u64, transactions: Vec<String>, prev_hash: String) -> Self {
        let merkle_root = merkle::build_root(&transactions);
        Self {
            index,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time went backwards")
                .as_secs(),
            transactions,
            merkle_root,
            prev_hash,
            hash: String::new(),
            nonce: 0,
            difficulty: DIFFICULTY,
        }
    }

    /// SHA-256 over the concatenated header fields and the current nonce.
    pub fn compute_hash(&self) -> String {
        let record = format!(
            "{}{}{}{}{}",
            self.index, self.timestamp, self.merkle_root, self.prev_hash, self.nonce
        );
        let mut hasher = Sha256::new();
        hasher.update(record.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Proof-of-work: increments the nonce until the hash carries the
    /// required zero prefix. Blocking and unbounded; expected work grows
    /// sixteen-fold per difficulty step.
    pub fn seal(&mut self) {
        let prefix = "0".repeat(self.difficulty);
        loop {
            self.hash = self.compute_hash();
            if self.hash.starts_with(&prefix) {
                break;
            }
            self.nonce = self.nonce.wrapping_add(1);
        }
    }

    /// True when the stored hash matches a fresh recomputation and satisfies
    /// the block's recorded difficulty.
    pub fn verify_seal(&self) -> bool {
        self.hash == self.compute_hash() && self.hash.starts_with(&"0".repeat(self.difficulty))
    }

    /// The sealed first block: sentinel prev-hash, fixed bootstrap
    /// transaction, standard difficulty.
    pub fn genesis() -> Self {
        let mut block = Block::new(
            0,
            vec![GENESIS_TRANSACTION.to_string()],
            GENESIS_PREV_HASH.to_string(),
        );
        block.seal();
        block
    }
}
