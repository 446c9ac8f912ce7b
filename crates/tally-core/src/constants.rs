pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;

/// Required count of leading zero hex characters in a sealed block hash.
pub const DIFFICULTY: usize = 3;

/// Sentinel previous-hash for the genesis block: 64 zero hex characters.
pub const GENESIS_PREV_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Fixed bootstrap transaction sealed into block 0 on first boot.
pub const GENESIS_TRANSACTION: &str = "l22-6559";
