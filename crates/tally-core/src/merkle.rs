use sha2::{Digest, Sha256};

fn hash_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Reduces an ordered list of transactions to a single Merkle root hash.
///
/// Leaves hash the raw transaction bytes; each parent hashes the
/// concatenation of its children's hex digests. An odd level duplicates its
/// last node. Empty input yields the empty string, meaning "no commitment".
pub fn build_root(transactions: &[String]) -> String {
    if transactions.is_empty() {
        return String::new();
    }

    let mut level: Vec<String> = transactions
        .iter()
        .map(|tx| hash_hex(tx.as_bytes()))
        .collect();

    while level.len() > 1 {
        if level.len() % 2 != 0 {
            level.push(level[level.len() - 1].clone());
        }
        level = level
            .chunks(2)
            .map(|pair| {
                let combined = format!("{}{}", pair[0], pair[1]);
                hash_hex(combined.as_bytes())
            })
            .collect();
    }
    level.remove(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HASH_HEX_SIZE;

    fn txs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input_yields_empty_root() {
        assert_eq!(build_root(&[]), "");
    }

    #[test]
    fn single_tx_root_is_its_leaf_hash() {
        let root = build_root(&txs(&["pay rent"]));
        assert_eq!(root, hash_hex(b"pay rent"));
    }

    #[test]
    fn two_tx_root_combines_leaf_digests() {
        let list = txs(&["a", "b"]);
        let left = hash_hex(b"a");
        let right = hash_hex(b"b");
        let expected = hash_hex(format!("{left}{right}").as_bytes());
        assert_eq!(build_root(&list), expected);
    }

    #[test]
    fn odd_count_duplicates_last_leaf() {
        // With three leaves the last is paired with itself, so the result
        // must equal a four-leaf tree where the third entry is repeated.
        let three = build_root(&txs(&["a", "b", "c"]));
        let four = build_root(&txs(&["a", "b", "c", "c"]));
        assert_eq!(three, four);
    }

    #[test]
    fn root_is_deterministic() {
        let list = txs(&["tx-1", "tx-2", "tx-3", "tx-4", "tx-5"]);
        assert_eq!(build_root(&list), build_root(&list));
    }

    #[test]
    fn reordering_changes_the_root() {
        let forward = build_root(&txs(&["first", "second"]));
        let reversed = build_root(&txs(&["second", "first"]));
        assert_ne!(forward, reversed);
    }

    #[test]
    fn root_is_a_hex_digest() {
        let root = build_root(&txs(&["anything"]));
        assert_eq!(root.len(), HASH_HEX_SIZE);
        assert!(root.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn many_leaves_reduce_to_one_root() {
        let list: Vec<String> = (0..1000).map(|i| format!("tx-{i}")).collect();
        let root = build_root(&list);
        assert_eq!(root.len(), HASH_HEX_SIZE);
    }
}
