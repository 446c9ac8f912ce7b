/// Rejections for caller-visible ledger operations. Neither variant mutates
/// ledger state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// Submitted transaction text is empty or whitespace-only.
    #[error("transaction data cannot be empty")]
    EmptyTransaction,

    /// Mining was requested while the pending pool is empty.
    #[error("no pending transactions to mine")]
    NothingToMine,
}
