//! Error types for the game math crate.

/// Errors that can occur in ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Experience only flows forward; negative deposits are rejected.
    #[error("negative experience amount: {0}")]
    NegativeAmount(i64),
}

/// Convenience result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
