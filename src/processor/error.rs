use thiserror::Error;

/// Faults raised while reducing a stream payload.
///
/// Every variant aborts the whole invocation; no partially filtered block is
/// ever returned alongside an error.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("stream payload does not contain a data frame")]
    MissingFrame,

    #[error("receipt {index} is null")]
    NullReceipt { index: usize },

    #[error("receipt {index} has logs that are not a list")]
    MalformedLogs { index: usize },

    #[error("receipt {index} contains a null log")]
    NullLog { index: usize },

    #[error("data frame has no block")]
    MissingBlock,

    #[error("block has no transaction list")]
    MissingTransactions,

    #[error("transaction {index} is null")]
    NullTransaction { index: usize },
}
