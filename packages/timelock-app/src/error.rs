use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No wallet provider available")]
    WalletUnavailable {},

    #[error("No account connected")]
    NotConnected {},

    #[error("A transaction is already pending")]
    WritePending {},

    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Source verification failed: {0}")]
    VerificationFailed(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
