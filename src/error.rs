use thiserror::Error;

/// Rejected user input. Raised before any session mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown bet kind '{0}'")]
    UnknownKind(String),
    #[error("bet kind '{0}' needs a value")]
    MissingQualifier(&'static str),
    #[error("invalid value '{value}' for {kind} bet")]
    InvalidQualifier { kind: &'static str, value: String },
    #[error("bet amount must be positive")]
    ZeroStake,
    #[error("minimum bet is ${min} (got ${stake})")]
    BelowMinimum { stake: u64, min: u64 },
    #[error("maximum bet is ${max} (got ${stake})")]
    AboveMaximum { stake: u64, max: u64 },
    #[error("insufficient balance: ${balance} available, ${stake} needed")]
    InsufficientBalance { stake: u64, balance: u64 },
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}

/// Failure while saving, loading or exporting.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode data: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("no valid save in {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
