use thiserror::Error;

/// Preconditions that reject a whole generation request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No slots found for period {period}")]
    NoSlots { period: String },

    #[error("No eligible, function-tagged confirmed volunteers for period {period}")]
    NoEligibleVolunteers { period: String },
}

/// Failures reading a period snapshot from the backing store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid record in {file} at line {line}: {reason}")]
    InvalidRecord {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("Missing column {column} in {file}")]
    MissingColumn { file: String, column: String },

    #[error("Unknown period: {0}")]
    UnknownPeriod(String),
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, RosterError>;
