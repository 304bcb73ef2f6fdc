use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown line format: {0}")]
    UnknownFormat(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Unknown output: {0}")]
    UnknownOutput(String),

    #[error("No valid expenses found. Please check your input format.")]
    NoValidExpenses,

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;
