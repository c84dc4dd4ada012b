use thiserror::Error;

#[derive(Error, Debug)]
pub enum UrError {
    #[error("Invalid position notation: {0}")]
    InvalidNotation(String),

    #[error("Invalid roll {0}: must be 0-4")]
    InvalidRoll(usize),

    #[error("Invalid position id: {0}")]
    InvalidPositionId(i32),

    #[error("Invalid solution file: {0}")]
    InvalidSolutionFile(String),

    #[error("Invalid export record: {0}")]
    InvalidRecord(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type UrResult<T> = Result<T, UrError>;
