use thiserror::Error;

pub type BindResult<T> = Result<T, BindError>;

#[derive(Error, Debug)]
pub enum BindError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),
}
