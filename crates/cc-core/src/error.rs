use thiserror::Error;

#[derive(Error, Debug)]
pub enum CondenseError {
    #[error("parse stopped at byte {offset}: {message}")]
    Parse { offset: usize, message: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CondenseError>;
