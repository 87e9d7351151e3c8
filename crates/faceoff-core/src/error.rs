use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaceoffError {
    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type FaceoffResult<T> = Result<T, FaceoffError>;
