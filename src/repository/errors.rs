use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Record source responded with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Decode error: {0}")]
    DecodeError(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::DecodeError(err.to_string())
        } else {
            RepositoryError::ConnectionError(err.to_string())
        }
    }
}
