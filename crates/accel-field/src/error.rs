use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("weighting configuration error: {0}")]
    Weighting(String),
}

pub type FieldResult<T> = Result<T, FieldError>;
