use accel_field::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("acceleration configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Field(#[from] FieldError),
}

pub type SelectResult<T> = Result<T, SelectError>;
