use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate canonical field: {0}")]
    DuplicateField(String),
    #[error("canonical field with empty identifier")]
    EmptyFieldId,
}

pub type Result<T> = std::result::Result<T, ModelError>;
