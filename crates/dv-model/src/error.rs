use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown {field}: {value}")]
    UnknownEnumValue { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
