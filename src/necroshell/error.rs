use crate::save::SaveError;
use crate::shell::parser::ParseError;
use crate::shell::registry::RegistryError;
use crate::shell::tokenizer::TokenizeError;
use thiserror::Error;

/// Umbrella error for the application boundary. Subsystems keep their own
/// error enums; this type exists so `main` and the built-in commands can use
/// a single `Result` alias.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Init error: {0}")]
    Init(String),
}

pub type Result<T> = std::result::Result<T, ShellError>;
