use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ModelResult<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Error {
    #[error("Parse error")]
    ParseError,

    #[error("Reqwest error: {0}")]
    ReqwestError(String),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Serde deserialize error: {0}")]
    SerdeDeserialize(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
