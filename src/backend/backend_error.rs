use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum BackendError {
    Network(String),
    Status(u16),
    Decode(String),
    InvalidUrl(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "Network error: {msg}"),
            BackendError::Status(code) => write!(f, "API error: {code}"),
            BackendError::Decode(msg) => write!(f, "JSON decode error: {msg}"),
            BackendError::InvalidUrl(msg) => write!(f, "Invalid backend URL: {msg}"),
        }
    }
}

impl Error for BackendError {}
