use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptDiscoveryError {
    DuplicateName { name: String },
    Io { path: String, message: String },
}

impl fmt::Display for ScriptDiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptDiscoveryError::DuplicateName { name } => {
                write!(f, "duplicate script name after normalization: '{name}'")
            }
            ScriptDiscoveryError::Io { path, message } => {
                write!(f, "I/O error while reading '{path}': {message}")
            }
        }
    }
}

impl Error for ScriptDiscoveryError {}
