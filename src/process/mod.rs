use std::fmt;

pub mod signal;
pub mod supervisor;

pub use supervisor::{Outcome, Supervisor};

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    SpawnFailed(String),
    SignalError(String),
    Other(String),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Other(e.to_string())
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => {
                write!(f, "{}: No such file or directory", cmd)
            }
            ProcessError::SpawnFailed(msg) => write!(f, "could not create process: {}", msg),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
            ProcessError::Other(msg) => write!(f, "Other error: {}", msg),
        }
    }
}
