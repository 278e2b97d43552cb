use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    #[error("unknown {kind} '{name}'")]
    NotFound { kind: &'static str, name: String },
    #[error("frame '{0}' is defined more than once")]
    Duplicate(String),
    #[error("frame '{0}' has a zero-length joint axis")]
    InvalidAxis(String),
    #[error("frames form a cycle through '{0}'")]
    Cycle(String),
    #[error("frame '{tip}' is not a descendant of '{root}'")]
    Disconnected { root: String, tip: String },
    #[error("{what}: expected length {expected}, got {actual}")]
    Dimension {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("configuration index {index} out of range for {len} values")]
    IndexOutOfRange { index: usize, len: usize },
}

impl KinematicsError {
    pub(crate) fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::Dimension {
                what,
                expected,
                actual,
            })
        }
    }
}
