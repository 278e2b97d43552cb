use kinematics::KinematicsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("{what}: expected {expected}, got {actual}")]
    Dimension {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("damping must be finite and positive, got {0}")]
    InvalidDamping(f64),
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f64),
    #[error(transparent)]
    Kinematics(KinematicsError),
}

impl ControlError {
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

    pub(crate) fn check_time_step(dt: f64) -> Result<(), Self> {
        if dt.is_finite() && dt >= 0.0 {
            Ok(())
        } else {
            Err(Self::InvalidTimeStep(dt))
        }
    }
}

// Length mismatches keep one shape whichever layer detects them.
impl From<KinematicsError> for ControlError {
    fn from(err: KinematicsError) -> Self {
        match err {
            KinematicsError::Dimension {
                what,
                expected,
                actual,
            } => Self::Dimension {
                what,
                expected,
                actual,
            },
            other => Self::Kinematics(other),
        }
    }
}
