//! Task-space velocity commands
//!
//! A [`Twist`] is always six components, linear then angular. The
//! [`TaskSpace`] picks which of those rows a controller actually tracks, and a
//! [`VelocityCommand`] produces a twist for a given time since start.

use std::f64::consts::TAU;

use glam::DVec3;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use kinematics::TWIST_DIM;

use crate::error::ControlError;

/// Spatial velocity: linear (m/s) then angular (rad/s), world frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Twist {
    pub linear: DVec3,
    pub angular: DVec3,
}

impl Twist {
    pub const ZERO: Self = Self {
        linear: DVec3::ZERO,
        angular: DVec3::ZERO,
    };

    #[must_use]
    pub const fn new(linear: DVec3, angular: DVec3) -> Self {
        Self { linear, angular }
    }

    #[must_use]
    pub const fn linear(linear: DVec3) -> Self {
        Self::new(linear, DVec3::ZERO)
    }

    #[must_use]
    pub const fn angular(angular: DVec3) -> Self {
        Self::new(DVec3::ZERO, angular)
    }

    #[must_use]
    pub fn from_array(values: [f64; TWIST_DIM]) -> Self {
        Self::new(
            DVec3::new(values[0], values[1], values[2]),
            DVec3::new(values[3], values[4], values[5]),
        )
    }

    #[must_use]
    pub fn to_array(&self) -> [f64; TWIST_DIM] {
        let [vx, vy, vz] = self.linear.to_array();
        let [wx, wy, wz] = self.angular.to_array();
        [vx, vy, vz, wx, wy, wz]
    }

    #[must_use]
    pub fn to_vector(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.to_array())
    }
}

/// Which rows of the spatial Jacobian a task constrains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSpace {
    /// All six rows.
    #[default]
    Full,
    /// The three linear rows.
    Position,
    /// The three angular rows.
    Orientation,
}

impl TaskSpace {
    /// Number of task rows.
    #[must_use]
    pub const fn dim(self) -> usize {
        match self {
            TaskSpace::Full => TWIST_DIM,
            TaskSpace::Position | TaskSpace::Orientation => 3,
        }
    }

    const fn first_row(self) -> usize {
        match self {
            TaskSpace::Full | TaskSpace::Position => 0,
            TaskSpace::Orientation => 3,
        }
    }

    /// Keep only the task rows of a full spatial Jacobian.
    ///
    /// # Errors
    ///
    /// [`ControlError::Dimension`] when `jacobian` does not have six rows.
    pub fn reduce_jacobian(self, jacobian: &DMatrix<f64>) -> Result<DMatrix<f64>, ControlError> {
        ControlError::check_len("jacobian rows", TWIST_DIM, jacobian.nrows())?;
        if self == TaskSpace::Full {
            return Ok(jacobian.clone());
        }
        Ok(jacobian.rows(self.first_row(), self.dim()).into_owned())
    }

    #[must_use]
    pub fn reduce_twist(self, twist: &Twist) -> DVector<f64> {
        let values = twist.to_array();
        let start = self.first_row();
        DVector::from_column_slice(&values[start..start + self.dim()])
    }
}

/// Produces the commanded twist at `elapsed` seconds since the loop started.
pub trait VelocityCommand {
    fn twist(&mut self, elapsed: f64) -> Twist;
}

impl<F> VelocityCommand for F
where
    F: FnMut(f64) -> Twist,
{
    fn twist(&mut self, elapsed: f64) -> Twist {
        self(elapsed)
    }
}

/// The same twist at every instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantTwist(pub Twist);

impl VelocityCommand for ConstantTwist {
    fn twist(&mut self, _elapsed: f64) -> Twist {
        self.0
    }
}

/// A cosine feed-forward along one twist component:
/// `amplitude * cos(2π * frequency * t)`.
///
/// Pure feed-forward, so the end effector drifts over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillatingTwist {
    component: usize,
    amplitude: f64,
    frequency: f64,
}

impl OscillatingTwist {
    /// # Errors
    ///
    /// [`ControlError::Dimension`] when `component` is not a twist row.
    pub fn new(component: usize, amplitude: f64, frequency: f64) -> Result<Self, ControlError> {
        if component >= TWIST_DIM {
            return Err(ControlError::Dimension {
                what: "twist component",
                expected: TWIST_DIM,
                actual: component,
            });
        }
        Ok(Self {
            component,
            amplitude,
            frequency,
        })
    }

    /// Half a metre per second along world Z, once per second.
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            component: 2,
            amplitude: 0.5,
            frequency: 1.0,
        }
    }
}

impl VelocityCommand for OscillatingTwist {
    fn twist(&mut self, elapsed: f64) -> Twist {
        let mut values = [0.0; TWIST_DIM];
        values[self.component] = self.amplitude * (TAU * self.frequency * elapsed).cos();
        Twist::from_array(values)
    }
}

/// Serializable choice of command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandSpec {
    Constant {
        #[serde(default)]
        linear: [f64; 3],
        #[serde(default)]
        angular: [f64; 3],
    },
    Oscillating {
        component: usize,
        amplitude: f64,
        frequency: f64,
    },
}

impl CommandSpec {
    /// # Errors
    ///
    /// [`ControlError::Dimension`] for an oscillating command on a
    /// component outside the twist.
    pub fn build(&self) -> Result<Box<dyn VelocityCommand>, ControlError> {
        let command: Box<dyn VelocityCommand> = match *self {
            CommandSpec::Constant { linear, angular } => Box::new(ConstantTwist(Twist::new(
                DVec3::from_array(linear),
                DVec3::from_array(angular),
            ))),
            CommandSpec::Oscillating {
                component,
                amplitude,
                frequency,
            } => Box::new(OscillatingTwist::new(component, amplitude, frequency)?),
        };
        Ok(command)
    }
}

impl Default for CommandSpec {
    fn default() -> Self {
        CommandSpec::Oscillating {
            component: 2,
            amplitude: 0.5,
            frequency: 1.0,
        }
    }
}
