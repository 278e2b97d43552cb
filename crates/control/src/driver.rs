//! # The control loop
//!
//! [`ControlLoop`] owns the configuration vector and, once per display
//! frame, runs: forward kinematics, Jacobian, command, DLS solve, Euler
//! integration, write-back. Everything that can be checked ahead of time
//! (names, chain, Jacobian shape) is checked in [`ControlLoop::new`], so a
//! loop that constructs successfully only fails per step on invalid timing.

use nalgebra::DVector;
use tracing::{debug, error, info, trace};

use dispatch::FrameParams;
use kinematics::{KinematicProvider, Pose, SubChain, TransformSet};

use crate::config::ControlConfig;
use crate::error::ControlError;
use crate::integrator;
use crate::solver::DlsSolver;
use crate::twist::{TaskSpace, Twist, VelocityCommand};

/// What one control step computed.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Joint velocities applied to the chain.
    pub dq: DVector<f64>,
    /// Task velocity produced by `dq`, in task rows.
    pub achieved: DVector<f64>,
    pub residual: f64,
    /// End-effector pose before the update.
    pub end_effector: Pose,
    /// Frame poses before the update.
    pub transforms: TransformSet,
}

pub struct ControlLoop<P> {
    model: P,
    chain: SubChain,
    task: TaskSpace,
    solver: DlsSolver,
    command: Box<dyn VelocityCommand>,
    seed: Vec<f64>,
    q: Vec<f64>,
    paused: bool,
    steps: u64,
    last_report: Option<StepReport>,
}

impl<P: KinematicProvider> ControlLoop<P> {
    /// Resolve frames and joints, seed the configuration and check that the
    /// Jacobian at the seed has the shape the task expects.
    ///
    /// # Errors
    ///
    /// [`ControlError::InvalidDamping`] for a bad damping value, unknown
    /// names surface as [`ControlError::Kinematics`], and shape mismatches as
    /// [`ControlError::Dimension`].
    pub fn new(
        model: P,
        config: &ControlConfig,
        command: Box<dyn VelocityCommand>,
    ) -> Result<Self, ControlError> {
        let solver = DlsSolver::new(config.damping)?;

        let tip = model.frame_id(&config.tip_frame)?;
        let root = config
            .root_frame
            .as_deref()
            .map(|name| model.frame_id(name))
            .transpose()?;
        let chain = model.chain(root, tip)?;

        let mut seed = vec![0.0; model.config_count()];
        if !config.seed.is_empty() {
            let names: Vec<&str> = config.seed.iter().map(|s| s.joint.as_str()).collect();
            let values: Vec<f64> = config.seed.iter().map(|s| s.position).collect();
            let ids = model.config_ids(&names)?;
            model.config_set(&ids, &values, &mut seed)?;
        }

        let transforms = model.forward_kinematics(&seed)?;
        let jacobian = model.jacobian(&chain, transforms.absolute())?;
        ControlError::check_len("jacobian columns", chain.config_count(), jacobian.ncols())?;
        let reduced = config.task.reduce_jacobian(&jacobian)?;
        ControlError::check_len("task rows", config.task.dim(), reduced.nrows())?;

        info!(
            tip = %config.tip_frame,
            active = chain.config_count(),
            total = model.config_count(),
            task = ?config.task,
            damping = config.damping,
            "control loop ready"
        );
        debug!(configs = ?chain.configs(), "active configuration entries");

        Ok(Self {
            model,
            chain,
            task: config.task,
            solver,
            command,
            q: seed.clone(),
            seed,
            paused: false,
            steps: 0,
            last_report: None,
        })
    }
}

impl<P: KinematicProvider> ControlLoop<P> {
    /// Run one control step: `elapsed` seconds since start for the command,
    /// `dt` seconds since the previous step for integration.
    ///
    /// # Errors
    ///
    /// [`ControlError::InvalidTimeStep`] for a negative or non-finite `dt`;
    /// provider errors are passed through.
    pub fn step(&mut self, elapsed: f64, dt: f64) -> Result<&StepReport, ControlError> {
        ControlError::check_time_step(dt)?;

        let transforms = self.model.forward_kinematics(&self.q)?;
        let end = self.chain.end_frame();
        let end_effector = *transforms.absolute_of(end).ok_or(ControlError::Dimension {
            what: "transform set",
            expected: end.index() + 1,
            actual: transforms.len(),
        })?;

        let jacobian = self.model.jacobian(&self.chain, transforms.absolute())?;
        let jacobian = self.task.reduce_jacobian(&jacobian)?;

        let twist = if self.paused {
            Twist::ZERO
        } else {
            self.command.twist(elapsed)
        };
        let dx = self.task.reduce_twist(&twist);

        let solved = self.solver.solve(&jacobian, &dx, self.chain.config_count())?;
        integrator::advance(&self.model, &self.chain, &mut self.q, solved.dq.as_slice(), dt)?;
        self.steps += 1;

        trace!(
            step = self.steps,
            elapsed,
            dt,
            residual = solved.residual,
            z = end_effector.translation.z,
            "control step"
        );

        Ok(&*self.last_report.insert(StepReport {
            dq: solved.dq,
            achieved: solved.achieved,
            residual: solved.residual,
            end_effector,
            transforms,
        }))
    }

    /// Display callback body: step with the frame's timing, and stop the
    /// loop on failure. Always asks for another redraw.
    pub fn on_frame(&mut self, params: &mut FrameParams<'_>) -> bool {
        let elapsed = params.elapsed().as_secs_f64();
        let dt = params.delta().as_secs_f64();
        if let Err(err) = self.step(elapsed, dt).map(|_| ()) {
            error!(%err, step = self.steps, "control step failed");
            params.set_quit();
        }
        true
    }

    /// Return to the seed configuration.
    pub fn reset(&mut self) {
        self.q.clone_from(&self.seed);
        self.last_report = None;
        info!("configuration reset to seed");
    }

    /// Flip between following the command and holding still. Returns the
    /// new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            info!(paused, "command {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The full configuration vector.
    #[must_use]
    pub fn q(&self) -> &[f64] {
        &self.q
    }

    #[must_use]
    pub fn model(&self) -> &P {
        &self.model
    }

    #[must_use]
    pub fn chain(&self) -> &SubChain {
        &self.chain
    }

    #[must_use]
    pub fn task(&self) -> TaskSpace {
        self.task
    }

    /// Steps run since construction.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&StepReport> {
        self.last_report.as_ref()
    }

    /// End-effector pose at the current configuration.
    ///
    /// # Errors
    ///
    /// Provider errors from forward kinematics.
    pub fn end_effector(&self) -> Result<Pose, ControlError> {
        let transforms = self.model.forward_kinematics(&self.q)?;
        let end = self.chain.end_frame();
        transforms.absolute_of(end).copied().ok_or(ControlError::Dimension {
            what: "transform set",
            expected: end.index() + 1,
            actual: transforms.len(),
        })
    }
}

impl<P> std::fmt::Debug for ControlLoop<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlLoop")
            .field("chain", &self.chain)
            .field("task", &self.task)
            .field("solver", &self.solver)
            .field("q", &self.q)
            .field("paused", &self.paused)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}
