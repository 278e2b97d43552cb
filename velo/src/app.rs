//! # VELO Application Logic
//!
//! Builds the control loop from an [`AppConfig`], wires the key bindings into
//! an [`EventDispatcher`] and runs the display loop against either a scripted
//! headless source or a real window.
//!
//! Key bindings:
//!
//! -   `Escape` / `q`: quit.
//! -   `Space`: pause or resume the velocity command.
//! -   `r`: reset the arm to its seed configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use control::ControlLoop;
use dispatch::{
    EventDispatcher, EventKind, EventSource, FrameParams, Key, LoopSummary, Propagation, ScriptedSource, StepClock,
};
use kinematics::{presets, KinematicProvider, Pose, SceneGraph};

use crate::config::{AppConfig, DisplayOptions};

/// Outcome of one run of the display loop.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub summary: LoopSummary,
    /// Control steps taken.
    pub steps: u64,
    /// End-effector pose at the seed configuration.
    pub start: Pose,
    /// End-effector pose when the loop ended.
    pub end: Pose,
    /// Final configuration vector.
    pub q: Vec<f64>,
}

/// The 7-DOF arm under the configured command.
///
/// # Errors
///
/// Returns an error when the command or the control loop rejects the
/// configuration.
pub fn build_control(config: &AppConfig) -> Result<ControlLoop<SceneGraph>> {
    let arm = presets::seven_dof_arm().context("failed to build the 7-DOF arm")?;
    let command = config.control.command.build().context("invalid velocity command")?;
    ControlLoop::new(arm, &config.control, command).context("failed to set up the control loop")
}

/// Install the application's key bindings.
pub fn bind_controls<P: KinematicProvider + 'static>(dispatcher: &mut EventDispatcher<ControlLoop<P>>) {
    for key in [Key::Escape, Key::Char('q')] {
        dispatcher.bind_key(key, |_: &mut ControlLoop<P>, params| {
            info!("quit requested");
            params.set_quit();
            Propagation::Handled
        });
    }
    dispatcher.bind_key(Key::Space, |control: &mut ControlLoop<P>, _| {
        control.toggle_pause();
        Propagation::Handled
    });
    dispatcher.bind_key(Key::Char('r'), |control: &mut ControlLoop<P>, params| {
        control.reset();
        params.request_update();
        Propagation::Handled
    });
    // Closing always quits, whether or not default processing is enabled.
    dispatcher.bind_event(EventKind::CloseRequested, |_: &mut ControlLoop<P>, params| {
        params.set_quit();
        Propagation::Handled
    });
}

fn display<P: KinematicProvider>(
    control: &mut ControlLoop<P>,
    options: &DisplayOptions,
    params: &mut FrameParams<'_>,
) -> bool {
    let redraw = control.on_frame(params);
    let step = control.steps();
    if options.log_every > 0 && step % options.log_every == 0 {
        if let Some(report) = control.last_report() {
            let p = report.end_effector.translation;
            info!(
                step,
                x = p.x,
                y = p.y,
                z = p.z,
                residual = report.residual,
                "end effector"
            );
        }
    }
    redraw
}

/// Run the display loop over `source` until something quits.
///
/// # Errors
///
/// Returns an error when the control loop cannot be set up.
pub fn run_with_source<W>(
    config: &AppConfig,
    mut dispatcher: EventDispatcher<ControlLoop<SceneGraph>>,
    source: &mut W,
) -> Result<RunReport>
where
    W: EventSource + ?Sized,
{
    let mut control = build_control(config)?;
    let start = control.end_effector()?;
    bind_controls(&mut dispatcher);

    let summary = dispatcher.run(source, &config.display, &mut control, display);

    let end = control.end_effector()?;
    info!(
        steps = control.steps(),
        iterations = summary.iterations,
        dz = end.translation.z - start.translation.z,
        "run complete"
    );
    Ok(RunReport {
        summary,
        steps: control.steps(),
        start,
        end,
        q: control.q().to_vec(),
    })
}

/// Replay `source` with a fixed-step clock.
///
/// # Errors
///
/// Returns an error when the control loop cannot be set up.
pub fn run_scripted(config: &AppConfig, source: &mut ScriptedSource) -> Result<RunReport> {
    let clock = StepClock::new(Duration::from_millis(config.display.headless_step_ms));
    let dispatcher = EventDispatcher::with_clock(config.dispatch.clone(), clock);
    run_with_source(config, dispatcher, source)
}

/// Run `frames` idle frames without a window, then close.
///
/// # Errors
///
/// Returns an error when the control loop cannot be set up.
pub fn run_headless(config: &AppConfig, frames: usize) -> Result<RunReport> {
    info!(frames, step_ms = config.display.headless_step_ms, "starting headless run");
    run_scripted(config, &mut ScriptedSource::idle(frames))
}

/// Open a window and run until it is closed or `q` is pressed.
///
/// # Errors
///
/// Returns an error when the window or the control loop cannot be set up.
#[cfg(feature = "window")]
pub fn run_windowed(config: &AppConfig) -> Result<RunReport> {
    let mut source = window::WinitSource::new(&config.window).context("failed to open window")?;
    let dispatcher = EventDispatcher::new(config.dispatch.clone());
    run_with_source(config, dispatcher, &mut source)
}

/// # Errors
///
/// Always; this build has no window support.
#[cfg(not(feature = "window"))]
pub fn run_windowed(_config: &AppConfig) -> Result<RunReport> {
    anyhow::bail!("built without the `window` feature; use --headless")
}
