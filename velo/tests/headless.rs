use dispatch::{InputEvent, Key, ScriptedSource};
use velo::app::{run_headless, run_scripted};
use velo::config::AppConfig;

fn quiet_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.display.log_every = 0;
    config
}

#[test]
fn test_headless_run_closes_after_script() {
    let report = run_headless(&quiet_config(), 100).unwrap();
    // 100 idle frames plus the frame that delivered the close.
    assert_eq!(report.summary.iterations, 101);
    assert_eq!(report.steps, 101);
    assert_eq!(report.summary.handled, 1);
    assert!(report.q.iter().all(|v| v.is_finite()));
}

#[test]
fn test_constant_command_from_json_moves_up() {
    let mut config = AppConfig::from_json(
        r#"{
            "control": { "command": { "type": "constant", "linear": [0.0, 0.0, 0.1] } },
            "display": { "headless_step_ms": 10 }
        }"#,
    )
    .unwrap();
    config.display.log_every = 0;

    let report = run_headless(&config, 50).unwrap();
    // The first frame has no elapsed time; the other 50 move 1 mm each.
    let rise = report.end.translation.z - report.start.translation.z;
    assert!((rise - 0.05).abs() < 5e-3);
}

#[test]
fn test_space_pauses_the_command() {
    let mut frames = vec![vec![InputEvent::KeyPressed(Key::Space)]];
    frames.extend(std::iter::repeat_with(Vec::new).take(20));
    let report = run_scripted(&quiet_config(), &mut ScriptedSource::new(frames)).unwrap();
    assert_eq!(report.end, report.start);
}

#[test]
fn test_q_quits_before_script_ends() {
    let mut source = ScriptedSource::new(vec![
        vec![],
        vec![],
        vec![InputEvent::KeyPressed(Key::Char('q'))],
        vec![],
        vec![],
    ]);
    let report = run_scripted(&quiet_config(), &mut source).unwrap();
    assert_eq!(report.summary.iterations, 3);
    assert_eq!(source.remaining(), 2);
}

#[test]
fn test_reset_returns_near_seed() {
    let mut frames: Vec<Vec<InputEvent>> = std::iter::repeat_with(Vec::new).take(10).collect();
    frames.push(vec![
        InputEvent::KeyPressed(Key::Char('r')),
        InputEvent::KeyPressed(Key::Escape),
    ]);
    let report = run_scripted(&quiet_config(), &mut ScriptedSource::new(frames)).unwrap();
    // Only the step taken in the reset frame separates the two poses.
    let dz = report.end.translation.z - report.start.translation.z;
    assert!(dz.abs() < 5e-3, "dz = {dz}");
}

#[test]
fn test_setup_errors_are_reported() {
    let mut config = quiet_config();
    config.control.damping = -1.0;
    let err = run_headless(&config, 1).unwrap_err();
    assert!(format!("{err:#}").contains("damping"));

    assert!(AppConfig::from_json("{ not json").is_err());
}
