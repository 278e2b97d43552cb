use criterion::{black_box, criterion_group, criterion_main, Criterion};

use control::{damped_pseudo_inverse, ConstantTwist, ControlConfig, ControlLoop, DlsSolver, Twist};
use glam::DVec3;
use kinematics::{presets, KinematicProvider};
use nalgebra::DVector;

fn bench_dls_solve(c: &mut Criterion) {
    let arm = presets::seven_dof_arm().unwrap();
    let tip = arm.frame_id(presets::ARM_TIP).unwrap();
    let chain = arm.chain(None, tip).unwrap();
    let mut q = vec![0.0; arm.config_count()];
    let ids = arm.config_ids(&presets::ARM_JOINTS).unwrap();
    arm.config_set(&ids, &presets::ARM_READY, &mut q).unwrap();
    let transforms = arm.forward_kinematics(&q).unwrap();
    let jacobian = arm.jacobian(&chain, transforms.absolute()).unwrap();
    let dx = DVector::from_column_slice(&[0.0, 0.0, 0.5, 0.0, 0.0, 0.0]);
    let solver = DlsSolver::new(1e-6).unwrap();

    c.bench_function("dls_solve_6x7", |b| {
        b.iter(|| solver.solve(black_box(&jacobian), black_box(&dx), 7).unwrap());
    });
    c.bench_function("damped_pseudo_inverse_6x7", |b| {
        b.iter(|| damped_pseudo_inverse(black_box(&jacobian), 1e-2).unwrap());
    });
}

fn bench_control_step(c: &mut Criterion) {
    let arm = presets::seven_dof_arm().unwrap();
    let command = Box::new(ConstantTwist(Twist::linear(DVec3::new(0.0, 0.0, 0.5))));
    let mut control = ControlLoop::new(arm, &ControlConfig::default(), command).unwrap();

    c.bench_function("control_step", |b| {
        b.iter(|| {
            control.reset();
            control.step(0.0, black_box(0.001)).map(|report| report.residual).unwrap()
        });
    });
}

criterion_group!(benches, bench_dls_solve, bench_control_step);
criterion_main!(benches);
