use control::{ControlError, DlsSolver};
use nalgebra::{DMatrix, DVector};

fn well_conditioned() -> DMatrix<f64> {
    DMatrix::from_row_slice(3, 3, &[2.0, 0.3, -0.1, 0.4, 1.5, 0.2, -0.3, 0.1, 1.8])
}

#[test]
fn test_converges_to_exact_solution_as_damping_vanishes() {
    let jacobian = well_conditioned();
    let dx = DVector::from_column_slice(&[0.5, -0.25, 1.0]);
    let exact = jacobian.clone().try_inverse().unwrap() * &dx;

    let mut previous_error = f64::INFINITY;
    for damping in [1e-1, 1e-2, 1e-3, 1e-6] {
        let dq = DlsSolver::new(damping).unwrap().solve(&jacobian, &dx, 3).unwrap().dq;
        let error = (&dq - &exact).norm();
        assert!(error <= previous_error, "error grew at damping {damping}");
        previous_error = error;
    }
    assert!(previous_error < 1e-9);
}

#[test]
fn test_rank_deficient_velocity_is_bounded_and_grows_as_damping_drops() {
    // Rank one: both columns identical.
    let jacobian = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
    let dx = DVector::from_column_slice(&[1.0, -0.5]);

    let mut previous = 0.0;
    for damping in [1.0, 1e-1, 1e-2, 1e-4, 1e-8] {
        let out = DlsSolver::new(damping).unwrap().solve(&jacobian, &dx, 2).unwrap();
        let norm = out.dq.norm();
        assert!(out.dq.iter().all(|v| v.is_finite()));
        assert!(norm <= dx.norm() / (2.0 * damping) + 1e-12);
        assert!(norm + 1e-9 >= previous, "norm shrank at damping {damping}");
        previous = norm;
    }
    // The limit is the minimum-norm least squares solution [0.125, 0.125].
    assert!((previous - 0.125 * 2.0_f64.sqrt()).abs() < 1e-6);
}

#[test]
fn test_fully_singular_configuration_is_not_an_error() {
    let jacobian = DMatrix::<f64>::zeros(6, 7);
    let dx = DVector::from_element(6, 0.5);
    let out = DlsSolver::new(1e-6).unwrap().solve(&jacobian, &dx, 7).unwrap();
    assert_eq!(out.dq, DVector::zeros(7));
    assert_eq!(out.achieved, DVector::zeros(6));
}

#[test]
fn test_dimension_mismatches_are_reported() {
    let solver = DlsSolver::new(1e-3).unwrap();
    let jacobian = DMatrix::<f64>::zeros(6, 7);

    let err = solver.solve(&jacobian, &DVector::zeros(6), 6).unwrap_err();
    assert_eq!(
        err,
        ControlError::Dimension {
            what: "jacobian columns",
            expected: 6,
            actual: 7
        }
    );

    let err = solver.solve(&jacobian, &DVector::zeros(3), 7).unwrap_err();
    assert!(matches!(err, ControlError::Dimension { expected: 6, actual: 3, .. }));
}

#[test]
fn test_solve_is_deterministic() {
    let jacobian = DMatrix::from_fn(6, 7, |r, c| ((r + 1) as f64 * 0.37 + c as f64 * 1.3).sin());
    let dx = DVector::from_column_slice(&[0.0, 0.0, 0.5, 0.1, 0.0, -0.2]);
    let solver = DlsSolver::new(1e-6).unwrap();
    let a = solver.solve(&jacobian, &dx, 7).unwrap();
    let b = solver.solve(&jacobian, &dx, 7).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_achieved_twist_tracks_command_when_redundant() {
    // Identity plus a skew-symmetric part keeps the leading block invertible.
    let jacobian = DMatrix::from_fn(6, 7, |r, c| match (r, c) {
        _ if r == c => 1.0,
        (_, 6) => 0.5,
        _ => 0.1 * (r as f64 - c as f64),
    });
    let dx = DVector::from_column_slice(&[0.0, 0.0, 0.5, 0.0, 0.0, 0.0]);
    let out = DlsSolver::new(1e-6).unwrap().solve(&jacobian, &dx, 7).unwrap();
    assert!((&out.achieved - &dx).norm() < 1e-6);
    assert!(out.residual < 1e-6);
}

/// An orthogonal `n × n` matrix from the QR factorization of a dense one.
fn orthogonal(n: usize, seed: f64) -> DMatrix<f64> {
    DMatrix::from_fn(n, n, |r, c| {
        let diagonal = if r == c { 2.0 } else { 0.0 };
        diagonal + ((r * n + c) as f64 * 0.731 + seed).sin()
    })
        .qr()
        .q()
}

/// `J = U Σ Vᵀ` with a zero singular value, and the damped solution built
/// directly from those factors.
fn rank_deficient(
    rows: usize,
    cols: usize,
    sigma: &[f64],
) -> (DMatrix<f64>, impl Fn(&DVector<f64>, f64) -> DVector<f64>) {
    let k = sigma.len();
    let u = orthogonal(rows, 0.3).columns(0, k).into_owned();
    let v = orthogonal(cols, 1.1).columns(0, k).into_owned();
    let sigma = DVector::from_column_slice(sigma);
    let jacobian = &u * DMatrix::from_diagonal(&sigma) * v.transpose();
    let reference = move |dx: &DVector<f64>, damping: f64| {
        let filter = sigma.map(|s| s / (s * s + damping * damping));
        &v * (u.tr_mul(dx).component_mul(&filter))
    };
    (jacobian, reference)
}

#[test]
fn test_small_damping_on_rank_deficient_jacobian_matches_svd_filter() {
    let dx = DVector::from_column_slice(&[0.1, -0.2, 0.5, 0.05, 0.3, -0.1]);
    let cases = [
        rank_deficient(6, 4, &[3.0, 1.5, 0.7, 0.0]),
        rank_deficient(6, 7, &[2.5, 1.2, 0.9, 0.6, 0.3, 0.0]),
    ];
    for (jacobian, reference) in &cases {
        for damping in [1e-6, 1e-7, 1e-8] {
            let dq = DlsSolver::new(damping)
                .unwrap()
                .solve(jacobian, &dx, jacobian.ncols())
                .unwrap()
                .dq;
            let expected = reference(&dx, damping);
            let error = (&dq - &expected).norm();
            assert!(error < 1e-9, "{:?} at damping {damping}: error {error}", jacobian.shape());
            assert!(dq.norm() < 2.0 * expected.norm());
        }
    }
}
