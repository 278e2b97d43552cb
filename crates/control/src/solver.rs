//! Damped least squares
//!
//! Joint velocities `dq` that minimize `‖J·dq − dx‖² + λ²‖dq‖²`. The damping
//! term keeps `dq` bounded as `J` loses rank, at the cost of tracking error
//! near singular configurations.
//!
//! The normal equations are formed on the smaller side of `J` and solved by
//! Cholesky while `λ²` is large enough against `‖J‖²` for that system to be
//! well conditioned. Otherwise, or if the factorization fails, the solution
//! comes from the SVD with each singular value filtered as `σ / (σ² + λ²)`.
//! Singular values at rounding level count as zero.

use nalgebra::{DMatrix, DVector};
use tracing::trace;

use crate::error::ControlError;

/// Result of one solve.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveOutput {
    /// Joint velocities for the active degrees of freedom.
    pub dq: DVector<f64>,
    /// The task velocity these joint velocities actually produce, `J·dq`.
    pub achieved: DVector<f64>,
    /// `‖J·dq − dx‖`.
    pub residual: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DlsSolver {
    damping: f64,
}

impl DlsSolver {
    /// # Errors
    ///
    /// [`ControlError::InvalidDamping`] unless `damping` is finite and positive.
    pub fn new(damping: f64) -> Result<Self, ControlError> {
        check_damping(damping)?;
        Ok(Self { damping })
    }

    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Solve for the joint velocities of `active` degrees of freedom.
    ///
    /// # Errors
    ///
    /// [`ControlError::Dimension`] when `jacobian` does not have `active`
    /// columns or `dx` does not match its row count.
    pub fn solve(
        &self,
        jacobian: &DMatrix<f64>,
        dx: &DVector<f64>,
        active: usize,
    ) -> Result<SolveOutput, ControlError> {
        ControlError::check_len("jacobian columns", active, jacobian.ncols())?;
        ControlError::check_len("task velocity", jacobian.nrows(), dx.len())?;

        let dq = damped_least_squares(jacobian, dx, self.damping);
        let achieved = jacobian * &dq;
        let residual = (&achieved - dx).norm();
        trace!(residual, dq_norm = dq.norm(), "dls solve");

        Ok(SolveOutput {
            dq,
            achieved,
            residual,
        })
    }
}

fn check_damping(damping: f64) -> Result<(), ControlError> {
    if damping.is_finite() && damping > 0.0 {
        Ok(())
    } else {
        Err(ControlError::InvalidDamping(damping))
    }
}

fn all_finite(values: &DVector<f64>) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// Cholesky on `JJᵀ + λ²I` (or `JᵀJ + λ²I`) loses about `‖J‖² / λ²` of
/// relative precision; past `1 / √ε` the null-space error dominates `dq`.
fn normal_equations_conditioned(jacobian: &DMatrix<f64>, lambda2: f64) -> bool {
    lambda2 > f64::EPSILON.sqrt() * jacobian.norm_squared()
}

/// `U`, the filtered singular values and `Vᵀ`.
#[allow(clippy::cast_precision_loss)]
fn filtered_svd(jacobian: &DMatrix<f64>, lambda2: f64) -> Option<(DMatrix<f64>, DVector<f64>, DMatrix<f64>)> {
    let svd = jacobian.clone().svd(true, true);
    let cutoff = f64::EPSILON * jacobian.nrows().max(jacobian.ncols()) as f64 * svd.singular_values.max();
    let filter = svd.singular_values.map(|sigma| {
        if sigma > cutoff {
            sigma / (sigma * sigma + lambda2)
        } else {
            0.0
        }
    });
    Some((svd.u?, filter, svd.v_t?))
}

fn damped_least_squares(jacobian: &DMatrix<f64>, dx: &DVector<f64>, damping: f64) -> DVector<f64> {
    let (rows, cols) = jacobian.shape();
    if rows == 0 || cols == 0 {
        return DVector::zeros(cols);
    }
    let lambda2 = damping * damping;
    if !normal_equations_conditioned(jacobian, lambda2) {
        trace!(lambda2, "normal equations ill conditioned, using svd");
        return svd_least_squares(jacobian, dx, lambda2);
    }

    let dq = if cols <= rows {
        // (JᵀJ + λ²I) dq = Jᵀdx
        let normal = jacobian.tr_mul(jacobian) + DMatrix::identity(cols, cols) * lambda2;
        normal.cholesky().map(|chol| chol.solve(&jacobian.tr_mul(dx)))
    } else {
        // dq = Jᵀ (JJᵀ + λ²I)⁻¹ dx
        let normal = jacobian * jacobian.transpose() + DMatrix::identity(rows, rows) * lambda2;
        normal.cholesky().map(|chol| jacobian.tr_mul(&chol.solve(dx)))
    };

    match dq {
        Some(dq) if all_finite(&dq) => dq,
        _ => {
            trace!("cholesky failed, using svd");
            svd_least_squares(jacobian, dx, lambda2)
        }
    }
}

fn svd_least_squares(jacobian: &DMatrix<f64>, dx: &DVector<f64>, lambda2: f64) -> DVector<f64> {
    let Some((u, filter, v_t)) = filtered_svd(jacobian, lambda2) else {
        return DVector::zeros(jacobian.ncols());
    };
    v_t.tr_mul(&u.tr_mul(dx).component_mul(&filter))
}

/// The damped pseudo-inverse `J* = Jᵀ (JJᵀ + λ²I)⁻¹`, shaped `cols × rows`.
///
/// # Errors
///
/// [`ControlError::InvalidDamping`] unless `damping` is finite and positive.
pub fn damped_pseudo_inverse(jacobian: &DMatrix<f64>, damping: f64) -> Result<DMatrix<f64>, ControlError> {
    check_damping(damping)?;
    let (rows, cols) = jacobian.shape();
    if rows == 0 || cols == 0 {
        return Ok(DMatrix::zeros(cols, rows));
    }
    let lambda2 = damping * damping;

    if normal_equations_conditioned(jacobian, lambda2) {
        let normal = jacobian * jacobian.transpose() + DMatrix::identity(rows, rows) * lambda2;
        // (JJᵀ + λ²I) is symmetric, so J* = ((JJᵀ + λ²I)⁻¹ J)ᵀ.
        if let Some(chol) = normal.cholesky() {
            let pinv = chol.solve(jacobian).transpose();
            if pinv.iter().all(|v| v.is_finite()) {
                return Ok(pinv);
            }
        }
    }

    let Some((u, filter, v_t)) = filtered_svd(jacobian, lambda2) else {
        return Ok(DMatrix::zeros(cols, rows));
    };
    Ok(v_t.transpose() * DMatrix::from_diagonal(&filter) * u.transpose())
}

/// `dq = J*·dx + (I − J*·J)·dq_ref`.
///
/// The second term moves the joints toward `dq_ref` only inside the null
/// space of `J`, leaving the task velocity (up to damping) unaffected.
///
/// # Errors
///
/// [`ControlError::Dimension`] when the shapes of `jacobian`, `pseudo_inverse`,
/// `dx` and `dq_ref` are inconsistent.
pub fn solve_with_nullspace(
    jacobian: &DMatrix<f64>,
    pseudo_inverse: &DMatrix<f64>,
    dx: &DVector<f64>,
    dq_ref: &DVector<f64>,
) -> Result<DVector<f64>, ControlError> {
    let (rows, cols) = jacobian.shape();
    ControlError::check_len("pseudo-inverse rows", cols, pseudo_inverse.nrows())?;
    ControlError::check_len("pseudo-inverse columns", rows, pseudo_inverse.ncols())?;
    ControlError::check_len("task velocity", rows, dx.len())?;
    ControlError::check_len("reference joint velocity", cols, dq_ref.len())?;

    let task = pseudo_inverse * dx;
    let projected = dq_ref - pseudo_inverse * (jacobian * dq_ref);
    Ok(task + projected)
}
