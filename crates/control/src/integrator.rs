//! Explicit Euler integration of joint velocities

use kinematics::{KinematicProvider, SubChain};

use crate::error::ControlError;

/// `q + dt * dq`, element-wise. A zero step returns `q` unchanged.
///
/// # Errors
///
/// [`ControlError::InvalidTimeStep`] for a negative or non-finite `dt` and
/// [`ControlError::Dimension`] when `q` and `dq` differ in length.
pub fn integrate(q: &[f64], dq: &[f64], dt: f64) -> Result<Vec<f64>, ControlError> {
    ControlError::check_time_step(dt)?;
    ControlError::check_len("joint velocity", q.len(), dq.len())?;
    if dt == 0.0 {
        return Ok(q.to_vec());
    }
    Ok(q.iter().zip(dq).map(|(&q, &v)| q + dt * v).collect())
}

/// Advance the chain's entries of the full configuration `q` by `dq` over
/// `dt`. Entries outside the chain are not touched.
///
/// # Errors
///
/// Any error from [`integrate`] or from the provider's configuration access.
pub fn advance<P>(model: &P, chain: &SubChain, q: &mut [f64], dq: &[f64], dt: f64) -> Result<(), ControlError>
where
    P: KinematicProvider + ?Sized,
{
    let current = model.config_get(chain.configs(), q)?;
    let next = integrate(&current, dq, dt)?;
    model.config_set(chain.configs(), &next, q)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_step_is_identity() {
        let q = [0.25, -1.5, 3.0];
        let out = integrate(&q, &[1e9, -1e9, 7.0], 0.0).unwrap();
        assert_eq!(out, q.to_vec());
    }

    #[test]
    fn test_rejects_bad_time_step() {
        for dt in [-1e-3, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                integrate(&[0.0], &[1.0], dt),
                Err(ControlError::InvalidTimeStep(_))
            ));
        }
    }

    #[test]
    fn test_rejects_length_mismatch() {
        assert!(matches!(
            integrate(&[0.0, 1.0], &[1.0], 0.1),
            Err(ControlError::Dimension { expected: 2, actual: 1, .. })
        ));
    }
}
