//! Subset access to configuration vectors

use crate::error::KinematicsError;
use crate::provider::ConfigId;

/// Read the values at `ids` out of the full configuration `q`, in `ids` order.
///
/// # Errors
///
/// Returns [`KinematicsError::IndexOutOfRange`] when an id does not address
/// an entry of `q`.
pub fn gather(ids: &[ConfigId], q: &[f64]) -> Result<Vec<f64>, KinematicsError> {
    ids.iter()
        .map(|&index| {
            q.get(index)
                .copied()
                .ok_or(KinematicsError::IndexOutOfRange { index, len: q.len() })
        })
        .collect()
}

/// Write `values[i]` into `q[ids[i]]`. Entries of `q` not named by `ids` are
/// left untouched.
///
/// Nothing is written unless every id is in range.
///
/// # Errors
///
/// Returns [`KinematicsError::Dimension`] when `ids` and `values` differ in
/// length and [`KinematicsError::IndexOutOfRange`] for an invalid id.
pub fn scatter(ids: &[ConfigId], values: &[f64], q: &mut [f64]) -> Result<(), KinematicsError> {
    KinematicsError::check_len("configuration subset", ids.len(), values.len())?;
    if let Some(&index) = ids.iter().find(|&&index| index >= q.len()) {
        return Err(KinematicsError::IndexOutOfRange { index, len: q.len() });
    }
    for (&index, &value) in ids.iter().zip(values) {
        q[index] = value;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_follows_id_order() {
        let q = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(gather(&[3, 1], &q).unwrap(), vec![3.0, 1.0]);
    }

    #[test]
    fn test_scatter_leaves_other_entries() {
        let mut q = [0.5, -1.25, 7.0, f64::MIN_POSITIVE];
        let before = q;
        scatter(&[1], &[9.0], &mut q).unwrap();
        assert_eq!(q[1], 9.0);
        for i in [0, 2, 3] {
            assert_eq!(q[i].to_bits(), before[i].to_bits());
        }
    }

    #[test]
    fn test_scatter_out_of_range_writes_nothing() {
        let mut q = [0.0; 3];
        let err = scatter(&[0, 5], &[1.0, 2.0], &mut q).unwrap_err();
        assert_eq!(err, KinematicsError::IndexOutOfRange { index: 5, len: 3 });
        assert_eq!(q, [0.0; 3]);
    }

    #[test]
    fn test_scatter_length_mismatch() {
        let mut q = [0.0; 3];
        assert!(matches!(
            scatter(&[0, 1], &[1.0], &mut q),
            Err(KinematicsError::Dimension { expected: 2, actual: 1, .. })
        ));
    }
}
