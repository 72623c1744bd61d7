//! Signed axis resolution.
//!
//! Losses are configured with signed axes so that `-1` can name the last axis
//! regardless of the rank of the tensor the loss is later applied to.

use thiserror::Error;

/// Error returned when a signed axis cannot be resolved against a tensor rank.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisError {
    /// The axis lies outside `[-rank, rank)`.
    #[error("axis {axis} is out of range for a tensor of rank {rank}")]
    OutOfRange {
        /// The requested axis.
        axis: isize,
        /// The rank of the tensor.
        rank: usize,
    },
}

/// Resolve a signed axis against `rank`.
///
/// Non-negative axes are returned unchanged, negative axes count from the end
/// (`-1` is the last axis).
///
/// # Errors
/// Returns [`AxisError::OutOfRange`] when the axis is not in `[-rank, rank)`.
pub fn resolve_axis(axis: isize, rank: usize) -> Result<usize, AxisError> {
    let out_of_range = AxisError::OutOfRange { axis, rank };
    let signed_rank = isize::try_from(rank).map_err(|_| out_of_range)?;
    let resolved = if axis < 0 { axis + signed_rank } else { axis };

    if (0..signed_rank).contains(&resolved) {
        usize::try_from(resolved).map_err(|_| out_of_range)
    } else {
        Err(out_of_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_axis_keeps_non_negative_axes() {
        assert_eq!(resolve_axis(0, 2), Ok(0));
        assert_eq!(resolve_axis(2, 3), Ok(2));
    }

    #[test]
    fn resolve_axis_counts_negative_axes_from_the_end() {
        assert_eq!(resolve_axis(-1, 2), Ok(1));
        assert_eq!(resolve_axis(-1, 4), Ok(3));
        assert_eq!(resolve_axis(-4, 4), Ok(0));
    }

    #[test]
    fn resolve_axis_rejects_out_of_range() {
        assert_eq!(
            resolve_axis(2, 2),
            Err(AxisError::OutOfRange { axis: 2, rank: 2 })
        );
        assert_eq!(
            resolve_axis(-3, 2),
            Err(AxisError::OutOfRange { axis: -3, rank: 2 })
        );
    }

    #[test]
    fn axis_error_display_names_axis_and_rank() {
        let err = resolve_axis(5, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "axis 5 is out of range for a tensor of rank 3"
        );
    }
}
