//! Reductions that keep a single axis.

use burn::prelude::*;

/// Average over every axis except `axis`.
///
/// The kept axis is moved to the front and the remaining axes are flattened
/// before averaging, so the result has one value per index along `axis`.
///
/// # Shapes
/// - input: `[d_0, ..., d_axis, ..., d_{D-1}]`
/// - output: `[d_axis]`
///
/// # Panics
/// Panics if `axis >= D`.
pub fn mean_except<B: Backend, const D: usize>(tensor: Tensor<B, D>, axis: usize) -> Tensor<B, 1> {
    assert!(
        axis < D,
        "Axis {axis} is out of range for a tensor of rank {}",
        D
    );

    let dims = tensor.dims();
    let kept = dims[axis];
    let rest: usize = dims
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != axis)
        .map(|(_, &d)| d)
        .product();

    tensor
        .swap_dims(0, axis)
        .reshape([kept, rest])
        .mean_dim(1)
        .reshape([kept])
}

#[cfg(test)]
mod tests {
    use burn::tensor::{Tolerance, TensorData};

    use super::*;
    use crate::tests::TestBackend;

    #[test]
    fn mean_except_first_axis_averages_rows() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 2>::from_floats([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], &device);

        mean_except(x, 0)
            .into_data()
            .assert_approx_eq::<f32>(&TensorData::from([2.0_f32, 5.0]), Tolerance::default());
    }

    #[test]
    fn mean_except_last_axis_averages_columns() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 2>::from_floats([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], &device);

        mean_except(x, 1).into_data().assert_approx_eq::<f32>(
            &TensorData::from([2.5_f32, 3.5, 4.5]),
            Tolerance::default(),
        );
    }

    #[test]
    fn mean_except_middle_axis_of_rank_three() {
        let device = Default::default();
        // [2, 2, 2]: keep axis 1
        let x = Tensor::<TestBackend, 3>::from_floats(
            [[[1.0, 2.0], [10.0, 20.0]], [[3.0, 4.0], [30.0, 40.0]]],
            &device,
        );

        let out = mean_except(x, 1);
        assert_eq!(out.dims(), [2]);
        out.into_data()
            .assert_approx_eq::<f32>(&TensorData::from([2.5_f32, 25.0]), Tolerance::default());
    }

    #[test]
    fn mean_except_rank_one_is_identity() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 1>::from_floats([1.0, -2.0, 3.5], &device);

        mean_except(x, 0)
            .into_data()
            .assert_approx_eq::<f32>(&TensorData::from([1.0_f32, -2.0, 3.5]), Tolerance::default());
    }

    #[test]
    #[should_panic = "Axis 2 is out of range for a tensor of rank 2"]
    fn mean_except_out_of_range_axis_panics() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 2>::zeros([2, 2], &device);
        let _ = mean_except(x, 2);
    }
}
