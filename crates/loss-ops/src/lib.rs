//! Tensor helpers for writing training losses on the Burn deep learning framework.
//!
//! Burn provides the numeric kernels (softmax, gather, reductions). This crate adds
//! the small pieces that loss functions keep needing on top of them: resolving
//! signed axes, picking one class per sample while keeping the class axis, and
//! averaging over every axis but the batch axis.

use burn::{prelude::*, tensor::activation};

mod axis;
mod pick;
mod reduce;

pub use axis::{resolve_axis, AxisError};
pub use pick::pick;
pub use reduce::mean_except;

/// Loss-oriented operations for Burn float tensors.
pub trait TensorLossOps<B: Backend, const D: usize> {
    /// Log-softmax along `axis`.
    fn log_softmax_along(self, axis: usize) -> Self;

    /// Gather along `axis`, keeping the axis with extent 1. See [`pick()`].
    fn pick(self, axis: usize, indices: Tensor<B, D, Int>) -> Self;

    /// Average over every axis except `axis`. See [`mean_except()`].
    fn mean_except(self, axis: usize) -> Tensor<B, 1>;
}

impl<B: Backend, const D: usize> TensorLossOps<B, D> for Tensor<B, D> {
    fn log_softmax_along(self, axis: usize) -> Self {
        activation::log_softmax(self, axis)
    }

    fn pick(self, axis: usize, indices: Tensor<B, D, Int>) -> Self {
        pick::pick(self, axis, indices)
    }

    fn mean_except(self, axis: usize) -> Tensor<B, 1> {
        reduce::mean_except(self, axis)
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::NdArray,
        tensor::{TensorData, Tolerance},
    };

    use super::*;

    pub type TestBackend = NdArray;

    #[test]
    fn log_softmax_along_uniform_scores() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 2>::zeros([2, 3], &device);

        let expected = -(3.0_f32).ln();
        x.log_softmax_along(1).into_data().assert_approx_eq::<f32>(
            &TensorData::from([[expected; 3]; 2]),
            Tolerance::default(),
        );
    }

    #[test]
    fn log_softmax_along_first_axis_normalizes_columns() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 2>::from_floats([[1.0, 5.0], [1.0, -3.0]], &device);

        let probs_sum = x.log_softmax_along(0).exp().sum_dim(0);
        probs_sum
            .into_data()
            .assert_approx_eq::<f32>(&TensorData::from([[1.0_f32, 1.0]]), Tolerance::default());
    }

    #[test]
    fn tensor_loss_ops_chain_picks_then_averages() {
        let device = Default::default();
        // [batch = 2, steps = 2, classes = 2]
        let x = Tensor::<TestBackend, 3>::from_floats(
            [[[1.0, 2.0], [3.0, 4.0]], [[5.0, 6.0], [7.0, 8.0]]],
            &device,
        );
        let indices = Tensor::<TestBackend, 3, Int>::from_data(
            TensorData::from([[[0], [1]], [[1], [1]]]),
            &device,
        );

        let out = x.pick(2, indices).mean_except(0);
        out.into_data()
            .assert_approx_eq::<f32>(&TensorData::from([2.5_f32, 7.0]), Tolerance::default());
    }
}
