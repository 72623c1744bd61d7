//! Index selection along an axis.

use burn::prelude::*;

/// Select one element along `axis` for every position of `indices`.
///
/// `indices` must have the shape of `tensor` with `axis` of extent 1; the
/// result has that same shape, so the picked axis is kept.
///
/// Index bounds are not checked here. Out-of-range indices behave however
/// the backend's gather kernel defines them.
///
/// # Shapes
/// - tensor: `[d_0, ..., C, ..., d_{D-1}]`
/// - indices: `[d_0, ..., 1, ..., d_{D-1}]`
/// - output: `[d_0, ..., 1, ..., d_{D-1}]`
pub fn pick<B: Backend, const D: usize>(
    tensor: Tensor<B, D>,
    axis: usize,
    indices: Tensor<B, D, Int>,
) -> Tensor<B, D> {
    tensor.gather(axis, indices)
}
