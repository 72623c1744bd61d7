//! Ground-truth labels.
//!
//! A label is either a class index per sample ([`Label::Sparse`]) or a probability
//! distribution over classes per sample ([`Label::Dense`]). The two are different
//! variants rather than one tensor plus a flag, so a loss always knows which
//! formula applies to the data it was handed.

use core::fmt;

use burn::prelude::*;

use crate::{LossError, LossResult};

/// Which kind of label a tensor holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    /// One integer class index per sample.
    Sparse,
    /// One probability distribution over classes per sample.
    Dense,
}

impl fmt::Display for LabelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sparse => f.write_str("sparse"),
            Self::Dense => f.write_str("dense"),
        }
    }
}

/// Ground truth for a batch.
///
/// The tensor is stored flattened together with its original dims; it is laid out
/// against the prediction's shape when the loss is evaluated.
#[derive(Debug, Clone)]
pub enum Label<B: Backend> {
    /// Integer class indices.
    Sparse {
        /// Flattened indices.
        indices: Tensor<B, 1, Int>,
        /// Dims of the tensor the label was built from.
        dims: Vec<usize>,
    },
    /// Class probability distributions.
    Dense {
        /// Flattened probabilities.
        distribution: Tensor<B, 1>,
        /// Dims of the tensor the label was built from.
        dims: Vec<usize>,
    },
}

impl<B: Backend> Label<B> {
    /// Build a sparse label from class indices.
    ///
    /// For a prediction of shape `[N, C]` the indices are `[N]` or `[N, 1]`; in
    /// general the prediction shape with the class axis removed, or with the class
    /// axis of extent 1.
    pub fn sparse<const D: usize>(indices: Tensor<B, D, Int>) -> Self {
        let dims = indices.dims().to_vec();
        let num_elements: usize = dims.iter().product();
        Self::Sparse {
            indices: indices.reshape([num_elements]),
            dims,
        }
    }

    /// Build a dense label from class probabilities.
    ///
    /// The distribution may have any shape with as many elements as the
    /// prediction; it is reshaped to the prediction's shape.
    pub fn dense<const D: usize>(distribution: Tensor<B, D>) -> Self {
        let dims = distribution.dims().to_vec();
        let num_elements: usize = dims.iter().product();
        Self::Dense {
            distribution: distribution.reshape([num_elements]),
            dims,
        }
    }

    /// The mode of this label.
    pub const fn mode(&self) -> LabelMode {
        match self {
            Self::Sparse { .. } => LabelMode::Sparse,
            Self::Dense { .. } => LabelMode::Dense,
        }
    }

    /// Dims of the tensor the label was built from.
    pub fn dims(&self) -> &[usize] {
        match self {
            Self::Sparse { dims, .. } | Self::Dense { dims, .. } => dims,
        }
    }

    /// Number of elements in the label.
    pub fn num_elements(&self) -> usize {
        self.dims().iter().product()
    }

    /// Lay the indices out along `prediction_dims`, with the class axis of extent 1.
    ///
    /// Accepts labels shaped like the prediction without its class axis, or with
    /// the class axis of extent 1.
    pub(crate) fn into_indices<const D: usize>(
        self,
        prediction_dims: [usize; D],
        class_axis: usize,
    ) -> LossResult<Tensor<B, D, Int>> {
        let (indices, dims) = match self {
            Self::Sparse { indices, dims } => (indices, dims),
            Self::Dense { .. } => {
                return Err(LossError::LabelModeMismatch {
                    expected: LabelMode::Sparse,
                    actual: LabelMode::Dense,
                })
            }
        };

        let mut keep_dims = prediction_dims;
        keep_dims[class_axis] = 1;
        let mut drop_dims = prediction_dims.to_vec();
        drop_dims.remove(class_axis);

        if dims != keep_dims && dims != drop_dims {
            return Err(LossError::SparseLabelShape {
                without_class: drop_dims,
                keep_class: keep_dims.to_vec(),
                actual: dims,
            });
        }

        Ok(indices.reshape(keep_dims))
    }

    /// Reshape the distribution to `prediction_dims`.
    pub(crate) fn into_distribution<const D: usize>(
        self,
        prediction_dims: [usize; D],
    ) -> LossResult<Tensor<B, D>> {
        let actual = self.num_elements();
        let (distribution, dims) = match self {
            Self::Dense { distribution, dims } => (distribution, dims),
            Self::Sparse { .. } => {
                return Err(LossError::LabelModeMismatch {
                    expected: LabelMode::Dense,
                    actual: LabelMode::Sparse,
                })
            }
        };

        let expected: usize = prediction_dims.iter().product();
        if expected != actual {
            return Err(LossError::ShapeMismatch {
                expected: prediction_dims.to_vec(),
                actual: dims,
            });
        }

        Ok(distribution.reshape(prediction_dims))
    }
}

#[cfg(test)]
mod tests {
    use burn::tensor::{TensorData, Tolerance};

    use super::*;
    use crate::tests::TestBackend;

    #[test]
    fn sparse_label_keeps_original_dims() {
        let device = Default::default();
        let indices = Tensor::<TestBackend, 2, Int>::from_data(
            TensorData::from([[0, 1, 2], [2, 1, 0]]),
            &device,
        );

        let label = Label::sparse(indices);
        assert_eq!(label.mode(), LabelMode::Sparse);
        assert_eq!(label.dims(), &[2, 3]);
        assert_eq!(label.num_elements(), 6);
    }

    #[test]
    fn into_indices_accepts_reduced_rank() {
        let device = Default::default();
        let indices = Tensor::<TestBackend, 1, Int>::from_data(TensorData::from([2, 0]), &device);

        let laid_out = Label::sparse(indices).into_indices([2, 3], 1).unwrap();
        assert_eq!(laid_out.dims(), [2, 1]);
        let values: Vec<i64> = laid_out.into_data().iter::<i64>().collect();
        assert_eq!(values, vec![2, 0]);
    }

    #[test]
    fn into_indices_accepts_keep_dims_layout() {
        let device = Default::default();
        let indices = Tensor::<TestBackend, 2, Int>::from_data(TensorData::from([[1, 0]]), &device);

        // classes along axis 0
        let laid_out = Label::sparse(indices).into_indices([3, 2], 0).unwrap();
        assert_eq!(laid_out.dims(), [1, 2]);
    }

    #[test]
    fn into_indices_rejects_incompatible_dims() {
        let device = Default::default();
        let indices =
            Tensor::<TestBackend, 1, Int>::from_data(TensorData::from([0, 1, 2]), &device);

        let err = Label::sparse(indices).into_indices([2, 3], 1).unwrap_err();
        assert_eq!(
            err,
            LossError::SparseLabelShape {
                without_class: vec![2],
                keep_class: vec![2, 1],
                actual: vec![3],
            }
        );
        assert_eq!(
            err.to_string(),
            "sparse label shape [3] must be [2] (class axis dropped) or [2, 1] (class axis of extent 1)"
        );
    }

    #[test]
    fn into_distribution_reshapes_matching_element_count() {
        let device = Default::default();
        let flat = Tensor::<TestBackend, 1>::from_floats([0.5, 0.5, 0.0, 1.0], &device);

        let laid_out = Label::dense(flat).into_distribution([2, 2]).unwrap();
        laid_out.into_data().assert_approx_eq::<f32>(
            &TensorData::from([[0.5_f32, 0.5], [0.0, 1.0]]),
            Tolerance::default(),
        );
    }

    #[test]
    fn into_distribution_rejects_element_count_mismatch() {
        let device = Default::default();
        let short = Tensor::<TestBackend, 2>::zeros([2, 2], &device);

        let err = Label::dense(short).into_distribution([2, 3]).unwrap_err();
        assert_eq!(
            err,
            LossError::ShapeMismatch {
                expected: vec![2, 3],
                actual: vec![2, 2],
            }
        );
    }

    #[test]
    fn label_mode_mismatch_is_reported() {
        let device = Default::default();
        let dense = Label::dense(Tensor::<TestBackend, 2>::zeros([2, 3], &device));

        let err = dense.into_indices([2, 3], 1).unwrap_err();
        assert_eq!(
            err,
            LossError::LabelModeMismatch {
                expected: LabelMode::Sparse,
                actual: LabelMode::Dense,
            }
        );
        assert_eq!(err.to_string(), "loss expects sparse labels, got dense labels");
    }
}
