//! The capability shared by every loss in this crate.

use burn::{nn::loss::Reduction, prelude::*};
use burn_loss_ops::resolve_axis;

use crate::{Label, LabelMode, LossError, LossResult};

/// A loss maps a label and a prediction to one loss value per batch item.
///
/// Losses are immutable once built; the same value can be evaluated on any number
/// of batches.
pub trait Loss {
    /// Display name of the loss.
    fn name(&self) -> &str;

    /// Compute the per-item loss.
    ///
    /// # Shapes
    ///
    /// - label: see [`Label`]
    /// - prediction: `[...dims]` (rank >= 2 unless stated otherwise by the loss)
    /// - output: `[batch_size]`
    ///
    /// # Errors
    /// Returns a [`LossError`] when the label, prediction and configuration do not
    /// fit together.
    fn forward_no_reduction<B: Backend, const D: usize>(
        &self,
        label: Label<B>,
        prediction: Tensor<B, D>,
    ) -> LossResult<Tensor<B, 1>>;

    /// Compute the loss reduced over the batch.
    ///
    /// # Shapes
    ///
    /// - output: `[1]`
    ///
    /// # Errors
    /// See [`Loss::forward_no_reduction`].
    fn forward<B: Backend, const D: usize>(
        &self,
        label: Label<B>,
        prediction: Tensor<B, D>,
        reduction: Reduction,
    ) -> LossResult<Tensor<B, 1>> {
        let loss = self.forward_no_reduction(label, prediction)?;
        Ok(match reduction {
            Reduction::Mean | Reduction::Auto => loss.mean(),
            Reduction::Sum => loss.sum(),
        })
    }
}

/// `label - prediction` for losses that only accept dense labels, together with
/// the resolved batch axis.
pub(crate) fn dense_residual<B: Backend, const D: usize>(
    loss: &str,
    label: Label<B>,
    prediction: Tensor<B, D>,
    batch_axis: isize,
) -> LossResult<(Tensor<B, D>, usize)> {
    if label.mode() == LabelMode::Sparse {
        return Err(LossError::UnsupportedLabel {
            loss: loss.to_string(),
            mode: LabelMode::Sparse,
        });
    }

    let batch_axis = resolve_axis(batch_axis, D)?;
    let target = label.into_distribution(prediction.dims())?;
    Ok((target - prediction, batch_axis))
}
