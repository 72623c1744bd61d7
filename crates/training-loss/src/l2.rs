//! Squared error (L2) loss.
//!
//! The per-element term is `weight * (label - prediction)^2`, averaged over every
//! axis except the batch axis. The default weight of 0.5 makes the gradient with
//! respect to the prediction equal to the residual.

use burn::{
    module::{Content, DisplaySettings, Ignored, Module, ModuleDisplay},
    prelude::*,
};
use burn_loss_ops::TensorLossOps;

use crate::{loss::dense_residual, Label, Loss, LossError, LossResult};

/// Configuration for creating an [L2 loss](L2Loss).
#[derive(Config, Debug)]
pub struct L2LossConfig {
    /// Scale applied to the loss. Default: 0.5
    #[config(default = 0.5)]
    pub weight: f64,
    /// Axis indexing the samples of the batch. Default: 0
    #[config(default = "0")]
    pub batch_axis: isize,
}

impl L2LossConfig {
    /// Initialize [L2 loss](L2Loss).
    ///
    /// # Errors
    /// Returns [`LossError::InvalidConfiguration`] for a non-finite weight.
    pub fn init(&self) -> LossResult<L2Loss> {
        if !self.weight.is_finite() {
            return Err(LossError::InvalidConfiguration {
                reason: format!("weight must be finite, got {}", self.weight),
            });
        }

        tracing::debug!(
            weight = self.weight,
            batch_axis = self.batch_axis,
            "L2 loss initialized"
        );
        Ok(L2Loss {
            weight: self.weight,
            batch_axis: Ignored(self.batch_axis),
        })
    }
}

/// Squared error (L2) loss.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct L2Loss {
    /// Scale applied to the loss.
    pub weight: f64,
    /// Configured batch axis.
    pub batch_axis: Ignored<isize>,
}

impl Default for L2Loss {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleDisplay for L2Loss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content
            .add("weight", &self.weight)
            .add("batch_axis", &self.batch_axis)
            .optional()
    }
}

impl L2Loss {
    /// Create a new L2 loss with default configuration.
    pub const fn new() -> Self {
        Self {
            weight: 0.5,
            batch_axis: Ignored(0),
        }
    }
}

impl Loss for L2Loss {
    fn name(&self) -> &str {
        "L2Loss"
    }

    fn forward_no_reduction<B: Backend, const D: usize>(
        &self,
        label: Label<B>,
        prediction: Tensor<B, D>,
    ) -> LossResult<Tensor<B, 1>> {
        let (residual, batch_axis) =
            dense_residual(self.name(), label, prediction, self.batch_axis.0)?;
        Ok(residual
            .powf_scalar(2.0)
            .mul_scalar(self.weight)
            .mean_except(batch_axis))
    }
}
