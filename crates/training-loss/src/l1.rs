//! Mean absolute error (L1) loss.
//!
//! The per-element term is `weight * |label - prediction|`, averaged over every
//! axis except the batch axis. Labels must be dense.

use burn::{
    module::{Content, DisplaySettings, Ignored, Module, ModuleDisplay},
    prelude::*,
};
use burn_loss_ops::TensorLossOps;

use crate::{loss::dense_residual, Label, Loss, LossError, LossResult};

/// Configuration for creating an [L1 loss](L1Loss).
#[derive(Config, Debug)]
pub struct L1LossConfig {
    /// Scale applied to the loss. Default: 1.0
    #[config(default = 1.0)]
    pub weight: f64,
    /// Axis indexing the samples of the batch. Default: 0
    #[config(default = "0")]
    pub batch_axis: isize,
}

impl L1LossConfig {
    /// Initialize [L1 loss](L1Loss).
    ///
    /// # Errors
    /// Returns [`LossError::InvalidConfiguration`] for a non-finite weight.
    pub fn init(&self) -> LossResult<L1Loss> {
        if !self.weight.is_finite() {
            return Err(LossError::InvalidConfiguration {
                reason: format!("weight must be finite, got {}", self.weight),
            });
        }

        tracing::debug!(
            weight = self.weight,
            batch_axis = self.batch_axis,
            "L1 loss initialized"
        );
        Ok(L1Loss {
            weight: self.weight,
            batch_axis: Ignored(self.batch_axis),
        })
    }
}

/// Mean absolute error (L1) loss.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct L1Loss {
    /// Scale applied to the loss.
    pub weight: f64,
    /// Configured batch axis.
    pub batch_axis: Ignored<isize>,
}

impl Default for L1Loss {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleDisplay for L1Loss {
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

impl L1Loss {
    /// Create a new L1 loss with default configuration.
    pub const fn new() -> Self {
        Self {
            weight: 1.0,
            batch_axis: Ignored(0),
        }
    }
}

impl Loss for L1Loss {
    fn name(&self) -> &str {
        "L1Loss"
    }

    fn forward_no_reduction<B: Backend, const D: usize>(
        &self,
        label: Label<B>,
        prediction: Tensor<B, D>,
    ) -> LossResult<Tensor<B, 1>> {
        let (residual, batch_axis) =
            dense_residual(self.name(), label, prediction, self.batch_axis.0)?;
        Ok(residual.abs().mul_scalar(self.weight).mean_except(batch_axis))
    }
}
