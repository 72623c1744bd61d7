//! Softmax cross-entropy loss.
//!
//! With sparse labels (class indices) the per-sample term is
//! ```text
//! l_i = -log p[i, label_i]
//! ```
//! and with dense labels (class distributions)
//! ```text
//! l_i = -Σ_j label[i, j] * log p[i, j]
//! ```
//! where `log p` is the log-softmax of the prediction along the class axis, or the
//! prediction itself when it already holds log-probabilities (`from_logit`).
//!
//! Each term is scaled by `weight` and averaged over every axis except the batch
//! axis, leaving one value per batch item.

use burn::{
    module::{Content, DisplaySettings, Ignored, Module, ModuleDisplay},
    prelude::*,
    tensor::cast::ToElement,
};
use burn_loss_ops::{resolve_axis, TensorLossOps};

use crate::{Label, LabelMode, Loss, LossError, LossResult};

/// Configuration for creating a [softmax cross-entropy loss](SoftmaxCrossEntropyLoss).
#[derive(Config, Debug)]
pub struct SoftmaxCrossEntropyLossConfig {
    /// Scale applied to the loss. Default: 1.0
    #[config(default = 1.0)]
    pub weight: f64,
    /// Axis indexing the samples of the batch. Default: 0
    #[config(default = "0")]
    pub batch_axis: isize,
    /// Axis indexing the classes; negative values count from the end. Default: -1
    #[config(default = "-1")]
    pub class_axis: isize,
    /// Whether labels are class indices rather than distributions. Default: true
    #[config(default = "true")]
    pub sparse_label: bool,
    /// Whether predictions already hold log-probabilities. Default: false
    #[config(default = "false")]
    pub from_logit: bool,
    /// Whether sparse indices are checked against the number of classes. Default: true
    #[config(default = "true")]
    pub validate_indices: bool,
}

impl SoftmaxCrossEntropyLossConfig {
    /// Initialize [softmax cross-entropy loss](SoftmaxCrossEntropyLoss).
    ///
    /// # Errors
    /// Returns [`LossError::InvalidConfiguration`] if [`validate`](Self::validate) fails.
    pub fn init(&self) -> LossResult<SoftmaxCrossEntropyLoss> {
        self.validate()?;

        tracing::debug!(
            weight = self.weight,
            batch_axis = self.batch_axis,
            class_axis = self.class_axis,
            sparse_label = self.sparse_label,
            from_logit = self.from_logit,
            "softmax cross-entropy loss initialized"
        );

        Ok(SoftmaxCrossEntropyLoss::from_config(self))
    }

    /// Check the parts of the configuration that do not depend on the prediction rank.
    ///
    /// # Errors
    /// Returns [`LossError::InvalidConfiguration`] for a non-finite weight or for
    /// identical batch and class axes.
    pub fn validate(&self) -> LossResult<()> {
        if !self.weight.is_finite() {
            return Err(LossError::InvalidConfiguration {
                reason: format!("weight must be finite, got {}", self.weight),
            });
        }

        if self.batch_axis == self.class_axis {
            return Err(LossError::InvalidConfiguration {
                reason: format!(
                    "batch axis and class axis must differ, both are {}",
                    self.batch_axis
                ),
            });
        }

        Ok(())
    }
}

/// Softmax cross-entropy loss.
///
/// Built once from a [`SoftmaxCrossEntropyLossConfig`] and reused for every batch.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct SoftmaxCrossEntropyLoss {
    /// Scale applied to the loss.
    pub weight: f64,
    /// Configured batch axis.
    pub batch_axis: Ignored<isize>,
    /// Configured class axis.
    pub class_axis: Ignored<isize>,
    /// Whether labels are class indices.
    pub sparse_label: bool,
    /// Whether predictions are taken as log-probabilities.
    pub from_logit: bool,
    /// Whether sparse indices are checked against the number of classes.
    pub validate_indices: bool,
}

impl Default for SoftmaxCrossEntropyLoss {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleDisplay for SoftmaxCrossEntropyLoss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content
            .add("weight", &self.weight)
            .add("batch_axis", &self.batch_axis)
            .add("class_axis", &self.class_axis)
            .add("sparse_label", &self.sparse_label)
            .add("from_logit", &self.from_logit)
            .optional()
    }
}

impl SoftmaxCrossEntropyLoss {
    /// Create a new softmax cross-entropy loss with default configuration.
    pub fn new() -> Self {
        Self::from_config(&SoftmaxCrossEntropyLossConfig::new())
    }

    const fn from_config(config: &SoftmaxCrossEntropyLossConfig) -> Self {
        Self {
            weight: config.weight,
            batch_axis: Ignored(config.batch_axis),
            class_axis: Ignored(config.class_axis),
            sparse_label: config.sparse_label,
            from_logit: config.from_logit,
            validate_indices: config.validate_indices,
        }
    }

    /// The label mode this loss expects.
    pub const fn label_mode(&self) -> LabelMode {
        if self.sparse_label {
            LabelMode::Sparse
        } else {
            LabelMode::Dense
        }
    }

    /// The configuration this loss was built from.
    pub fn config(&self) -> SoftmaxCrossEntropyLossConfig {
        SoftmaxCrossEntropyLossConfig::new()
            .with_weight(self.weight)
            .with_batch_axis(self.batch_axis.0)
            .with_class_axis(self.class_axis.0)
            .with_sparse_label(self.sparse_label)
            .with_from_logit(self.from_logit)
            .with_validate_indices(self.validate_indices)
    }

    /// Resolve `(batch_axis, class_axis)` against a prediction of rank `D`.
    fn resolve_axes<const D: usize>(&self) -> LossResult<(usize, usize)> {
        if D < 2 {
            return Err(LossError::PredictionRank { rank: D });
        }

        let batch_axis = resolve_axis(self.batch_axis.0, D)?;
        let class_axis = resolve_axis(self.class_axis.0, D)?;
        if batch_axis == class_axis {
            return Err(LossError::AxisConflict { axis: batch_axis });
        }

        Ok((batch_axis, class_axis))
    }
}

impl Loss for SoftmaxCrossEntropyLoss {
    fn name(&self) -> &str {
        "SoftmaxCrossEntropyLoss"
    }

    fn forward_no_reduction<B: Backend, const D: usize>(
        &self,
        label: Label<B>,
        prediction: Tensor<B, D>,
    ) -> LossResult<Tensor<B, 1>> {
        let (batch_axis, class_axis) = self.resolve_axes::<D>()?;

        let expected = self.label_mode();
        if label.mode() != expected {
            return Err(LossError::LabelModeMismatch {
                expected,
                actual: label.mode(),
            });
        }

        let dims = prediction.dims();
        tracing::trace!(?dims, batch_axis, class_axis, mode = %expected, "softmax cross-entropy");

        let log_probs = if self.from_logit {
            prediction
        } else {
            prediction.log_softmax_along(class_axis)
        };

        let loss = match expected {
            LabelMode::Sparse => {
                let indices = label.into_indices(dims, class_axis)?;
                if self.validate_indices {
                    check_indices(&indices, dims[class_axis])?;
                }
                log_probs.pick(class_axis, indices).neg()
            }
            LabelMode::Dense => {
                let distribution = label.into_distribution(dims)?;
                (log_probs * distribution).sum_dim(class_axis).neg()
            }
        };

        let loss = if self.weight == 1.0 {
            loss
        } else {
            loss.mul_scalar(self.weight)
        };

        Ok(loss.mean_except(batch_axis))
    }
}

fn check_indices<B: Backend, const D: usize>(
    indices: &Tensor<B, D, Int>,
    num_classes: usize,
) -> LossResult<()> {
    if indices.shape().num_elements() == 0 {
        return Ok(());
    }

    let min = indices.clone().min().into_scalar().to_i64();
    let max = indices.clone().max().into_scalar().to_i64();
    let upper = i64::try_from(num_classes).unwrap_or(i64::MAX);

    if min < 0 || max >= upper {
        return Err(LossError::LabelOutOfRange {
            min,
            max,
            num_classes,
        });
    }

    Ok(())
}
