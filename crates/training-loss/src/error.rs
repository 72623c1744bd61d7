//! Errors raised while building and evaluating losses.

use burn_loss_ops::AxisError;
use thiserror::Error;

use crate::LabelMode;

/// The error type for loss evaluation.
///
/// Every variant is raised synchronously by the call that detected it; nothing is
/// retried or recovered inside the loss.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LossError {
    /// A configured axis does not exist in the prediction tensor.
    #[error(transparent)]
    Axis(#[from] AxisError),

    /// The batch axis and the class axis resolve to the same axis.
    #[error("batch axis and class axis both resolve to axis {axis}")]
    AxisConflict {
        /// The shared axis.
        axis: usize,
    },

    /// The prediction tensor has fewer than two axes.
    #[error("prediction must have a batch axis and a class axis, got rank {rank}")]
    PredictionRank {
        /// The rank of the prediction tensor.
        rank: usize,
    },

    /// A dense label does not have as many elements as the prediction.
    #[error("label shape {actual:?} is incompatible with expected shape {expected:?}")]
    ShapeMismatch {
        /// The shape the label was expected to have.
        expected: Vec<usize>,
        /// The shape the label actually has.
        actual: Vec<usize>,
    },

    /// Sparse class indices fit neither accepted layout.
    #[error("sparse label shape {actual:?} must be {without_class:?} (class axis dropped) or {keep_class:?} (class axis of extent 1)")]
    SparseLabelShape {
        /// The prediction shape with the class axis removed.
        without_class: Vec<usize>,
        /// The prediction shape with the class axis of extent 1.
        keep_class: Vec<usize>,
        /// The shape the label actually has.
        actual: Vec<usize>,
    },

    /// The label variant differs from the mode the loss was configured with.
    #[error("loss expects {expected} labels, got {actual} labels")]
    LabelModeMismatch {
        /// The configured label mode.
        expected: LabelMode,
        /// The mode of the supplied label.
        actual: LabelMode,
    },

    /// A sparse class index lies outside `[0, num_classes)`.
    #[error("class indices must lie in [0, {num_classes}), got range [{min}, {max}]")]
    LabelOutOfRange {
        /// Smallest index in the label.
        min: i64,
        /// Largest index in the label.
        max: i64,
        /// Extent of the class axis.
        num_classes: usize,
    },

    /// The loss does not accept labels of this mode.
    #[error("{loss} does not support {mode} labels")]
    UnsupportedLabel {
        /// Name of the loss.
        loss: String,
        /// The rejected label mode.
        mode: LabelMode,
    },

    /// The loss configuration is inconsistent.
    #[error("Invalid loss configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// No accumulator is registered under the key.
    #[error("no accumulator named '{key}'")]
    UnknownAccumulator {
        /// The requested key.
        key: String,
    },
}

/// A specialized `Result` type for loss operations.
pub type LossResult<T> = Result<T, LossError>;
