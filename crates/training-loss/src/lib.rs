//! Training losses for the Burn deep learning framework.
//!
//! The centerpiece is [`SoftmaxCrossEntropyLoss`], which turns class scores (or
//! log-probabilities) and ground-truth labels into one loss value per batch item.
//! Labels come as a [`Label`]: class indices ([`Label::Sparse`]) or class
//! distributions ([`Label::Dense`]).
//!
//! ## Losses
//!
//! - **[`SoftmaxCrossEntropyLoss`]**: `-log p[i, label_i]` for sparse labels,
//!   `-Σ_j label_j log p_ij` for dense labels
//! - **[`L1Loss`]**: weighted absolute error against dense labels
//! - **[`L2Loss`]**: weighted squared error against dense labels
//!
//! All of them implement [`Loss`], which provides `forward_no_reduction` (one value
//! per batch item) and `forward` (reduced with Burn's [`Reduction`]). Each loss is
//! built from a `Config` and is immutable afterwards. [`LossTracker`] keeps
//! named running means of a loss across batches.
//!
//! ## Usage Example
//!
//! ```rust
//! use burn::{backend::NdArray, nn::loss::Reduction, prelude::*, tensor::TensorData};
//! use training_loss::{Label, Loss, SoftmaxCrossEntropyLossConfig};
//!
//! let device = Default::default();
//! let loss = SoftmaxCrossEntropyLossConfig::new().init().unwrap();
//!
//! let logits = Tensor::<NdArray, 2>::from_floats([[2.0, 0.5, -1.0], [0.0, 0.0, 3.0]], &device);
//! let classes = Tensor::<NdArray, 1, Int>::from_data(TensorData::from([0, 2]), &device);
//!
//! let per_item = loss
//!     .forward_no_reduction(Label::sparse(classes.clone()), logits.clone())
//!     .unwrap();
//! assert_eq!(per_item.dims(), [2]);
//!
//! let mean = loss
//!     .forward(Label::sparse(classes), logits, Reduction::Mean)
//!     .unwrap();
//! assert_eq!(mean.dims(), [1]);
//! ```
//!
//! [`Reduction`]: burn::nn::loss::Reduction

mod error;
mod l1;
mod l2;
mod label;
mod loss;
mod softmax_cross_entropy;
mod tracker;

pub use error::{LossError, LossResult};
pub use l1::{L1Loss, L1LossConfig};
pub use l2::{L2Loss, L2LossConfig};
pub use label::{Label, LabelMode};
pub use loss::Loss;
pub use softmax_cross_entropy::{SoftmaxCrossEntropyLoss, SoftmaxCrossEntropyLossConfig};
pub use tracker::LossTracker;
