//! Running loss values over many batches.
//!
//! A [`LossTracker`] wraps a loss together with named accumulators (for example
//! `"train"` and `"validate"`). Each update evaluates the loss on one batch, folds
//! the per-item losses into the accumulator and hands them back for backprop.

use std::collections::HashMap;

use burn::{prelude::*, tensor::cast::ToElement};

use crate::{Label, Loss, LossError, LossResult};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Accumulator {
    total: f64,
    count: usize,
}

impl Accumulator {
    fn mean(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.total / self.count as f64
        }
    }
}

/// A loss with named running-mean accumulators.
#[derive(Debug, Clone)]
pub struct LossTracker<L> {
    loss: L,
    accumulators: HashMap<String, Accumulator>,
}

impl<L: Loss> LossTracker<L> {
    /// Wrap `loss` with no accumulators.
    pub fn new(loss: L) -> Self {
        Self {
            loss,
            accumulators: HashMap::new(),
        }
    }

    /// The wrapped loss.
    pub const fn loss(&self) -> &L {
        &self.loss
    }

    /// Register an accumulator under `key`, resetting it if it already exists.
    pub fn add_accumulator(&mut self, key: impl Into<String>) {
        self.accumulators.insert(key.into(), Accumulator::default());
    }

    /// Names of the registered accumulators.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.accumulators.keys().map(String::as_str)
    }

    /// Evaluate the loss on one batch and fold it into the accumulator `key`.
    ///
    /// Returns the per-item losses, so the caller can reduce them and run backprop.
    ///
    /// # Errors
    /// Returns [`LossError::UnknownAccumulator`] if `key` was never added, or any
    /// error raised by the loss itself.
    pub fn update_accumulator<B: Backend, const D: usize>(
        &mut self,
        key: &str,
        label: Label<B>,
        prediction: Tensor<B, D>,
    ) -> LossResult<Tensor<B, 1>> {
        if !self.accumulators.contains_key(key) {
            return Err(unknown(key));
        }

        let loss = self.loss.forward_no_reduction(label, prediction)?;
        let [batch_size] = loss.dims();
        let total = loss.clone().sum().into_scalar().to_f64();

        let accumulator = self.accumulators.get_mut(key).ok_or_else(|| unknown(key))?;
        accumulator.total += total;
        accumulator.count += batch_size;

        tracing::debug!(
            loss = self.loss.name(),
            key,
            batch_size,
            running = accumulator.mean(),
            "loss accumulator updated"
        );

        Ok(loss)
    }

    /// Mean per-item loss seen by accumulator `key` since it was last reset.
    ///
    /// `NaN` when no items were accumulated yet.
    ///
    /// # Errors
    /// Returns [`LossError::UnknownAccumulator`] if `key` was never added.
    pub fn accumulator(&self, key: &str) -> LossResult<f64> {
        self.accumulators
            .get(key)
            .map(Accumulator::mean)
            .ok_or_else(|| unknown(key))
    }

    /// Reset accumulator `key`.
    ///
    /// # Errors
    /// Returns [`LossError::UnknownAccumulator`] if `key` was never added.
    pub fn reset_accumulator(&mut self, key: &str) -> LossResult<()> {
        let accumulator = self.accumulators.get_mut(key).ok_or_else(|| unknown(key))?;
        *accumulator = Accumulator::default();
        Ok(())
    }

    /// Reset every accumulator.
    pub fn reset_all(&mut self) {
        self.accumulators
            .values_mut()
            .for_each(|accumulator| *accumulator = Accumulator::default());
    }
}

fn unknown(key: &str) -> LossError {
    LossError::UnknownAccumulator {
        key: key.to_string(),
    }
}
