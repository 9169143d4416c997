//! Weight initialization and the per-answer update rule.

use crate::error::{EngineError, Result};
use crate::types::Weights;

/// Uniform starting weights for a deck of `len` items.
pub fn initial_weights(len: usize) -> Weights {
    vec![1; len]
}

/// Apply one answer to `weights[index]` and return the new weight.
///
/// A correct answer lowers the weight by one, a miss raises it by one. No
/// clamping happens here; see `WeightBounds` for that.
pub fn update(weights: &mut [i64], index: usize, correct: bool) -> Result<i64> {
    let len = weights.len();
    let weight = weights
        .get_mut(index)
        .ok_or(EngineError::IndexOutOfRange { index, len })?;

    *weight = if correct {
        weight.saturating_sub(1)
    } else {
        weight.saturating_add(1)
    };
    Ok(*weight)
}
