//! Weighted item selection and multiple-choice option assembly.
//!
//! Each unit of weight doubles an item's relative draw likelihood: an item
//! with weight `w` is drawn with probability proportional to `2^w`.
//! Distractors come from items sharing the drawn item's group.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::config::{EngineConfig, GroupPolicy, DEFAULT_OPTIONS_PER_QUIZ};
use crate::error::{EngineError, Result};
use crate::types::{Deck, Item, Quiz};

/// Convert weights into a normalized draw distribution.
///
/// Exponents are shifted by the maximum weight first, so the result is the
/// same as normalizing `2^w` directly but cannot overflow.
pub fn probabilities(weights: &[i64]) -> Vec<f64> {
    let Some(&max) = weights.iter().max() else {
        return Vec::new();
    };

    let raw: Vec<f64> = weights
        .iter()
        .map(|&w| (w.saturating_sub(max) as f64).exp2())
        .collect();
    let total: f64 = raw.iter().sum();

    raw.into_iter().map(|p| p / total).collect()
}

/// Draw a quiz with up to `n` options, clamping to the group size.
pub fn draw<R: Rng>(deck: &Deck, weights: Option<&[i64]>, n: usize, rng: &mut R) -> Result<Quiz> {
    Sampler {
        options_per_quiz: n,
        group_policy: GroupPolicy::Clamp,
    }
    .draw(deck, weights, rng)
}

/// Whether `options[position]` is the item's true answer.
pub fn is_correct(options: &[String], item: &Item, position: usize) -> bool {
    options
        .get(position)
        .is_some_and(|option| *option == item.answer)
}

/// Draws quizzes with a fixed option count and small-group policy.
#[derive(Debug, Clone)]
pub struct Sampler {
    pub options_per_quiz: usize,
    pub group_policy: GroupPolicy,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            options_per_quiz: DEFAULT_OPTIONS_PER_QUIZ,
            group_policy: GroupPolicy::default(),
        }
    }
}

impl Sampler {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            options_per_quiz: config.options_per_quiz,
            group_policy: config.group_policy,
        }
    }

    /// Pick an item (uniformly when `weights` is `None`) and build its options.
    pub fn draw<R: Rng>(&self, deck: &Deck, weights: Option<&[i64]>, rng: &mut R) -> Result<Quiz> {
        if deck.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        if self.options_per_quiz == 0 {
            return Err(EngineError::ZeroOptions);
        }

        let index = match weights {
            Some(weights) => {
                if weights.len() != deck.len() {
                    return Err(EngineError::WeightLengthMismatch {
                        expected: deck.len(),
                        found: weights.len(),
                    });
                }
                let dist = WeightedIndex::new(probabilities(weights))
                    .map_err(|e| EngineError::InvalidWeights(e.to_string()))?;
                dist.sample(rng)
            }
            None => rng.random_range(0..deck.len()),
        };

        let item = deck.items()[index].clone();
        let options = self.options_for(deck, &item, rng)?;

        Ok(Quiz {
            index,
            item,
            options,
        })
    }

    fn options_for<R: Rng>(&self, deck: &Deck, item: &Item, rng: &mut R) -> Result<Vec<String>> {
        let members = deck.group_members(&item.group);
        let requested = self.options_per_quiz;

        if members.len() < requested {
            match self.group_policy {
                GroupPolicy::Strict => {
                    return Err(EngineError::InsufficientGroup {
                        group: item.group.clone(),
                        available: members.len(),
                        requested,
                    });
                }
                GroupPolicy::Clamp => {
                    tracing::debug!(
                        group = %item.group,
                        available = members.len(),
                        requested,
                        "group smaller than option count, clamping"
                    );
                }
            }
        }

        // The drawn rows may include the item itself; its answer is already first.
        let picks = index::sample(rng, members.len(), requested.min(members.len()));
        let mut options = vec![item.answer.clone()];
        for pick in picks.iter() {
            let answer = &deck.items()[members[pick]].answer;
            if !options.contains(answer) {
                options.push(answer.clone());
            }
        }

        options.truncate(requested);
        options.shuffle(rng);
        Ok(options)
    }
}
