//! Per-user study session.
//!
//! A session is created when a user imports a deck and lives until it is
//! replaced or the process exits. Weights survive through the `WeightStore`.

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::sampler::Sampler;
use crate::store::WeightStore;
use crate::types::{Deck, Quiz, Weights};
use crate::weights;

/// Result of answering the pending quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Deck index of the answered item.
    pub index: usize,
    pub correct_answer: String,
    /// The item's weight after the update.
    pub weight: i64,
}

#[derive(Debug)]
pub struct Session {
    user_id: String,
    deck_name: String,
    deck: Arc<Deck>,
    weights: Weights,
    weights_reset: bool,
    pending: Option<Quiz>,
    sampler: Sampler,
    config: EngineConfig,
}

impl Session {
    /// Start a session, loading the user's prior weights for this deck.
    pub fn open<S: WeightStore + ?Sized>(
        store: &S,
        user_id: &str,
        deck_name: &str,
        deck: Arc<Deck>,
        config: EngineConfig,
    ) -> Result<Self> {
        let (mut weights, weights_reset) = store.load_or_reset(user_id, &deck)?;
        if let Some(bounds) = config.weight_bounds {
            for weight in weights.iter_mut() {
                *weight = bounds.clamp(*weight);
            }
        }
        tracing::info!(
            user_id,
            deck = deck_name,
            cards = deck.len(),
            weights_reset,
            "session opened"
        );

        Ok(Self {
            user_id: user_id.to_string(),
            deck_name: deck_name.to_string(),
            deck,
            weights,
            weights_reset,
            pending: None,
            sampler: Sampler::from_config(&config),
            config,
        })
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn weights(&self) -> &[i64] {
        &self.weights
    }

    /// Whether stored weights were corrupt and replaced when the session opened.
    pub fn weights_reset(&self) -> bool {
        self.weights_reset
    }

    pub fn pending(&self) -> Option<&Quiz> {
        self.pending.as_ref()
    }

    /// Draw the next quiz. Any unanswered quiz is discarded.
    pub fn next_quiz<R: Rng>(&mut self, rng: &mut R) -> Result<&Quiz> {
        let quiz = self.sampler.draw(&self.deck, Some(self.weights.as_slice()), rng)?;
        tracing::debug!(user_id = %self.user_id, index = quiz.index, "quiz drawn");
        Ok(self.pending.insert(quiz))
    }

    /// Grade the pending quiz, update the item's weight and persist.
    ///
    /// `None` means the user gave up, which counts as a wrong answer.
    pub fn answer<S: WeightStore + ?Sized>(
        &mut self,
        store: &S,
        position: Option<usize>,
    ) -> Result<AnswerOutcome> {
        let quiz = self.pending.as_ref().ok_or(EngineError::NoPendingQuiz)?;

        let correct = match position {
            Some(position) if position >= quiz.options.len() => {
                return Err(EngineError::InvalidPosition {
                    position,
                    len: quiz.options.len(),
                });
            }
            Some(position) => quiz.is_correct(position),
            None => false,
        };
        let index = quiz.index;
        let correct_answer = quiz.item.answer.clone();

        let mut updated = self.weights.clone();
        let mut weight = weights::update(&mut updated, index, correct)?;
        if let Some(bounds) = self.config.weight_bounds {
            weight = bounds.clamp(weight);
            updated[index] = weight;
        }

        store.save(&self.user_id, &self.deck, &updated)?;
        self.weights = updated;
        self.pending = None;

        tracing::info!(user_id = %self.user_id, index, correct, weight, "answer recorded");
        Ok(AnswerOutcome {
            correct,
            index,
            correct_answer,
            weight,
        })
    }
}
