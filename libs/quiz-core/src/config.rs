//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Default number of options shown per quiz.
pub const DEFAULT_OPTIONS_PER_QUIZ: usize = 4;

/// What to do when the target's group has fewer items than requested options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPolicy {
    /// Show as many options as the group can provide.
    #[default]
    Clamp,
    /// Fail the draw with `InsufficientGroup`.
    Strict,
}

impl GroupPolicy {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "clamp" => Some(Self::Clamp),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

/// Inclusive range weights are kept in after each answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightBounds {
    pub min: i64,
    pub max: i64,
}

impl WeightBounds {
    /// Returns `None` if `min > max`.
    pub fn new(min: i64, max: i64) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    pub fn clamp(&self, weight: i64) -> i64 {
        weight.clamp(self.min, self.max)
    }
}

/// Tunables for sampling and weight updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub options_per_quiz: usize,
    pub group_policy: GroupPolicy,
    /// Unbounded when absent.
    pub weight_bounds: Option<WeightBounds>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            options_per_quiz: DEFAULT_OPTIONS_PER_QUIZ,
            group_policy: GroupPolicy::default(),
            weight_bounds: None,
        }
    }
}
