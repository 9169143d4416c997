//! API request and response types

use serde::{Deserialize, Serialize};

pub use quiz_core::{AnswerOutcome, EngineError, Item, Quiz};

/// A deck file available for import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportDeckRequest {
    pub deck: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportDeckResponse {
    pub deck: String,
    pub card_count: usize,
    /// True when stored progress was unreadable and started over.
    pub weights_reset: bool,
}

/// A question as presented to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub index: usize,
    pub question: String,
    pub options: Vec<String>,
}

impl From<&Quiz> for QuizResponse {
    fn from(quiz: &Quiz) -> Self {
        Self {
            index: quiz.index,
            question: quiz.item.question.clone(),
            options: quiz.options.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// Chosen option, or null for "I don't know".
    #[serde(default)]
    pub position: Option<usize>,
}

/// The answer is always recorded once this is returned. If drawing the
/// follow-up question failed, `next` is null and `next_error` says why.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub correct: bool,
    pub correct_answer: String,
    pub weight: i64,
    pub next: Option<QuizResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_error: Option<String>,
}

impl AnswerResponse {
    pub fn new(outcome: AnswerOutcome, next: Result<&Quiz, EngineError>) -> Self {
        let (next, next_error) = match next {
            Ok(quiz) => (Some(quiz.into()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            correct: outcome.correct,
            correct_answer: outcome.correct_answer,
            weight: outcome.weight,
            next,
            next_error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub deck: String,
    pub card_count: usize,
    pub weights: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<QuizResponse>,
}
