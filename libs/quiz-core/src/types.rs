//! Core types for the quiz engine.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ParseError;

/// Per-item integer weights, positionally aligned with a deck.
pub type Weights = Vec<i64>;

/// One question/answer pair with its distractor group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub question: String,
    pub answer: String,
    pub group: String,
}

impl Item {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            group: group.into(),
        }
    }
}

/// Immutable ordered set of items. The position of an item is its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Deck {
    items: Vec<Item>,
}

impl Deck {
    /// Build a deck, rejecting items with blank fields.
    pub fn new(items: Vec<Item>) -> Result<Self, ParseError> {
        for (idx, item) in items.iter().enumerate() {
            let position = idx + 1;
            let fields = [
                ("question", &item.question),
                ("answer", &item.answer),
                ("group", &item.group),
            ];
            for (field, value) in fields {
                if value.trim().is_empty() {
                    return Err(ParseError::EmptyField { field, position });
                }
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Indices of all items tagged with `group`, in deck order.
    pub fn group_members(&self, group: &str) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.group == group)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// SHA256 of the JSON serialization of the items, hex encoded.
    ///
    /// Order-sensitive: the same items in another order are a different deck.
    pub fn fingerprint(&self) -> String {
        // Plain string fields always serialize.
        let json = serde_json::to_string(&self.items).expect("items serialize to JSON");
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// A drawn item together with its shuffled answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quiz {
    /// Deck index of the item, used for the weight update.
    pub index: usize,
    pub item: Item,
    pub options: Vec<String>,
}

impl Quiz {
    /// Position of the correct answer within `options`.
    pub fn answer_position(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.item.answer)
    }

    pub fn is_correct(&self, position: usize) -> bool {
        crate::sampler::is_correct(&self.options, &self.item, position)
    }
}
