//! Adaptive multiple-choice quiz engine.
//!
//! Provides:
//! - Deck import from YAML and markdown card files
//! - Weighted item selection with same-group distractors
//! - Per-item weight updates from answer correctness
//! - Weight persistence keyed by user and deck content
//! - Per-user session context tying the pieces together

pub mod config;
pub mod error;
pub mod parser;
pub mod sampler;
pub mod session;
pub mod store;
pub mod types;
pub mod weights;

pub use config::{EngineConfig, GroupPolicy, WeightBounds};
pub use error::{EngineError, ParseError, Result};
pub use parser::{is_deck_file, load_deck, parse_markdown, parse_yaml};
pub use sampler::{draw, is_correct, probabilities, Sampler};
pub use session::{AnswerOutcome, Session};
pub use store::{
    decode_weights, encode_weights, validate_user_id, FileWeightStore, MemoryWeightStore, WeightKey, WeightStore,
    STATE_VERSION,
};
pub use types::{Deck, Item, Quiz, Weights};
pub use weights::{initial_weights, update};
