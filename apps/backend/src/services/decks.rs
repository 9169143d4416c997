//! Deck files available for import.

use std::fs;
use std::path::{Path, PathBuf};

use quiz_core::{is_deck_file, load_deck, Deck, EngineError};

use crate::error::{ApiError, Result};
use crate::models::DeckSummary;

/// Directory of deck files.
pub struct DeckLibrary {
    dir: PathBuf,
}

impl DeckLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Deck files in the library, sorted by name.
    pub fn list(&self) -> Result<Vec<DeckSummary>> {
        let entries = fs::read_dir(&self.dir).map_err(EngineError::from)?;

        let mut decks = Vec::new();
        for entry in entries {
            let path = entry.map_err(EngineError::from)?.path();
            if !path.is_file() || !is_deck_file(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                decks.push(DeckSummary {
                    name: name.to_string(),
                });
            }
        }

        decks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(decks)
    }

    /// Load a deck by file name. Names may not point outside the library.
    pub fn load(&self, name: &str) -> Result<Deck> {
        let candidate = Path::new(name);
        let plain_name = candidate.file_name().and_then(|n| n.to_str()) == Some(name);
        if !plain_name || !is_deck_file(candidate) {
            return Err(ApiError::BadRequest(format!("invalid deck name: {}", name)));
        }

        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(ApiError::NotFound(format!("deck {}", name)));
        }

        let deck = load_deck(&path).map_err(EngineError::from)?;
        tracing::info!(deck = name, cards = deck.len(), "deck loaded");
        Ok(deck)
    }
}
