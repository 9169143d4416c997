pub mod decks;
pub mod sessions;
