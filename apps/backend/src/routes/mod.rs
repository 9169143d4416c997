pub mod decks;
pub mod quiz;
