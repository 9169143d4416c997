//! Deck endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use quiz_core::{validate_user_id, Session};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/decks
pub async fn list(State(state): State<AppState>) -> Result<Json<DeckListResponse>> {
    let decks = state.decks.list()?;
    Ok(Json(DeckListResponse { decks }))
}

/// POST /api/users/:user_id/import
///
/// Replaces any session the user already has.
pub async fn import(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<ImportDeckRequest>,
) -> Result<Json<ImportDeckResponse>> {
    validate_user_id(&user_id)?;
    let deck = Arc::new(state.decks.load(&payload.deck)?);

    let slot = state.sessions.slot(&user_id);
    let mut slot = slot.lock().await;

    let session = Session::open(
        state.store.as_ref(),
        &user_id,
        &payload.deck,
        deck,
        state.config.engine.clone(),
    )?;
    let response = ImportDeckResponse {
        deck: payload.deck,
        card_count: session.deck().len(),
        weights_reset: session.weights_reset(),
    };
    slot.session = Some(session);

    Ok(Json(response))
}
