//! Quiz endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::sessions::UserSlot;
use crate::AppState;

/// POST /api/users/:user_id/quiz
pub async fn next(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<QuizResponse>> {
    let slot = state
        .sessions
        .existing(&user_id)
        .ok_or_else(|| ApiError::no_session(&user_id))?;
    let mut slot = slot.lock().await;
    let UserSlot { session, rng } = &mut *slot;
    let session = session.as_mut().ok_or_else(|| ApiError::no_session(&user_id))?;

    let quiz = session.next_quiz(rng)?;
    Ok(Json(QuizResponse::from(quiz)))
}

/// POST /api/users/:user_id/answer
///
/// Grades the pending quiz, persists the new weights and returns the next quiz.
/// Once the answer is saved the request succeeds, even if no next quiz can be drawn.
pub async fn answer(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let slot = state
        .sessions
        .existing(&user_id)
        .ok_or_else(|| ApiError::no_session(&user_id))?;
    let mut slot = slot.lock().await;
    let UserSlot { session, rng } = &mut *slot;
    let session = session.as_mut().ok_or_else(|| ApiError::no_session(&user_id))?;

    let outcome = session.answer(state.store.as_ref(), payload.position)?;
    let next = session.next_quiz(rng);
    if let Err(e) = &next {
        tracing::warn!(user_id = %user_id, error = %e, "answer recorded but no next quiz");
    }
    Ok(Json(AnswerResponse::new(outcome, next)))
}

/// GET /api/users/:user_id/session
pub async fn session(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<SessionResponse>> {
    let slot = state
        .sessions
        .existing(&user_id)
        .ok_or_else(|| ApiError::no_session(&user_id))?;
    let slot = slot.lock().await;
    let session = slot
        .session
        .as_ref()
        .ok_or_else(|| ApiError::no_session(&user_id))?;

    Ok(Json(SessionResponse {
        deck: session.deck_name().to_string(),
        card_count: session.deck().len(),
        weights: session.weights().to_vec(),
        pending: session.pending().map(QuizResponse::from),
    }))
}
