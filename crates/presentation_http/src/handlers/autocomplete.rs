//! Place suggestion handler

use application::Suggestion;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::state::AppState;

/// Query string of `GET /autocomplete`
#[derive(Debug, Default, Deserialize)]
pub struct AutocompleteParams {
    /// Partially typed place name
    #[serde(default)]
    pub q: String,
}

/// Suggest in-region places for partial input
///
/// Always answers 200; provider failures and short input give `[]`.
#[instrument(skip(state))]
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> Json<Vec<Suggestion>> {
    Json(state.autocomplete_service.suggest(&params.q).await)
}
