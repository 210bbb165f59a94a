use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::state::AppState;
use crate::translate::to_form_shape;

/// GET /api/kandidat/:id
/// Fetches a candidate and returns it in the flat shape the form page
/// expects. Falls back to a bounded list scan when the direct endpoint
/// refuses the id. As a side effect, the record's skill string is pushed
/// into the spreadsheet.
pub async fn handle_get_kandidat(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Map<String, Value>>, AppError> {
    let candidate = match state.recruit.get_candidate(id).await? {
        Some(candidate) => Some(candidate),
        None => state.recruit.find_candidate_in_list(id).await,
    };

    let Some(candidate) = candidate else {
        return Err(AppError::NotFound(format!("Kandidat {id} nicht gefunden.")));
    };

    if let (Some(email), Some(skill)) = (&candidate.email, &candidate.skill) {
        state.airtable.update_skills(email, skill).await;
    }

    Ok(Json(to_form_shape(&candidate)))
}
