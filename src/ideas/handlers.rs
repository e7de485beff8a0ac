use axum::{
    extract::{Path, State},
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateIdeaRequest, IdeaListResponse, IdeaResponse},
    services,
    validate::{parse_idea_id, validate_create_idea},
};
use crate::{
    auth::{extractors::BearerToken, services::authenticate},
    error::AppError,
    extract::ValidJson,
    state::AppState,
};

pub fn idea_routes() -> Router<AppState> {
    Router::new()
        .route("/ideas", get(list_ideas).post(create_idea))
        .route("/ideas/:id", get(get_idea))
}

/// POST /ideas
/// Body is validated before the token is checked.
#[instrument(skip(state, token, payload))]
pub async fn create_idea(
    State(state): State<AppState>,
    token: BearerToken,
    ValidJson(payload): ValidJson<CreateIdeaRequest>,
) -> Result<(StatusCode, HeaderMap, Json<IdeaResponse>), AppError> {
    let submission = validate_create_idea(payload)?;
    let user = authenticate(&state, token.as_deref()).await?;

    let idea = services::create_idea(&state, user.id, submission).await?;

    let mut headers = HeaderMap::new();
    let location = HeaderValue::from_str(&format!("/api/ideas/{}", idea.id))
        .map_err(|e| AppError::Internal(e.into()))?;
    headers.insert(LOCATION, location);

    Ok((StatusCode::CREATED, headers, Json(IdeaResponse { idea })))
}

#[instrument(skip(state))]
pub async fn list_ideas(State(state): State<AppState>) -> Result<Json<IdeaListResponse>, AppError> {
    let ideas = services::list_ideas(&state).await?;
    Ok(Json(IdeaListResponse { ideas }))
}

#[instrument(skip(state))]
pub async fn get_idea(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IdeaResponse>, AppError> {
    let id = parse_idea_id(&id)?;
    let idea = services::get_idea(&state, id).await?;
    Ok(Json(IdeaResponse { idea }))
}
