use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, MeResponse, PublicUser, RegisterRequest},
        extractors::AuthUser,
        services,
        validate::{validate_login, validate_register},
    },
    error::AppError,
    extract::ValidJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let input = validate_register(payload)?;
    let res = services::register(&state, input).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let input = validate_login(payload)?;
    let res = services::login(&state, input).await?;
    Ok(Json(res))
}

#[instrument(skip_all)]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: PublicUser::from(user),
    })
}
