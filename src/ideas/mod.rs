pub mod dto;
pub mod handlers;
pub mod model;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod validate;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::idea_routes()
}
