use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{AuthResponse, PublicUser},
    jwt::JwtKeys,
    password::{hash_password, verify_decoy, verify_password},
    repo_types::{NewUser, User},
    validate::{Credentials, Registration},
};
use crate::{config::JwtConfig, db::StoreError, error::AppError, state::AppState};

fn issue(state: &AppState, user: User) -> Result<AuthResponse, AppError> {
    let keys = JwtKeys::try_from(&state.config.jwt)?;
    let token = keys.sign(user.id)?;
    Ok(AuthResponse {
        token,
        user: PublicUser::from(user),
    })
}

#[instrument(skip(state, input), fields(email = %input.email))]
pub async fn register(state: &AppState, input: Registration) -> Result<AuthResponse, AppError> {
    // Fail before doing any work when tokens cannot be issued.
    JwtKeys::try_from(&state.config.jwt)?;

    if state.users.find_by_email(&input.email).await?.is_some() {
        warn!("email already registered");
        return Err(AppError::Conflict("Email already in use".into()));
    }

    let password_hash = hash_password(input.password).await?;
    let user = state
        .users
        .create(NewUser {
            full_name: input.full_name,
            email: input.email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            // lost a race with a concurrent registration
            StoreError::Duplicate { .. } => AppError::Conflict("Email already in use".into()),
            other => other.into(),
        })?;

    info!(user_id = %user.id, "user registered");
    issue(state, user)
}

#[instrument(skip(state, input), fields(email = %input.email))]
pub async fn login(state: &AppState, input: Credentials) -> Result<AuthResponse, AppError> {
    let Some(user) = state.users.find_by_email(&input.email).await? else {
        verify_decoy(input.password).await?;
        warn!("login unknown email");
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(input.password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::invalid_credentials());
    }

    info!(user_id = %user.id, "user logged in");
    issue(state, user)
}

/// Checks signature, expiry, issuer and audience; returns the embedded user id.
pub fn verify_token(cfg: &JwtConfig, token: Option<&str>) -> Result<Uuid, AppError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Auth("Not authorized".into()))?;
    let keys = JwtKeys::try_from(cfg)?;
    keys.verify(token).map(|claims| claims.sub).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        AppError::Auth("Invalid token".into())
    })
}

/// Resolves a bearer token to a stored user.
pub async fn authenticate(state: &AppState, token: Option<&str>) -> Result<User, AppError> {
    let user_id = verify_token(&state.config.jwt, token)?;
    match state.users.find_by_id(user_id).await? {
        Some(user) => Ok(user),
        None => {
            warn!(%user_id, "token for unknown user");
            Err(AppError::Auth("User not found".into()))
        }
    }
}
