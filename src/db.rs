use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

/// Failure surfaced by a store implementation, already classified.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for {field}")]
    Duplicate { field: String },

    /// The store refused the value (bad cast, check constraint, too long).
    #[error("rejected by store: {0}")]
    Rejected(String),

    #[error("row not found")]
    NotFound,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return Self::NotFound;
        }
        if let Some(db_err) = err.as_database_error() {
            match db_err.code().as_deref() {
                // unique_violation
                Some("23505") => {
                    let field = db_err
                        .constraint()
                        .map(field_from_constraint)
                        .unwrap_or_else(|| "key".to_string());
                    return Self::Duplicate { field };
                }
                // invalid_text_representation, check_violation, string_data_right_truncation
                Some("22P02") | Some("23514") | Some("22001") => {
                    return Self::Rejected(db_err.message().to_string());
                }
                _ => {}
            }
        }
        Self::Backend(anyhow::Error::new(err))
    }
}

/// `users_email_key` → `email`
fn field_from_constraint(constraint: &str) -> String {
    let trimmed = constraint
        .strip_suffix("_key")
        .or_else(|| constraint.strip_suffix("_idx"))
        .unwrap_or(constraint);
    match trimmed.split_once('_') {
        Some((_table, field)) if !field.is_empty() => field.to_string(),
        _ => trimmed.to_string(),
    }
}

/// Postgres-backed implementation of the user and idea stores.
#[derive(Clone)]
pub struct PgStore {
    pub pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) {
        if let Err(e) = sqlx::migrate!("./migrations").run(&self.pool).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }
    }
}
