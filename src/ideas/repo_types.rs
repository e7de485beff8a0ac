use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// An idea joined with its creator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IdeaRow {
    pub id: Uuid,
    pub title: String,
    pub problem: String,
    pub proposed_solution: String,
    pub target_audience: String,
    pub tags: Vec<String>,
    pub created_by: Uuid,
    pub creator_name: String,
    pub creator_email: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// List projection: no solution or audience.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IdeaSummaryRow {
    pub id: Uuid,
    pub title: String,
    pub problem: String,
    pub tags: Vec<String>,
    pub created_by: Uuid,
    pub creator_name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
