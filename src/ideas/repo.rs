use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    model::NewIdea,
    repo_types::{IdeaRow, IdeaSummaryRow},
};
use crate::db::{PgStore, StoreError};

/// Idea store. Ideas are append-only: there is no update or delete.
#[async_trait]
pub trait IdeaStore: Send + Sync {
    /// Persists the idea and returns it joined with its creator.
    async fn insert(&self, idea: NewIdea) -> Result<IdeaRow, StoreError>;
    /// Every idea, newest first. Ideas sharing a timestamp come back in
    /// reverse insertion order.
    async fn list_summaries(&self) -> Result<Vec<IdeaSummaryRow>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<IdeaRow>, StoreError>;
}

#[async_trait]
impl IdeaStore for PgStore {
    async fn insert(&self, idea: NewIdea) -> Result<IdeaRow, StoreError> {
        let now = OffsetDateTime::now_utc();
        let row = sqlx::query_as::<_, IdeaRow>(
            r#"
            WITH inserted AS (
                INSERT INTO ideas (id, title, problem, proposed_solution, target_audience,
                                   tags, created_by, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
                RETURNING *
            )
            SELECT i.id, i.title, i.problem, i.proposed_solution, i.target_audience, i.tags,
                   i.created_by, u.full_name AS creator_name, u.email AS creator_email,
                   i.created_at, i.updated_at
            FROM inserted i
            JOIN users u ON u.id = i.created_by
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&idea.title)
        .bind(&idea.problem)
        .bind(&idea.proposed_solution)
        .bind(&idea.target_audience)
        .bind(&idea.tags)
        .bind(idea.owner)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_summaries(&self) -> Result<Vec<IdeaSummaryRow>, StoreError> {
        let rows = sqlx::query_as::<_, IdeaSummaryRow>(
            r#"
            SELECT i.id, i.title, i.problem, i.tags, i.created_by,
                   u.full_name AS creator_name, i.created_at, i.updated_at
            FROM ideas i
            JOIN users u ON u.id = i.created_by
            ORDER BY i.created_at DESC, i.seq DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IdeaRow>, StoreError> {
        let row = sqlx::query_as::<_, IdeaRow>(
            r#"
            SELECT i.id, i.title, i.problem, i.proposed_solution, i.target_audience, i.tags,
                   i.created_by, u.full_name AS creator_name, u.email AS creator_email,
                   i.created_at, i.updated_at
            FROM ideas i
            JOIN users u ON u.id = i.created_by
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
