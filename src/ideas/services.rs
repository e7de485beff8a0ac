use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{IdeaDetails, IdeaListItem},
    model::NewIdea,
    validate::IdeaSubmission,
};
use crate::{error::AppError, state::AppState};

#[instrument(skip(state, submission))]
pub async fn create_idea(
    state: &AppState,
    owner: Uuid,
    submission: IdeaSubmission,
) -> Result<IdeaDetails, AppError> {
    let idea = NewIdea::build(owner, submission)?;
    let row = state.ideas.insert(idea).await?;
    info!(idea_id = %row.id, tags = row.tags.len(), "idea created");
    Ok(IdeaDetails::from(row))
}

#[instrument(skip(state))]
pub async fn list_ideas(state: &AppState) -> Result<Vec<IdeaListItem>, AppError> {
    let rows = state.ideas.list_summaries().await?;
    Ok(rows.into_iter().map(IdeaListItem::from).collect())
}

#[instrument(skip(state))]
pub async fn get_idea(state: &AppState, id: Uuid) -> Result<IdeaDetails, AppError> {
    state
        .ideas
        .find_by_id(id)
        .await?
        .map(IdeaDetails::from)
        .ok_or_else(|| AppError::NotFound("Idea not found".into()))
}
