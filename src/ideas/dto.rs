use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{IdeaRow, IdeaSummaryRow};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateIdeaRequest {
    pub title: Option<Value>,
    pub problem: Option<Value>,
    pub proposed_solution: Option<Value>,
    pub target_audience: Option<Value>,
    /// `None` only when the key is missing; an explicit `null` is kept.
    #[serde(default, deserialize_with = "present")]
    pub tags: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorDetail {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorSummary {
    pub id: Uuid,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDetails {
    pub id: Uuid,
    pub title: String,
    pub problem: String,
    pub proposed_solution: String,
    pub target_audience: String,
    pub tags: Vec<String>,
    pub created_by: CreatorDetail,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaListItem {
    pub id: Uuid,
    pub title: String,
    pub problem: String,
    pub tags: Vec<String>,
    pub created_by: CreatorSummary,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct IdeaResponse {
    pub idea: IdeaDetails,
}

#[derive(Debug, Serialize)]
pub struct IdeaListResponse {
    pub ideas: Vec<IdeaListItem>,
}

impl From<IdeaRow> for IdeaDetails {
    fn from(r: IdeaRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            problem: r.problem,
            proposed_solution: r.proposed_solution,
            target_audience: r.target_audience,
            tags: r.tags,
            created_by: CreatorDetail {
                id: r.created_by,
                full_name: r.creator_name,
                email: r.creator_email,
            },
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<IdeaSummaryRow> for IdeaListItem {
    fn from(r: IdeaSummaryRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            problem: r.problem,
            tags: r.tags,
            created_by: CreatorSummary {
                id: r.created_by,
                full_name: r.creator_name,
            },
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
