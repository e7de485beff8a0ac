use serde_json::Value;
use uuid::Uuid;

use super::dto::CreateIdeaRequest;
use crate::error::{AppError, FieldErrors};
use crate::extract::loose_text;

/// A create-idea body with every required field present and non-blank.
#[derive(Debug, Clone)]
pub struct IdeaSubmission {
    pub title: String,
    pub problem: String,
    pub proposed_solution: String,
    pub target_audience: String,
    pub tags: Vec<String>,
}

fn required(
    value: Option<Value>,
    field: &str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match loose_text(value) {
        Ok(Some(v)) if !v.trim().is_empty() => Some(v),
        Ok(_) => {
            errors.insert(field.into(), format!("{label} is required"));
            None
        }
        Err(_) => {
            errors.insert(field.into(), format!("{label} must be text"));
            None
        }
    }
}

/// A missing key means no tags. Anything else must be an array whose
/// entries are scalars; those are read as text and `null` entries skipped.
fn read_tags(value: Option<Value>, errors: &mut FieldErrors) -> Option<Vec<String>> {
    let entries = match value {
        None => return Some(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            errors.insert("tags".into(), "Tags must be an array".into());
            return None;
        }
    };
    let mut tags = Vec::with_capacity(entries.len());
    for entry in entries {
        match loose_text(Some(entry)) {
            Ok(Some(tag)) => tags.push(tag),
            Ok(None) => {}
            Err(_) => {
                errors.insert("tags".into(), "Tags must be text values".into());
                return None;
            }
        }
    }
    Some(tags)
}

pub fn validate_create_idea(req: CreateIdeaRequest) -> Result<IdeaSubmission, AppError> {
    let mut errors = FieldErrors::new();

    let title = required(req.title, "title", "Title", &mut errors);
    let problem = required(req.problem, "problem", "Problem", &mut errors);
    let proposed_solution = required(
        req.proposed_solution,
        "proposedSolution",
        "Proposed solution",
        &mut errors,
    );
    let target_audience = required(
        req.target_audience,
        "targetAudience",
        "Target audience",
        &mut errors,
    );
    let tags = read_tags(req.tags, &mut errors);

    match (title, problem, proposed_solution, target_audience, tags) {
        (Some(title), Some(problem), Some(proposed_solution), Some(target_audience), Some(tags))
            if errors.is_empty() =>
        {
            Ok(IdeaSubmission {
                title,
                problem,
                proposed_solution,
                target_audience,
                tags,
            })
        }
        _ => Err(AppError::Validation(errors)),
    }
}

/// Idea ids are UUIDs; anything else is rejected before touching the store.
pub fn parse_idea_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId)
}
