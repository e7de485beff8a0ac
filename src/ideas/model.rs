use uuid::Uuid;
use validator::Validate;

use super::validate::IdeaSubmission;
use crate::error::{AppError, FieldErrors};

pub const MAX_TAGS: usize = 20;

/// An idea ready to be stored: text trimmed, lengths checked, tags normalized.
#[derive(Debug, Clone, Validate)]
pub struct NewIdea {
    pub owner: Uuid,
    #[validate(length(min = 3, max = 120, message = "Title must be between 3 and 120 characters"))]
    pub title: String,
    #[validate(length(
        min = 10,
        max = 2000,
        message = "Problem must be between 10 and 2000 characters"
    ))]
    pub problem: String,
    #[validate(length(
        min = 10,
        max = 3000,
        message = "Proposed solution must be between 10 and 3000 characters"
    ))]
    pub proposed_solution: String,
    #[validate(length(
        min = 3,
        max = 300,
        message = "Target audience must be between 3 and 300 characters"
    ))]
    pub target_audience: String,
    pub tags: Vec<String>,
}

impl NewIdea {
    pub fn build(owner: Uuid, submission: IdeaSubmission) -> Result<Self, AppError> {
        let idea = Self {
            owner,
            title: submission.title.trim().to_string(),
            problem: submission.problem.trim().to_string(),
            proposed_solution: submission.proposed_solution.trim().to_string(),
            target_audience: submission.target_audience.trim().to_string(),
            tags: normalize_tags(submission.tags),
        };
        idea.validate().map_err(|e| {
            let mut errors = FieldErrors::new();
            for (field, errs) in e.field_errors() {
                let message = errs
                    .iter()
                    .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "Invalid value".to_string());
                errors.insert(camel_case(&field), message);
            }
            AppError::Validation(errors)
        })?;
        Ok(idea)
    }
}

/// Trims every tag, drops empty ones and keeps the first [`MAX_TAGS`].
/// Repeated tags are kept as given.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .take(MAX_TAGS)
        .collect()
}

fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> IdeaSubmission {
        IdeaSubmission {
            title: "  Compost club  ".into(),
            problem: "Food scraps end up in landfill.".into(),
            proposed_solution: "Shared neighbourhood compost bins with pickup.".into(),
            target_audience: "Apartment dwellers".into(),
            tags: vec![],
        }
    }

    #[test]
    fn tags_are_trimmed_and_empties_dropped_without_dedup() {
        let tags = normalize_tags(vec!["ai".into(), " ai ".into(), "".into(), "SaaS".into()]);
        assert_eq!(tags, vec!["ai", "ai", "SaaS"]);
    }

    #[test]
    fn tags_are_capped() {
        let input: Vec<String> = (0..30).map(|i| format!(" t{i} ")).collect();
        let tags = normalize_tags(input);
        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(tags[0], "t0");
        assert_eq!(tags[19], "t19");
    }

    #[test]
    fn whitespace_only_tags_do_not_count_toward_cap() {
        let mut input = vec!["   ".to_string(); 25];
        input.push("kept".into());
        assert_eq!(normalize_tags(input), vec!["kept"]);
    }

    #[test]
    fn build_trims_text_fields() {
        let idea = NewIdea::build(Uuid::new_v4(), submission()).unwrap();
        assert_eq!(idea.title, "Compost club");
    }

    #[test]
    fn build_reports_length_violations_by_field() {
        let mut s = submission();
        s.title = " ab ".into();
        s.proposed_solution = "too short".into();
        s.target_audience = "x".repeat(301);
        let err = NewIdea::build(Uuid::new_v4(), s).unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["title"], "Title must be between 3 and 120 characters");
        assert!(errors.contains_key("proposedSolution"));
        assert!(errors.contains_key("targetAudience"));
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let mut s = submission();
        s.title = "é".repeat(120);
        assert!(NewIdea::build(Uuid::new_v4(), s).is_ok());
    }

    #[test]
    fn camel_case_conversion() {
        assert_eq!(camel_case("proposed_solution"), "proposedSolution");
        assert_eq!(camel_case("title"), "title");
    }
}
