use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::dto::{LoginRequest, RegisterRequest};
use crate::error::{AppError, FieldErrors};
use crate::extract::loose_text;

pub const MIN_FULL_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Registration input that passed validation. Email is lowercased, name trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Login input that passed validation. Email is lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles");
    }
    EMAIL_RE.is_match(email)
}

fn reject<T>(errors: &mut FieldErrors, field: &str, message: impl Into<String>) -> Option<T> {
    errors.insert(field.into(), message.into());
    None
}

fn check_email(raw: Option<Value>, errors: &mut FieldErrors) -> Option<String> {
    let Ok(raw) = loose_text(raw) else {
        return reject(errors, "email", "Email must be text");
    };
    match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => reject(errors, "email", "Email is required"),
        Some(email) if !is_valid_email(email) => reject(errors, "email", "Invalid email"),
        Some(email) => Some(email.to_lowercase()),
    }
}

fn check_password(raw: Option<Value>, errors: &mut FieldErrors) -> Option<String> {
    match loose_text(raw) {
        Err(_) => reject(errors, "password", "Password must be text"),
        Ok(password) => match password.filter(|p| !p.is_empty()) {
            None => reject(errors, "password", "Password is required"),
            Some(p) => Some(p),
        },
    }
}

pub fn validate_register(req: RegisterRequest) -> Result<Registration, AppError> {
    let mut errors = FieldErrors::new();

    let full_name = match loose_text(req.full_name) {
        Err(_) => reject(&mut errors, "fullName", "Full name must be text"),
        Ok(name) => match name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => reject(&mut errors, "fullName", "Full name is required"),
            Some(name) if name.chars().count() < MIN_FULL_NAME_LEN => reject(
                &mut errors,
                "fullName",
                format!("Full name must be at least {MIN_FULL_NAME_LEN} characters"),
            ),
            Some(name) => Some(name.to_string()),
        },
    };

    let email = check_email(req.email, &mut errors);

    let password = match check_password(req.password, &mut errors) {
        Some(p) if p.chars().count() < MIN_PASSWORD_LEN => reject(
            &mut errors,
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ),
        other => other,
    };

    match (full_name, email, password) {
        (Some(full_name), Some(email), Some(password)) if errors.is_empty() => Ok(Registration {
            full_name,
            email,
            password,
        }),
        _ => Err(AppError::Validation(errors)),
    }
}

/// Login does not enforce the registration length policy: a password stored
/// under an older, shorter minimum must still be able to authenticate.
pub fn validate_login(req: LoginRequest) -> Result<Credentials, AppError> {
    let mut errors = FieldErrors::new();

    let email = check_email(req.email, &mut errors);
    let password = check_password(req.password, &mut errors);

    match (email, password) {
        (Some(email), Some(password)) if errors.is_empty() => Ok(Credentials { email, password }),
        _ => Err(AppError::Validation(errors)),
    }
}
