use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::repo_types::User;

/// Request body for user registration. Fields stay untyped so missing or
/// mistyped ones are reported per field instead of as a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub full_name: Option<Value>,
    pub email: Option<Value>,
    pub password: Option<Value>,
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<Value>,
    pub password: Option<Value>,
}

/// Response returned after login or register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Response of `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_serializes_camel_case_without_password() {
        let user = User {
            id: Uuid::new_v4(),
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: time::OffsetDateTime::now_utc(),
            updated_at: time::OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(PublicUser::from(user)).unwrap();
        assert_eq!(json["fullName"], "Ada Lovelace");
        assert_eq!(json["email"], "ada@example.com");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn register_request_tolerates_missing_and_mistyped_fields() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@b.co","password":123456}"#).unwrap();
        assert_eq!(req.email, Some(Value::from("a@b.co")));
        assert_eq!(req.password, Some(Value::from(123456)));
        assert!(req.full_name.is_none());
    }
}
