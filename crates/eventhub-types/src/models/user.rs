//! User model and authentication payloads.

use super::ResourceId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A registered user as returned by the backend.
///
/// Every field is optional on the wire; profile payloads differ between
/// endpoints and are never validated locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (`id` or `_id`)
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    /// Single display name, for backends that do not split it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Given name
    #[serde(default)]
    pub first_name: String,
    /// Family name
    #[serde(default)]
    pub last_name: String,
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Backend role (e.g. "admin"), when exposed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    /// "First Last", trimmed when either part is missing. Falls back to
    /// `name`, then to the email.
    pub fn full_name(&self) -> String {
        let split = format!("{} {}", self.first_name, self.last_name).trim().to_string();
        if !split.is_empty() {
            return split;
        }
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(|| self.email.clone(), str::to_string)
    }
}

/// Profile endpoints answer either with a bare user or `{ "user": {...} }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserEnvelope {
    /// `{ "user": {...} }`
    Wrapped {
        /// The wrapped user
        user: User,
    },
    /// A bare user object
    Bare(User),
}

impl UserEnvelope {
    /// Unwrap into the contained user.
    pub fn into_user(self) -> User {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

/// Body of `POST users/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST users/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST users/login`.
///
/// Decoded leniently: a string `token` is always kept, whatever shape the
/// rest of the body has.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer credential; absent when the server declined to issue one
    #[serde(default, deserialize_with = "string_or_none")]
    pub token: Option<String>,
    /// Profile of the authenticated user, exactly as sent
    #[serde(default)]
    pub user: Option<Value>,
    /// Optional status message
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}

impl LoginResponse {
    /// The returned profile as a [`User`], if it is an object.
    pub fn profile(&self) -> Option<User> {
        self.user.clone().and_then(|v| serde_json::from_value(v).ok())
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_accepts_both_shapes() {
        let wrapped: UserEnvelope = serde_json::from_value(serde_json::json!({
            "user": { "id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@x.com" }
        }))
        .unwrap();
        let bare: UserEnvelope = serde_json::from_value(serde_json::json!({
            "id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@x.com"
        }))
        .unwrap();

        assert_eq!(wrapped.into_user(), bare.into_user());
    }

    #[test]
    fn test_full_name_trims_missing_parts() {
        let user: User =
            serde_json::from_value(serde_json::json!({ "id": "u1", "firstName": "Ada" })).unwrap();
        assert_eq!(user.full_name(), "Ada");
        assert!(user.email.is_empty());
    }

    #[test]
    fn test_user_without_numeric_id() {
        let user: User = serde_json::from_value(serde_json::json!({
            "name": "Ada Lovelace", "email": "ada@x.com"
        }))
        .unwrap();
        assert_eq!(user.id, None);
        assert_eq!(user.full_name(), "Ada Lovelace");

        let user: User =
            serde_json::from_value(serde_json::json!({ "_id": "64f0c2", "email": "ada@x.com" }))
                .unwrap();
        assert_eq!(user.id, Some(ResourceId::Text("64f0c2".to_string())));
        assert_eq!(user.full_name(), "ada@x.com");
    }

    #[test]
    fn test_login_response_keeps_token_with_any_user_shape() {
        let response: LoginResponse = serde_json::from_value(serde_json::json!({
            "token": "T1",
            "user": { "name": "Ada" }
        }))
        .unwrap();
        assert_eq!(response.token.as_deref(), Some("T1"));
        assert_eq!(response.profile().unwrap().full_name(), "Ada");

        let odd: LoginResponse = serde_json::from_value(serde_json::json!({
            "token": 42,
            "user": "ada",
            "message": { "text": "hi" }
        }))
        .unwrap();
        assert_eq!(odd.token, None);
        assert_eq!(odd.message, None);
        assert!(odd.profile().is_none());
    }

    #[test]
    fn test_register_request_uses_camel_case() {
        let req = RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            password: "p".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
    }
}
