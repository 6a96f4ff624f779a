//! User data models and API request/response types.
//!
//! This module defines:
//! - `RegisterRequest`: Request body for registration
//! - `NewUser`: A validated registration, ready to be hashed and stored
//! - `UserResponse`: Response body returned to clients (no password hash)

use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::AppError,
    models::password::{PasswordHash, ValidatedPassword},
    store::Fields,
};

/// Stored field names of a user document.
pub mod fields {
    pub const EMAIL: &str = "email";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const PASSWORD_HASH: &str = "passwordHash";
    pub const CREATED_AT: &str = "createdAt";
}

/// Request body for registering a new user.
///
/// # JSON Example
///
/// ```json
/// {
///   "email": "jane@example.com",
///   "firstName": "Jane",
///   "lastName": "Doe",
///   "password": "s3cret!"
/// }
/// ```
///
/// Missing fields deserialize as empty strings so they are reported by
/// [`RegisterRequest::validate`] instead of the JSON extractor.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"********")
            .finish()
    }
}

impl RegisterRequest {
    /// Check every field and collect all violations into one error.
    ///
    /// Emails are trimmed and lower-cased; names are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` listing each violated rule.
    pub fn validate(self) -> Result<NewUser, AppError> {
        let mut problems = Vec::new();

        let email = self.email.trim().to_lowercase();
        let email = if email.is_empty() {
            problems.push("email should not be empty".to_string());
            None
        } else {
            match email.parse::<EmailAddress>() {
                Ok(address) => Some(address),
                Err(_) => {
                    problems.push("email must be an email".to_string());
                    None
                }
            }
        };

        let first_name = self.first_name.trim().to_string();
        if first_name.is_empty() {
            problems.push("firstName should not be empty".to_string());
        }

        let last_name = self.last_name.trim().to_string();
        if last_name.is_empty() {
            problems.push("lastName should not be empty".to_string());
        }

        let password = ValidatedPassword::new(&self.password)
            .map_err(|e| problems.push(e.to_string()))
            .ok();

        match (email, password) {
            (Some(email), Some(password)) if problems.is_empty() => Ok(NewUser {
                email,
                first_name,
                last_name,
                password,
            }),
            _ => Err(AppError::Validation(problems.join("; "))),
        }
    }
}

/// A registration that passed validation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub password: ValidatedPassword,
}

impl NewUser {
    /// The document fields to persist. Only the hash of the password is stored.
    pub fn to_fields(&self, password_hash: &PasswordHash, created_at: DateTime<Utc>) -> Fields {
        let mut document = Fields::new();
        document.insert(fields::EMAIL.into(), Value::String(self.email.to_string()));
        document.insert(fields::FIRST_NAME.into(), Value::String(self.first_name.clone()));
        document.insert(fields::LAST_NAME.into(), Value::String(self.last_name.clone()));
        document.insert(
            fields::PASSWORD_HASH.into(),
            Value::String(password_hash.as_str().to_string()),
        );
        document.insert(fields::CREATED_AT.into(), Value::String(created_at.to_rfc3339()));
        document
    }

    /// The response for this user once the store has assigned it `id`.
    ///
    /// Built from the values that were written, so the password never
    /// reaches the response.
    pub fn into_response(self, id: String, created_at: DateTime<Utc>) -> UserResponse {
        UserResponse {
            id,
            email: self.email.to_string(),
            first_name: self.first_name,
            last_name: self.last_name,
            created_at,
        }
    }
}

/// Response body for registration.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "0f8fad5bd9cb469fa16570867728950e",
///   "email": "jane@example.com",
///   "firstName": "Jane",
///   "lastName": "Doe",
///   "createdAt": "2025-06-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{RegisterRequest, fields};
    use crate::{error::AppError, models::password::PasswordHash};

    fn request(email: &str, first: &str, last: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn validate_normalizes_fields() {
        let user = request("  Jane@Example.COM ", " Jane ", "Doe ", "secret1")
            .validate()
            .unwrap();

        assert_eq!(user.email.to_string(), "jane@example.com");
        assert_eq!(user.first_name, "Jane");
        assert_eq!(user.last_name, "Doe");
    }

    #[test]
    fn validate_collects_every_problem() {
        let Err(AppError::Validation(message)) = request("", " ", "", "123").validate() else {
            panic!("expected a validation error");
        };

        assert!(message.contains("email should not be empty"));
        assert!(message.contains("firstName should not be empty"));
        assert!(message.contains("lastName should not be empty"));
        assert!(message.contains("password must be longer than or equal to 6 characters"));
    }

    #[test]
    fn validate_rejects_malformed_email() {
        let result = request("not-an-email", "Jane", "Doe", "secret1").validate();

        assert!(matches!(result, Err(AppError::Validation(m)) if m == "email must be an email"));
    }

    #[test]
    fn validate_rejects_blank_and_partial_emails() {
        for email in ["", "   ", "no-at-sign", "@example.com"] {
            let result = request(email, "Jane", "Doe", "secret1").validate();
            assert!(
                matches!(result, Err(AppError::Validation(_))),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn debug_hides_password() {
        let output = format!("{:?}", request("a@example.com", "A", "B", "topsecret"));

        assert!(!output.contains("topsecret"));
    }

    #[test]
    fn stored_fields_hold_hash_not_password() {
        let new_user = request("jane@example.com", "Jane", "Doe", "secret1")
            .validate()
            .unwrap();
        let hash = PasswordHash::new_unchecked("$2b$04$abcdefghijklmnopqrstuv");

        let stored = new_user.to_fields(&hash, Utc::now());

        assert_eq!(stored[fields::PASSWORD_HASH], hash.as_str());
        assert!(stored.values().all(|value| value != "secret1"));
        assert!(!stored.contains_key("password"));
    }

    #[test]
    fn response_matches_stored_fields() {
        let new_user = request("jane@example.com", "Jane", "Doe", "secret1")
            .validate()
            .unwrap();
        let created_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let stored = new_user.to_fields(&PasswordHash::new_unchecked("$2b$04$x"), created_at);

        let response = new_user.into_response("u1".to_string(), created_at);

        assert_eq!(response.id, "u1");
        assert_eq!(stored[fields::EMAIL], response.email);
        assert_eq!(stored[fields::FIRST_NAME], response.first_name);
        assert_eq!(stored[fields::LAST_NAME], response.last_name);
        assert_eq!(stored[fields::CREATED_AT], created_at.to_rfc3339());
    }
}
