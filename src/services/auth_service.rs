//! Auth service - user registration.
//!
//! This service handles:
//! - Duplicate email detection
//! - Salted password hashing (bcrypt)
//! - Persisting the user document
//!
//! # Consistency
//!
//! The duplicate check and the insert are two separate store calls. Two
//! concurrent registrations with the same email can both pass the check; the
//! document store has no uniqueness constraint to stop them.

use chrono::Utc;
use serde_json::Value;

use crate::{
    error::AppError,
    models::{
        password::PasswordHash,
        user::{NewUser, UserResponse, fields},
    },
    store::{DocumentStore, USERS},
};

/// Register a new user.
///
/// The caller validates the payload first (see
/// [`RegisterRequest::validate`](crate::models::user::RegisterRequest::validate)),
/// so no store call happens for a bad request.
///
/// # Process
///
/// 1. Reject the email if a user already has it
/// 2. Hash the password on a blocking thread
/// 3. Insert the user document
/// 4. Return the written user, with the store's id, without its password hash
///
/// # Arguments
///
/// * `store` - Document store holding the `users` collection
/// * `new_user` - Validated registration
/// * `cost` - bcrypt work factor
///
/// # Errors
///
/// - `EmailAlreadyRegistered`: Another user has this email
/// - `Hashing`: bcrypt failed
/// - `Storage`: The store lookup or insert failed
pub async fn register(
    store: &dyn DocumentStore,
    new_user: NewUser,
    cost: u32,
) -> Result<UserResponse, AppError> {
    let email = new_user.email.to_string();

    let existing = store
        .find_by_field(USERS, fields::EMAIL, &Value::String(email.clone()))
        .await?;
    if !existing.is_empty() {
        tracing::warn!(backend = store.backend(), "Registration rejected: email already registered");
        return Err(AppError::EmailAlreadyRegistered(email));
    }

    let password = new_user.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || PasswordHash::new(&password, cost))
        .await
        .map_err(|e| AppError::Hashing(e.to_string()))?
        .map_err(|e| AppError::Hashing(e.to_string()))?;

    let created_at = Utc::now();
    let document = store
        .insert(USERS, new_user.to_fields(&password_hash, created_at))
        .await?;

    tracing::info!(user_id = %document.id, backend = store.backend(), "Registered new user");

    Ok(new_user.into_response(document.id, created_at))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::register;
    use crate::{
        error::AppError,
        models::{
            password::PasswordHash,
            user::{NewUser, RegisterRequest, fields},
        },
        store::{Document, DocumentStore, InMemoryStore, USERS},
        test_utils::FailingStore,
    };

    const TEST_COST: u32 = 4;

    fn jane(email: &str) -> NewUser {
        RegisterRequest {
            email: email.to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            password: "hunter22".to_string(),
        }
        .validate()
        .unwrap()
    }

    fn stored_hash(document: &Document) -> PasswordHash {
        PasswordHash::new_unchecked(document.fields[fields::PASSWORD_HASH].as_str().unwrap())
    }

    #[tokio::test]
    async fn register_returns_user_without_password() {
        let store = InMemoryStore::new();

        let user = register(&store, jane("jane@example.com"), TEST_COST)
            .await
            .unwrap();

        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.first_name, "Jane");
        let body = serde_json::to_value(&user).unwrap();
        let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 5);
        assert!(keys.iter().all(|key| !key.to_lowercase().contains("password")));
    }

    #[tokio::test]
    async fn register_stores_verifiable_hash() {
        let store = InMemoryStore::new();

        let response = register(&store, jane("jane@example.com"), TEST_COST)
            .await
            .unwrap();

        let stored = store.list(USERS).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, response.id);
        assert_ne!(stored[0].fields[fields::PASSWORD_HASH], json!("hunter22"));
        assert!(stored_hash(&stored[0]).verify("hunter22").unwrap());
    }

    #[tokio::test]
    async fn response_echoes_stored_document() {
        let store = InMemoryStore::new();

        let response = register(&store, jane("jane@example.com"), TEST_COST)
            .await
            .unwrap();

        let stored = &store.list(USERS).await.unwrap()[0];
        assert_eq!(response.id, stored.id);
        assert_eq!(stored.fields[fields::EMAIL], response.email);
        assert_eq!(stored.fields[fields::FIRST_NAME], response.first_name);
        assert_eq!(stored.fields[fields::LAST_NAME], response.last_name);
        assert_eq!(stored.fields[fields::CREATED_AT], response.created_at.to_rfc3339());
    }

    #[tokio::test]
    async fn same_password_gets_different_hashes() {
        let store = InMemoryStore::new();
        register(&store, jane("one@example.com"), TEST_COST).await.unwrap();
        register(&store, jane("two@example.com"), TEST_COST).await.unwrap();

        let users = store.list(USERS).await.unwrap();
        let hashes: Vec<PasswordHash> = users.iter().map(stored_hash).collect();

        assert_ne!(hashes[0], hashes[1]);
        assert!(hashes.iter().all(|hash| hash.verify("hunter22").unwrap()));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryStore::new();
        register(&store, jane("jane@example.com"), TEST_COST)
            .await
            .unwrap();

        let result = register(&store, jane("JANE@example.com"), TEST_COST).await;

        assert!(matches!(result, Err(AppError::EmailAlreadyRegistered(e)) if e == "jane@example.com"));
        assert_eq!(store.len(USERS).await, 1);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_storage_error() {
        let result = register(&FailingStore, jane("jane@example.com"), TEST_COST).await;

        assert!(matches!(result, Err(AppError::Storage(_))));
    }
}
