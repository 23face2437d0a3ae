//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete
//! implementation of the `AccountStore` port from the `core` crate. It
//! handles all interactions with the SQLite database using `sqlx`.

use async_trait::async_trait;
use krishi_core::domain::{AccountCredentials, UserAccount};
use krishi_core::ports::{AccountStore, PortError, PortResult};
use sqlx::SqlitePool;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `AccountStore` port.
#[derive(Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    /// Creates a new `SqliteAccountStore`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(sqlx::FromRow)]
struct AccountRecord {
    id: String,
    email: String,
    password_hash: String,
}

impl AccountRecord {
    fn to_domain(self) -> PortResult<AccountCredentials> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| PortError::Unexpected(format!("malformed account id: {e}")))?;
        Ok(AccountCredentials {
            id,
            email: self.email,
            password_hash: self.password_hash,
        })
    }
}

//=========================================================================================
// `AccountStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn create_account(&self, email: &str, password_hash: &str) -> PortResult<UserAccount> {
        // The unique index still catches registrations that race past this
        // pre-check.
        let existing = sqlx::query_as::<_, AccountRecord>(
            "SELECT id, email, password_hash FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if existing.is_some() {
            return Err(PortError::Duplicate(email.to_string()));
        }

        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, email, password_hash) VALUES (?1, ?2, ?3)")
            .bind(id.to_string())
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let unique_violation = e
                    .as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false);
                if unique_violation {
                    PortError::Duplicate(email.to_string())
                } else {
                    PortError::Unexpected(e.to_string())
                }
            })?;

        Ok(UserAccount {
            id,
            email: email.to_string(),
        })
    }

    async fn find_by_email(&self, email: &str) -> PortResult<Option<AccountCredentials>> {
        let record = sqlx::query_as::<_, AccountRecord>(
            "SELECT id, email, password_hash FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        record.map(AccountRecord::to_domain).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> SqliteAccountStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory sqlite");
        let store = SqliteAccountStore::new(pool);
        store.run_migrations().await.expect("run migrations");
        store
    }

    #[tokio::test]
    async fn create_then_find_round_trips_the_account() {
        let store = store().await;
        let account = store
            .create_account("farmer@example.com", "hash")
            .await
            .unwrap();

        let creds = store
            .find_by_email("farmer@example.com")
            .await
            .unwrap()
            .expect("account exists");
        assert_eq!(creds.id, account.id);
        assert_eq!(creds.password_hash, "hash");
    }

    #[tokio::test]
    async fn registering_the_same_email_twice_is_a_duplicate_not_a_second_row() {
        let store = store().await;
        store
            .create_account("farmer@example.com", "hash-one")
            .await
            .unwrap();

        let err = store
            .create_account("farmer@example.com", "hash-two")
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Duplicate(_)));

        // The original credential is untouched.
        let creds = store
            .find_by_email("farmer@example.com")
            .await
            .unwrap()
            .expect("account exists");
        assert_eq!(creds.password_hash, "hash-one");
    }

    #[tokio::test]
    async fn unknown_email_resolves_to_none() {
        let store = store().await;
        assert!(store
            .find_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }
}
