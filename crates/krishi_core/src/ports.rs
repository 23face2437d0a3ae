//! crates/krishi_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like the
//! account database or the artifact filesystem.

use async_trait::async_trait;
use std::sync::Arc;

use crate::codec::Vocabulary;
use crate::domain::{AccountCredentials, UserAccount};
use crate::error::PredictError;
use crate::model::Artifact;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all store port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    Duplicate(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The persisted account table: read and append only.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Creates an account with an already-hashed credential. Fails with
    /// `PortError::Duplicate` if the email is taken.
    async fn create_account(&self, email: &str, password_hash: &str) -> PortResult<UserAccount>;

    /// Looks an account up for login; `None` when the email is unknown.
    async fn find_by_email(&self, email: &str) -> PortResult<Option<AccountCredentials>>;
}

/// The ephemeral login-session store, keyed by an opaque cookie value.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a session for an authenticated identity and returns its
    /// opaque id.
    async fn create(&self, email: &str) -> PortResult<String>;

    /// Resolves a session id to the identity it holds, if the session is
    /// live. Expired sessions resolve to `None`.
    async fn identity(&self, session_id: &str) -> PortResult<Option<String>>;

    /// Destroys a session. Destroying an unknown id is not an error.
    async fn destroy(&self, session_id: &str) -> PortResult<()>;
}

/// Loads named model artifacts from storage. Every call pays the full load
/// cost; there is no cross-request cache.
#[async_trait]
pub trait ModelStore: Send + Sync {
    async fn load(&self, name: &str) -> Result<Artifact, PredictError>;
}

/// Provides the crop label vocabulary used to decode classifier output.
#[async_trait]
pub trait VocabularySource: Send + Sync {
    async fn vocabulary(&self) -> Result<Arc<Vocabulary>, PredictError>;
}
