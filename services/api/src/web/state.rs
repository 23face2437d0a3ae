//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use krishi_core::ports::{AccountStore, ModelStore, SessionStore, VocabularySource};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. There is no other process-wide mutable state; each request is
/// handled against this context alone.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub models: Arc<dyn ModelStore>,
    pub vocabulary: Arc<dyn VocabularySource>,
    pub config: Arc<Config>,
}
