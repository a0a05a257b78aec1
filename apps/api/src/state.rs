use std::sync::Arc;

use crate::config::Config;
use crate::generation::retry::RetryPolicy;
use crate::llm_client::CompletionModel;
use crate::storage::Publisher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production, scripted fakes in tests.
    pub model: Arc<dyn CompletionModel>,
    pub publisher: Publisher,
    pub retry: RetryPolicy,
    pub config: Config,
}
