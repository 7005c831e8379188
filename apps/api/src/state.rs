use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::generation::generator::ReviewGenerator;
use crate::polisher::ReviewPolisher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The review synthesis engine — pure computation, shared across requests.
    pub generator: Arc<ReviewGenerator>,
    /// Pluggable polisher. `GeminiPolisher` when an API key is configured,
    /// `NoopPolisher` otherwise.
    pub polisher: Arc<dyn ReviewPolisher>,
    /// Kept for handlers that need runtime settings (none read it today).
    #[allow(dead_code)]
    pub config: Config,
}
