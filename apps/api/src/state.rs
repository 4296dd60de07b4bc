use std::sync::Arc;

use sqlx::PgPool;

use crate::billing::checkout::StripeClient;
use crate::config::Config;
use crate::job_offer::JobOfferFetcher;
use crate::llm_client::LlmClient;
use crate::review::rules::GuardrailConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    /// Job-offer source. Default: `ReaderFetcher` (reader proxy, then direct HTML).
    pub fetcher: Arc<dyn JobOfferFetcher>,
    pub guardrails: Arc<GuardrailConfig>,
    /// `None` when no Stripe secret key is configured; checkout then fails with 502.
    pub stripe: Option<StripeClient>,
}
