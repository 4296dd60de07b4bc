mod auth;
mod billing;
mod config;
mod db;
mod errors;
mod job_offer;
mod llm_client;
mod models;
mod review;
mod routes;
mod state;

use anyhow::Result;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::billing::checkout::StripeClient;
use crate::billing::credits::refill_daily_credits;
use crate::config::Config;
use crate::db::create_pool;
use crate::job_offer::ReaderFetcher;
use crate::llm_client::LlmClient;
use crate::review::rules::GuardrailConfig;
use crate::routes::build_router;
use crate::state::AppState;

const CREDIT_REFILL_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Review API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!(
        "LLM client initialized (models: {})",
        llm_client::MODEL_FALLBACKS.join(", ")
    );

    let fetcher = Arc::new(ReaderFetcher::new(config.reader_base_url.clone())?);
    info!("Job offer fetcher using reader at {}", config.reader_base_url);

    let stripe = match config.billing.stripe_secret_key.clone() {
        Some(key) => Some(StripeClient::new(key)?),
        None => {
            warn!("STRIPE_SECRET_KEY not set, checkout is disabled");
            None
        }
    };

    let guardrails = Arc::new(GuardrailConfig::default());

    spawn_credit_refill(db.clone());

    let state = AppState {
        db,
        llm,
        config: config.clone(),
        fetcher,
        guardrails,
        stripe,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Resets balances to each tier's daily limit once a day.
fn spawn_credit_refill(db: PgPool) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CREDIT_REFILL_INTERVAL);
        loop {
            ticker.tick().await;
            match refill_daily_credits(&db).await {
                Ok(refilled) => info!("Daily credit refill: {refilled} profiles topped up"),
                Err(e) => error!("Daily credit refill failed: {e}"),
            }
        }
    });
}
