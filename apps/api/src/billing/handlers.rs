use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::billing::checkout::CheckoutSession;
use crate::billing::credits::{apply_subscription, get_profile};
use crate::billing::tiers::SubscriptionTier;
use crate::billing::webhook::{authenticate, checkout_upgrade, StripeEvent, SIGNATURE_HEADER};
use crate::errors::AppError;
use crate::state::AppState;

const DEFAULT_ORIGIN: &str = "http://localhost:3000";

#[derive(Serialize)]
pub struct CreditsResponse {
    pub credits: i32,
    pub tier: String,
    pub daily_credits_limit: i32,
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub price_id: String,
}

/// GET /api/v1/credits
pub async fn handle_get_credits(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<CreditsResponse>, AppError> {
    let profile = get_profile(&state.db, user_id).await?;
    Ok(Json(CreditsResponse {
        credits: profile.credits,
        tier: profile.tier,
        daily_credits_limit: profile.daily_credits_limit,
    }))
}

/// POST /api/v1/billing/checkout
pub async fn handle_checkout(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    headers: HeaderMap,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutSession>, AppError> {
    if !SubscriptionTier::is_known_price(&req.price_id, &state.config.billing) {
        return Err(AppError::Validation(format!(
            "Unknown price id '{}'",
            req.price_id
        )));
    }

    let stripe = state
        .stripe
        .as_ref()
        .ok_or_else(|| AppError::Billing("Stripe is not configured".to_string()))?;

    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_ORIGIN);

    let session = stripe
        .create_checkout_session(user_id, &req.price_id, origin)
        .await?;
    Ok(Json(session))
}

/// POST /api/v1/billing/webhook
///
/// Takes the raw body so the signature is checked over the exact bytes Stripe sent.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    authenticate(
        &body,
        signature,
        &state.config.billing,
        chrono::Utc::now().timestamp(),
    )
    .map_err(|e| {
        warn!("Rejected webhook: {e}");
        AppError::Validation(format!("Webhook error: {e}"))
    })?;

    let event: StripeEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("invalid event payload: {e}")))?;

    match checkout_upgrade(&event, &state.config.billing) {
        Some(upgrade) => {
            apply_subscription(
                &state.db,
                upgrade.user_id,
                upgrade.customer_id.as_deref(),
                upgrade.subscription_id.as_deref(),
                upgrade.tier,
            )
            .await?;
        }
        None => info!("Ignoring webhook event {}", event.event_type),
    }

    Ok(Json(json!({ "received": true })))
}
