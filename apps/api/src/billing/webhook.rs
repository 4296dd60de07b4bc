//! Stripe webhook verification and event interpretation.
//!
//! Signature scheme: the `Stripe-Signature` header carries `t=<unix ts>` and one
//! or more `v1=<hex>` entries; each `v1` is HMAC-SHA256 over `"{t}.{payload}"`
//! keyed with the endpoint secret.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

use crate::billing::tiers::SubscriptionTier;
use crate::config::BillingConfig;

pub const SIGNATURE_HEADER: &str = "stripe-signature";
/// Maximum accepted age of a signed event.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("missing Stripe-Signature header")]
    MissingSignature,

    #[error("malformed Stripe-Signature header")]
    MalformedSignature,

    #[error("signature timestamp outside tolerance")]
    StaleTimestamp,

    #[error("no matching v1 signature")]
    SignatureMismatch,

    #[error("webhook secret not configured")]
    NoSecret,
}

#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct CheckoutSession {
    customer: Option<String>,
    subscription: Option<String>,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

/// Profile change derived from a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionUpgrade {
    pub user_id: Uuid,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub tier: SubscriptionTier,
}

/// Verifies a Stripe signature header against the raw payload.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now_unix: i64,
) -> Result<(), WebhookError> {
    let mut timestamp: Option<&str> = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(WebhookError::MalformedSignature)?;
    let ts: i64 = timestamp
        .parse()
        .map_err(|_| WebhookError::MalformedSignature)?;
    if signatures.is_empty() {
        return Err(WebhookError::MalformedSignature);
    }
    if (now_unix - ts).abs() > SIGNATURE_TOLERANCE_SECS {
        return Err(WebhookError::StaleTimestamp);
    }

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| WebhookError::NoSecret)?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    let matched = signatures.iter().any(|candidate| {
        hex::decode(candidate)
            .map(|bytes| mac.clone().verify_slice(&bytes).is_ok())
            .unwrap_or(false)
    });

    if matched {
        Ok(())
    } else {
        Err(WebhookError::SignatureMismatch)
    }
}

/// Checks the signature per config. Unsigned events pass only when explicitly
/// allowed for development.
pub fn authenticate(
    payload: &[u8],
    header: Option<&str>,
    config: &BillingConfig,
    now_unix: i64,
) -> Result<(), WebhookError> {
    match (config.webhook_secret.as_deref(), header) {
        (Some(secret), Some(header)) => verify_signature(payload, header, secret, now_unix),
        (Some(_), None) => Err(WebhookError::MissingSignature),
        (None, _) if config.allow_unsigned_webhooks => {
            tracing::warn!("Skipping webhook signature verification (unsigned events allowed)");
            Ok(())
        }
        (None, _) => Err(WebhookError::NoSecret),
    }
}

/// Returns the upgrade a `checkout.session.completed` event implies, if any.
pub fn checkout_upgrade(event: &StripeEvent, config: &BillingConfig) -> Option<SubscriptionUpgrade> {
    if event.event_type != CHECKOUT_COMPLETED {
        return None;
    }

    let session: CheckoutSession = serde_json::from_value(event.data.object.clone()).ok()?;
    let user_id = session
        .metadata
        .get("userId")
        .and_then(|id| Uuid::parse_str(id).ok())?;

    let tier = match (&session.subscription, session.metadata.get("priceId")) {
        (Some(_), Some(price_id)) => SubscriptionTier::from_price_id(price_id, config),
        _ => SubscriptionTier::Free,
    };

    Some(SubscriptionUpgrade {
        user_id,
        customer_id: session.customer,
        subscription_id: session.subscription,
        tier,
    })
}
