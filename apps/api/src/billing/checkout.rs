//! Stripe Checkout session creation over the form-encoded REST API.

use reqwest::Client;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

const STRIPE_CHECKOUT_URL: &str = "https://api.stripe.com/v1/checkout/sessions";

#[derive(Debug, Deserialize)]
struct CheckoutSessionCreated {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
}

/// A created checkout session.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckoutSession {
    pub session_id: String,
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            secret_key,
        })
    }

    /// Creates a subscription checkout for `price_id`. The user and price are
    /// echoed back in the session metadata so the webhook can apply the upgrade.
    pub async fn create_checkout_session(
        &self,
        user_id: Uuid,
        price_id: &str,
        origin: &str,
    ) -> Result<CheckoutSession, AppError> {
        let form = checkout_form(user_id, price_id, origin);

        let response = self
            .client
            .post(STRIPE_CHECKOUT_URL)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Billing(format!("Stripe request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorEnvelope>()
                .await
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(AppError::Billing(format!("Stripe returned {status}: {message}")));
        }

        let created: CheckoutSessionCreated = response
            .json()
            .await
            .map_err(|e| AppError::Billing(format!("unexpected Stripe response: {e}")))?;

        info!("Checkout session {} created for {user_id}", created.id);
        Ok(CheckoutSession {
            session_id: created.id,
            url: created.url,
        })
    }
}

fn checkout_form(user_id: Uuid, price_id: &str, origin: &str) -> Vec<(&'static str, String)> {
    let origin = origin.trim_end_matches('/');
    vec![
        ("mode", "subscription".to_string()),
        ("payment_method_types[0]", "card".to_string()),
        ("line_items[0][price]", price_id.to_string()),
        ("line_items[0][quantity]", "1".to_string()),
        (
            "success_url",
            format!("{origin}/?session_id={{CHECKOUT_SESSION_ID}}"),
        ),
        ("cancel_url", format!("{origin}/pricing")),
        ("metadata[userId]", user_id.to_string()),
        ("metadata[priceId]", price_id.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_form_fields() {
        let user_id = Uuid::new_v4();
        let form = checkout_form(user_id, "price_plus", "https://app.example.com/");
        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };

        assert_eq!(get("mode"), "subscription");
        assert_eq!(get("line_items[0][price]"), "price_plus");
        assert_eq!(
            get("success_url"),
            "https://app.example.com/?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(get("cancel_url"), "https://app.example.com/pricing");
        assert_eq!(get("metadata[userId]"), user_id.to_string());
        assert_eq!(get("metadata[priceId]"), "price_plus");
    }
}
