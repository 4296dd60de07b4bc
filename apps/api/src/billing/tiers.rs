use serde::{Deserialize, Serialize};

use crate::config::BillingConfig;

/// Subscription tier. Each tier refills the credit balance to its daily limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Plus,
    Ultra,
}

impl SubscriptionTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Plus => "plus",
            SubscriptionTier::Ultra => "ultra",
        }
    }

    pub fn daily_credit_limit(self) -> i32 {
        match self {
            SubscriptionTier::Free => 1,
            SubscriptionTier::Plus => 50,
            SubscriptionTier::Ultra => 200,
        }
    }

    /// Maps a Stripe price ID to a tier. Unknown prices fall back to `Free`.
    pub fn from_price_id(price_id: &str, config: &BillingConfig) -> Self {
        if config.plus_price_id.as_deref() == Some(price_id) {
            SubscriptionTier::Plus
        } else if config.ultra_price_id.as_deref() == Some(price_id) {
            SubscriptionTier::Ultra
        } else {
            SubscriptionTier::Free
        }
    }

    /// True when `price_id` is one of the configured paid prices.
    pub fn is_known_price(price_id: &str, config: &BillingConfig) -> bool {
        Self::from_price_id(price_id, config) != SubscriptionTier::Free
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BillingConfig {
        BillingConfig {
            plus_price_id: Some("price_plus".to_string()),
            ultra_price_id: Some("price_ultra".to_string()),
            ..BillingConfig::default()
        }
    }

    #[test]
    fn test_price_mapping() {
        let config = config();
        assert_eq!(
            SubscriptionTier::from_price_id("price_plus", &config),
            SubscriptionTier::Plus
        );
        assert_eq!(
            SubscriptionTier::from_price_id("price_ultra", &config),
            SubscriptionTier::Ultra
        );
        assert_eq!(
            SubscriptionTier::from_price_id("price_other", &config),
            SubscriptionTier::Free
        );
    }

    #[test]
    fn test_unconfigured_prices_are_unknown() {
        assert!(!SubscriptionTier::is_known_price("price_plus", &BillingConfig::default()));
        assert!(SubscriptionTier::is_known_price("price_plus", &config()));
    }

    #[test]
    fn test_daily_limits() {
        assert_eq!(SubscriptionTier::Free.daily_credit_limit(), 1);
        assert_eq!(SubscriptionTier::Plus.daily_credit_limit(), 50);
        assert_eq!(SubscriptionTier::Ultra.daily_credit_limit(), 200);
        assert_eq!(SubscriptionTier::Ultra.as_str(), "ultra");
    }
}
