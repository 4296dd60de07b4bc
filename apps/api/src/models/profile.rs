use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the `profiles` credit ledger.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub credits: i32,
    pub tier: String,
    pub daily_credits_limit: i32,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}
