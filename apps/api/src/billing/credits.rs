//! Credit ledger queries over the `profiles` table.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::billing::tiers::SubscriptionTier;
use crate::errors::AppError;
use crate::models::profile::ProfileRow;

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<ProfileRow, AppError> {
    sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {user_id} not found")))
}

/// Fails with `InsufficientCredits` when the user cannot pay for one review.
pub async fn require_credit(pool: &PgPool, user_id: Uuid) -> Result<ProfileRow, AppError> {
    let profile = get_profile(pool, user_id).await?;
    if profile.credits < 1 {
        return Err(AppError::InsufficientCredits);
    }
    Ok(profile)
}

/// Deducts one credit atomically. Returns the new balance, or `None` if the
/// balance was already zero.
pub async fn deduct_credit(pool: &PgPool, user_id: Uuid) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        UPDATE profiles
        SET credits = credits - 1, updated_at = now()
        WHERE id = $1 AND credits > 0
        RETURNING credits
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Records a subscription and refills credits to the tier's daily limit.
pub async fn apply_subscription(
    pool: &PgPool,
    user_id: Uuid,
    customer_id: Option<&str>,
    subscription_id: Option<&str>,
    tier: SubscriptionTier,
) -> Result<(), AppError> {
    let limit = tier.daily_credit_limit();
    let result = sqlx::query(
        r#"
        UPDATE profiles
        SET stripe_customer_id = $1,
            stripe_subscription_id = $2,
            tier = $3,
            daily_credits_limit = $4,
            credits = $4,
            updated_at = now()
        WHERE id = $5
        "#,
    )
    .bind(customer_id)
    .bind(subscription_id)
    .bind(tier.as_str())
    .bind(limit)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Profile {user_id} not found")));
    }

    info!("User {user_id} upgraded to {}", tier.as_str());
    Ok(())
}

/// Resets every balance to its tier's daily limit. Returns the number of rows touched.
pub async fn refill_daily_credits(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE profiles SET credits = daily_credits_limit, updated_at = now() \
         WHERE credits < daily_credits_limit",
    )
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
