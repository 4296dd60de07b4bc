use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::billing::credits::{deduct_credit, require_credit};
use crate::errors::AppError;
use crate::job_offer::normalize_job_url;
use crate::review::analyzer::{analyze_portfolio, ReviewRequest, DEFAULT_SEVERITY, MAX_SEVERITY};
use crate::review::model::ReviewResult;
use crate::state::AppState;

const PORTFOLIO_FIELD: &str = "portfolio";
const JOB_OFFER_URL_FIELD: &str = "jobOfferUrl";
const RUTHLESSNESS_FIELD: &str = "ruthlessness";

/// POST /api/v1/review
///
/// Multipart form: `portfolio` (PDF, required), `jobOfferUrl` and `ruthlessness` (0-10).
/// One credit is charged only after a successful analysis.
pub async fn handle_review(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    multipart: Multipart,
) -> Result<Json<ReviewResult>, AppError> {
    let request = read_review_form(multipart).await?;
    require_credit(&state.db, user_id).await?;

    info!(
        "Review requested by {user_id} (severity {}, job offer: {})",
        request.severity,
        request.job_offer_url.is_some()
    );

    let review = analyze_portfolio(
        &state.llm,
        state.fetcher.as_ref(),
        &state.guardrails,
        request,
    )
    .await?;

    match deduct_credit(&state.db, user_id).await {
        Ok(Some(remaining)) => info!("Credit deducted for {user_id}, {remaining} left"),
        Ok(None) => warn!("No credit left to deduct for {user_id} after review"),
        Err(e) => warn!("Failed to deduct credit for {user_id}: {e}"),
    }

    Ok(Json(review))
}

async fn read_review_form(mut multipart: Multipart) -> Result<ReviewRequest, AppError> {
    let mut portfolio: Option<Bytes> = None;
    let mut job_offer_url = None;
    let mut severity = DEFAULT_SEVERITY;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            PORTFOLIO_FIELD => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read portfolio: {e}")))?;
                portfolio = Some(data);
            }
            JOB_OFFER_URL_FIELD => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read jobOfferUrl: {e}")))?;
                job_offer_url = parse_job_offer_url(&raw)?;
            }
            RUTHLESSNESS_FIELD => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read ruthlessness: {e}")))?;
                severity = parse_severity(&raw)?;
            }
            _ => {}
        }
    }

    let portfolio_pdf = portfolio
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("portfolio file is required".to_string()))?;

    Ok(ReviewRequest {
        portfolio_pdf,
        job_offer_url,
        severity,
    })
}

/// Blank means "no job offer"; anything else must be an http(s) URL.
fn parse_job_offer_url(raw: &str) -> Result<Option<String>, AppError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    normalize_job_url(raw)
        .map(Some)
        .ok_or_else(|| AppError::Validation("jobOfferUrl must be an http(s) URL".to_string()))
}

fn parse_severity(raw: &str) -> Result<u8, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_SEVERITY);
    }
    trimmed
        .parse::<u8>()
        .ok()
        .filter(|s| *s <= MAX_SEVERITY)
        .ok_or_else(|| {
            AppError::Validation(format!("ruthlessness must be between 0 and {MAX_SEVERITY}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_severity() {
        assert_eq!(parse_severity("").unwrap(), DEFAULT_SEVERITY);
        assert_eq!(parse_severity(" 0 ").unwrap(), 0);
        assert_eq!(parse_severity("10").unwrap(), 10);
        assert!(matches!(parse_severity("11"), Err(AppError::Validation(_))));
        assert!(matches!(parse_severity("-1"), Err(AppError::Validation(_))));
        assert!(matches!(parse_severity("harsh"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_job_offer_url() {
        assert_eq!(parse_job_offer_url("  ").unwrap(), None);
        assert_eq!(
            parse_job_offer_url(" https://example.com/jobs/42 ").unwrap(),
            Some("https://example.com/jobs/42".to_string())
        );
        assert!(matches!(
            parse_job_offer_url("ftp://example.com"),
            Err(AppError::Validation(_))
        ));
    }
}
