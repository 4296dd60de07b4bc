//! Review analyzer: the end-to-end flow for one review request.
//!
//! CV text → job-offer scrape → title extraction → LLM call → parse → guardrails.
//! The extracted title is computed once, before the LLM call, and reused
//! unchanged when validating the model's answer.

use bytes::Bytes;
use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::job_offer::JobOfferFetcher;
use crate::llm_client::{LlmClient, MODEL_FALLBACKS};
use crate::review::guardrail::{run_guardrails, GuardrailInput};
use crate::review::model::{parse_review, ReviewResult};
use crate::review::prompts::{build_system_prompt, build_user_prompt};
use crate::review::rules::GuardrailConfig;
use crate::review::title::extract_title;

pub const MAX_SEVERITY: u8 = 10;
pub const DEFAULT_SEVERITY: u8 = 5;

/// A validated review request.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub portfolio_pdf: Bytes,
    pub job_offer_url: Option<String>,
    pub severity: u8,
}

/// Job-offer text and the title extracted from it. Both empty without a URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobContext {
    pub text: String,
    pub extracted_title: String,
}

impl JobContext {
    pub fn from_scraped(text: String) -> Self {
        let extracted_title = if text.trim().is_empty() {
            String::new()
        } else {
            extract_title(&text)
        };
        Self {
            text,
            extracted_title,
        }
    }
}

/// Extracts the CV text from PDF bytes on a blocking thread.
/// Malformed PDFs can panic inside the parser; that surfaces as a validation error.
pub async fn extract_cv_text(pdf: Bytes) -> Result<String, AppError> {
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|_| AppError::Validation("portfolio PDF could not be read".to_string()))?
        .map_err(|e| AppError::Validation(format!("portfolio PDF could not be read: {e}")))?;

    if extracted.trim().is_empty() {
        return Err(AppError::Validation(
            "portfolio PDF contains no extractable text".to_string(),
        ));
    }
    Ok(extracted)
}

pub async fn fetch_job_context(fetcher: &dyn JobOfferFetcher, url: Option<&str>) -> JobContext {
    let Some(url) = url else {
        return JobContext::default();
    };

    let context = JobContext::from_scraped(fetcher.fetch(url).await);
    info!(
        "Job offer scraped: {} chars, extracted title '{}'",
        context.text.chars().count(),
        context.extracted_title
    );
    context
}

/// Parses the model text, stamps the requested severity and a missing date,
/// then runs the guardrail pipeline.
pub fn finalize_review(
    raw_model_text: &str,
    job: &JobContext,
    severity: u8,
    config: &GuardrailConfig,
) -> Result<ReviewResult, AppError> {
    let mut review = parse_review(raw_model_text)
        .map_err(|e| AppError::AnalysisFailed(e.to_string()))?;

    review.review_metadata.severity_applied = severity;
    if review.review_metadata.date.trim().is_empty() {
        review.review_metadata.date = now_timestamp();
    }

    let (review, outcome) = run_guardrails(
        review,
        GuardrailInput {
            extracted_title: &job.extracted_title,
        },
        config,
    );
    debug!("Guardrail outcome: {outcome:?}");

    Ok(review)
}

/// Runs the full analysis for one request.
pub async fn analyze_portfolio(
    llm: &LlmClient,
    fetcher: &dyn JobOfferFetcher,
    config: &GuardrailConfig,
    request: ReviewRequest,
) -> Result<ReviewResult, AppError> {
    let cv_text = extract_cv_text(request.portfolio_pdf).await?;
    let job = fetch_job_context(fetcher, request.job_offer_url.as_deref()).await;

    let system = build_system_prompt(request.severity, &now_timestamp());
    let prompt = build_user_prompt(&cv_text, &job.text, &job.extracted_title);

    let (text, model) = llm
        .call_text_with_fallback(MODEL_FALLBACKS, &prompt, &system)
        .await
        .map_err(|e| AppError::AnalysisFailed(e.to_string()))?;
    info!("Review generated with {model}");

    finalize_review(&text, &job, request.severity, config)
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
