//! Typed shape of the review JSON produced by the model.
//!
//! Parsing fails fast on the fields the guardrails depend on (`scores.categories`
//! and `feedback_cards`); everything else falls back to a neutral default so a
//! slightly sloppy response can still be corrected instead of rejected.

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::llm_client::strip_json_fences;

pub const HARD_SKILLS_LABEL: &str = "Hard Skills";
pub const EXPERIENCE_RELEVANCE_LABEL: &str = "Experience Relevance";
pub const IMPACT_RESULTS_LABEL: &str = "Impact/Results";

pub const EXPECTED_CARD_COUNT: usize = 5;
pub const EXPECTED_ACTION_COUNT: usize = 3;

/// The model's verdict on whether the candidate fits the job offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleMatch {
    Match,
    #[default]
    PartialMatch,
    Mismatch,
}

/// Traffic-light color shown next to each feedback card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    #[serde(alias = "Green", alias = "GREEN")]
    Green,
    #[serde(alias = "Yellow", alias = "YELLOW")]
    Yellow,
    #[default]
    #[serde(alias = "Red", alias = "RED")]
    Red,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewMetadata {
    #[serde(default)]
    pub severity_applied: u8,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub candidate_role_detected: String,
    #[serde(default)]
    pub job_offer_role_detected: String,
    #[serde(default)]
    pub role_match: RoleMatch,
}

/// The five fixed scoring categories, 0–100 each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    #[serde(deserialize_with = "deserialize_score")]
    pub hard_skills: u32,
    #[serde(deserialize_with = "deserialize_score")]
    pub experience_relevance: u32,
    #[serde(deserialize_with = "deserialize_score")]
    pub impact_results: u32,
    #[serde(deserialize_with = "deserialize_score")]
    pub soft_skills: u32,
    #[serde(deserialize_with = "deserialize_score")]
    pub formatting_ats: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(default, deserialize_with = "deserialize_score")]
    pub final_score: u32,
    pub categories: CategoryScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackCard {
    pub category_name: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u32,
    #[serde(default)]
    pub short_comment: String,
    #[serde(default)]
    pub status_color: StatusColor,
}

/// Full structured critique, created fresh per request and threaded by value
/// through the guardrail stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    #[serde(default)]
    pub review_metadata: ReviewMetadata,
    pub scores: Scores,
    pub feedback_cards: Vec<FeedbackCard>,
    #[serde(default)]
    pub actionable_feedback: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ReviewParseError {
    #[error("model returned an empty response")]
    Empty,

    #[error("model returned invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model response is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Parses the raw model text into a `ReviewResult`.
///
/// Markdown code fences are tolerated. An empty `feedback_cards` array counts as
/// missing, since the color and capping stages have nothing to work on.
pub fn parse_review(raw: &str) -> Result<ReviewResult, ReviewParseError> {
    let text = strip_json_fences(raw);
    if text.is_empty() {
        return Err(ReviewParseError::Empty);
    }

    let review: ReviewResult = serde_json::from_str(text)?;

    if review.feedback_cards.is_empty() {
        return Err(ReviewParseError::MissingField("feedback_cards"));
    }
    if review.feedback_cards.len() != EXPECTED_CARD_COUNT {
        tracing::warn!(
            "Model returned {} feedback cards (expected {EXPECTED_CARD_COUNT})",
            review.feedback_cards.len()
        );
    }

    Ok(review)
}

/// Accepts any JSON number, rounds it, and clamps it into 0–100.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(de::Error::custom("score must be a finite number"));
    }
    Ok(value.round().clamp(0.0, 100.0) as u32)
}
