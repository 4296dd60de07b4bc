//! Score Corrector: applied only on a confirmed cross-domain mismatch.
//!
//! Caps the hard categories and their cards, recomputes the final score with the
//! fixed weighting, and replaces the model's actionable feedback wholesale. The
//! model's narrative is discarded at this point, not merged.

use crate::review::domain::ProfessionalDomain;
use crate::review::model::{
    CategoryScores, ReviewResult, StatusColor, EXPERIENCE_RELEVANCE_LABEL, HARD_SKILLS_LABEL,
    IMPACT_RESULTS_LABEL,
};
use crate::review::rules::{CategoryWeights, GuardrailConfig};

const CAPPED_CARD_LABELS: &[&str] = &[
    HARD_SKILLS_LABEL,
    EXPERIENCE_RELEVANCE_LABEL,
    IMPACT_RESULTS_LABEL,
];

const MISSING_SKILLS_MESSAGE: &str =
    "You are missing key technical skills required for this specific role.";
const ALIGNED_ROLES_MESSAGE: &str =
    "Consider roles that align closer with your demonstrated experience.";
const GENERIC_MISMATCH_MESSAGE: &str =
    "Your profile does not align with the specific requirements of this role.";

/// Caps, recolors, rescores, and rewrites feedback in one pass.
pub fn apply_cross_domain_caps(
    mut review: ReviewResult,
    candidate: ProfessionalDomain,
    job: ProfessionalDomain,
    config: &GuardrailConfig,
) -> ReviewResult {
    let cap = config.cross_domain_cap;

    let categories = &mut review.scores.categories;
    categories.hard_skills = categories.hard_skills.min(cap);
    categories.experience_relevance = categories.experience_relevance.min(cap);
    categories.impact_results = categories.impact_results.min(cap);

    for card in review
        .feedback_cards
        .iter_mut()
        .filter(|card| CAPPED_CARD_LABELS.contains(&card.category_name.as_str()))
    {
        card.score = card.score.min(cap);
        card.status_color = StatusColor::Red;
    }

    review.scores.final_score = weighted_final_score(&review.scores.categories, &config.weights);
    review.actionable_feedback = mismatch_feedback(Some(candidate), Some(job));

    tracing::info!(
        "Capped hard categories at {cap} for {candidate} vs {job}; final score now {}",
        review.scores.final_score
    );

    review
}

/// Floor of the weighted category sum. Integer math, so no float rounding drift.
pub fn weighted_final_score(categories: &CategoryScores, weights: &CategoryWeights) -> u32 {
    let weighted = categories.hard_skills * weights.hard_skills
        + categories.experience_relevance * weights.experience_relevance
        + categories.impact_results * weights.impact_results
        + categories.soft_skills * weights.soft_skills
        + categories.formatting_ats * weights.formatting_ats;
    weighted / 100
}

/// The three fixed feedback lines shown instead of the model's own suggestions.
pub fn mismatch_feedback(
    candidate: Option<ProfessionalDomain>,
    job: Option<ProfessionalDomain>,
) -> Vec<String> {
    let intro = match (candidate, job) {
        (Some(candidate), Some(job)) if candidate != job => format!(
            "Your profile is in the {candidate} field, which is very different from {job}."
        ),
        _ => GENERIC_MISMATCH_MESSAGE.to_string(),
    };

    vec![
        intro,
        MISSING_SKILLS_MESSAGE.to_string(),
        ALIGNED_ROLES_MESSAGE.to_string(),
    ]
}
