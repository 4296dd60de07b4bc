//! Guardrail pipeline: validates and corrects a parsed model review.
//!
//! Stages run in a fixed order, each taking and returning the review by value:
//! hallucination check → mismatch resolution → cross-domain correction → colors.
//! The pipeline is pure and never fails; malformed model output is rejected
//! earlier, in `model::parse_review`.

use tracing::{info, warn};

use crate::review::colors::enforce_colors;
use crate::review::corrector::apply_cross_domain_caps;
use crate::review::domain::{detect_domain, ProfessionalDomain};
use crate::review::hallucination::check_job_role;
use crate::review::mismatch::{resolve_mismatch, MismatchResolution};
use crate::review::model::{ReviewResult, RoleMatch};
use crate::review::rules::GuardrailConfig;

/// Per-request inputs that do not come from the model.
#[derive(Debug, Clone, Copy)]
pub struct GuardrailInput<'a> {
    /// Title extracted from the scraped job offer; empty when none was supplied.
    pub extracted_title: &'a str,
}

/// What the pipeline decided, for logging and tests.
#[derive(Debug, Clone)]
pub struct GuardrailOutcome {
    pub candidate_domain: Option<ProfessionalDomain>,
    pub job_domain: Option<ProfessionalDomain>,
    pub job_role_overridden: bool,
    pub role_match_before: RoleMatch,
    pub role_match_after: RoleMatch,
    pub mismatch_detected: bool,
    pub scores_capped: bool,
}

/// Runs every guardrail stage over `review` and returns the corrected review.
pub fn run_guardrails(
    mut review: ReviewResult,
    input: GuardrailInput<'_>,
    config: &GuardrailConfig,
) -> (ReviewResult, GuardrailOutcome) {
    let role_match_before = review.review_metadata.role_match;
    let candidate_domain = detect_domain(&review.review_metadata.candidate_role_detected);

    let hallucination = check_job_role(
        input.extracted_title,
        &review.review_metadata.candidate_role_detected,
        &review.review_metadata.job_offer_role_detected,
    );
    if hallucination.detected {
        warn!(
            "[Guardrail] Hallucinated job role '{}' replaced with extracted title '{}' (overlap={}, copied={})",
            review.review_metadata.job_offer_role_detected,
            input.extracted_title,
            hallucination.has_overlap,
            hallucination.copied_from_candidate
        );
        review.review_metadata.job_offer_role_detected = input.extracted_title.trim().to_string();
    }

    let job_domain = detect_domain(&review.review_metadata.job_offer_role_detected);

    info!(
        "[Guardrail] Candidate '{}' ({:?}), job '{}' ({:?}), extracted title '{}'",
        review.review_metadata.candidate_role_detected,
        candidate_domain,
        review.review_metadata.job_offer_role_detected,
        job_domain,
        input.extracted_title
    );

    let resolution = resolve_mismatch(
        role_match_before,
        candidate_domain,
        job_domain,
        !input.extracted_title.trim().is_empty(),
    );
    review.review_metadata.role_match = resolution.role_match(role_match_before);

    match resolution {
        MismatchResolution::CrossDomain { candidate, job } => {
            warn!("[Guardrail] Cross-domain mismatch: {candidate} vs {job}. Capping hard scores.");
            review = apply_cross_domain_caps(review, candidate, job, config);
        }
        MismatchResolution::SameDomain => {
            info!(
                "[Guardrail] Same-domain mismatch ({:?}). Keeping model scores.",
                candidate_domain
            );
        }
        MismatchResolution::Aligned => {}
    }

    let review = enforce_colors(review, config);

    let outcome = GuardrailOutcome {
        candidate_domain,
        job_domain,
        job_role_overridden: hallucination.detected,
        role_match_before,
        role_match_after: review.review_metadata.role_match,
        mismatch_detected: resolution.is_mismatch(),
        scores_capped: resolution.requires_capping(),
    };

    (review, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::model::fixtures::review;
    use crate::review::model::StatusColor;

    fn run(input: ReviewResult, title: &str) -> (ReviewResult, GuardrailOutcome) {
        run_guardrails(
            input,
            GuardrailInput {
                extracted_title: title,
            },
            &GuardrailConfig::default(),
        )
    }

    fn assert_colors_consistent(review: &ReviewResult) {
        for card in &review.feedback_cards {
            let expected = if card.score >= 75 {
                StatusColor::Green
            } else if card.score >= 55 {
                StatusColor::Yellow
            } else {
                StatusColor::Red
            };
            assert_eq!(card.status_color, expected, "card {}", card.category_name);
        }
    }

    #[test]
    fn test_cross_domain_caps_scores() {
        let input = review("Full Stack Developer", "Meccanico", RoleMatch::Match);
        let (output, outcome) = run(input, "");

        assert_eq!(outcome.candidate_domain, Some(ProfessionalDomain::Tech));
        assert_eq!(outcome.job_domain, Some(ProfessionalDomain::Manual));
        assert!(outcome.scores_capped);
        assert_eq!(output.review_metadata.role_match, RoleMatch::Mismatch);
        assert!(output.scores.categories.hard_skills <= 15);
        assert!(output.scores.categories.experience_relevance <= 15);
        assert!(output.scores.categories.impact_results <= 15);
        for card in &output.feedback_cards[..3] {
            assert_eq!(card.status_color, StatusColor::Red);
        }
        assert_eq!(output.scores.final_score, 27);
        assert_colors_consistent(&output);
    }

    #[test]
    fn test_same_domain_keeps_scores() {
        let input = review("Full Stack Developer", "Embedded Engineer", RoleMatch::Mismatch);
        let before = input.scores.clone();
        let feedback_before = input.actionable_feedback.clone();

        let (output, outcome) = run(input, "Embedded Firmware Engineer");

        assert!(!outcome.job_role_overridden);
        assert!(!outcome.scores_capped);
        assert_eq!(output.review_metadata.role_match, RoleMatch::PartialMatch);
        assert_eq!(output.scores, before);
        assert_eq!(output.actionable_feedback, feedback_before);
    }

    #[test]
    fn test_hallucinated_job_role_is_replaced_and_rechecked() {
        let input = review("Software Engineer", "Software Engineer", RoleMatch::Match);
        let (output, outcome) = run(input, "CNC Press Brake Operator");

        assert!(outcome.job_role_overridden);
        assert_eq!(
            output.review_metadata.job_offer_role_detected,
            "CNC Press Brake Operator"
        );
        assert_eq!(outcome.job_domain, Some(ProfessionalDomain::Manual));
        assert_eq!(output.review_metadata.role_match, RoleMatch::Mismatch);
        assert_eq!(output.scores.categories.hard_skills, 15);
        assert_colors_consistent(&output);
    }

    #[test]
    fn test_unknown_domains_without_title_pass_through() {
        let mut input = review("Astronaut", "Diplomat", RoleMatch::Match);
        input.review_metadata.severity_applied = 9;
        input.feedback_cards[0].status_color = StatusColor::Red;
        let mut expected = input.clone();
        expected.feedback_cards[0].status_color = StatusColor::Green;

        let (output, outcome) = run(input, "");

        assert!(!outcome.scores_capped);
        assert!(!outcome.job_role_overridden);
        assert_eq!(output, expected);
    }

    #[test]
    fn test_known_candidate_unknown_job_softens_match() {
        let input = review("Head Chef", "Sommelier", RoleMatch::Mismatch);
        let before = input.scores.clone();
        let (output, outcome) = run(input, "Sommelier esperto");

        assert!(!outcome.job_role_overridden);
        assert_eq!(outcome.job_domain, None);
        assert_eq!(output.review_metadata.role_match, RoleMatch::PartialMatch);
        assert_eq!(output.scores, before);
    }

    #[test]
    fn test_model_match_is_never_downgraded_by_soft_flag() {
        let input = review("Head Chef", "Sommelier", RoleMatch::Match);
        let (output, _) = run(input, "Sommelier");
        assert_eq!(output.review_metadata.role_match, RoleMatch::Match);
    }

    #[test]
    fn test_model_severity_is_left_alone() {
        let mut input = review("Chef", "Cook", RoleMatch::Match);
        input.review_metadata.severity_applied = 2;
        let (output, _) = run(input, "");
        assert_eq!(output.review_metadata.severity_applied, 2);
    }
}
