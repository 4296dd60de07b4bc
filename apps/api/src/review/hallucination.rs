//! Hallucination Detector: catches the model putting the wrong role into
//! `job_offer_role_detected`, usually by copying the candidate's own role.

/// Tokens shorter than this (in chars) carry too little signal to compare.
const MIN_TOKEN_CHARS: usize = 4;

/// Outcome of comparing the model's job role with the extracted title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HallucinationCheck {
    pub has_overlap: bool,
    pub copied_from_candidate: bool,
    pub detected: bool,
}

/// Compares the model-reported roles against the independently extracted title.
///
/// Detection requires a non-empty extracted title and either no token overlap
/// between the title and the model's job role, or a job role that repeats every
/// significant token of the candidate role.
pub fn check_job_role(
    extracted_title: &str,
    candidate_role: &str,
    job_role: &str,
) -> HallucinationCheck {
    let title_tokens = significant_tokens(extracted_title);
    let job_tokens = significant_tokens(job_role);
    let candidate_tokens = significant_tokens(candidate_role);

    let has_overlap = title_tokens
        .iter()
        .any(|tw| job_tokens.iter().any(|jw| tokens_overlap(tw, jw)));

    let copied_from_candidate = !candidate_tokens.is_empty()
        && candidate_tokens
            .iter()
            .all(|cw| job_tokens.iter().any(|jw| tokens_overlap(cw, jw)));

    let detected =
        !extracted_title.trim().is_empty() && (!has_overlap || copied_from_candidate);

    HallucinationCheck {
        has_overlap,
        copied_from_candidate,
        detected,
    }
}

/// Lower-cased whitespace tokens longer than three chars.
fn significant_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

fn tokens_overlap(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copied_candidate_role_is_detected() {
        let check = check_job_role(
            "CNC Press Brake Operator",
            "Software Engineer",
            "Software Engineer",
        );
        assert!(!check.has_overlap);
        assert!(check.copied_from_candidate);
        assert!(check.detected);
    }

    #[test]
    fn test_faithful_job_role_passes() {
        let check = check_job_role(
            "Senior Backend Developer (Rust)",
            "Frontend Engineer",
            "Backend Developer",
        );
        assert!(check.has_overlap);
        assert!(!check.copied_from_candidate);
        assert!(!check.detected);
    }

    #[test]
    fn test_substring_overlap_counts_both_ways() {
        // "developers" contains "developer"
        let check = check_job_role("Developers wanted", "Chef", "Developer");
        assert!(check.has_overlap);
        assert!(!check.detected);
    }

    #[test]
    fn test_unrelated_role_without_copy_is_detected() {
        let check = check_job_role("Operatore CNC", "Cuoco", "Data Analyst");
        assert!(!check.has_overlap);
        assert!(!check.copied_from_candidate);
        assert!(check.detected);
    }

    #[test]
    fn test_empty_title_never_detects() {
        let check = check_job_role("", "Software Engineer", "Software Engineer");
        assert!(check.copied_from_candidate);
        assert!(!check.detected);
    }

    #[test]
    fn test_candidate_without_significant_tokens_is_not_a_copy() {
        let check = check_job_role("Java Developer", "QA", "Java Developer");
        assert!(!check.copied_from_candidate);
        assert!(!check.detected);
    }

    #[test]
    fn test_short_title_tokens_are_ignored() {
        // "QA" is filtered out, so nothing can overlap.
        let check = check_job_role("QA", "Chef", "QA Tester");
        assert!(!check.has_overlap);
        assert!(check.detected);
    }
}
