//! Color Enforcer: final pass making every card's color a function of its score.

use crate::review::model::{ReviewResult, StatusColor};
use crate::review::rules::GuardrailConfig;

pub fn color_for_score(score: u32, config: &GuardrailConfig) -> StatusColor {
    if score >= config.green_threshold {
        StatusColor::Green
    } else if score >= config.yellow_threshold {
        StatusColor::Yellow
    } else {
        StatusColor::Red
    }
}

/// Recolors every feedback card from its score. Runs unconditionally after all
/// other corrections; idempotent.
pub fn enforce_colors(mut review: ReviewResult, config: &GuardrailConfig) -> ReviewResult {
    for card in &mut review.feedback_cards {
        let expected = color_for_score(card.score, config);
        if card.status_color != expected {
            tracing::debug!(
                "Recoloring '{}' ({}) from {:?} to {:?}",
                card.category_name,
                card.score,
                card.status_color,
                expected
            );
            card.status_color = expected;
        }
    }
    review
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::model::fixtures::{card, review};
    use crate::review::model::RoleMatch;

    #[test]
    fn test_threshold_boundaries() {
        let config = GuardrailConfig::default();
        assert_eq!(color_for_score(100, &config), StatusColor::Green);
        assert_eq!(color_for_score(75, &config), StatusColor::Green);
        assert_eq!(color_for_score(74, &config), StatusColor::Yellow);
        assert_eq!(color_for_score(55, &config), StatusColor::Yellow);
        assert_eq!(color_for_score(54, &config), StatusColor::Red);
        assert_eq!(color_for_score(0, &config), StatusColor::Red);
    }

    #[test]
    fn test_inconsistent_colors_are_fixed() {
        let config = GuardrailConfig::default();
        let mut input = review("Chef", "Cook", RoleMatch::Match);
        input.feedback_cards = vec![
            card("Hard Skills", 90, StatusColor::Red),
            card("Soft Skills", 60, StatusColor::Green),
            card("Formatting/ATS", 10, StatusColor::Yellow),
        ];

        let output = enforce_colors(input, &config);
        let colors: Vec<_> = output.feedback_cards.iter().map(|c| c.status_color).collect();
        assert_eq!(
            colors,
            vec![StatusColor::Green, StatusColor::Yellow, StatusColor::Red]
        );
    }

    #[test]
    fn test_enforcement_is_idempotent() {
        let config = GuardrailConfig::default();
        let mut input = review("Chef", "Cook", RoleMatch::Match);
        input.feedback_cards[0].status_color = StatusColor::Red;

        let once = enforce_colors(input, &config);
        let twice = enforce_colors(once.clone(), &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_only_colors_change() {
        let config = GuardrailConfig::default();
        let mut input = review("Chef", "Cook", RoleMatch::Match);
        input.feedback_cards[2].status_color = StatusColor::Green;
        let before = input.clone();

        let output = enforce_colors(input, &config);
        assert_eq!(output.scores, before.scores);
        assert_eq!(output.review_metadata, before.review_metadata);
        assert_eq!(output.actionable_feedback, before.actionable_feedback);
        assert_eq!(output.feedback_cards[2].status_color, StatusColor::Yellow);
    }
}
