//! Business constants for the guardrail stages, built once at startup and shared
//! read-only across requests.

use serde::{Deserialize, Serialize};

/// Category weights in percent. Must sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub hard_skills: u32,
    pub experience_relevance: u32,
    pub impact_results: u32,
    pub soft_skills: u32,
    pub formatting_ats: u32,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            hard_skills: 40,
            experience_relevance: 30,
            impact_results: 10,
            soft_skills: 10,
            formatting_ats: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailConfig {
    /// Ceiling for the hard categories on a confirmed cross-domain mismatch.
    pub cross_domain_cap: u32,
    /// Minimum score for a green card.
    pub green_threshold: u32,
    /// Minimum score for a yellow card.
    pub yellow_threshold: u32,
    pub weights: CategoryWeights,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            cross_domain_cap: 15,
            green_threshold: 75,
            yellow_threshold: 55,
            weights: CategoryWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_100() {
        let w = CategoryWeights::default();
        assert_eq!(
            w.hard_skills + w.experience_relevance + w.impact_results + w.soft_skills + w.formatting_ats,
            100
        );
    }

    #[test]
    fn test_default_thresholds() {
        let config = GuardrailConfig::default();
        assert_eq!(config.cross_domain_cap, 15);
        assert_eq!(config.green_threshold, 75);
        assert_eq!(config.yellow_threshold, 55);
        assert!(config.cross_domain_cap < config.yellow_threshold);
    }
}
