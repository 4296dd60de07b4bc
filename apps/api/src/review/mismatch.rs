//! Mismatch Resolver: one deterministic decision per request on whether the
//! candidate and the job belong to incompatible fields.
//!
//! Keyword domains are too coarse to judge fine-grained differences ("Full Stack"
//! vs "Embedded"), so only cross-domain mismatches are corrected by force.
//! Same-domain or unverifiable disagreements only soften `role_match`.

use crate::review::domain::ProfessionalDomain;
use crate::review::model::RoleMatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchResolution {
    /// Nothing flagged; the model's verdict stands.
    Aligned,
    /// Flagged, but the domains are the same or one of them is unknown.
    SameDomain,
    /// Both domains are known and differ. Hard caps apply.
    CrossDomain {
        candidate: ProfessionalDomain,
        job: ProfessionalDomain,
    },
}

impl MismatchResolution {
    pub fn is_mismatch(&self) -> bool {
        !matches!(self, MismatchResolution::Aligned)
    }

    pub fn requires_capping(&self) -> bool {
        matches!(self, MismatchResolution::CrossDomain { .. })
    }

    /// The `role_match` the review must carry after this resolution.
    /// A model-reported `MATCH` is never downgraded by a same-domain flag.
    pub fn role_match(&self, reported: RoleMatch) -> RoleMatch {
        match self {
            MismatchResolution::Aligned => reported,
            MismatchResolution::CrossDomain { .. } => RoleMatch::Mismatch,
            MismatchResolution::SameDomain => match reported {
                RoleMatch::Match => RoleMatch::Match,
                _ => RoleMatch::PartialMatch,
            },
        }
    }
}

/// Decides the mismatch class from the two domains (the job domain already
/// corrected by the hallucination detector) and the model's own claim.
pub fn resolve_mismatch(
    reported: RoleMatch,
    candidate_domain: Option<ProfessionalDomain>,
    job_domain: Option<ProfessionalDomain>,
    has_extracted_title: bool,
) -> MismatchResolution {
    if let (Some(candidate), Some(job)) = (candidate_domain, job_domain) {
        if candidate != job {
            return MismatchResolution::CrossDomain { candidate, job };
        }
    }

    let unknown_job_with_title =
        candidate_domain.is_some() && job_domain.is_none() && has_extracted_title;

    if reported == RoleMatch::Mismatch || unknown_job_with_title {
        MismatchResolution::SameDomain
    } else {
        MismatchResolution::Aligned
    }
}
