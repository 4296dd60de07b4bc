//! Domain Classifier: buckets a free-text role into a coarse professional field.
//!
//! Keyword sets mix English and Italian terms. Matching is a case-insensitive
//! substring test and the first domain in table order wins. A role with no hit is
//! `None` (unknown), which the mismatch resolver treats differently from any
//! named domain.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfessionalDomain {
    Tech,
    Manual,
    Medical,
    Food,
    Textile,
    Education,
    Legal,
    Finance,
}

impl ProfessionalDomain {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfessionalDomain::Tech => "tech",
            ProfessionalDomain::Manual => "manual",
            ProfessionalDomain::Medical => "medical",
            ProfessionalDomain::Food => "food",
            ProfessionalDomain::Textile => "textile",
            ProfessionalDomain::Education => "education",
            ProfessionalDomain::Legal => "legal",
            ProfessionalDomain::Finance => "finance",
        }
    }
}

impl fmt::Display for ProfessionalDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered domain → keyword table. Order decides ties.
pub static DOMAIN_KEYWORDS: &[(ProfessionalDomain, &[&str])] = &[
    (
        ProfessionalDomain::Tech,
        &[
            "software",
            "developer",
            "engineer",
            "programmer",
            "web",
            "frontend",
            "backend",
            "full stack",
            "fullstack",
            "devops",
            "data scientist",
            "data analyst",
            "it ",
            "cloud",
            "mobile",
            "ios",
            "android",
            "designer",
            "ux",
            "ui",
            "iot",
            "hardware",
            "embedded",
            "firmware",
            "network",
            "security",
            "qa",
            "testing",
        ],
    ),
    (
        ProfessionalDomain::Manual,
        &[
            "mechanic",
            "meccanico",
            "welder",
            "saldatore",
            "plumber",
            "idraulico",
            "electrician",
            "elettricista",
            "operator",
            "operatore",
            "operaio",
            "machine",
            "piegatore",
            "sheet metal",
            "lamiera",
            "cnc",
            "press",
            "pressa",
            "driver",
            "autista",
            "carpenter",
            "falegname",
            "painter",
            "imbianchino",
            "mason",
            "muratore",
            "tecnico officina",
            "fabbro",
        ],
    ),
    (
        ProfessionalDomain::Medical,
        &[
            "nurse",
            "infermiere",
            "doctor",
            "medico",
            "surgeon",
            "chirurgo",
            "dentist",
            "dentista",
            "pharmacist",
            "farmacista",
            "therapist",
            "terapista",
            "veterinarian",
            "veterinario",
            "paramedic",
        ],
    ),
    (
        ProfessionalDomain::Food,
        &[
            "chef",
            "cuoco",
            "cook",
            "baker",
            "panettiere",
            "pastry",
            "pasticcere",
            "bartender",
            "barista",
            "waiter",
            "cameriere",
            "kitchen",
            "cucina",
            "restaurant",
        ],
    ),
    (
        ProfessionalDomain::Textile,
        &[
            "seamstress",
            "sarta",
            "tailor",
            "sarto",
            "rammendatrice",
            "tessile",
            "textile",
            "fashion",
            "moda",
        ],
    ),
    (
        ProfessionalDomain::Education,
        &[
            "teacher",
            "insegnante",
            "professor",
            "professore",
            "tutor",
            "instructor",
            "istruttore",
        ],
    ),
    (
        ProfessionalDomain::Legal,
        &[
            "lawyer",
            "avvocato",
            "attorney",
            "solicitor",
            "paralegal",
            "notary",
            "notaio",
        ],
    ),
    (
        ProfessionalDomain::Finance,
        &[
            "accountant",
            "contabile",
            "auditor",
            "revisore",
            "financial",
            "finanziario",
            "banker",
            "banchiere",
        ],
    ),
];

/// Returns the first domain whose keyword set hits `role`, or `None` when unknown.
pub fn detect_domain(role: &str) -> Option<ProfessionalDomain> {
    let role = role.to_lowercase();
    if role.trim().is_empty() {
        return None;
    }

    DOMAIN_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| role.contains(kw)))
        .map(|(domain, _)| *domain)
}
