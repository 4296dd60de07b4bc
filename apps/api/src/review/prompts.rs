// Prompt constants and builders for the review call.
// Job context goes BEFORE the CV so the model reads it before evaluating.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Job-offer text beyond this many chars is dropped from the prompt.
pub const MAX_JOB_CONTEXT_CHARS: usize = 20_000;

/// System prompt. Replace `{severity}`, `{date}`, and `{json_only}` before sending.
const REVIEW_SYSTEM_TEMPLATE: &str = r#"You are a strict, honest Hiring Manager. You will receive a candidate's CV and, optionally, a JOB OFFER.
{json_only}

YOUR #1 RULE: Every score reflects how well the candidate fits the JOB OFFER, NOT how good their CV is in general.

STEP 1 - ROLE IDENTIFICATION (MANDATORY):
- candidate_role_detected: the candidate's professional field from their CV (e.g. "Software Developer", "Chef", "Mechanic")
- job_offer_role_detected: the role the job offer requires (e.g. "CNC Press Brake Operator", "Full Stack Developer")

STEP 2 - ROLE COMPATIBILITY:
Are the TWO roles in the SAME professional field?
- "Full Stack Developer" vs "Backend Engineer" = MATCH (same tech field)
- "Software Developer" vs "CNC Machine Operator" = MISMATCH (tech vs manufacturing)
- "Software Developer" vs "Cook" = MISMATCH

- IF MISMATCH (different domains): Hard Skills / Experience / Impact must be low (0-15).
- IF SAME DOMAIN but different title: score PROPORTIONALLY to skill overlap.
- Soft Skills / Formatting: score FAIRLY on CV quality and transferability, regardless of mismatch.
- final_score: weighted heavily by hard skills, with some points for soft skills and formatting.
- STATUS COLORS: "red" (<55), "yellow" (55-74), "green" (75+).
- FEEDBACK: name the specific hard skills that are missing.
- REQUIREMENTS: if explicit requirements (years of experience, degrees) are missing, penalize MODERATELY and mention them.

Severity Level: {severity}/10 (1-3=encouraging, 4-7=professional, 8-10=brutal)

OUTPUT JSON SCHEMA:
{
  "review_metadata": {
    "severity_applied": {severity},
    "date": "{date}",
    "candidate_role_detected": "(string: role from CV)",
    "job_offer_role_detected": "(string: role from job offer)",
    "role_match": "MATCH" | "PARTIAL_MATCH" | "MISMATCH"
  },
  "scores": {
    "final_score": (0-100),
    "categories": {
      "hard_skills": (0-100),
      "experience_relevance": (0-100),
      "impact_results": (0-100),
      "soft_skills": (0-100),
      "formatting_ats": (0-100)
    }
  },
  "feedback_cards": [
    {"category_name":"Hard Skills","score":(0-100),"short_comment":"Max 25 words about THIS job's skills.","status_color":"green|yellow|red"},
    {"category_name":"Experience Relevance","score":(0-100),"short_comment":"Max 25 words.","status_color":"green|yellow|red"},
    {"category_name":"Impact/Results","score":(0-100),"short_comment":"Max 25 words.","status_color":"green|yellow|red"},
    {"category_name":"Soft Skills","score":(0-100),"short_comment":"Max 25 words.","status_color":"green|yellow|red"},
    {"category_name":"Formatting/ATS","score":(0-100),"short_comment":"Max 25 words.","status_color":"green|yellow|red"}
  ],
  "actionable_feedback": ["action 1","action 2","action 3"]
}"#;

const JOB_CONTEXT_TEMPLATE: &str = r#"========================================
JOB OFFER THE CANDIDATE IS APPLYING FOR:
========================================
{job_offer}
========================================
END OF JOB OFFER
========================================

The candidate's CV follows below. Evaluate it AGAINST this job offer.
Identify candidate_role_detected from the CV and job_offer_role_detected from the JOB OFFER above.
If the roles are in different professional fields, it is a MISMATCH."#;

const NO_JOB_CONTEXT: &str = "No specific job offer provided. \
    Evaluate the CV against general industry standards for the role described in the CV.";

const CV_TEMPLATE: &str = r#"========================================
CANDIDATE CV:
========================================
{cv_text}
========================================
END OF CV
========================================"#;

const CLOSING_WITH_TITLE_TEMPLATE: &str = r#"Above is the candidate's CV. The JOB OFFER was provided earlier.

THE JOB TITLE IS: "{title}"
job_offer_role_detected MUST be "{title}" or similar. It must come from the JOB OFFER, NOT from the CV.
If the candidate's field does not match "{title}", role_match MUST be "MISMATCH".

Generate the JSON review now."#;

const CLOSING: &str = "Generate the JSON review now.";

pub fn build_system_prompt(severity: u8, date: &str) -> String {
    REVIEW_SYSTEM_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{severity}", &severity.to_string())
        .replace("{date}", date)
}

/// Builds the user message: job context (if any), then the CV, then the closing
/// instruction naming the extracted title.
pub fn build_user_prompt(cv_text: &str, job_offer: &str, extracted_title: &str) -> String {
    let has_job_offer = !job_offer.trim().is_empty();

    let job_context = if has_job_offer {
        let truncated: String = job_offer.chars().take(MAX_JOB_CONTEXT_CHARS).collect();
        JOB_CONTEXT_TEMPLATE.replace("{job_offer}", &truncated)
    } else {
        NO_JOB_CONTEXT.to_string()
    };

    let closing = if has_job_offer && !extracted_title.trim().is_empty() {
        CLOSING_WITH_TITLE_TEMPLATE.replace("{title}", extracted_title.trim())
    } else {
        CLOSING.to_string()
    };

    format!(
        "{job_context}\n\n{}\n\n{closing}",
        CV_TEMPLATE.replace("{cv_text}", cv_text.trim())
    )
}
