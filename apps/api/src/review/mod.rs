//! Portfolio review: prompt construction, model-output parsing and the
//! guardrail pipeline that corrects the model's verdict.

pub mod analyzer;
pub mod colors;
pub mod corrector;
pub mod domain;
pub mod guardrail;
pub mod hallucination;
pub mod handlers;
pub mod mismatch;
pub mod model;
pub mod prompts;
pub mod rules;
pub mod title;
