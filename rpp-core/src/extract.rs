use crate::domain::InputRecord;
use crate::knowledge::{lookup, DEFAULT_THEME, SUBJECT_THEMES};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBTHEME: &str = "konsep dasar pembelajaran";
pub const DEFAULT_KEY_CONCEPTS: &str = "konsep utama";

const SUBTHEME_MIN_LEN: usize = 4;
const SUBTHEME_TOKENS: usize = 3;
const KEY_CONCEPT_MIN_LEN: usize = 5;
const KEY_CONCEPT_TOKENS: usize = 2;
const CONJUNCTION: &str = " dan ";

/// Terms derived once per request and shared by every section builder.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedTerms {
    pub theme: String,
    pub sub_theme: String,
    pub key_concepts: String,
}

impl ExtractedTerms {
    pub fn from_input(input: &InputRecord) -> Self {
        Self {
            theme: extract_theme(&input.subject, &input.learning_outcomes),
            sub_theme: extract_subtheme(&input.learning_outcomes),
            key_concepts: extract_key_concepts(&input.learning_outcomes),
        }
    }
}

/// Theme label for a subject. The outcome text does not influence the label.
pub fn extract_theme(subject: &str, _outcome: &str) -> String {
    lookup(SUBJECT_THEMES, subject, DEFAULT_THEME).to_string()
}

pub fn extract_subtheme(outcome: &str) -> String {
    let lowered = outcome.to_lowercase();
    let tokens = leading_tokens(&lowered, SUBTHEME_MIN_LEN, SUBTHEME_TOKENS);
    if tokens.is_empty() {
        return DEFAULT_SUBTHEME.to_string();
    }
    tokens.join(" ")
}

pub fn extract_key_concepts(outcome: &str) -> String {
    let tokens = leading_tokens(outcome, KEY_CONCEPT_MIN_LEN, KEY_CONCEPT_TOKENS);
    if tokens.is_empty() {
        return DEFAULT_KEY_CONCEPTS.to_string();
    }
    tokens.join(CONJUNCTION)
}

// Length is counted in chars so multi-byte letters are not over-weighted.
fn leading_tokens(text: &str, longer_than: usize, take: usize) -> Vec<&str> {
    text.split_whitespace()
        .filter(|t| t.chars().count() > longer_than)
        .take(take)
        .collect()
}
