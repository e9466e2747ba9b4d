use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MAX_SCORE: u8 = 100;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldWarning {
    pub field: String,
    pub message: String,
    pub impact: Impact,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
    pub warnings: Vec<FieldWarning>,
    pub score: u8,
    pub recommendations: Vec<String>,
}

impl ValidationResult {
    pub fn has_error_on(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn has_warning_on(&self, field: &str) -> bool {
        self.warnings.iter().any(|w| w.field == field)
    }
}

/// Accumulates findings for one validation call. Each finding subtracts its
/// penalty from 100; the score never drops below 0.
#[derive(Debug)]
pub struct ScoreCard {
    score: u8,
    errors: Vec<FieldError>,
    warnings: Vec<FieldWarning>,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self {
            score: MAX_SCORE,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        penalty: u8,
    ) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
            severity,
        });
        self.score = self.score.saturating_sub(penalty);
    }

    pub fn warning(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        impact: Impact,
        penalty: u8,
    ) {
        self.warnings.push(FieldWarning {
            field: field.into(),
            message: message.into(),
            impact,
        });
        self.score = self.score.saturating_sub(penalty);
    }

    /// Finalizes the result, turning fired rules into suggestions via `suggest`.
    pub fn finish(self, suggest: impl Fn(&str) -> Option<&'static str>) -> ValidationResult {
        let recommendations = recommend(&self.errors, &self.warnings, suggest);
        ValidationResult {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
            score: self.score,
            recommendations,
        }
    }
}

impl Default for ScoreCard {
    fn default() -> Self {
        Self::new()
    }
}

/// One suggestion per field, errors first. A warning on a field that already
/// carries an error adds nothing, and a suggestion text never repeats.
fn recommend(
    errors: &[FieldError],
    warnings: &[FieldWarning],
    suggest: impl Fn(&str) -> Option<&'static str>,
) -> Vec<String> {
    let error_fields: HashSet<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    let mut seen_fields = HashSet::new();
    let mut seen_text = HashSet::new();
    let mut out = Vec::new();

    let fields = errors.iter().map(|e| e.field.as_str()).chain(
        warnings
            .iter()
            .map(|w| w.field.as_str())
            .filter(|f| !error_fields.contains(f)),
    );
    for field in fields {
        if !seen_fields.insert(field) {
            continue;
        }
        if let Some(text) = suggest(field) {
            if seen_text.insert(text) {
                out.push(text.to_string());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggest(field: &str) -> Option<&'static str> {
        match field {
            "a" => Some("perbaiki a"),
            "b" => Some("perbaiki b"),
            "c" => Some("perbaiki b"),
            _ => None,
        }
    }

    #[test]
    fn score_floors_at_zero() {
        let mut card = ScoreCard::new();
        for _ in 0..8 {
            card.error("a", "x", Severity::Major, 15);
        }
        let result = card.finish(suggest);
        assert_eq!(result.score, 0);
        assert!(!result.is_valid);
    }

    #[test]
    fn warnings_alone_keep_result_valid() {
        let mut card = ScoreCard::new();
        card.warning("a", "x", Impact::Low, 5);
        let result = card.finish(suggest);
        assert!(result.is_valid);
        assert_eq!(result.score, 95);
        assert_eq!(result.recommendations, vec!["perbaiki a".to_string()]);
    }

    #[test]
    fn recommendations_skip_warning_on_errored_field_and_duplicates() {
        let mut card = ScoreCard::new();
        card.error("b", "x", Severity::Major, 10);
        card.error("b", "y", Severity::Major, 10);
        card.warning("b", "z", Impact::Low, 5);
        card.warning("c", "z", Impact::Low, 5);
        card.warning("unknown", "z", Impact::Low, 5);
        let result = card.finish(suggest);
        assert_eq!(result.recommendations, vec!["perbaiki b".to_string()]);
        assert_eq!(result.score, 65);
    }
}
