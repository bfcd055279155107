//! Score computation and symptom-pattern detection over one submission.
//!
//! All functions here are pure: they read the answers and the catalog and
//! return values. The logging side effects that accompany core/sensitive
//! detections live in [`crate::events`], built by the composing engine.

use std::collections::HashSet;

use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use tenang_core::models::answer::Answer;
use tenang_core::models::symptom::ScaleKind;

use crate::catalog::SymptomCatalog;
use crate::error::{EngineError, ValidationError};

/// How many distinct core symptoms must be affirmed (value > 0) before
/// the submission counts as "core symptoms present".
///
/// The G1–G9 inventory fixes this at 2 (both G1 and G2), but the rule is
/// kept configurable for catalogs that define more core items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreSymptomRule {
    pub required: usize,
}

impl Default for CoreSymptomRule {
    fn default() -> Self {
        Self { required: 2 }
    }
}

/// A core or sensitive symptom affirmed in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct AffirmedSymptom {
    pub symptom_id: Uuid,
    pub code: String,
    pub value: u8,
}

/// Outcome of core-symptom detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSymptoms {
    pub has_core: bool,
    pub affirmed: Vec<AffirmedSymptom>,
}

/// Check every answer's value against its symptom's scale kind, and flag
/// answers referencing symptoms absent from the catalog.
///
/// A non-empty return rejects the whole submission; no partial score is
/// ever produced. Completeness (one answer per active symptom, exactly
/// once) is the caller's precondition, not checked here.
pub fn validate_answers(answers: &[Answer], catalog: &SymptomCatalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for answer in answers {
        match catalog.get(answer.symptom_id) {
            None => errors.push(ValidationError {
                symptom_id: answer.symptom_id,
                code: None,
                value: answer.value,
                expected_max: None,
                message: format!("answer references unknown symptom {}", answer.symptom_id),
            }),
            Some(symptom) if !symptom.scale.contains(answer.value) => {
                errors.push(ValidationError {
                    symptom_id: answer.symptom_id,
                    code: Some(symptom.code.clone()),
                    value: answer.value,
                    expected_max: Some(symptom.scale.max_value()),
                    message: format!(
                        "{}: value {} is outside range [0, {}]",
                        symptom.code,
                        answer.value,
                        symptom.scale.max_value(),
                    ),
                });
            }
            Some(_) => {}
        }
    }
    errors
}

/// Total score: the sum of values over scale symptoms. Boolean symptoms
/// are excluded entirely; they feed crisis detection, not the score.
///
/// Each symptom counts once: should a caller violate the one-answer-per-
/// symptom precondition, only the first answer for a symptom scores.
pub fn calculate_score(answers: &[Answer], catalog: &SymptomCatalog) -> Result<u32, EngineError> {
    let mut score = 0u32;
    let mut seen = HashSet::new();
    for answer in answers {
        let symptom = catalog
            .get(answer.symptom_id)
            .ok_or(EngineError::UnknownSymptom(answer.symptom_id))?;
        if symptom.scale == ScaleKind::Scale && seen.insert(symptom.id) {
            score += answer.value as u32;
        }
    }
    Ok(score)
}

/// Conjunctive core-symptom rule: `has_core` holds only when at least
/// `rule.required` **distinct** core symptoms carry a value > 0. A single
/// affirmed core symptom is insufficient signal on its own, and duplicate
/// answers for one symptom never count twice.
///
/// Answers referencing unknown symptoms are ignored here; validation
/// rejects them before this runs.
pub fn detect_core_symptoms(
    answers: &[Answer],
    catalog: &SymptomCatalog,
    rule: CoreSymptomRule,
) -> CoreSymptoms {
    let mut seen = HashSet::new();
    let affirmed: Vec<AffirmedSymptom> = answers
        .iter()
        .filter(|a| a.value > 0)
        .filter_map(|a| catalog.get(a.symptom_id).map(|s| (a, s)))
        .filter(|(_, s)| s.is_core && seen.insert(s.id))
        .map(|(a, s)| AffirmedSymptom {
            symptom_id: s.id,
            code: s.code.clone(),
            value: a.value,
        })
        .collect();

    CoreSymptoms {
        has_core: affirmed.len() >= rule.required,
        affirmed,
    }
}

/// Sensitive symptoms whose answer is exactly 1, the affirmed state of a
/// binary item. Distinct per symptom.
pub fn sensitive_affirmations(answers: &[Answer], catalog: &SymptomCatalog) -> Vec<AffirmedSymptom> {
    let mut seen = HashSet::new();
    answers
        .iter()
        .filter(|a| a.value == 1)
        .filter_map(|a| catalog.get(a.symptom_id).map(|s| (a, s)))
        .filter(|(_, s)| s.is_sensitive && seen.insert(s.id))
        .map(|(a, s)| AffirmedSymptom {
            symptom_id: s.id,
            code: s.code.clone(),
            value: a.value,
        })
        .collect()
}

/// Disjunctive single-trigger rule: any one sensitive symptom answered
/// with exactly 1 raises the crisis flag.
pub fn detect_crisis_flags(answers: &[Answer], catalog: &SymptomCatalog) -> bool {
    !sensitive_affirmations(answers, catalog).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SymptomCatalog {
        SymptomCatalog::default_inventory()
    }

    fn answers_by_code(catalog: &SymptomCatalog, values: &[(&str, u8)]) -> Vec<Answer> {
        catalog
            .iter()
            .map(|s| {
                let value = values
                    .iter()
                    .find(|(code, _)| *code == s.code)
                    .map(|(_, v)| *v)
                    .unwrap_or(0);
                Answer::new(s.id, value)
            })
            .collect()
    }

    #[test]
    fn boolean_symptoms_do_not_score() {
        let catalog = catalog();
        let answers = answers_by_code(&catalog, &[("G1", 2), ("G9", 1)]);
        assert_eq!(calculate_score(&answers, &catalog).unwrap(), 2);
    }

    #[test]
    fn score_is_bounded_by_max_possible() {
        let catalog = catalog();
        let all_max: Vec<Answer> = catalog
            .iter()
            .map(|s| Answer::new(s.id, s.scale.max_value()))
            .collect();
        let score = calculate_score(&all_max, &catalog).unwrap();
        assert_eq!(score, catalog.max_possible_score());
    }

    #[test]
    fn unknown_symptom_fails_scoring() {
        let catalog = catalog();
        let stray = Uuid::new_v4();
        let answers = vec![Answer::new(stray, 1)];
        match calculate_score(&answers, &catalog) {
            Err(EngineError::UnknownSymptom(id)) => assert_eq!(id, stray),
            other => panic!("expected UnknownSymptom, got {other:?}"),
        }
    }

    #[test]
    fn scale_value_three_is_rejected() {
        let catalog = catalog();
        let answers = answers_by_code(&catalog, &[("G3", 3)]);
        let errors = validate_answers(&answers, &catalog);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code.as_deref(), Some("G3"));
        assert_eq!(errors[0].expected_max, Some(2));
    }

    #[test]
    fn boolean_value_two_is_rejected() {
        let catalog = catalog();
        let answers = answers_by_code(&catalog, &[("G9", 2)]);
        let errors = validate_answers(&answers, &catalog);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].expected_max, Some(1));
    }

    #[test]
    fn unknown_symptom_is_a_validation_error_too() {
        let catalog = catalog();
        let errors = validate_answers(&[Answer::new(Uuid::new_v4(), 0)], &catalog);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].code.is_none());
    }

    #[test]
    fn one_affirmed_core_symptom_is_not_enough() {
        let catalog = catalog();
        let answers = answers_by_code(&catalog, &[("G1", 2)]);
        let core = detect_core_symptoms(&answers, &catalog, CoreSymptomRule::default());
        assert!(!core.has_core);
        assert_eq!(core.affirmed.len(), 1);
    }

    #[test]
    fn two_affirmed_core_symptoms_trigger() {
        let catalog = catalog();
        let answers = answers_by_code(&catalog, &[("G1", 1), ("G2", 2)]);
        let core = detect_core_symptoms(&answers, &catalog, CoreSymptomRule::default());
        assert!(core.has_core);
        let codes: Vec<_> = core.affirmed.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["G1", "G2"]);
    }

    #[test]
    fn core_rule_threshold_is_configurable() {
        let catalog = catalog();
        let answers = answers_by_code(&catalog, &[("G1", 1)]);
        let core = detect_core_symptoms(&answers, &catalog, CoreSymptomRule { required: 1 });
        assert!(core.has_core);
    }

    #[test]
    fn non_core_affirmations_never_count_as_core() {
        let catalog = catalog();
        let answers = answers_by_code(&catalog, &[("G3", 2), ("G4", 2), ("G5", 2)]);
        let core = detect_core_symptoms(&answers, &catalog, CoreSymptomRule::default());
        assert!(!core.has_core);
        assert!(core.affirmed.is_empty());
    }

    #[test]
    fn duplicate_answers_count_one_symptom_once() {
        let catalog = catalog();
        let g1 = catalog.iter().find(|s| s.code == "G1").unwrap().id;
        let g9 = catalog.iter().find(|s| s.code == "G9").unwrap().id;
        let answers = vec![
            Answer::new(g1, 2),
            Answer::new(g1, 2),
            Answer::new(g9, 1),
            Answer::new(g9, 1),
        ];

        // Two answers for one core symptom are still one distinct symptom.
        let core = detect_core_symptoms(&answers, &catalog, CoreSymptomRule::default());
        assert!(!core.has_core);
        assert_eq!(core.affirmed.len(), 1);

        assert_eq!(calculate_score(&answers, &catalog).unwrap(), 2);
        assert_eq!(sensitive_affirmations(&answers, &catalog).len(), 1);
    }

    #[test]
    fn crisis_triggers_on_a_single_sensitive_affirmation() {
        let catalog = catalog();
        assert!(detect_crisis_flags(
            &answers_by_code(&catalog, &[("G9", 1)]),
            &catalog
        ));
        assert!(!detect_crisis_flags(
            &answers_by_code(&catalog, &[("G9", 0)]),
            &catalog
        ));
    }

    #[test]
    fn crisis_ignores_non_sensitive_symptoms() {
        let catalog = catalog();
        let answers = answers_by_code(&catalog, &[("G1", 1), ("G2", 1), ("G3", 1)]);
        assert!(!detect_crisis_flags(&answers, &catalog));
    }

    #[test]
    fn crisis_requires_no_sensitive_symptom_gracefully() {
        let catalog = catalog();
        let without_g9: Vec<_> = catalog
            .iter()
            .filter(|s| !s.is_sensitive)
            .cloned()
            .collect();
        let thin = SymptomCatalog::new(without_g9);
        let answers: Vec<Answer> = thin.iter().map(|s| Answer::new(s.id, 1)).collect();
        assert!(!detect_crisis_flags(&answers, &thin));
    }
}
