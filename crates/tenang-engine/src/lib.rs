//! tenang-engine
//!
//! The expert-system core of the Tenang screening service: score
//! computation, core-symptom and crisis detection, threshold-based level
//! assignment with escalation, and the advisory risk index.
//!
//! Everything here is pure and stateless. The engine reads a symptom
//! catalog and a threshold table (administered elsewhere), consumes one
//! submission's answers, and returns a [`ScreeningOutcome`]. Persistence,
//! rendering, and advice-text generation belong to the calling layer.

pub mod catalog;
pub mod classify;
pub mod error;
pub mod events;
pub mod scoring;
pub mod thresholds;

use tenang_core::models::answer::Answer;
use tenang_core::models::screening::ScreeningResult;

use catalog::SymptomCatalog;
use classify::EscalationPolicy;
use error::EngineError;
use events::ScreeningEvent;
use scoring::CoreSymptomRule;
use thresholds::ThresholdTable;

/// A classification plus the observability events detected on the way.
#[derive(Debug, Clone)]
pub struct ScreeningOutcome {
    pub result: ScreeningResult,
    pub events: Vec<ScreeningEvent>,
}

impl ScreeningOutcome {
    /// Emit every event through `tracing`. Fire-and-forget.
    pub fn emit_events(&self) {
        for event in &self.events {
            event.emit();
        }
    }
}

/// The composed screening pipeline:
/// validate → score → detect core → detect crisis → classify → risk index.
#[derive(Debug, Clone)]
pub struct ScreeningEngine {
    catalog: SymptomCatalog,
    thresholds: ThresholdTable,
    escalation: EscalationPolicy,
    core_rule: CoreSymptomRule,
}

impl ScreeningEngine {
    pub fn new(catalog: SymptomCatalog, thresholds: ThresholdTable) -> Self {
        Self {
            catalog,
            thresholds,
            escalation: EscalationPolicy::one_tier_up(),
            core_rule: CoreSymptomRule::default(),
        }
    }

    /// The G1–G9 inventory with the built-in threshold table.
    pub fn default_inventory() -> Self {
        Self::new(
            SymptomCatalog::default_inventory(),
            ThresholdTable::builtin().clone(),
        )
    }

    pub fn with_escalation(mut self, escalation: EscalationPolicy) -> Self {
        self.escalation = escalation;
        self
    }

    pub fn with_core_rule(mut self, core_rule: CoreSymptomRule) -> Self {
        self.core_rule = core_rule;
        self
    }

    pub fn catalog(&self) -> &SymptomCatalog {
        &self.catalog
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Screen one submission.
    ///
    /// Validation failures reject the whole submission before any scoring
    /// runs; no partial result is ever produced. Identical inputs always
    /// yield identical outcomes.
    pub fn screen(&self, answers: &[Answer]) -> Result<ScreeningOutcome, EngineError> {
        let errors = scoring::validate_answers(answers, &self.catalog);
        if !errors.is_empty() {
            return Err(EngineError::Invalid(errors));
        }

        let total_score = scoring::calculate_score(answers, &self.catalog)?;
        let core = scoring::detect_core_symptoms(answers, &self.catalog, self.core_rule);
        let sensitive = scoring::sensitive_affirmations(answers, &self.catalog);
        let crisis_flag = !sensitive.is_empty();

        let level = classify::determine_level(
            total_score,
            core.has_core,
            &self.thresholds,
            &self.escalation,
        )?;
        let risk_index = classify::risk_index(
            total_score,
            self.catalog.max_possible_score(),
            crisis_flag,
            core.has_core,
        );

        let mut events = Vec::with_capacity(sensitive.len() + core.affirmed.len());
        for s in &sensitive {
            events.push(ScreeningEvent::CrisisIndicator {
                symptom_id: s.symptom_id,
                code: s.code.clone(),
            });
        }
        for c in &core.affirmed {
            events.push(ScreeningEvent::CoreSymptomAffirmed {
                symptom_id: c.symptom_id,
                code: c.code.clone(),
                value: c.value,
            });
        }

        Ok(ScreeningOutcome {
            result: ScreeningResult {
                total_score,
                level,
                has_core_symptoms: core.has_core,
                crisis_flag,
                risk_index,
            },
            events,
        })
    }
}
