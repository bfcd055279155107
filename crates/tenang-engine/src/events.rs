//! Structured observability events raised while screening a submission.
//!
//! The engine never logs on its own; it returns these alongside the
//! result so callers decide when (and whether) to emit them. Dropping
//! them has no effect on the classification.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

/// A safety- or signal-relevant detection in one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreeningEvent {
    /// A sensitive symptom was affirmed. Safety-critical signal.
    CrisisIndicator { symptom_id: Uuid, code: String },

    /// A core symptom carried a positive value.
    CoreSymptomAffirmed {
        symptom_id: Uuid,
        code: String,
        value: u8,
    },
}

impl ScreeningEvent {
    /// Emit via `tracing`: warn for crisis indicators, info for core
    /// symptom affirmations.
    pub fn emit(&self) {
        match self {
            ScreeningEvent::CrisisIndicator { symptom_id, code } => {
                warn!(
                    screening.event = "crisis_indicator",
                    screening.symptom_id = %symptom_id,
                    screening.code = %code,
                    "sensitive symptom affirmed"
                );
            }
            ScreeningEvent::CoreSymptomAffirmed {
                symptom_id,
                code,
                value,
            } => {
                info!(
                    screening.event = "core_symptom_affirmed",
                    screening.symptom_id = %symptom_id,
                    screening.code = %code,
                    screening.value = value,
                    "core symptom affirmed"
                );
            }
        }
    }
}
