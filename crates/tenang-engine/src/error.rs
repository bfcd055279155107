use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

/// A field-level problem with one answer in a submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub symptom_id: Uuid,
    /// Symptom mnemonic, when the id resolved against the catalog.
    pub code: Option<String>,
    pub value: u8,
    /// Maximum accepted value for the symptom's scale kind, when known.
    pub expected_max: Option<u8>,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// The whole submission is rejected before any scoring runs.
    #[error("submission rejected: {} invalid answer(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    #[error("unknown symptom: {0}")]
    UnknownSymptom(Uuid),

    /// The score fell outside every configured range and the built-in
    /// fallback table. A data-configuration defect, not user input.
    #[error("score {score} matches no configured threshold range")]
    NoThresholdMatch { score: u32 },
}
