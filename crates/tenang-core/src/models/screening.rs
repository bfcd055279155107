use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::level::RiskLevel;

/// The classification produced for one submission. Created once per
/// submission and never mutated; a re-screen produces a new result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningResult {
    pub total_score: u32,
    pub level: RiskLevel,
    pub has_core_symptoms: bool,
    pub crisis_flag: bool,
    /// Advisory 0–100 index. Independent of `level`, which is purely
    /// threshold-driven.
    pub risk_index: u8,
}

/// A completed screening with its identity and timestamp. The session id
/// keys the advice cache in the calling layer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningSession {
    pub id: Uuid,
    pub created_at: jiff::Timestamp,
    pub result: ScreeningResult,
}

impl ScreeningSession {
    pub fn new(result: ScreeningResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: jiff::Timestamp::now(),
            result,
        }
    }
}
