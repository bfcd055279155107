use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::level::RiskLevel;

/// One row of the administered threshold table: an inclusive score range
/// mapped to a risk level, with the advice text shown when the external
/// advice generator is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ThresholdRange {
    pub level: RiskLevel,
    pub min_score: u32,
    pub max_score: u32,
    pub advice_text: String,
}

impl ThresholdRange {
    /// Inclusive on both bounds.
    pub fn contains(&self, score: u32) -> bool {
        score >= self.min_score && score <= self.max_score
    }
}
