//! Threshold-driven level assignment, the core-symptom escalation rule,
//! and the advisory 0–100 risk index.

use tenang_core::models::level::RiskLevel;

use crate::error::EngineError;
use crate::thresholds::ThresholdTable;

/// Escalation remap applied when core symptoms are present.
///
/// Expressed as an enum-indexed table rather than branching, so the
/// monotonicity guarantee ("never de-escalates") is enforced structurally
/// by clamping against the base level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationPolicy {
    pub enabled: bool,
    map: [RiskLevel; 3],
}

impl EscalationPolicy {
    /// The standard rule: one tier up, High stays High.
    pub fn one_tier_up() -> Self {
        Self {
            enabled: true,
            map: [RiskLevel::Medium, RiskLevel::High, RiskLevel::High],
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            map: [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High],
        }
    }

    /// Custom per-level remap. Entries below the identity are clamped at
    /// application time, so a misconfigured map cannot de-escalate.
    pub fn with_map(map: [RiskLevel; 3]) -> Self {
        Self { enabled: true, map }
    }

    /// Applied at most once, after the base level is resolved.
    pub fn apply(&self, level: RiskLevel) -> RiskLevel {
        if !self.enabled {
            return level;
        }
        level.max(self.map[level as usize])
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::one_tier_up()
    }
}

/// Resolve a score to a risk level.
///
/// The administered table is consulted first (first match wins on
/// overlapping ranges); a score it does not cover falls back to the
/// built-in table. A score outside both is a configuration defect and
/// fails with [`EngineError::NoThresholdMatch`] — the engine never
/// guesses a level.
pub fn determine_level(
    score: u32,
    has_core_symptoms: bool,
    table: &ThresholdTable,
    escalation: &EscalationPolicy,
) -> Result<RiskLevel, EngineError> {
    let base = table
        .lookup(score)
        .or_else(|| ThresholdTable::builtin().lookup(score))
        .map(|r| r.level)
        .ok_or(EngineError::NoThresholdMatch { score })?;

    Ok(if has_core_symptoms {
        escalation.apply(base)
    } else {
        base
    })
}

/// Advisory 0–100 index: the score as a percentage of the maximum,
/// +30 when the crisis flag is set, +15 when core symptoms are present,
/// clamped to 100 after each addition. Never feeds back into the level.
pub fn risk_index(
    score: u32,
    max_possible_score: u32,
    crisis_flag: bool,
    has_core_symptoms: bool,
) -> u8 {
    let base = if max_possible_score == 0 {
        0
    } else {
        let pct = (score as f64 / max_possible_score as f64 * 100.0).round() as u32;
        pct.min(100)
    };

    let mut index = base;
    if crisis_flag {
        index = (index + 30).min(100);
    }
    if has_core_symptoms {
        index = (index + 15).min(100);
    }
    index as u8
}
