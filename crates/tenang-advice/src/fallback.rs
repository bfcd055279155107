//! Deterministic advice selection, used whenever the external model is
//! unavailable and as the source of truth for crisis messaging.
//!
//! Precedence, highest first: crisis flag, then level+core combination,
//! then the matched threshold range's advice text, then the per-level
//! built-in default.

use tenang_core::models::screening::ScreeningResult;
use tenang_engine::thresholds::ThresholdTable;

/// Shown whenever the crisis flag is set, regardless of level or score.
pub const CRISIS_ADVICE: &str = "ATTENTION: your screening shows signs of a possible \
    crisis. Please contact a mental health service or an emergency line right away. \
    You do not have to face this alone - immediate professional support is available.";

/// Prepended to level advice when core symptoms are present.
const CORE_SYMPTOM_NOTICE: &str = "The screening found significant core depressive \
    symptoms (persistent low mood and loss of interest in activities).";

/// Last-resort text when no threshold range exists for the level.
const DEFAULT_ADVICE: &str = "Thank you for completing the screening. If you have any \
    concerns about your mental health, please consult a mental health professional.";

/// Select advice text for a result without calling any external service.
pub fn fallback_advice(result: &ScreeningResult, table: &ThresholdTable) -> String {
    if result.crisis_flag {
        return CRISIS_ADVICE.to_string();
    }

    let level_advice = table
        .by_level(result.level)
        .or_else(|| ThresholdTable::builtin().by_level(result.level))
        .map(|range| range.advice_text.clone())
        .unwrap_or_else(|| DEFAULT_ADVICE.to_string());

    if result.has_core_symptoms {
        format!("{CORE_SYMPTOM_NOTICE}\n\n{level_advice}")
    } else {
        level_advice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenang_core::models::level::RiskLevel;

    fn result(level: RiskLevel, has_core: bool, crisis: bool) -> ScreeningResult {
        ScreeningResult {
            total_score: 0,
            level,
            has_core_symptoms: has_core,
            crisis_flag: crisis,
            risk_index: 0,
        }
    }

    #[test]
    fn crisis_takes_precedence_over_everything() {
        let advice = fallback_advice(
            &result(RiskLevel::Low, true, true),
            ThresholdTable::builtin(),
        );
        assert_eq!(advice, CRISIS_ADVICE);
    }

    #[test]
    fn core_symptoms_prepend_the_notice_to_level_advice() {
        let table = ThresholdTable::builtin();
        let with_core = fallback_advice(&result(RiskLevel::Medium, true, false), table);
        let without = fallback_advice(&result(RiskLevel::Medium, false, false), table);
        assert!(with_core.starts_with(CORE_SYMPTOM_NOTICE));
        assert!(with_core.ends_with(&without));
        assert_eq!(without, table.by_level(RiskLevel::Medium).unwrap().advice_text);
    }

    #[test]
    fn missing_level_row_falls_back_to_builtin_then_default() {
        // Administered table has no row for High: the built-in covers it.
        let empty = ThresholdTable::new(vec![]);
        let advice = fallback_advice(&result(RiskLevel::High, false, false), &empty);
        assert_eq!(
            advice,
            ThresholdTable::builtin()
                .by_level(RiskLevel::High)
                .unwrap()
                .advice_text
        );
    }
}
