use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// How a symptom is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScaleKind {
    /// 0–2 ordinal severity: "not at all" / "sometimes" / "often".
    /// Contributes its value to the total score.
    Scale,
    /// 0/1 presence flag. Excluded from the numeric score; boolean
    /// symptoms feed crisis detection instead.
    Boolean,
}

impl ScaleKind {
    pub fn max_value(self) -> u8 {
        match self {
            ScaleKind::Scale => 2,
            ScaleKind::Boolean => 1,
        }
    }

    pub fn contains(self, value: u8) -> bool {
        value <= self.max_value()
    }
}

/// A single item in the screening inventory.
///
/// Administered externally; read-only from the engine's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SymptomDefinition {
    pub id: Uuid,
    /// Short mnemonic, e.g. "G1".
    pub code: String,
    pub label: String,
    /// The question text shown to the respondent.
    pub prompt: String,
    pub scale: ScaleKind,
    /// Primary diagnostic indicator. The engine's core-symptom rule
    /// requires joint affirmation of at least two of these.
    pub is_core: bool,
    /// An affirmative answer on a sensitive symptom is a safety signal
    /// and raises the crisis flag regardless of score.
    pub is_sensitive: bool,
    pub display_order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_kind_value_ranges() {
        assert!(ScaleKind::Scale.contains(0));
        assert!(ScaleKind::Scale.contains(2));
        assert!(!ScaleKind::Scale.contains(3));
        assert!(ScaleKind::Boolean.contains(1));
        assert!(!ScaleKind::Boolean.contains(2));
    }
}
