use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A respondent's answer to one symptom. Transient input; the valid
/// `value` range depends on the referenced symptom's scale kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Answer {
    pub symptom_id: Uuid,
    pub value: u8,
}

impl Answer {
    pub fn new(symptom_id: Uuid, value: u8) -> Self {
        Self { symptom_id, value }
    }
}
