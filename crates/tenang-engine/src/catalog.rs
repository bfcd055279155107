//! The symptom catalog shim: an in-memory, read-only view of the
//! administered symptom inventory, plus the built-in G1–G9 default.

use std::collections::HashSet;
use std::sync::LazyLock;

use thiserror::Error;
use uuid::Uuid;

use tenang_core::models::symptom::{ScaleKind, SymptomDefinition};

/// Non-fatal catalog defects, surfaced to the administrative layer.
/// The engine itself degrades gracefully on all of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogDefect {
    #[error("duplicate symptom id {0}")]
    DuplicateId(Uuid),

    #[error("only {found} core symptom(s) defined; the core-symptom rule needs at least {required}")]
    TooFewCoreSymptoms { found: usize, required: usize },

    #[error("no sensitive symptom defined; crisis detection cannot trigger")]
    NoSensitiveSymptoms,
}

/// Ordered, read-only set of symptom definitions.
#[derive(Debug, Clone)]
pub struct SymptomCatalog {
    symptoms: Vec<SymptomDefinition>,
}

impl SymptomCatalog {
    /// Build a catalog, ordering symptoms by `display_order`.
    pub fn new(mut symptoms: Vec<SymptomDefinition>) -> Self {
        symptoms.sort_by_key(|s| s.display_order);
        Self { symptoms }
    }

    /// The built-in 9-item inventory: G1–G8 on the 0–2 scale (G1 and G2
    /// core), G9 a sensitive 0/1 item.
    pub fn default_inventory() -> SymptomCatalog {
        DEFAULT_INVENTORY.clone()
    }

    pub fn get(&self, id: Uuid) -> Option<&SymptomDefinition> {
        self.symptoms.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymptomDefinition> {
        self.symptoms.iter()
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn core_symptoms(&self) -> impl Iterator<Item = &SymptomDefinition> {
        self.symptoms.iter().filter(|s| s.is_core)
    }

    pub fn sensitive_symptoms(&self) -> impl Iterator<Item = &SymptomDefinition> {
        self.symptoms.iter().filter(|s| s.is_sensitive)
    }

    pub fn scale_symptom_count(&self) -> usize {
        self.symptoms
            .iter()
            .filter(|s| s.scale == ScaleKind::Scale)
            .count()
    }

    /// Upper bound of the total score: scale symptoms contribute up to 2
    /// each, boolean symptoms contribute nothing.
    pub fn max_possible_score(&self) -> u32 {
        self.scale_symptom_count() as u32 * ScaleKind::Scale.max_value() as u32
    }

    /// Report structural defects for the administrative surface.
    pub fn validate(&self, required_core: usize) -> Vec<CatalogDefect> {
        let mut defects = Vec::new();

        let mut seen = HashSet::new();
        for symptom in &self.symptoms {
            if !seen.insert(symptom.id) {
                defects.push(CatalogDefect::DuplicateId(symptom.id));
            }
        }

        let core_count = self.core_symptoms().count();
        if core_count < required_core {
            defects.push(CatalogDefect::TooFewCoreSymptoms {
                found: core_count,
                required: required_core,
            });
        }

        if self.sensitive_symptoms().next().is_none() {
            defects.push(CatalogDefect::NoSensitiveSymptoms);
        }

        defects
    }
}

/// Namespace for deriving the built-in inventory's symptom ids. Ids are
/// UUIDv5 hashes of the symptom code, so serialized answers referencing
/// the default inventory stay valid across restarts.
const INVENTORY_NAMESPACE: Uuid = uuid::uuid!("5cf1a3de-20c4-4e7b-9d8a-61b2f0c97d44");

static DEFAULT_INVENTORY: LazyLock<SymptomCatalog> = LazyLock::new(|| {
    // (code, label, prompt, core, sensitive, kind)
    let items = [
        (
            "G1",
            "Deep sadness or emptiness",
            "In the past week, have you felt deep sadness or a sense of emptiness?",
            true,
            false,
            ScaleKind::Scale,
        ),
        (
            "G2",
            "Loss of interest or pleasure in activities",
            "In the past week, have you lost interest or pleasure in activities you usually enjoy?",
            true,
            false,
            ScaleKind::Scale,
        ),
        (
            "G3",
            "Changes in appetite or weight",
            "In the past week, has your appetite or weight changed significantly?",
            false,
            false,
            ScaleKind::Scale,
        ),
        (
            "G4",
            "Sleep disturbance",
            "In the past week, have you had trouble sleeping, slept too much, or slept poorly?",
            false,
            false,
            ScaleKind::Scale,
        ),
        (
            "G5",
            "Changes in activity or movement",
            "In the past week, have you noticed changes in your energy, speech, or body movement?",
            false,
            false,
            ScaleKind::Scale,
        ),
        (
            "G6",
            "Fatigue or loss of energy",
            "In the past week, have you felt tired or drained of energy nearly every day?",
            false,
            false,
            ScaleKind::Scale,
        ),
        (
            "G7",
            "Worthlessness or excessive guilt",
            "In the past week, have you felt worthless or excessively guilty?",
            false,
            false,
            ScaleKind::Scale,
        ),
        (
            "G8",
            "Difficulty concentrating or deciding",
            "In the past week, have you found it hard to concentrate or make decisions?",
            false,
            false,
            ScaleKind::Scale,
        ),
        (
            "G9",
            "Thoughts of death or self-harm",
            "Have you had thoughts about death or about hurting yourself?",
            false,
            true,
            ScaleKind::Boolean,
        ),
    ];

    let symptoms = items
        .iter()
        .enumerate()
        .map(
            |(i, (code, label, prompt, is_core, is_sensitive, scale))| SymptomDefinition {
                id: Uuid::new_v5(&INVENTORY_NAMESPACE, code.as_bytes()),
                code: code.to_string(),
                label: label.to_string(),
                prompt: prompt.to_string(),
                scale: *scale,
                is_core: *is_core,
                is_sensitive: *is_sensitive,
                display_order: i as u32 + 1,
            },
        )
        .collect();

    SymptomCatalog::new(symptoms)
});
