//! Screening context builder for advice prompts.
//!
//! Assembles the reported symptoms and severity breakdown from one
//! submission into a structured text block the advice model can work
//! from, together with the counselor instructions.

use serde::Serialize;

use tenang_core::models::answer::Answer;
use tenang_core::models::level::RiskLevel;
use tenang_core::models::screening::ScreeningResult;
use tenang_core::models::symptom::ScaleKind;
use tenang_engine::catalog::SymptomCatalog;

/// A symptom the respondent affirmed, with its severity spelled out.
#[derive(Debug, Clone, Serialize)]
pub struct ReportedSymptom {
    pub code: String,
    pub label: String,
    pub value: u8,
    pub severity: &'static str,
    pub is_core: bool,
    pub is_sensitive: bool,
}

/// How many scale symptoms landed on each severity step.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SeverityBreakdown {
    pub not_at_all: u32,
    pub sometimes: u32,
    pub often: u32,
}

/// Everything the prompt needs beyond the classification itself.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningContext {
    pub reported: Vec<ReportedSymptom>,
    pub breakdown: SeverityBreakdown,
}

/// Human label for an answer value under a given scale kind.
pub fn severity_label(value: u8, kind: ScaleKind) -> &'static str {
    match kind {
        ScaleKind::Boolean => {
            if value == 1 {
                "yes"
            } else {
                "no"
            }
        }
        ScaleKind::Scale => match value {
            0 => "not at all",
            1 => "sometimes",
            _ => "often",
        },
    }
}

/// Collect the affirmed symptoms and the severity breakdown over scale
/// symptoms. Answers referencing symptoms absent from the catalog are
/// skipped; the engine has already validated the submission.
pub fn build_context(answers: &[Answer], catalog: &SymptomCatalog) -> ScreeningContext {
    let mut reported = Vec::new();
    let mut breakdown = SeverityBreakdown::default();

    for answer in answers {
        let Some(symptom) = catalog.get(answer.symptom_id) else {
            continue;
        };

        if answer.value > 0 {
            reported.push(ReportedSymptom {
                code: symptom.code.clone(),
                label: symptom.label.clone(),
                value: answer.value,
                severity: severity_label(answer.value, symptom.scale),
                is_core: symptom.is_core,
                is_sensitive: symptom.is_sensitive,
            });
        }

        if symptom.scale == ScaleKind::Scale {
            match answer.value {
                0 => breakdown.not_at_all += 1,
                1 => breakdown.sometimes += 1,
                _ => breakdown.often += 1,
            }
        }
    }

    ScreeningContext {
        reported,
        breakdown,
    }
}

fn risk_summary(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Low risk - minimal depressive symptoms",
        RiskLevel::Medium => "Moderate risk - some depressive symptoms present",
        RiskLevel::High => "High risk - significant depressive symptoms",
    }
}

/// Build the counselor prompt for the advice model.
pub fn build_prompt(
    result: &ScreeningResult,
    context: &ScreeningContext,
    max_possible_score: u32,
) -> String {
    let core_line = if result.has_core_symptoms {
        "Core depressive symptoms (persistent low mood and loss of interest) are present."
    } else {
        "Core depressive symptoms are not present."
    };
    let crisis_line = if result.crisis_flag {
        "WARNING: crisis indicators were detected. Professional mental health support is strongly recommended."
    } else {
        "No immediate crisis indicators were detected."
    };

    let mut symptoms_block = String::new();
    for symptom in &context.reported {
        symptoms_block.push_str(&format!("- {} ({})\n", symptom.label, symptom.severity));
    }
    if symptoms_block.is_empty() {
        symptoms_block.push_str("- none reported\n");
    }

    format!(
        "You are a professional mental health counselor with expertise in depression \
         and mood disorders. Based on the screening result below, write personal, \
         empathetic, and constructive guidance.\n\
         \n\
         ## Screening result\n\
         Total score: {score}/{max}\n\
         Risk level: {risk}\n\
         {core_line}\n\
         {crisis_line}\n\
         \n\
         ## Reported symptoms\n\
         {symptoms_block}\
         \n\
         ## Task\n\
         1. A short interpretation of the result (1-2 paragraphs).\n\
         2. The main symptoms identified and what they imply.\n\
         3. Three to five concrete, actionable recommendations.\n\
         4. When to seek professional help.\n\
         5. An empathetic, encouraging closing message.\n\
         \n\
         Use clear, accessible language. Avoid formal medical diagnoses; focus on \
         guidance and support. If crisis indicators are present, stress the urgency \
         of immediate professional help.",
        score = result.total_score,
        max = max_possible_score,
        risk = risk_summary(result.level),
    )
}
