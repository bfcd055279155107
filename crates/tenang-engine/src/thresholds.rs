//! The threshold table shim: ordered score ranges mapped to risk levels,
//! with first-match-wins lookup and administrative validation.
//!
//! There is a single authoritative abstraction here. Administered ranges
//! come in through [`ThresholdTable::new`]; [`ThresholdTable::builtin`] is
//! the static default used when no administered table exists, and the
//! classification fallback when an administered table fails to cover a
//! score.

use std::sync::LazyLock;

use thiserror::Error;

use tenang_core::models::level::RiskLevel;
use tenang_core::models::threshold::ThresholdRange;

/// A structural problem with an administered threshold table.
///
/// Overlaps and gaps are tolerated at classification time (first match
/// wins; gaps fall back to the built-in table) but they are configuration
/// bugs, so the administrative surface should refuse to save a table that
/// produces any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableDefect {
    #[error("range for {level} is inverted: min {min} > max {max}")]
    InvertedRange {
        level: RiskLevel,
        min: u32,
        max: u32,
    },

    #[error("ranges for {first} and {second} overlap on scores {lo}..={hi}")]
    Overlap {
        first: RiskLevel,
        second: RiskLevel,
        lo: u32,
        hi: u32,
    },

    #[error("no range covers scores {from}..={to}")]
    Gap { from: u32, to: u32 },
}

/// Ordered set of threshold ranges. Iteration order is the tie-break
/// order for overlapping ranges.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    ranges: Vec<ThresholdRange>,
}

impl ThresholdTable {
    pub fn new(ranges: Vec<ThresholdRange>) -> Self {
        Self { ranges }
    }

    /// The static default: low [0,4], medium [5,9], high [10,16].
    pub fn builtin() -> &'static ThresholdTable {
        &BUILTIN
    }

    pub fn ranges(&self) -> &[ThresholdRange] {
        &self.ranges
    }

    /// First range containing `score`, in table order.
    pub fn lookup(&self, score: u32) -> Option<&ThresholdRange> {
        self.ranges.iter().find(|r| r.contains(score))
    }

    pub fn by_level(&self, level: RiskLevel) -> Option<&ThresholdRange> {
        self.ranges.iter().find(|r| r.level == level)
    }

    /// Report structural defects against the score domain
    /// `[0, max_possible_score]`.
    pub fn validate(&self, max_possible_score: u32) -> Vec<TableDefect> {
        let mut defects = Vec::new();

        for range in &self.ranges {
            if range.min_score > range.max_score {
                defects.push(TableDefect::InvertedRange {
                    level: range.level,
                    min: range.min_score,
                    max: range.max_score,
                });
            }
        }

        for (i, a) in self.ranges.iter().enumerate() {
            for b in &self.ranges[i + 1..] {
                let lo = a.min_score.max(b.min_score);
                let hi = a.max_score.min(b.max_score);
                if lo <= hi {
                    defects.push(TableDefect::Overlap {
                        first: a.level,
                        second: b.level,
                        lo,
                        hi,
                    });
                }
            }
        }

        // The score domain is small, so gap detection by direct scan is
        // clearer than interval arithmetic.
        let mut gap_start = None;
        for score in 0..=max_possible_score {
            let covered = self.ranges.iter().any(|r| r.contains(score));
            match (covered, gap_start) {
                (false, None) => gap_start = Some(score),
                (true, Some(from)) => {
                    defects.push(TableDefect::Gap {
                        from,
                        to: score - 1,
                    });
                    gap_start = None;
                }
                _ => {}
            }
        }
        if let Some(from) = gap_start {
            defects.push(TableDefect::Gap {
                from,
                to: max_possible_score,
            });
        }

        defects
    }
}

static BUILTIN: LazyLock<ThresholdTable> = LazyLock::new(|| {
    ThresholdTable::new(vec![
        ThresholdRange {
            level: RiskLevel::Low,
            min_score: 0,
            max_score: 4,
            advice_text: "Minimal depressive symptoms were detected. Keep up healthy \
                routines: regular exercise, enough rest, and strong social connections. \
                If your mood or wellbeing changes, talk to a mental health professional."
                .to_string(),
        },
        ThresholdRange {
            level: RiskLevel::Medium,
            min_score: 5,
            max_score: 9,
            advice_text: "The screening indicates moderate depressive symptoms. A \
                consultation with a counselor or psychologist for further evaluation is \
                strongly recommended; early support makes a real difference."
                .to_string(),
        },
        ThresholdRange {
            level: RiskLevel::High,
            min_score: 10,
            max_score: 16,
            advice_text: "The screening indicates significant depressive symptoms. \
                Please contact a mental health professional or a mental health crisis \
                service as soon as possible. Do not wait - professional support matters \
                for your wellbeing."
                .to_string(),
        },
    ])
});
