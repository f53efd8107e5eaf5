//! Case strength estimate — a display-only advisory score computed from
//! what the case file currently holds. Pure and deterministic; no I/O,
//! nothing persisted.

use serde::Serialize;

use super::classify::{classify_case_type, CaseTag};

// ═══════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════

const BASE_SCORE: i32 = 50;
/// Flat bonus for having any evidence at all.
const EVIDENCE_PRESENT_BONUS: i32 = 15;
/// Per-item evidence bonus, capped.
const EVIDENCE_ITEM_BONUS: i32 = 5;
const EVIDENCE_ITEM_CAP: i32 = 15;
const WITNESS_BONUS: i32 = 10;
const MEDICAL_REPORT_BONUS: i32 = 15;
/// Chronology completeness: full at ≥5 facts, partial at ≥3.
const CHRONOLOGY_FULL_BONUS: i32 = 10;
const CHRONOLOGY_PARTIAL_BONUS: i32 = 5;
/// Offences with a heightened proof burden score lower.
const BURDEN_PENALTY: i32 = 5;
/// The score never reads 0% or 100%.
const MIN_SCORE: i32 = 15;
const MAX_SCORE: i32 = 95;

const STRONG_THRESHOLD: u8 = 80;
const MODERATE_THRESHOLD: u8 = 60;

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// What the score is computed from.
#[derive(Debug, Clone, Default)]
pub struct StrengthInputs<'a> {
    pub case_type: &'a str,
    pub evidence_count: usize,
    pub has_witness: bool,
    /// Any evidence whose filename suggests medical/forensic documentation.
    pub has_medical_report: bool,
    pub chronology_fact_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthVerdict {
    Strong,
    Moderate,
    Weak,
}

impl StrengthVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthVerdict::Strong => "Strong",
            StrengthVerdict::Moderate => "Moderate",
            StrengthVerdict::Weak => "Weak",
        }
    }
}

/// Advisory strength report for display beside a case.
#[derive(Debug, Clone, Serialize)]
pub struct StrengthReport {
    /// Estimated success rate, clamped to [15, 95].
    pub score: u8,
    pub verdict: StrengthVerdict,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

// ═══════════════════════════════════════════════════════════
// Scoring
// ═══════════════════════════════════════════════════════════

/// Compute the case strength estimate.
pub fn case_strength(inputs: &StrengthInputs) -> StrengthReport {
    let profile = classify_case_type(inputs.case_type);
    let mut score = BASE_SCORE;

    if inputs.evidence_count > 0 {
        score += EVIDENCE_PRESENT_BONUS;
    }
    score += (inputs.evidence_count as i32 * EVIDENCE_ITEM_BONUS).min(EVIDENCE_ITEM_CAP);

    if inputs.has_witness {
        score += WITNESS_BONUS;
    }
    if inputs.has_medical_report {
        score += MEDICAL_REPORT_BONUS;
    }

    if inputs.chronology_fact_count >= 5 {
        score += CHRONOLOGY_FULL_BONUS;
    } else if inputs.chronology_fact_count >= 3 {
        score += CHRONOLOGY_PARTIAL_BONUS;
    }

    if profile.heightened_proof_burden {
        score -= BURDEN_PENALTY;
    }

    let score = score.clamp(MIN_SCORE, MAX_SCORE) as u8;
    let verdict = if score >= STRONG_THRESHOLD {
        StrengthVerdict::Strong
    } else if score >= MODERATE_THRESHOLD {
        StrengthVerdict::Moderate
    } else {
        StrengthVerdict::Weak
    };

    let mut strengths = Vec::new();
    if inputs.evidence_count >= 3 {
        strengths.push("Multiple evidence items collected".to_string());
    }
    if inputs.has_medical_report {
        strengths.push("Medical/forensic documentation present".to_string());
    }
    if inputs.chronology_fact_count >= 5 {
        strengths.push("Detailed chronological sequence".to_string());
    }
    if inputs.has_witness {
        strengths.push("Witness statements available".to_string());
    }

    let mut weaknesses = Vec::new();
    if inputs.evidence_count == 0 {
        weaknesses.push("No physical evidence uploaded".to_string());
    }
    if !inputs.has_medical_report && profile.has(CaseTag::Assault) {
        weaknesses.push("Medical report required but missing".to_string());
    }
    if inputs.chronology_fact_count < 3 {
        weaknesses.push("Insufficient timeline details".to_string());
    }

    StrengthReport {
        score,
        verdict,
        strengths,
        weaknesses,
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_case_scores_base() {
        let report = case_strength(&StrengthInputs::default());
        assert_eq!(report.score, 50);
        assert_eq!(report.verdict, StrengthVerdict::Weak);
        assert!(report
            .weaknesses
            .contains(&"No physical evidence uploaded".to_string()));
    }

    #[test]
    fn fully_stacked_case_caps_at_95() {
        let report = case_strength(&StrengthInputs {
            case_type: "Theft",
            evidence_count: 10,
            has_witness: true,
            has_medical_report: true,
            chronology_fact_count: 8,
        });
        // 50 + 15 + 15 + 10 + 15 + 10 = 115, clamped
        assert_eq!(report.score, 95);
        assert_eq!(report.verdict, StrengthVerdict::Strong);
    }

    #[test]
    fn score_always_within_bounds() {
        for evidence_count in 0..10 {
            for chronology in 0..8 {
                for case_type in ["", "Murder", "rape case", "Theft", "assault"] {
                    for has_witness in [false, true] {
                        for has_medical in [false, true] {
                            let report = case_strength(&StrengthInputs {
                                case_type,
                                evidence_count,
                                has_witness,
                                has_medical_report: has_medical,
                                chronology_fact_count: chronology,
                            });
                            assert!(
                                (15..=95).contains(&report.score),
                                "score {} out of bounds",
                                report.score
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn monotonic_in_evidence_count() {
        let mut previous = 0;
        for evidence_count in 0..10 {
            let report = case_strength(&StrengthInputs {
                case_type: "Murder",
                evidence_count,
                ..Default::default()
            });
            assert!(
                report.score >= previous,
                "adding evidence lowered the score ({} -> {})",
                previous,
                report.score
            );
            previous = report.score;
        }
    }

    #[test]
    fn per_item_bonus_caps_at_three_items() {
        let at_cap = case_strength(&StrengthInputs {
            evidence_count: 3,
            ..Default::default()
        });
        let beyond = case_strength(&StrengthInputs {
            evidence_count: 7,
            ..Default::default()
        });
        assert_eq!(at_cap.score, beyond.score);
    }

    #[test]
    fn heightened_burden_lowers_score() {
        let theft = case_strength(&StrengthInputs {
            case_type: "Theft",
            evidence_count: 2,
            ..Default::default()
        });
        let murder = case_strength(&StrengthInputs {
            case_type: "Murder",
            evidence_count: 2,
            ..Default::default()
        });
        assert_eq!(theft.score - murder.score, 5);
    }

    #[test]
    fn chronology_tiers() {
        let score_for = |n| {
            case_strength(&StrengthInputs {
                chronology_fact_count: n,
                ..Default::default()
            })
            .score
        };
        assert_eq!(score_for(0), 50);
        assert_eq!(score_for(3), 55);
        assert_eq!(score_for(5), 60);
    }

    #[test]
    fn verdict_thresholds() {
        // 50+15+15+10 = 90 → Strong
        let strong = case_strength(&StrengthInputs {
            evidence_count: 3,
            has_witness: true,
            ..Default::default()
        });
        assert_eq!(strong.verdict, StrengthVerdict::Strong);

        // 50+15+5 = 70 → Moderate
        let moderate = case_strength(&StrengthInputs {
            evidence_count: 1,
            ..Default::default()
        });
        assert_eq!(moderate.verdict, StrengthVerdict::Moderate);
    }

    #[test]
    fn assault_without_medical_report_flagged() {
        let report = case_strength(&StrengthInputs {
            case_type: "Assault",
            evidence_count: 1,
            ..Default::default()
        });
        assert!(report
            .weaknesses
            .contains(&"Medical report required but missing".to_string()));
    }
}
