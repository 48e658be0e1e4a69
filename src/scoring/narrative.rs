//! Derives strengths, weaknesses, actionable feedback and flags from the
//! category scores and raw signals. Lists are capped and ordered: category
//! thresholds first, then signal-based observations, then analyzer labels.

use crate::types::project::Project;
use crate::types::scoring::{Flags, ProjectScores, Score};
use crate::types::signals::{
    AnalysisResult, Coverage, ForensicsResult, PaymentVerification, ProtocolResult, Verdict,
};

const STRENGTH_THRESHOLD: Score = 7.0;
const WEAKNESS_THRESHOLD: Score = 5.0;
const EXCEPTIONAL_TOTAL: Score = 8.5;

const MAX_STRENGTHS: usize = 5;
const MAX_WEAKNESSES: usize = 5;
const MAX_FEEDBACK: usize = 4;

pub fn strengths(
    scores: &ProjectScores,
    analysis: Option<&AnalysisResult>,
    x402: Option<&ProtocolResult>,
) -> Vec<String> {
    let mut strengths = Vec::new();

    if scores.demo_functionality >= STRENGTH_THRESHOLD {
        strengths.push("Working demo with good functionality".to_string());
    }
    if scores.x402_integration >= STRENGTH_THRESHOLD {
        strengths.push("Strong X402 protocol integration".to_string());
    }
    if scores.code_quality >= STRENGTH_THRESHOLD {
        strengths.push("High code quality with good practices".to_string());
    }
    if scores.completeness >= STRENGTH_THRESHOLD {
        strengths.push("Feature-complete implementation".to_string());
    }
    if scores.innovation >= STRENGTH_THRESHOLD {
        strengths.push("Innovative approach or use case".to_string());
    }

    if let Some(analysis) = analysis {
        if analysis.has_tests
            && matches!(
                analysis.test_coverage_estimate,
                Coverage::Medium | Coverage::High
            )
        {
            strengths.push("Good test coverage".to_string());
        }
        if analysis.has_deployment_config {
            let target = analysis.deployment_target.as_deref().unwrap_or("unknown");
            strengths.push(format!("Ready for deployment ({target})"));
        }
    }

    if let Some(x402) = x402 {
        for element in x402.creative_elements.iter().take(2) {
            strengths.push(element.clone());
        }
    }

    strengths.truncate(MAX_STRENGTHS);
    strengths
}

pub fn weaknesses(
    scores: &ProjectScores,
    analysis: Option<&AnalysisResult>,
    x402: Option<&ProtocolResult>,
) -> Vec<String> {
    let mut weaknesses = Vec::new();

    if scores.demo_functionality < WEAKNESS_THRESHOLD {
        weaknesses.push("Demo functionality needs improvement".to_string());
    }
    if scores.x402_integration < WEAKNESS_THRESHOLD {
        weaknesses.push("X402 integration is incomplete or missing".to_string());
    }
    if scores.code_quality < WEAKNESS_THRESHOLD {
        weaknesses.push("Code quality could be improved".to_string());
    }
    if scores.completeness < WEAKNESS_THRESHOLD {
        weaknesses.push("Implementation appears incomplete".to_string());
    }
    if scores.innovation < WEAKNESS_THRESHOLD {
        weaknesses.push("Limited innovation beyond basic implementation".to_string());
    }

    if let Some(analysis) = analysis {
        if !analysis.has_readme {
            weaknesses.push("Missing README documentation".to_string());
        } else if analysis.readme_quality < 4 {
            weaknesses.push("README needs more detail".to_string());
        }
        if !analysis.has_tests {
            weaknesses.push("No tests found".to_string());
        }
    }

    if let Some(x402) = x402 {
        for concern in x402.concerns.iter().take(2) {
            weaknesses.push(concern.clone());
        }
    }

    weaknesses.truncate(MAX_WEAKNESSES);
    weaknesses
}

pub fn feedback(
    project: &Project,
    analysis: Option<&AnalysisResult>,
    x402: Option<&ProtocolResult>,
) -> Vec<String> {
    let mut feedback = Vec::new();

    if project.demo_url.is_none() {
        feedback.push("Consider adding a live demo URL for judges to test".to_string());
    }

    if let Some(analysis) = analysis {
        if !analysis.code_quality_signals.linting {
            feedback.push("Add linting configuration for consistent code style".to_string());
        }
        if !analysis.has_tests {
            feedback.push("Add tests to improve reliability and maintainability".to_string());
        }
        if analysis.readme_quality < 6 {
            feedback.push("Expand README with setup instructions and screenshots".to_string());
        }
    }

    if let Some(x402) = x402 {
        if !x402.uses_x402 {
            feedback.push("Implement X402 protocol for payment functionality".to_string());
        } else if x402.payment_verification == PaymentVerification::Missing {
            feedback.push("Add payment verification to ensure transactions are valid".to_string());
        }
    }

    feedback.truncate(MAX_FEEDBACK);
    feedback
}

pub fn flags(
    weighted_total: Score,
    forensics: Option<&ForensicsResult>,
    x402: Option<&ProtocolResult>,
) -> Flags {
    let mut flags = Flags::default();

    if let Some(forensics) = forensics {
        if matches!(forensics.verdict, Verdict::Questionable | Verdict::Invalid) {
            flags.timeline_issues = true;
        }
        // An INVALID timeline verdict is the strongest plagiarism signal
        // available without source-level comparison.
        if forensics.verdict == Verdict::Invalid {
            flags.potential_plagiarism = true;
        }
    }

    if let Some(x402) = x402 {
        if !x402.uses_x402 {
            flags.missing_x402 = true;
        }
    }

    if weighted_total >= EXCEPTIONAL_TOTAL {
        flags.exceptional_quality = true;
    }

    flags
}
