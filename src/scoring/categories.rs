//! The five category scorers. Each is a pure, total function over the
//! project and its optional signal records and returns a score in [0, 10];
//! a missing record always maps to a defined default, never an error.

use crate::types::project::Project;
use crate::types::scoring::Score;
use crate::types::signals::{
    AnalysisResult, Coverage, Necessity, PaymentVerification, ProtocolResult, Tier,
};

/// Use cases that earn the innovation bonus.
const HIGH_NOVELTY_USE_CASES: [&str; 3] = ["streaming", "m2m payments", "cross-chain"];

/// Keywords in structural findings that hint at innovation.
const INNOVATION_KEYWORDS: [&str; 5] = ["novel", "unique", "first", "innovative", "creative"];

/// Demo functionality: any runnable artifact dominates, polish is secondary.
pub fn demo_functionality(project: &Project, analysis: Option<&AnalysisResult>) -> Score {
    let mut score = 0.0;

    if project.demo_url.is_some() {
        score += 4.0;
    }

    match analysis {
        Some(analysis) => {
            if analysis.has_deployment_config {
                score += 2.0;
            }
            score += (Score::from(analysis.readme_quality) / 5.0).min(2.0);
            if analysis.has_demo {
                score += 2.0;
            }
        }
        None => {}
    }

    score.clamp(0.0, 10.0)
}

/// Protocol integration: zero without a detected integration, otherwise the
/// analyzer's raw score plus implementation bonuses.
pub fn x402_integration(x402: Option<&ProtocolResult>) -> Score {
    let x402 = match x402 {
        Some(x402) => x402,
        None => return 0.0,
    };
    if !x402.uses_x402 {
        return 0.0;
    }

    let mut score = Score::from(x402.integration_score);

    if x402.has_wallet_integration {
        score += 1.0;
    }
    if matches!(
        x402.payment_verification,
        PaymentVerification::Onchain | PaymentVerification::Hybrid
    ) {
        score += 1.0;
    }
    if x402.payment_necessity == Necessity::Essential {
        score += 1.0;
    }

    score.clamp(0.0, 10.0)
}

/// Code quality: 3.0 is a neutral prior when no analysis exists, not a
/// penalty.
pub fn code_quality(analysis: Option<&AnalysisResult>) -> Score {
    let analysis = match analysis {
        Some(analysis) => analysis,
        None => return 3.0,
    };

    let mut score: Score = 3.0;
    let signals = &analysis.code_quality_signals;

    if signals.linting {
        score += 1.5;
    }
    if signals.formatting {
        score += 1.0;
    }

    score += match signals.error_handling {
        Tier::Good => 2.0,
        Tier::Adequate => 1.0,
        Tier::Poor => 0.0,
    };
    score += match signals.documentation {
        Tier::Good => 1.5,
        Tier::Adequate => 0.5,
        Tier::Poor => 0.0,
    };

    if analysis.has_tests {
        score += match analysis.test_coverage_estimate {
            Coverage::High => 2.0,
            Coverage::Medium => 1.5,
            Coverage::Low => 0.5,
            Coverage::None => 0.0,
        };
    }

    score.clamp(0.0, 10.0)
}

pub fn completeness(project: &Project, analysis: Option<&AnalysisResult>) -> Score {
    let mut score: Score = 3.0;

    if let Some(analysis) = analysis {
        if analysis.has_readme {
            score += 1.5;
            if analysis.readme_quality >= 7 {
                score += 1.0;
            }
        }
    }

    let has_demo = project.demo_url.is_some()
        || analysis.map(|analysis| analysis.has_demo).unwrap_or(false);
    if has_demo {
        score += 2.0;
    }

    if let Some(analysis) = analysis {
        if analysis.has_deployment_config {
            score += 1.5;
        }
        if analysis.languages.len() >= 2 {
            score += 1.0;
        }
        if analysis.frameworks.len() >= 2 {
            score += 1.0;
        }
    }

    score.clamp(0.0, 10.0)
}

/// Innovation: 4.0 baseline for competent-but-unoriginal work. A protocol
/// record can only raise the floor, never lower it.
pub fn innovation(analysis: Option<&AnalysisResult>, x402: Option<&ProtocolResult>) -> Score {
    let mut score: Score = 4.0;

    if let Some(x402) = x402 {
        score = score.max(Score::from(x402.novelty_score));
        score += x402.creative_elements.len().min(3) as Score;
        if HIGH_NOVELTY_USE_CASES.contains(&x402.use_case.as_str()) {
            score += 1.5;
        }
    }

    if let Some(analysis) = analysis {
        for finding in &analysis.notable_findings {
            let lower = finding.to_lowercase();
            if INNOVATION_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
                score += 0.5;
            }
        }
    }

    score.clamp(0.0, 10.0)
}
