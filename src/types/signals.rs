//! Structured outputs of the three analyzers. Each record is optional per
//! project; a missing record means the analyzer could not run and scoring
//! falls back to defined defaults.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    Monolith,
    FrontendBackend,
    ClientServer,
    Monorepo,
    Microservices,
    FrontendSpa,
    #[default]
    Unknown,
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Architecture::Monolith => "monolith",
            Architecture::FrontendBackend => "frontend/backend split",
            Architecture::ClientServer => "client/server split",
            Architecture::Monorepo => "monorepo",
            Architecture::Microservices => "microservices",
            Architecture::FrontendSpa => "frontend SPA",
            Architecture::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Coverage::None => "none",
            Coverage::Low => "low",
            Coverage::Medium => "medium",
            Coverage::High => "high",
        };
        f.write_str(label)
    }
}

/// Coarse three-step quality tier used for error handling and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Poor,
    Adequate,
    Good,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct QualitySignals {
    pub linting: bool,
    pub formatting: bool,
    pub error_handling: Tier,
    pub documentation: Tier,
}

/// Structure/quality signal from the repository analyzer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub project_id: String,
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub architecture: Architecture,
    pub has_readme: bool,
    /// 0-10 integer rubric score.
    pub readme_quality: u8,
    pub has_tests: bool,
    pub test_coverage_estimate: Coverage,
    pub has_demo: bool,
    pub demo_url: Option<String>,
    pub has_deployment_config: bool,
    pub deployment_target: Option<String>,
    pub code_quality_signals: QualitySignals,
    pub notable_findings: Vec<String>,
    pub concerns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DevelopmentPattern {
    #[serde(rename = "organic")]
    Organic,
    #[serde(rename = "suspicious")]
    Suspicious,
    #[serde(rename = "likely_pre-existing")]
    LikelyPreexisting,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl fmt::Display for DevelopmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DevelopmentPattern::Organic => "organic",
            DevelopmentPattern::Suspicious => "suspicious",
            DevelopmentPattern::LikelyPreexisting => "likely_pre-existing",
            DevelopmentPattern::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Valid,
    Questionable,
    Invalid,
    #[default]
    Unknown,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Valid => "VALID",
            Verdict::Questionable => "QUESTIONABLE",
            Verdict::Invalid => "INVALID",
            Verdict::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Short summary of a commit that landed before the sanctioned window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub date: String,
    pub message: String,
}

/// Timeline signal from the git forensics analyzer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForensicsResult {
    pub project_id: String,
    pub total_commits: usize,
    pub commits_in_window: usize,
    pub commits_before_window: usize,
    pub pre_window_commits: Vec<CommitSummary>,
    pub development_pattern: DevelopmentPattern,
    pub verdict: Verdict,
    /// Confidence in the verdict, in [0, 1].
    pub confidence: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentVerification {
    Onchain,
    Offchain,
    Hybrid,
    #[default]
    Missing,
    Basic,
}

impl fmt::Display for PaymentVerification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentVerification::Onchain => "onchain",
            PaymentVerification::Offchain => "offchain",
            PaymentVerification::Hybrid => "hybrid",
            PaymentVerification::Missing => "missing",
            PaymentVerification::Basic => "basic",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Necessity {
    Essential,
    Useful,
    Forced,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viability {
    Viable,
    Questionable,
    NotViable,
    #[default]
    Unknown,
}

/// Payment-protocol signal from the x402 detector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolResult {
    pub project_id: String,
    pub uses_x402: bool,
    /// 0-10 integer raw integration score.
    pub integration_score: u8,
    pub has_402_handling: bool,
    pub has_wallet_integration: bool,
    pub payment_verification: PaymentVerification,
    pub use_case: String,
    pub payment_necessity: Necessity,
    pub economic_viability: Viability,
    /// 0-10 integer novelty estimate.
    pub novelty_score: u8,
    pub creative_elements: Vec<String>,
    pub concerns: Vec<String>,
}
