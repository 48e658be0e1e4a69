use crate::types::project::Project;
use crate::types::signals::{AnalysisResult, ForensicsResult, ProtocolResult};
use serde::{Deserialize, Serialize};

pub type Score = f64;

/// The five category scores, each clamped to [0, 10].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProjectScores {
    pub demo_functionality: Score,
    pub x402_integration: Score,
    pub code_quality: Score,
    pub completeness: Score,
    pub innovation: Score,
}

impl ProjectScores {
    /// Clamp every category into [0, 10]. The scorers already guarantee
    /// this; the aggregation layer re-applies it so one defective scorer
    /// cannot push the weighted total out of range.
    pub fn clamped(self) -> Self {
        Self {
            demo_functionality: self.demo_functionality.clamp(0.0, 10.0),
            x402_integration: self.x402_integration.clamp(0.0, 10.0),
            code_quality: self.code_quality.clamp(0.0, 10.0),
            completeness: self.completeness.clamp(0.0, 10.0),
            innovation: self.innovation.clamp(0.0, 10.0),
        }
    }
}

/// Special-condition markers surfaced alongside scores. All four fields are
/// always serialized so report consumers see a stable shape.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Flags {
    pub timeline_issues: bool,
    pub potential_plagiarism: bool,
    pub exceptional_quality: bool,
    pub missing_x402: bool,
}

/// A fully scored project. Rank, tied_with and normalized_score are filled
/// in by the ranker once the whole cohort is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProject {
    pub project: Project,
    pub scores: ProjectScores,
    pub weighted_total: Score,
    pub normalized_score: Score,
    pub rank: usize,
    pub tied_with: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub feedback: Vec<String>,
    pub flags: Flags,
    pub analysis: Option<AnalysisResult>,
    pub forensics: Option<ForensicsResult>,
    pub x402: Option<ProtocolResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedProject {
    pub name: String,
    pub url: String,
    pub reason: String,
}

/// The whole-cohort container for one evaluation invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRun {
    pub run_id: String,
    pub timestamp: String,
    pub total_projects: usize,
    pub evaluated: usize,
    pub skipped: usize,
    pub average_score: Score,
    pub rankings: Vec<ScoredProject>,
    pub skipped_projects: Vec<SkippedProject>,
}
