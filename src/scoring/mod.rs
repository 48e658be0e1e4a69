pub mod categories;
pub mod narrative;
pub mod rank;

use crate::config::ScoringWeights;
use crate::types::project::Project;
use crate::types::scoring::{ProjectScores, Score, ScoredProject};
use crate::types::signals::{AnalysisResult, ForensicsResult, ProtocolResult};

fn round2(value: Score) -> Score {
    (value * 100.0).round() / 100.0
}

/// Converts per-project signal records into scores and whole-cohort
/// rankings. Weights are injected at construction and assumed valid (the
/// config layer enforces the sum-to-1.0 invariant), so the weighted total
/// is a convex combination and stays in [0, 10].
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single project from whatever signal records its analyzers
    /// managed to produce. Total: missing records map to category defaults.
    pub fn score_project(
        &self,
        project: Project,
        analysis: Option<AnalysisResult>,
        forensics: Option<ForensicsResult>,
        x402: Option<ProtocolResult>,
    ) -> ScoredProject {
        let scores = ProjectScores {
            demo_functionality: categories::demo_functionality(&project, analysis.as_ref()),
            x402_integration: categories::x402_integration(x402.as_ref()),
            code_quality: categories::code_quality(analysis.as_ref()),
            completeness: categories::completeness(&project, analysis.as_ref()),
            innovation: categories::innovation(analysis.as_ref(), x402.as_ref()),
        }
        .clamped();

        let weighted_total = round2(
            scores.demo_functionality * self.weights.demo_functionality
                + scores.x402_integration * self.weights.x402_integration
                + scores.code_quality * self.weights.code_quality
                + scores.completeness * self.weights.completeness
                + scores.innovation * self.weights.innovation,
        );

        let strengths = narrative::strengths(&scores, analysis.as_ref(), x402.as_ref());
        let weaknesses = narrative::weaknesses(&scores, analysis.as_ref(), x402.as_ref());
        let feedback = narrative::feedback(&project, analysis.as_ref(), x402.as_ref());
        let flags = narrative::flags(weighted_total, forensics.as_ref(), x402.as_ref());

        ScoredProject {
            project,
            scores,
            weighted_total,
            normalized_score: 0.0,
            rank: 0,
            tied_with: Vec::new(),
            strengths,
            weaknesses,
            feedback,
            flags,
            analysis,
            forensics,
            x402,
        }
    }

    /// Rank the full cohort. Requires a complete snapshot of all weighted
    /// totals; see `rank::rank_projects`.
    pub fn rank_projects(&self, cohort: Vec<ScoredProject>) -> Vec<ScoredProject> {
        rank::rank_projects(cohort)
    }
}
