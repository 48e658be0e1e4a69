use crate::config::{JudgeConfig, ScoringWeights, TimeWindow};
use crate::types::scoring::{EvaluationRun, ScoredProject, SkippedProject};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HackathonMeta {
    pub name: String,
    pub evaluation_date: String,
    pub judge: String,
    pub criteria_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub total_projects: usize,
    pub evaluated: usize,
    pub skipped: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub weights_used: ScoringWeights,
    pub valid_window: TimeWindow,
}

/// On-disk shape of `rankings.json`. Every field of every scored project is
/// serialized losslessly, so a run can be re-rendered without re-analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunExport {
    pub hackathon: HackathonMeta,
    pub summary: RunSummary,
    pub rankings: Vec<ScoredProject>,
    pub skipped_projects: Vec<SkippedProject>,
    pub metadata: ExportMetadata,
}

impl RunExport {
    pub fn new(run: &EvaluationRun, config: &JudgeConfig) -> Self {
        Self {
            hackathon: HackathonMeta {
                name: "X402 Hackathon".to_string(),
                evaluation_date: run.timestamp.clone(),
                judge: "automated".to_string(),
                criteria_version: "1.0".to_string(),
            },
            summary: RunSummary {
                run_id: run.run_id.clone(),
                total_projects: run.total_projects,
                evaluated: run.evaluated,
                skipped: run.skipped,
                average_score: (run.average_score * 100.0).round() / 100.0,
            },
            rankings: run.rankings.clone(),
            skipped_projects: run.skipped_projects.clone(),
            metadata: ExportMetadata {
                weights_used: config.weights,
                valid_window: config.window,
            },
        }
    }

    pub fn into_run(self) -> EvaluationRun {
        EvaluationRun {
            run_id: self.summary.run_id,
            timestamp: self.hackathon.evaluation_date,
            total_projects: self.summary.total_projects,
            evaluated: self.summary.evaluated,
            skipped: self.summary.skipped,
            average_score: self.summary.average_score,
            rankings: self.rankings,
            skipped_projects: self.skipped_projects,
        }
    }
}

pub fn to_json(run: &EvaluationRun, config: &JudgeConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&RunExport::new(run, config))
}

pub fn from_json(content: &str) -> Result<RunExport, serde_json::Error> {
    serde_json::from_str(content)
}
