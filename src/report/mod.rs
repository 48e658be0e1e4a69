pub mod json;
pub mod md;

use crate::config::JudgeConfig;
use crate::error::JudgeError;
use crate::types::scoring::EvaluationRun;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(
    run: &EvaluationRun,
    config: &JudgeConfig,
    format: OutputFormat,
) -> Result<String, JudgeError> {
    match format {
        OutputFormat::Json => json::to_json(run, config).map_err(JudgeError::Json),
        OutputFormat::Md => Ok(md::to_markdown(run)),
    }
}
