use crate::error::{JudgeError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "judge.toml";

/// Weights for the five scoring categories. Validated once at load time;
/// the scoring engine assumes validity and never re-normalizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub demo_functionality: f64,
    pub x402_integration: f64,
    pub code_quality: f64,
    pub completeness: f64,
    pub innovation: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            demo_functionality: 0.35,
            x402_integration: 0.25,
            code_quality: 0.15,
            completeness: 0.15,
            innovation: 0.10,
        }
    }
}

impl ScoringWeights {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.demo_functionality,
            self.x402_integration,
            self.code_quality,
            self.completeness,
            self.innovation,
        ]
    }

    pub fn validate(&self) -> Result<()> {
        if self.as_array().iter().any(|weight| *weight < 0.0) {
            return Err(JudgeError::ConfigParse(
                "weights must be non-negative".to_string(),
            ));
        }
        let sum: f64 = self.as_array().iter().sum();
        if (sum - 1.0).abs() > 0.001 {
            return Err(JudgeError::ConfigParse(format!(
                "weights must sum to 1.0 (found {:.3})",
                sum
            )));
        }
        Ok(())
    }
}

/// Sanctioned hackathon window, inclusive on both ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 12, 8).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub weights: ScoringWeights,
    pub window: TimeWindow,
}

impl JudgeConfig {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if self.window.start > self.window.end {
            return Err(JudgeError::ConfigParse(format!(
                "window.start ({}) is after window.end ({})",
                self.window.start, self.window.end
            )));
        }
        Ok(())
    }
}

/// Load `judge.toml` from the given directory, falling back to compiled-in
/// defaults when the file is absent. Malformed content is a startup error.
pub fn load_config(root: &Path) -> Result<JudgeConfig> {
    let path = root.join(DEFAULT_CONFIG_FILE);
    if !path.exists() {
        return Ok(JudgeConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let cfg: JudgeConfig = toml::from_str(&content)
        .map_err(|e| JudgeError::ConfigParse(format!("{}: {}", path.display(), e)))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_defaults_when_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config(dir.path()).expect("load should not fail");
        assert!((cfg.weights.demo_functionality - 0.35).abs() < f64::EPSILON);
        assert_eq!(cfg.window.start.to_string(), "2025-12-08");
    }

    #[test]
    fn load_config_reads_custom_weights_and_window() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"
[weights]
demo_functionality = 0.20
x402_integration = 0.20
code_quality = 0.20
completeness = 0.20
innovation = 0.20

[window]
start = "2026-01-01"
end = "2026-02-01"
"#,
        )
        .expect("config should write");

        let cfg = load_config(dir.path()).expect("load should succeed");
        assert!((cfg.weights.innovation - 0.20).abs() < f64::EPSILON);
        assert_eq!(cfg.window.end.to_string(), "2026-02-01");
    }

    #[test]
    fn load_config_rejects_weights_not_summing_to_one() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"
[weights]
demo_functionality = 0.90
x402_integration = 0.25
code_quality = 0.15
completeness = 0.15
innovation = 0.10
"#,
        )
        .expect("config should write");

        let err = load_config(dir.path()).expect_err("load should fail");
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn load_config_rejects_negative_weight() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"
[weights]
demo_functionality = 0.60
x402_integration = 0.25
code_quality = 0.15
completeness = 0.15
innovation = -0.15
"#,
        )
        .expect("config should write");

        let err = load_config(dir.path()).expect_err("load should fail");
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn load_config_rejects_inverted_window() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"
[window]
start = "2026-02-01"
end = "2026-01-01"
"#,
        )
        .expect("config should write");

        let err = load_config(dir.path()).expect_err("load should fail");
        assert!(err.to_string().contains("after"));
    }
}
