//! Git timeline forensics: did the work happen inside the sanctioned
//! window? Reads history by shelling out to `git log`, like every other
//! git-backed signal in this crate.

use crate::config::TimeWindow;
use crate::types::signals::{CommitSummary, DevelopmentPattern, ForensicsResult, Verdict};
use chrono::{DateTime, NaiveTime};
use std::path::Path;
use std::process::Command;
use tracing::warn;

const MAX_COMMITS: usize = 500;
const MAX_PRE_WINDOW_SUMMARIES: usize = 10;

struct CommitRecord {
    sha: String,
    timestamp: i64,
    subject: String,
}

/// Analyze the repository's commit timeline. Returns `None` when the path
/// is not a usable git repository; that is a missing signal, not an error.
pub fn analyze(project_id: &str, root: &Path, window: &TimeWindow) -> Option<ForensicsResult> {
    let commits = match read_commits(root) {
        Some(commits) => commits,
        None => {
            warn!(path = %root.display(), "could not read git history");
            return None;
        }
    };

    let mut result = ForensicsResult {
        project_id: project_id.to_string(),
        total_commits: commits.len(),
        ..Default::default()
    };

    let window_start = window
        .start
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp();
    let window_end = window
        .end
        .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
        .and_utc()
        .timestamp();

    for commit in &commits {
        if commit.timestamp < window_start {
            result.commits_before_window += 1;
            if result.pre_window_commits.len() < MAX_PRE_WINDOW_SUMMARIES {
                let date = DateTime::from_timestamp(commit.timestamp, 0)
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_default();
                result.pre_window_commits.push(CommitSummary {
                    sha: commit.sha.clone(),
                    date,
                    message: commit.subject.chars().take(50).collect(),
                });
            }
        } else if commit.timestamp <= window_end {
            result.commits_in_window += 1;
        }
    }

    result.development_pattern = classify_pattern(&result);
    let (verdict, confidence) = make_verdict(&result);
    result.verdict = verdict;
    result.confidence = confidence;
    result.notes = generate_notes(&result);

    Some(result)
}

fn read_commits(root: &Path) -> Option<Vec<CommitRecord>> {
    let output = Command::new("git")
        .arg("-C")
        .arg(root)
        .arg("log")
        .arg(format!("-{MAX_COMMITS}"))
        .arg("--format=%h%x09%ct%x09%s")
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8(output.stdout).ok()?;
    let commits = stdout
        .lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, '\t');
            let sha = parts.next()?.to_string();
            let timestamp = parts.next()?.parse::<i64>().ok()?;
            let subject = parts.next().unwrap_or_default().to_string();
            Some(CommitRecord {
                sha,
                timestamp,
                subject,
            })
        })
        .collect();

    Some(commits)
}

fn classify_pattern(result: &ForensicsResult) -> DevelopmentPattern {
    if result.total_commits == 0 {
        return DevelopmentPattern::Unknown;
    }
    if result.commits_before_window > result.commits_in_window * 2 {
        return DevelopmentPattern::LikelyPreexisting;
    }
    if result.commits_in_window >= 3 {
        return DevelopmentPattern::Organic;
    }
    DevelopmentPattern::Suspicious
}

fn make_verdict(result: &ForensicsResult) -> (Verdict, f64) {
    if result.total_commits == 0 {
        return (Verdict::Unknown, 0.5);
    }

    if result.commits_before_window == 0 {
        return match result.development_pattern {
            DevelopmentPattern::Organic => (Verdict::Valid, 0.9),
            DevelopmentPattern::Suspicious => (Verdict::Questionable, 0.6),
            _ => (Verdict::Valid, 0.8),
        };
    }

    if result.development_pattern == DevelopmentPattern::LikelyPreexisting {
        return (Verdict::Questionable, 0.7);
    }

    let ratio = result.commits_in_window as f64 / result.total_commits.max(1) as f64;
    if ratio >= 0.8 {
        (Verdict::Valid, 0.8)
    } else if ratio >= 0.5 {
        (Verdict::Questionable, 0.6)
    } else {
        (Verdict::Questionable, 0.5)
    }
}

fn generate_notes(result: &ForensicsResult) -> String {
    let mut notes = Vec::new();

    if result.verdict == Verdict::Valid {
        notes.push("Development appears to have occurred during hackathon window.".to_string());
    }
    if result.commits_before_window > 0 {
        notes.push(format!(
            "{} commits before hackathon start.",
            result.commits_before_window
        ));
    }
    if result.development_pattern == DevelopmentPattern::Organic {
        notes.push("Commit pattern appears organic with incremental development.".to_string());
    }
    if result.development_pattern == DevelopmentPattern::LikelyPreexisting {
        notes.push("Majority of history predates the window.".to_string());
    }

    if notes.is_empty() {
        "No significant timeline issues detected.".to_string()
    } else {
        notes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> TimeWindow {
        TimeWindow {
            start: NaiveDate::from_ymd_opt(2025, 12, 8).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date"),
        }
    }

    fn result_with(total: usize, in_window: usize, before: usize) -> ForensicsResult {
        ForensicsResult {
            total_commits: total,
            commits_in_window: in_window,
            commits_before_window: before,
            ..Default::default()
        }
    }

    #[test]
    fn clean_in_window_history_is_valid_and_organic() {
        let mut result = result_with(12, 12, 0);
        result.development_pattern = classify_pattern(&result);
        assert_eq!(result.development_pattern, DevelopmentPattern::Organic);
        let (verdict, confidence) = make_verdict(&result);
        assert_eq!(verdict, Verdict::Valid);
        assert!((confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn pre_window_majority_is_likely_preexisting() {
        let mut result = result_with(30, 5, 25);
        result.development_pattern = classify_pattern(&result);
        assert_eq!(
            result.development_pattern,
            DevelopmentPattern::LikelyPreexisting
        );
        let (verdict, confidence) = make_verdict(&result);
        assert_eq!(verdict, Verdict::Questionable);
        assert!((confidence - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn sparse_in_window_history_is_suspicious() {
        let mut result = result_with(2, 2, 0);
        result.development_pattern = classify_pattern(&result);
        assert_eq!(result.development_pattern, DevelopmentPattern::Suspicious);
        let (verdict, _) = make_verdict(&result);
        assert_eq!(verdict, Verdict::Questionable);
    }

    #[test]
    fn mixed_history_uses_in_window_ratio() {
        let mut result = result_with(10, 8, 2);
        result.development_pattern = classify_pattern(&result);
        let (verdict, confidence) = make_verdict(&result);
        assert_eq!(verdict, Verdict::Valid);
        assert!((confidence - 0.8).abs() < f64::EPSILON);

        let mut result = result_with(10, 5, 5);
        result.development_pattern = classify_pattern(&result);
        let (verdict, _) = make_verdict(&result);
        assert_eq!(verdict, Verdict::Questionable);
    }

    #[test]
    fn empty_history_is_unknown() {
        let result = result_with(0, 0, 0);
        assert_eq!(classify_pattern(&result), DevelopmentPattern::Unknown);
        let (verdict, confidence) = make_verdict(&result);
        assert_eq!(verdict, Verdict::Unknown);
        assert!((confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn analyze_returns_none_outside_a_git_repo() {
        let dir = tempfile::TempDir::new().expect("temp dir should be created");
        assert!(analyze("p1", dir.path(), &window()).is_none());
    }

    #[test]
    fn notes_mention_pre_window_commits() {
        let mut result = result_with(10, 8, 2);
        result.development_pattern = classify_pattern(&result);
        let (verdict, confidence) = make_verdict(&result);
        result.verdict = verdict;
        result.confidence = confidence;
        let notes = generate_notes(&result);
        assert!(notes.contains("2 commits before hackathon start."));
        assert!(notes.contains("organic"));
    }
}
