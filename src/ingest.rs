//! Submissions CSV ingestion and GitHub URL extraction.

use crate::error::{JudgeError, Result};
use crate::types::project::Project;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::path::Path;

const COL_NAME: &str = "Project name";
const COL_DESCRIPTION: &str = "Project description";
const COL_GITHUB: &str = "Link to Github repo";
const COL_OTHER_LINKS: &str = "Other links";
const COL_DEMO: &str = "Link to 2 minute live product demo";
const COL_TECHNOLOGIES: &str = "Technologies used";
const COL_DATE: &str = "Submission Date";

/// Extract a canonical GitHub repository URL from free text that may
/// contain several links or trailing path components.
pub fn extract_github_url(text: &str) -> Option<String> {
    let pattern = Regex::new(r"(?:https?://)?github\.com/[\w\-]+/[\w\-\.]+").ok()?;
    let matched = pattern.find(text)?.as_str();

    let mut url = if matched.starts_with("http") {
        matched.to_string()
    } else {
        format!("https://{matched}")
    };

    // Deep links into a branch or file still identify the repository.
    if let Some(idx) = url.find("/tree/") {
        url.truncate(idx);
    }
    if let Some(idx) = url.find("/blob/") {
        url.truncate(idx);
    }
    while url.ends_with('/') {
        url.pop();
    }

    Some(url)
}

/// Stable project id: first 12 hex chars of SHA-256 over "name:url".
pub fn project_id(name: &str, url: &str) -> String {
    let digest = Sha256::digest(format!("{name}:{url}").as_bytes());
    digest
        .iter()
        .take(6)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Name of the local checkout directory for a repository URL, e.g.
/// `https://github.com/acme/widget` -> `acme__widget`.
pub fn checkout_dir_name(github_url: &str) -> Option<String> {
    let pattern = Regex::new(r"github\.com/([\w\-]+)/([\w\-\.]+)").ok()?;
    let captures = pattern.captures(github_url)?;
    let owner = captures.get(1)?.as_str();
    let repo = captures.get(2)?.as_str().trim_end_matches(".git");
    Some(format!("{owner}__{repo}"))
}

/// Parse the submissions CSV. Rows without a project name or a usable
/// GitHub URL are dropped silently; they never reach the pipeline.
pub fn parse_submissions(path: &Path) -> Result<Vec<Project>> {
    if !path.exists() {
        return Err(JudgeError::SubmissionsNotFound(path.display().to_string()));
    }

    let raw = std::fs::read_to_string(path)?;
    let content = raw.trim_start_matches('\u{feff}');

    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let column = |name: &str| headers.iter().position(|header| header == name);
    let name_idx = column(COL_NAME);
    let description_idx = column(COL_DESCRIPTION);
    let github_idx = column(COL_GITHUB);
    let other_links_idx = column(COL_OTHER_LINKS);
    let demo_idx = column(COL_DEMO);
    let technologies_idx = column(COL_TECHNOLOGIES);
    let date_idx = column(COL_DATE);

    let field = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|i| record.get(i))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    };
    let optional = |value: String| -> Option<String> {
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    };

    let mut projects = Vec::new();
    for record in reader.records() {
        let record = record?;

        let name = field(&record, name_idx);
        if name.is_empty() {
            continue;
        }

        let github_url = match extract_github_url(&field(&record, github_idx)) {
            Some(url) => url,
            None => continue,
        };

        let id = project_id(&name, &github_url);
        projects.push(Project {
            id,
            name,
            github_url,
            description: field(&record, description_idx),
            demo_url: optional(field(&record, demo_idx)),
            other_links: optional(field(&record, other_links_idx)),
            technologies: optional(field(&record, technologies_idx)),
            submission_date: optional(field(&record, date_idx)),
        });
    }

    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn extract_github_url_canonicalizes_variants() {
        assert_eq!(
            extract_github_url("see https://github.com/acme/widget/tree/main/src"),
            Some("https://github.com/acme/widget".to_string())
        );
        assert_eq!(
            extract_github_url("github.com/acme/widget"),
            Some("https://github.com/acme/widget".to_string())
        );
        assert_eq!(
            extract_github_url("https://github.com/acme/widget/"),
            Some("https://github.com/acme/widget".to_string())
        );
        assert_eq!(extract_github_url("https://example.com/repo"), None);
        assert_eq!(extract_github_url(""), None);
    }

    #[test]
    fn checkout_dir_name_uses_owner_and_repo() {
        assert_eq!(
            checkout_dir_name("https://github.com/acme/widget"),
            Some("acme__widget".to_string())
        );
        assert_eq!(
            checkout_dir_name("https://github.com/acme/widget.git"),
            Some("acme__widget".to_string())
        );
        assert_eq!(checkout_dir_name("https://example.com/x"), None);
    }

    #[test]
    fn project_id_is_stable_and_short() {
        let first = project_id("Widget", "https://github.com/acme/widget");
        let second = project_id("Widget", "https://github.com/acme/widget");
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
        assert_ne!(first, project_id("Other", "https://github.com/acme/widget"));
    }

    #[test]
    fn parse_submissions_skips_rows_without_name_or_url() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("submissions.csv");
        fs::write(
            &path,
            "Project name,Project description,Link to Github repo,Other links,Link to 2 minute live product demo,Technologies used,Submission Date\n\
             Widget,A widget,https://github.com/acme/widget,,https://widget.example,Rust,2025-12-20\n\
             ,No name,https://github.com/acme/anon,,,,\n\
             Nolink,No repo,https://example.com/x,,,,\n",
        )
        .expect("csv should write");

        let projects = parse_submissions(&path).expect("parse should succeed");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Widget");
        assert_eq!(projects[0].github_url, "https://github.com/acme/widget");
        assert_eq!(
            projects[0].demo_url.as_deref(),
            Some("https://widget.example")
        );
        assert_eq!(projects[0].technologies.as_deref(), Some("Rust"));
    }

    #[test]
    fn parse_submissions_tolerates_utf8_bom() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("submissions.csv");
        fs::write(
            &path,
            "\u{feff}Project name,Link to Github repo\nWidget,github.com/acme/widget\n",
        )
        .expect("csv should write");

        let projects = parse_submissions(&path).expect("parse should succeed");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].github_url, "https://github.com/acme/widget");
        assert!(projects[0].demo_url.is_none());
    }

    #[test]
    fn parse_submissions_errors_on_missing_file() {
        let err = parse_submissions(Path::new("/nonexistent/submissions.csv"))
            .expect_err("parse should fail");
        assert!(err.to_string().contains("submissions file not found"));
    }
}
