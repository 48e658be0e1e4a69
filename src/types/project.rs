use serde::{Deserialize, Serialize};

/// A hackathon project submission, immutable once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Stable hash of (name, github_url); see `ingest::project_id`.
    pub id: String,
    pub name: String,
    pub github_url: String,
    #[serde(default)]
    pub description: String,
    pub demo_url: Option<String>,
    pub other_links: Option<String>,
    pub technologies: Option<String>,
    pub submission_date: Option<String>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>, github_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            github_url: github_url.into(),
            description: String::new(),
            demo_url: None,
            other_links: None,
            technologies: None,
            submission_date: None,
        }
    }
}
