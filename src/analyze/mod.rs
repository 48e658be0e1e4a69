//! Offline analyzers producing the optional per-project signal records.
//! Each returns `None` when it cannot run (no local checkout, unreadable
//! repository); scoring treats that as a defined default, never an error.

pub mod forensics;
pub mod protocol;
pub mod structure;

use crate::config::TimeWindow;
use crate::types::project::Project;
use crate::types::signals::{AnalysisResult, ForensicsResult, ProtocolResult};
use std::path::Path;
use tracing::warn;

/// The three independent signal records for one project.
#[derive(Debug, Clone, Default)]
pub struct SignalSet {
    pub analysis: Option<AnalysisResult>,
    pub forensics: Option<ForensicsResult>,
    pub x402: Option<ProtocolResult>,
}

/// Run all analyzers against a local checkout, if one is available.
pub fn analyze_project(project: &Project, local_path: Option<&Path>, window: &TimeWindow) -> SignalSet {
    let path = match local_path {
        Some(path) if path.exists() => path,
        _ => {
            warn!(project = %project.name, "no local checkout, skipping analyzers");
            return SignalSet::default();
        }
    };

    SignalSet {
        analysis: Some(structure::analyze(&project.id, path)),
        forensics: forensics::analyze(&project.id, path, window),
        x402: Some(protocol::analyze(project, path)),
    }
}
