use crate::types::scoring::EvaluationRun;
use std::fmt::Write as _;

pub fn to_markdown(run: &EvaluationRun) -> String {
    let mut output = String::new();

    output.push_str("# Hackathon Evaluation Results\n\n");
    let _ = writeln!(output, "Run `{}` at {}\n", run.run_id, run.timestamp);
    let _ = writeln!(
        output,
        "Projects: {} total, {} evaluated, {} skipped. Average score: {:.2}\n",
        run.total_projects, run.evaluated, run.skipped, run.average_score
    );

    output.push_str("## Leaderboard\n\n");
    if run.rankings.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| Rank | Project | Demo | X402 | Quality | Complete | Innovation | Total | Normalized |\n");
        output.push_str("|------|---------|------|------|---------|----------|------------|-------|------------|\n");
        for scored in &run.rankings {
            let _ = writeln!(
                output,
                "| {} | {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {:.2} | {:.1} |",
                scored.rank,
                scored.project.name,
                scored.scores.demo_functionality,
                scored.scores.x402_integration,
                scored.scores.code_quality,
                scored.scores.completeness,
                scored.scores.innovation,
                scored.weighted_total,
                scored.normalized_score
            );
        }
        output.push('\n');
    }

    for scored in &run.rankings {
        let _ = writeln!(output, "## #{} {}\n", scored.rank, scored.project.name);
        let _ = writeln!(output, "- Repository: {}", scored.project.github_url);
        if let Some(demo) = &scored.project.demo_url {
            let _ = writeln!(output, "- Demo: {demo}");
        }
        if !scored.tied_with.is_empty() {
            let _ = writeln!(output, "- Tied with: {}", scored.tied_with.join(", "));
        }

        let mut raised = Vec::new();
        if scored.flags.timeline_issues {
            raised.push("timeline_issues");
        }
        if scored.flags.potential_plagiarism {
            raised.push("potential_plagiarism");
        }
        if scored.flags.exceptional_quality {
            raised.push("exceptional_quality");
        }
        if scored.flags.missing_x402 {
            raised.push("missing_x402");
        }
        if !raised.is_empty() {
            let _ = writeln!(output, "- Flags: {}", raised.join(", "));
        }
        output.push('\n');

        push_list(&mut output, "Strengths", &scored.strengths);
        push_list(&mut output, "Weaknesses", &scored.weaknesses);
        push_list(&mut output, "Feedback", &scored.feedback);

        if let Some(forensics) = &scored.forensics {
            let _ = writeln!(
                output,
                "Timeline: {} (confidence {:.2}) — {} of {} commits in window\n",
                forensics.verdict,
                forensics.confidence,
                forensics.commits_in_window,
                forensics.total_commits
            );
        }
    }

    if !run.skipped_projects.is_empty() {
        output.push_str("## Skipped\n\n");
        for skipped in &run.skipped_projects {
            let _ = writeln!(output, "- {} ({}): {}", skipped.name, skipped.url, skipped.reason);
        }
    }

    output
}

fn push_list(output: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(output, "### {title}\n");
    for item in items {
        let _ = writeln!(output, "- {item}");
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::project::Project;
    use crate::types::scoring::{Flags, ProjectScores, ScoredProject};

    #[test]
    fn markdown_report_contains_leaderboard_and_sections() {
        let scored = ScoredProject {
            project: Project::new("abc", "Widget", "https://github.com/acme/widget"),
            scores: ProjectScores {
                demo_functionality: 8.0,
                x402_integration: 6.0,
                code_quality: 7.0,
                completeness: 6.5,
                innovation: 5.0,
            },
            weighted_total: 6.93,
            normalized_score: 100.0,
            rank: 1,
            tied_with: vec!["Gadget".to_string()],
            strengths: vec!["Working demo with good functionality".to_string()],
            weaknesses: vec!["No tests found".to_string()],
            feedback: vec!["Add tests to improve reliability and maintainability".to_string()],
            flags: Flags {
                exceptional_quality: false,
                timeline_issues: true,
                potential_plagiarism: false,
                missing_x402: false,
            },
            analysis: None,
            forensics: None,
            x402: None,
        };
        let run = EvaluationRun {
            run_id: "a1b2c3d4".to_string(),
            timestamp: "2026-01-06T12:00:00Z".to_string(),
            total_projects: 1,
            evaluated: 1,
            skipped: 0,
            average_score: 6.93,
            rankings: vec![scored],
            skipped_projects: Vec::new(),
        };

        let rendered = to_markdown(&run);
        assert!(rendered.contains("# Hackathon Evaluation Results"));
        assert!(rendered.contains("## Leaderboard"));
        assert!(rendered.contains("| 1 | Widget |"));
        assert!(rendered.contains("Tied with: Gadget"));
        assert!(rendered.contains("Flags: timeline_issues"));
        assert!(rendered.contains("### Strengths"));
        assert!(rendered.contains("### Weaknesses"));
        assert!(rendered.contains("### Feedback"));
        assert!(!rendered.contains("## Skipped"));
    }

    #[test]
    fn markdown_report_handles_empty_run() {
        let run = EvaluationRun {
            run_id: "a1b2c3d4".to_string(),
            timestamp: "2026-01-06T12:00:00Z".to_string(),
            total_projects: 0,
            evaluated: 0,
            skipped: 0,
            average_score: 0.0,
            rankings: Vec::new(),
            skipped_projects: Vec::new(),
        };
        let rendered = to_markdown(&run);
        assert!(rendered.contains("- none"));
    }
}
