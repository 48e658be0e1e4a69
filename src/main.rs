mod analyze;
mod cli;
mod config;
mod error;
mod ingest;
mod report;
mod scoring;
mod types;

use crate::error::{JudgeError, Result};
use crate::types::scoring::{EvaluationRun, ScoredProject, SkippedProject};
use chrono::Utc;
use clap::Parser;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::info;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let directive = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .init();
}

fn config_root(dir: &Option<PathBuf>) -> PathBuf {
    dir.clone().unwrap_or_else(|| PathBuf::from("."))
}

fn run_id(timestamp: &str) -> String {
    let digest = Sha256::digest(timestamp.as_bytes());
    digest
        .iter()
        .take(4)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn write_reports(
    run: &EvaluationRun,
    cfg: &config::JudgeConfig,
    output: &Path,
    format: &cli::ReportFormat,
) -> Result<()> {
    std::fs::create_dir_all(output)?;

    if matches!(format, cli::ReportFormat::Json | cli::ReportFormat::Both) {
        let rendered = report::render(run, cfg, report::OutputFormat::Json)?;
        let path = output.join("rankings.json");
        std::fs::write(&path, rendered)?;
        println!("wrote {}", path.display());
    }
    if matches!(format, cli::ReportFormat::Md | cli::ReportFormat::Both) {
        let rendered = report::render(run, cfg, report::OutputFormat::Md)?;
        let path = output.join("rankings.md");
        std::fs::write(&path, rendered)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}

fn print_top(run: &EvaluationRun) {
    println!();
    println!("Top projects:");
    println!("{:<6} {:<32} {:>6} {:>6} {:>7}", "Rank", "Project", "Demo", "X402", "Total");
    for scored in run.rankings.iter().take(5) {
        let name: String = scored.project.name.chars().take(30).collect();
        println!(
            "{:<6} {:<32} {:>6.1} {:>6.1} {:>7.2}",
            scored.rank,
            name,
            scored.scores.demo_functionality,
            scored.scores.x402_integration,
            scored.weighted_total
        );
    }
    println!();
    println!(
        "evaluated: {}  skipped: {}  average: {:.2}",
        run.evaluated, run.skipped, run.average_score
    );
}

fn run_evaluate(cmd: &cli::EvaluateCommand) -> Result<i32> {
    let cfg = config::load_config(&config_root(&cmd.config_dir))?;
    let engine = scoring::ScoringEngine::new(cfg.weights);

    let mut projects = ingest::parse_submissions(&cmd.input)?;
    println!("found {} valid projects", projects.len());
    if cmd.limit > 0 && projects.len() > cmd.limit {
        projects.truncate(cmd.limit);
        println!("limited to {} projects", cmd.limit);
    }

    let total_projects = projects.len();
    let mut scored_projects: Vec<ScoredProject> = Vec::new();
    let mut skipped: Vec<SkippedProject> = Vec::new();

    for project in projects {
        let checkout = cmd.repos.as_ref().and_then(|repos| {
            ingest::checkout_dir_name(&project.github_url).map(|name| repos.join(name))
        });

        // A configured checkout directory without this repository means the
        // fetch stage failed for it; record a skip instead of a default
        // score so the gap is visible in reports.
        if let Some(path) = &checkout {
            if !path.exists() {
                skipped.push(SkippedProject {
                    name: project.name.clone(),
                    url: project.github_url.clone(),
                    reason: format!("no local checkout at {}", path.display()),
                });
                continue;
            }
        }

        info!(project = %project.name, "evaluating");
        let signals = analyze::analyze_project(&project, checkout.as_deref(), &cfg.window);
        scored_projects.push(engine.score_project(
            project,
            signals.analysis,
            signals.forensics,
            signals.x402,
        ));
    }

    let rankings = engine.rank_projects(scored_projects);

    let average_score = if rankings.is_empty() {
        0.0
    } else {
        rankings.iter().map(|scored| scored.weighted_total).sum::<f64>() / rankings.len() as f64
    };

    let timestamp = Utc::now().to_rfc3339();
    let run = EvaluationRun {
        run_id: run_id(&timestamp),
        timestamp,
        total_projects,
        evaluated: rankings.len(),
        skipped: skipped.len(),
        average_score,
        rankings,
        skipped_projects: skipped,
    };

    write_reports(&run, &cfg, &cmd.output, &cmd.format)?;
    print_top(&run);

    if run.skipped > 0 {
        Ok(exit_code::WARNINGS)
    } else {
        Ok(exit_code::SUCCESS)
    }
}

fn run_analyze(cmd: &cli::AnalyzeCommand) -> Result<i32> {
    if !cmd.path.exists() {
        return Err(JudgeError::PathNotFound(cmd.path.display().to_string()));
    }

    let cfg = config::load_config(&config_root(&cmd.config_dir))?;
    let engine = scoring::ScoringEngine::new(cfg.weights);

    let name = cmd.name.clone().unwrap_or_else(|| {
        cmd.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "local".to_string())
    });
    let project = types::project::Project::new("local", name, "");

    let signals = analyze::analyze_project(&project, Some(&cmd.path), &cfg.window);

    if let Some(analysis) = &signals.analysis {
        println!("languages: {}", analysis.languages.join(", "));
        println!("frameworks: {}", analysis.frameworks.join(", "));
        println!("architecture: {}", analysis.architecture);
        println!("readme quality: {}/10", analysis.readme_quality);
        println!("has tests: {}", analysis.has_tests);
        println!("has demo: {}", analysis.has_demo);
    }
    if let Some(forensics) = &signals.forensics {
        println!("total commits: {}", forensics.total_commits);
        println!("in window: {}", forensics.commits_in_window);
        println!("before window: {}", forensics.commits_before_window);
        println!("verdict: {}", forensics.verdict);
        println!("pattern: {}", forensics.development_pattern);
    } else {
        println!("forensics: unavailable (not a git repository)");
    }
    if let Some(x402) = &signals.x402 {
        println!("uses x402: {}", x402.uses_x402);
        println!("integration score: {}/10", x402.integration_score);
        println!("use case: {}", x402.use_case);
        if !x402.creative_elements.is_empty() {
            println!("creative elements: {}", x402.creative_elements.join(", "));
        }
    }

    let scored = engine.score_project(project, signals.analysis, signals.forensics, signals.x402);
    println!();
    println!("demo functionality: {:.1}", scored.scores.demo_functionality);
    println!("x402 integration: {:.1}", scored.scores.x402_integration);
    println!("code quality: {:.1}", scored.scores.code_quality);
    println!("completeness: {:.1}", scored.scores.completeness);
    println!("innovation: {:.1}", scored.scores.innovation);
    println!("weighted total: {:.2}", scored.weighted_total);

    Ok(exit_code::SUCCESS)
}

fn run_report(cmd: &cli::ReportCommand) -> Result<i32> {
    if !cmd.input.exists() {
        return Err(JudgeError::PathNotFound(cmd.input.display().to_string()));
    }

    let content = std::fs::read_to_string(&cmd.input)?;
    let export = report::json::from_json(&content)
        .map_err(|e| JudgeError::ReportParse(format!("{}: {}", cmd.input.display(), e)))?;

    let cfg = config::JudgeConfig {
        weights: export.metadata.weights_used,
        window: export.metadata.valid_window,
    };
    let run = export.into_run();

    write_reports(&run, &cfg, &cmd.output, &cmd.format)?;
    Ok(exit_code::SUCCESS)
}

fn run_info(cmd: &cli::InfoCommand) -> Result<i32> {
    let cfg = config::load_config(&config_root(&cmd.config_dir))?;

    println!("scoring weights:");
    println!("  demo functionality: {:.0}%", cfg.weights.demo_functionality * 100.0);
    println!("  x402 integration: {:.0}%", cfg.weights.x402_integration * 100.0);
    println!("  code quality: {:.0}%", cfg.weights.code_quality * 100.0);
    println!("  completeness: {:.0}%", cfg.weights.completeness * 100.0);
    println!("  innovation: {:.0}%", cfg.weights.innovation * 100.0);
    println!("valid window:");
    println!("  start: {}", cfg.window.start);
    println!("  end: {}", cfg.window.end);

    Ok(exit_code::SUCCESS)
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Evaluate(cmd) => run_evaluate(cmd),
        cli::Commands::Analyze(cmd) => run_analyze(cmd),
        cli::Commands::Report(cmd) => run_report(cmd),
        cli::Commands::Info(cmd) => run_info(cmd),
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
