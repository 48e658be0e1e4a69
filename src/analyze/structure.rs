//! Repository structure and quality heuristics over a local checkout.

use crate::types::signals::{
    AnalysisResult, Architecture, Coverage, QualitySignals, Tier,
};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SKIP_DIRS: [&str; 5] = ["node_modules", ".git", "dist", "build", "target"];

const LANGUAGE_MARKERS: [(&str, &[&str]); 8] = [
    ("javascript", &["package.json"]),
    ("typescript", &["tsconfig.json"]),
    ("python", &["requirements.txt", "pyproject.toml", "setup.py"]),
    ("rust", &["Cargo.toml"]),
    ("go", &["go.mod"]),
    ("java", &["pom.xml", "build.gradle"]),
    ("kotlin", &["build.gradle.kts"]),
    ("solidity", &[]),
];

const LANGUAGE_EXTENSIONS: [(&str, &[&str]); 8] = [
    ("javascript", &["js", "jsx"]),
    ("typescript", &["ts", "tsx"]),
    ("python", &["py"]),
    ("rust", &["rs"]),
    ("go", &["go"]),
    ("java", &["java"]),
    ("kotlin", &["kt"]),
    ("solidity", &["sol"]),
];

const PACKAGE_JSON_FRAMEWORKS: [(&str, &[&str]); 7] = [
    ("react", &["\"react\""]),
    ("nextjs", &["\"next\""]),
    ("vue", &["\"vue\""]),
    ("angular", &["@angular"]),
    ("express", &["\"express\""]),
    ("solana", &["@solana", "solana-web3", "anchor"]),
    ("ethereum", &["ethers", "web3", "hardhat", "foundry"]),
];

const DEPLOYMENT_CONFIGS: [(&str, &[&str]); 6] = [
    ("docker", &["Dockerfile", "docker-compose.yml", "docker-compose.yaml"]),
    ("vercel", &["vercel.json"]),
    ("netlify", &["netlify.toml"]),
    ("kubernetes", &["k8s", "kubernetes"]),
    ("railway", &["railway.toml"]),
    ("render", &["render.yaml"]),
];

const LINT_CONFIGS: [&str; 8] = [
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.json",
    "eslint.config.js",
    ".pylintrc",
    "ruff.toml",
    "clippy.toml",
    ".clippy.toml",
];

const FORMAT_CONFIGS: [&str; 6] = [
    ".prettierrc",
    ".prettierrc.js",
    "prettier.config.js",
    "pyproject.toml",
    ".editorconfig",
    "rustfmt.toml",
];

pub fn analyze(project_id: &str, root: &Path) -> AnalysisResult {
    let files = list_files(root);

    let mut result = AnalysisResult {
        project_id: project_id.to_string(),
        ..Default::default()
    };

    result.languages = detect_languages(root, &files);
    result.frameworks = detect_frameworks(root);

    let readme_content = find_readme(root).and_then(|path| std::fs::read_to_string(path).ok());
    if let Some(content) = &readme_content {
        result.has_readme = true;
        result.readme_quality = readme_quality(content);
        if let Some(url) = extract_demo_url(content) {
            result.has_demo = true;
            result.demo_url = Some(url);
        }
    }

    let (has_tests, coverage) = detect_tests(root, &files);
    result.has_tests = has_tests;
    result.test_coverage_estimate = coverage;

    let (has_deployment, target) = detect_deployment(root);
    result.has_deployment_config = has_deployment;
    result.deployment_target = target;

    result.code_quality_signals = quality_signals(root, &files, result.readme_quality);
    result.architecture = detect_architecture(root);
    result.notable_findings = gather_findings(&result);

    result
}

pub fn list_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| !SKIP_DIRS.contains(&name))
                .unwrap_or(true)
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn detect_languages(root: &Path, files: &[PathBuf]) -> Vec<String> {
    let mut languages = Vec::new();

    for (language, markers) in LANGUAGE_MARKERS {
        if markers.iter().any(|marker| root.join(marker).exists()) {
            languages.push(language.to_string());
        }
    }

    for (language, extensions) in LANGUAGE_EXTENSIONS {
        if languages.iter().any(|known| known == language) {
            continue;
        }
        let found = files.iter().any(|path| {
            extension_of(path)
                .map(|ext| extensions.contains(&ext))
                .unwrap_or(false)
        });
        if found {
            languages.push(language.to_string());
        }
    }

    languages.sort();
    languages
}

fn detect_frameworks(root: &Path) -> Vec<String> {
    let mut frameworks = Vec::new();

    if let Ok(content) = std::fs::read_to_string(root.join("package.json")) {
        let lower = content.to_lowercase();
        for (framework, needles) in PACKAGE_JSON_FRAMEWORKS {
            if needles.iter().any(|needle| lower.contains(needle)) {
                frameworks.push(framework.to_string());
            }
        }
    }

    if let Ok(content) = std::fs::read_to_string(root.join("requirements.txt")) {
        let lower = content.to_lowercase();
        for framework in ["fastapi", "django", "flask"] {
            if lower.contains(framework) {
                frameworks.push(framework.to_string());
            }
        }
    }

    if let Ok(content) = std::fs::read_to_string(root.join("Cargo.toml")) {
        let lower = content.to_lowercase();
        for framework in ["actix", "anchor"] {
            if lower.contains(framework) {
                frameworks.push(framework.to_string());
            }
        }
    }

    frameworks.sort();
    frameworks.dedup();
    frameworks
}

fn find_readme(root: &Path) -> Option<PathBuf> {
    ["README.md", "README.MD", "readme.md", "README", "Readme.md"]
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.exists())
}

/// 0-10 rubric: length, structure, setup/usage/description sections,
/// screenshots, links and a license mention each earn a point.
pub fn readme_quality(content: &str) -> u8 {
    let mut score = 0u8;

    if content.len() > 500 {
        score += 2;
    } else if content.len() > 200 {
        score += 1;
    }

    if content
        .lines()
        .any(|line| line.trim_start().starts_with('#'))
    {
        score += 1;
    }
    if content.contains("```") {
        score += 1;
    }

    let checks = [
        r"(?i)(install|setup|getting started|quick start)",
        r"!\[.*\]\(.*\)",
        r"\[.*\]\(http",
        r"(?i)(description|about|overview|what is)",
        r"(?i)(usage|example|how to)",
        r"(?i)license",
    ];
    for pattern in checks {
        if Regex::new(pattern)
            .ok()
            .map(|re| re.is_match(content))
            .unwrap_or(false)
        {
            score += 1;
        }
    }

    score.min(10)
}

pub fn extract_demo_url(content: &str) -> Option<String> {
    let patterns = [
        r"(?i)\[(?:demo|live)\]\((https?://[^)\s]+)\)",
        r"(?i)(?:demo|live|deployed at)[:\s]+<?(https?://[^\s>)]+)",
    ];

    for pattern in patterns {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(_) => continue,
        };
        if let Some(captures) = re.captures(content) {
            if let Some(url) = captures.get(1) {
                return Some(url.as_str().to_string());
            }
        }
    }

    None
}

fn detect_tests(root: &Path, files: &[PathBuf]) -> (bool, Coverage) {
    let mut has_tests = ["test", "tests", "__tests__", "spec"]
        .iter()
        .any(|dir| root.join(dir).is_dir());

    let test_files = files
        .iter()
        .filter(|path| {
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default()
                .to_lowercase();
            let is_source = matches!(
                extension_of(path),
                Some("py" | "js" | "ts" | "jsx" | "tsx" | "rs" | "go")
            );
            is_source && (name.contains("test") || name.contains(".spec."))
        })
        .count();

    let coverage = if test_files > 10 {
        Coverage::High
    } else if test_files > 5 {
        Coverage::Medium
    } else if test_files > 0 {
        Coverage::Low
    } else {
        Coverage::None
    };

    if test_files > 0 {
        has_tests = true;
    }

    (has_tests, coverage)
}

fn detect_deployment(root: &Path) -> (bool, Option<String>) {
    for (target, markers) in DEPLOYMENT_CONFIGS {
        for marker in markers {
            let path = root.join(marker);
            if path.exists() {
                return (true, Some(target.to_string()));
            }
        }
    }
    (false, None)
}

fn quality_signals(root: &Path, files: &[PathBuf], readme_quality: u8) -> QualitySignals {
    let linting = LINT_CONFIGS.iter().any(|name| root.join(name).exists());
    let formatting = FORMAT_CONFIGS.iter().any(|name| root.join(name).exists());

    // Sample a handful of source files for try/catch style error handling.
    let sampled = files
        .iter()
        .filter(|path| matches!(extension_of(path), Some("py" | "js" | "ts")))
        .take(15);
    let mut error_patterns = 0;
    for path in sampled {
        if let Ok(content) = std::fs::read_to_string(path) {
            if content.contains("try") && (content.contains("catch") || content.contains("except"))
            {
                error_patterns += 1;
            }
        }
    }
    let error_handling = if error_patterns >= 3 {
        Tier::Good
    } else if error_patterns >= 1 {
        Tier::Adequate
    } else {
        Tier::Poor
    };

    let documentation = if readme_quality >= 7 {
        Tier::Good
    } else if readme_quality >= 4 {
        Tier::Adequate
    } else {
        Tier::Poor
    };

    QualitySignals {
        linting,
        formatting,
        error_handling,
        documentation,
    }
}

fn detect_architecture(root: &Path) -> Architecture {
    let has_dir = |name: &str| root.join(name).is_dir();

    if has_dir("frontend") && has_dir("backend") {
        return Architecture::FrontendBackend;
    }
    if has_dir("client") && has_dir("server") {
        return Architecture::ClientServer;
    }
    if has_dir("src") {
        if root.join("src/components").is_dir() {
            return Architecture::FrontendSpa;
        }
        return Architecture::Monolith;
    }
    if has_dir("packages") || has_dir("apps") {
        return Architecture::Monorepo;
    }
    if has_dir("services") {
        return Architecture::Microservices;
    }

    Architecture::Monolith
}

fn gather_findings(result: &AnalysisResult) -> Vec<String> {
    let mut findings = Vec::new();

    if result.has_demo {
        if let Some(url) = &result.demo_url {
            findings.push(format!("Live demo available at {url}"));
        }
    }
    if result.has_deployment_config {
        let target = result.deployment_target.as_deref().unwrap_or("unknown");
        findings.push(format!("Has deployment config for {target}"));
    }
    if result.frameworks.iter().any(|f| f == "solana") {
        findings.push("Uses Solana/Anchor for blockchain".to_string());
    }
    if result.frameworks.iter().any(|f| f == "ethereum") {
        findings.push("Uses Ethereum/Web3".to_string());
    }
    if result.has_tests
        && matches!(
            result.test_coverage_estimate,
            Coverage::Medium | Coverage::High
        )
    {
        findings.push(format!(
            "Good test coverage ({})",
            result.test_coverage_estimate
        ));
    }
    if result.code_quality_signals.linting && result.code_quality_signals.formatting {
        findings.push("Well-configured with linting and formatting".to_string());
    }

    findings
}
