//! X402 payment-protocol detection: pattern scan over source files plus
//! the project description, producing the protocol signal record.

use crate::types::project::Project;
use crate::types::signals::{
    Necessity, PaymentVerification, ProtocolResult, Viability,
};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SKIP_DIRS: [&str; 5] = ["node_modules", ".git", "dist", "build", "target"];
const SOURCE_EXTENSIONS: [&str; 8] = ["js", "ts", "jsx", "tsx", "py", "rs", "go", "sol"];

const X402_PATTERNS: [&str; 7] = [
    r"(?i)x402",
    r"(?i)status\s*[=:]\s*402",
    r"(?i)402\s*payment",
    r"(?i)payment\s*required",
    r"(?i)x-payment",
    r"@coinbase/x402",
    r"(?i)micropayment",
];

const WALLET_PATTERNS: [&str; 7] = [
    r"metamask",
    r"walletconnect",
    r"wallet.?adapter",
    r"connect.*wallet",
    r"@solana/wallet",
    r"ethers",
    r"web3",
];

const VERIFICATION_PATTERNS: [&str; 5] = [
    r"verify.*payment",
    r"check.*transaction",
    r"confirm.*transfer",
    r"on.?chain.*verify",
    r"payment.*verified",
];

const USE_CASE_PATTERNS: [(&str, &[&str]); 5] = [
    ("api monetization", &[r"pay.*per.*call", r"api.*payment", r"pay.*per.*request"]),
    ("content paywall", &[r"paywall", r"pay.*to.*access", r"premium.*content"]),
    ("micropayments", &[r"micropayment", r"micro.*transaction"]),
    ("m2m payments", &[r"machine.*to.*machine", r"\bm2m\b", r"automated.*payment"]),
    ("streaming", &[r"streaming.*payment", r"pay.*per.*byte", r"pay.*per.*stream"]),
];

const INNOVATION_PATTERNS: [(&str, &str); 8] = [
    (r"streaming.*payment", "Streaming payments"),
    (r"dynamic.*pric", "Dynamic pricing"),
    (r"multi.*party", "Multi-party payments"),
    (r"privacy", "Privacy features"),
    (r"cross.*chain", "Cross-chain support"),
    (r"subscription", "Subscription model"),
    (r"oracle", "Oracle integration"),
    (r"vrf|random", "Verifiable randomness"),
];

const NOVELTY_BASE: u8 = 3;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
}

fn source_files(root: &Path) -> Vec<PathBuf> {
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
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
                .unwrap_or(false)
        })
        .collect()
}

pub fn analyze(project: &Project, root: &Path) -> ProtocolResult {
    let mut result = ProtocolResult {
        project_id: project.id.clone(),
        ..Default::default()
    };

    analyze_description(&mut result, &project.description);

    let x402_res = compile(&X402_PATTERNS);
    let wallet_res = compile(&WALLET_PATTERNS);
    let verification_res = compile(&VERIFICATION_PATTERNS);
    let status_402 = Regex::new(r"(?i)status\s*[=:]\s*402|402\s*payment|payment\s*required").ok();

    let mut x402_hits = 0usize;
    let mut wallet_hits = 0usize;
    let mut verification_hits = 0usize;
    let mut onchain_verification = false;

    for path in source_files(root) {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => continue,
        };
        let lower = content.to_lowercase();

        if x402_res.iter().any(|re| re.is_match(&content)) {
            x402_hits += 1;
            if status_402
                .as_ref()
                .map(|re| re.is_match(&content))
                .unwrap_or(false)
            {
                result.has_402_handling = true;
            }
        }
        if wallet_res.iter().any(|re| re.is_match(&lower)) {
            wallet_hits += 1;
        }
        if verification_res.iter().any(|re| re.is_match(&lower)) {
            verification_hits += 1;
            if lower.contains("chain") {
                onchain_verification = true;
            }
        }
    }

    if let Ok(content) = std::fs::read_to_string(root.join("package.json")) {
        if content.contains("@coinbase/x402") || content.to_lowercase().contains("x402") {
            result.uses_x402 = true;
            result
                .creative_elements
                .push("Uses official X402 SDK".to_string());
        }
    }

    result.uses_x402 = result.uses_x402 || x402_hits > 0;
    result.has_wallet_integration = wallet_hits > 0;

    result.payment_verification = if verification_hits > 0 {
        if onchain_verification {
            PaymentVerification::Onchain
        } else {
            PaymentVerification::Offchain
        }
    } else if result.uses_x402 {
        PaymentVerification::Basic
    } else {
        PaymentVerification::Missing
    };

    evaluate_integration(&mut result);

    if result.use_case.is_empty() {
        result.use_case = detect_use_case(root);
    }

    assess_innovation(&mut result, root);

    result
}

fn analyze_description(result: &mut ProtocolResult, description: &str) {
    let lower = description.to_lowercase();

    if lower.contains("x402") || lower.contains("402") {
        result.uses_x402 = true;
    }

    for (use_case, patterns) in USE_CASE_PATTERNS {
        let matched = compile(patterns).iter().any(|re| re.is_match(&lower));
        if matched {
            result.use_case = use_case.to_string();
            break;
        }
    }
}

fn evaluate_integration(result: &mut ProtocolResult) {
    let mut score = 0u8;

    if result.uses_x402 {
        score += 3;
    }
    if result.has_402_handling {
        score += 2;
    }
    if result.has_wallet_integration {
        score += 2;
    }
    score += match result.payment_verification {
        PaymentVerification::Onchain => 3,
        PaymentVerification::Offchain => 2,
        PaymentVerification::Basic => 1,
        PaymentVerification::Hybrid => 3,
        PaymentVerification::Missing => 0,
    };

    result.integration_score = score.min(10);

    result.payment_necessity = match result.use_case.as_str() {
        "api monetization" | "micropayments" | "m2m payments" => Necessity::Essential,
        "content paywall" | "streaming" => Necessity::Useful,
        _ => Necessity::Unknown,
    };

    result.economic_viability = if result.has_wallet_integration
        && result.payment_verification != PaymentVerification::Missing
    {
        Viability::Viable
    } else if result.uses_x402 {
        Viability::Questionable
    } else {
        Viability::NotViable
    };
}

/// Fall back to rough API-vs-content indicator counts when neither the
/// description nor the README named a use case.
fn detect_use_case(root: &Path) -> String {
    let api_indicators = ["api", "endpoint", "route", "handler"];
    let content_indicators = ["article", "content", "media", "paywall"];

    let mut api_count = 0usize;
    let mut content_count = 0usize;

    for path in source_files(root).into_iter().take(20) {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content.to_lowercase(),
            Err(_) => continue,
        };
        for indicator in api_indicators {
            api_count += content.matches(indicator).count();
        }
        for indicator in content_indicators {
            content_count += content.matches(indicator).count();
        }
    }

    if api_count > content_count * 2 {
        "api monetization".to_string()
    } else if content_count > api_count {
        "content paywall".to_string()
    } else {
        "general payments".to_string()
    }
}

fn assess_innovation(result: &mut ProtocolResult, root: &Path) {
    let mut novelty = NOVELTY_BASE;

    let mut haystacks = Vec::new();
    for name in ["README.md", "package.json"] {
        if let Ok(content) = std::fs::read_to_string(root.join(name)) {
            haystacks.push(content.to_lowercase());
        }
    }
    for path in source_files(root).into_iter().take(20) {
        if let Ok(content) = std::fs::read_to_string(&path) {
            haystacks.push(content.to_lowercase());
        }
    }

    for (pattern, label) in INNOVATION_PATTERNS {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(_) => continue,
        };
        if haystacks.iter().any(|content| re.is_match(content))
            && !result.creative_elements.iter().any(|e| e == label)
        {
            result.creative_elements.push(label.to_string());
            novelty += 1;
        }
    }

    result.novelty_score = novelty.min(10);

    if result.novelty_score < 4 {
        result
            .concerns
            .push("Basic implementation without significant innovation".to_string());
    }
    if !result.uses_x402 {
        result
            .concerns
            .push("No clear X402 protocol integration found".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project_with_description(description: &str) -> Project {
        let mut project = Project::new("p1", "Widget", "https://github.com/acme/widget");
        project.description = description.to_string();
        project
    }

    #[test]
    fn empty_repository_yields_no_integration() {
        let dir = TempDir::new().expect("temp dir should be created");
        let result = analyze(&project_with_description(""), dir.path());

        assert!(!result.uses_x402);
        assert_eq!(result.integration_score, 0);
        assert_eq!(result.payment_verification, PaymentVerification::Missing);
        assert_eq!(result.economic_viability, Viability::NotViable);
        assert!(result
            .concerns
            .iter()
            .any(|concern| concern.contains("No clear X402")));
    }

    #[test]
    fn detects_x402_wallet_and_onchain_verification() {
        let dir = TempDir::new().expect("temp dir should be created");
        let root = dir.path();
        fs::create_dir_all(root.join("src")).expect("src should create");
        fs::write(
            root.join("src/server.ts"),
            "if (status === 402) { /* payment required via x402 */ }",
        )
        .expect("server should write");
        fs::write(
            root.join("src/wallet.ts"),
            "import { ethers } from 'ethers'; // connect wallet",
        )
        .expect("wallet should write");
        fs::write(
            root.join("src/verify.ts"),
            "async function verifyPayment() { /* onchain verify via chain rpc */ }",
        )
        .expect("verify should write");

        let result = analyze(&project_with_description(""), root);
        assert!(result.uses_x402);
        assert!(result.has_402_handling);
        assert!(result.has_wallet_integration);
        assert_eq!(result.payment_verification, PaymentVerification::Onchain);
        // 3 + 2 + 2 + 3, capped at 10
        assert_eq!(result.integration_score, 10);
        assert_eq!(result.economic_viability, Viability::Viable);
    }

    #[test]
    fn sdk_dependency_counts_as_usage_and_creative_element() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"@coinbase/x402": "^1.0.0"}}"#,
        )
        .expect("package.json should write");

        let result = analyze(&project_with_description(""), dir.path());
        assert!(result.uses_x402);
        assert!(result
            .creative_elements
            .contains(&"Uses official X402 SDK".to_string()));
        assert_eq!(result.payment_verification, PaymentVerification::Basic);
    }

    #[test]
    fn description_sets_usage_and_use_case() {
        let dir = TempDir::new().expect("temp dir should be created");
        let project =
            project_with_description("An x402 gateway charging pay per call for every API");
        let result = analyze(&project, dir.path());

        assert!(result.uses_x402);
        assert_eq!(result.use_case, "api monetization");
        assert_eq!(result.payment_necessity, Necessity::Essential);
    }

    #[test]
    fn innovation_patterns_raise_novelty_and_add_elements() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join("README.md"),
            "Cross-chain support with dynamic pricing and an oracle feed.",
        )
        .expect("readme should write");

        let result = analyze(&project_with_description(""), dir.path());
        assert!(result
            .creative_elements
            .contains(&"Cross-chain support".to_string()));
        assert!(result
            .creative_elements
            .contains(&"Dynamic pricing".to_string()));
        assert!(result
            .creative_elements
            .contains(&"Oracle integration".to_string()));
        assert_eq!(result.novelty_score, 6);
    }

    #[test]
    fn low_novelty_without_usage_produces_both_concerns() {
        let dir = TempDir::new().expect("temp dir should be created");
        let result = analyze(&project_with_description("plain demo app"), dir.path());
        assert_eq!(result.novelty_score, 3);
        assert_eq!(result.concerns.len(), 2);
    }
}
