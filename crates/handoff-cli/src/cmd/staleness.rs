use crate::output::{print_json, print_report_header, print_rule};
use anyhow::Context;
use handoff_core::config::Config;
use handoff_core::staleness::{self, StalenessLevel, StalenessResult};
use handoff_core::vcs::GitCli;
use handoff_core::HandoffError;
use std::path::Path;

/// Check one handoff and return the process exit code for its level.
pub fn run(file: &Path, config: &Config, json: bool) -> anyhow::Result<i32> {
    let git = GitCli::with_timeout(config.git_timeout());
    let result = match staleness::check_staleness(file, &git) {
        Ok(r) => r,
        Err(HandoffError::DocumentNotFound(path)) => {
            let message = format!("Handoff file not found: {}", path.display());
            if json {
                print_json(&serde_json::json!({ "error": message }))?;
            } else {
                println!("Error: {message}");
            }
            return Ok(StalenessLevel::Unknown.exit_code());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to check {}", file.display()));
        }
    };

    if json {
        print_json(&result)?;
    } else {
        print_report(&result);
    }
    Ok(result.level.exit_code())
}

fn print_report(result: &StalenessResult) {
    print_report_header("Handoff Staleness Report");
    println!("File: {}", result.handoff_file.display());

    if let Some(created) = result.created {
        println!("Created: {}", created.format("%Y-%m-%d %H:%M:%S"));
        if let Some(days) = result.days_old {
            if days < 1.0 {
                println!("Age: {:.1} hours", days * 24.0);
            } else {
                println!("Age: {days:.1} days");
            }
        }
    }

    if result.is_git_repo {
        if let Some(branch) = &result.handoff_branch {
            let current = result.current_branch.as_deref().unwrap_or("unknown");
            println!("Branch: {branch} (current: {current})");
        }
        println!("Commits since handoff: {}", result.commits_since);
    }
    if !result.modified_files.is_empty() {
        println!("Modified files listed: {}", result.modified_files.len());
    }

    println!("\nStaleness Level: {}", result.level);
    println!("Recommendation: {}", result.recommendation);

    if !result.issues.is_empty() {
        println!("\nIssues:");
        for issue in &result.issues {
            println!("  - {issue}");
        }
    }

    println!();
    print_rule();
    println!("Verdict: {}", result.level.verdict());
}
