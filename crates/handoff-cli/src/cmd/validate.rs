use crate::output::{print_json, print_report_header, print_rule};
use anyhow::Context;
use handoff_core::validate::{self, ValidationResult, Verdict};
use handoff_core::HandoffError;
use std::path::Path;

/// How many TODOs and missing files the text report lists.
const SHOWN: usize = 5;

pub fn run(file: &Path, json: bool) -> anyhow::Result<i32> {
    let result = match validate::validate_handoff(file) {
        Ok(r) => r,
        Err(HandoffError::DocumentNotFound(path)) => {
            let message = format!("File not found: {}", path.display());
            if json {
                print_json(&serde_json::json!({ "error": message }))?;
            } else {
                println!("Error: {message}");
            }
            return Ok(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to validate {}", file.display()));
        }
    };

    if json {
        print_json(&result)?;
    } else {
        print_report(&result);
    }
    Ok(result.verdict.exit_code())
}

fn print_report(result: &ValidationResult) {
    print_report_header("Handoff Validation Report");
    println!("File: {}", result.filepath.display());
    println!("\nQuality Score: {}/100 - {}", result.score, result.rating);
    print_rule();

    if result.todos_clear() {
        println!("\n[PASS] No TODO placeholders remaining");
    } else {
        println!(
            "\n[FAIL] {} TODO placeholders found:",
            result.remaining_todos.len()
        );
        for todo in result.remaining_todos.iter().take(SHOWN) {
            let head: String = todo.chars().take(50).collect();
            println!("       - {head}...");
        }
    }

    if result.required_complete() {
        println!("\n[PASS] All required sections complete");
    } else {
        println!("\n[FAIL] Missing/incomplete required sections:");
        for issue in &result.missing_required {
            println!("       - {issue}");
        }
    }

    if result.secrets_found.is_empty() {
        println!("\n[PASS] No potential secrets detected");
    } else {
        println!("\n[WARN] Potential secrets detected:");
        for finding in &result.secrets_found {
            println!(
                "       - {}: Found {} potential match(es)",
                finding.description, finding.matches
            );
        }
    }

    if result.files_missing.is_empty() {
        println!(
            "\n[INFO] {} file reference(s) verified",
            result.files_verified.len()
        );
    } else {
        println!(
            "\n[WARN] {} referenced file(s) not found:",
            result.files_missing.len()
        );
        for f in result.files_missing.iter().take(SHOWN) {
            println!("       - {f}");
        }
    }

    if !result.missing_recommended.is_empty() {
        println!("\n[INFO] Consider adding these sections:");
        for section in &result.missing_recommended {
            println!("       - {section}");
        }
    }

    println!();
    print_rule();
    println!("Verdict: {}", result.verdict.message());
    if result.verdict == Verdict::Blocked {
        tracing::warn!(path = %result.filepath.display(), "handoff contains potential secrets");
    }
}
