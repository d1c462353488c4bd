use crate::output::print_json;
use handoff_core::config::Config;
use handoff_core::listing::{self, HandoffEntry};
use std::path::Path;

const SEPARATOR_WIDTH: usize = 80;

/// List handoffs under `project`. Always exits 0.
pub fn run(project: &Path, config: &Config, json: bool) -> anyhow::Result<i32> {
    let dir = config.handoffs_dir(project);
    let entries = match listing::list_handoffs(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "could not read handoffs directory");
            Vec::new()
        }
    };

    if json {
        print_json(&entries)?;
        return Ok(0);
    }

    if entries.is_empty() {
        println!("No handoffs found in {}/", dir.display());
        return Ok(0);
    }

    println!("Found {} handoff(s) in {}/\n", entries.len(), dir.display());
    println!("{}", "-".repeat(SEPARATOR_WIDTH));
    for entry in &entries {
        print_entry(entry);
        println!("{}", "-".repeat(SEPARATOR_WIDTH));
    }

    println!("\nTo resume from a handoff, read the document and follow the resume checklist.");
    println!("Most recent: {}", entries[0].path.display());
    Ok(0)
}

fn print_entry(entry: &HandoffEntry) {
    let date = entry
        .date
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "Unknown date".to_string());
    println!("  Date: {date}");
    println!("  Title: {}", entry.title);
    println!("  Status: {}", entry.status);
    println!("  File: {}", entry.filename);
}
