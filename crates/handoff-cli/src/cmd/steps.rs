use crate::output::print_json;
use anyhow::Context;
use handoff_core::steps::{self, StepCommand, StepList, StepRecord, ALL_DONE};
use std::path::Path;

pub fn run(path: &Path, command: StepCommand, error: Option<&str>) -> anyhow::Result<i32> {
    match command {
        StepCommand::MarkDone(id) => mark_done(path, id, error),
        StepCommand::Next => next(path),
        StepCommand::Status => status(path),
    }
}

fn load(path: &Path) -> anyhow::Result<StepList> {
    StepList::load(path).with_context(|| format!("failed to load {}", path.display()))
}

fn mark_done(path: &Path, id: i64, error: Option<&str>) -> anyhow::Result<i32> {
    let marked = steps::mark_done(path, id, error)
        .with_context(|| format!("failed to update {}", path.display()))?;
    if marked {
        println!("Marked step {id} as done");
    } else {
        println!("Warning: step {id} not found");
    }
    Ok(0)
}

fn next(path: &Path) -> anyhow::Result<i32> {
    let list = load(path)?;
    match list.next() {
        Some(step) => print_json(step)?,
        None => println!("{ALL_DONE}"),
    }
    Ok(0)
}

fn status(path: &Path) -> anyhow::Result<i32> {
    let list = load(path)?;
    let summary = list.summary();

    println!(
        "Progress: {}/{} steps complete",
        summary.done, summary.total
    );
    if summary.errors > 0 {
        println!("Errors: {} steps had issues", summary.errors);
    }
    for step in list.steps() {
        println!("{}", status_line(step));
    }
    Ok(0)
}

fn status_line(step: &StepRecord) -> String {
    let check = if step.done { "\u{2705}" } else { "\u{2b1c}" };
    let err = step
        .error()
        .map(|e| format!(" \u{274c} {e}"))
        .unwrap_or_default();
    format!("  {check} Step {}: {}{err}", step.id, step.task)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_shows_glyph_and_error() {
        let mut step = StepRecord::new(3, "Wire CLI");
        assert_eq!(status_line(&step), "  \u{2b1c} Step 3: Wire CLI");
        step.done = true;
        step.error = Some("retried twice".to_string());
        assert_eq!(
            status_line(&step),
            "  \u{2705} Step 3: Wire CLI \u{274c} retried twice"
        );
    }
}
