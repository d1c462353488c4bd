use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CLAUDE_DIR: &str = ".claude";
pub const HANDOFFS_DIR: &str = ".claude/handoffs";
pub const CONFIG_FILE: &str = ".claude/handoff.yaml";
pub const STEPS_FILE: &str = "scripts/ralph/steps.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// The project directory a handoff document lives in.
///
/// Handoffs are written to `<project>/.claude/handoffs/<name>.md`, so the
/// project is three levels above the document. Shallower absolute paths stop
/// at the filesystem root; shallower relative paths resolve to the current
/// directory.
pub fn project_base(document: &Path) -> PathBuf {
    match document.ancestors().nth(3) {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ if document.is_absolute() => document
            .ancestors()
            .last()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/")),
        _ => PathBuf::from("."),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
