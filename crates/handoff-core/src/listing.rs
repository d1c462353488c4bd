use crate::document::HandoffDocument;
use crate::error::Result;
use chrono::NaiveDateTime;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const UNTITLED: &str = "[Untitled - needs completion]";
pub const UNREADABLE_TITLE: &str = "[Unable to read title]";
pub const UNKNOWN_STATUS: &str = "Unknown";

const MAX_TITLE_CHARS: usize = 50;

static FILENAME_DATE_RE: OnceLock<Regex> = OnceLock::new();

fn filename_date_re() -> &'static Regex {
    FILENAME_DATE_RE
        .get_or_init(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})-(\d{6})").expect("valid regex"))
}

#[derive(Debug, Clone, Serialize)]
pub struct HandoffEntry {
    pub path: PathBuf,
    pub filename: String,
    pub title: String,
    pub status: String,
    pub date: Option<NaiveDateTime>,
    pub size: u64,
}

/// Title line for a listing, degraded to a placeholder when absent.
pub fn display_title(doc: &HandoffDocument) -> String {
    let Some(title) = doc.title() else {
        return UNREADABLE_TITLE.to_string();
    };
    if title.starts_with('[') && title.ends_with(']') {
        return UNTITLED.to_string();
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = title.chars().take(MAX_TITLE_CHARS).collect();
        format!("{truncated}...")
    } else {
        title.to_string()
    }
}

pub fn completion_status(todo_count: usize) -> String {
    match todo_count {
        0 => "Complete".to_string(),
        1..=3 => format!("In Progress ({todo_count} TODOs)"),
        n => format!("Needs Work ({n} TODOs)"),
    }
}

/// Timestamp from a `YYYY-MM-DD-HHMMSS` filename prefix.
pub fn parse_date_from_filename(filename: &str) -> Option<NaiveDateTime> {
    let caps = filename_date_re().captures(filename)?;
    let stamp = format!("{} {}", &caps[1], &caps[2]);
    NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H%M%S").ok()
}

/// All `*.md` handoffs directly inside `dir`, newest first. Undated files
/// sort last. A missing directory yields an empty list.
pub fn list_handoffs(dir: &Path) -> Result<Vec<HandoffEntry>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let filename = entry.file_name().to_string_lossy().into_owned();
        if filename.starts_with('.')
            || !path.is_file()
            || path.extension().map_or(true, |ext| ext != "md")
        {
            continue;
        }
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

        let (title, status) = match HandoffDocument::load(&path) {
            Ok(doc) => (display_title(&doc), completion_status(doc.todo_count())),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable handoff");
                (UNREADABLE_TITLE.to_string(), UNKNOWN_STATUS.to_string())
            }
        };

        entries.push(HandoffEntry {
            date: parse_date_from_filename(&filename),
            path,
            filename,
            title,
            status,
            size,
        });
    }

    // Filename order first so equal dates come out deterministically.
    entries.sort_by(|a, b| a.filename.cmp(&b.filename));
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
