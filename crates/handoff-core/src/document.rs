//! Handoff documents: Markdown files carrying session state between agents.
//!
//! A document has loose metadata lines (`Created:`, `Branch:`, `Project:`),
//! Markdown tables listing modified files, `#`/`##` sections, and
//! `[TODO: ...]` placeholders left by the handoff template. Everything here is
//! regex based; callers go through [`HandoffDocument::extract_field`] and the
//! section helpers so the matching rules stay in one place.

use crate::error::{HandoffError, Result};
use crate::paths;
use chrono::NaiveDateTime;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Path-like token: letters, digits, `_ - . /`, ending in an extension.
const PATH_TOKEN: &str = r"[a-zA-Z0-9_\-./]+\.[a-zA-Z]+";

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static CREATED_RE: OnceLock<Regex> = OnceLock::new();
static BRANCH_RE: OnceLock<Regex> = OnceLock::new();
static PROJECT_RE: OnceLock<Regex> = OnceLock::new();
static TABLE_PATH_RE: OnceLock<Regex> = OnceLock::new();
static BACKTICK_PATH_RE: OnceLock<Regex> = OnceLock::new();
static LINE_PATH_RE: OnceLock<Regex> = OnceLock::new();
static TODO_RE: OnceLock<Regex> = OnceLock::new();
static NEXT_HEADING_RE: OnceLock<Regex> = OnceLock::new();
static TITLE_RE: OnceLock<Regex> = OnceLock::new();

fn created_re() -> &'static Regex {
    CREATED_RE.get_or_init(|| {
        Regex::new(r"Created:\s*(\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2})").expect("valid regex")
    })
}

fn branch_re() -> &'static Regex {
    BRANCH_RE.get_or_init(|| Regex::new(r"Branch:\s*(\S+)").expect("valid regex"))
}

fn project_re() -> &'static Regex {
    PROJECT_RE.get_or_init(|| Regex::new(r"Project:\s*(.+?)(?:\n|$)").expect("valid regex"))
}

fn table_path_re() -> &'static Regex {
    TABLE_PATH_RE.get_or_init(|| {
        Regex::new(&format!(r"\|\s*({PATH_TOKEN})\s*\|")).expect("valid regex")
    })
}

fn backtick_path_re() -> &'static Regex {
    BACKTICK_PATH_RE.get_or_init(|| {
        Regex::new(&format!(r"`({PATH_TOKEN}(?::\d+)?)`")).expect("valid regex")
    })
}

fn line_path_re() -> &'static Regex {
    LINE_PATH_RE.get_or_init(|| {
        Regex::new(&format!(r"(?:^|\s)({PATH_TOKEN}:\d+)")).expect("valid regex")
    })
}

fn todo_re() -> &'static Regex {
    TODO_RE.get_or_init(|| Regex::new(r"\[TODO:[^\]]*\]").expect("valid regex"))
}

fn next_heading_re() -> &'static Regex {
    NEXT_HEADING_RE.get_or_init(|| Regex::new(r"\n##?\s+").expect("valid regex"))
}

fn title_re() -> &'static Regex {
    TITLE_RE.get_or_init(|| Regex::new(r"(?m)^#\s+(?:Handoff:\s*)?(.+)$").expect("valid regex"))
}

fn heading_re(name: &str) -> Regex {
    // Escaped literal, so construction cannot fail.
    Regex::new(&format!(r"(?i)(?:^|\n)##?\s*{}", regex::escape(name))).expect("valid regex")
}

// ---------------------------------------------------------------------------
// HandoffMetadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HandoffMetadata {
    pub created: Option<NaiveDateTime>,
    pub branch: Option<String>,
    pub project_path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modified_files: Vec<String>,
}

// ---------------------------------------------------------------------------
// HandoffDocument
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HandoffDocument {
    path: PathBuf,
    content: String,
}

impl HandoffDocument {
    /// Read a handoff from disk. A missing file is reported as
    /// [`HandoffError::DocumentNotFound`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HandoffError::DocumentNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_content(path, content))
    }

    pub fn from_content(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Directory file references and the fallback project path resolve against.
    pub fn base_dir(&self) -> PathBuf {
        paths::project_base(&self.path)
    }

    /// First capture group of the first match of `pattern`, if any.
    pub fn extract_field<'a>(&'a self, pattern: &Regex) -> Option<&'a str> {
        pattern
            .captures(&self.content)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    pub fn metadata(&self) -> HandoffMetadata {
        let created = self.extract_field(created_re()).and_then(parse_timestamp);

        let branch = self
            .extract_field(branch_re())
            .filter(|b| !b.starts_with('['))
            .map(str::to_string);

        let project_path = self
            .extract_field(project_re())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let modified_files = table_path_re()
            .captures_iter(&self.content)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|f| f.contains('/') && !f.starts_with('['))
            .map(str::to_string)
            .collect();

        HandoffMetadata {
            created,
            branch,
            project_path,
            modified_files,
        }
    }

    /// Every `[TODO: ...]` placeholder, in document order.
    pub fn todo_markers(&self) -> Vec<&str> {
        todo_re()
            .find_iter(&self.content)
            .map(|m| m.as_str())
            .collect()
    }

    /// Count of `[TODO:` openers, closed or not.
    pub fn todo_count(&self) -> usize {
        self.content.matches("[TODO:").count()
    }

    /// Text of the first level-1 heading with any `Handoff:` prefix removed.
    /// A heading with only whitespace after the prefix yields `Some("")`.
    pub fn title(&self) -> Option<&str> {
        self.extract_field(title_re()).map(str::trim)
    }

    /// Whether a `#` or `##` heading starting with `name` exists
    /// (case-insensitive).
    pub fn has_section(&self, name: &str) -> bool {
        heading_re(name).is_match(&self.content)
    }

    /// Body of the section headed `name`: everything after the heading text up
    /// to the next `#`/`##` heading, trimmed. `None` when the heading is absent.
    pub fn section_body(&self, name: &str) -> Option<&str> {
        let heading = heading_re(name).find(&self.content)?;
        let rest = &self.content[heading.end()..];
        let end = next_heading_re()
            .find(rest)
            .map(|m| m.start())
            .unwrap_or(rest.len());
        Some(rest[..end].trim())
    }

    /// Candidate file paths referenced in tables, backticks, or `path:line`
    /// form. Line suffixes are stripped; URLs and bare filenames without a
    /// directory component are dropped.
    pub fn referenced_paths(&self) -> BTreeSet<String> {
        let patterns = [table_path_re(), backtick_path_re(), line_path_re()];
        let mut found = BTreeSet::new();
        for re in patterns {
            for caps in re.captures_iter(&self.content) {
                let Some(m) = caps.get(1) else { continue };
                let candidate = m.as_str().split(':').next().unwrap_or_default();
                if !candidate.is_empty() && !candidate.starts_with("http") && candidate.contains('/')
                {
                    found.insert(candidate.to_string());
                }
            }
        }
        found
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S").ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
