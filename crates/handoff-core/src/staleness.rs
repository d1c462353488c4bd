//! Heuristic staleness of a handoff relative to its repository.
//!
//! Three independent signals add up to a score: how old the handoff is, how
//! many commits landed since it was written, and whether the checked-out
//! branch still matches. The breakpoints are fixed policy.

use crate::document::HandoffDocument;
use crate::error::Result;
use crate::vcs::Vcs;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::path::{Path, PathBuf};

const NOT_A_REPO_ISSUE: &str = "Project is not a git repository";

// ---------------------------------------------------------------------------
// StalenessLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StalenessLevel {
    Fresh,
    SlightlyStale,
    Stale,
    VeryStale,
    Unknown,
}

impl StalenessLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => StalenessLevel::Fresh,
            1..=2 => StalenessLevel::SlightlyStale,
            3..=4 => StalenessLevel::Stale,
            _ => StalenessLevel::VeryStale,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StalenessLevel::Fresh => "FRESH",
            StalenessLevel::SlightlyStale => "SLIGHTLY_STALE",
            StalenessLevel::Stale => "STALE",
            StalenessLevel::VeryStale => "VERY_STALE",
            StalenessLevel::Unknown => "UNKNOWN",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            StalenessLevel::Fresh => "Safe to resume - minimal changes since handoff",
            StalenessLevel::SlightlyStale => {
                "Generally safe to resume - review changes before continuing"
            }
            StalenessLevel::Stale => {
                "Proceed with caution - significant changes may affect context"
            }
            StalenessLevel::VeryStale => {
                "Consider creating new handoff - too many changes since original"
            }
            StalenessLevel::Unknown => "Not a git repo - unable to detect changes",
        }
    }

    /// Process exit code for the staleness command.
    pub fn exit_code(self) -> i32 {
        match self {
            StalenessLevel::Fresh | StalenessLevel::SlightlyStale => 0,
            StalenessLevel::Stale => 1,
            StalenessLevel::VeryStale | StalenessLevel::Unknown => 2,
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            StalenessLevel::Fresh | StalenessLevel::SlightlyStale => "[OK] Safe to resume",
            StalenessLevel::Stale => "[CAUTION] Verify context before resuming",
            StalenessLevel::VeryStale | StalenessLevel::Unknown => {
                "[WARNING] Consider creating fresh handoff"
            }
        }
    }
}

impl std::fmt::Display for StalenessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

pub fn age_points(days_old: f64) -> u32 {
    if days_old > 30.0 {
        3
    } else if days_old > 7.0 {
        2
    } else if days_old > 1.0 {
        1
    } else {
        0
    }
}

pub fn commit_points(commits_since: usize) -> u32 {
    if commits_since > 50 {
        3
    } else if commits_since > 20 {
        2
    } else if commits_since > 5 {
        1
    } else {
        0
    }
}

pub fn branch_points(branch_matches: bool) -> u32 {
    if branch_matches {
        0
    } else {
        2
    }
}

/// Score plus one issue line per non-zero contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub total: u32,
    pub issues: Vec<String>,
}

pub fn score(days_old: f64, commits_since: usize, branch_matches: bool) -> Score {
    let mut total = 0;
    let mut issues = Vec::new();

    let age = age_points(days_old);
    if age > 0 {
        total += age;
        issues.push(format!("Handoff is {} days old", days_old.floor() as i64));
    }

    let commits = commit_points(commits_since);
    if commits > 0 {
        total += commits;
        issues.push(format!("{commits_since} commits since handoff"));
    }

    let branch = branch_points(branch_matches);
    if branch > 0 {
        total += branch;
        issues.push("Current branch differs from handoff branch".to_string());
    }

    Score { total, issues }
}

// ---------------------------------------------------------------------------
// StalenessResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StalenessResult {
    pub handoff_file: PathBuf,
    pub project_path: PathBuf,
    pub is_git_repo: bool,
    pub created: Option<NaiveDateTime>,
    pub handoff_branch: Option<String>,
    pub current_branch: Option<String>,
    pub days_old: Option<f64>,
    pub commits_since: usize,
    pub branch_matches: bool,
    pub score: u32,
    pub level: StalenessLevel,
    pub recommendation: String,
    pub issues: Vec<String>,
    /// Files the handoff listed as modified.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modified_files: Vec<String>,
}

/// Check a handoff against the current time.
pub fn check_staleness(handoff: &Path, vcs: &dyn Vcs) -> Result<StalenessResult> {
    check_staleness_at(handoff, vcs, Local::now().naive_local())
}

/// Check a handoff as of `now` (local wall-clock time, like `Created:`).
pub fn check_staleness_at(
    handoff: &Path,
    vcs: &dyn Vcs,
    now: NaiveDateTime,
) -> Result<StalenessResult> {
    let doc = HandoffDocument::load(handoff)?;
    let meta = doc.metadata();

    let project_path = match meta.project_path.as_deref().map(PathBuf::from) {
        Some(p) if p.exists() => p,
        _ => doc.base_dir(),
    };

    let days_old = meta
        .created
        .map(|created| (now - created).num_seconds() as f64 / 86_400.0);

    let is_git_repo = vcs.is_repository(&project_path);
    tracing::debug!(project = %project_path.display(), is_git_repo, "resolved handoff project");

    let mut result = StalenessResult {
        handoff_file: handoff.to_path_buf(),
        project_path,
        is_git_repo,
        created: meta.created,
        handoff_branch: meta.branch.clone(),
        current_branch: None,
        days_old,
        commits_since: 0,
        branch_matches: true,
        score: 0,
        level: StalenessLevel::Unknown,
        recommendation: StalenessLevel::Unknown.recommendation().to_string(),
        issues: vec![NOT_A_REPO_ISSUE.to_string()],
        modified_files: meta.modified_files,
    };

    if !is_git_repo {
        return Ok(result);
    }

    let current_branch = vcs.current_branch(&result.project_path);
    let branch_matches = match meta.branch.as_deref() {
        Some(declared) => current_branch.as_deref() == Some(declared),
        None => true,
    };
    let commits_since = meta
        .created
        .map(|created| vcs.commits_since(&result.project_path, created).len())
        .unwrap_or(0);

    let scored = score(days_old.unwrap_or(0.0), commits_since, branch_matches);
    let level = StalenessLevel::from_score(scored.total);

    result.current_branch = current_branch;
    result.branch_matches = branch_matches;
    result.commits_since = commits_since;
    result.score = scored.total;
    result.level = level;
    result.recommendation = level.recommendation().to_string();
    result.issues = scored.issues;
    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
