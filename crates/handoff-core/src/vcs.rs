//! Version-control collaborator.
//!
//! Staleness scoring only needs three questions answered about a directory:
//! is it a repository, which branch is checked out, and which commits landed
//! since a point in time. [`Vcs`] captures those; [`GitCli`] answers them by
//! shelling out to `git` with a bounded wait. Every failure (missing binary,
//! non-zero exit, timeout) collapses to "no data".

use chrono::NaiveDateTime;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub trait Vcs {
    fn is_repository(&self, dir: &Path) -> bool;

    /// Currently checked-out branch, `None` when it cannot be determined.
    fn current_branch(&self, dir: &Path) -> Option<String>;

    /// One-line summaries of commits at or after `since`, newest first.
    fn commits_since(&self, dir: &Path, since: NaiveDateTime) -> Vec<String>;
}

// ---------------------------------------------------------------------------
// GitCli
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GitCli {
    timeout: Option<Duration>,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl GitCli {
    /// `None` waits for git indefinitely.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Run `git <args>` in `dir`; trimmed stdout on success.
    fn run(&self, dir: &Path, args: &[&str]) -> Option<String> {
        if which::which("git").is_err() {
            tracing::debug!("git executable not found on PATH");
            return None;
        }
        match run_with_timeout("git", args, dir, self.timeout) {
            CommandOutcome::Success(stdout) => Some(stdout.trim().to_string()),
            CommandOutcome::Failed(code) => {
                tracing::debug!(?args, dir = %dir.display(), ?code, "git exited unsuccessfully");
                None
            }
            CommandOutcome::TimedOut => {
                tracing::warn!(?args, dir = %dir.display(), "git timed out");
                None
            }
            CommandOutcome::SpawnError(e) => {
                tracing::debug!(?args, dir = %dir.display(), error = %e, "failed to run git");
                None
            }
        }
    }
}

impl Vcs for GitCli {
    fn is_repository(&self, dir: &Path) -> bool {
        self.run(dir, &["rev-parse", "--git-dir"]).is_some()
    }

    fn current_branch(&self, dir: &Path) -> Option<String> {
        self.run(dir, &["branch", "--show-current"])
    }

    fn commits_since(&self, dir: &Path, since: NaiveDateTime) -> Vec<String> {
        let since_arg = format!("--since={}", since.format("%Y-%m-%dT%H:%M:%S"));
        match self.run(dir, &["log", &since_arg, "--oneline", "--no-decorate"]) {
            Some(out) if !out.is_empty() => out.lines().map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Process execution
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum CommandOutcome {
    Success(String),
    Failed(Option<i32>),
    TimedOut,
    SpawnError(std::io::Error),
}

/// Run `program args` in `cwd`, killing it if it outlives `timeout`.
///
/// Output pipes are drained on dedicated threads so a chatty child cannot
/// fill the pipe buffer and stall; a waiter thread plus `recv_timeout`
/// bounds the wait without polling.
fn run_with_timeout(
    program: &str,
    args: &[&str],
    cwd: &Path,
    timeout: Option<Duration>,
) -> CommandOutcome {
    let mut child = match Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(c) => c,
        Err(e) => return CommandOutcome::SpawnError(e),
    };

    let child_pid = child.id();
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || -> String {
        let mut buf = String::new();
        if let Some(mut r) = stdout_handle {
            let _ = r.read_to_string(&mut buf);
        }
        buf
    });
    // stderr is discarded, but must still be drained.
    let stderr_thread = std::thread::spawn(move || {
        if let Some(mut r) = stderr_handle {
            let _ = std::io::copy(&mut r, &mut std::io::sink());
        }
    });

    let wait_result = match timeout {
        None => child.wait(),
        Some(timeout_dur) => {
            let (tx, rx) = std::sync::mpsc::channel();
            std::thread::spawn(move || {
                let _ = tx.send(child.wait());
            });
            match rx.recv_timeout(timeout_dur) {
                Ok(result) => result,
                Err(_) => {
                    kill_process(child_pid);
                    return CommandOutcome::TimedOut;
                }
            }
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let _ = stderr_thread.join();

    match wait_result {
        Ok(status) if status.success() => CommandOutcome::Success(stdout),
        Ok(status) => CommandOutcome::Failed(status.code()),
        Err(e) => CommandOutcome::SpawnError(e),
    }
}

/// Terminate a process by PID using SIGKILL. Best-effort.
fn kill_process(pid: u32) {
    let _ = Command::new("kill")
        .arg("-9")
        .arg(pid.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
