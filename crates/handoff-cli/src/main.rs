use clap::{Parser, Subcommand};
use handoff_cli::{cmd, load_config, root};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "handoff",
    about = "Session handoff tools: check staleness, list, and validate handoff documents",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .claude/ or .git/)
    #[arg(long, global = true, env = "HANDOFF_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a handoff against the repository's current state.
    /// Exits 0 when fresh or slightly stale, 1 when stale, 2 otherwise.
    Staleness {
        /// Handoff document to check
        file: PathBuf,
    },

    /// List handoffs in <path>/.claude/handoffs, newest first
    List {
        /// Project directory (default: the project root)
        path: Option<PathBuf>,
    },

    /// Check a handoff for completeness and leaked secrets.
    /// Exits 0 when ready, 1 otherwise.
    Validate {
        /// Handoff document to validate
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    handoff_cli::init_tracing();

    let root = root::resolve_root(cli.root.as_deref());
    let config = load_config(&root);

    let result = match cli.command {
        Commands::Staleness { file } => cmd::staleness::run(&file, &config, cli.json),
        Commands::List { path } => {
            let project = path.unwrap_or_else(|| root.clone());
            cmd::list::run(&project, &config, cli.json)
        }
        Commands::Validate { file } => cmd::validate::run(&file, cli.json),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
