use clap::Parser;
use handoff_cli::{cmd, load_config, root};
use handoff_core::steps::StepCommand;
use std::path::PathBuf;

const USAGE: &str = "Usage: ralph <step_id> | next | status";

#[derive(Parser)]
#[command(
    name = "ralph",
    about = "Track progress through the ralph step list",
    version,
    allow_negative_numbers = true
)]
struct Cli {
    /// Step file (default: scripts/ralph/steps.json under the project root)
    #[arg(long, env = "RALPH_STEPS_FILE")]
    file: Option<PathBuf>,

    /// Project root (default: auto-detect from .claude/ or .git/)
    #[arg(long, env = "HANDOFF_ROOT")]
    root: Option<PathBuf>,

    /// Step id to mark done, `next`, or `status`
    command: Option<String>,

    /// Error note recorded with the step being marked done
    error: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    handoff_cli::init_tracing();

    let Some(raw) = cli.command else {
        println!("{USAGE}");
        std::process::exit(1);
    };

    let path = cli.file.unwrap_or_else(|| {
        let root = root::resolve_root(cli.root.as_deref());
        load_config(&root).steps_file(&root)
    });

    let result = raw
        .parse::<StepCommand>()
        .map_err(anyhow::Error::from)
        .and_then(|command| cmd::steps::run(&path, command, cli.error.as_deref()));

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
