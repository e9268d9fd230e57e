// CLI module
// Command-line configuration, prompts and the role dashboards

mod args;
pub mod dashboard;
pub mod prompt;
pub mod render;

pub use args::{CliArgs, DEFAULT_DATA_DIR};
pub use dashboard::{Desk, DeskConfig};
pub use prompt::{create_prompt, Prompt, ScriptedPrompt, TerminalPrompt};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse command-line arguments using clap
///
/// Invalid arguments or `--help` make clap print its message and exit.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `level` when set. Logs go to stderr so they never mix
/// with the dashboard output on stdout.
pub fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_desk={}", level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
