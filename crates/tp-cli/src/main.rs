//! TerraPolicy CLI
//!
//! Exit codes: 0 when the configuration is compliant (remediated or not),
//! 1 when a policy failed, 2 when the tool itself could not complete.

mod cli;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use error::{CliError, Result};
use tp_fs::CommitMode;
use tp_policy::{ExecutionFlags, load_rule_set};

const EXIT_POLICY_FAILURE: i32 = 1;
const EXIT_SETUP_FAILURE: i32 = 2;

fn main() {
    if let Err(e) = run() {
        let code = if e.is_policy_failure() {
            eprintln!("{}: {}", "non-compliant".yellow().bold(), e);
            EXIT_POLICY_FAILURE
        } else {
            eprintln!("{}: {}", "error".red().bold(), e);
            EXIT_SETUP_FAILURE
        };
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let config_path = cli.config_path();
    if !config_path.is_file() {
        return Err(CliError::user(format!(
            "rule set not found at {}",
            config_path.display()
        )));
    }

    let rule_set = load_rule_set(&config_path)?;
    let flags = ExecutionFlags { strict: cli.strict };
    let commit_mode = if cli.rename {
        CommitMode::RenamedSibling
    } else {
        CommitMode::InPlace
    };

    let engine =
        tp_core::Engine::new(rule_set, flags, cli.dir.clone()).with_commit_mode(commit_mode);
    let summary = engine.run().map_err(CliError::Core)?;

    if summary.remediated.is_empty() {
        println!(
            "{} {} file(s) compliant",
            "ok".green().bold(),
            summary.files_checked
        );
    } else {
        println!(
            "{} remediated {} of {} file(s)",
            "ok".green().bold(),
            summary.remediated.len(),
            summary.files_checked
        );
        for path in &summary.remediated {
            println!("  {}", path.display());
        }
    }

    Ok(())
}
