//! CLI entry point and command dispatch for pr-template-check.

mod cli;
mod cmd;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use pr_template_check::diagnostics::TerminalDiagnostics;

fn main() -> Result<()> {
    // Spawn the real work on a thread with a larger stack size.
    // Windows defaults to a 1MB stack; 8MB matches the Linux default.
    const STACK_SIZE: usize = 8 * 1024 * 1024; // 8 MB

    let thread = std::thread::Builder::new()
        .stack_size(STACK_SIZE)
        .spawn(run)?;

    match thread.join() {
        Ok(result) => result,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let diagnostics = TerminalDiagnostics::from_env(cli.quiet, cli.verbose);

    match cli.command {
        Commands::Check(args) => {
            if !cmd::check::cmd_check(&args, &diagnostics)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Action { config } => {
            if !cmd::action::cmd_action(config.as_deref(), &diagnostics) {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Sections { file, json } => {
            cmd::sections::cmd_sections(&file, json, &diagnostics)
        }
        Commands::Version => cmd::util::cmd_version(cli.verbose),
        Commands::Completion { shell } => cmd::util::cmd_completion(shell),
        Commands::Man { out_dir } => cmd::util::cmd_man(out_dir.as_ref()),
    }
}
