//! YanShell - CLI

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use yanshell::shell::Shell;
use yanshell::util::{config, logger};
use yanshell::{NAME, VERSION};

/// An extensible interactive shell with pluggable extensions
#[derive(Parser, Debug)]
#[command(name = "yanshell")]
#[command(author = "YanShell Team")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive shell (the default)
    Repl,

    /// Replay a script file through the shell
    Run {
        /// Script file to replay
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        logger::init_debug();
    } else {
        logger::init_cli();
    }

    let config = config::load_user_config().unwrap_or_else(|e| {
        tracing::warn!("failed to load user config: {}", e);
        config::UserConfig::default()
    });

    match args.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let mut shell = Shell::new(config).context("Failed to start the shell")?;
            shell.run().context("Shell session failed")?;
        }
        Commands::Run { file } => {
            ensure!(file.exists(), "no such file: {}", file.display());
            let mut shell = Shell::new(config).context("Failed to start the shell")?;
            shell.run_script(&file);
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
        }
    }

    Ok(())
}
