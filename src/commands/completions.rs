//! `completions` handler

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use tuivid::cli::Cli;

/// Write completions for `shell` to stdout.
pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
