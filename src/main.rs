use anyhow::Result;
use clap::Parser;

mod commands;

use tuivid::cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { file, playback } => commands::play::handle_play(&file, &playback),
        Commands::Demo {
            frames,
            fps,
            width,
            height,
            playback,
        } => commands::play::handle_demo(
            commands::play::DemoSpec {
                frames,
                fps,
                width,
                height,
            },
            &playback,
        ),
        Commands::Info { file, json } => {
            init_verbose(cli.verbose)?;
            commands::info::handle_info(&file, json)
        }
        Commands::Config { command } => {
            init_verbose(cli.verbose)?;
            match command {
                ConfigCommands::Show => commands::config::handle_show(),
                ConfigCommands::Path => commands::config::handle_path(),
                ConfigCommands::Init { force } => commands::config::handle_init(force),
            }
        }
        Commands::Completions { shell } => commands::completions::handle_completions(shell),
    }
}

fn init_verbose(verbose: bool) -> Result<()> {
    if verbose {
        tuivid::logging::init_stderr("debug")?;
    }
    Ok(())
}
