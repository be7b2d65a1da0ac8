use std::{io, path::PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use cube_engine::{Cube, notation::format_moves};
use env_logger::TimestampPrecision;
use log::{LevelFilter, info};

use crate::{
    config::CliConfig,
    repl::{Repl, apply_sequence},
};

mod config;
mod net;
mod repl;

/// Turn a virtual 3x3x3 Rubik's cube from the terminal
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The configuration file to use, in TOML format.
    #[arg(
        long,
        short = 'c',
        default_value = "cube_config.toml",
        value_name = "CONFIG"
    )]
    config: PathBuf,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive prompt (the default).
    Repl,
    /// Apply a move sequence to a solved cube and print the result.
    Apply {
        /// The move sequence to apply, e.g. "R U' F2".
        sequence: String,
        /// Undo the sequence instead: apply its inverse.
        #[arg(long, short)]
        reverse: bool,
    },
    /// Scramble a solved cube and print the moves used.
    Scramble {
        /// How many turns to make. Defaults to the configured length.
        count: Option<usize>,
        /// Seed for a repeatable scramble.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = CliConfig::load(&cli.config)?;
    info!("Using {config:?}");

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let stdin = io::stdin().lock();
            Repl::new(stdin, io::stdout(), config, fastrand::Rng::new())
                .run()
                .wrap_err("Failed to talk to the terminal")?;
        }
        Commands::Apply { sequence, reverse } => {
            println!("{}", run_apply(&config, &sequence, reverse)?);
        }
        Commands::Scramble { count, seed } => {
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            println!("{}", run_scramble(&config, count, &mut rng));
        }
    }
    Ok(())
}

/// Applies `sequence` (or undoes it with `reverse`) on a solved cube and
/// describes the result.
fn run_apply(config: &CliConfig, sequence: &str, reverse: bool) -> color_eyre::Result<String> {
    let mut cube = Cube::new();
    if let Some(error) = apply_sequence(&mut cube, sequence, reverse).into_iter().next() {
        return Err(error).wrap_err_with(|| format!("Could not apply {sequence:?}"));
    }
    Ok(net::describe(&mut cube, config.colored))
}

fn run_scramble(config: &CliConfig, count: Option<usize>, rng: &mut fastrand::Rng) -> String {
    let mut cube = Cube::new();
    let moves = cube.randomize(count.unwrap_or(config.scramble_length), rng);
    format!("{}\n{}", format_moves(&moves), net::describe(&mut cube, config.colored))
}
