//! Burrows-Wheeler transform of stdin as a single block.
//! `-` writes the 32-bit big-endian anchor followed by the transformed block,
//! `+` reads that back and writes the original block.

use std::process::ExitCode;

use clap::Parser;
use compress::cli::{self, Mode};

#[derive(Parser, Debug)]
#[command(name = "burrows-wheeler", about = "Burrows-Wheeler Transformation of a single block", long_about = None)]
struct Args {
    /// `-` to transform, `+` to invert
    #[arg(value_parser = Mode::from_flag, allow_hyphen_values = true)]
    mode: Mode,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    cli::BWT.main(args.mode)
}
