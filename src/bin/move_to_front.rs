//! Move-to-front recoding of stdin over the full byte alphabet.
//! `-` writes one rank per input byte, `+` turns ranks back into bytes.

use std::process::ExitCode;

use clap::Parser;
use compress::cli::{self, Mode};

#[derive(Parser, Debug)]
#[command(name = "move-to-front", about = "Move-To-Front Transformation", long_about = None)]
struct Args {
    /// `-` to encode, `+` to decode
    #[arg(value_parser = Mode::from_flag, allow_hyphen_values = true)]
    mode: Mode,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    cli::MTF.main(args.mode)
}
