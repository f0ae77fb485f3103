//! Shared plumbing of the command line tools.
//!
//! Each tool is a single `Pass`: it reads the whole of stdin as one block,
//! runs it through the stage in the direction chosen by the mode argument
//! (`-` encodes, `+` decodes) and writes the result to stdout.
//! Example invocations:
//! echo -n "abracadabra" | burrows-wheeler - | xxd
//! echo -n "banana" | burrows-wheeler - | move-to-front - | move-to-front + | burrows-wheeler +

use std::fmt;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::str::FromStr;

use log::{error, info};

use crate::bwt::{self, mtf};
use crate::{read_all, Error, Result};

/// Direction of a pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// `-`: forward transform / encode
    Encode,
    /// `+`: inverse transform / decode
    Decode,
}

impl Mode {
    /// parser for the positional mode argument
    pub fn from_flag(flag: &str) -> Result<Mode> {
        flag.parse()
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Mode> {
        match s {
            "-" => Ok(Mode::Encode),
            "+" => Ok(Mode::Decode),
            other => Err(Error::Argument(format!("unknown mode `{}`, expected `-` or `+`", other))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Mode::Encode => f.write_str("-"),
            Mode::Decode => f.write_str("+"),
        }
    }
}

/// A reversible stage over a whole block
pub struct Pass {
    /// tool name
    pub name: &'static str,
    /// one-line description
    pub info: &'static str,
    encode: fn(&[u8]) -> Result<Vec<u8>>,
    decode: fn(&[u8]) -> Result<Vec<u8>>,
}

/// Burrows-Wheeler Transformation: anchor + transformed block
pub static BWT: Pass = Pass {
    name: "burrows-wheeler",
    info: "Burrows-Wheeler Transformation",
    encode: bwt_forward,
    decode: bwt_inverse,
};

/// Move-To-Front Transformation over the full byte alphabet
pub static MTF: Pass = Pass {
    name: "move-to-front",
    info: "Move-To-Front Transformation",
    encode: mtf_encode,
    decode: mtf_decode,
};

impl Pass {
    /// run the pass over an in-memory block
    pub fn apply(&self, mode: Mode, input: &[u8]) -> Result<Vec<u8>> {
        match mode {
            Mode::Encode => (self.encode)(input),
            Mode::Decode => (self.decode)(input),
        }
    }

    /// read the whole input, run the pass, then write the whole output
    pub fn run<R: Read, W: Write>(&self, mode: Mode, r: R, mut w: W) -> Result<()> {
        let input = read_all(r)?;
        let output = self.apply(mode, &input[..])?;
        w.write_all(&output[..])?;
        w.flush()?;
        info!("{} {}: {} bytes in, {} bytes out", self.name, mode, input.len(), output.len());
        Ok(())
    }

    /// run over stdin/stdout, reporting failures through the log
    pub fn main(&self, mode: Mode) -> ExitCode {
        let stdin = io::stdin();
        let stdout = io::stdout();
        match self.run(mode, stdin.lock(), stdout.lock()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}: {}", self.name, e);
                ExitCode::FAILURE
            }
        }
    }
}

fn bwt_forward(input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let (output, origin) = bwt::encode_simple(input)?;
    let mut block = Vec::with_capacity(output.len() + 4);
    bwt::write_block(&mut block, origin, &output[..])?;
    Ok(block)
}

fn bwt_inverse(input: &[u8]) -> Result<Vec<u8>> {
    match bwt::read_block(input)? {
        Some((origin, body)) => bwt::decode_simple(body, origin),
        None => Ok(Vec::new()),
    }
}

fn mtf_encode(input: &[u8]) -> Result<Vec<u8>> {
    mtf::MTF::new().encode_all(input)
}

fn mtf_decode(input: &[u8]) -> Result<Vec<u8>> {
    mtf::MTF::new().decode_all(input)
}
