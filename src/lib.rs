#![crate_name = "compress"]
#![deny(missing_docs)]
#![allow(missing_copy_implementations)]

//! Block-sorting compression front end.
//!
//! The crate exposes the Burrows-Wheeler Transform (`bwt`) together with its
//! usual companion, the Move-To-Front recoder (`bwt::mtf`). Output of the pair
//! is a stream of small ranks, ready to be handed to an entropy coder.
//!
//! ```rust
//! use compress::bwt;
//!
//! let (anchor, ranks) = bwt::compress_block(b"banana").unwrap();
//! let decoded = bwt::decompress_block(anchor, &ranks).unwrap();
//! assert_eq!(&decoded[..], b"banana");
//! ```

use std::io::Read;

pub use self::error::{Error, Result};

mod error;

#[cfg(feature="bwt")]
pub mod bwt;

#[cfg(feature="bwt")]
pub mod cli;

/// Adds a convenience method for types with the read trait, very similar
/// to push_at_least in the late Reader trait
pub trait ReadExact: Read + Sized {
    /// Appends exact number of bytes to a buffer.
    /// Fails with `Error::Format` if the stream ends first.
    fn push_exactly(&mut self, bytes: u64, buf: &mut Vec<u8>) -> Result<()> {
        let n = self.by_ref().take(bytes).read_to_end(buf)? as u64;

        if n < bytes {
            return Err(Error::Format(format!(
                "unexpected end of stream: wanted {} bytes, got {}", bytes, n
            )));
        }

        Ok(())
    }
}

impl<T> ReadExact for T where T: Read + Sized {}

/// Reads the remaining stream into memory, mapping failures to `Error::Resource`
pub fn read_all<R: Read>(mut r: R) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;
    Ok(buf)
}

