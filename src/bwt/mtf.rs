/*!

MTF (Move To Front) encoder/decoder
Produces a rank for each input character based on when it was seen last time.
Useful for BWT output encoding, which produces a lot of zeroes and low ranks.

# Links

http://en.wikipedia.org/wiki/Move-to-front_transform

# Example

```rust
use std::io::{Read, Write};
use compress::bwt::mtf;

// Encode a stream of bytes
let bytes = b"abracadabra";
let mut e = mtf::Encoder::new(Vec::new());
e.write_all(bytes).unwrap();
let encoded = e.finish();

// Decode a stream of ranks
let mut d = mtf::Decoder::new(&encoded[..]);
let mut decoded = Vec::new();
d.read_to_end(&mut decoded).unwrap();
assert_eq!(&decoded[..], &bytes[..]);
```

*/

use std::io::{self, Read, Write};

use log::debug;

use super::ALPHABET_SIZE;
use crate::{Error, Result};

/// A base element being recoded
pub type Symbol = u8;
/// Position of a symbol in the working set
pub type Rank = u8;


/// MoveToFront encoder/decoder
#[derive(Clone, Debug)]
pub struct MTF {
    /// rank-ordered list of unique Symbols
    symbols: Vec<Symbol>,
    initial: Vec<Symbol>,
}

impl Default for MTF {
    fn default() -> MTF {
        MTF::new()
    }
}

impl MTF {
    /// create a new MTF over all the byte values in alphabetical order
    pub fn new() -> MTF {
        let symbols: Vec<Symbol> = (0..ALPHABET_SIZE).map(|i| i as Symbol).collect();
        MTF { initial: symbols.clone(), symbols }
    }

    /// create a new MTF over a closed alphabet, in the given initial order
    pub fn with_alphabet(alphabet: &[Symbol]) -> Result<MTF> {
        if alphabet.is_empty() {
            return Err(Error::Argument("empty alphabet".to_string()));
        }
        let mut seen = [false; ALPHABET_SIZE];
        for &sym in alphabet.iter() {
            if seen[sym as usize] {
                return Err(Error::Argument(format!("symbol {} repeats in the alphabet", sym)));
            }
            seen[sym as usize] = true;
        }
        Ok(MTF { symbols: alphabet.to_vec(), initial: alphabet.to_vec() })
    }

    /// restore the initial order of symbols
    pub fn reset(&mut self) {
        self.symbols.copy_from_slice(&self.initial[..]);
    }

    /// current rank-ordered list of symbols
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols[..]
    }

    /// encode a symbol into its rank
    pub fn encode(&mut self, sym: Symbol) -> Result<Rank> {
        let rank = match self.symbols.iter().position(|&s| s == sym) {
            Some(rank) => rank,
            None => return Err(Error::range("symbol", sym as usize, self.symbols.len())),
        };
        self.move_to_front(rank);
        Ok(rank as Rank)
    }

    /// decode a rank into its symbol
    pub fn decode(&mut self, rank: Rank) -> Result<Symbol> {
        let rank = rank as usize;
        if rank >= self.symbols.len() {
            return Err(Error::range("rank", rank, self.symbols.len()));
        }
        let sym = self.symbols[rank];
        debug!("\tDecoding rank {} with symbol {}", rank, sym);
        self.move_to_front(rank);
        Ok(sym)
    }

    fn move_to_front(&mut self, rank: usize) {
        self.symbols[..=rank].rotate_right(1);
    }

    /// encode a whole block; on failure the working set is left untouched
    pub fn encode_all(&mut self, input: &[Symbol]) -> Result<Vec<Rank>> {
        let mut work = self.clone();
        let ranks = input.iter()
            .map(|&sym| work.encode(sym))
            .collect::<Result<Vec<Rank>>>()?;
        *self = work;
        Ok(ranks)
    }

    /// decode a whole block; on failure the working set is left untouched
    pub fn decode_all(&mut self, input: &[Rank]) -> Result<Vec<Symbol>> {
        let mut work = self.clone();
        let symbols = input.iter()
            .map(|&rank| work.decode(rank))
            .collect::<Result<Vec<Symbol>>>()?;
        *self = work;
        Ok(symbols)
    }
}


/// A simple MTF stream encoder
pub struct Encoder<W> {
    w: W,
    mtf: MTF,
}

impl<W> Encoder<W> {
    /// start encoding into the given writer
    pub fn new(w: W) -> Encoder<W> {
        Encoder {
            w,
            mtf: MTF::new(),
        }
    }

    /// finish encoding and return the wrapped writer
    pub fn finish(self) -> W {
        self.w
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let ranks = self.mtf.encode_all(buf)?;
        self.w.write_all(&ranks[..])?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }
}


/// A simple MTF stream decoder
pub struct Decoder<R> {
    r: R,
    mtf: MTF,
}

impl<R> Decoder<R> {
    /// start decoding the given reader
    pub fn new(r: R) -> Decoder<R> {
        Decoder {
            r,
            mtf: MTF::new(),
        }
    }

    /// finish decoder and return the wrapped reader
    pub fn finish(self) -> R {
        self.r
    }
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        let bytes_read = self.r.read(dst)?;
        for sym in dst[..bytes_read].iter_mut() {
            *sym = self.mtf.decode(*sym)?;
        }
        Ok(bytes_read)
    }
}
