/*!

BWT (Burrows-Wheeler Transform) forward and backward transformation. Requires `bwt` feature, enabled by default

This module contains the circular BWT of a block, its counting-sort inversion, and
a framed stream format for sequences of blocks. These are exposed both as plain
functions over slices and as standard `Read` and `Write` interfaces wrapping an
underlying stream.

BWT output stream places together symbols with similar leading contexts. This reshaping of the entropy
allows further stages to deal with repeated sequences of symbols for better compression.
The usual next stage is `mtf`, turning those local repetitions into runs of small ranks.

Typical compression schemes are:
BWT + RLE (+ EC)
RLE + BWT + MTF + RLE + EC  : bzip2
BWT + DC + EC               : ybs

Where the stage families are:
BWT: BWT (Burrows-Wheeler Transform), ST (Shindler transform)
RLE: RLE (Run-Length Encoding)
MTF: MTF (Move-To-Front), WFC (Weighted Frequency Coding)
DC: DC (Distance Coding), IF (Inverse Frequencies)
EC (Entropy Coder): Huffman, Arithmetic, RC (Range Coder)


# Example

```rust
use std::io::{BufWriter, BufReader, Read, Write};
use compress::bwt;

// Encode some text
let text = "some text";
let mut e = bwt::Encoder::new(BufWriter::new(Vec::new()), 4 << 20).unwrap();
e.write_all(text.as_bytes()).unwrap();
let (encoded, _) = e.finish();
let inner = encoded.into_inner().unwrap();

// Decode the encoded text
let mut d = bwt::Decoder::new(BufReader::new(&inner[..]), true);
let mut decoded = Vec::new();
d.read_to_end(&mut decoded).unwrap();

assert_eq!(&decoded[..], text.as_bytes());
```

*/

use std::{cmp, fmt, slice};
use std::io::{self, Read, Write};

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use log::debug;
use num::traits::{NumCast, ToPrimitive};

use crate::{Error, ReadExact, Result};

pub mod mtf;
pub mod suffix;

pub use self::suffix::SuffixRanker;

/// A base element for the transformation
pub type Symbol = u8;

/// Number of distinct symbols
pub const ALPHABET_SIZE: usize = 0x100;

/// Largest block the 32-bit anchor can address
pub const MAX_BLOCK_SIZE: usize = i32::MAX as usize;

/// Radix sorting primitive
pub struct Radix    {
    /// number of occurancies (frequency) per symbol
    pub freq    : [usize; ALPHABET_SIZE+1],
}

impl Default for Radix {
    fn default() -> Radix {
        Radix::new()
    }
}

impl Radix  {
    /// create Radix sort instance
    pub fn new() -> Radix   {
        Radix   {
            freq : [0; ALPHABET_SIZE+1],
        }
    }

    /// count elements in the input
    pub fn gather(&mut self, input: &[Symbol])  {
        for &b in input.iter()  {
            self.freq[b as usize] += 1;
        }
    }

    /// build offset table
    pub fn accumulate(&mut self)    {
        let mut n = 0;
        for freq in self.freq.iter_mut() {
            let f = *freq;
            *freq = n;
            n += f;
        }
    }

    /// return next byte position, advance it internally
    pub fn place(&mut self, b: Symbol)-> usize   {
        let pos = self.freq[b as usize];
        debug_assert!(self.freq[b as usize] < self.freq[(b as usize)+1],
            "Unable to place symbol {} at offset {}",
            b, pos);
        self.freq[b as usize] += 1;
        pos
    }
}


/// An iterator over BWT output
pub struct TransformIterator<'a> {
    input      : &'a [Symbol],
    suf_iter   : slice::Iter<'a, usize>,
    origin     : usize,
}

impl<'a> TransformIterator<'a> {
    /// create a new BWT iterator from the ranked rotations of `input`
    pub fn new(input: &'a [Symbol], ranker: &'a SuffixRanker) -> TransformIterator<'a> {
        debug_assert_eq!(input.len(), ranker.len());
        TransformIterator {
            input,
            suf_iter: ranker.as_slice().iter(),
            origin: ranker.anchor(),
        }
    }

    /// return the index of the original string
    pub fn get_origin(&self) -> usize {
        self.origin
    }
}

impl<'a> Iterator for TransformIterator<'a> {
    type Item = Symbol;
    fn next(&mut self) -> Option<Symbol> {
        let n = self.input.len();
        self.suf_iter.next().map(|&p| self.input[(p + n - 1) % n])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.suf_iter.size_hint()
    }
}

impl<'a> ExactSizeIterator for TransformIterator<'a> {}

/// Transform an input block into the output vector, all-inclusive version.
/// Returns the index of the original string in the output matrix.
pub fn encode_simple(input: &[Symbol]) -> Result<(Vec<Symbol>, usize)> {
    let ranker = SuffixRanker::new(input)?;
    let iter = TransformIterator::new(input, &ranker);
    let origin = iter.get_origin();
    let output: Vec<Symbol> = iter.collect();
    debug!("BWT origin={}, output: {:?}", origin, output);
    Ok((output, origin))
}


fn check_inverse(input: &[Symbol], origin: usize) -> Result<()> {
    if input.is_empty() {
        return Err(Error::Format("transformed block is empty".to_string()));
    }
    if origin >= input.len() {
        return Err(Error::range("anchor", origin, input.len()));
    }
    Ok(())
}

/// Compute an inversion jump table, needed for BWT decoding.
/// `table[j]` is the position in `input` of the j-th symbol of the stably sorted input.
pub fn compute_inversion_table<SUF: NumCast + fmt::Debug>(input: &[Symbol], table: &mut [SUF]) -> Result<()> {
    if input.len() != table.len() {
        return Err(Error::Argument(format!(
            "table of {} entries for a block of {}", table.len(), input.len()
        )));
    }
    if !input.is_empty() && <SUF as NumCast>::from(input.len() - 1).is_none() {
        return Err(Error::range("inversion table entry", input.len() - 1, input.len()));
    }

    let mut radix = Radix::new();
    radix.gather(input);
    radix.accumulate();

    for (i,&ch) in input.iter().enumerate() {
        let slot = radix.place(ch);
        table[slot] = <SUF as NumCast>::from(i)
            .ok_or_else(|| Error::range("inversion table entry", i, input.len()))?;
    }
    debug!("inverse table: {:?}", table);
    Ok(())
}

/// An iterator over inverse BWT
/// Run time: O(N), memory: N words (table)
pub struct InverseIterator<'a, SUF: 'a> {
    input      : &'a [Symbol],
    table      : &'a [SUF],
    current    : usize,
    remaining  : usize,
}

impl<'a, SUF> InverseIterator<'a, SUF> {
    /// create a new inverse BWT iterator with a given input, origin, and a jump table
    pub fn new(input: &'a [Symbol], origin: usize, table: &'a [SUF]) -> InverseIterator<'a, SUF> {
        debug!("inverse origin={:?}, input: {:?}", origin, input);
        InverseIterator {
            input,
            table,
            current: origin,
            remaining: input.len(),
        }
    }
}

impl<'a, SUF: ToPrimitive> Iterator for InverseIterator<'a, SUF> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // the sorted column at `current` holds the symbol that the table points back to
        self.current = self.table[self.current].to_usize()?;
        debug!("\tjumped to {}", self.current);
        Some(self.input[self.current])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Decode a BWT block, given it's origin, and using 'table' temporarily
pub fn decode<'a, SUF: NumCast + ToPrimitive + fmt::Debug>(input: &'a [Symbol], origin: usize, table: &'a mut [SUF])
                                                           -> Result<InverseIterator<'a, SUF>> {
    check_inverse(input, origin)?;
    compute_inversion_table(input, table)?;
    Ok(InverseIterator::new(input, origin, table))
}

/// A simplified BWT decode function, which allocates a temporary jump table
pub fn decode_simple(input: &[Symbol], origin: usize) -> Result<Vec<Symbol>> {
    let mut table = vec![0usize; input.len()];
    let output = decode(input, origin, &mut table[..])?.collect();
    Ok(output)
}

/// Decode without additional memory, can be greatly optimized.
/// Walks the last-to-first mapping, filling `output` from the back.
/// Run time: O(n^2), Memory: 0n
pub fn decode_minimal(input: &[Symbol], origin: usize, output: &mut [Symbol]) -> Result<()> {
    check_inverse(input, origin)?;
    if input.len() != output.len() {
        return Err(Error::Argument(format!(
            "output of {} symbols for a block of {}", output.len(), input.len()
        )));
    }

    let mut radix = Radix::new();
    radix.gather(input);
    radix.accumulate();

    let n = input.len();
    (0..n).fold(origin, |i,j| {
        let ch = input[i];
        output[n-j-1] = ch;
        let offset = input[..i].iter().filter(|&k| *k==ch).count();
        radix.freq[ch as usize] + offset
    });
    Ok(())
}


/// Write a single block: 32-bit big-endian anchor, then the transformed symbols
pub fn write_block<W: Write>(w: &mut W, origin: usize, output: &[Symbol]) -> Result<()> {
    check_inverse(output, origin)?;
    let anchor = u32::try_from(origin)
        .map_err(|_| Error::range("anchor", origin, u32::MAX as usize))?;
    w.write_u32::<BigEndian>(anchor)?;
    w.write_all(output)?;
    Ok(())
}

/// Parse a single block produced by `write_block`.
/// Returns `None` for an empty input, which stands for an empty block.
pub fn read_block(data: &[u8]) -> Result<Option<(usize, &[Symbol])>> {
    if data.is_empty() {
        return Ok(None);
    }
    if data.len() < 4 {
        return Err(Error::Format(format!("{} bytes cannot hold an anchor", data.len())));
    }
    let origin = BigEndian::read_u32(&data[..4]) as usize;
    let body = &data[4..];
    check_inverse(body, origin)?;
    Ok(Some((origin, body)))
}

/// Forward BWT followed by MTF ranks: the complete front end for one block.
/// Returns the origin and the ranks.
pub fn compress_block(input: &[Symbol]) -> Result<(usize, Vec<mtf::Rank>)> {
    let (output, origin) = encode_simple(input)?;
    let ranks = mtf::MTF::new().encode_all(&output)?;
    Ok((origin, ranks))
}

/// Inverse of `compress_block`
pub fn decompress_block(origin: usize, ranks: &[mtf::Rank]) -> Result<Vec<Symbol>> {
    let output = mtf::MTF::new().decode_all(ranks)?;
    decode_simple(&output, origin)
}


/// Reads a big-endian u32, `None` on a clean end of stream
fn read_u32_or_eof<R: Read>(r: &mut R) -> Result<Option<u32>> {
    let mut buf = Vec::with_capacity(4);
    let n = r.by_ref().take(4).read_to_end(&mut buf)?;
    match n {
        0 => Ok(None),
        4 => Ok(Some(BigEndian::read_u32(&buf))),
        _ => Err(Error::Format(format!("truncated block header: {} bytes", n))),
    }
}

/// This structure is used to decode a stream of BWT blocks. This wraps an
/// internal reader which is read from when this decoder's read method is
/// called.
pub struct Decoder<R> {
    /// The internally wrapped reader. This is exposed so it may be moved out
    /// of. Note that if data is read from the reader while decoding is in
    /// progress the output stream will get corrupted.
    pub r: R,
    start  : usize,

    temp   : Vec<u8>,
    output : Vec<u8>,
    table  : Vec<usize>,

    header         : bool,
    eof            : bool,
    failed         : bool,
    pending        : Option<Error>,
    max_block_size : usize,
    extra_memory   : bool,
}

impl<R: Read> Decoder<R> {
    /// Creates a new decoder which will read data from the given stream. The
    /// inner stream can be re-acquired by moving out of the `r` field of this
    /// structure.
    /// 'extra_mem' switch allows allocating extra N words of memory for better performance
    pub fn new(r: R, extra_mem: bool) -> Decoder<R> {
        Decoder {
            r,
            start: 0,
            temp: Vec::new(),
            output: Vec::new(),
            table: Vec::new(),
            header: false,
            eof: false,
            failed: false,
            pending: None,
            max_block_size: 0,
            extra_memory: extra_mem,
        }
    }

    /// Resets this decoder back to its initial state. Note that the underlying
    /// stream is not seeked on or has any alterations performed on it.
    pub fn reset(&mut self) {
        self.header = false;
        self.eof = false;
        self.failed = false;
        self.pending = None;
        self.start = 0;
        self.output.clear();
    }

    /// drop whatever was buffered, later reads keep failing
    fn fail(&mut self) {
        self.failed = true;
        self.start = 0;
        self.output.clear();
    }

    fn read_header(&mut self) -> Result<()> {
        match read_u32_or_eof(&mut self.r)? {
            Some(size) => {
                self.max_block_size = size as usize;
                debug!("max size: {}", self.max_block_size);
                if self.max_block_size == 0 || self.max_block_size > MAX_BLOCK_SIZE {
                    return Err(Error::Format(format!("invalid block size {}", size)));
                }
            },
            None => self.eof = true,
        }
        Ok(())
    }

    fn decode_block(&mut self) -> Result<bool> {
        let n = match read_u32_or_eof(&mut self.r)? {
            Some(n) => n as usize,
            None => return Ok(false),
        };
        if n == 0 || n > self.max_block_size {
            return Err(Error::Format(format!(
                "block of {} bytes in a stream of {} byte blocks", n, self.max_block_size
            )));
        }

        let origin = read_u32_or_eof(&mut self.r)?
            .ok_or_else(|| Error::Format("missing block anchor".to_string()))? as usize;

        self.temp.clear();
        self.r.push_exactly(n as u64, &mut self.temp)?;
        check_inverse(&self.temp[..], origin)?;

        self.start = 0;
        self.output.clear();
        self.output.reserve(n);

        if self.extra_memory    {
            self.table.clear();
            self.table.resize(n, 0);
            let iter = decode(&self.temp[..], origin, &mut self.table[..])?;
            self.output.extend(iter);
        }else   {
            self.output.resize(n, 0);
            decode_minimal(&self.temp[..], origin, &mut self.output[..])?;
        }

        Ok(true)
    }
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        if let Some(e) = self.pending.take() {
            return Err(e.into());
        }
        if self.failed {
            return Err(Error::Format("stream stopped at a malformed block".to_string()).into());
        }
        if !self.header {
            if let Err(e) = self.read_header() {
                self.fail();
                return Err(e.into());
            }
            self.header = true;
        }
        let mut amt = dst.len();
        let dst_len = amt;

        while amt > 0 && !self.eof {
            if self.output.len() == self.start {
                let keep_going = match self.decode_block() {
                    Ok(keep_going) => keep_going,
                    Err(e) => {
                        self.fail();
                        // hand out what was already decoded, report the error next time
                        if amt < dst_len {
                            self.pending = Some(e);
                            break
                        }
                        return Err(e.into());
                    }
                };
                if !keep_going {
                    self.eof = true;
                    break
                }
            }
            let n = cmp::min(amt, self.output.len() - self.start);
            let at = dst_len - amt;
            dst[at .. at + n].copy_from_slice(&self.output[self.start .. self.start + n]);
            self.start += n;
            amt -= n;
        }

        Ok(dst_len - amt)
    }
}


/// This structure is used to compress a stream of bytes using the BWT.
/// This is a wrapper around an internal writer which bytes will be written to.
pub struct Encoder<W> {
    w: W,
    buf: Vec<u8>,
    wrote_header: bool,
    block_size: usize,
}

impl<W: Write> Encoder<W> {
    /// Creates a new encoder which will have its output written to the given
    /// output stream. The output stream can be re-acquired by calling
    /// `finish()`
    /// 'block_size' is idealy as big as your input, unless you know for sure that
    /// the input consists of multiple parts of different nature. Often set as 4Mb.
    pub fn new(w: W, block_size: usize) -> Result<Encoder<W>> {
        if block_size == 0 || block_size > MAX_BLOCK_SIZE {
            return Err(Error::Argument(format!("unsupported block size {}", block_size)));
        }
        Ok(Encoder {
            w,
            buf: Vec::new(),
            wrote_header: false,
            block_size,
        })
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.wrote_header {
            self.w.write_u32::<BigEndian>(self.block_size as u32)?;
            self.wrote_header = true;
        }
        Ok(())
    }

    fn encode_block(&mut self) -> Result<()> {
        let n = self.buf.len();
        // the whole block is transformed before any of it is written
        let (output, origin) = encode_simple(&self.buf[..])?;

        self.w.write_u32::<BigEndian>(n as u32)?;
        write_block(&mut self.w, origin, &output[..])?;
        self.buf.clear();

        Ok(())
    }

    /// This function is used to flag that this session of compression is done
    /// with. The stream is finished up (final bytes are written), and then the
    /// wrapped writer is returned.
    pub fn finish(mut self) -> (W, io::Result<()>) {
        let result = self.flush();
        (self.w, result)
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_header()?;

        let mut rest = buf;
        while !rest.is_empty() {
            let amt = cmp::min( self.block_size - self.buf.len(), rest.len() );
            self.buf.extend_from_slice(&rest[..amt]);

            if self.buf.len() == self.block_size {
                self.encode_block()?;
            }
            rest = &rest[amt..];
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write_header()?;
        if !self.buf.is_empty() {
            self.encode_block()?;
        }
        self.w.flush()
    }
}


#[cfg(test)]
mod test {
    use std::io::{self, BufReader, BufWriter, Read, Write};
    use byteorder::{BigEndian, WriteBytesExt};
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;
    use super::{Decoder, Encoder};
    use super::{compress_block, decode, decode_minimal, decode_simple, decompress_block,
                encode_simple, read_block, write_block};
    use crate::Error;

    fn roundtrip(bytes: &[u8], extra_mem: bool) {
        let mut e = Encoder::new(BufWriter::new(Vec::new()), 1<<10).unwrap();
        e.write_all(bytes).unwrap();
        let (e, err) = e.finish();
        err.unwrap();
        let encoded = e.into_inner().unwrap();

        let mut d = Decoder::new(BufReader::new(&encoded[..]), extra_mem);
        let mut decoded = Vec::new();
        d.read_to_end(&mut decoded).unwrap();
        assert_eq!(&decoded[..], bytes);
    }

    #[test]
    fn some_roundtrips() {
        roundtrip(b"test", true);
        roundtrip(b"", true);
        roundtrip(include_bytes!("../../data/test.txt"), true);
    }

    #[test]
    fn decode_minimal_roundtrip() {
        roundtrip(b"abracadabra", false);
        roundtrip(b"ABAB", false);
    }

    #[test]
    fn degenerate_block() {
        let (output, origin) = encode_simple(b"AAAA").unwrap();
        assert_eq!(origin, 0);
        assert_eq!(&output[..], b"AAAA");
        assert_eq!(&decode_simple(&output, origin).unwrap()[..], b"AAAA");
    }

    #[test]
    fn periodic_block() {
        let (output, origin) = encode_simple(b"ABAB").unwrap();
        assert_eq!(origin, 0);
        assert_eq!(&output[..], b"BBAA");
        assert_eq!(&decode_simple(b"BBAA", 0).unwrap()[..], b"ABAB");
    }

    #[test]
    fn two_symbol_block() {
        let (output, origin) = encode_simple(b"AB").unwrap();
        assert_eq!((&output[..], origin), (&b"BA"[..], 0));
        assert_eq!(&decode_simple(b"BA", 0).unwrap()[..], b"AB");
    }

    #[test]
    fn banana() {
        let (output, origin) = encode_simple(b"banana").unwrap();
        assert_eq!(&output[..], b"nnbaaa");
        assert_eq!(origin, 3);
        let mut minimal = vec![0; 6];
        decode_minimal(&output, origin, &mut minimal).unwrap();
        assert_eq!(&minimal[..], b"banana");
    }

    #[test]
    fn narrow_table() {
        let input = include_bytes!("../../data/test.txt");
        let (output, origin) = encode_simple(input).unwrap();
        let mut table = vec![0u16; output.len()];
        let decoded: Vec<u8> = decode(&output, origin, &mut table[..]).unwrap().collect();
        assert_eq!(&decoded[..], &input[..]);

        let mut tiny = vec![0u8; output.len()];
        assert!(matches!(decode(&output, origin, &mut tiny[..]), Err(Error::Range { .. })));
    }

    #[test]
    fn invalid_inverse_input() {
        assert!(matches!(decode_simple(b"", 0), Err(Error::Format(_))));
        assert!(matches!(decode_simple(b"BA", 2), Err(Error::Range { index: 2, bound: 2, .. })));
        assert!(matches!(encode_simple(b""), Err(Error::Argument(_))));
    }

    #[test]
    fn single_block_format() {
        let mut out = Vec::new();
        write_block(&mut out, 3, b"nnbaaa").unwrap();
        assert_eq!(&out[..4], &[0, 0, 0, 3]);
        assert_eq!(read_block(&out).unwrap(), Some((3, &b"nnbaaa"[..])));

        assert_eq!(read_block(b"").unwrap(), None);
        assert!(matches!(read_block(&[0, 0]), Err(Error::Format(_))));
        assert!(matches!(read_block(&[0, 0, 0, 0]), Err(Error::Format(_))));
        assert!(matches!(read_block(&[0, 0, 0, 9, b'a']), Err(Error::Range { .. })));
    }

    #[test]
    fn random_blocks() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let len = rng.gen_range(1..2000);
            let block: Vec<u8> = (0..len).map(|_| rng.gen_range(0..8u8)).collect();
            let (origin, ranks) = compress_block(&block).unwrap();
            assert_eq!(decompress_block(origin, &ranks).unwrap(), block);
        }
    }

    #[test]
    fn multiple_blocks() {
        let text = include_bytes!("../../data/test.txt");
        let mut e = Encoder::new(Vec::new(), 100).unwrap();
        e.write_all(text).unwrap();
        let (encoded, err) = e.finish();
        err.unwrap();

        let mut d = Decoder::new(&encoded[..], true);
        let mut decoded = Vec::new();
        d.read_to_end(&mut decoded).unwrap();
        assert_eq!(&decoded[..], &text[..]);
    }

    fn frame(block_size: u32, blocks: &[(u32, u32, &[u8])]) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_u32::<BigEndian>(block_size).unwrap();
        for &(n, origin, body) in blocks {
            out.write_u32::<BigEndian>(n).unwrap();
            out.write_u32::<BigEndian>(origin).unwrap();
            out.extend_from_slice(body);
        }
        out
    }

    fn stream_error(encoded: &[u8], extra_mem: bool) -> Error {
        let mut decoded = Vec::new();
        let err = Decoder::new(encoded, extra_mem).read_to_end(&mut decoded).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        match err.into_inner().map(|e| e.downcast::<Error>()) {
            Some(Ok(e)) => *e,
            other => panic!("not a block error: {:?}", other),
        }
    }

    #[test]
    fn truncated_stream() {
        let mut e = Encoder::new(Vec::new(), 64).unwrap();
        e.write_all(b"hello block sorting world").unwrap();
        let (encoded, err) = e.finish();
        err.unwrap();

        let cut = &encoded[..encoded.len() - 3];
        assert!(matches!(stream_error(cut, true), Error::Format(_)));
        assert!(matches!(stream_error(&encoded[..6], false), Error::Format(_)));

        // block longer than the announced block size
        let mut forged = encoded.clone();
        forged[..4].copy_from_slice(&[0, 0, 0, 4]);
        assert!(matches!(stream_error(&forged, true), Error::Format(_)));
    }

    #[test]
    fn malformed_frames() {
        for extra_mem in [true, false] {
            let bad_anchor = frame(8, &[(6, 7, b"abcdef")]);
            assert!(matches!(stream_error(&bad_anchor, extra_mem),
                             Error::Range { index: 7, bound: 6, .. }));
            assert!(matches!(stream_error(&frame(0, &[]), extra_mem), Error::Format(_)));
            let empty_block = frame(8, &[(0, 0, b"")]);
            assert!(matches!(stream_error(&empty_block, extra_mem), Error::Format(_)));
            let huge_block = frame(8, &[(u32::MAX, 0, b"ab")]);
            assert!(matches!(stream_error(&huge_block, extra_mem), Error::Format(_)));
        }
    }

    #[test]
    fn no_output_after_a_bad_block() {
        for extra_mem in [true, false] {
            let stream = frame(8, &[(2, 0, b"ba"), (6, 7, b"abcdef"), (2, 0, b"ba")]);
            let mut d = Decoder::new(&stream[..], extra_mem);
            let mut buf = [0u8; 16];
            assert_eq!(d.read(&mut buf).unwrap(), 2);
            assert_eq!(&buf[..2], b"ab");

            let err = d.read(&mut buf).unwrap_err();
            let inner = err.get_ref().and_then(|e| e.downcast_ref::<Error>());
            assert!(matches!(inner, Some(Error::Range { index: 7, .. })));

            for _ in 0..2 {
                let err = d.read(&mut buf).unwrap_err();
                assert_eq!(err.kind(), io::ErrorKind::InvalidData);
            }
        }
    }

    #[test]
    fn table_length_mismatch() {
        let mut short = [0usize; 2];
        assert!(matches!(decode(b"nnbaaa", 3, &mut short[..]), Err(Error::Argument(_))));
    }

    #[test]
    fn write_block_checks_anchor() {
        let mut out = Vec::new();
        assert!(matches!(write_block(&mut out, 9, b"ab"), Err(Error::Range { index: 9, .. })));
        assert!(matches!(write_block(&mut out, 0, b""), Err(Error::Format(_))));
        assert!(out.is_empty());
    }
}
