//! XPRESS Huffman (LZ77 + Huffman) decompression.
//!
//! Stream layout:
//! - 256 bytes: packed code lengths for 512 symbols
//! - Bit stream of 16-bit little-endian words, read MSB-first, with match
//!   length extension bytes interleaved at byte granularity
//!
//! Symbols 0-255 are literals. Symbols 256-511 are matches: the low nibble
//! of `symbol - 256` is the length code, the high nibble the number of extra
//! offset bits. Symbol 256 with no input left marks the end of the stream.

use crate::bits::BitRegister;
use crate::huffman::{HuffmanTable, LENGTH_TABLE_SIZE, MAX_CODE_LENGTH};
use xpress_core::error::{Result, XpressError};
use xpress_core::traits::{DecodeState, Decompressor, run_tracked};
use xpress_core::{ByteCursor, DecodeOptions, OutputWindow};

/// Minimum match length.
pub const MIN_MATCH: usize = 3;

/// Symbol that ends the stream when no input remains.
pub const END_OF_STREAM: u16 = 256;

/// Length code that signals an extension byte.
const LENGTH_ESCAPE: usize = 15;

/// Outcome of one decoding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Done,
}

/// Working state of one decode call.
struct HuffmanRun<'a> {
    table: HuffmanTable,
    bits: BitRegister<'a>,
    window: OutputWindow,
}

impl<'a> HuffmanRun<'a> {
    fn new(input: &'a [u8], options: &DecodeOptions) -> Result<Self> {
        if input.len() < LENGTH_TABLE_SIZE {
            return Err(XpressError::invalid_format(
                0,
                format!(
                    "input of {} bytes is shorter than the {}-byte code-length table",
                    input.len(),
                    LENGTH_TABLE_SIZE
                ),
            ));
        }

        let table = HuffmanTable::from_packed(&input[..LENGTH_TABLE_SIZE])?;
        let bits = BitRegister::new(ByteCursor::at(input, LENGTH_TABLE_SIZE))?;
        let window =
            OutputWindow::with_capacity(options.capacity_hint(input.len(), 4), options.max_output);

        Ok(Self {
            table,
            bits,
            window,
        })
    }

    fn step(&mut self) -> Result<Step> {
        let symbol = self.table.lookup(self.bits.peek(MAX_CODE_LENGTH));
        self.bits.consume(self.table.code_length(symbol) as u32)?;

        if symbol < 256 {
            self.window.write_literal(symbol as u8)?;
            return Ok(Step::Continue);
        }
        if symbol == END_OF_STREAM && self.bits.remaining() == 0 {
            return Ok(Step::Done);
        }

        let code = (symbol - 256) as usize;
        let mut length = code % 16;
        let offset_bits = (code / 16) as u32;

        if length == LENGTH_ESCAPE {
            length = self.read_long_length()?;
        }
        length += MIN_MATCH;

        let offset = self.bits.read_bits(offset_bits)? as usize + (1 << offset_bits);
        self.window.copy_match(offset, length)?;
        Ok(Step::Continue)
    }

    /// Read the extension of an escaped length code, returning `length - 3`.
    fn read_long_length(&mut self) -> Result<usize> {
        let cursor = self.bits.cursor_mut();
        let mut length = cursor.read_u8()? as usize;
        if length == 255 {
            let position = cursor.position();
            let extended = cursor.read_u16_le()? as usize;
            if extended < LENGTH_ESCAPE {
                return Err(XpressError::invalid_format(
                    position,
                    format!("extended match length {} below {}", extended, LENGTH_ESCAPE),
                ));
            }
            length = extended - LENGTH_ESCAPE;
        }
        Ok(length + LENGTH_ESCAPE)
    }

    fn finish(self) -> Vec<u8> {
        self.window.into_output()
    }
}

/// XPRESS Huffman decompressor.
#[derive(Debug, Default)]
pub struct XpressHuffDecoder {
    /// Decoder options.
    options: DecodeOptions,
    /// Outcome of the last call.
    state: DecodeState,
}

impl XpressHuffDecoder {
    /// Create a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given options.
    pub fn with_options(options: DecodeOptions) -> Self {
        Self {
            options,
            state: DecodeState::Ready,
        }
    }

    /// Decoder options.
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }
}

impl Decompressor for XpressHuffDecoder {
    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let options = self.options;
        run_tracked(&mut self.state, || decode_stream(input, &options))
    }

    fn state(&self) -> &DecodeState {
        &self.state
    }

    fn reset(&mut self) {
        self.state = DecodeState::Ready;
    }
}

fn decode_stream(input: &[u8], options: &DecodeOptions) -> Result<Vec<u8>> {
    log::debug!("xpress huffman: decoding {} input bytes", input.len());

    let mut run = HuffmanRun::new(input, options)?;
    while run.step()? == Step::Continue {}

    let output = run.finish();
    log::debug!("xpress huffman: produced {} bytes", output.len());
    Ok(output)
}

/// Decompress an XPRESS Huffman stream.
pub fn decode_huffman_lz(input: &[u8]) -> Result<Vec<u8>> {
    decode_stream(input, &DecodeOptions::default())
}

/// Decompress an XPRESS Huffman stream with explicit options.
pub fn decode_huffman_lz_with(input: &[u8], options: &DecodeOptions) -> Result<Vec<u8>> {
    decode_stream(input, options)
}
