//! Plain XPRESS (LZ77) decompression.
//!
//! The stream interleaves 32-bit flag words with tokens. Each flag bit,
//! taken MSB-first, classifies the next token:
//! - `0`: one literal byte
//! - `1`: a 16-bit match token, `offset - 1` in the upper 13 bits and a
//!   3-bit length code in the lower 3
//!
//! Length code 7 escapes to a half byte. Two consecutive escaped matches
//! share one byte: the first takes its low nibble, the second its high
//! nibble. A nibble of 15 escapes to a full byte, and a byte of 255 to a
//! 16-bit length. A match flag with no input left ends the stream.

use xpress_core::error::{Result, XpressError};
use xpress_core::traits::{DecodeState, Decompressor, run_tracked};
use xpress_core::{ByteCursor, DecodeOptions, OffsetPolicy, OutputWindow};

/// Minimum match length.
pub const MIN_MATCH: usize = 3;

/// Length code that escapes to a half byte.
const LENGTH_CODE_ESCAPE: usize = 7;

/// Half-byte value that escapes to a full byte.
const NIBBLE_ESCAPE: usize = 15;

/// Number of flag bits per flag word.
const FLAG_BITS: u32 = 32;

/// High nibble of a length byte whose low nibble was already used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HalfByteCarry {
    /// Input offset of the shared byte.
    position: usize,
    /// The unused high nibble.
    high_nibble: u8,
}

/// Outcome of one decoding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Done,
}

/// Working state of one decode call.
struct PlainRun<'a> {
    cursor: ByteCursor<'a>,
    window: OutputWindow,
    policy: OffsetPolicy,
    /// Current flag word, consumed from bit `flag_count - 1` downwards.
    flags: u32,
    flag_count: u32,
    carry: Option<HalfByteCarry>,
}

impl<'a> PlainRun<'a> {
    fn new(input: &'a [u8], options: &DecodeOptions) -> Self {
        Self {
            cursor: ByteCursor::new(input),
            window: OutputWindow::with_capacity(
                options.capacity_hint(input.len(), 3),
                options.max_output,
            ),
            policy: options.offset_policy,
            flags: 0,
            flag_count: 0,
            carry: None,
        }
    }

    fn next_flag(&mut self) -> Result<bool> {
        if self.flag_count == 0 {
            self.flags = self.cursor.read_u32_le()?;
            self.flag_count = FLAG_BITS;
        }
        self.flag_count -= 1;
        Ok(self.flags & (1 << self.flag_count) != 0)
    }

    fn step(&mut self) -> Result<Step> {
        if !self.next_flag()? {
            let byte = self.cursor.read_u8()?;
            self.window.write_literal(byte)?;
            return Ok(Step::Continue);
        }

        if self.cursor.is_empty() {
            return Ok(Step::Done);
        }

        let token = self.cursor.read_u16_le()? as usize;
        let mut length = token % 8;
        let offset = token / 8 + 1;

        if length == LENGTH_CODE_ESCAPE {
            length = self.read_long_length()? + LENGTH_CODE_ESCAPE;
        }
        length += MIN_MATCH;

        self.emit_match(offset, length)?;
        Ok(Step::Continue)
    }

    /// Read the extension of an escaped length code, returning `length - 10`.
    fn read_long_length(&mut self) -> Result<usize> {
        let nibble = match self.carry.take() {
            Some(carry) => {
                log::trace!("plain xpress: reusing length byte at offset {}", carry.position);
                carry.high_nibble
            }
            None => {
                let position = self.cursor.position();
                let byte = self.cursor.read_u8()?;
                self.carry = Some(HalfByteCarry {
                    position,
                    high_nibble: byte >> 4,
                });
                byte & 0x0F
            }
        };

        let mut length = nibble as usize;
        if length == NIBBLE_ESCAPE {
            length = self.cursor.read_u8()? as usize;
            if length == 255 {
                let position = self.cursor.position();
                let extended = self.cursor.read_u16_le()? as usize;
                let bias = NIBBLE_ESCAPE + LENGTH_CODE_ESCAPE;
                if extended < bias {
                    return Err(XpressError::invalid_format(
                        position,
                        format!("extended match length {} below {}", extended, bias),
                    ));
                }
                length = extended - bias;
            }
            length += NIBBLE_ESCAPE;
        }
        Ok(length)
    }

    fn emit_match(&mut self, offset: usize, length: usize) -> Result<()> {
        if !self.window.can_reach(offset) {
            match self.policy {
                OffsetPolicy::Reject => {
                    return Err(XpressError::invalid_distance(offset, self.window.len()));
                }
                OffsetPolicy::Skip => {
                    log::warn!(
                        "plain xpress: skipping match at input offset {}: distance {} exceeds output of {} bytes",
                        self.cursor.position(),
                        offset,
                        self.window.len()
                    );
                    return Ok(());
                }
            }
        }
        self.window.copy_match(offset, length)
    }

    fn finish(self) -> Vec<u8> {
        if let Some(carry) = self.carry {
            log::debug!(
                "plain xpress: stream ended with unused length nibble at offset {}",
                carry.position
            );
        }
        self.window.into_output()
    }
}

/// Plain XPRESS (LZ77) decompressor.
#[derive(Debug, Default)]
pub struct PlainLzDecoder {
    /// Decoder options.
    options: DecodeOptions,
    /// Outcome of the last call.
    state: DecodeState,
}

impl PlainLzDecoder {
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

impl Decompressor for PlainLzDecoder {
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
    log::debug!("plain xpress: decoding {} input bytes", input.len());

    let mut run = PlainRun::new(input, options);
    while run.step()? == Step::Continue {}

    let output = run.finish();
    log::debug!("plain xpress: produced {} bytes", output.len());
    Ok(output)
}

/// Decompress a plain XPRESS stream.
pub fn decode_plain_lz(input: &[u8]) -> Result<Vec<u8>> {
    decode_stream(input, &DecodeOptions::default())
}

/// Decompress a plain XPRESS stream with explicit options.
pub fn decode_plain_lz_with(input: &[u8], options: &DecodeOptions) -> Result<Vec<u8>> {
    decode_stream(input, options)
}
