//! LZNT1 chunk decoding.
//!
//! An LZNT1 stream is a sequence of chunks, each prefixed by a 16-bit
//! little-endian header:
//!
//! ```text
//!  15  14..12  11..0
//! [C] [format] [size]
//! ```
//!
//! - `C`: chunk is compressed
//! - `format`: must be 3 for compressed chunks
//! - `size`: for stored chunks, the payload is `size + 3` bytes
//!
//! Only stored chunks are decoded. Compressed chunks are reported as
//! [`XpressError::UnsupportedCompressedBlock`].

use xpress_core::error::{Result, XpressError};
use xpress_core::traits::{DecodeState, Decompressor, run_tracked};
use xpress_core::{ByteCursor, DecodeOptions, OutputWindow};

/// Header bit marking a compressed chunk.
const COMPRESSED_FLAG: u16 = 0x8000;

/// Chunk format required for compressed chunks.
pub const CHUNK_FORMAT: u8 = 3;

/// Added to the size field of a stored chunk to get its payload length.
const STORED_SIZE_BIAS: usize = 3;

/// Decoded chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Whether the chunk payload is compressed.
    pub compressed: bool,
    /// Chunk format (bits 14-12).
    pub format: u8,
    /// Raw 12-bit size field.
    pub size_field: u16,
}

impl ChunkHeader {
    /// Split a raw header word into its fields.
    pub fn parse(raw: u16) -> Self {
        Self {
            compressed: raw & COMPRESSED_FLAG != 0,
            format: ((raw >> 12) & 0x7) as u8,
            size_field: raw & 0x0FFF,
        }
    }

    /// Payload length of a stored chunk.
    pub fn stored_len(&self) -> usize {
        self.size_field as usize + STORED_SIZE_BIAS
    }
}

fn decode_stream(input: &[u8], options: &DecodeOptions) -> Result<Vec<u8>> {
    log::debug!("lznt1: decoding {} input bytes", input.len());

    let mut cursor = ByteCursor::new(input);
    let mut window = OutputWindow::with_capacity(
        options.capacity_hint(input.len(), 1),
        options.max_output,
    );

    while !cursor.is_empty() {
        let offset = cursor.position();
        let header = ChunkHeader::parse(cursor.read_u16_le()?);

        if header.compressed {
            if header.format != CHUNK_FORMAT {
                return Err(XpressError::invalid_format(
                    offset,
                    format!("invalid chunk format {}", header.format),
                ));
            }
            return Err(XpressError::unsupported_block(offset));
        }

        let payload = cursor.read_bytes(header.stored_len())?;
        log::trace!("lznt1: stored chunk of {} bytes at offset {}", payload.len(), offset);
        window.write_literals(payload)?;
    }

    let output = window.into_output();
    log::debug!("lznt1: produced {} bytes", output.len());
    Ok(output)
}

/// LZNT1 decompressor for streams of stored chunks.
#[derive(Debug, Default)]
pub struct Lznt1Decoder {
    /// Decoder options.
    options: DecodeOptions,
    /// Outcome of the last call.
    state: DecodeState,
}

impl Lznt1Decoder {
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

impl Decompressor for Lznt1Decoder {
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

/// Decompress an LZNT1 stream.
pub fn decode_block_literal(input: &[u8]) -> Result<Vec<u8>> {
    decode_stream(input, &DecodeOptions::default())
}

/// Decompress an LZNT1 stream with explicit options.
pub fn decode_block_literal_with(input: &[u8], options: &DecodeOptions) -> Result<Vec<u8>> {
    decode_stream(input, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let header = ChunkHeader::parse(0xB123);
        assert!(header.compressed);
        assert_eq!(header.format, 3);
        assert_eq!(header.size_field, 0x123);

        let header = ChunkHeader::parse(0x0003);
        assert!(!header.compressed);
        assert_eq!(header.stored_len(), 6);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode_block_literal(&[]).unwrap(), b"");
    }

    #[test]
    fn test_stored_chunk() {
        let input = [0x03, 0x00, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF];
        assert_eq!(
            decode_block_literal(&input).unwrap(),
            vec![0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]
        );
    }

    #[test]
    fn test_compressed_chunk_unsupported() {
        let input = [0x03, 0xB0, 0x00, 0x00, 0x00];
        let err = decode_block_literal(&input).unwrap_err();
        assert_eq!(err, XpressError::unsupported_block(0));
    }

    #[test]
    fn test_compressed_chunk_bad_format() {
        let err = decode_block_literal(&[0x00, 0x80]).unwrap_err();
        assert!(matches!(err, XpressError::InvalidFormat { offset: 0, .. }));
    }

    #[test]
    fn test_truncated_payload() {
        let input = [0x03, 0x00, 0xAA, 0xBB];
        let err = decode_block_literal(&input).unwrap_err();
        assert_eq!(err, XpressError::truncated(2, 6, 2));
    }

    #[test]
    fn test_odd_trailing_byte() {
        let input = [0x00, 0x00, b'a', b'b', b'c', 0x00];
        let err = decode_block_literal(&input).unwrap_err();
        assert_eq!(err, XpressError::truncated(5, 2, 1));
    }
}
