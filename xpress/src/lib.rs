//! # xpress
//!
//! Pure Rust decoders for three related Microsoft compression formats:
//!
//! - **XPRESS Huffman**: LZ77 with a canonical Huffman code over 512
//!   literal/match symbols
//! - **Plain XPRESS**: LZ77 with 32-bit flag words and no entropy stage
//! - **LZNT1**: chunked format; stored chunks are supported, compressed
//!   chunks are rejected
//!
//! Decoding is whole-buffer: the complete input must be in memory, and each
//! call returns the complete output or an error. Output size is controlled
//! by the input, so callers handling untrusted data should set
//! [`DecodeOptions::max_output`].
//!
//! ## Example
//!
//! ```rust
//! use xpress::{CompressionFormat, decode_block_literal, decompress};
//!
//! // One stored LZNT1 chunk: size field 3 -> 6 payload bytes
//! let data = [0x03, 0x00, b'H', b'e', b'l', b'l', b'o', b'!'];
//! assert_eq!(decode_block_literal(&data).unwrap(), b"Hello!");
//! assert_eq!(decompress(CompressionFormat::Lznt1, &data).unwrap(), b"Hello!");
//! ```
//!
//! ## Plain XPRESS
//!
//! ```rust
//! use xpress::decode_plain_lz;
//!
//! // Flags 0b0110...: literal 'A', match(offset 1, length 5), end of stream
//! let mut data = 0x6000_0000u32.to_le_bytes().to_vec();
//! data.push(b'A');
//! data.extend_from_slice(&2u16.to_le_bytes());
//! assert_eq!(decode_plain_lz(&data).unwrap(), b"AAAAAA");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bits;
pub mod format;
pub mod huffman;
pub mod lz77;
pub mod lznt1;
pub mod xpress_huff;

// Re-exports
pub use format::{CompressionFormat, decompress, decompress_with};
pub use huffman::HuffmanTable;
pub use lz77::{PlainLzDecoder, decode_plain_lz, decode_plain_lz_with};
pub use lznt1::{ChunkHeader, Lznt1Decoder, decode_block_literal, decode_block_literal_with};
pub use xpress_huff::{XpressHuffDecoder, decode_huffman_lz, decode_huffman_lz_with};

pub use xpress_core::{DecodeOptions, DecodeState, Decompressor, OffsetPolicy, Result, XpressError};
