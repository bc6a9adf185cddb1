//! Compression format identifiers.
//!
//! The numeric identifiers match the ones used by the Windows compression
//! API (`COMPRESSION_FORMAT_*`), so values read from file systems or
//! protocol headers can be passed straight to [`CompressionFormat::from_id`].

use crate::lz77::PlainLzDecoder;
use crate::lznt1::Lznt1Decoder;
use crate::xpress_huff::XpressHuffDecoder;
use xpress_core::error::{Result, XpressError};
use xpress_core::{DecodeOptions, Decompressor};

/// Supported compression formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionFormat {
    /// LZNT1, stored chunks only.
    Lznt1,
    /// Plain XPRESS (LZ77 with flag words).
    Xpress,
    /// XPRESS Huffman (LZ77 + canonical Huffman).
    XpressHuffman,
}

impl CompressionFormat {
    /// All supported formats.
    pub const ALL: [Self; 3] = [Self::Lznt1, Self::Xpress, Self::XpressHuffman];

    /// Look up a format by numeric identifier.
    pub fn from_id(id: u16) -> Result<Self> {
        match id {
            2 => Ok(Self::Lznt1),
            3 => Ok(Self::Xpress),
            4 => Ok(Self::XpressHuffman),
            _ => Err(XpressError::unknown_format(id)),
        }
    }

    /// Numeric identifier.
    pub fn id(&self) -> u16 {
        match self {
            Self::Lznt1 => 2,
            Self::Xpress => 3,
            Self::XpressHuffman => 4,
        }
    }

    /// Format name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lznt1 => "lznt1",
            Self::Xpress => "xpress",
            Self::XpressHuffman => "xpress-huffman",
        }
    }

    /// Create a boxed decoder for this format.
    pub fn decoder(&self, options: DecodeOptions) -> Box<dyn Decompressor> {
        match self {
            Self::Lznt1 => Box::new(Lznt1Decoder::with_options(options)),
            Self::Xpress => Box::new(PlainLzDecoder::with_options(options)),
            Self::XpressHuffman => Box::new(XpressHuffDecoder::with_options(options)),
        }
    }
}

impl std::fmt::Display for CompressionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decompress `data` in the given format with default options.
pub fn decompress(format: CompressionFormat, data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(format, data, &DecodeOptions::default())
}

/// Decompress `data` in the given format.
pub fn decompress_with(
    format: CompressionFormat,
    data: &[u8],
    options: &DecodeOptions,
) -> Result<Vec<u8>> {
    match format {
        CompressionFormat::Lznt1 => crate::lznt1::decode_block_literal_with(data, options),
        CompressionFormat::Xpress => crate::lz77::decode_plain_lz_with(data, options),
        CompressionFormat::XpressHuffman => {
            crate::xpress_huff::decode_huffman_lz_with(data, options)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_id() {
        assert_eq!(CompressionFormat::from_id(2), Ok(CompressionFormat::Lznt1));
        assert_eq!(CompressionFormat::from_id(3), Ok(CompressionFormat::Xpress));
        assert_eq!(
            CompressionFormat::from_id(4),
            Ok(CompressionFormat::XpressHuffman)
        );
        assert_eq!(
            CompressionFormat::from_id(0),
            Err(XpressError::unknown_format(0))
        );
    }

    #[test]
    fn test_id_roundtrip() {
        for format in CompressionFormat::ALL {
            assert_eq!(CompressionFormat::from_id(format.id()), Ok(format));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(CompressionFormat::XpressHuffman.to_string(), "xpress-huffman");
    }

    #[test]
    fn test_dispatch() {
        let stored = [0x00, 0x00, b'a', b'b', b'c'];
        assert_eq!(decompress(CompressionFormat::Lznt1, &stored).unwrap(), b"abc");

        let mut decoder = CompressionFormat::Lznt1.decoder(DecodeOptions::default());
        assert_eq!(decoder.decompress(&stored).unwrap(), b"abc");
        assert!(decoder.is_finished());
    }
}
