//! Canonical Huffman decoding table for XPRESS Huffman streams.
//!
//! A stream starts with 256 bytes holding 512 four-bit code lengths, two per
//! byte, low nibble first. The decoding table is a flat array indexed by the
//! next 15 bits of input: every symbol of length `n` owns `2^(15-n)`
//! consecutive entries. Entries are handed out by code length (shortest
//! first) and then by symbol value, which is exactly the canonical code
//! assignment, so no explicit sort or code computation is needed.

use xpress_core::error::{Result, XpressError};

/// Number of symbols: 256 literals plus 256 match codes.
pub const SYMBOL_COUNT: usize = 512;

/// Size in bytes of the packed code-length table.
pub const LENGTH_TABLE_SIZE: usize = SYMBOL_COUNT / 2;

/// Maximum code length in bits; also the decoding table index width.
pub const MAX_CODE_LENGTH: u32 = 15;

/// Number of entries in the decoding table.
pub const TABLE_SIZE: usize = 1 << MAX_CODE_LENGTH;

/// Unpack the length of `symbol` from a packed code-length table.
#[inline]
pub fn packed_length(table: &[u8], symbol: usize) -> u8 {
    let byte = table[symbol / 2];
    if symbol % 2 == 0 {
        byte & 0x0F
    } else {
        byte >> 4
    }
}

/// Flat lookup table from 15-bit input prefixes to symbols.
#[derive(Debug, Clone)]
pub struct HuffmanTable {
    /// Symbol for every 15-bit prefix.
    entries: Box<[u16]>,
    /// Code length of every symbol (0 = unused).
    lengths: [u8; SYMBOL_COUNT],
}

impl HuffmanTable {
    /// Build a table from the 256-byte packed code-length table.
    pub fn from_packed(table: &[u8]) -> Result<Self> {
        if table.len() != LENGTH_TABLE_SIZE {
            return Err(XpressError::invalid_format(
                0,
                format!(
                    "code-length table must be {} bytes, got {}",
                    LENGTH_TABLE_SIZE,
                    table.len()
                ),
            ));
        }

        let mut lengths = [0u8; SYMBOL_COUNT];
        for (symbol, length) in lengths.iter_mut().enumerate() {
            *length = packed_length(table, symbol);
        }
        Self::from_lengths(&lengths)
    }

    /// Build a table from unpacked code lengths (each 0-15).
    pub fn from_lengths(lengths: &[u8; SYMBOL_COUNT]) -> Result<Self> {
        let mut entries = vec![0u16; TABLE_SIZE].into_boxed_slice();
        let mut filled = 0usize;

        for bit_length in 1..=MAX_CODE_LENGTH as u8 {
            let span = 1usize << (MAX_CODE_LENGTH - bit_length as u32);
            for (symbol, _) in lengths
                .iter()
                .enumerate()
                .filter(|&(_, &len)| len == bit_length)
            {
                if filled + span > TABLE_SIZE {
                    return Err(XpressError::invalid_huffman_table(symbol as u16));
                }
                entries[filled..filled + span].fill(symbol as u16);
                filled += span;
            }
        }

        if filled != TABLE_SIZE {
            return Err(XpressError::huffman_underflow(filled, TABLE_SIZE));
        }

        Ok(Self {
            entries,
            lengths: *lengths,
        })
    }

    /// Symbol whose code is a prefix of `prefix` (the next 15 input bits).
    #[inline]
    pub fn lookup(&self, prefix: u32) -> u16 {
        self.entries[prefix as usize & (TABLE_SIZE - 1)]
    }

    /// Code length of `symbol` in bits.
    #[inline]
    pub fn code_length(&self, symbol: u16) -> u8 {
        self.lengths[symbol as usize]
    }
}
