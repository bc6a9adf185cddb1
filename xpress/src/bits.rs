//! MSB-first bit register for XPRESS Huffman streams.
//!
//! The payload is a sequence of little-endian 16-bit words whose bits are
//! consumed from the most significant end. The register keeps 32 bits
//! buffered: the current word in the upper half and the next word in the
//! lower half. Whenever consumption eats into the lower half, one more word
//! is shifted in. Bytes that are not part of the bit stream (match length
//! extensions) are read from the same cursor between refills.

use xpress_core::ByteCursor;
use xpress_core::error::Result;

/// Bit register over a word-oriented input.
#[derive(Debug)]
pub struct BitRegister<'a> {
    /// Input positioned after the last word loaded.
    cursor: ByteCursor<'a>,
    /// Buffered bits, next bit in the MSB.
    next_bits: u32,
    /// Buffered bits beyond the first 16, may dip below zero before a refill.
    extra_bits: i32,
}

impl<'a> BitRegister<'a> {
    /// Prime a register with the first two words at the cursor.
    pub fn new(mut cursor: ByteCursor<'a>) -> Result<Self> {
        let high = cursor.read_u16_le()? as u32;
        let low = cursor.read_u16_le()? as u32;
        Ok(Self {
            cursor,
            next_bits: (high << 16) | low,
            extra_bits: 16,
        })
    }

    /// Look at the next `count` bits without consuming them.
    #[inline]
    pub fn peek(&self, count: u32) -> u32 {
        debug_assert!(count <= 16, "Cannot peek more than 16 bits at once");
        if count == 0 {
            return 0;
        }
        self.next_bits >> (32 - count)
    }

    /// Drop `count` bits, refilling one word if the buffer runs low.
    #[inline]
    pub fn consume(&mut self, count: u32) -> Result<()> {
        debug_assert!(count <= 16, "Cannot consume more than 16 bits at once");
        if count == 0 {
            return Ok(());
        }
        self.next_bits <<= count;
        self.extra_bits -= count as i32;
        if self.extra_bits < 0 {
            let word = self.cursor.read_u16_le()? as u32;
            self.next_bits |= word << (-self.extra_bits) as u32;
            self.extra_bits += 16;
        }
        Ok(())
    }

    /// Read and consume `count` bits.
    #[inline]
    pub fn read_bits(&mut self, count: u32) -> Result<u32> {
        let value = self.peek(count);
        self.consume(count)?;
        Ok(value)
    }

    /// Byte-level access to the input for out-of-band fields.
    pub fn cursor_mut(&mut self) -> &mut ByteCursor<'a> {
        &mut self.cursor
    }

    /// Bytes of input not yet loaded into the register.
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_order() {
        // First word fills the upper half of the register.
        let data = [0x34, 0x12, 0x78, 0x56];
        let bits = BitRegister::new(ByteCursor::new(&data)).unwrap();
        assert_eq!(bits.peek(16), 0x1234);
        assert_eq!(bits.peek(4), 0x1);
        assert_eq!(bits.remaining(), 0);
    }

    #[test]
    fn test_prime_needs_two_words() {
        let data = [0x34, 0x12, 0x78];
        assert!(BitRegister::new(ByteCursor::new(&data)).unwrap_err().is_truncated());
    }

    #[test]
    fn test_read_across_refill() {
        let data = [0xCD, 0xAB, 0x34, 0x12, 0x78, 0x56];
        let mut bits = BitRegister::new(ByteCursor::new(&data)).unwrap();

        assert_eq!(bits.read_bits(12).unwrap(), 0xABC);
        // Still within the first two words, nothing loaded yet
        assert_eq!(bits.remaining(), 2);
        assert_eq!(bits.read_bits(8).unwrap(), 0xD1);
        // Crossing into the second word pulls in the third
        assert_eq!(bits.remaining(), 0);
        assert_eq!(bits.read_bits(12).unwrap(), 0x234);
        assert_eq!(bits.peek(16), 0x5678);
    }

    #[test]
    fn test_refill_past_end() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF];
        let mut bits = BitRegister::new(ByteCursor::new(&data)).unwrap();
        bits.consume(16).unwrap();
        assert!(bits.consume(1).unwrap_err().is_truncated());
    }

    #[test]
    fn test_zero_width_read() {
        let data = [0xFF, 0xFF, 0x00, 0x00];
        let mut bits = BitRegister::new(ByteCursor::new(&data)).unwrap();
        assert_eq!(bits.read_bits(0).unwrap(), 0);
        assert_eq!(bits.peek(1), 1);
    }

    #[test]
    fn test_out_of_band_bytes() {
        let data = [0x00, 0x80, 0x00, 0x00, 0x2A, 0x01, 0x00];
        let mut bits = BitRegister::new(ByteCursor::new(&data)).unwrap();
        assert_eq!(bits.read_bits(1).unwrap(), 1);
        assert_eq!(bits.cursor_mut().read_u8().unwrap(), 0x2A);
        bits.consume(16).unwrap();
        bits.consume(15).unwrap();
        // Refill word came from after the extra byte
        assert_eq!(bits.peek(16), 0x0001);
    }
}
