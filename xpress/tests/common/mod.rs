//! Hand-built streams for the integration tests.
//!
//! These builders lay tokens out exactly the way the decoders read them.
//! They do no match finding: tests decide which literals and matches to emit.

#![allow(dead_code)]

/// Builds XPRESS Huffman streams with every symbol coded in 9 bits
/// (code = symbol value).
///
/// A `matched(1, 3)` right before `finish` shares symbol 256 with the end
/// marker and decodes as end of stream if no word is loaded in between.
pub struct HuffStreamBuilder {
    out: Vec<u8>,
    bits: Vec<bool>,
    /// Output offsets of the 16-bit words, in bit-stream order.
    slots: Vec<usize>,
}

impl HuffStreamBuilder {
    pub fn new() -> Self {
        let mut out = vec![0x99; 256];
        let slots = vec![out.len(), out.len() + 2];
        out.extend_from_slice(&[0; 4]);
        Self {
            out,
            bits: Vec::new(),
            slots,
        }
    }

    /// Append bits MSB-first, reserving the word the decoder loads next.
    fn write_bits(&mut self, value: u32, count: u32) {
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
        // Word w is loaded once more than 16 * (w - 1) bits are consumed.
        while self.bits.len() > 16 * (self.slots.len() - 1) {
            self.slots.push(self.out.len());
            self.out.extend_from_slice(&[0; 2]);
        }
    }

    fn symbol(&mut self, symbol: u16) {
        self.write_bits(symbol as u32, 9);
    }

    pub fn literal(&mut self, byte: u8) -> &mut Self {
        self.symbol(byte as u16);
        self
    }

    pub fn literals(&mut self, bytes: &[u8]) -> &mut Self {
        for &b in bytes {
            self.literal(b);
        }
        self
    }

    pub fn matched(&mut self, offset: usize, length: usize) -> &mut Self {
        assert!(offset >= 1 && offset < 1 << 16);
        assert!(length >= 3);
        let offset_bits = usize::BITS - 1 - offset.leading_zeros();
        let length_code = (length - 3).min(15);
        self.symbol(256 + (offset_bits as u16) * 16 + length_code as u16);

        if length_code == 15 {
            let rest = length - 3 - 15;
            if rest < 255 {
                self.out.push(rest as u8);
            } else {
                self.out.push(255);
                self.out.extend_from_slice(&((length - 3) as u16).to_le_bytes());
            }
        }
        self.write_bits((offset - (1 << offset_bits)) as u32, offset_bits);
        self
    }

    /// Append the end-of-stream symbol and return the stream.
    pub fn finish(&mut self) -> Vec<u8> {
        self.symbol(256);
        let mut out = self.out.clone();
        for (w, &slot) in self.slots.iter().enumerate() {
            let mut word = 0u16;
            for i in 0..16 {
                let bit = self.bits.get(w * 16 + i).copied().unwrap_or(false);
                word = (word << 1) | bit as u16;
            }
            out[slot..slot + 2].copy_from_slice(&word.to_le_bytes());
        }
        out
    }
}

/// Builds plain XPRESS streams.
pub struct PlainStreamBuilder {
    out: Vec<u8>,
    flag_slot: usize,
    flags: u32,
    flag_count: u32,
    /// Offset of a length byte whose high nibble is still free.
    half_byte: Option<usize>,
}

impl PlainStreamBuilder {
    pub fn new() -> Self {
        Self {
            out: Vec::new(),
            flag_slot: 0,
            flags: 0,
            flag_count: 32,
            half_byte: None,
        }
    }

    fn flag(&mut self, is_match: bool) {
        if self.flag_count == 32 {
            self.flush_flags();
            self.flag_slot = self.out.len();
            self.out.extend_from_slice(&[0; 4]);
            self.flags = 0;
            self.flag_count = 0;
        }
        if is_match {
            self.flags |= 1 << (31 - self.flag_count);
        }
        self.flag_count += 1;
    }

    fn flush_flags(&mut self) {
        if self.out.len() >= self.flag_slot + 4 {
            self.out[self.flag_slot..self.flag_slot + 4].copy_from_slice(&self.flags.to_le_bytes());
        }
    }

    pub fn literal(&mut self, byte: u8) -> &mut Self {
        self.flag(false);
        self.out.push(byte);
        self
    }

    pub fn literals(&mut self, bytes: &[u8]) -> &mut Self {
        for &b in bytes {
            self.literal(b);
        }
        self
    }

    pub fn matched(&mut self, offset: usize, length: usize) -> &mut Self {
        assert!(offset >= 1 && offset <= 8192);
        assert!(length >= 3);
        self.flag(true);

        let length = length - 3;
        let code = length.min(7);
        self.out
            .extend_from_slice(&(((offset - 1) * 8 + code) as u16).to_le_bytes());

        if code == 7 {
            let length = length - 7;
            let nibble = length.min(15) as u8;
            match self.half_byte.take() {
                Some(pos) => self.out[pos] |= nibble << 4,
                None => {
                    self.half_byte = Some(self.out.len());
                    self.out.push(nibble);
                }
            }
            if nibble == 15 {
                let rest = length - 15;
                if rest < 255 {
                    self.out.push(rest as u8);
                } else {
                    self.out.push(255);
                    self.out
                        .extend_from_slice(&((length + 7) as u16).to_le_bytes());
                }
            }
        }
        self
    }

    /// Append the end-of-stream flag and return the stream.
    pub fn finish(&mut self) -> Vec<u8> {
        self.flag(true);
        self.flush_flags();
        self.out.clone()
    }
}

/// Builds LZNT1 streams of stored chunks.
pub fn stored_chunks(data: &[u8], chunk_len: usize) -> Vec<u8> {
    assert!((3..=4098).contains(&chunk_len));
    let mut out = Vec::new();
    for chunk in data.chunks(chunk_len) {
        assert!(chunk.len() >= 3, "stored chunks carry at least 3 bytes");
        let header = (chunk.len() - 3) as u16;
        out.extend_from_slice(&header.to_le_bytes());
        out.extend_from_slice(chunk);
    }
    out
}

/// Deterministic pseudo-random bytes.
pub fn noise(size: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..size)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 33) as u8
        })
        .collect()
}
