//! Bit stream with a separate read cursor.
//!
//! Bits are packed least-significant bit first: the first bit written to an
//! octet is bit 0 of its value. Storage grows in fixed-size blocks and is
//! never shrunk.

use csspack_core::{Error, Result};

/// Default growth step in bits.
pub const DEFAULT_BLOCK_BITS: usize = 4096;

/// Append-only bit storage.
///
/// The write cursor is implicit and always sits at [`len`](Self::len).
/// Reading goes through a [`BitReader`], which owns its own cursor.
#[derive(Debug, Clone)]
pub struct BitStream {
    data: Vec<u8>,
    /// Logical length in bits.
    len: usize,
    block_bytes: usize,
}

impl BitStream {
    /// Create an empty stream with the default growth step.
    pub fn new() -> Self {
        Self::with_block_bits(DEFAULT_BLOCK_BITS)
    }

    /// Create an empty stream that grows `block_bits` at a time.
    ///
    /// The step is rounded up to whole octets.
    pub fn with_block_bits(block_bits: usize) -> Self {
        Self {
            data: Vec::new(),
            len: 0,
            block_bytes: block_bits.max(8).div_ceil(8),
        }
    }

    /// Import a byte buffer. Every bit of it counts as written, padding
    /// included; the grammar on top knows where its content ends.
    pub fn from_bytes(buf: &[u8]) -> Self {
        Self {
            data: buf.to_vec(),
            len: buf.len() * 8,
            block_bytes: DEFAULT_BLOCK_BITS / 8,
        }
    }

    /// Append one bit.
    #[inline]
    pub fn push_bit(&mut self, bit: bool) {
        let byte = self.len / 8;
        if byte == self.data.len() {
            self.grow();
        }
        if bit {
            self.data[byte] |= 1 << (self.len % 8);
        }
        self.len += 1;
    }

    /// Append a sequence of bits in order.
    pub fn write_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.push_bit(bit);
        }
    }

    /// Append 8 bits, least significant first.
    #[inline]
    pub fn write_octet(&mut self, value: u8) {
        for i in 0..8 {
            self.push_bit((value >> i) & 1 == 1);
        }
    }

    /// Append each byte as one octet.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_octet(byte);
        }
    }

    /// Append the UTF-8 bytes of `s`. No terminator is written.
    pub fn write_string(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    fn grow(&mut self) {
        let new_len = self.data.len() + self.block_bytes;
        self.data.reserve_exact(self.block_bytes);
        self.data.resize(new_len, 0);
    }

    /// Bits written.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated storage in bits.
    pub fn capacity_bits(&self) -> usize {
        self.data.len() * 8
    }

    /// Written octets, the last one zero-padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len.div_ceil(8)]
    }

    /// Export as a contiguous byte buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Export as a contiguous byte buffer, reusing the allocation.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.data.truncate(self.len.div_ceil(8));
        self.data
    }

    /// Start reading from bit 0.
    pub fn reader(&self) -> BitReader<'_> {
        BitReader::new(self.as_bytes(), self.len)
    }
}

impl Default for BitStream {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for BitStream {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for BitStream {}

/// Read cursor over a bit stream.
///
/// `position` only moves forward and never passes the stream length.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    len: usize,
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Read `len` bits from `data`.
    pub fn new(data: &'a [u8], len: usize) -> Self {
        Self {
            data,
            len: len.min(data.len() * 8),
            position: 0,
        }
    }

    /// Read one bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.position >= self.len {
            return Err(Error::out_of_range(self.position, self.len));
        }
        let bit = (self.data[self.position / 8] >> (self.position % 8)) & 1 == 1;
        self.position += 1;
        Ok(bit)
    }

    /// Read 8 bits, least significant first.
    ///
    /// Fails without moving the cursor if fewer than 8 bits remain.
    pub fn read_octet(&mut self) -> Result<u8> {
        if self.remaining() < 8 {
            return Err(Error::out_of_range(self.position + 8, self.len));
        }
        let mut value = 0u8;
        for i in 0..8 {
            if self.read_bit()? {
                value |= 1 << i;
            }
        }
        Ok(value)
    }

    /// Read octets up to `delimiter`. The delimiter is consumed but not returned.
    pub fn read_until(&mut self, delimiter: u8) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        loop {
            let byte = self.read_octet()?;
            if byte == delimiter {
                return Ok(bytes);
            }
            bytes.push(byte);
        }
    }

    /// Read a delimiter-terminated UTF-8 string.
    pub fn read_string(&mut self, delimiter: u8) -> Result<String> {
        let bytes = self.read_until(delimiter)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Check if unread bits remain.
    pub fn has_more(&self) -> bool {
        self.position < self.len
    }

    /// Index of the next bit to read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Unread bits.
    pub fn remaining(&self) -> usize {
        self.len - self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octet_roundtrip() {
        let mut stream = BitStream::new();
        stream.write_octet(65);

        let mut reader = stream.reader();
        assert_eq!(reader.read_octet().unwrap(), 65);
        assert!(!reader.has_more());
    }

    #[test]
    fn test_lsb_first_packing() {
        let mut stream = BitStream::new();
        stream.push_bit(true);
        stream.push_bit(false);
        stream.push_bit(true);
        stream.push_bit(true);

        assert_eq!(stream.len(), 4);
        assert_eq!(stream.to_bytes(), vec![0b0000_1101]);

        let mut stream = BitStream::new();
        stream.write_octet(0b0000_0001);
        let mut reader = stream.reader();
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
    }

    #[test]
    fn test_unaligned_octets() {
        let mut stream = BitStream::new();
        stream.push_bit(true);
        stream.write_octet(0xA5);
        stream.write_octet(0x3C);

        let mut reader = stream.reader();
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_octet().unwrap(), 0xA5);
        assert_eq!(reader.read_octet().unwrap(), 0x3C);
        assert_eq!(reader.position(), 17);
    }

    #[test]
    fn test_read_past_end() {
        let mut stream = BitStream::new();
        stream.push_bit(true);

        let mut reader = stream.reader();
        reader.read_bit().unwrap();
        let err = reader.read_bit().unwrap_err();
        assert!(matches!(err, Error::OutOfRange { position: 1, length: 1 }));
    }

    #[test]
    fn test_short_octet_keeps_cursor() {
        let mut stream = BitStream::new();
        stream.write_bits(&[true, true, false]);

        let mut reader = stream.reader();
        assert!(reader.read_octet().is_err());
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.remaining(), 3);
    }

    #[test]
    fn test_string_with_delimiter() {
        let mut stream = BitStream::new();
        stream.write_string("a > b");
        stream.write_octet(0);
        stream.write_string("rest");
        stream.write_octet(0);

        let mut reader = stream.reader();
        assert_eq!(reader.read_string(0).unwrap(), "a > b");
        assert_eq!(reader.read_string(0).unwrap(), "rest");
        assert!(!reader.has_more());
    }

    #[test]
    fn test_string_unterminated() {
        let mut stream = BitStream::new();
        stream.write_string("abc");

        let mut reader = stream.reader();
        assert!(matches!(reader.read_string(0), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn test_non_ascii_string() {
        let mut stream = BitStream::new();
        stream.write_string("content: \"→\"");
        stream.write_octet(0);

        let mut reader = stream.reader();
        assert_eq!(reader.read_string(0).unwrap(), "content: \"→\"");
    }

    #[test]
    fn test_bytes_roundtrip_with_padding() {
        let mut stream = BitStream::new();
        stream.write_octet(0x42);
        stream.write_bits(&[true, false, true]);

        let bytes = stream.to_bytes();
        assert_eq!(bytes.len(), 2);

        let imported = BitStream::from_bytes(&bytes);
        assert_eq!(imported.len(), 16);

        let mut reader = imported.reader();
        assert_eq!(reader.read_octet().unwrap(), 0x42);
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        // Five padding bits, all zero.
        assert_eq!(reader.remaining(), 5);
    }

    #[test]
    fn test_block_growth() {
        let mut stream = BitStream::with_block_bits(16);
        assert_eq!(stream.capacity_bits(), 0);

        stream.push_bit(false);
        assert_eq!(stream.capacity_bits(), 16);

        for _ in 0..16 {
            stream.push_bit(true);
        }
        assert_eq!(stream.len(), 17);
        assert_eq!(stream.capacity_bits(), 32);
        assert_eq!(stream.as_bytes().len(), 3);
        assert_eq!(stream.clone().into_bytes(), stream.to_bytes());
    }

    #[test]
    fn test_equality_ignores_block_size() {
        let mut a = BitStream::with_block_bits(8);
        let mut b = BitStream::with_block_bits(1024);
        a.write_string("xy");
        b.write_string("xy");
        assert_eq!(a, b);
    }
}
