//! Bit-level I/O for the Huffman stream format.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level. Every field of the format (the 32-bit magic number,
//! the tree header, the variable-length codes) is a big-endian bit sequence,
//! so both types work MSB-first: the first bit of a field is the most
//! significant bit of the value, and bytes are filled from bit 7 down to bit 0.
//!
//! End of input is not an error at this layer. `BitReader::read_bits`
//! returns `Ok(None)` when fewer bits remain than were requested, and the
//! codec decides whether that is a clean stop or a truncated stream.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! // Writing bits
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(0b101, 3).unwrap();  // Write 3 bits
//!     writer.write_bits(0b1100, 4).unwrap(); // Write 4 bits
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
//! assert_eq!(reader.read_bits(4).unwrap(), Some(0b1100));
//! assert_eq!(reader.read_bits(8).unwrap(), None);
//! ```

use crate::error::{OxiHuffError, Result};
use crate::traits::{BitSink, BitSource, Rewind};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

/// Maximum number of bits moved by a single `read_bits`/`write_bits` call.
pub const MAX_BITS_PER_CALL: u8 = 32;

/// A bit-level reader that wraps any `Read` implementation.
///
/// `BitReader` keeps up to 39 pending bits in a 64-bit buffer and pulls
/// bytes from the underlying reader only when a request cannot be served
/// from the buffer.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer (MSB-first, low `bits_in_buffer` bits are valid).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for statistics and error reporting).
    total_bits_read: u64,
    /// Set once the underlying reader has reported end of file.
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
            exhausted: false,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Get a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    ///
    /// Buffered bits that were not consumed are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Pull bytes until at least `count` bits are buffered.
    ///
    /// Returns `false` if the reader ran dry first.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<bool> {
        debug_assert!(count <= MAX_BITS_PER_CALL);

        while self.bits_in_buffer < count {
            if self.exhausted {
                return Ok(false);
            }

            let mut byte = [0u8; 1];
            match self.reader.read(&mut byte) {
                Ok(0) => self.exhausted = true,
                Ok(_) => {
                    self.buffer = (self.buffer << 8) | byte[0] as u64;
                    self.bits_in_buffer += 8;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(true)
    }

    /// Read up to 32 bits from the stream.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (0-32)
    ///
    /// # Returns
    ///
    /// The bits as a u32 with the first bit read in the most significant
    /// position, or `None` if the stream holds fewer than `count` bits.
    /// Bits left over at end of stream stay buffered.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        if count > MAX_BITS_PER_CALL {
            return Err(OxiHuffError::invalid_bit_count(count));
        }

        if count == 0 {
            return Ok(Some(0));
        }

        if !self.fill_buffer(count)? {
            return Ok(None);
        }

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let value = ((self.buffer >> shift) & mask) as u32;

        self.bits_in_buffer = shift;
        self.buffer &= (1u64 << shift) - 1;
        self.total_bits_read += count as u64;

        Ok(Some(value))
    }

    /// Read a single bit, `None` at end of stream.
    #[inline]
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        Ok(self.read_bits(1)?.map(|bit| bit != 0))
    }
}

impl<R: Read + Seek> BitReader<R> {
    /// Reposition the reader at the start of the underlying stream.
    ///
    /// Clears the bit buffer and the bit counter.
    pub fn reset(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.buffer = 0;
        self.bits_in_buffer = 0;
        self.total_bits_read = 0;
        self.exhausted = false;
        Ok(())
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        BitReader::read_bits(self, count)
    }

    fn bits_read(&self) -> u64 {
        self.total_bits_read
    }
}

impl<R: Read + Seek> Rewind for BitReader<R> {
    fn reset(&mut self) -> Result<()> {
        BitReader::reset(self)
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in an internal buffer and writes complete
/// bytes to the underlying writer. Call `flush()` when done to pad and
/// write the final partial byte.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer (MSB-first, low `bits_in_buffer` bits are pending).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written, padding excluded.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Flush any remaining bits and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }

    /// Get the total number of bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write complete bytes from the buffer to the writer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        let mut bytes = [0u8; 8];
        let mut n = 0;

        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            bytes[n] = (self.buffer >> self.bits_in_buffer) as u8;
            n += 1;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;

        if n > 0 {
            self.writer.write_all(&bytes[..n])?;
        }
        Ok(())
    }

    /// Write up to 32 bits to the stream.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write; only the low `count` bits are used
    /// * `count` - Number of bits to write (0-32), most significant first
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        if count > MAX_BITS_PER_CALL {
            return Err(OxiHuffError::invalid_bit_count(count));
        }

        if count == 0 {
            return Ok(());
        }

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (value as u64 & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Pad to a byte boundary with zeros.
    ///
    /// Padding bits are not counted in `bits_written`.
    pub fn align_to_byte(&mut self) -> Result<()> {
        let remainder = self.bits_in_buffer % 8;
        if remainder != 0 {
            let padding = 8 - remainder;
            self.buffer <<= padding;
            self.bits_in_buffer += padding;
            self.flush_bytes()?;
        }
        Ok(())
    }

    /// Pad the final partial byte with zero bits and flush the
    /// underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.align_to_byte()?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        BitWriter::write_bits(self, value, count)
    }

    fn close(&mut self) -> Result<()> {
        self.flush()
    }

    fn bits_written(&self) -> u64 {
        self.total_bits_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bitreader_basic() {
        // 0b10110101 = 0xB5
        let data = vec![0xB5];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(1).unwrap(), Some(1)); // MSB first
        assert_eq!(reader.read_bits(1).unwrap(), Some(0));
        assert_eq!(reader.read_bits(1).unwrap(), Some(1));
        assert_eq!(reader.read_bits(1).unwrap(), Some(1));
        assert_eq!(reader.read_bits(1).unwrap(), Some(0));
        assert_eq!(reader.read_bits(1).unwrap(), Some(1));
        assert_eq!(reader.read_bits(1).unwrap(), Some(0));
        assert_eq!(reader.read_bits(1).unwrap(), Some(1));
        assert_eq!(reader.read_bits(1).unwrap(), None);
    }

    #[test]
    fn test_bitreader_multi_byte() {
        let data = vec![0xFF, 0x00];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(4).unwrap(), Some(0xF));
        assert_eq!(reader.read_bits(8).unwrap(), Some(0xF0)); // Crosses byte boundary
        assert_eq!(reader.read_bits(4).unwrap(), Some(0x0));
        assert_eq!(reader.bits_read(), 16);
    }

    #[test]
    fn test_bitreader_full_word() {
        let data = vec![0xFA, 0xCE, 0x82, 0x01, 0x80];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(32).unwrap(), Some(0xFACE_8201));
        assert_eq!(reader.read_bit().unwrap(), Some(true));
    }

    #[test]
    fn test_bitreader_short_read_keeps_bits() {
        let data = vec![0xA0];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(9).unwrap(), None);
        assert_eq!(reader.bits_read(), 0);
        assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
    }

    #[test]
    fn test_bitreader_invalid_count() {
        let mut reader = BitReader::new(Cursor::new(vec![0u8; 8]));
        assert!(matches!(
            reader.read_bits(33),
            Err(OxiHuffError::InvalidBitCount { count: 33 })
        ));
    }

    #[test]
    fn test_bitreader_reset() {
        let data = vec![0x12, 0x34];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(16).unwrap(), Some(0x1234));
        assert_eq!(reader.read_bits(1).unwrap(), None);

        reader.reset().unwrap();
        assert_eq!(reader.bits_read(), 0);
        assert_eq!(reader.read_bits(8).unwrap(), Some(0x12));
    }

    #[test]
    fn test_bitwriter_basic() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            // Write 0b10110101 bit by bit
            writer.write_bit(true).unwrap(); // 1
            writer.write_bit(false).unwrap(); // 0
            writer.write_bit(true).unwrap(); // 1
            writer.write_bit(true).unwrap(); // 1
            writer.write_bit(false).unwrap(); // 0
            writer.write_bit(true).unwrap(); // 1
            writer.write_bit(false).unwrap(); // 0
            writer.write_bit(true).unwrap(); // 1
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0xB5]);
    }

    #[test]
    fn test_bitwriter_padding() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0b101, 3).unwrap();
            writer.write_bits(0b11001, 5).unwrap();
            writer.write_bits(0b11, 2).unwrap();
            writer.flush().unwrap();
            assert_eq!(writer.bits_written(), 10);
        }
        // 101_11001, 11_000000
        assert_eq!(output, vec![0xB9, 0xC0]);
    }

    #[test]
    fn test_bitwriter_full_word() {
        let writer = {
            let mut writer = BitWriter::new(Vec::new());
            writer.write_bits(0xFACE_8201, 32).unwrap();
            writer
        };
        assert_eq!(writer.into_inner().unwrap(), vec![0xFA, 0xCE, 0x82, 0x01]);
    }

    #[test]
    fn test_roundtrip() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0b101, 3).unwrap();
            writer.write_bits(0b1111, 4).unwrap();
            writer.write_bits(0b10, 2).unwrap();
            writer.write_bits(0b1_0000_0000, 9).unwrap();
            writer.write_bits(0xDEAD_BEEF, 32).unwrap();
            writer.flush().unwrap();
        }

        let mut reader = BitReader::new(Cursor::new(&output));
        assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
        assert_eq!(reader.read_bits(4).unwrap(), Some(0b1111));
        assert_eq!(reader.read_bits(2).unwrap(), Some(0b10));
        assert_eq!(reader.read_bits(9).unwrap(), Some(256));
        assert_eq!(reader.read_bits(32).unwrap(), Some(0xDEAD_BEEF));
    }

    #[test]
    fn test_trait_objects() {
        let mut writer = BitWriter::new(Vec::new());
        {
            let sink: &mut dyn BitSink = &mut writer;
            sink.write_bits(0b1, 1).unwrap();
            sink.close().unwrap();
            assert_eq!(sink.bits_written(), 1);
        }
        assert_eq!(writer.get_ref(), &vec![0x80]);
    }
}
