//! Core traits for bit-level stream access.
//!
//! The codec never touches `Read`/`Write` directly. It talks to a
//! [`BitSource`] and a [`BitSink`], and compression additionally needs a
//! [`Rewind`]-able source because it makes two full passes over its input.
//! [`BitReader`](crate::BitReader) and [`BitWriter`](crate::BitWriter)
//! are the standard implementations.

use crate::error::Result;

/// A readable stream of bits.
pub trait BitSource {
    /// Read the next `count` bits (at most 32), most significant first.
    ///
    /// Returns `Ok(None)` when the stream holds fewer than `count` bits.
    fn read_bits(&mut self, count: u8) -> Result<Option<u32>>;

    /// Total number of bits consumed so far.
    fn bits_read(&self) -> u64;

    /// Read a single bit, `None` at end of stream.
    fn read_bit(&mut self) -> Result<Option<bool>> {
        Ok(self.read_bits(1)?.map(|bit| bit != 0))
    }
}

/// A bit source that can be repositioned at its start.
pub trait Rewind: BitSource {
    /// Reposition at the first bit and clear the bit counter.
    fn reset(&mut self) -> Result<()>;
}

/// A writable stream of bits.
pub trait BitSink {
    /// Write the low `count` bits (at most 32) of `value`, most significant
    /// first.
    fn write_bits(&mut self, value: u32, count: u8) -> Result<()>;

    /// Pad the final partial byte with zero bits and flush.
    fn close(&mut self) -> Result<()>;

    /// Total number of bits written so far, padding excluded.
    fn bits_written(&self) -> u64;

    /// Write a single bit.
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }
}

impl<T: BitSource + ?Sized> BitSource for &mut T {
    fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        (**self).read_bits(count)
    }

    fn bits_read(&self) -> u64 {
        (**self).bits_read()
    }
}

impl<T: Rewind + ?Sized> Rewind for &mut T {
    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }
}

impl<T: BitSink + ?Sized> BitSink for &mut T {
    fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        (**self).write_bits(value, count)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn bits_written(&self) -> u64 {
        (**self).bits_written()
    }
}
