//! Big-endian cursors over byte buffers.
//!
//! [`ByteReader`] walks a borrowed slice and hands out sub-slices that live as
//! long as the input, which is what lets the parser build borrowed values.
//! [`ByteWriter`] appends to a growable buffer and can patch fixed-size words
//! it set aside earlier, which the region encoder uses for its header.
use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};

/// A read cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the cursor from the start of the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Move the cursor to an absolute offset. Seeking to exactly the end of
    /// the input is allowed.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::truncated(pos, self.data.len()));
        }
        self.pos = pos;
        Ok(())
    }

    /// Consume `n` bytes, returning them as a slice of the original input.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::truncated(n, self.remaining()));
        }
        let bs = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bs)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let mut bs = self.read_bytes(std::mem::size_of::<u16>())?;
        Ok(bs.read_u16::<BigEndian>()?)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let mut bs = self.read_bytes(std::mem::size_of::<i16>())?;
        Ok(bs.read_i16::<BigEndian>()?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut bs = self.read_bytes(std::mem::size_of::<u32>())?;
        Ok(bs.read_u32::<BigEndian>()?)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let mut bs = self.read_bytes(std::mem::size_of::<i32>())?;
        Ok(bs.read_i32::<BigEndian>()?)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let mut bs = self.read_bytes(std::mem::size_of::<u64>())?;
        Ok(bs.read_u64::<BigEndian>()?)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let mut bs = self.read_bytes(std::mem::size_of::<i64>())?;
        Ok(bs.read_i64::<BigEndian>()?)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let mut bs = self.read_bytes(std::mem::size_of::<f32>())?;
        Ok(bs.read_f32::<BigEndian>()?)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let mut bs = self.read_bytes(std::mem::size_of::<f64>())?;
        Ok(bs.read_f64::<BigEndian>()?)
    }

    /// Read a signed 32-bit element count. Negative counts are malformed.
    pub fn read_len(&mut self) -> Result<usize> {
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| Error::malformed(format!("negative length: {}", len)))
    }

    /// Read a u16 length followed by that many bytes.
    pub fn read_u16_prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u16()? as usize;
        self.read_bytes(len)
    }
}

/// Space set aside in a [`ByteWriter`] to be filled in later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    offset: usize,
    len: usize,
}

impl Reservation {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// An append-only big-endian writer over a growable buffer.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bytes(&mut self, bs: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(bs);
        Ok(())
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        Ok(self.buf.write_u8(v)?)
    }

    pub fn write_i8(&mut self, v: i8) -> Result<()> {
        Ok(self.buf.write_i8(v)?)
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        Ok(self.buf.write_u16::<BigEndian>(v)?)
    }

    pub fn write_i16(&mut self, v: i16) -> Result<()> {
        Ok(self.buf.write_i16::<BigEndian>(v)?)
    }

    pub fn write_u32(&mut self, v: u32) -> Result<()> {
        Ok(self.buf.write_u32::<BigEndian>(v)?)
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        Ok(self.buf.write_i32::<BigEndian>(v)?)
    }

    pub fn write_u64(&mut self, v: u64) -> Result<()> {
        Ok(self.buf.write_u64::<BigEndian>(v)?)
    }

    pub fn write_i64(&mut self, v: i64) -> Result<()> {
        Ok(self.buf.write_i64::<BigEndian>(v)?)
    }

    pub fn write_f32(&mut self, v: f32) -> Result<()> {
        Ok(self.buf.write_f32::<BigEndian>(v)?)
    }

    pub fn write_f64(&mut self, v: f64) -> Result<()> {
        Ok(self.buf.write_f64::<BigEndian>(v)?)
    }

    /// Write a u16 length followed by the bytes themselves.
    pub fn write_u16_prefixed(&mut self, bs: &[u8]) -> Result<()> {
        let len = u16::try_from(bs.len()).map_err(|_| {
            Error::malformed(format!("{} bytes do not fit a u16 length", bs.len()))
        })?;
        self.write_u16(len)?;
        self.write_bytes(bs)
    }

    /// Append `len` zero bytes and return a handle for patching them later.
    pub fn reserve(&mut self, len: usize) -> Reservation {
        let offset = self.buf.len();
        self.buf.resize(offset + len, 0);
        Reservation { offset, len }
    }

    /// Overwrite the `index`th big-endian u32 of a reservation.
    pub fn patch_u32(&mut self, reservation: Reservation, index: usize, v: u32) -> Result<()> {
        let start = index * std::mem::size_of::<u32>();
        let end = start + std::mem::size_of::<u32>();
        if end > reservation.len {
            return Err(Error::out_of_range(format!(
                "word {} lies outside a {} byte reservation",
                index, reservation.len
            )));
        }

        let at = reservation.offset + start;
        BigEndian::write_u32(&mut self.buf[at..at + 4], v);
        Ok(())
    }

    /// Zero-pad the buffer up to the next multiple of `multiple`.
    pub fn pad_to(&mut self, multiple: usize) {
        let rem = self.buf.len() % multiple;
        if rem != 0 {
            self.buf.resize(self.buf.len() + multiple - rem, 0);
        }
    }
}
