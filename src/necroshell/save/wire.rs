//! Little-endian primitive encodings for the save payload.
//!
//! Integers are LSB-first, floats are written as the little-endian form of
//! their IEEE-754 bit pattern, bools are a single `0`/`1` byte, and strings
//! are a `u32` byte length followed by the raw bytes (UTF-8, no NUL).
//! Collections are a `u32` count followed by the elements in order.

use crate::save::engine::SaveError;
use std::io::Write;

/// Streams primitives into any sink and counts the bytes written, so the
/// engine can patch the payload length into the header afterwards.
pub struct SaveWriter<W: Write> {
    sink: W,
    written: u64,
}

impl<W: Write> SaveWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, written: 0 }
    }

    /// Payload bytes emitted so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn put(&mut self, bytes: &[u8]) -> Result<(), SaveError> {
        self.sink.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), SaveError> {
        self.put(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), SaveError> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), SaveError> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<(), SaveError> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_i16(&mut self, value: i16) -> Result<(), SaveError> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), SaveError> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<(), SaveError> {
        self.write_u32(value.to_bits())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<(), SaveError> {
        self.write_u64(value.to_bits())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), SaveError> {
        self.write_u8(value as u8)
    }

    pub fn write_string(&mut self, value: &str) -> Result<(), SaveError> {
        self.write_u32(value.len() as u32)?;
        self.put(value.as_bytes())
    }

    pub fn write_bytes(&mut self, value: &[u8]) -> Result<(), SaveError> {
        self.put(value)
    }
}

/// A cursor over a fully loaded, CRC-verified payload. Every read checks the
/// remaining length; running off the end is [`SaveError::ShortRead`].
pub struct SaveReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SaveReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], SaveError> {
        if self.remaining() < len {
            return Err(SaveError::ShortRead {
                wanted: len,
                available: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, SaveError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, SaveError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, SaveError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, SaveError> {
        let bytes = self.take(8)?;
        let mut le = [0u8; 8];
        le.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(le))
    }

    pub fn read_i16(&mut self) -> Result<i16, SaveError> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_i32(&mut self) -> Result<i32, SaveError> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_f32(&mut self) -> Result<f32, SaveError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, SaveError> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    pub fn read_bool(&mut self) -> Result<bool, SaveError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_string(&mut self) -> Result<String, SaveError> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| SaveError::Handler("string block is not valid UTF-8".to_string()))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], SaveError> {
        self.take(len)
    }
}
