//! Read-side primitives shared by the parser.
//!
//! Keeping these on a small wrapper type keeps the state machine in
//! [`crate::parser`] free of byte plumbing: it asks for tags, scalars,
//! strings and arrays and never touches the reader directly.

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use crate::codec;
use crate::error::{Error, Result};
use crate::Tag;

pub(crate) struct Input<R> {
    reader: R,
}

impl<R: Read> Input<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read one tag byte. Bytes outside the tag range are an error.
    pub(crate) fn read_tag(&mut self, context: &str) -> Result<Tag> {
        let byte = self.reader.read_u8()?;
        Tag::try_from(byte).map_err(|_| Error::unknown_tag(byte, context))
    }

    /// Like [`read_tag`](Self::read_tag), but a clean end of input at the
    /// tag boundary yields `None` instead of an error.
    pub(crate) fn try_read_tag(&mut self, context: &str) -> Result<Option<Tag>> {
        match self.reader.read_u8() {
            Ok(byte) => Tag::try_from(byte)
                .map(Some)
                .map_err(|_| Error::unknown_tag(byte, context)),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn read_i8(&mut self) -> Result<i8> {
        Ok(self.reader.read_i8()?)
    }

    pub(crate) fn read_i16(&mut self) -> Result<i16> {
        Ok(self.reader.read_i16::<BigEndian>()?)
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32> {
        Ok(self.reader.read_i32::<BigEndian>()?)
    }

    pub(crate) fn read_i64(&mut self) -> Result<i64> {
        Ok(self.reader.read_i64::<BigEndian>()?)
    }

    pub(crate) fn read_f32(&mut self) -> Result<f32> {
        let mut buf = [0u8; 4];
        self.reader.read_exact(&mut buf)?;
        Ok(codec::read_f32_be(buf))
    }

    pub(crate) fn read_f64(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        self.reader.read_exact(&mut buf)?;
        Ok(codec::read_f64_be(buf))
    }

    /// A u16-length-prefixed string. The game writes Java's modified
    /// UTF-8, which plain UTF-8 is a subset of.
    pub(crate) fn read_string(&mut self) -> Result<String> {
        let mut prefix = [0u8; 2];
        self.reader.read_exact(&mut prefix)?;
        let len = codec::read_u16_be(prefix) as usize;

        let mut buf = vec![0u8; len];
        self.reader.read_exact(&mut buf)?;

        Ok(cesu8::from_java_cesu8(&buf)
            .map_err(|_| Error::corrupt("string data is not modified UTF-8"))?
            .into_owned())
    }

    /// An i32 count prefix for arrays and lists. Negative counts are
    /// treated as zero.
    pub(crate) fn read_count(&mut self) -> Result<usize> {
        Ok(self.read_i32()?.max(0) as usize)
    }

    pub(crate) fn read_byte_array(&mut self) -> Result<Vec<i8>> {
        let count = self.read_count()?;
        let mut buf = vec![0u8; count];
        self.reader.read_exact(&mut buf)?;
        Ok(buf.iter().map(|&b| b as i8).collect())
    }

    pub(crate) fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let count = self.read_count()?;
        let mut buf = vec![0u8; count * 4];
        self.reader.read_exact(&mut buf)?;

        let mut values = Vec::with_capacity(count);
        for chunk in buf.chunks_exact(4) {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(chunk);
            values.push(codec::read_u32_be(raw) as i32);
        }
        Ok(values)
    }

    pub(crate) fn read_long_array(&mut self) -> Result<Vec<i64>> {
        let count = self.read_count()?;
        let mut buf = vec![0u8; count * 8];
        self.reader.read_exact(&mut buf)?;

        let mut values = Vec::with_capacity(count);
        for chunk in buf.chunks_exact(8) {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            values.push(codec::read_u64_be(raw) as i64);
        }
        Ok(values)
    }
}
