//! Bounds-checked little-endian cursor primitives.
//!
//! Every multi-byte quantity in a ROP buffer is little-endian. `ByteCursor`
//! reads from a borrowed slice and fails with
//! [`DecodeError::TruncatedBuffer`] when fewer bytes remain than required;
//! it never panics on malformed input. `ByteWriter` is the mirrored encoder
//! over a growable [`BytesMut`].

use crate::error::DecodeError;
use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

/// Read cursor over a byte slice. Advances only on successful reads.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::TruncatedBuffer {
                needed: n - self.remaining(),
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let b = self.take(8)?;
        Ok(u64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Reads a one-byte boolean restricted to 0x00/0x01.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        match self.read_u8()? {
            0x00 => Ok(false),
            0x01 => Ok(true),
            value => Err(DecodeError::InvalidDiscriminant {
                field: "boolean",
                value: value as u32,
            }),
        }
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        Ok(self.take(n)?.to_vec())
    }

    /// Reads a fixed-length array without allocating.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads a 16-byte GUID in little-endian wire layout.
    pub fn read_guid(&mut self) -> Result<Uuid, DecodeError> {
        Ok(Uuid::from_bytes_le(self.read_array::<16>()?))
    }

    /// Reads a null-terminated 8-bit character string, consuming the
    /// terminator. The terminator is not part of the returned string.
    pub fn read_null_terminated_ascii(&mut self) -> Result<String, DecodeError> {
        let rest = &self.buf[self.pos..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(DecodeError::UnterminatedString)?;
        let s = std::str::from_utf8(&rest[..nul]).map_err(|_| DecodeError::InvalidString8)?;
        self.pos += nul + 1;
        Ok(s.to_string())
    }

    /// Reads a null-terminated UTF-16LE string, consuming the two-byte
    /// terminator.
    pub fn read_null_terminated_unicode(&mut self) -> Result<String, DecodeError> {
        let rest = &self.buf[self.pos..];
        let mut units = Vec::new();
        let mut offset = 0;
        loop {
            if offset + 2 > rest.len() {
                return Err(DecodeError::UnterminatedString);
            }
            let unit = u16::from_le_bytes([rest[offset], rest[offset + 1]]);
            offset += 2;
            if unit == 0 {
                break;
            }
            units.push(unit);
        }
        let s = String::from_utf16(&units).map_err(|_| DecodeError::InvalidUtf16)?;
        self.pos += offset;
        Ok(s)
    }

    /// Returns the unread remainder without advancing.
    pub fn peek_rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Consumes and returns the unread remainder.
    pub fn read_rest(&mut self) -> Vec<u8> {
        let rest = self.buf[self.pos..].to_vec();
        self.pos = self.buf.len();
        rest
    }
}

/// Mirrored little-endian encoder. Writes cannot fail; the buffer grows.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: BytesMut,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(256),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.buf.put_u16_le(v);
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.put_u32_le(v);
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.put_u64_le(v);
    }

    pub fn write_i16(&mut self, v: i16) {
        self.buf.put_i16_le(v);
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.put_i32_le(v);
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.put_i64_le(v);
    }

    pub fn write_f32(&mut self, v: f32) {
        self.buf.put_u32_le(v.to_bits());
    }

    pub fn write_f64(&mut self, v: f64) {
        self.buf.put_u64_le(v.to_bits());
    }

    pub fn write_bool(&mut self, v: bool) {
        self.buf.put_u8(v as u8);
    }

    pub fn write_bytes(&mut self, v: &[u8]) {
        self.buf.put_slice(v);
    }

    pub fn write_guid(&mut self, v: &Uuid) {
        self.buf.put_slice(&v.to_bytes_le());
    }

    /// Writes an 8-bit character string plus its null terminator.
    pub fn write_null_terminated_ascii(&mut self, s: &str) {
        self.buf.put_slice(s.as_bytes());
        self.buf.put_u8(0);
    }

    /// Writes a UTF-16LE string plus its two-byte null terminator.
    pub fn write_null_terminated_unicode(&mut self, s: &str) {
        for unit in s.encode_utf16() {
            self.buf.put_u16_le(unit);
        }
        self.buf.put_u16_le(0);
    }

    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scalar_roundtrip() {
        let mut w = ByteWriter::new();
        w.write_u8(0xFE);
        w.write_u16(0xBABE);
        w.write_u32(0xDEAD_BEEF);
        w.write_u64(0x0102_0304_0506_0708);
        w.write_i32(-42);

        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(cur.read_u8().unwrap(), 0xFE);
        assert_eq!(cur.read_u16().unwrap(), 0xBABE);
        assert_eq!(cur.read_u32().unwrap(), 0xDEAD_BEEF);
        assert_eq!(cur.read_u64().unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(cur.read_i32().unwrap(), -42);
        assert!(cur.is_empty());
    }

    #[test]
    fn test_little_endian_layout() {
        let mut w = ByteWriter::new();
        w.write_u16(0x0102);
        w.write_u32(0x0304_0506);
        let bytes = w.into_bytes();
        assert_eq!(&bytes[..], &[0x02, 0x01, 0x06, 0x05, 0x04, 0x03]);
    }

    #[test]
    fn test_truncated_read() {
        let mut cur = ByteCursor::new(&[0x01, 0x02]);
        let err = cur.read_u32().unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedBuffer {
                needed: 2,
                remaining: 2
            }
        );
        // Failed read does not advance.
        assert_eq!(cur.position(), 0);
        assert_eq!(cur.read_u16().unwrap(), 0x0201);
    }

    #[test]
    fn test_null_terminated_ascii() {
        let mut cur = ByteCursor::new(b"INBOX\0tail");
        assert_eq!(cur.read_null_terminated_ascii().unwrap(), "INBOX");
        assert_eq!(cur.position(), 6);
    }

    #[test]
    fn test_unterminated_ascii() {
        let mut cur = ByteCursor::new(b"INBOX");
        assert_eq!(
            cur.read_null_terminated_ascii().unwrap_err(),
            DecodeError::UnterminatedString
        );
    }

    #[test]
    fn test_null_terminated_unicode() {
        let mut w = ByteWriter::new();
        w.write_null_terminated_unicode("IPM.Note");
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 2 * 8 + 2);

        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(cur.read_null_terminated_unicode().unwrap(), "IPM.Note");
        assert!(cur.is_empty());
    }

    #[test]
    fn test_guid_roundtrip() {
        let guid = Uuid::from_u128(0x0123_4567_89AB_CDEF_0011_2233_4455_6677);
        let mut w = ByteWriter::new();
        w.write_guid(&guid);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 16);

        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(cur.read_guid().unwrap(), guid);
    }

    #[test]
    fn test_bool_rejects_nonzero_values() {
        let mut cur = ByteCursor::new(&[0x02]);
        assert!(matches!(
            cur.read_bool(),
            Err(DecodeError::InvalidDiscriminant { field: "boolean", .. })
        ));
    }

    #[test]
    fn test_read_rest() {
        let mut cur = ByteCursor::new(&[1, 2, 3, 4]);
        cur.read_u8().unwrap();
        assert_eq!(cur.peek_rest(), &[2, 3, 4]);
        assert_eq!(cur.read_rest(), vec![2, 3, 4]);
        assert!(cur.is_empty());
    }

    proptest! {
        #[test]
        fn prop_u64_roundtrip(v: u64) {
            let mut w = ByteWriter::new();
            w.write_u64(v);
            let bytes = w.into_bytes();
            let mut cur = ByteCursor::new(&bytes);
            prop_assert_eq!(cur.read_u64().unwrap(), v);
        }

        #[test]
        fn prop_ascii_roundtrip(s in "[a-zA-Z0-9 ./=-]{0,64}") {
            let mut w = ByteWriter::new();
            w.write_null_terminated_ascii(&s);
            let bytes = w.into_bytes();
            let mut cur = ByteCursor::new(&bytes);
            prop_assert_eq!(cur.read_null_terminated_ascii().unwrap(), s);
        }

        #[test]
        fn prop_unicode_roundtrip(s in "\\PC{0,32}") {
            let mut w = ByteWriter::new();
            w.write_null_terminated_unicode(&s);
            let bytes = w.into_bytes();
            let mut cur = ByteCursor::new(&bytes);
            prop_assert_eq!(cur.read_null_terminated_unicode().unwrap(), s);
        }
    }
}
