//! Property value codec.

use super::{PropertyTag, PropertyType};
use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;
use uuid::Uuid;

/// A decoded property value. The variant always matches the
/// [`PropertyType`] it was decoded with.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    Integer16(i16),
    Integer32(i32),
    Floating32(f32),
    Floating64(f64),
    Currency(i64),
    FloatingTime(f64),
    ErrorCode(u32),
    Boolean(bool),
    /// Object values carry no wire data; the object travels by handle.
    Object,
    Integer64(i64),
    String8(String),
    Unicode(String),
    /// FILETIME: 100-nanosecond intervals since January 1, 1601.
    Time(u64),
    Guid(Uuid),
    /// Count-prefixed opaque server id blob.
    ServerId(Vec<u8>),
    /// Count-prefixed binary payload.
    Binary(Vec<u8>),
    MultipleInteger16(Vec<i16>),
    MultipleInteger32(Vec<i32>),
    MultipleFloating32(Vec<f32>),
    MultipleFloating64(Vec<f64>),
    MultipleCurrency(Vec<i64>),
    MultipleFloatingTime(Vec<f64>),
    MultipleInteger64(Vec<i64>),
    MultipleString8(Vec<String>),
    MultipleUnicode(Vec<String>),
    MultipleTime(Vec<u64>),
    MultipleGuid(Vec<Uuid>),
    MultipleBinary(Vec<Vec<u8>>),
}

fn read_counted<T>(
    cur: &mut ByteCursor<'_>,
    mut read: impl FnMut(&mut ByteCursor<'_>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    let count = cur.read_u16()? as usize;
    let mut out = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        out.push(read(cur)?);
    }
    Ok(out)
}

fn read_sized_bytes(cur: &mut ByteCursor<'_>) -> Result<Vec<u8>, DecodeError> {
    let size = cur.read_u16()? as usize;
    cur.read_bytes(size)
}

fn write_sized_bytes(bytes: &[u8], w: &mut ByteWriter) {
    w.write_u16(bytes.len() as u16);
    w.write_bytes(bytes);
}

impl PropertyValue {
    /// Decodes a value of the given type.
    pub fn decode(cur: &mut ByteCursor<'_>, ty: PropertyType) -> Result<Self, DecodeError> {
        Ok(match ty {
            PropertyType::Null => PropertyValue::Null,
            PropertyType::Integer16 => PropertyValue::Integer16(cur.read_i16()?),
            PropertyType::Integer32 => PropertyValue::Integer32(cur.read_i32()?),
            PropertyType::Floating32 => PropertyValue::Floating32(cur.read_f32()?),
            PropertyType::Floating64 => PropertyValue::Floating64(cur.read_f64()?),
            PropertyType::Currency => PropertyValue::Currency(cur.read_i64()?),
            PropertyType::FloatingTime => PropertyValue::FloatingTime(cur.read_f64()?),
            PropertyType::ErrorCode => PropertyValue::ErrorCode(cur.read_u32()?),
            PropertyType::Boolean => PropertyValue::Boolean(cur.read_bool()?),
            PropertyType::Object => PropertyValue::Object,
            PropertyType::Integer64 => PropertyValue::Integer64(cur.read_i64()?),
            PropertyType::String8 => PropertyValue::String8(cur.read_null_terminated_ascii()?),
            PropertyType::Unicode => PropertyValue::Unicode(cur.read_null_terminated_unicode()?),
            PropertyType::Time => PropertyValue::Time(cur.read_u64()?),
            PropertyType::Guid => PropertyValue::Guid(cur.read_guid()?),
            PropertyType::ServerId => PropertyValue::ServerId(read_sized_bytes(cur)?),
            PropertyType::Binary => PropertyValue::Binary(read_sized_bytes(cur)?),
            PropertyType::MultipleInteger16 => {
                PropertyValue::MultipleInteger16(read_counted(cur, |c| c.read_i16())?)
            }
            PropertyType::MultipleInteger32 => {
                PropertyValue::MultipleInteger32(read_counted(cur, |c| c.read_i32())?)
            }
            PropertyType::MultipleFloating32 => {
                PropertyValue::MultipleFloating32(read_counted(cur, |c| c.read_f32())?)
            }
            PropertyType::MultipleFloating64 => {
                PropertyValue::MultipleFloating64(read_counted(cur, |c| c.read_f64())?)
            }
            PropertyType::MultipleCurrency => {
                PropertyValue::MultipleCurrency(read_counted(cur, |c| c.read_i64())?)
            }
            PropertyType::MultipleFloatingTime => {
                PropertyValue::MultipleFloatingTime(read_counted(cur, |c| c.read_f64())?)
            }
            PropertyType::MultipleInteger64 => {
                PropertyValue::MultipleInteger64(read_counted(cur, |c| c.read_i64())?)
            }
            PropertyType::MultipleString8 => PropertyValue::MultipleString8(read_counted(
                cur,
                |c| c.read_null_terminated_ascii(),
            )?),
            PropertyType::MultipleUnicode => PropertyValue::MultipleUnicode(read_counted(
                cur,
                |c| c.read_null_terminated_unicode(),
            )?),
            PropertyType::MultipleTime => {
                PropertyValue::MultipleTime(read_counted(cur, |c| c.read_u64())?)
            }
            PropertyType::MultipleGuid => {
                PropertyValue::MultipleGuid(read_counted(cur, |c| c.read_guid())?)
            }
            PropertyType::MultipleBinary => {
                PropertyValue::MultipleBinary(read_counted(cur, read_sized_bytes)?)
            }
        })
    }

    /// Encodes the value. The structural inverse of [`PropertyValue::decode`].
    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            PropertyValue::Null | PropertyValue::Object => {}
            PropertyValue::Integer16(v) => w.write_i16(*v),
            PropertyValue::Integer32(v) => w.write_i32(*v),
            PropertyValue::Floating32(v) => w.write_f32(*v),
            PropertyValue::Floating64(v) => w.write_f64(*v),
            PropertyValue::Currency(v) => w.write_i64(*v),
            PropertyValue::FloatingTime(v) => w.write_f64(*v),
            PropertyValue::ErrorCode(v) => w.write_u32(*v),
            PropertyValue::Boolean(v) => w.write_bool(*v),
            PropertyValue::Integer64(v) => w.write_i64(*v),
            PropertyValue::String8(v) => w.write_null_terminated_ascii(v),
            PropertyValue::Unicode(v) => w.write_null_terminated_unicode(v),
            PropertyValue::Time(v) => w.write_u64(*v),
            PropertyValue::Guid(v) => w.write_guid(v),
            PropertyValue::ServerId(v) | PropertyValue::Binary(v) => write_sized_bytes(v, w),
            PropertyValue::MultipleInteger16(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| w.write_i16(*v));
            }
            PropertyValue::MultipleInteger32(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| w.write_i32(*v));
            }
            PropertyValue::MultipleFloating32(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| w.write_f32(*v));
            }
            PropertyValue::MultipleFloating64(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| w.write_f64(*v));
            }
            PropertyValue::MultipleCurrency(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| w.write_i64(*v));
            }
            PropertyValue::MultipleFloatingTime(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| w.write_f64(*v));
            }
            PropertyValue::MultipleInteger64(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| w.write_i64(*v));
            }
            PropertyValue::MultipleString8(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| w.write_null_terminated_ascii(v));
            }
            PropertyValue::MultipleUnicode(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| w.write_null_terminated_unicode(v));
            }
            PropertyValue::MultipleTime(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| w.write_u64(*v));
            }
            PropertyValue::MultipleGuid(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| w.write_guid(v));
            }
            PropertyValue::MultipleBinary(vs) => {
                w.write_u16(vs.len() as u16);
                vs.iter().for_each(|v| write_sized_bytes(v, w));
            }
        }
    }

    /// The property type this value encodes as.
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Null => PropertyType::Null,
            PropertyValue::Integer16(_) => PropertyType::Integer16,
            PropertyValue::Integer32(_) => PropertyType::Integer32,
            PropertyValue::Floating32(_) => PropertyType::Floating32,
            PropertyValue::Floating64(_) => PropertyType::Floating64,
            PropertyValue::Currency(_) => PropertyType::Currency,
            PropertyValue::FloatingTime(_) => PropertyType::FloatingTime,
            PropertyValue::ErrorCode(_) => PropertyType::ErrorCode,
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::Object => PropertyType::Object,
            PropertyValue::Integer64(_) => PropertyType::Integer64,
            PropertyValue::String8(_) => PropertyType::String8,
            PropertyValue::Unicode(_) => PropertyType::Unicode,
            PropertyValue::Time(_) => PropertyType::Time,
            PropertyValue::Guid(_) => PropertyType::Guid,
            PropertyValue::ServerId(_) => PropertyType::ServerId,
            PropertyValue::Binary(_) => PropertyType::Binary,
            PropertyValue::MultipleInteger16(_) => PropertyType::MultipleInteger16,
            PropertyValue::MultipleInteger32(_) => PropertyType::MultipleInteger32,
            PropertyValue::MultipleFloating32(_) => PropertyType::MultipleFloating32,
            PropertyValue::MultipleFloating64(_) => PropertyType::MultipleFloating64,
            PropertyValue::MultipleCurrency(_) => PropertyType::MultipleCurrency,
            PropertyValue::MultipleFloatingTime(_) => PropertyType::MultipleFloatingTime,
            PropertyValue::MultipleInteger64(_) => PropertyType::MultipleInteger64,
            PropertyValue::MultipleString8(_) => PropertyType::MultipleString8,
            PropertyValue::MultipleUnicode(_) => PropertyType::MultipleUnicode,
            PropertyValue::MultipleTime(_) => PropertyType::MultipleTime,
            PropertyValue::MultipleGuid(_) => PropertyType::MultipleGuid,
            PropertyValue::MultipleBinary(_) => PropertyType::MultipleBinary,
        }
    }
}

/// A property tag together with its value.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedPropertyValue {
    pub tag: PropertyTag,
    pub value: PropertyValue,
}

impl TaggedPropertyValue {
    pub fn new(tag: PropertyTag, value: PropertyValue) -> Self {
        Self { tag, value }
    }

    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let tag = PropertyTag::decode(cur)?;
        let value = PropertyValue::decode(cur, tag.property_type)?;
        Ok(Self { tag, value })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        self.tag.encode(w);
        self.value.encode(w);
    }

    /// Reads a u16 count followed by that many tagged values.
    pub fn decode_counted(cur: &mut ByteCursor<'_>) -> Result<Vec<Self>, DecodeError> {
        let count = cur.read_u16()? as usize;
        let mut values = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            values.push(Self::decode(cur)?);
        }
        Ok(values)
    }

    pub fn encode_counted(values: &[Self], w: &mut ByteWriter) {
        w.write_u16(values.len() as u16);
        for value in values {
            value.encode(w);
        }
    }
}

/// Reports a property that could not be set, deleted, or copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyProblem {
    /// Index into the tag array of the request that caused the problem.
    pub index: u16,
    pub tag: PropertyTag,
    pub error_code: u32,
}

impl PropertyProblem {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            index: cur.read_u16()?,
            tag: PropertyTag::decode(cur)?,
            error_code: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u16(self.index);
        self.tag.encode(w);
        w.write_u32(self.error_code);
    }

    pub fn decode_counted(cur: &mut ByteCursor<'_>) -> Result<Vec<Self>, DecodeError> {
        let count = cur.read_u16()? as usize;
        let mut problems = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            problems.push(Self::decode(cur)?);
        }
        Ok(problems)
    }

    pub fn encode_counted(problems: &[Self], w: &mut ByteWriter) {
        w.write_u16(problems.len() as u16);
        for problem in problems {
            problem.encode(w);
        }
    }
}

/// A named property: GUID plus either a numeric LID or a Unicode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyName {
    /// Kind 0x00: dispatch id under the property set GUID.
    Id { guid: Uuid, lid: u32 },
    /// Kind 0x01: string name under the property set GUID. The wire carries
    /// a one-byte size of the UTF-16 name bytes, no terminator.
    Name { guid: Uuid, name: String },
    /// Kind 0xFF: no name is associated with the property.
    None { guid: Uuid },
}

impl PropertyName {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let kind = cur.read_u8()?;
        let guid = cur.read_guid()?;
        match kind {
            0x00 => Ok(PropertyName::Id {
                guid,
                lid: cur.read_u32()?,
            }),
            0x01 => {
                let size = cur.read_u8()? as usize;
                if size % 2 != 0 {
                    return Err(DecodeError::InvalidUtf16);
                }
                let raw = cur.read_bytes(size)?;
                let units: Vec<u16> = raw
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                let name = String::from_utf16(&units).map_err(|_| DecodeError::InvalidUtf16)?;
                Ok(PropertyName::Name { guid, name })
            }
            0xFF => Ok(PropertyName::None { guid }),
            value => Err(DecodeError::InvalidDiscriminant {
                field: "PropertyName kind",
                value: value as u32,
            }),
        }
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            PropertyName::Id { guid, lid } => {
                w.write_u8(0x00);
                w.write_guid(guid);
                w.write_u32(*lid);
            }
            PropertyName::Name { guid, name } => {
                w.write_u8(0x01);
                w.write_guid(guid);
                let units: Vec<u16> = name.encode_utf16().collect();
                w.write_u8((units.len() * 2) as u8);
                for unit in units {
                    w.write_u16(unit);
                }
            }
            PropertyName::None { guid } => {
                w.write_u8(0xFF);
                w.write_guid(guid);
            }
        }
    }

    pub fn decode_counted(cur: &mut ByteCursor<'_>) -> Result<Vec<Self>, DecodeError> {
        let count = cur.read_u16()? as usize;
        let mut names = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            names.push(Self::decode(cur)?);
        }
        Ok(names)
    }

    pub fn encode_counted(names: &[Self], w: &mut ByteWriter) {
        w.write_u16(names.len() as u16);
        for name in names {
            name.encode(w);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roundtrip(value: &PropertyValue) -> PropertyValue {
        let mut w = ByteWriter::new();
        value.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        let decoded = PropertyValue::decode(&mut cur, value.property_type()).unwrap();
        assert!(cur.is_empty(), "trailing bytes after {value:?}");
        decoded
    }

    #[test]
    fn test_scalar_values_roundtrip() {
        let values = [
            PropertyValue::Null,
            PropertyValue::Integer16(-300),
            PropertyValue::Integer32(7_000_000),
            PropertyValue::Currency(-1),
            PropertyValue::ErrorCode(0x8004_010F),
            PropertyValue::Boolean(true),
            PropertyValue::Object,
            PropertyValue::Integer64(i64::MIN),
            PropertyValue::Time(0x01D9_C3A0_0000_0000),
            PropertyValue::Guid(Uuid::from_u128(42)),
        ];
        for value in values {
            assert_eq!(roundtrip(&value), value);
        }
    }

    #[test]
    fn test_no_data_types_encode_to_nothing() {
        for value in [PropertyValue::Null, PropertyValue::Object] {
            let mut w = ByteWriter::new();
            value.encode(&mut w);
            assert_eq!(w.len(), 0);
        }
    }

    #[test]
    fn test_string_values_roundtrip() {
        let values = [
            PropertyValue::String8("IPM.Note".to_string()),
            PropertyValue::Unicode("meeting agenda".to_string()),
            PropertyValue::MultipleString8(vec!["EX".to_string(), "SMTP".to_string()]),
            PropertyValue::MultipleUnicode(vec!["one".to_string(), String::new()]),
        ];
        for value in values {
            assert_eq!(roundtrip(&value), value);
        }
    }

    #[test]
    fn test_binary_values_roundtrip() {
        let values = [
            PropertyValue::Binary(vec![0xDE, 0xAD, 0xBE, 0xEF]),
            PropertyValue::Binary(Vec::new()),
            PropertyValue::ServerId(vec![0x01; 21]),
            PropertyValue::MultipleBinary(vec![vec![1, 2], Vec::new(), vec![3]]),
            PropertyValue::MultipleGuid(vec![Uuid::from_u128(1), Uuid::from_u128(2)]),
            PropertyValue::MultipleInteger64(vec![1, -2, 3]),
            PropertyValue::MultipleTime(vec![0, u64::MAX]),
        ];
        for value in values {
            assert_eq!(roundtrip(&value), value);
        }
    }

    #[test]
    fn test_binary_is_length_prefixed() {
        let mut w = ByteWriter::new();
        PropertyValue::Binary(vec![0xAA, 0xBB]).encode(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(&bytes[..], &[0x02, 0x00, 0xAA, 0xBB]);
    }

    #[test]
    fn test_truncated_value_fails() {
        let mut cur = ByteCursor::new(&[0x05, 0x00, 0xAA]);
        // Binary claims 5 bytes, only 1 present.
        assert!(matches!(
            PropertyValue::decode(&mut cur, PropertyType::Binary),
            Err(DecodeError::TruncatedBuffer { .. })
        ));
    }

    #[test]
    fn test_tagged_value_roundtrip() {
        let tagged = TaggedPropertyValue::new(
            PropertyTag::new(PropertyType::Unicode, 0x0037),
            PropertyValue::Unicode("subject".to_string()),
        );
        let mut w = ByteWriter::new();
        tagged.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(TaggedPropertyValue::decode(&mut cur).unwrap(), tagged);
    }

    #[test]
    fn test_property_problem_roundtrip() {
        let problems = vec![
            PropertyProblem {
                index: 0,
                tag: PropertyTag::new(PropertyType::Binary, 0x0FFF),
                error_code: 0x8004_0102,
            },
            PropertyProblem {
                index: 3,
                tag: PropertyTag::new(PropertyType::Unicode, 0x0037),
                error_code: 0x8004_0108,
            },
        ];
        let mut w = ByteWriter::new();
        PropertyProblem::encode_counted(&problems, &mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(PropertyProblem::decode_counted(&mut cur).unwrap(), problems);
    }

    #[test]
    fn test_property_name_forms() {
        let guid = Uuid::from_u128(0xABCD);
        let names = vec![
            PropertyName::Id { guid, lid: 0x8102 },
            PropertyName::Name {
                guid,
                name: "Keywords".to_string(),
            },
            PropertyName::None { guid },
        ];
        let mut w = ByteWriter::new();
        PropertyName::encode_counted(&names, &mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(PropertyName::decode_counted(&mut cur).unwrap(), names);
    }

    #[test]
    fn test_property_name_bad_kind() {
        let mut w = ByteWriter::new();
        w.write_u8(0x02);
        w.write_guid(&Uuid::nil());
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert!(matches!(
            PropertyName::decode(&mut cur),
            Err(DecodeError::InvalidDiscriminant { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_int64_roundtrip(v: i64) {
            let value = PropertyValue::Integer64(v);
            prop_assert_eq!(roundtrip(&value), value);
        }

        #[test]
        fn prop_binary_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let value = PropertyValue::Binary(data);
            prop_assert_eq!(roundtrip(&value), value);
        }

        #[test]
        fn prop_multi_int32_roundtrip(vs in proptest::collection::vec(any::<i32>(), 0..64)) {
            let value = PropertyValue::MultipleInteger32(vs);
            prop_assert_eq!(roundtrip(&value), value);
        }
    }
}
