//! Property tag, value, and row codecs.
//!
//! Property values are self-describing only through their
//! [`PropertyType`]: fixed-size scalars read a fixed byte count, strings
//! are null-terminated, binary payloads are count-prefixed, and the
//! multi-valued forms wrap a u16 element count around the scalar layouts.
//! Rows are not self-describing at all - they are decoded against the
//! column schema negotiated by the table operation that produced them.

mod row;
mod value;

pub use row::{FlaggedPropertyValue, PropertyRow, PropertyRowSet};
pub use value::{PropertyName, PropertyProblem, PropertyValue, TaggedPropertyValue};

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;

/// Property data types that can appear on the wire.
///
/// The values are the 16-bit type discriminants from the property encoding
/// specification; the 0x1000 bit marks the multi-valued forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PropertyType {
    Null = 0x0001,
    Integer16 = 0x0002,
    Integer32 = 0x0003,
    Floating32 = 0x0004,
    Floating64 = 0x0005,
    Currency = 0x0006,
    FloatingTime = 0x0007,
    ErrorCode = 0x000A,
    Boolean = 0x000B,
    Object = 0x000D,
    Integer64 = 0x0014,
    String8 = 0x001E,
    Unicode = 0x001F,
    Time = 0x0040,
    Guid = 0x0048,
    ServerId = 0x00FB,
    Binary = 0x0102,
    MultipleInteger16 = 0x1002,
    MultipleInteger32 = 0x1003,
    MultipleFloating32 = 0x1004,
    MultipleFloating64 = 0x1005,
    MultipleCurrency = 0x1006,
    MultipleFloatingTime = 0x1007,
    MultipleInteger64 = 0x1014,
    MultipleString8 = 0x101E,
    MultipleUnicode = 0x101F,
    MultipleTime = 0x1040,
    MultipleGuid = 0x1048,
    MultipleBinary = 0x1102,
}

impl TryFrom<u16> for PropertyType {
    type Error = DecodeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x0001 => Ok(PropertyType::Null),
            0x0002 => Ok(PropertyType::Integer16),
            0x0003 => Ok(PropertyType::Integer32),
            0x0004 => Ok(PropertyType::Floating32),
            0x0005 => Ok(PropertyType::Floating64),
            0x0006 => Ok(PropertyType::Currency),
            0x0007 => Ok(PropertyType::FloatingTime),
            0x000A => Ok(PropertyType::ErrorCode),
            0x000B => Ok(PropertyType::Boolean),
            0x000D => Ok(PropertyType::Object),
            0x0014 => Ok(PropertyType::Integer64),
            0x001E => Ok(PropertyType::String8),
            0x001F => Ok(PropertyType::Unicode),
            0x0040 => Ok(PropertyType::Time),
            0x0048 => Ok(PropertyType::Guid),
            0x00FB => Ok(PropertyType::ServerId),
            0x0102 => Ok(PropertyType::Binary),
            0x1002 => Ok(PropertyType::MultipleInteger16),
            0x1003 => Ok(PropertyType::MultipleInteger32),
            0x1004 => Ok(PropertyType::MultipleFloating32),
            0x1005 => Ok(PropertyType::MultipleFloating64),
            0x1006 => Ok(PropertyType::MultipleCurrency),
            0x1007 => Ok(PropertyType::MultipleFloatingTime),
            0x1014 => Ok(PropertyType::MultipleInteger64),
            0x101E => Ok(PropertyType::MultipleString8),
            0x101F => Ok(PropertyType::MultipleUnicode),
            0x1040 => Ok(PropertyType::MultipleTime),
            0x1048 => Ok(PropertyType::MultipleGuid),
            0x1102 => Ok(PropertyType::MultipleBinary),
            other => Err(DecodeError::UnknownPropertyType(other)),
        }
    }
}

impl PropertyType {
    /// Whether this is one of the 0x1000-flagged multi-valued forms.
    pub fn is_multi_valued(&self) -> bool {
        (*self as u16) & 0x1000 != 0
    }
}

/// A property tag: type discriminant followed by the property id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyTag {
    pub property_type: PropertyType,
    pub property_id: u16,
}

impl PropertyTag {
    pub fn new(property_type: PropertyType, property_id: u16) -> Self {
        Self {
            property_type,
            property_id,
        }
    }

    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let property_type = PropertyType::try_from(cur.read_u16()?)?;
        let property_id = cur.read_u16()?;
        Ok(Self {
            property_type,
            property_id,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u16(self.property_type as u16);
        w.write_u16(self.property_id);
    }

    /// Reads a u16 count followed by that many tags.
    pub fn decode_counted(cur: &mut ByteCursor<'_>) -> Result<Vec<Self>, DecodeError> {
        let count = cur.read_u16()? as usize;
        let mut tags = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            tags.push(Self::decode(cur)?);
        }
        Ok(tags)
    }

    /// Writes a u16 count followed by the tags.
    pub fn encode_counted(tags: &[Self], w: &mut ByteWriter) {
        w.write_u16(tags.len() as u16);
        for tag in tags {
            tag.encode(w);
        }
    }
}

/// String forms used by subject prefixes and similar compacted strings.
///
/// The leading type byte decides whether any string data follows at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedString {
    /// 0x00 - no string is present.
    None,
    /// 0x01 - the string is present but empty.
    Empty,
    /// 0x02 - null-terminated 8-bit character string.
    String8(String),
    /// 0x03 - null-terminated reduced Unicode string (8-bit on the wire).
    ReducedUnicode(String),
    /// 0x04 - null-terminated UTF-16LE string.
    Unicode(String),
}

impl TypedString {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        match cur.read_u8()? {
            0x00 => Ok(TypedString::None),
            0x01 => Ok(TypedString::Empty),
            0x02 => Ok(TypedString::String8(cur.read_null_terminated_ascii()?)),
            0x03 => Ok(TypedString::ReducedUnicode(cur.read_null_terminated_ascii()?)),
            0x04 => Ok(TypedString::Unicode(cur.read_null_terminated_unicode()?)),
            value => Err(DecodeError::InvalidDiscriminant {
                field: "StringType",
                value: value as u32,
            }),
        }
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            TypedString::None => w.write_u8(0x00),
            TypedString::Empty => w.write_u8(0x01),
            TypedString::String8(s) => {
                w.write_u8(0x02);
                w.write_null_terminated_ascii(s);
            }
            TypedString::ReducedUnicode(s) => {
                w.write_u8(0x03);
                w.write_null_terminated_ascii(s);
            }
            TypedString::Unicode(s) => {
                w.write_u8(0x04);
                w.write_null_terminated_unicode(s);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_roundtrip() {
        for raw in [0x0002u16, 0x001E, 0x0040, 0x0102, 0x101F, 0x1102] {
            let ty = PropertyType::try_from(raw).unwrap();
            assert_eq!(ty as u16, raw);
        }
        assert_eq!(
            PropertyType::try_from(0x00FE).unwrap_err(),
            DecodeError::UnknownPropertyType(0x00FE)
        );
    }

    #[test]
    fn test_multi_valued_flag() {
        assert!(PropertyType::MultipleBinary.is_multi_valued());
        assert!(PropertyType::MultipleString8.is_multi_valued());
        assert!(!PropertyType::Binary.is_multi_valued());
        assert!(!PropertyType::Boolean.is_multi_valued());
    }

    #[test]
    fn test_tag_wire_order_is_type_then_id() {
        let tag = PropertyTag::new(PropertyType::Integer64, 0x6748);
        let mut w = ByteWriter::new();
        tag.encode(&mut w);
        let bytes = w.into_bytes();
        // PropertyType 0x0014 first, PropertyId 0x6748 second.
        assert_eq!(&bytes[..], &[0x14, 0x00, 0x48, 0x67]);

        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(PropertyTag::decode(&mut cur).unwrap(), tag);
    }

    #[test]
    fn test_counted_tags_roundtrip() {
        let tags = vec![
            PropertyTag::new(PropertyType::Integer64, 0x6748),
            PropertyTag::new(PropertyType::String8, 0x001A),
            PropertyTag::new(PropertyType::Time, 0x3008),
        ];
        let mut w = ByteWriter::new();
        PropertyTag::encode_counted(&tags, &mut w);
        let bytes = w.into_bytes();

        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(PropertyTag::decode_counted(&mut cur).unwrap(), tags);
    }

    #[test]
    fn test_typed_string_forms() {
        let cases = [
            TypedString::None,
            TypedString::Empty,
            TypedString::String8("RE: ".to_string()),
            TypedString::ReducedUnicode("FW: ".to_string()),
            TypedString::Unicode("status report".to_string()),
        ];
        for case in cases {
            let mut w = ByteWriter::new();
            case.encode(&mut w);
            let bytes = w.into_bytes();
            let mut cur = ByteCursor::new(&bytes);
            assert_eq!(TypedString::decode(&mut cur).unwrap(), case);
            assert!(cur.is_empty());
        }
    }

    #[test]
    fn test_typed_string_no_data_forms_are_one_byte() {
        let mut w = ByteWriter::new();
        TypedString::None.encode(&mut w);
        assert_eq!(w.len(), 1);

        let mut w = ByteWriter::new();
        TypedString::Empty.encode(&mut w);
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn test_typed_string_bad_discriminant() {
        let mut cur = ByteCursor::new(&[0x07]);
        assert!(matches!(
            TypedString::decode(&mut cur),
            Err(DecodeError::InvalidDiscriminant {
                field: "StringType",
                ..
            })
        ));
    }
}
