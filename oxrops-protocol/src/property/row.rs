//! Property row codec.
//!
//! Rows carry one value per column of a previously negotiated schema, in
//! column order, with no count of their own - the schema is the only thing
//! that makes them decodable. A leading flag byte distinguishes the two row
//! forms: 0x00 standard (plain values) and 0x01 flagged (every value is
//! prefixed by a presence flag).

use super::{PropertyTag, PropertyValue};
use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;

/// A value slot in a flagged row.
#[derive(Debug, Clone, PartialEq)]
pub enum FlaggedPropertyValue {
    /// 0x00 - the value is present.
    Present(PropertyValue),
    /// 0x01 - the value is absent; nothing follows the flag.
    Unavailable,
    /// 0x0A - the value could not be produced; an error code follows.
    Error(u32),
}

impl FlaggedPropertyValue {
    fn decode(cur: &mut ByteCursor<'_>, column: &PropertyTag) -> Result<Self, DecodeError> {
        match cur.read_u8()? {
            0x00 => Ok(FlaggedPropertyValue::Present(PropertyValue::decode(
                cur,
                column.property_type,
            )?)),
            0x01 => Ok(FlaggedPropertyValue::Unavailable),
            0x0A => Ok(FlaggedPropertyValue::Error(cur.read_u32()?)),
            value => Err(DecodeError::InvalidDiscriminant {
                field: "FlaggedPropertyValue flag",
                value: value as u32,
            }),
        }
    }

    fn encode(&self, w: &mut ByteWriter) {
        match self {
            FlaggedPropertyValue::Present(value) => {
                w.write_u8(0x00);
                value.encode(w);
            }
            FlaggedPropertyValue::Unavailable => w.write_u8(0x01),
            FlaggedPropertyValue::Error(code) => {
                w.write_u8(0x0A);
                w.write_u32(*code);
            }
        }
    }
}

/// A property row aligned 1:1 with a column schema.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyRow {
    Standard(Vec<PropertyValue>),
    Flagged(Vec<FlaggedPropertyValue>),
}

impl PropertyRow {
    /// Decodes a row against the column schema, reading exactly one value
    /// per column in column order.
    pub fn decode(cur: &mut ByteCursor<'_>, columns: &[PropertyTag]) -> Result<Self, DecodeError> {
        match cur.read_u8()? {
            0x00 => {
                let mut values = Vec::with_capacity(columns.len());
                for column in columns {
                    values.push(PropertyValue::decode(cur, column.property_type)?);
                }
                Ok(PropertyRow::Standard(values))
            }
            0x01 => {
                let mut values = Vec::with_capacity(columns.len());
                for column in columns {
                    values.push(FlaggedPropertyValue::decode(cur, column)?);
                }
                Ok(PropertyRow::Flagged(values))
            }
            value => Err(DecodeError::InvalidDiscriminant {
                field: "PropertyRow flag",
                value: value as u32,
            }),
        }
    }

    /// Encodes the row. Fails if the value count does not match the schema.
    pub fn encode(&self, columns: &[PropertyTag], w: &mut ByteWriter) -> Result<(), DecodeError> {
        if self.len() != columns.len() {
            return Err(DecodeError::ColumnCountMismatch {
                expected: columns.len(),
                actual: self.len(),
            });
        }
        match self {
            PropertyRow::Standard(values) => {
                w.write_u8(0x00);
                for value in values {
                    value.encode(w);
                }
            }
            PropertyRow::Flagged(values) => {
                w.write_u8(0x01);
                for value in values {
                    value.encode(w);
                }
            }
        }
        Ok(())
    }

    /// Number of value slots in the row.
    pub fn len(&self) -> usize {
        match self {
            PropertyRow::Standard(values) => values.len(),
            PropertyRow::Flagged(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An ordered set of rows sharing one column schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyRowSet {
    pub rows: Vec<PropertyRow>,
}

impl PropertyRowSet {
    pub fn new(rows: Vec<PropertyRow>) -> Self {
        Self { rows }
    }

    /// Decodes exactly `count` rows against the schema.
    pub fn decode(
        cur: &mut ByteCursor<'_>,
        columns: &[PropertyTag],
        count: usize,
    ) -> Result<Self, DecodeError> {
        let mut rows = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            rows.push(PropertyRow::decode(cur, columns)?);
        }
        Ok(Self { rows })
    }

    pub fn encode(&self, columns: &[PropertyTag], w: &mut ByteWriter) -> Result<(), DecodeError> {
        for row in &self.rows {
            row.encode(columns, w)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
