//! Property ROPs: get/set/delete, named-property mapping, copy, and
//! asynchronous progress.

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::{status, DecodeError};
use crate::property::{
    PropertyName, PropertyProblem, PropertyRow, PropertyTag, TaggedPropertyValue,
};
use uuid::Uuid;

/// RopGetPropertiesSpecific request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPropertiesSpecificRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub property_size_limit: u16,
    pub want_unicode: u16,
    pub property_tags: Vec<PropertyTag>,
}

impl GetPropertiesSpecificRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            property_size_limit: cur.read_u16()?,
            want_unicode: cur.read_u16()?,
            property_tags: PropertyTag::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u16(self.property_size_limit);
        w.write_u16(self.want_unicode);
        PropertyTag::encode_counted(&self.property_tags, w);
    }
}

/// RopGetPropertiesSpecific response. The row decodes against the tags
/// of the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum GetPropertiesSpecificResponse {
    Success {
        input_handle_index: u8,
        row: PropertyRow,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetPropertiesSpecificResponse {
    pub fn decode(
        cur: &mut ByteCursor<'_>,
        columns: &[PropertyTag],
    ) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        Ok(Self::Success {
            input_handle_index,
            row: PropertyRow::decode(cur, columns)?,
        })
    }

    pub fn encode(&self, columns: &[PropertyTag], w: &mut ByteWriter) -> Result<(), DecodeError> {
        match self {
            Self::Success {
                input_handle_index,
                row,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                row.encode(columns, w)
            }
            Self::Failure {
                input_handle_index,
                return_value,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(*return_value);
                Ok(())
            }
        }
    }
}

/// RopGetPropertiesAll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetPropertiesAllRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub property_size_limit: u16,
    pub want_unicode: u16,
}

impl GetPropertiesAllRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            property_size_limit: cur.read_u16()?,
            want_unicode: cur.read_u16()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u16(self.property_size_limit);
        w.write_u16(self.want_unicode);
    }
}

/// RopGetPropertiesAll response.
#[derive(Debug, Clone, PartialEq)]
pub enum GetPropertiesAllResponse {
    Success {
        input_handle_index: u8,
        property_values: Vec<TaggedPropertyValue>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetPropertiesAllResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        Ok(Self::Success {
            input_handle_index,
            property_values: TaggedPropertyValue::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                property_values,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                TaggedPropertyValue::encode_counted(property_values, w);
            }
            Self::Failure {
                input_handle_index,
                return_value,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

/// Request shape shared by RopGetPropertiesList and other header-only
/// property requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyHeaderRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
}

impl PropertyHeaderRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
    }
}

/// RopGetPropertiesList response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetPropertiesListResponse {
    Success {
        input_handle_index: u8,
        property_tags: Vec<PropertyTag>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetPropertiesListResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        Ok(Self::Success {
            input_handle_index,
            property_tags: PropertyTag::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                property_tags,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                PropertyTag::encode_counted(property_tags, w);
            }
            Self::Failure {
                input_handle_index,
                return_value,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

/// RopSetProperties request. RopSetPropertiesNoReplicate shares the
/// layout. The leading size field covers the count and the value bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct SetPropertiesRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub property_values: Vec<TaggedPropertyValue>,
}

impl SetPropertiesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let declared = cur.read_u16()? as usize;
        let before = cur.remaining();
        let property_values = TaggedPropertyValue::decode_counted(cur)?;
        let consumed = before - cur.remaining();
        if consumed != declared {
            return Err(DecodeError::SizeMismatch {
                field: "PropertyValues",
                declared,
                actual: consumed,
            });
        }
        Ok(Self {
            logon_id,
            input_handle_index,
            property_values,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        let mut body = ByteWriter::new();
        TaggedPropertyValue::encode_counted(&self.property_values, &mut body);
        let body = body.into_bytes();
        w.write_u16(body.len() as u16);
        w.write_bytes(&body);
    }
}

/// Response shape shared by the property ROPs that report a problem list
/// (RopSetProperties, RopDeleteProperties, and their NoReplicate forms).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyProblemsResponse {
    Success {
        input_handle_index: u8,
        problems: Vec<PropertyProblem>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl PropertyProblemsResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        Ok(Self::Success {
            input_handle_index,
            problems: PropertyProblem::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                problems,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                PropertyProblem::encode_counted(problems, w);
            }
            Self::Failure {
                input_handle_index,
                return_value,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

/// RopDeleteProperties request. RopDeletePropertiesNoReplicate shares
/// the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePropertiesRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub property_tags: Vec<PropertyTag>,
}

impl DeletePropertiesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            property_tags: PropertyTag::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        PropertyTag::encode_counted(&self.property_tags, w);
    }
}

/// RopQueryNamedProperties request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryNamedPropertiesRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub query_flags: u8,
    pub property_guid: Option<Uuid>,
}

impl QueryNamedPropertiesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let query_flags = cur.read_u8()?;
        let has_guid = cur.read_bool()?;
        let property_guid = if has_guid {
            Some(cur.read_guid()?)
        } else {
            None
        };
        Ok(Self {
            logon_id,
            input_handle_index,
            query_flags,
            property_guid,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.query_flags);
        w.write_bool(self.property_guid.is_some());
        if let Some(guid) = &self.property_guid {
            w.write_guid(guid);
        }
    }
}

/// RopQueryNamedProperties response: parallel id and name arrays under
/// one count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNamedPropertiesResponse {
    Success {
        input_handle_index: u8,
        property_ids: Vec<u16>,
        property_names: Vec<PropertyName>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl QueryNamedPropertiesResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let count = cur.read_u16()? as usize;
        let mut property_ids = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            property_ids.push(cur.read_u16()?);
        }
        let mut property_names = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            property_names.push(PropertyName::decode(cur)?);
        }
        Ok(Self::Success {
            input_handle_index,
            property_ids,
            property_names,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) -> Result<(), DecodeError> {
        match self {
            Self::Success {
                input_handle_index,
                property_ids,
                property_names,
            } => {
                if property_ids.len() != property_names.len() {
                    return Err(DecodeError::ColumnCountMismatch {
                        expected: property_ids.len(),
                        actual: property_names.len(),
                    });
                }
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u16(property_ids.len() as u16);
                for id in property_ids {
                    w.write_u16(*id);
                }
                for name in property_names {
                    name.encode(w);
                }
                Ok(())
            }
            Self::Failure {
                input_handle_index,
                return_value,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(*return_value);
                Ok(())
            }
        }
    }
}

/// RopCopyProperties request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPropertiesRequest {
    pub logon_id: u8,
    pub source_handle_index: u8,
    pub dest_handle_index: u8,
    pub want_asynchronous: bool,
    pub copy_flags: u8,
    pub property_tags: Vec<PropertyTag>,
}

impl CopyPropertiesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            source_handle_index: cur.read_u8()?,
            dest_handle_index: cur.read_u8()?,
            want_asynchronous: cur.read_bool()?,
            copy_flags: cur.read_u8()?,
            property_tags: PropertyTag::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.source_handle_index);
        w.write_u8(self.dest_handle_index);
        w.write_bool(self.want_asynchronous);
        w.write_u8(self.copy_flags);
        PropertyTag::encode_counted(&self.property_tags, w);
    }
}

/// RopCopyTo request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyToRequest {
    pub logon_id: u8,
    pub source_handle_index: u8,
    pub dest_handle_index: u8,
    pub want_asynchronous: bool,
    pub want_sub_objects: bool,
    pub copy_flags: u8,
    pub excluded_tags: Vec<PropertyTag>,
}

impl CopyToRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            source_handle_index: cur.read_u8()?,
            dest_handle_index: cur.read_u8()?,
            want_asynchronous: cur.read_bool()?,
            want_sub_objects: cur.read_bool()?,
            copy_flags: cur.read_u8()?,
            excluded_tags: PropertyTag::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.source_handle_index);
        w.write_u8(self.dest_handle_index);
        w.write_bool(self.want_asynchronous);
        w.write_bool(self.want_sub_objects);
        w.write_u8(self.copy_flags);
        PropertyTag::encode_counted(&self.excluded_tags, w);
    }
}

/// Response shape shared by RopCopyProperties and RopCopyTo: a problem
/// list on success, the echoed destination handle on the null-destination
/// failure, and a bare header otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyPropertiesResponse {
    Success {
        source_handle_index: u8,
        problems: Vec<PropertyProblem>,
    },
    NullDestination {
        source_handle_index: u8,
        dest_handle_index: u32,
    },
    Failure {
        source_handle_index: u8,
        return_value: u32,
    },
}

impl CopyPropertiesResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let source_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        match return_value {
            status::EC_NONE => Ok(Self::Success {
                source_handle_index,
                problems: PropertyProblem::decode_counted(cur)?,
            }),
            status::EC_NULL_DESTINATION_OBJECT => Ok(Self::NullDestination {
                source_handle_index,
                dest_handle_index: cur.read_u32()?,
            }),
            _ => Ok(Self::Failure {
                source_handle_index,
                return_value,
            }),
        }
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                source_handle_index,
                problems,
            } => {
                w.write_u8(*source_handle_index);
                w.write_u32(status::EC_NONE);
                PropertyProblem::encode_counted(problems, w);
            }
            Self::NullDestination {
                source_handle_index,
                dest_handle_index,
            } => {
                w.write_u8(*source_handle_index);
                w.write_u32(status::EC_NULL_DESTINATION_OBJECT);
                w.write_u32(*dest_handle_index);
            }
            Self::Failure {
                source_handle_index,
                return_value,
            } => {
                debug_assert!(
                    *return_value != status::EC_NONE
                        && *return_value != status::EC_NULL_DESTINATION_OBJECT
                );
                w.write_u8(*source_handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

/// RopProgress request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub want_cancel: bool,
}

impl ProgressRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            want_cancel: cur.read_bool()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_bool(self.want_cancel);
    }
}

/// RopProgress response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressResponse {
    Success {
        input_handle_index: u8,
        logon_id: u8,
        completed_task_count: u32,
        total_task_count: u32,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl ProgressResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        Ok(Self::Success {
            input_handle_index,
            logon_id: cur.read_u8()?,
            completed_task_count: cur.read_u32()?,
            total_task_count: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                logon_id,
                completed_task_count,
                total_task_count,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u8(*logon_id);
                w.write_u32(*completed_task_count);
                w.write_u32(*total_task_count);
            }
            Self::Failure {
                input_handle_index,
                return_value,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

/// RopGetNamesFromPropertyIds request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetNamesFromPropertyIdsRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub property_ids: Vec<u16>,
}

impl GetNamesFromPropertyIdsRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let count = cur.read_u16()? as usize;
        let mut property_ids = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            property_ids.push(cur.read_u16()?);
        }
        Ok(Self {
            logon_id,
            input_handle_index,
            property_ids,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u16(self.property_ids.len() as u16);
        for id in &self.property_ids {
            w.write_u16(*id);
        }
    }
}

/// RopGetNamesFromPropertyIds response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetNamesFromPropertyIdsResponse {
    Success {
        input_handle_index: u8,
        property_names: Vec<PropertyName>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetNamesFromPropertyIdsResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        Ok(Self::Success {
            input_handle_index,
            property_names: PropertyName::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                property_names,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                PropertyName::encode_counted(property_names, w);
            }
            Self::Failure {
                input_handle_index,
                return_value,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

/// RopGetPropertyIdsFromNames request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPropertyIdsFromNamesRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub flags: u8,
    pub property_names: Vec<PropertyName>,
}

impl GetPropertyIdsFromNamesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            flags: cur.read_u8()?,
            property_names: PropertyName::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.flags);
        PropertyName::encode_counted(&self.property_names, w);
    }
}

/// RopGetPropertyIdsFromNames response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetPropertyIdsFromNamesResponse {
    Success {
        input_handle_index: u8,
        property_ids: Vec<u16>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetPropertyIdsFromNamesResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let count = cur.read_u16()? as usize;
        let mut property_ids = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            property_ids.push(cur.read_u16()?);
        }
        Ok(Self::Success {
            input_handle_index,
            property_ids,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                property_ids,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u16(property_ids.len() as u16);
                for id in property_ids {
                    w.write_u16(*id);
                }
            }
            Self::Failure {
                input_handle_index,
                return_value,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{FlaggedPropertyValue, PropertyType, PropertyValue};

    #[test]
    fn test_get_properties_specific_roundtrip() {
        let columns = vec![
            PropertyTag::new(PropertyType::Unicode, 0x0037),
            PropertyTag::new(PropertyType::Integer32, 0x0E08),
        ];
        let resp = GetPropertiesSpecificResponse::Success {
            input_handle_index: 1,
            row: PropertyRow::Flagged(vec![
                FlaggedPropertyValue::Present(PropertyValue::Unicode("subject".to_string())),
                FlaggedPropertyValue::Error(0x8004_010F),
            ]),
        };
        let mut w = ByteWriter::new();
        resp.encode(&columns, &mut w).unwrap();
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            GetPropertiesSpecificResponse::decode(&mut cur, &columns).unwrap(),
            resp
        );
    }

    #[test]
    fn test_set_properties_size_field() {
        let req = SetPropertiesRequest {
            logon_id: 0,
            input_handle_index: 1,
            property_values: vec![TaggedPropertyValue::new(
                PropertyTag::new(PropertyType::Integer32, 0x0E08),
                PropertyValue::Integer32(64),
            )],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        // Size covers count (2) + tag (4) + value (4).
        assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), 10);

        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(SetPropertiesRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_set_properties_size_mismatch() {
        let mut w = ByteWriter::new();
        w.write_u8(0);
        w.write_u8(1);
        w.write_u16(99); // declared size disagrees with the payload
        w.write_u16(1);
        PropertyTag::new(PropertyType::Integer32, 0x0E08).encode(&mut w);
        w.write_i32(7);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert!(matches!(
            SetPropertiesRequest::decode(&mut cur),
            Err(DecodeError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_copy_null_destination_echo() {
        let resp = CopyPropertiesResponse::NullDestination {
            source_handle_index: 0,
            dest_handle_index: 3,
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(&bytes[1..5], &0x0000_0503u32.to_le_bytes());
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(CopyPropertiesResponse::decode(&mut cur).unwrap(), resp);
    }

    #[test]
    fn test_query_named_properties_parallel_arrays() {
        let guid = Uuid::from_u128(0x1111);
        let resp = QueryNamedPropertiesResponse::Success {
            input_handle_index: 1,
            property_ids: vec![0x8001, 0x8002],
            property_names: vec![
                PropertyName::Id { guid, lid: 0x01 },
                PropertyName::Name {
                    guid,
                    name: "Keywords".to_string(),
                },
            ],
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w).unwrap();
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            QueryNamedPropertiesResponse::decode(&mut cur).unwrap(),
            resp
        );
    }

    #[test]
    fn test_query_named_properties_count_mismatch() {
        let resp = QueryNamedPropertiesResponse::Success {
            input_handle_index: 1,
            property_ids: vec![0x8001],
            property_names: Vec::new(),
        };
        let mut w = ByteWriter::new();
        assert!(matches!(
            resp.encode(&mut w),
            Err(DecodeError::ColumnCountMismatch { .. })
        ));
    }

    #[test]
    fn test_property_ids_from_names_roundtrip() {
        let req = GetPropertyIdsFromNamesRequest {
            logon_id: 0,
            input_handle_index: 1,
            flags: 0x02,
            property_names: vec![PropertyName::Id {
                guid: Uuid::from_u128(5),
                lid: 0x8102,
            }],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            GetPropertyIdsFromNamesRequest::decode(&mut cur).unwrap(),
            req
        );
    }

    #[test]
    fn test_progress_roundtrip() {
        let resp = ProgressResponse::Success {
            input_handle_index: 1,
            logon_id: 0,
            completed_task_count: 3,
            total_task_count: 10,
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(ProgressResponse::decode(&mut cur).unwrap(), resp);
    }
}
