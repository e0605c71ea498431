//! Permission ROPs: permissions table access and modification.

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;
use crate::property::TaggedPropertyValue;

/// RopGetPermissionsTable request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetPermissionsTableRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub table_flags: u8,
}

impl GetPermissionsTableRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            table_flags: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.table_flags);
    }
}

/// One permission change: add, modify, or remove an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionData {
    pub permission_data_flags: u8,
    pub property_values: Vec<TaggedPropertyValue>,
}

impl PermissionData {
    fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            permission_data_flags: cur.read_u8()?,
            property_values: TaggedPropertyValue::decode_counted(cur)?,
        })
    }

    fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.permission_data_flags);
        TaggedPropertyValue::encode_counted(&self.property_values, w);
    }
}

/// RopModifyPermissions request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifyPermissionsRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub modify_flags: u8,
    pub permissions_data: Vec<PermissionData>,
}

impl ModifyPermissionsRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let modify_flags = cur.read_u8()?;
        let count = cur.read_u16()? as usize;
        let mut permissions_data = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            permissions_data.push(PermissionData::decode(cur)?);
        }
        Ok(Self {
            logon_id,
            input_handle_index,
            modify_flags,
            permissions_data,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.modify_flags);
        w.write_u16(self.permissions_data.len() as u16);
        for data in &self.permissions_data {
            data.encode(w);
        }
    }
}

/// Header-only response shared by this family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionHeaderResponse {
    pub handle_index: u8,
    pub return_value: u32,
}

impl PermissionHeaderResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            handle_index: cur.read_u8()?,
            return_value: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.handle_index);
        w.write_u32(self.return_value);
    }
}
