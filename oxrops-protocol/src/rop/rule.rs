//! Rule ROPs: rules table access, rule modification, and deferred-action
//! message maintenance.

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;
use crate::property::TaggedPropertyValue;

/// RopGetRulesTable request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetRulesTableRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub table_flags: u8,
}

impl GetRulesTableRequest {
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

/// One rule change: add, modify, or delete a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleData {
    pub rule_data_flags: u8,
    pub property_values: Vec<TaggedPropertyValue>,
}

impl RuleData {
    fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            rule_data_flags: cur.read_u8()?,
            property_values: TaggedPropertyValue::decode_counted(cur)?,
        })
    }

    fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.rule_data_flags);
        TaggedPropertyValue::encode_counted(&self.property_values, w);
    }
}

/// RopModifyRules request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifyRulesRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub modify_rules_flags: u8,
    pub rules_data: Vec<RuleData>,
}

impl ModifyRulesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let modify_rules_flags = cur.read_u8()?;
        let count = cur.read_u16()? as usize;
        let mut rules_data = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            rules_data.push(RuleData::decode(cur)?);
        }
        Ok(Self {
            logon_id,
            input_handle_index,
            modify_rules_flags,
            rules_data,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.modify_rules_flags);
        w.write_u16(self.rules_data.len() as u16);
        for rule in &self.rules_data {
            rule.encode(w);
        }
    }
}

/// RopUpdateDeferredActionMessages request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDeferredActionMessagesRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub server_entry_id: Vec<u8>,
    pub client_entry_id: Vec<u8>,
}

impl UpdateDeferredActionMessagesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let server_size = cur.read_u16()? as usize;
        let server_entry_id = cur.read_bytes(server_size)?;
        let client_size = cur.read_u16()? as usize;
        let client_entry_id = cur.read_bytes(client_size)?;
        Ok(Self {
            logon_id,
            input_handle_index,
            server_entry_id,
            client_entry_id,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u16(self.server_entry_id.len() as u16);
        w.write_bytes(&self.server_entry_id);
        w.write_u16(self.client_entry_id.len() as u16);
        w.write_bytes(&self.client_entry_id);
    }
}

/// Header-only response shared by this family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleHeaderResponse {
    pub handle_index: u8,
    pub return_value: u32,
}

impl RuleHeaderResponse {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{PropertyTag, PropertyType, PropertyValue};

    #[test]
    fn test_modify_rules_roundtrip() {
        let req = ModifyRulesRequest {
            logon_id: 0,
            input_handle_index: 1,
            modify_rules_flags: 0x00,
            rules_data: vec![RuleData {
                rule_data_flags: 0x01,
                property_values: vec![TaggedPropertyValue::new(
                    PropertyTag::new(PropertyType::Unicode, 0x6682),
                    PropertyValue::Unicode("move to archive".to_string()),
                )],
            }],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(ModifyRulesRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_deferred_action_messages_roundtrip() {
        let req = UpdateDeferredActionMessagesRequest {
            logon_id: 0,
            input_handle_index: 1,
            server_entry_id: vec![0x01; 8],
            client_entry_id: vec![0x02; 8],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            UpdateDeferredActionMessagesRequest::decode(&mut cur).unwrap(),
            req
        );
    }
}
