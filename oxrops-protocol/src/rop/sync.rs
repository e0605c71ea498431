//! Incremental change synchronization (ICS) ROPs: sync configuration,
//! change/delete/move import, upload-state streaming, and local replica
//! id management.

use super::LongTermId;
use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::{status, DecodeError};
use crate::property::{PropertyTag, TaggedPropertyValue};
use uuid::Uuid;

fn read_u32_sized_bytes(cur: &mut ByteCursor<'_>) -> Result<Vec<u8>, DecodeError> {
    let size = cur.read_u32()? as usize;
    cur.read_bytes(size)
}

fn write_u32_sized_bytes(bytes: &[u8], w: &mut ByteWriter) {
    w.write_u32(bytes.len() as u32);
    w.write_bytes(bytes);
}

/// RopSynchronizationConfigure request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynchronizationConfigureRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub synchronization_type: u8,
    pub send_options: u8,
    pub synchronization_flags: u16,
    pub restriction_data: Vec<u8>,
    pub synchronization_extra_flags: u32,
    pub property_tags: Vec<PropertyTag>,
}

impl SynchronizationConfigureRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let output_handle_index = cur.read_u8()?;
        let synchronization_type = cur.read_u8()?;
        let send_options = cur.read_u8()?;
        let synchronization_flags = cur.read_u16()?;
        let size = cur.read_u16()? as usize;
        let restriction_data = cur.read_bytes(size)?;
        let synchronization_extra_flags = cur.read_u32()?;
        let property_tags = PropertyTag::decode_counted(cur)?;
        Ok(Self {
            logon_id,
            input_handle_index,
            output_handle_index,
            synchronization_type,
            send_options,
            synchronization_flags,
            restriction_data,
            synchronization_extra_flags,
            property_tags,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.synchronization_type);
        w.write_u8(self.send_options);
        w.write_u16(self.synchronization_flags);
        w.write_u16(self.restriction_data.len() as u16);
        w.write_bytes(&self.restriction_data);
        w.write_u32(self.synchronization_extra_flags);
        PropertyTag::encode_counted(&self.property_tags, w);
    }
}

/// Header-only response used by most of this family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncHeaderResponse {
    pub handle_index: u8,
    pub return_value: u32,
}

impl SyncHeaderResponse {
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

/// RopSynchronizationImportMessageChange request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportMessageChangeRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub import_flag: u8,
    pub property_values: Vec<TaggedPropertyValue>,
}

impl ImportMessageChangeRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            import_flag: cur.read_u8()?,
            property_values: TaggedPropertyValue::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.import_flag);
        TaggedPropertyValue::encode_counted(&self.property_values, w);
    }
}

/// Response shape shared by the import ROPs that return the id of the
/// imported object (message change, message move -> MessageId; hierarchy
/// change -> FolderId).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportIdResponse {
    Success {
        handle_index: u8,
        object_id: u64,
    },
    Failure {
        handle_index: u8,
        return_value: u32,
    },
}

impl ImportIdResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                handle_index,
                return_value,
            });
        }
        Ok(Self::Success {
            handle_index,
            object_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                handle_index,
                object_id,
            } => {
                w.write_u8(*handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u64(*object_id);
            }
            Self::Failure {
                handle_index,
                return_value,
            } => {
                w.write_u8(*handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

/// RopSynchronizationImportHierarchyChange request: two value lists, the
/// folder identification properties and the remaining folder properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportHierarchyChangeRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub hierarchy_values: Vec<TaggedPropertyValue>,
    pub property_values: Vec<TaggedPropertyValue>,
}

impl ImportHierarchyChangeRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            hierarchy_values: TaggedPropertyValue::decode_counted(cur)?,
            property_values: TaggedPropertyValue::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        TaggedPropertyValue::encode_counted(&self.hierarchy_values, w);
        TaggedPropertyValue::encode_counted(&self.property_values, w);
    }
}

/// RopSynchronizationImportDeletes request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeletesRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub import_delete_flags: u8,
    pub property_values: Vec<TaggedPropertyValue>,
}

impl ImportDeletesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            import_delete_flags: cur.read_u8()?,
            property_values: TaggedPropertyValue::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.import_delete_flags);
        TaggedPropertyValue::encode_counted(&self.property_values, w);
    }
}

/// RopSynchronizationImportMessageMove request: five variable-size id
/// blobs, each with a 32-bit size prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMessageMoveRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub source_folder_id: Vec<u8>,
    pub source_message_id: Vec<u8>,
    pub predecessor_change_list: Vec<u8>,
    pub destination_message_id: Vec<u8>,
    pub change_number: Vec<u8>,
}

impl ImportMessageMoveRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            source_folder_id: read_u32_sized_bytes(cur)?,
            source_message_id: read_u32_sized_bytes(cur)?,
            predecessor_change_list: read_u32_sized_bytes(cur)?,
            destination_message_id: read_u32_sized_bytes(cur)?,
            change_number: read_u32_sized_bytes(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        write_u32_sized_bytes(&self.source_folder_id, w);
        write_u32_sized_bytes(&self.source_message_id, w);
        write_u32_sized_bytes(&self.predecessor_change_list, w);
        write_u32_sized_bytes(&self.destination_message_id, w);
        write_u32_sized_bytes(&self.change_number, w);
    }
}

/// RopSynchronizationOpenCollector request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenCollectorRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub is_contents_collector: bool,
}

impl OpenCollectorRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            is_contents_collector: cur.read_bool()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_bool(self.is_contents_collector);
    }
}

/// RopSynchronizationGetTransferState request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetTransferStateRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
}

impl GetTransferStateRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
    }
}

/// RopSynchronizationUploadStateStreamBegin request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadStateStreamBeginRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub property_tag: PropertyTag,
    pub transfer_buffer_size: u32,
}

impl UploadStateStreamBeginRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            property_tag: PropertyTag::decode(cur)?,
            transfer_buffer_size: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        self.property_tag.encode(w);
        w.write_u32(self.transfer_buffer_size);
    }
}

/// RopSynchronizationUploadStateStreamContinue request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadStateStreamContinueRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub stream_data: Vec<u8>,
}

impl UploadStateStreamContinueRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            stream_data: read_u32_sized_bytes(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        write_u32_sized_bytes(&self.stream_data, w);
    }
}

/// RopSynchronizationUploadStateStreamEnd request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadStateStreamEndRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
}

impl UploadStateStreamEndRequest {
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

/// An inclusive range of long-term ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongTermIdRange {
    pub min: LongTermId,
    pub max: LongTermId,
}

impl LongTermIdRange {
    fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            min: LongTermId::decode(cur)?,
            max: LongTermId::decode(cur)?,
        })
    }

    fn encode(&self, w: &mut ByteWriter) {
        self.min.encode(w);
        self.max.encode(w);
    }
}

/// RopSetLocalReplicaMidsetDeleted request. The leading size field covers
/// the range count and the ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetLocalReplicaMidsetDeletedRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub ranges: Vec<LongTermIdRange>,
}

impl SetLocalReplicaMidsetDeletedRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let declared = cur.read_u16()? as usize;
        let before = cur.remaining();
        let count = cur.read_u32()? as usize;
        let mut ranges = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            ranges.push(LongTermIdRange::decode(cur)?);
        }
        let consumed = before - cur.remaining();
        if consumed != declared {
            return Err(DecodeError::SizeMismatch {
                field: "LongTermIdRanges",
                declared,
                actual: consumed,
            });
        }
        Ok(Self {
            logon_id,
            input_handle_index,
            ranges,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        // Count field plus 48 bytes per range.
        w.write_u16((4 + self.ranges.len() * 48) as u16);
        w.write_u32(self.ranges.len() as u32);
        for range in &self.ranges {
            range.encode(w);
        }
    }
}

/// RopGetLocalReplicaIds request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetLocalReplicaIdsRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub id_count: u32,
}

impl GetLocalReplicaIdsRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            id_count: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u32(self.id_count);
    }
}

/// RopGetLocalReplicaIds response: the replica GUID plus the first
/// 6-byte global counter of the reserved range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetLocalReplicaIdsResponse {
    Success {
        input_handle_index: u8,
        replica_guid: Uuid,
        global_count: [u8; 6],
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetLocalReplicaIdsResponse {
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
            replica_guid: cur.read_guid()?,
            global_count: cur.read_array::<6>()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                replica_guid,
                global_count,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_guid(replica_guid);
                w.write_bytes(global_count);
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

/// One message read-state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReadState {
    pub message_id: Vec<u8>,
    pub mark_as_read: bool,
}

impl MessageReadState {
    fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let size = cur.read_u16()? as usize;
        Ok(Self {
            message_id: cur.read_bytes(size)?,
            mark_as_read: cur.read_bool()?,
        })
    }

    fn encode(&self, w: &mut ByteWriter) {
        w.write_u16(self.message_id.len() as u16);
        w.write_bytes(&self.message_id);
        w.write_bool(self.mark_as_read);
    }

    fn wire_size(&self) -> usize {
        2 + self.message_id.len() + 1
    }
}

/// RopSynchronizationImportReadStateChanges request. The changes fill a
/// size-prefixed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReadStateChangesRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub read_states: Vec<MessageReadState>,
}

impl ImportReadStateChangesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let declared = cur.read_u16()? as usize;
        let block = cur.read_bytes(declared)?;
        let mut sub = ByteCursor::new(&block);
        let mut read_states = Vec::new();
        while !sub.is_empty() {
            read_states.push(MessageReadState::decode(&mut sub)?);
        }
        Ok(Self {
            logon_id,
            input_handle_index,
            read_states,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        let size: usize = self.read_states.iter().map(MessageReadState::wire_size).sum();
        w.write_u16(size as u16);
        for state in &self.read_states {
            state.encode(w);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{PropertyType, PropertyValue};

    #[test]
    fn test_configure_roundtrip() {
        let req = SynchronizationConfigureRequest {
            logon_id: 0,
            input_handle_index: 0,
            output_handle_index: 1,
            synchronization_type: 0x01,
            send_options: 0x02,
            synchronization_flags: 0x0E01,
            restriction_data: vec![1, 2, 3],
            synchronization_extra_flags: 0x03,
            property_tags: vec![PropertyTag::new(PropertyType::Integer64, 0x6748)],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            SynchronizationConfigureRequest::decode(&mut cur).unwrap(),
            req
        );
    }

    #[test]
    fn test_import_message_change_roundtrip() {
        let req = ImportMessageChangeRequest {
            logon_id: 0,
            input_handle_index: 1,
            output_handle_index: 2,
            import_flag: 0x00,
            property_values: vec![TaggedPropertyValue::new(
                PropertyTag::new(PropertyType::Binary, 0x0FF9),
                PropertyValue::Binary(vec![0xAA; 22]),
            )],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(ImportMessageChangeRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_import_message_move_blobs() {
        let req = ImportMessageMoveRequest {
            logon_id: 0,
            input_handle_index: 1,
            source_folder_id: vec![1; 22],
            source_message_id: vec![2; 22],
            predecessor_change_list: vec![3; 46],
            destination_message_id: vec![4; 22],
            change_number: vec![5; 22],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(ImportMessageMoveRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_midset_deleted_size_field() {
        let range = LongTermIdRange {
            min: LongTermId::new(Uuid::from_u128(1), [0; 6]),
            max: LongTermId::new(Uuid::from_u128(1), [0xFF; 6]),
        };
        let req = SetLocalReplicaMidsetDeletedRequest {
            logon_id: 0,
            input_handle_index: 1,
            ranges: vec![range],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        // DataSize = 4 (count) + 48 (one range).
        assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), 52);
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            SetLocalReplicaMidsetDeletedRequest::decode(&mut cur).unwrap(),
            req
        );
    }

    #[test]
    fn test_read_state_changes_roundtrip() {
        let req = ImportReadStateChangesRequest {
            logon_id: 0,
            input_handle_index: 1,
            read_states: vec![
                MessageReadState {
                    message_id: vec![0x01; 22],
                    mark_as_read: true,
                },
                MessageReadState {
                    message_id: vec![0x02; 22],
                    mark_as_read: false,
                },
            ],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            ImportReadStateChangesRequest::decode(&mut cur).unwrap(),
            req
        );
    }

    #[test]
    fn test_local_replica_ids_roundtrip() {
        let resp = GetLocalReplicaIdsResponse::Success {
            input_handle_index: 1,
            replica_guid: Uuid::from_u128(0xFEED),
            global_count: [0, 0, 0, 0, 1, 0],
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 1 + 4 + 16 + 6);
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(GetLocalReplicaIdsResponse::decode(&mut cur).unwrap(), resp);
    }
}
