//! Fast-transfer ROPs: bulk folder/message streaming across repeated
//! GetBuffer/PutBuffer calls with incremental progress state.

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;
use crate::property::PropertyTag;
use crate::MAX_READ_SENTINEL;

/// Progress of a fast-transfer operation as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum TransferStatus {
    /// The download must be aborted.
    Error = 0x0000,
    /// More data remains; the client calls again.
    Partial = 0x0001,
    /// The server could not fit more data in the requested buffer.
    NoRoom = 0x0002,
    /// The transfer is finished.
    Done = 0x0003,
}

impl TryFrom<u16> for TransferStatus {
    type Error = DecodeError;

    fn try_from(value: u16) -> Result<Self, DecodeError> {
        match value {
            0x0000 => Ok(TransferStatus::Error),
            0x0001 => Ok(TransferStatus::Partial),
            0x0002 => Ok(TransferStatus::NoRoom),
            0x0003 => Ok(TransferStatus::Done),
            other => Err(DecodeError::InvalidDiscriminant {
                field: "TransferStatus",
                value: other as u32,
            }),
        }
    }
}

impl TransferStatus {
    /// Whether further GetBuffer/PutBuffer calls are expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Error | TransferStatus::Done)
    }
}

/// RopFastTransferSourceCopyMessages request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCopyMessagesRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub message_ids: Vec<u64>,
    pub copy_flags: u8,
    pub send_options: u8,
}

impl SourceCopyMessagesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let output_handle_index = cur.read_u8()?;
        let count = cur.read_u16()? as usize;
        let mut message_ids = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            message_ids.push(cur.read_u64()?);
        }
        Ok(Self {
            logon_id,
            input_handle_index,
            output_handle_index,
            message_ids,
            copy_flags: cur.read_u8()?,
            send_options: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u16(self.message_ids.len() as u16);
        for id in &self.message_ids {
            w.write_u64(*id);
        }
        w.write_u8(self.copy_flags);
        w.write_u8(self.send_options);
    }
}

/// RopFastTransferSourceCopyFolder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceCopyFolderRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub copy_flags: u8,
    pub send_options: u8,
}

impl SourceCopyFolderRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            copy_flags: cur.read_u8()?,
            send_options: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.copy_flags);
        w.write_u8(self.send_options);
    }
}

/// RopFastTransferSourceCopyTo request. Copy flags are 32 bits wide here,
/// unlike the rest of the family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCopyToRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub level: u8,
    pub copy_flags: u32,
    pub send_options: u8,
    pub property_tags: Vec<PropertyTag>,
}

impl SourceCopyToRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            level: cur.read_u8()?,
            copy_flags: cur.read_u32()?,
            send_options: cur.read_u8()?,
            property_tags: PropertyTag::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.level);
        w.write_u32(self.copy_flags);
        w.write_u8(self.send_options);
        PropertyTag::encode_counted(&self.property_tags, w);
    }
}

/// RopFastTransferSourceCopyProperties request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCopyPropertiesRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub level: u8,
    pub copy_flags: u8,
    pub send_options: u8,
    pub property_tags: Vec<PropertyTag>,
}

impl SourceCopyPropertiesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            level: cur.read_u8()?,
            copy_flags: cur.read_u8()?,
            send_options: cur.read_u8()?,
            property_tags: PropertyTag::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.level);
        w.write_u8(self.copy_flags);
        w.write_u8(self.send_options);
        PropertyTag::encode_counted(&self.property_tags, w);
    }
}

/// Header-only response shared by the fast-transfer configuration ROPs
/// and RopTellVersion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastTransferHeaderResponse {
    pub handle_index: u8,
    pub return_value: u32,
}

impl FastTransferHeaderResponse {
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

/// RopFastTransferSourceGetBuffer request. A buffer size of 0xBABE means
/// the maximum size follows as an extra field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceGetBufferRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub buffer_size: u16,
    pub maximum_buffer_size: Option<u16>,
}

impl SourceGetBufferRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let buffer_size = cur.read_u16()?;
        let maximum_buffer_size = if buffer_size == MAX_READ_SENTINEL {
            Some(cur.read_u16()?)
        } else {
            None
        };
        Ok(Self {
            logon_id,
            input_handle_index,
            buffer_size,
            maximum_buffer_size,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u16(self.buffer_size);
        if let Some(max) = self.maximum_buffer_size {
            debug_assert_eq!(self.buffer_size, MAX_READ_SENTINEL);
            w.write_u16(max);
        }
    }
}

/// RopFastTransferSourceGetBuffer response. The progress fields are on
/// the wire in both the success and failure forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceGetBufferResponse {
    pub input_handle_index: u8,
    pub return_value: u32,
    pub transfer_status: TransferStatus,
    pub in_progress_count: u16,
    pub total_step_count: u16,
    pub reserved: u8,
    pub transfer_buffer: Vec<u8>,
}

impl SourceGetBufferResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        let transfer_status = TransferStatus::try_from(cur.read_u16()?)?;
        let in_progress_count = cur.read_u16()?;
        let total_step_count = cur.read_u16()?;
        let reserved = cur.read_u8()?;
        let size = cur.read_u16()? as usize;
        Ok(Self {
            input_handle_index,
            return_value,
            transfer_status,
            in_progress_count,
            total_step_count,
            reserved,
            transfer_buffer: cur.read_bytes(size)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.input_handle_index);
        w.write_u32(self.return_value);
        w.write_u16(self.transfer_status as u16);
        w.write_u16(self.in_progress_count);
        w.write_u16(self.total_step_count);
        w.write_u8(self.reserved);
        w.write_u16(self.transfer_buffer.len() as u16);
        w.write_bytes(&self.transfer_buffer);
    }
}

/// RopFastTransferDestinationConfigure request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationConfigureRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub source_operation: u8,
    pub copy_flags: u8,
}

impl DestinationConfigureRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            source_operation: cur.read_u8()?,
            copy_flags: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.source_operation);
        w.write_u8(self.copy_flags);
    }
}

/// RopFastTransferDestinationPutBuffer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPutBufferRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub transfer_data: Vec<u8>,
}

impl DestinationPutBufferRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let size = cur.read_u16()? as usize;
        Ok(Self {
            logon_id,
            input_handle_index,
            transfer_data: cur.read_bytes(size)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u16(self.transfer_data.len() as u16);
        w.write_bytes(&self.transfer_data);
    }
}

/// RopFastTransferDestinationPutBuffer response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationPutBufferResponse {
    pub input_handle_index: u8,
    pub return_value: u32,
    pub transfer_status: TransferStatus,
    pub in_progress_count: u16,
    pub total_step_count: u16,
    pub reserved: u8,
    pub buffer_used_size: u16,
}

impl DestinationPutBufferResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            input_handle_index: cur.read_u8()?,
            return_value: cur.read_u32()?,
            transfer_status: TransferStatus::try_from(cur.read_u16()?)?,
            in_progress_count: cur.read_u16()?,
            total_step_count: cur.read_u16()?,
            reserved: cur.read_u8()?,
            buffer_used_size: cur.read_u16()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.input_handle_index);
        w.write_u32(self.return_value);
        w.write_u16(self.transfer_status as u16);
        w.write_u16(self.in_progress_count);
        w.write_u16(self.total_step_count);
        w.write_u8(self.reserved);
        w.write_u16(self.buffer_used_size);
    }
}

/// RopTellVersion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TellVersionRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub version: [u16; 3],
}

impl TellVersionRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let version = [cur.read_u16()?, cur.read_u16()?, cur.read_u16()?];
        Ok(Self {
            logon_id,
            input_handle_index,
            version,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        for part in self.version {
            w.write_u16(part);
        }
    }
}
