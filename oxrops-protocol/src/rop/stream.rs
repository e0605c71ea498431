//! Stream ROPs: open/read/write/commit, sizing, seeking, region locks,
//! clone, and stream-to-stream copy.

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::{status, DecodeError};
use crate::property::PropertyTag;
use crate::MAX_READ_SENTINEL;

/// Request shape shared by the stream ROPs with no payload
/// (RopCommitStream, RopGetStreamSize, RopSynchronizationUploadStateStreamEnd
/// lives in the sync module).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeaderRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
}

impl StreamHeaderRequest {
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

/// Header-only response shared across this family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeaderResponse {
    pub input_handle_index: u8,
    pub return_value: u32,
}

impl StreamHeaderResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            input_handle_index: cur.read_u8()?,
            return_value: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.input_handle_index);
        w.write_u32(self.return_value);
    }
}

/// RopOpenStream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenStreamRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub property_tag: PropertyTag,
    pub open_mode_flags: u8,
}

impl OpenStreamRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            property_tag: PropertyTag::decode(cur)?,
            open_mode_flags: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        self.property_tag.encode(w);
        w.write_u8(self.open_mode_flags);
    }
}

/// RopOpenStream response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStreamResponse {
    Success {
        output_handle_index: u8,
        stream_size: u32,
    },
    Failure {
        output_handle_index: u8,
        return_value: u32,
    },
}

impl OpenStreamResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let output_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                output_handle_index,
                return_value,
            });
        }
        Ok(Self::Success {
            output_handle_index,
            stream_size: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                output_handle_index,
                stream_size,
            } => {
                w.write_u8(*output_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u32(*stream_size);
            }
            Self::Failure {
                output_handle_index,
                return_value,
            } => {
                w.write_u8(*output_handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

/// RopReadStream request. A byte count of 0xBABE means the maximum read
/// size follows as an extra field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadStreamRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub byte_count: u16,
    pub maximum_byte_count: Option<u32>,
}

impl ReadStreamRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let byte_count = cur.read_u16()?;
        let maximum_byte_count = if byte_count == MAX_READ_SENTINEL {
            Some(cur.read_u32()?)
        } else {
            None
        };
        Ok(Self {
            logon_id,
            input_handle_index,
            byte_count,
            maximum_byte_count,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u16(self.byte_count);
        if let Some(max) = self.maximum_byte_count {
            debug_assert_eq!(self.byte_count, MAX_READ_SENTINEL);
            w.write_u32(max);
        }
    }
}

/// RopReadStream response. Success and failure share the shape; a failed
/// read reports zero data bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadStreamResponse {
    pub input_handle_index: u8,
    pub return_value: u32,
    pub data: Vec<u8>,
}

impl ReadStreamResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        let size = cur.read_u16()? as usize;
        Ok(Self {
            input_handle_index,
            return_value,
            data: cur.read_bytes(size)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.input_handle_index);
        w.write_u32(self.return_value);
        w.write_u16(self.data.len() as u16);
        w.write_bytes(&self.data);
    }
}

/// RopWriteStream request. RopWriteAndCommitStream shares the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteStreamRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub data: Vec<u8>,
}

impl WriteStreamRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let size = cur.read_u16()? as usize;
        Ok(Self {
            logon_id,
            input_handle_index,
            data: cur.read_bytes(size)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u16(self.data.len() as u16);
        w.write_bytes(&self.data);
    }
}

/// RopWriteStream response. The written size is reported in both the
/// success and failure forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteStreamResponse {
    pub input_handle_index: u8,
    pub return_value: u32,
    pub written_size: u16,
}

impl WriteStreamResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            input_handle_index: cur.read_u8()?,
            return_value: cur.read_u32()?,
            written_size: cur.read_u16()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.input_handle_index);
        w.write_u32(self.return_value);
        w.write_u16(self.written_size);
    }
}

/// RopGetStreamSize response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetStreamSizeResponse {
    Success {
        input_handle_index: u8,
        stream_size: u32,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetStreamSizeResponse {
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
            stream_size: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                stream_size,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u32(*stream_size);
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

/// RopSetStreamSize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetStreamSizeRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub stream_size: u64,
}

impl SetStreamSizeRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            stream_size: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.stream_size);
    }
}

/// RopSeekStream request. Negative offsets seek backwards from the
/// current position or the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekStreamRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub origin: u8,
    pub offset: i64,
}

impl SeekStreamRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            origin: cur.read_u8()?,
            offset: cur.read_i64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.origin);
        w.write_i64(self.offset);
    }
}

/// RopSeekStream response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekStreamResponse {
    Success {
        input_handle_index: u8,
        new_position: u64,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl SeekStreamResponse {
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
            new_position: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                new_position,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u64(*new_position);
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

/// RopCopyToStream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyToStreamRequest {
    pub logon_id: u8,
    pub source_handle_index: u8,
    pub dest_handle_index: u8,
    pub byte_count: u64,
}

impl CopyToStreamRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            source_handle_index: cur.read_u8()?,
            dest_handle_index: cur.read_u8()?,
            byte_count: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.source_handle_index);
        w.write_u8(self.dest_handle_index);
        w.write_u64(self.byte_count);
    }
}

/// RopCopyToStream response. Progress counters are reported in every
/// form; the null-destination failure additionally echoes the
/// destination handle index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyToStreamResponse {
    Standard {
        source_handle_index: u8,
        return_value: u32,
        read_byte_count: u64,
        written_byte_count: u64,
    },
    NullDestination {
        source_handle_index: u8,
        dest_handle_index: u32,
        read_byte_count: u64,
        written_byte_count: u64,
    },
}

impl CopyToStreamResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let source_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value == status::EC_NULL_DESTINATION_OBJECT {
            return Ok(Self::NullDestination {
                source_handle_index,
                dest_handle_index: cur.read_u32()?,
                read_byte_count: cur.read_u64()?,
                written_byte_count: cur.read_u64()?,
            });
        }
        Ok(Self::Standard {
            source_handle_index,
            return_value,
            read_byte_count: cur.read_u64()?,
            written_byte_count: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Standard {
                source_handle_index,
                return_value,
                read_byte_count,
                written_byte_count,
            } => {
                debug_assert!(*return_value != status::EC_NULL_DESTINATION_OBJECT);
                w.write_u8(*source_handle_index);
                w.write_u32(*return_value);
                w.write_u64(*read_byte_count);
                w.write_u64(*written_byte_count);
            }
            Self::NullDestination {
                source_handle_index,
                dest_handle_index,
                read_byte_count,
                written_byte_count,
            } => {
                w.write_u8(*source_handle_index);
                w.write_u32(status::EC_NULL_DESTINATION_OBJECT);
                w.write_u32(*dest_handle_index);
                w.write_u64(*read_byte_count);
                w.write_u64(*written_byte_count);
            }
        }
    }
}

/// RopLockRegionStream request. RopUnlockRegionStream shares the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockRegionStreamRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub region_offset: u64,
    pub region_size: u64,
    pub lock_flags: u32,
}

impl LockRegionStreamRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            region_offset: cur.read_u64()?,
            region_size: cur.read_u64()?,
            lock_flags: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.region_offset);
        w.write_u64(self.region_size);
        w.write_u32(self.lock_flags);
    }
}

/// RopCloneStream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneStreamRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
}

impl CloneStreamRequest {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyType;

    #[test]
    fn test_open_stream_roundtrip() {
        let req = OpenStreamRequest {
            logon_id: 0,
            input_handle_index: 1,
            output_handle_index: 2,
            property_tag: PropertyTag::new(PropertyType::Binary, 0x1013),
            open_mode_flags: 0x01,
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(OpenStreamRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_read_stream_plain_and_maximum() {
        let plain = ReadStreamRequest {
            logon_id: 0,
            input_handle_index: 2,
            byte_count: 512,
            maximum_byte_count: None,
        };
        let mut w = ByteWriter::new();
        plain.encode(&mut w);
        assert_eq!(w.len(), 4);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(ReadStreamRequest::decode(&mut cur).unwrap(), plain);

        let maximum = ReadStreamRequest {
            logon_id: 0,
            input_handle_index: 2,
            byte_count: MAX_READ_SENTINEL,
            maximum_byte_count: Some(0x0001_0000),
        };
        let mut w = ByteWriter::new();
        maximum.encode(&mut w);
        assert_eq!(w.len(), 8);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(ReadStreamRequest::decode(&mut cur).unwrap(), maximum);
    }

    #[test]
    fn test_read_stream_response_carries_data_on_failure() {
        let resp = ReadStreamResponse {
            input_handle_index: 2,
            return_value: 0x8004_0115,
            data: Vec::new(),
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(ReadStreamResponse::decode(&mut cur).unwrap(), resp);
    }

    #[test]
    fn test_write_stream_roundtrip() {
        let req = WriteStreamRequest {
            logon_id: 0,
            input_handle_index: 2,
            data: vec![0x5A; 300],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(WriteStreamRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_seek_stream_negative_offset() {
        let req = SeekStreamRequest {
            logon_id: 0,
            input_handle_index: 2,
            origin: 0x01,
            offset: -4096,
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(SeekStreamRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_copy_to_stream_null_destination() {
        let resp = CopyToStreamResponse::NullDestination {
            source_handle_index: 1,
            dest_handle_index: 4,
            read_byte_count: 100,
            written_byte_count: 0,
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(&bytes[1..5], &0x0000_0503u32.to_le_bytes());
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(CopyToStreamResponse::decode(&mut cur).unwrap(), resp);
    }

    #[test]
    fn test_lock_region_roundtrip() {
        let req = LockRegionStreamRequest {
            logon_id: 0,
            input_handle_index: 2,
            region_offset: 0x1000,
            region_size: 0x2000,
            lock_flags: 0x01,
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(LockRegionStreamRequest::decode(&mut cur).unwrap(), req);
    }
}
