//! ROP buffer framing.
//!
//! Buffer layout (after the transport's own header):
//!
//! ```text
//! +---------+--------------------+---------------------------+
//! | RopSize | RopsList           | ServerObjectHandleTable   |
//! | 2 bytes | RopSize - 2 bytes  | u32[] to end of buffer    |
//! +---------+--------------------+---------------------------+
//! ```
//!
//! The rops list packs heterogeneous ROPs back to back with no per-ROP
//! framing; each entry is exactly as long as its own layout says. The
//! trailing handle table must divide evenly into 32-bit entries.

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;
use crate::rop::{DecodeContext, RopRequest, RopResponse};
use crate::ROP_SIZE_LEN;
use bytes::Bytes;

fn split_frame(buf: &[u8]) -> Result<(&[u8], Vec<u32>), DecodeError> {
    let mut cur = ByteCursor::new(buf);
    let rop_size = cur.read_u16()?;
    if (rop_size as usize) < ROP_SIZE_LEN || buf.len() < rop_size as usize {
        return Err(DecodeError::InvalidRopSize {
            rop_size,
            available: buf.len(),
        });
    }
    let rops_region = &buf[ROP_SIZE_LEN..rop_size as usize];
    let table_region = &buf[rop_size as usize..];
    if table_region.len() % 4 != 0 {
        return Err(DecodeError::MisalignedHandleTable {
            trailing: table_region.len() % 4,
        });
    }
    let mut table_cur = ByteCursor::new(table_region);
    let mut handle_table = Vec::with_capacity(table_region.len() / 4);
    while !table_cur.is_empty() {
        handle_table.push(table_cur.read_u32()?);
    }
    Ok((rops_region, handle_table))
}

fn write_frame(rops: &[u8], handle_table: &[u32]) -> Bytes {
    let mut w = ByteWriter::with_capacity(ROP_SIZE_LEN + rops.len() + handle_table.len() * 4);
    w.write_u16((rops.len() + ROP_SIZE_LEN) as u16);
    w.write_bytes(rops);
    for handle in handle_table {
        w.write_u32(*handle);
    }
    w.into_bytes()
}

/// A decoded ROP input buffer: the client's requests plus the handle
/// table it submitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestBuffer {
    pub requests: Vec<RopRequest>,
    pub handle_table: Vec<u32>,
}

impl RequestBuffer {
    pub fn new(requests: Vec<RopRequest>, handle_table: Vec<u32>) -> Self {
        Self {
            requests,
            handle_table,
        }
    }

    /// Decodes a full input buffer. Any malformed entry fails the whole
    /// buffer; there is no partial decode.
    pub fn decode(buf: &[u8], ctx: &DecodeContext<'_>) -> Result<Self, DecodeError> {
        let (rops_region, handle_table) = split_frame(buf)?;
        let mut cur = ByteCursor::new(rops_region);
        let mut requests = Vec::new();
        while !cur.is_empty() {
            requests.push(RopRequest::decode(&mut cur, ctx)?);
        }
        Ok(Self {
            requests,
            handle_table,
        })
    }

    pub fn encode(&self) -> Bytes {
        let mut rops = ByteWriter::new();
        for request in &self.requests {
            request.encode(&mut rops);
        }
        write_frame(&rops.into_bytes(), &self.handle_table)
    }
}

/// A decoded ROP output buffer: the server's responses plus the updated
/// handle table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseBuffer {
    pub responses: Vec<RopResponse>,
    pub handle_table: Vec<u32>,
}

impl ResponseBuffer {
    pub fn new(responses: Vec<RopResponse>, handle_table: Vec<u32>) -> Self {
        Self {
            responses,
            handle_table,
        }
    }

    pub fn decode(buf: &[u8], ctx: &DecodeContext<'_>) -> Result<Self, DecodeError> {
        let (rops_region, handle_table) = split_frame(buf)?;
        let mut cur = ByteCursor::new(rops_region);
        let mut responses = Vec::new();
        while !cur.is_empty() {
            responses.push(RopResponse::decode(&mut cur, ctx)?);
        }
        Ok(Self {
            responses,
            handle_table,
        })
    }

    pub fn encode(&self, ctx: &DecodeContext<'_>) -> Result<Bytes, DecodeError> {
        let mut rops = ByteWriter::new();
        for response in &self.responses {
            response.encode(ctx, &mut rops)?;
        }
        Ok(write_frame(&rops.into_bytes(), &self.handle_table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rop::folder::OpenFolderRequest;
    use crate::rop::logon::{LogonFlags, LogonRequest};
    use crate::rop::other::ReleaseRequest;
    use crate::rop::stream::StreamHeaderResponse;
    use crate::rop::table::{TableStatus, TableStatusResponse};
    use crate::UNUSED_HANDLE;

    fn sample_requests() -> Vec<RopRequest> {
        vec![
            RopRequest::Logon(LogonRequest {
                logon_id: 0,
                output_handle_index: 0,
                logon_flags: LogonFlags::private(),
                open_flags: 0,
                store_state: 0,
                essdn: Some("/o=org/cn=user".to_string()),
            }),
            RopRequest::OpenFolder(OpenFolderRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                folder_id: 0x42,
                open_mode_flags: 0,
            }),
            RopRequest::Release(ReleaseRequest {
                logon_id: 0,
                input_handle_index: 1,
            }),
        ]
    }

    #[test]
    fn test_request_buffer_roundtrip() {
        let buffer = RequestBuffer::new(sample_requests(), vec![UNUSED_HANDLE, UNUSED_HANDLE]);
        let bytes = buffer.encode();
        let decoded = RequestBuffer::decode(&bytes, &DecodeContext::default()).unwrap();
        assert_eq!(decoded, buffer);
    }

    #[test]
    fn test_rop_size_accounts_for_itself() {
        let buffer = RequestBuffer::new(sample_requests(), vec![UNUSED_HANDLE]);
        let bytes = buffer.encode();
        let rop_size = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
        // RopsList length + the two RopSize bytes == RopSize.
        assert_eq!(rop_size, bytes.len() - 4);
        // Trailing handle table is a whole number of u32 entries.
        assert_eq!((bytes.len() - rop_size) % 4, 0);
    }

    #[test]
    fn test_empty_rops_list() {
        let buffer = RequestBuffer::new(Vec::new(), vec![1, 2, 3]);
        let bytes = buffer.encode();
        assert_eq!(bytes.len(), 2 + 12);
        let decoded = RequestBuffer::decode(&bytes, &DecodeContext::default()).unwrap();
        assert!(decoded.requests.is_empty());
        assert_eq!(decoded.handle_table, vec![1, 2, 3]);
    }

    #[test]
    fn test_rop_size_larger_than_buffer() {
        let bytes = [0x40u8, 0x00, 0x01];
        assert!(matches!(
            RequestBuffer::decode(&bytes, &DecodeContext::default()),
            Err(DecodeError::InvalidRopSize { .. })
        ));
    }

    #[test]
    fn test_rop_size_below_minimum() {
        let bytes = [0x01u8, 0x00];
        assert!(matches!(
            RequestBuffer::decode(&bytes, &DecodeContext::default()),
            Err(DecodeError::InvalidRopSize { .. })
        ));
    }

    #[test]
    fn test_misaligned_handle_table() {
        // Valid empty rops list followed by six trailing bytes.
        let bytes = [0x02u8, 0x00, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x11, 0x22, 0x33];
        assert!(matches!(
            RequestBuffer::decode(&bytes, &DecodeContext::default()),
            Err(DecodeError::MisalignedHandleTable { trailing: 1 })
        ));
    }

    #[test]
    fn test_truncated_rop_fails_whole_buffer() {
        let buffer = RequestBuffer::new(sample_requests(), Vec::new());
        let mut bytes = buffer.encode().to_vec();
        // Chop the tail of the last ROP but keep the frame consistent.
        bytes.truncate(bytes.len() - 1);
        let rop_size = (bytes.len()) as u16;
        bytes[0..2].copy_from_slice(&rop_size.to_le_bytes());
        assert!(RequestBuffer::decode(&bytes, &DecodeContext::default()).is_err());
    }

    #[test]
    fn test_response_buffer_roundtrip() {
        let ctx = DecodeContext::default();
        let buffer = ResponseBuffer::new(
            vec![
                RopResponse::SetColumns(TableStatusResponse::Success {
                    input_handle_index: 0,
                    table_status: TableStatus::Complete,
                }),
                RopResponse::CommitStream(StreamHeaderResponse {
                    input_handle_index: 1,
                    return_value: 0x8004_0102,
                }),
            ],
            vec![0x100, 0x101],
        );
        let bytes = buffer.encode(&ctx).unwrap();
        let decoded = ResponseBuffer::decode(&bytes, &ctx).unwrap();
        assert_eq!(decoded, buffer);
    }
}
