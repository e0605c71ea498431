//! Remaining ROPs: RopRelease (request-only), RopBackoff, and the
//! RopBufferTooSmall substitution marker.

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;

/// RopRelease request. Releases the server object behind the referenced
/// handle-table slot; there is no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
}

impl ReleaseRequest {
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

/// One per-ROP backoff period inside RopBackoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffRop {
    pub rop_id_backoff: u8,
    pub duration: u32,
}

/// RopBackoff response: the server asks the client to slow down, either
/// for a whole logon or for specific ROPs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffResponse {
    pub logon_id: u8,
    pub duration: u32,
    pub backoff_rops: Vec<BackoffRop>,
    pub additional_data: Vec<u8>,
}

impl BackoffResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let duration = cur.read_u32()?;
        let count = cur.read_u8()? as usize;
        let mut backoff_rops = Vec::with_capacity(count);
        for _ in 0..count {
            backoff_rops.push(BackoffRop {
                rop_id_backoff: cur.read_u8()?,
                duration: cur.read_u32()?,
            });
        }
        let additional_size = cur.read_u16()? as usize;
        let additional_data = cur.read_bytes(additional_size)?;
        Ok(Self {
            logon_id,
            duration,
            backoff_rops,
            additional_data,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u32(self.duration);
        w.write_u8(self.backoff_rops.len() as u8);
        for rop in &self.backoff_rops {
            w.write_u8(rop.rop_id_backoff);
            w.write_u32(rop.duration);
        }
        w.write_u16(self.additional_data.len() as u16);
        w.write_bytes(&self.additional_data);
    }
}

/// RopBufferTooSmall response: substituted by the server when the next
/// response would not fit the output budget. Carries the size the
/// omitted response would have needed plus the unprocessed remainder of
/// the request buffer, which always extends to the end of the rops list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferTooSmallResponse {
    pub size_needed: u16,
    pub request_buffers: Vec<u8>,
}

impl BufferTooSmallResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            size_needed: cur.read_u16()?,
            request_buffers: cur.read_rest(),
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u16(self.size_needed);
        w.write_bytes(&self.request_buffers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_roundtrip() {
        let req = ReleaseRequest {
            logon_id: 0,
            input_handle_index: 5,
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        assert_eq!(w.len(), 2);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(ReleaseRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_backoff_roundtrip() {
        let resp = BackoffResponse {
            logon_id: 0,
            duration: 5000,
            backoff_rops: vec![
                BackoffRop {
                    rop_id_backoff: 0x15,
                    duration: 1000,
                },
                BackoffRop {
                    rop_id_backoff: 0x4E,
                    duration: 2000,
                },
            ],
            additional_data: vec![0x77; 4],
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(BackoffResponse::decode(&mut cur).unwrap(), resp);
    }

    #[test]
    fn test_buffer_too_small_takes_rest() {
        let resp = BufferTooSmallResponse {
            size_needed: 4000,
            request_buffers: vec![0x02, 0x00, 0x01, 0xFF],
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        let decoded = BufferTooSmallResponse::decode(&mut cur).unwrap();
        assert_eq!(decoded, resp);
        assert!(cur.is_empty());
    }
}
