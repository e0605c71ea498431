//! Response multiplexing against the negotiated output-buffer budget.
//!
//! Responses are serialized in order, accumulating bytes. The first
//! response that would overflow the budget is replaced by a
//! RopBufferTooSmall marker carrying the byte size the omitted response
//! needed plus the unprocessed remainder of the request buffer, and
//! packing stops. The output never exceeds the budget, and packing never
//! touches the handle table it is given.

use crate::cursor::ByteWriter;
use crate::error::{classify_capacity, TransportFailure};
use crate::rop::other::BufferTooSmallResponse;
use crate::rop::{DecodeContext, RopId, RopResponse};
use crate::ROP_SIZE_LEN;
use bytes::Bytes;

/// RopId byte plus the SizeNeeded field.
const MARKER_HEADER_LEN: usize = 3;

/// A response queued for packing, paired with the raw request bytes it
/// answers so they can be echoed back on truncation.
#[derive(Debug, Clone)]
pub struct OutboundRop {
    pub response: RopResponse,
    pub request_bytes: Bytes,
}

impl OutboundRop {
    pub fn new(response: RopResponse, request_bytes: Bytes) -> Self {
        Self {
            response,
            request_bytes,
        }
    }
}

/// Result of packing one output buffer.
#[derive(Debug, Clone)]
pub struct PackedBuffer {
    /// The finished output buffer: RopSize, rops list, handle table.
    pub buffer: Bytes,
    /// How many of the queued responses made it into the buffer.
    pub included: usize,
    /// Whether a RopBufferTooSmall marker was substituted for the rest.
    pub truncated: bool,
}

/// Packs built responses into a budgeted output buffer.
#[derive(Debug, Clone, Copy)]
pub struct ResponseMultiplexer<'a> {
    ctx: DecodeContext<'a>,
    budget: usize,
}

impl<'a> ResponseMultiplexer<'a> {
    /// Creates a multiplexer for the negotiated maximum output size.
    pub fn new(budget: usize) -> Self {
        Self {
            ctx: DecodeContext::default(),
            budget,
        }
    }

    /// Supplies the decode context used to serialize row-bearing
    /// responses.
    pub fn with_context(mut self, ctx: DecodeContext<'a>) -> Self {
        self.ctx = ctx;
        self
    }

    /// Serializes as many responses as fit, in order.
    ///
    /// If even the first response exceeds the budget the call fails with
    /// the classified capacity error instead of emitting a useless
    /// buffer.
    pub fn pack(
        &self,
        responses: &[OutboundRop],
        handle_table: &[u32],
    ) -> Result<PackedBuffer, TransportFailure> {
        let overhead = ROP_SIZE_LEN + handle_table.len() * 4;
        let rops_budget = self.budget.saturating_sub(overhead);

        let mut encoded = Vec::with_capacity(responses.len());
        for rop in responses {
            let mut w = ByteWriter::new();
            rop.response
                .encode(&self.ctx, &mut w)
                .map_err(TransportFailure::RpcFormat)?;
            encoded.push(w.into_bytes());
        }

        let mut used = 0usize;
        let mut included = 0usize;
        for bytes in &encoded {
            if used + bytes.len() > rops_budget {
                break;
            }
            used += bytes.len();
            included += 1;
        }

        if included == 0 && !responses.is_empty() {
            let needed = overhead + encoded[0].len();
            return Err(classify_capacity(needed, self.budget));
        }

        let mut rops = ByteWriter::with_capacity(rops_budget.min(used + 64));
        for bytes in encoded.iter().take(included) {
            rops.write_bytes(bytes);
        }

        let truncated = included < responses.len();
        if truncated {
            // Make room for the marker head, dropping included responses
            // if the buffer is packed to the last byte.
            while included > 0 && used + MARKER_HEADER_LEN > rops_budget {
                included -= 1;
                used = encoded.iter().take(included).map(Bytes::len).sum();
            }
            if used + MARKER_HEADER_LEN > rops_budget {
                let needed = overhead + encoded[0].len();
                return Err(classify_capacity(needed, self.budget));
            }

            let mut remainder = Vec::new();
            for rop in &responses[included..] {
                remainder.extend_from_slice(&rop.request_bytes);
            }
            // The echoed request tail may itself have to be clipped to
            // honor the budget.
            let room = rops_budget - used - MARKER_HEADER_LEN;
            remainder.truncate(room);

            let size_needed = encoded[included].len().min(u16::MAX as usize) as u16;
            let marker = BufferTooSmallResponse {
                size_needed,
                request_buffers: remainder,
            };

            let mut rops = ByteWriter::with_capacity(used + MARKER_HEADER_LEN);
            for bytes in encoded.iter().take(included) {
                rops.write_bytes(bytes);
            }
            rops.write_u8(RopId::BufferTooSmall as u8);
            marker.encode(&mut rops);
            return Ok(PackedBuffer {
                buffer: self.frame(&rops.into_bytes(), handle_table),
                included,
                truncated: true,
            });
        }

        Ok(PackedBuffer {
            buffer: self.frame(&rops.into_bytes(), handle_table),
            included,
            truncated: false,
        })
    }

    fn frame(&self, rops: &[u8], handle_table: &[u32]) -> Bytes {
        let mut w = ByteWriter::with_capacity(ROP_SIZE_LEN + rops.len() + handle_table.len() * 4);
        w.write_u16((rops.len() + ROP_SIZE_LEN) as u16);
        w.write_bytes(rops);
        for handle in handle_table {
            w.write_u32(*handle);
        }
        w.into_bytes()
    }
}

/// Convenience check used by callers that validate their own budgets.
pub fn fits_in_budget(encoded_len: usize, handle_count: usize, budget: usize) -> bool {
    ROP_SIZE_LEN + encoded_len + handle_count * 4 <= budget
}
