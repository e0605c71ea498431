//! Decode errors and the transport status-code taxonomy.
//!
//! Failures fall into three tiers that must never bleed into each other:
//!
//! 1. Transport/parse failures - the buffer itself cannot be decoded. Fatal
//!    for the whole call, reported as `ecRpcFormat`.
//! 2. Capacity failures - a response does not fit the negotiated output
//!    budget. Resolved by RopBufferTooSmall substitution or one of the
//!    buffer-size status codes, never by silent truncation.
//! 3. Per-ROP logical failures - a non-zero `ReturnValue` on a well-formed
//!    response. Data, not an error: always delivered to the caller intact.

use crate::rop::RopId;
use thiserror::Error;

/// Wire status codes shared between per-ROP return values and the
/// transport-level call result.
///
/// These values are part of the protocol contract and must remain stable.
pub mod status {
    /// Success.
    pub const EC_NONE: u32 = 0x0000_0000;

    /// RopLogon redirect: the client must reconnect to the server named in
    /// the redirect response.
    pub const EC_WRONG_SERVER: u32 = 0x0000_0478;

    /// Null destination object in the move/copy family. The failure response
    /// echoes the destination handle index.
    pub const EC_NULL_DESTINATION_OBJECT: u32 = 0x0000_0503;

    /// The ROP input buffer could not be parsed. Fatal for the whole call.
    pub const EC_RPC_FORMAT: u32 = 0x0000_04B6;

    /// The response exceeds the negotiated maximum output-buffer size even
    /// at the size ceiling.
    pub const EC_BUFFER_TOO_SMALL: u32 = 0x0000_047D;
}

/// Structural decode failures.
///
/// Any of these aborts the buffer being decoded: ill-formed input never
/// produces a partially-valid structure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated buffer: need {needed} more bytes, {remaining} remaining")]
    TruncatedBuffer { needed: usize, remaining: usize },

    #[error("unknown rop id: {0:#04x}")]
    UnknownRopId(u8),

    #[error("reserved rop id on the wire: {0:#04x}")]
    ReservedRopId(u8),

    #[error("rop {0:?} is not valid in a request buffer")]
    NotARequest(RopId),

    #[error("rop {0:?} is not valid in a response buffer")]
    NotAResponse(RopId),

    #[error("invalid RopSize {rop_size}: buffer holds {available} bytes")]
    InvalidRopSize { rop_size: u16, available: usize },

    #[error("handle table is not a u32 array: {trailing} trailing bytes")]
    MisalignedHandleTable { trailing: usize },

    #[error("row has {actual} values, column schema has {expected}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("no column schema negotiated for decoding {rop:?} row data")]
    MissingColumnSchema { rop: RopId },

    #[error("{field} declares {declared} bytes, payload used {actual}")]
    SizeMismatch {
        field: &'static str,
        declared: usize,
        actual: usize,
    },

    #[error("unknown property type: {0:#06x}")]
    UnknownPropertyType(u16),

    #[error("invalid {field} discriminant: {value:#x}")]
    InvalidDiscriminant { field: &'static str, value: u32 },

    #[error("unterminated string")]
    UnterminatedString,

    #[error("string8 value is not valid text")]
    InvalidString8,

    #[error("invalid UTF-16 string value")]
    InvalidUtf16,
}

/// Transport-level call failure, classified per the three-tier taxonomy.
///
/// Per-ROP `ReturnValue` failures are deliberately absent: they are decoded
/// response data, not call failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportFailure {
    /// The input buffer could not be parsed. No ROP in the call executed.
    #[error("unparseable rop buffer: {0}")]
    RpcFormat(#[from] DecodeError),

    /// The first response alone exceeds the negotiated budget, but a larger
    /// budget is still negotiable.
    #[error("first response needs {needed} bytes, budget is {budget}")]
    BufferTooSmall { needed: usize, budget: usize },

    /// The first response exceeds even the output-buffer size ceiling.
    #[error("response needs {needed} bytes, exceeding the size ceiling")]
    ResponseTooBig { needed: usize },
}

impl TransportFailure {
    /// The wire status code reported for this failure.
    pub fn status_code(&self) -> u32 {
        match self {
            TransportFailure::RpcFormat(_) => status::EC_RPC_FORMAT,
            TransportFailure::BufferTooSmall { .. } => status::EC_BUFFER_TOO_SMALL,
            TransportFailure::ResponseTooBig { .. } => status::EC_BUFFER_TOO_SMALL,
        }
    }

    /// Whether retrying the call with a larger negotiated buffer can help.
    pub fn is_renegotiable(&self) -> bool {
        matches!(self, TransportFailure::BufferTooSmall { .. })
    }
}

/// Classifies a first-response capacity overrun by where the size was
/// exceeded: below the ceiling the transport may renegotiate a larger
/// buffer, at the ceiling the response is simply too big.
pub fn classify_capacity(needed: usize, budget: usize) -> TransportFailure {
    if budget >= crate::MAX_OUTPUT_BUFFER_SIZE {
        TransportFailure::ResponseTooBig { needed }
    } else {
        TransportFailure::BufferTooSmall { needed, budget }
    }
}
