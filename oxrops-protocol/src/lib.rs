//! # oxrops-protocol
//!
//! Wire codec for the MAPI remote operation (ROP) protocol.
//!
//! This crate provides:
//! - Bounds-checked little-endian cursor primitives over raw buffers
//! - Property tag/value/row codecs driven by a negotiated column schema
//! - One strongly-typed request/response codec per ROP, dispatched by RopId
//! - ROP buffer framing (RopSize, rops list, trailing handle table)
//! - Response multiplexing against a negotiated output-buffer budget
//! - The transport status-code taxonomy distinct from per-ROP return values
//!
//! The codec is pure byte transformation: it performs no I/O and holds no
//! session state. Session-scoped concerns (the server-object handle table,
//! fast-transfer progress) live in `oxrops-session`.

pub mod buffer;
pub mod cursor;
pub mod error;
pub mod multiplex;
pub mod property;
pub mod rop;

pub use buffer::{RequestBuffer, ResponseBuffer};
pub use cursor::{ByteCursor, ByteWriter};
pub use error::{status, DecodeError, TransportFailure};
pub use multiplex::ResponseMultiplexer;
pub use rop::{DecodeContext, RopId, RopRequest, RopResponse};

/// Size of the RopSize field that leads every ROP buffer.
pub const ROP_SIZE_LEN: usize = 2;

/// Ceiling on the negotiated output-buffer size. A transport that already
/// offers this much and still cannot fit the first response reports the
/// response-too-big status instead of asking for a larger buffer.
pub const MAX_OUTPUT_BUFFER_SIZE: usize = 0x10008;

/// Sentinel stored in unused server-object handle table slots. Never a live
/// handle value.
pub const UNUSED_HANDLE: u32 = 0xFFFF_FFFF;

/// Sentinel byte count requesting the maximum transfer size
/// (RopReadStream, RopFastTransferSourceGetBuffer).
pub const MAX_READ_SENTINEL: u16 = 0xBABE;
