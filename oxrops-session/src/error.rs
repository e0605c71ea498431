//! Session error types.

use oxrops_protocol::rop::fast_transfer::TransferStatus;
use oxrops_protocol::rop::TableStatus;
use thiserror::Error;

/// Errors from session-scoped bookkeeping.
///
/// Handle errors surface to the peer as per-ROP return values; they are
/// never escalated to transport failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("handle index {index} out of range (table has {len} slots)")]
    InvalidHandleIndex { index: usize, len: usize },

    #[error("handle index {index} references a released slot")]
    ReleasedHandle { index: usize },

    #[error("no logon established for this session")]
    NotLoggedOn,

    #[error("fast transfer on handle {handle_index} already finished")]
    TransferFinished { handle_index: u8 },

    #[error("fast transfer progress went backwards: {from} -> {to}")]
    TransferRegressed { from: u16, to: u16 },

    #[error("no table state tracked for handle {handle_index}")]
    UnknownTable { handle_index: u8 },

    #[error("table status {status:?} is not a valid outcome of {operation}")]
    UnexpectedTableStatus {
        operation: &'static str,
        status: TableStatus,
    },

    #[error("transfer status {status:?} reported before the transfer was configured")]
    TransferNotConfigured { status: TransferStatus },
}
