//! # oxrops-session
//!
//! Session-scoped state for the ROP codec:
//! - The server-object handle table, allocated/resolved/released by the
//!   ROPs of one session, with the configurable resolution policy for
//!   deployments whose servers resolve certain ROPs by an alternate path
//! - Fast-transfer progress that persists across repeated GetBuffer and
//!   PutBuffer calls
//! - Table-population progress and the negotiated column schema
//! - A registry of concurrently running sessions
//!
//! ROPs within one buffer run strictly in order against their session's
//! state; sessions themselves are independent and may run concurrently.

pub mod error;
pub mod handle;
pub mod session;
pub mod table;
pub mod transfer;

pub use error::SessionError;
pub use handle::{HandleResolutionPolicy, HandleTable};
pub use session::{LogonKind, Session, SessionConfig, SessionRegistry};
pub use table::{TableOperation, TableProgress};
pub use transfer::FastTransferProgress;
