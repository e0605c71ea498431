//! Logon and store ROPs: RopLogon, receive-folder management, per-user
//! information, long-term id mapping, public-folder ghosting.

use super::{LongTermId, ReplicaServers};
use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::{status, DecodeError};
use crate::property::{PropertyRowSet, PropertyTag, PropertyType};
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Flags controlling the type of logon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogonFlags(u8);

impl LogonFlags {
    /// Logon is to a private mailbox; absent means public folders.
    pub const PRIVATE: u8 = 1 << 0;
    /// Undercover logon: the mailbox is not marked as in use.
    pub const UNDERCOVER: u8 = 1 << 1;
    /// Logon targets a ghosted public folder database.
    pub const GHOSTED: u8 = 1 << 2;
    /// Logon is made by the spooler process.
    pub const SPOOLER_PROCESS: u8 = 1 << 3;

    pub fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub fn private() -> Self {
        Self(Self::PRIVATE)
    }

    pub fn public_folder() -> Self {
        Self(0)
    }

    pub fn is_private(&self) -> bool {
        self.0 & Self::PRIVATE != 0
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

/// Broken-down time of the logon, as the server reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogonTime {
    pub seconds: u8,
    pub minutes: u8,
    pub hour: u8,
    /// Sunday = 0.
    pub day_of_week: u8,
    pub day: u8,
    /// January = 1.
    pub month: u8,
    pub year: u16,
}

impl LogonTime {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            seconds: cur.read_u8()?,
            minutes: cur.read_u8()?,
            hour: cur.read_u8()?,
            day_of_week: cur.read_u8()?,
            day: cur.read_u8()?,
            month: cur.read_u8()?,
            year: cur.read_u16()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.seconds);
        w.write_u8(self.minutes);
        w.write_u8(self.hour);
        w.write_u8(self.day_of_week);
        w.write_u8(self.day);
        w.write_u8(self.month);
        w.write_u16(self.year);
    }

    /// Converts to a UTC timestamp, if the fields form a valid date.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(
            self.year as i32,
            self.month as u32,
            self.day as u32,
            self.hour as u32,
            self.minutes as u32,
            self.seconds as u32,
        )
        .single()
    }
}

/// RopLogon request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogonRequest {
    pub logon_id: u8,
    pub output_handle_index: u8,
    pub logon_flags: LogonFlags,
    pub open_flags: u32,
    pub store_state: u32,
    /// Distinguished name of the mailbox to log on to. Absent for
    /// public-folder logons.
    pub essdn: Option<String>,
}

impl LogonRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let output_handle_index = cur.read_u8()?;
        let logon_flags = LogonFlags::new(cur.read_u8()?);
        let open_flags = cur.read_u32()?;
        let store_state = cur.read_u32()?;
        let essdn_size = cur.read_u16()? as usize;
        let essdn = if essdn_size > 0 {
            let raw = cur.read_bytes(essdn_size)?;
            if raw.last() != Some(&0) {
                return Err(DecodeError::UnterminatedString);
            }
            let s = std::str::from_utf8(&raw[..essdn_size - 1])
                .map_err(|_| DecodeError::InvalidString8)?;
            Some(s.to_string())
        } else {
            None
        };
        Ok(Self {
            logon_id,
            output_handle_index,
            logon_flags,
            open_flags,
            store_state,
            essdn,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.logon_flags.bits());
        w.write_u32(self.open_flags);
        w.write_u32(self.store_state);
        match &self.essdn {
            Some(essdn) => {
                w.write_u16((essdn.len() + 1) as u16);
                w.write_null_terminated_ascii(essdn);
            }
            None => w.write_u16(0),
        }
    }
}

/// RopLogon success body for a private-mailbox logon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogonPrivate {
    pub output_handle_index: u8,
    pub logon_flags: LogonFlags,
    /// The thirteen special folders of the mailbox.
    pub folder_ids: [u64; 13],
    pub response_flags: u8,
    pub mailbox_guid: Uuid,
    pub replica_id: u16,
    pub replica_guid: Uuid,
    pub logon_time: LogonTime,
    /// FILETIME of the last gateway address routing table change.
    pub gwart_time: u64,
    pub store_state: u32,
}

/// RopLogon success body for a public-folders logon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogonPublicFolder {
    pub output_handle_index: u8,
    pub logon_flags: LogonFlags,
    pub folder_ids: [u64; 13],
    pub replica_id: u16,
    pub replica_guid: Uuid,
    /// Not used by clients; servers are expected to send all zeroes, but
    /// the value is carried as-is because it is server-defined.
    pub per_user_guid: Uuid,
}

/// RopLogon redirect body (`ReturnValue` 0x00000478).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogonRedirect {
    pub output_handle_index: u8,
    pub logon_flags: LogonFlags,
    /// The server the client must reconnect to.
    pub server_name: String,
}

/// RopLogon response. The failure form is any `ReturnValue` outside
/// {0x00000000, 0x00000478}.
#[derive(Debug, Clone, PartialEq)]
pub enum LogonResponse {
    Private(LogonPrivate),
    PublicFolder(LogonPublicFolder),
    Redirect(LogonRedirect),
    Failure {
        output_handle_index: u8,
        return_value: u32,
    },
}

impl LogonResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let output_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        match return_value {
            status::EC_NONE => {
                let logon_flags = LogonFlags::new(cur.read_u8()?);
                let mut folder_ids = [0u64; 13];
                for id in folder_ids.iter_mut() {
                    *id = cur.read_u64()?;
                }
                if logon_flags.is_private() {
                    Ok(LogonResponse::Private(LogonPrivate {
                        output_handle_index,
                        logon_flags,
                        folder_ids,
                        response_flags: cur.read_u8()?,
                        mailbox_guid: cur.read_guid()?,
                        replica_id: cur.read_u16()?,
                        replica_guid: cur.read_guid()?,
                        logon_time: LogonTime::decode(cur)?,
                        gwart_time: cur.read_u64()?,
                        store_state: cur.read_u32()?,
                    }))
                } else {
                    Ok(LogonResponse::PublicFolder(LogonPublicFolder {
                        output_handle_index,
                        logon_flags,
                        folder_ids,
                        replica_id: cur.read_u16()?,
                        replica_guid: cur.read_guid()?,
                        per_user_guid: cur.read_guid()?,
                    }))
                }
            }
            status::EC_WRONG_SERVER => {
                let logon_flags = LogonFlags::new(cur.read_u8()?);
                let size = cur.read_u8()? as usize;
                let server_name = if size > 0 {
                    let raw = cur.read_bytes(size)?;
                    if raw.last() != Some(&0) {
                        return Err(DecodeError::UnterminatedString);
                    }
                    std::str::from_utf8(&raw[..size - 1])
                        .map_err(|_| DecodeError::InvalidString8)?
                        .to_string()
                } else {
                    String::new()
                };
                Ok(LogonResponse::Redirect(LogonRedirect {
                    output_handle_index,
                    logon_flags,
                    server_name,
                }))
            }
            _ => Ok(LogonResponse::Failure {
                output_handle_index,
                return_value,
            }),
        }
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            LogonResponse::Private(body) => {
                w.write_u8(body.output_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u8(body.logon_flags.bits());
                for id in &body.folder_ids {
                    w.write_u64(*id);
                }
                w.write_u8(body.response_flags);
                w.write_guid(&body.mailbox_guid);
                w.write_u16(body.replica_id);
                w.write_guid(&body.replica_guid);
                body.logon_time.encode(w);
                w.write_u64(body.gwart_time);
                w.write_u32(body.store_state);
            }
            LogonResponse::PublicFolder(body) => {
                w.write_u8(body.output_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u8(body.logon_flags.bits());
                for id in &body.folder_ids {
                    w.write_u64(*id);
                }
                w.write_u16(body.replica_id);
                w.write_guid(&body.replica_guid);
                w.write_guid(&body.per_user_guid);
            }
            LogonResponse::Redirect(body) => {
                w.write_u8(body.output_handle_index);
                w.write_u32(status::EC_WRONG_SERVER);
                w.write_u8(body.logon_flags.bits());
                if body.server_name.is_empty() {
                    w.write_u8(0);
                } else {
                    w.write_u8((body.server_name.len() + 1) as u8);
                    w.write_null_terminated_ascii(&body.server_name);
                }
            }
            LogonResponse::Failure {
                output_handle_index,
                return_value,
            } => {
                debug_assert!(
                    *return_value != status::EC_NONE && *return_value != status::EC_WRONG_SERVER
                );
                w.write_u8(*output_handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

/// RopGetReceiveFolder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetReceiveFolderRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub message_class: String,
}

impl GetReceiveFolderRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            message_class: cur.read_null_terminated_ascii()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_null_terminated_ascii(&self.message_class);
    }
}

/// RopGetReceiveFolder response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetReceiveFolderResponse {
    Success {
        input_handle_index: u8,
        folder_id: u64,
        /// The message class the receive folder is actually configured for.
        explicit_message_class: String,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetReceiveFolderResponse {
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
            folder_id: cur.read_u64()?,
            explicit_message_class: cur.read_null_terminated_ascii()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                folder_id,
                explicit_message_class,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u64(*folder_id);
                w.write_null_terminated_ascii(explicit_message_class);
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

/// RopSetReceiveFolder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetReceiveFolderRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub folder_id: u64,
    pub message_class: String,
}

impl SetReceiveFolderRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            folder_id: cur.read_u64()?,
            message_class: cur.read_null_terminated_ascii()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.folder_id);
        w.write_null_terminated_ascii(&self.message_class);
    }
}

/// RopSetReceiveFolder response. Success and failure share the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetReceiveFolderResponse {
    pub input_handle_index: u8,
    pub return_value: u32,
}

impl SetReceiveFolderResponse {
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

/// The fixed column schema of the receive-folder table: FolderId,
/// MessageClass, LastModificationTime - exactly these three, in this order.
pub fn receive_folder_table_columns() -> [PropertyTag; 3] {
    [
        PropertyTag::new(PropertyType::Integer64, 0x6748),
        PropertyTag::new(PropertyType::String8, 0x001A),
        PropertyTag::new(PropertyType::Time, 0x3008),
    ]
}

/// RopGetReceiveFolderTable request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetReceiveFolderTableRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
}

impl GetReceiveFolderTableRequest {
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

/// RopGetReceiveFolderTable response. Rows always decode against the
/// fixed three-column schema.
#[derive(Debug, Clone, PartialEq)]
pub enum GetReceiveFolderTableResponse {
    Success {
        input_handle_index: u8,
        rows: PropertyRowSet,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetReceiveFolderTableResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let row_count = cur.read_u32()? as usize;
        let rows = PropertyRowSet::decode(cur, &receive_folder_table_columns(), row_count)?;
        Ok(Self::Success {
            input_handle_index,
            rows,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) -> Result<(), DecodeError> {
        match self {
            Self::Success {
                input_handle_index,
                rows,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u32(rows.len() as u32);
                rows.encode(&receive_folder_table_columns(), w)
            }
            Self::Failure {
                input_handle_index,
                return_value,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(*return_value);
                Ok(())
            }
        }
    }
}

/// RopGetStoreState request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetStoreStateRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
}

impl GetStoreStateRequest {
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

/// RopGetStoreState response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetStoreStateResponse {
    Success {
        input_handle_index: u8,
        store_state: u32,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetStoreStateResponse {
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
            store_state: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                store_state,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u32(*store_state);
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

/// RopGetOwningServers request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOwningServersRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub folder_id: u64,
}

impl GetOwningServersRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            folder_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.folder_id);
    }
}

/// RopGetOwningServers response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetOwningServersResponse {
    Success {
        input_handle_index: u8,
        servers: ReplicaServers,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetOwningServersResponse {
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
            servers: ReplicaServers::decode(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                servers,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                servers.encode(w);
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

/// RopPublicFolderIsGhosted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicFolderIsGhostedRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub folder_id: u64,
}

impl PublicFolderIsGhostedRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            folder_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.folder_id);
    }
}

/// RopPublicFolderIsGhosted response. The server list is on the wire iff
/// the folder is ghosted - it is omitted entirely, not zero-filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicFolderIsGhostedResponse {
    Success {
        input_handle_index: u8,
        ghosted: Option<ReplicaServers>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl PublicFolderIsGhostedResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let is_ghosted = cur.read_bool()?;
        let ghosted = if is_ghosted {
            Some(ReplicaServers::decode(cur)?)
        } else {
            None
        };
        Ok(Self::Success {
            input_handle_index,
            ghosted,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                ghosted,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_bool(ghosted.is_some());
                if let Some(servers) = ghosted {
                    servers.encode(w);
                }
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

/// RopLongTermIdFromId request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongTermIdFromIdRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub object_id: u64,
}

impl LongTermIdFromIdRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            object_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.object_id);
    }
}

/// RopLongTermIdFromId response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongTermIdFromIdResponse {
    Success {
        input_handle_index: u8,
        long_term_id: LongTermId,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl LongTermIdFromIdResponse {
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
            long_term_id: LongTermId::decode(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                long_term_id,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                long_term_id.encode(w);
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

/// RopIdFromLongTermId request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdFromLongTermIdRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub long_term_id: LongTermId,
}

impl IdFromLongTermIdRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            long_term_id: LongTermId::decode(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        self.long_term_id.encode(w);
    }
}

/// RopIdFromLongTermId response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdFromLongTermIdResponse {
    Success {
        input_handle_index: u8,
        object_id: u64,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl IdFromLongTermIdResponse {
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
            object_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                object_id,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u64(*object_id);
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

/// RopGetPerUserLongTermIds request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetPerUserLongTermIdsRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub database_guid: Uuid,
}

impl GetPerUserLongTermIdsRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            database_guid: cur.read_guid()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_guid(&self.database_guid);
    }
}

/// RopGetPerUserLongTermIds response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetPerUserLongTermIdsResponse {
    Success {
        input_handle_index: u8,
        long_term_ids: Vec<LongTermId>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetPerUserLongTermIdsResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let count = cur.read_u16()? as usize;
        let mut long_term_ids = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            long_term_ids.push(LongTermId::decode(cur)?);
        }
        Ok(Self::Success {
            input_handle_index,
            long_term_ids,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                long_term_ids,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u16(long_term_ids.len() as u16);
                for id in long_term_ids {
                    id.encode(w);
                }
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

/// RopGetPerUserGuid request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetPerUserGuidRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub long_term_id: LongTermId,
}

impl GetPerUserGuidRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            long_term_id: LongTermId::decode(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        self.long_term_id.encode(w);
    }
}

/// RopGetPerUserGuid response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetPerUserGuidResponse {
    Success {
        input_handle_index: u8,
        database_guid: Uuid,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetPerUserGuidResponse {
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
            database_guid: cur.read_guid()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                database_guid,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_guid(database_guid);
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

/// RopReadPerUserInformation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPerUserInformationRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub folder_id: LongTermId,
    pub reserved: u8,
    pub data_offset: u32,
    pub max_data_size: u16,
}

impl ReadPerUserInformationRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            folder_id: LongTermId::decode(cur)?,
            reserved: cur.read_u8()?,
            data_offset: cur.read_u32()?,
            max_data_size: cur.read_u16()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        self.folder_id.encode(w);
        w.write_u8(self.reserved);
        w.write_u32(self.data_offset);
        w.write_u16(self.max_data_size);
    }
}

/// RopReadPerUserInformation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadPerUserInformationResponse {
    Success {
        input_handle_index: u8,
        has_finished: bool,
        data: Vec<u8>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl ReadPerUserInformationResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let has_finished = cur.read_bool()?;
        let size = cur.read_u16()? as usize;
        Ok(Self::Success {
            input_handle_index,
            has_finished,
            data: cur.read_bytes(size)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                has_finished,
                data,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_bool(*has_finished);
                w.write_u16(data.len() as u16);
                w.write_bytes(data);
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

/// RopWritePerUserInformation request. The replica GUID is present only
/// for the first chunk (offset zero) of a private-mailbox logon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePerUserInformationRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub folder_id: LongTermId,
    pub has_finished: bool,
    pub data_offset: u32,
    pub data: Vec<u8>,
    pub replica_guid: Option<Uuid>,
}

impl WritePerUserInformationRequest {
    pub fn decode(cur: &mut ByteCursor<'_>, private_logon: bool) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let folder_id = LongTermId::decode(cur)?;
        let has_finished = cur.read_bool()?;
        let data_offset = cur.read_u32()?;
        let size = cur.read_u16()? as usize;
        let data = cur.read_bytes(size)?;
        let replica_guid = if data_offset == 0 && private_logon {
            Some(cur.read_guid()?)
        } else {
            None
        };
        Ok(Self {
            logon_id,
            input_handle_index,
            folder_id,
            has_finished,
            data_offset,
            data,
            replica_guid,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        self.folder_id.encode(w);
        w.write_bool(self.has_finished);
        w.write_u32(self.data_offset);
        w.write_u16(self.data.len() as u16);
        w.write_bytes(&self.data);
        if let Some(guid) = &self.replica_guid {
            w.write_guid(guid);
        }
    }
}

/// RopWritePerUserInformation response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritePerUserInformationResponse {
    pub input_handle_index: u8,
    pub return_value: u32,
}

impl WritePerUserInformationResponse {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{PropertyRow, PropertyValue};

    #[test]
    fn test_logon_request_roundtrip() {
        let req = LogonRequest {
            logon_id: 0,
            output_handle_index: 0,
            logon_flags: LogonFlags::private(),
            open_flags: 0x0100_0000,
            store_state: 0,
            essdn: Some("/o=First Organization/cn=Recipients/cn=user1".to_string()),
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(LogonRequest::decode(&mut cur).unwrap(), req);
        assert!(cur.is_empty());
    }

    #[test]
    fn test_logon_request_empty_essdn() {
        let req = LogonRequest {
            logon_id: 1,
            output_handle_index: 0,
            logon_flags: LogonFlags::public_folder(),
            open_flags: 0,
            store_state: 0,
            essdn: None,
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        // Header (3) + OpenFlags + StoreState + EssdnSize, no Essdn bytes.
        assert_eq!(bytes.len(), 3 + 4 + 4 + 2);
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(LogonRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_public_folder_logon_decode() {
        // OutputHandleIndex, ReturnValue 0, LogonFlags 0 (public), thirteen
        // zero folder ids, ReplId 0x0001, zero ReplGuid, zero PerUserGuid.
        let mut w = ByteWriter::new();
        w.write_u8(0);
        w.write_u32(0);
        w.write_u8(0x00);
        for _ in 0..13 {
            w.write_u64(0);
        }
        w.write_u16(0x0001);
        w.write_guid(&Uuid::nil());
        w.write_guid(&Uuid::nil());
        let bytes = w.into_bytes();

        let mut cur = ByteCursor::new(&bytes);
        match LogonResponse::decode(&mut cur).unwrap() {
            LogonResponse::PublicFolder(body) => {
                assert_eq!(body.folder_ids.len(), 13);
                assert_eq!(body.replica_id, 0x0001);
                assert_eq!(body.per_user_guid, Uuid::nil());
            }
            other => panic!("expected public-folder logon, got {other:?}"),
        }
        assert!(cur.is_empty());
    }

    #[test]
    fn test_private_logon_roundtrip() {
        let resp = LogonResponse::Private(LogonPrivate {
            output_handle_index: 0,
            logon_flags: LogonFlags::private(),
            folder_ids: [0x0001_0000_0000_0001; 13],
            response_flags: 0x07,
            mailbox_guid: Uuid::from_u128(0x1234),
            replica_id: 0x0004,
            replica_guid: Uuid::from_u128(0x5678),
            logon_time: LogonTime {
                seconds: 30,
                minutes: 15,
                hour: 9,
                day_of_week: 2,
                day: 17,
                month: 6,
                year: 2025,
            },
            gwart_time: 0x01DB_0000_0000_0000,
            store_state: 0,
        });
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(LogonResponse::decode(&mut cur).unwrap(), resp);
    }

    #[test]
    fn test_logon_redirect_roundtrip() {
        let resp = LogonResponse::Redirect(LogonRedirect {
            output_handle_index: 0,
            logon_flags: LogonFlags::private(),
            server_name: "MAILBOX-02".to_string(),
        });
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        // ServerNameSize counts the null terminator.
        assert_eq!(bytes[6], 11);

        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(LogonResponse::decode(&mut cur).unwrap(), resp);
    }

    #[test]
    fn test_logon_failure_is_not_redirect() {
        let mut w = ByteWriter::new();
        w.write_u8(0);
        w.write_u32(0x8004_0111);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            LogonResponse::decode(&mut cur).unwrap(),
            LogonResponse::Failure {
                output_handle_index: 0,
                return_value: 0x8004_0111
            }
        );
    }

    #[test]
    fn test_logon_time_to_datetime() {
        let time = LogonTime {
            seconds: 5,
            minutes: 30,
            hour: 14,
            day_of_week: 3,
            day: 25,
            month: 12,
            year: 2024,
        };
        let dt = time.to_datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-12-25T14:30:05+00:00");

        let invalid = LogonTime {
            month: 13,
            ..LogonTime::default()
        };
        assert!(invalid.to_datetime().is_none());
    }

    #[test]
    fn test_receive_folder_table_rows() {
        let columns = receive_folder_table_columns();
        assert_eq!(columns[0].property_type, PropertyType::Integer64);
        assert_eq!(columns[1].property_type, PropertyType::String8);
        assert_eq!(columns[2].property_type, PropertyType::Time);

        let resp = GetReceiveFolderTableResponse::Success {
            input_handle_index: 0,
            rows: PropertyRowSet::new(vec![PropertyRow::Standard(vec![
                PropertyValue::Integer64(0x42),
                PropertyValue::String8("IPM.Note".to_string()),
                PropertyValue::Time(0x01DA_1234_5678_9ABC),
            ])]),
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w).unwrap();
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            GetReceiveFolderTableResponse::decode(&mut cur).unwrap(),
            resp
        );
    }

    #[test]
    fn test_ghosted_response_roundtrip() {
        let ghosted = PublicFolderIsGhostedResponse::Success {
            input_handle_index: 1,
            ghosted: Some(ReplicaServers {
                cheap_server_count: 1,
                servers: vec!["EX01".to_string(), "EX02".to_string()],
            }),
        };
        let mut w = ByteWriter::new();
        ghosted.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            PublicFolderIsGhostedResponse::decode(&mut cur).unwrap(),
            ghosted
        );

        let not_ghosted = PublicFolderIsGhostedResponse::Success {
            input_handle_index: 1,
            ghosted: None,
        };
        let mut w = ByteWriter::new();
        not_ghosted.encode(&mut w);
        // Handle + ReturnValue + IsGhosted byte, nothing after.
        assert_eq!(w.len(), 6);
    }

    #[test]
    fn test_per_user_information_roundtrip() {
        let req = WritePerUserInformationRequest {
            logon_id: 0,
            input_handle_index: 2,
            folder_id: LongTermId::new(Uuid::from_u128(9), [1, 2, 3, 4, 5, 6]),
            has_finished: true,
            data_offset: 0,
            data: vec![0xAB; 17],
            replica_guid: Some(Uuid::from_u128(77)),
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            WritePerUserInformationRequest::decode(&mut cur, true).unwrap(),
            req
        );

        // Non-zero offset: no trailing GUID on the wire.
        let req = WritePerUserInformationRequest {
            data_offset: 4096,
            replica_guid: None,
            ..req
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            WritePerUserInformationRequest::decode(&mut cur, true).unwrap(),
            req
        );
    }
}
