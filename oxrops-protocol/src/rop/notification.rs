//! Notification ROPs: subscription registration and the server-pushed
//! RopNotify/RopPending responses.
//!
//! `NotificationData` is the most conditional structure in the protocol:
//! the 16-bit notification flags select which field groups follow, the
//! table-event subtype selects row fields inside the table group, and the
//! M flag (0x8000) switches several ids between folder-only and
//! folder+message forms.

use super::GlobalIdentifier;
use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;

/// Notification type bits carried in the low 12 bits of the flags.
pub mod notification_type {
    pub const NEW_MAIL: u16 = 0x0002;
    pub const OBJECT_CREATED: u16 = 0x0004;
    pub const OBJECT_DELETED: u16 = 0x0008;
    pub const OBJECT_MODIFIED: u16 = 0x0010;
    pub const OBJECT_MOVED: u16 = 0x0020;
    pub const OBJECT_COPIED: u16 = 0x0040;
    pub const SEARCH_COMPLETED: u16 = 0x0080;
    pub const TABLE_MODIFIED: u16 = 0x0100;
    pub const STATUS_OBJECT_MODIFIED: u16 = 0x0200;
}

/// Flag modifier bits in the high nibble of the notification flags.
pub mod notification_flag {
    /// Total message count field is present.
    pub const TOTAL: u16 = 0x1000;
    /// Unread message count field is present.
    pub const UNREAD: u16 = 0x2000;
    /// The event occurred in a search folder.
    pub const SEARCH: u16 = 0x4000;
    /// The event concerns a message, not a folder.
    pub const MESSAGE: u16 = 0x8000;
}

/// Table-event subtypes for TableModified notifications.
pub mod table_event {
    pub const TABLE_CHANGED: u16 = 0x0001;
    pub const TABLE_ROW_ADDED: u16 = 0x0003;
    pub const TABLE_ROW_DELETED: u16 = 0x0004;
    pub const TABLE_ROW_MODIFIED: u16 = 0x0005;
    pub const TABLE_RESTRICT_DONE: u16 = 0x0007;
}

/// RopRegisterNotification request. Folder and message ids are present
/// only when the subscription is not store-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterNotificationRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub notification_types: u8,
    pub reserved: u8,
    pub scope: Option<(u64, u64)>,
}

impl RegisterNotificationRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let output_handle_index = cur.read_u8()?;
        let notification_types = cur.read_u8()?;
        let reserved = cur.read_u8()?;
        let want_whole_store = cur.read_bool()?;
        let scope = if want_whole_store {
            None
        } else {
            Some((cur.read_u64()?, cur.read_u64()?))
        };
        Ok(Self {
            logon_id,
            input_handle_index,
            output_handle_index,
            notification_types,
            reserved,
            scope,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.notification_types);
        w.write_u8(self.reserved);
        w.write_bool(self.scope.is_none());
        if let Some((folder_id, message_id)) = self.scope {
            w.write_u64(folder_id);
            w.write_u64(message_id);
        }
    }
}

/// Header-only RopRegisterNotification response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterNotificationResponse {
    pub output_handle_index: u8,
    pub return_value: u32,
}

impl RegisterNotificationResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            output_handle_index: cur.read_u8()?,
            return_value: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.output_handle_index);
        w.write_u32(self.return_value);
    }
}

/// Row fields of a TableModified notification; present only for the
/// row-added/deleted/modified subtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRowEvent {
    pub folder_id: u64,
    /// Present iff the M flag is set.
    pub message: Option<(u64, u32)>,
    /// Insert-location fields, present for row-added and row-modified.
    pub insert_after_folder_id: Option<u64>,
    pub insert_after_message: Option<(u64, u32)>,
    pub row_data: Option<Vec<u8>>,
}

/// The flag-driven body of a RopNotify response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationData {
    pub notification_flags: u16,
    pub table_event_type: Option<u16>,
    pub table_row: Option<TableRowEvent>,
    pub hierarchy_changed: Option<bool>,
    pub folder_ids: Option<Vec<GlobalIdentifier>>,
    pub ics_change_numbers: Option<Vec<u32>>,
    pub folder_id: Option<u64>,
    pub message_id: Option<u64>,
    pub parent_folder_id: Option<u64>,
    pub old_folder_id: Option<u64>,
    pub old_message_id: Option<u64>,
    pub old_parent_folder_id: Option<u64>,
    pub tags: Option<Vec<u32>>,
    pub total_message_count: Option<u32>,
    pub unread_message_count: Option<u32>,
    /// New-mail fields: message flags, unicode flag, message class.
    pub new_mail: Option<(u32, bool, String)>,
}

impl NotificationData {
    fn notification_kind(&self) -> u16 {
        self.notification_flags & 0x0FFF
    }

    fn is_message_event(&self) -> bool {
        self.notification_flags & notification_flag::MESSAGE != 0
    }

    fn has_folder_id(&self) -> bool {
        self.notification_flags
            & (notification_type::TABLE_MODIFIED
                | notification_type::STATUS_OBJECT_MODIFIED
                | 0x0400)
            == 0
    }

    fn has_parent_folder_id(&self) -> bool {
        let kind_bits = self.notification_flags
            & (notification_type::OBJECT_CREATED
                | notification_type::OBJECT_DELETED
                | notification_type::OBJECT_MOVED
                | notification_type::OBJECT_COPIED);
        let search = self.notification_flags & notification_flag::SEARCH != 0;
        let message = self.is_message_event();
        kind_bits != 0 && (search == message)
    }

    fn has_old_ids(&self) -> bool {
        self.notification_flags
            & (notification_type::OBJECT_MOVED | notification_type::OBJECT_COPIED)
            != 0
    }

    fn has_tags(&self) -> bool {
        self.notification_flags
            & (notification_type::OBJECT_CREATED | notification_type::OBJECT_MODIFIED)
            != 0
    }

    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut data = NotificationData {
            notification_flags: cur.read_u16()?,
            ..NotificationData::default()
        };

        if data.notification_flags & notification_type::TABLE_MODIFIED != 0 {
            data.table_event_type = Some(cur.read_u16()?);
        }

        if matches!(
            data.table_event_type,
            Some(table_event::TABLE_ROW_ADDED)
                | Some(table_event::TABLE_ROW_DELETED)
                | Some(table_event::TABLE_ROW_MODIFIED)
        ) {
            let folder_id = cur.read_u64()?;
            let message = if data.is_message_event() {
                Some((cur.read_u64()?, cur.read_u32()?))
            } else {
                None
            };
            let mut insert_after_folder_id = None;
            let mut insert_after_message = None;
            let mut row_data = None;
            if matches!(
                data.table_event_type,
                Some(table_event::TABLE_ROW_ADDED) | Some(table_event::TABLE_ROW_MODIFIED)
            ) {
                insert_after_folder_id = Some(cur.read_u64()?);
                if data.is_message_event() {
                    insert_after_message = Some((cur.read_u64()?, cur.read_u32()?));
                }
                let size = cur.read_u16()? as usize;
                row_data = Some(cur.read_bytes(size)?);
            }
            data.table_row = Some(TableRowEvent {
                folder_id,
                message,
                insert_after_folder_id,
                insert_after_message,
                row_data,
            });
        }

        if data.notification_flags & notification_type::STATUS_OBJECT_MODIFIED != 0 {
            data.hierarchy_changed = Some(cur.read_bool()?);
            let count = cur.read_u32()? as usize;
            let mut folder_ids = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                folder_ids.push(GlobalIdentifier::decode(cur)?);
            }
            let mut change_numbers = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                change_numbers.push(cur.read_u32()?);
            }
            data.folder_ids = Some(folder_ids);
            data.ics_change_numbers = Some(change_numbers);
        }

        if data.has_folder_id() {
            data.folder_id = Some(cur.read_u64()?);
            if data.is_message_event() {
                data.message_id = Some(cur.read_u64()?);
            }
        }

        if data.has_parent_folder_id() {
            data.parent_folder_id = Some(cur.read_u64()?);
        }

        if data.has_old_ids() {
            data.old_folder_id = Some(cur.read_u64()?);
            if data.is_message_event() {
                data.old_message_id = Some(cur.read_u64()?);
            } else {
                data.old_parent_folder_id = Some(cur.read_u64()?);
            }
        }

        if data.has_tags() {
            let count = cur.read_u16()? as usize;
            let mut tags = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                tags.push(cur.read_u32()?);
            }
            data.tags = Some(tags);
        }

        if data.notification_flags & notification_flag::TOTAL != 0 {
            data.total_message_count = Some(cur.read_u32()?);
        }
        if data.notification_flags & notification_flag::UNREAD != 0 {
            data.unread_message_count = Some(cur.read_u32()?);
        }

        if data.notification_kind() == notification_type::NEW_MAIL {
            let message_flags = cur.read_u32()?;
            let unicode = cur.read_bool()?;
            let message_class = if unicode {
                cur.read_null_terminated_unicode()?
            } else {
                cur.read_null_terminated_ascii()?
            };
            data.new_mail = Some((message_flags, unicode, message_class));
        }

        Ok(data)
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u16(self.notification_flags);

        if let Some(event_type) = self.table_event_type {
            w.write_u16(event_type);
        }

        if let Some(row) = &self.table_row {
            w.write_u64(row.folder_id);
            if let Some((message_id, instance)) = row.message {
                w.write_u64(message_id);
                w.write_u32(instance);
            }
            if let Some(insert_after) = row.insert_after_folder_id {
                w.write_u64(insert_after);
                if let Some((message_id, instance)) = row.insert_after_message {
                    w.write_u64(message_id);
                    w.write_u32(instance);
                }
                let row_data = row.row_data.as_deref().unwrap_or(&[]);
                w.write_u16(row_data.len() as u16);
                w.write_bytes(row_data);
            }
        }

        if let (Some(changed), Some(folder_ids), Some(change_numbers)) = (
            self.hierarchy_changed,
            &self.folder_ids,
            &self.ics_change_numbers,
        ) {
            w.write_bool(changed);
            w.write_u32(folder_ids.len() as u32);
            for id in folder_ids {
                id.encode(w);
            }
            for number in change_numbers {
                w.write_u32(*number);
            }
        }

        if let Some(folder_id) = self.folder_id {
            w.write_u64(folder_id);
            if let Some(message_id) = self.message_id {
                w.write_u64(message_id);
            }
        }

        if let Some(parent) = self.parent_folder_id {
            w.write_u64(parent);
        }

        if let Some(old_folder_id) = self.old_folder_id {
            w.write_u64(old_folder_id);
            if let Some(old_message_id) = self.old_message_id {
                w.write_u64(old_message_id);
            } else if let Some(old_parent) = self.old_parent_folder_id {
                w.write_u64(old_parent);
            }
        }

        if let Some(tags) = &self.tags {
            w.write_u16(tags.len() as u16);
            for tag in tags {
                w.write_u32(*tag);
            }
        }

        if let Some(total) = self.total_message_count {
            w.write_u32(total);
        }
        if let Some(unread) = self.unread_message_count {
            w.write_u32(unread);
        }

        if let Some((message_flags, unicode, message_class)) = &self.new_mail {
            w.write_u32(*message_flags);
            w.write_bool(*unicode);
            if *unicode {
                w.write_null_terminated_unicode(message_class);
            } else {
                w.write_null_terminated_ascii(message_class);
            }
        }
    }
}

/// RopNotify response. Carries the subscription handle directly instead
/// of a handle-table index, and no return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyResponse {
    pub notification_handle: u32,
    pub logon_id: u8,
    pub notification_data: NotificationData,
}

impl NotifyResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            notification_handle: cur.read_u32()?,
            logon_id: cur.read_u8()?,
            notification_data: NotificationData::decode(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u32(self.notification_handle);
        w.write_u8(self.logon_id);
        self.notification_data.encode(w);
    }
}

/// RopPending response: the session index of the session with pending
/// notifications. No handle, no return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingResponse {
    pub session_index: u16,
}

impl PendingResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            session_index: cur.read_u16()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u16(self.session_index);
    }
}
