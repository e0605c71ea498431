//! Message ROPs: open/create/save, recipients, read flags, message status,
//! and attachments.

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::{status, DecodeError};
use crate::property::{PropertyTag, TypedString};

fn read_sized_bytes(cur: &mut ByteCursor<'_>) -> Result<Vec<u8>, DecodeError> {
    let size = cur.read_u16()? as usize;
    cur.read_bytes(size)
}

/// RopOpenMessage request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMessageRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub code_page_id: u16,
    pub folder_id: u64,
    pub open_mode_flags: u8,
    pub message_id: u64,
}

impl OpenMessageRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            code_page_id: cur.read_u16()?,
            folder_id: cur.read_u64()?,
            open_mode_flags: cur.read_u8()?,
            message_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u16(self.code_page_id);
        w.write_u64(self.folder_id);
        w.write_u8(self.open_mode_flags);
        w.write_u64(self.message_id);
    }
}

/// One recipient row of an opened message. The recipient row payload is
/// size-prefixed and carried opaquely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRecipientRow {
    pub recipient_type: u8,
    pub code_page_id: u16,
    pub reserved: u16,
    pub recipient_row: Vec<u8>,
}

impl OpenRecipientRow {
    fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            recipient_type: cur.read_u8()?,
            code_page_id: cur.read_u16()?,
            reserved: cur.read_u16()?,
            recipient_row: read_sized_bytes(cur)?,
        })
    }

    fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.recipient_type);
        w.write_u16(self.code_page_id);
        w.write_u16(self.reserved);
        w.write_u16(self.recipient_row.len() as u16);
        w.write_bytes(&self.recipient_row);
    }
}

/// Success body shared by RopOpenMessage, RopReloadCachedInformation, and
/// the tail of RopOpenEmbeddedMessage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedMessageBody {
    pub has_named_properties: bool,
    pub subject_prefix: TypedString,
    pub normalized_subject: TypedString,
    /// Total recipient count on the message, which can exceed the rows
    /// actually returned.
    pub recipient_count: u16,
    pub recipient_columns: Vec<PropertyTag>,
    pub recipient_rows: Vec<OpenRecipientRow>,
}

impl OpenedMessageBody {
    fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let has_named_properties = cur.read_bool()?;
        let subject_prefix = TypedString::decode(cur)?;
        let normalized_subject = TypedString::decode(cur)?;
        let recipient_count = cur.read_u16()?;
        let recipient_columns = PropertyTag::decode_counted(cur)?;
        let row_count = cur.read_u8()? as usize;
        let mut recipient_rows = Vec::with_capacity(row_count);
        for _ in 0..row_count {
            recipient_rows.push(OpenRecipientRow::decode(cur)?);
        }
        Ok(Self {
            has_named_properties,
            subject_prefix,
            normalized_subject,
            recipient_count,
            recipient_columns,
            recipient_rows,
        })
    }

    fn encode(&self, w: &mut ByteWriter) {
        w.write_bool(self.has_named_properties);
        self.subject_prefix.encode(w);
        self.normalized_subject.encode(w);
        w.write_u16(self.recipient_count);
        PropertyTag::encode_counted(&self.recipient_columns, w);
        w.write_u8(self.recipient_rows.len() as u8);
        for row in &self.recipient_rows {
            row.encode(w);
        }
    }
}

/// RopOpenMessage response. RopReloadCachedInformation shares the shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenMessageResponse {
    Success {
        output_handle_index: u8,
        body: OpenedMessageBody,
    },
    Failure {
        output_handle_index: u8,
        return_value: u32,
    },
}

impl OpenMessageResponse {
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
            body: OpenedMessageBody::decode(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                output_handle_index,
                body,
            } => {
                w.write_u8(*output_handle_index);
                w.write_u32(status::EC_NONE);
                body.encode(w);
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

/// RopCreateMessage request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateMessageRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub code_page_id: u16,
    pub folder_id: u64,
    pub associated_flag: bool,
}

impl CreateMessageRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            code_page_id: cur.read_u16()?,
            folder_id: cur.read_u64()?,
            associated_flag: cur.read_bool()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u16(self.code_page_id);
        w.write_u64(self.folder_id);
        w.write_bool(self.associated_flag);
    }
}

/// RopCreateMessage response. The message id is on the wire iff the
/// server chose one at create time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMessageResponse {
    Success {
        output_handle_index: u8,
        message_id: Option<u64>,
    },
    Failure {
        output_handle_index: u8,
        return_value: u32,
    },
}

impl CreateMessageResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let output_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                output_handle_index,
                return_value,
            });
        }
        let has_message_id = cur.read_bool()?;
        let message_id = if has_message_id {
            Some(cur.read_u64()?)
        } else {
            None
        };
        Ok(Self::Success {
            output_handle_index,
            message_id,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                output_handle_index,
                message_id,
            } => {
                w.write_u8(*output_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_bool(message_id.is_some());
                if let Some(id) = message_id {
                    w.write_u64(*id);
                }
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

/// RopSaveChangesMessage request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveChangesMessageRequest {
    pub logon_id: u8,
    pub response_handle_index: u8,
    pub input_handle_index: u8,
    pub save_flags: u8,
}

impl SaveChangesMessageRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            response_handle_index: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            save_flags: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.response_handle_index);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.save_flags);
    }
}

/// RopSaveChangesMessage response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChangesMessageResponse {
    Success {
        response_handle_index: u8,
        message_id: u64,
    },
    Failure {
        response_handle_index: u8,
        return_value: u32,
    },
}

impl SaveChangesMessageResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let response_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                response_handle_index,
                return_value,
            });
        }
        Ok(Self::Success {
            response_handle_index,
            message_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                response_handle_index,
                message_id,
            } => {
                w.write_u8(*response_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u64(*message_id);
            }
            Self::Failure {
                response_handle_index,
                return_value,
            } => {
                w.write_u8(*response_handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

/// RopRemoveAllRecipients request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveAllRecipientsRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub reserved: u32,
}

impl RemoveAllRecipientsRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            reserved: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u32(self.reserved);
    }
}

/// One recipient modification: add/modify rows carry a size-prefixed
/// recipient row, delete rows carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyRecipientRow {
    pub row_id: u32,
    pub recipient_type: u8,
    pub recipient_row: Vec<u8>,
}

impl ModifyRecipientRow {
    fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            row_id: cur.read_u32()?,
            recipient_type: cur.read_u8()?,
            recipient_row: read_sized_bytes(cur)?,
        })
    }

    fn encode(&self, w: &mut ByteWriter) {
        w.write_u32(self.row_id);
        w.write_u8(self.recipient_type);
        w.write_u16(self.recipient_row.len() as u16);
        w.write_bytes(&self.recipient_row);
    }
}

/// RopModifyRecipients request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyRecipientsRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub recipient_columns: Vec<PropertyTag>,
    pub recipient_rows: Vec<ModifyRecipientRow>,
}

impl ModifyRecipientsRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let recipient_columns = PropertyTag::decode_counted(cur)?;
        let row_count = cur.read_u16()? as usize;
        let mut recipient_rows = Vec::with_capacity(row_count.min(1024));
        for _ in 0..row_count {
            recipient_rows.push(ModifyRecipientRow::decode(cur)?);
        }
        Ok(Self {
            logon_id,
            input_handle_index,
            recipient_columns,
            recipient_rows,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        PropertyTag::encode_counted(&self.recipient_columns, w);
        w.write_u16(self.recipient_rows.len() as u16);
        for row in &self.recipient_rows {
            row.encode(w);
        }
    }
}

/// RopReadRecipients request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRecipientsRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub row_id: u32,
    pub reserved: u16,
}

impl ReadRecipientsRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            row_id: cur.read_u32()?,
            reserved: cur.read_u16()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u32(self.row_id);
        w.write_u16(self.reserved);
    }
}

/// One recipient row returned by RopReadRecipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRecipientRow {
    pub row_id: u32,
    pub recipient_type: u8,
    pub code_page_id: u16,
    pub reserved: u16,
    pub recipient_row: Vec<u8>,
}

impl ReadRecipientRow {
    fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            row_id: cur.read_u32()?,
            recipient_type: cur.read_u8()?,
            code_page_id: cur.read_u16()?,
            reserved: cur.read_u16()?,
            recipient_row: read_sized_bytes(cur)?,
        })
    }

    fn encode(&self, w: &mut ByteWriter) {
        w.write_u32(self.row_id);
        w.write_u8(self.recipient_type);
        w.write_u16(self.code_page_id);
        w.write_u16(self.reserved);
        w.write_u16(self.recipient_row.len() as u16);
        w.write_bytes(&self.recipient_row);
    }
}

/// RopReadRecipients response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadRecipientsResponse {
    Success {
        input_handle_index: u8,
        recipient_rows: Vec<ReadRecipientRow>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl ReadRecipientsResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let row_count = cur.read_u8()? as usize;
        let mut recipient_rows = Vec::with_capacity(row_count);
        for _ in 0..row_count {
            recipient_rows.push(ReadRecipientRow::decode(cur)?);
        }
        Ok(Self::Success {
            input_handle_index,
            recipient_rows,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                recipient_rows,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u8(recipient_rows.len() as u8);
                for row in recipient_rows {
                    row.encode(w);
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

/// RopReloadCachedInformation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadCachedInformationRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub reserved: u16,
}

impl ReloadCachedInformationRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            reserved: cur.read_u16()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u16(self.reserved);
    }
}

/// RopReloadCachedInformation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadCachedInformationResponse {
    Success {
        input_handle_index: u8,
        body: OpenedMessageBody,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl ReloadCachedInformationResponse {
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
            body: OpenedMessageBody::decode(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                body,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                body.encode(w);
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

/// RopSetMessageReadFlag request. The client data block is on the wire
/// only for public-folders logons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetMessageReadFlagRequest {
    pub logon_id: u8,
    pub response_handle_index: u8,
    pub input_handle_index: u8,
    pub read_flags: u8,
    pub client_data: Option<[u8; 24]>,
}

impl SetMessageReadFlagRequest {
    pub fn decode(cur: &mut ByteCursor<'_>, private_logon: bool) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let response_handle_index = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let read_flags = cur.read_u8()?;
        let client_data = if private_logon {
            None
        } else {
            Some(cur.read_array::<24>()?)
        };
        Ok(Self {
            logon_id,
            response_handle_index,
            input_handle_index,
            read_flags,
            client_data,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.response_handle_index);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.read_flags);
        if let Some(data) = &self.client_data {
            w.write_bytes(data);
        }
    }
}

/// Echo block returned when the read status actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadStatusEcho {
    pub logon_id: u8,
    pub client_data: [u8; 24],
}

/// RopSetMessageReadFlag response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMessageReadFlagResponse {
    Success {
        response_handle_index: u8,
        /// Present iff the read status changed on a public-folders logon.
        status_changed: Option<ReadStatusEcho>,
    },
    Failure {
        response_handle_index: u8,
        return_value: u32,
    },
}

impl SetMessageReadFlagResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let response_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                response_handle_index,
                return_value,
            });
        }
        let changed = cur.read_bool()?;
        let status_changed = if changed {
            Some(ReadStatusEcho {
                logon_id: cur.read_u8()?,
                client_data: cur.read_array::<24>()?,
            })
        } else {
            None
        };
        Ok(Self::Success {
            response_handle_index,
            status_changed,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                response_handle_index,
                status_changed,
            } => {
                w.write_u8(*response_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_bool(status_changed.is_some());
                if let Some(echo) = status_changed {
                    w.write_u8(echo.logon_id);
                    w.write_bytes(&echo.client_data);
                }
            }
            Self::Failure {
                response_handle_index,
                return_value,
            } => {
                w.write_u8(*response_handle_index);
                w.write_u32(*return_value);
            }
        }
    }
}

/// RopSetReadFlags request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetReadFlagsRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub want_asynchronous: bool,
    pub read_flags: u8,
    pub message_ids: Vec<u64>,
}

impl SetReadFlagsRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let want_asynchronous = cur.read_bool()?;
        let read_flags = cur.read_u8()?;
        let count = cur.read_u16()? as usize;
        let mut message_ids = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            message_ids.push(cur.read_u64()?);
        }
        Ok(Self {
            logon_id,
            input_handle_index,
            want_asynchronous,
            read_flags,
            message_ids,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_bool(self.want_asynchronous);
        w.write_u8(self.read_flags);
        w.write_u16(self.message_ids.len() as u16);
        for id in &self.message_ids {
            w.write_u64(*id);
        }
    }
}

/// RopGetMessageStatus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetMessageStatusRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub message_id: u64,
}

impl GetMessageStatusRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            message_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.message_id);
    }
}

/// RopSetMessageStatus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetMessageStatusRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub message_id: u64,
    pub message_status_flags: u32,
    pub message_status_mask: u32,
}

impl SetMessageStatusRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            message_id: cur.read_u64()?,
            message_status_flags: cur.read_u32()?,
            message_status_mask: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.message_id);
        w.write_u32(self.message_status_flags);
        w.write_u32(self.message_status_mask);
    }
}

/// Response shape shared by RopGetMessageStatus and RopSetMessageStatus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatusResponse {
    Success {
        input_handle_index: u8,
        message_status_flags: u32,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl MessageStatusResponse {
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
            message_status_flags: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                message_status_flags,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u32(*message_status_flags);
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

/// RopGetValidAttachments request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetValidAttachmentsRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
}

impl GetValidAttachmentsRequest {
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

/// Header-only response shared by the message ROPs with no success
/// payload (RopRemoveAllRecipients, RopModifyRecipients, attachment
/// open/delete/save, RopGetAttachmentTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeaderResponse {
    pub handle_index: u8,
    pub return_value: u32,
}

impl MessageHeaderResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            handle_index: cur.read_u8()?,
            return_value: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.handle_index);
        w.write_u32(self.return_value);
    }
}

/// RopGetValidAttachments response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetValidAttachmentsResponse {
    Success {
        input_handle_index: u8,
        attachment_ids: Vec<u32>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetValidAttachmentsResponse {
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
        let mut attachment_ids = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            attachment_ids.push(cur.read_u32()?);
        }
        Ok(Self::Success {
            input_handle_index,
            attachment_ids,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                attachment_ids,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u16(attachment_ids.len() as u16);
                for id in attachment_ids {
                    w.write_u32(*id);
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

/// RopOpenAttachment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenAttachmentRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub open_attachment_flags: u8,
    pub attachment_id: u32,
}

impl OpenAttachmentRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            open_attachment_flags: cur.read_u8()?,
            attachment_id: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.open_attachment_flags);
        w.write_u32(self.attachment_id);
    }
}

/// RopCreateAttachment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateAttachmentRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
}

impl CreateAttachmentRequest {
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

/// RopCreateAttachment response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateAttachmentResponse {
    Success {
        output_handle_index: u8,
        attachment_id: u32,
    },
    Failure {
        output_handle_index: u8,
        return_value: u32,
    },
}

impl CreateAttachmentResponse {
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
            attachment_id: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                output_handle_index,
                attachment_id,
            } => {
                w.write_u8(*output_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u32(*attachment_id);
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

/// RopDeleteAttachment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteAttachmentRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub attachment_id: u32,
}

impl DeleteAttachmentRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            attachment_id: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u32(self.attachment_id);
    }
}

/// RopSaveChangesAttachment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveChangesAttachmentRequest {
    pub logon_id: u8,
    pub response_handle_index: u8,
    pub input_handle_index: u8,
    pub save_flags: u8,
}

impl SaveChangesAttachmentRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            response_handle_index: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            save_flags: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.response_handle_index);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.save_flags);
    }
}

/// RopOpenEmbeddedMessage request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenEmbeddedMessageRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub code_page_id: u16,
    pub open_mode_flags: u8,
}

impl OpenEmbeddedMessageRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            code_page_id: cur.read_u16()?,
            open_mode_flags: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u16(self.code_page_id);
        w.write_u8(self.open_mode_flags);
    }
}

/// RopOpenEmbeddedMessage response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenEmbeddedMessageResponse {
    Success {
        output_handle_index: u8,
        reserved: u8,
        message_id: u64,
        body: OpenedMessageBody,
    },
    Failure {
        output_handle_index: u8,
        return_value: u32,
    },
}

impl OpenEmbeddedMessageResponse {
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
            reserved: cur.read_u8()?,
            message_id: cur.read_u64()?,
            body: OpenedMessageBody::decode(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                output_handle_index,
                reserved,
                message_id,
                body,
            } => {
                w.write_u8(*output_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u8(*reserved);
                w.write_u64(*message_id);
                body.encode(w);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyType;

    fn sample_body() -> OpenedMessageBody {
        OpenedMessageBody {
            has_named_properties: true,
            subject_prefix: TypedString::String8("RE: ".to_string()),
            normalized_subject: TypedString::Unicode("quarterly numbers".to_string()),
            recipient_count: 2,
            recipient_columns: vec![
                PropertyTag::new(PropertyType::Unicode, 0x3001),
                PropertyTag::new(PropertyType::String8, 0x3003),
            ],
            recipient_rows: vec![
                OpenRecipientRow {
                    recipient_type: 0x01,
                    code_page_id: 1252,
                    reserved: 0,
                    recipient_row: vec![0x55; 10],
                },
                OpenRecipientRow {
                    recipient_type: 0x02,
                    code_page_id: 1252,
                    reserved: 0,
                    recipient_row: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn test_open_message_roundtrip() {
        let resp = OpenMessageResponse::Success {
            output_handle_index: 1,
            body: sample_body(),
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(OpenMessageResponse::decode(&mut cur).unwrap(), resp);
        assert!(cur.is_empty());
    }

    #[test]
    fn test_create_message_optional_id() {
        let with_id = CreateMessageResponse::Success {
            output_handle_index: 1,
            message_id: Some(0xABCD),
        };
        let mut w = ByteWriter::new();
        with_id.encode(&mut w);
        assert_eq!(w.len(), 1 + 4 + 1 + 8);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(CreateMessageResponse::decode(&mut cur).unwrap(), with_id);

        let without_id = CreateMessageResponse::Success {
            output_handle_index: 1,
            message_id: None,
        };
        let mut w = ByteWriter::new();
        without_id.encode(&mut w);
        assert_eq!(w.len(), 1 + 4 + 1);
    }

    #[test]
    fn test_save_changes_message_roundtrip() {
        let resp = SaveChangesMessageResponse::Success {
            response_handle_index: 3,
            message_id: 0x0002_0000_0000_0001,
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(SaveChangesMessageResponse::decode(&mut cur).unwrap(), resp);
    }

    #[test]
    fn test_modify_recipients_roundtrip() {
        let req = ModifyRecipientsRequest {
            logon_id: 0,
            input_handle_index: 1,
            recipient_columns: vec![PropertyTag::new(PropertyType::Unicode, 0x3001)],
            recipient_rows: vec![ModifyRecipientRow {
                row_id: 0,
                recipient_type: 0x01,
                recipient_row: vec![1, 2, 3],
            }],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(ModifyRecipientsRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_set_message_read_flag_public_logon() {
        let req = SetMessageReadFlagRequest {
            logon_id: 0,
            response_handle_index: 0,
            input_handle_index: 1,
            read_flags: 0x02,
            client_data: Some([0x11; 24]),
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            SetMessageReadFlagRequest::decode(&mut cur, false).unwrap(),
            req
        );

        // Private logon: same header, no client data bytes.
        let req = SetMessageReadFlagRequest {
            client_data: None,
            ..req
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        assert_eq!(w.len(), 4);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            SetMessageReadFlagRequest::decode(&mut cur, true).unwrap(),
            req
        );
    }

    #[test]
    fn test_set_message_read_flag_response_echo() {
        let resp = SetMessageReadFlagResponse::Success {
            response_handle_index: 0,
            status_changed: Some(ReadStatusEcho {
                logon_id: 0,
                client_data: [0x22; 24],
            }),
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(SetMessageReadFlagResponse::decode(&mut cur).unwrap(), resp);
    }

    #[test]
    fn test_attachment_roundtrips() {
        let req = OpenAttachmentRequest {
            logon_id: 0,
            input_handle_index: 1,
            output_handle_index: 2,
            open_attachment_flags: 0x01,
            attachment_id: 7,
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(OpenAttachmentRequest::decode(&mut cur).unwrap(), req);

        let resp = GetValidAttachmentsResponse::Success {
            input_handle_index: 1,
            attachment_ids: vec![0, 1, 5],
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(GetValidAttachmentsResponse::decode(&mut cur).unwrap(), resp);
    }

    #[test]
    fn test_open_embedded_message_roundtrip() {
        let resp = OpenEmbeddedMessageResponse::Success {
            output_handle_index: 2,
            reserved: 0,
            message_id: 0x99,
            body: sample_body(),
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(OpenEmbeddedMessageResponse::decode(&mut cur).unwrap(), resp);
    }
}
