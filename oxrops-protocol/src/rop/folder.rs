//! Folder ROPs: open/create/delete, search criteria, move/copy, emptying,
//! message deletion, and the hierarchy/contents table handles.

use super::ReplicaServers;
use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::{status, DecodeError};

fn read_mutable_string(cur: &mut ByteCursor<'_>, unicode: bool) -> Result<String, DecodeError> {
    if unicode {
        cur.read_null_terminated_unicode()
    } else {
        cur.read_null_terminated_ascii()
    }
}

fn write_mutable_string(s: &str, unicode: bool, w: &mut ByteWriter) {
    if unicode {
        w.write_null_terminated_unicode(s);
    } else {
        w.write_null_terminated_ascii(s);
    }
}

fn read_message_ids(cur: &mut ByteCursor<'_>) -> Result<Vec<u64>, DecodeError> {
    let count = cur.read_u16()? as usize;
    let mut ids = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        ids.push(cur.read_u64()?);
    }
    Ok(ids)
}

fn write_message_ids(ids: &[u64], w: &mut ByteWriter) {
    w.write_u16(ids.len() as u16);
    for id in ids {
        w.write_u64(*id);
    }
}

/// RopOpenFolder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFolderRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub folder_id: u64,
    pub open_mode_flags: u8,
}

impl OpenFolderRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            folder_id: cur.read_u64()?,
            open_mode_flags: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u64(self.folder_id);
        w.write_u8(self.open_mode_flags);
    }
}

/// RopOpenFolder response. The replica server list exists on the wire iff
/// the folder is ghosted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenFolderResponse {
    Success {
        output_handle_index: u8,
        has_rules: bool,
        ghosted: Option<ReplicaServers>,
    },
    Failure {
        output_handle_index: u8,
        return_value: u32,
    },
}

impl OpenFolderResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let output_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                output_handle_index,
                return_value,
            });
        }
        let has_rules = cur.read_bool()?;
        let is_ghosted = cur.read_bool()?;
        let ghosted = if is_ghosted {
            Some(ReplicaServers::decode(cur)?)
        } else {
            None
        };
        Ok(Self::Success {
            output_handle_index,
            has_rules,
            ghosted,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                output_handle_index,
                has_rules,
                ghosted,
            } => {
                w.write_u8(*output_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_bool(*has_rules);
                w.write_bool(ghosted.is_some());
                if let Some(servers) = ghosted {
                    servers.encode(w);
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

/// RopCreateFolder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFolderRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub folder_type: u8,
    pub use_unicode_strings: bool,
    pub open_existing: bool,
    pub reserved: u8,
    pub display_name: String,
    pub comment: String,
}

impl CreateFolderRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let output_handle_index = cur.read_u8()?;
        let folder_type = cur.read_u8()?;
        let use_unicode_strings = cur.read_bool()?;
        let open_existing = cur.read_bool()?;
        let reserved = cur.read_u8()?;
        let display_name = read_mutable_string(cur, use_unicode_strings)?;
        let comment = read_mutable_string(cur, use_unicode_strings)?;
        Ok(Self {
            logon_id,
            input_handle_index,
            output_handle_index,
            folder_type,
            use_unicode_strings,
            open_existing,
            reserved,
            display_name,
            comment,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.folder_type);
        w.write_bool(self.use_unicode_strings);
        w.write_bool(self.open_existing);
        w.write_u8(self.reserved);
        write_mutable_string(&self.display_name, self.use_unicode_strings, w);
        write_mutable_string(&self.comment, self.use_unicode_strings, w);
    }
}

/// Extra data returned when RopCreateFolder opened an existing folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingFolderInfo {
    pub has_rules: bool,
    pub ghosted: Option<ReplicaServers>,
}

/// RopCreateFolder response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateFolderResponse {
    Success {
        output_handle_index: u8,
        folder_id: u64,
        /// Present iff the folder already existed and was opened instead.
        existing: Option<ExistingFolderInfo>,
    },
    Failure {
        output_handle_index: u8,
        return_value: u32,
    },
}

impl CreateFolderResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let output_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                output_handle_index,
                return_value,
            });
        }
        let folder_id = cur.read_u64()?;
        let is_existing = cur.read_bool()?;
        let existing = if is_existing {
            let has_rules = cur.read_bool()?;
            let is_ghosted = cur.read_bool()?;
            let ghosted = if is_ghosted {
                Some(ReplicaServers::decode(cur)?)
            } else {
                None
            };
            Some(ExistingFolderInfo { has_rules, ghosted })
        } else {
            None
        };
        Ok(Self::Success {
            output_handle_index,
            folder_id,
            existing,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                output_handle_index,
                folder_id,
                existing,
            } => {
                w.write_u8(*output_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u64(*folder_id);
                w.write_bool(existing.is_some());
                if let Some(info) = existing {
                    w.write_bool(info.has_rules);
                    w.write_bool(info.ghosted.is_some());
                    if let Some(servers) = &info.ghosted {
                        servers.encode(w);
                    }
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

/// RopDeleteFolder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteFolderRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub delete_folder_flags: u8,
    pub folder_id: u64,
}

impl DeleteFolderRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            delete_folder_flags: cur.read_u8()?,
            folder_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.delete_folder_flags);
        w.write_u64(self.folder_id);
    }
}

/// Response shape shared by the ROPs that report partial completion in
/// both their success and failure forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialCompletionResponse {
    pub input_handle_index: u8,
    pub return_value: u32,
    pub partial_completion: bool,
}

impl PartialCompletionResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            input_handle_index: cur.read_u8()?,
            return_value: cur.read_u32()?,
            partial_completion: cur.read_bool()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.input_handle_index);
        w.write_u32(self.return_value);
        w.write_bool(self.partial_completion);
    }
}

/// RopSetSearchCriteria request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSearchCriteriaRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub restriction_data: Vec<u8>,
    pub folder_ids: Vec<u64>,
    pub search_flags: u32,
}

impl SetSearchCriteriaRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let size = cur.read_u16()? as usize;
        let restriction_data = cur.read_bytes(size)?;
        let folder_ids = read_message_ids(cur)?;
        let search_flags = cur.read_u32()?;
        Ok(Self {
            logon_id,
            input_handle_index,
            restriction_data,
            folder_ids,
            search_flags,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u16(self.restriction_data.len() as u16);
        w.write_bytes(&self.restriction_data);
        write_message_ids(&self.folder_ids, w);
        w.write_u32(self.search_flags);
    }
}

/// RopSetSearchCriteria response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetSearchCriteriaResponse {
    pub input_handle_index: u8,
    pub return_value: u32,
}

impl SetSearchCriteriaResponse {
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

/// RopGetSearchCriteria request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetSearchCriteriaRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub use_unicode: bool,
    pub include_restriction: bool,
    pub include_folders: bool,
}

impl GetSearchCriteriaRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            use_unicode: cur.read_bool()?,
            include_restriction: cur.read_bool()?,
            include_folders: cur.read_bool()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_bool(self.use_unicode);
        w.write_bool(self.include_restriction);
        w.write_bool(self.include_folders);
    }
}

/// RopGetSearchCriteria response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetSearchCriteriaResponse {
    Success {
        input_handle_index: u8,
        restriction_data: Vec<u8>,
        logon_id: u8,
        folder_ids: Vec<u64>,
        search_flags: u32,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetSearchCriteriaResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let size = cur.read_u16()? as usize;
        let restriction_data = cur.read_bytes(size)?;
        let logon_id = cur.read_u8()?;
        let folder_ids = read_message_ids(cur)?;
        let search_flags = cur.read_u32()?;
        Ok(Self::Success {
            input_handle_index,
            restriction_data,
            logon_id,
            folder_ids,
            search_flags,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                restriction_data,
                logon_id,
                folder_ids,
                search_flags,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u16(restriction_data.len() as u16);
                w.write_bytes(restriction_data);
                w.write_u8(*logon_id);
                write_message_ids(folder_ids, w);
                w.write_u32(*search_flags);
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

/// RopMoveCopyMessages request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCopyMessagesRequest {
    pub logon_id: u8,
    pub source_handle_index: u8,
    pub dest_handle_index: u8,
    pub message_ids: Vec<u64>,
    pub want_asynchronous: bool,
    pub want_copy: bool,
}

impl MoveCopyMessagesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            source_handle_index: cur.read_u8()?,
            dest_handle_index: cur.read_u8()?,
            message_ids: read_message_ids(cur)?,
            want_asynchronous: cur.read_bool()?,
            want_copy: cur.read_bool()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.source_handle_index);
        w.write_u8(self.dest_handle_index);
        write_message_ids(&self.message_ids, w);
        w.write_bool(self.want_asynchronous);
        w.write_bool(self.want_copy);
    }
}

/// Response shape shared by the move/copy family: a standard form for
/// success and ordinary failures, and the null-destination failure that
/// echoes the destination handle index with `ReturnValue` 0x00000503.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCopyResponse {
    Standard {
        source_handle_index: u8,
        return_value: u32,
        partial_completion: bool,
    },
    NullDestination {
        source_handle_index: u8,
        dest_handle_index: u32,
        partial_completion: bool,
    },
}

impl MoveCopyResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let source_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value == status::EC_NULL_DESTINATION_OBJECT {
            return Ok(Self::NullDestination {
                source_handle_index,
                dest_handle_index: cur.read_u32()?,
                partial_completion: cur.read_bool()?,
            });
        }
        Ok(Self::Standard {
            source_handle_index,
            return_value,
            partial_completion: cur.read_bool()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Standard {
                source_handle_index,
                return_value,
                partial_completion,
            } => {
                debug_assert!(*return_value != status::EC_NULL_DESTINATION_OBJECT);
                w.write_u8(*source_handle_index);
                w.write_u32(*return_value);
                w.write_bool(*partial_completion);
            }
            Self::NullDestination {
                source_handle_index,
                dest_handle_index,
                partial_completion,
            } => {
                w.write_u8(*source_handle_index);
                w.write_u32(status::EC_NULL_DESTINATION_OBJECT);
                w.write_u32(*dest_handle_index);
                w.write_bool(*partial_completion);
            }
        }
    }
}

/// RopMoveFolder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveFolderRequest {
    pub logon_id: u8,
    pub source_handle_index: u8,
    pub dest_handle_index: u8,
    pub want_asynchronous: bool,
    pub use_unicode: bool,
    pub folder_id: u64,
    pub new_folder_name: String,
}

impl MoveFolderRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let source_handle_index = cur.read_u8()?;
        let dest_handle_index = cur.read_u8()?;
        let want_asynchronous = cur.read_bool()?;
        let use_unicode = cur.read_bool()?;
        let folder_id = cur.read_u64()?;
        let new_folder_name = read_mutable_string(cur, use_unicode)?;
        Ok(Self {
            logon_id,
            source_handle_index,
            dest_handle_index,
            want_asynchronous,
            use_unicode,
            folder_id,
            new_folder_name,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.source_handle_index);
        w.write_u8(self.dest_handle_index);
        w.write_bool(self.want_asynchronous);
        w.write_bool(self.use_unicode);
        w.write_u64(self.folder_id);
        write_mutable_string(&self.new_folder_name, self.use_unicode, w);
    }
}

/// RopCopyFolder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFolderRequest {
    pub logon_id: u8,
    pub source_handle_index: u8,
    pub dest_handle_index: u8,
    pub want_asynchronous: bool,
    pub want_recursive: bool,
    pub use_unicode: bool,
    pub folder_id: u64,
    pub new_folder_name: String,
}

impl CopyFolderRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let source_handle_index = cur.read_u8()?;
        let dest_handle_index = cur.read_u8()?;
        let want_asynchronous = cur.read_bool()?;
        let want_recursive = cur.read_bool()?;
        let use_unicode = cur.read_bool()?;
        let folder_id = cur.read_u64()?;
        let new_folder_name = read_mutable_string(cur, use_unicode)?;
        Ok(Self {
            logon_id,
            source_handle_index,
            dest_handle_index,
            want_asynchronous,
            want_recursive,
            use_unicode,
            folder_id,
            new_folder_name,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.source_handle_index);
        w.write_u8(self.dest_handle_index);
        w.write_bool(self.want_asynchronous);
        w.write_bool(self.want_recursive);
        w.write_bool(self.use_unicode);
        w.write_u64(self.folder_id);
        write_mutable_string(&self.new_folder_name, self.use_unicode, w);
    }
}

/// RopEmptyFolder request. RopHardDeleteMessagesAndSubfolders shares the
/// same layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyFolderRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub want_asynchronous: bool,
    pub want_delete_associated: bool,
}

impl EmptyFolderRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            want_asynchronous: cur.read_bool()?,
            want_delete_associated: cur.read_bool()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_bool(self.want_asynchronous);
        w.write_bool(self.want_delete_associated);
    }
}

/// RopDeleteMessages request. RopHardDeleteMessages shares the same
/// layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteMessagesRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub want_asynchronous: bool,
    pub notify_non_read: bool,
    pub message_ids: Vec<u64>,
}

impl DeleteMessagesRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            want_asynchronous: cur.read_bool()?,
            notify_non_read: cur.read_bool()?,
            message_ids: read_message_ids(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_bool(self.want_asynchronous);
        w.write_bool(self.notify_non_read);
        write_message_ids(&self.message_ids, w);
    }
}

/// RopGetHierarchyTable / RopGetContentsTable request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetTableRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub output_handle_index: u8,
    pub table_flags: u8,
}

impl GetTableRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            output_handle_index: cur.read_u8()?,
            table_flags: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.output_handle_index);
        w.write_u8(self.table_flags);
    }
}

/// RopGetHierarchyTable / RopGetContentsTable response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetTableResponse {
    Success {
        output_handle_index: u8,
        row_count: u32,
    },
    Failure {
        output_handle_index: u8,
        return_value: u32,
    },
}

impl GetTableResponse {
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
            row_count: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                output_handle_index,
                row_count,
            } => {
                w.write_u8(*output_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u32(*row_count);
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
