//! The ROP registry: one strongly-typed request/response codec per
//! remote operation, dispatched by the leading RopId byte.
//!
//! Dynamic dispatch-by-reflection in older implementations becomes two
//! closed tagged unions here: [`RopRequest`] and [`RopResponse`].
//! Decoding selects the variant from the RopId byte with an exhaustive
//! match; encoding writes the RopId byte followed by the payload. ROPs
//! that only ever travel server-to-client (RopNotify, RopPending,
//! RopBackoff, RopBufferTooSmall) have no request variant, and
//! RopRelease has no response.

pub mod fast_transfer;
pub mod folder;
pub mod logon;
pub mod message;
pub mod notification;
pub mod other;
pub mod permission;
pub mod property_ops;
pub mod rule;
pub mod stream;
pub mod sync;
pub mod table;
pub mod transport;

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;
use crate::property::PropertyTag;
use uuid::Uuid;

pub use table::{BookmarkOrigin, TableStatus};

use fast_transfer::*;
use folder::*;
use logon::*;
use message::*;
use notification::*;
use other::*;
use permission::*;
use property_ops::*;
use rule::*;
use stream::*;
use sync::*;
use table::*;
use transport::*;

/// All assigned remote operation ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RopId {
    Release = 0x01,
    OpenFolder = 0x02,
    OpenMessage = 0x03,
    GetHierarchyTable = 0x04,
    GetContentsTable = 0x05,
    CreateMessage = 0x06,
    GetPropertiesSpecific = 0x07,
    GetPropertiesAll = 0x08,
    GetPropertiesList = 0x09,
    SetProperties = 0x0A,
    DeleteProperties = 0x0B,
    SaveChangesMessage = 0x0C,
    RemoveAllRecipients = 0x0D,
    ModifyRecipients = 0x0E,
    ReadRecipients = 0x0F,
    ReloadCachedInformation = 0x10,
    SetMessageReadFlag = 0x11,
    SetColumns = 0x12,
    SortTable = 0x13,
    Restrict = 0x14,
    QueryRows = 0x15,
    GetStatus = 0x16,
    QueryPosition = 0x17,
    SeekRow = 0x18,
    SeekRowBookmark = 0x19,
    SeekRowFractional = 0x1A,
    CreateBookmark = 0x1B,
    CreateFolder = 0x1C,
    DeleteFolder = 0x1D,
    DeleteMessages = 0x1E,
    GetMessageStatus = 0x1F,
    SetMessageStatus = 0x20,
    GetAttachmentTable = 0x21,
    OpenAttachment = 0x22,
    CreateAttachment = 0x23,
    DeleteAttachment = 0x24,
    SaveChangesAttachment = 0x25,
    SetReceiveFolder = 0x26,
    GetReceiveFolder = 0x27,
    RegisterNotification = 0x29,
    Notify = 0x2A,
    OpenStream = 0x2B,
    ReadStream = 0x2C,
    WriteStream = 0x2D,
    SeekStream = 0x2E,
    SetStreamSize = 0x2F,
    SetSearchCriteria = 0x30,
    GetSearchCriteria = 0x31,
    SubmitMessage = 0x32,
    MoveCopyMessages = 0x33,
    AbortSubmit = 0x34,
    MoveFolder = 0x35,
    CopyFolder = 0x36,
    QueryColumnsAll = 0x37,
    Abort = 0x38,
    CopyTo = 0x39,
    CopyToStream = 0x3A,
    CloneStream = 0x3B,
    GetPermissionsTable = 0x3E,
    GetRulesTable = 0x3F,
    ModifyPermissions = 0x40,
    ModifyRules = 0x41,
    GetOwningServers = 0x42,
    LongTermIdFromId = 0x43,
    IdFromLongTermId = 0x44,
    PublicFolderIsGhosted = 0x45,
    OpenEmbeddedMessage = 0x46,
    SetSpooler = 0x47,
    SpoolerLockMessage = 0x48,
    GetAddressTypes = 0x49,
    TransportSend = 0x4A,
    FastTransferSourceCopyMessages = 0x4B,
    FastTransferSourceCopyFolder = 0x4C,
    FastTransferSourceCopyTo = 0x4D,
    FastTransferSourceGetBuffer = 0x4E,
    FindRow = 0x4F,
    Progress = 0x50,
    TransportNewMail = 0x51,
    GetValidAttachments = 0x52,
    FastTransferDestinationConfigure = 0x53,
    FastTransferDestinationPutBuffer = 0x54,
    GetNamesFromPropertyIds = 0x55,
    GetPropertyIdsFromNames = 0x56,
    UpdateDeferredActionMessages = 0x57,
    EmptyFolder = 0x58,
    ExpandRow = 0x59,
    CollapseRow = 0x5A,
    LockRegionStream = 0x5B,
    UnlockRegionStream = 0x5C,
    CommitStream = 0x5D,
    GetStreamSize = 0x5E,
    QueryNamedProperties = 0x5F,
    GetPerUserLongTermIds = 0x60,
    GetPerUserGuid = 0x61,
    ReadPerUserInformation = 0x63,
    WritePerUserInformation = 0x64,
    SetReadFlags = 0x66,
    CopyProperties = 0x67,
    GetReceiveFolderTable = 0x68,
    FastTransferSourceCopyProperties = 0x69,
    GetCollapseState = 0x6B,
    SetCollapseState = 0x6C,
    GetTransportFolder = 0x6D,
    Pending = 0x6E,
    OptionsData = 0x6F,
    SynchronizationConfigure = 0x70,
    SynchronizationImportMessageChange = 0x72,
    SynchronizationImportHierarchyChange = 0x73,
    SynchronizationImportDeletes = 0x74,
    SynchronizationUploadStateStreamBegin = 0x75,
    SynchronizationUploadStateStreamContinue = 0x76,
    SynchronizationUploadStateStreamEnd = 0x77,
    SynchronizationImportMessageMove = 0x78,
    SetPropertiesNoReplicate = 0x79,
    DeletePropertiesNoReplicate = 0x7A,
    GetStoreState = 0x7B,
    SynchronizationOpenCollector = 0x7E,
    GetLocalReplicaIds = 0x7F,
    SynchronizationImportReadStateChanges = 0x80,
    ResetTable = 0x81,
    SynchronizationGetTransferState = 0x82,
    TellVersion = 0x86,
    FreeBookmark = 0x89,
    WriteAndCommitStream = 0x90,
    HardDeleteMessages = 0x91,
    HardDeleteMessagesAndSubfolders = 0x92,
    SetLocalReplicaMidsetDeleted = 0x93,
    Backoff = 0xF9,
    Logon = 0xFE,
    BufferTooSmall = 0xFF,
}

impl RopId {
    /// Whether the byte is one of the reserved ids that must never
    /// appear on the wire.
    pub fn is_reserved(byte: u8) -> bool {
        matches!(
            byte,
            0x00 | 0x28
                | 0x3C
                | 0x3D
                | 0x62
                | 0x65
                | 0x6A
                | 0x71
                | 0x7C
                | 0x7D
                | 0x83..=0x85
                | 0x87
                | 0x88
                | 0x8A..=0x8E
                | 0x94..=0xF8
                | 0xFA..=0xFD
        )
    }

    /// Whether deployments with alternate handle resolution never fail
    /// this ROP on an otherwise-invalid handle index.
    pub fn uses_alternate_handle_resolution(&self) -> bool {
        matches!(
            self,
            RopId::LongTermIdFromId
                | RopId::IdFromLongTermId
                | RopId::GetAddressTypes
                | RopId::GetTransportFolder
                | RopId::GetNamesFromPropertyIds
        )
    }
}

impl TryFrom<u8> for RopId {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use RopId::*;
        Ok(match value {
            0x01 => Release,
            0x02 => OpenFolder,
            0x03 => OpenMessage,
            0x04 => GetHierarchyTable,
            0x05 => GetContentsTable,
            0x06 => CreateMessage,
            0x07 => GetPropertiesSpecific,
            0x08 => GetPropertiesAll,
            0x09 => GetPropertiesList,
            0x0A => SetProperties,
            0x0B => DeleteProperties,
            0x0C => SaveChangesMessage,
            0x0D => RemoveAllRecipients,
            0x0E => ModifyRecipients,
            0x0F => ReadRecipients,
            0x10 => ReloadCachedInformation,
            0x11 => SetMessageReadFlag,
            0x12 => SetColumns,
            0x13 => SortTable,
            0x14 => Restrict,
            0x15 => QueryRows,
            0x16 => GetStatus,
            0x17 => QueryPosition,
            0x18 => SeekRow,
            0x19 => SeekRowBookmark,
            0x1A => SeekRowFractional,
            0x1B => CreateBookmark,
            0x1C => CreateFolder,
            0x1D => DeleteFolder,
            0x1E => DeleteMessages,
            0x1F => GetMessageStatus,
            0x20 => SetMessageStatus,
            0x21 => GetAttachmentTable,
            0x22 => OpenAttachment,
            0x23 => CreateAttachment,
            0x24 => DeleteAttachment,
            0x25 => SaveChangesAttachment,
            0x26 => SetReceiveFolder,
            0x27 => GetReceiveFolder,
            0x29 => RegisterNotification,
            0x2A => Notify,
            0x2B => OpenStream,
            0x2C => ReadStream,
            0x2D => WriteStream,
            0x2E => SeekStream,
            0x2F => SetStreamSize,
            0x30 => SetSearchCriteria,
            0x31 => GetSearchCriteria,
            0x32 => SubmitMessage,
            0x33 => MoveCopyMessages,
            0x34 => AbortSubmit,
            0x35 => MoveFolder,
            0x36 => CopyFolder,
            0x37 => QueryColumnsAll,
            0x38 => Abort,
            0x39 => CopyTo,
            0x3A => CopyToStream,
            0x3B => CloneStream,
            0x3E => GetPermissionsTable,
            0x3F => GetRulesTable,
            0x40 => ModifyPermissions,
            0x41 => ModifyRules,
            0x42 => GetOwningServers,
            0x43 => LongTermIdFromId,
            0x44 => IdFromLongTermId,
            0x45 => PublicFolderIsGhosted,
            0x46 => OpenEmbeddedMessage,
            0x47 => SetSpooler,
            0x48 => SpoolerLockMessage,
            0x49 => GetAddressTypes,
            0x4A => TransportSend,
            0x4B => FastTransferSourceCopyMessages,
            0x4C => FastTransferSourceCopyFolder,
            0x4D => FastTransferSourceCopyTo,
            0x4E => FastTransferSourceGetBuffer,
            0x4F => FindRow,
            0x50 => Progress,
            0x51 => TransportNewMail,
            0x52 => GetValidAttachments,
            0x53 => FastTransferDestinationConfigure,
            0x54 => FastTransferDestinationPutBuffer,
            0x55 => GetNamesFromPropertyIds,
            0x56 => GetPropertyIdsFromNames,
            0x57 => UpdateDeferredActionMessages,
            0x58 => EmptyFolder,
            0x59 => ExpandRow,
            0x5A => CollapseRow,
            0x5B => LockRegionStream,
            0x5C => UnlockRegionStream,
            0x5D => CommitStream,
            0x5E => GetStreamSize,
            0x5F => QueryNamedProperties,
            0x60 => GetPerUserLongTermIds,
            0x61 => GetPerUserGuid,
            0x63 => ReadPerUserInformation,
            0x64 => WritePerUserInformation,
            0x66 => SetReadFlags,
            0x67 => CopyProperties,
            0x68 => GetReceiveFolderTable,
            0x69 => FastTransferSourceCopyProperties,
            0x6B => GetCollapseState,
            0x6C => SetCollapseState,
            0x6D => GetTransportFolder,
            0x6E => Pending,
            0x6F => OptionsData,
            0x70 => SynchronizationConfigure,
            0x72 => SynchronizationImportMessageChange,
            0x73 => SynchronizationImportHierarchyChange,
            0x74 => SynchronizationImportDeletes,
            0x75 => SynchronizationUploadStateStreamBegin,
            0x76 => SynchronizationUploadStateStreamContinue,
            0x77 => SynchronizationUploadStateStreamEnd,
            0x78 => SynchronizationImportMessageMove,
            0x79 => SetPropertiesNoReplicate,
            0x7A => DeletePropertiesNoReplicate,
            0x7B => GetStoreState,
            0x7E => SynchronizationOpenCollector,
            0x7F => GetLocalReplicaIds,
            0x80 => SynchronizationImportReadStateChanges,
            0x81 => ResetTable,
            0x82 => SynchronizationGetTransferState,
            0x86 => TellVersion,
            0x89 => FreeBookmark,
            0x90 => WriteAndCommitStream,
            0x91 => HardDeleteMessages,
            0x92 => HardDeleteMessagesAndSubfolders,
            0x93 => SetLocalReplicaMidsetDeleted,
            0xF9 => Backoff,
            0xFE => Logon,
            0xFF => BufferTooSmall,
            other if Self::is_reserved(other) => {
                return Err(DecodeError::ReservedRopId(other));
            }
            other => return Err(DecodeError::UnknownRopId(other)),
        })
    }
}

/// A 24-byte long-term object id: database GUID, 6-byte global counter,
/// and a 2-byte zero pad on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LongTermId {
    pub database_guid: Uuid,
    pub global_counter: [u8; 6],
}

impl LongTermId {
    pub fn new(database_guid: Uuid, global_counter: [u8; 6]) -> Self {
        Self {
            database_guid,
            global_counter,
        }
    }

    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let database_guid = cur.read_guid()?;
        let global_counter = cur.read_array::<6>()?;
        cur.read_u16()?; // pad
        Ok(Self {
            database_guid,
            global_counter,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_guid(&self.database_guid);
        w.write_bytes(&self.global_counter);
        w.write_u16(0);
    }
}

/// A 22-byte global identifier: database GUID plus global counter, with
/// no pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalIdentifier {
    pub database_guid: Uuid,
    pub global_counter: [u8; 6],
}

impl GlobalIdentifier {
    pub fn new(database_guid: Uuid, global_counter: [u8; 6]) -> Self {
        Self {
            database_guid,
            global_counter,
        }
    }

    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            database_guid: cur.read_guid()?,
            global_counter: cur.read_array::<6>()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_guid(&self.database_guid);
        w.write_bytes(&self.global_counter);
    }
}

/// Replica server list carried by the ghosted-folder family and
/// RopGetOwningServers: total count, count of cheap (low-cost) servers,
/// then the server names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaServers {
    pub cheap_server_count: u16,
    pub servers: Vec<String>,
}

impl ReplicaServers {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let server_count = cur.read_u16()? as usize;
        let cheap_server_count = cur.read_u16()?;
        let mut servers = Vec::with_capacity(server_count.min(1024));
        for _ in 0..server_count {
            servers.push(cur.read_null_terminated_ascii()?);
        }
        Ok(Self {
            cheap_server_count,
            servers,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u16(self.servers.len() as u16);
        w.write_u16(self.cheap_server_count);
        for server in &self.servers {
            w.write_null_terminated_ascii(server);
        }
    }
}

/// Out-of-band context required to decode context-dependent ROPs: the
/// column schema negotiated by RopSetColumns (row-bearing responses are
/// not self-describing) and the logon kind (two request layouts change
/// shape on public-folders logons).
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
    pub columns: Option<&'a [PropertyTag]>,
    pub private_logon: bool,
}

impl Default for DecodeContext<'_> {
    fn default() -> Self {
        Self {
            columns: None,
            private_logon: true,
        }
    }
}

impl<'a> DecodeContext<'a> {
    pub fn with_columns(columns: &'a [PropertyTag]) -> Self {
        Self {
            columns: Some(columns),
            private_logon: true,
        }
    }

    fn columns_for(&self, rop: RopId) -> Result<&'a [PropertyTag], DecodeError> {
        self.columns.ok_or(DecodeError::MissingColumnSchema { rop })
    }
}

/// A decoded ROP request.
#[derive(Debug, Clone, PartialEq)]
pub enum RopRequest {
    Release(ReleaseRequest),
    OpenFolder(OpenFolderRequest),
    OpenMessage(OpenMessageRequest),
    GetHierarchyTable(GetTableRequest),
    GetContentsTable(GetTableRequest),
    CreateMessage(CreateMessageRequest),
    GetPropertiesSpecific(GetPropertiesSpecificRequest),
    GetPropertiesAll(GetPropertiesAllRequest),
    GetPropertiesList(PropertyHeaderRequest),
    SetProperties(SetPropertiesRequest),
    DeleteProperties(DeletePropertiesRequest),
    SaveChangesMessage(SaveChangesMessageRequest),
    RemoveAllRecipients(RemoveAllRecipientsRequest),
    ModifyRecipients(ModifyRecipientsRequest),
    ReadRecipients(ReadRecipientsRequest),
    ReloadCachedInformation(ReloadCachedInformationRequest),
    SetMessageReadFlag(SetMessageReadFlagRequest),
    SetColumns(SetColumnsRequest),
    SortTable(SortTableRequest),
    Restrict(RestrictRequest),
    QueryRows(QueryRowsRequest),
    GetStatus(TableHeaderRequest),
    QueryPosition(TableHeaderRequest),
    SeekRow(SeekRowRequest),
    SeekRowBookmark(SeekRowBookmarkRequest),
    SeekRowFractional(SeekRowFractionalRequest),
    CreateBookmark(TableHeaderRequest),
    CreateFolder(CreateFolderRequest),
    DeleteFolder(DeleteFolderRequest),
    DeleteMessages(DeleteMessagesRequest),
    GetMessageStatus(GetMessageStatusRequest),
    SetMessageStatus(SetMessageStatusRequest),
    GetAttachmentTable(GetTableRequest),
    OpenAttachment(OpenAttachmentRequest),
    CreateAttachment(CreateAttachmentRequest),
    DeleteAttachment(DeleteAttachmentRequest),
    SaveChangesAttachment(SaveChangesAttachmentRequest),
    SetReceiveFolder(SetReceiveFolderRequest),
    GetReceiveFolder(GetReceiveFolderRequest),
    RegisterNotification(RegisterNotificationRequest),
    OpenStream(OpenStreamRequest),
    ReadStream(ReadStreamRequest),
    WriteStream(WriteStreamRequest),
    SeekStream(SeekStreamRequest),
    SetStreamSize(SetStreamSizeRequest),
    SetSearchCriteria(SetSearchCriteriaRequest),
    GetSearchCriteria(GetSearchCriteriaRequest),
    SubmitMessage(SubmitMessageRequest),
    MoveCopyMessages(MoveCopyMessagesRequest),
    AbortSubmit(AbortSubmitRequest),
    MoveFolder(MoveFolderRequest),
    CopyFolder(CopyFolderRequest),
    QueryColumnsAll(TableHeaderRequest),
    Abort(TableHeaderRequest),
    CopyTo(CopyToRequest),
    CopyToStream(CopyToStreamRequest),
    CloneStream(CloneStreamRequest),
    GetPermissionsTable(GetPermissionsTableRequest),
    GetRulesTable(GetRulesTableRequest),
    ModifyPermissions(ModifyPermissionsRequest),
    ModifyRules(ModifyRulesRequest),
    GetOwningServers(GetOwningServersRequest),
    LongTermIdFromId(LongTermIdFromIdRequest),
    IdFromLongTermId(IdFromLongTermIdRequest),
    PublicFolderIsGhosted(PublicFolderIsGhostedRequest),
    OpenEmbeddedMessage(OpenEmbeddedMessageRequest),
    SetSpooler(TransportHeaderRequest),
    SpoolerLockMessage(SpoolerLockMessageRequest),
    GetAddressTypes(TransportHeaderRequest),
    TransportSend(TransportHeaderRequest),
    FastTransferSourceCopyMessages(SourceCopyMessagesRequest),
    FastTransferSourceCopyFolder(SourceCopyFolderRequest),
    FastTransferSourceCopyTo(SourceCopyToRequest),
    FastTransferSourceGetBuffer(SourceGetBufferRequest),
    FindRow(FindRowRequest),
    Progress(ProgressRequest),
    TransportNewMail(TransportNewMailRequest),
    GetValidAttachments(GetValidAttachmentsRequest),
    FastTransferDestinationConfigure(DestinationConfigureRequest),
    FastTransferDestinationPutBuffer(DestinationPutBufferRequest),
    GetNamesFromPropertyIds(GetNamesFromPropertyIdsRequest),
    GetPropertyIdsFromNames(GetPropertyIdsFromNamesRequest),
    UpdateDeferredActionMessages(UpdateDeferredActionMessagesRequest),
    EmptyFolder(EmptyFolderRequest),
    ExpandRow(ExpandRowRequest),
    CollapseRow(CollapseRowRequest),
    LockRegionStream(LockRegionStreamRequest),
    UnlockRegionStream(LockRegionStreamRequest),
    CommitStream(StreamHeaderRequest),
    GetStreamSize(StreamHeaderRequest),
    QueryNamedProperties(QueryNamedPropertiesRequest),
    GetPerUserLongTermIds(GetPerUserLongTermIdsRequest),
    GetPerUserGuid(GetPerUserGuidRequest),
    ReadPerUserInformation(ReadPerUserInformationRequest),
    WritePerUserInformation(WritePerUserInformationRequest),
    SetReadFlags(SetReadFlagsRequest),
    CopyProperties(CopyPropertiesRequest),
    GetReceiveFolderTable(GetReceiveFolderTableRequest),
    FastTransferSourceCopyProperties(SourceCopyPropertiesRequest),
    GetCollapseState(GetCollapseStateRequest),
    SetCollapseState(SetCollapseStateRequest),
    GetTransportFolder(TransportHeaderRequest),
    OptionsData(OptionsDataRequest),
    SynchronizationConfigure(SynchronizationConfigureRequest),
    SynchronizationImportMessageChange(ImportMessageChangeRequest),
    SynchronizationImportHierarchyChange(ImportHierarchyChangeRequest),
    SynchronizationImportDeletes(ImportDeletesRequest),
    SynchronizationUploadStateStreamBegin(UploadStateStreamBeginRequest),
    SynchronizationUploadStateStreamContinue(UploadStateStreamContinueRequest),
    SynchronizationUploadStateStreamEnd(UploadStateStreamEndRequest),
    SynchronizationImportMessageMove(ImportMessageMoveRequest),
    SetPropertiesNoReplicate(SetPropertiesRequest),
    DeletePropertiesNoReplicate(DeletePropertiesRequest),
    GetStoreState(GetStoreStateRequest),
    SynchronizationOpenCollector(OpenCollectorRequest),
    GetLocalReplicaIds(GetLocalReplicaIdsRequest),
    SynchronizationImportReadStateChanges(ImportReadStateChangesRequest),
    ResetTable(TableHeaderRequest),
    SynchronizationGetTransferState(GetTransferStateRequest),
    TellVersion(TellVersionRequest),
    FreeBookmark(FreeBookmarkRequest),
    WriteAndCommitStream(WriteStreamRequest),
    HardDeleteMessages(DeleteMessagesRequest),
    HardDeleteMessagesAndSubfolders(EmptyFolderRequest),
    SetLocalReplicaMidsetDeleted(SetLocalReplicaMidsetDeletedRequest),
    Logon(LogonRequest),
}

impl RopRequest {
    /// Decodes one request, starting at its RopId byte.
    pub fn decode(cur: &mut ByteCursor<'_>, ctx: &DecodeContext<'_>) -> Result<Self, DecodeError> {
        let rop_id = RopId::try_from(cur.read_u8()?)?;
        Ok(match rop_id {
            RopId::Release => Self::Release(ReleaseRequest::decode(cur)?),
            RopId::OpenFolder => Self::OpenFolder(OpenFolderRequest::decode(cur)?),
            RopId::OpenMessage => Self::OpenMessage(OpenMessageRequest::decode(cur)?),
            RopId::GetHierarchyTable => Self::GetHierarchyTable(GetTableRequest::decode(cur)?),
            RopId::GetContentsTable => Self::GetContentsTable(GetTableRequest::decode(cur)?),
            RopId::CreateMessage => Self::CreateMessage(CreateMessageRequest::decode(cur)?),
            RopId::GetPropertiesSpecific => {
                Self::GetPropertiesSpecific(GetPropertiesSpecificRequest::decode(cur)?)
            }
            RopId::GetPropertiesAll => {
                Self::GetPropertiesAll(GetPropertiesAllRequest::decode(cur)?)
            }
            RopId::GetPropertiesList => {
                Self::GetPropertiesList(PropertyHeaderRequest::decode(cur)?)
            }
            RopId::SetProperties => Self::SetProperties(SetPropertiesRequest::decode(cur)?),
            RopId::DeleteProperties => {
                Self::DeleteProperties(DeletePropertiesRequest::decode(cur)?)
            }
            RopId::SaveChangesMessage => {
                Self::SaveChangesMessage(SaveChangesMessageRequest::decode(cur)?)
            }
            RopId::RemoveAllRecipients => {
                Self::RemoveAllRecipients(RemoveAllRecipientsRequest::decode(cur)?)
            }
            RopId::ModifyRecipients => {
                Self::ModifyRecipients(ModifyRecipientsRequest::decode(cur)?)
            }
            RopId::ReadRecipients => Self::ReadRecipients(ReadRecipientsRequest::decode(cur)?),
            RopId::ReloadCachedInformation => {
                Self::ReloadCachedInformation(ReloadCachedInformationRequest::decode(cur)?)
            }
            RopId::SetMessageReadFlag => Self::SetMessageReadFlag(
                SetMessageReadFlagRequest::decode(cur, ctx.private_logon)?,
            ),
            RopId::SetColumns => Self::SetColumns(SetColumnsRequest::decode(cur)?),
            RopId::SortTable => Self::SortTable(SortTableRequest::decode(cur)?),
            RopId::Restrict => Self::Restrict(RestrictRequest::decode(cur)?),
            RopId::QueryRows => Self::QueryRows(QueryRowsRequest::decode(cur)?),
            RopId::GetStatus => Self::GetStatus(TableHeaderRequest::decode(cur)?),
            RopId::QueryPosition => Self::QueryPosition(TableHeaderRequest::decode(cur)?),
            RopId::SeekRow => Self::SeekRow(SeekRowRequest::decode(cur)?),
            RopId::SeekRowBookmark => {
                Self::SeekRowBookmark(SeekRowBookmarkRequest::decode(cur)?)
            }
            RopId::SeekRowFractional => {
                Self::SeekRowFractional(SeekRowFractionalRequest::decode(cur)?)
            }
            RopId::CreateBookmark => Self::CreateBookmark(TableHeaderRequest::decode(cur)?),
            RopId::CreateFolder => Self::CreateFolder(CreateFolderRequest::decode(cur)?),
            RopId::DeleteFolder => Self::DeleteFolder(DeleteFolderRequest::decode(cur)?),
            RopId::DeleteMessages => Self::DeleteMessages(DeleteMessagesRequest::decode(cur)?),
            RopId::GetMessageStatus => {
                Self::GetMessageStatus(GetMessageStatusRequest::decode(cur)?)
            }
            RopId::SetMessageStatus => {
                Self::SetMessageStatus(SetMessageStatusRequest::decode(cur)?)
            }
            RopId::GetAttachmentTable => Self::GetAttachmentTable(GetTableRequest::decode(cur)?),
            RopId::OpenAttachment => Self::OpenAttachment(OpenAttachmentRequest::decode(cur)?),
            RopId::CreateAttachment => {
                Self::CreateAttachment(CreateAttachmentRequest::decode(cur)?)
            }
            RopId::DeleteAttachment => {
                Self::DeleteAttachment(DeleteAttachmentRequest::decode(cur)?)
            }
            RopId::SaveChangesAttachment => {
                Self::SaveChangesAttachment(SaveChangesAttachmentRequest::decode(cur)?)
            }
            RopId::SetReceiveFolder => {
                Self::SetReceiveFolder(SetReceiveFolderRequest::decode(cur)?)
            }
            RopId::GetReceiveFolder => {
                Self::GetReceiveFolder(GetReceiveFolderRequest::decode(cur)?)
            }
            RopId::RegisterNotification => {
                Self::RegisterNotification(RegisterNotificationRequest::decode(cur)?)
            }
            RopId::OpenStream => Self::OpenStream(OpenStreamRequest::decode(cur)?),
            RopId::ReadStream => Self::ReadStream(ReadStreamRequest::decode(cur)?),
            RopId::WriteStream => Self::WriteStream(WriteStreamRequest::decode(cur)?),
            RopId::SeekStream => Self::SeekStream(SeekStreamRequest::decode(cur)?),
            RopId::SetStreamSize => Self::SetStreamSize(SetStreamSizeRequest::decode(cur)?),
            RopId::SetSearchCriteria => {
                Self::SetSearchCriteria(SetSearchCriteriaRequest::decode(cur)?)
            }
            RopId::GetSearchCriteria => {
                Self::GetSearchCriteria(GetSearchCriteriaRequest::decode(cur)?)
            }
            RopId::SubmitMessage => Self::SubmitMessage(SubmitMessageRequest::decode(cur)?),
            RopId::MoveCopyMessages => {
                Self::MoveCopyMessages(MoveCopyMessagesRequest::decode(cur)?)
            }
            RopId::AbortSubmit => Self::AbortSubmit(AbortSubmitRequest::decode(cur)?),
            RopId::MoveFolder => Self::MoveFolder(MoveFolderRequest::decode(cur)?),
            RopId::CopyFolder => Self::CopyFolder(CopyFolderRequest::decode(cur)?),
            RopId::QueryColumnsAll => Self::QueryColumnsAll(TableHeaderRequest::decode(cur)?),
            RopId::Abort => Self::Abort(TableHeaderRequest::decode(cur)?),
            RopId::CopyTo => Self::CopyTo(CopyToRequest::decode(cur)?),
            RopId::CopyToStream => Self::CopyToStream(CopyToStreamRequest::decode(cur)?),
            RopId::CloneStream => Self::CloneStream(CloneStreamRequest::decode(cur)?),
            RopId::GetPermissionsTable => {
                Self::GetPermissionsTable(GetPermissionsTableRequest::decode(cur)?)
            }
            RopId::GetRulesTable => Self::GetRulesTable(GetRulesTableRequest::decode(cur)?),
            RopId::ModifyPermissions => {
                Self::ModifyPermissions(ModifyPermissionsRequest::decode(cur)?)
            }
            RopId::ModifyRules => Self::ModifyRules(ModifyRulesRequest::decode(cur)?),
            RopId::GetOwningServers => {
                Self::GetOwningServers(GetOwningServersRequest::decode(cur)?)
            }
            RopId::LongTermIdFromId => {
                Self::LongTermIdFromId(LongTermIdFromIdRequest::decode(cur)?)
            }
            RopId::IdFromLongTermId => {
                Self::IdFromLongTermId(IdFromLongTermIdRequest::decode(cur)?)
            }
            RopId::PublicFolderIsGhosted => {
                Self::PublicFolderIsGhosted(PublicFolderIsGhostedRequest::decode(cur)?)
            }
            RopId::OpenEmbeddedMessage => {
                Self::OpenEmbeddedMessage(OpenEmbeddedMessageRequest::decode(cur)?)
            }
            RopId::SetSpooler => Self::SetSpooler(TransportHeaderRequest::decode(cur)?),
            RopId::SpoolerLockMessage => {
                Self::SpoolerLockMessage(SpoolerLockMessageRequest::decode(cur)?)
            }
            RopId::GetAddressTypes => Self::GetAddressTypes(TransportHeaderRequest::decode(cur)?),
            RopId::TransportSend => Self::TransportSend(TransportHeaderRequest::decode(cur)?),
            RopId::FastTransferSourceCopyMessages => {
                Self::FastTransferSourceCopyMessages(SourceCopyMessagesRequest::decode(cur)?)
            }
            RopId::FastTransferSourceCopyFolder => {
                Self::FastTransferSourceCopyFolder(SourceCopyFolderRequest::decode(cur)?)
            }
            RopId::FastTransferSourceCopyTo => {
                Self::FastTransferSourceCopyTo(SourceCopyToRequest::decode(cur)?)
            }
            RopId::FastTransferSourceGetBuffer => {
                Self::FastTransferSourceGetBuffer(SourceGetBufferRequest::decode(cur)?)
            }
            RopId::FindRow => Self::FindRow(FindRowRequest::decode(cur)?),
            RopId::Progress => Self::Progress(ProgressRequest::decode(cur)?),
            RopId::TransportNewMail => {
                Self::TransportNewMail(TransportNewMailRequest::decode(cur)?)
            }
            RopId::GetValidAttachments => {
                Self::GetValidAttachments(GetValidAttachmentsRequest::decode(cur)?)
            }
            RopId::FastTransferDestinationConfigure => {
                Self::FastTransferDestinationConfigure(DestinationConfigureRequest::decode(cur)?)
            }
            RopId::FastTransferDestinationPutBuffer => {
                Self::FastTransferDestinationPutBuffer(DestinationPutBufferRequest::decode(cur)?)
            }
            RopId::GetNamesFromPropertyIds => {
                Self::GetNamesFromPropertyIds(GetNamesFromPropertyIdsRequest::decode(cur)?)
            }
            RopId::GetPropertyIdsFromNames => {
                Self::GetPropertyIdsFromNames(GetPropertyIdsFromNamesRequest::decode(cur)?)
            }
            RopId::UpdateDeferredActionMessages => {
                Self::UpdateDeferredActionMessages(UpdateDeferredActionMessagesRequest::decode(
                    cur,
                )?)
            }
            RopId::EmptyFolder => Self::EmptyFolder(EmptyFolderRequest::decode(cur)?),
            RopId::ExpandRow => Self::ExpandRow(ExpandRowRequest::decode(cur)?),
            RopId::CollapseRow => Self::CollapseRow(CollapseRowRequest::decode(cur)?),
            RopId::LockRegionStream => {
                Self::LockRegionStream(LockRegionStreamRequest::decode(cur)?)
            }
            RopId::UnlockRegionStream => {
                Self::UnlockRegionStream(LockRegionStreamRequest::decode(cur)?)
            }
            RopId::CommitStream => Self::CommitStream(StreamHeaderRequest::decode(cur)?),
            RopId::GetStreamSize => Self::GetStreamSize(StreamHeaderRequest::decode(cur)?),
            RopId::QueryNamedProperties => {
                Self::QueryNamedProperties(QueryNamedPropertiesRequest::decode(cur)?)
            }
            RopId::GetPerUserLongTermIds => {
                Self::GetPerUserLongTermIds(GetPerUserLongTermIdsRequest::decode(cur)?)
            }
            RopId::GetPerUserGuid => Self::GetPerUserGuid(GetPerUserGuidRequest::decode(cur)?),
            RopId::ReadPerUserInformation => {
                Self::ReadPerUserInformation(ReadPerUserInformationRequest::decode(cur)?)
            }
            RopId::WritePerUserInformation => Self::WritePerUserInformation(
                WritePerUserInformationRequest::decode(cur, ctx.private_logon)?,
            ),
            RopId::SetReadFlags => Self::SetReadFlags(SetReadFlagsRequest::decode(cur)?),
            RopId::CopyProperties => Self::CopyProperties(CopyPropertiesRequest::decode(cur)?),
            RopId::GetReceiveFolderTable => {
                Self::GetReceiveFolderTable(GetReceiveFolderTableRequest::decode(cur)?)
            }
            RopId::FastTransferSourceCopyProperties => {
                Self::FastTransferSourceCopyProperties(SourceCopyPropertiesRequest::decode(cur)?)
            }
            RopId::GetCollapseState => {
                Self::GetCollapseState(GetCollapseStateRequest::decode(cur)?)
            }
            RopId::SetCollapseState => {
                Self::SetCollapseState(SetCollapseStateRequest::decode(cur)?)
            }
            RopId::GetTransportFolder => {
                Self::GetTransportFolder(TransportHeaderRequest::decode(cur)?)
            }
            RopId::OptionsData => Self::OptionsData(OptionsDataRequest::decode(cur)?),
            RopId::SynchronizationConfigure => {
                Self::SynchronizationConfigure(SynchronizationConfigureRequest::decode(cur)?)
            }
            RopId::SynchronizationImportMessageChange => {
                Self::SynchronizationImportMessageChange(ImportMessageChangeRequest::decode(cur)?)
            }
            RopId::SynchronizationImportHierarchyChange => {
                Self::SynchronizationImportHierarchyChange(ImportHierarchyChangeRequest::decode(
                    cur,
                )?)
            }
            RopId::SynchronizationImportDeletes => {
                Self::SynchronizationImportDeletes(ImportDeletesRequest::decode(cur)?)
            }
            RopId::SynchronizationUploadStateStreamBegin => {
                Self::SynchronizationUploadStateStreamBegin(UploadStateStreamBeginRequest::decode(
                    cur,
                )?)
            }
            RopId::SynchronizationUploadStateStreamContinue => {
                Self::SynchronizationUploadStateStreamContinue(
                    UploadStateStreamContinueRequest::decode(cur)?,
                )
            }
            RopId::SynchronizationUploadStateStreamEnd => {
                Self::SynchronizationUploadStateStreamEnd(UploadStateStreamEndRequest::decode(
                    cur,
                )?)
            }
            RopId::SynchronizationImportMessageMove => {
                Self::SynchronizationImportMessageMove(ImportMessageMoveRequest::decode(cur)?)
            }
            RopId::SetPropertiesNoReplicate => {
                Self::SetPropertiesNoReplicate(SetPropertiesRequest::decode(cur)?)
            }
            RopId::DeletePropertiesNoReplicate => {
                Self::DeletePropertiesNoReplicate(DeletePropertiesRequest::decode(cur)?)
            }
            RopId::GetStoreState => Self::GetStoreState(GetStoreStateRequest::decode(cur)?),
            RopId::SynchronizationOpenCollector => {
                Self::SynchronizationOpenCollector(OpenCollectorRequest::decode(cur)?)
            }
            RopId::GetLocalReplicaIds => {
                Self::GetLocalReplicaIds(GetLocalReplicaIdsRequest::decode(cur)?)
            }
            RopId::SynchronizationImportReadStateChanges => {
                Self::SynchronizationImportReadStateChanges(ImportReadStateChangesRequest::decode(
                    cur,
                )?)
            }
            RopId::ResetTable => Self::ResetTable(TableHeaderRequest::decode(cur)?),
            RopId::SynchronizationGetTransferState => {
                Self::SynchronizationGetTransferState(GetTransferStateRequest::decode(cur)?)
            }
            RopId::TellVersion => Self::TellVersion(TellVersionRequest::decode(cur)?),
            RopId::FreeBookmark => Self::FreeBookmark(FreeBookmarkRequest::decode(cur)?),
            RopId::WriteAndCommitStream => {
                Self::WriteAndCommitStream(WriteStreamRequest::decode(cur)?)
            }
            RopId::HardDeleteMessages => {
                Self::HardDeleteMessages(DeleteMessagesRequest::decode(cur)?)
            }
            RopId::HardDeleteMessagesAndSubfolders => {
                Self::HardDeleteMessagesAndSubfolders(EmptyFolderRequest::decode(cur)?)
            }
            RopId::SetLocalReplicaMidsetDeleted => {
                Self::SetLocalReplicaMidsetDeleted(SetLocalReplicaMidsetDeletedRequest::decode(
                    cur,
                )?)
            }
            RopId::Logon => Self::Logon(LogonRequest::decode(cur)?),
            RopId::Notify | RopId::Pending | RopId::Backoff | RopId::BufferTooSmall => {
                return Err(DecodeError::NotARequest(rop_id));
            }
        })
    }

    /// Encodes the request, RopId byte first.
    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.rop_id() as u8);
        match self {
            Self::Release(r) => r.encode(w),
            Self::OpenFolder(r) => r.encode(w),
            Self::OpenMessage(r) => r.encode(w),
            Self::GetHierarchyTable(r) | Self::GetContentsTable(r) | Self::GetAttachmentTable(r) => {
                r.encode(w)
            }
            Self::CreateMessage(r) => r.encode(w),
            Self::GetPropertiesSpecific(r) => r.encode(w),
            Self::GetPropertiesAll(r) => r.encode(w),
            Self::GetPropertiesList(r) => r.encode(w),
            Self::SetProperties(r) | Self::SetPropertiesNoReplicate(r) => r.encode(w),
            Self::DeleteProperties(r) | Self::DeletePropertiesNoReplicate(r) => r.encode(w),
            Self::SaveChangesMessage(r) => r.encode(w),
            Self::RemoveAllRecipients(r) => r.encode(w),
            Self::ModifyRecipients(r) => r.encode(w),
            Self::ReadRecipients(r) => r.encode(w),
            Self::ReloadCachedInformation(r) => r.encode(w),
            Self::SetMessageReadFlag(r) => r.encode(w),
            Self::SetColumns(r) => r.encode(w),
            Self::SortTable(r) => r.encode(w),
            Self::Restrict(r) => r.encode(w),
            Self::QueryRows(r) => r.encode(w),
            Self::GetStatus(r)
            | Self::QueryPosition(r)
            | Self::CreateBookmark(r)
            | Self::QueryColumnsAll(r)
            | Self::Abort(r)
            | Self::ResetTable(r) => r.encode(w),
            Self::SeekRow(r) => r.encode(w),
            Self::SeekRowBookmark(r) => r.encode(w),
            Self::SeekRowFractional(r) => r.encode(w),
            Self::CreateFolder(r) => r.encode(w),
            Self::DeleteFolder(r) => r.encode(w),
            Self::DeleteMessages(r) | Self::HardDeleteMessages(r) => r.encode(w),
            Self::GetMessageStatus(r) => r.encode(w),
            Self::SetMessageStatus(r) => r.encode(w),
            Self::OpenAttachment(r) => r.encode(w),
            Self::CreateAttachment(r) => r.encode(w),
            Self::DeleteAttachment(r) => r.encode(w),
            Self::SaveChangesAttachment(r) => r.encode(w),
            Self::SetReceiveFolder(r) => r.encode(w),
            Self::GetReceiveFolder(r) => r.encode(w),
            Self::RegisterNotification(r) => r.encode(w),
            Self::OpenStream(r) => r.encode(w),
            Self::ReadStream(r) => r.encode(w),
            Self::WriteStream(r) | Self::WriteAndCommitStream(r) => r.encode(w),
            Self::SeekStream(r) => r.encode(w),
            Self::SetStreamSize(r) => r.encode(w),
            Self::SetSearchCriteria(r) => r.encode(w),
            Self::GetSearchCriteria(r) => r.encode(w),
            Self::SubmitMessage(r) => r.encode(w),
            Self::MoveCopyMessages(r) => r.encode(w),
            Self::AbortSubmit(r) => r.encode(w),
            Self::MoveFolder(r) => r.encode(w),
            Self::CopyFolder(r) => r.encode(w),
            Self::CopyTo(r) => r.encode(w),
            Self::CopyToStream(r) => r.encode(w),
            Self::CloneStream(r) => r.encode(w),
            Self::GetPermissionsTable(r) => r.encode(w),
            Self::GetRulesTable(r) => r.encode(w),
            Self::ModifyPermissions(r) => r.encode(w),
            Self::ModifyRules(r) => r.encode(w),
            Self::GetOwningServers(r) => r.encode(w),
            Self::LongTermIdFromId(r) => r.encode(w),
            Self::IdFromLongTermId(r) => r.encode(w),
            Self::PublicFolderIsGhosted(r) => r.encode(w),
            Self::OpenEmbeddedMessage(r) => r.encode(w),
            Self::SetSpooler(r)
            | Self::GetAddressTypes(r)
            | Self::TransportSend(r)
            | Self::GetTransportFolder(r) => r.encode(w),
            Self::SpoolerLockMessage(r) => r.encode(w),
            Self::FastTransferSourceCopyMessages(r) => r.encode(w),
            Self::FastTransferSourceCopyFolder(r) => r.encode(w),
            Self::FastTransferSourceCopyTo(r) => r.encode(w),
            Self::FastTransferSourceGetBuffer(r) => r.encode(w),
            Self::FindRow(r) => r.encode(w),
            Self::Progress(r) => r.encode(w),
            Self::TransportNewMail(r) => r.encode(w),
            Self::GetValidAttachments(r) => r.encode(w),
            Self::FastTransferDestinationConfigure(r) => r.encode(w),
            Self::FastTransferDestinationPutBuffer(r) => r.encode(w),
            Self::GetNamesFromPropertyIds(r) => r.encode(w),
            Self::GetPropertyIdsFromNames(r) => r.encode(w),
            Self::UpdateDeferredActionMessages(r) => r.encode(w),
            Self::EmptyFolder(r) | Self::HardDeleteMessagesAndSubfolders(r) => r.encode(w),
            Self::ExpandRow(r) => r.encode(w),
            Self::CollapseRow(r) => r.encode(w),
            Self::LockRegionStream(r) | Self::UnlockRegionStream(r) => r.encode(w),
            Self::CommitStream(r) | Self::GetStreamSize(r) => r.encode(w),
            Self::QueryNamedProperties(r) => r.encode(w),
            Self::GetPerUserLongTermIds(r) => r.encode(w),
            Self::GetPerUserGuid(r) => r.encode(w),
            Self::ReadPerUserInformation(r) => r.encode(w),
            Self::WritePerUserInformation(r) => r.encode(w),
            Self::SetReadFlags(r) => r.encode(w),
            Self::CopyProperties(r) => r.encode(w),
            Self::GetReceiveFolderTable(r) => r.encode(w),
            Self::FastTransferSourceCopyProperties(r) => r.encode(w),
            Self::GetCollapseState(r) => r.encode(w),
            Self::SetCollapseState(r) => r.encode(w),
            Self::OptionsData(r) => r.encode(w),
            Self::SynchronizationConfigure(r) => r.encode(w),
            Self::SynchronizationImportMessageChange(r) => r.encode(w),
            Self::SynchronizationImportHierarchyChange(r) => r.encode(w),
            Self::SynchronizationImportDeletes(r) => r.encode(w),
            Self::SynchronizationUploadStateStreamBegin(r) => r.encode(w),
            Self::SynchronizationUploadStateStreamContinue(r) => r.encode(w),
            Self::SynchronizationUploadStateStreamEnd(r) => r.encode(w),
            Self::SynchronizationImportMessageMove(r) => r.encode(w),
            Self::GetStoreState(r) => r.encode(w),
            Self::SynchronizationOpenCollector(r) => r.encode(w),
            Self::GetLocalReplicaIds(r) => r.encode(w),
            Self::SynchronizationImportReadStateChanges(r) => r.encode(w),
            Self::SynchronizationGetTransferState(r) => r.encode(w),
            Self::TellVersion(r) => r.encode(w),
            Self::FreeBookmark(r) => r.encode(w),
            Self::SetLocalReplicaMidsetDeleted(r) => r.encode(w),
            Self::Logon(r) => r.encode(w),
        }
    }

    /// The operation id of this request.
    pub fn rop_id(&self) -> RopId {
        match self {
            Self::Release(_) => RopId::Release,
            Self::OpenFolder(_) => RopId::OpenFolder,
            Self::OpenMessage(_) => RopId::OpenMessage,
            Self::GetHierarchyTable(_) => RopId::GetHierarchyTable,
            Self::GetContentsTable(_) => RopId::GetContentsTable,
            Self::CreateMessage(_) => RopId::CreateMessage,
            Self::GetPropertiesSpecific(_) => RopId::GetPropertiesSpecific,
            Self::GetPropertiesAll(_) => RopId::GetPropertiesAll,
            Self::GetPropertiesList(_) => RopId::GetPropertiesList,
            Self::SetProperties(_) => RopId::SetProperties,
            Self::DeleteProperties(_) => RopId::DeleteProperties,
            Self::SaveChangesMessage(_) => RopId::SaveChangesMessage,
            Self::RemoveAllRecipients(_) => RopId::RemoveAllRecipients,
            Self::ModifyRecipients(_) => RopId::ModifyRecipients,
            Self::ReadRecipients(_) => RopId::ReadRecipients,
            Self::ReloadCachedInformation(_) => RopId::ReloadCachedInformation,
            Self::SetMessageReadFlag(_) => RopId::SetMessageReadFlag,
            Self::SetColumns(_) => RopId::SetColumns,
            Self::SortTable(_) => RopId::SortTable,
            Self::Restrict(_) => RopId::Restrict,
            Self::QueryRows(_) => RopId::QueryRows,
            Self::GetStatus(_) => RopId::GetStatus,
            Self::QueryPosition(_) => RopId::QueryPosition,
            Self::SeekRow(_) => RopId::SeekRow,
            Self::SeekRowBookmark(_) => RopId::SeekRowBookmark,
            Self::SeekRowFractional(_) => RopId::SeekRowFractional,
            Self::CreateBookmark(_) => RopId::CreateBookmark,
            Self::CreateFolder(_) => RopId::CreateFolder,
            Self::DeleteFolder(_) => RopId::DeleteFolder,
            Self::DeleteMessages(_) => RopId::DeleteMessages,
            Self::GetMessageStatus(_) => RopId::GetMessageStatus,
            Self::SetMessageStatus(_) => RopId::SetMessageStatus,
            Self::GetAttachmentTable(_) => RopId::GetAttachmentTable,
            Self::OpenAttachment(_) => RopId::OpenAttachment,
            Self::CreateAttachment(_) => RopId::CreateAttachment,
            Self::DeleteAttachment(_) => RopId::DeleteAttachment,
            Self::SaveChangesAttachment(_) => RopId::SaveChangesAttachment,
            Self::SetReceiveFolder(_) => RopId::SetReceiveFolder,
            Self::GetReceiveFolder(_) => RopId::GetReceiveFolder,
            Self::RegisterNotification(_) => RopId::RegisterNotification,
            Self::OpenStream(_) => RopId::OpenStream,
            Self::ReadStream(_) => RopId::ReadStream,
            Self::WriteStream(_) => RopId::WriteStream,
            Self::SeekStream(_) => RopId::SeekStream,
            Self::SetStreamSize(_) => RopId::SetStreamSize,
            Self::SetSearchCriteria(_) => RopId::SetSearchCriteria,
            Self::GetSearchCriteria(_) => RopId::GetSearchCriteria,
            Self::SubmitMessage(_) => RopId::SubmitMessage,
            Self::MoveCopyMessages(_) => RopId::MoveCopyMessages,
            Self::AbortSubmit(_) => RopId::AbortSubmit,
            Self::MoveFolder(_) => RopId::MoveFolder,
            Self::CopyFolder(_) => RopId::CopyFolder,
            Self::QueryColumnsAll(_) => RopId::QueryColumnsAll,
            Self::Abort(_) => RopId::Abort,
            Self::CopyTo(_) => RopId::CopyTo,
            Self::CopyToStream(_) => RopId::CopyToStream,
            Self::CloneStream(_) => RopId::CloneStream,
            Self::GetPermissionsTable(_) => RopId::GetPermissionsTable,
            Self::GetRulesTable(_) => RopId::GetRulesTable,
            Self::ModifyPermissions(_) => RopId::ModifyPermissions,
            Self::ModifyRules(_) => RopId::ModifyRules,
            Self::GetOwningServers(_) => RopId::GetOwningServers,
            Self::LongTermIdFromId(_) => RopId::LongTermIdFromId,
            Self::IdFromLongTermId(_) => RopId::IdFromLongTermId,
            Self::PublicFolderIsGhosted(_) => RopId::PublicFolderIsGhosted,
            Self::OpenEmbeddedMessage(_) => RopId::OpenEmbeddedMessage,
            Self::SetSpooler(_) => RopId::SetSpooler,
            Self::SpoolerLockMessage(_) => RopId::SpoolerLockMessage,
            Self::GetAddressTypes(_) => RopId::GetAddressTypes,
            Self::TransportSend(_) => RopId::TransportSend,
            Self::FastTransferSourceCopyMessages(_) => RopId::FastTransferSourceCopyMessages,
            Self::FastTransferSourceCopyFolder(_) => RopId::FastTransferSourceCopyFolder,
            Self::FastTransferSourceCopyTo(_) => RopId::FastTransferSourceCopyTo,
            Self::FastTransferSourceGetBuffer(_) => RopId::FastTransferSourceGetBuffer,
            Self::FindRow(_) => RopId::FindRow,
            Self::Progress(_) => RopId::Progress,
            Self::TransportNewMail(_) => RopId::TransportNewMail,
            Self::GetValidAttachments(_) => RopId::GetValidAttachments,
            Self::FastTransferDestinationConfigure(_) => RopId::FastTransferDestinationConfigure,
            Self::FastTransferDestinationPutBuffer(_) => RopId::FastTransferDestinationPutBuffer,
            Self::GetNamesFromPropertyIds(_) => RopId::GetNamesFromPropertyIds,
            Self::GetPropertyIdsFromNames(_) => RopId::GetPropertyIdsFromNames,
            Self::UpdateDeferredActionMessages(_) => RopId::UpdateDeferredActionMessages,
            Self::EmptyFolder(_) => RopId::EmptyFolder,
            Self::ExpandRow(_) => RopId::ExpandRow,
            Self::CollapseRow(_) => RopId::CollapseRow,
            Self::LockRegionStream(_) => RopId::LockRegionStream,
            Self::UnlockRegionStream(_) => RopId::UnlockRegionStream,
            Self::CommitStream(_) => RopId::CommitStream,
            Self::GetStreamSize(_) => RopId::GetStreamSize,
            Self::QueryNamedProperties(_) => RopId::QueryNamedProperties,
            Self::GetPerUserLongTermIds(_) => RopId::GetPerUserLongTermIds,
            Self::GetPerUserGuid(_) => RopId::GetPerUserGuid,
            Self::ReadPerUserInformation(_) => RopId::ReadPerUserInformation,
            Self::WritePerUserInformation(_) => RopId::WritePerUserInformation,
            Self::SetReadFlags(_) => RopId::SetReadFlags,
            Self::CopyProperties(_) => RopId::CopyProperties,
            Self::GetReceiveFolderTable(_) => RopId::GetReceiveFolderTable,
            Self::FastTransferSourceCopyProperties(_) => RopId::FastTransferSourceCopyProperties,
            Self::GetCollapseState(_) => RopId::GetCollapseState,
            Self::SetCollapseState(_) => RopId::SetCollapseState,
            Self::GetTransportFolder(_) => RopId::GetTransportFolder,
            Self::OptionsData(_) => RopId::OptionsData,
            Self::SynchronizationConfigure(_) => RopId::SynchronizationConfigure,
            Self::SynchronizationImportMessageChange(_) => {
                RopId::SynchronizationImportMessageChange
            }
            Self::SynchronizationImportHierarchyChange(_) => {
                RopId::SynchronizationImportHierarchyChange
            }
            Self::SynchronizationImportDeletes(_) => RopId::SynchronizationImportDeletes,
            Self::SynchronizationUploadStateStreamBegin(_) => {
                RopId::SynchronizationUploadStateStreamBegin
            }
            Self::SynchronizationUploadStateStreamContinue(_) => {
                RopId::SynchronizationUploadStateStreamContinue
            }
            Self::SynchronizationUploadStateStreamEnd(_) => {
                RopId::SynchronizationUploadStateStreamEnd
            }
            Self::SynchronizationImportMessageMove(_) => RopId::SynchronizationImportMessageMove,
            Self::SetPropertiesNoReplicate(_) => RopId::SetPropertiesNoReplicate,
            Self::DeletePropertiesNoReplicate(_) => RopId::DeletePropertiesNoReplicate,
            Self::GetStoreState(_) => RopId::GetStoreState,
            Self::SynchronizationOpenCollector(_) => RopId::SynchronizationOpenCollector,
            Self::GetLocalReplicaIds(_) => RopId::GetLocalReplicaIds,
            Self::SynchronizationImportReadStateChanges(_) => {
                RopId::SynchronizationImportReadStateChanges
            }
            Self::ResetTable(_) => RopId::ResetTable,
            Self::SynchronizationGetTransferState(_) => RopId::SynchronizationGetTransferState,
            Self::TellVersion(_) => RopId::TellVersion,
            Self::FreeBookmark(_) => RopId::FreeBookmark,
            Self::WriteAndCommitStream(_) => RopId::WriteAndCommitStream,
            Self::HardDeleteMessages(_) => RopId::HardDeleteMessages,
            Self::HardDeleteMessagesAndSubfolders(_) => RopId::HardDeleteMessagesAndSubfolders,
            Self::SetLocalReplicaMidsetDeleted(_) => RopId::SetLocalReplicaMidsetDeleted,
            Self::Logon(_) => RopId::Logon,
        }
    }
}

/// A decoded ROP response.
#[derive(Debug, Clone, PartialEq)]
pub enum RopResponse {
    OpenFolder(OpenFolderResponse),
    OpenMessage(OpenMessageResponse),
    GetHierarchyTable(GetTableResponse),
    GetContentsTable(GetTableResponse),
    CreateMessage(CreateMessageResponse),
    GetPropertiesSpecific(GetPropertiesSpecificResponse),
    GetPropertiesAll(GetPropertiesAllResponse),
    GetPropertiesList(GetPropertiesListResponse),
    SetProperties(PropertyProblemsResponse),
    DeleteProperties(PropertyProblemsResponse),
    SaveChangesMessage(SaveChangesMessageResponse),
    RemoveAllRecipients(MessageHeaderResponse),
    ModifyRecipients(MessageHeaderResponse),
    ReadRecipients(ReadRecipientsResponse),
    ReloadCachedInformation(ReloadCachedInformationResponse),
    SetMessageReadFlag(SetMessageReadFlagResponse),
    SetColumns(TableStatusResponse),
    SortTable(TableStatusResponse),
    Restrict(TableStatusResponse),
    QueryRows(QueryRowsResponse),
    GetStatus(TableStatusResponse),
    QueryPosition(QueryPositionResponse),
    SeekRow(SeekRowResponse),
    SeekRowBookmark(SeekRowBookmarkResponse),
    SeekRowFractional(TableHeaderResponse),
    CreateBookmark(CreateBookmarkResponse),
    CreateFolder(CreateFolderResponse),
    DeleteFolder(PartialCompletionResponse),
    DeleteMessages(PartialCompletionResponse),
    GetMessageStatus(MessageStatusResponse),
    SetMessageStatus(MessageStatusResponse),
    GetAttachmentTable(MessageHeaderResponse),
    OpenAttachment(MessageHeaderResponse),
    CreateAttachment(CreateAttachmentResponse),
    DeleteAttachment(MessageHeaderResponse),
    SaveChangesAttachment(MessageHeaderResponse),
    SetReceiveFolder(SetReceiveFolderResponse),
    GetReceiveFolder(GetReceiveFolderResponse),
    RegisterNotification(RegisterNotificationResponse),
    Notify(NotifyResponse),
    OpenStream(OpenStreamResponse),
    ReadStream(ReadStreamResponse),
    WriteStream(WriteStreamResponse),
    SeekStream(SeekStreamResponse),
    SetStreamSize(StreamHeaderResponse),
    SetSearchCriteria(SetSearchCriteriaResponse),
    GetSearchCriteria(GetSearchCriteriaResponse),
    SubmitMessage(TransportHeaderResponse),
    MoveCopyMessages(MoveCopyResponse),
    AbortSubmit(TransportHeaderResponse),
    MoveFolder(MoveCopyResponse),
    CopyFolder(MoveCopyResponse),
    QueryColumnsAll(QueryColumnsAllResponse),
    Abort(TableStatusResponse),
    CopyTo(CopyPropertiesResponse),
    CopyToStream(CopyToStreamResponse),
    CloneStream(StreamHeaderResponse),
    GetPermissionsTable(PermissionHeaderResponse),
    GetRulesTable(RuleHeaderResponse),
    ModifyPermissions(PermissionHeaderResponse),
    ModifyRules(RuleHeaderResponse),
    GetOwningServers(GetOwningServersResponse),
    LongTermIdFromId(LongTermIdFromIdResponse),
    IdFromLongTermId(IdFromLongTermIdResponse),
    PublicFolderIsGhosted(PublicFolderIsGhostedResponse),
    OpenEmbeddedMessage(OpenEmbeddedMessageResponse),
    SetSpooler(TransportHeaderResponse),
    SpoolerLockMessage(TransportHeaderResponse),
    GetAddressTypes(GetAddressTypesResponse),
    TransportSend(TransportSendResponse),
    FastTransferSourceCopyMessages(FastTransferHeaderResponse),
    FastTransferSourceCopyFolder(FastTransferHeaderResponse),
    FastTransferSourceCopyTo(FastTransferHeaderResponse),
    FastTransferSourceGetBuffer(SourceGetBufferResponse),
    FindRow(FindRowResponse),
    Progress(ProgressResponse),
    TransportNewMail(TransportHeaderResponse),
    GetValidAttachments(GetValidAttachmentsResponse),
    FastTransferDestinationConfigure(FastTransferHeaderResponse),
    FastTransferDestinationPutBuffer(DestinationPutBufferResponse),
    GetNamesFromPropertyIds(GetNamesFromPropertyIdsResponse),
    GetPropertyIdsFromNames(GetPropertyIdsFromNamesResponse),
    UpdateDeferredActionMessages(RuleHeaderResponse),
    EmptyFolder(PartialCompletionResponse),
    ExpandRow(ExpandRowResponse),
    CollapseRow(CollapseRowResponse),
    LockRegionStream(StreamHeaderResponse),
    UnlockRegionStream(StreamHeaderResponse),
    CommitStream(StreamHeaderResponse),
    GetStreamSize(GetStreamSizeResponse),
    QueryNamedProperties(QueryNamedPropertiesResponse),
    GetPerUserLongTermIds(GetPerUserLongTermIdsResponse),
    GetPerUserGuid(GetPerUserGuidResponse),
    ReadPerUserInformation(ReadPerUserInformationResponse),
    WritePerUserInformation(WritePerUserInformationResponse),
    SetReadFlags(PartialCompletionResponse),
    CopyProperties(CopyPropertiesResponse),
    GetReceiveFolderTable(GetReceiveFolderTableResponse),
    FastTransferSourceCopyProperties(FastTransferHeaderResponse),
    GetCollapseState(GetCollapseStateResponse),
    SetCollapseState(SetCollapseStateResponse),
    GetTransportFolder(GetTransportFolderResponse),
    Pending(PendingResponse),
    OptionsData(OptionsDataResponse),
    SynchronizationConfigure(SyncHeaderResponse),
    SynchronizationImportMessageChange(ImportIdResponse),
    SynchronizationImportHierarchyChange(ImportIdResponse),
    SynchronizationImportDeletes(SyncHeaderResponse),
    SynchronizationUploadStateStreamBegin(SyncHeaderResponse),
    SynchronizationUploadStateStreamContinue(SyncHeaderResponse),
    SynchronizationUploadStateStreamEnd(SyncHeaderResponse),
    SynchronizationImportMessageMove(ImportIdResponse),
    SetPropertiesNoReplicate(PropertyProblemsResponse),
    DeletePropertiesNoReplicate(PropertyProblemsResponse),
    GetStoreState(GetStoreStateResponse),
    SynchronizationOpenCollector(SyncHeaderResponse),
    GetLocalReplicaIds(GetLocalReplicaIdsResponse),
    SynchronizationImportReadStateChanges(SyncHeaderResponse),
    ResetTable(TableHeaderResponse),
    SynchronizationGetTransferState(SyncHeaderResponse),
    TellVersion(FastTransferHeaderResponse),
    FreeBookmark(TableHeaderResponse),
    WriteAndCommitStream(WriteStreamResponse),
    HardDeleteMessages(PartialCompletionResponse),
    HardDeleteMessagesAndSubfolders(PartialCompletionResponse),
    SetLocalReplicaMidsetDeleted(SyncHeaderResponse),
    Backoff(BackoffResponse),
    Logon(LogonResponse),
    BufferTooSmall(BufferTooSmallResponse),
}

impl RopResponse {
    /// Decodes one response, starting at its RopId byte.
    pub fn decode(cur: &mut ByteCursor<'_>, ctx: &DecodeContext<'_>) -> Result<Self, DecodeError> {
        let rop_id = RopId::try_from(cur.read_u8()?)?;
        Ok(match rop_id {
            RopId::OpenFolder => Self::OpenFolder(OpenFolderResponse::decode(cur)?),
            RopId::OpenMessage => Self::OpenMessage(OpenMessageResponse::decode(cur)?),
            RopId::GetHierarchyTable => Self::GetHierarchyTable(GetTableResponse::decode(cur)?),
            RopId::GetContentsTable => Self::GetContentsTable(GetTableResponse::decode(cur)?),
            RopId::CreateMessage => Self::CreateMessage(CreateMessageResponse::decode(cur)?),
            RopId::GetPropertiesSpecific => Self::GetPropertiesSpecific(
                GetPropertiesSpecificResponse::decode(cur, ctx.columns_for(rop_id)?)?,
            ),
            RopId::GetPropertiesAll => {
                Self::GetPropertiesAll(GetPropertiesAllResponse::decode(cur)?)
            }
            RopId::GetPropertiesList => {
                Self::GetPropertiesList(GetPropertiesListResponse::decode(cur)?)
            }
            RopId::SetProperties => Self::SetProperties(PropertyProblemsResponse::decode(cur)?),
            RopId::DeleteProperties => {
                Self::DeleteProperties(PropertyProblemsResponse::decode(cur)?)
            }
            RopId::SaveChangesMessage => {
                Self::SaveChangesMessage(SaveChangesMessageResponse::decode(cur)?)
            }
            RopId::RemoveAllRecipients => {
                Self::RemoveAllRecipients(MessageHeaderResponse::decode(cur)?)
            }
            RopId::ModifyRecipients => {
                Self::ModifyRecipients(MessageHeaderResponse::decode(cur)?)
            }
            RopId::ReadRecipients => Self::ReadRecipients(ReadRecipientsResponse::decode(cur)?),
            RopId::ReloadCachedInformation => {
                Self::ReloadCachedInformation(ReloadCachedInformationResponse::decode(cur)?)
            }
            RopId::SetMessageReadFlag => {
                Self::SetMessageReadFlag(SetMessageReadFlagResponse::decode(cur)?)
            }
            RopId::SetColumns => Self::SetColumns(TableStatusResponse::decode(cur)?),
            RopId::SortTable => Self::SortTable(TableStatusResponse::decode(cur)?),
            RopId::Restrict => Self::Restrict(TableStatusResponse::decode(cur)?),
            RopId::QueryRows => {
                Self::QueryRows(QueryRowsResponse::decode(cur, ctx.columns_for(rop_id)?)?)
            }
            RopId::GetStatus => Self::GetStatus(TableStatusResponse::decode(cur)?),
            RopId::QueryPosition => Self::QueryPosition(QueryPositionResponse::decode(cur)?),
            RopId::SeekRow => Self::SeekRow(SeekRowResponse::decode(cur)?),
            RopId::SeekRowBookmark => {
                Self::SeekRowBookmark(SeekRowBookmarkResponse::decode(cur)?)
            }
            RopId::SeekRowFractional => {
                Self::SeekRowFractional(TableHeaderResponse::decode(cur)?)
            }
            RopId::CreateBookmark => Self::CreateBookmark(CreateBookmarkResponse::decode(cur)?),
            RopId::CreateFolder => Self::CreateFolder(CreateFolderResponse::decode(cur)?),
            RopId::DeleteFolder => Self::DeleteFolder(PartialCompletionResponse::decode(cur)?),
            RopId::DeleteMessages => {
                Self::DeleteMessages(PartialCompletionResponse::decode(cur)?)
            }
            RopId::GetMessageStatus => {
                Self::GetMessageStatus(MessageStatusResponse::decode(cur)?)
            }
            RopId::SetMessageStatus => {
                Self::SetMessageStatus(MessageStatusResponse::decode(cur)?)
            }
            RopId::GetAttachmentTable => {
                Self::GetAttachmentTable(MessageHeaderResponse::decode(cur)?)
            }
            RopId::OpenAttachment => Self::OpenAttachment(MessageHeaderResponse::decode(cur)?),
            RopId::CreateAttachment => {
                Self::CreateAttachment(CreateAttachmentResponse::decode(cur)?)
            }
            RopId::DeleteAttachment => {
                Self::DeleteAttachment(MessageHeaderResponse::decode(cur)?)
            }
            RopId::SaveChangesAttachment => {
                Self::SaveChangesAttachment(MessageHeaderResponse::decode(cur)?)
            }
            RopId::SetReceiveFolder => {
                Self::SetReceiveFolder(SetReceiveFolderResponse::decode(cur)?)
            }
            RopId::GetReceiveFolder => {
                Self::GetReceiveFolder(GetReceiveFolderResponse::decode(cur)?)
            }
            RopId::RegisterNotification => {
                Self::RegisterNotification(RegisterNotificationResponse::decode(cur)?)
            }
            RopId::Notify => Self::Notify(NotifyResponse::decode(cur)?),
            RopId::OpenStream => Self::OpenStream(OpenStreamResponse::decode(cur)?),
            RopId::ReadStream => Self::ReadStream(ReadStreamResponse::decode(cur)?),
            RopId::WriteStream => Self::WriteStream(WriteStreamResponse::decode(cur)?),
            RopId::SeekStream => Self::SeekStream(SeekStreamResponse::decode(cur)?),
            RopId::SetStreamSize => Self::SetStreamSize(StreamHeaderResponse::decode(cur)?),
            RopId::SetSearchCriteria => {
                Self::SetSearchCriteria(SetSearchCriteriaResponse::decode(cur)?)
            }
            RopId::GetSearchCriteria => {
                Self::GetSearchCriteria(GetSearchCriteriaResponse::decode(cur)?)
            }
            RopId::SubmitMessage => Self::SubmitMessage(TransportHeaderResponse::decode(cur)?),
            RopId::MoveCopyMessages => Self::MoveCopyMessages(MoveCopyResponse::decode(cur)?),
            RopId::AbortSubmit => Self::AbortSubmit(TransportHeaderResponse::decode(cur)?),
            RopId::MoveFolder => Self::MoveFolder(MoveCopyResponse::decode(cur)?),
            RopId::CopyFolder => Self::CopyFolder(MoveCopyResponse::decode(cur)?),
            RopId::QueryColumnsAll => {
                Self::QueryColumnsAll(QueryColumnsAllResponse::decode(cur)?)
            }
            RopId::Abort => Self::Abort(TableStatusResponse::decode(cur)?),
            RopId::CopyTo => Self::CopyTo(CopyPropertiesResponse::decode(cur)?),
            RopId::CopyToStream => Self::CopyToStream(CopyToStreamResponse::decode(cur)?),
            RopId::CloneStream => Self::CloneStream(StreamHeaderResponse::decode(cur)?),
            RopId::GetPermissionsTable => {
                Self::GetPermissionsTable(PermissionHeaderResponse::decode(cur)?)
            }
            RopId::GetRulesTable => Self::GetRulesTable(RuleHeaderResponse::decode(cur)?),
            RopId::ModifyPermissions => {
                Self::ModifyPermissions(PermissionHeaderResponse::decode(cur)?)
            }
            RopId::ModifyRules => Self::ModifyRules(RuleHeaderResponse::decode(cur)?),
            RopId::GetOwningServers => {
                Self::GetOwningServers(GetOwningServersResponse::decode(cur)?)
            }
            RopId::LongTermIdFromId => {
                Self::LongTermIdFromId(LongTermIdFromIdResponse::decode(cur)?)
            }
            RopId::IdFromLongTermId => {
                Self::IdFromLongTermId(IdFromLongTermIdResponse::decode(cur)?)
            }
            RopId::PublicFolderIsGhosted => {
                Self::PublicFolderIsGhosted(PublicFolderIsGhostedResponse::decode(cur)?)
            }
            RopId::OpenEmbeddedMessage => {
                Self::OpenEmbeddedMessage(OpenEmbeddedMessageResponse::decode(cur)?)
            }
            RopId::SetSpooler => Self::SetSpooler(TransportHeaderResponse::decode(cur)?),
            RopId::SpoolerLockMessage => {
                Self::SpoolerLockMessage(TransportHeaderResponse::decode(cur)?)
            }
            RopId::GetAddressTypes => {
                Self::GetAddressTypes(GetAddressTypesResponse::decode(cur)?)
            }
            RopId::TransportSend => Self::TransportSend(TransportSendResponse::decode(cur)?),
            RopId::FastTransferSourceCopyMessages => {
                Self::FastTransferSourceCopyMessages(FastTransferHeaderResponse::decode(cur)?)
            }
            RopId::FastTransferSourceCopyFolder => {
                Self::FastTransferSourceCopyFolder(FastTransferHeaderResponse::decode(cur)?)
            }
            RopId::FastTransferSourceCopyTo => {
                Self::FastTransferSourceCopyTo(FastTransferHeaderResponse::decode(cur)?)
            }
            RopId::FastTransferSourceGetBuffer => {
                Self::FastTransferSourceGetBuffer(SourceGetBufferResponse::decode(cur)?)
            }
            RopId::FindRow => {
                Self::FindRow(FindRowResponse::decode(cur, ctx.columns_for(rop_id)?)?)
            }
            RopId::Progress => Self::Progress(ProgressResponse::decode(cur)?),
            RopId::TransportNewMail => {
                Self::TransportNewMail(TransportHeaderResponse::decode(cur)?)
            }
            RopId::GetValidAttachments => {
                Self::GetValidAttachments(GetValidAttachmentsResponse::decode(cur)?)
            }
            RopId::FastTransferDestinationConfigure => {
                Self::FastTransferDestinationConfigure(FastTransferHeaderResponse::decode(cur)?)
            }
            RopId::FastTransferDestinationPutBuffer => {
                Self::FastTransferDestinationPutBuffer(DestinationPutBufferResponse::decode(cur)?)
            }
            RopId::GetNamesFromPropertyIds => {
                Self::GetNamesFromPropertyIds(GetNamesFromPropertyIdsResponse::decode(cur)?)
            }
            RopId::GetPropertyIdsFromNames => {
                Self::GetPropertyIdsFromNames(GetPropertyIdsFromNamesResponse::decode(cur)?)
            }
            RopId::UpdateDeferredActionMessages => {
                Self::UpdateDeferredActionMessages(RuleHeaderResponse::decode(cur)?)
            }
            RopId::EmptyFolder => Self::EmptyFolder(PartialCompletionResponse::decode(cur)?),
            RopId::ExpandRow => {
                Self::ExpandRow(ExpandRowResponse::decode(cur, ctx.columns_for(rop_id)?)?)
            }
            RopId::CollapseRow => Self::CollapseRow(CollapseRowResponse::decode(cur)?),
            RopId::LockRegionStream => {
                Self::LockRegionStream(StreamHeaderResponse::decode(cur)?)
            }
            RopId::UnlockRegionStream => {
                Self::UnlockRegionStream(StreamHeaderResponse::decode(cur)?)
            }
            RopId::CommitStream => Self::CommitStream(StreamHeaderResponse::decode(cur)?),
            RopId::GetStreamSize => Self::GetStreamSize(GetStreamSizeResponse::decode(cur)?),
            RopId::QueryNamedProperties => {
                Self::QueryNamedProperties(QueryNamedPropertiesResponse::decode(cur)?)
            }
            RopId::GetPerUserLongTermIds => {
                Self::GetPerUserLongTermIds(GetPerUserLongTermIdsResponse::decode(cur)?)
            }
            RopId::GetPerUserGuid => Self::GetPerUserGuid(GetPerUserGuidResponse::decode(cur)?),
            RopId::ReadPerUserInformation => {
                Self::ReadPerUserInformation(ReadPerUserInformationResponse::decode(cur)?)
            }
            RopId::WritePerUserInformation => {
                Self::WritePerUserInformation(WritePerUserInformationResponse::decode(cur)?)
            }
            RopId::SetReadFlags => Self::SetReadFlags(PartialCompletionResponse::decode(cur)?),
            RopId::CopyProperties => Self::CopyProperties(CopyPropertiesResponse::decode(cur)?),
            RopId::GetReceiveFolderTable => {
                Self::GetReceiveFolderTable(GetReceiveFolderTableResponse::decode(cur)?)
            }
            RopId::FastTransferSourceCopyProperties => {
                Self::FastTransferSourceCopyProperties(FastTransferHeaderResponse::decode(cur)?)
            }
            RopId::GetCollapseState => {
                Self::GetCollapseState(GetCollapseStateResponse::decode(cur)?)
            }
            RopId::SetCollapseState => {
                Self::SetCollapseState(SetCollapseStateResponse::decode(cur)?)
            }
            RopId::GetTransportFolder => {
                Self::GetTransportFolder(GetTransportFolderResponse::decode(cur)?)
            }
            RopId::Pending => Self::Pending(PendingResponse::decode(cur)?),
            RopId::OptionsData => Self::OptionsData(OptionsDataResponse::decode(cur)?),
            RopId::SynchronizationConfigure => {
                Self::SynchronizationConfigure(SyncHeaderResponse::decode(cur)?)
            }
            RopId::SynchronizationImportMessageChange => {
                Self::SynchronizationImportMessageChange(ImportIdResponse::decode(cur)?)
            }
            RopId::SynchronizationImportHierarchyChange => {
                Self::SynchronizationImportHierarchyChange(ImportIdResponse::decode(cur)?)
            }
            RopId::SynchronizationImportDeletes => {
                Self::SynchronizationImportDeletes(SyncHeaderResponse::decode(cur)?)
            }
            RopId::SynchronizationUploadStateStreamBegin => {
                Self::SynchronizationUploadStateStreamBegin(SyncHeaderResponse::decode(cur)?)
            }
            RopId::SynchronizationUploadStateStreamContinue => {
                Self::SynchronizationUploadStateStreamContinue(SyncHeaderResponse::decode(cur)?)
            }
            RopId::SynchronizationUploadStateStreamEnd => {
                Self::SynchronizationUploadStateStreamEnd(SyncHeaderResponse::decode(cur)?)
            }
            RopId::SynchronizationImportMessageMove => {
                Self::SynchronizationImportMessageMove(ImportIdResponse::decode(cur)?)
            }
            RopId::SetPropertiesNoReplicate => {
                Self::SetPropertiesNoReplicate(PropertyProblemsResponse::decode(cur)?)
            }
            RopId::DeletePropertiesNoReplicate => {
                Self::DeletePropertiesNoReplicate(PropertyProblemsResponse::decode(cur)?)
            }
            RopId::GetStoreState => Self::GetStoreState(GetStoreStateResponse::decode(cur)?),
            RopId::SynchronizationOpenCollector => {
                Self::SynchronizationOpenCollector(SyncHeaderResponse::decode(cur)?)
            }
            RopId::GetLocalReplicaIds => {
                Self::GetLocalReplicaIds(GetLocalReplicaIdsResponse::decode(cur)?)
            }
            RopId::SynchronizationImportReadStateChanges => {
                Self::SynchronizationImportReadStateChanges(SyncHeaderResponse::decode(cur)?)
            }
            RopId::ResetTable => Self::ResetTable(TableHeaderResponse::decode(cur)?),
            RopId::SynchronizationGetTransferState => {
                Self::SynchronizationGetTransferState(SyncHeaderResponse::decode(cur)?)
            }
            RopId::TellVersion => Self::TellVersion(FastTransferHeaderResponse::decode(cur)?),
            RopId::FreeBookmark => Self::FreeBookmark(TableHeaderResponse::decode(cur)?),
            RopId::WriteAndCommitStream => {
                Self::WriteAndCommitStream(WriteStreamResponse::decode(cur)?)
            }
            RopId::HardDeleteMessages => {
                Self::HardDeleteMessages(PartialCompletionResponse::decode(cur)?)
            }
            RopId::HardDeleteMessagesAndSubfolders => {
                Self::HardDeleteMessagesAndSubfolders(PartialCompletionResponse::decode(cur)?)
            }
            RopId::SetLocalReplicaMidsetDeleted => {
                Self::SetLocalReplicaMidsetDeleted(SyncHeaderResponse::decode(cur)?)
            }
            RopId::Backoff => Self::Backoff(BackoffResponse::decode(cur)?),
            RopId::Logon => Self::Logon(LogonResponse::decode(cur)?),
            RopId::BufferTooSmall => Self::BufferTooSmall(BufferTooSmallResponse::decode(cur)?),
            RopId::Release => return Err(DecodeError::NotAResponse(rop_id)),
        })
    }

    /// Encodes the response, RopId byte first. Row-bearing responses
    /// need the negotiated column schema from the context.
    pub fn encode(&self, ctx: &DecodeContext<'_>, w: &mut ByteWriter) -> Result<(), DecodeError> {
        w.write_u8(self.rop_id() as u8);
        match self {
            Self::OpenFolder(r) => r.encode(w),
            Self::OpenMessage(r) => r.encode(w),
            Self::GetHierarchyTable(r) | Self::GetContentsTable(r) => r.encode(w),
            Self::CreateMessage(r) => r.encode(w),
            Self::GetPropertiesSpecific(r) => {
                r.encode(ctx.columns_for(RopId::GetPropertiesSpecific)?, w)?
            }
            Self::GetPropertiesAll(r) => r.encode(w),
            Self::GetPropertiesList(r) => r.encode(w),
            Self::SetProperties(r)
            | Self::SetPropertiesNoReplicate(r)
            | Self::DeleteProperties(r)
            | Self::DeletePropertiesNoReplicate(r) => r.encode(w),
            Self::SaveChangesMessage(r) => r.encode(w),
            Self::RemoveAllRecipients(r)
            | Self::ModifyRecipients(r)
            | Self::GetAttachmentTable(r)
            | Self::OpenAttachment(r)
            | Self::DeleteAttachment(r)
            | Self::SaveChangesAttachment(r) => r.encode(w),
            Self::ReadRecipients(r) => r.encode(w),
            Self::ReloadCachedInformation(r) => r.encode(w),
            Self::SetMessageReadFlag(r) => r.encode(w),
            Self::SetColumns(r)
            | Self::SortTable(r)
            | Self::Restrict(r)
            | Self::GetStatus(r)
            | Self::Abort(r) => r.encode(w),
            Self::QueryRows(r) => r.encode(ctx.columns_for(RopId::QueryRows)?, w)?,
            Self::QueryPosition(r) => r.encode(w),
            Self::SeekRow(r) => r.encode(w),
            Self::SeekRowBookmark(r) => r.encode(w),
            Self::SeekRowFractional(r) | Self::FreeBookmark(r) | Self::ResetTable(r) => {
                r.encode(w)
            }
            Self::CreateBookmark(r) => r.encode(w),
            Self::CreateFolder(r) => r.encode(w),
            Self::DeleteFolder(r)
            | Self::DeleteMessages(r)
            | Self::HardDeleteMessages(r)
            | Self::HardDeleteMessagesAndSubfolders(r)
            | Self::EmptyFolder(r)
            | Self::SetReadFlags(r) => r.encode(w),
            Self::GetMessageStatus(r) | Self::SetMessageStatus(r) => r.encode(w),
            Self::CreateAttachment(r) => r.encode(w),
            Self::SetReceiveFolder(r) => r.encode(w),
            Self::GetReceiveFolder(r) => r.encode(w),
            Self::RegisterNotification(r) => r.encode(w),
            Self::Notify(r) => r.encode(w),
            Self::OpenStream(r) => r.encode(w),
            Self::ReadStream(r) => r.encode(w),
            Self::WriteStream(r) | Self::WriteAndCommitStream(r) => r.encode(w),
            Self::SeekStream(r) => r.encode(w),
            Self::SetStreamSize(r)
            | Self::CloneStream(r)
            | Self::CommitStream(r)
            | Self::LockRegionStream(r)
            | Self::UnlockRegionStream(r) => r.encode(w),
            Self::SetSearchCriteria(r) => r.encode(w),
            Self::GetSearchCriteria(r) => r.encode(w),
            Self::SubmitMessage(r)
            | Self::AbortSubmit(r)
            | Self::SetSpooler(r)
            | Self::SpoolerLockMessage(r)
            | Self::TransportNewMail(r) => r.encode(w),
            Self::MoveCopyMessages(r) | Self::MoveFolder(r) | Self::CopyFolder(r) => r.encode(w),
            Self::QueryColumnsAll(r) => r.encode(w),
            Self::CopyTo(r) | Self::CopyProperties(r) => r.encode(w),
            Self::CopyToStream(r) => r.encode(w),
            Self::GetPermissionsTable(r) | Self::ModifyPermissions(r) => r.encode(w),
            Self::GetRulesTable(r)
            | Self::ModifyRules(r)
            | Self::UpdateDeferredActionMessages(r) => r.encode(w),
            Self::GetOwningServers(r) => r.encode(w),
            Self::LongTermIdFromId(r) => r.encode(w),
            Self::IdFromLongTermId(r) => r.encode(w),
            Self::PublicFolderIsGhosted(r) => r.encode(w),
            Self::OpenEmbeddedMessage(r) => r.encode(w),
            Self::GetAddressTypes(r) => r.encode(w),
            Self::TransportSend(r) => r.encode(w),
            Self::FastTransferSourceCopyMessages(r)
            | Self::FastTransferSourceCopyFolder(r)
            | Self::FastTransferSourceCopyTo(r)
            | Self::FastTransferSourceCopyProperties(r)
            | Self::FastTransferDestinationConfigure(r)
            | Self::TellVersion(r) => r.encode(w),
            Self::FastTransferSourceGetBuffer(r) => r.encode(w),
            Self::FindRow(r) => r.encode(ctx.columns_for(RopId::FindRow)?, w)?,
            Self::Progress(r) => r.encode(w),
            Self::GetValidAttachments(r) => r.encode(w),
            Self::FastTransferDestinationPutBuffer(r) => r.encode(w),
            Self::GetNamesFromPropertyIds(r) => r.encode(w),
            Self::GetPropertyIdsFromNames(r) => r.encode(w),
            Self::ExpandRow(r) => r.encode(ctx.columns_for(RopId::ExpandRow)?, w)?,
            Self::CollapseRow(r) => r.encode(w),
            Self::GetStreamSize(r) => r.encode(w),
            Self::QueryNamedProperties(r) => r.encode(w)?,
            Self::GetPerUserLongTermIds(r) => r.encode(w),
            Self::GetPerUserGuid(r) => r.encode(w),
            Self::ReadPerUserInformation(r) => r.encode(w),
            Self::WritePerUserInformation(r) => r.encode(w),
            Self::GetReceiveFolderTable(r) => r.encode(w)?,
            Self::GetCollapseState(r) => r.encode(w),
            Self::SetCollapseState(r) => r.encode(w),
            Self::GetTransportFolder(r) => r.encode(w),
            Self::Pending(r) => r.encode(w),
            Self::OptionsData(r) => r.encode(w),
            Self::SynchronizationConfigure(r)
            | Self::SynchronizationImportDeletes(r)
            | Self::SynchronizationUploadStateStreamBegin(r)
            | Self::SynchronizationUploadStateStreamContinue(r)
            | Self::SynchronizationUploadStateStreamEnd(r)
            | Self::SynchronizationOpenCollector(r)
            | Self::SynchronizationImportReadStateChanges(r)
            | Self::SynchronizationGetTransferState(r)
            | Self::SetLocalReplicaMidsetDeleted(r) => r.encode(w),
            Self::SynchronizationImportMessageChange(r)
            | Self::SynchronizationImportHierarchyChange(r)
            | Self::SynchronizationImportMessageMove(r) => r.encode(w),
            Self::GetStoreState(r) => r.encode(w),
            Self::GetLocalReplicaIds(r) => r.encode(w),
            Self::Backoff(r) => r.encode(w),
            Self::Logon(r) => r.encode(w),
            Self::BufferTooSmall(r) => r.encode(w),
        }
        Ok(())
    }

    /// The operation id of this response.
    pub fn rop_id(&self) -> RopId {
        match self {
            Self::OpenFolder(_) => RopId::OpenFolder,
            Self::OpenMessage(_) => RopId::OpenMessage,
            Self::GetHierarchyTable(_) => RopId::GetHierarchyTable,
            Self::GetContentsTable(_) => RopId::GetContentsTable,
            Self::CreateMessage(_) => RopId::CreateMessage,
            Self::GetPropertiesSpecific(_) => RopId::GetPropertiesSpecific,
            Self::GetPropertiesAll(_) => RopId::GetPropertiesAll,
            Self::GetPropertiesList(_) => RopId::GetPropertiesList,
            Self::SetProperties(_) => RopId::SetProperties,
            Self::DeleteProperties(_) => RopId::DeleteProperties,
            Self::SaveChangesMessage(_) => RopId::SaveChangesMessage,
            Self::RemoveAllRecipients(_) => RopId::RemoveAllRecipients,
            Self::ModifyRecipients(_) => RopId::ModifyRecipients,
            Self::ReadRecipients(_) => RopId::ReadRecipients,
            Self::ReloadCachedInformation(_) => RopId::ReloadCachedInformation,
            Self::SetMessageReadFlag(_) => RopId::SetMessageReadFlag,
            Self::SetColumns(_) => RopId::SetColumns,
            Self::SortTable(_) => RopId::SortTable,
            Self::Restrict(_) => RopId::Restrict,
            Self::QueryRows(_) => RopId::QueryRows,
            Self::GetStatus(_) => RopId::GetStatus,
            Self::QueryPosition(_) => RopId::QueryPosition,
            Self::SeekRow(_) => RopId::SeekRow,
            Self::SeekRowBookmark(_) => RopId::SeekRowBookmark,
            Self::SeekRowFractional(_) => RopId::SeekRowFractional,
            Self::CreateBookmark(_) => RopId::CreateBookmark,
            Self::CreateFolder(_) => RopId::CreateFolder,
            Self::DeleteFolder(_) => RopId::DeleteFolder,
            Self::DeleteMessages(_) => RopId::DeleteMessages,
            Self::GetMessageStatus(_) => RopId::GetMessageStatus,
            Self::SetMessageStatus(_) => RopId::SetMessageStatus,
            Self::GetAttachmentTable(_) => RopId::GetAttachmentTable,
            Self::OpenAttachment(_) => RopId::OpenAttachment,
            Self::CreateAttachment(_) => RopId::CreateAttachment,
            Self::DeleteAttachment(_) => RopId::DeleteAttachment,
            Self::SaveChangesAttachment(_) => RopId::SaveChangesAttachment,
            Self::SetReceiveFolder(_) => RopId::SetReceiveFolder,
            Self::GetReceiveFolder(_) => RopId::GetReceiveFolder,
            Self::RegisterNotification(_) => RopId::RegisterNotification,
            Self::Notify(_) => RopId::Notify,
            Self::OpenStream(_) => RopId::OpenStream,
            Self::ReadStream(_) => RopId::ReadStream,
            Self::WriteStream(_) => RopId::WriteStream,
            Self::SeekStream(_) => RopId::SeekStream,
            Self::SetStreamSize(_) => RopId::SetStreamSize,
            Self::SetSearchCriteria(_) => RopId::SetSearchCriteria,
            Self::GetSearchCriteria(_) => RopId::GetSearchCriteria,
            Self::SubmitMessage(_) => RopId::SubmitMessage,
            Self::MoveCopyMessages(_) => RopId::MoveCopyMessages,
            Self::AbortSubmit(_) => RopId::AbortSubmit,
            Self::MoveFolder(_) => RopId::MoveFolder,
            Self::CopyFolder(_) => RopId::CopyFolder,
            Self::QueryColumnsAll(_) => RopId::QueryColumnsAll,
            Self::Abort(_) => RopId::Abort,
            Self::CopyTo(_) => RopId::CopyTo,
            Self::CopyToStream(_) => RopId::CopyToStream,
            Self::CloneStream(_) => RopId::CloneStream,
            Self::GetPermissionsTable(_) => RopId::GetPermissionsTable,
            Self::GetRulesTable(_) => RopId::GetRulesTable,
            Self::ModifyPermissions(_) => RopId::ModifyPermissions,
            Self::ModifyRules(_) => RopId::ModifyRules,
            Self::GetOwningServers(_) => RopId::GetOwningServers,
            Self::LongTermIdFromId(_) => RopId::LongTermIdFromId,
            Self::IdFromLongTermId(_) => RopId::IdFromLongTermId,
            Self::PublicFolderIsGhosted(_) => RopId::PublicFolderIsGhosted,
            Self::OpenEmbeddedMessage(_) => RopId::OpenEmbeddedMessage,
            Self::SetSpooler(_) => RopId::SetSpooler,
            Self::SpoolerLockMessage(_) => RopId::SpoolerLockMessage,
            Self::GetAddressTypes(_) => RopId::GetAddressTypes,
            Self::TransportSend(_) => RopId::TransportSend,
            Self::FastTransferSourceCopyMessages(_) => RopId::FastTransferSourceCopyMessages,
            Self::FastTransferSourceCopyFolder(_) => RopId::FastTransferSourceCopyFolder,
            Self::FastTransferSourceCopyTo(_) => RopId::FastTransferSourceCopyTo,
            Self::FastTransferSourceGetBuffer(_) => RopId::FastTransferSourceGetBuffer,
            Self::FindRow(_) => RopId::FindRow,
            Self::Progress(_) => RopId::Progress,
            Self::TransportNewMail(_) => RopId::TransportNewMail,
            Self::GetValidAttachments(_) => RopId::GetValidAttachments,
            Self::FastTransferDestinationConfigure(_) => RopId::FastTransferDestinationConfigure,
            Self::FastTransferDestinationPutBuffer(_) => RopId::FastTransferDestinationPutBuffer,
            Self::GetNamesFromPropertyIds(_) => RopId::GetNamesFromPropertyIds,
            Self::GetPropertyIdsFromNames(_) => RopId::GetPropertyIdsFromNames,
            Self::UpdateDeferredActionMessages(_) => RopId::UpdateDeferredActionMessages,
            Self::EmptyFolder(_) => RopId::EmptyFolder,
            Self::ExpandRow(_) => RopId::ExpandRow,
            Self::CollapseRow(_) => RopId::CollapseRow,
            Self::LockRegionStream(_) => RopId::LockRegionStream,
            Self::UnlockRegionStream(_) => RopId::UnlockRegionStream,
            Self::CommitStream(_) => RopId::CommitStream,
            Self::GetStreamSize(_) => RopId::GetStreamSize,
            Self::QueryNamedProperties(_) => RopId::QueryNamedProperties,
            Self::GetPerUserLongTermIds(_) => RopId::GetPerUserLongTermIds,
            Self::GetPerUserGuid(_) => RopId::GetPerUserGuid,
            Self::ReadPerUserInformation(_) => RopId::ReadPerUserInformation,
            Self::WritePerUserInformation(_) => RopId::WritePerUserInformation,
            Self::SetReadFlags(_) => RopId::SetReadFlags,
            Self::CopyProperties(_) => RopId::CopyProperties,
            Self::GetReceiveFolderTable(_) => RopId::GetReceiveFolderTable,
            Self::FastTransferSourceCopyProperties(_) => RopId::FastTransferSourceCopyProperties,
            Self::GetCollapseState(_) => RopId::GetCollapseState,
            Self::SetCollapseState(_) => RopId::SetCollapseState,
            Self::GetTransportFolder(_) => RopId::GetTransportFolder,
            Self::Pending(_) => RopId::Pending,
            Self::OptionsData(_) => RopId::OptionsData,
            Self::SynchronizationConfigure(_) => RopId::SynchronizationConfigure,
            Self::SynchronizationImportMessageChange(_) => {
                RopId::SynchronizationImportMessageChange
            }
            Self::SynchronizationImportHierarchyChange(_) => {
                RopId::SynchronizationImportHierarchyChange
            }
            Self::SynchronizationImportDeletes(_) => RopId::SynchronizationImportDeletes,
            Self::SynchronizationUploadStateStreamBegin(_) => {
                RopId::SynchronizationUploadStateStreamBegin
            }
            Self::SynchronizationUploadStateStreamContinue(_) => {
                RopId::SynchronizationUploadStateStreamContinue
            }
            Self::SynchronizationUploadStateStreamEnd(_) => {
                RopId::SynchronizationUploadStateStreamEnd
            }
            Self::SynchronizationImportMessageMove(_) => RopId::SynchronizationImportMessageMove,
            Self::SetPropertiesNoReplicate(_) => RopId::SetPropertiesNoReplicate,
            Self::DeletePropertiesNoReplicate(_) => RopId::DeletePropertiesNoReplicate,
            Self::GetStoreState(_) => RopId::GetStoreState,
            Self::SynchronizationOpenCollector(_) => RopId::SynchronizationOpenCollector,
            Self::GetLocalReplicaIds(_) => RopId::GetLocalReplicaIds,
            Self::SynchronizationImportReadStateChanges(_) => {
                RopId::SynchronizationImportReadStateChanges
            }
            Self::ResetTable(_) => RopId::ResetTable,
            Self::SynchronizationGetTransferState(_) => RopId::SynchronizationGetTransferState,
            Self::TellVersion(_) => RopId::TellVersion,
            Self::FreeBookmark(_) => RopId::FreeBookmark,
            Self::WriteAndCommitStream(_) => RopId::WriteAndCommitStream,
            Self::HardDeleteMessages(_) => RopId::HardDeleteMessages,
            Self::HardDeleteMessagesAndSubfolders(_) => RopId::HardDeleteMessagesAndSubfolders,
            Self::SetLocalReplicaMidsetDeleted(_) => RopId::SetLocalReplicaMidsetDeleted,
            Self::Backoff(_) => RopId::Backoff,
            Self::Logon(_) => RopId::Logon,
            Self::BufferTooSmall(_) => RopId::BufferTooSmall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyType;

    #[test]
    fn test_rop_id_roundtrip() {
        for byte in 0u8..=255 {
            if let Ok(id) = RopId::try_from(byte) {
                assert_eq!(id as u8, byte);
            }
        }
    }

    #[test]
    fn test_reserved_rop_ids_rejected() {
        for byte in [0x00u8, 0x28, 0x3C, 0x62, 0x8E, 0xA0, 0xF8, 0xFA] {
            assert_eq!(
                RopId::try_from(byte).unwrap_err(),
                DecodeError::ReservedRopId(byte)
            );
        }
    }

    #[test]
    fn test_unassigned_unreserved_is_unknown() {
        assert_eq!(
            RopId::try_from(0x8F).unwrap_err(),
            DecodeError::UnknownRopId(0x8F)
        );
    }

    #[test]
    fn test_alternate_resolution_set() {
        assert!(RopId::LongTermIdFromId.uses_alternate_handle_resolution());
        assert!(RopId::IdFromLongTermId.uses_alternate_handle_resolution());
        assert!(RopId::GetAddressTypes.uses_alternate_handle_resolution());
        assert!(RopId::GetTransportFolder.uses_alternate_handle_resolution());
        assert!(RopId::GetNamesFromPropertyIds.uses_alternate_handle_resolution());
        assert!(!RopId::OpenFolder.uses_alternate_handle_resolution());
        assert!(!RopId::Logon.uses_alternate_handle_resolution());
    }

    #[test]
    fn test_long_term_id_is_24_bytes() {
        let id = LongTermId::new(Uuid::from_u128(0xBEEF), [1, 2, 3, 4, 5, 6]);
        let mut w = ByteWriter::new();
        id.encode(&mut w);
        assert_eq!(w.len(), 24);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(LongTermId::decode(&mut cur).unwrap(), id);
    }

    #[test]
    fn test_global_identifier_is_22_bytes() {
        let gid = GlobalIdentifier::new(Uuid::from_u128(0xBEEF), [1, 2, 3, 4, 5, 6]);
        let mut w = ByteWriter::new();
        gid.encode(&mut w);
        assert_eq!(w.len(), 22);
    }

    #[test]
    fn test_request_dispatch_roundtrip() {
        let ctx = DecodeContext::default();
        let requests = vec![
            RopRequest::Release(ReleaseRequest {
                logon_id: 0,
                input_handle_index: 1,
            }),
            RopRequest::OpenFolder(OpenFolderRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                folder_id: 0x42,
                open_mode_flags: 0,
            }),
            RopRequest::QueryRows(QueryRowsRequest {
                logon_id: 0,
                input_handle_index: 2,
                query_rows_flags: 0,
                forward_read: true,
                row_count: 50,
            }),
            RopRequest::TellVersion(TellVersionRequest {
                logon_id: 0,
                input_handle_index: 1,
                version: [15, 1, 2],
            }),
        ];
        for request in requests {
            let mut w = ByteWriter::new();
            request.encode(&mut w);
            let bytes = w.into_bytes();
            assert_eq!(bytes[0], request.rop_id() as u8);
            let mut cur = ByteCursor::new(&bytes);
            let decoded = RopRequest::decode(&mut cur, &ctx).unwrap();
            assert_eq!(decoded, request);
            assert!(cur.is_empty());
        }
    }

    #[test]
    fn test_response_dispatch_roundtrip() {
        let ctx = DecodeContext::default();
        let responses = vec![
            RopResponse::CommitStream(StreamHeaderResponse {
                input_handle_index: 1,
                return_value: 0,
            }),
            RopResponse::SetColumns(TableStatusResponse::Success {
                input_handle_index: 2,
                table_status: TableStatus::Complete,
            }),
            RopResponse::Pending(PendingResponse { session_index: 1 }),
        ];
        for response in responses {
            let mut w = ByteWriter::new();
            response.encode(&ctx, &mut w).unwrap();
            let bytes = w.into_bytes();
            assert_eq!(bytes[0], response.rop_id() as u8);
            let mut cur = ByteCursor::new(&bytes);
            let decoded = RopResponse::decode(&mut cur, &ctx).unwrap();
            assert_eq!(decoded, response);
        }
    }

    #[test]
    fn test_release_is_not_a_response() {
        let mut cur = ByteCursor::new(&[0x01, 0x00, 0x00]);
        assert_eq!(
            RopResponse::decode(&mut cur, &DecodeContext::default()).unwrap_err(),
            DecodeError::NotAResponse(RopId::Release)
        );
    }

    #[test]
    fn test_notify_is_not_a_request() {
        let mut cur = ByteCursor::new(&[0x2A, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(
            RopRequest::decode(&mut cur, &DecodeContext::default()).unwrap_err(),
            DecodeError::NotARequest(RopId::Notify)
        );
    }

    #[test]
    fn test_row_bearing_response_requires_schema() {
        // A QueryRows success cannot be decoded without negotiated columns.
        let mut w = ByteWriter::new();
        w.write_u8(RopId::QueryRows as u8);
        w.write_u8(2);
        w.write_u32(0);
        w.write_u8(BookmarkOrigin::Current as u8);
        w.write_u16(0);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(
            RopResponse::decode(&mut cur, &DecodeContext::default()).unwrap_err(),
            DecodeError::MissingColumnSchema {
                rop: RopId::QueryRows
            }
        );

        let columns = [PropertyTag::new(PropertyType::Integer64, 0x6748)];
        let mut cur = ByteCursor::new(&bytes);
        let decoded = RopResponse::decode(&mut cur, &DecodeContext::with_columns(&columns));
        assert!(decoded.is_ok());
    }

    fn test_columns() -> Vec<PropertyTag> {
        vec![PropertyTag::new(PropertyType::Integer64, 0x6748)]
    }

    fn test_row() -> crate::property::PropertyRow {
        crate::property::PropertyRow::Standard(vec![crate::property::PropertyValue::Integer64(7)])
    }

    fn test_row_set() -> crate::property::PropertyRowSet {
        crate::property::PropertyRowSet::new(vec![test_row()])
    }

    fn every_request() -> Vec<RopRequest> {
        use crate::property::{PropertyName, PropertyValue, TaggedPropertyValue};

        let tag = PropertyTag::new(PropertyType::Integer64, 0x6748);
        let tagged = TaggedPropertyValue::new(tag, PropertyValue::Integer64(9));
        let name = PropertyName::Id {
            guid: Uuid::from_u128(3),
            lid: 0x8102,
        };
        let ltid = LongTermId::new(Uuid::from_u128(4), [0, 0, 0, 0, 0, 1]);
        let table_header = TableHeaderRequest {
            logon_id: 0,
            input_handle_index: 2,
        };
        let transport_header = TransportHeaderRequest {
            logon_id: 0,
            input_handle_index: 1,
        };
        let stream_header = StreamHeaderRequest {
            logon_id: 0,
            input_handle_index: 3,
        };
        let get_table = GetTableRequest {
            logon_id: 0,
            input_handle_index: 0,
            output_handle_index: 1,
            table_flags: 0,
        };
        let set_properties = SetPropertiesRequest {
            logon_id: 0,
            input_handle_index: 1,
            property_values: vec![tagged.clone()],
        };
        let delete_properties = DeletePropertiesRequest {
            logon_id: 0,
            input_handle_index: 1,
            property_tags: vec![tag],
        };
        let delete_messages = DeleteMessagesRequest {
            logon_id: 0,
            input_handle_index: 1,
            want_asynchronous: false,
            notify_non_read: false,
            message_ids: vec![0x10],
        };
        let empty_folder = EmptyFolderRequest {
            logon_id: 0,
            input_handle_index: 1,
            want_asynchronous: false,
            want_delete_associated: true,
        };
        let write_stream = WriteStreamRequest {
            logon_id: 0,
            input_handle_index: 3,
            data: vec![1, 2, 3],
        };
        let lock_region = LockRegionStreamRequest {
            logon_id: 0,
            input_handle_index: 3,
            region_offset: 0,
            region_size: 16,
            lock_flags: 1,
        };

        vec![
            RopRequest::Release(ReleaseRequest {
                logon_id: 0,
                input_handle_index: 1,
            }),
            RopRequest::OpenFolder(OpenFolderRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                folder_id: 2,
                open_mode_flags: 0,
            }),
            RopRequest::OpenMessage(OpenMessageRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                code_page_id: 0x0FFF,
                folder_id: 2,
                open_mode_flags: 0,
                message_id: 3,
            }),
            RopRequest::GetHierarchyTable(get_table),
            RopRequest::GetContentsTable(get_table),
            RopRequest::CreateMessage(CreateMessageRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                code_page_id: 0x0FFF,
                folder_id: 2,
                associated_flag: false,
            }),
            RopRequest::GetPropertiesSpecific(GetPropertiesSpecificRequest {
                logon_id: 0,
                input_handle_index: 1,
                property_size_limit: 0,
                want_unicode: 1,
                property_tags: vec![tag],
            }),
            RopRequest::GetPropertiesAll(GetPropertiesAllRequest {
                logon_id: 0,
                input_handle_index: 1,
                property_size_limit: 0,
                want_unicode: 1,
            }),
            RopRequest::GetPropertiesList(PropertyHeaderRequest {
                logon_id: 0,
                input_handle_index: 1,
            }),
            RopRequest::SetProperties(set_properties.clone()),
            RopRequest::DeleteProperties(delete_properties.clone()),
            RopRequest::SaveChangesMessage(SaveChangesMessageRequest {
                logon_id: 0,
                response_handle_index: 0,
                input_handle_index: 1,
                save_flags: 0x0C,
            }),
            RopRequest::RemoveAllRecipients(RemoveAllRecipientsRequest {
                logon_id: 0,
                input_handle_index: 1,
                reserved: 0,
            }),
            RopRequest::ModifyRecipients(ModifyRecipientsRequest {
                logon_id: 0,
                input_handle_index: 1,
                recipient_columns: vec![tag],
                recipient_rows: vec![ModifyRecipientRow {
                    row_id: 0,
                    recipient_type: 1,
                    recipient_row: vec![0xAA],
                }],
            }),
            RopRequest::ReadRecipients(ReadRecipientsRequest {
                logon_id: 0,
                input_handle_index: 1,
                row_id: 0,
                reserved: 0,
            }),
            RopRequest::ReloadCachedInformation(ReloadCachedInformationRequest {
                logon_id: 0,
                input_handle_index: 1,
                reserved: 0,
            }),
            RopRequest::SetMessageReadFlag(SetMessageReadFlagRequest {
                logon_id: 0,
                response_handle_index: 0,
                input_handle_index: 1,
                read_flags: 0,
                client_data: None,
            }),
            RopRequest::SetColumns(SetColumnsRequest {
                logon_id: 0,
                input_handle_index: 2,
                set_columns_flags: 0,
                property_tags: vec![tag],
            }),
            RopRequest::SortTable(SortTableRequest {
                logon_id: 0,
                input_handle_index: 2,
                sort_table_flags: 0,
                category_count: 0,
                expanded_count: 0,
                sort_orders: vec![SortOrder { tag, order: 0 }],
            }),
            RopRequest::Restrict(RestrictRequest {
                logon_id: 0,
                input_handle_index: 2,
                restrict_flags: 0,
                restriction_data: vec![1],
            }),
            RopRequest::QueryRows(QueryRowsRequest {
                logon_id: 0,
                input_handle_index: 2,
                query_rows_flags: 0,
                forward_read: true,
                row_count: 10,
            }),
            RopRequest::GetStatus(table_header),
            RopRequest::QueryPosition(table_header),
            RopRequest::SeekRow(SeekRowRequest {
                logon_id: 0,
                input_handle_index: 2,
                origin: BookmarkOrigin::Beginning,
                row_count: 1,
                want_row_moved_count: false,
            }),
            RopRequest::SeekRowBookmark(SeekRowBookmarkRequest {
                logon_id: 0,
                input_handle_index: 2,
                bookmark: vec![1, 2],
                row_count: -1,
                want_row_moved_count: true,
            }),
            RopRequest::SeekRowFractional(SeekRowFractionalRequest {
                logon_id: 0,
                input_handle_index: 2,
                numerator: 1,
                denominator: 2,
            }),
            RopRequest::CreateBookmark(table_header),
            RopRequest::CreateFolder(CreateFolderRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                folder_type: 1,
                use_unicode_strings: false,
                open_existing: false,
                reserved: 0,
                display_name: "Reports".to_string(),
                comment: String::new(),
            }),
            RopRequest::DeleteFolder(DeleteFolderRequest {
                logon_id: 0,
                input_handle_index: 0,
                delete_folder_flags: 0x04,
                folder_id: 2,
            }),
            RopRequest::DeleteMessages(delete_messages.clone()),
            RopRequest::GetMessageStatus(GetMessageStatusRequest {
                logon_id: 0,
                input_handle_index: 0,
                message_id: 3,
            }),
            RopRequest::SetMessageStatus(SetMessageStatusRequest {
                logon_id: 0,
                input_handle_index: 0,
                message_id: 3,
                message_status_flags: 0,
                message_status_mask: 0,
            }),
            RopRequest::GetAttachmentTable(get_table),
            RopRequest::OpenAttachment(OpenAttachmentRequest {
                logon_id: 0,
                input_handle_index: 1,
                output_handle_index: 2,
                open_attachment_flags: 0,
                attachment_id: 0,
            }),
            RopRequest::CreateAttachment(CreateAttachmentRequest {
                logon_id: 0,
                input_handle_index: 1,
                output_handle_index: 2,
            }),
            RopRequest::DeleteAttachment(DeleteAttachmentRequest {
                logon_id: 0,
                input_handle_index: 1,
                attachment_id: 0,
            }),
            RopRequest::SaveChangesAttachment(SaveChangesAttachmentRequest {
                logon_id: 0,
                response_handle_index: 0,
                input_handle_index: 2,
                save_flags: 0,
            }),
            RopRequest::SetReceiveFolder(SetReceiveFolderRequest {
                logon_id: 0,
                input_handle_index: 0,
                folder_id: 2,
                message_class: "IPM.Note".to_string(),
            }),
            RopRequest::GetReceiveFolder(GetReceiveFolderRequest {
                logon_id: 0,
                input_handle_index: 0,
                message_class: "IPM.Note".to_string(),
            }),
            RopRequest::RegisterNotification(RegisterNotificationRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                notification_types: 0x10,
                reserved: 0,
                scope: Some((2, 3)),
            }),
            RopRequest::OpenStream(OpenStreamRequest {
                logon_id: 0,
                input_handle_index: 1,
                output_handle_index: 3,
                property_tag: PropertyTag::new(PropertyType::Binary, 0x1013),
                open_mode_flags: 0,
            }),
            RopRequest::ReadStream(ReadStreamRequest {
                logon_id: 0,
                input_handle_index: 3,
                byte_count: 128,
                maximum_byte_count: None,
            }),
            RopRequest::WriteStream(write_stream.clone()),
            RopRequest::SeekStream(SeekStreamRequest {
                logon_id: 0,
                input_handle_index: 3,
                origin: 0,
                offset: 0,
            }),
            RopRequest::SetStreamSize(SetStreamSizeRequest {
                logon_id: 0,
                input_handle_index: 3,
                stream_size: 64,
            }),
            RopRequest::SetSearchCriteria(SetSearchCriteriaRequest {
                logon_id: 0,
                input_handle_index: 0,
                restriction_data: vec![1],
                folder_ids: vec![2],
                search_flags: 1,
            }),
            RopRequest::GetSearchCriteria(GetSearchCriteriaRequest {
                logon_id: 0,
                input_handle_index: 0,
                use_unicode: false,
                include_restriction: true,
                include_folders: true,
            }),
            RopRequest::SubmitMessage(SubmitMessageRequest {
                logon_id: 0,
                input_handle_index: 1,
                submit_flags: 0,
            }),
            RopRequest::MoveCopyMessages(MoveCopyMessagesRequest {
                logon_id: 0,
                source_handle_index: 0,
                dest_handle_index: 1,
                message_ids: vec![3],
                want_asynchronous: false,
                want_copy: true,
            }),
            RopRequest::AbortSubmit(AbortSubmitRequest {
                logon_id: 0,
                input_handle_index: 0,
                folder_id: 2,
                message_id: 3,
            }),
            RopRequest::MoveFolder(MoveFolderRequest {
                logon_id: 0,
                source_handle_index: 0,
                dest_handle_index: 1,
                want_asynchronous: false,
                use_unicode: false,
                folder_id: 2,
                new_folder_name: "Archive".to_string(),
            }),
            RopRequest::CopyFolder(CopyFolderRequest {
                logon_id: 0,
                source_handle_index: 0,
                dest_handle_index: 1,
                want_asynchronous: false,
                want_recursive: true,
                use_unicode: false,
                folder_id: 2,
                new_folder_name: "Archive".to_string(),
            }),
            RopRequest::QueryColumnsAll(table_header),
            RopRequest::Abort(table_header),
            RopRequest::CopyTo(CopyToRequest {
                logon_id: 0,
                source_handle_index: 0,
                dest_handle_index: 1,
                want_asynchronous: false,
                want_sub_objects: true,
                copy_flags: 0,
                excluded_tags: vec![tag],
            }),
            RopRequest::CopyToStream(CopyToStreamRequest {
                logon_id: 0,
                source_handle_index: 3,
                dest_handle_index: 4,
                byte_count: 100,
            }),
            RopRequest::CloneStream(CloneStreamRequest {
                logon_id: 0,
                input_handle_index: 3,
                output_handle_index: 4,
            }),
            RopRequest::GetPermissionsTable(GetPermissionsTableRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                table_flags: 0,
            }),
            RopRequest::GetRulesTable(GetRulesTableRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                table_flags: 0,
            }),
            RopRequest::ModifyPermissions(ModifyPermissionsRequest {
                logon_id: 0,
                input_handle_index: 0,
                modify_flags: 0,
                permissions_data: vec![PermissionData {
                    permission_data_flags: 1,
                    property_values: vec![tagged.clone()],
                }],
            }),
            RopRequest::ModifyRules(ModifyRulesRequest {
                logon_id: 0,
                input_handle_index: 0,
                modify_rules_flags: 0,
                rules_data: vec![RuleData {
                    rule_data_flags: 1,
                    property_values: vec![tagged.clone()],
                }],
            }),
            RopRequest::GetOwningServers(GetOwningServersRequest {
                logon_id: 0,
                input_handle_index: 0,
                folder_id: 2,
            }),
            RopRequest::LongTermIdFromId(LongTermIdFromIdRequest {
                logon_id: 0,
                input_handle_index: 0,
                object_id: 2,
            }),
            RopRequest::IdFromLongTermId(IdFromLongTermIdRequest {
                logon_id: 0,
                input_handle_index: 0,
                long_term_id: ltid,
            }),
            RopRequest::PublicFolderIsGhosted(PublicFolderIsGhostedRequest {
                logon_id: 0,
                input_handle_index: 0,
                folder_id: 2,
            }),
            RopRequest::OpenEmbeddedMessage(OpenEmbeddedMessageRequest {
                logon_id: 0,
                input_handle_index: 2,
                output_handle_index: 3,
                code_page_id: 0x0FFF,
                open_mode_flags: 0,
            }),
            RopRequest::SetSpooler(transport_header),
            RopRequest::SpoolerLockMessage(SpoolerLockMessageRequest {
                logon_id: 0,
                input_handle_index: 1,
                message_id: 3,
                lock_state: 0,
            }),
            RopRequest::GetAddressTypes(transport_header),
            RopRequest::TransportSend(transport_header),
            RopRequest::FastTransferSourceCopyMessages(SourceCopyMessagesRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                message_ids: vec![3],
                copy_flags: 0,
                send_options: 1,
            }),
            RopRequest::FastTransferSourceCopyFolder(SourceCopyFolderRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                copy_flags: 0,
                send_options: 1,
            }),
            RopRequest::FastTransferSourceCopyTo(SourceCopyToRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                level: 0,
                copy_flags: 0,
                send_options: 1,
                property_tags: vec![tag],
            }),
            RopRequest::FastTransferSourceGetBuffer(SourceGetBufferRequest {
                logon_id: 0,
                input_handle_index: 1,
                buffer_size: 512,
                maximum_buffer_size: None,
            }),
            RopRequest::FindRow(FindRowRequest {
                logon_id: 0,
                input_handle_index: 2,
                find_row_flags: 0,
                restriction_data: vec![1],
                origin: BookmarkOrigin::Beginning,
                bookmark: Vec::new(),
            }),
            RopRequest::Progress(ProgressRequest {
                logon_id: 0,
                input_handle_index: 1,
                want_cancel: false,
            }),
            RopRequest::TransportNewMail(TransportNewMailRequest {
                logon_id: 0,
                input_handle_index: 0,
                message_id: 3,
                folder_id: 2,
                message_class: "IPM.Note".to_string(),
                message_flags: 0,
            }),
            RopRequest::GetValidAttachments(GetValidAttachmentsRequest {
                logon_id: 0,
                input_handle_index: 1,
            }),
            RopRequest::FastTransferDestinationConfigure(DestinationConfigureRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                source_operation: 0,
                copy_flags: 0,
            }),
            RopRequest::FastTransferDestinationPutBuffer(DestinationPutBufferRequest {
                logon_id: 0,
                input_handle_index: 1,
                transfer_data: vec![1, 2],
            }),
            RopRequest::GetNamesFromPropertyIds(GetNamesFromPropertyIdsRequest {
                logon_id: 0,
                input_handle_index: 1,
                property_ids: vec![0x8001],
            }),
            RopRequest::GetPropertyIdsFromNames(GetPropertyIdsFromNamesRequest {
                logon_id: 0,
                input_handle_index: 1,
                flags: 0x02,
                property_names: vec![name.clone()],
            }),
            RopRequest::UpdateDeferredActionMessages(UpdateDeferredActionMessagesRequest {
                logon_id: 0,
                input_handle_index: 0,
                server_entry_id: vec![1],
                client_entry_id: vec![2],
            }),
            RopRequest::EmptyFolder(empty_folder),
            RopRequest::ExpandRow(ExpandRowRequest {
                logon_id: 0,
                input_handle_index: 2,
                max_row_count: 10,
                category_id: 5,
            }),
            RopRequest::CollapseRow(CollapseRowRequest {
                logon_id: 0,
                input_handle_index: 2,
                category_id: 5,
            }),
            RopRequest::LockRegionStream(lock_region),
            RopRequest::UnlockRegionStream(lock_region),
            RopRequest::CommitStream(stream_header),
            RopRequest::GetStreamSize(stream_header),
            RopRequest::QueryNamedProperties(QueryNamedPropertiesRequest {
                logon_id: 0,
                input_handle_index: 1,
                query_flags: 0,
                property_guid: Some(Uuid::from_u128(6)),
            }),
            RopRequest::GetPerUserLongTermIds(GetPerUserLongTermIdsRequest {
                logon_id: 0,
                input_handle_index: 0,
                database_guid: Uuid::from_u128(7),
            }),
            RopRequest::GetPerUserGuid(GetPerUserGuidRequest {
                logon_id: 0,
                input_handle_index: 0,
                long_term_id: ltid,
            }),
            RopRequest::ReadPerUserInformation(ReadPerUserInformationRequest {
                logon_id: 0,
                input_handle_index: 0,
                folder_id: ltid,
                reserved: 0,
                data_offset: 0,
                max_data_size: 4096,
            }),
            RopRequest::WritePerUserInformation(WritePerUserInformationRequest {
                logon_id: 0,
                input_handle_index: 0,
                folder_id: ltid,
                has_finished: true,
                data_offset: 0,
                data: vec![1],
                replica_guid: Some(Uuid::from_u128(8)),
            }),
            RopRequest::SetReadFlags(SetReadFlagsRequest {
                logon_id: 0,
                input_handle_index: 0,
                want_asynchronous: false,
                read_flags: 0,
                message_ids: vec![3],
            }),
            RopRequest::CopyProperties(CopyPropertiesRequest {
                logon_id: 0,
                source_handle_index: 0,
                dest_handle_index: 1,
                want_asynchronous: false,
                copy_flags: 0,
                property_tags: vec![tag],
            }),
            RopRequest::GetReceiveFolderTable(GetReceiveFolderTableRequest {
                logon_id: 0,
                input_handle_index: 0,
            }),
            RopRequest::FastTransferSourceCopyProperties(SourceCopyPropertiesRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                level: 0,
                copy_flags: 0,
                send_options: 1,
                property_tags: vec![tag],
            }),
            RopRequest::GetCollapseState(GetCollapseStateRequest {
                logon_id: 0,
                input_handle_index: 2,
                row_id: 5,
                row_instance_number: 0,
            }),
            RopRequest::SetCollapseState(SetCollapseStateRequest {
                logon_id: 0,
                input_handle_index: 2,
                collapse_state: vec![1, 2],
            }),
            RopRequest::GetTransportFolder(transport_header),
            RopRequest::OptionsData(OptionsDataRequest {
                logon_id: 0,
                input_handle_index: 1,
                address_type: "SMTP".to_string(),
                want_win32: false,
            }),
            RopRequest::SynchronizationConfigure(SynchronizationConfigureRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                synchronization_type: 1,
                send_options: 1,
                synchronization_flags: 0,
                restriction_data: Vec::new(),
                synchronization_extra_flags: 0,
                property_tags: vec![tag],
            }),
            RopRequest::SynchronizationImportMessageChange(ImportMessageChangeRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                import_flag: 0,
                property_values: vec![tagged.clone()],
            }),
            RopRequest::SynchronizationImportHierarchyChange(ImportHierarchyChangeRequest {
                logon_id: 0,
                input_handle_index: 0,
                hierarchy_values: vec![tagged.clone()],
                property_values: vec![tagged.clone()],
            }),
            RopRequest::SynchronizationImportDeletes(ImportDeletesRequest {
                logon_id: 0,
                input_handle_index: 0,
                import_delete_flags: 0,
                property_values: vec![tagged.clone()],
            }),
            RopRequest::SynchronizationUploadStateStreamBegin(UploadStateStreamBeginRequest {
                logon_id: 0,
                input_handle_index: 0,
                property_tag: tag,
                transfer_buffer_size: 64,
            }),
            RopRequest::SynchronizationUploadStateStreamContinue(
                UploadStateStreamContinueRequest {
                    logon_id: 0,
                    input_handle_index: 0,
                    stream_data: vec![1],
                },
            ),
            RopRequest::SynchronizationUploadStateStreamEnd(UploadStateStreamEndRequest {
                logon_id: 0,
                input_handle_index: 0,
            }),
            RopRequest::SynchronizationImportMessageMove(ImportMessageMoveRequest {
                logon_id: 0,
                input_handle_index: 0,
                source_folder_id: vec![1; 22],
                source_message_id: vec![2; 22],
                predecessor_change_list: vec![3; 23],
                destination_message_id: vec![4; 22],
                change_number: vec![5; 22],
            }),
            RopRequest::SetPropertiesNoReplicate(set_properties),
            RopRequest::DeletePropertiesNoReplicate(delete_properties),
            RopRequest::GetStoreState(GetStoreStateRequest {
                logon_id: 0,
                input_handle_index: 0,
            }),
            RopRequest::SynchronizationOpenCollector(OpenCollectorRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
                is_contents_collector: true,
            }),
            RopRequest::GetLocalReplicaIds(GetLocalReplicaIdsRequest {
                logon_id: 0,
                input_handle_index: 0,
                id_count: 16,
            }),
            RopRequest::SynchronizationImportReadStateChanges(ImportReadStateChangesRequest {
                logon_id: 0,
                input_handle_index: 0,
                read_states: vec![MessageReadState {
                    message_id: vec![1; 22],
                    mark_as_read: true,
                }],
            }),
            RopRequest::ResetTable(table_header),
            RopRequest::SynchronizationGetTransferState(GetTransferStateRequest {
                logon_id: 0,
                input_handle_index: 0,
                output_handle_index: 1,
            }),
            RopRequest::TellVersion(TellVersionRequest {
                logon_id: 0,
                input_handle_index: 1,
                version: [15, 0, 0],
            }),
            RopRequest::FreeBookmark(FreeBookmarkRequest {
                logon_id: 0,
                input_handle_index: 2,
                bookmark: vec![1, 2],
            }),
            RopRequest::WriteAndCommitStream(write_stream),
            RopRequest::HardDeleteMessages(delete_messages),
            RopRequest::HardDeleteMessagesAndSubfolders(empty_folder),
            RopRequest::SetLocalReplicaMidsetDeleted(SetLocalReplicaMidsetDeletedRequest {
                logon_id: 0,
                input_handle_index: 0,
                ranges: vec![LongTermIdRange {
                    min: ltid,
                    max: ltid,
                }],
            }),
            RopRequest::Logon(LogonRequest {
                logon_id: 0,
                output_handle_index: 0,
                logon_flags: LogonFlags::private(),
                open_flags: 0,
                store_state: 0,
                essdn: Some("/o=org/cn=user".to_string()),
            }),
        ]
    }

    fn every_response() -> Vec<RopResponse> {
        use crate::property::{
            PropertyName, PropertyProblem, PropertyValue, TaggedPropertyValue, TypedString,
        };

        let tag = PropertyTag::new(PropertyType::Integer64, 0x6748);
        let tagged = TaggedPropertyValue::new(tag, PropertyValue::Integer64(9));
        let ltid = LongTermId::new(Uuid::from_u128(4), [0, 0, 0, 0, 0, 1]);
        let table_status = TableStatusResponse::Success {
            input_handle_index: 2,
            table_status: TableStatus::Complete,
        };
        let table_header = TableHeaderResponse {
            input_handle_index: 2,
            return_value: 0,
        };
        let transport_header = TransportHeaderResponse {
            input_handle_index: 1,
            return_value: 0,
        };
        let stream_header = StreamHeaderResponse {
            input_handle_index: 3,
            return_value: 0,
        };
        let message_header = MessageHeaderResponse {
            handle_index: 1,
            return_value: 0,
        };
        let sync_header = SyncHeaderResponse {
            handle_index: 1,
            return_value: 0,
        };
        let permission_header = PermissionHeaderResponse {
            handle_index: 1,
            return_value: 0,
        };
        let rule_header = RuleHeaderResponse {
            handle_index: 1,
            return_value: 0,
        };
        let fast_transfer_header = FastTransferHeaderResponse {
            handle_index: 1,
            return_value: 0,
        };
        let partial = PartialCompletionResponse {
            input_handle_index: 0,
            return_value: 0,
            partial_completion: false,
        };
        let move_copy = MoveCopyResponse::Standard {
            source_handle_index: 0,
            return_value: 0,
            partial_completion: false,
        };
        let problems = PropertyProblemsResponse::Success {
            input_handle_index: 1,
            problems: vec![PropertyProblem {
                index: 0,
                tag,
                error_code: 0x8004_010F,
            }],
        };
        let copy_properties = CopyPropertiesResponse::Success {
            source_handle_index: 0,
            problems: Vec::new(),
        };
        let table = GetTableResponse::Success {
            output_handle_index: 1,
            row_count: 3,
        };
        let message_status = MessageStatusResponse::Success {
            input_handle_index: 0,
            message_status_flags: 0,
        };
        let import_id = ImportIdResponse::Success {
            handle_index: 1,
            object_id: 3,
        };
        let write_stream = WriteStreamResponse {
            input_handle_index: 3,
            return_value: 0,
            written_size: 3,
        };
        let body = OpenedMessageBody {
            has_named_properties: false,
            subject_prefix: TypedString::None,
            normalized_subject: TypedString::Empty,
            recipient_count: 0,
            recipient_columns: vec![tag],
            recipient_rows: Vec::new(),
        };

        vec![
            RopResponse::OpenFolder(OpenFolderResponse::Success {
                output_handle_index: 1,
                has_rules: false,
                ghosted: None,
            }),
            RopResponse::OpenMessage(OpenMessageResponse::Success {
                output_handle_index: 1,
                body: body.clone(),
            }),
            RopResponse::GetHierarchyTable(table),
            RopResponse::GetContentsTable(table),
            RopResponse::CreateMessage(CreateMessageResponse::Success {
                output_handle_index: 1,
                message_id: Some(3),
            }),
            RopResponse::GetPropertiesSpecific(GetPropertiesSpecificResponse::Success {
                input_handle_index: 1,
                row: test_row(),
            }),
            RopResponse::GetPropertiesAll(GetPropertiesAllResponse::Success {
                input_handle_index: 1,
                property_values: vec![tagged.clone()],
            }),
            RopResponse::GetPropertiesList(GetPropertiesListResponse::Success {
                input_handle_index: 1,
                property_tags: vec![tag],
            }),
            RopResponse::SetProperties(problems.clone()),
            RopResponse::DeleteProperties(problems.clone()),
            RopResponse::SaveChangesMessage(SaveChangesMessageResponse::Success {
                response_handle_index: 0,
                message_id: 3,
            }),
            RopResponse::RemoveAllRecipients(message_header),
            RopResponse::ModifyRecipients(message_header),
            RopResponse::ReadRecipients(ReadRecipientsResponse::Success {
                input_handle_index: 1,
                recipient_rows: vec![ReadRecipientRow {
                    row_id: 0,
                    recipient_type: 1,
                    code_page_id: 1252,
                    reserved: 0,
                    recipient_row: vec![0xAA],
                }],
            }),
            RopResponse::ReloadCachedInformation(ReloadCachedInformationResponse::Success {
                input_handle_index: 1,
                body,
            }),
            RopResponse::SetMessageReadFlag(SetMessageReadFlagResponse::Success {
                response_handle_index: 0,
                status_changed: None,
            }),
            RopResponse::SetColumns(table_status),
            RopResponse::SortTable(table_status),
            RopResponse::Restrict(table_status),
            RopResponse::QueryRows(QueryRowsResponse::Success {
                input_handle_index: 2,
                origin: BookmarkOrigin::Current,
                rows: test_row_set(),
            }),
            RopResponse::GetStatus(table_status),
            RopResponse::QueryPosition(QueryPositionResponse::Success {
                input_handle_index: 2,
                numerator: 1,
                denominator: 4,
            }),
            RopResponse::SeekRow(SeekRowResponse::Success {
                input_handle_index: 2,
                has_sought_less: false,
                rows_sought: 1,
            }),
            RopResponse::SeekRowBookmark(SeekRowBookmarkResponse::Success {
                input_handle_index: 2,
                row_no_longer_visible: false,
                has_sought_less: false,
                rows_sought: 1,
            }),
            RopResponse::SeekRowFractional(table_header),
            RopResponse::CreateBookmark(CreateBookmarkResponse::Success {
                input_handle_index: 2,
                bookmark: vec![1, 2],
            }),
            RopResponse::CreateFolder(CreateFolderResponse::Success {
                output_handle_index: 1,
                folder_id: 2,
                existing: None,
            }),
            RopResponse::DeleteFolder(partial),
            RopResponse::DeleteMessages(partial),
            RopResponse::GetMessageStatus(message_status),
            RopResponse::SetMessageStatus(message_status),
            RopResponse::GetAttachmentTable(message_header),
            RopResponse::OpenAttachment(message_header),
            RopResponse::CreateAttachment(CreateAttachmentResponse::Success {
                output_handle_index: 2,
                attachment_id: 0,
            }),
            RopResponse::DeleteAttachment(message_header),
            RopResponse::SaveChangesAttachment(message_header),
            RopResponse::SetReceiveFolder(SetReceiveFolderResponse {
                input_handle_index: 0,
                return_value: 0,
            }),
            RopResponse::GetReceiveFolder(GetReceiveFolderResponse::Success {
                input_handle_index: 0,
                folder_id: 2,
                explicit_message_class: "IPM.Note".to_string(),
            }),
            RopResponse::RegisterNotification(RegisterNotificationResponse {
                output_handle_index: 1,
                return_value: 0,
            }),
            RopResponse::Notify(NotifyResponse {
                notification_handle: 0x100,
                logon_id: 0,
                notification_data: NotificationData {
                    notification_flags: notification_type::OBJECT_DELETED,
                    folder_id: Some(2),
                    parent_folder_id: Some(1),
                    ..NotificationData::default()
                },
            }),
            RopResponse::OpenStream(OpenStreamResponse::Success {
                output_handle_index: 3,
                stream_size: 64,
            }),
            RopResponse::ReadStream(ReadStreamResponse {
                input_handle_index: 3,
                return_value: 0,
                data: vec![1, 2, 3],
            }),
            RopResponse::WriteStream(write_stream),
            RopResponse::SeekStream(SeekStreamResponse::Success {
                input_handle_index: 3,
                new_position: 8,
            }),
            RopResponse::SetStreamSize(stream_header),
            RopResponse::SetSearchCriteria(SetSearchCriteriaResponse {
                input_handle_index: 0,
                return_value: 0,
            }),
            RopResponse::GetSearchCriteria(GetSearchCriteriaResponse::Success {
                input_handle_index: 0,
                restriction_data: vec![1],
                logon_id: 0,
                folder_ids: vec![2],
                search_flags: 1,
            }),
            RopResponse::SubmitMessage(transport_header),
            RopResponse::MoveCopyMessages(move_copy),
            RopResponse::AbortSubmit(transport_header),
            RopResponse::MoveFolder(move_copy),
            RopResponse::CopyFolder(move_copy),
            RopResponse::QueryColumnsAll(QueryColumnsAllResponse::Success {
                input_handle_index: 2,
                property_tags: vec![tag],
            }),
            RopResponse::Abort(table_status),
            RopResponse::CopyTo(copy_properties.clone()),
            RopResponse::CopyToStream(CopyToStreamResponse::Standard {
                source_handle_index: 3,
                return_value: 0,
                read_byte_count: 10,
                written_byte_count: 10,
            }),
            RopResponse::CloneStream(stream_header),
            RopResponse::GetPermissionsTable(permission_header),
            RopResponse::GetRulesTable(rule_header),
            RopResponse::ModifyPermissions(permission_header),
            RopResponse::ModifyRules(rule_header),
            RopResponse::GetOwningServers(GetOwningServersResponse::Success {
                input_handle_index: 0,
                servers: ReplicaServers {
                    cheap_server_count: 1,
                    servers: vec!["EX01".to_string()],
                },
            }),
            RopResponse::LongTermIdFromId(LongTermIdFromIdResponse::Success {
                input_handle_index: 0,
                long_term_id: ltid,
            }),
            RopResponse::IdFromLongTermId(IdFromLongTermIdResponse::Success {
                input_handle_index: 0,
                object_id: 2,
            }),
            RopResponse::PublicFolderIsGhosted(PublicFolderIsGhostedResponse::Success {
                input_handle_index: 0,
                ghosted: None,
            }),
            RopResponse::OpenEmbeddedMessage(OpenEmbeddedMessageResponse::Failure {
                output_handle_index: 3,
                return_value: 0x8004_010F,
            }),
            RopResponse::SetSpooler(transport_header),
            RopResponse::SpoolerLockMessage(transport_header),
            RopResponse::GetAddressTypes(GetAddressTypesResponse::Success {
                input_handle_index: 1,
                address_types: vec!["EX".to_string(), "SMTP".to_string()],
            }),
            RopResponse::TransportSend(TransportSendResponse::Success {
                input_handle_index: 1,
                property_values: None,
            }),
            RopResponse::FastTransferSourceCopyMessages(fast_transfer_header),
            RopResponse::FastTransferSourceCopyFolder(fast_transfer_header),
            RopResponse::FastTransferSourceCopyTo(fast_transfer_header),
            RopResponse::FastTransferSourceGetBuffer(SourceGetBufferResponse {
                input_handle_index: 1,
                return_value: 0,
                transfer_status: TransferStatus::Partial,
                in_progress_count: 1,
                total_step_count: 2,
                reserved: 0,
                transfer_buffer: vec![1, 2],
            }),
            RopResponse::FindRow(FindRowResponse::Success {
                input_handle_index: 2,
                row_no_longer_visible: false,
                row: Some(test_row()),
            }),
            RopResponse::Progress(ProgressResponse::Success {
                input_handle_index: 1,
                logon_id: 0,
                completed_task_count: 1,
                total_task_count: 2,
            }),
            RopResponse::TransportNewMail(transport_header),
            RopResponse::GetValidAttachments(GetValidAttachmentsResponse::Success {
                input_handle_index: 1,
                attachment_ids: vec![0],
            }),
            RopResponse::FastTransferDestinationConfigure(fast_transfer_header),
            RopResponse::FastTransferDestinationPutBuffer(DestinationPutBufferResponse {
                input_handle_index: 1,
                return_value: 0,
                transfer_status: TransferStatus::Done,
                in_progress_count: 2,
                total_step_count: 2,
                reserved: 0,
                buffer_used_size: 2,
            }),
            RopResponse::GetNamesFromPropertyIds(GetNamesFromPropertyIdsResponse::Success {
                input_handle_index: 1,
                property_names: vec![PropertyName::None {
                    guid: Uuid::from_u128(3),
                }],
            }),
            RopResponse::GetPropertyIdsFromNames(GetPropertyIdsFromNamesResponse::Success {
                input_handle_index: 1,
                property_ids: vec![0x8001],
            }),
            RopResponse::UpdateDeferredActionMessages(rule_header),
            RopResponse::EmptyFolder(partial),
            RopResponse::ExpandRow(ExpandRowResponse::Success {
                input_handle_index: 2,
                expanded_row_count: 1,
                rows: test_row_set(),
            }),
            RopResponse::CollapseRow(CollapseRowResponse::Success {
                input_handle_index: 2,
                collapsed_row_count: 1,
            }),
            RopResponse::LockRegionStream(stream_header),
            RopResponse::UnlockRegionStream(stream_header),
            RopResponse::CommitStream(stream_header),
            RopResponse::GetStreamSize(GetStreamSizeResponse::Success {
                input_handle_index: 3,
                stream_size: 64,
            }),
            RopResponse::QueryNamedProperties(QueryNamedPropertiesResponse::Success {
                input_handle_index: 1,
                property_ids: vec![0x8001],
                property_names: vec![PropertyName::None {
                    guid: Uuid::from_u128(3),
                }],
            }),
            RopResponse::GetPerUserLongTermIds(GetPerUserLongTermIdsResponse::Success {
                input_handle_index: 0,
                long_term_ids: vec![ltid],
            }),
            RopResponse::GetPerUserGuid(GetPerUserGuidResponse::Success {
                input_handle_index: 0,
                database_guid: Uuid::from_u128(7),
            }),
            RopResponse::ReadPerUserInformation(ReadPerUserInformationResponse::Success {
                input_handle_index: 0,
                has_finished: true,
                data: vec![1],
            }),
            RopResponse::WritePerUserInformation(WritePerUserInformationResponse {
                input_handle_index: 0,
                return_value: 0,
            }),
            RopResponse::SetReadFlags(partial),
            RopResponse::CopyProperties(copy_properties),
            RopResponse::GetReceiveFolderTable(GetReceiveFolderTableResponse::Success {
                input_handle_index: 0,
                rows: crate::property::PropertyRowSet::new(vec![
                    crate::property::PropertyRow::Standard(vec![
                        PropertyValue::Integer64(2),
                        PropertyValue::String8("IPM.Note".to_string()),
                        PropertyValue::Time(0x01DA_0000_0000_0000),
                    ]),
                ]),
            }),
            RopResponse::FastTransferSourceCopyProperties(fast_transfer_header),
            RopResponse::GetCollapseState(GetCollapseStateResponse::Success {
                input_handle_index: 2,
                collapse_state: vec![1, 2],
            }),
            RopResponse::SetCollapseState(SetCollapseStateResponse::Success {
                input_handle_index: 2,
                bookmark: vec![1, 2],
            }),
            RopResponse::GetTransportFolder(GetTransportFolderResponse::Success {
                input_handle_index: 1,
                folder_id: 2,
            }),
            RopResponse::Pending(PendingResponse { session_index: 1 }),
            RopResponse::OptionsData(OptionsDataResponse::Success {
                input_handle_index: 1,
                reserved: 0,
                options_info: vec![1],
                help_file: Vec::new(),
                help_file_name: None,
            }),
            RopResponse::SynchronizationConfigure(sync_header),
            RopResponse::SynchronizationImportMessageChange(import_id),
            RopResponse::SynchronizationImportHierarchyChange(import_id),
            RopResponse::SynchronizationImportDeletes(sync_header),
            RopResponse::SynchronizationUploadStateStreamBegin(sync_header),
            RopResponse::SynchronizationUploadStateStreamContinue(sync_header),
            RopResponse::SynchronizationUploadStateStreamEnd(sync_header),
            RopResponse::SynchronizationImportMessageMove(import_id),
            RopResponse::SetPropertiesNoReplicate(problems.clone()),
            RopResponse::DeletePropertiesNoReplicate(problems),
            RopResponse::GetStoreState(GetStoreStateResponse::Success {
                input_handle_index: 0,
                store_state: 0,
            }),
            RopResponse::SynchronizationOpenCollector(sync_header),
            RopResponse::GetLocalReplicaIds(GetLocalReplicaIdsResponse::Success {
                input_handle_index: 0,
                replica_guid: Uuid::from_u128(7),
                global_count: [0, 0, 0, 0, 0, 1],
            }),
            RopResponse::SynchronizationImportReadStateChanges(sync_header),
            RopResponse::ResetTable(table_header),
            RopResponse::SynchronizationGetTransferState(sync_header),
            RopResponse::TellVersion(fast_transfer_header),
            RopResponse::FreeBookmark(table_header),
            RopResponse::WriteAndCommitStream(write_stream),
            RopResponse::HardDeleteMessages(partial),
            RopResponse::HardDeleteMessagesAndSubfolders(partial),
            RopResponse::SetLocalReplicaMidsetDeleted(sync_header),
            RopResponse::Backoff(BackoffResponse {
                logon_id: 0,
                duration: 1000,
                backoff_rops: vec![BackoffRop {
                    rop_id_backoff: 0x15,
                    duration: 500,
                }],
                additional_data: Vec::new(),
            }),
            RopResponse::Logon(LogonResponse::Failure {
                output_handle_index: 0,
                return_value: 0x8004_011D,
            }),
            RopResponse::BufferTooSmall(BufferTooSmallResponse {
                size_needed: 4000,
                request_buffers: vec![1, 2, 3],
            }),
        ]
    }

    #[test]
    fn test_every_request_variant_roundtrips() {
        let ctx = DecodeContext::default();
        let requests = every_request();
        // One variant per decodable request ROP.
        assert_eq!(requests.len(), 126);
        for request in requests {
            let mut w = ByteWriter::new();
            request.encode(&mut w);
            let bytes = w.into_bytes();
            assert_eq!(bytes[0], request.rop_id() as u8);
            let mut cur = ByteCursor::new(&bytes);
            let decoded = RopRequest::decode(&mut cur, &ctx).unwrap();
            assert_eq!(decoded, request);
            assert!(cur.is_empty(), "trailing bytes after {:?}", request.rop_id());
        }
    }

    #[test]
    fn test_every_response_variant_roundtrips() {
        let columns = test_columns();
        let ctx = DecodeContext::with_columns(&columns);
        let responses = every_response();
        // One variant per decodable response ROP.
        assert_eq!(responses.len(), 129);
        for response in responses {
            let mut w = ByteWriter::new();
            response.encode(&ctx, &mut w).unwrap();
            let bytes = w.into_bytes();
            assert_eq!(bytes[0], response.rop_id() as u8);
            let mut cur = ByteCursor::new(&bytes);
            let decoded = RopResponse::decode(&mut cur, &ctx).unwrap();
            assert_eq!(decoded, response);
            assert!(
                cur.is_empty(),
                "trailing bytes after {:?}",
                response.rop_id()
            );
        }
    }
}
