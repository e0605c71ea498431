//! Session lifecycle and the cross-session registry.
//!
//! A session is created at logon, owns its handle table and the
//! cross-call fast-transfer/table state, and is destroyed at logoff or
//! disconnect. Processing inside one session is strictly sequential;
//! different sessions may run on different worker threads, so the
//! registry hands out each session behind its own lock.

use crate::error::SessionError;
use crate::handle::{HandleResolutionPolicy, HandleTable};
use crate::table::{TableOperation, TableProgress};
use crate::transfer::FastTransferProgress;
use dashmap::DashMap;
use oxrops_protocol::property::PropertyTag;
use oxrops_protocol::rop::fast_transfer::TransferStatus;
use oxrops_protocol::rop::{DecodeContext, RopId, TableStatus};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// What kind of store the session is logged on to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogonKind {
    PrivateMailbox,
    PublicFolders,
}

/// Per-session behavior knobs.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// How handle indices resolve for the alternate-resolution ROP set.
    pub handle_resolution: HandleResolutionPolicy,
    /// Whether public-folder logon responses zero the per-user GUID.
    /// Server-defined behavior, so it is configured rather than assumed.
    pub zero_per_user_guid: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            handle_resolution: HandleResolutionPolicy::Strict,
            zero_per_user_guid: true,
        }
    }
}

/// One logged-on session and everything scoped to it.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    config: SessionConfig,
    logon: Option<LogonKind>,
    handles: HandleTable,
    transfers: HashMap<u8, FastTransferProgress>,
    tables: HashMap<u8, TableProgress>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            logon: None,
            handles: HandleTable::new(),
            transfers: HashMap::new(),
            tables: HashMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn logon_kind(&self) -> Option<LogonKind> {
        self.logon
    }

    pub fn is_private_logon(&self) -> bool {
        self.logon != Some(LogonKind::PublicFolders)
    }

    /// Establishes the logon, storing its handle at slot 0.
    pub fn log_on(&mut self, kind: LogonKind, logon_handle: u32) -> usize {
        let index = self.handles.allocate(logon_handle);
        self.logon = Some(kind);
        tracing::debug!(session = %self.id, ?kind, "logon established");
        index
    }

    /// Tears the session down: every handle is released and all
    /// cross-call state is dropped.
    pub fn log_off(&mut self) {
        tracing::debug!(
            session = %self.id,
            handles = self.handles.len(),
            "logoff, releasing session state"
        );
        self.logon = None;
        self.handles = HandleTable::new();
        self.transfers.clear();
        self.tables.clear();
    }

    pub fn handle_table(&self) -> &HandleTable {
        &self.handles
    }

    pub fn handle_table_mut(&mut self) -> &mut HandleTable {
        &mut self.handles
    }

    /// Resolves a handle index for the given ROP under the session's
    /// resolution policy.
    pub fn resolve_handle(&self, rop: RopId, index: usize) -> Result<u32, SessionError> {
        self.handles
            .resolve_for(rop, index, self.config.handle_resolution)
    }

    /// Stores a handle created by the ROP currently being processed.
    pub fn allocate_handle(&mut self, handle: u32) -> usize {
        let index = self.handles.allocate(handle);
        tracing::trace!(session = %self.id, index, "allocated server object handle");
        index
    }

    /// Releases the slot referenced by a RopRelease.
    pub fn release_handle(&mut self, index: usize) {
        tracing::trace!(session = %self.id, index, "released server object handle");
        self.handles.release(index);
        self.transfers.remove(&(index as u8));
        self.tables.remove(&(index as u8));
    }

    /// Begins tracking a configured fast transfer on a handle slot.
    pub fn configure_transfer(&mut self, handle_index: u8) -> &mut FastTransferProgress {
        self.transfers
            .entry(handle_index)
            .or_insert_with(FastTransferProgress::new)
    }

    /// Records one GetBuffer/PutBuffer observation for the transfer on
    /// the given handle slot.
    pub fn observe_transfer(
        &mut self,
        handle_index: u8,
        status: TransferStatus,
        in_progress_count: u16,
        total_step_count: u16,
    ) -> Result<(), SessionError> {
        let progress = self
            .transfers
            .get_mut(&handle_index)
            .ok_or(SessionError::TransferNotConfigured { status })?;
        progress
            .observe(status, in_progress_count, total_step_count)
            .map_err(|err| match err {
                SessionError::TransferFinished { .. } => {
                    SessionError::TransferFinished { handle_index }
                }
                other => other,
            })
    }

    pub fn transfer(&self, handle_index: u8) -> Option<&FastTransferProgress> {
        self.transfers.get(&handle_index)
    }

    /// Records a RopSetColumns outcome for the table on a handle slot,
    /// retaining the schema for later row decoding.
    pub fn negotiate_columns(
        &mut self,
        handle_index: u8,
        columns: Vec<PropertyTag>,
        status: TableStatus,
    ) -> Result<(), SessionError> {
        self.tables
            .entry(handle_index)
            .or_default()
            .set_columns(columns, status)
    }

    /// Records a table-status observation for the table on a handle
    /// slot.
    pub fn observe_table(
        &mut self,
        handle_index: u8,
        operation: TableOperation,
        status: TableStatus,
    ) -> Result<(), SessionError> {
        self.tables
            .get_mut(&handle_index)
            .ok_or(SessionError::UnknownTable { handle_index })?
            .apply(operation, status)
    }

    pub fn table(&self, handle_index: u8) -> Option<&TableProgress> {
        self.tables.get(&handle_index)
    }

    /// Builds the decode context for ROPs addressed to the given table
    /// handle: its negotiated columns plus the session's logon kind.
    pub fn decode_context(&self, table_handle: Option<u8>) -> DecodeContext<'_> {
        DecodeContext {
            columns: table_handle
                .and_then(|handle| self.tables.get(&handle))
                .and_then(|table| table.columns()),
            private_logon: self.is_private_logon(),
        }
    }

    /// Applies the configured per-user GUID policy to an outgoing
    /// public-folder logon response.
    pub fn effective_per_user_guid(&self, guid: Uuid) -> Uuid {
        if self.config.zero_per_user_guid {
            Uuid::nil()
        } else {
            guid
        }
    }
}

/// All live sessions, keyed by session id. Lookups are lock-free; each
/// session carries its own lock so independent sessions never contend.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, Arc<RwLock<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Creates a session and returns its id and shared state.
    pub fn create(&self, config: SessionConfig) -> (Uuid, Arc<RwLock<Session>>) {
        let session = Session::new(config);
        let id = session.id();
        let shared = Arc::new(RwLock::new(session));
        self.sessions.insert(id, Arc::clone(&shared));
        tracing::debug!(session = %id, total = self.sessions.len(), "session created");
        (id, shared)
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<RwLock<Session>>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Removes a session at disconnect, releasing everything it owned.
    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            tracing::debug!(session = %id, "session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
