//! Fast-transfer progress tracking.
//!
//! GetBuffer/PutBuffer responses report a transfer status and progress
//! counters on every call. The counters live here between calls, under
//! the same per-session exclusivity as the handle table.

use crate::error::SessionError;
use oxrops_protocol::rop::fast_transfer::TransferStatus;

/// Cross-call progress of one fast-transfer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastTransferProgress {
    status: TransferStatus,
    in_progress_count: u16,
    total_step_count: u16,
    observations: u32,
}

impl FastTransferProgress {
    /// Fresh state for a just-configured transfer.
    pub fn new() -> Self {
        Self {
            status: TransferStatus::Partial,
            in_progress_count: 0,
            total_step_count: 0,
            observations: 0,
        }
    }

    pub fn status(&self) -> TransferStatus {
        self.status
    }

    pub fn in_progress_count(&self) -> u16 {
        self.in_progress_count
    }

    pub fn total_step_count(&self) -> u16 {
        self.total_step_count
    }

    /// Whether the transfer reached Done or Error.
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Records the status and counters of one GetBuffer/PutBuffer
    /// response. Progress must not move backwards, and nothing may be
    /// recorded after a terminal status.
    pub fn observe(
        &mut self,
        status: TransferStatus,
        in_progress_count: u16,
        total_step_count: u16,
    ) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::TransferFinished { handle_index: 0 });
        }
        if self.observations > 0 && in_progress_count < self.in_progress_count {
            return Err(SessionError::TransferRegressed {
                from: self.in_progress_count,
                to: in_progress_count,
            });
        }
        self.status = status;
        self.in_progress_count = in_progress_count;
        self.total_step_count = total_step_count;
        self.observations += 1;
        Ok(())
    }
}

impl Default for FastTransferProgress {
    fn default() -> Self {
        Self::new()
    }
}
