//! Table-population progress and column-schema retention.
//!
//! Every table object moves through its own little state machine as
//! columns are set, sorts run, and restrictions apply; the TableStatus
//! byte in the responses reports where it stands. The negotiated column
//! schema is kept here because row-bearing responses cannot be decoded
//! without it.

use crate::error::SessionError;
use oxrops_protocol::property::PropertyTag;
use oxrops_protocol::rop::TableStatus;

/// The table operation a status byte was reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOperation {
    SetColumns,
    SortTable,
    Restrict,
    Abort,
    GetStatus,
}

impl TableOperation {
    fn name(&self) -> &'static str {
        match self {
            TableOperation::SetColumns => "RopSetColumns",
            TableOperation::SortTable => "RopSortTable",
            TableOperation::Restrict => "RopRestrict",
            TableOperation::Abort => "RopAbort",
            TableOperation::GetStatus => "RopGetStatus",
        }
    }

    /// The statuses a given operation may legally report.
    fn allows(&self, status: TableStatus) -> bool {
        match self {
            TableOperation::SetColumns => matches!(
                status,
                TableStatus::Complete
                    | TableStatus::SettingColumns
                    | TableStatus::SetColumnsError
            ),
            TableOperation::SortTable => matches!(
                status,
                TableStatus::Complete | TableStatus::Sorting | TableStatus::SortError
            ),
            TableOperation::Restrict => matches!(
                status,
                TableStatus::Complete | TableStatus::Restricting | TableStatus::RestrictError
            ),
            // Abort and GetStatus report whatever the table is doing.
            TableOperation::Abort | TableOperation::GetStatus => true,
        }
    }
}

/// Per-table-object progress state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableProgress {
    status: Option<TableStatus>,
    columns: Option<Vec<PropertyTag>>,
}

impl TableProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently reported status, if any operation ran yet.
    pub fn status(&self) -> Option<TableStatus> {
        self.status
    }

    /// The column schema negotiated by the last RopSetColumns.
    pub fn columns(&self) -> Option<&[PropertyTag]> {
        self.columns.as_deref()
    }

    /// Records a RopSetColumns outcome along with the schema it
    /// negotiated.
    pub fn set_columns(
        &mut self,
        columns: Vec<PropertyTag>,
        status: TableStatus,
    ) -> Result<(), SessionError> {
        self.apply(TableOperation::SetColumns, status)?;
        self.columns = Some(columns);
        Ok(())
    }

    /// Records the status byte one of the table ROPs reported.
    pub fn apply(
        &mut self,
        operation: TableOperation,
        status: TableStatus,
    ) -> Result<(), SessionError> {
        if !operation.allows(status) {
            return Err(SessionError::UnexpectedTableStatus {
                operation: operation.name(),
                status,
            });
        }
        self.status = Some(status);
        Ok(())
    }

    /// Whether an asynchronous operation is still running.
    pub fn is_busy(&self) -> bool {
        self.status.is_some_and(|status| status.is_in_progress())
    }
}
