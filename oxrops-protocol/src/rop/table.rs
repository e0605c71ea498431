//! Table ROPs: column/sort/restrict configuration, row queries, seeking,
//! bookmarks, and category expand/collapse.

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::{status, DecodeError};
use crate::property::{PropertyRow, PropertyRowSet, PropertyTag};

/// Progress of an asynchronous table population, sort, or restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TableStatus {
    Complete = 0x00,
    Sorting = 0x09,
    SortError = 0x0A,
    SettingColumns = 0x0B,
    SetColumnsError = 0x0D,
    Restricting = 0x0E,
    RestrictError = 0x0F,
}

impl TryFrom<u8> for TableStatus {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(TableStatus::Complete),
            0x09 => Ok(TableStatus::Sorting),
            0x0A => Ok(TableStatus::SortError),
            0x0B => Ok(TableStatus::SettingColumns),
            0x0D => Ok(TableStatus::SetColumnsError),
            0x0E => Ok(TableStatus::Restricting),
            0x0F => Ok(TableStatus::RestrictError),
            other => Err(DecodeError::InvalidDiscriminant {
                field: "TableStatus",
                value: other as u32,
            }),
        }
    }
}

impl TableStatus {
    /// Whether the table operation ended in an error state.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            TableStatus::SortError | TableStatus::SetColumnsError | TableStatus::RestrictError
        )
    }

    /// Whether an operation is still in flight.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            TableStatus::Sorting | TableStatus::SettingColumns | TableStatus::Restricting
        )
    }
}

/// Where a seek or query starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BookmarkOrigin {
    Beginning = 0x00,
    Current = 0x01,
    End = 0x02,
}

impl TryFrom<u8> for BookmarkOrigin {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(BookmarkOrigin::Beginning),
            0x01 => Ok(BookmarkOrigin::Current),
            0x02 => Ok(BookmarkOrigin::End),
            other => Err(DecodeError::InvalidDiscriminant {
                field: "BookmarkOrigin",
                value: other as u32,
            }),
        }
    }
}

/// One sort key: the column plus the sort direction byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub tag: PropertyTag,
    pub order: u8,
}

impl SortOrder {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            tag: PropertyTag::decode(cur)?,
            order: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        self.tag.encode(w);
        w.write_u8(self.order);
    }
}

fn read_sized_bytes(cur: &mut ByteCursor<'_>) -> Result<Vec<u8>, DecodeError> {
    let size = cur.read_u16()? as usize;
    cur.read_bytes(size)
}

fn write_sized_bytes(bytes: &[u8], w: &mut ByteWriter) {
    w.write_u16(bytes.len() as u16);
    w.write_bytes(bytes);
}

/// Request shape shared by the table ROPs that carry nothing beyond the
/// header (RopAbort, RopGetStatus, RopQueryPosition, RopCreateBookmark,
/// RopQueryColumnsAll, RopResetTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableHeaderRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
}

impl TableHeaderRequest {
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

/// Response shape shared by RopSetColumns, RopSortTable, RopRestrict,
/// RopAbort, and RopGetStatus: a table status byte on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatusResponse {
    Success {
        input_handle_index: u8,
        table_status: TableStatus,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl TableStatusResponse {
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
            table_status: TableStatus::try_from(cur.read_u8()?)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                table_status,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u8(*table_status as u8);
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

/// RopSetColumns request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetColumnsRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub set_columns_flags: u8,
    pub property_tags: Vec<PropertyTag>,
}

impl SetColumnsRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            set_columns_flags: cur.read_u8()?,
            property_tags: PropertyTag::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.set_columns_flags);
        PropertyTag::encode_counted(&self.property_tags, w);
    }
}

/// RopSortTable request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortTableRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub sort_table_flags: u8,
    pub category_count: u16,
    pub expanded_count: u16,
    pub sort_orders: Vec<SortOrder>,
}

impl SortTableRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let logon_id = cur.read_u8()?;
        let input_handle_index = cur.read_u8()?;
        let sort_table_flags = cur.read_u8()?;
        let sort_order_count = cur.read_u16()? as usize;
        let category_count = cur.read_u16()?;
        let expanded_count = cur.read_u16()?;
        let mut sort_orders = Vec::with_capacity(sort_order_count.min(1024));
        for _ in 0..sort_order_count {
            sort_orders.push(SortOrder::decode(cur)?);
        }
        Ok(Self {
            logon_id,
            input_handle_index,
            sort_table_flags,
            category_count,
            expanded_count,
            sort_orders,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.sort_table_flags);
        w.write_u16(self.sort_orders.len() as u16);
        w.write_u16(self.category_count);
        w.write_u16(self.expanded_count);
        for order in &self.sort_orders {
            order.encode(w);
        }
    }
}

/// RopRestrict request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub restrict_flags: u8,
    pub restriction_data: Vec<u8>,
}

impl RestrictRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            restrict_flags: cur.read_u8()?,
            restriction_data: read_sized_bytes(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.restrict_flags);
        write_sized_bytes(&self.restriction_data, w);
    }
}

/// RopQueryRows request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRowsRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub query_rows_flags: u8,
    pub forward_read: bool,
    pub row_count: u16,
}

impl QueryRowsRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            query_rows_flags: cur.read_u8()?,
            forward_read: cur.read_bool()?,
            row_count: cur.read_u16()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.query_rows_flags);
        w.write_bool(self.forward_read);
        w.write_u16(self.row_count);
    }
}

/// RopQueryRows response. Row data is decoded against the column schema
/// negotiated by the preceding RopSetColumns.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryRowsResponse {
    Success {
        input_handle_index: u8,
        origin: BookmarkOrigin,
        rows: PropertyRowSet,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl QueryRowsResponse {
    pub fn decode(
        cur: &mut ByteCursor<'_>,
        columns: &[PropertyTag],
    ) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let origin = BookmarkOrigin::try_from(cur.read_u8()?)?;
        let row_count = cur.read_u16()? as usize;
        let rows = PropertyRowSet::decode(cur, columns, row_count)?;
        Ok(Self::Success {
            input_handle_index,
            origin,
            rows,
        })
    }

    pub fn encode(&self, columns: &[PropertyTag], w: &mut ByteWriter) -> Result<(), DecodeError> {
        match self {
            Self::Success {
                input_handle_index,
                origin,
                rows,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u8(*origin as u8);
                w.write_u16(rows.len() as u16);
                rows.encode(columns, w)
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

/// RopQueryPosition response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPositionResponse {
    Success {
        input_handle_index: u8,
        numerator: u32,
        denominator: u32,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl QueryPositionResponse {
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
            numerator: cur.read_u32()?,
            denominator: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                numerator,
                denominator,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u32(*numerator);
                w.write_u32(*denominator);
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

/// RopSeekRow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekRowRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub origin: BookmarkOrigin,
    pub row_count: i32,
    pub want_row_moved_count: bool,
}

impl SeekRowRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            origin: BookmarkOrigin::try_from(cur.read_u8()?)?,
            row_count: cur.read_i32()?,
            want_row_moved_count: cur.read_bool()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.origin as u8);
        w.write_i32(self.row_count);
        w.write_bool(self.want_row_moved_count);
    }
}

/// RopSeekRow response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekRowResponse {
    Success {
        input_handle_index: u8,
        has_sought_less: bool,
        rows_sought: i32,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl SeekRowResponse {
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
            has_sought_less: cur.read_bool()?,
            rows_sought: cur.read_i32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                has_sought_less,
                rows_sought,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_bool(*has_sought_less);
                w.write_i32(*rows_sought);
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

/// RopSeekRowBookmark request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeekRowBookmarkRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub bookmark: Vec<u8>,
    pub row_count: i32,
    pub want_row_moved_count: bool,
}

impl SeekRowBookmarkRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            bookmark: read_sized_bytes(cur)?,
            row_count: cur.read_i32()?,
            want_row_moved_count: cur.read_bool()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        write_sized_bytes(&self.bookmark, w);
        w.write_i32(self.row_count);
        w.write_bool(self.want_row_moved_count);
    }
}

/// RopSeekRowBookmark response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekRowBookmarkResponse {
    Success {
        input_handle_index: u8,
        row_no_longer_visible: bool,
        has_sought_less: bool,
        rows_sought: i32,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl SeekRowBookmarkResponse {
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
            row_no_longer_visible: cur.read_bool()?,
            has_sought_less: cur.read_bool()?,
            rows_sought: cur.read_i32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                row_no_longer_visible,
                has_sought_less,
                rows_sought,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_bool(*row_no_longer_visible);
                w.write_bool(*has_sought_less);
                w.write_i32(*rows_sought);
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

/// RopSeekRowFractional request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekRowFractionalRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub numerator: u32,
    pub denominator: u32,
}

impl SeekRowFractionalRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            numerator: cur.read_u32()?,
            denominator: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u32(self.numerator);
        w.write_u32(self.denominator);
    }
}

/// Response shape shared by the table ROPs whose success carries nothing
/// (RopSeekRowFractional, RopFreeBookmark, RopResetTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableHeaderResponse {
    pub input_handle_index: u8,
    pub return_value: u32,
}

impl TableHeaderResponse {
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

/// RopCreateBookmark response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateBookmarkResponse {
    Success {
        input_handle_index: u8,
        bookmark: Vec<u8>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl CreateBookmarkResponse {
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
            bookmark: read_sized_bytes(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                bookmark,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                write_sized_bytes(bookmark, w);
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

/// RopQueryColumnsAll response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryColumnsAllResponse {
    Success {
        input_handle_index: u8,
        property_tags: Vec<PropertyTag>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl QueryColumnsAllResponse {
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
            property_tags: PropertyTag::decode_counted(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                property_tags,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                PropertyTag::encode_counted(property_tags, w);
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

/// RopFindRow request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindRowRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub find_row_flags: u8,
    pub restriction_data: Vec<u8>,
    pub origin: BookmarkOrigin,
    pub bookmark: Vec<u8>,
}

impl FindRowRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            find_row_flags: cur.read_u8()?,
            restriction_data: read_sized_bytes(cur)?,
            origin: BookmarkOrigin::try_from(cur.read_u8()?)?,
            bookmark: read_sized_bytes(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.find_row_flags);
        write_sized_bytes(&self.restriction_data, w);
        w.write_u8(self.origin as u8);
        write_sized_bytes(&self.bookmark, w);
    }
}

/// RopFindRow response. The found row decodes against the negotiated
/// column schema; it is absent from the wire when nothing matched.
#[derive(Debug, Clone, PartialEq)]
pub enum FindRowResponse {
    Success {
        input_handle_index: u8,
        row_no_longer_visible: bool,
        row: Option<PropertyRow>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl FindRowResponse {
    pub fn decode(
        cur: &mut ByteCursor<'_>,
        columns: &[PropertyTag],
    ) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let row_no_longer_visible = cur.read_bool()?;
        let has_row_data = cur.read_bool()?;
        let row = if has_row_data {
            Some(PropertyRow::decode(cur, columns)?)
        } else {
            None
        };
        Ok(Self::Success {
            input_handle_index,
            row_no_longer_visible,
            row,
        })
    }

    pub fn encode(&self, columns: &[PropertyTag], w: &mut ByteWriter) -> Result<(), DecodeError> {
        match self {
            Self::Success {
                input_handle_index,
                row_no_longer_visible,
                row,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_bool(*row_no_longer_visible);
                w.write_bool(row.is_some());
                if let Some(row) = row {
                    row.encode(columns, w)?;
                }
                Ok(())
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

/// RopFreeBookmark request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeBookmarkRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub bookmark: Vec<u8>,
}

impl FreeBookmarkRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            bookmark: read_sized_bytes(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        write_sized_bytes(&self.bookmark, w);
    }
}

/// RopExpandRow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandRowRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub max_row_count: u16,
    pub category_id: u64,
}

impl ExpandRowRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            max_row_count: cur.read_u16()?,
            category_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u16(self.max_row_count);
        w.write_u64(self.category_id);
    }
}

/// RopExpandRow response.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpandRowResponse {
    Success {
        input_handle_index: u8,
        expanded_row_count: u32,
        rows: PropertyRowSet,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl ExpandRowResponse {
    pub fn decode(
        cur: &mut ByteCursor<'_>,
        columns: &[PropertyTag],
    ) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let expanded_row_count = cur.read_u32()?;
        let row_count = cur.read_u16()? as usize;
        let rows = PropertyRowSet::decode(cur, columns, row_count)?;
        Ok(Self::Success {
            input_handle_index,
            expanded_row_count,
            rows,
        })
    }

    pub fn encode(&self, columns: &[PropertyTag], w: &mut ByteWriter) -> Result<(), DecodeError> {
        match self {
            Self::Success {
                input_handle_index,
                expanded_row_count,
                rows,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u32(*expanded_row_count);
                w.write_u16(rows.len() as u16);
                rows.encode(columns, w)
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

/// RopCollapseRow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseRowRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub category_id: u64,
}

impl CollapseRowRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            category_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.category_id);
    }
}

/// RopCollapseRow response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseRowResponse {
    Success {
        input_handle_index: u8,
        collapsed_row_count: u32,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl CollapseRowResponse {
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
            collapsed_row_count: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                collapsed_row_count,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u32(*collapsed_row_count);
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

/// RopGetCollapseState request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCollapseStateRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub row_id: u64,
    pub row_instance_number: u32,
}

impl GetCollapseStateRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            row_id: cur.read_u64()?,
            row_instance_number: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.row_id);
        w.write_u32(self.row_instance_number);
    }
}

/// RopGetCollapseState response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetCollapseStateResponse {
    Success {
        input_handle_index: u8,
        collapse_state: Vec<u8>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetCollapseStateResponse {
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
            collapse_state: read_sized_bytes(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                collapse_state,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                write_sized_bytes(collapse_state, w);
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

/// RopSetCollapseState request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCollapseStateRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub collapse_state: Vec<u8>,
}

impl SetCollapseStateRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            collapse_state: read_sized_bytes(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        write_sized_bytes(&self.collapse_state, w);
    }
}

/// RopSetCollapseState response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetCollapseStateResponse {
    Success {
        input_handle_index: u8,
        bookmark: Vec<u8>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl SetCollapseStateResponse {
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
            bookmark: read_sized_bytes(cur)?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                bookmark,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                write_sized_bytes(bookmark, w);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{PropertyType, PropertyValue};

    fn columns() -> Vec<PropertyTag> {
        vec![
            PropertyTag::new(PropertyType::Integer64, 0x6748),
            PropertyTag::new(PropertyType::Unicode, 0x3001),
        ]
    }

    #[test]
    fn test_table_status_values() {
        assert_eq!(TableStatus::try_from(0x00).unwrap(), TableStatus::Complete);
        assert_eq!(TableStatus::try_from(0x09).unwrap(), TableStatus::Sorting);
        assert_eq!(TableStatus::try_from(0x0A).unwrap(), TableStatus::SortError);
        assert_eq!(
            TableStatus::try_from(0x0B).unwrap(),
            TableStatus::SettingColumns
        );
        assert_eq!(
            TableStatus::try_from(0x0D).unwrap(),
            TableStatus::SetColumnsError
        );
        assert_eq!(
            TableStatus::try_from(0x0E).unwrap(),
            TableStatus::Restricting
        );
        assert_eq!(
            TableStatus::try_from(0x0F).unwrap(),
            TableStatus::RestrictError
        );
        assert!(TableStatus::try_from(0x01).is_err());

        assert!(TableStatus::SortError.is_error());
        assert!(TableStatus::Restricting.is_in_progress());
        assert!(!TableStatus::Complete.is_error());
        assert!(!TableStatus::Complete.is_in_progress());
    }

    #[test]
    fn test_set_columns_roundtrip() {
        let req = SetColumnsRequest {
            logon_id: 0,
            input_handle_index: 2,
            set_columns_flags: 0,
            property_tags: columns(),
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(SetColumnsRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_table_status_response_roundtrip() {
        let resp = TableStatusResponse::Success {
            input_handle_index: 2,
            table_status: TableStatus::Sorting,
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(TableStatusResponse::decode(&mut cur).unwrap(), resp);
    }

    #[test]
    fn test_sort_table_roundtrip() {
        let req = SortTableRequest {
            logon_id: 0,
            input_handle_index: 2,
            sort_table_flags: 0,
            category_count: 1,
            expanded_count: 1,
            sort_orders: vec![
                SortOrder {
                    tag: PropertyTag::new(PropertyType::Time, 0x0E06),
                    order: 0x01,
                },
                SortOrder {
                    tag: PropertyTag::new(PropertyType::Unicode, 0x0037),
                    order: 0x00,
                },
            ],
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(SortTableRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_query_rows_roundtrip() {
        let cols = columns();
        let resp = QueryRowsResponse::Success {
            input_handle_index: 2,
            origin: BookmarkOrigin::Current,
            rows: PropertyRowSet::new(vec![
                PropertyRow::Standard(vec![
                    PropertyValue::Integer64(1),
                    PropertyValue::Unicode("Inbox".to_string()),
                ]),
                PropertyRow::Standard(vec![
                    PropertyValue::Integer64(2),
                    PropertyValue::Unicode("Outbox".to_string()),
                ]),
            ]),
        };
        let mut w = ByteWriter::new();
        resp.encode(&cols, &mut w).unwrap();
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(QueryRowsResponse::decode(&mut cur, &cols).unwrap(), resp);
    }

    #[test]
    fn test_find_row_without_match() {
        let cols = columns();
        let resp = FindRowResponse::Success {
            input_handle_index: 2,
            row_no_longer_visible: false,
            row: None,
        };
        let mut w = ByteWriter::new();
        resp.encode(&cols, &mut w).unwrap();
        // Header + two booleans, no row bytes.
        assert_eq!(w.len(), 7);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(FindRowResponse::decode(&mut cur, &cols).unwrap(), resp);
    }

    #[test]
    fn test_seek_row_negative_count() {
        let req = SeekRowRequest {
            logon_id: 0,
            input_handle_index: 2,
            origin: BookmarkOrigin::End,
            row_count: -25,
            want_row_moved_count: true,
        };
        let mut w = ByteWriter::new();
        req.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(SeekRowRequest::decode(&mut cur).unwrap(), req);
    }

    #[test]
    fn test_bookmark_roundtrips() {
        let resp = CreateBookmarkResponse::Success {
            input_handle_index: 2,
            bookmark: vec![0x01, 0x02, 0x03, 0x04],
        };
        let mut w = ByteWriter::new();
        resp.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(CreateBookmarkResponse::decode(&mut cur).unwrap(), resp);

        let state = GetCollapseStateResponse::Success {
            input_handle_index: 2,
            collapse_state: vec![0xAB; 12],
        };
        let mut w = ByteWriter::new();
        state.encode(&mut w);
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(GetCollapseStateResponse::decode(&mut cur).unwrap(), state);
    }

    #[test]
    fn test_expand_row_roundtrip() {
        let cols = columns();
        let resp = ExpandRowResponse::Success {
            input_handle_index: 2,
            expanded_row_count: 17,
            rows: PropertyRowSet::new(vec![PropertyRow::Standard(vec![
                PropertyValue::Integer64(9),
                PropertyValue::Unicode("Drafts".to_string()),
            ])]),
        };
        let mut w = ByteWriter::new();
        resp.encode(&cols, &mut w).unwrap();
        let bytes = w.into_bytes();
        let mut cur = ByteCursor::new(&bytes);
        assert_eq!(ExpandRowResponse::decode(&mut cur, &cols).unwrap(), resp);
    }
}
