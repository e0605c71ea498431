//! Transport ROPs: submit/abort, spooler coordination, address types,
//! transport folder, options data, and new-mail notification.

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::{status, DecodeError};
use crate::property::TaggedPropertyValue;

/// Request shape shared by the transport ROPs that carry only the header
/// (RopGetAddressTypes, RopSetSpooler, RopTransportSend,
/// RopGetTransportFolder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportHeaderRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
}

impl TransportHeaderRequest {
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

/// Header-only response shared across this family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportHeaderResponse {
    pub input_handle_index: u8,
    pub return_value: u32,
}

impl TransportHeaderResponse {
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

/// RopSubmitMessage request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitMessageRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub submit_flags: u8,
}

impl SubmitMessageRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            submit_flags: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u8(self.submit_flags);
    }
}

/// RopAbortSubmit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbortSubmitRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub folder_id: u64,
    pub message_id: u64,
}

impl AbortSubmitRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            folder_id: cur.read_u64()?,
            message_id: cur.read_u64()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.folder_id);
        w.write_u64(self.message_id);
    }
}

/// RopGetAddressTypes response. The wire carries both the string count
/// and the total byte size of the string block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetAddressTypesResponse {
    Success {
        input_handle_index: u8,
        address_types: Vec<String>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetAddressTypesResponse {
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
        let size = cur.read_u16()? as usize;
        let block = cur.read_bytes(size)?;
        let mut sub = ByteCursor::new(&block);
        let mut address_types = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            address_types.push(sub.read_null_terminated_ascii()?);
        }
        if !sub.is_empty() {
            return Err(DecodeError::SizeMismatch {
                field: "AddressTypes",
                declared: size,
                actual: size - sub.remaining(),
            });
        }
        Ok(Self::Success {
            input_handle_index,
            address_types,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                address_types,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u16(address_types.len() as u16);
                let size: usize = address_types.iter().map(|s| s.len() + 1).sum();
                w.write_u16(size as u16);
                for s in address_types {
                    w.write_null_terminated_ascii(s);
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

/// RopSpoolerLockMessage request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpoolerLockMessageRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub message_id: u64,
    pub lock_state: u8,
}

impl SpoolerLockMessageRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            message_id: cur.read_u64()?,
            lock_state: cur.read_u8()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.message_id);
        w.write_u8(self.lock_state);
    }
}

/// RopTransportSend response. Properties are returned only when the
/// leading flag says so.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportSendResponse {
    Success {
        input_handle_index: u8,
        property_values: Option<Vec<TaggedPropertyValue>>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl TransportSendResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let no_properties = cur.read_bool()?;
        let property_values = if no_properties {
            None
        } else {
            Some(TaggedPropertyValue::decode_counted(cur)?)
        };
        Ok(Self::Success {
            input_handle_index,
            property_values,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                property_values,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_bool(property_values.is_none());
                if let Some(values) = property_values {
                    TaggedPropertyValue::encode_counted(values, w);
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

/// RopTransportNewMail request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportNewMailRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub message_id: u64,
    pub folder_id: u64,
    pub message_class: String,
    pub message_flags: u32,
}

impl TransportNewMailRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            message_id: cur.read_u64()?,
            folder_id: cur.read_u64()?,
            message_class: cur.read_null_terminated_ascii()?,
            message_flags: cur.read_u32()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_u64(self.message_id);
        w.write_u64(self.folder_id);
        w.write_null_terminated_ascii(&self.message_class);
        w.write_u32(self.message_flags);
    }
}

/// RopGetTransportFolder response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetTransportFolderResponse {
    Success {
        input_handle_index: u8,
        folder_id: u64,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl GetTransportFolderResponse {
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
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                folder_id,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u64(*folder_id);
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

/// RopOptionsData request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsDataRequest {
    pub logon_id: u8,
    pub input_handle_index: u8,
    pub address_type: String,
    pub want_win32: bool,
}

impl OptionsDataRequest {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            logon_id: cur.read_u8()?,
            input_handle_index: cur.read_u8()?,
            address_type: cur.read_null_terminated_ascii()?,
            want_win32: cur.read_bool()?,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.write_u8(self.logon_id);
        w.write_u8(self.input_handle_index);
        w.write_null_terminated_ascii(&self.address_type);
        w.write_bool(self.want_win32);
    }
}

/// RopOptionsData response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsDataResponse {
    Success {
        input_handle_index: u8,
        reserved: u8,
        options_info: Vec<u8>,
        help_file: Vec<u8>,
        /// Present iff a help file is returned.
        help_file_name: Option<String>,
    },
    Failure {
        input_handle_index: u8,
        return_value: u32,
    },
}

impl OptionsDataResponse {
    pub fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let input_handle_index = cur.read_u8()?;
        let return_value = cur.read_u32()?;
        if return_value != status::EC_NONE {
            return Ok(Self::Failure {
                input_handle_index,
                return_value,
            });
        }
        let reserved = cur.read_u8()?;
        let options_size = cur.read_u16()? as usize;
        let options_info = cur.read_bytes(options_size)?;
        let help_size = cur.read_u16()? as usize;
        let help_file = cur.read_bytes(help_size)?;
        let help_file_name = if help_size > 0 {
            Some(cur.read_null_terminated_ascii()?)
        } else {
            None
        };
        Ok(Self::Success {
            input_handle_index,
            reserved,
            options_info,
            help_file,
            help_file_name,
        })
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Success {
                input_handle_index,
                reserved,
                options_info,
                help_file,
                help_file_name,
            } => {
                w.write_u8(*input_handle_index);
                w.write_u32(status::EC_NONE);
                w.write_u8(*reserved);
                w.write_u16(options_info.len() as u16);
                w.write_bytes(options_info);
                w.write_u16(help_file.len() as u16);
                w.write_bytes(help_file);
                if let Some(name) = help_file_name {
                    w.write_null_terminated_ascii(name);
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
