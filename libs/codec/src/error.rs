//! Decoding errors for metrics table processing
//!
//! Every failure the codec can produce is returned as a value. None of them is
//! fatal: a caller that gets an error keeps its previous sample and tries again
//! on the next poll.

use thiserror::Error;

/// Common header could not be read
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Buffer is smaller than the 4-byte common header
    #[error("Buffer too short for metrics table header: need {need} bytes, got {got}")]
    TooShort { need: usize, got: usize },
}

impl HeaderError {
    pub fn too_short(need: usize, got: usize) -> Self {
        Self::TooShort { need, got }
    }
}

/// Metrics table decoding and field access errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer is smaller than the 4-byte common header
    #[error("Buffer too short for metrics table header: need {need} bytes, got {got}")]
    TooShort { need: usize, got: usize },

    /// Header names a revision pair with no registered layout
    #[error("Unknown metrics table revision {0}.{1}: no registered layout for this driver revision")]
    UnknownVariant(u8, u8),

    /// Layout matched but the buffer is shorter than that layout
    #[error("Buffer too small for matched layout: expected {expected} bytes, got {actual} ({})", size_mismatch_hint(.expected, .actual))]
    BufferTooSmall { expected: usize, actual: usize },

    /// Array element index outside the field's declared length
    #[error("Index {index} out of range for field {field} with {len} elements")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },

    /// Field path could not be parsed
    #[error("Invalid field path {path:?}: {reason}")]
    InvalidFieldPath { path: String, reason: String },
}

fn size_mismatch_hint(expected: &usize, actual: &usize) -> &'static str {
    if *actual == 0 {
        "empty read from producer"
    } else if *actual < *expected / 2 {
        "likely a short read - check the reader"
    } else {
        "producer and consumer disagree on the table size"
    }
}

impl DecodeError {
    pub fn buffer_too_small(expected: usize, actual: usize) -> Self {
        Self::BufferTooSmall { expected, actual }
    }

    pub fn index_out_of_range(field: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            field: field.into(),
            index,
            len,
        }
    }

    pub fn invalid_field_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFieldPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Header named a revision this build does not know
    pub fn is_unknown_variant(&self) -> bool {
        matches!(self, Self::UnknownVariant(..))
    }

    /// Producer handed over fewer bytes than the header or layout needs
    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, Self::TooShort { .. } | Self::BufferTooSmall { .. })
    }
}

impl From<HeaderError> for DecodeError {
    fn from(error: HeaderError) -> Self {
        match error {
            HeaderError::TooShort { need, got } => Self::TooShort { need, got },
        }
    }
}

/// Result type for decoding operations
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
