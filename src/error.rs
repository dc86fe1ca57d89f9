// SPDX-License-Identifier: MIT
//! Error types for binnf framing.

use crate::format::ColumnType;

/// Result type alias for binnf operations.
pub type Result<T> = std::result::Result<T, BinnfError>;

/// Errors that can occur while framing or parsing binnf blocks.
///
/// Every failure is frame-fatal: the reader performs no automatic
/// re-synchronization, and the stream position after an error is
/// unspecified until the next read re-runs the resync scan.
#[derive(Debug, thiserror::Error)]
pub enum BinnfError {
    /// The source ran out of bytes mid-frame (or before a start marker).
    #[error("unexpected end of stream while reading {0}")]
    UnexpectedEndOfStream(&'static str),

    /// A block or column name exceeds the 1024-byte wire limit.
    #[error("name of {len} bytes exceeds the 1024-byte limit")]
    NameTooLong { len: usize },

    /// The matrix column count disagrees with the column-spec count.
    #[error("column count mismatch: {expected} column specs, matrix declares {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    /// The frame carries a block type other than matrix (`1`).
    #[error("unsupported block type {0} (only matrix blocks, type 1, are defined)")]
    UnsupportedBlockType(u32),

    /// A column declared a type tag the codec does not recognize.
    #[error("unknown column type tag {0} (0 = int32, 1 = float32)")]
    UnknownColumnType(u32),

    /// A matrix declares data rows but no columns to hold them. Such rows
    /// occupy no payload bytes, so the row count is rejected rather than
    /// trusted for allocation.
    #[error("matrix declares {rows} rows but no columns")]
    RowsWithoutColumns { rows: u64 },

    /// The frame body does not fit the 32-bit frame length field.
    #[error("frame body of {len} bytes does not fit the 32-bit frame length field")]
    FrameTooLarge { len: u64 },

    /// The body span did not match the declared frame length.
    #[error("frame length mismatch: header declares {declared} bytes, body spans {actual}")]
    FrameLengthMismatch { declared: u32, actual: u64 },

    /// The trailing 4 bytes were not the end-marker constant.
    #[error("frame end marker mismatch: expected 0x426c634b, found 0x{found:08x}")]
    FrameEndMarkerMismatch { found: u32 },

    /// A cell's value type disagrees with its column's declared type.
    #[error("cell at row {row}, column {column:?} does not hold a {} value", .expected.name())]
    CellTypeMismatch {
        row: usize,
        column: String,
        expected: ColumnType,
    },

    /// A name read from the wire is not valid UTF-8.
    #[error("name is not valid UTF-8: {0}")]
    InvalidName(#[source] std::string::FromUtf8Error),

    /// Transport-level I/O failure other than end of stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
