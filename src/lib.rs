// SPDX-License-Identifier: MIT
//! # binnf
//!
//! A compact binary framing format for exchanging named, typed,
//! matrix-shaped numeric data between two processes over a byte stream.
//! The stream may carry unrelated bytes (e.g. interleaved log text) before
//! a frame begins: the reader scans for the start marker with a rolling
//! 4-byte window instead of assuming a fixed offset.
//!
//! ## Format Specification
//!
//! ```text
//! binnf frame (all integers 4-byte little-endian):
//!
//! - Start marker: 0x4B636C42 ("BlcK" on the wire)
//! - Frame length: bytes from after this field to the end marker
//! - Block type:   1 = matrix block (only defined value)
//! - Name:         length-prefixed, <= 1024 bytes
//! - Column count
//! - Per column:   length-prefixed name, type tag (0 = int32, 1 = float32)
//! - Row count
//! - Column count (repeated, must match)
//! - Payload:      rows x cols x 4 bytes, row-major, decoded per column type
//! - End marker:   0x426C634B ("KclB" on the wire)
//! ```
//!
//! Every cell is 4 bytes wide regardless of logical type, so int32 and
//! float32 columns sit side by side in one flat payload without padding.
//!
//! ## Byte Order
//!
//! All fields are encoded little-endian, explicitly. The frame carries no
//! endianness tag, so producers that emit host byte order on a big-endian
//! machine are not wire compatible with this crate.
//!
//! ## Usage
//!
//! ```rust
//! use binnf::{Block, ColumnSpec, ColumnType, FrameReader, FrameWriter, Value};
//!
//! let block = Block::new(
//!     "spikes",
//!     vec![ColumnSpec::new("t", ColumnType::Float32)],
//!     vec![vec![Value::Float32(0.1)], vec![Value::Float32(0.2)]],
//! ).unwrap();
//!
//! let mut writer = FrameWriter::new(Vec::new());
//! writer.write_block(&block).unwrap();
//! let bytes = writer.into_inner();
//!
//! let mut reader = FrameReader::new(std::io::Cursor::new(bytes));
//! assert_eq!(reader.read_block().unwrap(), block);
//! ```
//!
//! ## Failure Model
//!
//! Parsing is all-or-nothing per frame. Every violation surfaces as one
//! [`BinnfError`] kind carrying the offending field and, where applicable,
//! expected vs. actual values. The reader never re-synchronises on its own
//! after a failure; calling [`FrameReader::read_block`] again re-runs the
//! scan from the current position, which is how a caller skips a corrupt
//! frame.

pub mod block;
pub mod error;
pub mod format;
pub mod reader;
pub mod writer;

// Re-export main types
pub use block::{Block, ColumnSpec};
pub use error::{BinnfError, Result};
pub use format::{
    BLOCK_END_SEQUENCE, BLOCK_START_SEQUENCE, BLOCK_TYPE_MATRIX, ColumnType, MAX_NAME_LEN, Value,
};
pub use reader::{Blocks, FrameReader};
pub use writer::FrameWriter;
