// SPDX-License-Identifier: MIT
//! Frame writer: serializes blocks onto a caller-owned byte sink.

use std::io::Write;

use tracing::debug;

use crate::block::Block;
use crate::error::{BinnfError, Result};
use crate::format::{
    BLOCK_END_SEQUENCE, BLOCK_START_SEQUENCE, BLOCK_TYPE_MATRIX, CELL_LEN, MAX_NAME_LEN,
};

/// Writes framed binnf blocks to an underlying sink.
///
/// The sink is borrowed for the writer's lifetime and never closed here;
/// opening and closing it is the caller's responsibility. Multiple blocks
/// may be written back to back on the same sink.
pub struct FrameWriter<W: Write> {
    sink: W,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Serializes one block as a complete frame.
    ///
    /// All name lengths are validated before any byte is emitted, so a
    /// failed call leaves no partial frame on the sink. The body must fit
    /// the 32-bit frame length field; larger blocks fail with
    /// [`BinnfError::FrameTooLarge`].
    pub fn write_block(&mut self, block: &Block) -> Result<()> {
        check_name_len(block.name())?;
        for column in block.columns() {
            check_name_len(column.name())?;
        }

        let frame_len = frame_len(block.name(), block.columns(), block.row_count() as u64)?;
        debug!(
            name = block.name(),
            rows = block.row_count(),
            cols = block.column_count(),
            frame_len,
            "writing binnf frame"
        );

        self.put_u32(BLOCK_START_SEQUENCE)?;
        self.put_u32(frame_len)?;
        self.put_u32(BLOCK_TYPE_MATRIX)?;
        self.put_str(block.name())?;

        self.put_u32(block.column_count() as u32)?;
        for column in block.columns() {
            self.put_str(column.name())?;
            self.put_u32(column.column_type().tag())?;
        }

        self.put_u32(block.row_count() as u32)?;
        self.put_u32(block.column_count() as u32)?;
        for row in block.rows() {
            for cell in row {
                self.sink.write_all(&cell.encode())?;
            }
        }

        self.put_u32(BLOCK_END_SEQUENCE)?;
        Ok(())
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn put_u32(&mut self, value: u32) -> Result<()> {
        self.sink.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    fn put_str(&mut self, s: &str) -> Result<()> {
        self.put_u32(s.len() as u32)?;
        self.sink.write_all(s.as_bytes())?;
        Ok(())
    }
}

fn check_name_len(name: &str) -> Result<()> {
    if name.len() > MAX_NAME_LEN {
        return Err(BinnfError::NameTooLong { len: name.len() });
    }
    Ok(())
}

/// Declared frame length: every byte between the length field and the end
/// marker. Computed in u64 and narrowed with a check, since the wire field
/// is 32 bits.
fn frame_len(name: &str, columns: &[crate::block::ColumnSpec], rows: u64) -> Result<u32> {
    let str_len = |s: &str| 4 + s.len() as u64;
    let header_len: u64 = 4 + columns.iter().map(|c| str_len(c.name()) + 4).sum::<u64>();
    let matrix_len = 2 * 4 + rows * columns.len() as u64 * CELL_LEN as u64;
    let total = 4 + str_len(name) + header_len + matrix_len;

    u32::try_from(total).map_err(|_| BinnfError::FrameTooLarge { len: total })
}
