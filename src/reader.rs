// SPDX-License-Identifier: MIT
//! Frame reader: scans a byte source for framed blocks and decodes them.
//!
//! The reader tolerates arbitrary bytes before a frame (interleaved log
//! text sharing the stream) by scanning for the start marker with a rolling
//! 4-byte window. Parsing is all-or-nothing per frame: any violation aborts
//! with a typed error and leaves the stream position unspecified until the
//! next read re-runs the scan.

use std::io::{self, Read};

use tracing::{debug, trace};

use crate::block::{Block, ColumnSpec};
use crate::error::{BinnfError, Result};
use crate::format::{
    BLOCK_END_SEQUENCE, BLOCK_START_SEQUENCE, BLOCK_TYPE_MATRIX, CELL_LEN, ColumnType,
};

/// Reads framed binnf blocks from an underlying source.
///
/// The source is owned by the caller for lifetime purposes; the reader
/// never closes it. Reads block until enough bytes are available or the
/// source reports end of stream.
pub struct FrameReader<R: Read> {
    source: R,
    /// Bytes consumed since the current frame's length field, for the
    /// declared-length check.
    consumed: u64,
}

impl<R: Read> FrameReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            consumed: 0,
        }
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Scans for the next start marker and decodes one complete frame.
    ///
    /// Fails with [`BinnfError::UnexpectedEndOfStream`] if the source is
    /// exhausted before a marker is found. After any failure the caller may
    /// call this again to skip the corrupt frame; the scan restarts from
    /// the current stream position.
    pub fn read_block(&mut self) -> Result<Block> {
        if !self.synchronise()? {
            return Err(BinnfError::UnexpectedEndOfStream("start marker"));
        }
        self.read_frame_body()
    }

    /// Iterates over the remaining frames on the source.
    ///
    /// Unlike repeated [`read_block`](Self::read_block) calls, the iterator
    /// ends cleanly (`None`) when the source is exhausted while scanning
    /// for a start marker, so trailing bytes after the last frame are not
    /// an error. Exhaustion mid-frame still yields
    /// `Err(UnexpectedEndOfStream)`.
    pub fn blocks(&mut self) -> Blocks<'_, R> {
        Blocks { reader: self }
    }

    /// Rolling-window scan for the start marker.
    ///
    /// Each byte shifts the 32-bit window right by 8 and enters at the top,
    /// so the window always equals the little-endian reading of the last
    /// four bytes seen. Returns `Ok(false)` on end of stream.
    fn synchronise(&mut self) -> Result<bool> {
        let mut window = 0u32;
        let mut scanned = 0u64;
        loop {
            let byte = match self.next_byte()? {
                Some(b) => b,
                None => return Ok(false),
            };
            scanned += 1;
            window = (window >> 8) | (u32::from(byte) << 24);
            if window == BLOCK_START_SEQUENCE {
                if scanned > 4 {
                    trace!(skipped = scanned - 4, "resynchronised after leading bytes");
                }
                return Ok(true);
            }
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.source.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Parses everything after the start marker.
    fn read_frame_body(&mut self) -> Result<Block> {
        let declared = self.get_u32("frame length")?;
        self.consumed = 0;

        let block_type = self.get_u32("block type")?;
        if block_type != BLOCK_TYPE_MATRIX {
            return Err(BinnfError::UnsupportedBlockType(block_type));
        }

        let name = self.get_str("block name")?;

        let column_count = self.get_u32("column count")? as usize;
        let mut columns = Vec::new();
        for _ in 0..column_count {
            let column_name = self.get_str("column name")?;
            let tag = self.get_u32("column type tag")?;
            columns.push(ColumnSpec::new(column_name, ColumnType::from_tag(tag)?));
        }

        let rows = self.get_u32("row count")? as usize;
        let cols = self.get_u32("matrix column count")? as usize;
        if cols != columns.len() {
            return Err(BinnfError::ColumnCountMismatch {
                expected: columns.len(),
                actual: cols,
            });
        }
        if cols == 0 && rows != 0 {
            return Err(BinnfError::RowsWithoutColumns { rows: rows as u64 });
        }

        // Verify the declared length before materializing anything: the
        // payload size is fully determined by the header, so an
        // inconsistent length field is caught here and the row loop below
        // only ever allocates in step with bytes actually received.
        let payload_len = rows as u64 * cols as u64 * CELL_LEN as u64;
        let body_len = self.consumed + payload_len;
        if body_len != u64::from(declared) {
            return Err(BinnfError::FrameLengthMismatch {
                declared,
                actual: body_len,
            });
        }

        let mut matrix = Vec::new();
        let mut cell = [0u8; CELL_LEN];
        for _ in 0..rows {
            let mut row = Vec::with_capacity(cols);
            for column in &columns {
                self.get_exact(&mut cell, "matrix payload")?;
                row.push(column.column_type().decode_cell(cell));
            }
            matrix.push(row);
        }

        let end = self.get_u32("end marker")?;
        if end != BLOCK_END_SEQUENCE {
            return Err(BinnfError::FrameEndMarkerMismatch { found: end });
        }

        debug!(name = %name, rows, cols, "read binnf frame");
        Block::new(name, columns, matrix)
    }

    fn get_exact(&mut self, buf: &mut [u8], field: &'static str) -> Result<()> {
        self.source
            .read_exact(buf)
            .map_err(|e| map_eof(e, field))?;
        self.consumed += buf.len() as u64;
        Ok(())
    }

    fn get_u32(&mut self, field: &'static str) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.get_exact(&mut buf, field)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Reads a length-prefixed name. The declared length is not trusted for
    /// preallocation: the buffer grows only as bytes actually arrive, so a
    /// truncated stream with a huge declared length fails cleanly.
    fn get_str(&mut self, field: &'static str) -> Result<String> {
        let len = u64::from(self.get_u32(field)?);
        let mut bytes = Vec::new();
        let read = (&mut self.source)
            .take(len)
            .read_to_end(&mut bytes)
            .map_err(BinnfError::Io)?;
        if (read as u64) < len {
            return Err(BinnfError::UnexpectedEndOfStream(field));
        }
        self.consumed += read as u64;
        String::from_utf8(bytes).map_err(BinnfError::InvalidName)
    }
}

fn map_eof(e: io::Error, field: &'static str) -> BinnfError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        BinnfError::UnexpectedEndOfStream(field)
    } else {
        BinnfError::Io(e)
    }
}

/// Iterator over the frames remaining on a source. See
/// [`FrameReader::blocks`].
pub struct Blocks<'a, R: Read> {
    reader: &'a mut FrameReader<R>,
}

impl<R: Read> Iterator for Blocks<'_, R> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.synchronise() {
            Ok(true) => Some(self.reader.read_frame_body()),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
