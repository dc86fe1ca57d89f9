// SPDX-License-Identifier: MIT
//! binnf wire format constants and the column type codec.
//!
//! All wire constants live here and are shared by the writer and reader.
//! Every multi-byte field on the wire is a 4-byte little-endian integer.

use crate::error::{BinnfError, Result};

/// Marker opening every frame; reads as the bytes `42 6C 63 4B` ("BlcK").
pub const BLOCK_START_SEQUENCE: u32 = 0x4B63_6C42;

/// Marker closing every frame; reads as the bytes `4B 63 6C 42` ("KclB").
pub const BLOCK_END_SEQUENCE: u32 = 0x426C_634B;

/// Block type tag for matrix blocks (the only defined block type).
pub const BLOCK_TYPE_MATRIX: u32 = 0x01;

/// Maximum byte length of a block name or column name.
pub const MAX_NAME_LEN: usize = 1024;

/// Width of every numeric wire field and matrix cell.
pub const CELL_LEN: usize = 4;

/// Logical type of a matrix column.
///
/// The wire tag is fixed: `0` = INT32, `1` = FLOAT32. Both types occupy
/// exactly 4 bytes per cell, which lets columns of different types sit side
/// by side in a flat row-major payload without padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Two's-complement signed 32-bit integer.
    Int32,
    /// IEEE-754 single-precision float.
    Float32,
}

impl ColumnType {
    /// Resolves a wire tag to a column type.
    pub fn from_tag(tag: u32) -> Result<Self> {
        match tag {
            0 => Ok(ColumnType::Int32),
            1 => Ok(ColumnType::Float32),
            other => Err(BinnfError::UnknownColumnType(other)),
        }
    }

    /// Wire tag for this column type.
    pub fn tag(self) -> u32 {
        match self {
            ColumnType::Int32 => 0,
            ColumnType::Float32 => 1,
        }
    }

    /// Human-readable name of the column type.
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Int32 => "int32",
            ColumnType::Float32 => "float32",
        }
    }

    /// Decodes a 4-byte cell according to this column type.
    pub fn decode_cell(self, raw: [u8; CELL_LEN]) -> Value {
        match self {
            ColumnType::Int32 => Value::Int32(i32::from_le_bytes(raw)),
            ColumnType::Float32 => Value::Float32(f32::from_le_bytes(raw)),
        }
    }
}

/// A single 4-byte matrix cell.
#[derive(Debug, Clone, Copy)]
pub enum Value {
    Int32(i32),
    Float32(f32),
}

impl Value {
    /// The column type this value belongs to.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Int32(_) => ColumnType::Int32,
            Value::Float32(_) => ColumnType::Float32,
        }
    }

    /// Encodes the cell to its 4-byte wire representation.
    pub fn encode(&self) -> [u8; CELL_LEN] {
        match self {
            Value::Int32(v) => v.to_le_bytes(),
            Value::Float32(v) => v.to_le_bytes(),
        }
    }

    /// Returns the integer value, if this cell is an INT32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            Value::Float32(_) => None,
        }
    }

    /// Returns the float value, if this cell is a FLOAT32.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float32(v) => Some(*v),
            Value::Int32(_) => None,
        }
    }
}

/// Floats compare bit-for-bit so decoded blocks equal their source exactly,
/// NaN payloads included.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Float32(a), Value::Float32(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}
