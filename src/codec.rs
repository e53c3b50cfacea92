//! Wire encoding of `Frame`.
//!
//! A frame travels as a fixed 16 byte little-endian record with no padding and
//! no length prefix:
//!
//! ```text
//! offset  size  field
//!      0     4  id
//!      4     1  len
//!      5     1  flags
//!      6     1  res0
//!      7     1  res1
//!      8     8  data (always all 8 bytes)
//! ```
//!
//! Fields are processed in this order; the first one that does not fit is
//! reported in the error.

use std::fmt;

use crate::constants::{FRAME_SIZE, MAX_FRAME_DATA_LENGTH};
use crate::errors::{DecodingError, EncodingError};
use crate::frame::Frame;

/// A field of the wire record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Id,
    Length,
    Flags,
    Res0,
    Res1,
    Data,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match *self {
            Field::Id => "id",
            Field::Length => "length",
            Field::Flags => "flags",
            Field::Res0 => "res0",
            Field::Res1 => "res1",
            Field::Data => "data",
        })
    }
}

#[derive(Copy, Clone, Debug)]
struct FieldLayout {
    field: Field,
    offset: usize,
    size: usize,
}

const LAYOUT: [FieldLayout; 6] = [
    FieldLayout { field: Field::Id, offset: 0, size: 4 },
    FieldLayout { field: Field::Length, offset: 4, size: 1 },
    FieldLayout { field: Field::Flags, offset: 5, size: 1 },
    FieldLayout { field: Field::Res0, offset: 6, size: 1 },
    FieldLayout { field: Field::Res1, offset: 7, size: 1 },
    FieldLayout { field: Field::Data, offset: 8, size: MAX_FRAME_DATA_LENGTH },
];

#[inline]
fn remaining(len: usize, layout: &FieldLayout) -> usize {
    len.saturating_sub(layout.offset)
}

/// Encode `frame` into the front of `buf`, returning the number of bytes
/// written.
///
/// Fails if `buf` runs out before all fields are written. Fields preceding
/// the failing one have already been written at that point.
pub fn encode_into(frame: &Frame, buf: &mut [u8]) -> Result<usize, EncodingError> {
    for layout in LAYOUT.iter() {
        let available = remaining(buf.len(), layout);
        if available < layout.size {
            return Err(EncodingError {
                field: layout.field,
                needed: layout.size,
                available,
            });
        }

        let dst = &mut buf[layout.offset..layout.offset + layout.size];
        match layout.field {
            Field::Id => dst.copy_from_slice(&frame.id.to_le_bytes()),
            Field::Length => dst[0] = frame.len,
            Field::Flags => dst[0] = frame.flags,
            Field::Res0 => dst[0] = frame.res0,
            Field::Res1 => dst[0] = frame.res1,
            Field::Data => dst.copy_from_slice(&frame.data),
        }
    }

    Ok(FRAME_SIZE)
}

/// Encode `frame` into a fresh wire record.
pub fn encode(frame: &Frame) -> Result<[u8; FRAME_SIZE], EncodingError> {
    let mut buf = [0u8; FRAME_SIZE];
    encode_into(frame, &mut buf)?;
    Ok(buf)
}

/// Decode a frame from the first 16 bytes of `bytes`.
///
/// Anything past the first record is ignored. Input that ends early fails on
/// the first field it cannot fully supply; nothing is zero-filled.
pub fn decode(bytes: &[u8]) -> Result<Frame, DecodingError> {
    let mut frame = Frame::default();

    for layout in LAYOUT.iter() {
        let available = remaining(bytes.len(), layout);
        if available < layout.size {
            return Err(DecodingError {
                field: layout.field,
                needed: layout.size,
                available,
            });
        }

        let src = &bytes[layout.offset..layout.offset + layout.size];
        match layout.field {
            Field::Id => frame.id = u32::from_le_bytes([src[0], src[1], src[2], src[3]]),
            Field::Length => frame.len = src[0],
            Field::Flags => frame.flags = src[0],
            Field::Res0 => frame.res0 = src[0],
            Field::Res1 => frame.res1 = src[0],
            Field::Data => frame.data.copy_from_slice(src),
        }
    }

    Ok(frame)
}

impl Frame {
    /// Wire representation of this frame. See `codec::encode`.
    #[inline]
    pub fn encode(&self) -> Result<[u8; FRAME_SIZE], EncodingError> {
        encode(self)
    }

    /// Parse a frame from its wire representation. See `codec::decode`.
    #[inline]
    pub fn decode(bytes: &[u8]) -> Result<Frame, DecodingError> {
        decode(bytes)
    }
}
