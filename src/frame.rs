use std::fmt;

use itertools::Itertools;

use crate::constants::*;
use crate::errors::ConstructionError;

/// A classic CAN data frame.
///
/// Field order and widths match the kernel's `struct can_frame`. The id is
/// stored raw: bits 0-28 hold the identifier, bit 29 is the error flag, bit 30
/// the RTR flag and bit 31 the EFF flag. Nothing here validates `len`; a
/// decoded frame may claim more than 8 bytes and is carried as-is.
#[derive(Debug, Copy, Clone, Default)]
#[repr(C)]
pub struct Frame {
    /// 32 bit CAN_ID + EFF/RTR/ERR flags
    pub id: u32,
    /// data length. Bytes beyond are not valid
    pub len: u8,
    /// auxiliary flags
    pub flags: u8,
    /// reserved
    pub res0: u8,
    /// reserved
    pub res1: u8,
    /// buffer for data, always sent in full
    pub data: [u8; MAX_FRAME_DATA_LENGTH],
}

impl Frame {
    /// Build a frame from an identifier and payload.
    ///
    /// Identifiers above the 11 bit range get the EFF flag set.
    pub fn new(id: u32, data: &[u8], rtr: bool, err: bool) -> Result<Frame, ConstructionError> {
        let mut raw_id = id;

        if data.len() > MAX_FRAME_DATA_LENGTH {
            return Err(ConstructionError::TooMuchData);
        }

        if id > EFF_MASK {
            return Err(ConstructionError::IdTooLarge);
        }

        // set EFF_FLAG on large message
        if id > SFF_MASK {
            raw_id |= EFF_FLAG;
        }

        if rtr {
            raw_id |= RTR_FLAG;
        }

        if err {
            raw_id |= ERR_FLAG;
        }

        let mut full_data = [0; MAX_FRAME_DATA_LENGTH];
        full_data[..data.len()].copy_from_slice(data);

        Ok(Frame {
               id: raw_id,
               len: data.len() as u8,
               data: full_data,
               ..Frame::default()
           })
    }

    /// Return the actual CAN ID (without EFF/RTR/ERR flags)
    #[inline]
    pub fn can_id(&self) -> u32 {
        if self.is_extended() {
            self.id & EFF_MASK
        } else {
            self.id & SFF_MASK
        }
    }

    /// Check if frame uses 29 bit extended frame format
    #[inline]
    pub fn is_extended(&self) -> bool {
        self.id & EFF_FLAG != 0
    }

    /// Check if frame is an error message
    #[inline]
    pub fn is_error(&self) -> bool {
        self.id & ERR_FLAG != 0
    }

    /// Check if frame is a remote transmission request
    #[inline]
    pub fn is_rtr(&self) -> bool {
        self.id & RTR_FLAG != 0
    }

    /// The meaningful part of the data buffer.
    ///
    /// Never longer than 8 bytes, even if `len` claims more.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data[..self.data_len()]
    }

    #[inline]
    fn data_len(&self) -> usize {
        (self.len as usize).min(MAX_FRAME_DATA_LENGTH)
    }
}

/// Frames are equal when id, length and the first `len` data bytes match.
/// `flags`, `res0`, `res1` and unused data bytes are ignored.
impl PartialEq for Frame {
    fn eq(&self, other: &Frame) -> bool {
        self.id == other.id && self.len == other.len && self.data() == other.data()
    }
}

impl Eq for Frame {}

impl fmt::UpperHex for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{:X}#", self.can_id())?;

        let mut parts = self.data().iter().map(|v| format!("{:02X}", v));

        let sep = if f.alternate() { " " } else { "" };
        write!(f, "{}", parts.join(sep))
    }
}
