// information from https://raw.githubusercontent.com/torvalds/linux/master/
//                  /include/uapi/linux/can.h and /include/uapi/linux/can/raw.h

/// Address family of the CAN subsystem.
pub const AF_CAN: libc::c_int = 29;
/// Protocol family of the CAN subsystem.
pub const PF_CAN: libc::c_int = AF_CAN;

// Protocol of the PF_CAN Family: raw sockets
pub const CAN_RAW: libc::c_int = 1;

pub const SOL_CAN_BASE: libc::c_int = 100;
pub const SOL_CAN_RAW: libc::c_int = SOL_CAN_BASE + CAN_RAW;
pub const CAN_RAW_FILTER: libc::c_int = 1;
pub const CAN_RAW_JOIN_FILTERS: libc::c_int = 6;

/// Number of filter slots the kernel accepts in a single `CAN_RAW_FILTER`
/// call.
pub const CAN_RAW_FILTER_MAX: usize = 512;

/// Special address description flags for the CAN_ID
///
/// EFF/SFF is set in the MSB
pub const EFF_FLAG: u32 = 0x80000000;
/// remote transmission request
pub const RTR_FLAG: u32 = 0x40000000;
/// error message frame
pub const ERR_FLAG: u32 = 0x20000000;

/// valid bits in CAN ID for frame formats
/// standard frame format (SFF)
pub const SFF_MASK: u32 = 0x000007ff;
/// extended frame format (EFF)
pub const EFF_MASK: u32 = 0x1fffffff;

/// Filter id bit that inverts the match, turning an accept rule into a reject
/// rule.
pub const INV_FILTER: u32 = 0x20000000;

/// Max payload of a classic CAN data frame (ISO 11898-1).
pub const MAX_FRAME_DATA_LENGTH: usize = 8;
/// Max payload of a CAN FD frame (ISO 11898-7). Only used for reference,
/// frames handled here carry the classic payload.
pub const MAX_EXT_FRAME_DATA_LENGTH: usize = 64;

/// Size of one frame on the wire, same as the kernel's `CAN_MTU`.
pub const FRAME_SIZE: usize = 16;
