//! Typed CAN frames over byte transports, with SocketCAN filter control.
//!
//! The Linux kernel supports using CAN-devices through a network-like API
//! (see https://www.kernel.org/doc/Documentation/networking/can.txt). A raw
//! CAN socket delivers and accepts one fixed 16 byte record per frame. This
//! crate encodes and decodes those records, moves them over any duplex byte
//! transport and manages the kernel-side receive filters of a CAN socket.
//!
//! # Frames
//!
//! A `Frame` carries a 32 bit id (identifier plus EFF/RTR/ERR flag bits), a
//! length, three auxiliary bytes and an 8 byte data buffer. `codec` maps it
//! to and from the wire record, preserving every byte, including reserved
//! fields and data bytes past the length.
//!
//! # Channels
//!
//! `FrameChannel` wraps a `Read + Write` transport. `read_frame` decodes one
//! record per read; `write_frame` encodes one record and can enforce a
//! minimum time per write, which spaces frames on the bus. On Linux,
//! `FrameChannel::open("vcan0")` opens a raw CAN socket.
//!
//! # Kernel filters
//!
//! Channels on a CAN socket can install a pass filter (only the given ids are
//! delivered), a block filter (the given ids are dropped) or remove filters
//! again. Each call replaces the whole filter set. Channels over other
//! transports report `Error::FilterUnsupported`.
//!
//! # RawFd
//!
//! Raw access to the underlying file descriptor of a `CanSocket` is available
//! through its `AsRawFd` implementation.

pub extern crate libc;
pub extern crate log;

pub mod codec;
pub mod constants;
mod channel;
mod errors;
mod filter;
mod frame;

#[cfg(target_os = "linux")]
mod socket;
#[cfg(target_os = "linux")]
mod util;

pub use crate::channel::{Close, FrameChannel, FrameRead, FrameWrite};
pub use crate::codec::Field;
pub use crate::errors::{ConstructionError, DecodingError, EncodingError, Error, Result};
pub use crate::filter::{CanFilter, FilterTarget, NoSocket, SocketHandle};
pub use crate::frame::Frame;

#[cfg(target_os = "linux")]
pub use crate::channel::CanChannel;
#[cfg(target_os = "linux")]
pub use crate::socket::{CanSocket, KernelSocket};
