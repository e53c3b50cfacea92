use std::io::{self, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use crate::constants::FRAME_SIZE;
use crate::errors::Result;
use crate::filter::{FilterTarget, NoSocket, SocketHandle};
use crate::frame::Frame;

#[cfg(target_os = "linux")]
use crate::socket::{CanSocket, KernelSocket};

/// Explicit release of a byte transport, reporting failures that dropping it
/// would swallow.
pub trait Close {
    fn close(&mut self) -> io::Result<()>;
}

/// Frame-level reading on top of a byte stream.
pub trait FrameRead {
    /// Read and decode the next frame.
    fn read_frame(&mut self) -> Result<Frame>;
}

/// Frame-level writing on top of a byte stream.
pub trait FrameWrite {
    /// Encode and write `frame`, taking at least `min_duration` in total.
    fn write_frame(&mut self, frame: &Frame, min_duration: Duration) -> Result<()>;
}

/// A frame channel on a live CAN socket, with kernel filter support.
#[cfg(target_os = "linux")]
pub type CanChannel = FrameChannel<CanSocket, KernelSocket>;

/// Reads and writes `Frame`s over a duplex byte transport.
///
/// The transport sees exactly one 16 byte record per frame. If the channel
/// sits on a CAN socket, kernel filters can be installed through it as well;
/// on any other transport the filter calls fail with
/// `Error::FilterUnsupported`.
///
/// There is no internal locking. Callers sharing a channel must serialize
/// access themselves.
#[derive(Debug)]
pub struct FrameChannel<T, S> {
    transport: Option<T>,
    socket: SocketHandle<S>,
}

impl<T: Read + Write + Close> FrameChannel<T, NoSocket> {
    /// Wrap a plain byte transport. Filters are not supported.
    pub fn new(transport: T) -> Self {
        FrameChannel {
            transport: Some(transport),
            socket: SocketHandle::Unconfigured,
        }
    }
}

#[cfg(target_os = "linux")]
impl FrameChannel<CanSocket, KernelSocket> {
    /// Open a channel on the named CAN interface.
    pub fn open(ifname: &str) -> io::Result<CanChannel> {
        CanSocket::open(ifname).map(Self::from_socket)
    }

    /// Open a channel on a CAN interface by kernel interface number.
    pub fn open_if(if_index: std::os::raw::c_uint) -> io::Result<CanChannel> {
        CanSocket::open_if(if_index).map(Self::from_socket)
    }

    /// Wrap an already open CAN socket.
    pub fn from_socket(socket: CanSocket) -> CanChannel {
        let kernel = socket.kernel_socket();
        FrameChannel::with_filter_target(socket, kernel)
    }
}

impl<T, S> FrameChannel<T, S> {
    pub fn socket(&self) -> &SocketHandle<S> {
        &self.socket
    }

    /// The wrapped transport, or `None` once closed.
    pub fn get_ref(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_none()
    }

    fn transport(&mut self) -> io::Result<&mut T> {
        self.transport
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "frame channel is closed"))
    }
}

impl<T: Read + Write + Close, S: FilterTarget> FrameChannel<T, S> {
    /// Wrap a byte transport whose filters are installed through `target`.
    pub fn with_filter_target(transport: T, target: S) -> Self {
        FrameChannel {
            transport: Some(transport),
            socket: SocketHandle::Configured(target),
        }
    }

    /// Read one frame.
    ///
    /// Issues a single `read` of up to 16 bytes. A short read is not retried
    /// and fails to decode.
    pub fn read_frame(&mut self) -> Result<Frame> {
        let mut buf = [0u8; FRAME_SIZE];
        let n = self.transport()?.read(&mut buf)?;

        let frame = Frame::decode(&buf[..n])?;
        log::trace!("read frame {:X}", frame);

        Ok(frame)
    }

    /// Write one frame, then wait until at least `min_duration` has passed
    /// since the call began.
    ///
    /// Spaces consecutive frames on the bus no matter how fast the transport
    /// accepts them. A zero `min_duration` disables pacing. Errors return
    /// right away without waiting.
    pub fn write_frame(&mut self, frame: &Frame, min_duration: Duration) -> Result<()> {
        let start = Instant::now();

        let buf = frame.encode()?;
        self.transport()?.write_all(&buf)?;
        log::trace!("wrote frame {:X}", frame);

        let elapsed = start.elapsed();
        if elapsed < min_duration {
            let pause = min_duration - elapsed;
            log::trace!("pacing write for {:?}", pause);
            thread::sleep(pause);
        }

        Ok(())
    }

    /// See `SocketHandle::set_pass_filter`.
    pub fn set_pass_filter(&self, allowed_ids: &[u32]) -> Result<()> {
        self.socket.set_pass_filter(allowed_ids)
    }

    /// See `SocketHandle::set_block_filter`.
    pub fn set_block_filter(&self, disallowed_ids: &[u32]) -> Result<()> {
        self.socket.set_block_filter(disallowed_ids)
    }

    /// See `SocketHandle::delete_filter`.
    pub fn delete_filter(&self) -> Result<()> {
        self.socket.delete_filter()
    }

    /// Flush and close the transport and forget the kernel socket.
    ///
    /// The channel counts as closed even if flushing or closing the transport
    /// fails; the first such error is returned. Closing twice is a no-op.
    /// Afterwards reads and writes fail with `NotConnected` and filter calls
    /// with `FilterUnsupported`.
    pub fn close(&mut self) -> io::Result<()> {
        self.socket.reset();

        match self.transport.take() {
            Some(mut transport) => {
                let flushed = transport.flush();
                let closed = transport.close();
                log::debug!("closed frame channel");
                flushed.and(closed)
            }
            None => Ok(()),
        }
    }
}

impl<T: Read + Write + Close, S: FilterTarget> FrameRead for FrameChannel<T, S> {
    fn read_frame(&mut self) -> Result<Frame> {
        FrameChannel::read_frame(self)
    }
}

impl<T: Read + Write + Close, S: FilterTarget> FrameWrite for FrameChannel<T, S> {
    fn write_frame(&mut self, frame: &Frame, min_duration: Duration) -> Result<()> {
        FrameChannel::write_frame(self, frame, min_duration)
    }
}

impl<T: Read, S> Read for FrameChannel<T, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.transport()?.read(buf)
    }
}

impl<T: Write, S> Write for FrameChannel<T, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.transport()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.transport()?.flush()
    }
}
