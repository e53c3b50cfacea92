use std::io;
use std::mem::{self, size_of};
use std::os::raw::{c_int, c_short, c_uint};
use std::os::unix::io::{AsRawFd, RawFd};

use nix::net::if_::if_nametoindex;

use crate::channel::Close;
use crate::constants::*;
use crate::filter::{CanFilter, FilterTarget};
use crate::util::{set_socket_option, set_socket_option_mult};

/// `struct sockaddr_can`, with the address union as the two raw ids.
#[derive(Debug)]
#[repr(C)]
struct CanAddr {
    _af_can: c_short,
    if_index: c_int,
    rx_id: u32,
    tx_id: u32,
}

/// A raw CAN socket bound to one interface.
///
/// Reads and writes move whole 16 byte frame records. The descriptor is
/// closed on drop.
#[derive(Debug)]
pub struct CanSocket {
    fd: RawFd,
}

impl CanSocket {
    /// Open a named CAN device, such as "vcan0" or "can0".
    pub fn open(ifname: &str) -> io::Result<CanSocket> {
        let if_index = if_nametoindex(ifname).map_err(io::Error::from)?;
        CanSocket::open_if(if_index)
    }

    /// Open a CAN device by kernel interface number.
    pub fn open_if(if_index: c_uint) -> io::Result<CanSocket> {
        let addr = CanAddr {
            _af_can: AF_CAN as c_short,
            if_index: if_index as c_int,
            rx_id: 0,
            tx_id: 0,
        };

        let fd = unsafe { libc::socket(PF_CAN, libc::SOCK_RAW, CAN_RAW) };
        if fd == -1 {
            return Err(io::Error::last_os_error());
        }

        let bind_rv = unsafe {
            libc::bind(fd,
                       &addr as *const CanAddr as *const libc::sockaddr,
                       size_of::<CanAddr>() as libc::socklen_t)
        };

        if bind_rv == -1 {
            let e = io::Error::last_os_error();
            unsafe {
                libc::close(fd);
            }
            return Err(e);
        }

        log::debug!("opened CAN socket fd {} on interface {}", fd, if_index);
        Ok(CanSocket { fd })
    }

    /// Close the descriptor, reporting a failed `close(2)`.
    ///
    /// The descriptor is released either way; later calls are no-ops.
    pub fn close(&mut self) -> io::Result<()> {
        if self.fd < 0 {
            return Ok(());
        }

        let fd = mem::replace(&mut self.fd, -1);
        if unsafe { libc::close(fd) } == -1 {
            return Err(io::Error::last_os_error());
        }

        log::debug!("closed CAN socket fd {}", fd);
        Ok(())
    }

    /// Filter handle for this socket. Only valid while the socket is open.
    #[inline]
    pub fn kernel_socket(&self) -> KernelSocket {
        KernelSocket(self.fd)
    }
}

impl io::Read for CanSocket {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe { libc::read(self.fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(n as usize)
    }
}

impl io::Write for CanSocket {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = unsafe { libc::write(self.fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(n as usize)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AsRawFd for CanSocket {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl Close for CanSocket {
    fn close(&mut self) -> io::Result<()> {
        CanSocket::close(self)
    }
}

impl Drop for CanSocket {
    fn drop(&mut self) {
        self.close().ok(); // ignore result
    }
}

/// Raw descriptor of an open CAN socket, used to install kernel filters.
///
/// Does not own the descriptor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KernelSocket(pub RawFd);

impl FilterTarget for KernelSocket {
    fn set_filters(&self, filters: &[CanFilter]) -> io::Result<()> {
        set_socket_option_mult(self.0, SOL_CAN_RAW, CAN_RAW_FILTER, filters)
    }

    fn set_join_filters(&self, enabled: bool) -> io::Result<()> {
        let join_filters: c_int = if enabled { 1 } else { 0 };
        set_socket_option(self.0, SOL_CAN_RAW, CAN_RAW_JOIN_FILTERS, &join_filters)
    }
}
