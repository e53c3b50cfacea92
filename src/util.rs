use std::os::unix::io::RawFd;
use std::{io, mem, ptr};

/// `setsockopt` wrapper
///
/// Sets a single typed option value on `fd`, e.g. the `c_int` flag behind
/// `CAN_RAW_JOIN_FILTERS`. Pass the exact C type the option expects
/// (`c_int`, not whatever integer happens to be at hand).
///
/// A proper `std::io::Error` will be returned on failure.
pub fn set_socket_option<T>(fd: RawFd,
                            level: libc::c_int,
                            name: libc::c_int,
                            val: &T) -> io::Result<()> {
    let r = unsafe {
        libc::setsockopt(fd,
                         level,
                         name,
                         val as *const T as *const libc::c_void,
                         mem::size_of::<T>() as libc::socklen_t)
    };

    if r != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

/// `setsockopt` wrapper for options taking an array, such as
/// `CAN_RAW_FILTER`.
///
/// An empty slice is passed to the kernel as a null pointer with zero length,
/// which for `CAN_RAW_FILTER` removes every filter.
pub fn set_socket_option_mult<T>(fd: RawFd,
                                 level: libc::c_int,
                                 name: libc::c_int,
                                 values: &[T])
                                 -> io::Result<()> {
    let (val_ptr, val_len) = if values.is_empty() {
        // can't pass in a pointer to the first element of a 0-length slice
        (ptr::null(), 0)
    } else {
        (values.as_ptr() as *const libc::c_void, mem::size_of_val(values))
    };

    let r = unsafe { libc::setsockopt(fd, level, name, val_ptr, val_len as libc::socklen_t) };

    if r != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}
