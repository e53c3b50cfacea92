use std::{fmt, io, mem};

use crate::constants::{CAN_RAW_FILTER_MAX, INV_FILTER, SFF_MASK};
use crate::errors::{Error, Result};

/// CanFilter
///
/// Contains an internal id and mask. Packets are considered to be matched by
/// a filter if `received_id & mask == filter_id & mask` holds true. If the id
/// carries `INV_FILTER`, the match is inverted.
///
/// Same memory layout as the kernel's `struct can_filter`.
#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(C)]
pub struct CanFilter {
    id: u32,
    mask: u32,
}

impl CanFilter {
    /// Construct a new CAN filter.
    pub const fn new(id: u32, mask: u32) -> CanFilter {
        CanFilter { id, mask }
    }

    /// Accept frames with this standard (11 bit) id.
    pub const fn pass(id: u32) -> CanFilter {
        CanFilter::new(id, SFF_MASK)
    }

    /// Reject frames with this standard (11 bit) id.
    pub const fn block(id: u32) -> CanFilter {
        CanFilter::new(id | INV_FILTER, SFF_MASK)
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn mask(&self) -> u32 {
        self.mask
    }

    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.id & INV_FILTER != 0
    }

    /// Whether the kernel would let a frame with `can_id` through this single
    /// filter.
    pub fn matches(&self, can_id: u32) -> bool {
        let filter_id = self.id & !INV_FILTER;
        let hit = can_id & self.mask == filter_id & self.mask;
        hit != self.is_inverted()
    }
}

impl fmt::Debug for CanFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanFilter({:#x}/{:#x}", self.id & !INV_FILTER, self.mask)?;
        if self.is_inverted() {
            write!(f, ", inverted")?;
        }
        write!(f, ")")
    }
}

/// Something kernel filters can be installed on.
///
/// Implemented by `KernelSocket` for real CAN sockets; other implementations
/// stand in for the kernel, e.g. in tests.
pub trait FilterTarget {
    /// Replace the installed filter set with `filters`. An empty slice removes
    /// all filters.
    fn set_filters(&self, filters: &[CanFilter]) -> io::Result<()>;

    /// Switch between OR-ing (`false`, the default) and AND-ing (`true`) the
    /// installed filters.
    fn set_join_filters(&self, enabled: bool) -> io::Result<()>;
}

impl<'a, T: FilterTarget + ?Sized> FilterTarget for &'a T {
    fn set_filters(&self, filters: &[CanFilter]) -> io::Result<()> {
        (**self).set_filters(filters)
    }

    fn set_join_filters(&self, enabled: bool) -> io::Result<()> {
        (**self).set_join_filters(enabled)
    }
}

/// Filter target of channels that can never have a kernel socket.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoSocket {}

impl FilterTarget for NoSocket {
    fn set_filters(&self, _: &[CanFilter]) -> io::Result<()> {
        match *self {}
    }

    fn set_join_filters(&self, _: bool) -> io::Result<()> {
        match *self {}
    }
}

/// The socket a frame channel can install filters on, if any.
///
/// Channels over ordinary byte streams have no kernel socket and stay
/// `Unconfigured`; every filter operation on them fails with
/// `Error::FilterUnsupported`.
#[derive(Debug)]
pub enum SocketHandle<T> {
    Unconfigured,
    Configured(T),
}

impl<T> Default for SocketHandle<T> {
    fn default() -> Self {
        SocketHandle::Unconfigured
    }
}

impl<T> SocketHandle<T> {
    #[inline]
    pub fn is_configured(&self) -> bool {
        match *self {
            SocketHandle::Configured(_) => true,
            SocketHandle::Unconfigured => false,
        }
    }

    /// Drop back to `Unconfigured`, returning the previous target.
    pub fn reset(&mut self) -> Option<T> {
        match mem::replace(self, SocketHandle::Unconfigured) {
            SocketHandle::Configured(target) => Some(target),
            SocketHandle::Unconfigured => None,
        }
    }
}

impl<T: FilterTarget> SocketHandle<T> {
    fn target(&self) -> Result<&T> {
        match *self {
            SocketHandle::Configured(ref target) => Ok(target),
            SocketHandle::Unconfigured => Err(Error::FilterUnsupported),
        }
    }

    /// Only let frames with one of `allowed_ids` through.
    ///
    /// Replaces whatever filters were installed before in a single call.
    pub fn set_pass_filter(&self, allowed_ids: &[u32]) -> Result<()> {
        let target = self.target()?;
        check_filter_count(allowed_ids.len())?;

        let filters: Vec<CanFilter> = allowed_ids.iter().map(|&id| CanFilter::pass(id)).collect();
        target.set_filters(&filters)?;
        log::debug!("installed pass filter for {} ids", filters.len());

        Ok(())
    }

    /// Drop frames with any of `disallowed_ids`.
    ///
    /// With more than one id the filters are joined afterwards, since inverted
    /// filters only reject correctly when a frame has to pass all of them. If
    /// joining fails, the filter set stays installed.
    pub fn set_block_filter(&self, disallowed_ids: &[u32]) -> Result<()> {
        let target = self.target()?;
        check_filter_count(disallowed_ids.len())?;

        let filters: Vec<CanFilter> =
            disallowed_ids.iter().map(|&id| CanFilter::block(id)).collect();
        target.set_filters(&filters)?;
        log::debug!("installed block filter for {} ids", filters.len());

        if filters.len() > 1 {
            // https://github.com/linux-can/can-utils/commit/1a2467ed29302149d4d1253888ac1f1dfcc11d3f
            target.set_join_filters(true)?;
            log::debug!("joined {} block filters", filters.len());
        }

        Ok(())
    }

    /// Remove all filters, receiving every frame again.
    pub fn delete_filter(&self) -> Result<()> {
        self.target()?.set_filters(&[])?;
        log::debug!("removed kernel filters");
        Ok(())
    }
}

// A list exactly at the kernel limit is rejected as well.
fn check_filter_count(requested: usize) -> Result<()> {
    if requested >= CAN_RAW_FILTER_MAX {
        return Err(Error::TooManyFilters {
            requested,
            max: CAN_RAW_FILTER_MAX,
        });
    }
    Ok(())
}
