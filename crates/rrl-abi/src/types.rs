//! C-layout types of the published header.
//!
//! Layouts are frozen once published. Fields are only ever appended to new
//! types, never to these.

#![allow(non_camel_case_types)]

use std::ffi::{c_int, c_ulong, c_void};

use rrl_core::{ErrorCode, Handle, Stats};

pub const RRL_SUCCESS: c_int = ErrorCode::Success.raw();
pub const RRL_ERR_INVALID_HANDLE: c_int = ErrorCode::InvalidHandle.raw();
pub const RRL_ERR_INVALID_ARGUMENT: c_int = ErrorCode::InvalidArgument.raw();
pub const RRL_ERR_UNSUPPORTED: c_int = ErrorCode::Unsupported.raw();
pub const RRL_ERR_NO_BACKEND: c_int = ErrorCode::NoBackend.raw();
pub const RRL_ERR_ALREADY_BOUND: c_int = ErrorCode::AlreadyBound.raw();

/// Opaque simulation instance, defined inside the closed core.
#[repr(C)]
pub struct RRLHandleImpl {
    _private: [u8; 0],
}

pub type RRLHandle = *mut RRLHandleImpl;

/// Space descriptor: identical layout to the core value type.
pub type RRL_SpaceDesc = rrl_core::SpaceDesc;

/// Stats snapshot as laid out in C (`unsigned long` step counter).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RRL_Stats {
    pub fps: f64,
    pub latency_ms: f64,
    pub steps: c_ulong,
}

impl From<RRL_Stats> for Stats {
    fn from(raw: RRL_Stats) -> Self {
        Self {
            fps: raw.fps,
            latency_ms: raw.latency_ms,
            steps: u64::from(raw.steps),
        }
    }
}

impl From<Stats> for RRL_Stats {
    fn from(stats: Stats) -> Self {
        Self {
            fps: stats.fps,
            latency_ms: stats.latency_ms,
            // c_ulong is 32-bit on some targets.
            steps: c_ulong::try_from(stats.steps).unwrap_or(c_ulong::MAX),
        }
    }
}

pub type RRL_PollFn = unsafe extern "C" fn(RRLHandle) -> c_int;
pub type RRL_GetStatsFn = unsafe extern "C" fn(RRLHandle, *mut RRL_Stats) -> c_int;
pub type RRL_LoadPolicyFn = unsafe extern "C" fn(RRLHandle, *const c_void, usize) -> c_int;

/// Backend function table. Null entries fall through to the static tier.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RRL_BackendHooks {
    pub poll: Option<RRL_PollFn>,
    pub get_stats: Option<RRL_GetStatsFn>,
    pub load_policy: Option<RRL_LoadPolicyFn>,
}

/// Convert a C handle; the null handle maps to `None`.
#[must_use]
pub fn handle_from_c(handle: RRLHandle) -> Option<Handle> {
    Handle::from_addr(handle.expose_provenance())
}

/// Convert back to the pointer the closed core handed out.
#[must_use]
pub fn handle_to_c(handle: Handle) -> RRLHandle {
    std::ptr::with_exposed_provenance_mut(handle.addr())
}

#[cfg(test)]
mod tests {
    use std::mem::{align_of, offset_of, size_of};

    use super::*;

    #[test]
    fn stats_layout_matches_header() {
        assert_eq!(offset_of!(RRL_Stats, fps), 0);
        assert_eq!(offset_of!(RRL_Stats, latency_ms), 8);
        assert_eq!(offset_of!(RRL_Stats, steps), 16);
        assert_eq!(align_of::<RRL_Stats>(), 8);
    }

    #[test]
    fn space_desc_layout_matches_header() {
        assert_eq!(offset_of!(RRL_SpaceDesc, shape), 0);
        assert_eq!(offset_of!(RRL_SpaceDesc, ndim), 32);
        assert_eq!(offset_of!(RRL_SpaceDesc, dtype), 36);
        assert_eq!(size_of::<RRL_SpaceDesc>(), 40);
    }

    #[test]
    fn hooks_table_is_three_nullable_pointers() {
        assert_eq!(size_of::<RRL_BackendHooks>(), 3 * size_of::<usize>());
        let empty = RRL_BackendHooks::default();
        assert!(empty.poll.is_none() && empty.get_stats.is_none() && empty.load_policy.is_none());
    }

    #[test]
    fn error_constants_match_header() {
        assert_eq!(RRL_SUCCESS, 0);
        assert_eq!(RRL_ERR_INVALID_HANDLE, -1);
        assert_eq!(RRL_ERR_INVALID_ARGUMENT, -2);
        assert_eq!(RRL_ERR_UNSUPPORTED, -3);
        assert_eq!(RRL_ERR_NO_BACKEND, -4);
        assert_eq!(RRL_ERR_ALREADY_BOUND, -5);
    }

    #[test]
    fn stats_convert_both_ways() {
        let raw = RRL_Stats {
            fps: 59.5,
            latency_ms: 0.25,
            steps: 1234,
        };
        let core = Stats::from(raw);
        assert_eq!(core.steps, 1234);
        assert_eq!(RRL_Stats::from(core), raw);
    }

    #[test]
    fn handle_conversion() {
        assert!(handle_from_c(std::ptr::null_mut()).is_none());
        let mut slot = 0_u8;
        let ptr: RRLHandle = (&raw mut slot).cast();
        let handle = handle_from_c(ptr).expect("non-null");
        assert_eq!(handle_to_c(handle), ptr);
    }
}
