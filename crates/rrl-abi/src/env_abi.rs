//! Overridable simulation entry points: poll, get_stats, load_policy.
//!
//! Pointer arguments are checked here only far enough to build safe views;
//! all validation semantics (which code, which message) live in the core
//! dispatcher. Nothing unwinds across this boundary.

use std::ffi::{c_int, c_void};

use rrl_core::error::status_code;
use rrl_core::{Stats, global_dispatcher};

use crate::types::{RRL_Stats, RRLHandle, handle_from_c};

abi_fn! {
    /// Returns 1 when a new observation/result is ready, 0 otherwise.
    ///
    /// Never negative: failures (including a null handle) return 0 and are
    /// reported through `rrl_last_error`.
    fn rrl_poll(handle: RRLHandle) -> c_int {
        let ready = global_dispatcher().poll(handle_from_c(handle));
        c_int::try_from(ready).unwrap_or(c_int::MAX)
    }
}

abi_fn! {
    /// Copy the current stats snapshot into `out_stats`.
    ///
    /// `out_stats` is not written when `handle` or `out_stats` is null.
    fn rrl_get_stats(handle: RRLHandle, out_stats: *mut RRL_Stats) -> c_int {
        let dispatcher = global_dispatcher();
        let handle = handle_from_c(handle);
        // SAFETY: the caller passes null or a valid, writable RRL_Stats.
        let status = match unsafe { out_stats.as_mut() } {
            None => dispatcher.get_stats(handle, None),
            Some(raw) => {
                let mut stats = Stats::from(*raw);
                let status = dispatcher.get_stats(handle, Some(&mut stats));
                if handle.is_some() {
                    *raw = RRL_Stats::from(stats);
                }
                status
            }
        };
        status_code(&status)
    }
}

abi_fn! {
    /// Hand `len` bytes of serialized policy to the backend.
    ///
    /// Null `bytes` or zero `len` is rejected with `RRL_ERR_INVALID_ARGUMENT`
    /// before any backend runs.
    fn rrl_load_policy(handle: RRLHandle, bytes: *const c_void, len: usize) -> c_int {
        let policy = if bytes.is_null() || len == 0 {
            None
        } else {
            // SAFETY: the caller guarantees `bytes` is readable for `len` bytes.
            Some(unsafe { std::slice::from_raw_parts(bytes.cast::<u8>(), len) })
        };
        status_code(&global_dispatcher().load_policy(handle_from_c(handle), policy))
    }
}
