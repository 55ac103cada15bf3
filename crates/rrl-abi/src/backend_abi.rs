//! Backend wiring from C: runtime registration and the static tier.
//!
//! A C hook table is copied by value when it is handed over; the caller
//! keeps ownership of the functions it points at and may free or reuse its
//! own table struct right after the call.

use std::ffi::c_int;

use rrl_core::error::{status_code, status_from_raw};
use rrl_core::stubs::{stub_get_stats, stub_load_policy, stub_poll};
use rrl_core::{
    BackendHooks, DefaultStubs, Handle, RrlError, StaticBackend, Stats, Status, global_dispatcher,
};

use crate::types::{
    RRL_BackendHooks, RRL_GetStatsFn, RRL_LoadPolicyFn, RRL_PollFn, RRL_SUCCESS, RRL_Stats,
    handle_to_c,
};

// ---------------------------------------------------------------------------
// C hook invocation
// ---------------------------------------------------------------------------

fn call_poll(f: RRL_PollFn, handle: Handle) -> Result<u32, RrlError> {
    // SAFETY: the registrant guarantees `f` is callable with handles the
    // closed core produced.
    let rc = unsafe { f(handle_to_c(handle)) };
    match u32::try_from(rc) {
        Ok(ready) => Ok(ready),
        Err(_) => Err(RrlError::from_status(rc).unwrap_or(RrlError::Status(rc))),
    }
}

fn call_get_stats(f: RRL_GetStatsFn, handle: Handle, out: &mut Stats) -> Status {
    let mut raw = RRL_Stats::from(*out);
    // SAFETY: `raw` is a live, exclusively borrowed RRL_Stats for the call.
    let rc = unsafe { f(handle_to_c(handle), &mut raw) };
    *out = Stats::from(raw);
    status_from_raw(rc)
}

fn call_load_policy(f: RRL_LoadPolicyFn, handle: Handle, policy: &[u8]) -> Status {
    // SAFETY: `policy` is valid for `policy.len()` bytes for the call.
    let rc = unsafe { f(handle_to_c(handle), policy.as_ptr().cast(), policy.len()) };
    status_from_raw(rc)
}

/// Lift a C table into a runtime hook table. Null entries stay absent.
#[must_use]
pub fn backend_from_c(table: RRL_BackendHooks) -> BackendHooks {
    let mut hooks = BackendHooks::new();
    if let Some(f) = table.poll {
        hooks = hooks.with_poll(move |h| call_poll(f, h));
    }
    if let Some(f) = table.get_stats {
        hooks = hooks.with_get_stats(move |h, out| call_get_stats(f, h, out));
    }
    if let Some(f) = table.load_policy {
        hooks = hooks.with_load_policy(move |h, policy| call_load_policy(f, h, policy));
    }
    hooks
}

/// A C table installed as the static tier; null entries keep stub behavior.
#[derive(Debug, Clone, Copy)]
pub struct CStaticHooks(pub RRL_BackendHooks);

impl StaticBackend for CStaticHooks {
    fn poll(&self, handle: Handle) -> Result<u32, RrlError> {
        match self.0.poll {
            Some(f) => call_poll(f, handle),
            None => stub_poll(handle),
        }
    }

    fn get_stats(&self, handle: Handle, out: &mut Stats) -> Status {
        match self.0.get_stats {
            Some(f) => call_get_stats(f, handle, out),
            None => stub_get_stats(handle, out),
        }
    }

    fn load_policy(&self, handle: Handle, policy: &[u8]) -> Status {
        match self.0.load_policy {
            Some(f) => call_load_policy(f, handle, policy),
            None => stub_load_policy(handle, policy),
        }
    }

    fn name(&self) -> &'static str {
        "c-static-hooks"
    }
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

abi_fn! {
    /// Install a runtime hook table, replacing any previous one wholesale.
    /// Pass null to restore the static tier. Always returns `RRL_SUCCESS`.
    fn rrl_register_backend(hooks: *const RRL_BackendHooks) -> c_int {
        // SAFETY: the caller passes null or a readable RRL_BackendHooks.
        let table = unsafe { hooks.as_ref() }.map(|t| backend_from_c(*t));
        global_dispatcher().register_backend(table);
        RRL_SUCCESS
    }
}

abi_fn! {
    /// Install the static (link-time) tier for this process.
    ///
    /// Must run before the first poll/get_stats/load_policy call; later
    /// calls return `RRL_ERR_ALREADY_BOUND`. Null installs the stubs.
    fn rrl_set_static_hooks(hooks: *const RRL_BackendHooks) -> c_int {
        // SAFETY: the caller passes null or a readable RRL_BackendHooks.
        let backend: Box<dyn StaticBackend> = match unsafe { hooks.as_ref() } {
            Some(table) => Box::new(CStaticHooks(*table)),
            None => Box::new(DefaultStubs),
        };
        status_code(&global_dispatcher().install_static_backend(backend))
    }
}
