//! Entry-point dispatcher.
//!
//! Per call: validate arguments, resolve the implementation, invoke it with
//! no lock held, record any failure in the error store, return the status.
//!
//! Resolution order, highest priority first:
//! 1. the matching hook of the registered runtime table, if present;
//! 2. the static backend, fixed once per process (the default stubs unless
//!    an integrator installed one before first use).
//!
//! Argument validation always runs first, so a null handle or empty policy
//! never reaches any backend regardless of which tier is active.

use std::sync::OnceLock;

use crate::error::{RrlError, Status};
use crate::error_state::{ErrorSnapshot, ErrorStore};
use crate::registry::{BackendHooks, BackendRegistry};
use crate::structured_log::{self, LogEntry, LogLevel};
use crate::stubs::{DefaultStubs, StaticBackend};
use crate::types::{Handle, Stats};

pub const SYM_POLL: &str = "rrl_poll";
pub const SYM_GET_STATS: &str = "rrl_get_stats";
pub const SYM_LOAD_POLICY: &str = "rrl_load_policy";
pub const SYM_REGISTER_BACKEND: &str = "rrl_register_backend";
pub const SYM_SET_STATIC_HOOKS: &str = "rrl_set_static_hooks";

/// Tier that served a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookSource {
    /// Hook from the registered runtime table.
    Runtime,
    /// Static backend (default stubs or an installed override).
    Static,
}

impl HookSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Runtime => "runtime",
            Self::Static => "static",
        }
    }
}

/// Error store, runtime registry and static tier for one boundary instance.
///
/// The C surface uses the process-wide [`global_dispatcher`]; tests and
/// embedders may build independent instances.
pub struct Dispatcher {
    errors: ErrorStore,
    registry: BackendRegistry,
    static_backend: OnceLock<Box<dyn StaticBackend>>,
}

static GLOBAL_DISPATCHER: Dispatcher = Dispatcher::new();

/// The process-wide dispatcher behind the exported entry points.
#[must_use]
pub fn global_dispatcher() -> &'static Dispatcher {
    &GLOBAL_DISPATCHER
}

impl Dispatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: ErrorStore::new(),
            registry: BackendRegistry::new(),
            static_backend: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorStore {
        &self.errors
    }

    #[must_use]
    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    // -----------------------------------------------------------------------
    // Backend wiring
    // -----------------------------------------------------------------------

    /// Replace the runtime table wholesale; `None` clears it. Never fails.
    pub fn register_backend(&self, hooks: Option<BackendHooks>) {
        let present = hooks
            .as_ref()
            .map(|h| (h.poll.is_some(), h.get_stats.is_some(), h.load_policy.is_some()));
        self.registry.register(hooks);
        structured_log::emit_with(LogLevel::Info, || {
            let details = match present {
                Some((poll, get_stats, load_policy)) => serde_json::json!({
                    "generation": self.registry.generation(),
                    "poll": poll,
                    "get_stats": get_stats,
                    "load_policy": load_policy,
                }),
                None => serde_json::json!({
                    "generation": self.registry.generation(),
                    "cleared": true,
                }),
            };
            LogEntry::new(LogLevel::Info, "backend_registered")
                .with_symbol(SYM_REGISTER_BACKEND)
                .with_details(details)
        });
    }

    /// Install the static tier. Only possible before the first dispatch
    /// resolves it; afterwards returns [`RrlError::AlreadyBound`].
    pub fn install_static_backend(&self, backend: Box<dyn StaticBackend>) -> Status {
        let name = backend.name();
        match self.static_backend.set(backend) {
            Ok(()) => {
                structured_log::emit_with(LogLevel::Info, || {
                    LogEntry::new(LogLevel::Info, "static_backend_installed")
                        .with_symbol(SYM_SET_STATIC_HOOKS)
                        .with_details(serde_json::json!({ "backend": name }))
                });
                Ok(())
            }
            Err(_) => {
                let err = RrlError::AlreadyBound;
                self.fail(
                    SYM_SET_STATIC_HOOKS,
                    None,
                    err,
                    "static backend already resolved",
                );
                Err(err)
            }
        }
    }

    /// Static tier in effect; resolves it to the default stubs on first use.
    pub fn static_backend(&self) -> &dyn StaticBackend {
        self.static_backend
            .get_or_init(|| Box::new(DefaultStubs))
            .as_ref()
    }

    // -----------------------------------------------------------------------
    // Entry points
    // -----------------------------------------------------------------------

    /// Whether a new observation/result is ready.
    ///
    /// Always a flag, never an error channel: a null handle or a failing
    /// backend records the failure and yields `0`. Other values from the
    /// backend pass through unchanged.
    pub fn poll(&self, handle: Option<Handle>) -> u32 {
        let Some(handle) = handle else {
            self.fail(SYM_POLL, None, RrlError::InvalidHandle, "null handle");
            return 0;
        };

        let (source, result) = match self.registry.poll_hook() {
            Some(hook) => (HookSource::Runtime, hook(handle)),
            None => (HookSource::Static, self.static_backend().poll(handle)),
        };

        match result {
            Ok(ready) => {
                trace_ok(SYM_POLL, source);
                ready
            }
            Err(err) if err.code() == 0 => {
                trace_ok(SYM_POLL, source);
                0
            }
            Err(err) => {
                self.fail_backend(SYM_POLL, source, err);
                0
            }
        }
    }

    /// Fill `out` with a performance snapshot.
    ///
    /// A null handle yields [`RrlError::InvalidHandle`], a missing output
    /// [`RrlError::InvalidArgument`]; `out` is untouched in both cases.
    /// Otherwise the backend fills a copy of `out` which is written back as
    /// one value, and the backend status is returned verbatim.
    pub fn get_stats(&self, handle: Option<Handle>, out: Option<&mut Stats>) -> Status {
        let Some(handle) = handle else {
            return self.reject(SYM_GET_STATS, RrlError::InvalidHandle, "null handle");
        };
        let Some(out) = out else {
            return self.reject(SYM_GET_STATS, RrlError::InvalidArgument, "null output");
        };

        let mut snapshot = *out;
        let (source, result) = match self.registry.stats_hook() {
            Some(hook) => (HookSource::Runtime, hook(handle, &mut snapshot)),
            None => (
                HookSource::Static,
                self.static_backend().get_stats(handle, &mut snapshot),
            ),
        };
        *out = snapshot;

        self.finish(SYM_GET_STATS, source, result)
    }

    /// Hand a serialized policy to the backend.
    ///
    /// A null handle yields [`RrlError::InvalidHandle`]; a missing or empty
    /// blob yields [`RrlError::InvalidArgument`] before any backend is
    /// consulted. Backend status is returned verbatim.
    pub fn load_policy(&self, handle: Option<Handle>, policy: Option<&[u8]>) -> Status {
        let Some(handle) = handle else {
            return self.reject(SYM_LOAD_POLICY, RrlError::InvalidHandle, "null handle");
        };
        let policy = match policy {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                return self.reject(
                    SYM_LOAD_POLICY,
                    RrlError::InvalidArgument,
                    "empty policy blob",
                );
            }
        };

        let (source, result) = match self.registry.load_policy_hook() {
            Some(hook) => (HookSource::Runtime, hook(handle, policy)),
            None => (
                HookSource::Static,
                self.static_backend().load_policy(handle, policy),
            ),
        };

        self.finish(SYM_LOAD_POLICY, source, result)
    }

    /// Last recorded error code (`0` if nothing has failed).
    #[must_use]
    pub fn last_error(&self) -> i32 {
        self.errors.code()
    }

    /// Last recorded error message (empty if nothing has failed).
    #[must_use]
    pub fn last_error_msg(&self) -> String {
        self.errors.message()
    }

    /// Code and message read together.
    #[must_use]
    pub fn last_error_snapshot(&self) -> ErrorSnapshot {
        self.errors.snapshot()
    }

    // -----------------------------------------------------------------------
    // Outcome recording
    // -----------------------------------------------------------------------

    /// A backend `Err` carrying raw status 0 reads as success.
    fn finish(&self, symbol: &'static str, source: HookSource, result: Status) -> Status {
        match result {
            Err(err) if err.code() != 0 => {
                self.fail_backend(symbol, source, err);
                Err(err)
            }
            _ => {
                trace_ok(symbol, source);
                Ok(())
            }
        }
    }

    fn reject(&self, symbol: &'static str, err: RrlError, reason: &str) -> Status {
        self.fail(symbol, None, err, reason);
        Err(err)
    }

    fn fail_backend(&self, symbol: &'static str, source: HookSource, err: RrlError) {
        self.fail(symbol, Some(source), err, &format!("backend error ({err})"));
    }

    fn fail(&self, symbol: &'static str, source: Option<HookSource>, err: RrlError, reason: &str) {
        let message = format!("{symbol}: {reason}");
        self.errors.record(err.code(), &message);
        structured_log::emit_with(LogLevel::Warn, || {
            let entry = LogEntry::new(LogLevel::Warn, "call_failed")
                .with_symbol(symbol)
                .with_code(err.code())
                .with_message(message);
            match source {
                Some(source) => entry.with_source(source.as_str()),
                None => entry,
            }
        });
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn trace_ok(symbol: &'static str, source: HookSource) {
    structured_log::emit_with(LogLevel::Trace, || {
        LogEntry::new(LogLevel::Trace, "call_ok")
            .with_symbol(symbol)
            .with_source(source.as_str())
    });
}
