// All extern "C" exports accept raw pointers from C callers; null checks are
// done at entry, so per-function safety docs would be redundant boilerplate.
#![allow(clippy::missing_safety_doc)]
//! # rrl-abi
//!
//! Stable `extern "C"` boundary of the RemoteRL Sim-SDK.
//!
//! This crate produces a `cdylib` exposing the published `rrl_*` symbols.
//! Each export converts raw pointers into safe views and delegates to the
//! process-wide dispatcher in `rrl-core`.
//!
//! # Architecture
//!
//! ```text
//! C caller -> ABI entry (this crate) -> Dispatcher -> runtime hook | static tier -> return
//!                                            \-> error-state store
//! ```
//!
//! The export list is pinned by `version_scripts/rrl_env.map`; symbols and
//! struct layouts are only ever added, never changed.

#[macro_use]
mod macros;

pub mod backend_abi;
pub mod env_abi;
pub mod error_abi;
pub mod types;

pub use types::{
    RRL_BackendHooks, RRL_ERR_ALREADY_BOUND, RRL_ERR_INVALID_ARGUMENT, RRL_ERR_INVALID_HANDLE,
    RRL_ERR_NO_BACKEND, RRL_ERR_UNSUPPORTED, RRL_SUCCESS, RRL_SpaceDesc, RRL_Stats, RRLHandle,
    RRLHandleImpl,
};
