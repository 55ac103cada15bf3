//! # rrl-core
//!
//! Safe Rust side of the RemoteRL Sim-SDK boundary layer.
//!
//! The closed simulation core is driven through five overridable entry points
//! (poll, get_stats, load_policy, last_error, last_error_msg). Each call is
//! resolved against three tiers of behavior:
//!
//! ```text
//! caller -> Dispatcher (validate) -> runtime hook table  (registered, hot-swappable)
//!                                 -> static backend      (installed once per process)
//!                                 -> default stubs       (compiled in)
//!        <- status code           <- outcome recorded in the error-state store
//! ```
//!
//! The `extern "C"` surface lives in `rrl-abi`; this crate holds no unsafe code.

#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod error_state;
pub mod registry;
pub mod structured_log;
pub mod stubs;
pub mod types;

pub use dispatch::{Dispatcher, HookSource, global_dispatcher};
pub use error::{ErrorCode, RrlError, Status};
pub use error_state::{ErrorSnapshot, ErrorStore, MAX_ERROR_MSG_LEN};
pub use registry::{BackendHooks, BackendRegistry};
pub use stubs::{DefaultStubs, StaticBackend};
pub use types::{Handle, MAX_SPACE_DIMS, SpaceDesc, SpaceQuery, Stats};
