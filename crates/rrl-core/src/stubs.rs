//! Compiled-in default behavior and the static (link-time) backend tier.
//!
//! Every entry point has defined behavior even when nothing is wired up:
//! poll reports nothing ready, stats and policy loading report
//! [`RrlError::Unsupported`]. An integrator replaces any subset of these
//! permanently by implementing [`StaticBackend`] and installing it before
//! first dispatch; methods left unimplemented keep the stub behavior.

use crate::error::{RrlError, Status};
use crate::types::{Handle, Stats};

/// Stub poll: nothing is ever ready.
pub fn stub_poll(_handle: Handle) -> Result<u32, RrlError> {
    Ok(0)
}

/// Stub stats: zero the snapshot and report unsupported.
pub fn stub_get_stats(_handle: Handle, out: &mut Stats) -> Status {
    *out = Stats::zeroed();
    Err(RrlError::Unsupported)
}

/// Stub policy load: always unsupported.
pub fn stub_load_policy(_handle: Handle, _policy: &[u8]) -> Status {
    Err(RrlError::Unsupported)
}

/// Permanent integration tier, selected once per process.
///
/// Each method defaults to its stub, so overriding one operation leaves the
/// other two untouched.
pub trait StaticBackend: Send + Sync + 'static {
    fn poll(&self, handle: Handle) -> Result<u32, RrlError> {
        stub_poll(handle)
    }

    fn get_stats(&self, handle: Handle, out: &mut Stats) -> Status {
        stub_get_stats(handle, out)
    }

    fn load_policy(&self, handle: Handle, policy: &[u8]) -> Status {
        stub_load_policy(handle, policy)
    }

    /// Short label for logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// The compiled-in static backend: stubs only.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStubs;

impl StaticBackend for DefaultStubs {
    fn name(&self) -> &'static str {
        "stubs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> Handle {
        Handle::from_addr(1).expect("non-null")
    }

    #[test]
    fn stub_poll_reports_nothing_ready() {
        assert_eq!(DefaultStubs.poll(handle()), Ok(0));
    }

    #[test]
    fn stub_stats_zeroes_every_field() {
        let mut out = Stats {
            fps: 60.0,
            latency_ms: 3.5,
            steps: 99,
        };
        assert_eq!(
            DefaultStubs.get_stats(handle(), &mut out),
            Err(RrlError::Unsupported)
        );
        assert!(out.is_zeroed());
    }

    #[test]
    fn stub_load_policy_is_unsupported() {
        assert_eq!(
            DefaultStubs.load_policy(handle(), b"weights"),
            Err(RrlError::Unsupported)
        );
    }

    struct PollOnly;

    impl StaticBackend for PollOnly {
        fn poll(&self, _handle: Handle) -> Result<u32, RrlError> {
            Ok(1)
        }
    }

    #[test]
    fn partial_override_keeps_other_stubs() {
        let backend = PollOnly;
        assert_eq!(backend.poll(handle()), Ok(1));
        let mut out = Stats::zeroed();
        assert_eq!(backend.get_stats(handle(), &mut out), Err(RrlError::Unsupported));
        assert_eq!(backend.load_policy(handle(), b"x"), Err(RrlError::Unsupported));
        assert_eq!(backend.name(), "custom");
        assert_eq!(DefaultStubs.name(), "stubs");
    }
}
