//! Runtime backend registry.
//!
//! Holds at most one [`BackendHooks`] table. Registration replaces the whole
//! table; it never merges individual hooks. Dispatch clones the active `Arc`
//! under a short read lock and calls hooks with no lock held, so a slow or
//! reentrant hook cannot stall registration or other callers.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::error::{RrlError, Status};
use crate::types::{Handle, Stats};

/// Readiness hook. `Ok(0)` means nothing ready; other values pass through.
pub type PollHook = Arc<dyn Fn(Handle) -> Result<u32, RrlError> + Send + Sync>;
/// Stats hook. Fills the snapshot it is handed.
pub type StatsHook = Arc<dyn Fn(Handle, &mut Stats) -> Status + Send + Sync>;
/// Policy-load hook. Receives a non-empty policy blob.
pub type LoadPolicyHook = Arc<dyn Fn(Handle, &[u8]) -> Status + Send + Sync>;

/// A backend function table. Each hook may be independently absent; absent
/// hooks fall through to the static tier.
#[derive(Clone, Default)]
pub struct BackendHooks {
    pub poll: Option<PollHook>,
    pub get_stats: Option<StatsHook>,
    pub load_policy: Option<LoadPolicyHook>,
}

impl BackendHooks {
    /// Table with no hooks set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_poll<F>(mut self, f: F) -> Self
    where
        F: Fn(Handle) -> Result<u32, RrlError> + Send + Sync + 'static,
    {
        self.poll = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn with_get_stats<F>(mut self, f: F) -> Self
    where
        F: Fn(Handle, &mut Stats) -> Status + Send + Sync + 'static,
    {
        self.get_stats = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn with_load_policy<F>(mut self, f: F) -> Self
    where
        F: Fn(Handle, &[u8]) -> Status + Send + Sync + 'static,
    {
        self.load_policy = Some(Arc::new(f));
        self
    }

    /// True when no hook is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poll.is_none() && self.get_stats.is_none() && self.load_policy.is_none()
    }
}

impl fmt::Debug for BackendHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendHooks")
            .field("poll", &self.poll.is_some())
            .field("get_stats", &self.get_stats.is_some())
            .field("load_policy", &self.load_policy.is_some())
            .finish()
    }
}

/// Holder of the active runtime table.
#[derive(Debug)]
pub struct BackendRegistry {
    active: RwLock<Option<Arc<BackendHooks>>>,
    generation: AtomicU64,
}

impl BackendRegistry {
    /// Registry with no backend.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: parking_lot::const_rwlock(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Replace the active table. `None` restores "no backend". Never fails.
    pub fn register(&self, hooks: Option<BackendHooks>) {
        let next = hooks.map(Arc::new);
        // Drop the previous table after releasing the lock.
        let previous = std::mem::replace(&mut *self.active.write(), next);
        self.generation.fetch_add(1, Ordering::Release);
        drop(previous);
    }

    /// The table in effect right now, if any.
    #[must_use]
    pub fn active(&self) -> Option<Arc<BackendHooks>> {
        self.active.read().clone()
    }

    /// Number of registrations performed so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub(crate) fn poll_hook(&self) -> Option<PollHook> {
        self.active.read().as_ref().and_then(|t| t.poll.clone())
    }

    pub(crate) fn stats_hook(&self) -> Option<StatsHook> {
        self.active.read().as_ref().and_then(|t| t.get_stats.clone())
    }

    pub(crate) fn load_policy_hook(&self) -> Option<LoadPolicyHook> {
        self.active.read().as_ref().and_then(|t| t.load_policy.clone())
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
