//! Value types that cross the boundary.

use std::num::NonZeroUsize;

use crate::error::RrlError;

/// Capacity of a [`SpaceDesc`] shape.
pub const MAX_SPACE_DIMS: usize = 8;

/// Opaque simulation handle.
///
/// Allocated and owned by the closed core. This layer only forwards the
/// address and never dereferences it; a null address cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(NonZeroUsize);

impl Handle {
    /// Wrap a raw address. Returns `None` for the null handle.
    #[must_use]
    pub const fn from_addr(addr: usize) -> Option<Self> {
        match NonZeroUsize::new(addr) {
            Some(nz) => Some(Self(nz)),
            None => None,
        }
    }

    #[must_use]
    pub const fn addr(self) -> usize {
        self.0.get()
    }
}

/// Fixed-capacity tensor shape description.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpaceDesc {
    /// Dimension extents; only the first `ndim` are meaningful.
    pub shape: [i32; MAX_SPACE_DIMS],
    /// Number of valid entries in `shape`.
    pub ndim: i32,
    /// Data-type tag, defined by the closed core.
    pub dtype: i32,
}

impl SpaceDesc {
    /// Build a descriptor from explicit extents.
    pub fn new(dims: &[i32], dtype: i32) -> Result<Self, RrlError> {
        if dims.len() > MAX_SPACE_DIMS {
            return Err(RrlError::InvalidArgument);
        }
        let mut shape = [0; MAX_SPACE_DIMS];
        shape[..dims.len()].copy_from_slice(dims);
        Ok(Self {
            shape,
            ndim: dims.len() as i32,
            dtype,
        })
    }

    /// `0 <= ndim <= MAX_SPACE_DIMS`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        usize::try_from(self.ndim).is_ok_and(|n| n <= MAX_SPACE_DIMS)
    }

    /// The valid extents. Empty when `ndim` is out of range.
    #[must_use]
    pub fn dims(&self) -> &[i32] {
        if !self.is_valid() {
            return &[];
        }
        &self.shape[..self.ndim as usize]
    }

    /// Product of the valid extents, `None` on overflow or negative extent.
    #[must_use]
    pub fn element_count(&self) -> Option<u64> {
        self.dims().iter().try_fold(1_u64, |acc, &d| {
            let d = u64::try_from(d).ok()?;
            acc.checked_mul(d)
        })
    }
}

/// Performance snapshot, copied by value on every query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    /// Simulated frames per second.
    pub fps: f64,
    /// Mean round-trip latency in milliseconds.
    pub latency_ms: f64,
    /// Total environment steps taken.
    pub steps: u64,
}

impl Stats {
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            fps: 0.0,
            latency_ms: 0.0,
            steps: 0,
        }
    }

    /// Every field is exactly zero.
    #[must_use]
    pub fn is_zeroed(&self) -> bool {
        self.fps == 0.0 && self.latency_ms == 0.0 && self.steps == 0
    }
}

/// Space queries implemented by the closed core.
///
/// This layer never implements these; integrators and test doubles do.
/// Implementations must not block and must not touch the error-state store.
pub trait SpaceQuery: Send + Sync {
    fn action_space(&self, handle: Handle) -> Result<SpaceDesc, RrlError>;
    fn observation_space(&self, handle: Handle) -> Result<SpaceDesc, RrlError>;
}
