//! Error codes shared by every entry point.
//!
//! The numeric values are part of the published ABI: existing values never
//! change meaning, new codes are only ever appended with new negative values.

use thiserror::Error;

/// Published status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    InvalidHandle = -1,
    InvalidArgument = -2,
    Unsupported = -3,
    NoBackend = -4,
    /// A static backend was installed after the process already resolved one.
    AlreadyBound = -5,
}

impl ErrorCode {
    /// Raw status value as seen across the C boundary.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self as i32
    }

    /// Map a raw status onto a published code, if it is one.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Success),
            -1 => Some(Self::InvalidHandle),
            -2 => Some(Self::InvalidArgument),
            -3 => Some(Self::Unsupported),
            -4 => Some(Self::NoBackend),
            -5 => Some(Self::AlreadyBound),
            _ => None,
        }
    }
}

/// Failure reported by an entry point or by a backend behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RrlError {
    #[error("invalid handle")]
    InvalidHandle,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("unsupported operation")]
    Unsupported,
    #[error("no backend")]
    NoBackend,
    #[error("static backend already bound")]
    AlreadyBound,
    /// Any other non-zero status a backend returned, kept verbatim.
    #[error("backend status {0}")]
    Status(i32),
}

/// Outcome of a status-returning operation.
pub type Status = Result<(), RrlError>;

impl RrlError {
    /// Raw status value for this failure. Only `Status(0)` yields zero, and
    /// the dispatcher treats that as success.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::InvalidHandle => ErrorCode::InvalidHandle.raw(),
            Self::InvalidArgument => ErrorCode::InvalidArgument.raw(),
            Self::Unsupported => ErrorCode::Unsupported.raw(),
            Self::NoBackend => ErrorCode::NoBackend.raw(),
            Self::AlreadyBound => ErrorCode::AlreadyBound.raw(),
            Self::Status(raw) => raw,
        }
    }

    /// Interpret a raw backend status. `0` is success and yields `None`.
    #[must_use]
    pub const fn from_status(raw: i32) -> Option<Self> {
        match ErrorCode::from_raw(raw) {
            Some(ErrorCode::Success) => None,
            Some(ErrorCode::InvalidHandle) => Some(Self::InvalidHandle),
            Some(ErrorCode::InvalidArgument) => Some(Self::InvalidArgument),
            Some(ErrorCode::Unsupported) => Some(Self::Unsupported),
            Some(ErrorCode::NoBackend) => Some(Self::NoBackend),
            Some(ErrorCode::AlreadyBound) => Some(Self::AlreadyBound),
            None => Some(Self::Status(raw)),
        }
    }

    /// Published code for this failure, if it maps onto one.
    #[must_use]
    pub const fn error_code(self) -> Option<ErrorCode> {
        ErrorCode::from_raw(self.code())
    }
}

impl From<RrlError> for i32 {
    fn from(err: RrlError) -> Self {
        err.code()
    }
}

/// Collapse a status into its raw code (`0` on success).
#[must_use]
pub fn status_code(status: &Status) -> i32 {
    match status {
        Ok(()) => ErrorCode::Success.raw(),
        Err(err) => err.code(),
    }
}

/// Build a status from a raw backend return value.
pub fn status_from_raw(raw: i32) -> Status {
    match RrlError::from_status(raw) {
        None => Ok(()),
        Some(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_values_are_stable() {
        assert_eq!(ErrorCode::Success.raw(), 0);
        assert_eq!(ErrorCode::InvalidHandle.raw(), -1);
        assert_eq!(ErrorCode::InvalidArgument.raw(), -2);
        assert_eq!(ErrorCode::Unsupported.raw(), -3);
        assert_eq!(ErrorCode::NoBackend.raw(), -4);
        assert_eq!(ErrorCode::AlreadyBound.raw(), -5);
    }

    #[test]
    fn known_statuses_map_to_named_variants() {
        assert_eq!(RrlError::from_status(0), None);
        assert_eq!(RrlError::from_status(-1), Some(RrlError::InvalidHandle));
        assert_eq!(RrlError::from_status(-3), Some(RrlError::Unsupported));
        assert_eq!(RrlError::from_status(-4), Some(RrlError::NoBackend));
    }

    #[test]
    fn unknown_statuses_are_kept_verbatim() {
        assert_eq!(RrlError::from_status(-42), Some(RrlError::Status(-42)));
        assert_eq!(RrlError::from_status(7), Some(RrlError::Status(7)));
        assert_eq!(RrlError::Status(-42).code(), -42);
        assert_eq!(RrlError::Status(-42).error_code(), None);
    }

    #[test]
    fn status_helpers_agree() {
        assert_eq!(status_code(&Ok(())), 0);
        assert_eq!(status_code(&Err(RrlError::InvalidArgument)), -2);
        assert_eq!(status_from_raw(0), Ok(()));
        assert_eq!(status_from_raw(-2), Err(RrlError::InvalidArgument));
        assert_eq!(i32::from(RrlError::Unsupported), -3);
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(RrlError::Unsupported.to_string(), "unsupported operation");
        assert_eq!(RrlError::Status(9).to_string(), "backend status 9");
    }
}
