//! Last-error store shared by every entry point.
//!
//! The code and message are one unit: both are written and read under the
//! same lock, so a reader never pairs a code from one failure with the
//! message of another. Storage is inline and fixed-size; the store can live
//! in a `static` with no initialization or teardown.

use parking_lot::Mutex;

/// Maximum message length in bytes, excluding the C terminator.
pub const MAX_ERROR_MSG_LEN: usize = 255;

#[derive(Clone, Copy)]
struct ErrorState {
    code: i32,
    len: usize,
    msg: [u8; MAX_ERROR_MSG_LEN],
}

impl ErrorState {
    const fn cleared() -> Self {
        Self {
            code: 0,
            len: 0,
            msg: [0; MAX_ERROR_MSG_LEN],
        }
    }

    fn message(&self) -> &str {
        // Only whole UTF-8 sequences are ever stored.
        std::str::from_utf8(&self.msg[..self.len]).unwrap_or_default()
    }
}

/// A consistent (code, message) pair taken under one lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorSnapshot {
    pub code: i32,
    pub message: String,
}

/// Mutex-guarded last-error code and message.
pub struct ErrorStore {
    state: Mutex<ErrorState>,
}

impl ErrorStore {
    /// Empty store: success code, empty message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: parking_lot::const_mutex(ErrorState::cleared()),
        }
    }

    /// Overwrite the pair. Messages longer than [`MAX_ERROR_MSG_LEN`] bytes
    /// are cut at the last character boundary that fits.
    pub fn record(&self, code: i32, msg: &str) {
        let cut = truncate_utf8(msg, MAX_ERROR_MSG_LEN);
        let mut state = self.state.lock();
        state.code = code;
        state.len = cut.len();
        state.msg[..cut.len()].copy_from_slice(cut.as_bytes());
    }

    /// Last recorded code.
    #[must_use]
    pub fn code(&self) -> i32 {
        self.state.lock().code
    }

    /// Last recorded message (empty if nothing failed yet).
    #[must_use]
    pub fn message(&self) -> String {
        self.state.lock().message().to_owned()
    }

    /// Read code and message together.
    #[must_use]
    pub fn snapshot(&self) -> ErrorSnapshot {
        let state = self.state.lock();
        ErrorSnapshot {
            code: state.code,
            message: state.message().to_owned(),
        }
    }

    /// Copy the message into `buf` under the lock and return the pair.
    ///
    /// Writes at most `buf.len() - 1` message bytes followed by a NUL, for
    /// callers that must hand out C strings. Returns `(code, bytes_written)`
    /// where `bytes_written` excludes the NUL.
    pub fn copy_message_into(&self, buf: &mut [u8]) -> (i32, usize) {
        let state = self.state.lock();
        let Some(room) = buf.len().checked_sub(1) else {
            return (state.code, 0);
        };
        let cut = truncate_utf8(state.message(), room);
        buf[..cut.len()].copy_from_slice(cut.as_bytes());
        buf[cut.len()] = 0;
        (state.code, cut.len())
    }

    /// Restore success with an empty message.
    pub fn reset(&self) {
        *self.state.lock() = ErrorState::cleared();
    }
}

impl Default for ErrorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_reports_success_and_empty_message() {
        let store = ErrorStore::new();
        assert_eq!(store.code(), 0);
        assert_eq!(store.message(), "");
        assert_eq!(store.snapshot(), ErrorSnapshot::default());
    }

    #[test]
    fn record_overwrites_both_fields() {
        let store = ErrorStore::new();
        store.record(-1, "rrl_poll: null handle");
        store.record(-3, "rrl_get_stats: unsupported operation");
        let snap = store.snapshot();
        assert_eq!(snap.code, -3);
        assert_eq!(snap.message, "rrl_get_stats: unsupported operation");
    }

    #[test]
    fn long_messages_are_bounded() {
        let store = ErrorStore::new();
        store.record(-2, &"x".repeat(1000));
        assert_eq!(store.message().len(), MAX_ERROR_MSG_LEN);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let store = ErrorStore::new();
        // 254 ASCII bytes + a 3-byte char would straddle the limit.
        let msg = format!("{}€", "a".repeat(254));
        store.record(-2, &msg);
        assert_eq!(store.message(), "a".repeat(254));
    }

    #[test]
    fn shorter_message_does_not_leak_previous_tail() {
        let store = ErrorStore::new();
        store.record(-2, "a much longer message");
        store.record(-1, "short");
        assert_eq!(store.message(), "short");
    }

    #[test]
    fn copy_message_into_terminates() {
        let store = ErrorStore::new();
        store.record(-4, "no backend wired");
        let mut buf = [0xFF_u8; 6];
        let (code, written) = store.copy_message_into(&mut buf);
        assert_eq!(code, -4);
        assert_eq!(written, 5);
        assert_eq!(&buf, b"no ba\0");

        let (code, written) = store.copy_message_into(&mut []);
        assert_eq!((code, written), (-4, 0));
    }

    #[test]
    fn reset_clears_pair() {
        let store = ErrorStore::new();
        store.record(-1, "boom");
        store.reset();
        assert_eq!(store.snapshot(), ErrorSnapshot::default());
    }
}
