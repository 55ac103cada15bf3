//! Error introspection: `rrl_last_error`, `rrl_last_error_msg`.

use std::cell::UnsafeCell;
use std::ffi::{c_char, c_int};

use rrl_core::{MAX_ERROR_MSG_LEN, global_dispatcher};

abi_fn! {
    /// Code of the most recent failure (`RRL_SUCCESS` if none).
    fn rrl_last_error() -> c_int {
        global_dispatcher().last_error()
    }
}

abi_fn! {
    /// NUL-terminated message of the most recent failure; empty if none.
    ///
    /// Points into per-thread storage refreshed on every call. The text stays
    /// valid until the next `rrl_last_error_msg` call on the same thread.
    fn rrl_last_error_msg() -> *const c_char {
        thread_local! {
            static MSG: UnsafeCell<[u8; MAX_ERROR_MSG_LEN + 1]> =
                const { UnsafeCell::new([0; MAX_ERROR_MSG_LEN + 1]) };
        }
        MSG.with(|cell| {
            // SAFETY: the buffer is only touched from its own thread, and no
            // Rust reference to it outlives this closure.
            let buf = unsafe { &mut *cell.get() };
            let _ = global_dispatcher().errors().copy_message_into(buf);
            buf.as_ptr().cast::<c_char>()
        })
    }
}
