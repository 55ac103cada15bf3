#![no_main]
use libfuzzer_sys::fuzz_target;
use rrl_core::{ErrorStore, MAX_ERROR_MSG_LEN};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let store = ErrorStore::new();
    let code = -i32::from(data[0]) - 1;
    let msg = String::from_utf8_lossy(&data[1..]);
    store.record(code, &msg);

    let stored = store.message();
    assert!(stored.len() <= MAX_ERROR_MSG_LEN);
    assert!(msg.starts_with(&stored));
    assert_eq!(store.code(), code);

    let mut buf = [0xFFu8; MAX_ERROR_MSG_LEN + 1];
    let (copied_code, n) = store.copy_message_into(&mut buf);
    assert_eq!(copied_code, code);
    assert_eq!(&buf[..n], stored.as_bytes());
    assert_eq!(buf[n], 0);
});
