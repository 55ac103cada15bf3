#![no_main]
use libfuzzer_sys::fuzz_target;
use rrl_core::{BackendHooks, Dispatcher, Handle, RrlError, Stats};

fuzz_target!(|data: &[u8]| {
    // Each 4-byte chunk is one operation: opcode, handle selector, two args.
    let d = Dispatcher::new();
    let live = Handle::from_addr(0xF022);

    for chunk in data.chunks_exact(4) {
        let handle = if chunk[1] & 1 == 0 { live } else { None };
        let arg = i32::from(chunk[2]) - 128;
        let len = usize::from(chunk[3]);

        match chunk[0] % 6 {
            0 => {
                let ready = u32::from(chunk[2]);
                let fail = chunk[3] & 1 == 1;
                d.register_backend(Some(BackendHooks::new().with_poll(move |_| {
                    if fail {
                        Err(RrlError::Unsupported)
                    } else {
                        Ok(ready)
                    }
                })));
            }
            1 => {
                let status = if arg < 0 {
                    Err(RrlError::from_status(arg).unwrap_or(RrlError::Status(arg)))
                } else {
                    Ok(())
                };
                d.register_backend(Some(BackendHooks::new().with_load_policy(
                    move |_, blob| {
                        // Empty blobs are rejected before any backend runs.
                        assert!(!blob.is_empty());
                        status
                    },
                )));
            }
            2 => d.register_backend(None),
            3 => {
                let before = d.last_error();
                let ready = d.poll(handle);
                if handle.is_none() {
                    assert_eq!(ready, 0);
                    assert_eq!(d.last_error(), RrlError::InvalidHandle.code());
                } else if d.last_error() != before {
                    assert_eq!(ready, 0);
                }
            }
            4 => {
                let sentinel = Stats {
                    fps: 1.0,
                    latency_ms: 2.0,
                    steps: 3,
                };
                let mut out = sentinel;
                let status = d.get_stats(handle, Some(&mut out));
                if handle.is_none() {
                    assert_eq!(status, Err(RrlError::InvalidHandle));
                    assert_eq!(out, sentinel);
                }
            }
            _ => {
                let blob = vec![chunk[2]; len];
                let status = d.load_policy(handle, Some(blob.as_slice()));
                if handle.is_none() {
                    assert_eq!(status, Err(RrlError::InvalidHandle));
                } else if len == 0 {
                    assert_eq!(status, Err(RrlError::InvalidArgument));
                }
            }
        }

        // The pair is always consistent: success code means empty message.
        let snap = d.last_error_snapshot();
        assert_eq!(snap.code == 0, snap.message.is_empty());
    }
});
