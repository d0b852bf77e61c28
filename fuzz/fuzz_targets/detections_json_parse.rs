//! Fuzz target for detection JSON parsing.
//!
//! Feeds arbitrary bytes to the tuple/typed detection parser, checking for
//! panics, crashes, or hangs.

#![no_main]

use boxlabel::detection::io_json::from_json_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_json_slice(data);
});
