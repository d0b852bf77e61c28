//! Fuzz target for a single tuple-form detection record.

#![no_main]

use boxlabel::detection::io_json::fuzz_parse_tuple_record;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = fuzz_parse_tuple_record(data);
});
