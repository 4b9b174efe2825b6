#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let outcome = fastimage::probe_bytes(data);
    assert!(outcome.bytes_read <= data.len() as u64);
});
