#![no_main]

use std::io::Cursor;

use fastimage::{BytesSource, StreamSource, probe};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let streamed = probe(&mut StreamSource::new(Cursor::new(data)));
    let buffered = probe(&mut BytesSource::new(data.to_vec()));
    assert_eq!(streamed, buffered);
});
