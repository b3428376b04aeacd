#![no_main]

use libfuzzer_sys::fuzz_target;

const MAX_LEN: usize = 32 * 1024;

fuzz_target!(|data: &[u8]| {
    let data = &data[..data.len().min(MAX_LEN)];
    let input = String::from_utf8_lossy(data);
    // Structural mismatches are expected; anything else must not panic.
    let _ = flexdoc::render(&input);
});
