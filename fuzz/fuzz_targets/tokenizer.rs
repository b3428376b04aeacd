#![no_main]

use html::tokenize;
use libfuzzer_sys::fuzz_target;

const MAX_LEN: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    let data = &data[..data.len().min(MAX_LEN)];
    let input = String::from_utf8_lossy(data);
    let stream = tokenize(&input);
    let chars = input.chars().count();
    assert!(matches!(stream.tokens().last(), Some(html::Token::Eof)));
    for err in stream.errors() {
        assert!(err.position <= chars, "{err} past end of {chars} chars");
    }
});
