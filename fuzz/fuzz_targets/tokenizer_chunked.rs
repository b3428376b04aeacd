#![no_main]

use html::{Tokenizer, TokenizerConfig, tokenize};
use libfuzzer_sys::fuzz_target;

const MAX_LEN: usize = 16 * 1024;

// First byte picks the chunk size; output must not depend on it.
fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let input = String::from_utf8_lossy(&rest[..rest.len().min(MAX_LEN)]);
    let whole = tokenize(&input);

    let chunk = usize::from(split % 16) + 1;
    let chars: Vec<char> = input.chars().collect();
    let mut tokenizer = Tokenizer::new(TokenizerConfig::default());
    let mut tokens = Vec::new();
    for piece in chars.chunks(chunk) {
        tokenizer.push_str(&piece.iter().collect::<String>());
        tokens.extend(tokenizer.next_batch());
    }
    tokenizer.finish();
    tokens.extend(tokenizer.next_batch());

    assert_eq!(tokens.as_slice(), whole.tokens());
    assert_eq!(tokenizer.errors(), whole.errors());
});
