use std::fs;
use std::path::{Path, PathBuf};

use html::{Tokenizer, TokenizerConfig, tokenize};
use html_test_support::{diff_lines, format_tokens, parse_expected_tokens};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tokenizer")
}

/// `(id, input, expected tokens path)` triples, sorted by file name.
fn cases() -> Vec<(String, String, PathBuf)> {
    let mut paths: Vec<PathBuf> = fs::read_dir(fixture_dir())
        .expect("tokenizer fixture dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "no tokenizer fixtures found");
    paths
        .into_iter()
        .map(|path| {
            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .expect("utf-8 fixture name")
                .to_string();
            let input = fs::read_to_string(&path).expect("fixture input");
            // Fixture files end with a newline that is not part of the case.
            let input = input.trim_end_matches('\n').to_string();
            (id, input, path.with_extension("tokens"))
        })
        .collect()
}

#[test]
fn tokenizer_matches_golden_fixtures() {
    for (id, input, expected_path) in cases() {
        let expected = parse_expected_tokens(&expected_path);
        let actual = format_tokens(tokenize(&input).tokens());
        assert!(
            expected == actual,
            "token mismatch for '{id}':\n{}",
            diff_lines(&expected, &actual)
        );
    }
}

#[test]
fn golden_fixtures_are_chunk_invariant() {
    for (id, input, expected_path) in cases() {
        let expected = parse_expected_tokens(&expected_path);
        let chars: Vec<char> = input.chars().collect();
        for size in [1usize, 2, 3, 5] {
            let mut tokenizer = Tokenizer::new(TokenizerConfig::default());
            let mut tokens = Vec::new();
            for chunk in chars.chunks(size) {
                tokenizer.push_str(&chunk.iter().collect::<String>());
                tokens.extend(tokenizer.next_batch());
            }
            tokenizer.finish();
            tokens.extend(tokenizer.next_batch());
            let actual = format_tokens(&tokens);
            assert!(
                expected == actual,
                "chunked ({size}) mismatch for '{id}':\n{}",
                diff_lines(&expected, &actual)
            );
        }
    }
}
