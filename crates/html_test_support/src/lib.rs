//! Fixture loading and snapshot formatting shared by the golden tests.

use std::fmt::Write;

pub mod expected;
pub mod fixtures;
pub mod snapshot;

pub use expected::{ParsedExpectedDom, parse_expected_dom, parse_expected_tokens};
pub use fixtures::{ExpectedBox, ExpectedStyle, GoldenCase, GoldenManifest, load_golden_cases};
pub use snapshot::{SnapshotOptions, format_tokens, snapshot_document};

/// Mismatched lines reported before the diff is cut short.
const MAX_REPORTED: usize = 8;

/// Quote-safe, single-line rendering of text content.
pub fn escape_text(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut out, ch| {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => {
                let _ = write!(out, "\\u{{{:04X}}}", u32::from(ch));
            }
            ch => out.push(ch),
        }
        out
    })
}

/// Line-by-line report of where `actual` departs from `expected`.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let mut out = format!(
        "expected {} line(s), got {}\n",
        expected.len(),
        actual.len()
    );
    let mut reported = 0;
    for index in 0..expected.len().max(actual.len()) {
        let want = expected.get(index);
        let got = actual.get(index);
        if want == got {
            continue;
        }
        if reported == MAX_REPORTED {
            out.push_str("  ...\n");
            break;
        }
        reported += 1;
        let line = index + 1;
        match want {
            Some(want) => {
                let _ = writeln!(out, "  {line:>4} - {want}");
            }
            None => {
                let _ = writeln!(out, "  {line:>4} - <none>");
            }
        }
        match got {
            Some(got) => {
                let _ = writeln!(out, "  {line:>4} + {got}");
            }
            None => {
                let _ = writeln!(out, "  {line:>4} + <none>");
            }
        }
    }
    out
}
