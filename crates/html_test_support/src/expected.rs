//! Expected-output files: `# key: value` headers followed by snapshot lines.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const EXPECTED_TOKEN_FORMAT_V1: &str = "flexdoc-tokens-v1";
pub const EXPECTED_DOM_FORMAT_V1: &str = "flexdoc-dom-v1";

pub struct ParsedExpectedDom {
    pub styles: bool,
    pub layout: bool,
    pub lines: Vec<String>,
}

struct ExpectedFile {
    headers: BTreeMap<String, String>,
    lines: Vec<String>,
}

impl ExpectedFile {
    fn read(path: &Path, format: &str, allowed: &[&str]) -> Self {
        let content = fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("failed to read expected file {path:?}: {err}"));
        let mut headers = BTreeMap::new();
        let mut lines = Vec::new();

        for line in content.lines().map(str::trim_end) {
            if line.is_empty() {
                continue;
            }
            // `#document` is snapshot content, not a header.
            let header = line
                .strip_prefix('#')
                .filter(|_| line != "#document")
                .map(str::trim);
            let Some(header) = header else {
                lines.push(line.to_string());
                continue;
            };
            // A `#` line without a colon is a comment.
            let Some((key, value)) = header.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            assert!(
                allowed.contains(&key.as_str()),
                "unsupported header '{key}' in {path:?}"
            );
            assert!(
                !headers.is_empty() || key == "format",
                "first header must be 'format' in {path:?}"
            );
            let previous = headers.insert(key.clone(), value.trim().to_string());
            assert!(previous.is_none(), "duplicate header '{key}' in {path:?}");
        }

        assert_eq!(
            headers.get("format").map(String::as_str),
            Some(format),
            "missing or unsupported format in {path:?}"
        );
        Self { headers, lines }
    }

    fn flag(&self, key: &str, path: &Path) -> bool {
        match self.headers.get(key).map(String::as_str) {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => panic!("invalid boolean '{other}' for {key} in {path:?}"),
        }
    }
}

pub fn parse_expected_tokens(path: &Path) -> Vec<String> {
    let file = ExpectedFile::read(path, EXPECTED_TOKEN_FORMAT_V1, &["format"]);
    assert!(
        file.lines.last().is_some_and(|line| line == "EOF"),
        "expected tokens file {path:?} must end with EOF"
    );
    file.lines
}

pub fn parse_expected_dom(path: &Path) -> ParsedExpectedDom {
    let file = ExpectedFile::read(path, EXPECTED_DOM_FORMAT_V1, &["format", "styles", "layout"]);
    assert!(
        file.lines.first().is_some_and(|line| line == "#document"),
        "expected DOM file {path:?} must start with #document"
    );
    ParsedExpectedDom {
        styles: file.flag("styles", path),
        layout: file.flag("layout", path),
        lines: file.lines,
    }
}
