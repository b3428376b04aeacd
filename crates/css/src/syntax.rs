use std::fmt;

// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// Selector text and its declarations, in source order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// The selector that takes part in the cascade: text before the first
    /// comma. The remaining selectors of a list are ignored.
    pub fn primary_selector(&self) -> &str {
        self.selector
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StylesheetErrorKind {
    UnterminatedComment,
    UnclosedBlock,
    UnexpectedCloseBrace,
    NestedBlock,
    MissingSelector,
    MalformedDeclaration,
    TrailingInput,
}

impl StylesheetErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StylesheetErrorKind::UnterminatedComment => "unterminated comment",
            StylesheetErrorKind::UnclosedBlock => "unclosed declaration block",
            StylesheetErrorKind::UnexpectedCloseBrace => "unexpected '}'",
            StylesheetErrorKind::NestedBlock => "nested '{' inside a declaration block",
            StylesheetErrorKind::MissingSelector => "declaration block without a selector",
            StylesheetErrorKind::MalformedDeclaration => "malformed declaration",
            StylesheetErrorKind::TrailingInput => "text after the last rule",
        }
    }
}

/// A stylesheet that could not be parsed. None of its rules are used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StylesheetParseError {
    pub kind: StylesheetErrorKind,
    /// Byte offset into the stylesheet text.
    pub offset: usize,
}

impl fmt::Display for StylesheetParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind.as_str(), self.offset)
    }
}

impl std::error::Error for StylesheetParseError {}

/// Turns stylesheet text into rules.
pub trait StylesheetParser {
    fn parse(&self, text: &str) -> Result<Vec<Rule>, StylesheetParseError>;
}

/// `selector { name: value; ... }` blocks with `/* */` comments.
///
/// No at-rules, strings or escapes. Any syntax error rejects the whole
/// stylesheet.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleStylesheetParser;

impl StylesheetParser for SimpleStylesheetParser {
    fn parse(&self, text: &str) -> Result<Vec<Rule>, StylesheetParseError> {
        let text = strip_comments(text)?;
        let mut rules = Vec::new();
        let mut rest = text.as_str();
        let mut base = 0usize;

        while let Some(open) = rest.find('{') {
            let prelude = &rest[..open];
            if let Some(close) = prelude.find('}') {
                return Err(error(StylesheetErrorKind::UnexpectedCloseBrace, base + close));
            }
            let selector = prelude.trim();
            if selector.is_empty() {
                return Err(error(StylesheetErrorKind::MissingSelector, base + open));
            }

            let body_start = open + 1;
            let Some(close) = rest[body_start..].find('}') else {
                return Err(error(StylesheetErrorKind::UnclosedBlock, base + open));
            };
            let body = &rest[body_start..body_start + close];
            if let Some(nested) = body.find('{') {
                return Err(error(
                    StylesheetErrorKind::NestedBlock,
                    base + body_start + nested,
                ));
            }

            let declarations = parse_block(body, base + body_start)?;
            rules.push(Rule {
                selector: selector.to_string(),
                declarations,
            });

            let consumed = body_start + close + 1;
            rest = &rest[consumed..];
            base += consumed;
        }

        if let Some(close) = rest.find('}') {
            return Err(error(StylesheetErrorKind::UnexpectedCloseBrace, base + close));
        }
        if !rest.trim().is_empty() {
            let leading = rest.len() - rest.trim_start().len();
            return Err(error(StylesheetErrorKind::TrailingInput, base + leading));
        }

        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(target: "css.syntax", "parsed {} rule(s)", rules.len());
        Ok(rules)
    }
}

/// Parse with the default parser.
pub fn parse_stylesheet(input: &str) -> Result<Vec<Rule>, StylesheetParseError> {
    SimpleStylesheetParser.parse(input)
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
//
// Lenient: pieces without a name or a colon are skipped. Used for `style`
// attributes, where a bad declaration must not hide the good ones.
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            Some(Declaration::new(name, v.trim()))
        })
        .collect()
}

fn parse_block(body: &str, base: usize) -> Result<Vec<Declaration>, StylesheetParseError> {
    let mut declarations = Vec::new();
    let mut offset = base;
    for piece in body.split(';') {
        let piece_offset = offset;
        offset += piece.len() + 1;
        if piece.trim().is_empty() {
            continue;
        }
        let malformed = || error(StylesheetErrorKind::MalformedDeclaration, piece_offset);
        let (name, value) = piece.split_once(':').ok_or_else(malformed)?;
        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(malformed());
        }
        declarations.push(Declaration::new(name.to_ascii_lowercase(), value.trim()));
    }
    Ok(declarations)
}

/// Replace each comment by a single space, keeping everything else.
fn strip_comments(text: &str) -> Result<String, StylesheetParseError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut base = 0usize;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let Some(len) = rest[start + 2..].find("*/") else {
            return Err(error(StylesheetErrorKind::UnterminatedComment, base + start));
        };
        out.push(' ');
        let consumed = start + 2 + len + 2;
        rest = &rest[consumed..];
        base += consumed;
    }
    out.push_str(rest);
    Ok(out)
}

fn error(kind: StylesheetErrorKind, offset: usize) -> StylesheetParseError {
    StylesheetParseError { kind, offset }
}
