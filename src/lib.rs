//! Markup in, styled and laid-out document out.
//!
//! [`render`] runs the whole pipeline over a complete string. For input that
//! arrives in pieces, [`DocumentParser`] tokenizes and builds as chunks come in
//! and runs layout once the input is finished.

use std::fmt;

use css::{Cascade, CascadeConfig, SimpleStylesheetParser, StylesheetParseError};
use html::{
    Document, ParseError, Tokenizer, TokenizerConfig, TreeBuilder, TreeBuilderConfig,
    TreeBuilderError,
};
use layout::{LayoutConfig, LayoutStats};

pub use css;
pub use html;
pub use layout;

#[derive(Clone, Debug, Default)]
pub struct RenderConfig {
    pub tokenizer: TokenizerConfig,
    pub tree_builder: TreeBuilderConfig,
    pub cascade: CascadeConfig,
    pub layout: LayoutConfig,
}

/// A recoverable problem found while rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    Tokenize(ParseError),
    Stylesheet(StylesheetParseError),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Tokenize(err) => write!(f, "tokenizer: {err}"),
            Diagnostic::Stylesheet(err) => write!(f, "stylesheet: {err}"),
        }
    }
}

#[derive(Debug)]
pub enum RenderError {
    Structure(TreeBuilderError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Structure(err) => write!(f, "malformed document: {err}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Structure(err) => Some(err),
        }
    }
}

impl From<TreeBuilderError> for RenderError {
    fn from(err: TreeBuilderError) -> Self {
        RenderError::Structure(err)
    }
}

pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(any(test, feature = "debug-stats"))]
const OUTLINE_TRACE_LINES: usize = 200;

#[derive(Debug)]
pub struct Rendered {
    pub document: Document,
    /// Tokenizer errors first, then stylesheet errors, each in input order.
    pub diagnostics: Vec<Diagnostic>,
    pub layout: LayoutStats,
}

impl Rendered {
    /// Indented one-line-per-node view of the result, at most `cap` lines.
    pub fn outline(&self, cap: usize) -> Vec<String> {
        html::debug::outline(&self.document, cap)
    }
}

/// Incremental front end: tokenizer and tree builder fed chunk by chunk.
pub struct DocumentParser {
    tokenizer: Tokenizer,
    builder: TreeBuilder<Cascade<SimpleStylesheetParser>>,
    layout: LayoutConfig,
    /// Trailing bytes of an incomplete UTF-8 sequence from the last chunk.
    pending_bytes: Vec<u8>,
    failed: Option<TreeBuilderError>,
}

impl DocumentParser {
    pub fn new(config: RenderConfig) -> Self {
        let cascade = Cascade::new(config.cascade, SimpleStylesheetParser);
        Self {
            tokenizer: Tokenizer::new(config.tokenizer),
            builder: TreeBuilder::new(config.tree_builder, cascade),
            layout: config.layout,
            pending_bytes: Vec::new(),
            failed: None,
        }
    }

    /// The tree built so far. Styles are final; geometry is not.
    pub fn document(&self) -> &Document {
        self.builder.document()
    }

    pub fn push_str(&mut self, chunk: &str) -> RenderResult<()> {
        if let Some(err) = &self.failed {
            return Err(err.clone().into());
        }
        self.tokenizer.push_str(chunk);
        self.drain()
    }

    /// Feed raw bytes. A UTF-8 sequence split across chunks is held back until
    /// it completes; invalid sequences become U+FFFD.
    pub fn push_bytes(&mut self, chunk: &[u8]) -> RenderResult<()> {
        self.pending_bytes.extend_from_slice(chunk);
        let bytes = std::mem::take(&mut self.pending_bytes);
        let mut rest = bytes.as_slice();
        let mut text = String::with_capacity(rest.len());
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    // `valid_up_to` guarantees this prefix is UTF-8.
                    text.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.pending_bytes = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        self.push_str(&text)
    }

    /// End the input, then run layout over the finished tree.
    pub fn finish(mut self) -> RenderResult<Rendered> {
        if let Some(err) = self.failed.take() {
            return Err(err.into());
        }
        if !self.pending_bytes.is_empty() {
            self.pending_bytes.clear();
            self.tokenizer.push_str(&char::REPLACEMENT_CHARACTER.to_string());
        }
        self.tokenizer.finish();
        self.drain()?;

        let mut diagnostics: Vec<Diagnostic> = self
            .tokenizer
            .take_errors()
            .into_iter()
            .map(Diagnostic::Tokenize)
            .collect();
        let (mut document, mut cascade) = self.builder.finish();
        diagnostics.extend(cascade.take_errors().into_iter().map(Diagnostic::Stylesheet));

        let layout = layout::layout_document_with(&mut document, &self.layout);
        for diagnostic in &diagnostics {
            log::debug!(target: "flexdoc", "{diagnostic}");
        }
        log::debug!(
            target: "flexdoc",
            "rendered {} node(s) with {} diagnostic(s)",
            document.len(),
            diagnostics.len()
        );
        let rendered = Rendered {
            document,
            diagnostics,
            layout,
        };
        #[cfg(any(test, feature = "debug-stats"))]
        for line in rendered.outline(OUTLINE_TRACE_LINES) {
            log::trace!(target: "flexdoc", "{line}");
        }
        Ok(rendered)
    }

    fn drain(&mut self) -> RenderResult<()> {
        let batch = self.tokenizer.next_batch();
        if let Err(err) = self.builder.push_tokens(batch) {
            log::warn!(target: "flexdoc", "{err}");
            self.failed = Some(err.clone());
            return Err(err.into());
        }
        Ok(())
    }
}

pub fn render(source: &str) -> RenderResult<Rendered> {
    render_with(source, RenderConfig::default())
}

pub fn render_with(source: &str, config: RenderConfig) -> RenderResult<Rendered> {
    let mut parser = DocumentParser::new(config);
    parser.push_str(source)?;
    parser.finish()
}
