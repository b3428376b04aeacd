//! Token-to-tree construction.
//!
//! The builder keeps a stack of open elements whose bottom is always the
//! document root. Style resolution happens at element creation time through
//! the `StyleResolver` seam, so a stylesheet only affects elements created
//! after its `</style>` end tag.

use std::fmt;

use core_types::ComputedStyle;

use crate::types::{Document, Element, Id, NodeData, Token};

/// Style computation hook used while building the tree.
pub trait StyleResolver {
    /// Compute the style of a freshly created element.
    ///
    /// `ancestors` yields the open elements nearest first, excluding the
    /// element itself.
    fn resolve(&mut self, element: &Element, ancestors: Ancestors<'_>) -> ComputedStyle;

    /// Accept the text content of a closed `<style>` element.
    fn collect_stylesheet(&mut self, text: &str);
}

/// Resolver that computes nothing. Elements keep an empty style.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStyles;

impl StyleResolver for NoStyles {
    fn resolve(&mut self, _element: &Element, _ancestors: Ancestors<'_>) -> ComputedStyle {
        ComputedStyle::new()
    }

    fn collect_stylesheet(&mut self, _text: &str) {}
}

/// View of the open elements above a node being created.
#[derive(Clone, Copy)]
pub struct Ancestors<'a> {
    document: &'a Document,
    stack: &'a [Id],
}

impl<'a> Ancestors<'a> {
    pub fn new(document: &'a Document, stack: &'a [Id]) -> Self {
        Self { document, stack }
    }

    /// Ancestor elements from the nearest parent up to the outermost element.
    pub fn iter(self) -> impl Iterator<Item = &'a Element> + 'a {
        let document = self.document;
        self.stack
            .iter()
            .rev()
            .filter_map(move |&id| document.element(id))
    }

    pub fn len(self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(self) -> bool {
        self.iter().next().is_none()
    }
}

impl fmt::Debug for Ancestors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|element| element.name.as_str()))
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct TreeBuilderConfig {
    /// Hand the text of closed `<style>` elements to the resolver.
    pub collect_styles: bool,
}

impl Default for TreeBuilderConfig {
    fn default() -> Self {
        Self {
            collect_styles: true,
        }
    }
}

/// Fatal tree construction failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeBuilderError {
    /// An end tag did not match the innermost open element.
    StructuralMismatch {
        /// Name of the innermost open element, `None` when nothing is open.
        expected: Option<String>,
        found: String,
        /// Open element names, outermost first.
        open_elements: Vec<String>,
    },
}

impl fmt::Display for TreeBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeBuilderError::StructuralMismatch {
                expected: Some(expected),
                found,
                open_elements,
            } => write!(
                f,
                "end tag </{found}> does not match open element <{expected}> (open: {})",
                open_elements.join(" > ")
            ),
            TreeBuilderError::StructuralMismatch {
                expected: None,
                found,
                ..
            } => write!(f, "end tag </{found}> with no open element"),
        }
    }
}

impl std::error::Error for TreeBuilderError {}

pub type TreeBuilderResult<T> = Result<T, TreeBuilderError>;

pub struct TreeBuilder<R: StyleResolver = NoStyles> {
    config: TreeBuilderConfig,
    document: Document,
    /// Bottom entry is always the document root.
    open_elements: Vec<Id>,
    /// Text node that receives the next character token.
    pending_text: Option<Id>,
    resolver: R,
}

impl TreeBuilder<NoStyles> {
    pub fn without_styles() -> Self {
        Self::new(TreeBuilderConfig::default(), NoStyles)
    }
}

impl<R: StyleResolver> TreeBuilder<R> {
    pub fn new(config: TreeBuilderConfig, resolver: R) -> Self {
        let document = Document::new();
        let root = document.root();
        Self {
            config,
            document,
            open_elements: vec![root],
            pending_text: None,
            resolver,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    /// Names of the open elements, outermost first.
    pub fn open_element_names(&self) -> Vec<String> {
        self.open_elements
            .iter()
            .filter_map(|&id| self.document.element(id))
            .map(|element| element.name.clone())
            .collect()
    }

    pub fn push_tokens(&mut self, tokens: impl IntoIterator<Item = Token>) -> TreeBuilderResult<()> {
        tokens
            .into_iter()
            .try_for_each(|token| self.push_token(token))
    }

    pub fn push_token(&mut self, token: Token) -> TreeBuilderResult<()> {
        match token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                self.pending_text = None;
                self.insert_element(Element::new(name, attributes), self_closing);
                Ok(())
            }
            Token::EndTag { name } => {
                self.pending_text = None;
                self.close_element(name)
            }
            Token::Text(ch) => {
                self.insert_char(ch);
                Ok(())
            }
            Token::Eof => {
                if self.open_elements.len() > 1 {
                    log::debug!(
                        target: "html.tree_builder",
                        "end of input with unclosed elements: {}",
                        self.open_element_names().join(" > ")
                    );
                }
                Ok(())
            }
        }
    }

    /// Finish building and hand back the document and the resolver.
    pub fn finish(self) -> (Document, R) {
        (self.document, self.resolver)
    }

    fn current_node(&self) -> Id {
        self.open_elements
            .last()
            .copied()
            .unwrap_or_else(|| self.document.root())
    }

    fn insert_element(&mut self, mut element: Element, self_closing: bool) {
        let parent = self.current_node();
        element.style = self
            .resolver
            .resolve(&element, Ancestors::new(&self.document, &self.open_elements));
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "html.tree_builder",
            "insert <{}> under {:?} with {} style entries",
            element.name,
            parent,
            element.style.len()
        );
        let id = self.document.append(parent, NodeData::Element(element));
        if !self_closing {
            self.open_elements.push(id);
        }
    }

    fn close_element(&mut self, name: String) -> TreeBuilderResult<()> {
        let top = self.current_node();
        let matches = self
            .document
            .element(top)
            .is_some_and(|element| element.name == name);
        if !matches {
            let error = TreeBuilderError::StructuralMismatch {
                expected: self.document.element(top).map(|e| e.name.clone()),
                found: name,
                open_elements: self.open_element_names(),
            };
            log::warn!(target: "html.tree_builder", "{error}");
            return Err(error);
        }
        if name == "style" && self.config.collect_styles {
            let text = self.document.child_text(top);
            self.resolver.collect_stylesheet(&text);
        }
        self.open_elements.pop();
        Ok(())
    }

    fn insert_char(&mut self, ch: char) {
        match self.pending_text {
            Some(text) => self.document.push_text(text, ch),
            None => {
                let parent = self.current_node();
                let text = self
                    .document
                    .append(parent, NodeData::Text(ch.to_string()));
                self.pending_text = Some(text);
            }
        }
    }
}

/// Build a tree from a complete token sequence without style resolution.
pub fn build_dom(tokens: &[Token]) -> TreeBuilderResult<Document> {
    let mut builder = TreeBuilder::without_styles();
    builder.push_tokens(tokens.iter().cloned())?;
    Ok(builder.finish().0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use crate::types::Attribute;
    use core_types::Specificity;

    fn start(name: &str) -> Token {
        Token::StartTag {
            name: name.to_string(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    fn end(name: &str) -> Token {
        Token::EndTag {
            name: name.to_string(),
        }
    }

    #[test]
    fn nests_elements_and_merges_text() {
        let doc = build_dom(tokenize("<div><p>Hi</p></div>").tokens()).expect("tree");
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.element(div).map(|e| e.name.as_str()), Some("div"));
        let p = doc.children(div)[0];
        assert_eq!(doc.children(p).len(), 1, "adjacent characters merge");
        assert_eq!(doc.node(doc.children(p)[0]).as_text(), Some("Hi"));
        assert_eq!(doc.parent(p), Some(div));
        assert_eq!(doc.parent(div), Some(doc.root()));
    }

    #[test]
    fn tags_split_text_runs() {
        let doc = build_dom(tokenize("<p>a<br/>b</p>").tokens()).expect("tree");
        let p = doc.children(doc.root())[0];
        let kinds: Vec<_> = doc
            .children(p)
            .iter()
            .map(|&c| match &doc.node(c).data {
                NodeData::Text(t) => format!("text:{t}"),
                NodeData::Element(e) => format!("elem:{}", e.name),
                NodeData::Document => "document".to_string(),
            })
            .collect();
        assert_eq!(kinds, vec!["text:a", "elem:br", "text:b"]);
    }

    #[test]
    fn self_closing_element_is_not_opened() {
        let doc = build_dom(tokenize("<div><img /><span></span></div>").tokens()).expect("tree");
        let div = doc.children(doc.root())[0];
        let children = doc.children(div);
        assert_eq!(children.len(), 2);
        assert!(doc.children(children[0]).is_empty());
    }

    #[test]
    fn mismatched_end_tag_is_fatal() {
        let err = build_dom(tokenize("<div></span>").tokens()).expect_err("mismatch");
        assert_eq!(
            err,
            TreeBuilderError::StructuralMismatch {
                expected: Some("div".to_string()),
                found: "span".to_string(),
                open_elements: vec!["div".to_string()],
            }
        );
        assert!(err.to_string().contains("</span>"));
    }

    #[test]
    fn end_tag_with_nothing_open_is_fatal() {
        let err = build_dom(&[end("p")]).expect_err("nothing open");
        assert!(matches!(
            err,
            TreeBuilderError::StructuralMismatch { expected: None, .. }
        ));
    }

    #[test]
    fn unclosed_elements_are_tolerated_at_eof() {
        let doc = build_dom(&[start("div"), start("p"), Token::Eof]).expect("tree");
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn deep_nesting_is_handled_without_recursion() {
        let depth: usize = 10_000;
        let mut tokens = Vec::with_capacity(depth * 2);
        tokens.extend((0..depth).map(|_| start("div")));
        tokens.extend((0..depth).map(|_| end("div")));

        let doc = build_dom(&tokens).expect("tree");
        let mut current = doc.root();
        for _ in 0..depth {
            let children = doc.children(current);
            assert_eq!(children.len(), 1);
            current = children[0];
        }
        assert!(doc.children(current).is_empty());
    }

    #[derive(Default)]
    struct Recording {
        sheets: Vec<String>,
        seen: Vec<(String, Vec<String>)>,
    }

    impl StyleResolver for Recording {
        fn resolve(&mut self, element: &Element, ancestors: Ancestors<'_>) -> ComputedStyle {
            self.seen.push((
                element.name.clone(),
                ancestors.iter().map(|a| a.name.clone()).collect(),
            ));
            let mut style = ComputedStyle::new();
            style.apply("sheets", &self.sheets.len().to_string(), Specificity::ZERO);
            style
        }

        fn collect_stylesheet(&mut self, text: &str) {
            self.sheets.push(text.to_string());
        }
    }

    #[test]
    fn resolver_sees_nearest_ancestor_first_and_stylesheets_in_order() {
        let tokens = tokenize("<html><style>a{}</style><body><p></p></body></html>");
        let mut builder = TreeBuilder::new(TreeBuilderConfig::default(), Recording::default());
        builder
            .push_tokens(tokens.iter().cloned())
            .expect("well formed");
        let (doc, resolver) = builder.finish();

        assert_eq!(resolver.sheets, vec!["a{}".to_string()]);
        assert_eq!(
            resolver.seen.last(),
            Some(&("p".to_string(), vec!["body".to_string(), "html".to_string()]))
        );

        let html = doc.children(doc.root())[0];
        let style_el = doc.children(html)[0];
        let body = doc.children(html)[1];
        assert_eq!(doc.element(style_el).and_then(|e| e.style.get("sheets")), Some("0"));
        assert_eq!(doc.element(body).and_then(|e| e.style.get("sheets")), Some("1"));
    }

    #[test]
    fn style_collection_can_be_disabled() {
        let mut builder = TreeBuilder::new(
            TreeBuilderConfig {
                collect_styles: false,
            },
            Recording::default(),
        );
        builder
            .push_tokens(tokenize("<style>p{}</style>").iter().cloned())
            .expect("well formed");
        assert!(builder.resolver().sheets.is_empty());
    }

    #[test]
    fn attributes_are_kept_on_elements() {
        let doc = build_dom(&[Token::StartTag {
            name: "a".to_string(),
            attributes: vec![Attribute::new("id", "x"), Attribute::new("id", "y")],
            self_closing: true,
        }])
        .expect("tree");
        let a = doc.children(doc.root())[0];
        assert_eq!(doc.element(a).and_then(Element::id), Some("x"));
    }
}
