//! Tag tokenizer and tree builder for a small HTML subset.
//!
//! Only tags, attributes and text are recognized. Comments, doctypes,
//! character references and raw-text elements are out of scope.

pub mod debug;
pub mod traverse;

mod dom_builder;
mod error;
mod tokenizer;
mod types;

pub use crate::dom_builder::{
    Ancestors, NoStyles, StyleResolver, TreeBuilder, TreeBuilderConfig, TreeBuilderError,
    TreeBuilderResult, build_dom,
};
pub use crate::error::{ParseError, ParseErrorCode};
pub use crate::tokenizer::{Tokenizer, TokenizerConfig, TokenizerStats, TokenStream, tokenize};
pub use crate::types::{Attribute, Document, Element, Id, Node, NodeData, NodeId, Token, attribute};
