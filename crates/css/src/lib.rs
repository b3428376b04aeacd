pub mod cascade;
pub mod computed;
pub mod selector;
pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use cascade::{Cascade, CascadeConfig, RuleStore, get_inline_style};
pub use computed::{FlexContainerStyle, FlexItemStyle};
pub use selector::{Compound, Selector};
pub use syntax::{
    Declaration, Rule, SimpleStylesheetParser, StylesheetErrorKind, StylesheetParseError,
    StylesheetParser, parse_declarations, parse_stylesheet,
};
pub use values::{
    AlignContent, AlignItems, Display, FlexDirection, FlexWrap, JustifyContent, coerce_px,
};
