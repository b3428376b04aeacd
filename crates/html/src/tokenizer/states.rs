//! Tokenizer state machine definitions.
//!
//! The state set is the tag-level subset of the HTML tokenization algorithm:
//! no comments, doctypes, character references or raw-text states.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenizerState {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
}

/// Outcome of one state handler for the current input character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// The character was consumed.
    Consumed,
    /// Dispatch the same character again in the (new) current state.
    Reconsume,
}

/// Tab, line feed, form feed and space.
pub(crate) fn is_blank(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\u{000C}' | ' ')
}
