//! Recoverable tokenizer errors.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorCode {
    EofBeforeTagName,
    MissingEndTagName,
    InvalidFirstCharacterOfTagName,
    UnexpectedEqualsSignBeforeAttributeName,
    UnexpectedNullCharacter,
    UnexpectedCharacterInAttributeName,
    MissingAttributeValue,
    UnexpectedCharacterInUnquotedAttributeValue,
    MissingWhitespaceBetweenAttributes,
    UnexpectedSolidusInTag,
    EofInTag,
}

impl ParseErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ParseErrorCode::EofBeforeTagName => "eof-before-tag-name",
            ParseErrorCode::MissingEndTagName => "missing-end-tag-name",
            ParseErrorCode::InvalidFirstCharacterOfTagName => {
                "invalid-first-character-of-tag-name"
            }
            ParseErrorCode::UnexpectedEqualsSignBeforeAttributeName => {
                "unexpected-equals-sign-before-attribute-name"
            }
            ParseErrorCode::UnexpectedNullCharacter => "unexpected-null-character",
            ParseErrorCode::UnexpectedCharacterInAttributeName => {
                "unexpected-character-in-attribute-name"
            }
            ParseErrorCode::MissingAttributeValue => "missing-attribute-value",
            ParseErrorCode::UnexpectedCharacterInUnquotedAttributeValue => {
                "unexpected-character-in-unquoted-attribute-value"
            }
            ParseErrorCode::MissingWhitespaceBetweenAttributes => {
                "missing-whitespace-between-attributes"
            }
            ParseErrorCode::UnexpectedSolidusInTag => "unexpected-solidus-in-tag",
            ParseErrorCode::EofInTag => "eof-in-tag",
        }
    }
}

/// A recoverable tokenizer error. `position` counts characters from the start
/// of the input; end-of-input errors report the input length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub position: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at character {}", self.code.as_str(), self.position)
    }
}

impl std::error::Error for ParseError {}
