//! Character-level tag tokenizer.
//!
//! The tokenizer is an explicit state machine driven one character at a time.
//! It is resumable at any chunk boundary: `push_str` may be called repeatedly,
//! and `finish` delivers the end-of-input marker.
//!
//! Invariants:
//! - Chunk-equivalence: feeding input in one chunk or many chunks yields the
//!   same token sequence.
//! - Every end-of-input path halts the machine; after halting, input is ignored.
//! - Parse errors are recorded and never stop tokenization.

use crate::error::{ParseError, ParseErrorCode};
use crate::types::{Attribute, Token};
use states::{Step, TokenizerState, is_blank};

mod states;
mod token_fmt;

/// Configuration for the tokenizer.
#[derive(Clone, Debug)]
pub struct TokenizerConfig {
    /// Emit an `Eof` token when the machine halts.
    pub emit_eof: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self { emit_eof: true }
    }
}

/// Minimal tokenizer instrumentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenizerStats {
    pub steps: u64,
    pub state_transitions: u64,
    pub tokens_emitted: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TagKind {
    Start,
    End,
}

#[derive(Debug)]
struct TagBuilder {
    kind: TagKind,
    name: String,
    attributes: Vec<Attribute>,
    self_closing: bool,
}

impl TagBuilder {
    fn new(kind: TagKind) -> Self {
        Self {
            kind,
            name: String::new(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }
}

/// Tokens and errors from a whole-input run.
#[derive(Debug, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl TokenStream {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn into_parts(self) -> (Vec<Token>, Vec<ParseError>) {
        (self.tokens, self.errors)
    }
}

/// Tokenize a complete input.
pub fn tokenize(input: &str) -> TokenStream {
    let mut tokenizer = Tokenizer::new(TokenizerConfig::default());
    tokenizer.push_str(input);
    tokenizer.finish();
    TokenStream {
        tokens: tokenizer.next_batch(),
        errors: tokenizer.take_errors(),
    }
}

pub struct Tokenizer {
    config: TokenizerConfig,
    state: TokenizerState,
    /// Characters consumed so far.
    position: usize,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
    current_tag: Option<TagBuilder>,
    pending_attribute: Option<Attribute>,
    halted: bool,
    stats: TokenizerStats,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            config,
            state: TokenizerState::Data,
            position: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
            current_tag: None,
            pending_attribute: None,
            halted: false,
            stats: TokenizerStats::default(),
        }
    }

    /// Feed more input. Tokens become available through `next_batch`.
    pub fn push_str(&mut self, text: &str) {
        if self.halted {
            log::warn!(
                target: "html.tokenizer",
                "ignoring {} bytes pushed after end of input",
                text.len()
            );
            return;
        }
        for ch in text.chars() {
            self.feed(Some(ch));
            self.position += 1;
        }
    }

    /// Deliver the end-of-input marker. Idempotent.
    pub fn finish(&mut self) {
        if !self.halted {
            self.feed(None);
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Drain the tokens produced since the last call.
    pub fn next_batch(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.tokens)
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    pub fn stats(&self) -> TokenizerStats {
        self.stats
    }

    fn feed(&mut self, input: Option<char>) {
        // Every reconsume switches state, and no state reconsumes into itself,
        // so a character is dispatched a small bounded number of times.
        let mut dispatches = 0u8;
        loop {
            dispatches += 1;
            debug_assert!(dispatches < 8, "reconsume loop in {:?}", self.state);
            self.stats.steps = self.stats.steps.saturating_add(1);
            let step = self.step(input);
            if self.halted || step == Step::Consumed {
                break;
            }
        }
    }

    fn step(&mut self, input: Option<char>) -> Step {
        match self.state {
            TokenizerState::Data => self.step_data(input),
            TokenizerState::TagOpen => self.step_tag_open(input),
            TokenizerState::EndTagOpen => self.step_end_tag_open(input),
            TokenizerState::TagName => self.step_tag_name(input),
            TokenizerState::BeforeAttributeName => self.step_before_attribute_name(input),
            TokenizerState::AttributeName => self.step_attribute_name(input),
            TokenizerState::AfterAttributeName => self.step_after_attribute_name(input),
            TokenizerState::BeforeAttributeValue => self.step_before_attribute_value(input),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.step_attribute_value_quoted(input, '"')
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.step_attribute_value_quoted(input, '\'')
            }
            TokenizerState::AttributeValueUnquoted => self.step_attribute_value_unquoted(input),
            TokenizerState::AfterAttributeValueQuoted => {
                self.step_after_attribute_value_quoted(input)
            }
            TokenizerState::SelfClosingStartTag => self.step_self_closing_start_tag(input),
        }
    }

    fn transition_to(&mut self, next: TokenizerState) {
        if self.state == next {
            return;
        }
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "html.tokenizer",
            "state {:?} -> {:?} @{}",
            self.state,
            next,
            self.position
        );
        self.state = next;
        self.stats.state_transitions = self.stats.state_transitions.saturating_add(1);
    }

    fn reconsume_in(&mut self, next: TokenizerState) -> Step {
        self.transition_to(next);
        Step::Reconsume
    }

    fn switch_to(&mut self, next: TokenizerState) -> Step {
        self.transition_to(next);
        Step::Consumed
    }

    fn step_data(&mut self, input: Option<char>) -> Step {
        match input {
            Some('<') => self.switch_to(TokenizerState::TagOpen),
            Some(ch) => {
                self.emit_token(Token::Text(ch));
                Step::Consumed
            }
            None => {
                self.halt();
                Step::Consumed
            }
        }
    }

    fn step_tag_open(&mut self, input: Option<char>) -> Step {
        match input {
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            Some(ch) if ch.is_ascii_alphabetic() => {
                self.current_tag = Some(TagBuilder::new(TagKind::Start));
                self.reconsume_in(TokenizerState::TagName)
            }
            Some(_) => self.reconsume_in(TokenizerState::Data),
            None => {
                self.parse_error(ParseErrorCode::EofBeforeTagName);
                self.halt();
                Step::Consumed
            }
        }
    }

    fn step_end_tag_open(&mut self, input: Option<char>) -> Step {
        match input {
            Some(ch) if ch.is_ascii_alphabetic() => {
                self.current_tag = Some(TagBuilder::new(TagKind::End));
                self.reconsume_in(TokenizerState::TagName)
            }
            Some('>') => {
                self.parse_error(ParseErrorCode::MissingEndTagName);
                self.switch_to(TokenizerState::Data)
            }
            Some(_) => {
                self.parse_error(ParseErrorCode::InvalidFirstCharacterOfTagName);
                self.reconsume_in(TokenizerState::Data)
            }
            None => {
                self.parse_error(ParseErrorCode::EofBeforeTagName);
                self.halt();
                Step::Consumed
            }
        }
    }

    fn step_tag_name(&mut self, input: Option<char>) -> Step {
        match input {
            Some(ch) if is_blank(ch) => self.switch_to(TokenizerState::BeforeAttributeName),
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.emit_current_tag();
                self.switch_to(TokenizerState::Data)
            }
            Some(ch) => {
                if let Some(tag) = self.current_tag.as_mut() {
                    tag.name.extend(ch.to_lowercase());
                }
                Step::Consumed
            }
            None => self.eof_in_tag(),
        }
    }

    fn step_before_attribute_name(&mut self, input: Option<char>) -> Step {
        match input {
            Some(ch) if is_blank(ch) => Step::Consumed,
            Some('/') | Some('>') | None => {
                self.reconsume_in(TokenizerState::AfterAttributeName)
            }
            Some('=') => {
                self.parse_error(ParseErrorCode::UnexpectedEqualsSignBeforeAttributeName);
                self.start_attribute();
                self.switch_to(TokenizerState::AttributeName)
            }
            Some(_) => {
                self.start_attribute();
                self.reconsume_in(TokenizerState::AttributeName)
            }
        }
    }

    fn step_attribute_name(&mut self, input: Option<char>) -> Step {
        match input {
            Some(ch) if is_blank(ch) => self.reconsume_in(TokenizerState::AfterAttributeName),
            Some('/') | Some('>') | None => {
                self.reconsume_in(TokenizerState::AfterAttributeName)
            }
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                Step::Consumed
            }
            Some('"') | Some('\'') | Some('<') => {
                self.parse_error(ParseErrorCode::UnexpectedCharacterInAttributeName);
                Step::Consumed
            }
            Some(ch) => {
                self.pending_attribute_mut().name.push(ch);
                Step::Consumed
            }
        }
    }

    fn step_after_attribute_name(&mut self, input: Option<char>) -> Step {
        match input {
            Some(ch) if is_blank(ch) => Step::Consumed,
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.emit_current_tag();
                self.switch_to(TokenizerState::Data)
            }
            Some(_) => {
                self.commit_attribute();
                self.start_attribute();
                self.reconsume_in(TokenizerState::AttributeName)
            }
            None => self.eof_in_tag(),
        }
    }

    fn step_before_attribute_value(&mut self, input: Option<char>) -> Step {
        match input {
            Some(ch) if is_blank(ch) => Step::Consumed,
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            Some('>') => {
                self.parse_error(ParseErrorCode::MissingAttributeValue);
                self.emit_current_tag();
                self.switch_to(TokenizerState::Data)
            }
            Some(_) | None => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    fn step_attribute_value_quoted(&mut self, input: Option<char>, quote: char) -> Step {
        match input {
            Some(ch) if ch == quote => {
                self.commit_attribute();
                self.switch_to(TokenizerState::AfterAttributeValueQuoted)
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                Step::Consumed
            }
            Some(ch) => {
                self.pending_attribute_mut().value.push(ch);
                Step::Consumed
            }
            None => self.eof_in_tag(),
        }
    }

    fn step_attribute_value_unquoted(&mut self, input: Option<char>) -> Step {
        match input {
            Some(ch) if is_blank(ch) => {
                self.commit_attribute();
                self.switch_to(TokenizerState::BeforeAttributeName)
            }
            Some('>') => {
                self.emit_current_tag();
                self.switch_to(TokenizerState::Data)
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                Step::Consumed
            }
            Some('"') | Some('\'') | Some('<') | Some('=') | Some('`') => {
                self.parse_error(ParseErrorCode::UnexpectedCharacterInUnquotedAttributeValue);
                Step::Consumed
            }
            Some(ch) => {
                self.pending_attribute_mut().value.push(ch);
                Step::Consumed
            }
            None => self.eof_in_tag(),
        }
    }

    fn step_after_attribute_value_quoted(&mut self, input: Option<char>) -> Step {
        match input {
            Some(ch) if is_blank(ch) => self.switch_to(TokenizerState::BeforeAttributeName),
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.emit_current_tag();
                self.switch_to(TokenizerState::Data)
            }
            Some(_) => {
                self.parse_error(ParseErrorCode::MissingWhitespaceBetweenAttributes);
                self.reconsume_in(TokenizerState::BeforeAttributeName)
            }
            None => self.eof_in_tag(),
        }
    }

    fn step_self_closing_start_tag(&mut self, input: Option<char>) -> Step {
        match input {
            Some('>') => {
                if let Some(tag) = self.current_tag.as_mut() {
                    tag.self_closing = true;
                }
                self.emit_current_tag();
                self.switch_to(TokenizerState::Data)
            }
            Some(_) => {
                self.parse_error(ParseErrorCode::UnexpectedSolidusInTag);
                self.reconsume_in(TokenizerState::BeforeAttributeName)
            }
            None => self.eof_in_tag(),
        }
    }

    fn eof_in_tag(&mut self) -> Step {
        self.parse_error(ParseErrorCode::EofInTag);
        self.halt();
        Step::Consumed
    }

    /// Terminal transition: drop any unfinished tag and emit `Eof`.
    fn halt(&mut self) {
        if let Some(tag) = self.current_tag.take() {
            log::debug!(
                target: "html.tokenizer",
                "dropping unterminated tag <{}> at end of input",
                tag.name
            );
        }
        self.pending_attribute = None;
        if self.config.emit_eof {
            self.emit_token(Token::Eof);
        }
        self.halted = true;
    }

    fn start_attribute(&mut self) {
        self.pending_attribute = Some(Attribute::new(String::new(), String::new()));
    }

    fn pending_attribute_mut(&mut self) -> &mut Attribute {
        self.pending_attribute
            .get_or_insert_with(|| Attribute::new(String::new(), String::new()))
    }

    /// Move the pending attribute onto the current tag. A no-op when nothing is
    /// pending, so committing twice never duplicates an attribute.
    fn commit_attribute(&mut self) {
        let Some(attribute) = self.pending_attribute.take() else {
            return;
        };
        if attribute.name.is_empty() {
            log::debug!(
                target: "html.tokenizer",
                "dropping attribute with empty name @{}",
                self.position
            );
            return;
        }
        if let Some(tag) = self.current_tag.as_mut() {
            tag.attributes.push(attribute);
        }
    }

    fn emit_current_tag(&mut self) {
        self.commit_attribute();
        let Some(tag) = self.current_tag.take() else {
            return;
        };
        let token = match tag.kind {
            TagKind::Start => Token::StartTag {
                name: tag.name,
                attributes: tag.attributes,
                self_closing: tag.self_closing,
            },
            TagKind::End => {
                if !tag.attributes.is_empty() {
                    log::debug!(
                        target: "html.tokenizer",
                        "ignoring {} attribute(s) on end tag </{}>",
                        tag.attributes.len(),
                        tag.name
                    );
                }
                Token::EndTag { name: tag.name }
            }
        };
        self.emit_token(token);
    }

    fn emit_token(&mut self, token: Token) {
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(target: "html.tokenizer", "emit token: {token}");
        self.tokens.push(token);
        self.stats.tokens_emitted = self.stats.tokens_emitted.saturating_add(1);
    }

    fn parse_error(&mut self, code: ParseErrorCode) {
        let error = ParseError {
            code,
            position: self.position,
        };
        log::debug!(target: "html.tokenizer", "parse error: {error}");
        self.errors.push(error);
    }
}

#[cfg(test)]
mod tests;
