use super::{Tokenizer, TokenizerConfig, tokenize};
use crate::error::ParseErrorCode;
use crate::types::{Attribute, Token};

fn fmt_all(input: &str) -> Vec<String> {
    tokenize(input).iter().map(ToString::to_string).collect()
}

fn start_tag(stream: &[Token], index: usize) -> (&str, &[Attribute], bool) {
    match &stream[index] {
        Token::StartTag {
            name,
            attributes,
            self_closing,
        } => (name.as_str(), attributes.as_slice(), *self_closing),
        other => panic!("expected start tag at {index}, got {other}"),
    }
}

fn error_codes(input: &str) -> Vec<ParseErrorCode> {
    tokenize(input).errors().iter().map(|e| e.code).collect()
}

#[test]
fn data_emits_one_token_per_character() {
    assert_eq!(
        fmt_all("ab"),
        vec!["CHAR \"a\"", "CHAR \"b\"", "EOF"],
        "text must be emitted character by character"
    );
}

#[test]
fn simple_element_round() {
    assert_eq!(fmt_all("<a></a>"), vec!["START name=a", "END name=a", "EOF"]);
}

#[test]
fn tag_names_are_lowercased() {
    assert_eq!(
        fmt_all("<DiV></DIV>"),
        vec!["START name=div", "END name=div", "EOF"]
    );
}

#[test]
fn self_closing_tag_is_flagged() {
    let stream = tokenize("<a />");
    let (name, attrs, self_closing) = start_tag(stream.tokens(), 0);
    assert_eq!(name, "a");
    assert!(attrs.is_empty());
    assert!(self_closing);
    assert!(stream.errors().is_empty(), "got {:?}", stream.errors());
}

#[test]
fn attribute_value_forms_agree() {
    for input in ["<a href=\"X\">", "<a href='X'>", "<a href=X>"] {
        let stream = tokenize(input);
        let (_, attrs, _) = start_tag(stream.tokens(), 0);
        assert_eq!(attrs, &[Attribute::new("href", "X")], "input: {input}");
        assert!(stream.errors().is_empty(), "input {input}: {:?}", stream.errors());
    }
}

#[test]
fn valueless_attributes_have_empty_values() {
    let stream = tokenize("<a href id></a>");
    let (_, attrs, _) = start_tag(stream.tokens(), 0);
    assert_eq!(attrs, &[Attribute::new("href", ""), Attribute::new("id", "")]);
}

#[test]
fn trailing_attribute_before_self_closing_is_kept() {
    let stream = tokenize("<a href=\"//x\" id />");
    let (_, attrs, self_closing) = start_tag(stream.tokens(), 0);
    assert!(self_closing);
    assert_eq!(
        attrs,
        &[Attribute::new("href", "//x"), Attribute::new("id", "")]
    );
}

#[test]
fn unquoted_value_then_self_closing() {
    let stream = tokenize("<a href=abc />");
    let (_, attrs, self_closing) = start_tag(stream.tokens(), 0);
    assert!(self_closing);
    assert_eq!(attrs, &[Attribute::new("href", "abc")]);
}

#[test]
fn duplicate_attributes_are_preserved_in_order() {
    let stream = tokenize("<p class=a class=b>");
    let (_, attrs, _) = start_tag(stream.tokens(), 0);
    assert_eq!(
        attrs,
        &[Attribute::new("class", "a"), Attribute::new("class", "b")]
    );
}

#[test]
fn quoted_values_keep_blanks_and_other_quote() {
    let stream = tokenize("<p title='say \"hi\" now' data-x=\"it's\">");
    let (_, attrs, _) = start_tag(stream.tokens(), 0);
    assert_eq!(
        attrs,
        &[
            Attribute::new("title", "say \"hi\" now"),
            Attribute::new("data-x", "it's"),
        ]
    );
}

#[test]
fn quoted_attribute_committed_once() {
    // Closing quote commits, and `>` commits again: the second is a no-op.
    let stream = tokenize("<a id=\"one\">");
    let (_, attrs, _) = start_tag(stream.tokens(), 0);
    assert_eq!(attrs.len(), 1);
}

#[test]
fn missing_whitespace_between_attributes_is_recoverable() {
    let stream = tokenize("<a x=\"1\"y=\"2\">t</a>");
    let (_, attrs, _) = start_tag(stream.tokens(), 0);
    assert_eq!(attrs, &[Attribute::new("x", "1"), Attribute::new("y", "2")]);
    assert_eq!(
        stream.errors().iter().map(|e| e.code).collect::<Vec<_>>(),
        vec![ParseErrorCode::MissingWhitespaceBetweenAttributes]
    );
    assert_eq!(stream.tokens().last(), Some(&Token::Eof));
}

#[test]
fn stray_equals_before_attribute_name() {
    assert_eq!(
        error_codes("<a =x>"),
        vec![ParseErrorCode::UnexpectedEqualsSignBeforeAttributeName]
    );
    let stream = tokenize("<a =x>");
    let (_, attrs, _) = start_tag(stream.tokens(), 0);
    assert_eq!(attrs, &[Attribute::new("x", "")]);
}

#[test]
fn missing_attribute_value_still_emits_tag() {
    let stream = tokenize("<a href=>");
    assert_eq!(
        stream.errors().iter().map(|e| e.code).collect::<Vec<_>>(),
        vec![ParseErrorCode::MissingAttributeValue]
    );
    let (name, attrs, _) = start_tag(stream.tokens(), 0);
    assert_eq!(name, "a");
    assert_eq!(attrs, &[Attribute::new("href", "")]);
}

#[test]
fn bad_characters_are_reported_and_dropped() {
    let stream = tokenize("<a b\"c=d`e>");
    let (_, attrs, _) = start_tag(stream.tokens(), 0);
    assert_eq!(attrs, &[Attribute::new("bc", "de")]);
    assert_eq!(
        stream.errors().iter().map(|e| e.code).collect::<Vec<_>>(),
        vec![
            ParseErrorCode::UnexpectedCharacterInAttributeName,
            ParseErrorCode::UnexpectedCharacterInUnquotedAttributeValue,
        ]
    );
}

#[test]
fn null_character_in_quoted_value_is_an_error() {
    let stream = tokenize("<a v=\"x\0y\">");
    let (_, attrs, _) = start_tag(stream.tokens(), 0);
    assert_eq!(attrs, &[Attribute::new("v", "xy")]);
    assert_eq!(stream.errors()[0].code, ParseErrorCode::UnexpectedNullCharacter);
    assert_eq!(stream.errors()[0].position, 7);
}

#[test]
fn unexpected_solidus_recovers_to_attributes() {
    let stream = tokenize("<a / id=1>");
    let (_, attrs, self_closing) = start_tag(stream.tokens(), 0);
    assert!(!self_closing);
    assert_eq!(attrs, &[Attribute::new("id", "1")]);
    assert_eq!(
        stream.errors()[0].code,
        ParseErrorCode::UnexpectedSolidusInTag
    );
}

#[test]
fn end_tag_open_errors_emit_no_tag() {
    assert_eq!(fmt_all("</>x"), vec!["CHAR \"x\"", "EOF"]);
    assert_eq!(error_codes("</>x"), vec![ParseErrorCode::MissingEndTagName]);

    assert_eq!(fmt_all("</1"), vec!["CHAR \"1\"", "EOF"]);
    assert_eq!(
        error_codes("</1"),
        vec![ParseErrorCode::InvalidFirstCharacterOfTagName]
    );
}

#[test]
fn lone_lt_before_non_letter_reprocesses_in_data() {
    assert_eq!(fmt_all("< b"), vec!["CHAR \" \"", "CHAR \"b\"", "EOF"]);
}

#[test]
fn end_of_input_inside_tag_aborts_token_and_halts() {
    for (input, code) in [
        ("<", ParseErrorCode::EofBeforeTagName),
        ("</", ParseErrorCode::EofBeforeTagName),
        ("<div", ParseErrorCode::EofInTag),
        ("<a href", ParseErrorCode::EofInTag),
        ("<a href=\"x", ParseErrorCode::EofInTag),
        ("<a href=x", ParseErrorCode::EofInTag),
        ("<a href='x'", ParseErrorCode::EofInTag),
        ("<a /", ParseErrorCode::EofInTag),
    ] {
        assert_eq!(fmt_all(input), vec!["EOF"], "input: {input}");
        let errors = tokenize(input).errors().to_vec();
        assert_eq!(errors.len(), 1, "input: {input}");
        assert_eq!(errors[0].code, code, "input: {input}");
        assert_eq!(errors[0].position, input.chars().count(), "input: {input}");
    }
}

#[test]
fn two_chunks_match_single_chunk_sequence() {
    fn run(chunks: &[&str]) -> Vec<String> {
        let mut tokenizer = Tokenizer::new(TokenizerConfig::default());
        let mut out = Vec::new();
        for chunk in chunks {
            tokenizer.push_str(chunk);
            out.extend(tokenizer.next_batch().iter().map(ToString::to_string));
        }
        tokenizer.finish();
        out.extend(tokenizer.next_batch().iter().map(ToString::to_string));
        out
    }

    let whole = run(&["<div class='a b'>Hi</div>"]);
    let chunked = run(&["<di", "v cla", "ss='a ", "b'>H", "i</d", "iv>"]);
    assert_eq!(whole, chunked, "token sequence must be chunk-invariant");
}

#[test]
fn finish_is_idempotent_and_input_after_halt_is_ignored() {
    let mut tokenizer = Tokenizer::new(TokenizerConfig::default());
    tokenizer.finish();
    tokenizer.finish();
    assert!(tokenizer.is_halted());
    tokenizer.push_str("<late>");
    assert_eq!(tokenizer.next_batch(), vec![Token::Eof]);
}

#[test]
fn eof_token_can_be_disabled() {
    let mut tokenizer = Tokenizer::new(TokenizerConfig { emit_eof: false });
    tokenizer.push_str("<a>");
    tokenizer.finish();
    let tokens = tokenizer.next_batch();
    assert_eq!(tokens.len(), 1);
    assert!(tokenizer.is_halted());
}

#[test]
fn stats_count_emitted_tokens() {
    let mut tokenizer = Tokenizer::new(TokenizerConfig::default());
    tokenizer.push_str("<p>ok</p>");
    tokenizer.finish();
    let stats = tokenizer.stats();
    assert_eq!(stats.tokens_emitted, 5);
    assert!(stats.steps >= 9);
    assert!(stats.state_transitions > 0);
}

#[test]
fn non_ascii_text_and_values_survive() {
    let stream = tokenize("<p data=naïve>é</p>");
    let (_, attrs, _) = start_tag(stream.tokens(), 0);
    assert_eq!(attrs, &[Attribute::new("data", "naïve")]);
    assert_eq!(stream.tokens()[1], Token::Text('é'));
}

#[test]
fn tons_of_angle_brackets_terminate() {
    let input = "<".repeat(10_000);
    let stream = tokenize(&input);
    assert_eq!(stream.tokens(), &[Token::Eof]);
}
