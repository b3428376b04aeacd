//! Stable one-line rendering of tokens for logs and tests.

use std::fmt;

use crate::types::Token;

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "START name={name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value.escape_debug())?;
                }
                if *self_closing {
                    f.write_str(" self_closing")?;
                }
                Ok(())
            }
            Token::EndTag { name } => write!(f, "END name={name}"),
            Token::Text(ch) => write!(f, "CHAR \"{}\"", ch.escape_debug()),
            Token::Eof => f.write_str("EOF"),
        }
    }
}
