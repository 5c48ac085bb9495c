//! logos-based lexer for controller status lines.
//!
//! The firmware prints whitespace-separated `KEY=value` readings, e.g.
//! `SW1=0 SW2=1 POT=512`. A line may carry any subset of keys. Bare words
//! (boot banners and similar chatter) are skipped.

use logos::Logos;

use super::DeviceError;

/// Status line token.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token<'a> {
    /// `KEY=123`
    #[regex(r"[A-Za-z][A-Za-z0-9]*=-?[0-9]+", reading, priority = 3)]
    Reading((&'a str, i64)),

    /// `KEY=` followed by something that is not an integer.
    #[regex(r"[A-Za-z][A-Za-z0-9]*=[^ \t\r\n]*", |lex| lex.slice(), priority = 1)]
    BadReading(&'a str),

    /// Anything without `=`.
    #[regex(r"[^ \t\r\n=]+", |lex| lex.slice())]
    Word(&'a str),
}

fn reading<'a>(lex: &mut logos::Lexer<'a, Token<'a>>) -> Option<(&'a str, i64)> {
    let (key, value) = lex.slice().split_once('=')?;
    Some((key, value.parse().ok()?))
}

/// One `KEY=value` pair from a status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub key: String,
    pub value: i64,
}

/// Parse every reading on `line`.
///
/// Fails on the first token that looks like a reading but has no integer
/// value, or that cannot be lexed at all.
pub fn parse_line(line: &str) -> Result<Vec<Reading>, DeviceError> {
    let mut lexer = Token::lexer(line);
    let mut readings = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::Reading((key, value))) => readings.push(Reading {
                key: key.to_owned(),
                value,
            }),
            Ok(Token::Word(_)) => {}
            Ok(Token::BadReading(text)) => {
                return Err(DeviceError::Malformed { token: text.to_owned() })
            }
            Err(()) => {
                return Err(DeviceError::Malformed { token: lexer.slice().to_owned() })
            }
        }
    }
    Ok(readings)
}
