//! Line tokenizer: a deterministic state machine that splits one input line
//! into tokens, resolving quotes and escapes as it goes.
//!
//! Rules:
//! - Whitespace outside quotes separates tokens.
//! - Double quotes open a segment where whitespace is literal and `\` still
//!   escapes.
//! - Single quotes open a fully literal segment.
//! - `\n \t \r \\ \" \' \0` decode to their control characters; any other
//!   escaped character passes through unchanged.
//! - A token may interleave bare and quoted segments; it is marked quoted if
//!   any segment was quoted.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("unclosed quote")]
    UnclosedQuote,

    #[error("input ends in an escape sequence")]
    InvalidEscape,
}

/// One lexeme from the input line, escapes already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// True if any part of the token came from a quoted segment. The parser
    /// uses this to keep quoted tokens from being read as flags.
    pub quoted: bool,
}

impl Token {
    fn new(text: String, quoted: bool) -> Self {
        Self { text, quoted }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Initial,
    InToken,
    InSingleQuote,
    InDoubleQuote,
    Escape,
    EscapeInDoubleQuote,
}

fn resolve_escape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '\\' => '\\',
        '"' => '"',
        '\'' => '\'',
        '0' => '\0',
        other => other,
    }
}

/// Split `input` into tokens. Empty or all-whitespace input yields an empty
/// vector, not an error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut state = State::Initial;
    let mut buf = String::new();
    let mut quoted = false;

    for c in input.chars() {
        match state {
            State::Initial => {
                if c.is_ascii_whitespace() {
                    continue;
                } else if c == '"' {
                    state = State::InDoubleQuote;
                    quoted = true;
                } else if c == '\'' {
                    state = State::InSingleQuote;
                    quoted = true;
                } else if c == '\\' {
                    state = State::Escape;
                    quoted = false;
                } else {
                    buf.push(c);
                    state = State::InToken;
                    quoted = false;
                }
            }
            State::InToken => {
                if c.is_ascii_whitespace() {
                    tokens.push(Token::new(std::mem::take(&mut buf), quoted));
                    state = State::Initial;
                } else if c == '"' {
                    state = State::InDoubleQuote;
                    quoted = true;
                } else if c == '\'' {
                    state = State::InSingleQuote;
                    quoted = true;
                } else if c == '\\' {
                    state = State::Escape;
                } else {
                    buf.push(c);
                }
            }
            State::InSingleQuote => {
                if c == '\'' {
                    state = State::InToken;
                } else {
                    // No escape processing inside single quotes.
                    buf.push(c);
                }
            }
            State::InDoubleQuote => {
                if c == '"' {
                    state = State::InToken;
                } else if c == '\\' {
                    state = State::EscapeInDoubleQuote;
                } else {
                    buf.push(c);
                }
            }
            State::Escape => {
                buf.push(resolve_escape(c));
                state = State::InToken;
            }
            State::EscapeInDoubleQuote => {
                buf.push(resolve_escape(c));
                state = State::InDoubleQuote;
            }
        }
    }

    match state {
        State::InSingleQuote | State::InDoubleQuote => return Err(TokenizeError::UnclosedQuote),
        State::Escape | State::EscapeInDoubleQuote => return Err(TokenizeError::InvalidEscape),
        _ => {}
    }

    if !buf.is_empty() {
        tokens.push(Token::new(buf, quoted));
    }

    Ok(tokens)
}
