//! Scanner for Lox
//!
//! Converts raw source bytes into a stream of tokens. The scanner is an
//! iterator: each call to `next` produces one token (or one lexical error)
//! and scanning carries on past errors, so a single pass reports all of them.
//! The stream always ends with exactly one `Eof` token.
#![allow(dead_code)]

use crate::frontend::token::{Token, TokenKind};
use crate::frontend::value::Value;
use crate::utils::{Error, Result, Span};
use log::{debug, trace};
use std::fs;
use std::iter::FusedIterator;
use std::path::Path;

/// The scanner state
pub struct Scanner {
    /// Source code as bytes, read once
    source: Vec<u8>,
    /// Current position in source
    pos: usize,
    /// Start position of current token
    start: usize,
    /// Current 1-based line
    line: usize,
    /// Line the current token started on
    start_line: usize,
    /// Set once `Eof` has been yielded
    done: bool,
}

impl Scanner {
    /// Create a new scanner over the given source
    pub fn new(source: impl Into<Vec<u8>>) -> Self {
        Self {
            source: source.into(),
            pos: 0,
            start: 0,
            line: 1,
            start_line: 1,
            done: false,
        }
    }

    /// Read the whole file at `path` and scan it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read(path).map_err(|e| Error::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!("read {} bytes from {}", source.len(), path.display());
        Ok(Self::new(source))
    }

    /// Line the cursor is currently on
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the current byte without advancing
    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    /// Advance to the next byte
    fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Consume the next byte if it equals `expected`
    fn match_byte(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos, self.start_line)
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.source[self.start..self.pos]).into_owned()
    }

    /// Create a token whose lexeme is the text scanned so far
    fn make_token(&self, kind: TokenKind, literal: Option<Value>) -> Token {
        Token::new(kind, self.text(), literal, self.make_span())
    }

    /// Move the cursor to the end of the current line, leaving the newline
    /// itself to be counted by the main loop
    fn skip_line(&mut self) {
        match self.source[self.pos..].iter().position(|&b| b == b'\n') {
            Some(offset) => self.pos += offset,
            None => self.pos = self.source.len(),
        }
    }

    /// Read a number literal: digits and dots, greedily. Text that does not
    /// parse as a float (`1.2.3`) becomes `0`.
    fn read_number(&mut self) -> Token {
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() || b == b'.' {
                self.advance();
            } else {
                break;
            }
        }

        let value = self.text().parse().unwrap_or(0.0);
        self.make_token(TokenKind::Number, Some(Value::Number(value)))
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = self.text();
        match TokenKind::keyword_from_str(&text) {
            Some(kind) => Token::simple(kind, self.make_span()),
            None => self.make_token(TokenKind::Identifier, Some(Value::String(text))),
        }
    }

    /// Read a string literal; the opening quote is already consumed
    fn read_string(&mut self) -> Result<Token> {
        let Some(len) = self.source[self.pos..].iter().position(|&b| b == b'"') else {
            self.skip_line();
            return Err(Error::UnterminatedString { span: self.make_span() });
        };

        let content = &self.source[self.pos..self.pos + len];
        self.line += content.iter().filter(|&&b| b == b'\n').count();
        let value = String::from_utf8_lossy(content).into_owned();
        self.pos += len + 1;

        Ok(self.make_token(TokenKind::String, Some(Value::String(value))))
    }

    /// Report the character starting at `self.start`. A multi-byte UTF-8
    /// sequence is reported once, as one character.
    fn unexpected_char(&mut self, lead: u8) -> Error {
        let width = match lead {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        let end = (self.start + width).min(self.source.len());
        let decoded = std::str::from_utf8(&self.source[self.start..end])
            .ok()
            .and_then(|s| s.chars().next());

        let ch = match decoded {
            Some(ch) => {
                self.pos = end;
                ch
            }
            None => char::REPLACEMENT_CHARACTER,
        };

        Error::UnexpectedChar { ch, span: self.make_span() }
    }

    /// Get the next token. Whitespace and comments are skipped; the loop
    /// consumes at least one byte per iteration.
    fn next_token(&mut self) -> Result<Token> {
        let mut iterations = 0;

        loop {
            iterations += 1;
            debug_assert!(
                iterations <= self.source.len() + 1,
                "scanner stopped making progress at offset {}",
                self.pos
            );

            self.start = self.pos;
            self.start_line = self.line;

            let Some(b) = self.advance() else {
                self.done = true;
                return Ok(Token::eof(self.make_span()));
            };

            trace!("line {}: dispatching {:?}", self.line, b as char);

            match b {
                b'\n' => {
                    self.line += 1;
                }
                b' ' | b'\t' => {}
                b'/' if self.peek() == Some(b'/') => self.skip_line(),
                b'/' => return Ok(Token::simple(TokenKind::Slash, self.make_span())),
                b'"' => return self.read_string(),
                b if b.is_ascii_digit() => return Ok(self.read_number()),
                b if b.is_ascii_alphabetic() || b == b'_' => return Ok(self.read_identifier()),
                b => {
                    if let Some(kind) = TokenKind::single_char(b) {
                        return Ok(Token::simple(kind, self.make_span()));
                    }
                    if let Some((single, double)) = TokenKind::with_equal(b) {
                        let kind = if self.match_byte(b'=') { double } else { single };
                        return Ok(Token::simple(kind, self.make_span()));
                    }
                    return Err(self.unexpected_char(b));
                }
            }
        }
    }

    /// Scan the entire source and return all tokens and errors
    pub fn tokenize(&mut self) -> Vec<Result<Token>> {
        self.collect()
    }
}

impl Iterator for Scanner {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = self.next_token();
        if let Err(e) = &item {
            debug!("scan error: {}", e.report());
        }
        Some(item)
    }
}

impl FusedIterator for Scanner {}
