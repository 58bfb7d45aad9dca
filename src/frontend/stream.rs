//! Pull-based token stream
//!
//! Wraps any token producer (normally the [`Scanner`](crate::frontend::lexer::Scanner))
//! so the parser can fetch one token at a time. At most one token is held:
//! the one a `peek` has looked at but nobody has pulled yet.

use crate::frontend::token::Token;
use crate::utils::Result;

pub struct TokenStream<I>
where
    I: Iterator<Item = Result<Token>>,
{
    tokens: I,
    peeked: Option<Result<Token>>,
}

impl<I> TokenStream<I>
where
    I: Iterator<Item = Result<Token>>,
{
    pub fn new(tokens: I) -> Self {
        Self { tokens, peeked: None }
    }

    /// Take the next token, or `None` once the producer is exhausted
    pub fn pull(&mut self) -> Option<Result<Token>> {
        self.peeked.take().or_else(|| self.tokens.next())
    }

    /// Look at the next token without consuming it
    pub fn peek(&mut self) -> Option<&Result<Token>> {
        if self.peeked.is_none() {
            self.peeked = self.tokens.next();
        }
        self.peeked.as_ref()
    }

    /// True once nothing is left to pull
    pub fn is_exhausted(&mut self) -> bool {
        self.peek().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Scanner;
    use crate::frontend::token::TokenKind;

    #[test]
    fn test_pull_in_order() {
        let mut stream = TokenStream::new(Scanner::new("1 +"));

        assert_eq!(stream.pull().unwrap().unwrap().kind, TokenKind::Number);
        assert_eq!(stream.pull().unwrap().unwrap().kind, TokenKind::Plus);
        assert_eq!(stream.pull().unwrap().unwrap().kind, TokenKind::Eof);
        assert!(stream.pull().is_none());
        assert!(stream.is_exhausted());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut stream = TokenStream::new(Scanner::new("("));

        let peeked = stream.peek().unwrap().as_ref().unwrap().kind;
        assert_eq!(peeked, TokenKind::LeftParen);
        assert!(!stream.is_exhausted());
        assert_eq!(stream.pull().unwrap().unwrap().kind, TokenKind::LeftParen);
        assert_eq!(stream.pull().unwrap().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_errors_pass_through() {
        let mut stream = TokenStream::new(Scanner::new("@"));

        assert!(stream.pull().unwrap().is_err());
        assert_eq!(stream.pull().unwrap().unwrap().kind, TokenKind::Eof);
    }
}
