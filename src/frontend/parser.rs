//! Parser for Lox expressions
//!
//! Recursive descent for prefix forms with Pratt parsing for binary operators.
//! Tokens are pulled lazily from a [`TokenStream`]; the parser never holds
//! more than the one token it has peeked at.

use crate::frontend::ast::{BinOp, Expr, UnOp};
use crate::frontend::stream::TokenStream;
use crate::frontend::token::{Token, TokenKind};
use crate::frontend::value::Value;
use crate::utils::{Error, Result, Span};
use log::debug;
use std::iter::FusedIterator;

/// Deepest expression tree the parser will build
pub const MAX_DEPTH: usize = 255;

/// The parser
pub struct Parser<I>
where
    I: Iterator<Item = Result<Token>>,
{
    tokens: TokenStream<I>,
    /// Span of the last token pulled, for a synthesized `Eof`
    last_span: Span,
    /// Set at end of input or after the first error
    halted: bool,
    /// Height of the tree under construction
    depth: usize,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token>>,
{
    /// Create a new parser pulling from a token producer
    pub fn new(tokens: I) -> Self {
        Self {
            tokens: TokenStream::new(tokens),
            last_span: Span::new(0, 0, 1),
            halted: false,
            depth: 0,
        }
    }

    // ==================== Helper Methods ====================

    /// Pull the next token. A producer that stops without an `Eof` is
    /// treated as if it had sent one.
    fn advance(&mut self) -> Result<Token> {
        match self.tokens.pull() {
            Some(Ok(token)) => {
                self.last_span = token.span;
                Ok(token)
            }
            Some(Err(e)) => Err(e),
            None => Ok(Token::eof(self.last_span)),
        }
    }

    /// Kind of the upcoming token, if it scanned cleanly
    fn peek_kind(&mut self) -> Option<TokenKind> {
        match self.tokens.peek() {
            Some(Ok(token)) => Some(token.kind),
            Some(Err(_)) | None => None,
        }
    }

    /// Go one level deeper, failing once the tree would exceed `MAX_DEPTH`
    fn enter(&mut self, token: &Token) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::TooDeep {
                found: token.location(),
                limit: MAX_DEPTH,
                span: token.span,
            });
        }
        Ok(())
    }

    /// Run `parse` one level deeper than the current node
    fn nested(&mut self, token: &Token, parse: impl FnOnce(&mut Self) -> Result<Expr>) -> Result<Expr> {
        self.enter(token)?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn token_to_binop(kind: TokenKind) -> Option<BinOp> {
        match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            TokenKind::EqualEqual => Some(BinOp::Eq),
            TokenKind::BangEqual => Some(BinOp::Ne),
            TokenKind::Less => Some(BinOp::Lt),
            TokenKind::LessEqual => Some(BinOp::Le),
            TokenKind::Greater => Some(BinOp::Gt),
            TokenKind::GreaterEqual => Some(BinOp::Ge),
            _ => None,
        }
    }

    // ==================== Parsing Methods ====================

    /// Parse the next top-level expression. Returns `None` at end of input
    /// and after an error has been returned.
    pub fn parse_expression(&mut self) -> Option<Result<Expr>> {
        if self.halted {
            return None;
        }

        if self.tokens.is_exhausted() || self.peek_kind() == Some(TokenKind::Eof) {
            self.halted = true;
            return None;
        }

        self.depth = 0;
        let result = self.parse_expr_bp(0);
        match &result {
            Ok(expr) => debug!("parsed expression {}", expr),
            Err(e) => {
                debug!("parse stopped: {}", e);
                self.halted = true;
            }
        }
        Some(result)
    }

    /// Parse expression with binding power (Pratt parsing). All binary
    /// operators are left-associative.
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        // each binary node in this chain sits one level above the previous one
        let mut chain = 0;

        loop {
            let Some(kind) = self.peek_kind() else {
                break;
            };
            let (Some(bp), Some(op)) = (kind.binary_precedence(), Self::token_to_binop(kind)) else {
                break;
            };

            if bp < min_bp {
                break;
            }

            let op_token = self.advance()?;
            self.enter(&op_token)?;
            chain += 1;

            let right = self.parse_expr_bp(bp + 1)?;
            left = Expr::binary(left, op, right);
        }

        self.depth -= chain;
        Ok(left)
    }

    /// Dispatch on the token that starts an expression
    fn parse_unary(&mut self) -> Result<Expr> {
        let token = self.advance()?;

        match token.kind {
            TokenKind::Number
            | TokenKind::String
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Nil => Ok(Expr::literal(token.literal.unwrap_or(Value::Nil))),

            TokenKind::LeftParen => self.nested(&token, Self::parse_grouping),

            TokenKind::Minus => self.nested(&token, |p| Ok(Expr::unary(UnOp::Neg, p.parse_unary()?))),
            TokenKind::Bang => self.nested(&token, |p| Ok(Expr::unary(UnOp::Not, p.parse_unary()?))),

            TokenKind::RightParen
            | TokenKind::LeftBrace
            | TokenKind::RightBrace
            | TokenKind::Comma
            | TokenKind::Dot
            | TokenKind::Plus
            | TokenKind::Semicolon
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Equal
            | TokenKind::EqualEqual
            | TokenKind::BangEqual
            | TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual
            | TokenKind::Identifier
            | TokenKind::And
            | TokenKind::Class
            | TokenKind::Else
            | TokenKind::For
            | TokenKind::Fun
            | TokenKind::If
            | TokenKind::Or
            | TokenKind::Print
            | TokenKind::Return
            | TokenKind::Super
            | TokenKind::This
            | TokenKind::Var
            | TokenKind::While
            | TokenKind::Eof => Err(Error::ExpectedExpr {
                found: token.location(),
                span: token.span,
            }),
        }
    }

    /// Parse the rest of `( expr )`; the opening paren is already consumed
    fn parse_grouping(&mut self) -> Result<Expr> {
        let inner = self.parse_expr_bp(0)?;

        let closing = self.advance()?;
        debug!("closing token {} at line {}", closing, closing.span.line);

        if closing.kind != TokenKind::RightParen {
            return Err(Error::ExpectedClosingParen {
                found: closing.location(),
                span: closing.span,
            });
        }

        Ok(Expr::grouping(inner))
    }
}

impl<I> Iterator for Parser<I>
where
    I: Iterator<Item = Result<Token>>,
{
    type Item = Result<Expr>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_expression()
    }
}

impl<I> FusedIterator for Parser<I> where I: Iterator<Item = Result<Token>> {}
