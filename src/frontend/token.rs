//! Token definitions for Lox

use crate::frontend::value::Value;
use crate::utils::Span;
use serde::Serialize;
use std::fmt;

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text, quotes included for strings
    pub lexeme: String,
    pub literal: Option<Value>,
    #[serde(flatten)]
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, literal: Option<Value>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            span,
        }
    }

    /// A token whose lexeme is fixed by its kind
    pub fn simple(kind: TokenKind, span: Span) -> Self {
        let literal = match kind {
            TokenKind::True => Some(Value::Bool(true)),
            TokenKind::False => Some(Value::Bool(false)),
            TokenKind::Nil => Some(Value::Nil),
            _ => None,
        };
        Self::new(kind, kind.lexeme().unwrap_or_default(), literal, span)
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", None, span)
    }

    /// Literal column of a token dump. Only number and string literals show
    /// their value there; keywords and identifiers print `null`.
    pub fn literal_text(&self) -> String {
        match &self.literal {
            Some(_) if self.kind == TokenKind::Identifier => "null".to_string(),
            Some(value) if value.is_number() || value.is_string() => value.to_string(),
            _ => "null".to_string(),
        }
    }

    /// How parse diagnostics name this token: `'lexeme'`, or `end` for EOF
    pub fn location(&self) -> String {
        if self.kind == TokenKind::Eof {
            "end".to_string()
        } else {
            format!("'{}'", self.lexeme)
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind.name(), self.lexeme, self.literal_text())
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // ============ Single-character punctuation ============
    /// (
    LeftParen,
    /// )
    RightParen,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ,
    Comma,
    /// .
    Dot,
    /// -
    Minus,
    /// +
    Plus,
    /// ;
    Semicolon,
    /// *
    Star,
    /// /
    Slash,

    // ============ One or two character operators ============
    /// =
    Equal,
    /// ==
    EqualEqual,
    /// !
    Bang,
    /// !=
    BangEqual,
    /// <
    Less,
    /// <=
    LessEqual,
    /// >
    Greater,
    /// >=
    GreaterEqual,

    // ============ Literals ============
    String,
    Number,
    Identifier,

    // ============ Keywords ============
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    // ============ Special ============
    /// End of file
    Eof,
}

impl TokenKind {
    /// Name used in token dumps (`LEFT_PAREN`, `BANG_EQUAL`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::For => "FOR",
            TokenKind::Fun => "FUN",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "EOF",
        }
    }

    /// Canonical lexeme for kinds whose text is fixed; `None` for literal
    /// classes whose text comes from the source.
    pub fn lexeme(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Minus => "-",
            TokenKind::Plus => "+",
            TokenKind::Semicolon => ";",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::Bang => "!",
            TokenKind::BangEqual => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::And => "and",
            TokenKind::Class => "class",
            TokenKind::Else => "else",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::Fun => "fun",
            TokenKind::If => "if",
            TokenKind::Nil => "nil",
            TokenKind::Or => "or",
            TokenKind::Print => "print",
            TokenKind::Return => "return",
            TokenKind::Super => "super",
            TokenKind::This => "this",
            TokenKind::True => "true",
            TokenKind::Var => "var",
            TokenKind::While => "while",
            TokenKind::Eof => "",
            TokenKind::String | TokenKind::Number | TokenKind::Identifier => return None,
        };
        Some(text)
    }

    /// Kind of a single byte that is a complete token on its own
    pub fn single_char(b: u8) -> Option<TokenKind> {
        match b {
            b'(' => Some(TokenKind::LeftParen),
            b')' => Some(TokenKind::RightParen),
            b'{' => Some(TokenKind::LeftBrace),
            b'}' => Some(TokenKind::RightBrace),
            b',' => Some(TokenKind::Comma),
            b'.' => Some(TokenKind::Dot),
            b'-' => Some(TokenKind::Minus),
            b'+' => Some(TokenKind::Plus),
            b';' => Some(TokenKind::Semicolon),
            b'*' => Some(TokenKind::Star),
            _ => None,
        }
    }

    /// For `= ! < >`: the one-character kind and its `=`-suffixed form
    pub fn with_equal(b: u8) -> Option<(TokenKind, TokenKind)> {
        match b {
            b'=' => Some((TokenKind::Equal, TokenKind::EqualEqual)),
            b'!' => Some((TokenKind::Bang, TokenKind::BangEqual)),
            b'<' => Some((TokenKind::Less, TokenKind::LessEqual)),
            b'>' => Some((TokenKind::Greater, TokenKind::GreaterEqual)),
            _ => None,
        }
    }

    /// Try to convert an identifier to a keyword
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "and" => Some(TokenKind::And),
            "class" => Some(TokenKind::Class),
            "else" => Some(TokenKind::Else),
            "false" => Some(TokenKind::False),
            "for" => Some(TokenKind::For),
            "fun" => Some(TokenKind::Fun),
            "if" => Some(TokenKind::If),
            "nil" => Some(TokenKind::Nil),
            "or" => Some(TokenKind::Or),
            "print" => Some(TokenKind::Print),
            "return" => Some(TokenKind::Return),
            "super" => Some(TokenKind::Super),
            "this" => Some(TokenKind::This),
            "true" => Some(TokenKind::True),
            "var" => Some(TokenKind::Var),
            "while" => Some(TokenKind::While),
            _ => None,
        }
    }

    /// Get the precedence of a binary operator (for Pratt parsing)
    /// Returns None if not a binary operator
    pub fn binary_precedence(&self) -> Option<u8> {
        match self {
            // Equality (lowest)
            TokenKind::EqualEqual | TokenKind::BangEqual => Some(1),

            // Comparison
            TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => Some(2),

            // Term
            TokenKind::Plus | TokenKind::Minus => Some(3),

            // Factor (highest for binary)
            TokenKind::Star | TokenKind::Slash => Some(4),

            _ => None,
        }
    }
}
