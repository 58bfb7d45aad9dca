//! Frontend module - Scanner, token stream, Parser

pub mod value;
pub mod token;
pub mod lexer;
pub mod stream;
pub mod ast;
pub mod parser;
