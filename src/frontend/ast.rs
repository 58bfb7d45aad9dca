//! Expression tree for Lox

use crate::frontend::value::Value;
use std::fmt;

/// An expression node. Composite nodes own their children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    Literal(Value),
    /// Parenthesized subexpression
    Grouping(Box<Expr>),
    /// Unary operation
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    /// Binary operation
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// -
    Neg,
    /// !
    Not,
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

impl Expr {
    pub fn literal(value: Value) -> Self {
        Expr::Literal(value)
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }

    pub fn unary(op: UnOp, operand: Expr) -> Self {
        Expr::Unary { op, operand: Box::new(operand) }
    }

    pub fn binary(left: Expr, op: BinOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Canonical parenthesized form: `(group (- 1.0))`, `(+ 1.0 2.0)`
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Grouping(inner) => write!(f, "(group {})", inner),
            Expr::Unary { op, operand } => write!(f, "({} {})", op.symbol(), operand),
            Expr::Binary { left, op, right } => write!(f, "({} {} {})", op.symbol(), left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested() {
        let expr = Expr::grouping(Expr::unary(UnOp::Neg, Expr::literal(Value::Number(1.0))));
        assert_eq!(expr.to_string(), "(group (- 1.0))");
    }

    #[test]
    fn test_render_binary() {
        let expr = Expr::binary(
            Expr::literal(Value::Number(2.5)),
            BinOp::Le,
            Expr::unary(UnOp::Not, Expr::literal(Value::Bool(true))),
        );
        assert_eq!(expr.to_string(), "(<= 2.5 (! true))");
    }

    #[test]
    fn test_render_literals() {
        assert_eq!(Expr::literal(Value::Nil).to_string(), "nil");
        assert_eq!(Expr::literal(Value::String("hi there".into())).to_string(), "hi there");
    }
}
