//! Symbolic terms built by the concrete-syntax-tree mode.

use std::fmt;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A symbolic rendition of a parsed expression.
///
/// Grouping is kept as an explicit node so the rendered form reproduces the
/// parenthesization of the source instead of re-deriving it from
/// precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Number(i64),
    Binary {
        op: BinOp,
        lhs: Box<Term>,
        rhs: Box<Term>,
    },
    Group(Box<Term>),
}

impl Term {
    pub fn binary(op: BinOp, lhs: Term, rhs: Term) -> Self {
        Term::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn group(inner: Term) -> Self {
        Term::Group(Box::new(inner))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Number(value) => write!(f, "{}", value),
            Term::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
            Term::Group(inner) => write!(f, "({})", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_binaries_without_extra_parens() {
        let term = Term::binary(
            BinOp::Add,
            Term::Number(1),
            Term::binary(BinOp::Mul, Term::Number(2), Term::Number(3)),
        );
        assert_eq!(term.to_string(), "1 + 2 * 3");
    }

    #[test]
    fn renders_groups_as_written() {
        let term = Term::binary(
            BinOp::Mul,
            Term::group(Term::binary(BinOp::Add, Term::Number(1), Term::Number(2))),
            Term::Number(3),
        );
        assert_eq!(term.to_string(), "(1 + 2) * 3");
    }

    #[test]
    fn renders_negative_numbers() {
        let term = Term::binary(BinOp::Div, Term::Number(-6), Term::Number(2));
        assert_eq!(term.to_string(), "-6 / 2");
    }
}
