//! Rule actions for the arithmetic grammar.
//!
//! The grammar is the classic expression/term/factor layering:
//!
//! ```text
//! expression : expression PLUS term
//!            | expression MINUS term
//!            | term
//! term       : term TIMES factor
//!            | term DIVIDE factor
//!            | factor
//! factor     : NUMBER
//!            | LPAREN expression RPAREN
//! ```
//!
//! Every base body evaluates immediately: it reads the numbers out of the
//! matched-symbol slots and writes the result into slot 0. Deferred
//! behaviors (symbolic construction, tracing) are attached as mode-scoped
//! subscribers in [`crate::modes`], not here.

use crate::slots::{ParseSlots, Value};
use rulact::{Action, Registry, RegistryError};

// The bodies extract with let-else because the driving parser only ever
// reduces a production over slots its grammar produced; a non-number in an
// operand slot cannot be reached from a well-formed reduction.

/// expression : expression PLUS term
fn expr_plus(p: &mut ParseSlots) {
    let Value::Number(lhs) = p[1].value else {
        unreachable!()
    };
    let Value::Number(rhs) = p[3].value else {
        unreachable!()
    };
    p[0].value = Value::Number(lhs + rhs);
}

/// expression : expression MINUS term
fn expr_minus(p: &mut ParseSlots) {
    let Value::Number(lhs) = p[1].value else {
        unreachable!()
    };
    let Value::Number(rhs) = p[3].value else {
        unreachable!()
    };
    p[0].value = Value::Number(lhs - rhs);
}

/// expression : term
fn expr_term(p: &mut ParseSlots) {
    p[0].value = p[1].value;
}

/// term : term TIMES factor
fn term_times(p: &mut ParseSlots) {
    let Value::Number(lhs) = p[1].value else {
        unreachable!()
    };
    let Value::Number(rhs) = p[3].value else {
        unreachable!()
    };
    p[0].value = Value::Number(lhs * rhs);
}

/// term : term DIVIDE factor
fn term_div(p: &mut ParseSlots) {
    let Value::Number(lhs) = p[1].value else {
        unreachable!()
    };
    let Value::Number(rhs) = p[3].value else {
        unreachable!()
    };
    p[0].value = Value::Number(lhs / rhs);
}

/// term : factor
fn term_factor(p: &mut ParseSlots) {
    p[0].value = p[1].value;
}

/// factor : NUMBER
fn factor_num(p: &mut ParseSlots) {
    p[0].value = p[1].value;
}

/// factor : LPAREN expression RPAREN
fn factor_expr(p: &mut ParseSlots) {
    p[0].value = p[2].value;
}

/// The arithmetic action table: every production of the grammar, declared
/// with the rule-action registry and wrapped for mode-scoped dispatch.
///
/// This is what the surrounding parser framework would consume: each field
/// is an [`Action`] whose [`rule`](Action::rule) text names the production
/// it belongs to.
#[derive(Debug, Clone)]
pub struct CalcActions {
    pub expr_plus: Action<ParseSlots>,
    pub expr_minus: Action<ParseSlots>,
    pub expr_term: Action<ParseSlots>,
    pub term_times: Action<ParseSlots>,
    pub term_div: Action<ParseSlots>,
    pub term_factor: Action<ParseSlots>,
    pub factor_num: Action<ParseSlots>,
    pub factor_expr: Action<ParseSlots>,
}

impl CalcActions {
    /// The declared name of every rule action, in grammar order.
    pub const NAMES: [&'static str; 8] = [
        "expr_plus",
        "expr_minus",
        "expr_term",
        "term_times",
        "term_div",
        "term_factor",
        "factor_num",
        "factor_expr",
    ];

    /// Declares all eight rule actions with `registry`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateRegistration`] if any of the names was
    /// already declared, e.g. when installing the module twice on one
    /// registry.
    pub fn try_new(registry: &Registry<ParseSlots>) -> Result<Self, RegistryError> {
        Ok(Self {
            expr_plus: registry.declare(
                "expr_plus",
                "expression : expression PLUS term",
                expr_plus,
            )?,
            expr_minus: registry.declare(
                "expr_minus",
                "expression : expression MINUS term",
                expr_minus,
            )?,
            expr_term: registry.declare("expr_term", "expression : term", expr_term)?,
            term_times: registry.declare("term_times", "term : term TIMES factor", term_times)?,
            term_div: registry.declare("term_div", "term : term DIVIDE factor", term_div)?,
            term_factor: registry.declare("term_factor", "term : factor", term_factor)?,
            factor_num: registry.declare("factor_num", "factor : NUMBER", factor_num)?,
            factor_expr: registry.declare(
                "factor_expr",
                "factor : LPAREN expression RPAREN",
                factor_expr,
            )?,
        })
    }

    /// All wrapped actions, for registration with an action table.
    pub fn iter(&self) -> impl Iterator<Item = &Action<ParseSlots>> {
        [
            &self.expr_plus,
            &self.expr_minus,
            &self.expr_term,
            &self.term_times,
            &self.term_div,
            &self.term_factor,
            &self.factor_num,
            &self.factor_expr,
        ]
        .into_iter()
    }
}
