//! # rulact-calc
//!
//! A small demonstration crate built on **rulact**, providing a complete,
//! minimal example of a rule-action module for an arithmetic grammar.
//!
//! The grammar's eight productions are declared once, each carrying its
//! grammar-rule text for the surrounding parser generator, and evaluate
//! immediately by mutating the result slot of the shared parse state. Two
//! modes layer extra behavior over the same rules without duplicating
//! them:
//!
//! - `"cst"` builds a symbolic [`Term`] for every reduction alongside the
//!   evaluated number,
//! - `"trace"` logs every reduction through one shared subscriber.
//!
//! ## Overview
//!
//! - [`slots`] — [`ParseSlots`], the mutable parameter object a reduction
//!   receives; slot 0 is the result slot.
//! - [`term`] — [`Term`], the symbolic expression tree built in `"cst"`
//!   mode.
//! - [`actions`] — the rule-action bodies and [`CalcActions`], the
//!   declared action table.
//! - [`modes`] — [`attach_cst`] and [`attach_trace`], the mode-scoped
//!   subscriptions.
//!
//! ## Example
//!
//! ```rust
//! use rulact::Registry;
//! use rulact_calc::{CalcActions, MODE_CST, ParseSlots, Slot, Value, attach_cst};
//!
//! let registry = Registry::new();
//! let actions = CalcActions::try_new(&registry).unwrap();
//! attach_cst(&registry).unwrap();
//! registry.set_mode(MODE_CST).unwrap();
//!
//! // factor : NUMBER, reducing the literal 2
//! let mut p = ParseSlots::for_reduction(vec![Slot::number(2)]);
//! actions.factor_num.call(&mut p);
//!
//! assert_eq!(p[0].value, Value::Number(2));
//! assert_eq!(p[0].term.as_ref().unwrap().to_string(), "2");
//! ```

pub mod actions;
pub mod modes;
pub mod slots;
pub mod term;

pub use actions::CalcActions;
pub use modes::{MODE_CST, MODE_TRACE, attach_cst, attach_trace};
pub use slots::{ParseSlots, Slot, Value};
pub use term::{BinOp, Term};
