//! # rulact
//!
//! A small extension layer for lexer/parser-generator toolchains: a
//! registry that keeps the mapping between grammar-rule actions and the
//! side effects that accompany them under different modes of parsing.
//!
//! A parser built for symbolic construction and a parser built for
//! immediate evaluation can share one set of grammar rules; the registry
//! lets each mode attach its own subscriber functions to the same named
//! rule actions instead of duplicating the grammar. The surrounding parser
//! framework stores the wrapped actions in its action table and invokes
//! them with a mutable parse-state value on every reduction; results are
//! communicated by mutating that value, following the rule-action calling
//! convention.
//!
//! ## Overview
//!
//! - [`Registry`] owns the tables: action name to per-mode subscriber
//!   lists, the set of modes any subscription has named, and the single
//!   active mode.
//! - [`Action`] is the wrapped rule action returned by
//!   [`Registry::declare`]. It carries the grammar-rule text it was
//!   declared with, unchanged, and dispatches base body plus active-mode
//!   subscribers on every call.
//! - [`RegistryError`] covers the three checked failures:
//!   [`DuplicateRegistration`](RegistryError::DuplicateRegistration),
//!   [`UnknownAction`](RegistryError::UnknownAction) and
//!   [`UnsubscribedMode`](RegistryError::UnsubscribedMode).
//!
//! ## Example
//!
//! ```rust
//! use rulact::{DEFAULT_MODE, Registry};
//!
//! let registry: Registry<Vec<i64>> = Registry::new();
//!
//! // Declared once; slot 0 of the parse state receives the result.
//! let add = registry
//!     .declare("add", "expr : expr PLUS expr", |p: &mut Vec<i64>| {
//!         p[0] = p[1] + p[2];
//!     })
//!     .unwrap();
//!
//! // A tracing mode, attached without touching the rule body.
//! registry
//!     .subscribe_modes(&["add"], &["trace"], |p: &mut Vec<i64>| {
//!         log::trace!("add reduced to {}", p[0]);
//!     })
//!     .unwrap();
//!
//! registry.set_mode("trace").unwrap();
//! let mut p = vec![0, 2, 3];
//! add.call(&mut p);
//! assert_eq!(p[0], 5);
//!
//! registry.set_mode(DEFAULT_MODE).unwrap();
//! ```
//!
//! The `rulact-calc` crate in this workspace shows a complete client: an
//! arithmetic rule-action module with an immediate-evaluation base and
//! symbolic-construction and tracing modes layered on top.

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{Action, DEFAULT_MODE, Registry};
