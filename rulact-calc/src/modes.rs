//! Mode-scoped subscribers layered over the arithmetic rule actions.
//!
//! Two modes ship with the module:
//!
//! - [`MODE_CST`]: symbolic construction. Each production gets a subscriber
//!   that assembles the [`Term`] for slot 0 out of the child slots, so a
//!   parse yields a syntax tree alongside the evaluated number.
//! - [`MODE_TRACE`]: one logging subscriber attached to every rule action,
//!   reporting each reduction through the `log` facade.
//!
//! Both attach to the actions declared by
//! [`CalcActions::try_new`](crate::CalcActions::try_new); neither touches
//! the rule bodies themselves.

use crate::actions::CalcActions;
use crate::slots::{ParseSlots, Slot, Value};
use crate::term::{BinOp, Term};
use rulact::{Registry, RegistryError};

/// Mode under which the symbolic-construction subscribers fire.
pub const MODE_CST: &str = "cst";

/// Mode under which every reduction is logged.
pub const MODE_TRACE: &str = "trace";

/// The symbolic term for a child slot: the tree built by an earlier
/// reduction when there is one, otherwise a leaf for the slot's number.
fn term_of(slot: &Slot) -> Term {
    match &slot.term {
        Some(term) => term.clone(),
        None => {
            let Value::Number(value) = slot.value else {
                unreachable!()
            };
            Term::Number(value)
        }
    }
}

fn cst_binary(p: &mut ParseSlots, op: BinOp) {
    let lhs = term_of(&p[1]);
    let rhs = term_of(&p[3]);
    p[0].term = Some(Term::binary(op, lhs, rhs));
}

fn cst_expr_plus(p: &mut ParseSlots) {
    cst_binary(p, BinOp::Add);
}

fn cst_expr_minus(p: &mut ParseSlots) {
    cst_binary(p, BinOp::Sub);
}

fn cst_term_times(p: &mut ParseSlots) {
    cst_binary(p, BinOp::Mul);
}

fn cst_term_div(p: &mut ParseSlots) {
    cst_binary(p, BinOp::Div);
}

/// Shared by the three unit productions; the child tree passes through.
fn cst_pass_through(p: &mut ParseSlots) {
    p[0].term = Some(term_of(&p[1]));
}

fn cst_factor_expr(p: &mut ParseSlots) {
    p[0].term = Some(Term::group(term_of(&p[2])));
}

fn trace_reduction(p: &mut ParseSlots) {
    log::trace!(
        "reduced {} symbol(s) to {:?}",
        p.len() - 1,
        p.result().value,
    );
}

/// Subscribes the symbolic-construction behaviors under [`MODE_CST`].
///
/// # Errors
///
/// [`RegistryError::UnknownAction`] if the arithmetic actions were not
/// declared on `registry` first.
pub fn attach_cst(registry: &Registry<ParseSlots>) -> Result<(), RegistryError> {
    registry.subscribe_modes(&["expr_plus"], &[MODE_CST], cst_expr_plus)?;
    registry.subscribe_modes(&["expr_minus"], &[MODE_CST], cst_expr_minus)?;
    registry.subscribe_modes(&["term_times"], &[MODE_CST], cst_term_times)?;
    registry.subscribe_modes(&["term_div"], &[MODE_CST], cst_term_div)?;
    registry.subscribe_modes(
        &["expr_term", "term_factor", "factor_num"],
        &[MODE_CST],
        cst_pass_through,
    )?;
    registry.subscribe_modes(&["factor_expr"], &[MODE_CST], cst_factor_expr)?;
    Ok(())
}

/// Subscribes the reduction logger to every rule action under
/// [`MODE_TRACE`].
///
/// # Errors
///
/// [`RegistryError::UnknownAction`] if the arithmetic actions were not
/// declared on `registry` first.
pub fn attach_trace(registry: &Registry<ParseSlots>) -> Result<(), RegistryError> {
    registry.subscribe_modes(&CalcActions::NAMES, &[MODE_TRACE], trace_reduction)
}

#[cfg(test)]
mod tests {
    use super::{MODE_CST, MODE_TRACE, attach_cst, attach_trace};
    use crate::actions::CalcActions;
    use crate::slots::{ParseSlots, Slot, Value};
    use crate::term::{BinOp, Term};
    use rulact::{Action, DEFAULT_MODE, Registry, RegistryError};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn reduce(action: &Action<ParseSlots>, rhs: Vec<Slot>) -> Slot {
        let mut p = ParseSlots::for_reduction(rhs);
        action.call(&mut p);
        p.into_result()
    }

    /// Reduces 1 + 2 * 3 bottom-up under whatever mode is active.
    fn reduce_one_plus_two_times_three(actions: &CalcActions) -> Slot {
        let one = reduce(&actions.factor_num, vec![Slot::number(1)]);
        let one = reduce(&actions.term_factor, vec![one]);
        let lhs = reduce(&actions.expr_term, vec![one]);

        let two = reduce(&actions.factor_num, vec![Slot::number(2)]);
        let two = reduce(&actions.term_factor, vec![two]);
        let three = reduce(&actions.factor_num, vec![Slot::number(3)]);
        let product = reduce(&actions.term_times, vec![two, Slot::default(), three]);

        reduce(&actions.expr_plus, vec![lhs, Slot::default(), product])
    }

    #[test]
    fn cst_mode_builds_the_tree_and_still_evaluates() {
        init_logger();
        let registry = Registry::new();
        let actions = CalcActions::try_new(&registry).unwrap();
        attach_cst(&registry).unwrap();
        registry.set_mode(MODE_CST).unwrap();

        let stat = reduce_one_plus_two_times_three(&actions);
        assert_eq!(stat.value, Value::Number(7));

        let term = stat.term.unwrap();
        assert_eq!(
            term,
            Term::binary(
                BinOp::Add,
                Term::Number(1),
                Term::binary(BinOp::Mul, Term::Number(2), Term::Number(3)),
            )
        );
        assert_eq!(term.to_string(), "1 + 2 * 3");
    }

    #[test]
    fn cst_mode_keeps_grouping_as_written() {
        init_logger();
        let registry = Registry::new();
        let actions = CalcActions::try_new(&registry).unwrap();
        attach_cst(&registry).unwrap();
        registry.set_mode(MODE_CST).unwrap();

        // (1 + 2) * 3
        let one = reduce(&actions.factor_num, vec![Slot::number(1)]);
        let one = reduce(&actions.term_factor, vec![one]);
        let one = reduce(&actions.expr_term, vec![one]);
        let two = reduce(&actions.factor_num, vec![Slot::number(2)]);
        let two = reduce(&actions.term_factor, vec![two]);
        let sum = reduce(&actions.expr_plus, vec![one, Slot::default(), two]);

        let grouped = reduce(
            &actions.factor_expr,
            vec![Slot::default(), sum, Slot::default()],
        );
        let grouped = reduce(&actions.term_factor, vec![grouped]);
        let three = reduce(&actions.factor_num, vec![Slot::number(3)]);
        let product = reduce(&actions.term_times, vec![grouped, Slot::default(), three]);

        assert_eq!(product.value, Value::Number(9));
        assert_eq!(product.term.unwrap().to_string(), "(1 + 2) * 3");
    }

    #[test]
    fn default_mode_leaves_the_term_slot_empty() {
        init_logger();
        let registry = Registry::new();
        let actions = CalcActions::try_new(&registry).unwrap();
        attach_cst(&registry).unwrap();

        let stat = reduce_one_plus_two_times_three(&actions);
        assert_eq!(stat.value, Value::Number(7));
        assert!(stat.term.is_none());
    }

    #[test]
    fn switching_modes_takes_effect_on_the_next_reduction() {
        init_logger();
        let registry = Registry::new();
        let actions = CalcActions::try_new(&registry).unwrap();
        attach_cst(&registry).unwrap();

        registry.set_mode(MODE_CST).unwrap();
        let stat = reduce(&actions.factor_num, vec![Slot::number(5)]);
        assert_eq!(stat.term, Some(Term::Number(5)));

        registry.set_mode(DEFAULT_MODE).unwrap();
        let stat = reduce(&actions.factor_num, vec![Slot::number(5)]);
        assert!(stat.term.is_none());
    }

    #[test]
    fn trace_mode_fires_once_per_reduction_and_keeps_values_intact() {
        init_logger();
        let registry = Registry::new();
        let actions = CalcActions::try_new(&registry).unwrap();
        attach_trace(&registry).unwrap();

        // piggyback a counter on the same mode to observe the dispatch
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        registry
            .subscribe_modes(&CalcActions::NAMES, &[MODE_TRACE], move |_p| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        registry.set_mode(MODE_TRACE).unwrap();

        let stat = reduce_one_plus_two_times_three(&actions);
        assert_eq!(stat.value, Value::Number(7));
        assert_eq!(fired.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn attaching_modes_before_declaring_is_rejected() {
        init_logger();
        let registry = Registry::new();
        let err = attach_trace(&registry).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownAction(_)));
        // nothing was registered, so the mode is not eligible either
        assert!(matches!(
            registry.set_mode(MODE_TRACE).unwrap_err(),
            RegistryError::UnsubscribedMode(_)
        ));
    }
}
