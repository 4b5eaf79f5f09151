//! # Rule-Action Registry
//!
//! This module keeps the mapping between grammar-rule actions and the extra
//! behaviors that run alongside them under different modes of parsing.
//!
//! A parser in symbolic construction mode can defer work to tree-building
//! subscribers, whereas a parser in evaluation mode runs the plain actions
//! only, while both share a single set of grammar rules. The registry exists
//! to encourage that reuse: the rule bodies are declared once, and each mode
//! attaches its own side effects to them.
//!
//! ## Shape
//!
//! - [`Registry::declare`] registers a rule-action body under a unique name
//!   and returns an [`Action`], the wrapped callable the surrounding parser
//!   framework stores in its action table. The wrapper preserves the
//!   grammar-rule text it was declared with; the registry never interprets
//!   that text, it only carries it through for the parser generator.
//! - [`Registry::subscribe`] / [`Registry::subscribe_modes`] attach a
//!   subscriber function to one or more declared actions, scoped to one or
//!   more modes.
//! - [`Registry::set_mode`] selects which mode's subscribers fire on every
//!   subsequent [`Action::call`], registry-wide.
//!
//! Invoking an [`Action`] runs the original body first, then every
//! subscriber registered for (this action, the active mode), in registration
//! order. Neither the body nor the subscribers return anything: all
//! communication goes through mutation of the shared parse-state value,
//! by convention through its result slot.
//!
//! ## Example
//!
//! ```rust
//! use rulact::Registry;
//!
//! // The registry never looks inside the parse-state type; a bare Vec
//! // with slot 0 as the result slot is enough here.
//! let registry: Registry<Vec<i64>> = Registry::new();
//!
//! let double = registry
//!     .declare("double", "value : NUMBER", |p: &mut Vec<i64>| p[0] = p[1] * 2)
//!     .unwrap();
//! assert_eq!(double.rule(), "value : NUMBER");
//!
//! registry
//!     .subscribe_modes(&["double"], &["audit"], |p: &mut Vec<i64>| p.push(1))
//!     .unwrap();
//!
//! let mut p = vec![0, 21];
//! double.call(&mut p);
//! assert_eq!(p, vec![42, 21]); // "audit" is not active, base body only
//!
//! registry.set_mode("audit").unwrap();
//! let mut p = vec![0, 21];
//! double.call(&mut p);
//! assert_eq!(p, vec![42, 21, 1]); // subscriber ran after the base body
//! ```

use crate::error::RegistryError;
use indexmap::{IndexMap, IndexSet};
use smartstring::alias::String;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The implicit mode every registry starts in.
///
/// It always exists: declared actions begin with an empty subscriber list
/// for it, and [`Registry::set_mode`] accepts it without any prior
/// subscription.
pub const DEFAULT_MODE: &str = "default";

/// A subscriber attached to an (action, mode) pair.
///
/// Shared so the same function may appear in several lists, or several times
/// in one list, and run once per occurrence.
type Subscriber<P> = Arc<dyn Fn(&mut P) + Send + Sync>;

/// Registry tables. Guarded as a whole by one mutex in [`Registry`].
struct RegistryState<P> {
    /// Action name, then mode name, then subscribers in registration order.
    /// Mode entries other than `"default"` are created lazily by the first
    /// subscription that targets them.
    slots: IndexMap<String, IndexMap<String, Vec<Subscriber<P>>>>,
    /// Every mode any subscription has ever named. Gates `set_mode`.
    modes: IndexSet<String>,
    /// The mode whose subscribers fire on the next action invocation.
    active: String,
}

/// A registry mapping rule-action names to their per-mode subscriber lists.
///
/// `P` is the parse-state parameter type handed to every action and
/// subscriber; the registry forwards `&mut P` without inspecting it.
///
/// The handle is cheap to clone; clones share one set of tables, so the
/// wrapped [`Action`]s handed out by [`declare`](Registry::declare) and the
/// configuration calls all observe the same state. Mode selection is shared
/// too: two parses driven from one registry cannot run under different
/// active modes at the same time.
pub struct Registry<P> {
    state: Arc<Mutex<RegistryState<P>>>,
}

impl<P> Registry<P> {
    /// Creates an empty registry with `"default"` as the active mode.
    pub fn new() -> Self {
        let mut modes = IndexSet::new();
        modes.insert(String::from(DEFAULT_MODE));
        Self {
            state: Arc::new(Mutex::new(RegistryState {
                slots: IndexMap::new(),
                modes,
                active: String::from(DEFAULT_MODE),
            })),
        }
    }

    // Every critical section leaves the tables coherent, so a guard
    // poisoned by a panicking caller-supplied function is still usable.
    fn lock(&self) -> MutexGuard<'_, RegistryState<P>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Declares a rule-action body under `name` and returns the wrapper the
    /// parser framework should invoke in its place.
    ///
    /// `rule` is the grammar-rule text the parser generator reads off the
    /// action; it is kept on the returned [`Action`] unchanged. The new
    /// entry starts with only the `"default"` mode, bound to an empty
    /// subscriber list.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateRegistration`] if `name` was already
    /// declared; the existing entry is left untouched.
    pub fn declare<F>(&self, name: &str, rule: &str, body: F) -> Result<Action<P>, RegistryError>
    where
        F: Fn(&mut P) + Send + Sync + 'static,
    {
        let mut state = self.lock();
        if state.slots.contains_key(name) {
            return Err(RegistryError::DuplicateRegistration(name.into()));
        }
        let mut per_mode = IndexMap::new();
        per_mode.insert(String::from(DEFAULT_MODE), Vec::new());
        state.slots.insert(String::from(name), per_mode);
        drop(state);

        log::debug!("declared rule action {:?}", name);
        Ok(Action {
            name: String::from(name),
            rule: String::from(rule),
            body: Arc::new(body),
            registry: self.clone(),
        })
    }

    /// Subscribes `subscriber` to the given actions under the `"default"`
    /// mode.
    ///
    /// Shorthand for [`subscribe_modes`](Registry::subscribe_modes) with
    /// `&[DEFAULT_MODE]`.
    pub fn subscribe<F>(&self, actions: &[&str], subscriber: F) -> Result<(), RegistryError>
    where
        F: Fn(&mut P) + Send + Sync + 'static,
    {
        self.subscribe_modes(actions, &[DEFAULT_MODE], subscriber)
    }

    /// Subscribes `subscriber` to every (action, mode) pair in the cross
    /// product of `actions` and `modes`.
    ///
    /// Registration order is preserved per pair, and subscribing the same
    /// function twice makes it run twice. The mode names are also recorded
    /// as known, which is what makes them eligible for
    /// [`set_mode`](Registry::set_mode); that holds even for a mode the
    /// cross product attached no subscriber to.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownAction`] naming the first action in
    /// `actions` that was never declared. The check runs before any
    /// mutation: on failure no subscriber is appended and no mode becomes
    /// known.
    pub fn subscribe_modes<F>(
        &self,
        actions: &[&str],
        modes: &[&str],
        subscriber: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&mut P) + Send + Sync + 'static,
    {
        let subscriber: Subscriber<P> = Arc::new(subscriber);
        let mut state = self.lock();

        // validate every target before touching any slot
        for name in actions {
            if !state.slots.contains_key(*name) {
                return Err(RegistryError::UnknownAction((*name).into()));
            }
        }

        for name in actions {
            let Some(per_mode) = state.slots.get_mut(*name) else {
                unreachable!()
            };
            for mode in modes {
                per_mode
                    .entry(String::from(*mode))
                    .or_default()
                    .push(Arc::clone(&subscriber));
            }
        }
        for mode in modes {
            state.modes.insert(String::from(*mode));
        }

        log::debug!("subscribed to {:?} under modes {:?}", actions, modes);
        Ok(())
    }

    /// Makes `mode` the active mode for every subsequent [`Action::call`]
    /// on any handle of this registry, effective immediately.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnsubscribedMode`] if no subscription has ever
    /// named `mode`; the active mode is left unchanged.
    pub fn set_mode(&self, mode: &str) -> Result<(), RegistryError> {
        let mut state = self.lock();
        if !state.modes.contains(mode) {
            return Err(RegistryError::UnsubscribedMode(mode.into()));
        }
        state.active = String::from(mode);
        log::debug!("active mode set to {:?}", mode);
        Ok(())
    }

    /// Returns the currently active mode.
    pub fn mode(&self) -> String {
        self.lock().active.clone()
    }

    /// Snapshot of the subscribers to run for `name` under the active mode.
    ///
    /// Taken under the lock and returned by clone so dispatch itself runs
    /// unlocked; a subscriber may therefore re-enter the registry, e.g. to
    /// switch modes mid-parse.
    fn active_subscribers(&self, name: &str) -> Vec<Subscriber<P>> {
        let state = self.lock();
        let Some(per_mode) = state.slots.get(name) else {
            return Vec::new();
        };
        let subscribers = per_mode
            .get(&*state.active)
            .cloned()
            .unwrap_or_default();
        log::trace!(
            "action {:?}: {} subscriber(s) under mode {:?}",
            name,
            subscribers.len(),
            state.active,
        );
        subscribers
    }
}

impl<P> Default for Registry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for Registry<P> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<P> fmt::Debug for Registry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Registry")
            .field("actions", &state.slots.keys().collect::<Vec<_>>())
            .field("modes", &state.modes)
            .field("active", &state.active)
            .finish()
    }
}

/// A declared rule action, wrapped for mode-scoped dispatch.
///
/// From the outside this is interchangeable with the plain body it wraps:
/// one mutable parse-state parameter, no return value, and the grammar-rule
/// text available through [`rule`](Action::rule) exactly as declared. The
/// parser framework stores it in its action table and calls it on every
/// reduction of the corresponding production.
pub struct Action<P> {
    name: String,
    rule: String,
    body: Subscriber<P>,
    registry: Registry<P>,
}

impl<P> Action<P> {
    /// The name this action was declared under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The grammar-rule text attached at declaration, unchanged.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Runs the base body, then every subscriber registered for this action
    /// under the registry's active mode, in registration order, all with
    /// the same parse-state value.
    pub fn call(&self, p: &mut P) {
        (self.body)(p);
        for subscriber in self.registry.active_subscribers(&self.name) {
            subscriber(p);
        }
    }
}

impl<P> Clone for Action<P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            rule: self.rule.clone(),
            body: Arc::clone(&self.body),
            registry: self.registry.clone(),
        }
    }
}

impl<P> fmt::Debug for Action<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("rule", &self.rule)
            .finish_non_exhaustive()
    }
}
