//! Error types for the rule-action registry.

use smartstring::alias::String;
use thiserror::Error;

/// Errors raised by registry configuration calls.
///
/// All three variants indicate a setup mistake in the calling module and are
/// meant to propagate; the registry never catches them internally, and no
/// state is modified on the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The action name was already declared.
    #[error("the action '{0}' is already registered with the rule-action registry")]
    DuplicateRegistration(String),

    /// A subscription targeted an action name that was never declared.
    #[error("the action '{0}' is not yet registered as a rule")]
    UnknownAction(String),

    /// `set_mode` was asked for a mode no subscription has ever named.
    #[error("unsubscribed mode '{0}'")]
    UnsubscribedMode(String),
}
