//! Hooks that let effect and subscription handlers be written as pull
//! streams.
//!
//! A framework that calls effects as `(data, state, prev, send, done)` and
//! subscriptions as `(send, done)` can host handlers written against the
//! pull protocol by wrapping them:
//!
//! - [`wrap_effects`] - the payload becomes a one-shot reader, flows through
//!   the user's stage, and lands in `done`.
//! - [`wrap_subscriptions`] - the user's reader is drained into `done`, one
//!   call per produced value.
//!
//! [`hooks`] assembles the enabled wrappers under their fixed names.
//!
//! # Example
//!
//! ```rust
//! use pullhooks::hooks::{hooks, HookOptions, WRAP_EFFECTS, WRAP_SUBSCRIPTIONS};
//!
//! let all = hooks(None);
//! assert_eq!(all.names(), vec![WRAP_EFFECTS, WRAP_SUBSCRIPTIONS]);
//!
//! let effects_only = hooks(Some(HookOptions::default().with_subscriptions(false)));
//! assert!(effects_only.contains(WRAP_EFFECTS));
//! assert!(!effects_only.contains(WRAP_SUBSCRIPTIONS));
//! ```

mod effect;
mod options;
mod subscription;

use std::fmt;

pub use effect::{wrap_effects, WrappedEffect};
pub use options::HookOptions;
pub use subscription::{wrap_subscriptions, WrappedSubscription};

use crate::adapter::SendAdapter;

/// Name under which the effect hook is registered.
pub const WRAP_EFFECTS: &str = "wrapEffects";

/// Name under which the subscription hook is registered.
pub const WRAP_SUBSCRIPTIONS: &str = "wrapSubscriptions";

/// The two kinds of hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Effect wrapping.
    Effects,
    /// Subscription wrapping.
    Subscriptions,
}

impl Hook {
    /// The fixed name of this hook.
    pub fn name(self) -> &'static str {
        match self {
            Self::Effects => WRAP_EFFECTS,
            Self::Subscriptions => WRAP_SUBSCRIPTIONS,
        }
    }

    /// Look a hook up by its fixed name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            WRAP_EFFECTS => Some(Self::Effects),
            WRAP_SUBSCRIPTIONS => Some(Self::Subscriptions),
            _ => None,
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The effect hook. Wraps stage-producing functions with [`wrap_effects`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectHook;

impl EffectHook {
    /// Same as [`wrap_effects`].
    pub fn wrap<F, St, A, E, Th>(&self, cb: F) -> WrappedEffect<F, St, A, E>
    where
        F: Fn(&St, &St, SendAdapter<A, E>) -> Th,
    {
        wrap_effects(cb)
    }
}

/// The subscription hook. Wraps reader-producing functions with
/// [`wrap_subscriptions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionHook;

impl SubscriptionHook {
    /// Same as [`wrap_subscriptions`].
    pub fn wrap<F, A, E, S>(&self, cb: F) -> WrappedSubscription<F, A, E>
    where
        F: Fn(SendAdapter<A, E>) -> S,
    {
        wrap_subscriptions(cb)
    }
}

/// The enabled hooks, keyed by their fixed names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hooks {
    effects: Option<EffectHook>,
    subscriptions: Option<SubscriptionHook>,
}

impl Hooks {
    /// The effect hook, if enabled.
    pub fn effects(&self) -> Option<&EffectHook> {
        self.effects.as_ref()
    }

    /// The subscription hook, if enabled.
    pub fn subscriptions(&self) -> Option<&SubscriptionHook> {
        self.subscriptions.as_ref()
    }

    /// Look up an enabled hook by name.
    pub fn get(&self, name: &str) -> Option<Hook> {
        Hook::from_name(name).filter(|hook| self.is_enabled(*hook))
    }

    /// Returns true if a hook is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns true if `hook` is enabled.
    pub fn is_enabled(&self, hook: Hook) -> bool {
        match hook {
            Hook::Effects => self.effects.is_some(),
            Hook::Subscriptions => self.subscriptions.is_some(),
        }
    }

    /// Names of the enabled hooks, effects first.
    pub fn names(&self) -> Vec<&'static str> {
        [Hook::Effects, Hook::Subscriptions]
            .into_iter()
            .filter(|hook| self.is_enabled(*hook))
            .map(Hook::name)
            .collect()
    }

    /// Number of enabled hooks.
    pub fn len(&self) -> usize {
        self.names().len()
    }

    /// Returns true if no hook is enabled.
    pub fn is_empty(&self) -> bool {
        self.effects.is_none() && self.subscriptions.is_none()
    }
}

/// Build the hooks selected by `opts`; `None` enables both.
pub fn hooks(opts: Option<HookOptions>) -> Hooks {
    let opts = opts.unwrap_or_default();
    Hooks {
        effects: opts.effects.then_some(EffectHook),
        subscriptions: opts.subscriptions.then_some(SubscriptionHook),
    }
}

/// Build hooks from an untyped JSON options value.
///
/// Fails when the value is neither `null` nor an object; see
/// [`HookOptions::from_value`].
#[cfg(feature = "serde")]
pub fn hooks_from_value(
    value: &serde_json::Value,
) -> Result<Hooks, crate::error::ConfigError> {
    HookOptions::from_value(value).map(|opts| hooks(Some(opts)))
}

#[cfg(test)]
mod tests;
