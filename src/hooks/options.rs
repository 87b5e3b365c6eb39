//! Hook options.

#[cfg(feature = "serde")]
use crate::error::ConfigError;

/// Which hooks to build.
///
/// Both hooks are enabled by default.
///
/// # Examples
///
/// ```rust
/// use pullhooks::HookOptions;
///
/// let opts = HookOptions::default().with_subscriptions(false);
/// assert!(opts.effects);
/// assert!(!opts.subscriptions);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HookOptions {
    /// Build the effect-wrapping hook.
    pub effects: bool,
    /// Build the subscription-wrapping hook.
    pub subscriptions: bool,
}

impl Default for HookOptions {
    fn default() -> Self {
        Self {
            effects: true,
            subscriptions: true,
        }
    }
}

impl HookOptions {
    /// Enable or disable the effect hook.
    pub fn with_effects(mut self, enabled: bool) -> Self {
        self.effects = enabled;
        self
    }

    /// Enable or disable the subscription hook.
    pub fn with_subscriptions(mut self, enabled: bool) -> Self {
        self.subscriptions = enabled;
        self
    }

    /// Read options from an untyped JSON value.
    ///
    /// `null` means "omitted" and yields the defaults. Any object is
    /// accepted; a hook is disabled only when its key holds literal `false`,
    /// and unknown keys are ignored. Every other kind of value is rejected.
    ///
    /// ```rust
    /// use pullhooks::{ConfigError, HookOptions};
    /// use serde_json::json;
    ///
    /// let opts = HookOptions::from_value(&json!({ "effects": false })).unwrap();
    /// assert!(!opts.effects);
    /// assert!(opts.subscriptions);
    ///
    /// assert_eq!(
    ///     HookOptions::from_value(&json!(123)),
    ///     Err(ConfigError::not_an_object("number"))
    /// );
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ConfigError> {
        use serde_json::Value;

        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            Value::Bool(_) => return Err(ConfigError::not_an_object("boolean")),
            Value::Number(_) => return Err(ConfigError::not_an_object("number")),
            Value::String(_) => return Err(ConfigError::not_an_object("string")),
            Value::Array(_) => return Err(ConfigError::not_an_object("array")),
        };

        let disabled = |key: &str| matches!(map.get(key), Some(Value::Bool(false)));
        Ok(Self {
            effects: !disabled("effects"),
            subscriptions: !disabled("subscriptions"),
        })
    }
}
