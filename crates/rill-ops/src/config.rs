use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// What an operator does when a user-supplied function panics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Let the panic unwind through the emitting call stack.
    #[default]
    Propagate,
    /// Catch the panic and deliver it as `StreamError::Panicked`, which
    /// terminates the subscription.
    Capture,
}

/// Per-operator configuration for operators that run user functions
/// (map, filter, exclude, distinct_until_changed_by, and their fallible
/// variants).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    /// Handling of panics raised by the user function.
    pub fault_policy: FaultPolicy,
    /// Name attached to this operator's tracing events.
    pub label: Option<String>,
}

impl OperatorConfig {
    /// A configuration that captures panics into the failure channel.
    pub fn capturing() -> Self {
        Self {
            fault_policy: FaultPolicy::Capture,
            ..Default::default()
        }
    }

    /// Attach a label for tracing.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label, or `"-"` when none is set.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("-")
    }

    /// Parse and validate a configuration from TOML.
    ///
    /// ```rust
    /// use rill_ops::{FaultPolicy, OperatorConfig};
    ///
    /// let config = OperatorConfig::from_toml_str(r#"
    ///     fault_policy = "capture"
    ///     label = "prices"
    /// "#).unwrap();
    /// assert_eq!(config.fault_policy, FaultPolicy::Capture);
    /// assert_eq!(config.label(), "prices");
    /// ```
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this configuration to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(label) = &self.label {
            if label.trim().is_empty() {
                return Err(ConfigError::Invalid("label must not be blank".into()));
            }
        }
        Ok(())
    }
}
