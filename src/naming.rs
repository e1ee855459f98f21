// Copyright 2025 Cowboy AI, LLC.

//! Naming policy for convention-resolved presenters
//!
//! A presenter for a value is named after the value's runtime type name,
//! classified (singular, `UpperCamelCase`) and followed by a fixed suffix:
//! `Children` becomes `ChildPresenter`, `OnlyChild` becomes
//! `OnlyChildPresenter`.

use serde::{Deserialize, Serialize};

use crate::errors::{PresenterError, PresenterResult};
use crate::inflector::{camelize, classify, demodulize};

/// Suffix appended to classified type names unless configured otherwise
pub const DEFAULT_SUFFIX: &str = "Presenter";

/// Configuration for deriving presenter names from type names
///
/// # Examples
///
/// ```rust
/// use cim_presenter::NamingPolicy;
///
/// let policy = NamingPolicy::default();
/// assert_eq!(policy.presenter_name_for("Children"), "ChildPresenter");
///
/// let decorators = NamingPolicy::with_suffix("Decorator").unwrap();
/// assert_eq!(decorators.presenter_name_for("OnlyChild"), "OnlyChildDecorator");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingPolicy {
    /// Suffix appended to the classified type name
    pub suffix: String,
    /// Whether plural type names are singularized before the suffix is added
    pub singularize: bool,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            singularize: true,
        }
    }
}

impl NamingPolicy {
    /// Policy with a custom suffix, e.g. `"Decorator"`
    pub fn with_suffix(suffix: impl Into<String>) -> PresenterResult<Self> {
        let policy = Self {
            suffix: suffix.into(),
            ..Self::default()
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy from JSON; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the policy is invalid
    pub fn from_json(json: &str) -> PresenterResult<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check that the suffix can end a Rust type name
    pub fn validate(&self) -> PresenterResult<()> {
        if self.suffix.is_empty() {
            return Err(PresenterError::InvalidPolicy("suffix must not be empty".to_string()));
        }
        if !self.suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PresenterError::InvalidPolicy(format!(
                "suffix `{}` is not an identifier",
                self.suffix
            )));
        }
        Ok(())
    }

    /// Derive the presenter name for a runtime type name
    pub fn presenter_name_for(&self, type_name: &str) -> String {
        let base = demodulize(type_name);
        let classified = if self.singularize {
            classify(base)
        } else {
            camelize(base)
        };
        format!("{}{}", classified, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_names() {
        let policy = NamingPolicy::default();
        assert_eq!(policy.presenter_name_for("Children"), "ChildPresenter");
        assert_eq!(policy.presenter_name_for("OnlyChild"), "OnlyChildPresenter");
        assert_eq!(policy.presenter_name_for("LessonStep"), "LessonStepPresenter");
        assert_eq!(policy.presenter_name_for("school::Lessons"), "LessonPresenter");
    }

    #[test]
    fn test_decorator_suffix() {
        let policy = NamingPolicy::with_suffix("Decorator").unwrap();
        assert_eq!(policy.presenter_name_for("Children"), "ChildDecorator");
        assert_eq!(policy.presenter_name_for("OnlyChild"), "OnlyChildDecorator");
    }

    #[test]
    fn test_without_singularization() {
        let policy = NamingPolicy {
            singularize: false,
            ..NamingPolicy::default()
        };
        assert_eq!(policy.presenter_name_for("Children"), "ChildrenPresenter");
        assert_eq!(policy.presenter_name_for("step_modules"), "StepModulesPresenter");
    }

    #[test]
    fn test_from_json() {
        let policy = NamingPolicy::from_json(r#"{"suffix": "View"}"#).unwrap();
        assert_eq!(policy.suffix, "View");
        assert!(policy.singularize);

        let policy = NamingPolicy::from_json("{}").unwrap();
        assert_eq!(policy, NamingPolicy::default());
    }

    #[test]
    fn test_invalid_policies_rejected() {
        assert!(matches!(
            NamingPolicy::with_suffix(""),
            Err(PresenterError::InvalidPolicy(_))
        ));
        assert!(matches!(
            NamingPolicy::from_json(r#"{"suffix": "Pre senter"}"#),
            Err(PresenterError::InvalidPolicy(_))
        ));
        assert!(matches!(
            NamingPolicy::from_json(r#"{"suffix": 7}"#),
            Err(PresenterError::Serialization(_))
        ));
    }
}
