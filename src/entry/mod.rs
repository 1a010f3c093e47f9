//! Entry validation for block-shaped syntax elements.
//!
//! A block-shaped structure (an `options:` or `command:` block, say)
//! accepts a set of named entries. [`EntryValidator`] is the declarative
//! description a structure descriptor carries: which entry names must be
//! present, which may be, and what to do about names it never heard of.
//! The matching algorithm applies it when it parses a block; this crate
//! only stores and transports it.

use smol_str::SmolStr;
use thiserror::Error;

/// Policy for entry names the validator does not declare.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UnknownEntryPolicy {
    /// Undeclared entries are reported as unexpected.
    #[default]
    Reject,
    /// Undeclared entries pass through untouched.
    Allow,
}

/// Declares the entries a block-shaped element accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryValidator {
    required: Vec<SmolStr>,
    optional: Vec<SmolStr>,
    unknown: UnknownEntryPolicy,
}

impl EntryValidator {
    /// Start building a validator.
    pub fn builder() -> EntryValidatorBuilder {
        EntryValidatorBuilder::default()
    }

    /// Entry names that must be present.
    pub fn required(&self) -> &[SmolStr] {
        &self.required
    }

    /// Entry names that may be present.
    pub fn optional(&self) -> &[SmolStr] {
        &self.optional
    }

    /// How undeclared entry names are treated.
    pub fn unknown_policy(&self) -> UnknownEntryPolicy {
        self.unknown
    }

    /// Check the entry names present in a block against this validator.
    pub fn check<'a, I>(&self, present: I) -> Result<(), EntryCheckError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: Vec<&str> = present.into_iter().collect();

        let missing: Vec<SmolStr> = self
            .required
            .iter()
            .filter(|name| !present.iter().any(|p| *p == name.as_str()))
            .cloned()
            .collect();

        let unexpected: Vec<SmolStr> = match self.unknown {
            UnknownEntryPolicy::Allow => Vec::new(),
            UnknownEntryPolicy::Reject => present
                .iter()
                .filter(|p| {
                    !self
                        .required
                        .iter()
                        .chain(self.optional.iter())
                        .any(|name| name.as_str() == **p)
                })
                .map(|p| SmolStr::new(*p))
                .collect(),
        };

        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(EntryCheckError {
                missing,
                unexpected,
            })
        }
    }
}

/// The entries of a block did not satisfy its validator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("entry validation failed: missing {missing:?}, unexpected {unexpected:?}")]
pub struct EntryCheckError {
    /// Required entries that were absent.
    pub missing: Vec<SmolStr>,
    /// Present entries no declaration covers.
    pub unexpected: Vec<SmolStr>,
}

/// Accumulates entry declarations for an [`EntryValidator`].
#[derive(Debug, Default)]
pub struct EntryValidatorBuilder {
    validator: EntryValidator,
}

impl EntryValidatorBuilder {
    /// Declare a required entry.
    pub fn required(mut self, name: impl Into<SmolStr>) -> Self {
        self.validator.required.push(name.into());
        self
    }

    /// Declare an optional entry.
    pub fn optional(mut self, name: impl Into<SmolStr>) -> Self {
        self.validator.optional.push(name.into());
        self
    }

    /// Set the policy for undeclared entries.
    pub fn unknown(mut self, policy: UnknownEntryPolicy) -> Self {
        self.validator.unknown = policy;
        self
    }

    /// Finish the validator.
    pub fn build(self) -> EntryValidator {
        self.validator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> EntryValidator {
        EntryValidator::builder()
            .required("trigger")
            .optional("aliases")
            .optional("permission")
            .build()
    }

    #[test]
    fn test_check_accepts_declared_entries() {
        let v = validator();
        assert!(v.check(["trigger", "aliases"]).is_ok());
        assert!(v.check(["trigger"]).is_ok());
    }

    #[test]
    fn test_check_reports_missing_required() {
        let v = validator();
        let err = v.check(["aliases"]).unwrap_err();

        assert_eq!(err.missing, vec![SmolStr::new("trigger")]);
        assert!(err.unexpected.is_empty());
    }

    #[test]
    fn test_check_reports_unexpected() {
        let v = validator();
        let err = v.check(["trigger", "cooldown"]).unwrap_err();

        assert!(err.missing.is_empty());
        assert_eq!(err.unexpected, vec![SmolStr::new("cooldown")]);
    }

    #[test]
    fn test_allow_unknown_passes_undeclared() {
        let v = EntryValidator::builder()
            .required("trigger")
            .unknown(UnknownEntryPolicy::Allow)
            .build();

        assert!(v.check(["trigger", "cooldown"]).is_ok());
    }
}
