//! ValidationResult: the uniform output of every validator.
//!
//! Validators never fail on rule violations. They return a result holding
//! every violation they found, and callers compose results by merging
//! rather than branching, so one pass reports the full error set.

use crate::error::ConsensusError;

/// Ordered collection of consensus errors.
///
/// A result is valid exactly when it holds no errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ConsensusError>,
}

impl ValidationResult {
    /// Create an empty (valid) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a result holding the given errors, in order.
    pub fn with_errors(errors: Vec<ConsensusError>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append an error.
    pub fn add_error(&mut self, error: ConsensusError) {
        self.errors.push(error);
    }

    /// Append all of `other`'s errors after this result's own.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    pub fn errors(&self) -> &[ConsensusError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ConsensusError> {
        self.errors
    }
}

impl From<ConsensusError> for ValidationResult {
    fn from(error: ConsensusError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ConsensusError> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ConsensusError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationResult {
    type Item = ConsensusError;
    type IntoIter = std::vec::IntoIter<ConsensusError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
