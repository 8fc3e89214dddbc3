//! Recording fakes for the validator seams.
//!
//! Each fake records its inputs so tests can assert call counts and order,
//! and returns scripted results in call order (valid once the script runs out).

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use dpp_core::{Contract, ValidationResult, Value};
use dpp_verify::{DuplicateFinder, Validator};

/// Results handed out one per call.
#[derive(Default)]
struct Script(Mutex<VecDeque<ValidationResult>>);

impl Script {
    fn new(results: impl IntoIterator<Item = ValidationResult>) -> Self {
        Self(Mutex::new(results.into_iter().collect()))
    }

    fn next(&self) -> ValidationResult {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_default()
    }
}

/// Per-document validator that records `(raw document, contract id)` pairs.
#[derive(Default)]
pub struct RecordingDocumentValidator {
    calls: Mutex<Vec<(Value, String)>>,
    script: Script,
}

impl RecordingDocumentValidator {
    /// Accept every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `results` for the first calls, in order.
    pub fn with_results(results: impl IntoIterator<Item = ValidationResult>) -> Self {
        Self {
            calls: Mutex::default(),
            script: Script::new(results),
        }
    }

    /// Calls so far, in order.
    pub fn calls(&self) -> Vec<(Value, String)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Raw documents seen so far, in order.
    pub fn documents(&self) -> Vec<Value> {
        self.calls().into_iter().map(|(raw, _)| raw).collect()
    }
}

impl Validator<Value, Contract> for RecordingDocumentValidator {
    fn validate(&self, raw_document: &Value, contract: &Contract) -> ValidationResult {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((raw_document.clone(), contract.id().to_string()));
        self.script.next()
    }
}

/// Contract validator that records every raw contract it sees.
#[derive(Default)]
pub struct RecordingContractValidator {
    calls: Mutex<Vec<Value>>,
    script: Script,
}

impl RecordingContractValidator {
    /// Accept every contract.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `results` for the first calls, in order.
    pub fn with_results(results: impl IntoIterator<Item = ValidationResult>) -> Self {
        Self {
            calls: Mutex::default(),
            script: Script::new(results),
        }
    }

    /// Raw contracts seen so far, in order.
    pub fn calls(&self) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Validator<Value> for RecordingContractValidator {
    fn validate(&self, raw_contract: &Value, _context: &()) -> ValidationResult {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(raw_contract.clone());
        self.script.next()
    }
}

/// Duplicate finder with a preset answer.
#[derive(Default)]
pub struct StaticDuplicateFinder {
    duplicates: Vec<Value>,
    calls: Mutex<Vec<Vec<Value>>>,
}

impl StaticDuplicateFinder {
    /// Report `duplicates` on every call.
    pub fn new(duplicates: Vec<Value>) -> Self {
        Self {
            duplicates,
            calls: Mutex::default(),
        }
    }

    /// Never report duplicates.
    pub fn none() -> Self {
        Self::default()
    }

    /// Document sequences seen so far, one entry per call.
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DuplicateFinder for StaticDuplicateFinder {
    fn find_duplicates(&self, raw_documents: &[Value]) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(raw_documents.to_vec());
        self.duplicates.clone()
    }
}
