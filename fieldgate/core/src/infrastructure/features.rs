// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Feature Gates
//!
//! Runtime-toggleable named boolean flags, configured from a textual
//! `name1=true,name2=false` specification. Each gate is a shared
//! [`AtomicBool`] handle that request-path code reads lock-free; an
//! administrator toggling a gate concurrently with in-flight requests is
//! race-free, and any given request may observe either the old or the new
//! value.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Purpose:** Implements the named-atomic-boolean gate registry

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

/// Gate controlling partial-response filtering of unary responses.
/// Disabled by default.
pub const PARTIAL_RESPONSE: &str = "partial-response";

/// Feature gate configuration errors. These surface only to whoever is
/// configuring the gates, never on the request path.
#[derive(Debug, Error)]
pub enum FeatureGateError {
    #[error("unknown feature gate: {0}")]
    Unknown(String),

    #[error("invalid boolean value for feature gate {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("malformed feature gate entry (expected name=bool): {0}")]
    Malformed(String),
}

/// Registry of named atomic boolean gates.
///
/// Not a hidden process-global: callers construct a registry, pull shared
/// handles out of it with [`FeatureGates::handle`], and thread those into
/// the components that read them. Tests instantiate independent registries.
pub struct FeatureGates {
    gates: BTreeMap<String, Arc<AtomicBool>>,
}

impl FeatureGates {
    /// Registry with the gates this system knows about, at their defaults.
    pub fn new() -> Self {
        Self::with_gates([(PARTIAL_RESPONSE, false)])
    }

    /// Registry with an explicit gate set. Used by tests and by embedders
    /// that define their own gates.
    pub fn with_gates<I, S>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let gates = defaults
            .into_iter()
            .map(|(name, default)| (name.into(), Arc::new(AtomicBool::new(default))))
            .collect();
        Self { gates }
    }

    /// Apply a textual `name1=true,name2=false` specification.
    ///
    /// Unknown gate names and non-boolean values are hard errors. Entries
    /// are applied as they are parsed, so an error partway leaves the
    /// preceding entries in effect.
    pub fn apply(&self, spec: &str) -> Result<(), FeatureGateError> {
        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let Some((name, value)) = entry.split_once('=') else {
                return Err(FeatureGateError::Malformed(entry.to_owned()));
            };
            let name = name.trim();
            let enabled = value.trim().parse::<bool>().map_err(|_| {
                FeatureGateError::InvalidValue {
                    name: name.to_owned(),
                    value: value.trim().to_owned(),
                }
            })?;
            self.set(name, enabled)?;
        }
        Ok(())
    }

    /// Turn the named gate on. Idempotent.
    pub fn enable(&self, name: &str) -> Result<(), FeatureGateError> {
        self.set(name, true)
    }

    /// Turn the named gate off. Idempotent.
    pub fn disable(&self, name: &str) -> Result<(), FeatureGateError> {
        self.set(name, false)
    }

    fn set(&self, name: &str, enabled: bool) -> Result<(), FeatureGateError> {
        let gate = self
            .gates
            .get(name)
            .ok_or_else(|| FeatureGateError::Unknown(name.to_owned()))?;
        gate.store(enabled, Ordering::Relaxed);
        Ok(())
    }

    /// Current state of the named gate; unknown names read as disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.gates
            .get(name)
            .map(|gate| gate.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// Shared handle for the named gate, for threading into components that
    /// read it on the request path.
    pub fn handle(&self, name: &str) -> Option<Arc<AtomicBool>> {
        self.gates.get(name).cloned()
    }
}

impl Default for FeatureGates {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FeatureGates {
    /// Renders every known gate as `name=state`, comma-joined, sorted by
    /// name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, gate) in &self.gates {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{name}={}", gate.load(Ordering::Relaxed))?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_off() {
        let gates = FeatureGates::new();
        assert!(!gates.is_enabled(PARTIAL_RESPONSE));
    }

    #[test]
    fn apply_sets_named_gates() {
        let gates = FeatureGates::with_gates([("alpha", false), ("beta", true)]);
        gates.apply("alpha=true,beta=false").unwrap();
        assert!(gates.is_enabled("alpha"));
        assert!(!gates.is_enabled("beta"));
    }

    #[test]
    fn apply_trims_whitespace() {
        let gates = FeatureGates::new();
        gates.apply(" partial-response = true ").unwrap();
        assert!(gates.is_enabled(PARTIAL_RESPONSE));
    }

    #[test]
    fn unknown_gate_is_a_hard_error() {
        let gates = FeatureGates::new();
        let error = gates.apply("no-such-gate=true").unwrap_err();
        assert!(matches!(error, FeatureGateError::Unknown(name) if name == "no-such-gate"));
    }

    #[test]
    fn invalid_boolean_is_a_hard_error() {
        let gates = FeatureGates::new();
        let error = gates.apply("partial-response=yes").unwrap_err();
        assert!(matches!(error, FeatureGateError::InvalidValue { .. }));
    }

    #[test]
    fn entry_without_equals_is_malformed() {
        let gates = FeatureGates::new();
        let error = gates.apply("partial-response").unwrap_err();
        assert!(matches!(error, FeatureGateError::Malformed(_)));
    }

    #[test]
    fn enable_and_disable_are_idempotent() {
        let gates = FeatureGates::new();
        gates.enable(PARTIAL_RESPONSE).unwrap();
        gates.enable(PARTIAL_RESPONSE).unwrap();
        assert!(gates.is_enabled(PARTIAL_RESPONSE));
        gates.disable(PARTIAL_RESPONSE).unwrap();
        gates.disable(PARTIAL_RESPONSE).unwrap();
        assert!(!gates.is_enabled(PARTIAL_RESPONSE));
    }

    #[test]
    fn display_is_sorted_by_name() {
        let gates = FeatureGates::with_gates([("zeta", true), ("alpha", false)]);
        assert_eq!(gates.to_string(), "alpha=false,zeta=true");
    }

    #[test]
    fn handle_shares_the_underlying_atomic() {
        let gates = FeatureGates::new();
        let handle = gates.handle(PARTIAL_RESPONSE).unwrap();
        assert!(!handle.load(std::sync::atomic::Ordering::Relaxed));
        gates.enable(PARTIAL_RESPONSE).unwrap();
        assert!(handle.load(std::sync::atomic::Ordering::Relaxed));
    }
}
