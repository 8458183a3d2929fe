//! Environment construction.
//!
//! The child's environment is the inherited environment, captured once per
//! run, overlaid by each resolved secret in reference order. Secret values
//! always replace inherited ones, and later references replace earlier ones.
//!
//! Inherited variables are kept as raw `OsString`s, so names and values that
//! are not valid UTF-8 still reach the child unchanged.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::args::SecretReference;
use crate::core::decode::DecodedPairs;

/// The inherited process environment, captured at one point in time.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: Vec<(OsString, OsString)>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        let vars: Vec<_> = std::env::vars_os().collect();
        debug!(vars = vars.len(), "captured environment");
        Self { vars }
    }

    pub fn from_pairs<K: Into<OsString>, V: Into<OsString>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.vars.iter().map(|(k, _)| k)).finish()
    }
}

/// One variable's value: passed through from the parent, or from a secret.
#[derive(Clone, PartialEq, Eq)]
enum Value {
    Inherited(OsString),
    Secret(Zeroizing<String>),
}

impl Value {
    fn as_os_str(&self) -> &OsStr {
        match self {
            Value::Inherited(v) => v.as_os_str(),
            Value::Secret(v) => OsStr::new(v.as_str()),
        }
    }
}

/// Final environment handed to the child process.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSet {
    vars: BTreeMap<OsString, Value>,
}

impl EnvironmentSet {
    /// Start from an inherited snapshot.
    pub fn seeded(base: &EnvSnapshot) -> Self {
        Self {
            vars: base
                .vars
                .iter()
                .map(|(k, v)| (k.clone(), Value::Inherited(v.clone())))
                .collect(),
        }
    }

    /// Overlay decoded pairs; each pair replaces any existing entry.
    pub fn overlay(&mut self, pairs: &DecodedPairs) {
        for (key, value) in pairs.iter() {
            self.vars.insert(
                OsString::from(key),
                Value::Secret(Zeroizing::new(value.to_string())),
            );
        }
    }

    /// Value of `name`, if present and valid UTF-8.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_os(name).and_then(OsStr::to_str)
    }

    pub fn get_os(&self, name: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(name.as_ref()).map(Value::as_os_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// `NAME=VALUE` strings, one per variable, sorted by name.
    ///
    /// Non-UTF-8 bytes are shown lossily; use [`iter`](Self::iter) for the
    /// exact values.
    pub fn assignments(&self) -> Vec<Zeroizing<String>> {
        self.iter()
            .map(|(k, v)| {
                Zeroizing::new(format!("{}={}", k.to_string_lossy(), v.to_string_lossy()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl fmt::Debug for EnvironmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.vars.keys()).finish()
    }
}

/// Build the child environment from a snapshot and resolved secrets.
///
/// References are applied in ascending `position` regardless of input order.
pub fn build<'a>(
    base: &EnvSnapshot,
    resolved: impl IntoIterator<Item = (&'a SecretReference, &'a DecodedPairs)>,
) -> EnvironmentSet {
    let mut resolved: Vec<_> = resolved.into_iter().collect();
    resolved.sort_by_key(|(reference, _)| reference.position);

    let mut env = EnvironmentSet::seeded(base);
    for (_, pairs) in resolved {
        env.overlay(pairs);
    }
    env
}
