//! Secret payload decoding.
//!
//! A payload that is a JSON object of string values expands into one
//! environment variable per entry. Anything else is exposed whole under
//! the `secret` key. Decoding never fails.

use std::collections::BTreeMap;
use std::fmt;

use zeroize::Zeroizing;

use crate::core::constants;

/// Raw secret value as returned by the store.
///
/// Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretPayload(Zeroizing<String>);

impl SecretPayload {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for SecretPayload {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for SecretPayload {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretPayload(<{} bytes>)", self.0.len())
    }
}

/// Key/value pairs decoded from one payload, ordered by key.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DecodedPairs {
    pairs: BTreeMap<String, Zeroizing<String>>,
}

impl DecodedPairs {
    /// Key names in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        self.pairs.keys().map(String::as_str).collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(|v| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DecodedPairs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Zeroizing::new(v.into())))
                .collect(),
        }
    }
}

impl fmt::Debug for DecodedPairs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.pairs.keys()).finish()
    }
}

/// Decode a raw payload into environment pairs.
pub fn decode(raw: &SecretPayload) -> DecodedPairs {
    match serde_json::from_str::<BTreeMap<String, String>>(raw.as_str()) {
        Ok(object) => object.into_iter().collect(),
        Err(_) => std::iter::once((constants::FALLBACK_KEY, raw.as_str())).collect(),
    }
}
