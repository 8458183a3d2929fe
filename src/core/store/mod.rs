//! Secret store backends.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file (e.g., `vault.rs`)
//! 3. Feature-gate if appropriate
//! 4. Re-export from this module

use crate::core::decode::SecretPayload;
use crate::error::StoreError;

#[cfg(feature = "aws")]
pub mod aws;

#[cfg(feature = "aws")]
pub use aws::AwsSecretsManager;

/// Source of secret values by name.
pub trait SecretStore {
    /// Fetch the raw value of a secret.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the secret does not exist or the store
    /// cannot be reached.
    fn fetch(&self, name: &str) -> Result<SecretPayload, StoreError>;
}

impl<T: SecretStore + ?Sized> SecretStore for &T {
    fn fetch(&self, name: &str) -> Result<SecretPayload, StoreError> {
        (**self).fetch(name)
    }
}

impl<T: SecretStore + ?Sized> SecretStore for Box<T> {
    fn fetch(&self, name: &str) -> Result<SecretPayload, StoreError> {
        (**self).fetch(name)
    }
}

/// Store used when no backend is compiled in. Every fetch fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct Disabled;

impl SecretStore for Disabled {
    fn fetch(&self, _name: &str) -> Result<SecretPayload, StoreError> {
        Err(StoreError::Unavailable)
    }
}
