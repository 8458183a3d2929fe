//! AWS Secrets Manager backend.
//!
//! Enabled by the default `aws` feature. Credentials and region come from
//! the standard AWS provider chain, optionally overridden by
//! [`StoreConfig`](crate::core::config::StoreConfig).
//!
//! `SecretString` is returned as-is. A `SecretBinary` is accepted when it
//! is valid UTF-8. A secret with neither yields an empty payload.

use std::cell::OnceCell;
use std::fmt;

use aws_sdk_secretsmanager::error::{DisplayErrorContext, SdkError};
use aws_sdk_secretsmanager::operation::get_secret_value::{
    GetSecretValueError, GetSecretValueOutput,
};
use aws_sdk_secretsmanager::Client;
use tracing::{debug, trace};

use super::SecretStore;
use crate::core::config::StoreConfig;
use crate::core::decode::SecretPayload;
use crate::error::StoreError;

/// Secrets Manager client driven by a private current-thread runtime.
///
/// The runtime and SDK client are built on first use, so runs without
/// secret references never load AWS configuration.
pub struct AwsSecretsManager {
    config: StoreConfig,
    connection: OnceCell<Connection>,
}

struct Connection {
    runtime: tokio::runtime::Runtime,
    client: Client,
}

impl AwsSecretsManager {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            connection: OnceCell::new(),
        }
    }

    fn connect(&self) -> Result<&Connection, StoreError> {
        if let Some(connection) = self.connection.get() {
            return Ok(connection);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Runtime(e.to_string()))?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &self.config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(profile) = &self.config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &self.config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = runtime.block_on(loader.load());
        debug!(
            region = sdk_config.region().map(|r| r.as_ref()).unwrap_or("<unset>"),
            "loaded AWS configuration"
        );
        let client = Client::new(&sdk_config);

        Ok(self
            .connection
            .get_or_init(|| Connection { runtime, client }))
    }
}

impl SecretStore for AwsSecretsManager {
    fn fetch(&self, name: &str) -> Result<SecretPayload, StoreError> {
        let connection = self.connect()?;
        trace!(secret = %name, "requesting secret value");

        let output = connection
            .runtime
            .block_on(connection.client.get_secret_value().secret_id(name).send())
            .map_err(|e| store_error(name, &e))?;

        payload(name, &output)
    }
}

/// Map an SDK failure to a store error.
///
/// A missing secret is `NotFound`; everything else keeps the full SDK
/// error context in `Request`.
fn store_error<R: fmt::Debug>(name: &str, err: &SdkError<GetSecretValueError, R>) -> StoreError {
    let not_found = err
        .as_service_error()
        .map(|se| se.is_resource_not_found_exception())
        .unwrap_or(false);
    if not_found {
        StoreError::NotFound(name.to_string())
    } else {
        StoreError::Request(DisplayErrorContext(err).to_string())
    }
}

/// Extract the raw payload from a `GetSecretValue` response.
fn payload(name: &str, output: &GetSecretValueOutput) -> Result<SecretPayload, StoreError> {
    if let Some(value) = output.secret_string() {
        trace!(secret = %name, len = value.len(), "received secret string");
        return Ok(SecretPayload::new(value));
    }

    if let Some(blob) = output.secret_binary() {
        trace!(secret = %name, len = blob.as_ref().len(), "received secret binary");
        let value = std::str::from_utf8(blob.as_ref()).map_err(|e| {
            StoreError::InvalidPayload(format!("binary secret {} is not UTF-8: {}", name, e))
        })?;
        return Ok(SecretPayload::new(value));
    }

    Ok(SecretPayload::new(String::new()))
}
