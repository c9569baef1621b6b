//! Key pair lifecycle: create, delete, probe and enumerate.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::alias::KeyAliasResolver;
use crate::error::{BiometricsError, BiometricsResult};
use crate::key_type::KeyType;
use crate::platform::KeyStoreGateway;
use crate::types::{
    CreateKeysResponse, DeleteKeysResponse, KeyEntry, KeyExistsResponse, ListKeysResponse,
};

/// Creates, deletes and enumerates the biometric-bound key pairs.
///
/// At most one entry exists per alias: creating under an occupied alias
/// replaces the old key.
pub struct KeyLifecycleService {
    resolver: KeyAliasResolver,
    keystore: Arc<dyn KeyStoreGateway>,
}

impl KeyLifecycleService {
    /// Creates the service.
    #[must_use]
    pub fn new(resolver: KeyAliasResolver, keystore: Arc<dyn KeyStoreGateway>) -> Self {
        Self { resolver, keystore }
    }

    /// Generates a new key pair under the resolved alias, replacing any
    /// existing one, and returns its Base64 `SubjectPublicKeyInfo`.
    ///
    /// # Errors
    ///
    /// - [`BiometricsError::UnsupportedKeyType`] for an unknown `key_type`.
    ///   The keystore is left untouched.
    /// - [`BiometricsError::CreateKeys`] if the keystore fails.
    pub fn create_keys(
        &self,
        key_alias: Option<&str>,
        key_type: Option<&str>,
    ) -> BiometricsResult<CreateKeysResponse> {
        let key_type = KeyType::parse(key_type)?;
        let alias = self.resolver.resolve(key_alias);

        let exists = self
            .keystore
            .contains_alias(alias.clone())
            .map_err(|e| BiometricsError::CreateKeys(e.to_string()))?;
        if exists {
            log::debug!("replacing existing key under alias {alias}");
            self.keystore
                .delete_entry(alias.clone())
                .map_err(|e| BiometricsError::CreateKeys(e.to_string()))?;
        }

        let public_key = self
            .keystore
            .generate_key_pair(key_type.key_gen_spec(&alias))
            .map_err(|e| BiometricsError::CreateKeys(e.to_string()))?;
        log::info!("created {key_type} key under alias {alias}");

        Ok(CreateKeysResponse {
            public_key: STANDARD.encode(public_key),
            success: true,
        })
    }

    /// Deletes the key under the resolved alias.
    ///
    /// A missing key is reported as success. After deleting, the alias is
    /// probed again and the call fails if the entry is still present.
    ///
    /// # Errors
    ///
    /// Returns [`BiometricsError::DeleteKeys`] if the keystore fails or the
    /// key survives deletion.
    pub fn delete_keys(&self, key_alias: Option<&str>) -> BiometricsResult<DeleteKeysResponse> {
        let alias = self.resolver.resolve(key_alias);

        if !self.contains(&alias)? {
            log::debug!("no key under alias {alias}, nothing to delete");
            return Ok(DeleteKeysResponse { success: true });
        }

        self.keystore
            .delete_entry(alias.clone())
            .map_err(|e| BiometricsError::DeleteKeys(e.to_string()))?;

        if self.contains(&alias)? {
            return Err(BiometricsError::DeleteKeys(format!(
                "key under alias {alias} is still present after deletion"
            )));
        }

        log::info!("deleted key under alias {alias}");
        Ok(DeleteKeysResponse { success: true })
    }

    /// Whether a key exists under the resolved alias.
    ///
    /// # Errors
    ///
    /// Returns [`BiometricsError::Keystore`] if the keystore cannot be accessed.
    pub fn does_key_exist(&self, key_alias: Option<&str>) -> BiometricsResult<KeyExistsResponse> {
        let alias = self.resolver.resolve(key_alias);
        let key_exists = self.keystore.contains_alias(alias)?;
        Ok(KeyExistsResponse { key_exists })
    }

    /// Lists the entries whose alias starts with the resolved filter.
    ///
    /// Entries whose public key cannot be read are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`BiometricsError::Keystore`] if the keystore cannot be enumerated.
    pub fn list_keys(&self, custom_alias: Option<&str>) -> BiometricsResult<ListKeysResponse> {
        let filter = self.resolver.resolve(custom_alias);

        let mut keys = Vec::new();
        for alias in self.keystore.aliases()? {
            if !alias.starts_with(&filter) {
                continue;
            }
            match self.keystore.public_key(alias.clone()) {
                Ok(public_key) => keys.push(KeyEntry {
                    alias,
                    public_key: STANDARD.encode(public_key),
                }),
                Err(err) => log::warn!("skipping key {alias}: {err}"),
            }
        }

        Ok(ListKeysResponse { keys })
    }

    fn contains(&self, alias: &str) -> BiometricsResult<bool> {
        self.keystore
            .contains_alias(alias.to_string())
            .map_err(|e| BiometricsError::DeleteKeys(e.to_string()))
    }
}
