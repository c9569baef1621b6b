//! Software-only keystore.
//!
//! WARNING: keys are generated and held in process memory. There is no
//! hardware binding and no user-authentication enforcement; the private key
//! can be read by anything with access to the process. Use only for tests,
//! CI and hosts without a secure element.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use p256::ecdsa::SigningKey as EcSigningKey;
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use sha2::Sha256;

use super::{KeyStoreGateway, SigningHandle};
use crate::error::{BiometricsError, BiometricsResult};
use crate::key_type::{KeyAlgorithm, KeyGenSpec, KeyType, SignatureAlgorithm};

#[derive(Clone)]
enum SoftwareKey {
    Ec(EcSigningKey),
    Rsa(Box<RsaPrivateKey>),
}

impl SoftwareKey {
    fn generate(spec: &KeyGenSpec) -> BiometricsResult<Self> {
        match (spec.key_type, spec.algorithm) {
            (KeyType::Ec256, KeyAlgorithm::Ec) => Ok(Self::Ec(EcSigningKey::random(&mut OsRng))),
            (KeyType::Rsa2048, KeyAlgorithm::Rsa) => {
                let bits = usize::try_from(spec.key_size_bits).map_err(|_| {
                    BiometricsError::CreateKeys(format!(
                        "invalid key size {}",
                        spec.key_size_bits
                    ))
                })?;
                let key = RsaPrivateKey::new(&mut OsRng, bits)
                    .map_err(|e| BiometricsError::CreateKeys(e.to_string()))?;
                Ok(Self::Rsa(Box::new(key)))
            }
            (key_type, algorithm) => Err(BiometricsError::CreateKeys(format!(
                "key type {key_type} does not match algorithm {algorithm:?}"
            ))),
        }
    }

    const fn key_type(&self) -> KeyType {
        match self {
            Self::Ec(_) => KeyType::Ec256,
            Self::Rsa(_) => KeyType::Rsa2048,
        }
    }

    fn public_key_der(&self) -> BiometricsResult<Vec<u8>> {
        let encoded = match self {
            Self::Ec(key) => {
                use p256::pkcs8::EncodePublicKey;
                key.verifying_key()
                    .to_public_key_der()
                    .map(|document| document.as_bytes().to_vec())
                    .map_err(|e| e.to_string())
            }
            Self::Rsa(key) => {
                use rsa::pkcs8::EncodePublicKey;
                key.to_public_key()
                    .to_public_key_der()
                    .map(|document| document.as_bytes().to_vec())
                    .map_err(|e| e.to_string())
            }
        };
        encoded.map_err(|e| BiometricsError::Keystore(format!("public key encoding failed: {e}")))
    }

    fn sign(&self, algorithm: SignatureAlgorithm, payload: &[u8]) -> BiometricsResult<Vec<u8>> {
        match (self, algorithm) {
            (Self::Ec(key), SignatureAlgorithm::EcdsaX962Sha256) => {
                use p256::ecdsa::signature::Signer;
                let signature: p256::ecdsa::Signature = key
                    .try_sign(payload)
                    .map_err(|e| BiometricsError::Signature(e.to_string()))?;
                Ok(signature.to_der().as_bytes().to_vec())
            }
            (Self::Rsa(key), SignatureAlgorithm::RsaPkcs1v15Sha256) => {
                use rsa::signature::{SignatureEncoding, Signer};
                let signing_key = rsa::pkcs1v15::SigningKey::<Sha256>::new((**key).clone());
                let signature = signing_key
                    .try_sign(payload)
                    .map_err(|e| BiometricsError::Signature(e.to_string()))?;
                Ok(signature.to_vec())
            }
            (key, algorithm) => Err(BiometricsError::Signature(format!(
                "{algorithm:?} cannot be used with a {} key",
                key.key_type()
            ))),
        }
    }
}

/// [`KeyStoreGateway`] backed by process memory.
#[derive(Default, uniffi::Object)]
pub struct SoftwareKeyStore {
    entries: Mutex<BTreeMap<String, SoftwareKey>>,
}

#[uniffi::export]
impl SoftwareKeyStore {
    /// Creates an empty software keystore.
    #[uniffi::constructor]
    #[must_use]
    pub fn new() -> Self {
        log::warn!("SoftwareKeyStore: keys are held in memory with no hardware binding");
        Self::default()
    }
}

impl SoftwareKeyStore {
    fn entries(&self) -> BiometricsResult<MutexGuard<'_, BTreeMap<String, SoftwareKey>>> {
        self.entries
            .lock()
            .map_err(|_| BiometricsError::Keystore("mutex poisoned".to_string()))
    }

    fn entry(&self, alias: &str) -> BiometricsResult<SoftwareKey> {
        self.entries()?
            .get(alias)
            .cloned()
            .ok_or_else(|| BiometricsError::Keystore(format!("no key found under alias: {alias}")))
    }
}

impl KeyStoreGateway for SoftwareKeyStore {
    fn generate_key_pair(&self, spec: KeyGenSpec) -> BiometricsResult<Vec<u8>> {
        let key = SoftwareKey::generate(&spec)?;
        let public_key = key.public_key_der()?;
        self.entries()?.insert(spec.alias.clone(), key);
        log::debug!(
            "SoftwareKeyStore: generated {} key under alias {}",
            spec.key_type,
            spec.alias
        );
        Ok(public_key)
    }

    fn contains_alias(&self, alias: String) -> BiometricsResult<bool> {
        Ok(self.entries()?.contains_key(&alias))
    }

    fn delete_entry(&self, alias: String) -> BiometricsResult<()> {
        self.entries()?.remove(&alias);
        Ok(())
    }

    fn aliases(&self) -> BiometricsResult<Vec<String>> {
        Ok(self.entries()?.keys().cloned().collect())
    }

    fn public_key(&self, alias: String) -> BiometricsResult<Vec<u8>> {
        self.entry(&alias)?.public_key_der()
    }

    fn signing_handle(&self, alias: String) -> BiometricsResult<Arc<dyn SigningHandle>> {
        let key = self.entry(&alias)?;
        Ok(Arc::new(SoftwareSigningHandle { key }))
    }
}

/// Signing handle over a [`SoftwareKeyStore`] entry.
///
/// Holds its own copy of the key, so it keeps working after the entry is
/// replaced or deleted.
struct SoftwareSigningHandle {
    key: SoftwareKey,
}

impl SigningHandle for SoftwareSigningHandle {
    fn key_type(&self) -> KeyType {
        self.key.key_type()
    }

    fn sign(&self, algorithm: SignatureAlgorithm, payload: Vec<u8>) -> BiometricsResult<Vec<u8>> {
        self.key.sign(algorithm, &payload)
    }
}
