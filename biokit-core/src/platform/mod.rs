//! Platform interfaces for biometric authentication and key storage.
//!
//! The orchestration services only ever talk to these traits. Each host
//! provides its own implementation through `UniFFI`:
//!
//! ## Android (Kotlin)
//! - [`KeyStoreGateway`]: `AndroidKeyStore` with `KeyGenParameterSpec`
//! - [`SigningHandle`]: `java.security.Signature` wrapped in a `CryptoObject`
//! - [`BiometricGate`]: `BiometricPrompt` and `BiometricManager`
//! - [`PreferenceStore`]: `SharedPreferences`
//!
//! ## iOS (Swift)
//! - [`KeyStoreGateway`]: Secure Enclave / Keychain (`SecKeyCreateRandomKey`)
//! - [`SigningHandle`]: `SecKeyCreateSignature` bound to an `LAContext`
//! - [`BiometricGate`]: `LAContext.evaluatePolicy`
//! - [`PreferenceStore`]: `UserDefaults`
//!
//! ## Software
//! - [`SoftwareKeyStore`]: in-memory keys, no hardware binding
//! - [`MemoryPreferenceStore`]: in-memory preferences

use std::sync::Arc;

use crate::capability::{AuthenticatorStrength, AvailabilityStatus, ModalitySupport};
use crate::error::BiometricsResult;
use crate::key_type::{KeyGenSpec, KeyType, SignatureAlgorithm};
use crate::prompt::{GateReport, PlatformKind, PromptConfig};

pub mod memory;
pub mod software;

pub use memory::MemoryPreferenceStore;
pub use software::SoftwareKeyStore;

/// Access to the platform's secure key store.
///
/// Keys are non-extractable: only public keys and signing handles leave it.
#[uniffi::export(with_foreign)]
pub trait KeyStoreGateway: Send + Sync {
    /// Generates a new key pair described by `spec` and returns its public key
    /// as DER-encoded `SubjectPublicKeyInfo`.
    ///
    /// The caller removes any previous entry under the same alias first.
    ///
    /// # Errors
    ///
    /// Returns an error if the keystore refuses the parameters or generation fails.
    fn generate_key_pair(&self, spec: KeyGenSpec) -> BiometricsResult<Vec<u8>>;

    /// Whether an entry exists under `alias`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the keystore cannot be accessed.
    fn contains_alias(&self, alias: String) -> BiometricsResult<bool>;

    /// Deletes the entry under `alias`. A missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the keystore refuses the deletion.
    fn delete_entry(&self, alias: String) -> BiometricsResult<()>;

    /// Lists the aliases of all entries owned by the application.
    ///
    /// # Errors
    ///
    /// Returns an error if the keystore cannot be enumerated.
    fn aliases(&self) -> BiometricsResult<Vec<String>>;

    /// Returns the public key under `alias` as DER-encoded `SubjectPublicKeyInfo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing or cannot be decoded.
    fn public_key(&self, alias: String) -> BiometricsResult<Vec<u8>>;

    /// Returns a signing handle over the private key under `alias`.
    ///
    /// The handle is meant to be handed to [`BiometricGate::authenticate`] so
    /// the platform only allows it to sign within the authenticated session.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing or not a private key.
    fn signing_handle(&self, alias: String) -> BiometricsResult<Arc<dyn SigningHandle>>;
}

/// A private key ready to sign, gated by the authentication session it is bound to.
#[uniffi::export(with_foreign)]
pub trait SigningHandle: Send + Sync {
    /// Type of the underlying key.
    fn key_type(&self) -> KeyType;

    /// Signs `payload` with `algorithm`.
    ///
    /// ECDSA signatures are DER encoded, RSA signatures are the raw PKCS#1 v1.5 block.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not authenticated or signing fails.
    fn sign(
        &self,
        algorithm: SignatureAlgorithm,
        payload: Vec<u8>,
    ) -> BiometricsResult<Vec<u8>>;
}

/// The platform biometric prompt and its capability probes.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait BiometricGate: Send + Sync {
    /// Platform the gate runs on.
    fn platform(&self) -> PlatformKind;

    /// Whether a foreground activity or window is available to present from.
    fn has_host_surface(&self) -> bool;

    /// A warning when the app is missing configuration required to show the
    /// prompt safely, such as `NSFaceIDUsageDescription` on iOS.
    fn configuration_warning(&self) -> Option<String>;

    /// Probes whether authenticators of `strength` can be used.
    fn can_authenticate(&self, strength: AuthenticatorStrength) -> AvailabilityStatus;

    /// Reports which biometric modalities the device supports.
    fn supported_modalities(&self) -> ModalitySupport;

    /// Presents the prompt described by `prompt`.
    ///
    /// When `crypto` is set, the platform binds the handle to the
    /// authentication session so it can only sign after a successful prompt.
    ///
    /// # Errors
    ///
    /// Returns an error only when the prompt could not be presented at all.
    /// Authentication failures are reported as [`GateReport::Failed`].
    async fn authenticate(
        &self,
        prompt: PromptConfig,
        crypto: Option<Arc<dyn SigningHandle>>,
    ) -> BiometricsResult<GateReport>;
}

/// Process-durable key/value storage.
#[uniffi::export(with_foreign)]
pub trait PreferenceStore: Send + Sync {
    /// Reads the string stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_string(&self, key: String) -> BiometricsResult<Option<String>>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set_string(&self, key: String, value: String) -> BiometricsResult<()>;

    /// Reads the flag stored under `key`, `false` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_bool(&self, key: String) -> BiometricsResult<bool>;

    /// Stores the flag `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set_bool(&self, key: String, value: bool) -> BiometricsResult<()>;
}

/// Provider responsible for the platform collaborators of one host.
#[uniffi::export(with_foreign)]
pub trait PlatformProvider: Send + Sync {
    /// Returns the keystore implementation.
    fn keystore(&self) -> Arc<dyn KeyStoreGateway>;

    /// Returns the biometric gate implementation.
    fn biometric_gate(&self) -> Arc<dyn BiometricGate>;

    /// Returns the persisted preference store.
    fn preferences(&self) -> Arc<dyn PreferenceStore>;

    /// Returns the application's bundle or package identifier.
    fn bundle_identifier(&self) -> String;
}
