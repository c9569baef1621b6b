#![allow(dead_code, missing_docs)]

//! Common test utilities shared across integration tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use biokit_core::platform::{MemoryPreferenceStore, SoftwareKeyStore};
use biokit_core::{
    AuthenticatorStrength, AvailabilityStatus, BiometricErrorCode, BiometricGate, Biometrics,
    BiometricsError, BiometricsResult, GateReport, KeyGenSpec, KeyStoreGateway, ModalitySupport,
    KeyType, PlatformKind, PlatformProvider, PreferenceStore, PromptConfig, SignatureAlgorithm,
    SigningHandle,
};

pub const BUNDLE_ID: &str = "com.example.wallet";

/// A gate whose next outcome is set by the test.
pub struct FakeGate {
    platform: PlatformKind,
    host_surface: AtomicBool,
    warning: Mutex<Option<String>>,
    report: Mutex<GateReport>,
    prompts: AtomicUsize,
}

impl FakeGate {
    pub fn new(platform: PlatformKind) -> Self {
        Self {
            platform,
            host_surface: AtomicBool::new(true),
            warning: Mutex::new(None),
            report: Mutex::new(GateReport::Authenticated),
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn fail_next(&self, code: BiometricErrorCode, message: &str) {
        *self.report.lock().unwrap() = GateReport::Failed {
            code,
            message: message.to_string(),
        };
    }

    pub fn set_host_surface(&self, available: bool) {
        self.host_surface.store(available, Ordering::SeqCst);
    }

    pub fn set_warning(&self, warning: Option<&str>) {
        *self.warning.lock().unwrap() = warning.map(ToString::to_string);
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BiometricGate for FakeGate {
    fn platform(&self) -> PlatformKind {
        self.platform
    }

    fn has_host_surface(&self) -> bool {
        self.host_surface.load(Ordering::SeqCst)
    }

    fn configuration_warning(&self) -> Option<String> {
        self.warning.lock().unwrap().clone()
    }

    fn can_authenticate(&self, _strength: AuthenticatorStrength) -> AvailabilityStatus {
        AvailabilityStatus::Available
    }

    fn supported_modalities(&self) -> ModalitySupport {
        ModalitySupport {
            fingerprint: true,
            facial_recognition: false,
            iris: false,
        }
    }

    async fn authenticate(
        &self,
        _prompt: PromptConfig,
        _crypto: Option<Arc<dyn SigningHandle>>,
    ) -> BiometricsResult<GateReport> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        Ok(self.report.lock().unwrap().clone())
    }
}

/// Keystore wrapper failing to export the public key of one alias.
pub struct CorruptEntryKeystore {
    inner: SoftwareKeyStore,
    corrupt_alias: String,
}

impl CorruptEntryKeystore {
    pub fn new(corrupt_alias: &str) -> Self {
        Self {
            inner: SoftwareKeyStore::new(),
            corrupt_alias: corrupt_alias.to_string(),
        }
    }
}

impl KeyStoreGateway for CorruptEntryKeystore {
    fn generate_key_pair(&self, spec: KeyGenSpec) -> BiometricsResult<Vec<u8>> {
        self.inner.generate_key_pair(spec)
    }

    fn contains_alias(&self, alias: String) -> BiometricsResult<bool> {
        self.inner.contains_alias(alias)
    }

    fn delete_entry(&self, alias: String) -> BiometricsResult<()> {
        self.inner.delete_entry(alias)
    }

    fn aliases(&self) -> BiometricsResult<Vec<String>> {
        self.inner.aliases()
    }

    fn public_key(&self, alias: String) -> BiometricsResult<Vec<u8>> {
        if alias == self.corrupt_alias {
            return Err(BiometricsError::Keystore(
                "unable to decode certificate".to_string(),
            ));
        }
        self.inner.public_key(alias)
    }

    fn signing_handle(&self, alias: String) -> BiometricsResult<Arc<dyn SigningHandle>> {
        self.inner.signing_handle(alias)
    }
}

/// Keystore wrapper whose deletes silently do nothing.
pub struct StickyKeystore {
    inner: SoftwareKeyStore,
}

impl StickyKeystore {
    pub fn new() -> Self {
        Self {
            inner: SoftwareKeyStore::new(),
        }
    }
}

impl KeyStoreGateway for StickyKeystore {
    fn generate_key_pair(&self, spec: KeyGenSpec) -> BiometricsResult<Vec<u8>> {
        self.inner.generate_key_pair(spec)
    }

    fn contains_alias(&self, alias: String) -> BiometricsResult<bool> {
        self.inner.contains_alias(alias)
    }

    fn delete_entry(&self, _alias: String) -> BiometricsResult<()> {
        Ok(())
    }

    fn aliases(&self) -> BiometricsResult<Vec<String>> {
        self.inner.aliases()
    }

    fn public_key(&self, alias: String) -> BiometricsResult<Vec<u8>> {
        self.inner.public_key(alias)
    }

    fn signing_handle(&self, alias: String) -> BiometricsResult<Arc<dyn SigningHandle>> {
        self.inner.signing_handle(alias)
    }
}

/// Where a [`FaultyKeystore`] fails when a signing handle is requested.
#[derive(Debug, Clone, Copy)]
pub enum SigningFault {
    /// The keystore cannot hand out the handle.
    HandleUnavailable,
    /// The handle is returned but signing fails.
    SignFails,
    /// The foreign callback itself throws.
    CallbackError,
}

/// Keystore wrapper injecting a [`SigningFault`] on the signing path.
pub struct FaultyKeystore {
    inner: SoftwareKeyStore,
    fault: SigningFault,
}

impl FaultyKeystore {
    pub fn new(fault: SigningFault) -> Self {
        Self {
            inner: SoftwareKeyStore::new(),
            fault,
        }
    }
}

impl KeyStoreGateway for FaultyKeystore {
    fn generate_key_pair(&self, spec: KeyGenSpec) -> BiometricsResult<Vec<u8>> {
        self.inner.generate_key_pair(spec)
    }

    fn contains_alias(&self, alias: String) -> BiometricsResult<bool> {
        self.inner.contains_alias(alias)
    }

    fn delete_entry(&self, alias: String) -> BiometricsResult<()> {
        self.inner.delete_entry(alias)
    }

    fn aliases(&self) -> BiometricsResult<Vec<String>> {
        self.inner.aliases()
    }

    fn public_key(&self, alias: String) -> BiometricsResult<Vec<u8>> {
        self.inner.public_key(alias)
    }

    fn signing_handle(&self, alias: String) -> BiometricsResult<Arc<dyn SigningHandle>> {
        match self.fault {
            SigningFault::HandleUnavailable => Err(BiometricsError::Keystore(
                "key permanently invalidated".to_string(),
            )),
            SigningFault::SignFails => {
                let key_type = self.inner.signing_handle(alias)?.key_type();
                Ok(Arc::new(FailingHandle { key_type }))
            }
            SigningFault::CallbackError => Err(BiometricsError::UnexpectedUniFFICallbackError(
                "NullPointerException".to_string(),
            )),
        }
    }
}

/// Signing handle whose every signature attempt fails.
pub struct FailingHandle {
    key_type: KeyType,
}

impl SigningHandle for FailingHandle {
    fn key_type(&self) -> KeyType {
        self.key_type
    }

    fn sign(&self, _algorithm: SignatureAlgorithm, _payload: Vec<u8>) -> BiometricsResult<Vec<u8>> {
        Err(BiometricsError::Signature("user not authenticated".to_string()))
    }
}

/// Software host: in-memory keys and preferences, a scripted prompt.
pub struct SoftwareHost {
    pub keystore: Arc<dyn KeyStoreGateway>,
    pub gate: Arc<FakeGate>,
    pub preferences: Arc<dyn PreferenceStore>,
}

impl SoftwareHost {
    pub fn new() -> Self {
        Self::with_keystore(Arc::new(SoftwareKeyStore::new()))
    }

    pub fn with_keystore(keystore: Arc<dyn KeyStoreGateway>) -> Self {
        Self {
            keystore,
            gate: Arc::new(FakeGate::new(PlatformKind::Software)),
            preferences: Arc::new(MemoryPreferenceStore::new()),
        }
    }

    /// A new [`Biometrics`] over this host, as after an app restart.
    pub fn launch(self: &Arc<Self>) -> Biometrics {
        Biometrics::from_provider(self.clone())
    }
}

impl PlatformProvider for SoftwareHost {
    fn keystore(&self) -> Arc<dyn KeyStoreGateway> {
        self.keystore.clone()
    }

    fn biometric_gate(&self) -> Arc<dyn BiometricGate> {
        self.gate.clone()
    }

    fn preferences(&self) -> Arc<dyn PreferenceStore> {
        self.preferences.clone()
    }

    fn bundle_identifier(&self) -> String {
        BUNDLE_ID.to_string()
    }
}
