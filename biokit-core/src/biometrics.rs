//! The [`Biometrics`] object exported to the host platforms.

use std::sync::Arc;

use crate::alias::{KeyAliasResolver, SessionContext, PREFS_DEBUG_MODE};
use crate::capability::{AuthenticationType, CapabilityQueryService, SecurityLevel};
use crate::error::BiometricsResult;
use crate::lifecycle::KeyLifecycleService;
use crate::logger;
use crate::platform::{BiometricGate, KeyStoreGateway, PlatformProvider, PreferenceStore};
use crate::prompt::PromptOptions;
use crate::signature::SignatureService;
use crate::types::{
    CreateKeysRequest, CreateKeysResponse, DeleteKeysResponse, KeyExistsResponse,
    ListKeysResponse, SignatureRequest, SignatureResponse, SimplePromptResponse,
};

/// Host application settings.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct BiometricsConfig {
    /// Bundle identifier (iOS) or package name (Android). Seeds the default key alias.
    pub bundle_id: String,
}

/// Biometric authentication and hardware-backed signing for one application.
///
/// Create one instance per process and share it; every operation takes
/// `&self`.
#[derive(uniffi::Object)]
pub struct Biometrics {
    session: Arc<SessionContext>,
    resolver: KeyAliasResolver,
    capabilities: CapabilityQueryService,
    lifecycle: KeyLifecycleService,
    signatures: SignatureService,
}

impl Biometrics {
    fn build(
        config: BiometricsConfig,
        keystore: Arc<dyn KeyStoreGateway>,
        gate: Arc<dyn BiometricGate>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        match preferences.get_bool(PREFS_DEBUG_MODE.to_string()) {
            Ok(enabled) => logger::set_debug_mode(enabled),
            Err(err) => log::warn!("failed to read debug mode, leaving it off: {err}"),
        }

        let session = Arc::new(SessionContext::new(config.bundle_id, preferences));
        let resolver = KeyAliasResolver::new(session.clone());
        Self {
            capabilities: CapabilityQueryService::new(gate.clone()),
            lifecycle: KeyLifecycleService::new(resolver.clone(), keystore.clone()),
            signatures: SignatureService::new(resolver.clone(), keystore, gate),
            session,
            resolver,
        }
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl Biometrics {
    /// Creates an instance over explicit platform collaborators.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(
        config: BiometricsConfig,
        keystore: Arc<dyn KeyStoreGateway>,
        gate: Arc<dyn BiometricGate>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self::build(config, keystore, gate, preferences)
    }

    /// Creates an instance over the collaborators of a [`PlatformProvider`].
    #[uniffi::constructor]
    #[must_use]
    #[allow(clippy::needless_pass_by_value)]
    pub fn from_provider(provider: Arc<dyn PlatformProvider>) -> Self {
        Self::build(
            BiometricsConfig {
                bundle_id: provider.bundle_identifier(),
            },
            provider.keystore(),
            provider.biometric_gate(),
            provider.preferences(),
        )
    }

    /// Whether the device has biometric hardware.
    #[must_use]
    pub fn has_hardware(&self) -> bool {
        self.capabilities.has_hardware()
    }

    /// Whether at least one biometric is enrolled.
    #[must_use]
    pub fn is_enrolled(&self) -> bool {
        self.capabilities.is_enrolled()
    }

    /// Biometric types the device supports.
    #[must_use]
    pub fn supported_authentication_types(&self) -> Vec<AuthenticationType> {
        self.capabilities.supported_authentication_types()
    }

    /// Strongest enrolled security level.
    #[must_use]
    pub fn get_enrolled_level(&self) -> SecurityLevel {
        self.capabilities.enrolled_level()
    }

    /// Sets the alias used when a request names none. Persists across restarts.
    ///
    /// # Errors
    /// Fails for an empty alias or if the preference store cannot be written.
    pub fn configure_key_alias(&self, key_alias: &str) -> BiometricsResult<()> {
        self.session.configure_key_alias(key_alias)
    }

    /// The alias used when a request names none.
    #[must_use]
    pub fn get_default_key_alias(&self) -> String {
        self.resolver.resolve(None)
    }

    /// Generates a key pair, replacing any key under the same alias.
    ///
    /// # Errors
    /// See [`KeyLifecycleService::create_keys`].
    #[allow(clippy::needless_pass_by_value)]
    pub fn create_keys(&self, request: CreateKeysRequest) -> BiometricsResult<CreateKeysResponse> {
        self.lifecycle
            .create_keys(request.key_alias.as_deref(), request.key_type.as_deref())
    }

    /// Deletes the key under the resolved alias. Deleting nothing succeeds.
    ///
    /// # Errors
    /// See [`KeyLifecycleService::delete_keys`].
    #[allow(clippy::needless_pass_by_value)]
    pub fn delete_keys(&self, key_alias: Option<String>) -> BiometricsResult<DeleteKeysResponse> {
        self.lifecycle.delete_keys(key_alias.as_deref())
    }

    /// Whether a key exists under the resolved alias.
    ///
    /// # Errors
    /// Fails only if the keystore cannot be accessed.
    #[allow(clippy::needless_pass_by_value)]
    pub fn does_key_exist(&self, key_alias: Option<String>) -> BiometricsResult<KeyExistsResponse> {
        self.lifecycle.does_key_exist(key_alias.as_deref())
    }

    /// Lists keys whose alias starts with the resolved `custom_alias`.
    ///
    /// # Errors
    /// Fails only if the keystore cannot be enumerated.
    #[allow(clippy::needless_pass_by_value)]
    pub fn list_keys(&self, custom_alias: Option<String>) -> BiometricsResult<ListKeysResponse> {
        self.lifecycle.list_keys(custom_alias.as_deref())
    }

    /// Prompts the user and signs the payload.
    ///
    /// # Errors
    /// See [`SignatureService::create_signature`].
    pub async fn create_signature(
        &self,
        request: SignatureRequest,
    ) -> BiometricsResult<SignatureResponse> {
        self.signatures.create_signature(request).await
    }

    /// Prompts the user without signing anything.
    ///
    /// # Errors
    /// See [`SignatureService::simple_prompt`].
    pub async fn simple_prompt(
        &self,
        options: PromptOptions,
    ) -> BiometricsResult<SimplePromptResponse> {
        self.signatures.simple_prompt(options).await
    }

    /// Turns verbose logging on or off and persists the choice.
    ///
    /// # Errors
    /// Fails if the preference store cannot be written. Logging is switched regardless.
    pub fn set_debug_mode(&self, enabled: bool) -> BiometricsResult<()> {
        logger::set_debug_mode(enabled);
        self.session
            .preferences()
            .set_bool(PREFS_DEBUG_MODE.to_string(), enabled)
    }

    /// Whether verbose logging is persisted as on.
    ///
    /// # Errors
    /// Fails if the preference store cannot be read.
    pub fn is_debug_mode(&self) -> BiometricsResult<bool> {
        self.session
            .preferences()
            .get_bool(PREFS_DEBUG_MODE.to_string())
    }
}
