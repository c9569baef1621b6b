//! Biometric-gated signing and the plain authentication prompt.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::alias::KeyAliasResolver;
use crate::error::{BiometricsError, BiometricsResult};
use crate::platform::{BiometricGate, KeyStoreGateway, SigningHandle};
use crate::prompt::{AuthenticationOutcome, PromptConfig, PromptOptions};
use crate::types::{SignatureRequest, SignatureResponse, SimplePromptResponse};

/// Error reported when signing with an alias that has no key.
pub const KEY_NOT_FOUND: &str = "Key not found";

/// Signs payloads with a key that only unlocks after a biometric prompt.
pub struct SignatureService {
    resolver: KeyAliasResolver,
    keystore: Arc<dyn KeyStoreGateway>,
    gate: Arc<dyn BiometricGate>,
}

impl SignatureService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        resolver: KeyAliasResolver,
        keystore: Arc<dyn KeyStoreGateway>,
        gate: Arc<dyn BiometricGate>,
    ) -> Self {
        Self {
            resolver,
            keystore,
            gate,
        }
    }

    /// Prompts the user and signs the UTF-8 bytes of `request.payload` with
    /// the key under the resolved alias.
    ///
    /// The signing handle is bound to the prompt, so the platform only lets it
    /// sign inside the authenticated session. Routine failures (cancel,
    /// lockout, a missing key, a keystore or signing failure) resolve as
    /// `success: false`.
    ///
    /// # Errors
    ///
    /// - [`BiometricsError::InvalidInput`] for an empty payload.
    /// - [`BiometricsError::MissingHostSurface`] when no window can present the prompt.
    /// - [`BiometricsError::Authentication`] for unclassified authentication failures.
    /// - Any error the gate raises while presenting the prompt.
    pub async fn create_signature(
        &self,
        request: SignatureRequest,
    ) -> BiometricsResult<SignatureResponse> {
        if request.payload.is_empty() {
            return Err(BiometricsError::invalid_input(
                "payload",
                "must not be empty",
            ));
        }

        let alias = self.resolver.resolve(request.key_alias.as_deref());
        if !self.gate.has_host_surface() {
            return Err(BiometricsError::MissingHostSurface);
        }

        let prompt = PromptConfig::resolve(&request.prompt, self.gate.platform());
        if let Some(warning) = self.gate.configuration_warning() {
            log::warn!("not prompting for signature: {warning}");
            return Ok(SignatureResponse::warning(warning));
        }

        let handle = match self.signing_handle(&alias) {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                log::debug!("no key under alias {alias}");
                return Ok(SignatureResponse::failed(KEY_NOT_FOUND));
            }
            Err(err) => return soft_failure(err),
        };

        let report = self.gate.authenticate(prompt, Some(handle.clone())).await?;
        let error_code = report.error_code();
        match AuthenticationOutcome::from(report) {
            AuthenticationOutcome::Success => {}
            AuthenticationOutcome::Unknown { detail } => {
                return Err(BiometricsError::Authentication(detail));
            }
            outcome => {
                let code = error_code.unwrap_or_default();
                log::debug!("signature prompt ended with {code} ({outcome:?})");
                return Ok(SignatureResponse::failed(code));
            }
        }

        let algorithm = handle.key_type().signature_algorithm();
        match handle.sign(algorithm, request.payload.into_bytes()) {
            Ok(signature) => {
                log::debug!("signed payload with key {alias}");
                Ok(SignatureResponse::signed(STANDARD.encode(signature)))
            }
            Err(err) => soft_failure(err),
        }
    }

    /// Shows the biometric prompt without any key operation.
    ///
    /// Every authentication outcome resolves, failures carry their code.
    ///
    /// # Errors
    ///
    /// - [`BiometricsError::MissingHostSurface`] when no window can present the prompt.
    /// - Any error the gate raises while presenting the prompt.
    pub async fn simple_prompt(
        &self,
        options: PromptOptions,
    ) -> BiometricsResult<SimplePromptResponse> {
        if !self.gate.has_host_surface() {
            return Err(BiometricsError::MissingHostSurface);
        }

        let prompt = PromptConfig::resolve(&options, self.gate.platform());
        if let Some(warning) = self.gate.configuration_warning() {
            log::warn!("not prompting: {warning}");
            return Ok(SimplePromptResponse {
                success: false,
                error: None,
                warning: Some(warning),
            });
        }

        let report = self.gate.authenticate(prompt, None).await?;
        Ok(SimplePromptResponse {
            error: report.error_code(),
            success: AuthenticationOutcome::from(report) == AuthenticationOutcome::Success,
            warning: None,
        })
    }

    /// `Ok(None)` when there is no key under `alias`.
    fn signing_handle(&self, alias: &str) -> BiometricsResult<Option<Arc<dyn SigningHandle>>> {
        if !self.keystore.contains_alias(alias.to_string())? {
            return Ok(None);
        }
        self.keystore.signing_handle(alias.to_string()).map(Some)
    }
}

/// Keystore and signing failures resolve with their message. Callback
/// failures of the host bindings still reject.
fn soft_failure(err: BiometricsError) -> BiometricsResult<SignatureResponse> {
    match err {
        BiometricsError::UnexpectedUniFFICallbackError(_) => Err(err),
        err => {
            log::warn!("signature failed: {err}");
            Ok(SignatureResponse::failed(err.to_string()))
        }
    }
}
