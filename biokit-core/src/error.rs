use thiserror::Error;

/// Result type for biometric and keystore operations.
pub type BiometricsResult<T> = Result<T, BiometricsError>;

/// Errors that reject a request.
///
/// Only configuration mistakes and platform failures end up here. Routine
/// authentication outcomes (the user cancelling, a missing key while signing,
/// a soft configuration warning) are reported inside the response envelopes
/// instead, see [`crate::SignatureResponse`] and [`crate::SimplePromptResponse`].
#[derive(Debug, Error, uniffi::Error)]
pub enum BiometricsError {
    /// There is no foreground activity or window to present the prompt from.
    #[error("missing_host_surface: no foreground activity or window to present the prompt")]
    MissingHostSurface,

    /// The presented input is not valid for the requested operation.
    #[error("invalid_input_{attribute}: {reason}")]
    InvalidInput {
        /// Name of the offending attribute.
        attribute: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The requested key type is not one of `rsa2048` or `ec256`.
    #[error("CREATE_KEYS_ERROR: unsupported key type `{0}`")]
    UnsupportedKeyType(String),

    /// The keystore failed to generate or export a key pair.
    #[error("CREATE_KEYS_ERROR: {0}")]
    CreateKeys(String),

    /// The keystore failed to delete a key, or the key survived deletion.
    #[error("DELETE_KEYS_ERROR: {0}")]
    DeleteKeys(String),

    /// The keystore could not be accessed.
    #[error("keystore_error: {0}")]
    Keystore(String),

    /// Authentication failed for a reason other than the user cancelling.
    ///
    /// Carries the platform error string.
    #[error("authentication_error: {0}")]
    Authentication(String),

    /// The signing handle failed to produce a signature.
    #[error("signature_error: {0}")]
    Signature(String),

    /// The persisted preference store failed.
    #[error("preferences_error: {0}")]
    Preferences(String),

    /// Unexpected `UniFFI` callback error.
    #[error("unexpected_uniffi_callback_error: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl BiometricsError {
    pub(crate) fn invalid_input(attribute: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for BiometricsError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(error.reason)
    }
}
