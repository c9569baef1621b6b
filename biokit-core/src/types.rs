//! Request and response envelopes.
//!
//! Field names serialize in camelCase to match the shapes JavaScript callers
//! already consume (`publicKey`, `keyExists`, ...).

use serde::{Deserialize, Serialize};

use crate::prompt::PromptOptions;

/// Input of `create_keys`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeysRequest {
    /// Alias override; resolved when absent.
    pub key_alias: Option<String>,
    /// `rsa2048` or `ec256`; `ec256` when absent.
    pub key_type: Option<String>,
}

/// Output of `create_keys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeysResponse {
    /// Base64 of the DER `SubjectPublicKeyInfo`.
    pub public_key: String,
    /// Always `true`; failures are returned as errors.
    pub success: bool,
}

/// Output of `delete_keys`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct DeleteKeysResponse {
    /// Always `true`; failures are returned as errors.
    pub success: bool,
}

/// Output of `does_key_exist`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct KeyExistsResponse {
    /// Whether an entry exists under the resolved alias.
    pub key_exists: bool,
}

/// One listed keystore entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct KeyEntry {
    /// Alias of the entry.
    pub alias: String,
    /// Base64 of the DER `SubjectPublicKeyInfo`.
    pub public_key: String,
}

/// Output of `list_keys`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct ListKeysResponse {
    /// Entries matching the filter, in keystore order.
    pub keys: Vec<KeyEntry>,
}

/// Input of `create_signature`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRequest {
    /// Text to sign; its UTF-8 bytes are signed. Must not be empty.
    pub payload: String,
    /// Alias override; resolved when absent.
    pub key_alias: Option<String>,
    /// Prompt copy.
    #[serde(flatten)]
    pub prompt: PromptOptions,
}

impl SignatureRequest {
    /// A request for `payload` with default prompt copy and the resolved alias.
    #[must_use]
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            key_alias: None,
            prompt: PromptOptions::default(),
        }
    }
}

/// Output of `create_signature`.
///
/// `success: false` carries either `error` (attempted and failed) or
/// `warning` (not attempted, the app configuration needs fixing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResponse {
    /// Whether a signature was produced.
    pub success: bool,
    /// Base64 signature on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Failure code or message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Configuration warning; the prompt was not shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl SignatureResponse {
    pub(crate) const fn signed(signature: String) -> Self {
        Self {
            success: true,
            signature: Some(signature),
            error: None,
            warning: None,
        }
    }

    pub(crate) fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            signature: None,
            error: Some(error.into()),
            warning: None,
        }
    }

    pub(crate) const fn warning(warning: String) -> Self {
        Self {
            success: false,
            signature: None,
            error: None,
            warning: Some(warning),
        }
    }
}

/// Output of `simple_prompt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct SimplePromptResponse {
    /// Whether the user authenticated.
    pub success: bool,
    /// Failure code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Configuration warning; the prompt was not shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
