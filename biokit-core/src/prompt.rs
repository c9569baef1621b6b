//! Prompt configuration and the normalized authentication outcome.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Label of the negative button when the caller does not provide one.
pub const DEFAULT_CANCEL_LABEL: &str = "Cancel";

/// Host platform a [`crate::BiometricGate`] runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum PlatformKind {
    /// Android `BiometricPrompt` and Keystore.
    Android,
    /// iOS `LocalAuthentication` and Secure Enclave / Keychain.
    Ios,
    /// Pure software collaborators (tests, desktop hosts).
    Software,
}

impl PlatformKind {
    /// Whether the platform distinguishes a weak biometric class from a strong one.
    ///
    /// iOS has no weak tier: Touch ID and Face ID are both strong.
    #[must_use]
    pub const fn has_weak_biometric_tier(self) -> bool {
        matches!(self, Self::Android)
    }

    const fn default_prompt_message(self) -> &'static str {
        match self {
            Self::Android | Self::Software => "Authenticate",
            Self::Ios => "Authenticate to continue",
        }
    }
}

/// Prompt copy supplied by the caller. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptOptions {
    /// Title (Android) or localized reason (iOS).
    pub prompt_message: Option<String>,
    /// Subtitle below the title. Android only.
    pub prompt_subtitle: Option<String>,
    /// Description in the body of the prompt. Android only.
    pub prompt_description: Option<String>,
    /// Label of the cancel button.
    pub cancel_label: Option<String>,
    /// Label of the passcode fallback button. iOS only; an empty string hides it.
    pub fallback_label: Option<String>,
    /// Whether the user must confirm after a passive biometric (face) match.
    pub require_confirmation: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            prompt_message: None,
            prompt_subtitle: None,
            prompt_description: None,
            cancel_label: None,
            fallback_label: None,
            require_confirmation: true,
        }
    }
}

impl PromptOptions {
    /// Options with only the prompt message set.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            prompt_message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Fully resolved prompt handed to the [`crate::BiometricGate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    /// Title (Android) or localized reason (iOS). Never empty.
    pub title: String,
    /// Optional subtitle.
    pub subtitle: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Label of the cancel button. Never empty.
    pub cancel_label: String,
    /// Passcode fallback label, passed through untouched.
    pub fallback_label: Option<String>,
    /// Whether explicit confirmation is required after a passive match.
    pub confirmation_required: bool,
}

impl PromptConfig {
    /// Resolves caller options against the conventions of `platform`.
    #[must_use]
    pub fn resolve(options: &PromptOptions, platform: PlatformKind) -> Self {
        Self {
            title: non_empty(options.prompt_message.as_deref())
                .unwrap_or_else(|| platform.default_prompt_message().to_string()),
            subtitle: non_empty(options.prompt_subtitle.as_deref()),
            description: non_empty(options.prompt_description.as_deref()),
            cancel_label: non_empty(options.cancel_label.as_deref())
                .unwrap_or_else(|| DEFAULT_CANCEL_LABEL.to_string()),
            fallback_label: options.fallback_label.clone(),
            confirmation_required: options.require_confirmation,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

/// Failure codes a platform prompt can report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    uniffi::Enum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BiometricErrorCode {
    /// No biometric credential is enrolled.
    NotEnrolled,
    /// The user dismissed the prompt.
    UserCancel,
    /// The app dismissed the prompt.
    AppCancel,
    /// Biometric hardware is missing or unavailable.
    NotAvailable,
    /// Too many failed attempts.
    Lockout,
    /// Not enough storage to complete the operation.
    NoSpace,
    /// The prompt timed out.
    Timeout,
    /// The sensor could not process the input.
    UnableToProcess,
    /// Unclassified platform failure.
    Unknown,
    /// The system dismissed the prompt (e.g. another app came to the foreground).
    SystemCancel,
    /// The user chose the passcode fallback.
    UserFallback,
    /// The authentication context was invalidated.
    InvalidContext,
    /// No device passcode is set.
    PasscodeNotSet,
    /// The biometric was not recognized.
    AuthenticationFailed,
}

/// Raw result reported by a [`crate::BiometricGate`].
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum GateReport {
    /// The user authenticated; any bound signing handle is now usable.
    Authenticated,
    /// The prompt ended without authentication.
    Failed {
        /// Normalized platform code.
        code: BiometricErrorCode,
        /// Platform message, as reported.
        message: String,
    },
}

impl GateReport {
    /// Wire code of a failed prompt, `None` when the user authenticated.
    ///
    /// Always one of the [`BiometricErrorCode`] names, never the message.
    #[must_use]
    pub fn error_code(&self) -> Option<String> {
        match self {
            Self::Authenticated => None,
            Self::Failed { code, .. } => Some(code.to_string()),
        }
    }
}

/// Normalized outcome of one biometric prompt.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum AuthenticationOutcome {
    /// The user authenticated.
    Success,
    /// The user dismissed the prompt.
    UserCancelled,
    /// Biometrics cannot be used on this device right now.
    NotAvailable,
    /// Biometrics are locked after too many failed attempts.
    Lockout,
    /// Any other failure, with the platform detail.
    Unknown {
        /// The platform code and message.
        detail: String,
    },
}

impl From<GateReport> for AuthenticationOutcome {
    fn from(report: GateReport) -> Self {
        match report {
            GateReport::Authenticated => Self::Success,
            GateReport::Failed { code, message } => match code {
                BiometricErrorCode::UserCancel => Self::UserCancelled,
                BiometricErrorCode::NotAvailable
                | BiometricErrorCode::NotEnrolled
                | BiometricErrorCode::PasscodeNotSet
                | BiometricErrorCode::NoSpace => Self::NotAvailable,
                BiometricErrorCode::Lockout => Self::Lockout,
                BiometricErrorCode::AppCancel
                | BiometricErrorCode::Timeout
                | BiometricErrorCode::UnableToProcess
                | BiometricErrorCode::Unknown
                | BiometricErrorCode::SystemCancel
                | BiometricErrorCode::UserFallback
                | BiometricErrorCode::InvalidContext
                | BiometricErrorCode::AuthenticationFailed => Self::Unknown {
                    detail: if message.is_empty() {
                        code.to_string()
                    } else {
                        format!("{code}: {message}")
                    },
                },
            },
        }
    }
}
