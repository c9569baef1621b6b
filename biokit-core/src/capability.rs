//! Read-only queries of biometric hardware and enrollment state.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::platform::BiometricGate;

/// A kind of biometric authentication a device supports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, uniffi::Enum,
)]
pub enum AuthenticationType {
    /// Fingerprint (Touch ID on iOS).
    Fingerprint,
    /// Facial recognition (Face ID on iOS).
    FacialRecognition,
    /// Iris recognition. Android only.
    Iris,
}

impl AuthenticationType {
    /// Numeric code exposed to JavaScript callers.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Fingerprint => 1,
            Self::FacialRecognition => 2,
            Self::Iris => 3,
        }
    }
}

/// Strongest class of device authentication currently enrolled.
///
/// Variants are ordered from weakest to strongest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    uniffi::Enum,
)]
pub enum SecurityLevel {
    /// Nothing is enrolled.
    #[default]
    None,
    /// A PIN, pattern or password.
    Secret,
    /// A weak biometric, e.g. 2D face unlock.
    BiometricWeak,
    /// A strong biometric, e.g. fingerprint or 3D face.
    BiometricStrong,
}

impl SecurityLevel {
    /// Numeric code exposed to JavaScript callers.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Secret => 1,
            Self::BiometricWeak => 2,
            Self::BiometricStrong => 3,
        }
    }
}

/// Class of authenticator probed by [`BiometricGate::can_authenticate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum AuthenticatorStrength {
    /// PIN, pattern or password.
    DeviceCredential,
    /// Class 2 biometrics.
    BiometricWeak,
    /// Class 3 biometrics.
    BiometricStrong,
}

/// Result of a capability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum AvailabilityStatus {
    /// Authenticators of the probed class are enrolled and usable.
    Available,
    /// The device has no hardware for the probed class.
    NoHardware,
    /// The hardware exists but cannot be used right now.
    HardwareUnavailable,
    /// The hardware exists but nothing is enrolled.
    NoneEnrolled,
    /// Enrolled, but temporarily blocked after too many failures.
    Lockout,
    /// The probe is not supported on this OS version.
    Unsupported,
}

/// Biometric modalities reported by the device, each probed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct ModalitySupport {
    /// Fingerprint sensor present.
    pub fingerprint: bool,
    /// Face recognition present.
    pub facial_recognition: bool,
    /// Iris scanner present.
    pub iris: bool,
}

/// Stateless delegation of hardware and enrollment queries to the gate.
pub struct CapabilityQueryService {
    gate: Arc<dyn BiometricGate>,
}

impl CapabilityQueryService {
    /// Creates the service over `gate`.
    #[must_use]
    pub fn new(gate: Arc<dyn BiometricGate>) -> Self {
        Self { gate }
    }

    /// `true` unless the platform reports biometric hardware categorically absent.
    #[must_use]
    pub fn has_hardware(&self) -> bool {
        self.gate.can_authenticate(AuthenticatorStrength::BiometricWeak)
            != AvailabilityStatus::NoHardware
    }

    /// `true` when at least one biometric is enrolled. Lockout counts as enrolled.
    #[must_use]
    pub fn is_enrolled(&self) -> bool {
        matches!(
            self.gate.can_authenticate(AuthenticatorStrength::BiometricWeak),
            AvailabilityStatus::Available | AvailabilityStatus::Lockout
        )
    }

    /// Supported biometric types, empty when there is no hardware.
    #[must_use]
    pub fn supported_authentication_types(&self) -> Vec<AuthenticationType> {
        if !self.has_hardware() {
            return Vec::new();
        }

        let modalities = self.gate.supported_modalities();
        let mut types = BTreeSet::new();
        if modalities.fingerprint {
            types.insert(AuthenticationType::Fingerprint);
        }
        if modalities.facial_recognition {
            types.insert(AuthenticationType::FacialRecognition);
        }
        if modalities.iris {
            types.insert(AuthenticationType::Iris);
        }
        types.into_iter().collect()
    }

    /// The strongest enrolled security level.
    ///
    /// Checks run from device credential to strong biometric and a later
    /// satisfied check overrides an earlier one. On platforms without a weak
    /// biometric tier a satisfied weak check counts as strong.
    #[must_use]
    pub fn enrolled_level(&self) -> SecurityLevel {
        let weak_level = if self.gate.platform().has_weak_biometric_tier() {
            SecurityLevel::BiometricWeak
        } else {
            SecurityLevel::BiometricStrong
        };
        let checks = [
            (AuthenticatorStrength::DeviceCredential, SecurityLevel::Secret),
            (AuthenticatorStrength::BiometricWeak, weak_level),
            (
                AuthenticatorStrength::BiometricStrong,
                SecurityLevel::BiometricStrong,
            ),
        ];

        let mut level = SecurityLevel::None;
        for (strength, satisfied_level) in checks {
            if self.gate.can_authenticate(strength) == AvailabilityStatus::Available {
                level = level.max(satisfied_level);
            }
        }
        level
    }
}
