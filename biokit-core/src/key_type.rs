//! Key types and the platform key-generation parameters derived from them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::BiometricsError;

/// Asymmetric key type of a biometric-gated key pair.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    uniffi::Enum,
)]
#[strum(ascii_case_insensitive)]
pub enum KeyType {
    /// RSA with a 2048 bit modulus, signing with PKCS#1 v1.5 and SHA-256.
    #[strum(serialize = "rsa2048")]
    #[serde(rename = "rsa2048")]
    Rsa2048,
    /// ECDSA over NIST P-256 (secp256r1) with SHA-256.
    #[default]
    #[strum(serialize = "ec256")]
    #[serde(rename = "ec256")]
    Ec256,
}

/// Key algorithm family understood by the platform keystore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum KeyAlgorithm {
    /// `KeyProperties.KEY_ALGORITHM_RSA` / `kSecAttrKeyTypeRSA`.
    Rsa,
    /// `KeyProperties.KEY_ALGORITHM_EC` / `kSecAttrKeyTypeECSECPrimeRandom`.
    Ec,
}

/// Operation a key is authorized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum KeyPurpose {
    /// `KeyProperties.PURPOSE_SIGN`.
    Sign,
    /// `KeyProperties.PURPOSE_VERIFY`.
    Verify,
}

/// Message digest a key is authorized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum Digest {
    /// SHA-256.
    Sha256,
}

/// Signature padding an RSA key is authorized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum SignaturePadding {
    /// PKCS#1 v1.5 signature padding.
    Pkcs1,
}

/// When the private key may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum KeyAccessibility {
    /// Usable only while the device is unlocked, never migrated to another device.
    WhenUnlockedThisDeviceOnly,
}

/// Signature algorithm applied by a [`crate::SigningHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum SignatureAlgorithm {
    /// `SHA256withRSA` / `rsaSignatureMessagePKCS1v15SHA256`.
    RsaPkcs1v15Sha256,
    /// `SHA256withECDSA` / `ecdsaSignatureMessageX962SHA256`. DER-encoded output.
    EcdsaX962Sha256,
}

/// Everything the keystore needs to create one key pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct KeyGenSpec {
    /// Alias the key pair is stored under.
    pub alias: String,
    /// The requested key type.
    pub key_type: KeyType,
    /// Algorithm family.
    pub algorithm: KeyAlgorithm,
    /// Key size in bits.
    pub key_size_bits: u32,
    /// Named curve for EC keys (`secp256r1`).
    pub curve: Option<String>,
    /// Operations the key is authorized for.
    pub purposes: Vec<KeyPurpose>,
    /// Digests the key may be used with.
    pub digests: Vec<Digest>,
    /// Signature paddings the key may be used with (RSA only).
    pub signature_paddings: Vec<SignaturePadding>,
    /// Whether every use of the private key requires user authentication.
    pub user_authentication_required: bool,
    /// When the private key may be used.
    pub accessibility: KeyAccessibility,
}

impl KeyType {
    /// Parses an optional key type string, defaulting to [`KeyType::Ec256`].
    ///
    /// # Errors
    /// Returns [`BiometricsError::UnsupportedKeyType`] for anything other than
    /// `rsa2048` or `ec256`.
    pub fn parse(value: Option<&str>) -> Result<Self, BiometricsError> {
        match value {
            None => Ok(Self::default()),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| BiometricsError::UnsupportedKeyType(raw.to_string())),
        }
    }

    /// Algorithm used to sign with keys of this type.
    #[must_use]
    pub const fn signature_algorithm(self) -> SignatureAlgorithm {
        match self {
            Self::Rsa2048 => SignatureAlgorithm::RsaPkcs1v15Sha256,
            Self::Ec256 => SignatureAlgorithm::EcdsaX962Sha256,
        }
    }

    /// Builds the keystore parameters for a new key pair of this type.
    #[must_use]
    pub fn key_gen_spec(self, alias: &str) -> KeyGenSpec {
        match self {
            Self::Rsa2048 => rsa_spec(alias),
            Self::Ec256 => ec_spec(alias),
        }
    }
}

fn rsa_spec(alias: &str) -> KeyGenSpec {
    KeyGenSpec {
        alias: alias.to_string(),
        key_type: KeyType::Rsa2048,
        algorithm: KeyAlgorithm::Rsa,
        key_size_bits: 2048,
        curve: None,
        purposes: vec![KeyPurpose::Sign, KeyPurpose::Verify],
        digests: vec![Digest::Sha256],
        signature_paddings: vec![SignaturePadding::Pkcs1],
        user_authentication_required: true,
        accessibility: KeyAccessibility::WhenUnlockedThisDeviceOnly,
    }
}

fn ec_spec(alias: &str) -> KeyGenSpec {
    KeyGenSpec {
        alias: alias.to_string(),
        key_type: KeyType::Ec256,
        algorithm: KeyAlgorithm::Ec,
        key_size_bits: 256,
        curve: Some("secp256r1".to_string()),
        purposes: vec![KeyPurpose::Sign, KeyPurpose::Verify],
        digests: vec![Digest::Sha256],
        signature_paddings: vec![],
        user_authentication_required: true,
        accessibility: KeyAccessibility::WhenUnlockedThisDeviceOnly,
    }
}
