//! `biokit-core` gates hardware-backed signing keys behind the platform
//! biometric prompt.
//!
//! The platform parts (keystore, prompt, preferences) are foreign traits
//! implemented by the host over `UniFFI`, see [`platform`]. The crate owns
//! the orchestration: alias resolution, key lifecycle, signing and the
//! mapping of platform failures into response envelopes.
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

mod alias;
pub use alias::{KeyAliasResolver, SessionContext, DEFAULT_ALIAS_SUFFIX};

mod biometrics;
pub use biometrics::*;

mod capability;
pub use capability::*;

mod error;
pub use error::*;

mod key_type;
pub use key_type::*;

mod lifecycle;
pub use lifecycle::*;

mod prompt;
pub use prompt::*;

mod signature;
pub use signature::*;

mod types;
pub use types::*;

/// Bridge from the `log` facade to a host-provided logger.
pub mod logger;

/// Platform collaborator traits and their software implementations.
pub mod platform;
pub use platform::{
    BiometricGate, KeyStoreGateway, PlatformProvider, PreferenceStore, SigningHandle,
};

#[cfg(test)]
mod tests_utils;

uniffi::setup_scaffolding!("biokit_core");
