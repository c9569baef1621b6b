//! Biometric-gated, hardware-backed key management and signing.
//!
//! This crate is the distributable entry point. All functionality lives in
//! [`biokit_core`]; this crate only re-exports it together with its `UniFFI`
//! scaffolding so a single native library is produced per target.

pub use biokit_core::*;

biokit_core::uniffi_reexport_scaffolding!();
