#![allow(dead_code)]

//! Test helpers for the orchestration services.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::capability::{AuthenticatorStrength, AvailabilityStatus, ModalitySupport};
use crate::error::BiometricsResult;
use crate::platform::{BiometricGate, SigningHandle};
use crate::prompt::{BiometricErrorCode, GateReport, PlatformKind, PromptConfig};

/// Biometric gate answering from a script instead of a sensor.
pub struct ScriptedGate {
    platform: PlatformKind,
    host_surface: bool,
    warning: Option<String>,
    statuses: HashMap<AuthenticatorStrength, AvailabilityStatus>,
    modalities: ModalitySupport,
    report: GateReport,
    prompts: AtomicUsize,
    last_prompt: Mutex<Option<(PromptConfig, bool)>>,
}

impl ScriptedGate {
    pub fn new() -> Self {
        Self {
            platform: PlatformKind::Software,
            host_surface: true,
            warning: None,
            statuses: HashMap::new(),
            modalities: ModalitySupport {
                fingerprint: true,
                facial_recognition: false,
                iris: false,
            },
            report: GateReport::Authenticated,
            prompts: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub const fn with_platform(mut self, platform: PlatformKind) -> Self {
        self.platform = platform;
        self
    }

    pub const fn without_host_surface(mut self) -> Self {
        self.host_surface = false;
        self
    }

    pub fn with_warning(mut self, warning: &str) -> Self {
        self.warning = Some(warning.to_string());
        self
    }

    pub fn with_status(
        mut self,
        strength: AuthenticatorStrength,
        status: AvailabilityStatus,
    ) -> Self {
        self.statuses.insert(strength, status);
        self
    }

    pub const fn with_modalities(mut self, modalities: ModalitySupport) -> Self {
        self.modalities = modalities;
        self
    }

    pub fn failing_with(mut self, code: BiometricErrorCode, message: &str) -> Self {
        self.report = GateReport::Failed {
            code,
            message: message.to_string(),
        };
        self
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    /// The last prompt shown and whether a signing handle was bound to it.
    pub fn last_prompt(&self) -> Option<(PromptConfig, bool)> {
        self.last_prompt.lock().expect("lock").clone()
    }
}

impl Default for ScriptedGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl BiometricGate for ScriptedGate {
    fn platform(&self) -> PlatformKind {
        self.platform
    }

    fn has_host_surface(&self) -> bool {
        self.host_surface
    }

    fn configuration_warning(&self) -> Option<String> {
        self.warning.clone()
    }

    fn can_authenticate(&self, strength: AuthenticatorStrength) -> AvailabilityStatus {
        self.statuses
            .get(&strength)
            .copied()
            .unwrap_or(AvailabilityStatus::Available)
    }

    fn supported_modalities(&self) -> ModalitySupport {
        self.modalities
    }

    async fn authenticate(
        &self,
        prompt: PromptConfig,
        crypto: Option<Arc<dyn SigningHandle>>,
    ) -> BiometricsResult<GateReport> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().expect("lock") = Some((prompt, crypto.is_some()));
        Ok(self.report.clone())
    }
}
