//! Key alias resolution.
//!
//! Every operation agrees on "the key" through [`KeyAliasResolver`]. Sources,
//! highest precedence first:
//!
//! 1. the alias passed with the request
//! 2. the alias configured for this session via `configure_key_alias`
//! 3. the alias persisted by an earlier session
//! 4. `<bundle identifier>.biometricKey`

use std::sync::{Arc, RwLock};

use crate::error::{BiometricsError, BiometricsResult};
use crate::platform::PreferenceStore;

/// Suffix appended to the bundle identifier to derive the default alias.
pub const DEFAULT_ALIAS_SUFFIX: &str = ".biometricKey";

/// Preference key holding the last configured alias.
pub(crate) const PREFS_KEY_ALIAS: &str = "biokit.keyAlias";

/// Preference key holding the debug-mode flag.
pub(crate) const PREFS_DEBUG_MODE: &str = "biokit.debugMode";

const UNKNOWN_BUNDLE_ID: &str = "unknown";

/// Per-process session state: the configured alias and the persisted store.
pub struct SessionContext {
    bundle_id: String,
    configured_alias: RwLock<Option<String>>,
    preferences: Arc<dyn PreferenceStore>,
}

impl SessionContext {
    /// Creates a session for the app identified by `bundle_id`.
    #[must_use]
    pub fn new(bundle_id: impl Into<String>, preferences: Arc<dyn PreferenceStore>) -> Self {
        Self {
            bundle_id: bundle_id.into(),
            configured_alias: RwLock::new(None),
            preferences,
        }
    }

    /// Sets the alias used when a request does not name one, and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`BiometricsError::InvalidInput`] for an empty alias, or
    /// [`BiometricsError::Preferences`] if persisting fails.
    pub fn configure_key_alias(&self, alias: &str) -> BiometricsResult<()> {
        if alias.is_empty() {
            return Err(BiometricsError::invalid_input(
                "key_alias",
                "must not be empty",
            ));
        }

        {
            let mut configured = self
                .configured_alias
                .write()
                .map_err(|_| BiometricsError::Preferences("lock poisoned".to_string()))?;
            *configured = Some(alias.to_string());
        }
        self.preferences
            .set_string(PREFS_KEY_ALIAS.to_string(), alias.to_string())?;
        log::debug!("configured key alias {alias}");
        Ok(())
    }

    /// The persisted preference store.
    #[must_use]
    pub fn preferences(&self) -> &Arc<dyn PreferenceStore> {
        &self.preferences
    }

    fn configured_alias(&self) -> Option<String> {
        self.configured_alias
            .read()
            .ok()
            .and_then(|configured| configured.clone())
    }

    fn persisted_alias(&self) -> Option<String> {
        match self.preferences.get_string(PREFS_KEY_ALIAS.to_string()) {
            Ok(alias) => alias,
            Err(err) => {
                log::warn!("failed to read persisted key alias, using default: {err}");
                None
            }
        }
    }

    fn derived_alias(&self) -> String {
        let bundle_id = self.bundle_id.trim();
        let bundle_id = if bundle_id.is_empty() {
            UNKNOWN_BUNDLE_ID
        } else {
            bundle_id
        };
        format!("{bundle_id}{DEFAULT_ALIAS_SUFFIX}")
    }
}

/// Resolves the effective key alias for a request. Never fails.
#[derive(Clone)]
pub struct KeyAliasResolver {
    session: Arc<SessionContext>,
}

impl KeyAliasResolver {
    /// Creates a resolver over `session`.
    #[must_use]
    pub const fn new(session: Arc<SessionContext>) -> Self {
        Self { session }
    }

    /// Returns the alias to use for a request carrying `explicit`.
    ///
    /// Aliases are opaque: a non-empty alias is returned byte for byte. Only
    /// the empty string is treated as absent, at every level.
    #[must_use]
    pub fn resolve(&self, explicit: Option<&str>) -> String {
        explicit
            .filter(|alias| !alias.is_empty())
            .map(ToString::to_string)
            .or_else(|| non_empty(self.session.configured_alias()))
            .or_else(|| non_empty(self.session.persisted_alias()))
            .unwrap_or_else(|| self.session.derived_alias())
    }
}

fn non_empty(alias: Option<String>) -> Option<String> {
    alias.filter(|alias| !alias.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryPreferenceStore;

    fn resolver_with(
        bundle_id: &str,
        preferences: Arc<dyn PreferenceStore>,
    ) -> (Arc<SessionContext>, KeyAliasResolver) {
        let session = Arc::new(SessionContext::new(bundle_id, preferences));
        (session.clone(), KeyAliasResolver::new(session))
    }

    #[test]
    fn test_derived_default() {
        let (_, resolver) =
            resolver_with("com.example.app", Arc::new(MemoryPreferenceStore::new()));
        assert_eq!(resolver.resolve(None), "com.example.app.biometricKey");
        assert_eq!(resolver.resolve(Some("")), "com.example.app.biometricKey");
    }

    #[test]
    fn test_missing_bundle_id() {
        let (_, resolver) = resolver_with(" ", Arc::new(MemoryPreferenceStore::new()));
        assert_eq!(resolver.resolve(None), "unknown.biometricKey");
    }

    #[test]
    fn test_explicit_wins_over_everything() {
        let preferences = Arc::new(MemoryPreferenceStore::new());
        preferences
            .set_string(PREFS_KEY_ALIAS.to_string(), "persisted".to_string())
            .unwrap();
        let (session, resolver) = resolver_with("com.example.app", preferences);
        session.configure_key_alias("configured").unwrap();

        assert_eq!(resolver.resolve(Some("explicit")), "explicit");
        assert_eq!(resolver.resolve(None), "configured");
    }

    #[test]
    fn test_persisted_alias_survives_new_session() {
        let preferences: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::new());
        let (first, _) = resolver_with("com.example.app", preferences.clone());
        first.configure_key_alias("bar").unwrap();

        let (_, restarted) = resolver_with("com.example.app", preferences);
        assert_eq!(restarted.resolve(None), "bar");
    }

    #[test]
    fn test_configure_rejects_empty_alias() {
        let (session, resolver) =
            resolver_with("com.example.app", Arc::new(MemoryPreferenceStore::new()));
        match session.configure_key_alias("") {
            Err(BiometricsError::InvalidInput { attribute, .. }) => {
                assert_eq!(attribute, "key_alias");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(resolver.resolve(None), "com.example.app.biometricKey");
    }

    #[test]
    fn test_explicit_alias_is_returned_verbatim() {
        let (_, resolver) =
            resolver_with("com.example.app", Arc::new(MemoryPreferenceStore::new()));
        assert_eq!(resolver.resolve(Some(" padded ")), " padded ");
        assert_eq!(resolver.resolve(Some("  ")), "  ");
        assert_eq!(resolver.resolve(Some("Mixed.Case")), "Mixed.Case");
    }

    #[test]
    fn test_configured_alias_is_stored_verbatim() {
        let preferences: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::new());
        let (session, resolver) = resolver_with("com.example.app", preferences.clone());
        session.configure_key_alias(" padded ").unwrap();
        assert_eq!(resolver.resolve(None), " padded ");

        let (_, restarted) = resolver_with("com.example.app", preferences);
        assert_eq!(restarted.resolve(None), " padded ");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (session, resolver) =
            resolver_with("com.example.app", Arc::new(MemoryPreferenceStore::new()));
        session.configure_key_alias("foo").unwrap();
        let first = resolver.resolve(None);
        let second = resolver.resolve(None);
        assert_eq!(first, second);
        assert_eq!(first, "foo");
    }
}
