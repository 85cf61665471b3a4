use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SessionError, SessionResult};
use crate::profile::{Profile, Role};

/// API URL of the public reference deployment.
pub const DEFAULT_API_URL: &str = "https://girder.local.wholetale.org/api/v1";

/// Configuration for one review session.
///
/// Constructed per session and passed explicitly to whatever issues platform
/// calls. Tokens are stored in the session file as written; only log and
/// `Debug` output redacts them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Base URL of the platform API.
    pub api_url: String,
    /// Review participants, one per login.
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            profiles: vec![
                Profile::new("editor", Role::Editor),
                Profile::new("author", Role::Author),
                Profile::new("verifier", Role::Verifier),
            ],
        }
    }
}

impl SessionConfig {
    /// Create a configuration with the given API URL and no profiles.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            profiles: Vec::new(),
        }
    }

    /// Look up a profile by login.
    pub fn profile(&self, login: &str) -> SessionResult<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.login == login)
            .ok_or_else(|| SessionError::UnknownProfile(login.to_string()))
    }

    /// Look up the first profile with the given role.
    pub fn profile_for_role(&self, role: Role) -> SessionResult<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.role == role)
            .ok_or_else(|| SessionError::UnknownProfile(role.to_string()))
    }

    /// Check that the API URL is http(s) and logins are unique.
    pub fn validate(&self) -> SessionResult<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(SessionError::InvalidApiUrl(self.api_url.clone()));
        }
        let mut seen = BTreeSet::new();
        for profile in &self.profiles {
            if !seen.insert(profile.login.as_str()) {
                return Err(SessionError::DuplicateLogin(profile.login.clone()));
            }
        }
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> SessionResult<String> {
        toml::to_string_pretty(self).map_err(|e| SessionError::Parse(e.to_string()))
    }

    /// Parse from TOML.
    pub fn from_toml(text: &str) -> SessionResult<Self> {
        toml::from_str(text).map_err(|e| SessionError::Parse(e.to_string()))
    }

    /// Write the session file.
    pub fn save(&self, path: &Path) -> SessionResult<()> {
        let text = self.to_toml()?;
        fs::write(path, text).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), profiles = self.profiles.len(), "session saved");
        Ok(())
    }

    /// Load and validate a session file.
    pub fn load(path: &Path) -> SessionResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        config.validate()?;
        debug!(path = %path.display(), profiles = config.profiles.len(), "session loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_one_profile_per_role() {
        let config = SessionConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.profiles.len(), 3);
        for role in [Role::Editor, Role::Author, Role::Verifier] {
            assert_eq!(config.profile_for_role(role).unwrap().role, role);
        }
        config.validate().unwrap();
    }

    #[test]
    fn profile_lookup_by_login() {
        let config = SessionConfig::default();
        assert_eq!(config.profile("author").unwrap().role, Role::Author);
        assert!(matches!(
            config.profile("ghost"),
            Err(SessionError::UnknownProfile(login)) if login == "ghost"
        ));
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let config = SessionConfig::new("ftp://example.org");
        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidApiUrl(_))
        ));
        assert!(matches!(
            SessionConfig::new("").validate(),
            Err(SessionError::InvalidApiUrl(_))
        ));
    }

    #[test]
    fn validate_rejects_duplicate_logins() {
        let mut config = SessionConfig::new("https://example.org/api/v1");
        config.profiles.push(Profile::new("reviewer", Role::Author));
        config.profiles.push(Profile::new("reviewer", Role::Verifier));
        assert!(matches!(
            config.validate(),
            Err(SessionError::DuplicateLogin(login)) if login == "reviewer"
        ));
    }

    #[test]
    fn toml_roundtrip_preserves_tokens() {
        let mut config = SessionConfig::default();
        config.profiles[1] = Profile::new("author", Role::Author).with_token("tok-123");

        let text = config.to_toml().unwrap();
        // The file carries the raw token; only logs redact it.
        assert!(text.contains("tok-123"));

        let parsed = SessionConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.profile("author").unwrap().token.as_ref().unwrap().expose(), "tok-123");
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let config = SessionConfig::default();
        config.save(&path).unwrap();

        let loaded = SessionConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        fs::write(&path, "api_url = [not toml").unwrap();

        let err = SessionConfig::load(&path).unwrap_err();
        assert!(matches!(err, SessionError::Parse(_)));
    }

    #[test]
    fn load_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        fs::write(&path, "api_url = \"not-a-url\"\n").unwrap();

        let err = SessionConfig::load(&path).unwrap_err();
        assert!(matches!(err, SessionError::InvalidApiUrl(_)));
    }
}
