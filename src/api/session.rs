//! Persisted session credentials.
//!
//! The web frontend stored the signed-in user as a `userData` JSON document
//! with a `token` field. The same document can be saved to disk and handed to
//! the CLI; it is read once at start-up and the token is injected into
//! [`super::ApiConfig`].

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::debug;

#[derive(Deserialize)]
struct StoredSession {
    #[serde(default)]
    token: Option<String>,
}

/// Trim a raw token; blank tokens mean "unauthenticated".
#[must_use]
pub fn normalize_token(raw: &str) -> Option<SecretString> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(SecretString::from(trimmed.to_string()))
    }
}

/// Read the bearer token from a saved session document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object.
pub fn token_from_file(path: &Path) -> Result<Option<SecretString>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file: {}", path.display()))?;

    let session: StoredSession = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid session file: {}", path.display()))?;

    let token = session.token.as_deref().and_then(normalize_token);

    if token.is_none() {
        debug!("session file {} has no token", path.display());
    }

    Ok(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::path::PathBuf;

    struct FileGuard(PathBuf);

    impl Drop for FileGuard {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    fn write_session(contents: &str) -> FileGuard {
        let path = std::env::temp_dir().join(format!("stayease-session-{}.json", ulid::Ulid::new()));
        fs::write(&path, contents).unwrap();
        FileGuard(path)
    }

    #[test]
    fn reads_token() {
        let file = write_session(r#"{"token":" abc.def ","role":"admin","username":"amy"}"#);
        let token = token_from_file(&file.0).unwrap().unwrap();
        assert_eq!(token.expose_secret(), "abc.def");
    }

    #[test]
    fn missing_or_blank_token_is_unauthenticated() {
        let file = write_session(r#"{"role":"admin"}"#);
        assert!(token_from_file(&file.0).unwrap().is_none());

        let file = write_session(r#"{"token":""}"#);
        assert!(token_from_file(&file.0).unwrap().is_none());

        let file = write_session(r#"{"token":null}"#);
        assert!(token_from_file(&file.0).unwrap().is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let file = write_session("not json");
        let err = token_from_file(&file.0).unwrap_err();
        assert!(err.to_string().contains("Invalid session file"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("stayease-missing-{}.json", ulid::Ulid::new()));
        let err = token_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read session file"));
    }

    #[test]
    fn normalize_token_trims() {
        assert!(normalize_token("  ").is_none());
        assert_eq!(normalize_token(" t ").unwrap().expose_secret(), "t");
    }
}
