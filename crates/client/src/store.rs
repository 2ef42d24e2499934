// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token persistence: the [`TokenStore`] seam plus in-memory and JSON file backends.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Default storage key; the file backend stores `<state_dir>/<key>.json`.
pub const DEFAULT_STORAGE_KEY: &str = "auth";

/// Opaque bearer credentials issued by the platform.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

// Tokens never reach logs.
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Where the client keeps its token pair.
///
/// Implementations must be cheap and non-blocking enough to call while the
/// client holds its refresh lock.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Result<Option<TokenPair>, ClientError>;
    fn save(&self, tokens: &TokenPair) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// Process-local store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self { tokens: Mutex::new(Some(tokens)) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<TokenPair>, ClientError> {
        Ok(self.tokens.lock().clone())
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), ClientError> {
        *self.tokens.lock() = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.tokens.lock() = None;
        Ok(())
    }
}

/// JSON file store: one `{ "accessToken", "refreshToken" }` record per key.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store under `<dir>/<key>.json`.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self { path: dir.as_ref().join(format!("{key}.json")) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<TokenPair>, ClientError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClientError::Storage(format!("{}: {e}", self.path.display()))),
        };
        let tokens: TokenPair = serde_json::from_str(&contents)
            .map_err(|e| ClientError::Storage(format!("{}: {e}", self.path.display())))?;
        Ok(Some(tokens))
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), ClientError> {
        write_atomic(&self.path, tokens)
            .map_err(|e| ClientError::Storage(format!("{}: {e}", self.path.display())))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(format!("{}: {e}", self.path.display()))),
        }
    }
}

/// Replace the token file in one rename; readers see the old pair or the new
/// one, never a partial record.
///
/// Each save stages into its own `<key>.json.<pid>.<seq>.tmp` sibling.
fn write_atomic(path: &Path, tokens: &TokenPair) -> std::io::Result<()> {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let json = serde_json::to_string_pretty(tokens)?;
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(
        "{}.{}.{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id(),
        seq,
    );
    let tmp_path = path.with_file_name(tmp_name);
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Resolve the state directory for persisted tokens.
///
/// Checks `DEVQUIZ_STATE_DIR`, then `$XDG_STATE_HOME/devquiz`,
/// then `$HOME/.local/state/devquiz`.
pub fn state_dir() -> PathBuf {
    state_dir_with(|name| std::env::var(name).ok())
}

fn state_dir_with(get_env: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = get_env("DEVQUIZ_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = get_env("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("devquiz");
    }
    if let Some(home) = get_env("HOME") {
        return PathBuf::from(home).join(".local/state/devquiz");
    }
    PathBuf::from(".devquiz")
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
