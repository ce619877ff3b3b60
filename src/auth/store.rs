//
//  bagisto-storefront
//  auth/store.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Store
//!
//! File-backed storage for the customer's bearer token, kept under the
//! platform configuration directory:
//!
//! - Linux: `~/.config/bagisto-storefront/auth_token`
//! - macOS: `~/Library/Application Support/bagisto-storefront/auth_token`
//! - Windows: `%APPDATA%\bagisto-storefront\auth_token`
//!
//! The store is a plain string under a fixed key. Reads are infallible
//! (`None` when absent or unreadable) so the auth middleware can consult
//! it on every request without an error path.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Fixed key (file name) the token is stored under.
pub const TOKEN_KEY: &str = "auth_token";

/// Validates the format of a token string.
///
/// Performs basic validation only: the token must be non-empty and must
/// not contain whitespace. Whether the token is actually accepted by the
/// backend is not checked here.
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::auth::validate_token;
///
/// assert!(validate_token("k3y"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// Persistent storage for the customer's bearer token.
///
/// Cloneable handle; clones share the same underlying file. The auth
/// middleware holds one clone for reads, the auth service another for
/// writes after login and logout.
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::auth::TokenStore;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = TokenStore::with_path(dir.path().join("auth_token"));
///
/// assert_eq!(store.get(), None);
/// store.set("t0ken").unwrap();
/// assert_eq!(store.get().as_deref(), Some("t0ken"));
/// store.clear().unwrap();
/// assert!(!store.is_authenticated());
/// ```
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store at the platform configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error when no home directory can be determined for the
    /// current user.
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "iamngoni", "bagisto-storefront")
            .context("could not determine a configuration directory")?;
        Ok(Self {
            path: dirs.config_dir().join(TOKEN_KEY),
        })
    }

    /// Creates a store backed by an explicit file path.
    ///
    /// Useful for tests and for applications that manage their own
    /// storage layout.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The stored token, if any.
    ///
    /// Returns `None` when no token has been stored, the file is
    /// unreadable, or the stored value is empty.
    pub fn get(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Persists a token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration directory cannot be
    /// created or the file cannot be written.
    pub fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        fs::write(&self.path, token)
            .with_context(|| format!("could not write {}", self.path.display()))
    }

    /// Removes the stored token, if present.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("could not remove {}", self.path.display()))
            }
        }
    }

    /// Whether a token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, TokenStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::with_path(dir.path().join(TOKEN_KEY));
        (dir, store)
    }

    #[test]
    fn test_round_trip() {
        let (_dir, store) = store();
        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());

        store.set("abc123").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc123"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (_dir, store) = store();
        store.clear().unwrap();
        store.set("abc").unwrap();
        store.clear().unwrap();
        assert_eq!(store.get(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_empty_token_reads_as_none() {
        let (_dir, store) = store();
        store.set("  \n").unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_validate_token() {
        assert!(validate_token("abcdef"));
        assert!(!validate_token(""));
        assert!(!validate_token("with space"));
        assert!(!validate_token("with\nnewline"));
    }
}
