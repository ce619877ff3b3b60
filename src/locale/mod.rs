//
//  bagisto-storefront
//  locale/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Locale Store
//!
//! Holds the shopper's currently selected locale. The locale middleware
//! reads the store fresh on every request, so switching the locale takes
//! effect on the very next API call without rebuilding the client.
//!
//! ## Example
//!
//! ```rust
//! use bagisto_storefront::locale::LocaleStore;
//!
//! let store = LocaleStore::new("en");
//! assert_eq!(store.current(), "en");
//!
//! store.set("ru");
//! assert_eq!(store.current(), "ru");
//! ```

use std::sync::RwLock;

/// The locale used when no explicit selection has been made.
pub const DEFAULT_LOCALE: &str = "en";

/// Shared cell holding the currently selected storefront locale.
///
/// The store is cheap to share behind an `Arc`; reads never block writes
/// for long since both only touch a short string.
#[derive(Debug)]
pub struct LocaleStore {
    current: RwLock<String>,
    fallback: String,
}

impl LocaleStore {
    /// Creates a store whose current locale starts at the fallback.
    pub fn new(fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        Self {
            current: RwLock::new(fallback.clone()),
            fallback,
        }
    }

    /// The currently selected locale.
    ///
    /// Falls back to the configured default if the lock was poisoned by a
    /// panicking writer.
    pub fn current(&self) -> String {
        self.current
            .read()
            .map(|locale| locale.clone())
            .unwrap_or_else(|_| self.fallback.clone())
    }

    /// Selects a new locale.
    pub fn set(&self, locale: impl Into<String>) {
        if let Ok(mut current) = self.current.write() {
            *current = locale.into();
        }
    }

    /// The fallback locale this store was created with.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl Default for LocaleStore {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_fallback() {
        let store = LocaleStore::new("ru");
        assert_eq!(store.current(), "ru");
        assert_eq!(store.fallback(), "ru");
    }

    #[test]
    fn test_switching_locale() {
        let store = LocaleStore::default();
        assert_eq!(store.current(), DEFAULT_LOCALE);
        store.set("kz");
        assert_eq!(store.current(), "kz");
    }
}
