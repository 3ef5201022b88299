// SPDX-License-Identifier: MPL-2.0
//! Locale detection sources and resolution order.
//!
//! Detection walks an ordered list of sources and picks the first tag that
//! parses and matches an available bundle. The host environment sits behind
//! two traits: [`PreferenceStore`] for the persisted user choice and
//! [`SystemLocaleSource`] for the locale reported by the OS.

use crate::error::Result;
use std::cell::RefCell;
use std::rc::Rc;
use unic_langid::LanguageIdentifier;

/// A place the active language can be detected from (and, for [`Storage`],
/// written back to).
///
/// [`Storage`]: DetectionSource::Storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    /// The persisted user preference.
    Storage,
    /// The locale reported by the host operating system.
    System,
}

/// Ordering policy for locale detection.
#[derive(Debug, Clone)]
pub struct DetectionOptions {
    /// Sources consulted, in order, to pick the initial language.
    pub order: Vec<DetectionSource>,
    /// Sources the resolved tag is written back to. Only
    /// [`DetectionSource::Storage`] is writable; anything else is ignored.
    pub caches: Vec<DetectionSource>,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            order: vec![DetectionSource::Storage, DetectionSource::System],
            caches: vec![DetectionSource::Storage],
        }
    }
}

/// Persisted language preference seam.
///
/// An unavailable store reports `None` from [`load_language`] so detection
/// can move on to the next source.
///
/// [`load_language`]: PreferenceStore::load_language
pub trait PreferenceStore {
    fn load_language(&self) -> Option<String>;
    fn store_language(&mut self, tag: &str) -> Result<()>;
}

/// Shared handles forward to the inner store, so a test or host can keep a
/// reference for inspection while the engine owns its half.
impl<S: PreferenceStore> PreferenceStore for Rc<RefCell<S>> {
    fn load_language(&self) -> Option<String> {
        self.borrow().load_language()
    }

    fn store_language(&mut self, tag: &str) -> Result<()> {
        self.borrow_mut().store_language(tag)
    }
}

/// OS/browser locale seam.
pub trait SystemLocaleSource {
    fn current(&self) -> Option<String>;
}

/// [`SystemLocaleSource`] reading the operating system locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsLocaleSource;

impl SystemLocaleSource for OsLocaleSource {
    fn current(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// In-memory [`PreferenceStore`] for hosts without a filesystem and for tests.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    language: Option<String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(tag: &str) -> Self {
        Self {
            language: Some(tag.to_string()),
        }
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_language(&self) -> Option<String> {
        self.language.clone()
    }

    fn store_language(&mut self, tag: &str) -> Result<()> {
        self.language = Some(tag.to_string());
        Ok(())
    }
}

/// Walks `order` and returns the first source tag that parses and matches an
/// available bundle. Returns `None` when no source yields a usable tag.
pub fn resolve_locale(
    order: &[DetectionSource],
    store: &dyn PreferenceStore,
    system: &dyn SystemLocaleSource,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    for source in order {
        let candidate = match source {
            DetectionSource::Storage => store.load_language(),
            DetectionSource::System => system.current(),
        };
        if let Some(tag) = candidate {
            if let Ok(locale) = tag.parse::<LanguageIdentifier>() {
                if available.contains(&locale) {
                    return Some(locale);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLocale(Option<&'static str>);

    impl SystemLocaleSource for FixedLocale {
        fn current(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en".parse().unwrap(), "ar".parse().unwrap()]
    }

    #[test]
    fn stored_preference_wins_over_system() {
        let store = MemoryPreferenceStore::with_language("en");
        let resolved = resolve_locale(
            &DetectionOptions::default().order,
            &store,
            &FixedLocale(Some("ar")),
            &available(),
        );
        assert_eq!(resolved, Some("en".parse().unwrap()));
    }

    #[test]
    fn empty_store_falls_through_to_system() {
        let store = MemoryPreferenceStore::new();
        let resolved = resolve_locale(
            &DetectionOptions::default().order,
            &store,
            &FixedLocale(Some("ar")),
            &available(),
        );
        assert_eq!(resolved, Some("ar".parse().unwrap()));
    }

    #[test]
    fn unavailable_stored_tag_falls_through_to_system() {
        let store = MemoryPreferenceStore::with_language("fr");
        let resolved = resolve_locale(
            &DetectionOptions::default().order,
            &store,
            &FixedLocale(Some("ar")),
            &available(),
        );
        assert_eq!(resolved, Some("ar".parse().unwrap()));
    }

    #[test]
    fn unparseable_stored_tag_falls_through_to_system() {
        let store = MemoryPreferenceStore::with_language("not a language tag");
        let resolved = resolve_locale(
            &DetectionOptions::default().order,
            &store,
            &FixedLocale(Some("en")),
            &available(),
        );
        assert_eq!(resolved, Some("en".parse().unwrap()));
    }

    #[test]
    fn no_usable_source_resolves_to_none() {
        let store = MemoryPreferenceStore::new();
        let resolved = resolve_locale(
            &DetectionOptions::default().order,
            &store,
            &FixedLocale(None),
            &available(),
        );
        assert_eq!(resolved, None);
    }

    #[test]
    fn order_is_respected_when_reversed() {
        let store = MemoryPreferenceStore::with_language("en");
        let resolved = resolve_locale(
            &[DetectionSource::System, DetectionSource::Storage],
            &store,
            &FixedLocale(Some("ar")),
            &available(),
        );
        assert_eq!(resolved, Some("ar".parse().unwrap()));
    }

    #[test]
    fn shared_store_handle_forwards_to_inner_store() {
        let store = Rc::new(RefCell::new(MemoryPreferenceStore::new()));
        let mut handle = Rc::clone(&store);
        handle.store_language("ar").expect("failed to store");
        assert_eq!(store.borrow().language(), Some("ar"));
        assert_eq!(handle.load_language().as_deref(), Some("ar"));
    }
}
