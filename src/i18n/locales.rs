// SPDX-License-Identifier: MPL-2.0
//! Metadata for the locales shipped with the crate.

use crate::i18n::direction::Direction;

/// Metadata about a supported locale, for building language pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInfo {
    /// Language tag matching the bundle filename (e.g., "en", "ar")
    pub code: &'static str,
    /// English name of the language
    pub name: &'static str,
    /// Native name of the language
    pub native_name: &'static str,
    /// Text direction
    pub direction: Direction,
}

/// Default locale used as fallback.
pub const DEFAULT_LOCALE: &str = "en";

/// All supported locales.
pub const LOCALES: &[LocaleInfo] = &[
    LocaleInfo {
        code: "en",
        name: "English",
        native_name: "English",
        direction: Direction::Ltr,
    },
    LocaleInfo {
        code: "ar",
        name: "Arabic",
        native_name: "العربية",
        direction: Direction::Rtl,
    },
];

/// Get metadata for a locale.
///
/// Returns `None` if the locale is not supported.
pub fn locale_info(locale: &str) -> Option<&'static LocaleInfo> {
    LOCALES.iter().find(|l| l.code == locale)
}

/// Check if a locale uses right-to-left text direction.
///
/// Returns `false` for unsupported locales.
pub fn is_rtl(locale: &str) -> bool {
    locale_info(locale).is_some_and(|info| info.direction == Direction::Rtl)
}

/// Get all supported locales.
pub fn supported_locales() -> &'static [LocaleInfo] {
    LOCALES
}
