// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation bundle loading, string formatting, and
//! text-direction syncing.
//!
//! # Features
//!
//! - Locale detection from a persisted preference or the OS-reported locale
//! - Compile-time embedded `.ftl` translation bundles
//! - Runtime language switching with synchronous change notifications
//! - Fallback to the default locale when translations are missing
//! - Right-to-left document direction derived from the active language

pub mod detect;
pub mod direction;
pub mod fluent;
pub mod locales;
