// SPDX-License-Identifier: MPL-2.0
//! `locale_lens` wires static Fluent translation bundles into a runtime
//! translation engine, selects the active language from a persisted user
//! preference or the operating system locale, and keeps a host document's
//! text direction in sync with the active language.
//!
//! The rendering host is reached only through narrow trait seams: a
//! [`PreferenceStore`](i18n::detect::PreferenceStore) for the persisted
//! language choice, a [`SystemLocaleSource`](i18n::detect::SystemLocaleSource)
//! for the OS-reported locale, and a
//! [`DocumentRoot`](i18n::direction::DocumentRoot) carrying the direction
//! attribute.

#![doc(html_root_url = "https://docs.rs/locale_lens/0.1.0")]

pub mod config;
pub mod error;
pub mod i18n;
