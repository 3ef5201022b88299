// SPDX-License-Identifier: MPL-2.0
//! Fluent-backed translation engine.
//!
//! [`I18n`] owns one [`FluentBundle`] per embedded locale, the active
//! language, and the registered change listeners. Construction resolves the
//! initial language through the configured detection order; afterwards the
//! language only changes through [`I18n::set_locale`], which notifies
//! listeners synchronously in registration order.

use crate::config::ConfigPreferenceStore;
use crate::error::{Error, Result};
use crate::i18n::detect::{
    resolve_locale, DetectionOptions, DetectionSource, OsLocaleSource, PreferenceStore,
    SystemLocaleSource,
};
use crate::i18n::direction::{direction_for_tag, Direction, DocumentRoot};
use crate::i18n::locales::DEFAULT_LOCALE;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct I18nOptions {
    /// Language used when the detected or requested tag has no bundle.
    pub fallback_locale: LanguageIdentifier,
    /// When `true`, interpolated values are wrapped in Unicode
    /// directional-isolate marks. Off by default: the presentation layer
    /// owns bidi treatment of interpolated values.
    pub use_isolating: bool,
    /// Detection order and write-back policy.
    pub detection: DetectionOptions,
}

impl Default for I18nOptions {
    fn default() -> Self {
        Self {
            fallback_locale: DEFAULT_LOCALE
                .parse()
                .expect("valid fallback language identifier"),
            use_isolating: false,
            detection: DetectionOptions::default(),
        }
    }
}

/// Identifies a registered locale-change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(&LanguageIdentifier)>;

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
    fallback_locale: LanguageIdentifier,
    caches: Vec<DetectionSource>,
    store: Box<dyn PreferenceStore>,
    listeners: Vec<(Subscription, Listener)>,
    next_subscription: u64,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(
            I18nOptions::default(),
            Box::new(ConfigPreferenceStore::new()),
            Box::new(OsLocaleSource),
        )
    }
}

impl I18n {
    /// Builds the engine from the embedded translation bundles.
    pub fn new(
        options: I18nOptions,
        store: Box<dyn PreferenceStore>,
        system: Box<dyn SystemLocaleSource>,
    ) -> Self {
        let mut resources = Vec::new();
        for file in Asset::iter() {
            let filename = file.as_ref();
            if let Some(locale_str) = filename.strip_suffix(".ftl") {
                if let Ok(locale) = locale_str.parse::<LanguageIdentifier>() {
                    if let Some(content) = Asset::get(filename) {
                        let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
                        resources.push((locale, source));
                    }
                }
            }
        }
        Self::from_resources(resources, options, store, system)
            .expect("embedded translation bundles are valid FTL")
    }

    /// Builds the engine from explicit `(locale, FTL source)` pairs.
    ///
    /// This is the testing entry point; [`I18n::new`] routes the embedded
    /// assets through it.
    pub fn from_resources(
        resources: Vec<(LanguageIdentifier, String)>,
        options: I18nOptions,
        store: Box<dyn PreferenceStore>,
        system: Box<dyn SystemLocaleSource>,
    ) -> Result<Self> {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for (locale, source) in resources {
            let res = FluentResource::try_new(source).map_err(|(_, errors)| {
                Error::Resource(format!("invalid FTL for {}: {:?}", locale, errors))
            })?;
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            bundle.set_use_isolating(options.use_isolating);
            bundle.add_resource(res).map_err(|errors| {
                Error::Resource(format!("conflicting messages for {}: {:?}", locale, errors))
            })?;
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
        }

        let detected = resolve_locale(
            &options.detection.order,
            store.as_ref(),
            system.as_ref(),
            &available_locales,
        );
        let resolved_via_detection = detected.is_some();
        let current_locale = detected.unwrap_or_else(|| options.fallback_locale.clone());

        let mut i18n = Self {
            bundles,
            available_locales,
            current_locale,
            fallback_locale: options.fallback_locale,
            caches: options.detection.caches,
            store,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        // Detection does not emit a change notification, so stickiness for a
        // system-detected choice is written here.
        if resolved_via_detection {
            i18n.write_caches();
        }
        Ok(i18n)
    }

    /// The active language.
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    /// Direction of the active language.
    pub fn direction(&self) -> Direction {
        direction_for_tag(&self.current_locale.to_string())
    }

    /// Switches the active language.
    ///
    /// A tag without a bundle is a silent no-op. On an actual switch the tag
    /// is written to the configured caches and every registered listener is
    /// invoked synchronously, in registration order.
    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if !self.bundles.contains_key(&locale) {
            return;
        }
        self.current_locale = locale;
        self.write_caches();
        self.notify_locale_changed();
    }

    /// Registers a listener invoked on every language switch.
    pub fn on_locale_change<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&LanguageIdentifier) + 'static,
    {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((subscription, Box::new(listener)));
        subscription
    }

    /// Removes a listener registered with [`I18n::on_locale_change`].
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.listeners.retain(|(id, _)| *id != subscription);
    }

    /// Keeps `document`'s direction attribute in sync with the active
    /// language.
    ///
    /// Registers a change listener, then applies the direction for the
    /// already-detected language once: initialization itself emits no change
    /// notification, so the initial state is written explicitly. The returned
    /// subscription detaches the document again.
    pub fn attach_direction_sync<D>(&mut self, document: Rc<RefCell<D>>) -> Subscription
    where
        D: DocumentRoot + 'static,
    {
        let handle = Rc::clone(&document);
        let subscription = self.on_locale_change(move |locale| {
            handle
                .borrow_mut()
                .set_direction(direction_for_tag(&locale.to_string()));
        });
        document.borrow_mut().set_direction(self.direction());
        subscription
    }

    /// Looks up `key` in the active bundle, falling back to the fallback
    /// bundle per key.
    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Like [`I18n::tr`], with interpolation arguments.
    pub fn tr_with_args(&self, key: &str, args: &FluentArgs<'_>) -> String {
        self.format(key, Some(args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        let mut chain = vec![&self.current_locale];
        if self.fallback_locale != self.current_locale {
            chain.push(&self.fallback_locale);
        }
        for locale in chain {
            if let Some(bundle) = self.bundles.get(locale) {
                if let Some(msg) = bundle.get_message(key) {
                    if let Some(pattern) = msg.value() {
                        let mut errors = vec![];
                        let value = bundle.format_pattern(pattern, args, &mut errors);
                        if errors.is_empty() {
                            return value.to_string();
                        }
                    }
                }
            }
        }
        format!("MISSING: {}", key)
    }

    fn write_caches(&mut self) {
        let tag = self.current_locale.to_string();
        for cache in &self.caches {
            match cache {
                DetectionSource::Storage => {
                    if let Err(error) = self.store.store_language(&tag) {
                        eprintln!("Failed to save language preference: {:?}", error);
                    }
                }
                // The system locale is read-only.
                DetectionSource::System => {}
            }
        }
    }

    fn notify_locale_changed(&mut self) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in &mut listeners {
            listener(&self.current_locale);
        }
        self.listeners = listeners;
    }
}
