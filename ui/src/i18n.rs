//! Internationalization (i18n) support for `leafscan-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (language selection + asset loading)
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/leafscan-ui.ftl   (fallback/reference)
//!   vi-VN/leafscan-ui.ftl
//! ```
//!
//! Static lookups go through [`t!`](crate::t) against the shared [`LOADER`],
//! which follows the active language. Keys only known at runtime (disease
//! names, numbered quick questions) and lookups for an explicit language go
//! through [`translate`], which resolves active language, then English, then
//! the raw key.
//!
//! The chosen language is persisted under the `language` preference and
//! restored by [`init`].
use std::{collections::HashMap, sync::Once, sync::RwLock};

use fluent::FluentValue;
use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

use crate::core::storage::{self, LANGUAGE_KEY};

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Ergonomic translation macro.
/// Examples:
///     t!("nav-home")
///     t!("diagnosis-confidence", value = "94.23")
///
/// This expands to `fl!(&*LOADER, ...)` keeping callsites short while
/// ensuring all lookups route through the shared loader.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent "domain" (matches the fallback FTL filename).
const DOMAIN: &str = "leafscan-ui";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Languages the interface ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Vietnamese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Vietnamese];

    /// Short code used for persistence and the language picker.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Vietnamese => "vi",
        }
    }

    /// Locale folder under `i18n/`.
    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Vietnamese => "vi-VN",
        }
    }

    pub fn identifier(self) -> LanguageIdentifier {
        match self {
            Language::English => unic_langid::langid!("en-US"),
            Language::Vietnamese => unic_langid::langid!("vi-VN"),
        }
    }

    /// Accepts short codes and full tags in any case (`vi`, `vi-VN`, `VI`).
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        match primary {
            "en" => Some(Language::English),
            "vi" => Some(Language::Vietnamese),
            _ => None,
        }
    }

    /// The language's own name, as shown in the picker.
    pub fn native_name(self) -> String {
        let key = match self {
            Language::English => "language-en",
            Language::Vietnamese => "language-vi",
        };
        translate(self, key, &[])
    }
}

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> =
    Lazy::new(|| FluentLanguageLoader::new(DOMAIN, Language::English.identifier()));

/// One loader per language for explicit-language lookups.
static CATALOGS: Lazy<HashMap<Language, FluentLanguageLoader>> = Lazy::new(|| {
    Language::ALL
        .into_iter()
        .map(|lang| {
            let loader = FluentLanguageLoader::new(DOMAIN, Language::English.identifier());
            if let Err(err) = load_into(&loader, lang) {
                log::error!("[i18n] Failed loading {} catalog: {err}", lang.tag());
            }
            (lang, loader)
        })
        .collect()
});

static CURRENT: RwLock<Language> = RwLock::new(Language::English);

static INIT: Once = Once::new();

fn load_into(loader: &FluentLanguageLoader, lang: Language) -> Result<(), i18n_embed::I18nEmbedError> {
    i18n_embed::select(loader, &Localizations, &[lang.identifier()])?;
    // Bidi isolation marks would leak into plain-text exports.
    loader.set_use_isolating(false);
    Ok(())
}

/// Initialize i18n (idempotent), restoring the persisted language.
pub fn init() {
    INIT.call_once(|| {
        let lang = restore_language().unwrap_or_default();
        if let Err(err) = apply_language(lang) {
            log::error!("[i18n] Failed selecting {} ({err}); continuing with fallback", lang.tag());
        }
    });
}

/// Language currently driving [`LOADER`].
pub fn current_language() -> Language {
    CURRENT.read().map(|lang| *lang).unwrap_or_default()
}

/// Switch language at runtime and remember the choice.
pub fn set_language(lang: Language) -> Result<(), i18n_embed::I18nEmbedError> {
    apply_language(lang)?;
    storage::save_preference(LANGUAGE_KEY, lang.code());
    Ok(())
}

/// Switch the shared loader without touching persistence.
pub(crate) fn apply_language(lang: Language) -> Result<(), i18n_embed::I18nEmbedError> {
    load_into(&LOADER, lang)?;
    if let Ok(mut current) = CURRENT.write() {
        *current = lang;
    }
    log::debug!("[i18n] Active language is now {}", lang.tag());
    Ok(())
}

/// Persisted language preference, if any and recognised.
pub fn restore_language() -> Option<Language> {
    storage::load_preference(LANGUAGE_KEY).and_then(|code| Language::from_code(&code))
}

/// Languages whose catalogs are embedded in this build.
pub fn available_languages() -> Vec<Language> {
    let embedded = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    Language::ALL
        .into_iter()
        .filter(|lang| embedded.iter().any(|tag| tag == lang.tag()))
        .collect()
}

/// Looks `key` up for `lang`, falling back to English and then to the key itself.
pub fn translate(lang: Language, key: &str, args: &[(&str, &str)]) -> String {
    for candidate in [lang, Language::English] {
        let Some(loader) = CATALOGS.get(&candidate) else {
            continue;
        };
        if loader.has(key) {
            return if args.is_empty() {
                loader.get(key)
            } else {
                let args: HashMap<&str, FluentValue> = args
                    .iter()
                    .map(|(name, value)| (*name, FluentValue::from(*value)))
                    .collect();
                loader.get_args(key, args)
            };
        }
    }
    key.to_string()
}

/// Localized display name for a disease label from the classifier.
///
/// Labels without a catalog entry are shown as received.
pub fn disease_name(lang: Language, label: &str) -> String {
    let slug: String = label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    if slug.is_empty() {
        return label.to_string();
    }
    let key = format!("diseases-{slug}");
    let name = translate(lang, &key, &[]);
    if name == key {
        label.to_string()
    } else {
        name
    }
}
