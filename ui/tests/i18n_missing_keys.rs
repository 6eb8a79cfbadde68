use std::collections::{BTreeSet, HashSet};

/// Translation completeness test.
/// Ensures every non-fallback locale provides the keys present in the
/// fallback (en-US) `leafscan-ui.ftl`, apart from the ones deliberately left
/// to the fallback.
///
/// If you add a new locale:
/// 1. Create `ui/i18n/<locale>/leafscan-ui.ftl`
/// 2. Copy all keys from `en-US/leafscan-ui.ftl`
/// 3. Register it in `LOCALES` below and in `ui::i18n::Language`.
const EN_US: &str = include_str!("../i18n/en-US/leafscan-ui.ftl");
const VI_VN: &str = include_str!("../i18n/vi-VN/leafscan-ui.ftl");

const LOCALES: &[(&str, &str)] = &[("vi-VN", VI_VN)];

/// Product name; identical in every language.
const FALLBACK_ONLY: &[&str] = &["app-brand"];

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback_keys = extract_keys(EN_US);
    assert!(!fallback_keys.is_empty(), "Fallback (en-US) contains no keys.");
    assert_no_dup_keys(EN_US, "en-US");

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        assert_no_dup_keys(src, locale);

        let keys = extract_keys(src);
        let missing: BTreeSet<&String> = fallback_keys
            .iter()
            .filter(|k| !keys.contains(*k) && !FALLBACK_ONLY.contains(&k.as_str()))
            .collect();

        if !missing.is_empty() {
            failures.push(format!(
                "Locale {locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing.into_iter().cloned().collect::<Vec<_>>().join("\n  ")
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "Translation completeness check failed:\n\n{}\n\nHint: copy the missing keys from en-US, then translate.",
        failures.join("\n\n")
    );
}

#[test]
fn locales_define_no_keys_unknown_to_the_fallback() {
    let fallback_keys = extract_keys(EN_US);
    for (locale, src) in LOCALES {
        let mut extra: Vec<_> = extract_keys(src)
            .into_iter()
            .filter(|k| !fallback_keys.contains(k))
            .collect();
        extra.sort();
        assert!(extra.is_empty(), "Locale {locale} defines stray keys: {extra:?}");
    }
}

#[test]
fn placeholders_survive_translation() {
    // Interpolated values must keep their variable names across locales.
    for key in ["diagnosis-confidence", "detection-areas-detected", "export-date", "export-area-index"] {
        let en = variables(message(EN_US, key).unwrap_or_default());
        for (locale, src) in LOCALES {
            let translated = message(src, key)
                .unwrap_or_else(|| panic!("{locale} has no {key}"));
            assert_eq!(variables(translated), en, "{locale} changed the variables of {key}");
        }
    }
}

/// Extract message keys from a Fluent file (simple heuristic).
fn extract_keys(src: &str) -> HashSet<String> {
    src.lines().filter_map(definition).map(|(key, _)| key.to_string()).collect()
}

/// `key = value` on a top-level line.
fn definition(line: &str) -> Option<(&str, &str)> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with('.') || line.starts_with('-') {
        return None;
    }
    let (left, right) = line.split_once('=')?;
    let key = left.trim();
    if key.is_empty() || key.contains(char::is_whitespace) || key.starts_with('[') {
        return None;
    }
    Some((key, right.trim()))
}

fn message<'a>(src: &'a str, key: &str) -> Option<&'a str> {
    src.lines()
        .filter_map(definition)
        .find(|(k, _)| *k == key)
        .map(|(_, value)| value)
}

fn variables(value: &str) -> BTreeSet<String> {
    value
        .split('$')
        .skip(1)
        .map(|rest| {
            rest.chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect()
        })
        .collect()
}

/// Assert no duplicate key definitions in a single FTL file (rudimentary).
fn assert_no_dup_keys(src: &str, locale: &str) {
    let mut seen = HashSet::new();
    let mut dups = BTreeSet::new();

    for line in src.lines() {
        if let Some((key, _)) = definition(line) {
            if !seen.insert(key) {
                dups.insert(format!("{key}  (line: \"{line}\")"));
            }
        }
    }

    assert!(
        dups.is_empty(),
        "Duplicate key definitions in {locale}:\n  {}",
        dups.into_iter().collect::<Vec<_>>().join("\n  ")
    );
}
