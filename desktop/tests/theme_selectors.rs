#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Purpose:
- Ensure that CSS selectors the shared components render (uploader, result tabs,
  detection overlay, chat assistant) remain present in ui/assets/theme/main.css.
- Fail fast if a refactor drops or renames core classes, preventing a silent
  styling regression in packaged (embedded) desktop builds.

If you intentionally rename or remove a selector:
    1. Update the Dioxus component markup.
    2. Adjust this test's REQUIRED_SELECTORS accordingly.

A substring presence check is enough here; no CSS parser involved.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Core selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".page-detect__grid",
    ".visually-hidden",
    // Buttons & shared UI
    ".button {",
    ".button--primary",
    ".button--ghost",
    ".card {",
    ".spinner",
    ".alert--error",
    ".alert--warning",
    // Upload
    ".uploader__zone",
    ".uploader__zone--active",
    ".uploader__preview",
    ".uploader__remove",
    // Results
    ".results__header",
    ".tabs__tab",
    ".tabs__tab--active",
    ".tabs__panel",
    ".diagnosis__name",
    ".guidance__card",
    ".visual__image",
    ".visual__status",
    ".regions__item",
    ".export__status",
    // Chat assistant
    ".chat-launcher",
    ".chat-launcher__badge",
    ".chat__turn--user",
    ".chat__turn--assistant",
    ".chat__quick-button",
    ".chat__form",
    // Media query token (sanity check responsive block exists)
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn overlay_block_consistency() {
    // Fallback detection overlay needs both the box and its confidence tag.
    let has_box = THEME_CSS.contains(".overlay__box");
    let has_tag = THEME_CSS.contains(".overlay__tag");
    assert!(
        has_box && has_tag,
        "Detection overlay sub-selectors missing (box: {has_box}, tag: {has_tag})"
    );
}
