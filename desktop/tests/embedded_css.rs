#![cfg(test)]
//! Ensures the embedded desktop CSS (shared theme) remains present & non-trivial.
//!
//! The desktop build inlines `ui/assets/theme/main.css`; a truncated or moved
//! file would only show up as unstyled windows at runtime.
//!
//! If you intentionally rename or relocate the theme, update both this test and the
//! `include_str!` constant in `desktop/src/main.rs`.

const EMBEDDED_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const NAVBAR_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/navbar.css"
));

#[test]
fn embedded_css_file_exists_and_is_not_empty() {
    assert!(
        !EMBEDDED_CSS.trim().is_empty(),
        "Embedded CSS file appears to be empty. If this is intentional, remove the test."
    );
    assert!(!NAVBAR_CSS.trim().is_empty(), "Navbar stylesheet is empty.");
}

#[test]
fn embedded_css_contains_expected_tokens() {
    let required = [
        "--color-bg",
        ".theme-dark",
        "body {",
        ".button--primary",
    ];
    for token in required {
        assert!(
            EMBEDDED_CSS.contains(token),
            "Expected token `{token}` missing from embedded CSS"
        );
    }
}

#[test]
fn navbar_css_styles_the_shared_navbar() {
    for token in [".navbar {", ".navbar__link", ".navbar__theme", ".navbar__locale"] {
        assert!(NAVBAR_CSS.contains(token), "Navbar stylesheet lost `{token}`");
    }
}
