//! Shared UI crate for Leafscan. Views, session state and the analysis
//! orchestration live here; the platform crates only provide routing.

pub mod core;
pub mod diagnosis;
pub mod i18n;
pub mod report;
pub mod services;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    pub mod app_shell;
    pub use app_shell::AppShell;

    pub mod chat_panel;
    pub use chat_panel::ChatPanel;

    pub mod export_button;
    pub use export_button::ExportButton;

    pub mod guidance;
    pub use guidance::DiseaseGuidance;

    pub mod image_uploader;
    pub use image_uploader::ImageUploader;

    pub mod result_tabs;
    pub use result_tabs::ResultTabs;
}
