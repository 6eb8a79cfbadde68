use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::diagnosis::use_session;
use crate::report::{deliver_report, render_report, Delivery, ReportInput};
use crate::services::use_language;
use crate::t;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Done(String),
    Error(String),
}

/// Renders the printable report for the current session.
#[component]
pub fn ExportButton() -> Element {
    let lang = use_language()();
    let session = use_session();
    let mut status = use_signal(|| ExportStatus::Idle);
    let ready = session.with(|s| s.result().is_some());

    let on_export = move |_| {
        let Some(input) = session.with(ReportInput::from_session) else {
            return;
        };
        let html = render_report(&input, lang, OffsetDateTime::now_utc());
        let next = match deliver_report(&html) {
            Ok(Delivery::Opened) => ExportStatus::Done(t!("export-opened")),
            Ok(Delivery::Saved(path)) => ExportStatus::Done(t!("export-saved", path = path)),
            Err(err) => {
                log::error!("Report export failed: {err}");
                ExportStatus::Error(t!("export-failed", error = err))
            }
        };
        status.set(next);
    };

    let feedback = match status() {
        ExportStatus::Idle => None,
        ExportStatus::Done(message) => Some(("export__status", message)),
        ExportStatus::Error(message) => Some(("export__status export__status--error", message)),
    };

    rsx! {
        div { class: "export",
            button {
                r#type: "button",
                class: "button button--ghost",
                disabled: !ready,
                onclick: on_export,
                {t!("export-pdf")}
            }
            if let Some((class_name, message)) = feedback {
                span { class: "{class_name}", role: "status", "{message}" }
            }
        }
    }
}
