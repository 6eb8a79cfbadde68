use std::sync::Arc;

use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;

use crate::core::resource::UploadedImage;
use crate::diagnosis::{analyze, use_session};
use crate::services::{use_language, use_services};
use crate::t;

/// First selected file as an upload; `None` for empty or unreadable files.
async fn read_first_image(files: Arc<dyn FileEngine>) -> Option<UploadedImage> {
    let name = files.files().into_iter().next()?;
    let bytes = files.read_file(&name).await?;
    // Desktop webviews report full paths.
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(&name).to_string();
    UploadedImage::new(file_name, bytes)
}

#[component]
pub fn ImageUploader() -> Element {
    let _lang = use_language()();
    let services = use_services();
    let mut session = use_session();
    let mut dragging = use_signal(|| false);

    let (preview, file_name, analyzing, error) = session.with(|s| {
        (
            s.upload().map(|upload| upload.preview.clone()),
            s.upload().map(|upload| upload.file_name().to_string()),
            s.is_analyzing(),
            s.error().map(str::to_string),
        )
    });

    let on_pick = move |evt: FormEvent| async move {
        if let Some(files) = evt.files() {
            match read_first_image(files).await {
                Some(image) => session.with_mut(|s| s.select_image(image)),
                None => log::warn!("Ignoring empty or unreadable upload"),
            }
        }
    };

    let on_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        if let Some(files) = evt.files() {
            match read_first_image(files).await {
                Some(image) => session.with_mut(|s| s.select_image(image)),
                None => log::warn!("Ignoring empty or unreadable drop"),
            }
        }
    };

    let on_analyze = move |_| {
        let services = services.clone();
        async move {
            analyze(&services.backend, &services.assistant, session).await;
        }
    };

    let has_image = preview.is_some();
    let zone_class = if dragging() {
        "uploader__zone uploader__zone--active"
    } else {
        "uploader__zone"
    };

    rsx! {
        section { class: "card uploader",
            h2 { class: "card__title", {t!("app-upload")} }

            if let Some(src) = preview {
                figure { class: "uploader__preview",
                    img { src: "{src}", alt: t!("upload-preview-alt") }
                    if let Some(name) = file_name {
                        figcaption { class: "uploader__file", "{name}" }
                    }
                    button {
                        r#type: "button",
                        class: "uploader__remove",
                        aria_label: t!("upload-remove"),
                        disabled: analyzing,
                        onclick: move |_| session.with_mut(|s| s.clear_image()),
                        "×"
                    }
                }
            } else {
                label {
                    class: "{zone_class}",
                    r#for: "leaf-upload",
                    ondragover: move |evt: DragEvent| {
                        evt.prevent_default();
                        dragging.set(true);
                    },
                    ondragleave: move |_| dragging.set(false),
                    ondrop: on_drop,
                    span { class: "uploader__icon", aria_hidden: "true", "⇪" }
                    span { class: "uploader__hint", {t!("upload-drag")} }
                    span { class: "uploader__formats", {t!("upload-supports")} }
                }
            }

            input {
                id: "leaf-upload",
                class: "visually-hidden",
                r#type: "file",
                accept: "image/*",
                onchange: on_pick,
            }

            button {
                r#type: "button",
                class: "button button--primary uploader__analyze",
                disabled: !has_image || analyzing,
                onclick: on_analyze,
                if analyzing {
                    span { class: "spinner", aria_hidden: "true" }
                    {t!("upload-analyzing")}
                } else {
                    {t!("upload-analyze")}
                }
            }

            if let Some(err) = error {
                p { class: "alert alert--error", role: "alert",
                    {t!("error-analysis", error = err)}
                }
            }
        }
    }
}
