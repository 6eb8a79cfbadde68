use dioxus::prelude::*;

use crate::diagnosis::{quick_question, submit_chat, use_session, Speaker, QUICK_QUESTIONS};
use crate::i18n::disease_name;
use crate::services::{use_language, use_services};
use crate::t;

fn turn_class(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::User => "chat__turn chat__turn--user",
        Speaker::Assistant => "chat__turn chat__turn--assistant",
    }
}

/// Floating assistant that answers questions about the current diagnosis.
#[component]
pub fn ChatPanel() -> Element {
    let lang = use_language()();
    let services = use_services();
    let mut session = use_session();

    let (open, unread, pending, input, turns, diagnosis) = session.with(|s| {
        (
            s.chat_open(),
            s.has_unread_results(),
            s.chat_pending(),
            s.chat_input().to_string(),
            s.transcript().to_vec(),
            s.diagnosis(),
        )
    });

    if !open {
        return rsx! {
            button {
                r#type: "button",
                class: "chat-launcher",
                aria_label: t!("chat-open"),
                onclick: move |_| session.with_mut(|s| s.set_chat_open(true)),
                span { aria_hidden: "true", "💬" }
                if unread {
                    span { class: "chat-launcher__badge", aria_hidden: "true" }
                }
            }
        };
    }

    let ready = diagnosis.is_some();
    // Quick questions only make sense for a named disease.
    let quick: Vec<(String, String)> = match &diagnosis {
        Some(d) if !d.is_no_detection() => {
            let name = disease_name(lang, d.label());
            QUICK_QUESTIONS
                .into_iter()
                .map(|slot| quick_question(lang, slot, &name))
                .collect()
        }
        _ => Vec::new(),
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        spawn(async move {
            submit_chat(&services.assistant, session, lang).await;
        });
    };

    let placeholder = if ready {
        t!("chat-placeholder")
    } else {
        t!("chat-analyze-first")
    };
    let you = t!("chat-you");
    let assistant = t!("app-assistant");

    rsx! {
        aside { class: "chat", aria_label: "{assistant}",
            header { class: "chat__header",
                h3 { "{assistant}" }
                button {
                    r#type: "button",
                    class: "chat__close",
                    aria_label: t!("chat-close"),
                    onclick: move |_| session.with_mut(|s| s.set_chat_open(false)),
                    "×"
                }
            }

            div { class: "chat__messages", aria_live: "polite",
                if turns.is_empty() {
                    p { class: "chat__hint",
                        if ready {
                            {t!("chat-placeholder")}
                        } else {
                            {t!("chat-start-message")}
                        }
                    }
                }
                for turn in turns {
                    div {
                        key: "{turn.id}",
                        class: "{turn_class(turn.speaker)}",
                        span { class: "chat__speaker",
                            if turn.speaker == Speaker::User { "{you}" } else { "{assistant}" }
                        }
                        p { "{turn.text}" }
                    }
                }
                if pending {
                    div { class: "chat__turn chat__turn--assistant chat__turn--pending",
                        span { class: "spinner", aria_hidden: "true" }
                    }
                }
            }

            if !quick.is_empty() {
                div { class: "chat__quick",
                    span { class: "chat__quick-title", {t!("chat-quick-questions")} }
                    for (button_label, question) in quick {
                        button {
                            key: "{button_label}",
                            r#type: "button",
                            class: "chat__quick-button",
                            disabled: pending,
                            onclick: move |_| {
                                let question = question.clone();
                                session.with_mut(|s| s.set_chat_input(question));
                            },
                            "{button_label}"
                        }
                    }
                }
            }

            form { class: "chat__form", onsubmit: on_submit,
                input {
                    class: "chat__input",
                    r#type: "text",
                    value: "{input}",
                    placeholder: "{placeholder}",
                    disabled: !ready || pending,
                    oninput: move |evt: FormEvent| session.with_mut(|s| s.set_chat_input(evt.value())),
                }
                button {
                    r#type: "submit",
                    class: "button button--primary",
                    disabled: !ready || pending || input.trim().is_empty(),
                    {t!("chat-send")}
                }
            }
        }
    }
}
