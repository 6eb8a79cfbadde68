//! Assistant chat about the current diagnosis.

use api::{assistant::reply, TextGenerator};

use super::SessionHandle;
use crate::i18n::{self, Language};

/// Quick-question slots offered under the chat input.
pub const QUICK_QUESTIONS: [usize; 4] = [1, 2, 3, 4];

/// Button caption and full question for quick-question `slot`.
pub fn quick_question(lang: Language, slot: usize, disease: &str) -> (String, String) {
    let button = i18n::translate(lang, &format!("chat-quick-question{slot}-button"), &[]);
    let question = i18n::translate(
        lang,
        &format!("chat-quick-question{slot}"),
        &[("disease", disease)],
    );
    (button, question)
}

/// Sends the typed question and appends the assistant's answer.
///
/// Blank input (and input typed while a reply is pending) is ignored without
/// touching the transcript. A failed completion is answered with a localized
/// apology turn so the conversation can continue.
pub async fn submit_chat<G, S>(generator: &G, mut store: S, lang: Language)
where
    G: TextGenerator + ?Sized,
    S: SessionHandle,
{
    let Some(request) = store.update(|session| session.begin_chat()) else {
        return;
    };

    let answer = match reply(generator, &request.message, &request.label, &request.explanation).await
    {
        Ok(text) => text,
        Err(err) => {
            log::warn!("Chat reply failed: {err}");
            i18n::translate(lang, "chat-error", &[])
        }
    };

    if !store.update(|session| session.finish_chat(request.ticket, answer)) {
        log::debug!("Dropped chat reply for superseded analysis #{}", request.ticket.sequence());
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use api::assistant::PromptRole;
    use futures::executor::block_on;

    use super::*;
    use crate::{
        core::resource::UploadedImage,
        diagnosis::{analyze, fakes::*, Session, Speaker},
    };

    fn analyzed_store(label: &str, explanation: &str) -> Rc<RefCell<Session>> {
        let store = Rc::new(RefCell::new(Session::default()));
        store
            .borrow_mut()
            .select_image(UploadedImage::new("leaf.jpg", vec![1, 2]).unwrap());
        block_on(analyze(
            &FakeBackend::detecting(result_with_regions(label, 0.9, 1)),
            &FakeGenerator::answering(explanation),
            store.clone(),
        ));
        store
    }

    #[test]
    fn question_and_answer_are_appended_in_order() {
        let store = analyzed_store("Black Spot", "A fungal disease.");
        let generator = FakeGenerator::answering("Remove fallen leaves.");
        store.borrow_mut().set_chat_input("How do I treat it?");

        block_on(submit_chat(&generator, store.clone(), Language::English));

        let session = store.borrow();
        let turns = session.transcript();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, Speaker::User);
        assert_eq!(turns[0].text, "How do I treat it?");
        assert_eq!(turns[1].speaker, Speaker::Assistant);
        assert_eq!(turns[1].text, "Remove fallen leaves.");
        assert_ne!(turns[0].id, turns[1].id);
        assert!(!session.chat_pending());

        let prompt = &generator.prompts()[0];
        assert_eq!(prompt[0].role, PromptRole::System);
        assert!(prompt[0].content.contains("Black Spot"));
        assert!(prompt[0].content.contains("A fungal disease."));
    }

    #[test]
    fn blank_input_makes_no_call() {
        let store = analyzed_store("Scab", "Scabby.");
        let generator = FakeGenerator::answering("unused");
        store.borrow_mut().set_chat_input("   ");

        block_on(submit_chat(&generator, store.clone(), Language::English));

        assert!(store.borrow().transcript().is_empty());
        assert!(generator.prompts().is_empty());
    }

    #[test]
    fn failed_reply_becomes_localized_apology() {
        let store = analyzed_store("Scab", "Scabby.");
        store.borrow_mut().set_chat_input("Is it spreading?");

        block_on(submit_chat(&FakeGenerator::failing(), store.clone(), Language::Vietnamese));

        let session = store.borrow();
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(
            session.transcript()[1].text,
            "Xin lỗi, đã xảy ra lỗi. Vui lòng thử lại."
        );
        assert!(!session.chat_pending());
    }

    #[test]
    fn quick_questions_name_the_disease() {
        let (button, question) = quick_question(Language::English, 2, "Scab");
        assert_eq!(button, "Treatment");
        assert_eq!(question, "How can I treat Scab?");

        let (button, question) = quick_question(Language::Vietnamese, 1, "Đốm Đen");
        assert_eq!(button, "Triệu chứng");
        assert_eq!(question, "Triệu chứng của Đốm Đen là gì?");
    }
}
