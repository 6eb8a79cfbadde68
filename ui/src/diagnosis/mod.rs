//! Diagnosis workflow: session state, the analysis fan-out and the assistant chat.
//!
//! The workflow functions are written against [`SessionHandle`] rather than a
//! Dioxus signal so they can be driven from plain executors in tests.

use std::{cell::RefCell, rc::Rc};

use dioxus::prelude::*;

mod chat;
mod orchestrator;
mod session;

pub use chat::{quick_question, submit_chat, QUICK_QUESTIONS};
pub use orchestrator::analyze;
pub use session::{
    AnalysisTicket, Artifact, ChatRequest, ChatTurn, Diagnosis, Explanation,
    Session, Speaker, Visuals,
};

/// Shared, mutable access to a [`Session`].
pub trait SessionHandle: Clone {
    fn read_with<R>(&self, f: impl FnOnce(&Session) -> R) -> R;
    fn update<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> R;
}

impl SessionHandle for Signal<Session> {
    fn read_with<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        self.with(f)
    }

    fn update<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> R {
        self.with_mut(f)
    }
}

impl SessionHandle for Rc<RefCell<Session>> {
    fn read_with<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.borrow())
    }

    fn update<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// The session provided by the nearest diagnosis page.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

#[cfg(test)]
pub(crate) mod fakes;
