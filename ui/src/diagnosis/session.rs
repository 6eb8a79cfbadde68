//! State of one diagnosis session and the only operations allowed to change it.
//!
//! Every analysis run is stamped with an [`AnalysisTicket`]. Completions carry
//! the ticket they were issued for and are dropped once a newer run (or a new
//! image) has superseded it, so a slow response can never overwrite fresher
//! results.

use api::{assistant::NO_DETECTION_LABEL, AnalysisResult, ApiError, ImagePayload, VisualKind};
use uuid::Uuid;

use crate::core::resource::{ImageResource, UploadedImage};

/// Identifies one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

impl AnalysisTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// What the user is told the leaf has.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnosis {
    Detected { label: String, confidence: f64 },
    NoDetection,
}

impl Diagnosis {
    /// An empty detection list overrides the classifier's label.
    pub fn from_result(result: &AnalysisResult) -> Self {
        if result.is_empty_detection() {
            Diagnosis::NoDetection
        } else {
            Diagnosis::Detected {
                label: result.classification.label.clone(),
                confidence: result.classification.confidence,
            }
        }
    }

    /// Label sent to the explanation and chat prompts.
    pub fn label(&self) -> &str {
        match self {
            Diagnosis::Detected { label, .. } => label,
            Diagnosis::NoDetection => NO_DETECTION_LABEL,
        }
    }

    pub fn confidence(&self) -> Option<f64> {
        match self {
            Diagnosis::Detected { confidence, .. } => Some(*confidence),
            Diagnosis::NoDetection => None,
        }
    }

    pub fn is_no_detection(&self) -> bool {
        matches!(self, Diagnosis::NoDetection)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
enum AnalysisPhase {
    #[default]
    Idle,
    Running,
    Complete,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Explanation {
    #[default]
    Idle,
    Loading,
    Ready(String),
}

/// One secondary visualization.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Artifact {
    #[default]
    Idle,
    Loading,
    Ready(ImageResource),
    Unavailable,
}

impl Artifact {
    pub fn is_loading(&self) -> bool {
        matches!(self, Artifact::Loading)
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Artifact::Ready(resource) => Some(resource.url()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Visuals {
    boxes: Artifact,
    heatmap: Artifact,
    combined: Artifact,
}

impl Visuals {
    pub fn get(&self, kind: VisualKind) -> &Artifact {
        match kind {
            VisualKind::Boxes => &self.boxes,
            VisualKind::Heatmap => &self.heatmap,
            VisualKind::Combined => &self.combined,
        }
    }

    fn get_mut(&mut self, kind: VisualKind) -> &mut Artifact {
        match kind {
            VisualKind::Boxes => &mut self.boxes,
            VisualKind::Heatmap => &mut self.heatmap,
            VisualKind::Combined => &mut self.combined,
        }
    }

    fn reset_to(&mut self, state: Artifact) {
        for kind in VisualKind::ALL {
            *self.get_mut(kind) = state.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub id: Uuid,
    pub speaker: Speaker,
    pub text: String,
}

impl ChatTurn {
    fn new(speaker: Speaker, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker,
            text,
        }
    }
}

/// Everything the chat actions need, captured when a question is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub ticket: AnalysisTicket,
    pub message: String,
    pub label: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Chat {
    turns: Vec<ChatTurn>,
    input: String,
    pending: bool,
    open: bool,
    unread: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    upload: Option<UploadedImage>,
    phase: AnalysisPhase,
    result: Option<AnalysisResult>,
    explanation: Explanation,
    visuals: Visuals,
    chat: Chat,
    sequence: u64,
}

impl Session {
    pub fn upload(&self) -> Option<&UploadedImage> {
        self.upload.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.phase == AnalysisPhase::Running
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            AnalysisPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn diagnosis(&self) -> Option<Diagnosis> {
        self.result.as_ref().map(Diagnosis::from_result)
    }

    pub fn explanation(&self) -> &Explanation {
        &self.explanation
    }

    /// Explanation text, empty until it has arrived.
    pub fn explanation_text(&self) -> &str {
        match &self.explanation {
            Explanation::Ready(text) => text,
            _ => "",
        }
    }

    pub fn visual(&self, kind: VisualKind) -> &Artifact {
        self.visuals.get(kind)
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.chat.turns
    }

    pub fn chat_input(&self) -> &str {
        &self.chat.input
    }

    pub fn chat_pending(&self) -> bool {
        self.chat.pending
    }

    pub fn chat_open(&self) -> bool {
        self.chat.open
    }

    /// Results arrived while the assistant panel was closed.
    pub fn has_unread_results(&self) -> bool {
        self.chat.unread
    }

    pub fn is_current(&self, ticket: AnalysisTicket) -> bool {
        ticket.0 == self.sequence
    }

    /// Replaces the image and discards everything derived from the previous one.
    pub fn select_image(&mut self, image: UploadedImage) {
        self.supersede();
        self.upload = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.supersede();
        self.upload = None;
    }

    /// Starts a run for the current image.
    ///
    /// Returns `None` without side effects when there is no image or a run is
    /// already in flight. Otherwise all visuals, the explanation and the
    /// transcript are cleared before the ticket is handed out.
    pub fn begin_analysis(&mut self) -> Option<(AnalysisTicket, ImagePayload)> {
        if self.is_analyzing() {
            return None;
        }
        let payload = self.upload.as_ref()?.payload.clone();
        self.supersede();
        self.phase = AnalysisPhase::Running;
        Some((AnalysisTicket(self.sequence), payload))
    }

    /// Records the primary outcome. Returns the diagnosis when secondary work
    /// should start.
    pub fn finish_primary(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, ApiError>,
    ) -> Option<Diagnosis> {
        if !self.is_current(ticket) {
            return None;
        }
        match outcome {
            Ok(result) => {
                let diagnosis = Diagnosis::from_result(&result);
                self.result = Some(result);
                self.phase = AnalysisPhase::Complete;
                self.explanation = Explanation::Loading;
                self.visuals.reset_to(Artifact::Loading);
                self.chat.unread = !self.chat.open;
                Some(diagnosis)
            }
            Err(err) => {
                self.phase = AnalysisPhase::Failed(err.to_string());
                None
            }
        }
    }

    /// Stores a visualization outcome; `false` when the ticket is stale.
    pub fn finish_visual(
        &mut self,
        ticket: AnalysisTicket,
        kind: VisualKind,
        outcome: Result<ImageResource, String>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        *self.visuals.get_mut(kind) = match outcome {
            Ok(resource) => Artifact::Ready(resource),
            Err(_) => Artifact::Unavailable,
        };
        true
    }

    pub fn finish_explanation(&mut self, ticket: AnalysisTicket, text: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.explanation = Explanation::Ready(text);
        true
    }

    pub fn set_chat_input(&mut self, text: impl Into<String>) {
        self.chat.input = text.into();
    }

    pub fn set_chat_open(&mut self, open: bool) {
        self.chat.open = open;
        if open {
            self.chat.unread = false;
        }
    }

    /// Moves the typed question into the transcript.
    ///
    /// `None` (and no change at all) for blank input, while a reply is still
    /// pending, or before any diagnosis exists.
    pub fn begin_chat(&mut self) -> Option<ChatRequest> {
        let message = self.chat.input.trim().to_string();
        if message.is_empty() || self.chat.pending {
            return None;
        }
        let label = self.diagnosis()?.label().to_string();

        self.chat.input.clear();
        self.chat.pending = true;
        self.chat
            .turns
            .push(ChatTurn::new(Speaker::User, message.clone()));
        Some(ChatRequest {
            ticket: AnalysisTicket(self.sequence),
            message,
            label,
            explanation: self.explanation_text().to_string(),
        })
    }

    pub fn finish_chat(&mut self, ticket: AnalysisTicket, reply: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.chat.pending = false;
        self.chat.turns.push(ChatTurn::new(Speaker::Assistant, reply));
        true
    }

    fn supersede(&mut self) {
        self.sequence += 1;
        self.phase = AnalysisPhase::Idle;
        self.result = None;
        self.explanation = Explanation::Idle;
        self.visuals.reset_to(Artifact::Idle);
        self.chat.turns.clear();
        self.chat.pending = false;
        self.chat.unread = false;
    }
}
