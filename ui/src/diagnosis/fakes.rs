//! In-memory collaborators for driving the workflow in tests.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use api::{
    AnalysisResult, ApiError, BoundingBox, Classification, DetectedRegion, DiagnosisBackend,
    ImagePayload, PromptMessage, TextGenerator, VisualImage, VisualKind,
};
use futures::{channel::oneshot, future::LocalBoxFuture};

use super::{Artifact, Session};

pub fn result_with_regions(label: &str, confidence: f64, regions: usize) -> AnalysisResult {
    AnalysisResult {
        classification: Classification {
            label: label.into(),
            confidence,
        },
        regions: (0..regions)
            .map(|i| {
                let offset = i as f64 * 0.1;
                DetectedRegion {
                    bbox: Some(BoundingBox {
                        x1: offset,
                        y1: offset,
                        x2: offset + 0.2,
                        y2: offset + 0.3,
                    }),
                    label: label.into(),
                    confidence: 0.8 + offset / 10.0,
                }
            })
            .collect(),
    }
}

/// Session state seen by the backend when `detect` was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct Observed {
    pub visuals_idle: bool,
    pub transcript_len: usize,
}

pub struct FakeBackend {
    detect: Result<AnalysisResult, ApiError>,
    broken: Vec<VisualKind>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    probe: Option<Rc<RefCell<Session>>>,
    observed: RefCell<Option<Observed>>,
    detect_calls: Cell<usize>,
    visual_calls: RefCell<Vec<VisualKind>>,
}

impl FakeBackend {
    fn with(detect: Result<AnalysisResult, ApiError>) -> Self {
        Self {
            detect,
            broken: Vec::new(),
            gates: RefCell::new(HashMap::new()),
            probe: None,
            observed: RefCell::new(None),
            detect_calls: Cell::new(0),
            visual_calls: RefCell::new(Vec::new()),
        }
    }

    pub fn detecting(result: AnalysisResult) -> Self {
        Self::with(Ok(result))
    }

    pub fn failing(err: ApiError) -> Self {
        Self::with(Err(err))
    }

    pub fn without_visual(mut self, kind: VisualKind) -> Self {
        self.broken.push(kind);
        self
    }

    /// `detect` for `file_name` waits until the gate's sender fires.
    pub fn gated(self, file_name: &str, gate: oneshot::Receiver<()>) -> Self {
        self.gates.borrow_mut().insert(file_name.to_string(), gate);
        self
    }

    pub fn observing(mut self, store: Rc<RefCell<Session>>) -> Self {
        self.probe = Some(store);
        self
    }

    pub fn detect_calls(&self) -> usize {
        self.detect_calls.get()
    }

    pub fn visual_calls(&self) -> Vec<VisualKind> {
        self.visual_calls.borrow().clone()
    }

    pub fn observed(&self) -> Option<Observed> {
        self.observed.borrow().clone()
    }
}

impl DiagnosisBackend for FakeBackend {
    fn detect<'a>(
        &'a self,
        image: &'a ImagePayload,
    ) -> LocalBoxFuture<'a, Result<AnalysisResult, ApiError>> {
        self.detect_calls.set(self.detect_calls.get() + 1);
        if let Some(store) = &self.probe {
            let session = store.borrow();
            *self.observed.borrow_mut() = Some(Observed {
                visuals_idle: VisualKind::ALL
                    .into_iter()
                    .all(|kind| session.visual(kind) == &Artifact::Idle),
                transcript_len: session.transcript().len(),
            });
        }
        let gate = self.gates.borrow_mut().remove(&image.file_name);
        Box::pin(async move {
            if let Some(gate) = gate {
                gate.await.ok();
            }
            self.detect.clone()
        })
    }

    fn visualize<'a>(
        &'a self,
        kind: VisualKind,
        _image: &'a ImagePayload,
    ) -> LocalBoxFuture<'a, Result<VisualImage, ApiError>> {
        self.visual_calls.borrow_mut().push(kind);
        let outcome = if self.broken.contains(&kind) {
            Err(ApiError::Status {
                endpoint: kind.endpoint().to_string(),
                status: 500,
            })
        } else {
            Ok(VisualImage {
                bytes: vec![0x89, b'P', b'N', b'G'],
                mime: "image/png".into(),
            })
        };
        Box::pin(async move { outcome })
    }
}

pub struct FakeGenerator {
    answer: Option<String>,
    prompts: RefCell<Vec<Vec<PromptMessage>>>,
}

impl FakeGenerator {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Some(text.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<Vec<PromptMessage>> {
        self.prompts.borrow().clone()
    }
}

impl TextGenerator for FakeGenerator {
    fn complete<'a>(
        &'a self,
        messages: Vec<PromptMessage>,
        _max_tokens: u32,
    ) -> LocalBoxFuture<'a, Result<String, ApiError>> {
        self.prompts.borrow_mut().push(messages);
        let outcome = self
            .answer
            .clone()
            .ok_or_else(|| ApiError::Status {
                endpoint: "chat/completions".into(),
                status: 503,
            });
        Box::pin(async move { outcome })
    }
}
