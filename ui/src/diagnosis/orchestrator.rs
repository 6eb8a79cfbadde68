//! One analysis run: the primary `detect` call, then the explanation and the
//! three visualizations in parallel.

use api::{
    assistant::explain, AnalysisResult, ApiError, DiagnosisBackend, ImagePayload, TextGenerator,
    VisualKind,
};

use super::{AnalysisTicket, SessionHandle};
use crate::core::resource::ImageResource;

/// Runs a full analysis of the session's current image.
///
/// Does nothing without an image or while another run is in flight. A failed
/// primary call is recorded on the session and nothing else is requested.
/// After a successful primary call each secondary task reports its own
/// outcome, so one broken visualization never hides the others.
pub async fn analyze<B, G, S>(backend: &B, generator: &G, mut store: S)
where
    B: DiagnosisBackend + ?Sized,
    G: TextGenerator + ?Sized,
    S: SessionHandle,
{
    let Some((ticket, image)) = store.update(|session| session.begin_analysis()) else {
        return;
    };
    log::info!(
        "Analysis #{} started for {} ({} bytes)",
        ticket.sequence(),
        image.file_name,
        image.len()
    );

    let outcome = backend.detect(&image).await;
    log_primary(ticket, &outcome);
    let Some(diagnosis) = store.update(|session| session.finish_primary(ticket, outcome)) else {
        return;
    };

    let label = diagnosis.label().to_string();
    futures::join!(
        explanation_task(generator, store.clone(), ticket, &label),
        visual_task(backend, store.clone(), ticket, VisualKind::Boxes, &image),
        visual_task(backend, store.clone(), ticket, VisualKind::Heatmap, &image),
        visual_task(backend, store.clone(), ticket, VisualKind::Combined, &image)
    );
    log::debug!("Analysis #{} settled", ticket.sequence());
}

fn log_primary(ticket: AnalysisTicket, outcome: &Result<AnalysisResult, ApiError>) {
    match outcome {
        Ok(result) => log::info!(
            "Analysis #{}: {} ({:.4}), {} region(s)",
            ticket.sequence(),
            result.classification.label,
            result.classification.confidence,
            result.regions.len()
        ),
        Err(err) => log::error!("Analysis #{} failed: {err}", ticket.sequence()),
    }
}

async fn explanation_task<G, S>(generator: &G, mut store: S, ticket: AnalysisTicket, label: &str)
where
    G: TextGenerator + ?Sized,
    S: SessionHandle,
{
    let text = explain(generator, label).await;
    if !store.update(|session| session.finish_explanation(ticket, text)) {
        log::debug!("Dropped stale explanation for analysis #{}", ticket.sequence());
    }
}

async fn visual_task<B, S>(
    backend: &B,
    mut store: S,
    ticket: AnalysisTicket,
    kind: VisualKind,
    image: &ImagePayload,
) where
    B: DiagnosisBackend + ?Sized,
    S: SessionHandle,
{
    let outcome = match backend.visualize(kind, image).await {
        // Skip the object URL entirely when the run is already superseded.
        Ok(_) if !store.read_with(|session| session.is_current(ticket)) => return,
        Ok(visual) => ImageResource::from_bytes(&visual.bytes, &visual.mime),
        Err(err) => Err(err.to_string()),
    };
    if let Err(err) = &outcome {
        log::warn!("{} unavailable: {err}", kind.endpoint());
    }
    if !store.update(|session| session.finish_visual(ticket, kind, outcome)) {
        log::debug!("Dropped stale {} for analysis #{}", kind.endpoint(), ticket.sequence());
    }
}
