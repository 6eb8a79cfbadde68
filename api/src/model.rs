//! Wire contract of the inference service and the validated domain types the
//! client works with.
//!
//! Bounding boxes are canonical in the [0, 1] fractional space. The service
//! has been seen to emit both fractions and percentages, so conversion
//! happens once, here, when the `detect` payload is decoded.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Image bytes as handed to every backend endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl ImagePayload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for_file_name(&file_name).to_string();
        Self {
            file_name,
            mime,
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub fn mime_for_file_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Whole-image disease classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    /// Always within [0, 1].
    pub confidence: f64,
}

/// Axis-aligned rectangle in fractional image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    /// Accepts `[x1, y1, x2, y2]` either as fractions or as percentages.
    pub fn from_wire(raw: [f64; 4]) -> Result<Self, ApiError> {
        if raw.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ApiError::Malformed(format!(
                "bounding box {raw:?} has negative or non-finite coordinates"
            )));
        }

        let scale = if raw.iter().all(|v| *v <= 1.0) {
            1.0
        } else if raw.iter().all(|v| *v <= 100.0) {
            100.0
        } else {
            return Err(ApiError::Malformed(format!(
                "bounding box {raw:?} is outside the normalized coordinate space"
            )));
        };

        let [a, b, c, d] = raw.map(|v| v / scale);
        Ok(Self {
            x1: a.min(c),
            y1: b.min(d),
            x2: a.max(c),
            y2: b.max(d),
        })
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedRegion {
    /// `None` when the detector reported coordinates that cannot be placed
    /// on the image (pixel space, negative or non-finite).
    pub bbox: Option<BoundingBox>,
    pub label: String,
    pub confidence: f64,
}

impl DetectedRegion {
    /// A bad region never fails the whole response. Unusable boxes are kept
    /// without geometry; a non-finite confidence drops the region.
    fn from_wire(det: WireDetection) -> Option<Self> {
        if !det.confidence.is_finite() {
            log::warn!("dropping region {:?} with confidence {}", det.label, det.confidence);
            return None;
        }
        if check_confidence(det.confidence).is_err() {
            log::warn!("clamping region confidence {} into [0, 1]", det.confidence);
        }
        let bbox = match BoundingBox::from_wire(det.bbox) {
            Ok(bbox) => Some(bbox),
            Err(err) => {
                log::warn!("region {:?} has no usable box: {err}", det.label);
                None
            }
        };
        Some(Self {
            bbox,
            label: det.label,
            confidence: det.confidence.clamp(0.0, 1.0),
        })
    }
}

/// Validated outcome of the primary `detect` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub classification: Classification,
    pub regions: Vec<DetectedRegion>,
}

impl AnalysisResult {
    /// No regions were detected: a valid, successful outcome that drives the
    /// "no specific disease pattern" messaging.
    pub fn is_empty_detection(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        let wire: WireDetectResponse =
            serde_json::from_str(body).map_err(|err| ApiError::Malformed(err.to_string()))?;
        Self::from_wire(wire)
    }

    fn from_wire(wire: WireDetectResponse) -> Result<Self, ApiError> {
        let classification = wire
            .classification
            .ok_or_else(|| ApiError::Malformed("missing classification".into()))?;
        let label = classification
            .label
            .ok_or_else(|| ApiError::Malformed("classification has no label".into()))?;
        let confidence = classification
            .confidence
            .ok_or_else(|| ApiError::Malformed("classification has no confidence".into()))?;
        check_confidence(confidence)?;

        let regions = wire
            .detections
            .unwrap_or_default()
            .into_iter()
            .filter_map(DetectedRegion::from_wire)
            .collect();

        Ok(Self {
            classification: Classification { label, confidence },
            regions,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct WireDetectResponse {
    #[serde(alias = "mobilenet_classification", default)]
    classification: Option<WireClassification>,
    #[serde(alias = "yolo_detections", default)]
    detections: Option<Vec<WireDetection>>,
}

#[derive(Debug, Clone, Deserialize)]
struct WireClassification {
    #[serde(alias = "class_name")]
    label: Option<String>,
    confidence: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct WireDetection {
    #[serde(rename = "box")]
    bbox: [f64; 4],
    #[serde(alias = "class_name")]
    label: String,
    confidence: f64,
}

fn check_confidence(value: f64) -> Result<(), ApiError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::Malformed(format!(
            "confidence {value} is outside [0, 1]"
        )))
    }
}

/// The three secondary visualizations rendered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    Boxes,
    Heatmap,
    Combined,
}

impl VisualKind {
    pub const ALL: [VisualKind; 3] = [VisualKind::Boxes, VisualKind::Heatmap, VisualKind::Combined];

    pub fn endpoint(self) -> &'static str {
        match self {
            VisualKind::Boxes => "detect_with_boxes",
            VisualKind::Heatmap => "detect_with_gradcam",
            VisualKind::Combined => "detect_with_combined_heatmap",
        }
    }
}
