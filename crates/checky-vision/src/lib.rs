pub mod decode;
pub mod doctor;
pub mod filter;
pub mod nms;
pub mod pipeline;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use decode::{OutputTensor, RawCandidate};
pub use filter::Rejection;
pub use pipeline::{DetectOutcome, DetectionPipeline};

/// One validated detection. All coordinates are normalized to the model's
/// input frame; `x1 < x2` and `y1 < y2` hold for every constructed box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    // raw decoded center/size
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
    // derived corners, clamped to the frame
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    /// Winning class score, above the detection threshold.
    pub confidence: f32,
    pub class_idx: usize,
    pub class_name: String,
}

impl BoundingBox {
    /// Area from the decoded width/height, as the model emitted them.
    pub fn size_area(&self) -> f32 {
        self.w * self.h
    }

    /// Area of the clamped corner rectangle.
    pub fn corner_area(&self) -> f32 {
        (self.x2 - self.x1) * (self.y2 - self.y1)
    }
}

/// Which area enters the IoU union during suppression.
///
/// `BoxSize` (the default) uses the decoded `w*h` even when corner clamping
/// shrank the box against the frame edge, so the IoU can differ from the
/// overlap of the rendered rectangles. `Corners` recomputes from the clamped
/// rectangle instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AreaSource {
    BoxSize,
    Corners,
}

/// Post-processing thresholds. `Default` carries the tuned values shipped
/// with the citrus model; override per deployment via the `[detect]` config
/// section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Candidates scoring at or below this are dropped.
    pub confidence_threshold: f32,
    /// Boxes overlapping a kept box at or above this IoU are suppressed.
    pub iou_threshold: f32,
    pub min_box_size: f32,
    pub max_box_size: f32,
    pub min_area: f32,
    pub max_area: f32,
    pub min_aspect_ratio: f32,
    pub max_aspect_ratio: f32,
    /// Keywords (lowercase substrings of the class label) that mark a class
    /// as round fruit and enable the roundness check.
    pub round_classes: Vec<String>,
    /// min(w,h)/max(w,h) floor for classes matched by `round_classes`.
    pub min_roundness: f32,
    /// Optional cap on survivors after suppression.
    pub max_detections: Option<usize>,
    pub nms_area: AreaSource,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.25,
            iou_threshold: 0.4,
            min_box_size: 0.02,
            max_box_size: 0.7,
            min_area: 0.0005,
            max_area: 0.4,
            min_aspect_ratio: 0.4,
            max_aspect_ratio: 2.5,
            round_classes: ["jeruk", "orange", "matang", "busuk"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_roundness: 0.4,
            max_detections: None,
            nms_area: AreaSource::BoxSize,
        }
    }
}

impl DetectConfig {
    fn aspect_ok(&self, ratio: f32) -> bool {
        ratio >= self.min_aspect_ratio && ratio <= self.max_aspect_ratio
    }

    /// Whether `class_name` names a round fruit class (case-insensitive
    /// substring match against `round_classes`).
    pub fn requires_roundness(&self, class_name: &str) -> bool {
        let lower = class_name.to_lowercase();
        self.round_classes.iter().any(|k| lower.contains(k.as_str()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectError {
    /// The model/tensor shape was never established; nothing was decoded.
    #[error("model output not initialized ({num_channels} channels, {num_elements} elements)")]
    NotInitialized {
        num_channels: usize,
        num_elements: usize,
    },
    #[error("output buffer length {got} does not match shape ({expected} values)")]
    BufferSizeMismatch { expected: usize, got: usize },
    #[error("output has {num_channels} channels, need 4 box channels plus at least one class")]
    TooFewChannels { num_channels: usize },
}
