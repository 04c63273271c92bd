//! End-to-end post-processing: raw output tensor to deduplicated boxes.

use checky_labels::LabelTable;
use tracing::{debug, trace};

use crate::{filter, nms, BoundingBox, DetectConfig, DetectError, OutputTensor};

/// Result of one inference call's post-processing. `Empty` means every
/// candidate was filtered out; it is an ordinary outcome, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectOutcome {
    Empty,
    Detected(Vec<BoundingBox>),
}

impl DetectOutcome {
    pub fn boxes(&self) -> &[BoundingBox] {
        match self {
            Self::Empty => &[],
            Self::Detected(boxes) => boxes,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Turns a raw output tensor into validated, non-overlapping boxes.
///
/// Holds only the configuration; `process` is a pure function of its inputs,
/// so one pipeline may serve any number of concurrent callers as long as
/// each call owns its buffer.
#[derive(Debug, Clone)]
pub struct DetectionPipeline {
    cfg: DetectConfig,
}

impl DetectionPipeline {
    pub fn new(cfg: DetectConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &DetectConfig {
        &self.cfg
    }

    /// Decodes, filters, and suppresses one inference call's output.
    ///
    /// `raw` is the flat channel-major buffer of `num_channels *
    /// num_elements` values. Fails only when the shape was never properly
    /// established; an all-rejected frame comes back as
    /// [`DetectOutcome::Empty`].
    pub fn process(
        &self,
        raw: &[f32],
        num_channels: usize,
        num_elements: usize,
        labels: &LabelTable,
    ) -> Result<DetectOutcome, DetectError> {
        let tensor = OutputTensor::new(raw, num_channels, num_elements)?;

        let mut survivors = Vec::new();
        let mut rejected = 0usize;
        for cand in tensor.candidates() {
            match filter::validate(&cand, &self.cfg, labels) {
                Ok(b) => survivors.push(b),
                Err(reason) => {
                    rejected += 1;
                    trace!("filter: dropped candidate ({:?})", reason);
                }
            }
        }
        debug!(
            "filter: {} of {} candidates kept ({} rejected)",
            survivors.len(),
            tensor.num_elements(),
            rejected
        );

        if survivors.is_empty() {
            return Ok(DetectOutcome::Empty);
        }

        let kept = nms::suppress(
            survivors,
            self.cfg.iou_threshold,
            self.cfg.nms_area,
            self.cfg.max_detections,
        );
        debug!("nms: {} boxes remain", kept.len());
        Ok(DetectOutcome::Detected(kept))
    }
}
