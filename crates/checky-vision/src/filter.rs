//! Plausibility filtering of raw candidates.

use checky_labels::LabelTable;

use crate::{BoundingBox, DetectConfig, RawCandidate};

/// Why a candidate was dropped before suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    LowConfidence,
    TooSmall,
    TooLarge,
    BadArea,
    BadAspectRatio,
    NotRoundEnough,
    DegenerateCorners,
}

/// Checks one candidate against the configured thresholds and derives the
/// corner coordinates. Rules short-circuit in order.
pub fn validate(
    cand: &RawCandidate,
    cfg: &DetectConfig,
    labels: &LabelTable,
) -> Result<BoundingBox, Rejection> {
    if cand.score <= cfg.confidence_threshold {
        return Err(Rejection::LowConfidence);
    }

    let (w, h) = (cand.w, cand.h);
    if w < cfg.min_box_size || h < cfg.min_box_size {
        return Err(Rejection::TooSmall);
    }
    if w > cfg.max_box_size || h > cfg.max_box_size {
        return Err(Rejection::TooLarge);
    }

    let area = w * h;
    if area < cfg.min_area || area > cfg.max_area {
        return Err(Rejection::BadArea);
    }

    // a ratio out of range may still pass as its inverse (sideways box)
    if !cfg.aspect_ok(w / h) && !cfg.aspect_ok(h / w) {
        return Err(Rejection::BadAspectRatio);
    }

    let class_name = labels.resolve(cand.class_idx);
    if cfg.requires_roundness(class_name) {
        let roundness = w.min(h) / w.max(h);
        if roundness < cfg.min_roundness {
            return Err(Rejection::NotRoundEnough);
        }
    }

    let x1 = (cand.cx - w / 2.0).clamp(0.0, 1.0);
    let y1 = (cand.cy - h / 2.0).clamp(0.0, 1.0);
    let x2 = (cand.cx + w / 2.0).clamp(0.0, 1.0);
    let y2 = (cand.cy + h / 2.0).clamp(0.0, 1.0);
    if x2 <= x1 || y2 <= y1 {
        return Err(Rejection::DegenerateCorners);
    }

    Ok(BoundingBox {
        cx: cand.cx,
        cy: cand.cy,
        w,
        h,
        x1,
        y1,
        x2,
        y2,
        confidence: cand.score,
        class_idx: cand.class_idx,
        class_name: class_name.to_string(),
    })
}
