//! Greedy non-maximum suppression over validated boxes.

use crate::{AreaSource, BoundingBox};

/// Keeps the highest-confidence box of every overlapping cluster.
///
/// Boxes are sorted by descending confidence (the sort is stable, so decode
/// order breaks ties) and kept unless they overlap an already-kept box at
/// `iou_threshold` or above. Survivors come back in selection order, i.e.
/// non-increasing confidence.
pub fn suppress(
    mut boxes: Vec<BoundingBox>,
    iou_threshold: f32,
    area_source: AreaSource,
    max_detections: Option<usize>,
) -> Vec<BoundingBox> {
    boxes.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<BoundingBox> = Vec::new();
    'outer: for b in boxes {
        for k in &kept {
            if iou(k, &b, area_source) >= iou_threshold {
                continue 'outer;
            }
        }
        kept.push(b);
        if let Some(cap) = max_detections {
            if kept.len() >= cap {
                break;
            }
        }
    }
    kept
}

/// Intersection-over-union of two boxes' corner rectangles.
///
/// The union term takes each box's area from `area_source`; see
/// [`AreaSource`] for how the two choices treat frame-clipped boxes.
pub fn iou(a: &BoundingBox, b: &BoundingBox, area_source: AreaSource) -> f32 {
    let ix1 = a.x1.max(b.x1);
    let iy1 = a.y1.max(b.y1);
    let ix2 = a.x2.min(b.x2);
    let iy2 = a.y2.min(b.y2);

    let intersection = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
    let (area_a, area_b) = match area_source {
        AreaSource::BoxSize => (a.size_area(), b.size_area()),
        AreaSource::Corners => (a.corner_area(), b.corner_area()),
    };
    let union = area_a + area_b - intersection;
    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(cx: f32, cy: f32, w: f32, h: f32, confidence: f32) -> BoundingBox {
        BoundingBox {
            cx,
            cy,
            w,
            h,
            x1: (cx - w / 2.0).clamp(0.0, 1.0),
            y1: (cy - h / 2.0).clamp(0.0, 1.0),
            x2: (cx + w / 2.0).clamp(0.0, 1.0),
            y2: (cy + h / 2.0).clamp(0.0, 1.0),
            confidence,
            class_idx: 0,
            class_name: "matang".to_string(),
        }
    }

    #[test]
    fn identical_boxes_have_unit_iou() {
        let a = boxed(0.5, 0.5, 0.3, 0.3, 0.9);
        assert!((iou(&a, &a, AreaSource::BoxSize) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn disjoint_boxes_have_zero_iou() {
        let a = boxed(0.2, 0.2, 0.1, 0.1, 0.9);
        let b = boxed(0.8, 0.8, 0.1, 0.1, 0.8);
        assert_eq!(iou(&a, &b, AreaSource::BoxSize), 0.0);
    }

    #[test]
    fn area_source_changes_iou_for_frame_clipped_boxes() {
        // centered on the edge: half the decoded box lies outside the frame
        let a = boxed(0.0, 0.5, 0.4, 0.4, 0.9);
        let b = boxed(0.1, 0.5, 0.4, 0.4, 0.8);
        let from_size = iou(&a, &b, AreaSource::BoxSize);
        let from_corners = iou(&a, &b, AreaSource::Corners);
        // w*h over-counts the clipped box, inflating the union
        assert!(from_size < from_corners);
    }

    #[test]
    fn suppression_keeps_the_stronger_of_an_overlapping_pair() {
        let kept = suppress(
            vec![
                boxed(0.5, 0.5, 0.3, 0.3, 0.8),
                boxed(0.51, 0.5, 0.3, 0.3, 0.9),
            ],
            0.4,
            AreaSource::BoxSize,
            None,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].confidence, 0.9);
    }

    #[test]
    fn equal_confidence_ties_keep_decode_order() {
        let kept = suppress(
            vec![
                boxed(0.5, 0.5, 0.3, 0.3, 0.8),
                boxed(0.52, 0.5, 0.3, 0.3, 0.8),
            ],
            0.4,
            AreaSource::BoxSize,
            None,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].cx, 0.5);
    }

    #[test]
    fn non_overlapping_boxes_all_survive_in_confidence_order() {
        let kept = suppress(
            vec![
                boxed(0.2, 0.2, 0.1, 0.1, 0.5),
                boxed(0.8, 0.8, 0.1, 0.1, 0.9),
                boxed(0.5, 0.5, 0.1, 0.1, 0.7),
            ],
            0.4,
            AreaSource::BoxSize,
            None,
        );
        let confs: Vec<f32> = kept.iter().map(|b| b.confidence).collect();
        assert_eq!(confs, vec![0.9, 0.7, 0.5]);
    }

    #[test]
    fn max_detections_caps_survivors() {
        let kept = suppress(
            vec![
                boxed(0.2, 0.2, 0.1, 0.1, 0.5),
                boxed(0.8, 0.8, 0.1, 0.1, 0.9),
                boxed(0.5, 0.5, 0.1, 0.1, 0.7),
            ],
            0.4,
            AreaSource::BoxSize,
            Some(2),
        );
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].confidence, 0.7);
    }
}
