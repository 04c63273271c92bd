use anyhow::Result;

use crate::DetectConfig;

pub fn check_thresholds(cfg: &DetectConfig) -> Result<()> {
    anyhow::ensure!(
        cfg.confidence_threshold > 0.0 && cfg.confidence_threshold < 1.0,
        "detect.confidence_threshold out of range"
    );
    anyhow::ensure!(
        cfg.iou_threshold > 0.0 && cfg.iou_threshold < 1.0,
        "detect.iou_threshold out of range"
    );
    anyhow::ensure!(
        cfg.min_box_size >= 0.0 && cfg.min_box_size < cfg.max_box_size,
        "detect.min_box_size must sit below detect.max_box_size"
    );
    anyhow::ensure!(cfg.max_box_size <= 1.0, "detect.max_box_size above 1.0");
    anyhow::ensure!(
        cfg.min_area >= 0.0 && cfg.min_area < cfg.max_area,
        "detect.min_area must sit below detect.max_area"
    );
    anyhow::ensure!(
        cfg.min_aspect_ratio > 0.0 && cfg.min_aspect_ratio <= cfg.max_aspect_ratio,
        "detect aspect ratio bounds invalid"
    );
    anyhow::ensure!(
        (0.0..=1.0).contains(&cfg.min_roundness),
        "detect.min_roundness out of range"
    );
    Ok(())
}
