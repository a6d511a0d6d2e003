//! Video scoring from achieved bitrate
//!
//! Video quality is judged by how close the achieved bitrate comes to the
//! target bitrate for the configured resolution, on a log scale:
//!
//! ```text
//! ratio = ln(used / min) / ln(target / min)      used = min(bitrate, target)
//! mos   = ratio * 4 + 1
//! ```
//!
//! The ratio is 0 at the minimum bitrate and 1 at the target. Bitrate above
//! the target earns nothing extra, so the score never exceeds 5.0.

use tracing::{trace, warn};

use crate::bitrate::target_bitrate_for;
use crate::config::{QualityConfig, VideoModelConfig};
use crate::constants::VIDEO_UNUSABLE_SCORE;
use crate::sample::VideoQos;

/// Normalized log-scale quality ratio in `[0, 1]`
///
/// Returns `None` when the bitrate is below the model's floor or the model
/// is degenerate (floor not positive, or target not above the floor). NaN
/// bitrate yields `Some(NaN)`.
pub fn quality_ratio(bitrate_bps: f64, model: &VideoModelConfig) -> Option<f64> {
    if bitrate_bps < model.min_bitrate_bps {
        return None;
    }

    let target = target_bitrate_for(model.resolution);
    if model.is_degenerate() {
        warn!(
            resolution = %model.resolution,
            target,
            min_bitrate = model.min_bitrate_bps,
            "degenerate video model, video cannot be scored"
        );
        return None;
    }

    let used = bitrate_bps.min(target);
    // f64::min drops NaN, keep it visible in the score
    let used = if bitrate_bps.is_nan() { bitrate_bps } else { used };

    let ratio = (used / model.min_bitrate_bps).ln() / (target / model.min_bitrate_bps).ln();
    trace!(bitrate_bps, target, used, ratio, "video quality ratio");
    Some(ratio)
}

/// Stretch a quality ratio onto the 1-5 opinion scale
pub fn compute_video_opinion_score(ratio: f64) -> f64 {
    ratio * 4.0 + 1.0
}

/// Score a video sample with the default model
pub fn calculate_video_score(sample: &VideoQos) -> f64 {
    calculate_video_score_with(sample, &QualityConfig::global_default().video)
}

/// Score a video sample with `model`
///
/// Below the minimum bitrate (or for a degenerate model) the result is
/// [`VIDEO_UNUSABLE_SCORE`], which sits below the 1.0 a ratio of zero maps to.
pub fn calculate_video_score_with(sample: &VideoQos, model: &VideoModelConfig) -> f64 {
    match quality_ratio(sample.bitrate_bps, model) {
        Some(ratio) => compute_video_opinion_score(ratio),
        None => VIDEO_UNUSABLE_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Resolution;

    #[test]
    fn test_below_floor_is_unusable() {
        assert_eq!(calculate_video_score(&VideoQos::new(0.0)), 0.0);
        assert_eq!(calculate_video_score(&VideoQos::new(29_999.999)), 0.0);
        assert_eq!(calculate_video_score(&VideoQos::new(-5.0)), 0.0);
    }

    #[test]
    fn test_at_floor_maps_to_one() {
        assert_eq!(calculate_video_score(&VideoQos::new(30_000.0)), 1.0);
    }

    #[test]
    fn test_at_and_above_target() {
        let target = target_bitrate_for(Resolution::default());
        assert_eq!(calculate_video_score(&VideoQos::new(target)), 5.0);
        assert_eq!(calculate_video_score(&VideoQos::new(target * 2.0)), 5.0);
        assert_eq!(calculate_video_score(&VideoQos::new(f64::INFINITY)), 5.0);
    }

    #[test]
    fn test_midrange_score() {
        let score = calculate_video_score(&VideoQos::new(100_000.0));
        assert!((score - 2.374_329_839_137_544_3).abs() < 1e-6);
    }

    #[test]
    fn test_ratio_bounds() {
        let model = VideoModelConfig::default();
        assert_eq!(quality_ratio(10_000.0, &model), None);
        assert_eq!(quality_ratio(30_000.0, &model), Some(0.0));
        assert_eq!(quality_ratio(1e9, &model), Some(1.0));
    }

    #[test]
    fn test_degenerate_model_returns_sentinel() {
        let model = VideoModelConfig::with_resolution(Resolution::new(40, 40));
        assert!(model.is_degenerate());
        assert_eq!(quality_ratio(500_000.0, &model), None);
        assert_eq!(calculate_video_score_with(&VideoQos::new(500_000.0), &model), 0.0);
    }

    #[test]
    fn test_non_positive_floor_returns_sentinel() {
        for floor in [0.0, -1.0, f64::NAN] {
            let model = VideoModelConfig {
                resolution: Resolution::new(640, 480),
                min_bitrate_bps: floor,
            };
            assert_eq!(quality_ratio(100_000.0, &model), None);
            let score = calculate_video_score_with(&VideoQos::new(100_000.0), &model);
            assert_eq!(score, VIDEO_UNUSABLE_SCORE, "floor {}", floor);
        }
    }

    #[test]
    fn test_higher_resolution_needs_more_bitrate() {
        let hd = VideoModelConfig::with_resolution(Resolution::new(1280, 720));
        let sample = VideoQos::new(997_619.18);
        let vga_score = calculate_video_score(&sample);
        let hd_score = calculate_video_score_with(&sample, &hd);
        assert!(hd_score < vga_score);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(calculate_video_score(&VideoQos::new(f64::NAN)).is_nan());
    }
}
