//! Scorer capability
//!
//! [`QualityScorer`] is the seam for swapping E-model variants.
//! [`EModelScorer`] is the implementation backed by the formulas in
//! [`crate::audio`] and [`crate::video`].

use serde::Serialize;
use tracing::debug;

use crate::audio::calculate_audio_score_with;
use crate::config::QualityConfig;
use crate::error::Result;
use crate::level::SatisfactionLevel;
use crate::sample::{AudioQos, QosSample, VideoQos};
use crate::video::calculate_video_score_with;

/// Opinion score of one stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreamScore {
    pub mos: f64,
    pub level: SatisfactionLevel,
}

impl StreamScore {
    pub fn new(mos: f64) -> Self {
        Self {
            mos,
            level: SatisfactionLevel::from_mos(mos),
        }
    }
}

/// Scores for every stream present in a [`QosSample`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct QualityReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<StreamScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<StreamScore>,
}

/// Converts QoS samples into opinion scores
pub trait QualityScorer: Send + Sync {
    /// Audio MOS in `[1.0, 4.5]` for in-domain input
    fn audio_score(&self, sample: &AudioQos) -> f64;

    /// Video MOS in `[1.0, 5.0]`, or the unusable sentinel below the floor
    fn video_score(&self, sample: &VideoQos) -> f64;

    /// Score every stream present in `sample`
    fn score(&self, sample: &QosSample) -> QualityReport {
        QualityReport {
            audio: sample.audio.as_ref().map(|a| StreamScore::new(self.audio_score(a))),
            video: sample.video.as_ref().map(|v| StreamScore::new(self.video_score(v))),
        }
    }
}

/// E-model audio scorer paired with the log-bitrate video scorer
#[derive(Debug, Clone, Default)]
pub struct EModelScorer {
    config: QualityConfig,
}

impl EModelScorer {
    /// Create a scorer, validating `config` first
    pub fn new(config: QualityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }
}

impl QualityScorer for EModelScorer {
    fn audio_score(&self, sample: &AudioQos) -> f64 {
        let mos = calculate_audio_score_with(sample, &self.config.audio);
        debug!(
            loss = sample.average_loss_fraction,
            latency_ms = sample.latency_ms,
            mos,
            "scored audio sample"
        );
        mos
    }

    fn video_score(&self, sample: &VideoQos) -> f64 {
        let mos = calculate_video_score_with(sample, &self.config.video);
        debug!(bitrate_bps = sample.bitrate_bps, mos, "scored video sample");
        mos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AudioModelConfig, CodecProfile, Resolution, VideoModelConfig};
    use crate::error::QualityError;

    #[test]
    fn test_default_scorer_matches_free_functions() {
        let scorer = EModelScorer::default();
        let audio = AudioQos::new(0.02, 100.0);
        let video = VideoQos::new(100_000.0);

        assert_eq!(scorer.audio_score(&audio), crate::audio::calculate_audio_score(&audio));
        assert_eq!(scorer.video_score(&video), crate::video::calculate_video_score(&video));
    }

    #[test]
    fn test_score_report() {
        let scorer = EModelScorer::default();
        let report = scorer.score(&QosSample::new(AudioQos::new(0.0, 0.0), VideoQos::new(10.0)));

        let audio = report.audio.unwrap();
        assert_eq!(audio.level, SatisfactionLevel::VerySatisfied);
        let video = report.video.unwrap();
        assert_eq!(video.mos, 0.0);
        assert_eq!(video.level, SatisfactionLevel::NotRecommended);

        let report = scorer.score(&QosSample::audio_only(AudioQos::new(0.0, 0.0)));
        assert!(report.video.is_none());
        assert_eq!(scorer.score(&QosSample::default()), QualityReport::default());
    }

    #[test]
    fn test_new_validates() {
        let mut config = QualityConfig::default();
        config.video = VideoModelConfig::with_resolution(Resolution::new(10, 10));
        assert!(matches!(
            EModelScorer::new(config),
            Err(QualityError::DegenerateResolution { .. })
        ));
    }

    #[test]
    fn test_codec_impairment_lowers_score() {
        let mut config = QualityConfig::default();
        config.audio = AudioModelConfig::for_codec(CodecProfile::Ilbc);
        let ilbc = EModelScorer::new(config).unwrap();
        let celt = EModelScorer::default();

        let sample = AudioQos::new(0.01, 50.0);
        assert!(ilbc.audio_score(&sample) < celt.audio_score(&sample));
    }

    #[test]
    fn test_scorer_as_trait_object() {
        let scorers: Vec<Box<dyn QualityScorer>> = vec![Box::new(EModelScorer::default())];
        for scorer in &scorers {
            assert_eq!(scorer.video_score(&VideoQos::new(30_000.0)), 1.0);
        }
    }
}
