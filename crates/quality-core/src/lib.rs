//! # Quality-Core: Perceptual Quality Scoring for Call Streams
//!
//! Turns periodic QoS samples of a real-time call into Mean Opinion Scores:
//!
//! - **Audio**: packet loss and round-trip latency go through the E-model
//!   (ITU-T G.107) to an R-factor, mapped onto a 1.0-4.5 MOS
//! - **Video**: achieved bitrate is compared on a log scale with a target
//!   bitrate derived from the resolution, mapped onto a 1.0-5.0 MOS
//!
//! Every scoring function is pure: no state, no I/O, safe to call from any
//! number of threads. Errors only arise when loading configuration or
//! parsing string-typed reports.
//!
//! ## Usage
//!
//! ```rust
//! use callscore_quality_core::{calculate_audio_score, calculate_video_score, AudioQos, VideoQos};
//!
//! let audio_mos = calculate_audio_score(&AudioQos::new(0.02, 100.0));
//! assert!(audio_mos > 4.0 && audio_mos < 4.5);
//!
//! let video_mos = calculate_video_score(&VideoQos::new(250_000.0));
//! assert!(video_mos > 1.0 && video_mos < 5.0);
//! ```
//!
//! With a custom configuration and the scorer capability:
//!
//! ```rust
//! use callscore_quality_core::{EModelScorer, QualityConfig, QualityScorer, RawQosReport, QosSample};
//!
//! let config = QualityConfig::from_toml_str("[video.resolution]\nwidth = 1280\nheight = 720\n")?;
//! let scorer = EModelScorer::new(config)?;
//!
//! let (audio, video) = RawQosReport::new("0.01", "80", "1500000").parse()?;
//! let report = scorer.score(&QosSample::new(audio, video));
//! assert!(report.video.unwrap().mos < 5.0);
//! # Ok::<(), callscore_quality_core::QualityError>(())
//! ```

pub mod audio;
pub mod bitrate;
pub mod config;
pub mod constants;
pub mod error;
pub mod level;
pub mod sample;
pub mod scorer;
pub mod video;

pub use audio::{
    assess_audio, calculate_audio_score, calculate_audio_score_with, compute_audio_opinion_score,
    r_factor, AudioAssessment,
};
pub use bitrate::{compute_target_bitrate, target_bitrate_for};
pub use config::{
    AudioModelConfig, CodecProfile, QualityConfig, QualityThresholds, ReportingConfig,
    Resolution, VideoModelConfig,
};
pub use error::{QualityError, Result};
pub use level::SatisfactionLevel;
pub use sample::{AudioQos, QosSample, RawQosReport, VideoQos};
pub use scorer::{EModelScorer, QualityReport, QualityScorer, StreamScore};
pub use video::{
    calculate_video_score, calculate_video_score_with, compute_video_opinion_score, quality_ratio,
};
