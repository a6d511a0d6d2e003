//! Scoring configuration
//!
//! [`QualityConfig`] carries every tuning value the pipelines read, plus the
//! alerting thresholds and reporting parameters that downstream consumers
//! read. Defaults are the compiled-in table in [`crate::constants`]. A config
//! can be loaded from TOML; any field left out keeps its default.
//!
//! ```toml
//! [video.resolution]
//! width = 1280
//! height = 720
//!
//! [audio]
//! encoding_impairment = 10.0
//! ```

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bitrate::target_bitrate_for;
use crate::constants::*;
use crate::error::{QualityError, Result};

static GLOBAL_DEFAULT: Lazy<QualityConfig> = Lazy::new(QualityConfig::default);

/// Complete scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QualityConfig {
    /// E-model parameters for the audio pipeline
    pub audio: AudioModelConfig,
    /// Bitrate model parameters for the video pipeline
    pub video: VideoModelConfig,
    /// Alerting thresholds (read by consumers, not by the formulas)
    pub thresholds: QualityThresholds,
    /// Parameters of the external QoS reporting loop
    pub reporting: ReportingConfig,
}

impl QualityConfig {
    /// Process-wide read-only default configuration
    pub fn global_default() -> &'static QualityConfig {
        &GLOBAL_DEFAULT
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: QualityConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading quality configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check every tuning value, including the video degenerate case
    pub fn validate(&self) -> Result<()> {
        self.audio.validate()?;
        self.video.validate()?;
        self.thresholds.validate()?;
        self.reporting.validate()
    }
}

/// Codec family whose encoding impairment feeds the E-model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecProfile {
    /// CELT/CELP based codecs such as Opus (reference codec)
    Celt,
    /// iLBC
    Ilbc,
}

impl CodecProfile {
    /// Encoding impairment (Ie baseline) for this codec
    pub fn encoding_impairment(&self) -> f64 {
        match self {
            Self::Celt => ENCODING_IMPAIRMENT,
            Self::Ilbc => ILBC_ENCODING_IMPAIRMENT,
        }
    }
}

/// E-model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioModelConfig {
    /// Base rating R0
    pub base_rating: f64,
    /// Codec encoding impairment
    pub encoding_impairment: f64,
    /// Packet loss impact constant B
    pub loss_b: f64,
    /// Packet loss impact constant C
    pub loss_c: f64,
    /// Mouth-to-ear delay budget in milliseconds
    pub delay_budget_ms: f64,
    /// Local processing delay added to the measured latency
    pub local_delay_ms: f64,
}

impl Default for AudioModelConfig {
    fn default() -> Self {
        Self {
            base_rating: BASE_RATING,
            encoding_impairment: ENCODING_IMPAIRMENT,
            loss_b: LOSS_IMPAIRMENT_B,
            loss_c: LOSS_IMPAIRMENT_C,
            delay_budget_ms: DELAY_BUDGET_MS,
            local_delay_ms: LOCAL_AUDIO_DELAY_MS,
        }
    }
}

impl AudioModelConfig {
    /// Default model with the encoding impairment of `codec`
    pub fn for_codec(codec: CodecProfile) -> Self {
        Self::default().with_encoding_impairment(codec.encoding_impairment())
    }

    /// Override the encoding impairment
    pub fn with_encoding_impairment(mut self, impairment: f64) -> Self {
        self.encoding_impairment = impairment;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.base_rating.is_finite() || self.base_rating <= 0.0 {
            return Err(QualityError::invalid_config(format!(
                "audio.base_rating must be positive, got {}",
                self.base_rating
            )));
        }
        non_negative("audio.encoding_impairment", self.encoding_impairment)?;
        non_negative("audio.loss_b", self.loss_b)?;
        non_negative("audio.loss_c", self.loss_c)?;
        non_negative("audio.delay_budget_ms", self.delay_budget_ms)?;
        non_negative("audio.local_delay_ms", self.local_delay_ms)
    }
}

/// Video frame dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels per frame
    pub fn pixel_count(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(VIDEO_WIDTH, VIDEO_HEIGHT)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Video bitrate model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoModelConfig {
    /// Resolution the target bitrate is computed for
    pub resolution: Resolution,
    /// Video below this bitrate is scored as unusable
    pub min_bitrate_bps: f64,
}

impl Default for VideoModelConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            min_bitrate_bps: MIN_VIDEO_BITRATE_BPS,
        }
    }
}

impl VideoModelConfig {
    /// Model for a specific resolution with the default floor
    pub fn with_resolution(resolution: Resolution) -> Self {
        Self {
            resolution,
            ..Default::default()
        }
    }

    /// Whether the log ratio cannot be formed: a floor that is not positive,
    /// or a target that does not exceed the floor
    pub fn is_degenerate(&self) -> bool {
        // Negated comparisons so NaN also counts as degenerate
        !(self.min_bitrate_bps > 0.0)
            || !(target_bitrate_for(self.resolution) > self.min_bitrate_bps)
    }

    fn validate(&self) -> Result<()> {
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err(QualityError::invalid_config(format!(
                "video.resolution must be non-zero, got {}",
                self.resolution
            )));
        }
        if !self.min_bitrate_bps.is_finite() || self.min_bitrate_bps <= 0.0 {
            return Err(QualityError::invalid_config(format!(
                "video.min_bitrate_bps must be positive, got {}",
                self.min_bitrate_bps
            )));
        }
        if self.is_degenerate() {
            return Err(QualityError::DegenerateResolution {
                width: self.resolution.width,
                height: self.resolution.height,
                target_bps: target_bitrate_for(self.resolution),
                min_bps: self.min_bitrate_bps,
            });
        }
        Ok(())
    }
}

/// Alerting thresholds for downstream consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// High jitter threshold (ms)
    pub jitter_ms: f64,
    /// High round-trip time threshold (ms)
    pub rtt_ms: f64,
    /// Poor MOS threshold
    pub mos: f64,
    /// Packet loss threshold (%)
    pub packet_loss_percent: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            jitter_ms: JITTER_THRESHOLD_MS,
            rtt_ms: RTT_THRESHOLD_MS,
            mos: MOS_THRESHOLD,
            packet_loss_percent: PACKET_LOSS_THRESHOLD_PERCENT,
        }
    }
}

impl QualityThresholds {
    fn validate(&self) -> Result<()> {
        non_negative("thresholds.jitter_ms", self.jitter_ms)?;
        non_negative("thresholds.rtt_ms", self.rtt_ms)?;
        non_negative("thresholds.mos", self.mos)?;
        non_negative("thresholds.packet_loss_percent", self.packet_loss_percent)
    }
}

/// Parameters of the external QoS reporting loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Interval between QoS samples
    pub interval_ms: u64,
    /// Configured audio bitrate
    pub default_audio_bitrate_bps: u32,
    /// Retries for fetching a QoS report
    pub max_retries: u32,
    /// Audio level samples kept by the monitor
    pub max_audio_level_count: usize,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            interval_ms: STATS_INTERVAL_MS,
            default_audio_bitrate_bps: DEFAULT_AUDIO_BITRATE_BPS,
            max_retries: MAX_RETRIES,
            max_audio_level_count: MAX_AUDIO_LEVEL_COUNT,
        }
    }
}

impl ReportingConfig {
    fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(QualityError::invalid_config(
                "reporting.interval_ms must be non-zero",
            ));
        }
        Ok(())
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(QualityError::invalid_config(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = QualityConfig::default();
        assert_eq!(config.audio.base_rating, 94.2);
        assert_eq!(config.audio.delay_budget_ms, 177.3);
        assert_eq!(config.video.resolution, Resolution::new(640, 480));
        assert_eq!(config.video.min_bitrate_bps, 30000.0);
        assert_eq!(config.thresholds.rtt_ms, 400.0);
        assert_eq!(config.reporting.interval_ms, 1000);
        assert_eq!(config.reporting.max_retries, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_global_default_is_shared() {
        let a = QualityConfig::global_default();
        let b = QualityConfig::global_default();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a, &QualityConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = QualityConfig::from_toml_str(
            r#"
            [video.resolution]
            width = 1280
            height = 720

            [audio]
            encoding_impairment = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(config.video.resolution.pixel_count(), 921600.0);
        assert_eq!(config.video.min_bitrate_bps, 30000.0);
        assert_eq!(config.audio.encoding_impairment, 10.0);
        assert_eq!(config.audio.loss_b, 19.8);
        assert_eq!(config.thresholds, QualityThresholds::default());
    }

    #[test]
    fn test_rejects_degenerate_resolution() {
        let err = QualityConfig::from_toml_str(
            r#"
            [video.resolution]
            width = 40
            height = 40
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, QualityError::DegenerateResolution { width: 40, .. }));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = QualityConfig::default();
        config.audio.loss_c = -1.0;
        assert!(matches!(config.validate(), Err(QualityError::InvalidConfig { .. })));

        let mut config = QualityConfig::default();
        config.video.resolution = Resolution::new(0, 480);
        assert!(config.validate().is_err());

        let mut config = QualityConfig::default();
        config.audio.base_rating = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = QualityConfig::default();
        config.reporting.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = QualityConfig::from_toml_str("[audio\nloss_b = ").unwrap_err();
        assert!(matches!(err, QualityError::ConfigParse { .. }));
    }

    #[test]
    fn test_non_positive_floor_is_degenerate() {
        for floor in [0.0, -30000.0, f64::NAN] {
            let model = VideoModelConfig {
                min_bitrate_bps: floor,
                ..Default::default()
            };
            assert!(model.is_degenerate(), "floor {}", floor);
        }
        assert!(!VideoModelConfig::default().is_degenerate());
    }

    #[test]
    fn test_codec_profiles() {
        assert_eq!(AudioModelConfig::for_codec(CodecProfile::Celt), AudioModelConfig::default());
        assert_eq!(
            AudioModelConfig::for_codec(CodecProfile::Ilbc).encoding_impairment,
            10.0
        );
    }
}
