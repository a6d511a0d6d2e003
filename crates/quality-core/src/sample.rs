//! QoS samples and the ingestion boundary
//!
//! The scoring pipelines take strongly typed samples. The external monitor
//! delivers its per-stream report with numbers encoded as strings, so
//! [`RawQosReport`] is where text turns into numbers, either strictly
//! ([`RawQosReport::parse`]) or with NaN propagation for malformed fields
//! ([`RawQosReport::parse_lossy`]).

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{QualityError, Result};

/// Audio stream snapshot for one reporting interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioQos {
    /// Average packet loss as a fraction (0.0-1.0), not a percentage
    pub average_loss_fraction: f64,
    /// Round-trip time in milliseconds
    pub latency_ms: f64,
}

impl AudioQos {
    pub fn new(average_loss_fraction: f64, latency_ms: f64) -> Self {
        Self {
            average_loss_fraction,
            latency_ms,
        }
    }

    /// Loss as a percentage, the unit of the packet loss threshold
    pub fn loss_percent(&self) -> f64 {
        self.average_loss_fraction * 100.0
    }
}

/// Video stream snapshot for one reporting interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoQos {
    /// Achieved bitrate in bits per second
    pub bitrate_bps: f64,
}

impl VideoQos {
    pub fn new(bitrate_bps: f64) -> Self {
        Self { bitrate_bps }
    }
}

/// Per-session snapshot; either stream may be absent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QosSample {
    pub audio: Option<AudioQos>,
    pub video: Option<VideoQos>,
}

impl QosSample {
    pub fn new(audio: AudioQos, video: VideoQos) -> Self {
        Self {
            audio: Some(audio),
            video: Some(video),
        }
    }

    pub fn audio_only(audio: AudioQos) -> Self {
        Self {
            audio: Some(audio),
            video: None,
        }
    }

    pub fn video_only(video: VideoQos) -> Self {
        Self {
            audio: None,
            video: Some(video),
        }
    }
}

/// Stream report as delivered by the external QoS monitor
///
/// Fields may arrive as JSON strings (`"0.02"`) or numbers (`0.02`).
/// Missing fields deserialize as empty text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawQosReport {
    /// Average loss fraction
    #[serde(default, deserialize_with = "text_or_number")]
    pub avg_loss: String,
    /// Round-trip latency in milliseconds
    #[serde(default, deserialize_with = "text_or_number")]
    pub latency: String,
    /// Bitrate in bits per second
    #[serde(default, deserialize_with = "text_or_number")]
    pub bitrate: String,
}

impl RawQosReport {
    pub fn new(
        avg_loss: impl Into<String>,
        latency: impl Into<String>,
        bitrate: impl Into<String>,
    ) -> Self {
        Self {
            avg_loss: avg_loss.into(),
            latency: latency.into(),
            bitrate: bitrate.into(),
        }
    }

    /// Parse every field, rejecting malformed or out-of-domain values
    pub fn parse(&self) -> Result<(AudioQos, VideoQos)> {
        let loss = parse_field("avg_loss", &self.avg_loss)?;
        if loss > 1.0 {
            return Err(QualityError::out_of_range("avg_loss", loss));
        }
        let latency = parse_field("latency", &self.latency)?;
        let bitrate = parse_field("bitrate", &self.bitrate)?;

        Ok((AudioQos::new(loss, latency), VideoQos::new(bitrate)))
    }

    /// Parse every field, turning unparsable text into NaN
    ///
    /// NaN then propagates through the pipelines into a NaN score.
    pub fn parse_lossy(&self) -> (AudioQos, VideoQos) {
        let loss = parse_or_nan(&self.avg_loss);
        let latency = parse_or_nan(&self.latency);
        let bitrate = parse_or_nan(&self.bitrate);
        (AudioQos::new(loss, latency), VideoQos::new(bitrate))
    }
}

fn parse_field(field: &'static str, text: &str) -> Result<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| QualityError::malformed_field(field, text))?;
    if !value.is_finite() || value < 0.0 {
        return Err(QualityError::out_of_range(field, value));
    }
    Ok(value)
}

fn parse_or_nan(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(f64),
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
    })
}
