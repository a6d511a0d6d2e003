//! Audio scoring with the E-model (ITU-T G.107)
//!
//! The full model is `R = Ro - Is - Id - Ie + A`. With the signal-to-noise
//! and simultaneous impairments folded into the base rating and no advantage
//! factor this reduces to `R = 94.2 - Id - Ie`:
//!
//! - `Id` is the delay impairment, from round-trip latency plus local
//!   processing delay
//! - `Ie` is the equipment impairment, from codec encoding loss and
//!   packet loss
//!
//! R is then mapped onto the 1.0-4.5 opinion scale by the standard
//! piecewise curve.

use serde::Serialize;
use tracing::trace;

use crate::config::{AudioModelConfig, QualityConfig};
use crate::constants::{DELAY_CODEC_FACTOR, DELAY_NETWORK_FACTOR, MOS_CEILING, MOS_FLOOR};
use crate::sample::AudioQos;

/// Intermediate values of one audio score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioAssessment {
    /// Delay impairment Id
    pub delay_impairment: f64,
    /// Equipment impairment Ie
    pub loss_impairment: f64,
    /// Transmission rating R
    pub r_factor: f64,
    /// Opinion score
    pub mos: f64,
}

/// Delay impairment `Id` for a measured round-trip latency
pub fn delay_impairment(latency_ms: f64, model: &AudioModelConfig) -> f64 {
    let delay = floor_at_zero(latency_ms) + model.local_delay_ms;
    let network_excess = if delay > model.delay_budget_ms {
        delay - model.delay_budget_ms
    } else {
        0.0
    };
    DELAY_CODEC_FACTOR * delay + DELAY_NETWORK_FACTOR * network_excess
}

/// Equipment impairment `Ie` for an average loss fraction (mono streams)
pub fn loss_impairment(average_loss_fraction: f64, model: &AudioModelConfig) -> f64 {
    let loss = floor_at_zero(average_loss_fraction);
    model.encoding_impairment + model.loss_b * (1.0 + model.loss_c * loss).ln()
}

/// Transmission rating R; unbounded
pub fn r_factor(sample: &AudioQos, model: &AudioModelConfig) -> f64 {
    let id = delay_impairment(sample.latency_ms, model);
    let ie = loss_impairment(sample.average_loss_fraction, model);
    rating(model, id, ie)
}

fn rating(model: &AudioModelConfig, id: f64, ie: f64) -> f64 {
    model.base_rating - id - ie
}

/// Map an R-factor onto the opinion scale
///
/// - R < 0: 1.0
/// - 0 <= R <= 100: `1 + 0.035 R + 7.10e-6 R (R - 60) (100 - R)`
/// - R > 100: 4.5
///
/// The cubic dips to about 0.987 around R = 3.5 and only climbs back to 1.0
/// near R = 7, so its output is held to `[1.0, 4.5]` as well. NaN passes
/// through.
pub fn compute_audio_opinion_score(r: f64) -> f64 {
    if r < 0.0 {
        return MOS_FLOOR;
    }
    if r > 100.0 {
        return MOS_CEILING;
    }
    let mos = 1.0 + 0.035 * r + 7.10 / 1_000_000.0 * r * (r - 60.0) * (100.0 - r);
    mos.clamp(MOS_FLOOR, MOS_CEILING)
}

/// Score an audio sample with the default model
pub fn calculate_audio_score(sample: &AudioQos) -> f64 {
    calculate_audio_score_with(sample, &QualityConfig::global_default().audio)
}

/// Score an audio sample with `model`
pub fn calculate_audio_score_with(sample: &AudioQos, model: &AudioModelConfig) -> f64 {
    assess_audio(sample, model).mos
}

/// Score an audio sample and keep every intermediate term
pub fn assess_audio(sample: &AudioQos, model: &AudioModelConfig) -> AudioAssessment {
    let id = delay_impairment(sample.latency_ms, model);
    let ie = loss_impairment(sample.average_loss_fraction, model);
    let r = rating(model, id, ie);
    let mos = compute_audio_opinion_score(r);

    trace!(
        loss = sample.average_loss_fraction,
        latency_ms = sample.latency_ms,
        id,
        ie,
        r,
        mos,
        "audio assessment"
    );

    AudioAssessment {
        delay_impairment: id,
        loss_impairment: ie,
        r_factor: r,
        mos,
    }
}

// Negative inputs count as zero; NaN is left alone so it propagates
fn floor_at_zero(value: f64) -> f64 {
    if value < 0.0 { 0.0 } else { value }
}
