//! Target bitrate model
//!
//! Maps a frame size to the bitrate a healthy encoder should reach at 30 fps.
//! The curve is a power-law fit of reference encoder configurations
//! (r^2 = 0.98); frame rate is baked into the fit and is not a parameter.

use tracing::trace;

use crate::config::Resolution;
use crate::constants::{TARGET_BITRATE_EXPONENT, TARGET_BITRATE_SCALE};

/// Expected bitrate in bps for a frame of `pixel_count` pixels.
///
/// Undefined for `pixel_count <= 0`.
pub fn compute_target_bitrate(pixel_count: f64) -> f64 {
    let exponent = TARGET_BITRATE_SCALE * pixel_count.log10().powf(TARGET_BITRATE_EXPONENT);
    let target = 10f64.powf(exponent);
    trace!(pixel_count, target, "computed target bitrate");
    target
}

/// Expected bitrate in bps for `resolution`
pub fn target_bitrate_for(resolution: Resolution) -> f64 {
    compute_target_bitrate(resolution.pixel_count())
}
