//! Target bitrate command

use anyhow::Result;

use callscore_quality_core::{target_bitrate_for, QualityConfig, Resolution};

/// Execute target-bitrate command
///
/// Missing dimensions fall back to the configured resolution.
pub fn execute(config: &QualityConfig, width: Option<u32>, height: Option<u32>) -> Result<()> {
    let configured = config.video.resolution;
    let resolution = Resolution::new(
        width.unwrap_or(configured.width),
        height.unwrap_or(configured.height),
    );
    anyhow::ensure!(
        resolution.width > 0 && resolution.height > 0,
        "resolution must be non-zero, got {}",
        resolution
    );

    let target = target_bitrate_for(resolution);
    println!("{}: {:.0}bps ({:.1}kbps)", resolution, target, target / 1000.0);
    if target <= config.video.min_bitrate_bps {
        println!(
            "warning: below the {:.0}bps video floor, video at this size cannot be scored",
            config.video.min_bitrate_bps
        );
    }

    Ok(())
}
