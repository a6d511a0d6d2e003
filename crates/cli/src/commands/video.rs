//! Video command - Score one video sample

use anyhow::Result;
use tracing::info;

use callscore_quality_core::{
    target_bitrate_for, EModelScorer, QualityScorer, SatisfactionLevel, VideoQos,
};

/// Execute video command
pub fn execute(scorer: &EModelScorer, bitrate: f64) -> Result<()> {
    let video = &scorer.config().video;
    info!(
        bitrate,
        resolution = %video.resolution,
        target = target_bitrate_for(video.resolution),
        "scoring video sample"
    );

    let mos = scorer.video_score(&VideoQos::new(bitrate));
    if bitrate < video.min_bitrate_bps {
        println!(
            "MOS: {:.3} (unusable, below {:.0}bps)",
            mos, video.min_bitrate_bps
        );
    } else {
        println!("MOS: {:.3} ({})", mos, SatisfactionLevel::from_mos(mos));
    }

    Ok(())
}
