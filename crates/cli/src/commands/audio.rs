//! Audio command - Score one audio sample

use anyhow::Result;
use tracing::info;

use callscore_quality_core::{assess_audio, AudioQos, EModelScorer, SatisfactionLevel};

/// Execute audio command
pub fn execute(scorer: &EModelScorer, loss: f64, latency: f64, verbose: bool) -> Result<()> {
    info!(loss, latency, "scoring audio sample");

    let sample = AudioQos::new(loss, latency);
    let assessment = assess_audio(&sample, &scorer.config().audio);
    let level = SatisfactionLevel::from_mos(assessment.mos);

    if verbose {
        let thresholds = &scorer.config().thresholds;
        println!(
            "Packet loss:           {:.2}% (threshold {:.2}%)",
            sample.loss_percent(),
            thresholds.packet_loss_percent
        );
        println!("Id (delay impairment): {:.3}", assessment.delay_impairment);
        println!("Ie (loss impairment):  {:.3}", assessment.loss_impairment);
        println!("R-factor:              {:.3}", assessment.r_factor);
    }
    println!("MOS: {:.3} ({})", assessment.mos, level);

    Ok(())
}
