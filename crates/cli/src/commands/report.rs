//! Report command - Score JSON QoS reports

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use callscore_quality_core::{EModelScorer, QosSample, QualityReport, QualityScorer, RawQosReport};

#[derive(Deserialize)]
#[serde(untagged)]
enum ReportInput {
    Many(Vec<RawQosReport>),
    One(RawQosReport),
}

impl ReportInput {
    fn into_reports(self) -> Vec<RawQosReport> {
        match self {
            Self::Many(reports) => reports,
            Self::One(report) => vec![report],
        }
    }
}

/// Execute report command
pub fn execute(scorer: &EModelScorer, input: &Path) -> Result<()> {
    let text = read_input(input)?;
    for report in score_reports(scorer, &text)? {
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading reports from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("reading reports from {}", input.display()))
    }
}

fn score_reports(scorer: &EModelScorer, text: &str) -> Result<Vec<QualityReport>> {
    let input: ReportInput = serde_json::from_str(text).context("parsing QoS reports")?;
    let reports = input.into_reports();
    debug!("scoring {} QoS reports", reports.len());

    reports
        .iter()
        .enumerate()
        .map(|(index, report)| {
            let (audio, video) = report.parse().map_err(|e| {
                let reason = if e.is_input_error() {
                    "malformed QoS field"
                } else {
                    "unscorable QoS report"
                };
                warn!(index, error = %e, "{}", reason);
                anyhow::Error::new(e).context(format!("report #{}: {}", index, reason))
            })?;
            Ok(scorer.score(&QosSample::new(audio, video)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_report() {
        let scorer = EModelScorer::default();
        let reports = score_reports(
            &scorer,
            r#"{"avg_loss": "0", "latency": "0", "bitrate": "30000"}"#,
        )
        .unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].video.unwrap().mos, 1.0);
        assert!(reports[0].audio.unwrap().mos > 4.4);
    }

    #[test]
    fn test_report_array() {
        let scorer = EModelScorer::default();
        let reports = score_reports(
            &scorer,
            r#"[{"avg_loss": 0.01, "latency": 50, "bitrate": 500000},
                {"avg_loss": "0.2", "latency": "600", "bitrate": "10000"}]"#,
        )
        .unwrap();

        assert_eq!(reports.len(), 2);
        assert!(reports[0].audio.unwrap().mos > reports[1].audio.unwrap().mos);
        assert_eq!(reports[1].video.unwrap().mos, 0.0);
    }

    #[test]
    fn test_malformed_report_names_index() {
        let scorer = EModelScorer::default();
        let err = score_reports(
            &scorer,
            r#"[{"avg_loss": "0", "latency": "0", "bitrate": "1"},
                {"avg_loss": "lots", "latency": "0", "bitrate": "1"}]"#,
        )
        .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("report #1: malformed QoS field"));
        assert!(message.contains("lots"));
    }
}
