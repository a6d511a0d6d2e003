//! Compiled-in tuning table
//!
//! These are the reference values every scoring pipeline is calibrated
//! against. [`crate::config::QualityConfig::default`] is built from them.

/// Assumed client video width in pixels
pub const VIDEO_WIDTH: u32 = 640;
/// Assumed client video height in pixels
pub const VIDEO_HEIGHT: u32 = 480;

/// Nominal QoS reporting interval
pub const STATS_INTERVAL_MS: u64 = 1000;
/// Video below this bitrate is judged unusable
pub const MIN_VIDEO_BITRATE_BPS: f64 = 30000.0;
/// Local audio processing delay added to the network latency (one 20 ms frame)
pub const LOCAL_AUDIO_DELAY_MS: f64 = 20.0;
/// Default configured audio bitrate
pub const DEFAULT_AUDIO_BITRATE_BPS: u32 = 48000;

// Downstream alerting thresholds. The formulas never read these.

/// Jitter threshold in milliseconds
pub const JITTER_THRESHOLD_MS: f64 = 30.0;
/// Round-trip time threshold in milliseconds
pub const RTT_THRESHOLD_MS: f64 = 400.0;
/// Opinion score threshold
pub const MOS_THRESHOLD: f64 = 3.5;
/// Packet loss threshold in percent (not a fraction)
pub const PACKET_LOSS_THRESHOLD_PERCENT: f64 = 1.0;

/// Retry budget for the external QoS fetcher
pub const MAX_RETRIES: u32 = 3;
/// Number of audio level samples the external monitor keeps
pub const MAX_AUDIO_LEVEL_COUNT: usize = 20;

// E-model (ITU-T G.107) constants

/// Base rating R0 with signal/noise impairments and advantage factor taken as zero
pub const BASE_RATING: f64 = 94.2;
/// Encoding impairment of the reference codec (CELT/CELP)
pub const ENCODING_IMPAIRMENT: f64 = 0.0;
/// Encoding impairment of iLBC
pub const ILBC_ENCODING_IMPAIRMENT: f64 = 10.0;
/// Packet loss impact constant B for CELT/CELP codecs
pub const LOSS_IMPAIRMENT_B: f64 = 19.8;
/// Packet loss impact constant C for CELT/CELP codecs
pub const LOSS_IMPAIRMENT_C: f64 = 29.7;
/// Mouth-to-ear delay budget for VoIP streams
pub const DELAY_BUDGET_MS: f64 = 177.3;
/// Per-millisecond codec delay impairment
pub const DELAY_CODEC_FACTOR: f64 = 0.024;
/// Per-millisecond impairment for delay beyond the budget
pub const DELAY_NETWORK_FACTOR: f64 = 0.11;

/// Lowest opinion score on the ITU curve (R < 0)
pub const MOS_FLOOR: f64 = 1.0;
/// Practical ceiling of the ITU curve (R > 100)
pub const MOS_CEILING: f64 = 4.5;

// Resolution to bitrate power-law fit (r^2 = 0.98, 30 fps assumed)

/// Scale applied to `log10(pixels)^exponent`
pub const TARGET_BITRATE_SCALE: f64 = 2.069924867;
/// Exponent applied to `log10(pixels)`
pub const TARGET_BITRATE_EXPONENT: f64 = 0.6250223771;

/// Video score reported below the minimum bitrate. Off the 1-5 scale on purpose.
pub const VIDEO_UNUSABLE_SCORE: f64 = 0.0;
