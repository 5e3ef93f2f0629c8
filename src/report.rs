use chrono::Utc;
use huffpack::CodecStats;
use serde::Serialize;

#[derive(Serialize)]
pub struct RunRecord<'a> {
    pub timestamp: String,
    pub command: &'a str,
    pub input: &'a str,
    pub output: Option<&'a str>,
    #[serde(flatten)]
    pub stats: &'a CodecStats,
    pub ratio: Option<f64>,
}

impl<'a> RunRecord<'a> {
    pub fn new(
        command: &'a str,
        input: &'a str,
        output: Option<&'a str>,
        stats: &'a CodecStats,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            command,
            input,
            output,
            stats,
            ratio: stats.ratio(),
        }
    }
}

/// Prints one run either as a JSON line or as a human summary.
pub fn emit(record: &RunRecord<'_>, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string(record)?);
    } else {
        println!("{}: {}", record.input, record.stats);
    }
    Ok(())
}
