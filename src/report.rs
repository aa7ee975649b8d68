use crate::inspector::{ScanCounts, ScanRow};
use crate::summary::SummaryOutcome;
use serde_json::Value as Json;
use std::io::{self, Write};

/// Everything one inspection observed
#[derive(Debug, Default)]
pub struct Report {
    pub latest_scan: Option<ScanRow>,
    pub counts: Option<ScanCounts>,
    pub summary: Option<SummaryOutcome>,
}

impl Report {
    /// Write the labeled report lines
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.latest_scan {
            Some(scan) => writeln!(out, "lastScan: {scan}")?,
            None => writeln!(out, "lastScan: None")?,
        }
        if let Some(counts) = &self.counts {
            writeln!(out, "apps: {}", counts.apps)?;
            writeln!(out, "files: {}", counts.files)?;
            writeln!(
                out,
                "downloads: total={} done={}",
                counts.downloads.total, counts.downloads.done
            )?;
        }
        if let Some(outcome) = &self.summary {
            match outcome {
                SummaryOutcome::Parsed(map) => {
                    writeln!(out, "summary keys: {:?}", outcome.keys())?;
                    writeln!(out, "summary: {}", Json::Object(map.clone()))?;
                }
                SummaryOutcome::Failed(e) => writeln!(out, "summary parse error: {e}")?,
            }
        }
        Ok(())
    }
}
