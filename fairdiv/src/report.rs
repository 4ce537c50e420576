//! Result reporting (new, supplements §1's "external collaborators" note):
//! a human-readable stdout summary plus an optional `--dump-json` dump.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write report to {0}: {1}")]
    Write(String, #[source] std::io::Error),
}

/// Structured summary of one `fairdiv` run, written out with `--dump-json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub selected: Vec<usize>,
    pub diversity: f64,
    pub elapsed_seconds: f64,
    pub gamma_reached: f64,
    pub colors_used: Vec<String>,
    pub per_color_counts: HashMap<String, usize>,
}

impl SolveReport {
    pub fn new(
        selected: Vec<usize>,
        diversity: f64,
        elapsed_seconds: f64,
        gamma_reached: f64,
        colors: &[String],
    ) -> Self {
        let mut per_color_counts = HashMap::new();
        let mut colors_used = Vec::new();
        for &i in &selected {
            let label = &colors[i];
            if !per_color_counts.contains_key(label) {
                colors_used.push(label.clone());
            }
            *per_color_counts.entry(label.clone()).or_insert(0) += 1;
        }
        SolveReport {
            selected,
            diversity,
            elapsed_seconds,
            gamma_reached,
            colors_used,
            per_color_counts,
        }
    }

    /// Human-readable summary printed to stdout.
    pub fn print_summary(&self) {
        println!("selected {} points", self.selected.len());
        println!("diversity: {:.6}", self.diversity);
        println!("gamma reached: {:.6}", self.gamma_reached);
        println!("elapsed: {:.3}s", self.elapsed_seconds);
        let mut counts: Vec<_> = self.per_color_counts.iter().collect();
        counts.sort_by(|a, b| a.0.cmp(b.0));
        for (color, count) in counts {
            println!("  {color}: {count}");
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self).map_err(ReportError::Serialize)?;
        std::fs::write(path, json)
            .map_err(|e| ReportError::Write(path.display().to_string(), e))
    }
}
