pub mod csv;
pub mod json;

use crate::analyzer::Analysis;
use crate::error::Result;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Outcome of analyzing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file_path: String,
    pub file_name: String,
    pub frame_count: u64,
    pub bytes_total: u64,
    pub tag_length: Option<u64>,
    pub error: Option<String>,
}

impl FileReport {
    pub fn from_analysis<P: AsRef<Path>>(path: P, analysis: Analysis) -> Self {
        let (file_path, file_name) = names(path.as_ref());
        Self {
            file_path,
            file_name,
            frame_count: analysis.frame_count,
            bytes_total: analysis.bytes_total,
            tag_length: analysis.tag_length,
            error: None,
        }
    }

    pub fn failed<P: AsRef<Path>, E: fmt::Display>(path: P, error: E) -> Self {
        let (file_path, file_name) = names(path.as_ref());
        Self {
            file_path,
            file_name,
            frame_count: 0,
            bytes_total: 0,
            tag_length: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

fn names(path: &Path) -> (String, String) {
    let file_path = path.display().to_string();
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.clone());
    (file_path, file_name)
}

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, results: &[FileReport]) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "json" => json::write(&mut file, results),
        _ => csv::write(&mut file, results).map_err(Into::into),
    }
}

/// Summary statistics for a batch of results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub analyzed: usize,
    pub failed: usize,
    /// Frames across all successfully analyzed files
    pub frames: u64,
}

impl Summary {
    pub fn from_results(results: &[FileReport]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };

        for r in results {
            if r.is_error() {
                summary.failed += 1;
            } else {
                summary.analyzed += 1;
                summary.frames += r.frame_count;
            }
        }

        summary
    }
}
