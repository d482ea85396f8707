use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use textgrid_editor::annotation::timing::format_seconds;
use textgrid_editor::{RawTranscript, Violation, Word};

#[derive(Debug, Serialize)]
pub struct WordSummary {
    pub index: usize,
    pub text: String,
    pub start: f64,
    pub end: f64,
    /// `mm:ss` / `hh:mm:ss` label of the start.
    pub at: String,
    pub phones: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub generated_at: String,
    pub source: String,
    pub xmin: f64,
    pub xmax: f64,
    pub tiers: Vec<String>,
    pub word_count: usize,
    pub phone_count: usize,
    pub words: Vec<WordSummary>,
    pub violations: Vec<Violation>,
}

impl InspectReport {
    pub fn new(source: &Path, raw: &RawTranscript, words: &[Word], violations: Vec<Violation>) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            source: source.display().to_string(),
            xmin: raw.xmin,
            xmax: raw.xmax,
            tiers: raw.tiers.iter().map(|tier| tier.name.clone()).collect(),
            word_count: words.len(),
            phone_count: words.iter().map(|word| word.phones.len()).sum(),
            words: words
                .iter()
                .map(|word| WordSummary {
                    index: word.index,
                    text: word.text.clone(),
                    start: word.start,
                    end: word.end,
                    at: format_seconds(word.start),
                    phones: word.phones.iter().map(|phone| phone.text.clone()).collect(),
                })
                .collect(),
            violations,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Ok,
    Violations,
    Error,
}

#[derive(Debug, Serialize)]
pub struct FileCheck {
    pub path: String,
    pub status: FileStatus,
    pub word_count: usize,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub generated_at: String,
    pub checked: usize,
    pub failed: usize,
    pub files: Vec<FileCheck>,
}

impl ValidationReport {
    pub fn new(files: Vec<FileCheck>) -> Self {
        let failed = files
            .iter()
            .filter(|file| !matches!(file.status, FileStatus::Ok))
            .count();
        Self {
            generated_at: Utc::now().to_rfc3339(),
            checked: files.len(),
            failed,
            files,
        }
    }
}

/// Writes `value` as pretty JSON to `path`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(path: Option<&Path>, value: &T) -> Result<(), String> {
    let Some(path) = path else {
        let text = serde_json::to_string_pretty(value)
            .map_err(|err| format!("Failed to serialize report JSON: {err}"))?;
        println!("{text}");
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create report output directory '{}': {err}",
                parent.display()
            )
        })?;
    }
    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create report file '{}': {err}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, value).map_err(|err| {
        format!(
            "Failed to serialize report JSON '{}': {err}",
            path.display()
        )
    })?;
    file.write_all(b"\n")
        .map_err(|err| format!("Failed to finalize report file '{}': {err}", path.display()))?;
    Ok(())
}
