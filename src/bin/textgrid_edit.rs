use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use textgrid_editor::annotation::interval_set::build;
use textgrid_editor::annotation::invariants::violations;
use textgrid_editor::annotation::layout::{window_overlay, SegmentLayout};
use textgrid_editor::annotation::neighborhood::current_range;
use textgrid_editor::audio::waveform::{render, WaveformBar};
use textgrid_editor::textgrid_io::{load_transcript_file, write_textgrid};
use textgrid_editor::{
    BoundaryEdit, EditorConfig, SessionBuilder, TimeRange, TracingObserver, Violation,
};
use tracing_subscriber::EnvFilter;

#[path = "textgrid_edit/audio_decode.rs"]
mod audio_decode;
#[path = "textgrid_edit/report_formatter.rs"]
mod report_formatter;

use report_formatter::{write_json, FileCheck, FileStatus, InspectReport, ValidationReport};

#[derive(Debug, Parser)]
#[command(name = "textgrid_edit")]
#[command(about = "Inspect, validate and edit word/phone TextGrids and their audio")]
struct Args {
    /// JSON editor config; missing keys take their defaults.
    #[arg(long, global = true, env = "TEXTGRID_EDITOR_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarise one transcript and list invariant violations.
    Inspect {
        transcript: PathBuf,
        #[arg(long, env = "TEXTGRID_EDITOR_OUT")]
        out: Option<PathBuf>,
    },
    /// Check every .TextGrid and .json transcript under a directory.
    Validate {
        #[arg(env = "TEXTGRID_EDITOR_DATASET_ROOT", default_value = "test-data/transcripts")]
        dir: PathBuf,
        #[arg(long, env = "TEXTGRID_EDITOR_OUT")]
        out: Option<PathBuf>,
    },
    /// Move one phone start and write the edited transcript.
    Nudge {
        transcript: PathBuf,
        #[arg(long)]
        word: usize,
        #[arg(long, default_value_t = 0)]
        phone: usize,
        /// Requested start in seconds; clamped and snapped to the grid.
        #[arg(long, allow_negative_numbers = true)]
        start: f64,
        /// Output path; `.json` writes the tier layout as JSON, anything else a TextGrid.
        #[arg(long)]
        out: PathBuf,
    },
    /// Min/max decimation of an audio range into pixel columns.
    Waveform {
        audio: PathBuf,
        #[arg(long)]
        start: f64,
        #[arg(long)]
        end: f64,
        #[arg(long, env = "TEXTGRID_EDITOR_WIDTH", default_value_t = 800)]
        width: usize,
        #[arg(long, env = "TEXTGRID_EDITOR_HEIGHT", default_value_t = 120.0)]
        height: f32,
        /// Highlight the neighborhood of this word from a transcript.
        #[arg(long, requires = "focus")]
        transcript: Option<PathBuf>,
        #[arg(long, requires = "transcript")]
        focus: Option<usize>,
        #[arg(long, env = "TEXTGRID_EDITOR_OUT")]
        out: Option<PathBuf>,
    },
    /// Cut a range out of an audio file with faded edges and write it as WAV.
    Clip {
        audio: PathBuf,
        #[arg(long)]
        start: f64,
        #[arg(long)]
        end: f64,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct NudgeSummary {
    edit: BoundaryEdit,
    violations: Vec<Violation>,
    out: String,
}

#[derive(Debug, Serialize)]
struct WaveformOutput {
    range: TimeRange,
    width: usize,
    height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    overlay: Option<SegmentLayout>,
    bars: Vec<WaveformBar>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let config = match args.config.as_deref() {
        Some(path) => EditorConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => EditorConfig::default(),
    };

    match args.command {
        Command::Inspect { transcript, out } => inspect(&config, &transcript, out.as_deref()),
        Command::Validate { dir, out } => validate(&config, &dir, out.as_deref()),
        Command::Nudge {
            transcript,
            word,
            phone,
            start,
            out,
        } => nudge(config, &transcript, word, phone, start, &out),
        Command::Waveform {
            audio,
            start,
            end,
            width,
            height,
            transcript,
            focus,
            out,
        } => {
            let neighborhood = match (transcript, focus) {
                (Some(path), Some(focus)) => Some(focus_range(config, &path, focus)?),
                _ => None,
            };
            waveform(
                &audio,
                TimeRange::new(start, end),
                width,
                height,
                neighborhood,
                out.as_deref(),
            )
        }
        Command::Clip {
            audio,
            start,
            end,
            out,
        } => clip(config, &audio, TimeRange::new(start, end), &out),
    }
}

fn inspect(config: &EditorConfig, path: &Path, out: Option<&Path>) -> Result<(), String> {
    let raw = load_transcript_file(path).map_err(|err| describe(path, err))?;
    let words = build(&raw, config).map_err(|err| describe(path, err))?;
    let found = violations(&words, config);
    write_json(out, &InspectReport::new(path, &raw, &words, found))
}

fn validate(config: &EditorConfig, dir: &Path, out: Option<&Path>) -> Result<(), String> {
    let mut paths = Vec::new();
    collect_transcript_files(dir, &mut paths)?;
    paths.sort();
    if paths.is_empty() {
        return Err(format!("No transcripts found in '{}'.", dir.display()));
    }

    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut checks = Vec::with_capacity(paths.len());
    for path in &paths {
        progress.set_message(
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
        checks.push(check_file(config, path));
        progress.inc(1);
    }
    progress.finish_with_message("done");

    let report = ValidationReport::new(checks);
    let failed = report.failed;
    let checked = report.checked;
    write_json(out, &report)?;
    if failed > 0 {
        return Err(format!("{failed} of {checked} transcript(s) failed validation."));
    }
    Ok(())
}

fn check_file(config: &EditorConfig, path: &Path) -> FileCheck {
    let display = path.display().to_string();
    let built = load_transcript_file(path).and_then(|raw| build(&raw, config));
    match built {
        Ok(words) => {
            let found = violations(&words, config);
            let status = if found.is_empty() {
                FileStatus::Ok
            } else {
                let display_path = display.as_str();
                tracing::warn!(path = display_path, count = found.len(), "validate: violations");
                FileStatus::Violations
            };
            FileCheck {
                path: display,
                status,
                word_count: words.len(),
                violations: found,
                error: None,
            }
        }
        Err(err) => FileCheck {
            path: display,
            status: FileStatus::Error,
            word_count: 0,
            violations: Vec::new(),
            error: Some(err.to_string()),
        },
    }
}

fn nudge(
    config: EditorConfig,
    path: &Path,
    word: usize,
    phone: usize,
    start: f64,
    out: &Path,
) -> Result<(), String> {
    let raw = load_transcript_file(path).map_err(|err| describe(path, err))?;
    let mut session = SessionBuilder::new(config)
        .with_observer(Box::new(TracingObserver))
        .build()
        .map_err(|err| err.to_string())?;
    session.load(raw).map_err(|err| describe(path, err))?;
    let edit = session
        .set_phone_start(word, phone, start)
        .map_err(|err| err.to_string())?;
    let found = violations(session.words(), session.config());

    let exported = session
        .export()
        .ok_or_else(|| "internal error: session has no transcript".to_string())?;
    let is_json = out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        write_json(Some(out), &exported)?;
    } else {
        write_textgrid(out, &exported).map_err(|err| describe(out, err))?;
    }

    write_json(
        None,
        &NudgeSummary {
            edit,
            violations: found,
            out: out.display().to_string(),
        },
    )
}

/// Neighborhood around any word, edges included; the interactive session
/// refuses to focus the first and last word.
fn focus_range(config: EditorConfig, path: &Path, focus: usize) -> Result<TimeRange, String> {
    let raw = load_transcript_file(path).map_err(|err| describe(path, err))?;
    let words = build(&raw, &config).map_err(|err| describe(path, err))?;
    current_range(&words, focus, config.word_margin).map_err(|err| describe(path, err))
}

fn waveform(
    audio: &Path,
    range: TimeRange,
    width: usize,
    height: f32,
    neighborhood: Option<TimeRange>,
    out: Option<&Path>,
) -> Result<(), String> {
    let buffer = audio_decode::read_audio(audio)?;
    let bars = render(&buffer, range, width, height).map_err(|err| err.to_string())?;
    let overlay = neighborhood.and_then(|window| window_overlay(range, window));
    write_json(
        out,
        &WaveformOutput {
            range,
            width,
            height,
            overlay,
            bars,
        },
    )
}

fn clip(config: EditorConfig, audio: &Path, range: TimeRange, out: &Path) -> Result<(), String> {
    let buffer = audio_decode::read_audio(audio)?;
    let session = SessionBuilder::new(config)
        .build()
        .map_err(|err| err.to_string())?;
    let plan = session.playback_plan(range).map_err(|err| err.to_string())?;
    let clip = plan.render(&buffer).map_err(|err| err.to_string())?;
    audio_decode::write_wav(out, &clip)?;
    tracing::info!(
        out = %out.display(),
        frames = clip.frames(),
        play_duration = plan.play_duration,
        "clip: written"
    );
    Ok(())
}

fn collect_transcript_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries = fs::read_dir(dir)
        .map_err(|err| format!("Failed to read directory '{}': {err}", dir.display()))?;
    for entry in entries {
        let entry = entry
            .map_err(|err| format!("Failed to read entry in '{}': {err}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            collect_transcript_files(&path, out)?;
            continue;
        }
        let is_transcript = path.extension().is_some_and(|ext| {
            ext.eq_ignore_ascii_case("TextGrid") || ext.eq_ignore_ascii_case("json")
        });
        if is_transcript {
            out.push(path);
        }
    }
    Ok(())
}

fn describe(path: &Path, err: textgrid_editor::AnnotationError) -> String {
    format!("'{}': {err}", path.display())
}
