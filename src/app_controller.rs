use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{convert_subtitle, parse_subtitle, render_subtitles, SubtitleFormat, Timestamp};
use crate::transcription::parse_transcription;
use crate::translation::{
    apply_translations, merge_translated, parse_translation_array_strict, parse_translation_json, repair_json,
};

// @module: Application controller for subtitle processing

/// What happened to a single input during conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    Written(PathBuf),
    /// Output already existed and overwriting was not allowed
    Skipped(PathBuf),
}

/// Counts reported after converting a directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Cue summary of a subtitle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub format: SubtitleFormat,
    pub cue_count: usize,
    pub first_start: Option<Timestamp>,
    pub last_end: Option<Timestamp>,
    pub actors: Vec<String>,
}

/// Main application controller for subtitle processing
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert one subtitle file next to the input.
    ///
    /// The source format is sniffed when `from` is not given; the target
    /// falls back to the configured default. Converting a file to its own
    /// format writes `<stem>.converted.<ext>` instead of replacing it.
    pub fn convert_file(
        &self,
        input_file: &Path,
        from: Option<SubtitleFormat>,
        to: Option<SubtitleFormat>,
        force_overwrite: bool,
    ) -> Result<ConvertOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let from = match from {
            Some(format) => format,
            None => FileManager::detect_format_from_path(input_file)?
                .ok_or_else(|| anyhow!("Could not detect subtitle format of {:?}", input_file))?,
        };
        let to = to.unwrap_or(self.config.conversion.default_target);

        let output_dir = input_file.parent().unwrap_or(Path::new("."));
        let suffix = if from == to { Some("converted") } else { None };
        let output_path = FileManager::generate_output_path(input_file, output_dir, suffix, to.extension());

        if output_path.exists() && !(force_overwrite || self.config.conversion.overwrite) {
            warn!("Skipping file, output already exists (use -f to force overwrite): {}", output_path.display());
            return Ok(ConvertOutcome::Skipped(output_path));
        }

        let content = FileManager::read_to_string(input_file)?;
        let converted = convert_subtitle(&content, from, to)
            .with_context(|| format!("Failed to convert {:?} from {} to {}", input_file, from, to))?;
        FileManager::write_to_file(&output_path, &converted)?;

        debug!("Converted {} -> {}", input_file.display(), output_path.display());
        Ok(ConvertOutcome::Written(output_path))
    }

    /// Convert every subtitle file below a directory. Files already in the
    /// target format are left alone; failures are logged and counted.
    pub fn convert_folder(
        &self,
        input_dir: &Path,
        from: Option<SubtitleFormat>,
        to: Option<SubtitleFormat>,
        force_overwrite: bool,
    ) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let target = to.unwrap_or(self.config.conversion.default_target);
        let files: Vec<PathBuf> = FileManager::find_subtitle_files(input_dir)?
            .into_iter()
            .filter(|path| FileManager::format_from_extension(path) != Some(target))
            .collect();

        if files.is_empty() {
            return Err(anyhow!("No subtitle files to convert in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Converting files");

        let mut summary = FolderSummary::default();

        for file in &files {
            let file_name = file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Converting: {}", file_name));

            match self.convert_file(file, from, Some(target), force_overwrite) {
                Ok(ConvertOutcome::Written(_)) => summary.converted += 1,
                Ok(ConvertOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        info!(
            "Folder processing completed: {} converted, {} skipped, {} errors in {}",
            summary.converted,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Parse a subtitle file and summarise its cues
    pub fn inspect(&self, input_file: &Path, from: Option<SubtitleFormat>) -> Result<InspectReport> {
        let content = FileManager::read_to_string(input_file)?;
        let output = parse_subtitle(&content, from)
            .with_context(|| format!("Failed to parse subtitle file: {:?}", input_file))?;

        let mut actors: Vec<String> = Vec::new();
        for subtitle in &output.subtitles {
            if !subtitle.actor.is_empty() && !actors.contains(&subtitle.actor) {
                actors.push(subtitle.actor.clone());
            }
        }

        let report = InspectReport {
            format: output.parsed.format(),
            cue_count: output.subtitles.len(),
            first_start: output.subtitles.first().map(|s| s.start()),
            last_end: output.subtitles.last().map(|s| s.end()),
            actors,
        };

        info!("{}: {} with {} cues", input_file.display(), report.format, report.cue_count);
        if let (Some(first), Some(last)) = (report.first_start, report.last_end) {
            info!("Span: {} - {}", first, last);
        }
        if !report.actors.is_empty() {
            info!("Actors: {}", report.actors.join(", "));
        }
        if let Ok(document) = output.parsed.ass_document() {
            debug!("ASS events: {}, dialogue: {}", document.events.len(), document.events.iter().filter(|e| e.is_dialogue()).count());
        }

        Ok(report)
    }

    /// Apply a saved model translation reply to a subtitle file and write the
    /// translated document in the subtitle's own format
    pub fn apply_translation(
        &self,
        subtitle_file: &Path,
        response_file: &Path,
        strict: bool,
        bilingual: bool,
        output: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let content = FileManager::read_to_string(subtitle_file)?;
        let parsed = parse_subtitle(&content, None)
            .with_context(|| format!("Failed to parse subtitle file: {:?}", subtitle_file))?;

        let response = FileManager::read_to_string(response_file)?;
        let parsed_reply = if strict || self.config.translation.strict_json {
            parse_translation_array_strict(&response)
        } else {
            parse_translation_json(&response)
        };
        let deltas = parsed_reply
            .with_context(|| format!("Failed to read translation reply: {:?}", response_file))?;

        let translated = apply_translations(&parsed.subtitles, &deltas);
        let missing = translated.iter().filter(|t| t.translated.trim().is_empty()).count();
        if missing > 0 {
            warn!("{} of {} cues have no translation; keeping the original text", missing, translated.len());
        }

        let merged = merge_translated(&translated, &parsed.parsed, bilingual || self.config.translation.bilingual);

        let output_path = match output {
            Some(path) => path,
            None => FileManager::generate_output_path(
                subtitle_file,
                subtitle_file.parent().unwrap_or(Path::new(".")),
                Some(self.config.translation.output_suffix.as_str()),
                parsed.parsed.format().extension(),
            ),
        };
        FileManager::write_to_file(&output_path, &merged)?;

        info!("Success: {}", output_path.display());
        Ok(output_path)
    }

    /// Turn a saved model transcript into a subtitle file
    pub fn transcribe_to_file(
        &self,
        response_file: &Path,
        to: Option<SubtitleFormat>,
        output: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let response = FileManager::read_to_string(response_file)?;
        let subtitles = parse_transcription(&response)
            .with_context(|| format!("Failed to parse transcript: {:?}", response_file))?;

        let format = to.unwrap_or(self.config.conversion.default_target);
        let output_path = match output {
            Some(path) => path,
            None => FileManager::generate_output_path(
                response_file,
                response_file.parent().unwrap_or(Path::new(".")),
                None,
                format.extension(),
            ),
        };

        FileManager::write_to_file(&output_path, &render_subtitles(&subtitles, format))?;
        info!("Success: {} ({} cues)", output_path.display(), subtitles.len());
        Ok(output_path)
    }

    /// Repaired JSON envelope for a saved model reply
    pub fn repair_response(&self, response_file: &Path) -> Result<String> {
        let response = FileManager::read_to_string(response_file)?;
        Ok(repair_json(&response))
    }

    /// Format a duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
