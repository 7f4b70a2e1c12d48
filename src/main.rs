// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, anyhow, Context};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use subforge::app_config::{self, Config};
use subforge::app_controller::{ConvertOutcome, Controller};
use subforge::SubtitleFormat;

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSubtitleFormat {
    Srt,
    Vtt,
    #[value(alias = "ssa")]
    Ass,
}

impl From<CliSubtitleFormat> for SubtitleFormat {
    fn from(cli_format: CliSubtitleFormat) -> Self {
        match cli_format {
            CliSubtitleFormat::Srt => SubtitleFormat::Srt,
            CliSubtitleFormat::Vtt => SubtitleFormat::Vtt,
            CliSubtitleFormat::Ass => SubtitleFormat::Ass,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a subtitle file, or every subtitle file in a directory
    Convert {
        /// Input subtitle file or directory to process
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Source format (detected from content when omitted)
        #[arg(long, value_enum)]
        from: Option<CliSubtitleFormat>,

        /// Target format (config `conversion.default_target` when omitted)
        #[arg(short, long, value_enum)]
        to: Option<CliSubtitleFormat>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Show the detected format and a cue summary of a subtitle file
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Parse as this format instead of sniffing
        #[arg(long, value_enum)]
        from: Option<CliSubtitleFormat>,
    },

    /// Apply a saved model translation reply to a subtitle file
    Apply {
        #[arg(value_name = "SUBTITLE")]
        subtitle: PathBuf,

        /// File holding the raw model reply
        #[arg(value_name = "RESPONSE")]
        response: PathBuf,

        /// Parse the reply without JSON repair
        #[arg(long)]
        strict: bool,

        /// Keep the original line above each translation
        #[arg(long)]
        bilingual: bool,

        /// Output file (defaults to `<stem>.<suffix>.<ext>` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the repaired JSON of a saved model reply
    Repair {
        #[arg(value_name = "RESPONSE")]
        response: PathBuf,
    },

    /// Turn a saved `mm:ss:ms` model transcript into a subtitle file
    Transcript {
        #[arg(value_name = "RESPONSE")]
        response: PathBuf,

        /// Output format (config `conversion.default_target` when omitted)
        #[arg(short, long, value_enum)]
        to: Option<CliSubtitleFormat>,

        /// Output file (defaults to the transcript name with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions for subforge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "subforge.json", env = "SUBFORGE_CONFIG")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subforge - subtitle conversion and model reply repair
///
/// Parses SRT, WebVTT and ASS/SSA subtitles, converts between them and
/// writes model translations and transcripts back as subtitle files.
#[derive(Parser, Debug)]
#[command(name = "subforge")]
#[command(version)]
#[command(about = "Subtitle conversion and model reply repair tool")]
#[command(long_about = "subforge parses, converts and rebuilds subtitle files and applies language model replies to them.

EXAMPLES:
    subforge convert movie.ass --to srt         # Convert a single file
    subforge convert -f /movies/ --to vtt       # Convert a directory, overwriting outputs
    subforge inspect movie.srt                  # Show format and cue summary
    subforge apply movie.ass reply.txt          # Write movie.translated.ass
    subforge apply --bilingual movie.srt r.txt  # Keep original lines above translations
    subforge repair reply.txt                   # Print the repaired JSON
    subforge transcript audio.txt --to srt      # Transcript to audio.srt
    subforge completions bash > subforge.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in subforge.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger itself passes everything; log::max_level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("✖", "\x1B[1;31m"),
            Level::Warn => ("!", "\x1B[1;33m"),
            Level::Info => (" ", "\x1B[1;32m"),
            Level::Debug => ("·", "\x1B[1;36m"),
            Level::Trace => ("…", "\x1B[1;35m"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (marker, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subforge", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cli_level) = cli.global.log_level {
        let level: app_config::LogLevel = cli_level.into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&cli.global)?;

    // If log level was not set via command line, update it from config now
    if cli.global.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command)
}

fn load_config(global: &GlobalArgs) -> Result<Config> {
    let config_path = Path::new(&global.config_path);

    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", global.config_path);
        let config = Config::default();
        config.save(config_path)
            .context(format!("Failed to write default config to file: {}", global.config_path))?;
        config
    };

    // Update log level in config if specified via command line
    if let Some(log_level) = global.log_level {
        config.log_level = log_level.into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Convert { input_path, from, to, force_overwrite } => {
            let from = from.map(SubtitleFormat::from);
            let to = to.map(SubtitleFormat::from);

            if input_path.is_file() {
                match controller.convert_file(&input_path, from, to, force_overwrite)? {
                    ConvertOutcome::Written(path) => info!("Success: {}", path.display()),
                    ConvertOutcome::Skipped(path) => info!("Skipped: {}", path.display()),
                }
            } else if input_path.is_dir() {
                let summary = controller.convert_folder(&input_path, from, to, force_overwrite)?;
                if summary.failed > 0 {
                    return Err(anyhow!("{} file(s) failed to convert", summary.failed));
                }
            } else {
                return Err(anyhow!("Input path does not exist: {:?}", input_path));
            }
        }
        Commands::Inspect { file, from } => {
            controller.inspect(&file, from.map(SubtitleFormat::from))?;
        }
        Commands::Apply { subtitle, response, strict, bilingual, output } => {
            controller.apply_translation(&subtitle, &response, strict, bilingual, output)?;
        }
        Commands::Repair { response } => {
            println!("{}", controller.repair_response(&response)?);
        }
        Commands::Transcript { response, to, output } => {
            controller.transcribe_to_file(&response, to.map(SubtitleFormat::from), output)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
