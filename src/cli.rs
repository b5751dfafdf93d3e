use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "ytx")]
#[command(about = "Fetch YouTube transcripts and render them as SRT, VTT, JSON, or plain text.")]
pub struct Args {
    /// Path to config TOML (defaults to ./config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a transcript and render it
    Fetch(FetchCmd),
    /// List the caption tracks available for a video
    List(ListCmd),
    /// Print the effective default config as TOML and exit
    PrintDefaultConfig,
}

#[derive(Debug, Parser)]
pub struct FetchCmd {
    /// Video identifier (the `v=` parameter of a watch URL)
    pub video_id: String,

    /// Language codes in order of preference
    #[arg(long, value_delimiter = ',', default_value = "en")]
    pub languages: Vec<String>,

    /// Target format
    #[arg(long, value_enum, default_value = "txt")]
    pub to: Format,

    /// Machine-translate the resolved track into this language
    #[arg(long)]
    pub translate: Option<String>,

    /// Only consider manually created tracks
    #[arg(long, conflicts_with = "generated_only")]
    pub manual_only: bool,

    /// Only consider auto-generated tracks
    #[arg(long)]
    pub generated_only: bool,

    /// Output file path (defaults to <video_id>.<ext>)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Allow overwriting output file
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, Parser)]
pub struct ListCmd {
    /// Video identifier
    pub video_id: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    Srt,
    Vtt,
    Json,
    Txt,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Srt => "srt",
            Format::Vtt => "vtt",
            Format::Json => "json",
            Format::Txt => "txt",
        }
    }
}
