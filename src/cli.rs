use clap::{Args, Parser, Subcommand};
use easytools::{CaseStyle, Voice};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "easytools")]
#[command(about = "Single-purpose PDF, audio and text utilities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output directory for generated files
    #[arg(short, long, global = true, default_value = "./output")]
    pub output: PathBuf,

    /// Overwrite existing output files
    #[arg(long, global = true)]
    pub force: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a page-range expression into page numbers
    Pages(PagesArgs),

    /// Extract selected pages from a PDF into a new file
    SplitPdf(SplitPdfArgs),

    /// Combine several PDFs into one
    MergePdf(MergePdfArgs),

    /// Wrap raw 16-bit PCM in a WAV container, or inspect a WAV header
    Wav(WavArgs),

    /// Generate speech from text with the hosted AI model
    Speak(SpeakArgs),

    /// Text utilities
    Text(TextArgs),

    /// Generate a random password
    Password(PasswordArgs),

    /// Pick a random name from a list, one name per line
    Pick(PickArgs),
}

#[derive(Args)]
pub struct PagesArgs {
    /// Page-range expression, e.g. "1-3, 5, 8-10"
    #[arg(value_name = "EXPRESSION")]
    pub expression: String,

    /// Total number of pages to validate against
    #[arg(long, conflicts_with = "pdf", required_unless_present = "pdf")]
    pub max_pages: Option<usize>,

    /// Take the page count from this PDF
    #[arg(long, value_name = "FILE")]
    pub pdf: Option<PathBuf>,

    /// Write the selection as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SplitPdfArgs {
    /// Source PDF
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Pages to extract; defaults to every page
    #[arg(short, long, value_name = "EXPRESSION")]
    pub pages: Option<String>,

    /// Wait up to this many seconds for the input file to appear
    #[arg(long, value_name = "SECS")]
    pub wait: Option<u64>,
}

#[derive(Args)]
pub struct MergePdfArgs {
    /// PDFs to combine, in order
    #[arg(required = true, num_args = 2.., value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Name of the merged file
    #[arg(long, default_value = easytools::services::pdf::MERGED_FILE_NAME)]
    pub name: String,

    /// Wait up to this many seconds for each input file to appear
    #[arg(long, value_name = "SECS")]
    pub wait: Option<u64>,
}

#[derive(Args)]
pub struct WavArgs {
    /// Raw PCM file (or WAV file with --inspect)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Treat the input as base64 text rather than raw bytes
    #[arg(long)]
    pub base64: bool,

    /// Print the header of an existing WAV file instead of encoding
    #[arg(long, conflicts_with = "base64")]
    pub inspect: bool,

    /// Sample rate of the PCM data
    #[arg(long, default_value = "24000")]
    pub sample_rate: u32,

    /// Channel count of the PCM data
    #[arg(long, default_value = "1")]
    pub channels: u16,

    /// Print the inspected header as JSON
    #[arg(long, requires = "inspect")]
    pub json: bool,
}

#[derive(Args)]
pub struct SpeakArgs {
    /// Text to speak (at most 500 characters)
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Voice to use
    #[arg(long, value_enum, default_value_t = Voice::Kore)]
    pub voice: Voice,

    /// Override the speech model
    #[arg(long)]
    pub model: Option<String>,

    /// Name of the generated file
    #[arg(long, default_value = "speech.wav")]
    pub name: String,
}

#[derive(Args)]
pub struct TextArgs {
    #[command(subcommand)]
    pub command: TextCommands,
}

#[derive(Subcommand)]
pub enum TextCommands {
    /// Count words, characters, sentences and paragraphs
    Stats(TextInput),

    /// Convert letter case
    Case {
        #[command(flatten)]
        input: TextInput,

        /// Target style
        #[arg(long, value_enum)]
        style: CaseStyle,
    },

    /// Collapse repeated spaces and blank lines
    Clean(TextInput),

    /// Reverse the text
    Reverse(TextInput),
}

#[derive(Args)]
pub struct TextInput {
    /// Text to process; reads --file when omitted
    #[arg(value_name = "TEXT", required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the text from this file
    #[arg(long, value_name = "FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PasswordArgs {
    /// Password length (8-32)
    #[arg(short, long, default_value = "16")]
    pub length: usize,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_numbers: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,
}

#[derive(Args)]
pub struct PickArgs {
    /// File with one name per line
    #[arg(value_name = "FILE")]
    pub names: PathBuf,
}
