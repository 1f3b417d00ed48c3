mod cli;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use cli::{
    Cli, Commands, MergePdfArgs, PagesArgs, PasswordArgs, PickArgs, SpeakArgs, SplitPdfArgs,
    TextArgs, TextCommands, TextInput, WavArgs,
};
use easytools::services::password::{generate_password, password_strength, pick_name};
use easytools::services::pdf::split_output_name;
use easytools::services::ready::wait_for_file;
use easytools::services::text::reverse_text;
use easytools::types::PageSelectionReport;
use easytools::{
    AppConfig, EasyToolsError, PageRangeParser, PasswordOptions, PdfTools, Result, SpeechClient,
    TextTools, WavEncoder, WavFormat, WavHeader,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, error, info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let out = Output {
        dir: cli.output.clone(),
        force: cli.force,
    };

    let result = match &cli.command {
        Commands::Pages(args) => handle_pages_command(args).await,
        Commands::SplitPdf(args) => handle_split_command(args, &out).await,
        Commands::MergePdf(args) => handle_merge_command(args, &out).await,
        Commands::Wav(args) => handle_wav_command(args, &out).await,
        Commands::Speak(args) => handle_speak_command(args, &out).await,
        Commands::Text(args) => handle_text_command(args).await,
        Commands::Password(args) => handle_password_command(args),
        Commands::Pick(args) => handle_pick_command(args).await,
    };

    if let Err(e) = result {
        error!("Operation failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Where generated files go, and whether existing ones may be replaced.
struct Output {
    dir: PathBuf,
    force: bool,
}

impl Output {
    async fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).await.map_err(|e| EasyToolsError::Output {
                reason: format!("Failed to create output directory: {}", e),
            })?;
            info!("Created output directory: {}", self.dir.display());
        }

        let path = self.dir.join(name);
        if path.exists() && !self.force {
            return Err(EasyToolsError::Output {
                reason: format!("{} already exists. Use --force to overwrite.", path.display()),
            });
        }

        fs::write(&path, bytes).await.map_err(|e| EasyToolsError::Output {
            reason: format!("Failed to write {}: {}", path.display(), e),
        })?;
        Ok(path)
    }
}

async fn read_input(path: &Path, wait_secs: Option<u64>) -> Result<Vec<u8>> {
    let path = wait_for_file(path, wait_secs.map(Duration::from_secs)).await?;
    debug!("Reading {}", path.display());
    Ok(fs::read(&path).await?)
}

async fn handle_pages_command(args: &PagesArgs) -> Result<()> {
    let max_pages = match (&args.pdf, args.max_pages) {
        (Some(pdf), _) => PdfTools::page_count(&read_input(pdf, None).await?)?,
        (None, Some(max)) => max,
        (None, None) => {
            return Err(EasyToolsError::InvalidInput {
                reason: "either --max-pages or --pdf is required".to_string(),
            })
        }
    };

    let selection = PageRangeParser::parse(&args.expression, max_pages);
    info!(
        "'{}' selects {} of {} pages",
        args.expression,
        selection.len(),
        max_pages
    );

    println!("Pages (1-based): {}", selection);
    println!("Indices (0-based): {:?}", selection.as_slice());

    if let Some(json_path) = &args.json_output {
        let report = PageSelectionReport {
            expression: args.expression.clone(),
            max_pages,
            canonical: selection.to_string(),
            indices: selection.clone(),
            created_at: Utc::now().to_rfc3339(),
        };
        let json_content = serde_json::to_string_pretty(&report)
            .context("Failed to serialize page selection")?;
        fs::write(json_path, json_content)
            .await
            .context("Failed to write JSON selection file")?;
        info!("Selection written to: {}", json_path.display());
    }

    if selection.is_empty() {
        return Err(EasyToolsError::EmptySelection);
    }
    Ok(())
}

async fn handle_split_command(args: &SplitPdfArgs, out: &Output) -> Result<()> {
    let bytes = read_input(&args.input, args.wait).await?;
    let page_count = PdfTools::page_count(&bytes)?;
    info!("'{}' has {} pages", args.input.display(), page_count);

    let expression = args
        .pages
        .clone()
        .unwrap_or_else(|| PageRangeParser::full_range(page_count));
    let selection = PageRangeParser::parse(&expression, page_count);
    if selection.is_empty() {
        warn!("'{}' selects no pages out of {}", expression, page_count);
        return Err(EasyToolsError::EmptySelection);
    }

    info!("Extracting pages {}", selection);
    let extracted = PdfTools::extract_pages(&bytes, &selection)?;
    let path = out.write(&split_output_name(&args.input), &extracted).await?;

    info!(
        "Wrote {} pages ({} bytes) to {}",
        selection.len(),
        extracted.len(),
        path.display()
    );
    Ok(())
}

async fn handle_merge_command(args: &MergePdfArgs, out: &Output) -> Result<()> {
    info!("Merging {} PDFs", args.inputs.len());

    let mut documents = Vec::with_capacity(args.inputs.len());
    for (idx, input) in args.inputs.iter().enumerate() {
        info!("Loading {}/{}: {}", idx + 1, args.inputs.len(), input.display());
        documents.push(read_input(input, args.wait).await?);
    }

    let merged = PdfTools::merge(&documents)?;
    let path = out.write(&args.name, &merged).await?;
    info!("Merged document written to {}", path.display());
    Ok(())
}

async fn handle_wav_command(args: &WavArgs, out: &Output) -> Result<()> {
    let bytes = read_input(&args.input, None).await?;

    if args.inspect {
        let header = WavHeader::parse(&bytes)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&header)?);
        } else {
            println!("=== {} ===", args.input.display());
            println!("Sample rate: {} Hz", header.sample_rate);
            println!("Channels: {}", header.channels);
            println!("Bits per sample: {}", header.bits_per_sample);
            println!("Data size: {} bytes", header.data_size);
            println!("Duration: {:.2} s", header.duration_secs());
        }
        return Ok(());
    }

    let encoder = WavEncoder::new(WavFormat::new(args.sample_rate, args.channels, 16)?);

    let wav = if args.base64 {
        let text = String::from_utf8(bytes).map_err(|e| EasyToolsError::InvalidInput {
            reason: format!("base64 input is not text: {}", e),
        })?;
        encoder.encode_base64(&text)?
    } else {
        if bytes.len() % 2 != 0 {
            warn!("PCM data has an odd byte count; the last byte is kept as-is");
        }
        encoder.encode(&bytes)
    };

    let stem = args
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("audio");
    let path = out.write(&format!("{}.wav", stem), &wav).await?;
    info!("Wrote {} byte WAV to {}", wav.len(), path.display());
    Ok(())
}

async fn handle_speak_command(args: &SpeakArgs, out: &Output) -> Result<()> {
    let config = AppConfig::from_env()?.with_speech_model(args.model.clone());
    let client = SpeechClient::new(config)?;

    info!("Generating speech with {} ({})", args.voice.api_name(), args.voice.description());
    let wav = client.generate_wav(&args.text, args.voice).await?;
    let path = out.write(&args.name, &wav).await?;

    let header = WavHeader::parse(&wav)?;
    info!(
        "Wrote {:.1} s of audio to {}",
        header.duration_secs(),
        path.display()
    );
    Ok(())
}

async fn read_text(input: &TextInput) -> Result<String> {
    match (&input.text, &input.file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(file)) => {
            let path = wait_for_file(file, None).await?;
            Ok(fs::read_to_string(path).await?)
        }
        (None, None) => Err(EasyToolsError::InvalidInput {
            reason: "no text given".to_string(),
        }),
    }
}

async fn handle_text_command(args: &TextArgs) -> Result<()> {
    let tools = TextTools::new();

    match &args.command {
        TextCommands::Stats(input) => {
            let stats = tools.stats(&read_text(input).await?);
            if input.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Words: {}", stats.words);
                println!("Characters: {}", stats.characters);
                println!("Sentences: {}", stats.sentences);
                println!("Paragraphs: {}", stats.paragraphs);
            }
        }
        TextCommands::Case { input, style } => {
            println!("{}", tools.convert_case(&read_text(input).await?, *style));
        }
        TextCommands::Clean(input) => {
            let cleaned = tools.remove_extra_spaces(&read_text(input).await?);
            if input.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "text": cleaned.text,
                        "spaces_removed": cleaned.spaces_removed,
                    })
                );
            } else {
                println!("{}", cleaned.text);
                info!("Removed {} extra spaces", cleaned.spaces_removed);
            }
        }
        TextCommands::Reverse(input) => {
            println!("{}", reverse_text(&read_text(input).await?));
        }
    }

    Ok(())
}

fn handle_password_command(args: &PasswordArgs) -> Result<()> {
    let options = PasswordOptions {
        length: args.length,
        uppercase: !args.no_uppercase,
        numbers: !args.no_numbers,
        symbols: !args.no_symbols,
    };

    let password = generate_password(&options, &mut rand::thread_rng())?;
    println!("{}", password);
    info!("Strength: {}", password_strength(&options));
    Ok(())
}

async fn handle_pick_command(args: &PickArgs) -> Result<()> {
    let names = fs::read_to_string(&args.names).await?;
    let winner = pick_name(&names, &mut rand::thread_rng())?;
    println!("{}", winner);
    Ok(())
}
