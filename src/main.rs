use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use catlens::logging::{LogLevel, init_logging};
use catlens::{
    AnalysisClient, AnalysisResult, CatLensError, ColorCode, Detection, GeminiConfig,
    GeminiModel, GeminiProvider,
};
use clap::Parser;

/// Analyze a photo for cats: pose tags, coat colors, breed and age.
#[derive(Parser, Debug)]
#[command(name = "catlens", version, about)]
struct Cli {
    /// Image file to analyze (JPEG, PNG, WebP, GIF or HEIC)
    image: PathBuf,

    /// Model id, overrides CATLENS_MODEL
    #[arg(long)]
    model: Option<String>,

    /// Provider base URL, overrides CATLENS_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request deadline in seconds, overrides CATLENS_TIMEOUT_SECS
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace); CATLENS_LOG wins if set
    #[arg(long, default_value = "warn")]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    // Configuration problems stop us before any request is made
    let provider = match build_provider(&cli) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    let client = AnalysisClient::new(provider);

    let result = match client.evaluate(&cli.image).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    let written = if cli.json {
        print_json(&mut stdout, &result)
    } else {
        print_report(&mut stdout, &result)
    };
    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: cannot write output: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_provider(cli: &Cli) -> catlens::Result<GeminiProvider> {
    build_provider_from(|key| std::env::var(key).ok(), cli)
}

/// Resolve the provider from environment-style lookups, with flags taking
/// precedence over the looked-up values.
fn build_provider_from<F>(lookup: F, cli: &Cli) -> catlens::Result<GeminiProvider>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = GeminiConfig::from_lookup(lookup)?;
    if let Some(model) = &cli.model {
        config.model = GeminiModel::from_string(model.as_str());
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = Some(base_url.trim_end_matches('/').to_string());
    }
    if let Some(secs) = cli.timeout_secs {
        if secs == 0 {
            return Err(CatLensError::Configuration(
                "--timeout-secs must be positive".to_string(),
            ));
        }
        config.timeout = Some(Duration::from_secs(secs));
    }
    GeminiProvider::new(config)
}

fn print_json(out: &mut impl Write, result: &AnalysisResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)
}

fn print_report(out: &mut impl Write, result: &AnalysisResult) -> io::Result<()> {
    let cat = match result.detection() {
        Detection::NoCat => return writeln!(out, "No cat detected in the image."),
        Detection::Cat(cat) => cat,
    };

    writeln!(out, "Pose / behavior")?;
    if cat.image_tags.is_empty() {
        writeln!(out, "  (none)")?;
    } else {
        writeln!(out, "  {}", cat.image_tags.join("  "))?;
    }
    let unknown = result.unknown_tags();
    if !unknown.is_empty() {
        writeln!(out, "  (outside vocabulary: {})", unknown.join(", "))?;
    }

    if !cat.color_codes.is_empty() {
        writeln!(out, "Colors")?;
        for (idx, code) in cat.color_codes.iter().enumerate() {
            match ColorCode::parse(code) {
                Ok(color) => writeln!(
                    out,
                    "  {}. \x1b[48;2;{};{};{}m    \x1b[0m {}",
                    idx + 1,
                    color.r,
                    color.g,
                    color.b,
                    color
                )?,
                Err(_) => writeln!(out, "  {}. {}", idx + 1, code)?,
            }
        }
    }

    if let Some(breed) = cat.breed_type {
        writeln!(out, "Breed: {breed}")?;
    }
    if let Some(age) = cat.age_months {
        writeln!(out, "Age: {age} months")?;
    }
    Ok(())
}
