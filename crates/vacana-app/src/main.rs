use std::fs;
use std::io::Read as _;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use vacana_config::Config;
use vacana_core::gloss::OutputFormat;
use vacana_lang_pali::{PaliProcessor, SourceSelection};

#[cfg(test)]
mod tests;

/// Look up Pali words and print per-word morphological glosses
#[derive(Parser)]
#[command(name = "vacana", version)]
struct Args {
    /// Pali text to analyze
    #[arg(long)]
    text: Option<String>,

    /// UTF-8 file with Pali text
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Dictionary source: the DPD store (with per-word fallback) or the
    /// flat dictionary alone
    #[arg(long = "dict", value_enum, default_value_t = DictChoice::Primary)]
    dict: DictChoice,

    /// Explicit path to the DPD SQLite store
    #[arg(long = "db")]
    db: Option<String>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Print coverage diagnostics to stderr
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DictChoice {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatChoice {
    Compact,
    Rich,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let mut config = Config::new();
    if let Some(db) = &args.db {
        config.dictionary.store_path = Some(db.clone());
    }

    let selection = match args.dict {
        DictChoice::Primary => SourceSelection::Primary,
        DictChoice::Fallback => SourceSelection::Fallback,
    };
    let format = resolve_format(&args, &config);

    let text = read_input(&args)?;

    let processor = PaliProcessor::from_config(selection, &config.dictionary)
        .context("no usable dictionary source")?;
    let report = processor.analyze(&text)?;

    if args.debug {
        tracing::debug!("sources: {}", processor.source_names().join(" -> "));
        tracing::debug!(
            "tokens_total={} tokens_found={} coverage={:.1}%",
            report.total(),
            report.resolved(),
            report.coverage() * 100.0
        );
        let missing = report.missing();
        if !missing.is_empty() {
            tracing::debug!("missing_words={}", missing.join(","));
        }
    }

    // Partial coverage is a successful analysis; only unusable input or a
    // fully unusable source chain exits non-zero.
    println!("{}", report.render(format));
    Ok(())
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// CLI flag wins over the configured default format
fn resolve_format(args: &Args, config: &Config) -> OutputFormat {
    match args.format {
        Some(FormatChoice::Compact) => OutputFormat::Compact,
        Some(FormatChoice::Rich) => OutputFormat::Rich,
        None => match config.output.format.as_str() {
            "rich" => OutputFormat::Rich,
            _ => OutputFormat::Compact,
        },
    }
}

/// Input precedence: --text, --file, then piped stdin
fn read_input(args: &Args) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("cannot read input file: {}", path.display()));
    }

    if atty::is(atty::Stream::Stdin) {
        bail!("no input text: pass --text, --file, or pipe text on stdin");
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;

    if buffer.trim().is_empty() {
        bail!("no input text: pass --text, --file, or pipe text on stdin");
    }

    Ok(buffer)
}
