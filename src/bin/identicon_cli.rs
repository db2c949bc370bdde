//! Identicon CLI
//!
//! Commands: hash, generate
//! Errors go to stdout as JSON; exit code is non-zero on failure.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use identicon_core::{
    generate_hash_with, to_data_uri, Color, HashAlgorithm, IdenticonError, IdenticonGenerator,
    IdenticonOptions, IdenticonResult, RenderStrategy, DEFAULT_DIGEST_BYTES,
};

#[derive(Parser)]
#[command(name = "identicon-cli")]
#[command(about = "Identicon CLI - deterministic SVG avatars from any string")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the hex digest of a seed
    Hash {
        #[arg(short, long)]
        seed: String,

        /// Digest width in bytes
        #[arg(short, long, default_value_t = DEFAULT_DIGEST_BYTES)]
        bytes: usize,

        #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Mixed)]
        algorithm: AlgorithmArg,
    },

    /// Generate an identicon
    Generate {
        #[arg(short, long)]
        seed: String,

        /// JSON options file; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Grid size (n x n)
        #[arg(short, long)]
        grid: Option<usize>,

        /// Image size in pixels
        #[arg(long)]
        size: Option<f64>,

        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Background color (#RRGGBB)
        #[arg(long)]
        background: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Mixed,
    Fnv1a128,
}

impl From<AlgorithmArg> for HashAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Mixed => HashAlgorithm::Mixed,
            AlgorithmArg::Fnv1a128 => HashAlgorithm::Fnv1a128,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Rects,
    Path,
}

impl From<StrategyArg> for RenderStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Rects => RenderStrategy::Rects,
            StrategyArg::Path => RenderStrategy::Path,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Raw SVG document
    Svg,
    /// Base64 data URI
    DataUri,
    /// Manifest plus SVG as JSON
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Commands::Hash { seed, bytes, algorithm } => {
            generate_hash_with(algorithm.into(), &seed, bytes).map(|d| d.to_string())
        }
        Commands::Generate {
            seed,
            config,
            grid,
            size,
            strategy,
            background,
            format,
            output,
        } => build_options(config, grid, size, strategy, background)
            .and_then(IdenticonGenerator::new)
            .and_then(|generator| render(&generator, &seed, format))
            .and_then(|text| match output {
                Some(path) => {
                    fs::write(&path, &text)?;
                    Ok(format!("wrote {}", path.display()))
                }
                None => Ok(text),
            }),
    };

    match result {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let output = serde_json::json!({
                "success": false,
                "error": e.to_string(),
            });
            println!("{}", output);
            if e.is_invalid_argument() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn build_options(
    config: Option<PathBuf>,
    grid: Option<usize>,
    size: Option<f64>,
    strategy: Option<StrategyArg>,
    background: Option<String>,
) -> IdenticonResult<IdenticonOptions> {
    let mut options = match config {
        Some(path) => IdenticonOptions::load_from_path(&path)?,
        None => IdenticonOptions::default(),
    };
    if let Some(grid) = grid {
        options.grid = grid;
    }
    if let Some(size) = size {
        options.image_size = size;
    }
    if let Some(strategy) = strategy {
        options.strategy = strategy.into();
    }
    if let Some(bg) = background {
        options.background = Some(Color::parse(&bg)?);
    }
    Ok(options)
}

fn render(
    generator: &IdenticonGenerator,
    seed: &str,
    format: OutputFormat,
) -> IdenticonResult<String> {
    let identicon = generator.generate(seed)?;
    match format {
        OutputFormat::Svg => Ok(identicon.svg),
        OutputFormat::DataUri => Ok(to_data_uri(&identicon.svg)),
        OutputFormat::Json => {
            let manifest = generator.manifest(&identicon)?;
            let output = serde_json::json!({
                "success": true,
                "manifest": manifest,
                "pattern": identicon.matrix.to_bits(),
                "svg": identicon.svg,
            });
            serde_json::to_string_pretty(&output).map_err(IdenticonError::from)
        }
    }
}
