use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result, WrapErr};
use paraspace_core::{
    OffsetMapping, ParaSpace, ParaSpaceConfig, Spacing, TransformedText,
    map_original_to_transformed, map_transformed_to_original,
};

mod config;

/// Shown in place of the marker with `--visible-marker`.
const VISIBLE_MARKER: char = '¶';

#[derive(Parser)]
#[command(version, about = "Paraspace - paragraph spacing with exact offset mapping", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a KDL config file
    #[arg(long, global = true, env = "PARASPACE_CONFIG")]
    config: Option<PathBuf>,

    /// Paragraph spacing, e.g. `10sp` or `1.5em`
    #[arg(long, global = true)]
    spacing: Option<Spacing>,

    /// Marker code point in hex, e.g. `0x2063`
    #[arg(long, global = true)]
    marker: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the transformed text
    Format {
        /// Input file (stdin if omitted)
        input: Option<PathBuf>,

        /// Print text and style spans as JSON
        #[arg(long)]
        json: bool,

        /// Replace the marker with a visible pilcrow
        #[arg(long)]
        visible_marker: bool,
    },
    /// Translate a char offset between original and transformed text
    Map {
        direction: Direction,

        offset: usize,

        /// Input file (stdin if omitted)
        input: Option<PathBuf>,
    },
    /// Verify round-trip and monotonicity over every offset
    Check {
        /// Input file (stdin if omitted)
        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    ToTransformed,
    ToOriginal,
}

fn main() -> Result<()> {
    init_miette();
    init_tracing();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let para_space = ParaSpace::with_config(config)?;

    match cli.command {
        Commands::Format {
            input,
            json,
            visible_marker,
        } => {
            let text = read_input(input.as_deref())?;
            println!("{}", format_text(&para_space, &text, json, visible_marker)?);
        }
        Commands::Map {
            direction,
            offset,
            input,
        } => {
            let text = read_input(input.as_deref())?;
            let mapped = match direction {
                Direction::ToTransformed => map_original_to_transformed(&text, offset)?,
                Direction::ToOriginal => map_transformed_to_original(&text, offset)?,
            };
            println!("{mapped}");
        }
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            check_text(&para_space, &text)?;
        }
    }

    Ok(())
}

/// Defaults, then the config file, then flags.
fn resolve_config(cli: &Cli) -> Result<ParaSpaceConfig> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ParaSpaceConfig::default(),
    };
    if let Some(spacing) = cli.spacing {
        config.spacing = spacing;
    }
    if let Some(marker) = &cli.marker {
        config.marker = config::parse_marker_flag(marker)?;
    }
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .into_diagnostic()
                .wrap_err("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Render `text` for the `format` command: plain text, or `{ text, spans }`
/// as JSON.
fn format_text(para_space: &ParaSpace, text: &str, json: bool, visible: bool) -> Result<String> {
    let mut formatted = para_space.filter(text).formatted;
    if visible {
        formatted.text = formatted
            .text
            .replace(para_space.config().marker, &VISIBLE_MARKER.to_string());
    }

    if json {
        serde_json::to_string_pretty(&formatted).into_diagnostic()
    } else {
        Ok(formatted.text)
    }
}

fn check_text(para_space: &ParaSpace, text: &str) -> Result<()> {
    let transformed = para_space.filter(text);
    let original_len = text.chars().count();
    let display_len = transformed.text().chars().count();
    let paragraphs = transformed.mapping.index().len();

    tracing::info!(paragraphs, original_len, display_len, "checking offsets");

    verify_mapping(&transformed, text, original_len, display_len)?;

    println!("✓ {paragraphs} paragraph(s)");
    println!("✓ {original_len} original chars → {display_len} displayed chars");
    println!("✓ round-trip holds for all {} offsets", original_len + 1);
    Ok(())
}

fn verify_mapping(
    transformed: &TransformedText,
    text: &str,
    original_len: usize,
    display_len: usize,
) -> Result<()> {
    if transformed.mapping.transformed_len() != display_len {
        miette::bail!(
            "mapped length {} disagrees with displayed length {display_len}",
            transformed.mapping.transformed_len()
        );
    }

    let mut previous = 0;
    for offset in 0..=original_len {
        let shown = transformed.original_to_transformed(offset)?;
        let linear = map_original_to_transformed(text, offset)?;
        if shown != linear {
            miette::bail!("index and scan disagree at {offset}: {shown} vs {linear}");
        }
        if shown < previous {
            miette::bail!("mapping is not monotonic at original offset {offset}");
        }
        let back = transformed.transformed_to_original(shown)?;
        if back != offset {
            miette::bail!("round-trip failed: {offset} → {shown} → {back}");
        }
        previous = shown;
    }

    let mut previous = 0;
    for offset in 0..=display_len {
        let back = transformed.transformed_to_original(offset)?;
        if back < previous {
            miette::bail!("inverse mapping is not monotonic at displayed offset {offset}");
        }
        previous = back;
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}
