//! utf8kit CLI tool for inspecting, validating and generating UTF-8 text.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod case;
mod generators;
mod inspect;
mod validate;

use generators::{generate_utf8, plant_invalid_byte, GenerateConfig, Utf8Pattern};

#[derive(Debug, Parser)]
#[command(name = "utf8kit")]
#[command(about = "Strict UTF-8 codec toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every code point of a string with its encoded length
    Inspect(inspect::InspectArgs),
    /// Validate files for UTF-8 compliance
    Validate(validate::ValidateUtf8Args),
    /// Convert ASCII letters to upper or lower case, leaving other bytes intact
    Case(case::CaseArgs),
    /// Generate synthetic UTF-8 text for benchmarking and testing
    Generate(GenerateText),
}

/// Generate synthetic UTF-8 text for benchmarking and testing
#[derive(Debug, Parser)]
struct GenerateText {
    /// Size of text to generate (supports b, kb, mb, gb - case insensitive)
    /// Examples: 1024, 1kb, 512MB, 2Gb
    #[arg(value_parser = parse_size)]
    size: usize,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text pattern to generate
    #[arg(short, long, default_value = "mixed")]
    pattern: PatternArg,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Insert a newline after roughly this many bytes (0 disables)
    #[arg(long, default_value = "80")]
    line_width: usize,

    /// Corrupt the sequence covering this byte offset
    #[arg(long)]
    invalid_at: Option<usize>,

    /// Verify the generated text is valid UTF-8 (skipped with --invalid-at)
    #[arg(long)]
    verify: bool,
}

#[derive(Debug, Clone, ValueEnum)]
enum PatternArg {
    /// Printable ASCII (1-byte sequences)
    Ascii,
    /// Latin-1 supplement and Latin Extended-A (2-byte sequences)
    Latin,
    /// Greek and Cyrillic (2-byte sequences)
    GreekCyrillic,
    /// CJK unified ideographs (3-byte sequences)
    Cjk,
    /// Emoji (4-byte sequences)
    Emoji,
    /// Mostly ASCII prose with occasional multi-byte characters (default)
    Mixed,
    /// Uniform mix of all sequence lengths (1-4 bytes)
    AllLengths,
    /// Maximum multi-byte density across all supplementary planes
    Pathological,
}

impl From<PatternArg> for Utf8Pattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Ascii => Utf8Pattern::Ascii,
            PatternArg::Latin => Utf8Pattern::Latin,
            PatternArg::GreekCyrillic => Utf8Pattern::GreekCyrillic,
            PatternArg::Cjk => Utf8Pattern::Cjk,
            PatternArg::Emoji => Utf8Pattern::Emoji,
            PatternArg::Mixed => Utf8Pattern::Mixed,
            PatternArg::AllLengths => Utf8Pattern::AllLengths,
            PatternArg::Pathological => Utf8Pattern::Pathological,
        }
    }
}

/// Parse size string like "1mb", "512KB", "2GB", "1024" (case insensitive)
fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim().to_lowercase();

    if let Ok(bytes) = s.parse::<usize>() {
        return Ok(bytes);
    }

    let (num_str, unit) = if let Some(n) = s.strip_suffix("gb") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("mb") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("kb") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('b') {
        (n, 1)
    } else {
        return Err(format!(
            "Invalid size format: '{}'. Use format like '1mb', '512KB', or '1024'",
            s
        ));
    };

    num_str
        .trim()
        .parse::<usize>()
        .map(|n| n * unit)
        .map_err(|_| format!("Invalid number in size: '{}'", s))
}

fn run_generate(args: GenerateText) -> Result<()> {
    let mut config =
        GenerateConfig::new(args.size, args.pattern.into()).with_line_width(args.line_width);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut text = generate_utf8(&config);

    if let Some(offset) = args.invalid_at {
        match plant_invalid_byte(&mut text, offset) {
            Some(at) => eprintln!("✓ Planted invalid byte at offset {}", at),
            None => anyhow::bail!(
                "--invalid-at {} is past the end of the generated text ({} bytes)",
                offset,
                text.len()
            ),
        }
    } else if args.verify {
        utf8kit::validate(&text).context("Generated invalid UTF-8")?;
        eprintln!("✓ UTF-8 validated successfully");
    }

    match args.output {
        Some(path) => {
            std::fs::write(&path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            use std::io::Write;
            std::io::stdout()
                .lock()
                .write_all(&text)
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(args) => inspect::run(args),
        Command::Validate(args) => {
            let code = validate::run(args)?;
            std::process::exit(code);
        }
        Command::Case(args) => case::run(args),
        Command::Generate(args) => run_generate(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        // Plain numbers
        assert_eq!(parse_size("1024").unwrap(), 1024);

        // Bytes (case insensitive)
        assert_eq!(parse_size("100b").unwrap(), 100);
        assert_eq!(parse_size("100B").unwrap(), 100);

        // Kilobytes
        assert_eq!(parse_size("1kb").unwrap(), 1024);
        assert_eq!(parse_size("512KB").unwrap(), 512 * 1024);

        // Megabytes and gigabytes
        assert_eq!(parse_size("10mb").unwrap(), 10 * 1024 * 1024);
        assert_eq!(parse_size("2Gb").unwrap(), 2 * 1024 * 1024 * 1024);

        // With whitespace
        assert_eq!(parse_size(" 1mb ").unwrap(), 1024 * 1024);

        // Errors
        assert!(parse_size("abc").is_err());
        assert!(parse_size("1tb").is_err());
        assert!(parse_size("").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["utf8kit", "inspect", "A€", "x"]).unwrap();
        assert!(matches!(cli.command, Command::Inspect(_)));

        let cli = Cli::try_parse_from(["utf8kit", "generate", "1kb", "-p", "cjk"]).unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.size, 1024);
                assert!(matches!(args.pattern, PatternArg::Cjk));
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::try_parse_from(["utf8kit", "case", "upper"]).unwrap();
        assert!(matches!(cli.command, Command::Case(_)));
    }
}
