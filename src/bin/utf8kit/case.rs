//! CLI handler for the `case` command.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Convert ASCII letters to upper or lower case.
///
/// Bytes outside `A-Z`/`a-z` pass through untouched, so multi-byte
/// sequences (and invalid input) survive the conversion unchanged.
#[derive(Debug, Parser)]
pub struct CaseArgs {
    /// Target case
    #[arg(value_enum)]
    pub mode: CaseMode,

    /// Input file (reads from stdin if omitted)
    pub input: Option<PathBuf>,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CaseMode {
    Upper,
    Lower,
}

/// Run the case command.
pub fn run(args: CaseArgs) -> Result<()> {
    let mut text = match &args.input {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        None => {
            let mut text = Vec::new();
            io::stdin()
                .read_to_end(&mut text)
                .context("failed to read from stdin")?;
            text
        }
    };

    convert(&mut text, args.mode);

    match args.output {
        Some(path) => {
            fs::write(&path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            io::stdout()
                .lock()
                .write_all(&text)
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}

fn convert(text: &mut [u8], mode: CaseMode) {
    match mode {
        CaseMode::Upper => utf8kit::ascii_upper(text),
        CaseMode::Lower => utf8kit::ascii_lower(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_leaves_multibyte_alone() {
        let mut text = "Grüße, ÉCOLE".as_bytes().to_vec();
        convert(&mut text, CaseMode::Upper);
        assert_eq!(text, "GRüßE, ÉCOLE".as_bytes());
        convert(&mut text, CaseMode::Lower);
        assert_eq!(text, "grüße, École".as_bytes());
    }

    #[test]
    fn test_convert_invalid_bytes_pass_through() {
        let mut text = vec![b'a', 0xFF, b'Z', 0xC0];
        convert(&mut text, CaseMode::Upper);
        assert_eq!(text, [b'A', 0xFF, b'Z', 0xC0]);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("utf8kit-case-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.txt");
        let output = dir.join("out.txt");
        fs::write(&input, "Hello, Wörld").unwrap();

        run(CaseArgs {
            mode: CaseMode::Lower,
            input: Some(input),
            output: Some(output.clone()),
        })
        .unwrap();
        assert_eq!(fs::read(&output).unwrap(), "hello, wörld".as_bytes());

        fs::remove_dir_all(&dir).unwrap();
    }
}
