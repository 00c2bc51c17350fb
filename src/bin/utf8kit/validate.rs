//! CLI handler for the `validate` command.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use utf8kit::text::utf8::{format_byte, Utf8Error, Utf8ErrorKind};

/// Validate files for UTF-8 compliance.
#[derive(Debug, Parser)]
pub struct ValidateUtf8Args {
    /// Input files to validate (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Quiet mode: exit code only, no output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print one JSON report per input on stdout instead of diagnostics
    #[arg(long)]
    pub json: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    pub color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color")]
    pub no_color: bool,
}

/// Exit codes for the validate command.
pub mod exit_codes {
    /// UTF-8 is valid.
    pub const SUCCESS: i32 = 0;
    /// UTF-8 is invalid (validation error).
    pub const INVALID: i32 = 1;
    /// I/O error (file not found, permission denied, etc.).
    pub const IO_ERROR: i32 = 2;
}

/// ANSI color codes for error output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
    pub const GUTTER: &str = "\x1b[0;34m"; // Blue
    pub const CARET: &str = "\x1b[1;32m"; // Bold green
    pub const HINT: &str = "\x1b[0;33m"; // Yellow
}

/// Color scheme that can be disabled.
struct ColorScheme {
    error: &'static str,
    location: &'static str,
    gutter: &'static str,
    caret: &'static str,
    hint: &'static str,
    reset: &'static str,
}

impl ColorScheme {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: colors::ERROR,
                location: colors::LOCATION,
                gutter: colors::GUTTER,
                caret: colors::CARET,
                hint: colors::HINT,
                reset: colors::RESET,
            }
        } else {
            Self {
                error: "",
                location: "",
                gutter: "",
                caret: "",
                hint: "",
                reset: "",
            }
        }
    }
}

/// Machine-readable result for one input.
#[derive(Debug, Serialize)]
struct Report<'a> {
    input: &'a str,
    valid: bool,
    bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a Utf8Error>,
}

/// Run the validate command, returning the process exit code.
pub fn run(args: ValidateUtf8Args) -> Result<i32> {
    let use_color = if args.no_color {
        false
    } else if args.color {
        true
    } else {
        atty::is(atty::Stream::Stderr)
    };
    let scheme = ColorScheme::new(use_color);

    if args.files.is_empty() {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read from stdin")?;

        return validate_input(&input, "<stdin>", &args, &scheme);
    }

    let mut any_invalid = false;
    let mut any_io_error = false;

    for path in &args.files {
        match fs::read(path) {
            Ok(input) => {
                let name = path.to_string_lossy();
                if validate_input(&input, &name, &args, &scheme)? == exit_codes::INVALID {
                    any_invalid = true;
                }
            }
            Err(e) => {
                any_io_error = true;
                if !args.quiet {
                    eprintln!(
                        "{}error{}: {}: {}",
                        scheme.error,
                        scheme.reset,
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    if any_io_error {
        Ok(exit_codes::IO_ERROR)
    } else if any_invalid {
        Ok(exit_codes::INVALID)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Validate a single input and report the result.
fn validate_input(
    input: &[u8],
    name: &str,
    args: &ValidateUtf8Args,
    scheme: &ColorScheme,
) -> Result<i32> {
    let result = utf8kit::char_count(input);

    if args.json && !args.quiet {
        let report = Report {
            input: name,
            valid: result.is_ok(),
            bytes: input.len(),
            chars: result.as_ref().ok().copied(),
            error: result.as_ref().err(),
        };
        println!("{}", serde_json::to_string(&report)?);
    }

    match result {
        Ok(_) => Ok(exit_codes::SUCCESS),
        Err(err) => {
            if !args.quiet && !args.json {
                print_error(&err, input, name, scheme);
            }
            Ok(exit_codes::INVALID)
        }
    }
}

/// Print a formatted error message with context snippet.
fn print_error(err: &Utf8Error, input: &[u8], name: &str, scheme: &ColorScheme) {
    eprintln!(
        "{}error{}: {}",
        scheme.error,
        scheme.reset,
        describe_error(err, input)
    );
    eprintln!(
        "  {}--> {}:{}:{}{}",
        scheme.location, name, err.line, err.column, scheme.reset
    );

    let snippet = error_snippet(input, err.offset);
    let gutter_width = err.line.to_string().len().max(3);
    let blank = " ".repeat(gutter_width + 2);

    eprintln!("{}{}|{}", blank, scheme.gutter, scheme.reset);
    eprintln!(
        " {}{:>width$} |{} {}",
        scheme.gutter,
        err.line,
        scheme.reset,
        snippet.line,
        width = gutter_width
    );
    let hint = match error_hint(err.kind) {
        Some(h) => format!(" {}{}{}", scheme.hint, h, scheme.reset),
        None => String::new(),
    };
    eprintln!(
        "{}{}|{} {}{}^{}{}",
        blank,
        scheme.gutter,
        scheme.reset,
        " ".repeat(snippet.caret),
        scheme.caret,
        scheme.reset,
        hint
    );
    eprintln!();
}

/// Human-readable message for an error, naming the offending byte.
fn describe_error(err: &Utf8Error, input: &[u8]) -> String {
    match (err.kind, input.get(err.offset)) {
        (Utf8ErrorKind::InvalidLeadByte, Some(&byte)) => {
            format!("{} {}", err.kind, format_byte(byte))
        }
        (Utf8ErrorKind::InvalidContinuationByte, _) => {
            let sequence_end = (err.offset + 4).min(input.len());
            let bytes: Vec<String> = input[err.offset..sequence_end]
                .iter()
                .map(|&b| format!("{:02X}", b))
                .collect();
            format!("{} in sequence [{}]", err.kind, bytes.join(" "))
        }
        (Utf8ErrorKind::TruncatedSequence, _) => format!("{} at end of input", err.kind),
        _ => err.kind.to_string(),
    }
}

/// Additional hint for an error kind.
fn error_hint(kind: Utf8ErrorKind) -> Option<&'static str> {
    match kind {
        Utf8ErrorKind::InvalidLeadByte => {
            Some("bytes 0x80-0xBF and 0xF8-0xFF cannot start a character")
        }
        Utf8ErrorKind::InvalidContinuationByte => Some("expected bytes 0x80-0xBF"),
        Utf8ErrorKind::OverlongEncoding => Some("use shortest possible encoding"),
        Utf8ErrorKind::SurrogateCodepoint => Some("U+D800-U+DFFF are reserved for UTF-16"),
        Utf8ErrorKind::OutOfRangeCodepoint => Some("maximum is U+10FFFF"),
        Utf8ErrorKind::TruncatedSequence => None,
    }
}

/// The line containing an error, prepared for display.
#[derive(Debug, PartialEq, Eq)]
struct Snippet {
    /// Line text (lossily decoded, possibly elided around the error).
    line: String,
    /// Display columns before the caret.
    caret: usize,
}

/// Maximum number of characters shown on either side of the error.
const SNIPPET_RADIUS: usize = 40;

/// Extract the line containing byte `offset`.
///
/// Everything before `offset` on the line is valid UTF-8 (it was decoded
/// before the error), so the caret column is its character count.
fn error_snippet(input: &[u8], offset: usize) -> Snippet {
    let offset = offset.min(input.len());
    let line_start = input[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line_end = input[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(input.len(), |i| offset + i);

    let before = String::from_utf8_lossy(&input[line_start..offset]);
    let after = String::from_utf8_lossy(&input[offset..line_end]);

    let before_chars: Vec<char> = before.chars().collect();
    let after_chars: Vec<char> = after.chars().collect();

    let mut line = String::new();
    let mut caret = before_chars.len();
    if before_chars.len() > SNIPPET_RADIUS {
        line.push_str("...");
        line.extend(&before_chars[before_chars.len() - SNIPPET_RADIUS..]);
        caret = SNIPPET_RADIUS + 3;
    } else {
        line.extend(&before_chars);
    }
    if after_chars.len() > SNIPPET_RADIUS {
        line.extend(&after_chars[..SNIPPET_RADIUS]);
        line.push_str("...");
    } else {
        line.extend(&after_chars);
    }

    Snippet { line, caret }
}
