//! CLI handler for the `inspect` command.
//!
//! Walks a string one code point at a time with [`next_char`], printing each
//! code point and its encoded length, and reports where decoding first
//! failed.

use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use utf8kit::next_char;

/// Print every code point of a string with its encoded length.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Text to inspect; multiple arguments are joined with single spaces
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<OsString>,

    /// Read the text from stdin instead of the arguments
    #[arg(long, conflicts_with = "text")]
    pub stdin: bool,
}

/// Run the inspect command.
pub fn run(args: InspectArgs) -> Result<()> {
    let input = if args.stdin {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read from stdin")?;
        input
    } else {
        join_args(&args.text)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    inspect(&input, &mut out).context("failed to write to stdout")?;
    Ok(())
}

/// Join arguments with single spaces, keeping their raw bytes where the
/// platform allows it.
fn join_args(args: &[OsString]) -> Vec<u8> {
    let mut joined = Vec::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            joined.push(b' ');
        }
        joined.extend_from_slice(&os_bytes(arg));
    }
    joined
}

#[cfg(unix)]
fn os_bytes(arg: &OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    arg.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn os_bytes(arg: &OsString) -> Vec<u8> {
    arg.to_string_lossy().into_owned().into_bytes()
}

/// Write the per-code-point report for `input`. Returns whether the input
/// was valid UTF-8.
pub fn inspect<W: Write>(input: &[u8], out: &mut W) -> io::Result<bool> {
    writeln!(out, "got string: '{}'", String::from_utf8_lossy(input))?;

    let mut cursor = 0;
    let mut last_good = 0;
    let mut valid = true;
    while cursor < input.len() {
        let Some(cp) = next_char(input, &mut cursor) else {
            valid = false;
            break;
        };
        let bytes = cursor - last_good;
        writeln!(
            out,
            "U+{:x}, {} {} long",
            cp,
            bytes,
            if bytes > 1 { "bytes" } else { "byte" }
        )?;
        last_good = cursor;
    }

    writeln!(
        out,
        "that is {} utf-8 string",
        if valid { "a valid" } else { "an invalid" }
    )?;
    if !valid {
        writeln!(out, "error starts at index {}", last_good)?;
    }
    Ok(valid)
}
