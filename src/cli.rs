use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};

/// Flags taking a value, as (short, long)
const VALUE_FLAGS: &[(&str, &str)] = &[("-f", "--fps"), ("-t", "--threshold"), ("-p", "--pattern")];

/// Flags without a value
const SWITCHES: &[&str] = &["--legacy-wrap", "-h", "--help", "-V", "--version"];

/// Conway's Game of Life on a wrapping 100x100 grid
///
/// Bad or missing flag values, repeated flags and unknown arguments are
/// reported on stderr and never stop the program. Those reports are emitted
/// whatever RUST_LOG says.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, args_override_self = true)]
pub struct Cli {
    /// Target generations per second (> 0) [default: 10]
    #[arg(short, long, value_name = "INT", allow_negative_numbers = true)]
    pub fps: Option<Option<String>>,

    /// Probability a cell starts alive when seeding randomly, in [0, 1] [default: 0.15]
    #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub threshold: Option<Option<String>>,

    /// Starting pattern: random, blinker, glider, lightweightspaceship or pulsar [default: random]
    #[arg(short, long, value_name = "NAME")]
    pub pattern: Option<Option<String>>,

    /// Wrap the row axis upper edge to index 1 instead of 0
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false)]
    pub legacy_wrap: bool,
}

impl Cli {
    /// Parse the process arguments without ever aborting (except for --help/--version)
    pub fn parse_lenient() -> Self {
        Self::parse_lenient_from(std::env::args_os())
    }

    /// Parse `args` (program name first), skipping anything that is not one of our flags.
    ///
    /// A repeated flag keeps its last value.
    pub fn parse_lenient_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<String> = args
            .into_iter()
            .map(|arg| arg.into().to_string_lossy().into_owned())
            .collect();

        match Self::try_parse_from(known_args(&args)) {
            Ok(cli) => cli,
            Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                error.exit()
            }
            Err(error) => {
                log::warn!("Could not parse arguments, using defaults: {}", error);
                Self::default()
            }
        }
    }
}

fn value_flag(token: &str) -> Option<&'static str> {
    VALUE_FLAGS
        .iter()
        .find(|(short, long)| token == *short || token == *long)
        .map(|(_, long)| *long)
}

fn is_known_flag(token: &str) -> bool {
    let name = token.split_once('=').map_or(token, |(name, _)| name);
    value_flag(name).is_some() || SWITCHES.contains(&token)
}

/// Reduce raw arguments to known flags in `--long=value` form.
///
/// Unknown tokens are dropped with a warning. A value flag followed by
/// another known flag (or by nothing) is kept bare, so it is later reported
/// as missing its value. Only the last occurrence of each flag survives.
fn known_args(args: &[String]) -> Vec<String> {
    let mut kept: Vec<(String, Option<String>)> = Vec::new();
    let mut keep = |flag: String, value: Option<String>| {
        kept.retain(|(name, _)| *name != flag);
        kept.push((flag, value));
    };

    let mut tokens = args.iter().skip(1).peekable();
    while let Some(token) = tokens.next() {
        if let Some((name, value)) = token.split_once('=') {
            if let Some(long) = value_flag(name).filter(|_| name.starts_with("--")) {
                keep(long.to_owned(), Some(value.to_owned()));
                continue;
            }
        }

        if let Some(long) = value_flag(token) {
            let value = tokens.next_if(|next| !is_known_flag(next)).cloned();
            keep(long.to_owned(), value);
        } else if SWITCHES.contains(&token.as_str()) {
            keep(token.clone(), None);
        } else {
            log::warn!("Ignoring unknown argument {:?}", token);
        }
    }

    let program = args.first().cloned().unwrap_or_default();
    std::iter::once(program)
        .chain(kept.into_iter().map(|(flag, value)| match value {
            Some(value) => format!("{}={}", flag, value),
            None => flag,
        }))
        .collect()
}
