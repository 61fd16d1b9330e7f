//! Decodes a hex-encoded KeyString and prints the values it holds, one per line.
//!
//! ```text
//! ksdecode 82000000010000000a2b02
//! ksdecode --mode document -vv 2b61002b0204
//! ```

use clap::{Parser, ValueEnum};
use failure::Error;
use keystring::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Decode a hex-encoded MongoDB KeyString
#[derive(Parser, Debug)]
#[command(name = "ksdecode")]
#[command(version, about, long_about = None)]
struct Cli {
    /// How to walk the input
    #[arg(long, value_enum, default_value_t = Mode::Values)]
    mode: Mode,

    /// Declared KeyString format version
    #[arg(long = "key-string-version", value_enum, default_value_t = VersionArg::V1)]
    key_string_version: VersionArg,

    /// Deepest document/array nesting accepted
    #[arg(long, default_value_t = keystring::encoding::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Raise the log level (repeatable); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// KeyString bytes as hex
    hex: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// A flat sequence of tagged values
    Values,
    /// A document body ended by a level terminator
    Document,
    /// An array body ended by a level terminator
    Array,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum VersionArg {
    V0,
    V1,
}

impl From<VersionArg> for Version {
    fn from(v: VersionArg) -> Version {
        match v {
            VersionArg::V0 => Version::V0,
            VersionArg::V1 => Version::V1,
        }
    }
}

fn get_env_filter(verbose: u8) -> EnvFilter {
    if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("keystring={},ksdecode={}", level, level))
    }
}

fn run(cli: &Cli) -> Result<Vec<Value>, Error> {
    let config = KeyStringConfig::default()
        .version(cli.key_string_version.into())
        .max_depth(cli.max_depth);
    let mut ks = KeyString::from_hex(cli.hex.trim())?.config(config);
    info!(
        bytes = ks.cursor().remaining(),
        mode = ?cli.mode,
        version = ?config.version,
        "decoding"
    );

    let values = match cli.mode {
        Mode::Values => ks.values().collect::<Result<Vec<_>, _>>()?,
        Mode::Document => vec![Value::Document(ks.decode_document()?)],
        Mode::Array => vec![Value::Array(ks.decode_array()?)],
    };

    debug!(
        values = values.len(),
        trailing = ks.cursor().remaining(),
        "decode finished"
    );
    Ok(values)
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(get_env_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(values) => {
            for value in values {
                println!("{}", value);
            }
        }
        Err(e) => {
            eprintln!("ksdecode: {}", e);
            std::process::exit(1);
        }
    }
}
