//! Host-side driver for the PNG to RGB565 C source converter.

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::{bail, Context, Result};
use png2c_codec::{convert, Header, Reporter};

pub mod output;
pub mod reporter;
pub mod source;

pub use output::{write_atomic, OutputError};
pub use reporter::LogReporter;
pub use source::PngSource;

pub const APP_NAME: &str = "png2c";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Structure name used when none is given
pub const DEFAULT_NAME: &str = "image";

/// Settings for one conversion
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub name: String,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            name: DEFAULT_NAME.to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !is_c_identifier(&self.name) {
            bail!("structure name {:?} is not a valid C identifier", self.name);
        }
        Ok(())
    }

    /// File name shown in the generated header
    pub fn input_name(&self) -> String {
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Read `config.input`, convert it and write `config.output`.
///
/// The output file is only replaced once the whole text is ready.
pub fn run<R: Reporter + ?Sized>(config: &Config, reporter: &mut R) -> Result<()> {
    config.validate()?;

    reporter.info(format_args!("opening file {}", config.input.display()));
    let bytes = fs::read(&config.input)
        .with_context(|| format!("failed to open file {}", config.input.display()))?;

    let header = Header::new(
        APP_NAME,
        APP_VERSION,
        humantime::format_rfc3339_seconds(SystemTime::now()).to_string(),
        config.input_name(),
    );

    let text = convert(&PngSource, &bytes, &header, &config.name, reporter)
        .with_context(|| format!("failed to convert {}", config.input.display()))?;

    write_atomic(&config.output, text.as_bytes())?;

    reporter.info(format_args!("done!"));
    Ok(())
}
