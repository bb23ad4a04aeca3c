//! Structured output for `--output`.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::IoStreams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PrintFlags {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

impl PrintFlags {
    pub fn print<T: Serialize>(&self, io: &mut IoStreams, value: &T) -> Result<()> {
        print(io, self.output, value)
    }
}

pub fn print<T: Serialize>(io: &mut IoStreams, format: OutputFormat, value: &T) -> Result<()> {
    let rendered = render(format, value)?;
    io.out().write_all(rendered.as_bytes())?;
    Ok(())
}

pub fn render<T: Serialize>(format: OutputFormat, value: &T) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => {
            let mut s = serde_json::to_string_pretty(value)?;
            s.push('\n');
            s
        }
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}
