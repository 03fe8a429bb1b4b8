use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_OUTPUT: &str = "xsec.html";
pub const DEFAULT_CURRENT_LABEL: &str = "current";
pub const DEFAULT_REFERENCE_LABEL: &str = "reference";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    Malformed(String),
    MissingFile(PathBuf),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Malformed(x) => write!(
                f,
                "'{x}' is not of the form path[,label] with a non-empty path and label"
            ),
            CliError::MissingFile(x) => write!(f, "{} does not exist", x.display()),
        }
    }
}

impl std::error::Error for CliError {}

/// A cross section source given on the command line as `path[,label]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArg {
    pub path: PathBuf,
    pub label: String,
}

impl SourceArg {
    /// Splits `path[,label]` without touching the file system.
    pub fn parse(value: &str, default_label: &str) -> Result<Self, CliError> {
        let parts: Vec<&str> = value.split(',').collect();
        match parts.as_slice() {
            [path] if !path.is_empty() => Ok(SourceArg {
                path: PathBuf::from(*path),
                label: default_label.to_owned(),
            }),
            [path, label] if !path.is_empty() && !label.is_empty() => Ok(SourceArg {
                path: PathBuf::from(*path),
                label: (*label).to_owned(),
            }),
            _ => Err(CliError::Malformed(value.to_owned())),
        }
    }

    fn existing(self) -> Result<Self, CliError> {
        if self.path.exists() {
            Ok(self)
        } else {
            Err(CliError::MissingFile(self.path))
        }
    }
}

fn parse_current(value: &str) -> Result<SourceArg, CliError> {
    SourceArg::parse(value, DEFAULT_CURRENT_LABEL)?.existing()
}

fn parse_reference(value: &str) -> Result<SourceArg, CliError> {
    SourceArg::parse(value, DEFAULT_REFERENCE_LABEL)?.existing()
}

/// Plot neutrino cross section curves, optionally against a reference set,
/// and write the comparison report.
#[derive(Debug, Clone, Parser)]
#[command(name = "nuxsec", version)]
pub struct Args {
    /// Cross section source to plot, as path[,label]
    #[arg(short = 'f', long = "file", value_name = "PATH[,LABEL]", value_parser = parse_current)]
    pub current: SourceArg,

    /// Reference cross section source, as path[,label]; enables ratio plots
    #[arg(short = 'r', long = "reference", value_name = "PATH[,LABEL]", value_parser = parse_reference)]
    pub reference: Option<SourceArg>,

    /// Output file; the format follows the extension (html, json, yaml)
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// YAML report configuration
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}
