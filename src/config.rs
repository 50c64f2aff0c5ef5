//! Command-line configuration
//!
//! ```text
//! heaptty [--speed <ms>] [--data <file>] [--json]
//! ```
//!
//! A data file lists one person per line as `person_id,weight` (a run of
//! whitespace works as the separator too). Blank lines and lines starting
//! with `#` are skipped.

use crate::heap::sample::SAMPLE_PEOPLE;
use crate::player::{clamp_speed, DEFAULT_SPEED_MS};
use rustc_hash::FxHashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Interactive terminal UI
    Tui,
    /// Print the whole trace as JSON lines and exit
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub speed_ms: u64,
    pub data_file: Option<PathBuf>,
    pub output: OutputMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            speed_ms: DEFAULT_SPEED_MS,
            data_file: None,
            output: OutputMode::Tui,
        }
    }
}

/// Problems with the command line or the data file
#[derive(Debug)]
pub enum ConfigError {
    /// A flag was given without its value
    MissingValue { flag: String },

    /// Unrecognised argument
    UnknownFlag { flag: String },

    /// `--speed` was not a whole number of milliseconds
    InvalidSpeed { value: String },

    /// The data file could not be read
    Io { path: PathBuf, source: std::io::Error },

    /// A data line was not a `person_id,weight` pair with a positive weight
    InvalidLine { line: usize, text: String },

    /// The same person id appeared twice
    DuplicatePerson { line: usize, person_id: u32 },

    /// The data file held no people
    EmptyData { path: PathBuf },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue { flag } => write!(f, "Missing value for {}", flag),
            ConfigError::UnknownFlag { flag } => write!(f, "Unknown argument '{}'", flag),
            ConfigError::InvalidSpeed { value } => {
                write!(f, "Invalid speed '{}': expected milliseconds", value)
            }
            ConfigError::Io { path, source } => {
                write!(f, "Cannot read '{}': {}", path.display(), source)
            }
            ConfigError::InvalidLine { line, text } => {
                write!(
                    f,
                    "Line {}: expected 'person_id,weight', got '{}'",
                    line, text
                )
            }
            ConfigError::DuplicatePerson { line, person_id } => {
                write!(f, "Line {}: person {} appears twice", line, person_id)
            }
            ConfigError::EmptyData { path } => {
                write!(f, "'{}' does not list anyone", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Config {
    /// Parse arguments, not including the program name
    pub fn from_args<I>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--speed" | "-s" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue { flag: arg.clone() })?;
                    let speed = value
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidSpeed { value })?;
                    config.speed_ms = clamp_speed(speed);
                }
                "--data" | "-d" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue { flag: arg.clone() })?;
                    config.data_file = Some(PathBuf::from(value));
                }
                "--json" => config.output = OutputMode::Json,
                _ => return Err(ConfigError::UnknownFlag { flag: arg.clone() }),
            }
        }

        Ok(config)
    }

    /// The data set to start from: the data file if one was given, otherwise
    /// the built-in sample
    pub fn people(&self) -> Result<Vec<(u32, f64)>, ConfigError> {
        match &self.data_file {
            Some(path) => load_people(path),
            None => Ok(SAMPLE_PEOPLE.to_vec()),
        }
    }
}

/// Read a data file from disk
pub fn load_people(path: &Path) -> Result<Vec<(u32, f64)>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let people = parse_people(&text)?;
    if people.is_empty() {
        return Err(ConfigError::EmptyData {
            path: path.to_path_buf(),
        });
    }
    Ok(people)
}

/// Parse data-file contents into `(person_id, weight)` pairs
pub fn parse_people(text: &str) -> Result<Vec<(u32, f64)>, ConfigError> {
    let mut seen = FxHashSet::default();
    let mut people = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let invalid = || ConfigError::InvalidLine {
            line,
            text: trimmed.to_string(),
        };

        let mut fields = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty());
        let person_id = fields
            .next()
            .and_then(|field| field.parse::<u32>().ok())
            // the next free id is one past the largest loaded one
            .filter(|&id| id < u32::MAX)
            .ok_or_else(invalid)?;
        let weight = fields
            .next()
            .and_then(|field| field.parse::<f64>().ok())
            .filter(|weight| weight.is_finite() && *weight > 0.0)
            .ok_or_else(invalid)?;
        if fields.next().is_some() {
            return Err(invalid());
        }

        if !seen.insert(person_id) {
            return Err(ConfigError::DuplicatePerson { line, person_id });
        }
        people.push((person_id, weight));
    }

    Ok(people)
}
