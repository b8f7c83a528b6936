//! Benchmark configuration
//!
//! Settings come from three layers, later layers winning:
//! 1. Built-in defaults (1,000,000 sequential values from 0, one run)
//! 2. An optional TOML file
//! 3. Command-line overrides
//!
//! # Example
//!
//! ```toml
//! size = 100000
//! runs = 5
//! format = "json"
//!
//! [random]
//! seed = 7
//! min = -1000
//! max = 1000
//! ```

use crate::error::DriverError;
use crate::input::InputSpec;
use crate::report::ReportFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default number of input elements
pub const DEFAULT_SIZE: usize = 1_000_000;

/// Seeded random input range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RandomConfig {
    pub seed: u64,
    #[serde(default = "default_random_min")]
    pub min: i32,
    #[serde(default = "default_random_max")]
    pub max: i32,
}

fn default_random_min() -> i32 {
    -1_000_000
}

fn default_random_max() -> i32 {
    1_000_000
}

/// Fully resolved benchmark settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Number of input elements
    pub size: usize,
    /// First value of a sequential input
    pub start: i32,
    /// Use seeded random input instead of a sequential one
    pub random: Option<RandomConfig>,
    /// Measurement repetitions; the best time is reported
    pub runs: u32,
    /// Explicit kernel library path
    pub library: Option<PathBuf>,
    /// Directory to look for the platform's kernel library in
    pub library_dir: Option<PathBuf>,
    /// Report format
    pub format: ReportFormat,
    /// Fail when host and native results differ
    pub verify: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            size: DEFAULT_SIZE,
            start: 0,
            random: None,
            runs: 1,
            library: None,
            library_dir: None,
            format: ReportFormat::Human,
            verify: false,
        }
    }
}

/// Command-line values that replace config settings when present
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub size: Option<usize>,
    pub start: Option<i32>,
    pub seed: Option<u64>,
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub runs: Option<u32>,
    pub library: Option<PathBuf>,
    pub library_dir: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub verify: bool,
}

impl BenchConfig {
    /// Parse a TOML config document
    pub fn from_toml(source: &str, path: &Path) -> Result<Self, DriverError> {
        toml::from_str(source).map_err(|e| DriverError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, DriverError> {
        match path {
            Some(path) => {
                let source = std::fs::read_to_string(path)?;
                Self::from_toml(&source, path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides
    ///
    /// A seed switches the input to random; `min`/`max` adjust the random
    /// range and are ignored for sequential input.
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(size) = overrides.size {
            self.size = size;
        }
        if let Some(start) = overrides.start {
            self.start = start;
        }
        if let Some(seed) = overrides.seed {
            let mut random = self.random.unwrap_or(RandomConfig {
                seed,
                min: default_random_min(),
                max: default_random_max(),
            });
            random.seed = seed;
            self.random = Some(random);
        }
        if let Some(random) = self.random.as_mut() {
            if let Some(min) = overrides.min {
                random.min = min;
            }
            if let Some(max) = overrides.max {
                random.max = max;
            }
        }
        if let Some(runs) = overrides.runs {
            self.runs = runs;
        }
        if overrides.library.is_some() {
            self.library = overrides.library;
        }
        if overrides.library_dir.is_some() {
            self.library_dir = overrides.library_dir;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        self.verify |= overrides.verify;
        self
    }

    /// Input sequence described by these settings
    pub fn input_spec(&self) -> InputSpec {
        match self.random {
            Some(RandomConfig { seed, min, max }) => InputSpec::Random {
                seed,
                size: self.size,
                min,
                max,
            },
            None => InputSpec::Sequential {
                start: self.start,
                size: self.size,
            },
        }
    }
}
