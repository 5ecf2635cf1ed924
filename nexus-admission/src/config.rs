use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use nexus_pqueue::DEFAULT_CAPACITY;

/// Simulation parameters.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Steps with request generation. The drain phase follows.
    pub steps: u64,
    pub min_arrivals: u32,
    pub max_arrivals: u32,
    pub min_priority: i32,
    pub max_priority: i32,
    pub initial_capacity: usize,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            steps: 10,
            min_arrivals: 1,
            max_arrivals: 10,
            min_priority: 1,
            max_priority: 5,
            initial_capacity: DEFAULT_CAPACITY,
            seed: 123,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("steps must be positive")]
    ZeroSteps,
    #[error("min_arrivals must be at least 1")]
    ZeroArrivals,
    #[error("{name} range is empty: {min} > {max}")]
    EmptyRange {
        name: &'static str,
        min: i64,
        max: i64,
    },
    #[error("initial_capacity must be at least 1")]
    ZeroCapacity,
    #[error("opening config {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SimConfig {
    /// Loads a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = File::open(path).map_err(|source| ConfigError::Open {
            path: display.clone(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if self.min_arrivals == 0 {
            return Err(ConfigError::ZeroArrivals);
        }
        if self.min_arrivals > self.max_arrivals {
            return Err(ConfigError::EmptyRange {
                name: "arrivals",
                min: self.min_arrivals.into(),
                max: self.max_arrivals.into(),
            });
        }
        if self.min_priority > self.max_priority {
            return Err(ConfigError::EmptyRange {
                name: "priority",
                min: self.min_priority.into(),
                max: self.max_priority.into(),
            });
        }
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    pub fn arrivals(&self) -> RangeInclusive<u32> {
        self.min_arrivals..=self.max_arrivals
    }

    pub fn priorities(&self) -> RangeInclusive<i32> {
        self.min_priority..=self.max_priority
    }
}
