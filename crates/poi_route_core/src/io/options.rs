use std::{net::SocketAddr, path::Path};

use clap::{ArgAction, Args, Parser, ValueEnum};
use log::LevelFilter;

use crate::{
    Error, Result,
    constants::{DEFAULT_BIND, DEFAULT_ITERATIONS, DEFAULT_RESTARTS},
};

const ERR_ZERO_ITERATIONS: &str = "iterations must be > 0";
const ERR_ZERO_RESTARTS: &str = "restarts must be > 0";

/// Runtime options for the route server.
#[derive(Clone, Debug, Parser)]
#[command(name = "poi-route", version, about = "Serves points of interest and hill-climbed visiting routes")]
pub struct ServerOptions {
    /// Address the HTTP listener binds to.
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,
    /// Hill-climbing iterations per optimizer run.
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,
    /// Independent optimizer runs per request; the cheapest route wins.
    #[arg(long, default_value_t = DEFAULT_RESTARTS)]
    pub restarts: usize,
    /// Fixed seed for the optimizer's random source. Omit for OS entropy.
    #[arg(long)]
    pub seed: Option<u64>,
    #[command(flatten)]
    pub log: LogOptions,
}

impl ServerOptions {
    pub fn optimizer(&self) -> OptimizerOptions {
        OptimizerOptions {
            iterations: self.iterations,
            restarts: self.restarts,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct LogOptions {
    /// Structured logging level.
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    pub level: LogLevel,
    /// Logging output format.
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Compact)]
    pub format: LogFormat,
    /// Include timestamps in log lines.
    #[arg(long = "log-timestamp", default_value_t = true, action = ArgAction::Set)]
    pub timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[arg(long = "log-output", default_value = "")]
    pub output: String,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            timestamp: true,
            output: String::new(),
        }
    }
}

impl LogOptions {
    pub fn output_path(&self) -> Option<&Path> {
        if self.output.is_empty() {
            None
        } else {
            Some(Path::new(&self.output))
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Pretty,
}

/// Search budget for [`crate::optimize_route`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OptimizerOptions {
    pub iterations: usize,
    pub restarts: usize,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            restarts: DEFAULT_RESTARTS,
        }
    }
}

impl OptimizerOptions {
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::invalid_input(ERR_ZERO_ITERATIONS));
        }
        if self.restarts == 0 {
            return Err(Error::invalid_input(ERR_ZERO_RESTARTS));
        }
        Ok(())
    }
}
