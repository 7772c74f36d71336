use std::{fmt, fs::File, io::Write};

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

use crate::options::{LogFormat, LogOptions};
use crate::{Error, Result};

/// Environment variable whose `env_logger` directives override `--log-level`.
pub const LOG_ENV: &str = "POI_ROUTE_LOG";

/// HTTP stack targets that are only interesting when something breaks.
const QUIET_TARGETS: [&str; 3] = ["hyper", "hyper_util", "mio"];

pub fn init_logger(options: &LogOptions) -> Result<()> {
    let format = options.format;
    let timestamp = options.timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.level.to_filter())
        .write_style(env_logger::WriteStyle::Never);
    for target in QUIET_TARGETS {
        builder.filter_module(target, LevelFilter::Warn);
    }
    builder.parse_env(LOG_ENV);

    builder.format(move |buf, record| {
        let stamp = timestamp.then(|| buf.timestamp_millis().to_string());
        writeln!(
            buf,
            "{}",
            LogLine {
                stamp: stamp.as_deref(),
                level: record.level(),
                target: record.target(),
                format,
                args: record.args(),
            }
        )
    });

    match options.output_path() {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!("failed to create log file {}: {e}", path.display()))
            })?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

struct LogLine<'a, A> {
    stamp: Option<&'a str>,
    level: Level,
    target: &'a str,
    format: LogFormat,
    args: A,
}

impl<A: fmt::Display> fmt::Display for LogLine<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(stamp) = self.stamp {
            write!(f, "{stamp} ")?;
        }
        match self.format {
            LogFormat::Compact => write!(f, "{} {}", level_tag(self.level), self.args),
            LogFormat::Pretty => write!(
                f,
                "{} [{}] {}",
                level_tag(self.level),
                self.target,
                self.args
            ),
        }
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
