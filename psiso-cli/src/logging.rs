//! Logger setup: `env_logger` with a compact format, optionally teed to a
//! file with ANSI escapes stripped.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::error::CliError;

/// `--quiet` shows warnings and errors, `--verbose` everything.
pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Writes log output to stderr and, when configured, to a log file.
pub(crate) struct TeeWriter<W: Write> {
    console: W,
    file: Option<strip_ansi_escapes::Writer<File>>,
}

impl<W: Write> TeeWriter<W> {
    pub(crate) fn new(console: W, file: Option<File>) -> Self {
        Self {
            console,
            file: file.map(strip_ansi_escapes::Writer::new),
        }
    }
}

impl<W: Write> Write for TeeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

fn level_label(level: Level) -> String {
    match level {
        Level::Error => format!("{}", "error:".if_supports_color(Stderr, |t| t.red())),
        Level::Warn => format!("{}", "warning:".if_supports_color(Stderr, |t| t.yellow())),
        Level::Info => String::new(),
        Level::Debug => format!("{}", "debug:".if_supports_color(Stderr, |t| t.dimmed())),
        Level::Trace => format!("{}", "trace:".if_supports_color(Stderr, |t| t.dimmed())),
    }
}

/// Install the global logger.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let file = logfile.map(File::create).transpose()?;

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(quiet, verbose))
        .target(env_logger::Target::Pipe(Box::new(TeeWriter::new(
            io::stderr(),
            file,
        ))))
        .format(move |buf, record| {
            let label = level_label(record.level());
            if verbose {
                writeln!(
                    buf,
                    "[{}] {} {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    label,
                    record.args()
                )
            } else if label.is_empty() {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "{} {}", label, record.args())
            }
        });
    builder.try_init().map_err(io::Error::other)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/logging_tests.rs"]
mod tests;
