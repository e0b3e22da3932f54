//! Rolling Logger
//!
//! Routes `log` and `tracing` output into one date-stamped file per day,
//! prunes old files past a retention count, and keeps the most recent lines
//! in memory so the app can show them without touching the disk.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;

/// Lines kept in memory for `recent_lines`
pub const DEFAULT_BUFFER_LINES: usize = 500;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log directory unavailable: {0}")]
    Io(#[from] io::Error),
    #[error("invalid log level: {0}")]
    Level(String),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

struct Inner {
    dir: PathBuf,
    app_name: String,
    retention: usize,
    current: Option<(NaiveDate, File)>,
    recent: VecDeque<String>,
    capacity: usize,
    partial: String,
}

impl Inner {
    fn file_name(&self, date: NaiveDate) -> String {
        format!("{}.{}.log", self.app_name, date.format("%Y-%m-%d"))
    }

    /// Open (or switch to) the file for `date`
    fn ensure_file(&mut self, date: NaiveDate) -> io::Result<&mut File> {
        let stale = !matches!(&self.current, Some((day, _)) if *day == date);
        if stale {
            let path = self.dir.join(self.file_name(date));
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            self.current = Some((date, file));
            self.prune()?;
        }
        match &mut self.current {
            Some((_, file)) => Ok(file),
            None => Err(io::Error::new(io::ErrorKind::Other, "no active log file")),
        }
    }

    /// Delete the oldest log files beyond the retention count
    fn prune(&self) -> io::Result<()> {
        let prefix = format!("{}.", self.app_name);
        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with(&prefix) && n.ends_with(".log"))
                    .unwrap_or(false)
            })
            .collect();
        if files.len() <= self.retention {
            return Ok(());
        }
        // date stamp sorts lexically
        files.sort();
        let excess = files.len() - self.retention;
        for path in files.into_iter().take(excess) {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn remember(&mut self, chunk: &str) {
        self.partial.push_str(chunk);
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            let line = line.trim_end().to_string();
            if line.is_empty() {
                continue;
            }
            if self.recent.len() == self.capacity {
                self.recent.pop_front();
            }
            self.recent.push_back(line);
        }
    }

    fn write_at(&mut self, date: NaiveDate, buf: &[u8]) -> io::Result<()> {
        self.ensure_file(date)?.write_all(buf)?;
        self.remember(&String::from_utf8_lossy(buf));
        Ok(())
    }
}

/// Shared file writer plus in-memory tail
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<Inner>>,
}

impl RollingWriter {
    pub fn new(
        dir: impl AsRef<Path>,
        app_name: &str,
        retention: usize,
        capacity: usize,
    ) -> Result<Self, LoggerError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                dir,
                app_name: app_name.to_string(),
                retention: retention.max(1),
                current: None,
                recent: VecDeque::with_capacity(capacity),
                capacity: capacity.max(1),
                partial: String::new(),
            })),
        })
    }

    /// The most recent `limit` lines, oldest first
    pub fn recent_lines(&self, limit: usize) -> Vec<String> {
        match self.inner.lock() {
            Ok(inner) => {
                let skip = inner.recent.len().saturating_sub(limit);
                inner.recent.iter().skip(skip).cloned().collect()
            }
            Err(_) => Vec::new(),
        }
    }

    fn write_at(&self, date: NaiveDate, buf: &[u8]) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        inner.write_at(date, buf)
    }
}

/// Per-event handle handed to the fmt layer
pub struct RollingHandle {
    writer: RollingWriter,
}

impl Write for RollingHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write_at(Local::now().date_naive(), buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self
            .writer
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        match &mut inner.current {
            Some((_, file)) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RollingHandle {
            writer: self.clone(),
        }
    }
}

static WRITER: OnceLock<RollingWriter> = OnceLock::new();

/// Install the global subscriber; `log` records are bridged into it.
///
/// `level` accepts `error`, `warn`, `info`, `debug`, `trace` or `off`.
pub fn init_logger(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    level: &str,
    retention: usize,
) -> Result<(), LoggerError> {
    let filter =
        LevelFilter::from_str(level).map_err(|_| LoggerError::Level(level.to_string()))?;
    let writer = RollingWriter::new(log_dir, app_name, retention, DEFAULT_BUFFER_LINES)?;
    WRITER
        .set(writer.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!(app = app_name, level = %filter, "logging to file");
    Ok(())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    WRITER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::error!("{}", message);
    Ok(())
}

/// Tail of the global log, oldest first; empty before `init_logger`
pub fn recent_lines(limit: usize) -> Vec<String> {
    WRITER
        .get()
        .map(|writer| writer.recent_lines(limit))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_writes_date_stamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RollingWriter::new(dir.path(), "pls", 3, 10).unwrap();
        writer.write_at(day(1), b"first line\n").unwrap();

        let content = fs::read_to_string(dir.path().join("pls.2026-10-01.log")).unwrap();
        assert_eq!(content, "first line\n");
    }

    #[test]
    fn test_rotation_prunes_beyond_retention() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RollingWriter::new(dir.path(), "pls", 2, 10).unwrap();
        for d in 1..=4 {
            writer.write_at(day(d), b"entry\n").unwrap();
        }
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["pls.2026-10-03.log", "pls.2026-10-04.log"]);
    }

    #[test]
    fn test_ring_buffer_keeps_latest_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RollingWriter::new(dir.path(), "pls", 1, 3).unwrap();
        writer.write_at(day(1), b"a\nb\n").unwrap();
        writer.write_at(day(1), b"c\nd\n").unwrap();
        assert_eq!(writer.recent_lines(10), vec!["b", "c", "d"]);
        assert_eq!(writer.recent_lines(1), vec!["d"]);
    }

    #[test]
    fn test_partial_lines_join_across_writes() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RollingWriter::new(dir.path(), "pls", 1, 5).unwrap();
        writer.write_at(day(1), b"hel").unwrap();
        assert!(writer.recent_lines(5).is_empty());
        writer.write_at(day(1), b"lo\n").unwrap();
        assert_eq!(writer.recent_lines(5), vec!["hello"]);
    }

    #[test]
    fn test_other_files_are_not_pruned() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();
        let writer = RollingWriter::new(dir.path(), "pls", 1, 5).unwrap();
        writer.write_at(day(1), b"x\n").unwrap();
        writer.write_at(day(2), b"y\n").unwrap();
        assert!(dir.path().join("notes.txt").exists());
        assert!(!dir.path().join("pls.2026-10-01.log").exists());
    }
}
