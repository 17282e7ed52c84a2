use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{LogError, Result};
use crate::storage::config::StreamConfig;
use crate::storage::paths;
use crate::stream::Stream;

#[derive(Debug)]
struct Active {
    file: File,
    size: u64,
}

/// Append-only writer for one stream's artifact chain.
///
/// Appends exactly one newline-terminated line per call, serialized under a
/// per-stream mutex so concurrent appends never interleave. When the active
/// artifact reaches the stream's byte cap after a write, backups shift one
/// generation (`.k` -> `.k+1`, the oldest evicted) and a fresh active
/// artifact takes over. The cap never blocks or splits a write: an over-cap
/// line lands in full before rotation runs.
#[derive(Debug)]
pub struct RotatingWriter {
    dir: PathBuf,
    stream: Stream,
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    active: Mutex<Option<Active>>,
}

impl RotatingWriter {
    pub fn new(dir: &Path, stream: Stream, config: &StreamConfig) -> Self {
        RotatingWriter {
            dir: dir.to_path_buf(),
            stream,
            path: paths::active_path(dir, stream),
            max_bytes: config.max_bytes,
            backup_count: config.backup_count,
            active: Mutex::new(None),
        }
    }

    /// Append one line (without trailing newline) to the active artifact,
    /// rotating afterwards if the cap is reached. On failure the record is
    /// not retried; the handle is dropped so the next append re-opens and
    /// re-measures the artifact.
    pub fn append(&self, line: &str) -> Result<()> {
        let mut slot = self.active.lock();
        match self.append_locked(&mut slot, line) {
            Ok(()) => Ok(()),
            Err(e) => {
                *slot = None;
                Err(e)
            }
        }
    }

    fn append_locked(&self, slot: &mut Option<Active>, line: &str) -> Result<()> {
        let active = match &mut *slot {
            Some(active) => active,
            none => none.insert(self.open_active()?),
        };

        // One write_all call per record, newline included, so a concurrent
        // reader never observes a partial line boundary.
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        active.file.write_all(&buf)?;
        active.file.flush()?;
        active.size += buf.len() as u64;

        if self.max_bytes > 0 && active.size >= self.max_bytes {
            self.rotate(slot)?;
        }
        Ok(())
    }

    fn open_active(&self) -> Result<Active> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let size = file.metadata()?.len();
        Ok(Active { file, size })
    }

    /// Close the active artifact, shift backup generations and start a new
    /// empty active artifact. A failure mid-rotation leaves whatever active
    /// artifact exists intact; appending then simply continues on it.
    fn rotate(&self, slot: &mut Option<Active>) -> Result<()> {
        // Drop the handle before renaming; renaming an open file fails on
        // some platforms.
        *slot = None;
        self.shift_backups().map_err(|e| self.rotation_error(e))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.rotation_error(e))?;
        *slot = Some(Active { file, size: 0 });
        Ok(())
    }

    fn shift_backups(&self) -> std::io::Result<()> {
        if self.backup_count == 0 {
            return fs::remove_file(&self.path);
        }
        let oldest = paths::backup_path(&self.dir, self.stream, self.backup_count);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for generation in (1..self.backup_count).rev() {
            let from = paths::backup_path(&self.dir, self.stream, generation);
            if from.exists() {
                fs::rename(&from, paths::backup_path(&self.dir, self.stream, generation + 1))?;
            }
        }
        fs::rename(&self.path, paths::backup_path(&self.dir, self.stream, 1))
    }

    fn rotation_error(&self, source: std::io::Error) -> LogError {
        LogError::Rotation {
            artifact: self.stream.file_name().to_string(),
            source,
        }
    }

    pub fn flush(&self) -> Result<()> {
        let mut slot = self.active.lock();
        if let Some(active) = slot.as_mut() {
            active.file.flush()?;
        }
        Ok(())
    }
}
