use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::stream::Stream;

/// Create the log directory (and parents) if absent.
pub fn create_log_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Path of a stream's active artifact.
pub fn active_path(dir: &Path, stream: Stream) -> PathBuf {
    dir.join(stream.file_name())
}

/// Path of a stream's backup artifact. Generation 1 is the most recent.
pub fn backup_path(dir: &Path, stream: Stream, generation: usize) -> PathBuf {
    dir.join(format!("{}.{}", stream.file_name(), generation))
}
