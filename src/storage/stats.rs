use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use filetime::FileTime;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;

use crate::error::Result;

/// Size and last-modified time of one on-disk artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactStats {
    /// File size in MiB, rounded to two decimals.
    pub size_mb: f64,
    /// Last modification time, ISO-8601 UTC.
    pub last_modified: String,
}

/// Matcher for artifact names: active files plus numbered backup generations.
fn artifact_globs() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    builder.add(Glob::new("*.log")?);
    builder.add(Glob::new("*.log.[0-9]*")?);
    Ok(builder.build()?)
}

/// Scan the log directory and report per-artifact statistics.
///
/// Best-effort snapshot: takes no lock, and a file that vanishes between
/// listing and stat (a racing rotation, an out-of-band delete) is skipped
/// rather than failing the whole call. A missing directory yields an empty
/// map.
pub fn collect(dir: &Path) -> Result<BTreeMap<String, ArtifactStats>> {
    let mut stats = BTreeMap::new();
    if !dir.exists() {
        return Ok(stats);
    }
    let matcher = artifact_globs()?;
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        let name = entry.file_name().to_string_lossy().to_string();
        if !matcher.is_match(&name) {
            continue;
        }
        let meta = match entry.metadata() {
            Ok(meta) if meta.is_file() => meta,
            _ => continue,
        };
        let mtime = FileTime::from_last_modification_time(&meta);
        let last_modified = match DateTime::<Utc>::from_timestamp(mtime.unix_seconds(), mtime.nanoseconds()) {
            Some(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
            None => continue,
        };
        stats.insert(
            name,
            ArtifactStats {
                size_mb: round_mb(meta.len()),
                last_modified,
            },
        );
    }
    Ok(stats)
}

fn round_mb(bytes: u64) -> f64 {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    (mb * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_dir_yields_empty_map() {
        let tmp = TempDir::new().unwrap();
        let stats = collect(&tmp.path().join("absent")).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn reports_active_and_backup_artifacts() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("user_actions.log"), "a\n").unwrap();
        fs::write(tmp.path().join("user_actions.log.1"), "b\n").unwrap();
        fs::write(tmp.path().join("bot_errors.log"), "c\n").unwrap();
        let stats = collect(tmp.path()).unwrap();
        let names: Vec<_> = stats.keys().cloned().collect();
        assert_eq!(
            names,
            vec!["bot_errors.log", "user_actions.log", "user_actions.log.1"]
        );
    }

    #[test]
    fn ignores_files_outside_naming_convention() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("user_actions.log"), "a\n").unwrap();
        fs::write(tmp.path().join("notes.txt"), "x\n").unwrap();
        fs::write(tmp.path().join(".tmp.user_actions"), "x\n").unwrap();
        let stats = collect(tmp.path()).unwrap();
        assert_eq!(stats.len(), 1);
        assert!(stats.contains_key("user_actions.log"));
    }

    #[test]
    fn size_is_rounded_to_two_decimals() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("system_events.log");
        fs::write(&path, vec![b'x'; 1024 * 1024]).unwrap();
        let stats = collect(tmp.path()).unwrap();
        assert_eq!(stats["system_events.log"].size_mb, 1.0);

        fs::write(&path, vec![b'x'; 1024 * 1024 / 4]).unwrap();
        let stats = collect(tmp.path()).unwrap();
        assert_eq!(stats["system_events.log"].size_mb, 0.25);

        // 100 KiB is 0.09765625 MiB, rounds to 0.1.
        fs::write(&path, vec![b'x'; 100 * 1024]).unwrap();
        let stats = collect(tmp.path()).unwrap();
        assert_eq!(stats["system_events.log"].size_mb, 0.1);
    }

    #[test]
    fn mtime_is_iso8601_utc() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bot_errors.log");
        fs::write(&path, "e\n").unwrap();
        filetime::set_file_mtime(&path, FileTime::from_unix_time(1_700_000_000, 0)).unwrap();
        let stats = collect(tmp.path()).unwrap();
        assert_eq!(stats["bot_errors.log"].last_modified, "2023-11-14T22:13:20Z");
    }

    #[test]
    fn deleted_file_is_omitted_on_next_call() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user_actions.log");
        fs::write(&path, "a\n").unwrap();
        assert_eq!(collect(tmp.path()).unwrap().len(), 1);
        fs::remove_file(&path).unwrap();
        assert!(collect(tmp.path()).unwrap().is_empty());
    }
}
