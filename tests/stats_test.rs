use assert_fs::TempDir;

use bot_activity_log::format::format_stats;
use bot_activity_log::{ActivityLogger, LogConfig};

#[test]
fn size_mb_matches_bytes_written() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("logs");
    let logger = ActivityLogger::open(LogConfig::with_dir(dir.clone())).unwrap();
    logger.log_error("seed", None, None);

    // Grow the artifact to a known size out of band, then re-read stats.
    let path = dir.join("bot_errors.log");
    std::fs::write(&path, vec![b'x'; 3 * 1024 * 1024 / 2]).unwrap();

    let stats = logger.stats();
    assert_eq!(stats["bot_errors.log"].size_mb, 1.5);
}

#[test]
fn stats_cover_backup_generations() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("logs");
    let logger = ActivityLogger::open(LogConfig::with_dir(dir.clone())).unwrap();
    logger.log_bot_started();
    std::fs::write(dir.join("system_events.log.1"), "rotated\n").unwrap();
    std::fs::write(dir.join("system_events.log.2"), "older\n").unwrap();

    let stats = logger.stats();
    assert!(stats.contains_key("system_events.log"));
    assert!(stats.contains_key("system_events.log.1"));
    assert!(stats.contains_key("system_events.log.2"));
}

#[test]
fn last_modified_is_parseable_iso8601() {
    let tmp = TempDir::new().unwrap();
    let logger = ActivityLogger::open(LogConfig::with_dir(tmp.path().join("logs"))).unwrap();
    logger.log_bot_started();

    let stats = logger.stats();
    let modified = &stats["system_events.log"].last_modified;
    assert!(chrono::DateTime::parse_from_rfc3339(modified).is_ok());
}

#[test]
fn out_of_band_deletion_is_tolerated() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("logs");
    let logger = ActivityLogger::open(LogConfig::with_dir(dir.clone())).unwrap();
    logger.log_bot_started();
    logger.log_error("boom", None, None);

    std::fs::remove_file(dir.join("system_events.log")).unwrap();

    let stats = logger.stats();
    assert!(!stats.contains_key("system_events.log"));
    assert!(stats.contains_key("bot_errors.log"));
}

#[test]
fn stats_text_for_empty_map_reads_unavailable() {
    let tmp = TempDir::new().unwrap();
    let logger = ActivityLogger::open(LogConfig::with_dir(tmp.path().join("logs"))).unwrap();
    // Nothing written yet: no artifacts, empty map, "unavailable" text.
    let text = format_stats(&logger.stats());
    assert_eq!(text, "Log statistics are unavailable.");
}

#[test]
fn stats_text_lists_each_artifact() {
    let tmp = TempDir::new().unwrap();
    let logger = ActivityLogger::open(LogConfig::with_dir(tmp.path().join("logs"))).unwrap();
    logger.log_bot_started();
    logger.log_error("boom", None, None);

    let text = format_stats(&logger.stats());
    assert!(text.contains("system_events.log"));
    assert!(text.contains("bot_errors.log"));
    assert!(text.contains("size:"));
    assert!(text.contains("modified:"));
}
