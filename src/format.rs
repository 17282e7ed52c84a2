use std::collections::BTreeMap;

use crate::storage::stats::ArtifactStats;

/// Render the statistics map as text the routing layer can send back for a
/// stats query. An empty map becomes an "unavailable" message rather than an
/// error.
pub fn format_stats(stats: &BTreeMap<String, ArtifactStats>) -> String {
    if stats.is_empty() {
        return "Log statistics are unavailable.".to_string();
    }
    let mut out = String::from("Log statistics:\n");
    for (name, info) in stats {
        out.push_str(&format!(
            "{}\n  size: {:.2} MB\n  modified: {}\n",
            name, info.size_mb, info.last_modified
        ));
    }
    out
}
