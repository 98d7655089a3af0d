//! Versions table parsing.
//!
//! The versions file is a markdown document containing one table whose
//! first column holds `[PluginName](https://github.com/owner/repo)` links
//! and whose remaining columns hold version strings, commit hashes, or
//! blanks. Malformed rows are dropped silently; only a missing file is an
//! error.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::model::Plugin;

/// Literal marker in the first column for plugins without a public source.
pub const NO_SOURCE_MARKER: &str = "**NO SRC**";

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static GITHUB_REPO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/]+)/([^/]+)").unwrap());
static COMMIT_HASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9a-f]{7,}$").unwrap());

/// Reads the versions file and parses its plugin table.
///
/// # Errors
///
/// Returns an error if the file cannot be read. Malformed table content
/// never errors; bad rows are skipped.
pub fn load_plugins(path: &Path) -> Result<Vec<Plugin>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read versions file: {}", path.display()))?;
    Ok(parse_versions_table(&content))
}

/// Parses the first markdown table in `content` into plugin records.
///
/// A header row (`| Plugin ...`) or separator row (`| --- ...`) marks the
/// start of the table; the first non-`|` line after that ends it. The
/// table is contiguous.
pub fn parse_versions_table(content: &str) -> Vec<Plugin> {
    let mut plugins = Vec::new();
    let mut in_table = false;

    for raw in content.lines() {
        let line = raw.trim();

        if line.starts_with("| Plugin") || line.starts_with("| ---") {
            in_table = true;
            continue;
        }

        if in_table {
            if !line.starts_with('|') {
                break;
            }
            if let Some(plugin) = parse_row(line) {
                plugins.push(plugin);
            }
        }
    }

    plugins
}

fn parse_row(line: &str) -> Option<Plugin> {
    // `| a | b |` splits into ["", "a", "b", ""]; keep the inner cells.
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return None;
    }
    let cells: Vec<&str> = parts[1..parts.len() - 1].iter().map(|c| c.trim()).collect();
    if cells.len() < 2 {
        return None;
    }

    let plugin_cell = cells[0];
    if plugin_cell.contains(NO_SOURCE_MARKER) {
        return None;
    }

    let link = MARKDOWN_LINK.captures(plugin_cell)?;
    let name = link[1].to_string();
    let source_url = link[2].trim_end_matches('/').to_string();

    let repo_match = GITHUB_REPO.captures(&source_url)?;
    let owner = repo_match[1].to_string();
    let repo = repo_match[2].to_string();

    let versions: Vec<String> = cells[1..].iter().map(|v| v.to_string()).collect();

    // Classification looks at the first cell only, even when it is blank
    // and a later column holds a hash. That mirrors the source table's
    // own convention.
    let tracks_commits = versions
        .first()
        .is_some_and(|v| !v.is_empty() && COMMIT_HASH.is_match(v));

    Some(Plugin {
        name,
        source_url,
        owner,
        repo,
        versions,
        tracks_commits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = "\
# Plugin versions

| Plugin | v3.2 | v3.3 |
| --- | --- | --- |
| [TopSky](https://github.com/topsky/plugin/) | 2.4.1 | 2.5.0 |
| [GroundRadar](https://github.com/euroscope/ground-radar) | ab12cd3 | |
| **NO SRC** SomePlugin | 1.0 | 1.0 |
| Not a link | 1.0 | 1.0 |
| [BadHost](https://example.com/foo) | 1.0 | 1.0 |

Some trailing text.
";

    #[test]
    fn test_parse_extracts_owner_and_repo() {
        let plugins = parse_versions_table(TABLE);
        assert_eq!(plugins.len(), 2);

        let topsky = &plugins[0];
        assert_eq!(topsky.name, "TopSky");
        assert_eq!(topsky.owner, "topsky");
        assert_eq!(topsky.repo, "plugin");
        assert_eq!(topsky.source_url, "https://github.com/topsky/plugin");
        assert_eq!(topsky.versions, vec!["2.4.1", "2.5.0"]);
        assert!(!topsky.tracks_commits);
    }

    #[test]
    fn test_parse_commit_tracked_plugin() {
        let plugins = parse_versions_table(TABLE);
        let radar = &plugins[1];
        assert_eq!(radar.slug(), "euroscope/ground-radar");
        assert!(radar.tracks_commits);
        assert_eq!(radar.versions, vec!["ab12cd3", ""]);
    }

    #[test]
    fn test_no_source_rows_are_skipped() {
        let table = "\
| Plugin | v3.2 |
| --- | --- |
| **NO SRC** [Linked](https://github.com/a/b) | 1.0 |
";
        assert!(parse_versions_table(table).is_empty());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let plugins = parse_versions_table(TABLE);
        assert!(plugins.iter().all(|p| !p.name.contains("Bad")));
    }

    #[test]
    fn test_table_boundary_is_contiguous() {
        let table = "\
| Plugin | v3.2 |
| --- | --- |
| [One](https://github.com/a/one) | 1.0 |

| [Two](https://github.com/a/two) | 1.0 |
";
        let plugins = parse_versions_table(table);
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].name, "One");
    }

    #[test]
    fn test_commit_classification_uses_first_cell_only() {
        let table = "\
| Plugin | v3.2 | v3.3 |
| --- | --- | --- |
| [Gap](https://github.com/a/gap) | | ab12cd3 |
";
        let plugins = parse_versions_table(table);
        assert_eq!(plugins.len(), 1);
        assert!(!plugins[0].tracks_commits);
    }

    #[test]
    fn test_hash_classification_rules() {
        for (cell, expected) in [
            ("ab12cd3", true),       // exactly 7 hex chars
            ("ab12cd3456789", true), // longer is fine
            ("ab12cd", false),       // too short
            ("AB12CD3", false),      // uppercase is not a hash cell
            ("1.2.3", false),
        ] {
            let table = format!(
                "| Plugin | v3.2 |\n| --- | --- |\n| [P](https://github.com/a/b) | {cell} |\n"
            );
            let plugins = parse_versions_table(&table);
            assert_eq!(plugins[0].tracks_commits, expected, "cell {cell:?}");
        }
    }

    #[test]
    fn test_load_plugins_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();

        let plugins = load_plugins(file.path()).unwrap();
        assert_eq!(plugins.len(), 2);
    }

    #[test]
    fn test_load_plugins_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_plugins(&dir.path().join("VERSIONS.md"));
        assert!(result.is_err());
    }
}
