use crate::model::Plugin;

/// Returns true when `current` lags behind `latest`.
///
/// Commit identifiers have no ordering, so any (case-insensitive)
/// difference counts as outdated. Release versions compare as semver
/// where both sides parse, otherwise plain string inequality is the
/// outdated signal.
pub fn is_outdated(current: &str, latest: &str, commit_mode: bool) -> bool {
    if commit_mode {
        return !current.eq_ignore_ascii_case(latest);
    }

    if let (Ok(current_ver), Ok(latest_ver)) = (
        semver::Version::parse(current.trim_start_matches('v')),
        semver::Version::parse(latest.trim_start_matches('v')),
    ) {
        return current_ver < latest_ver;
    }

    // Fall back to string comparison for non-semver versions
    current != latest
}

/// A plugin is outdated when any non-empty recorded version lags the
/// resolved latest. Empty cells mean "not tracked in this column".
pub fn any_outdated(plugin: &Plugin, latest: &str) -> bool {
    plugin
        .versions
        .iter()
        .filter(|v| !v.is_empty())
        .any(|v| is_outdated(v, latest, plugin.tracks_commits))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin(versions: &[&str], tracks_commits: bool) -> Plugin {
        Plugin {
            name: "PluginX".to_string(),
            source_url: "https://github.com/owner/pluginx".to_string(),
            owner: "owner".to_string(),
            repo: "pluginx".to_string(),
            versions: versions.iter().map(|v| v.to_string()).collect(),
            tracks_commits,
        }
    }

    #[test]
    fn test_release_mode_semver() {
        assert!(is_outdated("1.2.0", "1.3.0", false));
        assert!(!is_outdated("1.3.0", "1.3.0", false));
        assert!(!is_outdated("2.0.0", "1.9.9", false));
    }

    #[test]
    fn test_release_mode_v_prefix() {
        assert!(is_outdated("v1.2.0", "1.3.0", false));
        assert!(!is_outdated("v1.3.0", "1.3.0", false));
    }

    #[test]
    fn test_release_mode_unparsable_falls_back_to_inequality() {
        assert!(is_outdated("banana", "1.0.0", false));
        assert!(is_outdated("1.0.0", "banana", false));
        assert!(!is_outdated("banana", "banana", false));
    }

    #[test]
    fn test_commit_mode_inequality() {
        assert!(!is_outdated("ab12cd3", "ab12cd3", true));
        assert!(!is_outdated("AB12CD3", "ab12cd3", true));
        assert!(is_outdated("ab12cd3", "ab12cd4", true));
        // No ordering semantics: "newer" recorded hash still flags.
        assert!(is_outdated("ffffff9", "0000001", true));
    }

    #[test]
    fn test_any_outdated_skips_empty_cells() {
        let p = plugin(&["", "1.3.0"], false);
        assert!(!any_outdated(&p, "1.3.0"));

        let p = plugin(&["", "1.2.0"], false);
        assert!(any_outdated(&p, "1.3.0"));
    }

    #[test]
    fn test_any_outdated_short_circuits_on_first_match() {
        let p = plugin(&["1.0.0", "1.3.0"], false);
        assert!(any_outdated(&p, "1.3.0"));
    }
}
