use crate::compat_check::domain::{PortalScanEntry, RemoteOverrideMap};
use crate::compat_check::services::VersionComparator;
use std::collections::{BTreeMap, BTreeSet};

/// Default compatibility ruleset the Portal entries must declare
pub const DEFAULT_STANDARD: &str = "PHPCompatibilityWP";

/// Folds completed Portal scan entries into the override map
pub struct OverrideMerger {
    expected_standard: String,
}

impl OverrideMerger {
    pub fn new(expected_standard: impl Into<String>) -> Self {
        Self {
            expected_standard: expected_standard.into(),
        }
    }

    /// Computes the per-slug override values from a batch of entries
    ///
    /// Entries with another standard, a false compatibility flag, or no slug
    /// are skipped. Tokens for the same slug accumulate across entries.
    pub fn compute(&self, entries: &[PortalScanEntry]) -> BTreeMap<String, String> {
        let mut tokens_by_slug: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for entry in entries {
            let slug = entry.slug.trim();
            if slug.is_empty() || !self.matches_standard(&entry.standard) || !entry.is_compatible()
            {
                continue;
            }
            tokens_by_slug
                .entry(slug.to_string())
                .or_default()
                .extend(entry.php_tokens());
        }

        tokens_by_slug
            .into_iter()
            .filter(|(_, tokens)| !tokens.is_empty())
            .map(|(slug, tokens)| {
                let mut versions: Vec<String> = tokens.into_iter().collect();
                versions.sort_by(|a, b| VersionComparator::compare(a, b));
                (slug, versions.join(", "))
            })
            .collect()
    }

    /// Writes changed values into the map and returns how many slugs changed
    pub fn apply(computed: BTreeMap<String, String>, overrides: &mut RemoteOverrideMap) -> usize {
        let mut changed = 0;
        for (slug, value) in computed {
            if overrides.get(&slug) != Some(value.as_str()) {
                overrides.insert(slug, value);
                changed += 1;
            }
        }
        changed
    }

    fn matches_standard(&self, standard: &str) -> bool {
        standard.trim().eq_ignore_ascii_case(&self.expected_standard)
    }
}

impl Default for OverrideMerger {
    fn default() -> Self {
        Self::new(DEFAULT_STANDARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn entry(slug: &str, php: &str, standard: &str, compatible: Value) -> PortalScanEntry {
        PortalScanEntry {
            slug: slug.to_string(),
            php_version: json!(php),
            standard: standard.to_string(),
            compatible,
        }
    }

    #[test]
    fn test_accumulates_dedups_and_sorts() {
        let entries = vec![
            entry("akismet", "8.1, 8.2", DEFAULT_STANDARD, json!(true)),
            entry("akismet", "8.2, 8.3", DEFAULT_STANDARD, json!(true)),
        ];

        let computed = OverrideMerger::default().compute(&entries);
        assert_eq!(computed.get("akismet").unwrap(), "8.1, 8.2, 8.3");
    }

    #[test]
    fn test_sorts_numerically() {
        let entries = vec![entry("jetpack", "8.10, 7.4, 8.2", DEFAULT_STANDARD, json!("1"))];
        let computed = OverrideMerger::default().compute(&entries);
        assert_eq!(computed.get("jetpack").unwrap(), "7.4, 8.2, 8.10");
    }

    #[test]
    fn test_skips_other_standard_and_incompatible() {
        let entries = vec![
            entry("akismet", "8.1", "WordPress-Core", json!(true)),
            entry("akismet", "8.2", DEFAULT_STANDARD, json!(false)),
            entry("akismet", "8.3", "phpcompatibilitywp", json!(1)),
            entry("", "8.3", DEFAULT_STANDARD, json!(true)),
        ];

        let computed = OverrideMerger::default().compute(&entries);
        assert_eq!(computed.len(), 1);
        assert_eq!(computed.get("akismet").unwrap(), "8.3");
    }

    #[test]
    fn test_apply_counts_only_changes() {
        let mut overrides = RemoteOverrideMap::new();
        overrides.insert("akismet", "8.1, 8.2");

        let mut computed = BTreeMap::new();
        computed.insert("akismet".to_string(), "8.1, 8.2".to_string());
        computed.insert("jetpack".to_string(), "8.0".to_string());

        let changed = OverrideMerger::apply(computed, &mut overrides);
        assert_eq!(changed, 1);
        assert_eq!(overrides.get("jetpack"), Some("8.0"));

        let mut computed = BTreeMap::new();
        computed.insert("akismet".to_string(), "8.1, 8.2, 8.3".to_string());
        assert_eq!(OverrideMerger::apply(computed, &mut overrides), 1);
        assert_eq!(overrides.get("akismet"), Some("8.1, 8.2, 8.3"));
    }
}
