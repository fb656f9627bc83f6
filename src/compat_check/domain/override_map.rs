use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Portal-supplied PHP compatibility per slug
///
/// Values are comma-joined, sorted, deduplicated version lists such as
/// `"7.4, 8.0, 8.1"`. A slug present here takes precedence over the audit
/// source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteOverrideMap(BTreeMap<String, String>);

impl RemoteOverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the override for a slug, ignoring empty values
    pub fn get(&self, slug: &str) -> Option<&str> {
        self.0
            .get(slug)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn insert(&mut self, slug: impl Into<String>, value: impl Into<String>) {
        self.0.insert(slug.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl FromIterator<(String, String)> for RemoteOverrideMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_ignores_empty_values() {
        let mut map = RemoteOverrideMap::new();
        map.insert("akismet", "8.1, 8.2");
        map.insert("blank", "  ");

        assert_eq!(map.get("akismet"), Some("8.1, 8.2"));
        assert_eq!(map.get("blank"), None);
        assert_eq!(map.get("missing"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let map: RemoteOverrideMap =
            [("jetpack".to_string(), "8.0".to_string())].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"jetpack":"8.0"}"#);

        let back: RemoteOverrideMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
