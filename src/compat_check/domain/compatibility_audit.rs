use super::NO_DATA;

/// PHP-compatibility verdict for one (slug, version) pair from the audit source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompatibilityAudit {
    /// PHP versions judged compatible, in upstream order
    Compatible(Vec<String>),
    NoData,
}

impl CompatibilityAudit {
    /// Builds an audit from an upstream list; an empty list means no data
    pub fn from_versions(versions: Vec<String>) -> Self {
        let versions: Vec<String> = versions
            .into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if versions.is_empty() {
            CompatibilityAudit::NoData
        } else {
            CompatibilityAudit::Compatible(versions)
        }
    }

    /// Renders the value shown in the "Supported PHP Version" column
    pub fn display_value(&self) -> String {
        match self {
            CompatibilityAudit::Compatible(versions) => versions.join(", "),
            CompatibilityAudit::NoData => NO_DATA.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_versions_keeps_order() {
        let audit =
            CompatibilityAudit::from_versions(vec!["7.4".into(), "7.3".into(), "8.0".into()]);
        assert_eq!(audit.display_value(), "7.4, 7.3, 8.0");
    }

    #[test]
    fn test_from_empty_versions_is_no_data() {
        let audit = CompatibilityAudit::from_versions(vec![" ".into()]);
        assert_eq!(audit, CompatibilityAudit::NoData);
        assert_eq!(audit.display_value(), NO_DATA);
    }
}
